//! The descriptor value and name-keyed merging.

use serde::Serialize;

use crate::mapper::JsonFieldType;

/// A key/value attribute attached to a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    key: String,
    value: String,
}

impl Attribute {
    /// Create an attribute.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Attribute key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Attribute value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// One documented field, parameter, header, cookie or link.
///
/// Immutable: the `with_*` methods return an updated copy. Two descriptors
/// occupy the same slot when their [`name`](Self::name)s are equal, whatever
/// their prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    #[serde(skip_serializing_if = "String::is_empty")]
    prefix: String,
    name: String,
    #[serde(rename = "type")]
    ty: JsonFieldType,
    description: Option<String>,
    optional: bool,
    ignore: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<Attribute>,
}

impl Descriptor {
    /// Start building a descriptor named `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder::new(name)
    }

    /// A required `STRING` descriptor with a description.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::builder(name).description(description).build()
    }

    /// Path prefix (empty when unset).
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Unprefixed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `prefix + name`, with no separator inserted.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}{}", self.prefix, self.name)
    }

    /// Semantic JSON type.
    #[must_use]
    pub fn ty(&self) -> JsonFieldType {
        self.ty
    }

    /// Description text or unresolved expression.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the value may be omitted.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Whether the value is left out of the documentation.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        self.ignore
    }

    /// Attached attributes (usually a single `constraints` entry).
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Value of the attribute named `key`, if present.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(Attribute::value)
    }

    /// Copy with a different prefix.
    #[must_use]
    pub fn with_prefix(&self, prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..self.clone()
        }
    }

    /// Copy with a different type.
    #[must_use]
    pub fn with_type(&self, ty: JsonFieldType) -> Self {
        Self { ty, ..self.clone() }
    }

    /// Copy with a different description.
    #[must_use]
    pub fn with_description(&self, description: Option<String>) -> Self {
        Self {
            description,
            ..self.clone()
        }
    }

    /// Copy with the optional flag set.
    #[must_use]
    pub fn with_optional(&self, optional: bool) -> Self {
        Self {
            optional,
            ..self.clone()
        }
    }

    /// Copy with the ignore flag set.
    #[must_use]
    pub fn with_ignore(&self, ignore: bool) -> Self {
        Self {
            ignore,
            ..self.clone()
        }
    }

    /// Copy with different attributes.
    #[must_use]
    pub fn with_attributes(&self, attributes: Vec<Attribute>) -> Self {
        Self {
            attributes,
            ..self.clone()
        }
    }
}

/// Builder for [`Descriptor`].
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    inner: Descriptor,
}

impl DescriptorBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Descriptor {
                prefix: String::new(),
                name: name.into(),
                ty: JsonFieldType::String,
                description: None,
                optional: false,
                ignore: false,
                attributes: Vec::new(),
            },
        }
    }

    /// Path prefix such as `user.` or `[].`; `None` or empty means no prefix.
    #[must_use]
    pub fn prefix<S: Into<String>>(mut self, prefix: Option<S>) -> Self {
        self.inner.prefix = prefix.map(Into::into).unwrap_or_default();
        self
    }

    /// Semantic JSON type (default `STRING`).
    #[must_use]
    pub fn ty(mut self, ty: JsonFieldType) -> Self {
        self.inner.ty = ty;
        self
    }

    /// Description text or `{code}` expression.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = Some(description.into());
        self
    }

    /// Mark as optional (default required).
    #[must_use]
    pub fn optional(mut self, optional: bool) -> Self {
        self.inner.optional = optional;
        self
    }

    /// Mark as ignored (default included).
    #[must_use]
    pub fn ignore(mut self, ignore: bool) -> Self {
        self.inner.ignore = ignore;
        self
    }

    /// Append an attribute.
    #[must_use]
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.inner.attributes.push(attribute);
        self
    }

    /// Replace all attributes.
    #[must_use]
    pub fn attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.inner.attributes = attributes;
        self
    }

    /// Finish.
    #[must_use]
    pub fn build(self) -> Descriptor {
        self.inner
    }
}

/// Union of `target` and `source` keyed by name.
///
/// A source entry replaces the target entry of the same name wholesale, in
/// the target's position; names new to the target are appended in source
/// order. Each name appears once in the result: among duplicates the last
/// one wins and keeps the first one's position.
#[must_use]
pub fn merge(target: &[Descriptor], source: &[Descriptor]) -> Vec<Descriptor> {
    let mut merged: Vec<Descriptor> = Vec::with_capacity(target.len() + source.len());

    for descriptor in target.iter().chain(source) {
        match merged.iter_mut().find(|d| d.name == descriptor.name) {
            Some(slot) => *slot = descriptor.clone(),
            None => merged.push(descriptor.clone()),
        }
    }

    merged
}
