//! Hand-written descriptor lists: parameters, headers and free-form descriptors.
//!
//! Descriptions may be plain text or `{code}` expressions; expressions are
//! resolved when [`generate`](ParamsGenerator::generate) is called. Names are
//! validated as they are added and a repeated name replaces the earlier entry.

use crate::descriptor::{merge, Descriptor};
use crate::error::{Error, Result};
use crate::mapper::JsonFieldType;
use crate::message::DescriptionMessageSource;
use crate::operator::Operator;
use crate::snippet::{HeaderDescriptor, ParameterDescriptor, Snippet};

fn validate_name(name: &str, kind: &'static str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidName { kind });
    }
    Ok(())
}

fn resolve_descriptions(messages: &DescriptionMessageSource, descriptors: &[Descriptor]) -> Vec<Descriptor> {
    descriptors
        .iter()
        .map(|d| match d.description() {
            Some(expression) => {
                d.with_description(Some(messages.resolve_expression(Some(expression), expression)))
            }
            None => d.clone(),
        })
        .collect()
}

fn push(descriptors: &mut Vec<Descriptor>, descriptor: Descriptor) {
    let merged = merge(descriptors, std::slice::from_ref(&descriptor));
    *descriptors = merged;
}

macro_rules! descriptor_adders {
    ($kind:literal) => {
        /// Add a required `STRING` entry.
        ///
        /// # Errors
        ///
        /// Returns [`Error::InvalidName`] if `name` is blank.
        pub fn add(self, name: &str, description: &str) -> Result<Self> {
            self.add_typed_optional(name, description, JsonFieldType::String, false)
        }

        /// Add a required entry of type `ty`.
        ///
        /// # Errors
        ///
        /// Returns [`Error::InvalidName`] if `name` is blank.
        pub fn add_typed(self, name: &str, description: &str, ty: JsonFieldType) -> Result<Self> {
            self.add_typed_optional(name, description, ty, false)
        }

        /// Add an entry with every property spelled out.
        ///
        /// # Errors
        ///
        /// Returns [`Error::InvalidName`] if `name` is blank.
        pub fn add_typed_optional(
            mut self,
            name: &str,
            description: &str,
            ty: JsonFieldType,
            optional: bool,
        ) -> Result<Self> {
            validate_name(name, $kind)?;
            let descriptor = Descriptor::builder(name)
                .description(description)
                .ty(ty)
                .optional(optional)
                .build();
            push(&mut self.descriptors, descriptor);
            Ok(self)
        }

        /// Add a prebuilt descriptor as-is.
        #[must_use]
        pub fn add_descriptor(mut self, descriptor: Descriptor) -> Self {
            push(&mut self.descriptors, descriptor);
            self
        }
    };
}

/// Builds parameter descriptors by hand.
#[derive(Debug, Clone)]
pub struct ParamsGenerator {
    messages: DescriptionMessageSource,
    descriptors: Vec<Descriptor>,
}

impl ParamsGenerator {
    /// An empty generator resolving expressions through `messages`.
    #[must_use]
    pub fn new(messages: DescriptionMessageSource) -> Self {
        Self {
            messages,
            descriptors: Vec::new(),
        }
    }

    descriptor_adders!("paramName");

    /// Resolve descriptions and hand the descriptors to an [`Operator`].
    #[must_use]
    pub fn generate(&self) -> Operator {
        Operator::new(resolve_descriptions(&self.messages, &self.descriptors))
    }

    /// Path parameters snippet.
    #[must_use]
    pub fn path_parameters(&self) -> Snippet<ParameterDescriptor> {
        self.generate().path_parameters()
    }

    /// Query parameters snippet.
    #[must_use]
    pub fn query_parameters(&self) -> Snippet<ParameterDescriptor> {
        self.generate().query_parameters()
    }

    /// Form parameters snippet.
    #[must_use]
    pub fn form_parameters(&self) -> Snippet<ParameterDescriptor> {
        self.generate().form_parameters()
    }

    /// Parameter descriptors.
    #[must_use]
    pub fn to_parameter(&self) -> Vec<ParameterDescriptor> {
        self.generate().to_parameter()
    }
}

/// Builds header descriptors by hand.
#[derive(Debug, Clone)]
pub struct HeadersGenerator {
    messages: DescriptionMessageSource,
    descriptors: Vec<Descriptor>,
}

impl HeadersGenerator {
    /// An empty generator resolving expressions through `messages`.
    #[must_use]
    pub fn new(messages: DescriptionMessageSource) -> Self {
        Self {
            messages,
            descriptors: Vec::new(),
        }
    }

    /// Add a header with a description.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if `header` is blank.
    pub fn add(mut self, header: &str, description: &str) -> Result<Self> {
        validate_name(header, "headerName")?;
        push(&mut self.descriptors, Descriptor::new(header, description));
        Ok(self)
    }

    /// Add a header whose description is a media type such as
    /// `application/json`; `None` leaves it undescribed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if `header` is blank.
    pub fn add_media_type(mut self, header: &str, media_type: Option<&str>) -> Result<Self> {
        validate_name(header, "headerName")?;
        let mut builder = Descriptor::builder(header);
        if let Some(media_type) = media_type {
            builder = builder.description(media_type);
        }
        push(&mut self.descriptors, builder.build());
        Ok(self)
    }

    /// Resolve descriptions and hand the descriptors to an [`Operator`].
    #[must_use]
    pub fn generate(&self) -> Operator {
        Operator::new(resolve_descriptions(&self.messages, &self.descriptors))
    }

    /// Request headers snippet.
    #[must_use]
    pub fn request_headers(&self) -> Snippet<HeaderDescriptor> {
        self.generate().request_headers()
    }

    /// Response headers snippet.
    #[must_use]
    pub fn response_headers(&self) -> Snippet<HeaderDescriptor> {
        self.generate().response_headers()
    }

    /// Header descriptors.
    #[must_use]
    pub fn to_header(&self) -> Vec<HeaderDescriptor> {
        self.generate().to_header()
    }
}

/// Builds arbitrary descriptors by hand, e.g. payload fields of a map.
#[derive(Debug, Clone)]
pub struct DescriptorsGenerator {
    messages: DescriptionMessageSource,
    descriptors: Vec<Descriptor>,
}

impl DescriptorsGenerator {
    /// An empty generator resolving expressions through `messages`.
    #[must_use]
    pub fn new(messages: DescriptionMessageSource) -> Self {
        Self {
            messages,
            descriptors: Vec::new(),
        }
    }

    descriptor_adders!("name");

    /// Resolve descriptions and hand the descriptors to an [`Operator`].
    #[must_use]
    pub fn generate(&self) -> Operator {
        Operator::new(resolve_descriptions(&self.messages, &self.descriptors))
    }

    /// Like [`generate`](Self::generate), with `prefix` applied to every descriptor.
    #[must_use]
    pub fn generate_with_prefix(&self, prefix: &str) -> Operator {
        let descriptors = resolve_descriptions(&self.messages, &self.descriptors)
            .iter()
            .map(|d| d.with_prefix(prefix))
            .collect();
        Operator::new(descriptors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Locale, StaticMessageSource};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn messages() -> DescriptionMessageSource {
        DescriptionMessageSource::new(
            Arc::new(StaticMessageSource::new().message("param.page", "Page number")),
            Locale::root(),
        )
    }

    #[test]
    fn params_resolve_expressions() {
        let params = ParamsGenerator::new(messages())
            .add("page", "{param.page}")
            .unwrap()
            .add_typed_optional("size", "Page size", JsonFieldType::Number, true)
            .unwrap()
            .add("sort", "{param.sort}")
            .unwrap()
            .to_parameter();

        let described: Vec<(&str, Option<&str>, bool)> = params
            .iter()
            .map(|p| (p.name.as_str(), p.description.as_deref(), p.optional))
            .collect();
        assert_eq!(
            described,
            vec![
                ("page", Some("Page number"), false),
                ("size", Some("Page size"), true),
                ("sort", Some("{param.sort}"), false),
            ]
        );
    }

    #[test]
    fn blank_names_are_rejected() {
        let err = ParamsGenerator::new(messages()).add("  ", "x").unwrap_err();
        assert_eq!(err.to_string(), "paramName must not be null or blank");

        let err = HeadersGenerator::new(messages()).add("", "x").unwrap_err();
        assert_eq!(err.to_string(), "headerName must not be null or blank");

        let err = DescriptorsGenerator::new(messages()).add("\t", "x").unwrap_err();
        assert_eq!(err.to_string(), "name must not be null or blank");
    }

    #[test]
    fn repeated_names_replace() {
        let headers = HeadersGenerator::new(messages())
            .add("Authorization", "Bearer token")
            .unwrap()
            .add_media_type("Content-Type", Some("application/json"))
            .unwrap()
            .add("Authorization", "Session token")
            .unwrap()
            .to_header();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].description.as_deref(), Some("Session token"));
        assert_eq!(headers[1].description.as_deref(), Some("application/json"));
    }

    #[test]
    fn media_type_can_be_absent() {
        let headers = HeadersGenerator::new(messages())
            .add_media_type("Accept", None)
            .unwrap()
            .response_headers();
        assert_eq!(headers.descriptors()[0].description, None);
    }

    #[test]
    fn descriptors_generator_applies_prefix() {
        let fields = DescriptorsGenerator::new(messages())
            .add_typed("total", "Total", JsonFieldType::Number)
            .unwrap()
            .add_descriptor(Descriptor::new("items", "Items"))
            .generate_with_prefix("data.")
            .to_field();

        let paths: Vec<&str> = fields.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["data.total", "data.items"]);
        assert_eq!(fields[0].ty, JsonFieldType::Number);
    }
}
