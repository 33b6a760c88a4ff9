//! Shapes: the documented "classes".
//!
//! A [`Shape`] lists what reflection would have found on a class: its own
//! type, the fields declared directly on it, and the accessor methods it
//! exposes. Builders cover the common cases so that a record gets fluent
//! accessors and a class gets `get`/`is` getters without spelling them out.

use crate::annotation::Annotation;
use crate::types::{TypeRef, BOOL};

/// Accessor visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Callable from anywhere.
    Public,
    /// Callable only from within the declaring module.
    Private,
}

/// A zero-or-more argument method exposed by a shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    name: String,
    returns: TypeRef,
    parameter_count: usize,
    visibility: Visibility,
}

impl Accessor {
    /// A public zero-argument accessor.
    #[must_use]
    pub fn public(name: impl Into<String>, returns: TypeRef) -> Self {
        Self {
            name: name.into(),
            returns,
            parameter_count: 0,
            visibility: Visibility::Public,
        }
    }

    /// A private zero-argument accessor.
    #[must_use]
    pub fn private(name: impl Into<String>, returns: TypeRef) -> Self {
        Self {
            visibility: Visibility::Private,
            ..Self::public(name, returns)
        }
    }

    /// Set the number of declared parameters.
    #[must_use]
    pub fn with_parameters(mut self, count: usize) -> Self {
        self.parameter_count = count;
        self
    }

    /// Method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared return type.
    #[must_use]
    pub fn returns(&self) -> &TypeRef {
        &self.returns
    }

    /// Number of declared parameters.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.parameter_count
    }

    /// Method visibility.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }
}

/// A field declared on a shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    name: String,
    ty: TypeRef,
    annotations: Vec<Annotation>,
    inherited_from: Option<String>,
}

impl FieldDef {
    /// A field without annotations.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations: Vec::new(),
            inherited_from: None,
        }
    }

    /// Attach an annotation.
    #[must_use]
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Mark the field as declared by a supertype rather than the shape itself.
    #[must_use]
    pub fn inherited_from(mut self, owner: impl Into<String>) -> Self {
        self.inherited_from = Some(owner.into());
        self
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    #[must_use]
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    /// Annotations in declaration order.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Declaring supertype when the field is inherited.
    #[must_use]
    pub fn declared_by(&self) -> Option<&str> {
        self.inherited_from.as_deref()
    }
}

/// A documented type with its declared fields and accessors.
///
/// # Example
///
/// ```
/// use restdocs_easy_core::{types, Annotation, FieldDef, Shape};
///
/// let shape = Shape::record("com.example.MemberRequest")
///     .component(FieldDef::new("name", types::string()).annotate(Annotation::not_blank()))
///     .component(FieldDef::new("age", types::int()));
///
/// assert_eq!(shape.fields().len(), 2);
/// assert_eq!(shape.accessors()[0].name(), "name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    ty: TypeRef,
    fields: Vec<FieldDef>,
    accessors: Vec<Accessor>,
}

impl Shape {
    /// A shape for an arbitrary type handle.
    #[must_use]
    pub fn new(ty: TypeRef) -> Self {
        Self {
            ty,
            fields: Vec::new(),
            accessors: Vec::new(),
        }
    }

    /// A regular class.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(TypeRef::class(name))
    }

    /// An immutable record.
    #[must_use]
    pub fn record(name: impl Into<String>) -> Self {
        Self::new(TypeRef::record(name))
    }

    /// An enumeration.
    #[must_use]
    pub fn enumeration<I, S>(name: impl Into<String>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(TypeRef::enumeration(name, constants))
    }

    /// Add a field with no accessor.
    #[must_use]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a field together with a public `get`/`is` getter.
    ///
    /// `bool` fields get an `is` getter, everything else a `get` getter.
    #[must_use]
    pub fn property(self, field: FieldDef) -> Self {
        let prefix = if field.ty().name() == BOOL { "is" } else { "get" };
        let getter = Accessor::public(
            format!("{prefix}{}", capitalize(field.name())),
            field.ty().clone(),
        );
        self.accessor(getter).field(field)
    }

    /// Add a record component: the field plus its fluent accessor.
    #[must_use]
    pub fn component(self, field: FieldDef) -> Self {
        let accessor = Accessor::public(field.name(), field.ty().clone());
        self.accessor(accessor).field(field)
    }

    /// Add an accessor method.
    #[must_use]
    pub fn accessor(mut self, accessor: Accessor) -> Self {
        self.accessors.push(accessor);
        self
    }

    /// The shape's own type.
    #[must_use]
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Accessors in declaration order.
    #[must_use]
    pub fn accessors(&self) -> &[Accessor] {
        &self.accessors
    }

    /// Look up an accessor by exact name.
    #[must_use]
    pub fn find_accessor(&self, name: &str) -> Option<&Accessor> {
        self.accessors.iter().find(|a| a.name == name)
    }

    /// Look up a declared field by name.
    #[must_use]
    pub fn find_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Types that can describe their own documented shape.
///
/// ```
/// use restdocs_easy_core::{types, DataShape, FieldDef, Shape};
///
/// struct Color;
///
/// impl DataShape for Color {
///     fn shape() -> Shape {
///         Shape::class("com.example.Color")
///             .property(FieldDef::new("background", types::string()))
///     }
/// }
///
/// assert_eq!(Color::shape().ty().simple_name(), "Color");
/// ```
pub trait DataShape {
    /// Build the shape for this type.
    fn shape() -> Shape;
}

/// Upper-case the first character.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Lower-case the first character.
#[must_use]
pub fn uncapitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}
