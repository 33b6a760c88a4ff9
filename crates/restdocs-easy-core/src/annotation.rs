//! Validation metadata attached to fields.
//!
//! Annotations are plain data: a name, whether the annotation is a validation
//! constraint, the validation groups it is scoped to, and its attribute values
//! (used to render constraint descriptions such as `Size must be between 2 and 10`).

use std::collections::BTreeMap;
use std::fmt;

/// Not-null marker.
pub const NOT_NULL: &str = "NotNull";
/// Not-empty marker (strings, collections, maps, arrays).
pub const NOT_EMPTY: &str = "NotEmpty";
/// Not-blank marker (strings with at least one non-whitespace character).
pub const NOT_BLANK: &str = "NotBlank";

/// Annotations that make a field required when they apply.
pub const MANDATORY: &[&str] = &[NOT_NULL, NOT_EMPTY, NOT_BLANK];

/// The standard constraint vocabulary.
pub const CONSTRAINTS: &[&str] = &[
    NOT_NULL,
    NOT_EMPTY,
    NOT_BLANK,
    "Null",
    "Size",
    "Min",
    "Max",
    "DecimalMin",
    "DecimalMax",
    "Digits",
    "Pattern",
    "Email",
    "Positive",
    "PositiveOrZero",
    "Negative",
    "NegativeOrZero",
    "Past",
    "PastOrPresent",
    "Future",
    "FutureOrPresent",
    "AssertTrue",
    "AssertFalse",
];

/// Whether `name` belongs to the standard constraint vocabulary.
#[must_use]
pub fn is_standard_constraint(name: &str) -> bool {
    CONSTRAINTS.contains(&name)
}

/// A validation group scoping which constraints are active.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValidationGroup(String);

impl ValidationGroup {
    /// A group identified by name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// A group identified by a Rust marker type.
    ///
    /// ```
    /// use restdocs_easy_core::ValidationGroup;
    ///
    /// struct Create;
    /// assert!(ValidationGroup::of::<Create>().name().ends_with("Create"));
    /// ```
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(std::any::type_name::<T>().to_string())
    }

    /// Group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ValidationGroup {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ValidationGroup {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// An annotation declared on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    name: String,
    constraint: bool,
    groups: Option<Vec<ValidationGroup>>,
    attributes: BTreeMap<String, String>,
}

impl Annotation {
    /// A validation constraint with an empty `groups` attribute.
    #[must_use]
    pub fn constraint(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: true,
            groups: Some(Vec::new()),
            attributes: BTreeMap::new(),
        }
    }

    /// A non-constraint annotation (serialization hints and the like).
    ///
    /// Markers have no `groups` attribute at all.
    #[must_use]
    pub fn marker(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: false,
            groups: None,
            attributes: BTreeMap::new(),
        }
    }

    /// `NotNull`.
    #[must_use]
    pub fn not_null() -> Self {
        Self::constraint(NOT_NULL)
    }

    /// `NotEmpty`.
    #[must_use]
    pub fn not_empty() -> Self {
        Self::constraint(NOT_EMPTY)
    }

    /// `NotBlank`.
    #[must_use]
    pub fn not_blank() -> Self {
        Self::constraint(NOT_BLANK)
    }

    /// `Null`.
    #[must_use]
    pub fn null() -> Self {
        Self::constraint("Null")
    }

    /// `Size(min, max)`; either bound may be omitted.
    #[must_use]
    pub fn size(min: Option<u64>, max: Option<u64>) -> Self {
        let mut annotation = Self::constraint("Size");
        if let Some(min) = min {
            annotation = annotation.attribute("min", min.to_string());
        }
        if let Some(max) = max {
            annotation = annotation.attribute("max", max.to_string());
        }
        annotation
    }

    /// `Min(value)`.
    #[must_use]
    pub fn min(value: i64) -> Self {
        Self::constraint("Min").attribute("value", value.to_string())
    }

    /// `Max(value)`.
    #[must_use]
    pub fn max(value: i64) -> Self {
        Self::constraint("Max").attribute("value", value.to_string())
    }

    /// `DecimalMin(value)`.
    #[must_use]
    pub fn decimal_min(value: impl Into<String>) -> Self {
        Self::constraint("DecimalMin").attribute("value", value)
    }

    /// `DecimalMax(value)`.
    #[must_use]
    pub fn decimal_max(value: impl Into<String>) -> Self {
        Self::constraint("DecimalMax").attribute("value", value)
    }

    /// `Digits(integer, fraction)`.
    #[must_use]
    pub fn digits(integer: u32, fraction: u32) -> Self {
        Self::constraint("Digits")
            .attribute("integer", integer.to_string())
            .attribute("fraction", fraction.to_string())
    }

    /// `Pattern(regexp)`.
    #[must_use]
    pub fn pattern(regexp: impl Into<String>) -> Self {
        Self::constraint("Pattern").attribute("regexp", regexp)
    }

    /// `Email`.
    #[must_use]
    pub fn email() -> Self {
        Self::constraint("Email")
    }

    /// `Positive`.
    #[must_use]
    pub fn positive() -> Self {
        Self::constraint("Positive")
    }

    /// `PositiveOrZero`.
    #[must_use]
    pub fn positive_or_zero() -> Self {
        Self::constraint("PositiveOrZero")
    }

    /// `Negative`.
    #[must_use]
    pub fn negative() -> Self {
        Self::constraint("Negative")
    }

    /// `NegativeOrZero`.
    #[must_use]
    pub fn negative_or_zero() -> Self {
        Self::constraint("NegativeOrZero")
    }

    /// `Past`.
    #[must_use]
    pub fn past() -> Self {
        Self::constraint("Past")
    }

    /// `PastOrPresent`.
    #[must_use]
    pub fn past_or_present() -> Self {
        Self::constraint("PastOrPresent")
    }

    /// `Future`.
    #[must_use]
    pub fn future() -> Self {
        Self::constraint("Future")
    }

    /// `FutureOrPresent`.
    #[must_use]
    pub fn future_or_present() -> Self {
        Self::constraint("FutureOrPresent")
    }

    /// `AssertTrue`.
    #[must_use]
    pub fn assert_true() -> Self {
        Self::constraint("AssertTrue")
    }

    /// `AssertFalse`.
    #[must_use]
    pub fn assert_false() -> Self {
        Self::constraint("AssertFalse")
    }

    /// Scope this annotation to the given validation groups.
    #[must_use]
    pub fn groups<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<ValidationGroup>,
    {
        self.groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    /// Drop the `groups` attribute entirely, as if it could not be read.
    #[must_use]
    pub fn without_groups_attribute(mut self) -> Self {
        self.groups = None;
        self
    }

    /// Set an attribute value.
    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Override whether this annotation counts as a validation constraint.
    #[must_use]
    pub fn with_constraint(mut self, constraint: bool) -> Self {
        self.constraint = constraint;
        self
    }

    /// Annotation name (e.g., `NotNull`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the annotation is meta-annotated as a validation constraint.
    #[must_use]
    pub fn is_constraint(&self) -> bool {
        self.constraint
    }

    /// Whether the annotation is one of [`MANDATORY`].
    #[must_use]
    pub fn is_mandatory(&self) -> bool {
        MANDATORY.contains(&self.name.as_str())
    }

    /// The `groups` attribute, or `None` when the annotation has none.
    #[must_use]
    pub fn groups_attribute(&self) -> Option<&[ValidationGroup]> {
        self.groups.as_deref()
    }

    /// Declared groups; a missing `groups` attribute reads as no groups.
    #[must_use]
    pub fn declared_groups(&self) -> &[ValidationGroup] {
        self.groups.as_deref().unwrap_or_default()
    }

    /// Attribute values keyed by attribute name.
    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}
