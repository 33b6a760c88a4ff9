//! Constraint descriptions.
//!
//! The generator only joins what a [`ConstraintDescriptions`] collaborator
//! returns. [`ValidatorConstraintDescriptions`] is the default collaborator: it
//! renders one sentence per constraint annotation from a message template,
//! filling `${attribute}` placeholders from the annotation.

use restdocs_easy_core::{Annotation, Shape};

use crate::descriptor::Attribute;
use crate::message::DescriptionMessageSource;

/// Attribute key under which constraint text is stored.
pub const CONSTRAINTS_KEY: &str = "constraints";

/// Separator between individual constraint descriptions.
pub const CONSTRAINT_SEPARATOR: &str = "\n\n";

/// Produces human-readable constraint descriptions for a field.
pub trait ConstraintDescriptions {
    /// Descriptions for every constraint declared on `field_name` of `shape`.
    fn descriptions_for_property(&self, shape: &Shape, field_name: &str) -> Vec<String>;
}

impl<F> ConstraintDescriptions for F
where
    F: Fn(&Shape, &str) -> Vec<String>,
{
    fn descriptions_for_property(&self, shape: &Shape, field_name: &str) -> Vec<String> {
        self(shape, field_name)
    }
}

/// Template-driven descriptions for the standard constraint vocabulary.
///
/// Templates resolve through the message source by code
/// `constraints.<Name>.description` (e.g. `constraints.Size.description`), so
/// bundles can translate or reword them. Constraints without a template are
/// skipped.
#[derive(Debug, Clone, Default)]
pub struct ValidatorConstraintDescriptions {
    messages: DescriptionMessageSource,
}

impl ValidatorConstraintDescriptions {
    /// Resolve templates through `messages`.
    #[must_use]
    pub fn new(messages: DescriptionMessageSource) -> Self {
        Self { messages }
    }

    /// Render the description of a single annotation.
    #[must_use]
    pub fn describe(&self, annotation: &Annotation) -> Option<String> {
        let code = format!("constraints.{}.description", annotation.name());
        let Some(template) = self.messages.message(&code, default_template(annotation.name()))
        else {
            tracing::trace!(constraint = annotation.name(), "no constraint description template");
            return None;
        };

        Some(interpolate(&template, |key| {
            annotation
                .attributes()
                .get(key)
                .map(String::as_str)
                .or_else(|| default_attribute(annotation.name(), key))
        }))
    }
}

impl ConstraintDescriptions for ValidatorConstraintDescriptions {
    fn descriptions_for_property(&self, shape: &Shape, field_name: &str) -> Vec<String> {
        let Some(field) = shape.find_field(field_name) else {
            return Vec::new();
        };

        field
            .annotations()
            .iter()
            .filter(|annotation| annotation.is_constraint())
            .filter_map(|annotation| self.describe(annotation))
            .collect()
    }
}

/// Constraint attributes for one field: a single [`CONSTRAINTS_KEY`] entry
/// with every description joined by a blank line, or nothing when there is no
/// text to show.
#[must_use]
pub fn constraint_attributes(
    descriptions: &dyn ConstraintDescriptions,
    shape: &Shape,
    field_name: &str,
) -> Vec<Attribute> {
    let texts = descriptions.descriptions_for_property(shape, field_name);
    if texts.is_empty() {
        return Vec::new();
    }

    vec![Attribute::new(CONSTRAINTS_KEY, texts.join(CONSTRAINT_SEPARATOR))]
}

fn default_template(name: &str) -> Option<&'static str> {
    let template = match name {
        "AssertFalse" => "Must be false",
        "AssertTrue" => "Must be true",
        "DecimalMax" => "Must be at most ${value}",
        "DecimalMin" => "Must be at least ${value}",
        "Digits" => {
            "Must have at most ${integer} integral digits and ${fraction} fractional digits"
        }
        "Email" => "Must be a well-formed email address",
        "Future" => "Must be in the future",
        "FutureOrPresent" => "Must be in the present or in the future",
        "Max" => "Must be at most ${value}",
        "Min" => "Must be at least ${value}",
        "Negative" => "Must be negative",
        "NegativeOrZero" => "Must be zero or negative",
        "NotBlank" => "Must not be blank",
        "NotEmpty" => "Must not be empty",
        "NotNull" => "Must not be null",
        "Null" => "Must be null",
        "Past" => "Must be in the past",
        "PastOrPresent" => "Must be in the past or in the present",
        "Pattern" => "Must match the regular expression `${regexp}`",
        "Positive" => "Must be positive",
        "PositiveOrZero" => "Must be zero or positive",
        "Size" => "Size must be between ${min} and ${max} inclusive",
        _ => return None,
    };
    Some(template)
}

fn default_attribute(constraint: &str, key: &str) -> Option<&'static str> {
    match (constraint, key) {
        ("Size", "min") => Some("0"),
        ("Size", "max") => Some("2147483647"),
        _ => None,
    }
}

/// Replace `${key}` placeholders; unknown keys are left as written.
fn interpolate<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let key = &after[..end];
                match lookup(key) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + end + 1]),
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
