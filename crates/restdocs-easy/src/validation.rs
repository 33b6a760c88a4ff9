//! Validation-group aware optionality.
//!
//! A field is required when one of its mandatory annotations (`NotNull`,
//! `NotEmpty`, `NotBlank`) applies under the active validation groups. An
//! annotation applies when it declares no groups, or when one of its groups is
//! active. With no active groups only ungrouped annotations apply.

use restdocs_easy_core::{Annotation, FieldDef, ValidationGroup};

/// Decides optionality and constraint presence for fields.
#[derive(Debug, Clone, Default)]
pub struct FieldOptionalValidator {
    groups: Vec<ValidationGroup>,
}

impl FieldOptionalValidator {
    /// A validator for the given active groups (possibly empty).
    #[must_use]
    pub fn new<I, G>(groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<ValidationGroup>,
    {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    /// Active validation groups.
    #[must_use]
    pub fn groups(&self) -> &[ValidationGroup] {
        &self.groups
    }

    fn has_no_groups(annotation: &Annotation) -> bool {
        annotation.declared_groups().is_empty()
    }

    fn matches_any_group(&self, annotation: &Annotation) -> bool {
        annotation
            .declared_groups()
            .iter()
            .any(|group| self.groups.contains(group))
    }

    fn applies(&self, annotation: &Annotation) -> bool {
        Self::has_no_groups(annotation) || self.matches_any_group(annotation)
    }

    /// Whether `field` may be omitted under the active groups.
    #[must_use]
    pub fn is_optional(&self, field: &FieldDef) -> bool {
        !field
            .annotations()
            .iter()
            .any(|a| a.is_mandatory() && self.applies(a))
    }

    /// Whether `field` carries a constraint that applies under the active groups.
    ///
    /// `None` (the synthetic enum entry) never has constraints.
    #[must_use]
    pub fn has_documentable_constraint(&self, field: Option<&FieldDef>) -> bool {
        let Some(field) = field else {
            return false;
        };

        field
            .annotations()
            .iter()
            .any(|a| a.is_constraint() && self.applies(a))
    }
}
