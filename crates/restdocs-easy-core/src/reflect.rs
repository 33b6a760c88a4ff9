//! Field metadata extraction.
//!
//! [`reflect`] walks the fields declared directly on a [`Shape`] and keeps the
//! ones worth documenting: enum-typed fields, and fields exposed through an
//! accessor. Records only accept a fluent accessor named after the component;
//! classes also accept `get`/`is` prefixed getters. Probing is a ranked list of
//! [`AccessorStrategy`] values and a missing method is simply a non-match.

use crate::annotation::Annotation;
use crate::shape::{capitalize, uncapitalize, FieldDef, Shape, Visibility};
use crate::types::TypeRef;

/// Per-field metadata produced by [`reflect`].
///
/// Borrows the field type, declaring type and annotations from the inspected
/// [`Shape`]; nothing is cached between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldShapeMetadata<'a> {
    /// Package of the declaring type (e.g., `com.example.api`).
    pub package_name: String,
    /// Simple name of the declaring type (e.g., `UserDto`).
    pub simple_class_name: String,
    /// Qualified name of the declaring type (e.g., `com.example.api.UserDto`).
    pub qualified_class_name: String,
    /// Canonical name of the declaring type.
    pub canonical_name: String,
    /// Field identifier.
    pub field_name: String,
    /// Declared type of the field.
    pub field_type: &'a TypeRef,
    /// The inspected type that owns the field.
    pub declaring: &'a TypeRef,
    /// Field handle for annotation introspection; `None` for the synthetic enum entry.
    pub field: Option<&'a FieldDef>,
    /// Annotations declared on the field.
    pub annotations: &'a [Annotation],
}

/// Accessor naming rule tried while qualifying a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorStrategy {
    /// `name()`.
    Fluent,
    /// `getName()`.
    GetPrefixed,
    /// `isName()`.
    IsPrefixed,
}

impl AccessorStrategy {
    /// Strategies for records, in probe order.
    pub const RECORD: &'static [AccessorStrategy] = &[AccessorStrategy::Fluent];

    /// Strategies for regular classes, in probe order.
    pub const CLASS: &'static [AccessorStrategy] = &[
        AccessorStrategy::Fluent,
        AccessorStrategy::GetPrefixed,
        AccessorStrategy::IsPrefixed,
    ];

    /// Accessor name this strategy expects for `field_name`.
    #[must_use]
    pub fn method_name(self, field_name: &str) -> String {
        match self {
            Self::Fluent => field_name.to_string(),
            Self::GetPrefixed => format!("get{}", capitalize(field_name)),
            Self::IsPrefixed => format!("is{}", capitalize(field_name)),
        }
    }

    /// Strategies applicable to `ty`, in probe order.
    #[must_use]
    pub fn for_type(ty: &TypeRef) -> &'static [AccessorStrategy] {
        if ty.is_record() {
            Self::RECORD
        } else {
            Self::CLASS
        }
    }
}

/// Whether `shape` exposes a public zero-argument accessor returning the
/// field's type under one of `strategies`.
#[must_use]
pub fn has_accessor(shape: &Shape, field: &FieldDef, strategies: &[AccessorStrategy]) -> bool {
    if field.name().trim().is_empty() {
        return false;
    }

    strategies.iter().any(|strategy| {
        let method_name = strategy.method_name(field.name());
        // Overloads share a name; any nullary one qualifies.
        shape.accessors().iter().any(|accessor| {
            accessor.name() == method_name
                && accessor.parameter_count() == 0
                && accessor.visibility() == Visibility::Public
                && accessor.returns().name() == field.ty().name()
        })
    })
}

/// Extract documentable field metadata from `shape`.
///
/// An enum shape yields exactly one synthetic entry named after the
/// de-capitalized simple name, so that the enum itself can be documented as a
/// scalar value.
#[must_use]
pub fn reflect(shape: &Shape) -> Vec<FieldShapeMetadata<'_>> {
    let declaring = shape.ty();
    let package_name = declaring.package_name().to_string();
    let simple_class_name = declaring.simple_name().to_string();
    let qualified_class_name = declaring.qualified_name().to_string();
    let canonical_name = declaring.canonical_name();

    if declaring.is_enum() {
        return vec![FieldShapeMetadata {
            field_name: uncapitalize(&simple_class_name),
            package_name,
            simple_class_name,
            qualified_class_name,
            canonical_name,
            field_type: declaring,
            declaring,
            field: None,
            annotations: &[],
        }];
    }

    let strategies = AccessorStrategy::for_type(declaring);

    shape
        .fields()
        .iter()
        .filter(|field| {
            if field
                .declared_by()
                .is_some_and(|owner| owner != declaring.name())
            {
                tracing::trace!(
                    shape = declaring.name(),
                    field = field.name(),
                    "skipping inherited field"
                );
                return false;
            }

            let qualifies = field.ty().is_enum() || has_accessor(shape, field, strategies);
            if !qualifies {
                tracing::trace!(
                    shape = declaring.name(),
                    field = field.name(),
                    "skipping field without accessor"
                );
            }
            qualifies
        })
        .map(|field| FieldShapeMetadata {
            package_name: package_name.clone(),
            simple_class_name: simple_class_name.clone(),
            qualified_class_name: qualified_class_name.clone(),
            canonical_name: canonical_name.clone(),
            field_name: field.name().to_string(),
            field_type: field.ty(),
            declaring,
            field: Some(field),
            annotations: field.annotations(),
        })
        .collect()
}
