//! Shapes declared in YAML.
//!
//! Lets data contracts that are not Rust types be documented the same way as
//! [`DataShape`](restdocs_easy_core::DataShape) implementors.
//!
//! # File format
//!
//! ```yaml
//! shapes:
//!   - name: com.example.Status
//!     kind: enum
//!     constants: [ACTIVE, INACTIVE]
//!
//!   - name: com.example.MemberRequest
//!     kind: record
//!     fields:
//!       - name: name
//!         type: String
//!         annotations:
//!           - name: NotBlank
//!           - name: Size
//!             attributes: { min: 2, max: 10 }
//!       - name: age
//!         type: i32
//!         annotations:
//!           - name: Min
//!             groups: [Create]
//!             attributes: { value: 18 }
//!       - name: status
//!         type: com.example.Status
//!       - name: tags
//!         type: String[]
//! ```
//!
//! Field types resolve against the built-in names first, then other catalog
//! shapes, then `T[]` arrays; anything else becomes an opaque class. Class
//! fields get a `get` accessor (`is` for `bool`) and record fields a fluent
//! one unless `accessor` says otherwise (`get`, `is`, `fluent` or `none`).

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use serde_yaml_ng::Value;

use restdocs_easy_core::annotation::is_standard_constraint;
use restdocs_easy_core::types::{self, TypeRef};
use restdocs_easy_core::{Accessor, AccessorStrategy, Annotation, FieldDef, Shape};

use crate::error::{Error, Result};
use crate::message::scalar_text;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    shapes: Vec<ShapeSpec>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ShapeKind {
    #[default]
    Class,
    Record,
    Enum,
}

#[derive(Debug, Deserialize)]
struct ShapeSpec {
    name: String,
    #[serde(default)]
    kind: ShapeKind,
    #[serde(default)]
    constants: Vec<String>,
    #[serde(default)]
    supertypes: Vec<String>,
    #[serde(default)]
    fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum AccessorSpec {
    Get,
    Is,
    Fluent,
    None,
}

#[derive(Debug, Deserialize)]
struct FieldSpec {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    accessor: Option<AccessorSpec>,
    inherited_from: Option<String>,
    #[serde(default)]
    annotations: Vec<AnnotationSpec>,
}

#[derive(Debug, Deserialize)]
struct AnnotationSpec {
    name: String,
    constraint: Option<bool>,
    groups: Option<Vec<String>>,
    #[serde(default)]
    attributes: BTreeMap<String, Value>,
}

/// Shapes loaded from a YAML catalog, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ShapeCatalog {
    shapes: Vec<Shape>,
}

impl ShapeCatalog {
    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] for malformed YAML and [`Error::DuplicateShape`]
    /// when a name is declared twice.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml_ng::from_str(yaml)?;

        let mut seen = HashSet::new();
        for spec in &file.shapes {
            if !seen.insert(spec.name.as_str()) {
                return Err(Error::DuplicateShape {
                    name: spec.name.clone(),
                });
            }
        }

        let declared: BTreeMap<&str, TypeRef> = file
            .shapes
            .iter()
            .map(|spec| (spec.name.as_str(), spec.type_ref()))
            .collect();

        let shapes = file
            .shapes
            .iter()
            .map(|spec| spec.build(&declared))
            .collect::<Vec<_>>();

        tracing::debug!(shapes = shapes.len(), "loaded shape catalog");
        Ok(Self { shapes })
    }

    /// Load a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// All shapes in declaration order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Look up a shape by qualified name, or by simple name when that is unambiguous.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownShape`] if nothing matches.
    pub fn get(&self, name: &str) -> Result<&Shape> {
        if let Some(shape) = self.shapes.iter().find(|s| s.ty().name() == name) {
            return Ok(shape);
        }

        let mut by_simple = self.shapes.iter().filter(|s| s.ty().simple_name() == name);
        match (by_simple.next(), by_simple.next()) {
            (Some(shape), None) => Ok(shape),
            _ => Err(Error::UnknownShape {
                name: name.to_string(),
            }),
        }
    }
}

impl ShapeSpec {
    fn type_ref(&self) -> TypeRef {
        let ty = match self.kind {
            ShapeKind::Class => TypeRef::class(&self.name),
            ShapeKind::Record => TypeRef::record(&self.name),
            ShapeKind::Enum => TypeRef::enumeration(&self.name, self.constants.iter().cloned()),
        };
        ty.with_supertypes(self.supertypes.iter().cloned())
    }

    fn build(&self, declared: &BTreeMap<&str, TypeRef>) -> Shape {
        let mut shape = Shape::new(self.type_ref());

        if self.kind == ShapeKind::Enum {
            return shape;
        }

        for spec in &self.fields {
            let ty = resolve_type(&spec.ty, declared);
            let mut field = spec
                .annotations
                .iter()
                .map(AnnotationSpec::build)
                .fold(FieldDef::new(&spec.name, ty.clone()), FieldDef::annotate);
            if let Some(owner) = &spec.inherited_from {
                field = field.inherited_from(owner);
            }

            let strategy = match spec.accessor {
                Some(AccessorSpec::None) => None,
                Some(AccessorSpec::Fluent) => Some(AccessorStrategy::Fluent),
                Some(AccessorSpec::Get) => Some(AccessorStrategy::GetPrefixed),
                Some(AccessorSpec::Is) => Some(AccessorStrategy::IsPrefixed),
                None if self.kind == ShapeKind::Record => Some(AccessorStrategy::Fluent),
                None if ty.name() == types::BOOL => Some(AccessorStrategy::IsPrefixed),
                None => Some(AccessorStrategy::GetPrefixed),
            };

            shape = shape.field(field);
            if let Some(strategy) = strategy {
                shape = shape.accessor(Accessor::public(strategy.method_name(&spec.name), ty));
            }
        }

        shape
    }
}

impl AnnotationSpec {
    fn build(&self) -> Annotation {
        let constraint = self
            .constraint
            .unwrap_or_else(|| is_standard_constraint(&self.name));

        let mut annotation = if constraint {
            Annotation::constraint(&self.name)
        } else {
            Annotation::marker(&self.name)
        };

        if let Some(groups) = &self.groups {
            annotation = annotation.groups(groups.iter().cloned());
        }

        self.attributes
            .iter()
            .filter_map(|(key, value)| scalar_text(value).map(|text| (key, text)))
            .fold(annotation, |annotation, (key, text)| {
                annotation.attribute(key.clone(), text)
            })
    }
}

fn resolve_type(name: &str, declared: &BTreeMap<&str, TypeRef>) -> TypeRef {
    let name = name.trim();
    if let Some(element) = name.strip_suffix("[]") {
        return TypeRef::array(resolve_type(element, declared));
    }

    types::well_known(name)
        .or_else(|| declared.get(name).cloned())
        .unwrap_or_else(|| TypeRef::class(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use restdocs_easy_core::reflect;

    const CATALOG: &str = indoc! {"
        shapes:
          - name: com.example.Status
            kind: enum
            constants: [ACTIVE, INACTIVE]

          - name: com.example.MemberRequest
            kind: record
            fields:
              - name: name
                type: String
                annotations:
                  - name: NotBlank
                  - name: Size
                    attributes: { min: 2, max: 10 }
              - name: age
                type: i32
                annotations:
                  - name: Min
                    groups: [Create]
                    attributes: { value: 18 }
              - name: status
                type: com.example.Status
              - name: tags
                type: String[]

          - name: com.example.Account
            fields:
              - name: active
                type: bool
              - name: id
                type: i64
                inherited_from: com.example.Base
              - name: secret
                type: String
                accessor: none
              - name: nickname
                type: String
                accessor: fluent
                annotations:
                  - name: JsonProperty
    "};

    #[test]
    fn parses_shapes_in_order() {
        let catalog = ShapeCatalog::from_yaml(CATALOG).unwrap();
        let names: Vec<&str> = catalog.shapes().iter().map(|s| s.ty().name()).collect();
        assert_eq!(
            names,
            vec![
                "com.example.Status",
                "com.example.MemberRequest",
                "com.example.Account"
            ]
        );
    }

    #[test]
    fn field_types_resolve_against_catalog() {
        let catalog = ShapeCatalog::from_yaml(CATALOG).unwrap();
        let member = catalog.get("com.example.MemberRequest").unwrap();

        assert!(member.ty().is_record());
        let status = member.find_field("status").unwrap().ty();
        assert!(status.is_enum());
        assert_eq!(status.constants(), ["ACTIVE", "INACTIVE"]);
        assert!(member.find_field("tags").unwrap().ty().is_array());

        let fields: Vec<String> = reflect(member).into_iter().map(|m| m.field_name).collect();
        assert_eq!(fields, vec!["name", "age", "status", "tags"]);
    }

    #[test]
    fn annotations_carry_groups_and_attributes() {
        let catalog = ShapeCatalog::from_yaml(CATALOG).unwrap();
        let member = catalog.get("MemberRequest").unwrap();

        let size = &member.find_field("name").unwrap().annotations()[1];
        assert!(size.is_constraint());
        assert_eq!(size.attributes().get("max").map(String::as_str), Some("10"));

        let min = &member.find_field("age").unwrap().annotations()[0];
        assert_eq!(min.declared_groups()[0].name(), "Create");
    }

    #[test]
    fn class_accessors_follow_defaults_and_overrides() {
        let catalog = ShapeCatalog::from_yaml(CATALOG).unwrap();
        let account = catalog.get("com.example.Account").unwrap();

        assert!(account.find_accessor("isActive").is_some());
        assert!(account.find_accessor("nickname").is_some());
        assert!(!account.find_field("nickname").unwrap().annotations()[0].is_constraint());

        let fields: Vec<String> = reflect(account).into_iter().map(|m| m.field_name).collect();
        assert_eq!(fields, vec!["active", "nickname"]);
    }

    #[test]
    fn duplicate_shapes_are_rejected() {
        let yaml = indoc! {"
            shapes:
              - name: com.example.A
              - name: com.example.A
        "};
        let err = ShapeCatalog::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, Error::DuplicateShape { ref name } if name == "com.example.A"));
    }

    #[test]
    fn unknown_and_ambiguous_lookups_fail() {
        let yaml = indoc! {"
            shapes:
              - name: com.a.Item
              - name: com.b.Item
        "};
        let catalog = ShapeCatalog::from_yaml(yaml).unwrap();
        assert!(matches!(catalog.get("Item"), Err(Error::UnknownShape { .. })));
        assert!(catalog.get("com.b.Item").is_ok());
        assert_eq!(
            catalog.get("Missing").unwrap_err().to_string(),
            "shape 'Missing' not found in catalog"
        );
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(matches!(
            ShapeCatalog::from_yaml("shapes: [[["),
            Err(Error::Yaml(_))
        ));
    }
}
