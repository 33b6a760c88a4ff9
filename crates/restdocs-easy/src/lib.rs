#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! ## API Reference

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod builders;
mod catalog;
mod config;
pub mod constraints;
mod descriptor;
mod docs;
mod error;
mod generator;
mod mapper;
pub mod message;
mod operator;
pub mod snippet;
mod validation;

pub use builders::{DescriptorsGenerator, HeadersGenerator, ParamsGenerator};
pub use catalog::ShapeCatalog;
pub use config::{DocsConfig, MessagesConfig};
pub use constraints::{ConstraintDescriptions, ValidatorConstraintDescriptions};
pub use descriptor::{merge, Attribute, Descriptor, DescriptorBuilder};
pub use docs::{RestDocs, RestDocsBuilder};
pub use error::{Error, Result};
pub use generator::ClassDescriptorGenerator;
pub use mapper::{JsonFieldType, JsonFieldTypeMapper};
pub use operator::Operator;
pub use validation::FieldOptionalValidator;

pub use restdocs_easy_core::{annotation, types};
pub use restdocs_easy_core::{
    reflect, Accessor, AccessorStrategy, Annotation, DataShape, FieldDef, FieldShapeMetadata,
    Shape, TypeKind, TypeRef, ValidationGroup, Visibility,
};
