#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! ## API Reference

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod annotation;
pub mod reflect;
pub mod shape;
pub mod types;

pub use annotation::{Annotation, ValidationGroup};
pub use reflect::{reflect, AccessorStrategy, FieldShapeMetadata};
pub use shape::{Accessor, DataShape, FieldDef, Shape, Visibility};
pub use types::{TypeKind, TypeRef};
