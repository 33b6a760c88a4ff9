//! Host type → JSON field type mapping.
//!
//! The registry is an ordered table of `(type name, tag)` pairs owned by
//! whoever built it; there is no process-wide instance. Resolution checks
//! arrays first, then an exact key, then the first key the type is assignable
//! to in insertion order, and finally falls back to [`JsonFieldType::Object`].

use std::fmt;

use serde::{Deserialize, Serialize};

use restdocs_easy_core::types::{self, TypeRef};

/// Semantic JSON type of a documented field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JsonFieldType {
    /// JSON object.
    Object,
    /// JSON array.
    Array,
    /// `true` / `false`.
    Boolean,
    /// JSON number.
    Number,
    /// JSON string.
    String,
}

impl fmt::Display for JsonFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Object => "Object",
            Self::Array => "Array",
            Self::Boolean => "Boolean",
            Self::Number => "Number",
            Self::String => "String",
        };
        f.write_str(name)
    }
}

/// Ordered, caller-mutable registry of type mappings.
///
/// Not synchronized: callers sharing one instance across threads must wrap it
/// themselves (or clone one per generation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFieldTypeMapper {
    entries: Vec<(String, JsonFieldType)>,
}

impl Default for JsonFieldTypeMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonFieldTypeMapper {
    /// A registry seeded with the common host types.
    #[must_use]
    pub fn new() -> Self {
        let mut mapper = Self::empty();

        mapper.add(types::MAP, JsonFieldType::Object);
        mapper.add(types::COLLECTION, JsonFieldType::Array);
        mapper.add(types::BOOL, JsonFieldType::Boolean);
        mapper.add(types::NUMBER, JsonFieldType::Number);

        for name in types::NUMERIC_PRIMITIVES {
            mapper.add(*name, JsonFieldType::Number);
        }

        mapper.add(types::STRING, JsonFieldType::String);
        mapper.add(types::CHAR_SEQUENCE, JsonFieldType::String);
        mapper.add(types::CHAR, JsonFieldType::String);

        for name in [
            types::DATE,
            types::CALENDAR,
            types::LOCAL_DATE,
            types::LOCAL_DATE_TIME,
            types::LOCAL_TIME,
            types::CURRENCY,
            types::LOCALE,
            types::ENUM,
            types::UUID,
        ] {
            mapper.add(name, JsonFieldType::String);
        }

        mapper
    }

    /// A registry with no mappings; every non-array type resolves to `OBJECT`.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Resolve the JSON type tag for `ty`.
    #[must_use]
    pub fn resolve(&self, ty: &TypeRef) -> JsonFieldType {
        if ty.is_array() {
            return JsonFieldType::Array;
        }

        if let Some((_, tag)) = self.entries.iter().find(|(name, _)| name == ty.name()) {
            return *tag;
        }

        self.entries
            .iter()
            .find(|(name, _)| ty.is_assignable_to(name))
            .map_or(JsonFieldType::Object, |(_, tag)| *tag)
    }

    /// Replace every mapping.
    pub fn set<I, S>(&mut self, mappings: I)
    where
        I: IntoIterator<Item = (S, JsonFieldType)>,
        S: Into<String>,
    {
        self.entries.clear();
        self.add_all(mappings);
    }

    /// Add or replace one mapping. Existing keys keep their position.
    pub fn add(&mut self, type_name: impl Into<String>, tag: JsonFieldType) {
        let type_name = type_name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == type_name) {
            entry.1 = tag;
        } else {
            self.entries.push((type_name, tag));
        }
    }

    /// Remove one mapping; unknown names are ignored.
    pub fn remove(&mut self, type_name: &str) {
        self.entries.retain(|(name, _)| name != type_name);
    }

    /// Add or replace several mappings.
    pub fn add_all<I, S>(&mut self, mappings: I)
    where
        I: IntoIterator<Item = (S, JsonFieldType)>,
        S: Into<String>,
    {
        for (name, tag) in mappings {
            self.add(name, tag);
        }
    }

    /// Remove several mappings.
    pub fn remove_all<I, S>(&mut self, type_names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in type_names {
            self.remove(name.as_ref());
        }
    }

    /// Mappings in resolution order.
    #[must_use]
    pub fn entries(&self) -> &[(String, JsonFieldType)] {
        &self.entries
    }
}
