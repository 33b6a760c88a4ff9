//! Typed error enum for the `restdocs-easy` library API.
//!
//! Library consumers can match on specific variants. The CLI (`main.rs`)
//! converts these to `anyhow::Error` at the binary boundary for richer
//! context messages.
//!
//! Routine resolution gaps never surface here: a missing message falls back
//! to its default text, an unmapped type to `OBJECT`, and an accessor that
//! does not exist simply disqualifies its field.

/// Errors produced by `restdocs-easy` library operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// File I/O failure (reading config, message bundle, or catalog files).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error(transparent)]
    Yaml(#[from] serde_yaml_ng::Error),

    /// TOML config parsing failure.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// A blank name was passed to a descriptor builder.
    #[error("{kind} must not be null or blank")]
    InvalidName {
        /// What kind of name was rejected (e.g., `"paramName"`).
        kind: &'static str,
    },

    /// An enum description was composed without constants.
    ///
    /// Reaching this means an enum type handle lost its constants upstream.
    #[error(
        "enum description for '{type_name}' requires a base message and at least one constant"
    )]
    EnumDescription {
        /// Qualified name of the enum type.
        type_name: String,
    },

    /// A terminal conversion that the default operator does not implement.
    #[error("unsupported operation: {operation}")]
    Unsupported {
        /// Name of the conversion (e.g., `"request_body"`).
        operation: &'static str,
    },

    /// Shape descriptors were requested from an operator built without a generator.
    #[error("class descriptor generator not set; build the operator from RestDocs::generate")]
    GeneratorUnavailable,

    /// A shape name was not found in the catalog.
    #[error("shape '{name}' not found in catalog")]
    UnknownShape {
        /// The unresolved shape name.
        name: String,
    },

    /// A catalog declares the same shape twice.
    #[error("shape '{name}' is declared more than once")]
    DuplicateShape {
        /// The duplicated shape name.
        name: String,
    },
}

/// Convenience alias used throughout the library's public API.
pub type Result<T> = std::result::Result<T, Error>;
