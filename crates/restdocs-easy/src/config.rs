//! Documentation settings loaded from YAML or TOML.
//!
//! Keeps locale, message bundle location and type-mapping overrides next to
//! the API docs instead of hardcoding them in test setup.
//!
//! # File format
//!
//! ```yaml
//! # docs/restdocs.yaml
//! locale: ko-KR
//!
//! # Message bundles: docs/i18n/messages.yaml, docs/i18n/messages_ko.yaml, ...
//! messages:
//!   directory: i18n
//!   basename: messages
//!
//! # Extra or replaced host type mappings.
//! type_mappings:
//!   Money: NUMBER
//!   Uuid: OBJECT
//!
//! # Seeded mappings to drop.
//! removed_type_mappings:
//!   - Currency
//! ```
//!
//! The same keys work in a `.toml` file. A relative `messages.directory` is
//! resolved against the config file's directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::mapper::{JsonFieldType, JsonFieldTypeMapper};

/// Default message bundle basename.
pub const DEFAULT_BASENAME: &str = "messages";

/// Documentation generation config.
///
/// Loaded via [`DocsConfig::load`], then applied with
/// [`RestDocsBuilder::with_config`](crate::RestDocsBuilder::with_config).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Locale tag for message lookups (e.g., `en`, `ko-KR`). Root when unset.
    pub locale: Option<String>,

    /// Message bundle location.
    pub messages: Option<MessagesConfig>,

    /// Mappings added to (or replacing) the seeded registry.
    pub type_mappings: BTreeMap<String, JsonFieldType>,

    /// Seeded mappings to remove, applied before `type_mappings`.
    pub removed_type_mappings: Vec<String>,
}

/// Where message bundles live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Directory holding the bundle files.
    pub directory: PathBuf,
    /// Bundle basename (`<basename>.yaml`, `<basename>_<locale>.yaml`).
    pub basename: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            basename: DEFAULT_BASENAME.to_string(),
        }
    }
}

impl DocsConfig {
    /// Load config from a YAML file, or TOML when the extension is `.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let mut config: Self = if is_toml {
            toml::from_str(&content)?
        } else {
            serde_yaml_ng::from_str(&content)?
        };

        if let (Some(messages), Some(base)) = (config.messages.as_mut(), path.parent()) {
            if messages.directory.is_relative() {
                messages.directory = base.join(&messages.directory);
            }
        }

        tracing::debug!(path = %path.display(), "loaded docs config");
        Ok(config)
    }

    /// Apply the mapping overrides to `mapper`.
    pub fn apply_mappings(&self, mapper: &mut JsonFieldTypeMapper) {
        mapper.remove_all(&self.removed_type_mappings);
        mapper.add_all(
            self.type_mappings
                .iter()
                .map(|(name, tag)| (name.clone(), *tag)),
        );
    }
}
