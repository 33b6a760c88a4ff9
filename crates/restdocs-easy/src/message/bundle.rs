//! YAML message bundles loaded from a directory.

use std::path::Path;

use serde_yaml_ng::Value;

use super::{Locale, MessageSource, StaticMessageSource};
use crate::error::Result;

/// Messages loaded from `<basename>.yaml` and `<basename>_<locale>.yaml` files.
///
/// Nested mappings flatten into dotted codes, so
///
/// ```yaml
/// com:
///   example:
///     Member:
///       name: Name
/// ```
///
/// defines `com.example.Member.name`. Keys that already contain dots are kept
/// as-is, which lets a bundle mix both styles.
#[derive(Debug, Clone, Default)]
pub struct BundleMessageSource {
    messages: StaticMessageSource,
}

impl BundleMessageSource {
    /// Load every bundle for `basename` found in `dir`.
    ///
    /// A missing directory yields an empty source. Unreadable or malformed
    /// bundle files are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if `dir` exists but cannot be listed.
    pub fn from_dir(dir: impl AsRef<Path>, basename: &str) -> Result<Self> {
        let dir = dir.as_ref();
        let mut source = Self::default();

        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "message directory not found");
            return Ok(source);
        }

        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .collect();
        paths.sort();

        for path in paths {
            let Some(locale) = bundle_locale(&path, basename) else {
                continue;
            };

            match std::fs::read_to_string(&path)
                .map_err(crate::Error::from)
                .and_then(|text| source.add_yaml(&locale, &text))
            {
                Ok(count) => {
                    tracing::debug!(path = %path.display(), %locale, count, "loaded message bundle");
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping message bundle");
                }
            }
        }

        Ok(source)
    }

    /// Parse a YAML bundle and add its messages under `locale`.
    ///
    /// Returns the number of messages added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`](crate::Error::Yaml) if `yaml` is not valid YAML.
    pub fn add_yaml(&mut self, locale: &Locale, yaml: &str) -> Result<usize> {
        let value: Value = serde_yaml_ng::from_str(yaml)?;
        let mut flat = Vec::new();
        flatten("", &value, &mut flat);
        let count = flat.len();
        self.messages.extend(locale, flat);
        Ok(count)
    }

    /// Number of loaded messages across all locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether nothing was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl MessageSource for BundleMessageSource {
    fn get_message(&self, code: &str, default: Option<&str>, locale: &Locale) -> Option<String> {
        self.messages.get_message(code, default, locale)
    }
}

/// Locale of a bundle file, or `None` if the file is not part of `basename`.
fn bundle_locale(path: &Path, basename: &str) -> Option<Locale> {
    let extension = path.extension()?.to_str()?;
    if extension != "yaml" && extension != "yml" {
        return None;
    }

    let stem = path.file_stem()?.to_str()?;
    if stem == basename {
        return Some(Locale::root());
    }

    stem.strip_prefix(basename)?
        .strip_prefix('_')
        .filter(|tag| !tag.is_empty())
        .map(Locale::new)
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Mapping(mapping) => {
            for (key, child) in mapping {
                let Some(key) = scalar_text(key) else {
                    continue;
                };
                let code = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&code, child, out);
            }
        }
        Value::Tagged(tagged) => flatten(prefix, &tagged.value, out),
        other => {
            if let Some(text) = scalar_text(other) {
                if !prefix.is_empty() {
                    out.push((prefix.to_string(), text));
                }
            }
        }
    }
}

/// Text of a YAML scalar; `None` for sequences, mappings and null.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_and_dotted_keys_flatten() {
        let mut source = BundleMessageSource::default();
        let count = source
            .add_yaml(
                &Locale::root(),
                "com:\n  example:\n    Member:\n      name: Name\n      age: 7\ncom.example.Member.email: Email address\n",
            )
            .unwrap();

        assert_eq!(count, 3);
        let root = Locale::root();
        assert_eq!(
            source.get_message("com.example.Member.name", None, &root).as_deref(),
            Some("Name")
        );
        assert_eq!(
            source.get_message("com.example.Member.age", None, &root).as_deref(),
            Some("7")
        );
        assert_eq!(
            source.get_message("com.example.Member.email", None, &root).as_deref(),
            Some("Email address")
        );
    }

    #[test]
    fn bundle_file_names() {
        assert_eq!(
            bundle_locale(Path::new("i18n/messages.yaml"), "messages"),
            Some(Locale::root())
        );
        assert_eq!(
            bundle_locale(Path::new("i18n/messages_ko_KR.yml"), "messages"),
            Some(Locale::new("ko-KR"))
        );
        assert_eq!(bundle_locale(Path::new("i18n/messages_.yaml"), "messages"), None);
        assert_eq!(bundle_locale(Path::new("i18n/errors.yaml"), "messages"), None);
        assert_eq!(bundle_locale(Path::new("i18n/messages.properties"), "messages"), None);
    }

    #[test]
    fn loads_directory_with_locale_fallback() {
        let dir = std::env::temp_dir().join(format!("restdocs-easy-bundle-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("messages.yaml"), "greeting: Hello\nfarewell: Bye\n").unwrap();
        std::fs::write(dir.join("messages_ko.yaml"), "greeting: 안녕하세요\n").unwrap();
        std::fs::write(dir.join("messages_fr.yaml"), "greeting: [unclosed\n").unwrap();
        std::fs::write(dir.join("other.yaml"), "greeting: ignored\n").unwrap();

        let source = BundleMessageSource::from_dir(&dir, "messages").unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        let ko = Locale::new("ko-KR");
        assert_eq!(source.len(), 3);
        assert_eq!(source.get_message("greeting", None, &ko).as_deref(), Some("안녕하세요"));
        assert_eq!(source.get_message("farewell", None, &ko).as_deref(), Some("Bye"));
        assert_eq!(
            source.get_message("greeting", None, &Locale::new("fr")).as_deref(),
            Some("Hello")
        );
    }

    #[test]
    fn missing_directory_is_empty() {
        let source =
            BundleMessageSource::from_dir("/nonexistent/restdocs-easy/messages", "messages").unwrap();
        assert!(source.is_empty());
    }
}
