//! Message lookup.
//!
//! Descriptions are resolved through a narrow [`MessageSource`] contract:
//! `(code, default, locale) -> Option<String>`. Any closure with that shape is
//! a message source; [`StaticMessageSource`] keeps in-memory tables and
//! [`BundleMessageSource`] loads YAML bundles from disk.

mod bundle;
mod description;

use std::collections::HashMap;
use std::fmt;

pub use bundle::BundleMessageSource;
pub(crate) use bundle::scalar_text;
pub use description::{DescriptionMessageSource, ENUM_CONSTANT_SEPARATOR, LINE_SEPARATOR};

/// A message lookup.
///
/// Implementations return the message for `code` under `locale`, falling back
/// to `default` when nothing matches. `None` means "no message and no default".
pub trait MessageSource {
    /// Look up a message.
    fn get_message(&self, code: &str, default: Option<&str>, locale: &Locale) -> Option<String>;
}

impl<F> MessageSource for F
where
    F: Fn(&str, Option<&str>, &Locale) -> Option<String>,
{
    fn get_message(&self, code: &str, default: Option<&str>, locale: &Locale) -> Option<String> {
        self(code, default, locale)
    }
}

/// A language tag such as `en`, `en-US` or `ko-KR`.
///
/// Underscores are normalized to hyphens. The empty tag is the root locale,
/// which holds messages shared by every language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Locale(String);

impl Locale {
    /// The root locale.
    #[must_use]
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Parse a language tag.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self(tag.trim().replace('_', "-"))
    }

    /// The normalized tag (`""` for root).
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.0
    }

    /// Whether this is the root locale.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// This locale followed by its ancestors, ending with root.
    ///
    /// `ko-KR` yields `ko-KR`, `ko`, root.
    #[must_use]
    pub fn fallbacks(&self) -> Vec<Locale> {
        let mut chain = Vec::new();
        let mut tag = self.0.as_str();
        while !tag.is_empty() {
            chain.push(Locale(tag.to_string()));
            tag = tag.rsplit_once('-').map_or("", |(parent, _)| parent);
        }
        chain.push(Locale::root());
        chain
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// In-memory messages keyed by locale.
///
/// # Example
///
/// ```
/// use restdocs_easy::message::{Locale, MessageSource, StaticMessageSource};
///
/// let messages = StaticMessageSource::new()
///     .message("com.example.Member.name", "Name")
///     .localized("ko", "com.example.Member.name", "이름");
///
/// let ko = Locale::new("ko-KR");
/// assert_eq!(messages.get_message("com.example.Member.name", None, &ko).as_deref(), Some("이름"));
/// assert_eq!(messages.get_message("missing", Some("fallback"), &ko).as_deref(), Some("fallback"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticMessageSource {
    tables: HashMap<Locale, HashMap<String, String>>,
}

impl StaticMessageSource {
    /// An empty source; every lookup returns its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root-locale message.
    #[must_use]
    pub fn message(self, code: impl Into<String>, text: impl Into<String>) -> Self {
        self.localized(Locale::root(), code, text)
    }

    /// Add a message for a specific locale.
    #[must_use]
    pub fn localized(
        mut self,
        locale: impl Into<Locale>,
        code: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.insert(locale.into(), code.into(), text.into());
        self
    }

    /// Add a message in place.
    pub fn insert(&mut self, locale: Locale, code: String, text: String) {
        self.tables.entry(locale).or_default().insert(code, text);
    }

    /// Add every `(code, text)` pair for `locale`.
    pub fn extend<I>(&mut self, locale: &Locale, messages: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.tables.entry(locale.clone()).or_default().extend(messages);
    }

    /// Number of messages across all locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.values().map(HashMap::len).sum()
    }

    /// Whether no messages are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, code: &str, locale: &Locale) -> Option<&str> {
        locale.fallbacks().iter().find_map(|candidate| {
            self.tables
                .get(candidate)
                .and_then(|table| table.get(code))
                .map(String::as_str)
        })
    }
}

impl MessageSource for StaticMessageSource {
    fn get_message(&self, code: &str, default: Option<&str>, locale: &Locale) -> Option<String> {
        self.lookup(code, locale)
            .or(default)
            .map(ToString::to_string)
    }
}
