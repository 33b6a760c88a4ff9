//! Field description resolution.

use std::fmt;
use std::sync::Arc;

use restdocs_easy_core::FieldShapeMetadata;

use super::{Locale, MessageSource, StaticMessageSource};
use crate::error::{Error, Result};

/// Line separator used in composite descriptions.
pub const LINE_SEPARATOR: &str = "\n";

/// Continuation marker placed between enum constant lines.
pub const ENUM_CONSTANT_SEPARATOR: &str = " + \n";

/// Resolves human-readable descriptions for fields and message expressions.
///
/// Codes follow the declaring type's qualified name:
///
/// | what | code | fallback |
/// |---|---|---|
/// | field | `<qualified class>.<field>` | field name |
/// | enum constant | `<qualified enum>.<CONSTANT>` | constant name alone |
#[derive(Clone)]
pub struct DescriptionMessageSource {
    source: Arc<dyn MessageSource + Send + Sync>,
    locale: Locale,
}

impl fmt::Debug for DescriptionMessageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptionMessageSource")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl Default for DescriptionMessageSource {
    fn default() -> Self {
        Self::new(Arc::new(StaticMessageSource::new()), Locale::root())
    }
}

impl DescriptionMessageSource {
    /// Wrap a message source resolving under `locale`.
    #[must_use]
    pub fn new(source: Arc<dyn MessageSource + Send + Sync>, locale: Locale) -> Self {
        Self { source, locale }
    }

    /// Locale used for every lookup.
    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The underlying message source.
    #[must_use]
    pub fn source(&self) -> &Arc<dyn MessageSource + Send + Sync> {
        &self.source
    }

    /// Look up `code`, falling back to `default`.
    #[must_use]
    pub fn message(&self, code: &str, default: Option<&str>) -> Option<String> {
        self.source.get_message(code, default, &self.locale)
    }

    /// Describe a field.
    ///
    /// Enum-typed fields get the base message followed by a blank line and one
    /// `CONSTANT : message` line per constant, continued with ` + `.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EnumDescription`] if an enum type declares no constants.
    pub fn describe(&self, metadata: &FieldShapeMetadata<'_>) -> Result<String> {
        let code = format!("{}.{}", metadata.qualified_class_name, metadata.field_name);
        let base = self.message(&code, Some(&metadata.field_name));

        if !metadata.field_type.is_enum() {
            return Ok(base.unwrap_or_else(|| metadata.field_name.clone()));
        }

        let enum_type = metadata.field_type;
        let lines: Vec<String> = enum_type
            .constants()
            .iter()
            .map(|constant| {
                let code = format!("{}.{constant}", enum_type.qualified_name());
                match self.message(&code, None) {
                    Some(message) => format!("{constant} : {message}"),
                    None => constant.clone(),
                }
            })
            .collect();

        compose_enum_description(enum_type.qualified_name(), base.as_deref(), &lines)
    }

    /// Resolve a description expression.
    ///
    /// `{code}` is looked up as a message code; any other text is returned
    /// unchanged; `None` yields `default`.
    #[must_use]
    pub fn resolve_expression(&self, expression: Option<&str>, default: &str) -> String {
        let Some(expression) = expression else {
            return default.to_string();
        };

        match expression
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
        {
            Some(code) => self
                .message(code, Some(default))
                .unwrap_or_else(|| default.to_string()),
            None => expression.to_string(),
        }
    }
}

fn compose_enum_description(type_name: &str, base: Option<&str>, lines: &[String]) -> Result<String> {
    let Some(base) = base.filter(|_| !lines.is_empty()) else {
        return Err(Error::EnumDescription {
            type_name: type_name.to_string(),
        });
    };

    Ok(format!(
        "{base}{LINE_SEPARATOR}{LINE_SEPARATOR}{}",
        lines.join(ENUM_CONSTANT_SEPARATOR)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use restdocs_easy_core::{reflect, FieldDef, Shape, TypeRef};

    fn source(messages: StaticMessageSource) -> DescriptionMessageSource {
        DescriptionMessageSource::new(Arc::new(messages), Locale::root())
    }

    fn sample() -> Shape {
        let abc = TypeRef::enumeration("com.example.Abc", ["A", "B", "C"]);
        let sex = TypeRef::enumeration("com.example.Sex", ["male", "female"]);
        Shape::record("com.example.Sample")
            .component(FieldDef::new("name", restdocs_easy_core::types::string()))
            .component(FieldDef::new("content", restdocs_easy_core::types::string()))
            .component(FieldDef::new("abc", abc))
            .component(FieldDef::new("sex", sex))
    }

    #[test]
    fn describes_fields_with_fallback_and_enum_composites() {
        let messages = StaticMessageSource::new()
            .message("com.example.Sample.name", "테스트")
            .message("com.example.Sample.sex", "성별")
            .message("com.example.Sex.male", "남성")
            .message("com.example.Sex.female", "여성");
        let source = source(messages);
        let shape = sample();

        let described: Vec<String> = reflect(&shape)
            .iter()
            .map(|m| source.describe(m).unwrap())
            .collect();

        assert_eq!(
            described,
            vec![
                "테스트".to_string(),
                "content".to_string(),
                "abc\n\nA + \nB + \nC".to_string(),
                "성별\n\nmale : 남성 + \nfemale : 여성".to_string(),
            ]
        );
    }

    #[test]
    fn enum_shape_describes_its_synthetic_entry() {
        let shape = Shape::enumeration("com.example.Status", ["ON"]);
        let source = source(StaticMessageSource::new().message("com.example.Status.ON", "Powered"));

        let metadata = reflect(&shape);
        assert_eq!(source.describe(&metadata[0]).unwrap(), "status\n\nON : Powered");
    }

    #[test]
    fn enum_without_constants_fails() {
        let empty = TypeRef::enumeration("com.example.Empty", Vec::<String>::new());
        let shape = Shape::class("com.example.Holder").field(FieldDef::new("kind", empty));
        let source = DescriptionMessageSource::default();

        let metadata = reflect(&shape);
        let err = source.describe(&metadata[0]).unwrap_err();
        assert!(matches!(err, Error::EnumDescription { ref type_name } if type_name == "com.example.Empty"));
    }

    #[test]
    fn resolve_expression_forms() {
        let source = source(StaticMessageSource::new().message("foo.bar", "Foo Bar"));

        assert_eq!(source.resolve_expression(Some("{foo.bar}"), "default"), "Foo Bar");
        assert_eq!(source.resolve_expression(Some("{missing}"), "default"), "default");
        assert_eq!(source.resolve_expression(Some("plain text"), "default"), "plain text");
        assert_eq!(source.resolve_expression(Some("{unterminated"), "default"), "{unterminated");
        assert_eq!(source.resolve_expression(None, "default"), "default");
    }

    #[test]
    fn lookups_use_configured_locale() {
        let messages = StaticMessageSource::new()
            .message("foo", "root")
            .localized("ko", "foo", "한국어");
        let source = DescriptionMessageSource::new(Arc::new(messages), Locale::new("ko-KR"));

        assert_eq!(source.resolve_expression(Some("{foo}"), "x"), "한국어");
    }
}
