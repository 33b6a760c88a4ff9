//! Entry point tying message source, type mapper and constraint descriptions together.

use std::fmt;
use std::sync::Arc;

use restdocs_easy_core::{DataShape, Shape, ValidationGroup};

use crate::builders::{DescriptorsGenerator, HeadersGenerator, ParamsGenerator};
use crate::config::DocsConfig;
use crate::constraints::{ConstraintDescriptions, ValidatorConstraintDescriptions};
use crate::error::Result;
use crate::generator::ClassDescriptorGenerator;
use crate::mapper::JsonFieldTypeMapper;
use crate::message::{BundleMessageSource, DescriptionMessageSource, Locale, MessageSource, StaticMessageSource};
use crate::operator::Operator;

/// Documentation descriptor factory.
///
/// Each instance owns its type mapper; nothing is shared between instances.
///
/// ```
/// use restdocs_easy::message::StaticMessageSource;
/// use restdocs_easy::{types, Annotation, FieldDef, RestDocs, Shape};
///
/// let docs = RestDocs::builder()
///     .message_source(StaticMessageSource::new().message("com.example.Login.email", "Login email"))
///     .build();
///
/// let login = Shape::record("com.example.Login")
///     .component(FieldDef::new("email", types::string()).annotate(Annotation::not_blank()));
///
/// let fields = docs.generate(&login)?.to_field();
/// assert_eq!(fields[0].path, "email");
/// assert_eq!(fields[0].description.as_deref(), Some("Login email"));
/// assert!(!fields[0].optional);
/// # Ok::<(), restdocs_easy::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RestDocs {
    messages: DescriptionMessageSource,
    generator: Arc<ClassDescriptorGenerator>,
}

impl Default for RestDocs {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RestDocs {
    /// Start configuring an instance.
    #[must_use]
    pub fn builder() -> RestDocsBuilder {
        RestDocsBuilder::default()
    }

    /// Hand-written header descriptors.
    #[must_use]
    pub fn headers(&self) -> HeadersGenerator {
        HeadersGenerator::new(self.messages.clone())
    }

    /// Hand-written parameter descriptors.
    #[must_use]
    pub fn params(&self) -> ParamsGenerator {
        ParamsGenerator::new(self.messages.clone())
    }

    /// Hand-written free-form descriptors.
    #[must_use]
    pub fn descriptors(&self) -> DescriptorsGenerator {
        DescriptorsGenerator::new(self.messages.clone())
    }

    /// Descriptors for `shape` with no prefix and no active groups.
    ///
    /// # Errors
    ///
    /// See [`ClassDescriptorGenerator::generate`].
    pub fn generate(&self, shape: &Shape) -> Result<Operator> {
        self.generate_with(None, shape, &[])
    }

    /// Descriptors for `shape` under `prefix` and the active validation `groups`.
    ///
    /// # Errors
    ///
    /// See [`ClassDescriptorGenerator::generate`].
    pub fn generate_with(
        &self,
        prefix: Option<&str>,
        shape: &Shape,
        groups: &[ValidationGroup],
    ) -> Result<Operator> {
        let descriptors = self.generator.generate(prefix, shape, groups)?;
        Ok(Operator::with_generator(descriptors, Arc::clone(&self.generator)))
    }

    /// Descriptors for a type that describes its own shape.
    ///
    /// # Errors
    ///
    /// See [`ClassDescriptorGenerator::generate`].
    pub fn generate_for<T: DataShape>(&self) -> Result<Operator> {
        self.generate(&T::shape())
    }

    /// The underlying generator.
    #[must_use]
    pub fn generator(&self) -> &ClassDescriptorGenerator {
        &self.generator
    }

    /// The message resolver.
    #[must_use]
    pub fn messages(&self) -> &DescriptionMessageSource {
        &self.messages
    }
}

/// Builder for [`RestDocs`].
pub struct RestDocsBuilder {
    source: Option<Arc<dyn MessageSource + Send + Sync>>,
    locale: Locale,
    constraints: Option<Arc<dyn ConstraintDescriptions + Send + Sync>>,
    mapper: JsonFieldTypeMapper,
}

impl fmt::Debug for RestDocsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestDocsBuilder")
            .field("locale", &self.locale)
            .field("mapper", &self.mapper)
            .finish_non_exhaustive()
    }
}

impl Default for RestDocsBuilder {
    fn default() -> Self {
        Self {
            source: None,
            locale: Locale::root(),
            constraints: None,
            mapper: JsonFieldTypeMapper::new(),
        }
    }
}

impl RestDocsBuilder {
    /// Message source for descriptions. Defaults to an empty source, so every
    /// description falls back to the field name.
    #[must_use]
    pub fn message_source(mut self, source: impl MessageSource + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Locale for message lookups (default root).
    #[must_use]
    pub fn locale(mut self, locale: impl Into<Locale>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Replace the template-based constraint descriptions.
    #[must_use]
    pub fn constraint_descriptions(
        mut self,
        constraints: impl ConstraintDescriptions + Send + Sync + 'static,
    ) -> Self {
        self.constraints = Some(Arc::new(constraints));
        self
    }

    /// Adjust the type mapper.
    #[must_use]
    pub fn configure(mut self, f: impl FnOnce(&mut JsonFieldTypeMapper)) -> Self {
        f(&mut self.mapper);
        self
    }

    /// Apply locale, message bundles and mapping overrides from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the message directory cannot be listed.
    pub fn with_config(mut self, config: &DocsConfig) -> Result<Self> {
        if let Some(locale) = &config.locale {
            self.locale = Locale::new(locale);
        }

        if let Some(messages) = &config.messages {
            let bundle = BundleMessageSource::from_dir(&messages.directory, &messages.basename)?;
            self.source = Some(Arc::new(bundle));
        }

        config.apply_mappings(&mut self.mapper);
        Ok(self)
    }

    /// Finish.
    #[must_use]
    pub fn build(self) -> RestDocs {
        let source = self
            .source
            .unwrap_or_else(|| Arc::new(StaticMessageSource::new()));
        let messages = DescriptionMessageSource::new(source, self.locale);
        let constraints = self
            .constraints
            .unwrap_or_else(|| Arc::new(ValidatorConstraintDescriptions::new(messages.clone())));

        RestDocs {
            generator: Arc::new(ClassDescriptorGenerator::new(
                messages.clone(),
                self.mapper,
                constraints,
            )),
            messages,
        }
    }
}
