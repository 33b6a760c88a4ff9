//! Shape → descriptors.

use std::fmt;
use std::sync::Arc;

use restdocs_easy_core::{reflect, FieldShapeMetadata, Shape, ValidationGroup};

use crate::constraints::{constraint_attributes, ConstraintDescriptions, ValidatorConstraintDescriptions};
use crate::descriptor::Descriptor;
use crate::error::Result;
use crate::mapper::JsonFieldTypeMapper;
use crate::message::DescriptionMessageSource;
use crate::validation::FieldOptionalValidator;

/// Combines the reflector, optionality analysis, type mapping and message
/// resolution into one [`Descriptor`] per documentable field.
#[derive(Clone)]
pub struct ClassDescriptorGenerator {
    messages: DescriptionMessageSource,
    mapper: JsonFieldTypeMapper,
    constraints: Arc<dyn ConstraintDescriptions + Send + Sync>,
}

impl fmt::Debug for ClassDescriptorGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDescriptorGenerator")
            .field("messages", &self.messages)
            .field("mapper", &self.mapper)
            .finish_non_exhaustive()
    }
}

impl ClassDescriptorGenerator {
    /// Assemble a generator from its collaborators.
    #[must_use]
    pub fn new(
        messages: DescriptionMessageSource,
        mapper: JsonFieldTypeMapper,
        constraints: Arc<dyn ConstraintDescriptions + Send + Sync>,
    ) -> Self {
        Self {
            messages,
            mapper,
            constraints,
        }
    }

    /// A generator using the template-based constraint descriptions of `messages`.
    #[must_use]
    pub fn with_defaults(messages: DescriptionMessageSource, mapper: JsonFieldTypeMapper) -> Self {
        let constraints = Arc::new(ValidatorConstraintDescriptions::new(messages.clone()));
        Self::new(messages, mapper, constraints)
    }

    /// Message resolver.
    #[must_use]
    pub fn messages(&self) -> &DescriptionMessageSource {
        &self.messages
    }

    /// Type mapper.
    #[must_use]
    pub fn mapper(&self) -> &JsonFieldTypeMapper {
        &self.mapper
    }

    /// Generate descriptors for `shape` under the active validation `groups`.
    ///
    /// `prefix` is applied verbatim to every descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EnumDescription`](crate::Error::EnumDescription) if an
    /// enum type without constants is described.
    pub fn generate(
        &self,
        prefix: Option<&str>,
        shape: &Shape,
        groups: &[ValidationGroup],
    ) -> Result<Vec<Descriptor>> {
        let validator = FieldOptionalValidator::new(groups.iter().cloned());

        let descriptors = reflect(shape)
            .iter()
            .map(|metadata| self.describe(prefix, shape, metadata, &validator))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            shape = shape.ty().name(),
            prefix = prefix.unwrap_or_default(),
            groups = groups.len(),
            descriptors = descriptors.len(),
            "generated descriptors"
        );

        Ok(descriptors)
    }

    fn describe(
        &self,
        prefix: Option<&str>,
        shape: &Shape,
        metadata: &FieldShapeMetadata<'_>,
        validator: &FieldOptionalValidator,
    ) -> Result<Descriptor> {
        let builder = Descriptor::builder(metadata.field_name.as_str())
            .prefix(prefix)
            .ty(self.mapper.resolve(metadata.field_type))
            .description(self.messages.describe(metadata)?);

        // Enum entries are always required and carry no constraints.
        if metadata.declaring.is_enum() {
            return Ok(builder.optional(false).build());
        }

        let Some(field) = metadata.field else {
            return Ok(builder.build());
        };

        let attributes = if validator.has_documentable_constraint(Some(field)) {
            constraint_attributes(self.constraints.as_ref(), shape, field.name())
        } else {
            Vec::new()
        };

        Ok(builder
            .optional(validator.is_optional(field))
            .attributes(attributes)
            .build())
    }
}
