//! Fluent descriptor operations and terminal conversions.

use std::collections::HashSet;
use std::sync::Arc;

use restdocs_easy_core::{Shape, ValidationGroup};

use crate::descriptor::{merge, Descriptor};
use crate::error::{Error, Result};
use crate::generator::ClassDescriptorGenerator;
use crate::snippet::{
    CookieDescriptor, FieldDescriptor, HeaderDescriptor, LinkDescriptor, ParameterDescriptor,
    RequestPartDescriptor, Snippet, SnippetKind, SubsectionDescriptor,
};

/// An ordered set of descriptors with name-keyed editing operations.
///
/// Every editing method consumes the operator and returns the updated one, so
/// calls chain:
///
/// ```
/// use restdocs_easy::{Descriptor, Operator};
///
/// let fields = Operator::new(vec![
///     Descriptor::new("id", "Identifier"),
///     Descriptor::new("name", "Name"),
///     Descriptor::new("password", "Secret"),
/// ])
/// .exclude(["password"])
/// .optional(["name"])
/// .to_field();
///
/// assert_eq!(fields.len(), 2);
/// assert!(fields[1].optional);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Operator {
    descriptors: Vec<Descriptor>,
    generator: Option<Arc<ClassDescriptorGenerator>>,
}

fn name_set<I, S>(names: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names.into_iter().map(|n| n.as_ref().to_string()).collect()
}

impl Operator {
    /// An operator over hand-built descriptors. Shapes cannot be added.
    #[must_use]
    pub fn new(descriptors: Vec<Descriptor>) -> Self {
        Self {
            descriptors,
            generator: None,
        }
    }

    /// An operator that can generate and merge further shapes.
    #[must_use]
    pub fn with_generator(descriptors: Vec<Descriptor>, generator: Arc<ClassDescriptorGenerator>) -> Self {
        Self {
            descriptors,
            generator: Some(generator),
        }
    }

    /// Current descriptors.
    #[must_use]
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// Keep only the named descriptors.
    #[must_use]
    pub fn filter<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = name_set(names);
        self.descriptors.retain(|d| names.contains(d.name()));
        self
    }

    /// Drop the named descriptors.
    #[must_use]
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = name_set(names);
        self.descriptors.retain(|d| !names.contains(d.name()));
        self
    }

    fn update<I, S>(mut self, names: I, modify: impl Fn(&Descriptor) -> Descriptor) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = name_set(names);
        for descriptor in &mut self.descriptors {
            if names.contains(descriptor.name()) {
                *descriptor = modify(descriptor);
            }
        }
        self
    }

    /// Mark the named descriptors as ignored.
    #[must_use]
    pub fn ignore<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.update(names, |d| d.with_ignore(true))
    }

    /// Clear the ignored flag on the named descriptors.
    #[must_use]
    pub fn not_ignore<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.update(names, |d| d.with_ignore(false))
    }

    /// Mark the named descriptors as optional.
    #[must_use]
    pub fn optional<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.update(names, |d| d.with_optional(true))
    }

    /// Mark the named descriptors as required.
    #[must_use]
    pub fn require<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.update(names, |d| d.with_optional(false))
    }

    /// Merge `descriptors` in; same-named entries are replaced.
    #[must_use]
    pub fn add_all(mut self, descriptors: impl IntoIterator<Item = Descriptor>) -> Self {
        let source: Vec<Descriptor> = descriptors.into_iter().collect();
        self.descriptors = merge(&self.descriptors, &source);
        self
    }

    /// Generate descriptors for `shape` and merge them in.
    ///
    /// Useful to inline a nested type under a prefix such as `address.`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GeneratorUnavailable`] for operators built from manual
    /// descriptors, or any error from generation.
    pub fn add_all_shape(
        self,
        prefix: Option<&str>,
        shape: &Shape,
        groups: &[ValidationGroup],
    ) -> Result<Self> {
        let generated = self
            .generator
            .as_ref()
            .ok_or(Error::GeneratorUnavailable)?
            .generate(prefix, shape, groups)?;
        Ok(self.add_all(generated))
    }

    /// Convert to payload field descriptors.
    #[must_use]
    pub fn to_field(&self) -> Vec<FieldDescriptor> {
        self.descriptors.iter().map(FieldDescriptor::from).collect()
    }

    /// Convert to payload subsection descriptors.
    #[must_use]
    pub fn to_subsection(&self) -> Vec<SubsectionDescriptor> {
        self.descriptors.iter().map(SubsectionDescriptor::from).collect()
    }

    /// Convert to multipart request part descriptors.
    #[must_use]
    pub fn to_request_part(&self) -> Vec<RequestPartDescriptor> {
        self.descriptors.iter().map(RequestPartDescriptor::from).collect()
    }

    /// Convert to parameter descriptors.
    #[must_use]
    pub fn to_parameter(&self) -> Vec<ParameterDescriptor> {
        self.descriptors.iter().map(ParameterDescriptor::from).collect()
    }

    /// Convert to link descriptors.
    #[must_use]
    pub fn to_link(&self) -> Vec<LinkDescriptor> {
        self.descriptors.iter().map(LinkDescriptor::from).collect()
    }

    /// Convert to header descriptors.
    #[must_use]
    pub fn to_header(&self) -> Vec<HeaderDescriptor> {
        self.descriptors.iter().map(HeaderDescriptor::from).collect()
    }

    /// Convert to cookie descriptors.
    #[must_use]
    pub fn to_cookie(&self) -> Vec<CookieDescriptor> {
        self.descriptors.iter().map(CookieDescriptor::from).collect()
    }

    /// The raw descriptors.
    #[must_use]
    pub fn to_list(&self) -> Vec<Descriptor> {
        self.descriptors.clone()
    }

    /// Take the raw descriptors.
    #[must_use]
    pub fn into_list(self) -> Vec<Descriptor> {
        self.descriptors
    }

    /// Concatenate all descriptions with no delimiter.
    #[must_use]
    pub fn join(&self) -> String {
        self.join_with("")
    }

    /// Concatenate all descriptions with `delimiter`.
    #[must_use]
    pub fn join_with(&self, delimiter: &str) -> String {
        self.join_with_affixes(delimiter, "", "")
    }

    /// Concatenate all descriptions with `delimiter`, wrapped in `prefix` and `suffix`.
    ///
    /// Missing descriptions contribute an empty string.
    #[must_use]
    pub fn join_with_affixes(&self, delimiter: &str, prefix: &str, suffix: &str) -> String {
        let joined = self
            .descriptors
            .iter()
            .map(|d| d.description().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(delimiter);
        format!("{prefix}{joined}{suffix}")
    }

    /// Path parameters snippet.
    #[must_use]
    pub fn path_parameters(&self) -> Snippet<ParameterDescriptor> {
        Snippet::new(SnippetKind::PathParameters, self.to_parameter())
    }

    /// Query parameters snippet.
    #[must_use]
    pub fn query_parameters(&self) -> Snippet<ParameterDescriptor> {
        Snippet::new(SnippetKind::QueryParameters, self.to_parameter())
    }

    /// Form parameters snippet.
    #[must_use]
    pub fn form_parameters(&self) -> Snippet<ParameterDescriptor> {
        Snippet::new(SnippetKind::FormParameters, self.to_parameter())
    }

    /// Multipart request parts snippet.
    #[must_use]
    pub fn request_parts(&self) -> Snippet<RequestPartDescriptor> {
        Snippet::new(SnippetKind::RequestParts, self.to_request_part())
    }

    /// Request fields snippet.
    #[must_use]
    pub fn request_fields(&self) -> Snippet<FieldDescriptor> {
        Snippet::new(SnippetKind::RequestFields, self.to_field())
    }

    /// Fields snippet for the multipart part named `part`.
    #[must_use]
    pub fn request_part_fields(&self, part: &str) -> Snippet<FieldDescriptor> {
        Snippet::new(SnippetKind::RequestPartFields, self.to_field()).with_part(part)
    }

    /// Response fields snippet.
    #[must_use]
    pub fn response_fields(&self) -> Snippet<FieldDescriptor> {
        Snippet::new(SnippetKind::ResponseFields, self.to_field())
    }

    /// Links snippet.
    #[must_use]
    pub fn links(&self) -> Snippet<LinkDescriptor> {
        Snippet::new(SnippetKind::Links, self.to_link())
    }

    /// Request headers snippet.
    #[must_use]
    pub fn request_headers(&self) -> Snippet<HeaderDescriptor> {
        Snippet::new(SnippetKind::RequestHeaders, self.to_header())
    }

    /// Response headers snippet.
    #[must_use]
    pub fn response_headers(&self) -> Snippet<HeaderDescriptor> {
        Snippet::new(SnippetKind::ResponseHeaders, self.to_header())
    }

    /// Request cookies snippet.
    #[must_use]
    pub fn request_cookies(&self) -> Snippet<CookieDescriptor> {
        Snippet::new(SnippetKind::RequestCookies, self.to_cookie())
    }

    /// Response cookies snippet.
    #[must_use]
    pub fn response_cookies(&self) -> Snippet<CookieDescriptor> {
        Snippet::new(SnippetKind::ResponseCookies, self.to_cookie())
    }

    /// Raw request body snippet. Not supported.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::Unsupported`].
    pub fn request_body(&self) -> Result<Snippet<FieldDescriptor>> {
        Err(Error::Unsupported {
            operation: "request_body",
        })
    }

    /// Raw response body snippet. Not supported.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::Unsupported`].
    pub fn response_body(&self) -> Result<Snippet<FieldDescriptor>> {
        Err(Error::Unsupported {
            operation: "response_body",
        })
    }

    /// Raw body snippet of a multipart part. Not supported.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::Unsupported`].
    pub fn request_part_body(&self, _part: &str) -> Result<Snippet<FieldDescriptor>> {
        Err(Error::Unsupported {
            operation: "request_part_body",
        })
    }
}
