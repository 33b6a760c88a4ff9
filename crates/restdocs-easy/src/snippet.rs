//! Descriptor shapes handed to the snippet renderer.
//!
//! Each shape mirrors what a documentation snippet of that flavor can carry:
//! payload fields have a JSON type, headers cannot be ignored, and so on.
//! Rendering the snippets themselves happens elsewhere.

use std::fmt;

use serde::Serialize;

use crate::descriptor::{Attribute, Descriptor};
use crate::mapper::JsonFieldType;

/// A request or response payload field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Full JSON path (`prefix + name`).
    pub path: String,
    /// Semantic JSON type.
    #[serde(rename = "type")]
    pub ty: JsonFieldType,
    /// Description text.
    pub description: Option<String>,
    /// Whether the field may be absent.
    pub optional: bool,
    /// Whether the field is left out of the snippet.
    pub ignored: bool,
    /// Extra attributes such as constraint text.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
}

impl From<&Descriptor> for FieldDescriptor {
    fn from(d: &Descriptor) -> Self {
        Self {
            path: d.path(),
            ty: d.ty(),
            description: d.description().map(ToString::to_string),
            optional: d.is_optional(),
            ignored: d.is_ignored(),
            attributes: d.attributes().to_vec(),
        }
    }
}

/// A payload subsection: a path whose nested content is documented as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubsectionDescriptor {
    /// Full JSON path (`prefix + name`).
    pub path: String,
    /// Semantic JSON type.
    #[serde(rename = "type")]
    pub ty: JsonFieldType,
    /// Description text.
    pub description: Option<String>,
    /// Whether the subsection may be absent.
    pub optional: bool,
    /// Whether the subsection is left out of the snippet.
    pub ignored: bool,
    /// Extra attributes such as constraint text.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
}

impl From<&Descriptor> for SubsectionDescriptor {
    fn from(d: &Descriptor) -> Self {
        let field = FieldDescriptor::from(d);
        Self {
            path: field.path,
            ty: field.ty,
            description: field.description,
            optional: field.optional,
            ignored: field.ignored,
            attributes: field.attributes,
        }
    }
}

/// Generates a named, ignorable, optional descriptor shape.
macro_rules! named_descriptor {
    ($(#[$meta:meta])* $name:ident, $key:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        pub struct $name {
            #[doc = concat!("`", stringify!($key), "` (`prefix + name`).")]
            pub $key: String,
            /// Description text.
            pub description: Option<String>,
            /// Whether it may be absent.
            pub optional: bool,
            /// Whether it is left out of the snippet.
            pub ignored: bool,
            /// Extra attributes such as constraint text.
            #[serde(skip_serializing_if = "Vec::is_empty")]
            pub attributes: Vec<Attribute>,
        }

        impl From<&Descriptor> for $name {
            fn from(d: &Descriptor) -> Self {
                Self {
                    $key: d.path(),
                    description: d.description().map(ToString::to_string),
                    optional: d.is_optional(),
                    ignored: d.is_ignored(),
                    attributes: d.attributes().to_vec(),
                }
            }
        }
    };
}

named_descriptor!(
    /// A part of a multipart request.
    RequestPartDescriptor,
    name
);

named_descriptor!(
    /// A path, query or form parameter.
    ParameterDescriptor,
    name
);

named_descriptor!(
    /// A hypermedia link.
    LinkDescriptor,
    rel
);

named_descriptor!(
    /// A request or response cookie.
    CookieDescriptor,
    name
);

/// A request or response header. Headers have no ignore flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderDescriptor {
    /// Header name (`prefix + name`).
    pub name: String,
    /// Description text.
    pub description: Option<String>,
    /// Whether the header may be absent.
    pub optional: bool,
    /// Extra attributes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
}

impl From<&Descriptor> for HeaderDescriptor {
    fn from(d: &Descriptor) -> Self {
        Self {
            name: d.path(),
            description: d.description().map(ToString::to_string),
            optional: d.is_optional(),
            attributes: d.attributes().to_vec(),
        }
    }
}

/// Which snippet a set of converted descriptors feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnippetKind {
    /// Path parameters.
    PathParameters,
    /// Query string parameters.
    QueryParameters,
    /// Form body parameters.
    FormParameters,
    /// Multipart request parts.
    RequestParts,
    /// Request payload fields.
    RequestFields,
    /// Payload fields of one multipart part.
    RequestPartFields,
    /// Response payload fields.
    ResponseFields,
    /// Hypermedia links.
    Links,
    /// Request headers.
    RequestHeaders,
    /// Response headers.
    ResponseHeaders,
    /// Request cookies.
    RequestCookies,
    /// Response cookies.
    ResponseCookies,
}

impl SnippetKind {
    /// Snippet name, as used for generated file names.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::PathParameters => "path-parameters",
            Self::QueryParameters => "query-parameters",
            Self::FormParameters => "form-parameters",
            Self::RequestParts => "request-parts",
            Self::RequestFields => "request-fields",
            Self::RequestPartFields => "request-part-fields",
            Self::ResponseFields => "response-fields",
            Self::Links => "links",
            Self::RequestHeaders => "request-headers",
            Self::ResponseHeaders => "response-headers",
            Self::RequestCookies => "request-cookies",
            Self::ResponseCookies => "response-cookies",
        }
    }
}

impl fmt::Display for SnippetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Converted descriptors tagged with the snippet they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet<D> {
    kind: SnippetKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    part: Option<String>,
    descriptors: Vec<D>,
}

impl<D> Snippet<D> {
    /// A snippet of `kind`.
    #[must_use]
    pub fn new(kind: SnippetKind, descriptors: Vec<D>) -> Self {
        Self {
            kind,
            part: None,
            descriptors,
        }
    }

    /// Attach the multipart part name (for [`SnippetKind::RequestPartFields`]).
    #[must_use]
    pub fn with_part(mut self, part: impl Into<String>) -> Self {
        self.part = Some(part.into());
        self
    }

    /// Snippet flavor.
    #[must_use]
    pub fn kind(&self) -> SnippetKind {
        self.kind
    }

    /// Multipart part name, if any.
    #[must_use]
    pub fn part(&self) -> Option<&str> {
        self.part.as_deref()
    }

    /// Converted descriptors.
    #[must_use]
    pub fn descriptors(&self) -> &[D] {
        &self.descriptors
    }

    /// Take the converted descriptors.
    #[must_use]
    pub fn into_descriptors(self) -> Vec<D> {
        self.descriptors
    }
}
