//! Type handles and the well-known host type vocabulary.
//!
//! A [`TypeRef`] stands in for a runtime class object: it carries a qualified
//! dotted name, a [`TypeKind`], and the names of every type it is assignable
//! to. Assignability is what the JSON type mapper uses to pick a tag, so
//! constructors in this module wire the common supertypes (`Collection`,
//! `Map`, `Number`, `CharSequence`, `Enum`) automatically.

/// Well-known abstract supertype: key/value containers.
pub const MAP: &str = "Map";
/// Well-known abstract supertype: sequences and sets.
pub const COLLECTION: &str = "Collection";
/// Well-known abstract supertype: numeric values.
pub const NUMBER: &str = "Number";
/// Well-known abstract supertype: textual values.
pub const CHAR_SEQUENCE: &str = "CharSequence";
/// Well-known abstract supertype of every enumeration.
pub const ENUM: &str = "Enum";

/// Boolean primitive.
pub const BOOL: &str = "bool";
/// Single character primitive.
pub const CHAR: &str = "char";
/// Owned string.
pub const STRING: &str = "String";

/// Signed and unsigned integer plus floating point primitives.
pub const NUMERIC_PRIMITIVES: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
    "f32", "f64",
];

/// Calendar date without time zone.
pub const LOCAL_DATE: &str = "LocalDate";
/// Date and time without time zone.
pub const LOCAL_DATE_TIME: &str = "LocalDateTime";
/// Time of day without time zone.
pub const LOCAL_TIME: &str = "LocalTime";
/// Instant with time zone.
pub const DATE: &str = "Date";
/// Calendar instance.
pub const CALENDAR: &str = "Calendar";
/// ISO 4217 currency.
pub const CURRENCY: &str = "Currency";
/// Language tag.
pub const LOCALE: &str = "Locale";
/// 128-bit universally unique identifier.
pub const UUID: &str = "Uuid";

/// Category of a [`TypeRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Built-in scalar (`bool`, `i32`, `char`, ...).
    Primitive,
    /// Regular class with optional getter accessors.
    Class,
    /// Immutable record whose accessors are named after its components.
    Record,
    /// Enumeration with a fixed list of constants.
    Enum,
    /// Abstract contract; never instantiated by itself.
    Interface,
    /// Fixed-size array of an element type.
    Array,
}

/// A handle to a host type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    name: String,
    kind: TypeKind,
    supertypes: Vec<String>,
    element: Option<Box<TypeRef>>,
    constants: Vec<String>,
}

impl TypeRef {
    fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            supertypes: Vec::new(),
            element: None,
            constants: Vec::new(),
        }
    }

    /// A built-in scalar type.
    #[must_use]
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Primitive)
    }

    /// A regular class.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    /// An immutable record.
    #[must_use]
    pub fn record(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Record)
    }

    /// An abstract contract.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    /// An enumeration with its constants in declaration order.
    #[must_use]
    pub fn enumeration<I, S>(name: impl Into<String>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ty = Self::new(name, TypeKind::Enum);
        ty.supertypes.push(ENUM.to_string());
        ty.constants = constants.into_iter().map(Into::into).collect();
        ty
    }

    /// An array of `element`. Nested arrays model extra dimensions.
    #[must_use]
    pub fn array(element: TypeRef) -> Self {
        let mut ty = Self::new(format!("{}[]", element.name), TypeKind::Array);
        ty.element = Some(Box::new(element));
        ty
    }

    /// Add supertypes this type is assignable to.
    #[must_use]
    pub fn with_supertypes<I, S>(mut self, supertypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for supertype in supertypes {
            let supertype = supertype.into();
            if !self.supertypes.contains(&supertype) {
                self.supertypes.push(supertype);
            }
        }
        self
    }

    /// Qualified dotted name (e.g., `com.example.MemberRequest`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alias of [`name`](Self::name), kept for symmetry with the metadata fields.
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.name
    }

    /// Qualified name with nested-type separators (`$`) replaced by dots.
    #[must_use]
    pub fn canonical_name(&self) -> String {
        self.name.replace('$', ".")
    }

    /// Everything before the last `.`, or `""` for unqualified names.
    #[must_use]
    pub fn package_name(&self) -> &str {
        self.name.rsplit_once('.').map_or("", |(package, _)| package)
    }

    /// Name without package or enclosing types.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        let tail = self.name.rsplit_once('.').map_or(self.name.as_str(), |(_, t)| t);
        tail.rsplit_once('$').map_or(tail, |(_, t)| t)
    }

    /// Type category.
    #[must_use]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Names this type is assignable to, excluding itself.
    #[must_use]
    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    /// Element type when this is an array.
    #[must_use]
    pub fn element(&self) -> Option<&TypeRef> {
        self.element.as_deref()
    }

    /// Enum constants in declaration order (empty for non-enums).
    #[must_use]
    pub fn constants(&self) -> &[String] {
        &self.constants
    }

    /// Whether this is an enumeration.
    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    /// Whether this is an array of any dimension.
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.kind == TypeKind::Array
    }

    /// Whether this is an immutable record.
    #[must_use]
    pub fn is_record(&self) -> bool {
        self.kind == TypeKind::Record
    }

    /// `true` when a value of this type can be used where `name` is expected.
    #[must_use]
    pub fn is_assignable_to(&self, name: &str) -> bool {
        self.name == name || self.supertypes.iter().any(|s| s == name)
    }
}

/// `bool`.
#[must_use]
pub fn boolean() -> TypeRef {
    TypeRef::primitive(BOOL)
}

/// `char`.
#[must_use]
pub fn character() -> TypeRef {
    TypeRef::primitive(CHAR).with_supertypes([CHAR_SEQUENCE])
}

/// `String`.
#[must_use]
pub fn string() -> TypeRef {
    TypeRef::class(STRING).with_supertypes([CHAR_SEQUENCE])
}

/// A numeric primitive such as `i32` or `f64`.
#[must_use]
pub fn numeric(name: &str) -> TypeRef {
    TypeRef::primitive(name).with_supertypes([NUMBER])
}

/// `i32`.
#[must_use]
pub fn int() -> TypeRef {
    numeric("i32")
}

/// `i64`.
#[must_use]
pub fn long() -> TypeRef {
    numeric("i64")
}

/// `f64`.
#[must_use]
pub fn double() -> TypeRef {
    numeric("f64")
}

/// Arbitrary-precision decimal.
#[must_use]
pub fn decimal() -> TypeRef {
    TypeRef::class("Decimal").with_supertypes([NUMBER])
}

/// Growable sequence.
#[must_use]
pub fn list() -> TypeRef {
    TypeRef::class("Vec").with_supertypes([COLLECTION])
}

/// Unordered unique collection.
#[must_use]
pub fn set() -> TypeRef {
    TypeRef::class("HashSet").with_supertypes([COLLECTION])
}

/// Key/value map.
#[must_use]
pub fn map() -> TypeRef {
    TypeRef::class("HashMap").with_supertypes([MAP])
}

/// [`LOCAL_DATE`].
#[must_use]
pub fn local_date() -> TypeRef {
    TypeRef::class(LOCAL_DATE)
}

/// [`LOCAL_DATE_TIME`].
#[must_use]
pub fn local_date_time() -> TypeRef {
    TypeRef::class(LOCAL_DATE_TIME)
}

/// [`LOCAL_TIME`].
#[must_use]
pub fn local_time() -> TypeRef {
    TypeRef::class(LOCAL_TIME)
}

/// [`UUID`].
#[must_use]
pub fn uuid() -> TypeRef {
    TypeRef::class(UUID)
}

/// Resolve a well-known type by name, e.g. from a YAML catalog.
///
/// Returns `None` for names outside the built-in vocabulary.
#[must_use]
pub fn well_known(name: &str) -> Option<TypeRef> {
    let ty = match name {
        BOOL => boolean(),
        CHAR => character(),
        STRING => string(),
        "Decimal" => decimal(),
        "Vec" | "List" => list().with_supertypes(["List"]),
        "HashSet" | "Set" => set().with_supertypes(["Set"]),
        "HashMap" | "BTreeMap" => map(),
        MAP => TypeRef::interface(MAP),
        COLLECTION => TypeRef::interface(COLLECTION),
        NUMBER => TypeRef::interface(NUMBER),
        CHAR_SEQUENCE => TypeRef::interface(CHAR_SEQUENCE),
        LOCAL_DATE | LOCAL_DATE_TIME | LOCAL_TIME | DATE | CALENDAR | CURRENCY | LOCALE
        | UUID => TypeRef::class(name),
        n if NUMERIC_PRIMITIVES.contains(&n) => numeric(n),
        _ => return None,
    };
    Some(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn name_parts() {
        let ty = TypeRef::class("com.example.Outer$Inner");
        assert_eq!(ty.package_name(), "com.example");
        assert_eq!(ty.simple_name(), "Inner");
        assert_eq!(ty.canonical_name(), "com.example.Outer.Inner");

        let bare = TypeRef::primitive("i32");
        assert_eq!(bare.package_name(), "");
        assert_eq!(bare.simple_name(), "i32");
    }

    #[test]
    fn enumeration_is_assignable_to_enum() {
        let ty = TypeRef::enumeration("com.example.Status", ["ACTIVE", "INACTIVE"]);
        assert!(ty.is_enum());
        assert!(ty.is_assignable_to(ENUM));
        assert!(ty.is_assignable_to("com.example.Status"));
        assert!(!ty.is_assignable_to(STRING));
        assert_eq!(ty.constants(), ["ACTIVE", "INACTIVE"]);
    }

    #[test]
    fn array_names_follow_dimensions() {
        let ty = TypeRef::array(TypeRef::array(int()));
        assert!(ty.is_array());
        assert_eq!(ty.name(), "i32[][]");
        assert_eq!(ty.element().map(TypeRef::name), Some("i32[]"));
    }

    #[test]
    fn supertypes_are_deduplicated() {
        let ty = string().with_supertypes([CHAR_SEQUENCE, "Comparable"]);
        assert_eq!(ty.supertypes(), [CHAR_SEQUENCE, "Comparable"]);
    }

    #[test]
    fn well_known_lookup() {
        assert_eq!(well_known("i64"), Some(long()));
        assert!(well_known("List").is_some_and(|t| t.is_assignable_to(COLLECTION)));
        assert!(well_known("com.example.Unknown").is_none());
    }
}
