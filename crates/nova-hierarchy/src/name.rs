//! Full-name conventions.
//!
//! A full name is the registry key of a class:
//!
//! - reference types use their dotted binary name (`java.util.Map$Entry`),
//! - primitives use the Java keyword (`int`, `void`),
//! - arrays prepend one `[` per dimension to the element descriptor, where primitive elements
//!   use their descriptor code (`[I`) and reference elements are wrapped as `L<name>;`
//!   (`[Ljava.lang.String;`).

use nova_classfile::BaseType;

pub(crate) const ARRAY_MARKER: char = '[';
pub(crate) const NESTED_SEPARATOR: char = '$';
pub(crate) const QUALIFIER_SEPARATOR: char = '.';

/// The distinguished primitive classes. Every scope registers them first, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Void,
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl Primitive {
    pub const ALL: [Primitive; 9] = [
        Primitive::Void,
        Primitive::Boolean,
        Primitive::Byte,
        Primitive::Char,
        Primitive::Short,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
    ];

    pub fn java_name(self) -> &'static str {
        match self {
            Primitive::Void => "void",
            Primitive::Boolean => BaseType::Boolean.java_name(),
            Primitive::Byte => BaseType::Byte.java_name(),
            Primitive::Char => BaseType::Char.java_name(),
            Primitive::Short => BaseType::Short.java_name(),
            Primitive::Int => BaseType::Int.java_name(),
            Primitive::Long => BaseType::Long.java_name(),
            Primitive::Float => BaseType::Float.java_name(),
            Primitive::Double => BaseType::Double.java_name(),
        }
    }

    /// Decode an array element code (`C I B Z F D S J V`).
    pub fn from_descriptor_char(c: char) -> Option<Self> {
        if c == 'V' {
            return Some(Primitive::Void);
        }
        BaseType::from_descriptor_char(c).map(Primitive::from)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl From<BaseType> for Primitive {
    fn from(base: BaseType) -> Self {
        match base {
            BaseType::Boolean => Primitive::Boolean,
            BaseType::Byte => Primitive::Byte,
            BaseType::Char => Primitive::Char,
            BaseType::Short => Primitive::Short,
            BaseType::Int => Primitive::Int,
            BaseType::Long => Primitive::Long,
            BaseType::Float => Primitive::Float,
            BaseType::Double => Primitive::Double,
        }
    }
}

/// One decoded array level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArrayElement<'a> {
    Primitive(Primitive),
    /// Full name of a reference or nested-array element.
    Named(&'a str),
}

pub(crate) fn is_array_name(full_name: &str) -> bool {
    full_name.starts_with(ARRAY_MARKER)
}

/// Strip one array dimension off `full_name`.
///
/// Returns `None` for non-array names and for malformed element descriptors; callers decide how
/// to report the latter.
pub(crate) fn array_element(full_name: &str) -> Option<ArrayElement<'_>> {
    let rest = full_name.strip_prefix(ARRAY_MARKER)?;
    let first = rest.chars().next()?;
    if let Some(primitive) = Primitive::from_descriptor_char(first) {
        // `[I` only; trailing junk is not a valid element.
        return (rest.len() == 1).then_some(ArrayElement::Primitive(primitive));
    }
    match first {
        'L' => {
            let inner = rest.strip_prefix('L')?.strip_suffix(';')?;
            (!inner.is_empty()).then_some(ArrayElement::Named(inner))
        }
        ARRAY_MARKER => Some(ArrayElement::Named(rest)),
        _ => None,
    }
}

pub(crate) fn short_name(full_name: &str) -> &str {
    match full_name.rfind(QUALIFIER_SEPARATOR) {
        Some(idx) => &full_name[idx + 1..],
        None => full_name,
    }
}

pub(crate) fn outer_name(full_name: &str) -> Option<&str> {
    full_name
        .rfind(NESTED_SEPARATOR)
        .map(|idx| &full_name[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_every_primitive_code() {
        let table = [
            ("[C", Primitive::Char),
            ("[I", Primitive::Int),
            ("[B", Primitive::Byte),
            ("[Z", Primitive::Boolean),
            ("[F", Primitive::Float),
            ("[D", Primitive::Double),
            ("[S", Primitive::Short),
            ("[J", Primitive::Long),
            ("[V", Primitive::Void),
        ];
        for (name, expected) in table {
            assert_eq!(array_element(name), Some(ArrayElement::Primitive(expected)), "{name}");
        }
    }

    #[test]
    fn decodes_reference_and_nested_elements() {
        assert_eq!(
            array_element("[Lfoo.Bar;"),
            Some(ArrayElement::Named("foo.Bar"))
        );
        assert_eq!(
            array_element("[[Lfoo.Bar;"),
            Some(ArrayElement::Named("[Lfoo.Bar;"))
        );
        assert_eq!(array_element("[[I"), Some(ArrayElement::Named("[I")));
    }

    #[test]
    fn rejects_malformed_elements() {
        assert_eq!(array_element("foo.Bar"), None);
        assert_eq!(array_element("["), None);
        assert_eq!(array_element("[X"), None);
        assert_eq!(array_element("[Lfoo.Bar"), None);
        assert_eq!(array_element("[L;"), None);
        assert_eq!(array_element("[II"), None);
    }

    #[test]
    fn splits_names() {
        assert_eq!(short_name("a.b.Outer$Inner"), "Outer$Inner");
        assert_eq!(short_name("Top"), "Top");
        assert_eq!(outer_name("a.b.Outer$Inner"), Some("a.b.Outer"));
        assert_eq!(outer_name("a.b.Outer$Mid$Inner"), Some("a.b.Outer$Mid"));
        assert_eq!(outer_name("a.b.Outer"), None);
    }

    #[test]
    fn primitive_order_matches_index() {
        for (idx, primitive) in Primitive::ALL.iter().enumerate() {
            assert_eq!(primitive.index(), idx);
        }
    }
}
