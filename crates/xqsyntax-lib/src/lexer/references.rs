//! Character and entity references (`&lt;`, `&#10;`, `&#xA;`).
//!
//! Shared by every lexer state that accepts references: string literals,
//! attribute values, element content, braced URIs and xqDoc text.

use xqsyntax_core::{CharClass, CodepointRange, char_class};

const PREDEFINED_ENTITIES: [&str; 5] = ["lt", "gt", "amp", "quot", "apos"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reference {
    Predefined,
    /// Well-formed `&name;` with an unknown name.
    Entity,
    Character,
    /// `&;`
    Empty,
    /// `&` not followed by a complete reference.
    Partial,
}

/// Scans a reference. The cursor must be on `&`.
pub(crate) fn scan_reference(range: &mut CodepointRange<'_>) -> Reference {
    range.advance();
    if range.eat_ascii("#x") {
        return finish_char_ref(range, |c| char::from_u32(c).is_some_and(|c| c.is_ascii_hexdigit()));
    }
    if range.eat_ascii("#") {
        return finish_char_ref(range, |c| char::from_u32(c).is_some_and(|c| c.is_ascii_digit()));
    }
    if range.eat_ascii(";") {
        return Reference::Empty;
    }
    if !char_class(range.codepoint()).is_name_start() {
        return Reference::Partial;
    }

    let name_start = range.end_offset();
    skip_name_chars(range);
    let name = &range.buffer()[name_start..range.end_offset()];
    if !range.eat_ascii(";") {
        return Reference::Partial;
    }

    let predefined = PREDEFINED_ENTITIES
        .iter()
        .any(|entity| name.iter().copied().eq(entity.encode_utf16()));
    if predefined {
        Reference::Predefined
    } else {
        Reference::Entity
    }
}

fn finish_char_ref(range: &mut CodepointRange<'_>, is_digit: impl Fn(u32) -> bool) -> Reference {
    let digits_start = range.end_offset();
    while is_digit(range.codepoint()) {
        range.advance();
    }
    if range.end_offset() == digits_start || !range.eat_ascii(";") {
        return Reference::Partial;
    }
    Reference::Character
}

/// Whether the cursor is on a codepoint that can start an NCName.
pub(crate) fn at_name_start(range: &CodepointRange<'_>) -> bool {
    char_class(range.codepoint()) == CharClass::NameStartChar
}

/// Consumes the rest of an NCName.
pub(crate) fn skip_name_chars(range: &mut CodepointRange<'_>) {
    while char_class(range.codepoint()).is_name_char() {
        range.advance();
    }
}
