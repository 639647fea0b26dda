//! Lexical classes for codepoints.
//!
//! ASCII goes through a static table; everything above is range checks over
//! the XML 1.0 (5th edition) `NameStartChar` / `NameChar` productions, with
//! `:` excluded since the lexers treat QName separators as punctuation.

use crate::codepoints::END_OF_BUFFER;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Invalid,
    EndOfBuffer,
    Whitespace,
    Digit,
    NameStartChar,
    /// Allowed inside a name but not at its start.
    NameChar,
    /// Any other valid XML character.
    Char,
    Dot,
    Quote,
    Apostrophe,
    Semicolon,
    Hash,
    Colon,
    ParenthesisOpen,
    ParenthesisClose,
    LessThan,
    GreaterThan,
    Equal,
    CurlyBraceOpen,
    CurlyBraceClose,
    QuestionMark,
    ForwardSlash,
    ExclamationMark,
    SquareBraceOpen,
    SquareBraceClose,
    Minus,
    Ampersand,
    Asterisk,
    Comma,
    Dollar,
    Plus,
    VerticalBar,
    AtSign,
    Percent,
}

impl CharClass {
    /// Whether a codepoint of this class may start an NCName.
    pub fn is_name_start(self) -> bool {
        self == Self::NameStartChar
    }

    /// Whether a codepoint of this class may continue an NCName.
    pub fn is_name_char(self) -> bool {
        matches!(
            self,
            Self::NameStartChar | Self::NameChar | Self::Digit | Self::Dot | Self::Minus
        )
    }
}

static ASCII: [CharClass; 128] = ascii_table();

const fn ascii_table() -> [CharClass; 128] {
    let mut table = [CharClass::Invalid; 128];
    let mut i = 0;
    while i < 128 {
        table[i] = match i as u8 {
            b'\t' | b'\n' | b'\r' | b' ' => CharClass::Whitespace,
            0x00..=0x1F => CharClass::Invalid,
            b'0'..=b'9' => CharClass::Digit,
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => CharClass::NameStartChar,
            b'.' => CharClass::Dot,
            b'"' => CharClass::Quote,
            b'\'' => CharClass::Apostrophe,
            b';' => CharClass::Semicolon,
            b'#' => CharClass::Hash,
            b':' => CharClass::Colon,
            b'(' => CharClass::ParenthesisOpen,
            b')' => CharClass::ParenthesisClose,
            b'<' => CharClass::LessThan,
            b'>' => CharClass::GreaterThan,
            b'=' => CharClass::Equal,
            b'{' => CharClass::CurlyBraceOpen,
            b'}' => CharClass::CurlyBraceClose,
            b'?' => CharClass::QuestionMark,
            b'/' => CharClass::ForwardSlash,
            b'!' => CharClass::ExclamationMark,
            b'[' => CharClass::SquareBraceOpen,
            b']' => CharClass::SquareBraceClose,
            b'-' => CharClass::Minus,
            b'&' => CharClass::Ampersand,
            b'*' => CharClass::Asterisk,
            b',' => CharClass::Comma,
            b'$' => CharClass::Dollar,
            b'+' => CharClass::Plus,
            b'|' => CharClass::VerticalBar,
            b'@' => CharClass::AtSign,
            b'%' => CharClass::Percent,
            _ => CharClass::Char,
        };
        i += 1;
    }
    table
}

/// Classify a codepoint as returned by [`crate::CodepointRange::codepoint`].
pub fn char_class(c: u32) -> CharClass {
    if c < 0x80 {
        return ASCII[c as usize];
    }
    match c {
        END_OF_BUFFER => CharClass::EndOfBuffer,
        0xB7 => CharClass::NameChar,
        0xD7 | 0xF7 => CharClass::Char,
        0xC0..=0x2FF => CharClass::NameStartChar,
        0x300..=0x36F => CharClass::NameChar,
        0x370..=0x37D => CharClass::NameStartChar,
        0x37F..=0x1FFF => CharClass::NameStartChar,
        0x200C..=0x200D => CharClass::NameStartChar,
        0x203F..=0x2040 => CharClass::NameChar,
        0x2070..=0x218F => CharClass::NameStartChar,
        0x2C00..=0x2FEF => CharClass::NameStartChar,
        0x3001..=0xD7FF => CharClass::NameStartChar,
        0xD800..=0xDFFF => CharClass::Invalid,
        0xF900..=0xFDCF => CharClass::NameStartChar,
        0xFDF0..=0xFFFD => CharClass::NameStartChar,
        0xFFFE..=0xFFFF => CharClass::Invalid,
        0x10000..=0xEFFFF => CharClass::NameStartChar,
        0x80..=0x10FFFF => CharClass::Char,
        _ => CharClass::Invalid,
    }
}
