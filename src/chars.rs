//! CIF character classes.
//!
//! The lexer works on `char`s; everything above U+007F is only
//! printable when the input encoding allows it.

use crate::config::Encoding;

/// Space or tab.
#[must_use]
pub const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

/// First character of a line ending.
#[must_use]
pub const fn is_eol(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

/// Printable character, blanks included (`ANY_PRINT_CHAR`).
#[must_use]
pub fn is_any_print(c: char, encoding: Encoding) -> bool {
    match c {
        ' ' | '\t' | '!'..='~' => true,
        _ if c.is_ascii() => false,
        _ => encoding == Encoding::Utf8 && !c.is_control(),
    }
}

/// Printable and not blank (`NON_BLANK_CHAR`).
#[must_use]
pub fn is_non_blank(c: char, encoding: Encoding) -> bool {
    !is_blank(c) && is_any_print(c, encoding)
}

/// Character that may start an unquoted string (`ORDINARY_CHAR`).
#[must_use]
pub fn is_ordinary(c: char, encoding: Encoding) -> bool {
    is_non_blank(c, encoding) && !matches!(c, '"' | '#' | '$' | '\'' | '_' | ';' | '[' | ']')
}

/// First character of a line inside a text field that does not
/// close it (`TEXT_LEAD_CHAR`).
#[must_use]
pub fn is_text_lead(c: char, encoding: Encoding) -> bool {
    is_non_blank(c, encoding) && c != ';'
}

/// List and table punctuation.
#[must_use]
pub const fn is_bracket(c: char) -> bool {
    matches!(c, '[' | ']' | '{' | '}')
}

/// Whether `text` has the shape of a CIF number.
///
/// Accepts an optional sign, digits with an optional decimal point,
/// an optional exponent and an optional standard uncertainty in
/// parentheses: `-1.5e-3`, `.5`, `4.913(2)`. The value itself is not
/// interpreted.
#[must_use]
pub fn is_numeric(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        frac_digits = count_digits(&bytes[pos..]);
        pos += frac_digits;
    }

    if int_digits + frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exp_digits = count_digits(&bytes[pos..]);
        if exp_digits == 0 {
            return false;
        }
        pos += exp_digits;
    }

    if bytes.get(pos) == Some(&b'(') {
        pos += 1;
        let su_digits = count_digits(&bytes[pos..]);
        if su_digits == 0 || bytes.get(pos + su_digits) != Some(&b')') {
            return false;
        }
        pos += su_digits + 1;
    }

    pos == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
