//! Property-based tests with proptest.
//!
//! Generate random CIF documents from well-formed pieces and check
//! that the token stream is lossless, that fragments lex the same
//! on their own as when joined, and that values keep their kind.

mod common;

use cif_lexer::{TokenKind, tokenize};
use common::{assert_spans_cover, shape};
use proptest::prelude::*;

// -- Leaf strategies --

/// Tag: `_` then name characters
fn tag() -> impl Strategy<Value = String> {
    "_[a-z][a-z0-9_.-]{0,15}".prop_map(|s| s)
}

/// Unquoted value that cannot be mistaken for a keyword or tag
fn unquoted() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9.+-][a-zA-Z0-9.+()'\"#-]{0,12}".prop_map(|s| s)
}

/// Numeric value with optional uncertainty
fn number() -> impl Strategy<Value = String> {
    "-?[0-9]{1,4}(\\.[0-9]{1,4})?(e-?[0-9]{1,2})?(\\([0-9]{1,2}\\))?".prop_map(|s| s)
}

/// Content of a quoted string; quotes are only ever followed by a
/// letter so they never close the string
fn quoted_body() -> impl Strategy<Value = String> {
    "([a-zA-Z0-9 .,]|'[a-z]|\"[a-z]){0,10}".prop_map(|s| s)
}

/// Lines of a text field; none starts with `;`
fn text_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("([a-zA-Z0-9 '\"#_]([a-zA-Z0-9 ;'\"#_]{0,20}))?", 0..4)
}

#[derive(Debug, Clone)]
enum Value {
    Unquoted(String),
    Number(String),
    Single(String),
    Double(String),
    TextField(Vec<String>),
}

impl Value {
    fn render(&self) -> String {
        match self {
            Self::Unquoted(s) | Self::Number(s) => s.clone(),
            Self::Single(s) => format!("'{s}'"),
            Self::Double(s) => format!("\"{s}\""),
            Self::TextField(lines) => {
                let mut out = String::from("\n;\n");
                for line in lines {
                    out.push_str(line);
                    out.push('\n');
                }
                out.push(';');
                out
            }
        }
    }

    const fn kind(&self) -> TokenKind {
        match self {
            Self::Unquoted(_) | Self::Number(_) => TokenKind::UnquotedString,
            Self::Single(_) => TokenKind::SingleQuotedString,
            Self::Double(_) => TokenKind::DoubleQuotedString,
            Self::TextField(_) => TokenKind::SemiColonTextField,
        }
    }
}

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        unquoted().prop_map(Value::Unquoted),
        number().prop_map(Value::Number),
        quoted_body().prop_map(Value::Single),
        quoted_body().prop_map(Value::Double),
        text_lines().prop_map(Value::TextField),
    ]
}

fn separator() -> impl Strategy<Value = String> {
    "[ \t]{1,3}".prop_map(|s| s)
}

fn comment() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        3 => Just(None),
        1 => "[ \t]+#[a-zA-Z0-9 '\";#_]{0,20}".prop_map(Some),
    ]
}

fn eol() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("\n"), Just("\r\n")]
}

/// One `tag value` item, ending with a line break
fn item() -> impl Strategy<Value = (String, Value, String)> {
    (tag(), separator(), value(), comment(), eol()).prop_map(|(tag, sep, value, comment, eol)| {
        let mut line = format!("{tag}{sep}{}", value.render());
        if let Some(comment) = comment {
            line.push_str(&comment);
        }
        line.push_str(eol);
        (tag, value, line)
    })
}

fn block() -> impl Strategy<Value = (String, Vec<(String, Value, String)>)> {
    (
        "[a-zA-Z][a-zA-Z0-9_]{0,10}",
        prop::collection::vec(item(), 0..8),
    )
}

fn render_block(name: &str, items: &[(String, Value, String)]) -> String {
    let mut out = format!("data_{name}\n");
    for (_, _, line) in items {
        out.push_str(line);
    }
    out
}

proptest! {
    #[test]
    fn spans_rebuild_input((name, items) in block()) {
        let input = render_block(&name, &items);
        let tokens = tokenize(&input).expect("tokenize");
        assert_spans_cover(&input, &tokens);
    }

    #[test]
    fn items_keep_their_kinds((name, items) in block()) {
        let input = render_block(&name, &items);
        let tokens = tokenize(&input).expect("tokenize");
        let significant: Vec<_> = tokens.iter().filter(|t| !t.kind.is_trivia()).collect();

        prop_assert_eq!(significant.len(), 1 + 2 * items.len());
        prop_assert_eq!(significant[0].kind, TokenKind::DataBlockHeading);
        prop_assert_eq!(significant[0].name(), Some(name.as_str()));
        for (i, (tag, value, _)) in items.iter().enumerate() {
            let tag_token = significant[1 + 2 * i];
            let value_token = significant[2 + 2 * i];
            prop_assert_eq!(tag_token.kind, TokenKind::Tag);
            prop_assert_eq!(tag_token.text, tag.as_str());
            prop_assert_eq!(value_token.kind, value.kind());
            match value {
                Value::Single(body) | Value::Double(body) => {
                    prop_assert_eq!(value_token.text, body.as_str());
                }
                Value::Number(n) => {
                    prop_assert!(cif_lexer::is_numeric(value_token.text), "{}", n);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn fragments_concatenate((a_name, a_items) in block(), (b_name, b_items) in block()) {
        let first = render_block(&a_name, &a_items);
        let second = render_block(&b_name, &b_items);
        let mut expected = shape(&first);
        expected.extend(shape(&second));
        prop_assert_eq!(shape(&format!("{first}{second}")), expected);
    }

    #[test]
    fn never_panics(input in "\\PC{0,64}") {
        let _ = tokenize(&input);
    }

    #[test]
    fn lossless_when_ok(input in "[ -~\t\n]{0,80}") {
        if let Ok(tokens) = tokenize(&input) {
            assert_spans_cover(&input, &tokens);
        }
    }
}
