use std::fmt;

use crate::lexer::LexErrorKind;

/// Source location of a token or error.
///
/// `line` and `column` are 1-based and meant for diagnostics;
/// `offset` and `len` are the byte span into the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
    pub len: usize,
}

impl Span {
    /// Byte offset one past the end of the span.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Slice the span out of the input it was produced from.
    ///
    /// Returns `None` when the span does not fall on character
    /// boundaries of `input`, which only happens when `input` is
    /// not the string the span was lexed from.
    #[must_use]
    pub fn slice<'a>(&self, input: &'a str) -> Option<&'a str> {
        input.get(self.offset..self.end())
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Run of spaces and tabs.
    Whitespace,
    /// Line ending (`\n`, `\r\n` or `\r`).
    Eol,
    /// Comment (`# ...`), without the line ending.
    Comments,
    /// Magic code comment (`#\#CIF_2.0`) at the start of a line.
    Version,
    /// Item name starting with `_`.
    Tag,
    /// Multi-line text delimited by `;` at line start.
    SemiColonTextField,
    /// `'...'`
    SingleQuotedString,
    /// `"..."`
    DoubleQuotedString,
    /// Any other run of non-blank characters.
    UnquotedString,
    /// `data_<name>`
    DataBlockHeading,
    /// `save_<name>`
    SaveFrameHeading,
    /// Bare `save_`, closing a save frame.
    Save,
    /// `loop_`
    Loop,
    /// `global_`
    Global,
    /// `stop_`
    Stop,
    /// `[`
    ListOpen,
    /// `]`
    ListClose,
    /// `{`
    TableOpen,
    /// `}`
    TableClose,
}

impl TokenKind {
    /// Stable upper-case identifier of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Whitespace => "WHITESPACE",
            Self::Eol => "EOL",
            Self::Comments => "COMMENTS",
            Self::Version => "VERSION",
            Self::Tag => "TAG",
            Self::SemiColonTextField => "SEMI_COLON_TEXT_FIELD",
            Self::SingleQuotedString => "SINGLE_QUOTED_STRING",
            Self::DoubleQuotedString => "DOUBLE_QUOTED_STRING",
            Self::UnquotedString => "UNQUOTED_STRING",
            Self::DataBlockHeading => "DATA_BLOCK_HEADING",
            Self::SaveFrameHeading => "SAVE_FRAME_HEADING",
            Self::Save => "SAVE",
            Self::Loop => "LOOP_",
            Self::Global => "GLOBAL_",
            Self::Stop => "STOP_",
            Self::ListOpen => "LIST_OPEN",
            Self::ListClose => "LIST_CLOSE",
            Self::TableOpen => "TABLE_OPEN",
            Self::TableClose => "TABLE_CLOSE",
        }
    }

    /// Whitespace, line endings and comments.
    ///
    /// The version comment is not trivia: it selects the dialect
    /// of the rest of the file.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Eol | Self::Comments)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token with its kind, text, and source location.
///
/// `text` is the logical content: quoted strings and text fields
/// leave their delimiters out. `span` always covers the full raw
/// token, delimiters included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
    /// Recoverable condition tolerated while producing this token.
    pub warning: Option<LexErrorKind>,
}

impl<'a> Token<'a> {
    /// The raw source text covered by the token.
    ///
    /// `input` must be the string the token was lexed from.
    #[must_use]
    pub fn raw(&self, input: &'a str) -> &'a str {
        self.span.slice(input).unwrap_or(self.text)
    }

    /// Block or frame name of a heading token.
    ///
    /// `data_Example` gives `Example`. Returns `None` for every other
    /// kind.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        match self.kind {
            // `data_` and `save_` are both five bytes
            TokenKind::DataBlockHeading | TokenKind::SaveFrameHeading => self.text.get(5..),
            _ => None,
        }
    }
}
