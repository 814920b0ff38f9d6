use std::fmt;

use tracing::{debug, trace, warn};

use crate::chars;
use crate::config::{Encoding, LexerConfig};
use crate::token::{Span, Token, TokenKind};

const BOM: char = '\u{FEFF}';
const MAGIC_PREFIX: &str = "#\\#CIF_";

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Quoted string without a closing quote before the end of
    /// the line.
    UnterminatedQuotedString,
    /// Text field without a closing `;` line before end of input.
    UnterminatedTextField,
    /// Character outside the accepted encoding or a control
    /// character.
    InvalidCharacter(char),
    /// Reserved word missing its required name (`data_`).
    MalformedKeyword(String),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedQuotedString => {
                write!(f, "unterminated quoted string")
            }
            Self::UnterminatedTextField => {
                write!(f, "unterminated text field")
            }
            Self::InvalidCharacter(ch) => {
                write!(f, "invalid character: {}", ch.escape_default())
            }
            Self::MalformedKeyword(word) => {
                write!(f, "malformed keyword: {word}")
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// Tokenize a CIF source string into a sequence of tokens.
///
/// # Errors
///
/// Returns `LexError` on unterminated quoted strings, invalid
/// characters, or malformed keywords.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    tokenize_with(input, &LexerConfig::default())
}

/// Tokenize with explicit options.
///
/// # Errors
///
/// See [`tokenize`]. Unterminated text fields are also an error when
/// the configuration does not tolerate them.
pub fn tokenize_with<'a>(input: &'a str, config: &LexerConfig) -> Result<Vec<Token<'a>>, LexError> {
    Lexer::with_config(input, *config).collect()
}

#[derive(Debug, Clone, Copy)]
struct Mark {
    pos: usize,
    line: usize,
    col: usize,
}

/// Pull-based CIF tokenizer.
///
/// Every input byte ends up in exactly one token, so whitespace,
/// line endings and comments are returned as well. The lexer stops
/// for good after the first error.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    config: LexerConfig,
    pos: usize,
    line: usize,
    col: usize,
    /// Last consumed character; `None` at start of input.
    prev: Option<char>,
    failed: bool,
}

impl<'a> Lexer<'a> {
    /// Lexer over `input` with the default options.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, LexerConfig::default())
    }

    /// Lexer over `input` with explicit options.
    #[must_use]
    pub const fn with_config(input: &'a str, config: LexerConfig) -> Self {
        Self {
            input,
            config,
            pos: 0,
            line: 1,
            col: 1,
            prev: None,
            failed: false,
        }
    }

    /// Restart from the beginning of the input.
    pub const fn reset(&mut self) {
        self.pos = 0;
        self.line = 1;
        self.col = 1;
        self.prev = None;
        self.failed = false;
    }

    /// Skip whitespace, line endings and comments.
    pub fn significant(self) -> impl Iterator<Item = Result<Token<'a>, LexError>> {
        self.filter(|result| !matches!(result, Ok(token) if token.kind.is_trivia()))
    }

    /// Produce the next token, or `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns the first lexical error; every later call returns
    /// `Ok(None)` until [`Lexer::reset`].
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>, LexError> {
        if self.failed {
            return Ok(None);
        }
        let Some(ch) = self.peek() else {
            return Ok(None);
        };

        match self.dispatch(ch) {
            Ok(token) => {
                trace!(
                    target: "cif_lexer::lexer",
                    kind = %token.kind,
                    line = token.span.line,
                    column = token.span.column,
                    len = token.span.len,
                    "token"
                );
                Ok(Some(token))
            }
            Err(err) => {
                debug!(target: "cif_lexer::lexer", error = %err, "lexing stopped");
                self.failed = true;
                Err(err)
            }
        }
    }

    /// Rule dispatch; the order of the arms is the disambiguation
    /// policy.
    fn dispatch(&mut self, ch: char) -> Result<Token<'a>, LexError> {
        let start = self.mark();
        let encoding = self.config.encoding;

        match ch {
            BOM if self.pos == 0 && encoding == Encoding::Utf8 => {
                self.bump();
                // the mark is invisible to line-start rules
                self.prev = None;
                Ok(self.token(TokenKind::Whitespace, start))
            }
            ';' if self.at_line_start() => self.read_text_field(start),
            '\n' | '\r' => Ok(self.read_eol(start)),
            ' ' | '\t' => {
                self.eat_while(chars::is_blank);
                Ok(self.token(TokenKind::Whitespace, start))
            }
            '#' => self.read_comment(start),
            '\'' | '"' if self.quote_may_open() => self.read_quoted(ch, start),
            _ if self.config.brackets && chars::is_bracket(ch) && self.bracket_stands_alone(ch) => {
                self.bump();
                let kind = match ch {
                    '[' => TokenKind::ListOpen,
                    ']' => TokenKind::ListClose,
                    '{' => TokenKind::TableOpen,
                    _ => TokenKind::TableClose,
                };
                Ok(self.token(kind, start))
            }
            _ if chars::is_non_blank(ch, encoding) => self.read_run(start),
            _ => Err(self.error(LexErrorKind::InvalidCharacter(ch), start)),
        }
    }

    fn read_eol(&mut self, start: Mark) -> Token<'a> {
        self.eat_eol();
        self.token(TokenKind::Eol, start)
    }

    fn read_comment(&mut self, start: Mark) -> Result<Token<'a>, LexError> {
        let at_line_start = self.at_line_start();
        self.read_line_rest()?;

        let text = &self.input[start.pos..self.pos];
        let kind = if at_line_start && is_magic_code(text) {
            TokenKind::Version
        } else {
            TokenKind::Comments
        };
        Ok(self.token(kind, start))
    }

    fn read_quoted(&mut self, quote: char, start: Mark) -> Result<Token<'a>, LexError> {
        self.bump();
        let content_start = self.pos;

        loop {
            match self.peek() {
                None | Some('\n' | '\r') => {
                    return Err(self.error(LexErrorKind::UnterminatedQuotedString, start));
                }
                Some(c) if c == quote && self.quote_may_close() => {
                    let content_end = self.pos;
                    self.bump();
                    let kind = if quote == '\'' {
                        TokenKind::SingleQuotedString
                    } else {
                        TokenKind::DoubleQuotedString
                    };
                    return Ok(self.token_with_text(kind, start, content_start, content_end));
                }
                Some(c) if chars::is_any_print(c, self.config.encoding) => {
                    self.bump();
                }
                Some(c) => {
                    let at = self.mark();
                    return Err(self.error(LexErrorKind::InvalidCharacter(c), at));
                }
            }
        }
    }

    fn read_text_field(&mut self, start: Mark) -> Result<Token<'a>, LexError> {
        let encoding = self.config.encoding;
        self.bump();
        // a line break right after the opening `;` is not content
        if matches!(self.peek(), Some('\n' | '\r')) {
            self.eat_eol();
        }
        let content_start = self.pos;

        loop {
            match self.peek() {
                None => break,
                Some(c)
                    if self.at_line_start()
                        && chars::is_non_blank(c, encoding)
                        && !chars::is_text_lead(c, encoding) =>
                {
                    let content_end = self.pos;
                    self.bump();
                    return Ok(self.token_with_text(
                        TokenKind::SemiColonTextField,
                        start,
                        content_start,
                        content_end,
                    ));
                }
                Some('\n' | '\r') => self.eat_eol(),
                Some(c) if chars::is_any_print(c, encoding) => {
                    self.bump();
                }
                Some(c) => {
                    let at = self.mark();
                    return Err(self.error(LexErrorKind::InvalidCharacter(c), at));
                }
            }
        }

        if !self.config.tolerate_unterminated_text_field {
            return Err(self.error(LexErrorKind::UnterminatedTextField, start));
        }
        warn!(
            target: "cif_lexer::lexer",
            line = start.line,
            column = start.col,
            "text field not closed before end of input"
        );
        let mut token =
            self.token_with_text(TokenKind::SemiColonTextField, start, content_start, self.pos);
        token.warning = Some(LexErrorKind::UnterminatedTextField);
        Ok(token)
    }

    /// Maximal run of non-blank characters: tag, keyword, heading,
    /// or unquoted string.
    fn read_run(&mut self, start: Mark) -> Result<Token<'a>, LexError> {
        let encoding = self.config.encoding;
        self.eat_while(|c| chars::is_non_blank(c, encoding));

        let text = &self.input[start.pos..self.pos];
        match classify_run(text) {
            Ok(kind) => Ok(self.token(kind, start)),
            Err(kind) => Err(self.error(kind, start)),
        }
    }

    /// Consume up to, not including, the line ending.
    fn read_line_rest(&mut self) -> Result<(), LexError> {
        while let Some(c) = self.peek() {
            if chars::is_eol(c) {
                break;
            }
            if !chars::is_any_print(c, self.config.encoding) {
                let at = self.mark();
                return Err(self.error(LexErrorKind::InvalidCharacter(c), at));
            }
            self.bump();
        }
        Ok(())
    }

    fn at_line_start(&self) -> bool {
        self.prev.is_none_or(chars::is_eol)
    }

    /// `[` and `]` cannot start an unquoted string, so they are always
    /// punctuation. `{` and `}` are ordinary characters and only stand
    /// alone when nothing non-blank follows them.
    fn bracket_stands_alone(&self, ch: char) -> bool {
        let encoding = self.config.encoding;
        if !chars::is_ordinary(ch, encoding) {
            return true;
        }
        let mut rest = self.input[self.pos..].chars();
        rest.next();
        !rest.next().is_some_and(|c| chars::is_non_blank(c, encoding))
    }

    fn quote_may_open(&self) -> bool {
        match self.prev {
            None => true,
            Some(c) if chars::is_blank(c) || chars::is_eol(c) => true,
            Some('[') => self.config.brackets,
            Some(_) => false,
        }
    }

    /// Called with the candidate closing quote under the cursor.
    fn quote_may_close(&self) -> bool {
        let mut rest = self.input[self.pos..].chars();
        rest.next();
        match rest.next() {
            None => true,
            Some(c) if chars::is_blank(c) || chars::is_eol(c) => true,
            Some(']' | '}') => self.config.brackets,
            Some(_) => false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        match ch {
            '\n' => {
                self.line += 1;
                self.col = 1;
            }
            // `\r\n` counts as one line break, taken at the `\n`
            '\r' if self.peek() == Some('\n') => {}
            '\r' => {
                self.line += 1;
                self.col = 1;
            }
            '\t' => {
                let width = self.config.tab_width.max(1);
                self.col = ((self.col - 1) / width + 1) * width + 1;
            }
            _ => self.col += 1,
        }
        self.prev = Some(ch);
        Some(ch)
    }

    fn eat_eol(&mut self) {
        if self.bump() == Some('\r') && self.peek() == Some('\n') {
            self.bump();
        }
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
    }

    const fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            line: self.line,
            col: self.col,
        }
    }

    const fn span_from(&self, start: Mark) -> Span {
        Span {
            line: start.line,
            column: start.col,
            offset: start.pos,
            len: self.pos - start.pos,
        }
    }

    fn token(&self, kind: TokenKind, start: Mark) -> Token<'a> {
        self.token_with_text(kind, start, start.pos, self.pos)
    }

    fn token_with_text(&self, kind: TokenKind, start: Mark, from: usize, to: usize) -> Token<'a> {
        let input = self.input;
        Token {
            kind,
            text: &input[from..to],
            span: self.span_from(start),
            warning: None,
        }
    }

    const fn error(&self, kind: LexErrorKind, at: Mark) -> LexError {
        LexError {
            kind,
            span: Span {
                line: at.line,
                column: at.col,
                offset: at.pos,
                len: 0,
            },
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Keyword test over a complete non-blank run.
fn classify_run(text: &str) -> Result<TokenKind, LexErrorKind> {
    if text.starts_with('_') {
        return Ok(TokenKind::Tag);
    }

    let kind = if text.eq_ignore_ascii_case("loop_") {
        TokenKind::Loop
    } else if text.eq_ignore_ascii_case("global_") {
        TokenKind::Global
    } else if text.eq_ignore_ascii_case("stop_") {
        TokenKind::Stop
    } else if text.eq_ignore_ascii_case("save_") {
        TokenKind::Save
    } else if text.eq_ignore_ascii_case("data_") {
        return Err(LexErrorKind::MalformedKeyword(text.to_string()));
    } else if has_prefix(text, "data_") {
        TokenKind::DataBlockHeading
    } else if has_prefix(text, "save_") {
        TokenKind::SaveFrameHeading
    } else {
        TokenKind::UnquotedString
    };
    Ok(kind)
}

fn has_prefix(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// `#\#CIF_<major>.<minor>`, optionally followed by blanks and
/// anything else.
fn is_magic_code(comment: &str) -> bool {
    let Some(rest) = comment.strip_prefix(MAGIC_PREFIX) else {
        return false;
    };
    let version = rest.split([' ', '\t']).next().unwrap_or_default();
    let Some((major, minor)) = version.split_once('.') else {
        return false;
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(major) && all_digits(minor)
}
