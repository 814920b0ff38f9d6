/// Character repertoire accepted in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Printable ASCII only; anything above U+007F is an
    /// invalid character.
    Ascii,
    /// Non-control characters above U+007F are accepted wherever
    /// an ordinary character is.
    #[default]
    Utf8,
}

/// Lexer options.
///
/// ```
/// use cif_lexer::{Encoding, LexerConfig};
///
/// let config = LexerConfig::default()
///     .with_encoding(Encoding::Ascii)
///     .with_tab_width(8);
/// assert_eq!(config.tab_width, 8);
/// assert!(config.tolerate_unterminated_text_field);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerConfig {
    /// Width of a tab stop for column numbers. Has no effect on
    /// how tokens are split.
    pub tab_width: usize,
    /// Close a text field at end of input instead of failing.
    pub tolerate_unterminated_text_field: bool,
    pub encoding: Encoding,
    /// Lex `[`, `]`, `{` and `}` as list/table punctuation.
    pub brackets: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            tab_width: 1,
            tolerate_unterminated_text_field: true,
            encoding: Encoding::Utf8,
            brackets: true,
        }
    }
}

impl LexerConfig {
    /// Set the tab width. Zero is treated as one.
    #[must_use]
    pub const fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = if width == 0 { 1 } else { width };
        self
    }

    #[must_use]
    pub const fn with_tolerate_unterminated_text_field(mut self, tolerate: bool) -> Self {
        self.tolerate_unterminated_text_field = tolerate;
        self
    }

    #[must_use]
    pub const fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    #[must_use]
    pub const fn with_brackets(mut self, brackets: bool) -> Self {
        self.brackets = brackets;
        self
    }

    /// Strict CIF 1.1: ASCII only, fatal unterminated text fields,
    /// brackets are ordinary characters.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            tab_width: 1,
            tolerate_unterminated_text_field: false,
            encoding: Encoding::Ascii,
            brackets: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LexerConfig::default();
        assert_eq!(config.tab_width, 1);
        assert!(config.tolerate_unterminated_text_field);
        assert_eq!(config.encoding, Encoding::Utf8);
        assert!(config.brackets);
    }

    #[test]
    fn zero_tab_width_is_one() {
        assert_eq!(LexerConfig::default().with_tab_width(0).tab_width, 1);
    }

    #[test]
    fn strict_preset() {
        let config = LexerConfig::strict();
        assert!(!config.tolerate_unterminated_text_field);
        assert_eq!(config.encoding, Encoding::Ascii);
        assert!(!config.brackets);
    }
}
