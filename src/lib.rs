//! Lossless lexer for CIF (Crystallographic Information Framework)
//! files.
//!
//! Every byte of the input lands in exactly one token, whitespace,
//! line endings and comments included, so a parser can apply the
//! line-sensitive parts of the grammar and tools can rebuild the
//! source from the token stream.
//!
//! # Quick start
//!
//! ```
//! use cif_lexer::{TokenKind, tokenize};
//!
//! let tokens = tokenize("data_quartz\n_cell_length_a 4.913\n").unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::DataBlockHeading);
//! assert_eq!(tokens[0].name(), Some("quartz"));
//! assert_eq!(tokens[2].kind, TokenKind::Tag);
//! assert_eq!(tokens[4].text, "4.913");
//! ```
//!
//! ## Pulling significant tokens only
//!
//! ```
//! use cif_lexer::{Lexer, TokenKind};
//!
//! let input = "loop_ # atoms\n_atom_site_label\nSi1\n";
//! let kinds: Vec<_> = Lexer::new(input)
//!     .significant()
//!     .map(|t| t.unwrap().kind)
//!     .collect();
//! assert_eq!(
//!     kinds,
//!     [TokenKind::Loop, TokenKind::Tag, TokenKind::UnquotedString]
//! );
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod chars;
pub mod config;
pub mod lexer;
pub mod token;

pub use chars::is_numeric;
pub use config::{Encoding, LexerConfig};
pub use lexer::{LexError, LexErrorKind, Lexer, tokenize, tokenize_with};
pub use token::{Span, Token, TokenKind};
