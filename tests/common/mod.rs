#![allow(dead_code)]

use cif_lexer::{Token, TokenKind, tokenize};

/// Rebuild the source from raw token spans and check it matches,
/// along with the span ordering invariants.
pub fn assert_lossless(input: &str) {
    let tokens = tokenize(input).expect("tokenize failed");
    assert_spans_cover(input, &tokens);
}

pub fn assert_spans_cover(input: &str, tokens: &[Token<'_>]) {
    let mut expected_offset = 0;
    let mut output = String::with_capacity(input.len());
    for token in tokens {
        assert_eq!(
            token.span.offset, expected_offset,
            "gap or overlap before {token:?}"
        );
        assert!(token.span.len > 0, "empty token {token:?}");
        output.push_str(token.raw(input));
        expected_offset = token.span.end();
    }
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}

/// Kinds and texts of the tokens, positions left out.
pub fn shape(input: &str) -> Vec<(TokenKind, String)> {
    tokenize(input)
        .expect("tokenize failed")
        .into_iter()
        .map(|t| (t.kind, t.text.to_string()))
        .collect()
}

pub fn significant_kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input)
        .expect("tokenize failed")
        .into_iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| t.kind)
        .collect()
}

pub const QUARTZ: &str = "\
#\\#CIF_1.1
# Quartz, low temperature form
data_quartz
_chemical_name_mineral            'Quartz'
_symmetry_space_group_name_H-M    'P 32 2 1'
_cell_length_a                    4.913(2)
_cell_length_c                    5.405(3)
_cell_angle_gamma                 120
_publ_section_title
;
 Refinement of the crystal structure of low quartz
 at 13 K; it's a test
;
loop_
_atom_site_label
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Si1   0.4697  0.0000  0.0000
O1    0.4135  0.2669  0.1191
save_frame_one
_item.name  \"_cell.length_a\"
save_
";
