//! Identifier rendering
//!
//!     x          x
//!     x_1        x_1          one-character suffix: a real subscript
//!     max_value  \mathit{max\_value}
//!     a_b_c      \mathit{a\_b\_c}
//!     x'  x?     decorations are kept after the rendered base
//!     N  N1  Z   built-in types, spelled by the dialect

use super::dialect::Dialect;

/// Longest suffix that still renders as a subscript.
pub const SUBSCRIPT_LIMIT: usize = 1;

pub fn render_identifier(name: &str, dialect: Dialect) -> String {
    if let Some(markup) = dialect.type_name(name) {
        return markup.to_string();
    }

    let base_len = name.trim_end_matches(|c: char| c == '\'' || c == '?').len();
    let (base, decoration) = name.split_at(base_len);

    let segments: Vec<&str> = base.split('_').collect();
    let rendered = match segments.as_slice() {
        [single] => single.to_string(),
        [stem, suffix]
            if !stem.is_empty()
                && !suffix.is_empty()
                && suffix.chars().count() <= SUBSCRIPT_LIMIT =>
        {
            format!("{}_{}", stem, suffix)
        }
        _ => format!("\\mathit{{{}}}", base.replace('_', "\\_")),
    };

    format!("{}{}", rendered, decoration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("x", "x")]
    #[case("count", "count")]
    #[case("x_1", "x_1")]
    #[case("max_value", "\\mathit{max\\_value}")]
    #[case("a_b_c", "\\mathit{a\\_b\\_c}")]
    #[case("x_12", "\\mathit{x\\_12}")]
    #[case("x'", "x'")]
    #[case("in_1?", "in_1?")]
    #[case("max_value'", "\\mathit{max\\_value}'")]
    fn test_identifier_shapes(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(render_identifier(name, Dialect::Standard), expected);
    }

    #[test]
    fn test_builtin_types() {
        assert_eq!(render_identifier("N", Dialect::Standard), "\\mathbb{N}");
        assert_eq!(render_identifier("Z", Dialect::Fuzz), "\\num");
        assert_eq!(render_identifier("N2", Dialect::Fuzz), "N2");
    }
}
