//! Inline math in prose
//!
//!     Paragraph text is written in plain English with notation mixed in. Math is recognized in
//!     two ways and set in `$...$`:
//!
//!     1. Braced groups. The outermost balanced `{...}` group is parsed as an expression (first
//!        its contents, then the group itself so `{ x : N | x > 0 }` stays a set). A group right
//!        after a LaTeX command (`\emph{...}`) is left alone.
//!     2. Operator patterns. An operand, an operator and another operand (`x > 0`, `s in S`).
//!        Operands that are ordinary English words disqualify the match, and a word operator
//!        such as `in` additionally needs operands that look like math: at most two characters,
//!        a digit or underscore, or an upper-case type name.
//!
//!     Text already in `$...$`, `$$...$$`, `\(...\)` or `\[...\]` is copied untouched. A group or
//!     pattern that does not parse stays text and is escaped. Every recognized span is wrapped
//!     exactly once.

use super::dialect::Dialect;
use super::expressions::generate_expression;
use crate::zed::lexing::tokenize;
use crate::zed::parsing::parse_expression;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static MATH_REGION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\$\$.*?\$\$|\\\[.*?\\\]|\$[^$]*\$|\\\(.*?\\\)").unwrap());

static OPERATOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let operand = r"(?:[A-Za-z][A-Za-z0-9_]*'*|[0-9]+)";
    let operator = r"(?:<=>|=>|-->>|-->|-\+>|>->|<->|!=|<=|>=|=|<|>|\+\+|\+|\b(?:union|inter|notin|in|subseteq|subset|cross)\b)";
    Regex::new(&format!(
        r"\b{operand}(?:[ \t]*{operator}[ \t]*{operand})+"
    ))
    .unwrap()
});

static WORD_OPERATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:union|inter|notin|in|subseteq|subset|cross)\b").unwrap());

static OPERAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9_]*'*|[0-9]+").unwrap());

static ENGLISH_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "am", "an", "and", "are", "as", "at", "be", "but", "by", "can", "do", "for", "from", "has",
        "have", "he", "her", "his", "if", "in", "is", "it", "its", "me", "my", "no", "not", "of",
        "on", "or", "our", "she", "so", "than", "that", "the", "then", "there", "they", "this",
        "to", "up", "us", "was", "we", "were", "what", "when", "which", "who", "will", "with",
        "you",
    ]
    .into_iter()
    .collect()
});

/// Render a paragraph of prose, setting recognized notation as inline math.
pub fn render_prose(text: &str, dialect: Dialect) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for region in MATH_REGION.find_iter(text) {
        out.push_str(&render_braces(&text[last..region.start()], dialect));
        out.push_str(region.as_str());
        last = region.end();
    }
    out.push_str(&render_braces(&text[last..], dialect));
    out
}

/// Escape the characters LaTeX treats specially in running text.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' | '%' | '#' | '_' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

fn render_braces(text: &str, dialect: Dialect) -> String {
    let mut out = String::with_capacity(text.len());
    let mut plain_start = 0;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find('{') {
        let open = cursor + offset;
        let Some(close) = matching_brace(text, open) else {
            break;
        };
        let group = &text[open..=close];
        if follows_command(&text[..open]) {
            cursor = close + 1;
            continue;
        }
        out.push_str(&render_operators(&text[plain_start..open], dialect));
        match math(&group[1..group.len() - 1], dialect).or_else(|| math(group, dialect)) {
            Some(latex) => out.push_str(&format!("${}$", latex)),
            None => out.push_str(&escape_text(group)),
        }
        plain_start = close + 1;
        cursor = close + 1;
    }
    out.push_str(&render_operators(&text[plain_start..], dialect));
    out
}

fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

fn follows_command(before: &str) -> bool {
    let word_start = before
        .trim_end_matches(|c: char| c.is_ascii_alphabetic())
        .len();
    word_start < before.len() && before[..word_start].ends_with('\\')
}

fn render_operators(text: &str, dialect: Dialect) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for found in OPERATOR_PATTERN.find_iter(text) {
        let candidate = found.as_str();
        if !looks_like_math(candidate) {
            continue;
        }
        let Some(latex) = math(candidate, dialect) else {
            continue;
        };
        out.push_str(&escape_text(&text[last..found.start()]));
        out.push_str(&format!("${}$", latex));
        last = found.end();
    }
    out.push_str(&escape_text(&text[last..]));
    out
}

fn looks_like_math(candidate: &str) -> bool {
    let without_word_ops = WORD_OPERATOR.replace_all(candidate, " ");
    let operands: Vec<&str> = OPERAND
        .find_iter(&without_word_ops)
        .map(|m| m.as_str())
        .collect();
    if operands
        .iter()
        .any(|w| ENGLISH_WORDS.contains(w.to_ascii_lowercase().as_str()))
    {
        return false;
    }
    !WORD_OPERATOR.is_match(candidate) || operands.iter().all(|w| is_math_like(w))
}

fn is_math_like(word: &str) -> bool {
    let base = word.trim_end_matches('\'');
    base.chars().count() <= 2
        || base.contains('_')
        || base.chars().any(|c| c.is_ascii_digit())
        || base.chars().all(|c| c.is_ascii_uppercase())
}

fn math(source: &str, dialect: Dialect) -> Option<String> {
    if source.trim().is_empty() {
        return None;
    }
    let expr = parse_expression(tokenize(source)).ok()?;
    generate_expression(&expr, dialect).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prose(text: &str) -> String {
        render_prose(text, Dialect::Standard)
    }

    #[test]
    fn test_operator_patterns() {
        assert_eq!(prose("We know x > 0."), "We know $x > 0$.");
        assert_eq!(prose("Let s in S hold"), "Let $s \\in S$ hold");
        assert_eq!(prose("so n_1 + n_2 = 3"), "so $n_1 + n_2 = 3$");
    }

    #[test]
    fn test_english_is_left_alone() {
        assert_eq!(prose("We believe in magic."), "We believe in magic.");
        assert_eq!(prose("this = that"), "this = that");
    }

    #[test]
    fn test_braced_groups() {
        assert_eq!(prose("Then {x cross y} holds."), "Then $x \\cross y$ holds.");
        assert_eq!(
            prose("The set { x : N | x > 0 } is infinite."),
            "The set $\\{ x : \\mathbb{N} | x > 0 \\}$ is infinite."
        );
        assert_eq!(prose("See {this is not math}."), "See {this is not math}.");
    }

    #[test]
    fn test_existing_math_is_untouched() {
        assert_eq!(prose("Already $x > 0$ here"), "Already $x > 0$ here");
        assert_eq!(prose("and \\(a = b\\) too"), "and \\(a = b\\) too");
        assert_eq!(prose("So $$x > 0$$ holds"), "So $$x > 0$$ holds");
        assert_eq!(prose("Display \\[a = b\\] here"), "Display \\[a = b\\] here");
    }

    #[test]
    fn test_unparsed_groups_are_escaped() {
        assert_eq!(prose("Note {a_b is here}."), "Note {a\\_b is here}.");
    }

    #[test]
    fn test_commands_keep_their_arguments() {
        assert_eq!(prose("\\emph{x} & y"), "\\emph{x} \\& y");
    }
}
