//! Prose capture
//!
//!     Not everything in a whiteboard document is notation. TEXT blocks hold paragraphs of
//!     English, headings hold titles and directives hold metadata values. Running those through
//!     the notation grammar would lose their spacing and turn apostrophes into unknown tokens, so
//!     this mapper replaces them with a single `Prose` token whose text is the original source
//!     slice.
//!
//! Rules
//!
//!     - `TEXT:` keeps its two tokens, the rest of its line becomes prose, and every following
//!       line becomes one prose token until a line that starts a structural item.
//!     - `TITLE:`, `AUTHOR:` and the other directives keep their two tokens; the rest of the line
//!       becomes prose.
//!     - `=== Title ===` and `** Title **` keep the opening marker; the text between the markers
//!       becomes prose and the closing marker is dropped.
//!
//!     A line starts a structural item when it is shaped like one, not merely when its first word
//!     is a keyword: "given that x > 0" inside a TEXT block is still prose, `given A, B` is not.

use super::TokenMapper;
use crate::zed::token::{Token, TokenKind};

pub struct ProseCaptureMapper<'a> {
    source: &'a str,
    in_text_block: bool,
}

impl<'a> ProseCaptureMapper<'a> {
    pub fn new(source: &'a str) -> Self {
        ProseCaptureMapper {
            source,
            in_text_block: false,
        }
    }

    fn flush_line(&mut self, line: Vec<Token>, out: &mut Vec<Token>) {
        if line.is_empty() {
            return;
        }
        let first = line[0].kind;
        let second = line.get(1).map(|t| t.kind);

        if first == TokenKind::Text && second == Some(TokenKind::Colon) {
            self.in_text_block = true;
            self.keep_head(line, 2, out);
        } else if first.is_directive() && second == Some(TokenKind::Colon) {
            self.in_text_block = false;
            self.keep_head(line, 2, out);
        } else if matches!(first, TokenKind::HeadingMarker | TokenKind::SolutionMarker) {
            self.in_text_block = false;
            self.capture_between_markers(line, out);
        } else if starts_structural_line(&line) {
            self.in_text_block = false;
            out.extend(line);
        } else if self.in_text_block {
            out.push(self.prose(&line));
        } else {
            out.extend(line);
        }
    }

    fn keep_head(&self, mut line: Vec<Token>, n: usize, out: &mut Vec<Token>) {
        let rest = if line.len() > n {
            Some(self.prose(&line[n..]))
        } else {
            None
        };
        line.truncate(n);
        out.extend(line);
        out.extend(rest);
    }

    fn capture_between_markers(&self, mut line: Vec<Token>, out: &mut Vec<Token>) {
        let marker = line[0].kind;
        let end = if line.len() > 1 && line[line.len() - 1].kind == marker {
            line.len() - 1
        } else {
            line.len()
        };
        let content = if end > 1 {
            Some(self.prose(&line[1..end]))
        } else {
            None
        };
        line.truncate(1);
        out.extend(line);
        out.extend(content);
    }

    fn prose(&self, tokens: &[Token]) -> Token {
        let first = &tokens[0];
        let last = &tokens[tokens.len() - 1];
        let span = first.span.start..last.span.end;
        Token {
            kind: TokenKind::Prose,
            text: self.source[span.clone()].trim().to_string(),
            line: first.line,
            column: first.column,
            indent: first.indent,
            span,
        }
    }
}

impl TokenMapper for ProseCaptureMapper<'_> {
    fn map(&mut self, tokens: Vec<Token>) -> Vec<Token> {
        let mut result = Vec::with_capacity(tokens.len());
        let mut line = Vec::new();

        for token in tokens {
            if token.kind.is_line_end() {
                self.flush_line(std::mem::take(&mut line), &mut result);
                result.push(token);
            } else {
                line.push(token);
            }
        }
        self.flush_line(line, &mut result);

        result
    }
}

/// True when a logical line has the shape of a top-level structural item.
pub fn starts_structural_line(line: &[Token]) -> bool {
    let kinds: Vec<TokenKind> = line.iter().map(|t| t.kind).collect();
    match kinds.as_slice() {
        [TokenKind::Schema, TokenKind::Identifier] => true,
        [TokenKind::AxDef] => true,
        [TokenKind::GenDef] | [TokenKind::GenDef, TokenKind::LBracket, ..] => true,
        [TokenKind::Given, rest @ ..] => is_name_list(rest),
        [TokenKind::Identifier, TokenKind::Defines | TokenKind::DefinedAs, ..] => true,
        [TokenKind::Proof | TokenKind::Text, TokenKind::Colon, ..] => true,
        [k, TokenKind::Colon, ..] if k.is_directive() => true,
        [TokenKind::HeadingMarker, ..] | [TokenKind::SolutionMarker, ..] => true,
        [TokenKind::LParen, TokenKind::Identifier, TokenKind::RParen] => {
            is_part_label(&line[1].text)
        }
        _ => false,
    }
}

fn is_name_list(kinds: &[TokenKind]) -> bool {
    !kinds.is_empty()
        && kinds.len() % 2 == 1
        && kinds.iter().enumerate().all(|(i, k)| {
            if i % 2 == 0 {
                *k == TokenKind::Identifier
            } else {
                *k == TokenKind::Comma
            }
        })
}

/// Part labels: a single lowercase letter or a short lowercase roman numeral.
pub fn is_part_label(text: &str) -> bool {
    let single_letter = text.len() == 1 && text.chars().all(|c| c.is_ascii_lowercase());
    let roman = !text.is_empty() && text.len() <= 4 && text.chars().all(|c| "ivx".contains(c));
    single_letter || roman
}

#[cfg(test)]
mod tests {
    use crate::zed::lexing::tokenize;
    use crate::zed::token::TokenKind;

    fn summary(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_text_block_lines_become_prose() {
        let tokens = summary("TEXT: It's simple.\nWe know x > 0.\n");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Text, "TEXT".to_string()),
                (TokenKind::Colon, ":".to_string()),
                (TokenKind::Prose, "It's simple.".to_string()),
                (TokenKind::Newline, "\n".to_string()),
                (TokenKind::Prose, "We know x > 0.".to_string()),
                (TokenKind::Newline, "\n".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_text_block_ends_at_structural_line() {
        let kinds: Vec<TokenKind> = tokenize("TEXT:\nhello\ngiven A, B\n")
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Text,
                TokenKind::Colon,
                TokenKind::Newline,
                TokenKind::Prose,
                TokenKind::Newline,
                TokenKind::Given,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_definitions_end_text_block() {
        let tokens = tokenize("TEXT: Colours.\nColour ::= red | green\n");
        assert_eq!(tokens[4].kind, TokenKind::Identifier);
        assert_eq!(tokens[5].kind, TokenKind::Defines);
    }

    #[test]
    fn test_keyword_led_prose_stays_prose() {
        let tokens = tokenize("TEXT:\ngiven that x is positive\n");
        assert_eq!(tokens[3].kind, TokenKind::Prose);
        assert_eq!(tokens[3].text, "given that x is positive");
    }

    #[test]
    fn test_heading_markers() {
        let tokens = summary("=== Birthday Book ===\n");
        assert_eq!(tokens[0].0, TokenKind::HeadingMarker);
        assert_eq!(tokens[1], (TokenKind::Prose, "Birthday Book".to_string()));
        assert_eq!(tokens[2].0, TokenKind::Newline);
    }

    #[test]
    fn test_directive_value() {
        let tokens = summary("TITLE: Sets & Relations\n");
        assert_eq!(tokens[2], (TokenKind::Prose, "Sets & Relations".to_string()));
    }

    #[test]
    fn test_part_label_detection() {
        assert!(super::is_part_label("a"));
        assert!(super::is_part_label("iv"));
        assert!(!super::is_part_label("ab"));
        assert!(!super::is_part_label("A"));
    }
}
