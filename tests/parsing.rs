//! Parser behavior on whole inputs: associativity, binder sugar, block structure and the
//! targeted error messages.

use rstest::rstest;
use std::fs;
use zedtex::zed::ast::{ExprKind, Item, ProofStep};
use zedtex::zed::lexing::tokenize;
use zedtex::zed::parsing::{parse, parse_expression, ParserError, ParserErrorKind};
use zedtex::zed::testing::*;

fn parse_err(source: &str) -> ParserError {
    match parse(tokenize(source)) {
        Ok(doc) => panic!("expected an error, parsed {} items", doc.items.len()),
        Err(err) => err,
    }
}

fn read_fixture(name: &str) -> String {
    fs::read_to_string(format!("tests/fixtures/{}", name)).expect("Failed to read fixture")
}

#[test]
fn test_cross_is_left_associative() {
    assert_eq!(
        parse_expr_str("A cross B cross C"),
        bin(Op::Cross, bin(Op::Cross, id("A"), id("B")), id("C"))
    );
}

#[test]
fn test_explicit_right_nesting_is_kept() {
    assert_eq!(
        parse_expr_str("A cross (B cross C)"),
        bin(Op::Cross, id("A"), bin(Op::Cross, id("B"), id("C")))
    );
}

#[test]
fn test_constrained_quantifier_lowers_to_implication() {
    assert_eq!(
        parse_expr_str("forall x : D | C | B"),
        quant(Q::Forall, &["x"], id("D"), bin(Op::Implies, id("C"), id("B")))
    );
}

#[test]
fn test_mu_keeps_its_constraint() {
    assert_eq!(
        parse_expr_str("mu x : N | x > 1 . x * 2"),
        mu(
            &["x"],
            id("N"),
            Some(bin(Op::Greater, id("x"), num(1))),
            bin(Op::Times, id("x"), num(2))
        )
    );
}

#[rstest]
#[case("{ x : N | x > 0 }", true, false)]
#[case("{ x : N . x * x }", false, true)]
#[case("{ x : N | x > 0 . x * x }", true, true)]
#[case("{ x : N | x > 0 | x * x }", true, true)]
fn test_comprehension_separators(
    #[case] source: &str,
    #[case] has_predicate: bool,
    #[case] has_expression: bool,
) {
    match parse_expr_str(source).kind {
        ExprKind::SetComprehension(c) => {
            assert_eq!(c.variables, vec!["x"]);
            assert_eq!(c.predicate.is_some(), has_predicate);
            assert_eq!(c.expression.is_some(), has_expression);
        }
        other => panic!("expected a comprehension, got {:?}", other),
    }
}

#[test]
fn test_comprehension_needs_a_part() {
    let err = parse_expression(tokenize("{ x : N }")).unwrap_err();
    assert_eq!(err.kind, ParserErrorKind::Structure);
}

#[test]
fn test_free_type_typo_names_the_fix() {
    let err = parse_err("Colour ::== red | green\n");
    assert_eq!(err.kind, ParserErrorKind::Typo);
    assert!(err.message.contains("'::='"), "{}", err.message);
    assert_eq!(err.line, 1);
}

#[test]
fn test_free_type_branches_in_order() {
    let doc = parse_doc_str("Tree ::= leaf | node <<Tree cross Tree>> | stump\n");
    match &doc.items[0] {
        Item::FreeType(free) => {
            let names: Vec<&str> = free.branches.iter().map(|b| b.name.as_str()).collect();
            assert_eq!(names, vec!["leaf", "node", "stump"]);
            assert_eq!(
                free.branches[1].parameter,
                Some(bin(Op::Cross, id("Tree"), id("Tree")))
            );
        }
        other => panic!("expected a free type, got {:?}", other),
    }
}

#[rstest]
#[case("  x > 0\n", 1)]
#[case("  x > 0\n\n  x < 9\n", 2)]
#[case("  x > 0\n  x > 1\n\n  x < 9\n\n\n  x != 4\n", 3)]
fn test_blank_lines_split_predicate_groups(#[case] predicates: &str, #[case] groups: usize) {
    let source = format!("schema S\n  x : N\nwhere\n{}end\n", predicates);
    assert_doc(&parse_doc_str(&source))
        .item_count(1)
        .item(0, |item| item.is_schema("S").predicate_groups(groups));
}

#[test]
fn test_continued_predicate_stays_one_line() {
    let source = "schema S\n  x : N\nwhere\n  x > 0 and \\\n  x < 9\n  x != 4\nend\n";
    let doc = parse_doc_str(source);
    assert_doc(&doc)
        .item_count(1)
        .item(0, |item| item.is_schema("S").predicate_groups(1));
    match &doc.items[0] {
        Item::Schema(schema) => {
            let group = &schema.body.predicate_groups[0];
            assert_eq!(group.predicates.len(), 2);
            assert_eq!(
                group.predicates[0],
                bin(
                    Op::And,
                    bin(Op::Greater, id("x"), num(0)),
                    bin(Op::Less, id("x"), num(9))
                )
            );
        }
        other => panic!("expected a schema, got {:?}", other),
    }
}

#[test]
fn test_continued_proof_step_keeps_its_nesting() {
    let source = "PROOF:\n  q [mp]\n    p and \\\n  r\n    p => q\n";
    let doc = parse_doc_str(source);
    assert_doc(&doc)
        .item_count(1)
        .item(0, |item| item.is_proof().proof_depth(2));
    match &doc.items[0] {
        Item::Proof(proof) => {
            let premises = &proof.conclusion.children;
            assert_eq!(premises.len(), 2);
            match &premises[0] {
                ProofStep::Node(node) => {
                    assert_eq!(node.expression, bin(Op::And, id("p"), id("r")))
                }
                other => panic!("expected a proof step, got {:?}", other),
            }
        }
        other => panic!("expected a proof, got {:?}", other),
    }
}

#[test]
fn test_fixture_document_shape() {
    let doc = parse_doc_str(&read_fixture("birthday_book.zed"));
    assert_doc(&doc)
        .item_count(8)
        .item(0, |item| item.has_type("Section"))
        .item(1, |item| item.is_given(&["NAME", "DAY"]))
        .item(2, |item| item.has_type("FreeType"))
        .item(3, |item| {
            item.is_paragraph("Every name in {known subseteq NAME} has a birthday.")
        })
        .item(4, |item| item.is_schema("BirthdayBook").predicate_groups(1))
        .item(5, |item| item.has_type("Solution"))
        .item(6, |item| item.has_type("Part"))
        .item(7, |item| item.is_proof().proof_depth(2));

    let title = doc.title.expect("title metadata");
    assert_eq!(title.title.as_deref(), Some("Birthday Book"));
    assert_eq!(title.author.as_deref(), Some("J. M. Spivey"));
    assert!(doc.bibliography.is_none());
}

#[test]
fn test_bare_predicates() {
    let doc = parse_doc_str("x in S\nnot p or q\n");
    assert_doc(&doc)
        .item_count(2)
        .item(0, |item| item.is_predicate(&bin(Op::In, id("x"), id("S"))))
        .item(1, |item| {
            item.is_predicate(&bin(Op::Or, not(id("p")), id("q")))
        });
}

#[test]
fn test_prefix_functions() {
    assert_eq!(
        parse_expr_str("P (X cross Y)"),
        prefix("P", bin(Op::Cross, id("X"), id("Y")))
    );
    assert_eq!(parse_expr_str("dom R"), prefix("dom", id("R")));
    // no operand follows, so `id` is a plain name
    assert_eq!(parse_expr_str("id = R"), bin(Op::Equals, id("id"), id("R")));
    assert_eq!(parse_expr_str("f(x, 1)"), call("f", vec![id("x"), num(1)]));
}

#[test]
fn test_unknown_character_position() {
    let err = parse_err(&read_fixture("unknown_character.zed"));
    assert_eq!(err.kind, ParserErrorKind::UnknownCharacter);
    assert!(err.is_lexical());
    assert_eq!((err.line, err.column), (1, 3));
}

#[test]
fn test_unterminated_schema() {
    let err = parse_err("schema S\n  x : N\n");
    assert_eq!(err.kind, ParserErrorKind::Structure);
    assert!(err.message.contains("'end'"), "{}", err.message);
}

#[test]
fn test_error_display_includes_position() {
    let err = parse_err("x = \n");
    let shown = err.to_string();
    assert!(shown.contains("line 1"), "{}", shown);
}
