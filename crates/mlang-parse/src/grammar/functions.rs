use mlang_errors::ParseFailure;
use mlang_yellow::SyntaxKind::{self, *};
use mlang_yellow::{GreenElement, GreenNode};

use super::stmts::{self, Scope};
use super::{node, node_slots};
use crate::parser::Parser;

/// `function [outputs] = name(inputs) body [end]`, producing either a
/// `FUNCTION_DECLARATION` or a `METHOD_DEFINITION`. A method needs its
/// `end`; a plain function may run to the end of the file.
pub(crate) fn function_declaration(
    p: &mut Parser<'_>,
    kind: SyntaxKind,
) -> Result<GreenNode, ParseFailure> {
    let keyword = p.advance();
    let [output, name, input] = signature(p);
    let body = stmts::statement_list(p, Scope::Block)?;
    let end = match kind {
        METHOD_DEFINITION => Some(p.expect_keyword("end")),
        _ => p.eat_keyword("end"),
    };

    Ok(node_slots(kind, [
        Some(keyword.into()),
        output,
        name,
        input,
        Some(body.into()),
        end.map(Into::into),
    ]))
}

/// A method signature without a body, as found in abstract methods
/// blocks.
pub(crate) fn abstract_method_declaration(p: &mut Parser<'_>) -> GreenNode {
    node_slots(ABSTRACT_METHOD_DECLARATION, signature(p))
}

fn signature(p: &mut Parser<'_>) -> [Option<GreenElement>; 3] {
    let has_output = p.at(OPEN_SQUARE_BRACKET) || (p.at(IDENTIFIER) && p.nth_kind(1) == EQUALS);
    let output = has_output.then(|| output_description(p));
    let name = compound_name(p);
    let input = (p.at(OPEN_PARENTHESIS) && !p.previous_ends_line()).then(|| input_description(p));
    [output.map(Into::into), Some(name.into()), input.map(Into::into)]
}

fn output_description(p: &mut Parser<'_>) -> GreenNode {
    if p.at(OPEN_SQUARE_BRACKET) {
        let open = p.advance();
        let outputs = names(p, CLOSE_SQUARE_BRACKET);
        let close = p.expect(CLOSE_SQUARE_BRACKET);
        let equals = p.expect(EQUALS);
        return node(FUNCTION_OUTPUT_DESCRIPTION, [
            open.into(),
            outputs.into(),
            close.into(),
            equals.into(),
        ]);
    }

    let output = GreenNode::list([GreenElement::from(p.advance())]);
    let equals = p.expect(EQUALS);
    node_slots(FUNCTION_OUTPUT_DESCRIPTION, [None, Some(output.into()), None, Some(equals.into())])
}

pub(crate) fn input_description(p: &mut Parser<'_>) -> GreenNode {
    let open = p.advance();
    let parameters = names(p, CLOSE_PARENTHESIS);
    let close = p.expect(CLOSE_PARENTHESIS);
    node(FUNCTION_INPUT_DESCRIPTION, [open.into(), parameters.into(), close.into()])
}

/// Identifiers and `~` placeholders up to `close`, commas optional.
fn names(p: &mut Parser<'_>, close: SyntaxKind) -> GreenNode {
    let mut names: Vec<GreenElement> = Vec::new();
    while !p.at(close) && !p.at(EOF) {
        match p.peek_kind() {
            IDENTIFIER | TILDE | COMMA => names.push(p.advance().into()),
            _ => names.push(p.error_node(close).into()),
        }
    }
    GreenNode::list(names)
}

/// A dotted name such as `pkg.Class.method`, stored as bare tokens.
pub(crate) fn compound_name(p: &mut Parser<'_>) -> GreenNode {
    let mut segments: Vec<GreenElement> = vec![p.expect(IDENTIFIER).into()];
    while p.at(DOT) && p.nth_kind(1) == IDENTIFIER && !p.previous_has_trailing_trivia() {
        segments.push(p.advance().into());
        segments.push(p.advance().into());
    }
    GreenNode::new(COMPOUND_NAME, segments.into_iter().map(Some))
}
