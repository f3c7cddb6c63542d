use mlang_errors::ParseFailure;
use mlang_yellow::SyntaxKind::{self, *};
use mlang_yellow::{GreenElement, GreenNode, GreenToken};

use super::stmts::{self, Scope};
use super::{exprs, functions, node, node_slots};
use crate::parser::Parser;

pub(crate) fn class_declaration(p: &mut Parser<'_>) -> Result<GreenNode, ParseFailure> {
    let keyword = p.advance();
    let attributes = p.at(OPEN_PARENTHESIS).then(|| attribute_list(p));
    let name = p.expect(IDENTIFIER);
    let base_classes = p.at(LESS).then(|| base_class_list(p));

    let mut members: Vec<GreenElement> = Vec::new();
    while !p.at(EOF) && !p.at_keyword("end") {
        let member = match p.peek_kind() {
            SEMICOLON | COMMA => p.advance().into(),
            IDENTIFIER => match p.peek().token.text_trimmed() {
                "properties" => properties_list(p)?,
                "methods" => methods_list(p)?,
                "events" => events_list(p)?,
                "enumeration" => enumeration_list(p)?,
                _ => return Err(unexpected_member(p)),
            }
            .into(),
            _ => return Err(unexpected_member(p)),
        };
        members.push(member);
    }

    let end = p.expect_keyword("end");
    Ok(node_slots(CLASS_DECLARATION, [
        Some(keyword.into()),
        attributes.map(Into::into),
        Some(name.into()),
        base_classes.map(Into::into),
        Some(GreenNode::list(members).into()),
        Some(end.into()),
    ]))
}

fn unexpected_member(p: &Parser<'_>) -> ParseFailure {
    let current = p.peek();
    let text = current.token.text_trimmed();
    tracing::warn!(text, range = ?current.range(), "unexpected token in class body");
    ParseFailure::unexpected_class_member(text, current.range())
}

/// `(Name, ~Name, Name = value, ...)` after `classdef` or a block keyword.
fn attribute_list(p: &mut Parser<'_>) -> GreenNode {
    let open = p.advance();

    let mut attributes: Vec<GreenElement> = Vec::new();
    while !p.at(CLOSE_PARENTHESIS) && !p.at(EOF) {
        match p.peek_kind() {
            COMMA => attributes.push(p.advance().into()),
            IDENTIFIER | TILDE => attributes.push(attribute(p).into()),
            _ => attributes.push(p.error_node(CLOSE_PARENTHESIS).into()),
        }
    }

    let close = p.expect(CLOSE_PARENTHESIS);
    node(ATTRIBUTE_LIST, [open.into(), GreenNode::list(attributes).into(), close.into()])
}

fn attribute(p: &mut Parser<'_>) -> GreenNode {
    let negation = p.eat(TILDE);
    let name = p.expect(IDENTIFIER);
    let assignment = match p.eat(EQUALS) {
        Some(equals) => {
            let value = p.with_inside_brackets(false, exprs::expression);
            Some(node(ATTRIBUTE_ASSIGNMENT, [equals.into(), value.into()]))
        }
        None => None,
    };
    node_slots(ATTRIBUTE, [
        negation.map(Into::into),
        Some(name.into()),
        assignment.map(Into::into),
    ])
}

/// `< Base & pkg.Other`
fn base_class_list(p: &mut Parser<'_>) -> GreenNode {
    let less = p.advance();

    let mut bases: Vec<GreenElement> = vec![functions::compound_name(p).into()];
    while let Some(ampersand) = p.eat(AMPERSAND) {
        bases.push(ampersand.into());
        bases.push(functions::compound_name(p).into());
    }

    node(BASE_CLASS_LIST, [less.into(), GreenNode::list(bases).into()])
}

/// The keyword and optional attributes opening a class member block.
fn block_head(p: &mut Parser<'_>) -> (GreenToken, Option<GreenNode>) {
    let keyword = p.advance();
    let attributes = (p.at(OPEN_PARENTHESIS) && !p.previous_ends_line()).then(|| attribute_list(p));
    (keyword, attributes)
}

fn block(
    kind: SyntaxKind,
    (keyword, attributes): (GreenToken, Option<GreenNode>),
    items: GreenNode,
    end: GreenToken,
) -> GreenNode {
    node_slots(kind, [
        Some(keyword.into()),
        attributes.map(Into::into),
        Some(items.into()),
        Some(end.into()),
    ])
}

fn properties_list(p: &mut Parser<'_>) -> Result<GreenNode, ParseFailure> {
    let head = block_head(p);
    let properties = stmts::statement_list(p, Scope::Block)?;
    let end = p.expect_keyword("end");
    Ok(block(PROPERTIES_LIST, head, properties, end))
}

fn methods_list(p: &mut Parser<'_>) -> Result<GreenNode, ParseFailure> {
    let head = block_head(p);

    let mut methods: Vec<GreenElement> = Vec::new();
    while !p.at(EOF) && !p.at_keyword("end") {
        let method = match p.peek_kind() {
            SEMICOLON | COMMA => p.advance().into(),
            IDENTIFIER if p.at_keyword("function") => {
                functions::function_declaration(p, METHOD_DEFINITION)?.into()
            }
            IDENTIFIER | OPEN_SQUARE_BRACKET => functions::abstract_method_declaration(p).into(),
            _ => return Err(unexpected_member(p)),
        };
        methods.push(method);
    }

    let end = p.expect_keyword("end");
    Ok(block(METHODS_LIST, head, GreenNode::list(methods), end))
}

fn events_list(p: &mut Parser<'_>) -> Result<GreenNode, ParseFailure> {
    let head = block_head(p);

    let mut events: Vec<GreenElement> = Vec::new();
    while !p.at(EOF) && !p.at_keyword("end") {
        match p.peek_kind() {
            IDENTIFIER | SEMICOLON | COMMA => events.push(p.advance().into()),
            _ => return Err(unexpected_member(p)),
        }
    }

    let end = p.expect_keyword("end");
    Ok(block(EVENTS_LIST, head, GreenNode::list(events), end))
}

fn enumeration_list(p: &mut Parser<'_>) -> Result<GreenNode, ParseFailure> {
    let head = block_head(p);

    let mut items: Vec<GreenElement> = Vec::new();
    while !p.at(EOF) && !p.at_keyword("end") {
        match p.peek_kind() {
            SEMICOLON | COMMA => items.push(p.advance().into()),
            IDENTIFIER => items.push(enumeration_item(p).into()),
            _ => return Err(unexpected_member(p)),
        }
    }

    let end = p.expect_keyword("end");
    Ok(block(ENUMERATION_LIST, head, GreenNode::list(items), end))
}

fn enumeration_item(p: &mut Parser<'_>) -> GreenNode {
    let name = p.advance();
    let value = (p.at(OPEN_PARENTHESIS) && !p.previous_ends_line())
        .then(|| node(ENUMERATION_ITEM_VALUE, exprs::arguments(p, CLOSE_PARENTHESIS)));
    node_slots(ENUMERATION_ITEM, [Some(name.into()), value.map(Into::into)])
}
