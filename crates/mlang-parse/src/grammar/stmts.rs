use mlang_errors::ParseFailure;
use mlang_yellow::{GreenElement, GreenNode};
use mlang_yellow::SyntaxKind::{self, *};

use super::{classes, exprs, functions, node, node_slots};
use crate::parser::Parser;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Scope {
    /// Stray terminator keywords become error nodes.
    File,
    /// Terminator keywords end the list.
    Block,
}

pub(crate) fn statement_list(p: &mut Parser<'_>, scope: Scope) -> Result<GreenNode, ParseFailure> {
    let mut statements = Vec::new();

    while !p.at(EOF) {
        if p.at_terminator() {
            match scope {
                Scope::Block => break,
                Scope::File => {
                    statements.push(p.error_node(EOF).into());
                    continue;
                }
            }
        }

        if !matches!(p.peek_kind(), SEMICOLON | COMMA) && !p.at_set(exprs::EXPRESSION_FIRST) {
            statements.push(p.error_node(IDENTIFIER).into());
            continue;
        }

        let start = p.position();
        statements.push(statement(p)?.into());
        if p.position() == start {
            statements.push(p.error_node(IDENTIFIER).into());
        }
    }

    Ok(GreenNode::list(statements))
}

fn statement(p: &mut Parser<'_>) -> Result<GreenNode, ParseFailure> {
    if p.at(IDENTIFIER) {
        match p.peek().token.text_trimmed() {
            "function" => return functions::function_declaration(p, FUNCTION_DECLARATION),
            "classdef" => return classes::class_declaration(p),
            "switch" => return switch_statement(p),
            "while" => return loop_statement(p, WHILE_LOOP_STATEMENT),
            "if" => return if_statement(p),
            "for" | "parfor" => return loop_statement(p, FOR_LOOP_STATEMENT),
            "try" => return try_statement(p),
            _ => {}
        }
    }

    Ok(match p.peek_kind() {
        SEMICOLON | COMMA => node(EMPTY_STATEMENT, [p.advance().into()]),
        _ => expression_statement(p),
    })
}

fn expression_statement(p: &mut Parser<'_>) -> GreenNode {
    let expression = exprs::expression(p);
    let terminator = p.eat_separator();
    node_slots(EXPRESSION_STATEMENT, [Some(expression.into()), terminator.map(Into::into)])
}

/// `keyword condition [;] body`, the head shared by loops and conditional
/// clauses.
fn clause(p: &mut Parser<'_>) -> Result<[Option<GreenElement>; 4], ParseFailure> {
    let keyword = p.advance();
    let condition = exprs::expression(p);
    let separator = p.eat_separator();
    let body = statement_list(p, Scope::Block)?;
    Ok([Some(keyword.into()), Some(condition.into()), separator.map(Into::into), Some(body.into())])
}

fn if_statement(p: &mut Parser<'_>) -> Result<GreenNode, ParseFailure> {
    let [keyword, condition, separator, body] = clause(p)?;

    let mut elseif_clauses = Vec::new();
    while p.at_keyword("elseif") {
        elseif_clauses.push(node_slots(ELSEIF_CLAUSE, clause(p)?).into());
    }

    let else_clause = match p.eat_keyword("else") {
        Some(keyword) => {
            let body = statement_list(p, Scope::Block)?;
            Some(node(ELSE_CLAUSE, [keyword.into(), body.into()]))
        }
        None => None,
    };

    let end = p.expect_keyword("end");
    Ok(node_slots(IF_STATEMENT, [
        keyword,
        condition,
        separator,
        body,
        Some(GreenNode::list(elseif_clauses).into()),
        else_clause.map(Into::into),
        Some(end.into()),
    ]))
}

/// `while` and `for`/`parfor` loops.
fn loop_statement(p: &mut Parser<'_>, kind: SyntaxKind) -> Result<GreenNode, ParseFailure> {
    let [keyword, condition, separator, body] = clause(p)?;
    let end = p.expect_keyword("end");
    Ok(node_slots(kind, [keyword, condition, separator, body, Some(end.into())]))
}

fn switch_statement(p: &mut Parser<'_>) -> Result<GreenNode, ParseFailure> {
    let keyword = p.advance();
    let subject = exprs::expression(p);
    let separator = p.eat_separator();

    let mut cases = Vec::new();
    loop {
        if p.at_keyword("case") || p.at_keyword("otherwise") {
            cases.push(switch_case(p)?.into());
        } else if p.at(EOF) || p.at_keyword("end") {
            break;
        } else if matches!(p.peek_kind(), SEMICOLON | COMMA) {
            cases.push(p.advance().into());
        } else {
            cases.push(p.error_node(IDENTIFIER).into());
        }
    }

    let end = p.expect_keyword("end");
    Ok(node_slots(SWITCH_STATEMENT, [
        Some(keyword.into()),
        Some(subject.into()),
        separator.map(Into::into),
        Some(GreenNode::list(cases).into()),
        Some(end.into()),
    ]))
}

fn switch_case(p: &mut Parser<'_>) -> Result<GreenNode, ParseFailure> {
    let keyword = p.advance();
    let label = (keyword.text_trimmed() == "case").then(|| exprs::expression(p));
    let separator = p.eat_separator();
    let body = statement_list(p, Scope::Block)?;
    Ok(node_slots(SWITCH_CASE, [
        Some(keyword.into()),
        label.map(Into::into),
        separator.map(Into::into),
        Some(body.into()),
    ]))
}

fn try_statement(p: &mut Parser<'_>) -> Result<GreenNode, ParseFailure> {
    let keyword = p.advance();
    let separator = p.eat_separator();
    let body = statement_list(p, Scope::Block)?;

    let catch_clause = match p.eat_keyword("catch") {
        Some(catch) => {
            let identifier = if p.previous_ends_line() || p.at_terminator() {
                None
            } else {
                p.eat(IDENTIFIER)
            };
            let separator = p.eat_separator();
            let body = statement_list(p, Scope::Block)?;
            Some(node_slots(CATCH_CLAUSE, [
                Some(catch.into()),
                identifier.map(Into::into),
                separator.map(Into::into),
                Some(body.into()),
            ]))
        }
        None => None,
    };

    let end = p.expect_keyword("end");
    Ok(node_slots(TRY_CATCH_STATEMENT, [
        Some(keyword.into()),
        separator.map(Into::into),
        Some(body.into()),
        catch_clause.map(Into::into),
        Some(end.into()),
    ]))
}
