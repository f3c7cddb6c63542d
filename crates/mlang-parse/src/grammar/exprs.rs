use mlang_yellow::SyntaxKind::{self, *};
use mlang_yellow::{GreenElement, GreenNode, SyntaxSet};

use super::{functions, node};
use crate::parser::Parser;

/// Binding strength, weakest first. Every binary operator is
/// left-associative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    Expression,
    Assignment,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseAnd,
    Relational,
    Colon,
    Additive,
    Multiplicative,
    Unary,
    WeirdPower,
    Power,
}

impl Precedence {
    fn of_binary(kind: SyntaxKind) -> Option<Self> {
        Some(match kind {
            EQUALS => Self::Assignment,
            PIPE_PIPE => Self::LogicalOr,
            AMPERSAND_AMPERSAND => Self::LogicalAnd,
            PIPE => Self::BitwiseOr,
            AMPERSAND => Self::BitwiseAnd,
            LESS | LESS_OR_EQUALS | GREATER | GREATER_OR_EQUALS | EQUALS_EQUALS | TILDE_EQUALS => {
                Self::Relational
            }
            COLON => Self::Colon,
            PLUS | MINUS => Self::Additive,
            STAR | DOT_STAR | SLASH | DOT_SLASH | BACKSLASH | DOT_BACKSLASH => Self::Multiplicative,
            CARET | DOT_CARET => Self::Power,
            _ => return None,
        })
    }
}

/// Tokens that can begin an expression.
pub(crate) const EXPRESSION_FIRST: SyntaxSet = SyntaxSet::new([
    IDENTIFIER,
    NUMBER_LITERAL,
    STRING_LITERAL,
    DOUBLE_QUOTED_STRING_LITERAL,
    UNQUOTED_STRING_LITERAL,
    OPEN_SQUARE_BRACKET,
    OPEN_BRACE,
    OPEN_PARENTHESIS,
    AT,
    COLON,
    PLUS,
    MINUS,
    TILDE,
]);

/// Where an elided operand is allowed: `x(:)`, `x(2:)`, `[~, i]`.
const EMPTY_OPERAND_FOLLOW: SyntaxSet = SyntaxSet::new([
    COMMA,
    SEMICOLON,
    CLOSE_PARENTHESIS,
    CLOSE_SQUARE_BRACKET,
    CLOSE_BRACE,
    EOF,
]);

pub(crate) fn expression(p: &mut Parser<'_>) -> GreenNode {
    expression_above(p, Precedence::Expression)
}

/// Parses an expression whose binary operators all bind tighter than
/// `floor`.
fn expression_above(p: &mut Parser<'_>, floor: Precedence) -> GreenNode {
    let mut lhs = prefix(p, floor);

    loop {
        if p.previous_ends_line() {
            break;
        }

        let kind = p.peek_kind();
        let Some(precedence) = Precedence::of_binary(kind) else {
            break;
        };
        if precedence <= floor {
            break;
        }
        if p.inside_brackets() && starts_signed_element(p) {
            break;
        }

        let operator = p.advance();
        let rhs = if kind == COLON { range_end(p) } else { operand(p, precedence) };

        let node_kind = if kind == EQUALS { ASSIGNMENT_EXPRESSION } else { BINARY_OPERATION_EXPRESSION };
        lhs = node(node_kind, [lhs.into(), operator.into(), rhs.into()]);
    }

    lhs
}

/// `[1 -2]` is two elements, `[1 - 2]` and `[1-2]` are one.
fn starts_signed_element(p: &Parser<'_>) -> bool {
    matches!(p.peek_kind(), PLUS | MINUS)
        && p.previous_has_trailing_trivia()
        && p.peek().token.trailing().is_empty()
}

fn prefix(p: &mut Parser<'_>, floor: Precedence) -> GreenNode {
    match p.peek_kind() {
        PLUS | MINUS | TILDE => {}
        // A bare `:` as in `x(:)` or `x(:, 1)`.
        COLON => {
            let colon = p.advance();
            let end = range_end(p);
            return node(BINARY_OPERATION_EXPRESSION, [empty().into(), colon.into(), end.into()]);
        }
        _ => return postfix(p),
    }

    let operator = p.advance();
    let operand = if operator.kind() == TILDE && p.at_set(EMPTY_OPERAND_FOLLOW) {
        empty()
    } else {
        // Inside an exponent the operand stops at the next `^`, so
        // `2^-3^2` is `(2^-3)^2`.
        let operand_floor =
            if floor >= Precedence::WeirdPower { Precedence::Power } else { Precedence::Unary };
        operand(p, operand_floor)
    };

    node(UNARY_PREFIX_OPERATION_EXPRESSION, [operator.into(), operand.into()])
}

/// The operand after an operator. An operator that ends its line leaves the
/// operand missing.
fn operand(p: &mut Parser<'_>, floor: Precedence) -> GreenNode {
    if p.previous_ends_line() {
        return missing_operand(p);
    }
    expression_above(p, floor)
}

/// The right side of a `:`, elided in `x(2:)`.
fn range_end(p: &mut Parser<'_>) -> GreenNode {
    if p.previous_ends_line() || p.at_set(EMPTY_OPERAND_FOLLOW) {
        return empty();
    }
    expression_above(p, Precedence::Colon)
}

fn postfix(p: &mut Parser<'_>) -> GreenNode {
    let mut expression = term(p);

    if expression.kind() == IDENTIFIER_NAME_EXPRESSION && p.at(UNQUOTED_STRING_LITERAL) {
        return command(p, expression);
    }

    loop {
        if p.previous_ends_line() {
            break;
        }

        expression = match p.peek_kind() {
            OPEN_PARENTHESIS | OPEN_BRACE
                if p.inside_brackets() && p.previous_has_trailing_trivia() =>
            {
                break;
            }
            OPEN_PARENTHESIS => {
                let [open, arguments, close] = arguments(p, CLOSE_PARENTHESIS);
                node(FUNCTION_CALL_EXPRESSION, [expression.into(), open, arguments, close])
            }
            OPEN_BRACE => {
                let [open, indices, close] = arguments(p, CLOSE_BRACE);
                node(CELL_ARRAY_ELEMENT_ACCESS_EXPRESSION, [expression.into(), open, indices, close])
            }
            DOT => member_access(p, expression),
            APOSTROPHE | DOT_APOSTROPHE => {
                node(UNARY_POSTFIX_OPERATION_EXPRESSION, [expression.into(), p.advance().into()])
            }
            AT if !p.previous_has_trailing_trivia()
                && matches!(
                    expression.kind(),
                    IDENTIFIER_NAME_EXPRESSION | MEMBER_ACCESS_EXPRESSION
                ) =>
            {
                base_class_invocation(p, expression)
            }
            _ => break,
        };
    }

    expression
}

fn term(p: &mut Parser<'_>) -> GreenNode {
    match p.peek_kind() {
        NUMBER_LITERAL => node(NUMBER_LITERAL_EXPRESSION, [p.advance().into()]),
        STRING_LITERAL => node(STRING_LITERAL_EXPRESSION, [p.advance().into()]),
        DOUBLE_QUOTED_STRING_LITERAL => {
            node(DOUBLE_QUOTED_STRING_LITERAL_EXPRESSION, [p.advance().into()])
        }
        UNQUOTED_STRING_LITERAL => node(UNQUOTED_STRING_LITERAL_EXPRESSION, [p.advance().into()]),
        IDENTIFIER => node(IDENTIFIER_NAME_EXPRESSION, [p.advance().into()]),
        OPEN_SQUARE_BRACKET => matrix(p, ARRAY_LITERAL_EXPRESSION, CLOSE_SQUARE_BRACKET),
        OPEN_BRACE => matrix(p, CELL_ARRAY_LITERAL_EXPRESSION, CLOSE_BRACE),
        OPEN_PARENTHESIS => {
            let open = p.advance();
            let inner = p.with_inside_brackets(false, expression);
            let close = p.expect(CLOSE_PARENTHESIS);
            node(PARENTHESIZED_EXPRESSION, [open.into(), inner.into(), close.into()])
        }
        AT => function_handle(p),
        _ => missing_operand(p),
    }
}

fn missing_operand(p: &mut Parser<'_>) -> GreenNode {
    node(IDENTIFIER_NAME_EXPRESSION, [p.missing(IDENTIFIER).into()])
}

fn empty() -> GreenNode {
    GreenNode::new(EMPTY_EXPRESSION, std::iter::empty())
}

/// `[...]` or `{...}`. Elements are separated by commas, semicolons, line
/// breaks or plain whitespace.
fn matrix(p: &mut Parser<'_>, kind: SyntaxKind, close: SyntaxKind) -> GreenNode {
    let open = p.advance();

    let elements = p.with_inside_brackets(true, |p| {
        let mut elements: Vec<GreenElement> = Vec::new();
        while !p.at(close) && !p.at(EOF) {
            if matches!(p.peek_kind(), COMMA | SEMICOLON) {
                elements.push(p.advance().into());
            } else if p.at_set(EXPRESSION_FIRST) {
                let start = p.position();
                elements.push(expression(p).into());
                if p.position() == start {
                    elements.push(p.error_node(close).into());
                }
            } else {
                elements.push(p.error_node(close).into());
            }
        }
        GreenNode::list(elements)
    });

    let close = p.expect(close);
    node(kind, [open.into(), elements.into(), close.into()])
}

/// A parenthesized or braced argument list: open bracket, `LIST` of
/// comma-separated expressions, close bracket.
pub(crate) fn arguments(p: &mut Parser<'_>, close: SyntaxKind) -> [GreenElement; 3] {
    let open = p.advance();

    let arguments = p.with_inside_brackets(false, |p| {
        let mut elements: Vec<GreenElement> = Vec::new();
        while !p.at(close) && !p.at(EOF) {
            if p.at(COMMA) {
                elements.push(p.advance().into());
            } else if p.at_set(EXPRESSION_FIRST) {
                if elements.last().is_some_and(|last| last.kind() != COMMA) {
                    elements.push(p.missing(COMMA).into());
                }
                let start = p.position();
                elements.push(expression(p).into());
                if p.position() == start {
                    elements.push(p.error_node(close).into());
                }
            } else {
                elements.push(p.error_node(close).into());
            }
        }
        GreenNode::list(elements)
    });

    let close = p.expect(close);
    [open.into(), arguments.into(), close.into()]
}

fn member_access(p: &mut Parser<'_>, expression: GreenNode) -> GreenNode {
    let dot = p.advance();

    if p.at(OPEN_PARENTHESIS) {
        let open = p.advance();
        let member = p.with_inside_brackets(false, self::expression);
        let close = p.expect(CLOSE_PARENTHESIS);
        return node(INDIRECT_MEMBER_ACCESS_EXPRESSION, [
            expression.into(),
            dot.into(),
            open.into(),
            member.into(),
            close.into(),
        ]);
    }

    let name = p.expect(IDENTIFIER);
    node(MEMBER_ACCESS_EXPRESSION, [expression.into(), dot.into(), name.into()])
}

/// `method@BaseClass`, optionally with a dotted base class name. Arguments
/// that follow are parsed as a call on the whole invocation.
fn base_class_invocation(p: &mut Parser<'_>, method: GreenNode) -> GreenNode {
    let at = p.advance();

    let mut base_class = node(IDENTIFIER_NAME_EXPRESSION, [p.expect(IDENTIFIER).into()]);
    while p.at(DOT) && p.nth_kind(1) == IDENTIFIER && !p.previous_has_trailing_trivia() {
        let dot = p.advance();
        let name = p.advance();
        base_class = node(MEMBER_ACCESS_EXPRESSION, [base_class.into(), dot.into(), name.into()]);
    }

    node(BASE_CLASS_INVOKATION_EXPRESSION, [method.into(), at.into(), base_class.into()])
}

fn function_handle(p: &mut Parser<'_>) -> GreenNode {
    let at = p.advance();

    if p.at(OPEN_PARENTHESIS) {
        let parameters = functions::input_description(p);
        let body = expression(p);
        return node(LAMBDA_EXPRESSION, [at.into(), parameters.into(), body.into()]);
    }

    let name = functions::compound_name(p);
    node(NAMED_FUNCTION_HANDLE_EXPRESSION, [at.into(), name.into()])
}

fn command(p: &mut Parser<'_>, name: GreenNode) -> GreenNode {
    let mut arguments: Vec<GreenElement> = Vec::new();
    while let Some(word) = p.eat(UNQUOTED_STRING_LITERAL) {
        arguments.push(word.into());
    }
    node(COMMAND_EXPRESSION, [name.into(), GreenNode::list(arguments).into()])
}

#[cfg(test)]
mod tests {
    use super::Precedence;

    #[test]
    fn precedence_order() {
        assert!(Precedence::Assignment < Precedence::LogicalOr);
        assert!(Precedence::Colon < Precedence::Additive);
        assert!(Precedence::Unary < Precedence::WeirdPower);
        assert!(Precedence::WeirdPower < Precedence::Power);
    }
}
