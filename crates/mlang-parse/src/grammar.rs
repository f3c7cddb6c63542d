use mlang_errors::ParseFailure;
use mlang_yellow::SyntaxKind::{self, *};
use mlang_yellow::{GreenElement, GreenNode};

use crate::parser::Parser;

mod classes;
mod exprs;
mod functions;
mod stmts;

pub(crate) fn file(p: &mut Parser<'_>) -> Result<GreenNode, ParseFailure> {
    let statements = stmts::statement_list(p, stmts::Scope::File)?;
    let eof = p.expect(EOF);
    Ok(node(FILE, [statements.into(), eof.into()]))
}

/// A node whose slots are all present.
pub(crate) fn node<const N: usize>(kind: SyntaxKind, children: [GreenElement; N]) -> GreenNode {
    GreenNode::new(kind, children.map(Some))
}

pub(crate) fn node_slots<const N: usize>(
    kind: SyntaxKind,
    slots: [Option<GreenElement>; N],
) -> GreenNode {
    GreenNode::new(kind, slots)
}
