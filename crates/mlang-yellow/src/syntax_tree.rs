use std::fmt::Write as _;

use crate::ast::{self, AstNode as _};
use crate::{Diagnostic, GreenNode, NodeOrToken, RedNode, WalkEvent};

/// A parsed file: the red root plus every diagnostic reported while lexing
/// and parsing it, ordered by position.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    root: RedNode,
    diagnostics: Vec<Diagnostic>,
    source_name: Option<Box<str>>,
}

impl SyntaxTree {
    pub fn new(green: GreenNode, mut diagnostics: Vec<Diagnostic>, source_name: Option<&str>) -> Self {
        diagnostics.sort_by_key(|diagnostic| diagnostic.range.start());
        Self { root: RedNode::new_root(green), diagnostics, source_name: source_name.map(Into::into) }
    }

    pub fn root(&self) -> &RedNode {
        &self.root
    }

    pub fn file(&self) -> Option<ast::File> {
        ast::File::cast(self.root.clone())
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// The source text, rebuilt from the tree.
    pub fn full_text(&self) -> String {
        self.root.full_text()
    }

    /// An indented dump of every node and token with its full range.
    pub fn debug_dump(&self) -> String {
        let mut buf = String::new();
        let mut depth = 0usize;

        for event in self.root.preorder_with_tokens() {
            match event {
                WalkEvent::Enter(NodeOrToken::Node(node)) => {
                    _ = writeln!(buf, "{:indent$}{node:?}", "", indent = depth * 2);
                    depth += 1;
                }
                WalkEvent::Leave(NodeOrToken::Node(_)) => depth -= 1,
                WalkEvent::Enter(NodeOrToken::Token(token)) => {
                    let range = token.full_span();
                    if token.is_missing() {
                        _ = writeln!(buf, "{:indent$}{:?}@{range:?} missing", "", token.kind(), indent = depth * 2);
                    } else {
                        _ = writeln!(buf, "{:indent$}{token:?}", "", indent = depth * 2);
                    }
                }
                WalkEvent::Leave(NodeOrToken::Token(_)) => {}
            }
        }

        buf
    }
}
