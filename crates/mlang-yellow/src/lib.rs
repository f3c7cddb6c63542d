//! Lossless syntax tree for the language.
//!
//! The green layer is immutable and position-free; the red layer wraps it
//! lazily with parent links and absolute offsets. Concatenating the full
//! text of every token in a tree reproduces the parsed source exactly.

/// Typed AST wrappers and the kind-dispatched visitor.
pub mod ast;
mod diagnostic;
mod green;
mod node_or_token;
mod preorder;
mod red;
mod syntax_kind;
mod syntax_set;
mod syntax_tree;
mod trivia;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use green::{GreenElement, GreenNode, GreenToken, GreenTrivia, TokenValue};
pub use node_or_token::NodeOrToken;
pub use preorder::{PreorderWithTokens, WalkEvent};
pub use red::{RedElement, RedNode, RedToken, SyntaxTrivia};
pub use syntax_kind::{SyntaxKind, is_keyword};
pub use syntax_set::SyntaxSet;
pub use syntax_tree::SyntaxTree;
pub use text_size::{TextRange, TextSize};
pub use trivia::{TriviaPiece, TriviaPieceKind};
