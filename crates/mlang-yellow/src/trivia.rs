//! Trivia pieces attached to tokens.

use text_size::TextSize;

use crate::SyntaxKind;

/// Kinds of trivia stored alongside tokens.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TriviaPieceKind {
    Whitespace,
    /// `\n` or `\r\n`.
    Newline,
    /// `%` up to the end of the line.
    Comment,
    /// A `%{` ... `%}` block.
    MultilineComment,
    /// `...`, the rest of its line and the line break that follows.
    LineContinuation,
}

impl TriviaPieceKind {
    pub fn syntax_kind(self) -> SyntaxKind {
        match self {
            Self::Whitespace => SyntaxKind::WHITESPACE,
            Self::Newline => SyntaxKind::NEWLINE,
            Self::Comment => SyntaxKind::COMMENT,
            Self::MultilineComment => SyntaxKind::MULTILINE_COMMENT,
            Self::LineContinuation => SyntaxKind::LINE_CONTINUATION,
        }
    }
}

/// A trivia fragment with its kind and length.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TriviaPiece {
    pub kind: TriviaPieceKind,
    pub len: TextSize,
}

impl TriviaPiece {
    /// Creates a new trivia piece with the given kind and length.
    pub fn new(kind: TriviaPieceKind, len: TextSize) -> Self {
        Self { kind, len }
    }
}
