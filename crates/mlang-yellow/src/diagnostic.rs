use std::fmt;

use text_size::{TextRange, TextSize};

use crate::SyntaxKind;

/// A recoverable problem found while lexing or parsing.
///
/// Diagnostics compare structurally, so tests can assert on the exact
/// `(range, kind)` pair instead of matching message text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    UnexpectedEndOfFile,
    UnexpectedCharacterInNumber(char),
    UnterminatedStringLiteral,
    UnknownSymbol(char),
    UnexpectedToken { expected: SyntaxKind, actual: SyntaxKind },
    MissingToken(SyntaxKind),
    UnmatchedClosingBracket(SyntaxKind),
    UnmatchedOpeningBracket(SyntaxKind),
    UnexpectedClassMember(Box<str>),
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, range: TextRange) -> Self {
        Self { kind, range }
    }

    pub fn start(&self) -> TextSize {
        self.range.start()
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Moves the range by `offset`, turning an element-relative diagnostic
    /// into an absolute one.
    #[must_use]
    pub fn shifted(&self, offset: TextSize) -> Self {
        Self { kind: self.kind.clone(), range: self.range + offset }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}: {}", u32::from(self.range.start()), u32::from(self.range.end()), self.kind)
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEndOfFile => f.write_str("unexpected end of file"),
            Self::UnexpectedCharacterInNumber(c) => {
                write!(f, "unexpected character {c:?} while parsing number")
            }
            Self::UnterminatedStringLiteral => f.write_str("unterminated string literal"),
            Self::UnknownSymbol(c) => write!(f, "unknown symbol {c:?}"),
            Self::UnexpectedToken { expected, actual } => {
                write!(f, "unexpected token {actual:?}, expected {expected:?}")
            }
            Self::MissingToken(kind) => write!(f, "missing token {kind:?}"),
            Self::UnmatchedClosingBracket(kind) => {
                write!(f, "unmatched closing bracket {kind:?}")
            }
            Self::UnmatchedOpeningBracket(kind) => {
                write!(f, "unmatched opening bracket {kind:?} at end of file")
            }
            Self::UnexpectedClassMember(text) => {
                write!(f, "unexpected {text:?} in class body")
            }
        }
    }
}
