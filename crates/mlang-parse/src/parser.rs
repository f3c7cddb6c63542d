use mlang_errors::DiagnosticBag;
use mlang_lexer::LexedToken;
use mlang_yellow::SyntaxKind::{self, *};
use mlang_yellow::{Diagnostic, DiagnosticKind, GreenNode, GreenToken, SyntaxSet};
use text_size::TextRange;

use crate::ParseOptions;

/// Keywords that close the statement list they appear in.
const TERMINATORS: [&str; 6] = ["case", "catch", "else", "elseif", "end", "otherwise"];

pub(crate) struct Parser<'t> {
    tokens: &'t [LexedToken],
    pos: usize,
    diagnostics: DiagnosticBag,
    inside_brackets: bool,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(tokens: &'t [LexedToken], options: ParseOptions) -> Self {
        debug_assert!(tokens.last().is_some_and(|token| token.kind() == EOF));
        Self { tokens, pos: 0, diagnostics: DiagnosticBag::new(), inside_brackets: options.inside_brackets }
    }

    /// Index of the current token. List loops compare it to tell whether an
    /// element consumed anything.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn peek(&self) -> &'t LexedToken {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.peek().kind()
    }

    pub(crate) fn nth_kind(&self, n: usize) -> SyntaxKind {
        self.tokens.get(self.pos + n).map_or(EOF, LexedToken::kind)
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn at_set(&self, set: SyntaxSet) -> bool {
        set.contains(self.peek_kind())
    }

    pub(crate) fn at_keyword(&self, keyword: &str) -> bool {
        self.at(IDENTIFIER) && self.peek().token.text_trimmed() == keyword
    }

    /// At a keyword that ends the enclosing statement list.
    pub(crate) fn at_terminator(&self) -> bool {
        self.at(IDENTIFIER) && TERMINATORS.contains(&self.peek().token.text_trimmed())
    }

    pub(crate) fn advance(&mut self) -> GreenToken {
        let token = self.peek().token.clone();
        if token.kind() != EOF {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> Option<GreenToken> {
        self.at(kind).then(|| self.advance())
    }

    pub(crate) fn eat_keyword(&mut self, keyword: &str) -> Option<GreenToken> {
        self.at_keyword(keyword).then(|| self.advance())
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> GreenToken {
        match self.eat(kind) {
            Some(token) => token,
            None => self.missing(kind),
        }
    }

    pub(crate) fn expect_keyword(&mut self, keyword: &str) -> GreenToken {
        match self.eat_keyword(keyword) {
            Some(token) => token,
            None => self.missing(IDENTIFIER),
        }
    }

    /// Synthesizes a zero-width token of `kind` in front of the current one.
    pub(crate) fn missing(&mut self, kind: SyntaxKind) -> GreenToken {
        let at = self.peek().start();
        tracing::trace!(?kind, offset = u32::from(at), "missing token");
        self.diagnostics.missing_token(kind, at);
        GreenToken::missing(kind)
            .with_diagnostics([Diagnostic::new(DiagnosticKind::MissingToken(kind), TextRange::default())])
    }

    /// Wraps the current token in an `ERROR` node.
    pub(crate) fn error_node(&mut self, expected: SyntaxKind) -> GreenNode {
        let current = self.peek();
        let actual = current.kind();
        self.diagnostics.unexpected_token(expected, actual, current.range());

        let relative = current.range() - current.full_start();
        let token = self.advance();
        GreenNode::new(ERROR, [Some(token.into())])
            .with_diagnostics([Diagnostic::new(DiagnosticKind::UnexpectedToken { expected, actual }, relative)])
    }

    /// An optional `;` or `,` closing a statement head on the same line.
    pub(crate) fn eat_separator(&mut self) -> Option<GreenToken> {
        if self.previous_ends_line() || !matches!(self.peek_kind(), SEMICOLON | COMMA) {
            return None;
        }
        Some(self.advance())
    }

    pub(crate) fn previous_ends_line(&self) -> bool {
        self.pos > 0 && self.tokens[self.pos - 1].token.ends_line()
    }

    pub(crate) fn previous_has_trailing_trivia(&self) -> bool {
        self.pos > 0 && !self.tokens[self.pos - 1].token.trailing().is_empty()
    }

    pub(crate) fn inside_brackets(&self) -> bool {
        self.inside_brackets
    }

    /// Runs `f` with the bracket flag set to `inside`, restoring it after.
    pub(crate) fn with_inside_brackets<R>(&mut self, inside: bool, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = std::mem::replace(&mut self.inside_brackets, inside);
        let result = f(self);
        self.inside_brackets = saved;
        result
    }

    pub(crate) fn finish(self) -> DiagnosticBag {
        self.diagnostics
    }
}
