//! Diagnostic collection, fatal parse failures and terminal rendering.

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use mlang_yellow::{Diagnostic, DiagnosticKind};
use mlang_yellow::SyntaxKind;
use text_size::{TextRange, TextSize};

/// Append-only, ordered collection of diagnostics.
///
/// Every factory returns the diagnostic it recorded so callers can also
/// attach it to the tree element it concerns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn extend(&mut self, other: Self) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> Diagnostic {
        let diagnostic = Diagnostic::new(kind, range);
        self.diagnostics.push(diagnostic.clone());
        diagnostic
    }

    pub fn unexpected_end_of_file(&mut self, range: TextRange) -> Diagnostic {
        self.report(DiagnosticKind::UnexpectedEndOfFile, range)
    }

    pub fn unexpected_character_in_number(&mut self, c: char, range: TextRange) -> Diagnostic {
        self.report(DiagnosticKind::UnexpectedCharacterInNumber(c), range)
    }

    pub fn unterminated_string_literal(&mut self, range: TextRange) -> Diagnostic {
        self.report(DiagnosticKind::UnterminatedStringLiteral, range)
    }

    pub fn unknown_symbol(&mut self, c: char, range: TextRange) -> Diagnostic {
        self.report(DiagnosticKind::UnknownSymbol(c), range)
    }

    pub fn unexpected_token(
        &mut self,
        expected: SyntaxKind,
        actual: SyntaxKind,
        range: TextRange,
    ) -> Diagnostic {
        self.report(DiagnosticKind::UnexpectedToken { expected, actual }, range)
    }

    pub fn missing_token(&mut self, kind: SyntaxKind, at: TextSize) -> Diagnostic {
        self.report(DiagnosticKind::MissingToken(kind), TextRange::empty(at))
    }
}

impl<'a> IntoIterator for &'a DiagnosticBag {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An error the parser cannot recover from. No tree is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parse failed at {diagnostic}")]
pub struct ParseFailure {
    diagnostic: Diagnostic,
}

impl ParseFailure {
    pub fn new(diagnostic: Diagnostic) -> Self {
        Self { diagnostic }
    }

    pub fn unmatched_closing_bracket(kind: SyntaxKind, range: TextRange) -> Self {
        Self::new(Diagnostic::new(DiagnosticKind::UnmatchedClosingBracket(kind), range))
    }

    pub fn unmatched_opening_bracket(kind: SyntaxKind, range: TextRange) -> Self {
        Self::new(Diagnostic::new(DiagnosticKind::UnmatchedOpeningBracket(kind), range))
    }

    pub fn unexpected_class_member(text: &str, range: TextRange) -> Self {
        Self::new(Diagnostic::new(DiagnosticKind::UnexpectedClassMember(text.into()), range))
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }
}

/// Renders a diagnostic as an annotated source snippet.
pub trait RenderDiagnostic {
    fn render(&self, renderer: &Renderer, path: &str, text: &str) -> String;
}

impl RenderDiagnostic for Diagnostic {
    fn render(&self, renderer: &Renderer, path: &str, text: &str) -> String {
        let title = self.message();
        let message = Level::Error.title(&title).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(Level::Error.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message).to_string()
    }
}

impl RenderDiagnostic for ParseFailure {
    fn render(&self, renderer: &Renderer, path: &str, text: &str) -> String {
        self.diagnostic.render(renderer, path, text)
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;

    #[test]
    fn bag_preserves_order() {
        let mut bag = DiagnosticBag::new();
        bag.unknown_symbol('$', TextRange::at(3.into(), 1.into()));
        let missing = bag.missing_token(SyntaxKind::IDENTIFIER, 1.into());

        assert_eq!(missing.range, TextRange::empty(1.into()));
        let kinds: Vec<_> = bag.iter().map(|d| d.kind.clone()).collect();
        assert_eq!(
            kinds,
            [DiagnosticKind::UnknownSymbol('$'), DiagnosticKind::MissingToken(SyntaxKind::IDENTIFIER)]
        );
    }

    #[test]
    fn failure_message() {
        let failure = ParseFailure::unmatched_closing_bracket(
            SyntaxKind::CLOSE_PARENTHESIS,
            TextRange::at(4.into(), 1.into()),
        );
        expect!["parse failed at 4..5: unmatched closing bracket CLOSE_PARENTHESIS"]
            .assert_eq(&failure.to_string());
    }

    #[test]
    fn render_plain() {
        let text = "x = 1 $ 2\n";
        let diagnostic =
            Diagnostic::new(DiagnosticKind::UnknownSymbol('$'), TextRange::at(6.into(), 1.into()));
        let rendered = diagnostic.render(&Renderer::plain(), "script.m", text);

        assert!(rendered.starts_with("error: unknown symbol '$'"), "{rendered}");
        assert!(rendered.contains("script.m"), "{rendered}");
    }
}
