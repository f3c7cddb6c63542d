//! Immutable, position-free syntax elements.
//!
//! Green elements know their kind, their children and their width but not
//! where they sit in the source, so a subtree can be shared between trees.

use std::fmt;

use text_size::{TextLen as _, TextSize};
use triomphe::{Arc, ThinArc};

use crate::{Diagnostic, NodeOrToken, SyntaxKind, TriviaPiece, TriviaPieceKind};

pub type GreenElement = NodeOrToken<GreenNode, GreenToken>;

impl GreenElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn width(&self) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.width(),
            NodeOrToken::Token(token) => token.width(),
        }
    }

    fn write_full_text(&self, buf: &mut String) {
        match self {
            NodeOrToken::Node(node) => node.write_full_text(buf),
            NodeOrToken::Token(token) => buf.push_str(token.text()),
        }
    }

    fn first_token(&self) -> Option<&GreenToken> {
        match self {
            NodeOrToken::Node(node) => node.first_token(),
            NodeOrToken::Token(token) => (token.width() != TextSize::new(0)).then_some(token),
        }
    }

    fn last_token(&self) -> Option<&GreenToken> {
        match self {
            NodeOrToken::Node(node) => node.last_token(),
            NodeOrToken::Token(token) => (token.width() != TextSize::new(0)).then_some(token),
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        Self::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        Self::Token(token)
    }
}

#[derive(Clone, PartialEq)]
pub struct GreenNode(Arc<GreenNodeData>);

#[derive(Clone, PartialEq)]
struct GreenNodeData {
    kind: SyntaxKind,
    width: TextSize,
    slots: Box<[Option<GreenElement>]>,
    diagnostics: Box<[Diagnostic]>,
}

impl GreenNode {
    /// Builds a node with fixed slots; `None` marks an absent optional child.
    pub fn new(kind: SyntaxKind, slots: impl IntoIterator<Item = Option<GreenElement>>) -> Self {
        let slots: Box<[_]> = slots.into_iter().collect();
        let width = slots.iter().flatten().map(GreenElement::width).sum();
        Self(Arc::new(GreenNodeData { kind, width, slots, diagnostics: Box::default() }))
    }

    /// Builds a `LIST` node whose slots are all present.
    pub fn list(elements: impl IntoIterator<Item = GreenElement>) -> Self {
        Self::new(SyntaxKind::LIST, elements.into_iter().map(Some))
    }

    /// Attaches diagnostics whose ranges are relative to the node start.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) -> Self {
        let data = Arc::make_mut(&mut self.0);
        data.diagnostics = data.diagnostics.iter().cloned().chain(diagnostics).collect();
        self
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    pub fn width(&self) -> TextSize {
        self.0.width
    }

    pub fn slots(&self) -> &[Option<GreenElement>] {
        &self.0.slots
    }

    pub fn slot(&self, index: usize) -> Option<&GreenElement> {
        self.0.slots.get(index)?.as_ref()
    }

    /// Children in source order, absent slots skipped.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &GreenElement> {
        self.0.slots.iter().flatten()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.0.diagnostics
    }

    /// Offset of slot `index` relative to the start of this node.
    pub fn slot_offset(&self, index: usize) -> TextSize {
        self.0.slots[..index.min(self.0.slots.len())]
            .iter()
            .flatten()
            .map(GreenElement::width)
            .sum()
    }

    pub fn full_text(&self) -> String {
        let mut buf = String::with_capacity(u32::from(self.width()) as usize);
        self.write_full_text(&mut buf);
        buf
    }

    fn write_full_text(&self, buf: &mut String) {
        for child in self.children() {
            child.write_full_text(buf);
        }
    }

    /// The first token of the subtree that occupies any text.
    pub fn first_token(&self) -> Option<&GreenToken> {
        self.children().find_map(GreenElement::first_token)
    }

    /// The last token of the subtree that occupies any text.
    pub fn last_token(&self) -> Option<&GreenToken> {
        self.children().rev().find_map(GreenElement::last_token)
    }

    pub fn leading_trivia_width(&self) -> TextSize {
        self.first_token().map_or(TextSize::new(0), |token| token.leading().len())
    }

    pub fn trailing_trivia_width(&self) -> TextSize {
        self.last_token().map_or(TextSize::new(0), |token| token.trailing().len())
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.kind(), u32::from(self.width()))
    }
}

/// Parsed value carried by literal tokens.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    Number(f64),
    Imaginary(f64),
    String(Box<str>),
}

#[derive(Clone, PartialEq)]
pub struct GreenToken(Arc<GreenTokenData>);

#[derive(Clone, PartialEq)]
struct GreenTokenData {
    kind: SyntaxKind,
    /// Leading trivia, the token itself and trailing trivia.
    text: Box<str>,
    leading: GreenTrivia,
    trailing: GreenTrivia,
    value: Option<TokenValue>,
    missing: bool,
    diagnostics: Box<[Diagnostic]>,
}

impl GreenToken {
    pub fn new(
        kind: SyntaxKind,
        text: impl Into<Box<str>>,
        leading: GreenTrivia,
        trailing: GreenTrivia,
    ) -> Self {
        let text = text.into();
        debug_assert!(leading.len() + trailing.len() <= text.text_len());
        Self(Arc::new(GreenTokenData {
            kind,
            text,
            leading,
            trailing,
            value: None,
            missing: false,
            diagnostics: Box::default(),
        }))
    }

    /// A zero-width token standing in for one the source lacks.
    pub fn missing(kind: SyntaxKind) -> Self {
        Self(Arc::new(GreenTokenData {
            kind,
            text: Box::default(),
            leading: GreenTrivia::empty(),
            trailing: GreenTrivia::empty(),
            value: None,
            missing: true,
            diagnostics: Box::default(),
        }))
    }

    #[must_use]
    pub fn with_value(mut self, value: TokenValue) -> Self {
        Arc::make_mut(&mut self.0).value = Some(value);
        self
    }

    /// Attaches diagnostics whose ranges are relative to the token start.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) -> Self {
        let data = Arc::make_mut(&mut self.0);
        data.diagnostics = data.diagnostics.iter().cloned().chain(diagnostics).collect();
        self
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    /// Full text, trivia included.
    pub fn text(&self) -> &str {
        &self.0.text
    }

    pub fn text_trimmed(&self) -> &str {
        let start: usize = self.leading().len().into();
        let end: usize = (self.width() - self.trailing().len()).into();
        &self.0.text[start..end]
    }

    pub fn leading(&self) -> &GreenTrivia {
        &self.0.leading
    }

    pub fn trailing(&self) -> &GreenTrivia {
        &self.0.trailing
    }

    pub fn width(&self) -> TextSize {
        self.0.text.text_len()
    }

    pub fn value(&self) -> Option<&TokenValue> {
        self.0.value.as_ref()
    }

    pub fn is_missing(&self) -> bool {
        self.0.missing
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.0.diagnostics
    }

    /// Whether the trailing trivia closes the line this token is on.
    pub fn ends_line(&self) -> bool {
        self.trailing().pieces().last().is_some_and(|piece| piece.kind == TriviaPieceKind::Newline)
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_missing() {
            write!(f, "{:?} (missing)", self.kind())
        } else {
            write!(f, "{:?} {:?}", self.kind(), self.text())
        }
    }
}

#[derive(Clone, Eq, Hash, PartialEq)]
pub struct GreenTrivia {
    ptr: Option<ThinArc<TextSize, TriviaPiece>>,
}

impl fmt::Debug for GreenTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.pieces()).finish()
    }
}

impl GreenTrivia {
    pub fn new(pieces: &[TriviaPiece]) -> Self {
        if pieces.is_empty() {
            return Self::empty();
        }
        let total_len = pieces.iter().map(|piece| piece.len).sum();
        Self { ptr: Some(ThinArc::from_header_and_slice(total_len, pieces)) }
    }

    pub const fn empty() -> Self {
        Self { ptr: None }
    }

    pub fn len(&self) -> TextSize {
        match &self.ptr {
            None => TextSize::new(0),
            Some(ptr) => ptr.header.header,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    pub fn pieces(&self) -> &[TriviaPiece] {
        match &self.ptr {
            None => &[],
            Some(ptr) => &ptr.slice,
        }
    }
}
