//! Positioned views over the green tree.
//!
//! A red node pairs a green node with its parent and absolute offset. Child
//! nodes are materialized on first access; each node keeps weak references
//! to the children it handed out, so visiting a slot again returns the same
//! instance for as long as somebody holds it.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use text_size::{TextRange, TextSize};

use crate::{
    Diagnostic, GreenNode, GreenToken, NodeOrToken, SyntaxKind, TokenValue, TriviaPiece,
};

pub type RedElement = NodeOrToken<RedNode, RedToken>;

impl RedElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn full_span(&self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.full_span(),
            NodeOrToken::Token(token) => token.full_span(),
        }
    }

    pub fn span(&self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.span(),
            NodeOrToken::Token(token) => token.span(),
        }
    }
}

/// A green node at a position in the tree.
///
/// A node memoizes the children it handed out through weak references:
/// while a child is alive, every access to its slot returns that instance.
/// Once all handles to a child are dropped the slot is rebuilt on the next
/// access, as an equal node with a new identity. Children keep their parent
/// alive, so holding any node keeps the path to the root alive.
#[derive(Clone)]
pub struct RedNode(Arc<RedNodeData>);

struct RedNodeData {
    green: GreenNode,
    parent: Option<RedNode>,
    index: usize,
    offset: TextSize,
    children: Mutex<Box<[Weak<RedNodeData>]>>,
}

impl RedNode {
    pub fn new_root(green: GreenNode) -> Self {
        Self::new(green, None, 0, TextSize::new(0))
    }

    fn new(green: GreenNode, parent: Option<Self>, index: usize, offset: TextSize) -> Self {
        let children = green.slots().iter().map(|_| Weak::new()).collect();
        Self(Arc::new(RedNodeData { green, parent, index, offset, children: Mutex::new(children) }))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.green.kind()
    }

    pub fn green(&self) -> &GreenNode {
        &self.0.green
    }

    pub fn parent(&self) -> Option<&Self> {
        self.0.parent.as_ref()
    }

    pub fn ancestors(&self) -> impl Iterator<Item = Self> + use<> {
        std::iter::successors(Some(self.clone()), |node| node.parent().cloned())
    }

    /// Slot index of this node inside its parent.
    pub fn index(&self) -> usize {
        self.0.index
    }

    /// Absolute offset of the first byte, leading trivia included.
    pub fn offset(&self) -> TextSize {
        self.0.offset
    }

    pub fn full_span(&self) -> TextRange {
        TextRange::at(self.offset(), self.green().width())
    }

    /// The range without the leading trivia of the first token and the
    /// trailing trivia of the last one.
    pub fn span(&self) -> TextRange {
        let full = self.full_span();
        let start = full.start() + self.green().leading_trivia_width();
        let end = full.end() - self.green().trailing_trivia_width();
        TextRange::new(start, end.max(start))
    }

    pub fn full_text(&self) -> String {
        self.green().full_text()
    }

    pub fn text(&self) -> String {
        let full = self.full_text();
        let range = self.span() - self.offset();
        full[range].to_owned()
    }

    pub fn slot_count(&self) -> usize {
        self.green().slots().len()
    }

    pub fn slot(&self, index: usize) -> Option<RedElement> {
        let green = self.green().slot(index)?;
        let offset = self.offset() + self.green().slot_offset(index);

        Some(match green {
            NodeOrToken::Node(node) => NodeOrToken::Node(self.child_node(index, node, offset)),
            NodeOrToken::Token(token) => {
                NodeOrToken::Token(RedToken::new(token.clone(), self.clone(), index, offset))
            }
        })
    }

    fn child_node(&self, index: usize, green: &GreenNode, offset: TextSize) -> Self {
        let mut children = self.0.children.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = children[index].upgrade() {
            return Self(existing);
        }

        let child = Self::new(green.clone(), Some(self.clone()), index, offset);
        children[index] = Arc::downgrade(&child.0);
        child
    }

    /// Direct children in source order; absent slots are skipped.
    pub fn children_with_tokens(&self) -> impl Iterator<Item = RedElement> + use<> {
        let node = self.clone();
        (0..self.slot_count()).filter_map(move |index| node.slot(index))
    }

    pub fn children(&self) -> impl Iterator<Item = Self> + use<> {
        self.children_with_tokens().filter_map(RedElement::into_node)
    }

    pub fn tokens(&self) -> impl Iterator<Item = RedToken> + use<> {
        self.children_with_tokens().filter_map(RedElement::into_token)
    }

    pub fn first_child(&self) -> Option<Self> {
        self.children().next()
    }

    pub fn preorder_with_tokens(&self) -> crate::PreorderWithTokens {
        crate::PreorderWithTokens::new(self.clone())
    }

    pub fn descendants(&self) -> impl Iterator<Item = Self> + use<> {
        self.preorder_with_tokens().filter_map(|event| match event {
            crate::WalkEvent::Enter(NodeOrToken::Node(node)) => Some(node),
            _ => None,
        })
    }

    pub fn descendant_tokens(&self) -> impl Iterator<Item = RedToken> + use<> {
        self.preorder_with_tokens().filter_map(|event| match event {
            crate::WalkEvent::Enter(NodeOrToken::Token(token)) => Some(token),
            _ => None,
        })
    }

    /// Diagnostics attached to this node, with absolute ranges.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.green().diagnostics().iter().map(|d| d.shifted(self.offset())).collect()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for RedNode {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for RedNode {}

impl fmt::Debug for RedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.full_span())
    }
}

/// A token at a position in the tree. Tokens are cheap values; only nodes
/// are memoized.
#[derive(Clone)]
pub struct RedToken {
    green: GreenToken,
    parent: RedNode,
    index: usize,
    offset: TextSize,
}

impl RedToken {
    fn new(green: GreenToken, parent: RedNode, index: usize, offset: TextSize) -> Self {
        Self { green, parent, index, offset }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    pub fn green(&self) -> &GreenToken {
        &self.green
    }

    pub fn parent(&self) -> &RedNode {
        &self.parent
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn offset(&self) -> TextSize {
        self.offset
    }

    pub fn full_span(&self) -> TextRange {
        TextRange::at(self.offset, self.green.width())
    }

    pub fn span(&self) -> TextRange {
        let start = self.offset + self.green.leading().len();
        let end = self.offset + self.green.width() - self.green.trailing().len();
        TextRange::new(start, end)
    }

    /// Token text without trivia.
    pub fn text(&self) -> &str {
        self.green.text_trimmed()
    }

    pub fn full_text(&self) -> &str {
        self.green.text()
    }

    pub fn value(&self) -> Option<&TokenValue> {
        self.green.value()
    }

    pub fn is_missing(&self) -> bool {
        self.green.is_missing()
    }

    pub fn leading_trivia(&self) -> impl Iterator<Item = SyntaxTrivia<'_>> {
        SyntaxTrivia::split(self.green.leading().pieces(), self.green.text(), self.offset)
    }

    pub fn trailing_trivia(&self) -> impl Iterator<Item = SyntaxTrivia<'_>> {
        let start = self.green.width() - self.green.trailing().len();
        let text = &self.green.text()[usize::from(start)..];
        SyntaxTrivia::split(self.green.trailing().pieces(), text, self.offset + start)
    }

    /// Diagnostics attached to this token, with absolute ranges.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.green.diagnostics().iter().map(|d| d.shifted(self.offset)).collect()
    }
}

impl PartialEq for RedToken {
    fn eq(&self, other: &Self) -> bool {
        self.parent == other.parent && self.index == other.index
    }
}

impl Eq for RedToken {}

impl fmt::Debug for RedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.full_span(), self.full_text())
    }
}

/// One trivia piece with its text and absolute range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxTrivia<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub range: TextRange,
}

impl<'a> SyntaxTrivia<'a> {
    fn split(
        pieces: &'a [TriviaPiece],
        text: &'a str,
        offset: TextSize,
    ) -> impl Iterator<Item = Self> + 'a {
        let mut start = TextSize::new(0);
        pieces.iter().map(move |piece| {
            let range = TextRange::at(start, piece.len);
            start += piece.len;
            Self { kind: piece.kind.syntax_kind(), text: &text[range], range: range + offset }
        })
    }
}
