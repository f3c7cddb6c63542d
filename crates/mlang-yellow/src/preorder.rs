use crate::{NodeOrToken, RedElement, RedNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEvent<T> {
    Enter(T),
    Leave(T),
}

/// Depth-first traversal over nodes and tokens. Every element is entered
/// and left exactly once; absent slots are skipped.
pub struct PreorderWithTokens {
    stack: Vec<(RedNode, usize)>,
    next: Option<WalkEvent<RedElement>>,
}

impl PreorderWithTokens {
    pub fn new(start: RedNode) -> Self {
        Self { stack: Vec::new(), next: Some(WalkEvent::Enter(NodeOrToken::Node(start))) }
    }

    /// Skips the remaining children of the most recently entered node.
    pub fn skip_subtree(&mut self) {
        if let Some((node, cursor)) = self.stack.last_mut() {
            *cursor = node.slot_count();
        }
    }

    fn advance(&mut self) -> Option<WalkEvent<RedElement>> {
        let (node, cursor) = self.stack.last_mut()?;

        while *cursor < node.slot_count() {
            let index = *cursor;
            *cursor += 1;
            if let Some(child) = node.slot(index) {
                return Some(WalkEvent::Enter(child));
            }
        }

        let (node, _) = self.stack.pop()?;
        Some(WalkEvent::Leave(NodeOrToken::Node(node)))
    }
}

impl Iterator for PreorderWithTokens {
    type Item = WalkEvent<RedElement>;

    fn next(&mut self) -> Option<Self::Item> {
        let event = match self.next.take() {
            Some(event) => event,
            None => self.advance()?,
        };

        match &event {
            WalkEvent::Enter(NodeOrToken::Node(node)) => self.stack.push((node.clone(), 0)),
            WalkEvent::Enter(NodeOrToken::Token(token)) => {
                self.next = Some(WalkEvent::Leave(NodeOrToken::Token(token.clone())));
            }
            WalkEvent::Leave(_) => {}
        }

        Some(event)
    }
}
