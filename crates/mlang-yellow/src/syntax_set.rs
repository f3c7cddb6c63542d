use crate::SyntaxKind;

const WORDS: usize = 2;

/// A fixed-size bitset of kinds, usable in `const` position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyntaxSet {
    words: [u64; WORDS],
}

impl SyntaxSet {
    pub const EMPTY: Self = Self { words: [0; WORDS] };

    const fn locate(kind: SyntaxKind) -> (usize, u64) {
        let index = kind as u16 as usize;
        debug_assert!(index < WORDS * 64, "SyntaxSet is too small for every SyntaxKind");
        (index / 64, 1 << (index % 64))
    }

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut set = Self::EMPTY;
        let mut i = 0;
        while i < N {
            set = set.with(kinds[i]);
            i += 1;
        }
        set
    }

    pub const fn with(mut self, kind: SyntaxKind) -> Self {
        let (word, mask) = Self::locate(kind);
        self.words[word] |= mask;
        self
    }

    pub const fn union(mut self, other: Self) -> Self {
        let mut i = 0;
        while i < WORDS {
            self.words[i] |= other.words[i];
            i += 1;
        }
        self
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let (word, mask) = Self::locate(kind);
        self.words[word] & mask != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;

    #[test]
    fn membership() {
        const OPENERS: SyntaxSet =
            SyntaxSet::new([OPEN_PARENTHESIS, OPEN_SQUARE_BRACKET, OPEN_BRACE]);

        assert!(OPENERS.contains(OPEN_BRACE));
        assert!(!OPENERS.contains(CLOSE_BRACE));
        assert!(OPENERS.with(COMPOUND_NAME).contains(COMPOUND_NAME));
        assert!(SyntaxSet::new([EOF]).union(OPENERS).contains(EOF));
        assert!(!SyntaxSet::EMPTY.contains(EOF));
    }
}
