use std::fmt;

use crate::SymbolKind;

const _: () = assert!(SymbolKind::ALL.len() <= u32::BITS as usize);

/// Set of [`SymbolKind`]s, one bit per kind.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct SymbolSet(u32);

impl SymbolSet {
    pub const EMPTY: Self = Self(0);

    const fn bit(kind: SymbolKind) -> u32 {
        1 << kind as u32
    }

    pub const fn new<const N: usize>(kinds: [SymbolKind; N]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < N {
            bits |= Self::bit(kinds[i]);
            i += 1;
        }
        Self(bits)
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, kind: SymbolKind) -> bool {
        self.0 & Self::bit(kind) != 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = SymbolKind> {
        SymbolKind::ALL.into_iter().filter(move |&kind| self.contains(kind))
    }
}

impl fmt::Debug for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
