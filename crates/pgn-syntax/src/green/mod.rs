//! Immutable, position-independent nodes.
//!
//! Green nodes only know their shape and length. Payload-free terminals are
//! `static` singletons shared by every tree; everything else is reference
//! counted and may be shared freely between trees and threads.

mod document;
mod terminal;
mod trivia;

pub use document::{GreenDocument, GreenItem, GreenPly, GreenTagPair};
use pgn_errors::Diagnostic;
pub use terminal::{
    GreenBackground, GreenBracketClose, GreenBracketOpen, GreenComment, GreenEmptyNag,
    GreenEscape, GreenGameTermination, GreenIllegalCharacter, GreenMove, GreenMoveNumber,
    GreenNag, GreenOrphanParenthesisClose, GreenOverflowNag, GreenPeriod, GreenSymbol,
    GreenTagName, GreenTagValue, GreenUnterminatedComment, GreenWhitespace,
};
use text_size::TextSize;
pub use trivia::{GreenTagElementWithTrivia, GreenTrivia, GreenTriviaElement, GreenWithTrivia};

use crate::SymbolKind;

/// Anything that occupies text.
pub trait GreenNode {
    fn text_len(&self) -> TextSize;
}

/// Capability shared by every terminal.
pub trait Symbol: GreenNode {
    fn kind(&self) -> SymbolKind;

    /// The defect this terminal represents when it starts at `start`.
    fn diagnostic(&self, _start: TextSize) -> Option<Diagnostic> {
        None
    }

    /// All defects this terminal represents when it starts at `start`.
    fn diagnostics(&self, start: TextSize) -> impl Iterator<Item = Diagnostic>
    where
        Self: Sized,
    {
        self.diagnostic(start).into_iter()
    }
}

/// Kinds of green nodes that own children.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NodeKind {
    Document,
    TagPair,
    TagElementWithTrivia,
    Ply,
    WithTrivia,
    Trivia,
    TriviaElement,
}

pub trait GreenComposite: GreenNode {
    const KIND: NodeKind;

    /// Number of child slots, including slots of absent optional children.
    fn child_count(&self) -> usize;

    /// Start of the child slot at `index`, relative to this node.
    fn child_offset(&self, index: usize) -> TextSize;
}

impl<T: GreenNode + ?Sized> GreenNode for &T {
    fn text_len(&self) -> TextSize {
        (**self).text_len()
    }
}

impl<T: GreenNode + ?Sized> GreenNode for triomphe::Arc<T> {
    fn text_len(&self) -> TextSize {
        (**self).text_len()
    }
}

/// A terminal found by offset lookup.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TerminalRef<'a> {
    Background(&'a GreenBackground),
    Symbol(&'a GreenSymbol),
}

impl TerminalRef<'_> {
    pub fn kind(self) -> SymbolKind {
        match self {
            TerminalRef::Background(node) => node.kind(),
            TerminalRef::Symbol(node) => node.kind(),
        }
    }

    pub fn text_len(self) -> TextSize {
        match self {
            TerminalRef::Background(node) => node.text_len(),
            TerminalRef::Symbol(node) => node.text_len(),
        }
    }
}

/// Terminal and its start, both relative to the node that was searched.
pub type TerminalAt<'a> = (TerminalRef<'a>, TextSize);

fn shifted(found: Option<TerminalAt<'_>>, by: TextSize) -> Option<TerminalAt<'_>> {
    found.map(|(terminal, start)| (terminal, start + by))
}
