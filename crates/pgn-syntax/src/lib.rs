//! Lossless syntax tree for PGN text.
//!
//! The tree has two layers. Green nodes are immutable, know only their
//! length, and are shared freely between trees and threads. Red nodes are
//! short-lived views created while walking down from a root, and add
//! absolute positions and parent links.

mod builder;
mod debug_tree;
mod diagnostics;
mod error;
mod green;
mod red;
mod span_list;
mod symbol_kind;
mod symbol_set;
mod visitor;


/// Groups background terminals into trivia while text is tokenized.
pub use builder::TriviaBuilder;
/// Walks a red tree and gathers source-text defects.
pub use diagnostics::DiagnosticCollector;
pub use error::GreenError;
/// Position-independent nodes.
pub use green::{
    GreenBackground, GreenBracketClose, GreenBracketOpen, GreenComment, GreenComposite,
    GreenDocument, GreenEmptyNag, GreenEscape, GreenGameTermination, GreenIllegalCharacter,
    GreenItem, GreenMove, GreenMoveNumber, GreenNag, GreenNode, GreenOrphanParenthesisClose,
    GreenOverflowNag, GreenPeriod, GreenPly, GreenSymbol, GreenTagElementWithTrivia, GreenTagName,
    GreenTagPair, GreenTagValue, GreenTrivia, GreenTriviaElement, GreenUnterminatedComment,
    GreenWhitespace, GreenWithTrivia, NodeKind, Symbol, TerminalAt, TerminalRef,
};
pub use pgn_errors::{Diagnostic, DiagnosticCode};
/// Positioned views over green nodes.
pub use red::{RedItem, RedNode, RedParent, RedTerminal, Walk, WalkEvent};
pub use span_list::SpanList;
pub use symbol_kind::SymbolKind;
/// Compact set for grouping `SymbolKind` values.
pub use symbol_set::SymbolSet;
/// Double dispatch over terminal kinds.
pub use visitor::{
    BackgroundArgVisitor, BackgroundResultVisitor, BackgroundVisitor, SymbolArgVisitor,
    SymbolResultVisitor, SymbolVisitor,
};
