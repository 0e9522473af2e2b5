use crate::SymbolKind;

/// Rejected construction of a green node.
///
/// These are bugs in whoever builds the tree, not defects in the PGN text:
/// source defects are reported as [`pgn_errors::Diagnostic`]s instead.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum GreenError {
    #[error("{kind:?} terminal must cover at least one character")]
    EmptyTerminal { kind: SymbolKind },
    #[error("{text:?} is not an annotation glyph between $0 and $255")]
    InvalidNag { text: String },
    #[error("a ply needs a move number, a move or at least one annotation glyph")]
    EmptyPly,
    #[error("a tag pair needs at least one element")]
    EmptyTagPair,
    #[error("expected {expected}, found {found:?}")]
    UnexpectedContent { expected: &'static str, found: SymbolKind },
}

pub(crate) fn reject<T>(error: GreenError) -> Result<T, GreenError> {
    tracing::debug!(%error, "rejected green node");
    Err(error)
}
