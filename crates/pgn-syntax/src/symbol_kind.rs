use crate::SymbolSet;

/// Tag of every terminal in the tree.
///
/// The set is closed: every visitor family has one method per variant.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u8)]
pub enum SymbolKind {
    Whitespace,
    Comment,
    UnterminatedComment,
    Escape,
    IllegalCharacter,

    BracketOpen,
    BracketClose,
    TagName,
    TagValue,

    MoveNumber,
    Period,
    Move,
    Nag,
    EmptyNag,
    OverflowNag,
    OrphanParenthesisClose,
    GameTermination,
}

impl SymbolKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 17] = [
        Self::Whitespace,
        Self::Comment,
        Self::UnterminatedComment,
        Self::Escape,
        Self::IllegalCharacter,
        Self::BracketOpen,
        Self::BracketClose,
        Self::TagName,
        Self::TagValue,
        Self::MoveNumber,
        Self::Period,
        Self::Move,
        Self::Nag,
        Self::EmptyNag,
        Self::OverflowNag,
        Self::OrphanParenthesisClose,
        Self::GameTermination,
    ];

    /// Kinds that are insignificant to move semantics.
    pub const BACKGROUND: SymbolSet = SymbolSet::new([
        Self::Whitespace,
        Self::Comment,
        Self::UnterminatedComment,
        Self::Escape,
        Self::IllegalCharacter,
    ]);

    pub const TAG_ELEMENTS: SymbolSet =
        SymbolSet::new([Self::BracketOpen, Self::BracketClose, Self::TagName, Self::TagValue]);

    pub const NAGS: SymbolSet = SymbolSet::new([Self::Nag, Self::EmptyNag, Self::OverflowNag]);

    /// Kinds whose mere presence is a defect in the source text.
    pub const ERRORS: SymbolSet = SymbolSet::new([
        Self::UnterminatedComment,
        Self::IllegalCharacter,
        Self::EmptyNag,
        Self::OverflowNag,
        Self::OrphanParenthesisClose,
    ]);

    pub const fn is_background(self) -> bool {
        Self::BACKGROUND.contains(self)
    }

    pub const fn is_tag_element(self) -> bool {
        Self::TAG_ELEMENTS.contains(self)
    }

    pub const fn is_nag(self) -> bool {
        Self::NAGS.contains(self)
    }

    /// `TagValue` is absent on purpose: only unterminated values are defects.
    pub const fn is_error(self) -> bool {
        Self::ERRORS.contains(self)
    }
}
