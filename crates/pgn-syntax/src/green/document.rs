//! Move-text and tag composites, and the document root.

use text_size::TextSize;
use triomphe::Arc;

use super::{TerminalAt, shifted};
use crate::error::{GreenError, reject};
use crate::{
    GreenComposite, GreenNode, GreenSymbol, GreenTagElementWithTrivia, GreenTagName,
    GreenTagValue, GreenTrivia, GreenWithTrivia, NodeKind, SpanList, Symbol as _, SymbolKind,
};

/// `[Name "Value"]`, possibly incomplete but never empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GreenTagPair {
    elements: SpanList<GreenTagElementWithTrivia>,
}

impl GreenTagPair {
    pub fn new(
        elements: impl IntoIterator<Item = GreenTagElementWithTrivia>,
    ) -> Result<Self, GreenError> {
        let elements = SpanList::new(elements);
        if elements.is_empty() {
            return reject(GreenError::EmptyTagPair);
        }
        Ok(Self { elements })
    }

    pub fn elements(&self) -> &SpanList<GreenTagElementWithTrivia> {
        &self.elements
    }

    /// First tag name in the pair.
    pub fn tag_name(&self) -> Option<&GreenTagName> {
        self.elements.iter().find_map(|element| match element.content() {
            GreenSymbol::TagName(name) => Some(&**name),
            _ => None,
        })
    }

    /// First tag value in the pair.
    pub fn tag_value(&self) -> Option<&GreenTagValue> {
        self.elements.iter().find_map(|element| match element.content() {
            GreenSymbol::TagValue(value) => Some(&**value),
            _ => None,
        })
    }

    pub fn terminal_at(&self, offset: TextSize) -> Option<TerminalAt<'_>> {
        let (index, relative) = self.elements.find(offset)?;
        shifted(self.elements.get(index)?.terminal_at(relative), self.elements.start(index))
    }
}

impl GreenNode for GreenTagPair {
    fn text_len(&self) -> TextSize {
        self.elements.text_len()
    }
}

impl GreenComposite for GreenTagPair {
    const KIND: NodeKind = NodeKind::TagPair;

    fn child_count(&self) -> usize {
        self.elements.len()
    }

    fn child_offset(&self, index: usize) -> TextSize {
        self.elements.start(index)
    }
}

fn check_content(
    node: Option<&GreenWithTrivia>,
    expected: &'static str,
    accepts: fn(SymbolKind) -> bool,
) -> Result<(), GreenError> {
    match node.map(|node| node.content().kind()) {
        Some(found) if !accepts(found) => {
            reject(GreenError::UnexpectedContent { expected, found })
        }
        _ => Ok(()),
    }
}

/// One half-move: an optional move number, an optional move and any number
/// of annotation glyphs, but never nothing at all.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GreenPly {
    move_number: Option<GreenWithTrivia>,
    ply_move: Option<GreenWithTrivia>,
    nags: SpanList<GreenWithTrivia>,
    text_len: TextSize,
}

impl GreenPly {
    pub(crate) const MOVE_NUMBER_INDEX: usize = 0;
    pub(crate) const MOVE_INDEX: usize = 1;
    pub(crate) const FIRST_NAG_INDEX: usize = 2;

    pub fn new(
        move_number: Option<GreenWithTrivia>,
        ply_move: Option<GreenWithTrivia>,
        nags: impl IntoIterator<Item = GreenWithTrivia>,
    ) -> Result<Self, GreenError> {
        check_content(move_number.as_ref(), "move number", |kind| kind == SymbolKind::MoveNumber)?;
        check_content(ply_move.as_ref(), "move", |kind| kind == SymbolKind::Move)?;
        let nags = SpanList::new(nags);
        for nag in nags.iter() {
            check_content(Some(nag), "annotation glyph", SymbolKind::is_nag)?;
        }

        if move_number.is_none() && ply_move.is_none() && nags.is_empty() {
            return reject(GreenError::EmptyPly);
        }

        let text_len = optional_len(move_number.as_ref())
            + optional_len(ply_move.as_ref())
            + nags.text_len();
        Ok(Self { move_number, ply_move, nags, text_len })
    }

    pub fn move_number(&self) -> Option<&GreenWithTrivia> {
        self.move_number.as_ref()
    }

    pub fn ply_move(&self) -> Option<&GreenWithTrivia> {
        self.ply_move.as_ref()
    }

    pub fn nags(&self) -> &SpanList<GreenWithTrivia> {
        &self.nags
    }

    pub fn terminal_at(&self, offset: TextSize) -> Option<TerminalAt<'_>> {
        let mut start = TextSize::new(0);
        for child in [&self.move_number, &self.ply_move].into_iter().flatten() {
            let len = child.text_len();
            if offset < start + len {
                return shifted(child.terminal_at(offset - start), start);
            }
            start += len;
        }

        let (index, relative) = self.nags.find(offset.checked_sub(start)?)?;
        shifted(self.nags.get(index)?.terminal_at(relative), start + self.nags.start(index))
    }
}

fn optional_len(node: Option<&GreenWithTrivia>) -> TextSize {
    node.map_or(TextSize::new(0), |node| node.text_len())
}

impl GreenNode for GreenPly {
    fn text_len(&self) -> TextSize {
        self.text_len
    }
}

impl GreenComposite for GreenPly {
    const KIND: NodeKind = NodeKind::Ply;

    fn child_count(&self) -> usize {
        Self::FIRST_NAG_INDEX + self.nags.len()
    }

    fn child_offset(&self, index: usize) -> TextSize {
        let move_number_len = optional_len(self.move_number.as_ref());
        match index {
            Self::MOVE_NUMBER_INDEX => TextSize::new(0),
            Self::MOVE_INDEX => move_number_len,
            _ => {
                move_number_len
                    + optional_len(self.ply_move.as_ref())
                    + self.nags.start(index - Self::FIRST_NAG_INDEX)
            }
        }
    }
}

/// A top-level element of the move text or tag section.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GreenItem {
    TagPair(Arc<GreenTagPair>),
    Ply(Arc<GreenPly>),
    /// Periods, orphan parentheses, game termination markers and anything
    /// else the parser leaves outside a ply.
    Element(Arc<GreenWithTrivia>),
}

impl GreenItem {
    pub fn terminal_at(&self, offset: TextSize) -> Option<TerminalAt<'_>> {
        match self {
            Self::TagPair(node) => node.terminal_at(offset),
            Self::Ply(node) => node.terminal_at(offset),
            Self::Element(node) => node.terminal_at(offset),
        }
    }
}

impl GreenNode for GreenItem {
    fn text_len(&self) -> TextSize {
        match self {
            Self::TagPair(node) => node.text_len(),
            Self::Ply(node) => node.text_len(),
            Self::Element(node) => node.text_len(),
        }
    }
}

impl From<GreenTagPair> for GreenItem {
    fn from(node: GreenTagPair) -> Self {
        Self::TagPair(Arc::new(node))
    }
}

impl From<GreenPly> for GreenItem {
    fn from(node: GreenPly) -> Self {
        Self::Ply(Arc::new(node))
    }
}

impl From<GreenWithTrivia> for GreenItem {
    fn from(node: GreenWithTrivia) -> Self {
        Self::Element(Arc::new(node))
    }
}

/// Root of a parsed text: its items followed by whatever trivia remains.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GreenDocument {
    items: SpanList<GreenItem>,
    trailing_trivia: GreenTrivia,
}

impl GreenDocument {
    pub fn new(items: impl IntoIterator<Item = GreenItem>, trailing_trivia: GreenTrivia) -> Self {
        Self { items: SpanList::new(items), trailing_trivia }
    }

    pub fn items(&self) -> &SpanList<GreenItem> {
        &self.items
    }

    pub fn trailing_trivia(&self) -> &GreenTrivia {
        &self.trailing_trivia
    }

    /// Finds the terminal covering `offset` and its start, both relative to
    /// the document.
    pub fn terminal_at(&self, offset: TextSize) -> Option<TerminalAt<'_>> {
        if let Some((index, relative)) = self.items.find(offset) {
            return shifted(self.items.get(index)?.terminal_at(relative), self.items.start(index));
        }
        let items_len = self.items.text_len();
        shifted(self.trailing_trivia.terminal_at(offset.checked_sub(items_len)?), items_len)
    }
}

impl GreenNode for GreenDocument {
    fn text_len(&self) -> TextSize {
        self.items.text_len() + self.trailing_trivia.text_len()
    }
}

impl GreenComposite for GreenDocument {
    const KIND: NodeKind = NodeKind::Document;

    fn child_count(&self) -> usize {
        self.items.len() + 1
    }

    fn child_offset(&self, index: usize) -> TextSize {
        self.items.start(index)
    }
}
