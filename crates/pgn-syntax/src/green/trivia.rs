//! Trivia composites and the foreground-with-trivia pairing.

use text_size::TextSize;
use triomphe::Arc;

use super::{TerminalAt, TerminalRef, shifted};
use crate::error::{GreenError, reject};
use crate::{
    GreenBackground, GreenComment, GreenComposite, GreenNode, GreenSymbol, NodeKind, SpanList,
    Symbol as _, SymbolKind,
};

fn check_no_comments(background: &SpanList<GreenBackground>) -> Result<(), GreenError> {
    match background.iter().find(|node| node.kind() == SymbolKind::Comment) {
        Some(_) => reject(GreenError::UnexpectedContent {
            expected: "background without comments",
            found: SymbolKind::Comment,
        }),
        None => Ok(()),
    }
}

fn background_at(
    background: &SpanList<GreenBackground>,
    offset: TextSize,
) -> Option<TerminalAt<'_>> {
    let (index, _) = background.find(offset)?;
    Some((TerminalRef::Background(background.get(index)?), background.start(index)))
}

/// A comment and the background run leading up to it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GreenTriviaElement {
    background_before: SpanList<GreenBackground>,
    comment: GreenBackground,
}

impl GreenTriviaElement {
    /// Fails when `background_before` contains a comment: a comment always
    /// closes its own element.
    pub fn new(
        background_before: SpanList<GreenBackground>,
        comment: Arc<GreenComment>,
    ) -> Result<Self, GreenError> {
        check_no_comments(&background_before)?;
        Ok(Self::new_unchecked(background_before, comment))
    }

    pub(crate) fn new_unchecked(
        background_before: SpanList<GreenBackground>,
        comment: Arc<GreenComment>,
    ) -> Self {
        Self { background_before, comment: GreenBackground::Comment(comment) }
    }

    pub fn background_before(&self) -> &SpanList<GreenBackground> {
        &self.background_before
    }

    /// Always the `Comment` variant.
    pub fn comment(&self) -> &GreenBackground {
        &self.comment
    }

    pub fn terminal_at(&self, offset: TextSize) -> Option<TerminalAt<'_>> {
        if let Some(found) = background_at(&self.background_before, offset) {
            return Some(found);
        }
        (offset < self.text_len())
            .then(|| (TerminalRef::Background(&self.comment), self.background_before.text_len()))
    }
}

impl GreenNode for GreenTriviaElement {
    fn text_len(&self) -> TextSize {
        self.background_before.text_len() + self.comment.text_len()
    }
}

impl GreenComposite for GreenTriviaElement {
    const KIND: NodeKind = NodeKind::TriviaElement;

    fn child_count(&self) -> usize {
        self.background_before.len() + 1
    }

    fn child_offset(&self, index: usize) -> TextSize {
        self.background_before.start(index)
    }
}

/// Background material between two foreground nodes, possibly empty.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GreenTrivia {
    comment_nodes: SpanList<GreenTriviaElement>,
    background_after: SpanList<GreenBackground>,
}

impl GreenTrivia {
    pub const fn empty() -> Self {
        Self { comment_nodes: SpanList::empty(), background_after: SpanList::empty() }
    }

    pub fn new(
        comment_nodes: SpanList<GreenTriviaElement>,
        background_after: SpanList<GreenBackground>,
    ) -> Result<Self, GreenError> {
        check_no_comments(&background_after)?;
        Ok(Self::new_unchecked(comment_nodes, background_after))
    }

    pub(crate) fn new_unchecked(
        comment_nodes: SpanList<GreenTriviaElement>,
        background_after: SpanList<GreenBackground>,
    ) -> Self {
        Self { comment_nodes, background_after }
    }

    pub fn is_empty(&self) -> bool {
        self.comment_nodes.is_empty() && self.background_after.is_empty()
    }

    pub fn comment_nodes(&self) -> &SpanList<GreenTriviaElement> {
        &self.comment_nodes
    }

    pub fn background_after(&self) -> &SpanList<GreenBackground> {
        &self.background_after
    }

    pub fn terminal_at(&self, offset: TextSize) -> Option<TerminalAt<'_>> {
        if let Some((index, relative)) = self.comment_nodes.find(offset) {
            let element = self.comment_nodes.get(index)?;
            return shifted(element.terminal_at(relative), self.comment_nodes.start(index));
        }
        let comments_len = self.comment_nodes.text_len();
        let found = background_at(&self.background_after, offset.checked_sub(comments_len)?);
        shifted(found, comments_len)
    }
}

impl GreenNode for GreenTrivia {
    fn text_len(&self) -> TextSize {
        self.comment_nodes.text_len() + self.background_after.text_len()
    }
}

impl GreenComposite for GreenTrivia {
    const KIND: NodeKind = NodeKind::Trivia;

    fn child_count(&self) -> usize {
        self.comment_nodes.len() + self.background_after.len()
    }

    fn child_offset(&self, index: usize) -> TextSize {
        match index.checked_sub(self.comment_nodes.len()) {
            None => self.comment_nodes.start(index),
            Some(index) => self.comment_nodes.text_len() + self.background_after.start(index),
        }
    }
}

/// A foreground terminal with its leading trivia.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GreenWithTrivia {
    leading_trivia: GreenTrivia,
    content: GreenSymbol,
}

impl GreenWithTrivia {
    pub fn new(leading_trivia: GreenTrivia, content: GreenSymbol) -> Self {
        Self { leading_trivia, content }
    }

    pub fn leading_trivia(&self) -> &GreenTrivia {
        &self.leading_trivia
    }

    pub fn content(&self) -> &GreenSymbol {
        &self.content
    }

    pub fn terminal_at(&self, offset: TextSize) -> Option<TerminalAt<'_>> {
        let trivia_len = self.leading_trivia.text_len();
        if offset < trivia_len {
            return self.leading_trivia.terminal_at(offset);
        }
        (offset < self.text_len()).then(|| (TerminalRef::Symbol(&self.content), trivia_len))
    }
}

impl From<GreenSymbol> for GreenWithTrivia {
    fn from(content: GreenSymbol) -> Self {
        Self::new(GreenTrivia::empty(), content)
    }
}

impl AsRef<Self> for GreenWithTrivia {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl GreenNode for GreenWithTrivia {
    fn text_len(&self) -> TextSize {
        self.leading_trivia.text_len() + self.content.text_len()
    }
}

impl GreenComposite for GreenWithTrivia {
    const KIND: NodeKind = NodeKind::WithTrivia;

    fn child_count(&self) -> usize {
        2
    }

    fn child_offset(&self, index: usize) -> TextSize {
        if index == 0 { TextSize::new(0) } else { self.leading_trivia.text_len() }
    }
}

/// A `[`, `]`, tag name or tag value with its leading trivia.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GreenTagElementWithTrivia {
    inner: GreenWithTrivia,
}

impl GreenTagElementWithTrivia {
    pub fn new(leading_trivia: GreenTrivia, content: GreenSymbol) -> Result<Self, GreenError> {
        let kind = content.kind();
        if !kind.is_tag_element() {
            return reject(GreenError::UnexpectedContent { expected: "tag element", found: kind });
        }
        Ok(Self { inner: GreenWithTrivia::new(leading_trivia, content) })
    }

    pub fn leading_trivia(&self) -> &GreenTrivia {
        self.inner.leading_trivia()
    }

    pub fn content(&self) -> &GreenSymbol {
        self.inner.content()
    }

    pub fn terminal_at(&self, offset: TextSize) -> Option<TerminalAt<'_>> {
        self.inner.terminal_at(offset)
    }
}

impl AsRef<GreenWithTrivia> for GreenTagElementWithTrivia {
    fn as_ref(&self) -> &GreenWithTrivia {
        &self.inner
    }
}

impl GreenNode for GreenTagElementWithTrivia {
    fn text_len(&self) -> TextSize {
        self.inner.text_len()
    }
}

impl GreenComposite for GreenTagElementWithTrivia {
    const KIND: NodeKind = NodeKind::TagElementWithTrivia;

    fn child_count(&self) -> usize {
        self.inner.child_count()
    }

    fn child_offset(&self, index: usize) -> TextSize {
        self.inner.child_offset(index)
    }
}
