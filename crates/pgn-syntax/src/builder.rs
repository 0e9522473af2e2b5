//! Incremental builder for trivia runs.

use triomphe::Arc;

use crate::error::GreenError;
use crate::{
    GreenBackground, GreenComment, GreenSymbol, GreenTagElementWithTrivia, GreenTrivia,
    GreenTriviaElement, GreenWithTrivia, SpanList,
};

/// Collects background terminals in source order and groups them into a
/// [`GreenTrivia`].
///
/// Every comment closes the pending background run into a
/// [`GreenTriviaElement`]; whatever follows the last comment becomes the
/// trailing background.
#[derive(Debug, Default)]
pub struct TriviaBuilder {
    comment_nodes: Vec<GreenTriviaElement>,
    background: Vec<GreenBackground>,
}

impl Drop for TriviaBuilder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.is_empty() {
            panic!("pending trivia: you should call `TriviaBuilder::finish()`");
        }
    }
}

impl TriviaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.comment_nodes.is_empty() && self.background.is_empty()
    }

    pub fn push(&mut self, node: GreenBackground) {
        match node {
            GreenBackground::Comment(comment) => self.push_comment(comment),
            node => self.background.push(node),
        }
    }

    pub fn push_comment(&mut self, comment: Arc<GreenComment>) {
        let background_before = SpanList::new(self.background.drain(..));
        self.comment_nodes.push(GreenTriviaElement::new_unchecked(background_before, comment));
    }

    /// Takes everything pushed so far, leaving the builder empty.
    pub fn finish(&mut self) -> GreenTrivia {
        if self.is_empty() {
            return GreenTrivia::empty();
        }
        GreenTrivia::new_unchecked(
            SpanList::new(self.comment_nodes.drain(..)),
            SpanList::new(self.background.drain(..)),
        )
    }

    /// Attaches the pending trivia to `content`.
    pub fn attach(&mut self, content: GreenSymbol) -> GreenWithTrivia {
        GreenWithTrivia::new(self.finish(), content)
    }

    /// Attaches the pending trivia to a tag element.
    ///
    /// The pending trivia is consumed even when `content` is rejected, so the
    /// builder can be dropped while the error propagates.
    pub fn attach_tag_element(
        &mut self,
        content: GreenSymbol,
    ) -> Result<GreenTagElementWithTrivia, GreenError> {
        GreenTagElementWithTrivia::new(self.finish(), content)
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextSize;

    use super::*;
    use crate::{
        GreenEscape, GreenMove, GreenNode as _, GreenTagPair, GreenWhitespace, Symbol as _,
        SymbolKind,
    };

    fn space(len: u32) -> GreenBackground {
        GreenWhitespace::new(TextSize::new(len)).unwrap().into()
    }

    fn comment(text: &str) -> GreenBackground {
        GreenComment::new(text).unwrap().into()
    }

    #[test]
    fn comments_close_elements() {
        let mut builder = TriviaBuilder::new();
        builder.push(space(1));
        builder.push(comment("{a}"));
        builder.push(comment("{b}"));
        builder.push(space(2));
        builder.push(GreenEscape::new("%x").unwrap().into());

        let trivia = builder.finish();

        assert!(builder.is_empty());
        assert_eq!(trivia.text_len(), TextSize::new(11));
        let elements = trivia.comment_nodes().iter().collect::<Vec<_>>();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].background_before().len(), 1);
        assert!(elements[1].background_before().is_empty());
        assert_eq!(trivia.background_after().len(), 2);
    }

    #[test]
    fn nothing_pushed_gives_empty_trivia() {
        let mut builder = TriviaBuilder::new();

        assert_eq!(builder.finish(), GreenTrivia::empty());
        builder.push(space(1));
        assert!(!builder.finish().is_empty());
        assert!(builder.finish().is_empty());
    }

    #[test]
    fn attach_consumes_pending_trivia() {
        let mut builder = TriviaBuilder::new();
        builder.push(space(1));

        let node = builder.attach(GreenMove::new("e4").unwrap().into());

        assert_eq!(node.text_len(), TextSize::new(3));
        assert!(builder.is_empty());
    }

    fn tag_pair_of(
        mut builder: TriviaBuilder,
        content: GreenSymbol,
    ) -> Result<GreenTagPair, GreenError> {
        let element = builder.attach_tag_element(content)?;
        GreenTagPair::new([element])
    }

    #[test]
    fn rejected_tag_element_propagates_error() {
        let mut builder = TriviaBuilder::new();
        builder.push(space(3));

        let error = tag_pair_of(builder, GreenSymbol::period()).unwrap_err();

        assert_eq!(
            error,
            GreenError::UnexpectedContent { expected: "tag element", found: SymbolKind::Period }
        );
    }

    #[test]
    fn tag_element_takes_pending_trivia() {
        let mut builder = TriviaBuilder::new();
        builder.push(space(3));

        let bracket = builder.attach_tag_element(GreenSymbol::bracket_open()).unwrap();

        assert!(builder.is_empty());
        assert_eq!(bracket.leading_trivia().text_len(), TextSize::new(3));
        assert_eq!(bracket.content().kind(), SymbolKind::BracketOpen);
    }

    #[test]
    #[should_panic(expected = "pending trivia")]
    fn dropping_pending_trivia_panics() {
        let mut builder = TriviaBuilder::new();
        builder.push(space(1));
    }
}
