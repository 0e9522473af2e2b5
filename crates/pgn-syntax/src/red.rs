//! Position-aware views over green nodes.
//!
//! A [`RedNode`] is a short-lived handle created while navigating down from
//! the root. It borrows its green node and its parent, and computes its
//! absolute start from the parent chain each time it is asked.

use std::fmt;
use std::ops::ControlFlow;

use text_size::{TextRange, TextSize};

use crate::{
    GreenBackground, GreenComposite, GreenDocument, GreenItem, GreenNode, GreenPly, GreenSymbol,
    GreenTagElementWithTrivia, GreenTagPair, GreenTrivia, GreenTriviaElement, GreenWithTrivia,
    NodeKind, Symbol as _, SymbolKind,
};

/// A red node that has children.
pub trait RedParent {
    fn kind(&self) -> NodeKind;

    /// Absolute start.
    fn start(&self) -> TextSize;

    fn text_len(&self) -> TextSize;

    /// Start of the child slot at `index`, relative to this node.
    fn child_offset(&self, index: usize) -> TextSize;

    fn parent(&self) -> Option<&dyn RedParent>;

    fn range(&self) -> TextRange {
        TextRange::at(self.start(), self.text_len())
    }
}

#[derive(Clone, Copy)]
enum Origin<'a> {
    Root(TextSize),
    Child { parent: &'a dyn RedParent, index: usize },
}

/// A green node placed at an absolute position.
///
/// Two red nodes are equal when they wrap the same green instance at the same
/// place. Navigating to the same child twice yields equal, distinct handles.
pub struct RedNode<'a, G> {
    green: &'a G,
    origin: Origin<'a>,
}

impl<'a, G: GreenNode> RedNode<'a, G> {
    pub fn new_root(green: &'a G, start: TextSize) -> Self {
        Self { green, origin: Origin::Root(start) }
    }

    pub fn green(&self) -> &'a G {
        self.green
    }

    pub fn parent(&self) -> Option<&'a dyn RedParent> {
        match self.origin {
            Origin::Root(_) => None,
            Origin::Child { parent, .. } => Some(parent),
        }
    }

    /// Slot in the parent, `0` for a root.
    pub fn index(&self) -> usize {
        match self.origin {
            Origin::Root(_) => 0,
            Origin::Child { index, .. } => index,
        }
    }

    pub fn start(&self) -> TextSize {
        match self.origin {
            Origin::Root(start) => start,
            Origin::Child { parent, index } => parent.start() + parent.child_offset(index),
        }
    }

    pub fn text_len(&self) -> TextSize {
        self.green.text_len()
    }

    pub fn range(&self) -> TextRange {
        TextRange::at(self.start(), self.text_len())
    }

    /// The slice of `source` this node covers.
    ///
    /// Panics if `source` is not the text the tree was built from.
    #[track_caller]
    pub fn source_text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.range()]
    }
}

fn child<'a, C>(parent: &'a dyn RedParent, index: usize, green: &'a C) -> RedNode<'a, C> {
    RedNode { green, origin: Origin::Child { parent, index } }
}

impl<G> Clone for RedNode<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G> Copy for RedNode<'_, G> {}

impl<G: GreenNode> PartialEq for RedNode<'_, G> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.green, other.green)
            && self.index() == other.index()
            && self.start() == other.start()
    }
}

impl<G: GreenNode> Eq for RedNode<'_, G> {}

impl<G: GreenNode + fmt::Debug> fmt::Debug for RedNode<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedNode")
            .field("range", &self.range())
            .field("index", &self.index())
            .field("green", self.green)
            .finish()
    }
}

impl<G: GreenComposite> RedParent for RedNode<'_, G> {
    fn kind(&self) -> NodeKind {
        G::KIND
    }

    fn start(&self) -> TextSize {
        self.start()
    }

    fn text_len(&self) -> TextSize {
        self.green.text_len()
    }

    fn child_offset(&self, index: usize) -> TextSize {
        self.green.child_offset(index)
    }

    fn parent(&self) -> Option<&dyn RedParent> {
        self.parent()
    }
}

impl<'a> RedNode<'a, GreenDocument> {
    /// The document as a root starting at offset zero.
    pub fn new(green: &'a GreenDocument) -> Self {
        Self::new_root(green, TextSize::new(0))
    }

    pub fn items(&self) -> impl ExactSizeIterator<Item = RedItem<'_>> {
        self.green.items().iter().enumerate().map(move |(index, item)| item.create_red(self, index))
    }

    pub fn item(&self, index: usize) -> Option<RedItem<'_>> {
        Some(self.green.items().get(index)?.create_red(self, index))
    }

    pub fn trailing_trivia(&self) -> RedNode<'_, GreenTrivia> {
        child(self, self.green.items().len(), self.green.trailing_trivia())
    }

    /// The terminal covering `offset`, or `None` past the end.
    pub fn terminal_at(&self, offset: TextSize) -> Option<(SymbolKind, TextRange)> {
        let (terminal, start) = self.green.terminal_at(offset.checked_sub(self.start())?)?;
        Some((terminal.kind(), TextRange::at(self.start() + start, terminal.text_len())))
    }
}

impl GreenItem {
    /// Wraps this item as the child at `index` of `parent`.
    pub fn create_red<'a>(&'a self, parent: &'a dyn RedParent, index: usize) -> RedItem<'a> {
        match self {
            GreenItem::TagPair(green) => RedItem::TagPair(child(parent, index, &**green)),
            GreenItem::Ply(green) => RedItem::Ply(child(parent, index, &**green)),
            GreenItem::Element(green) => RedItem::Element(child(parent, index, &**green)),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RedItem<'a> {
    TagPair(RedNode<'a, GreenTagPair>),
    Ply(RedNode<'a, GreenPly>),
    Element(RedNode<'a, GreenWithTrivia>),
}

impl RedItem<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            RedItem::TagPair(_) => NodeKind::TagPair,
            RedItem::Ply(_) => NodeKind::Ply,
            RedItem::Element(_) => NodeKind::WithTrivia,
        }
    }

    pub fn start(&self) -> TextSize {
        match self {
            RedItem::TagPair(node) => node.start(),
            RedItem::Ply(node) => node.start(),
            RedItem::Element(node) => node.start(),
        }
    }

    pub fn range(&self) -> TextRange {
        match self {
            RedItem::TagPair(node) => node.range(),
            RedItem::Ply(node) => node.range(),
            RedItem::Element(node) => node.range(),
        }
    }
}

impl<'a> RedNode<'a, GreenTagPair> {
    pub fn elements(
        &self,
    ) -> impl ExactSizeIterator<Item = RedNode<'_, GreenTagElementWithTrivia>> {
        self.green
            .elements()
            .iter()
            .enumerate()
            .map(move |(index, element)| child(self, index, element))
    }
}

impl<'a> RedNode<'a, GreenPly> {
    pub fn move_number(&self) -> Option<RedNode<'_, GreenWithTrivia>> {
        let green = self.green.move_number()?;
        Some(child(self, GreenPly::MOVE_NUMBER_INDEX, green))
    }

    pub fn ply_move(&self) -> Option<RedNode<'_, GreenWithTrivia>> {
        let green = self.green.ply_move()?;
        Some(child(self, GreenPly::MOVE_INDEX, green))
    }

    pub fn nags(&self) -> impl ExactSizeIterator<Item = RedNode<'_, GreenWithTrivia>> {
        self.green
            .nags()
            .iter()
            .enumerate()
            .map(move |(index, nag)| child(self, GreenPly::FIRST_NAG_INDEX + index, nag))
    }
}

impl<'a, G> RedNode<'a, G>
where
    G: GreenComposite + AsRef<GreenWithTrivia>,
{
    fn with_trivia(&self) -> &'a GreenWithTrivia {
        self.green.as_ref()
    }

    pub fn leading_trivia(&self) -> RedNode<'_, GreenTrivia> {
        child(self, 0, self.with_trivia().leading_trivia())
    }

    pub fn content(&self) -> RedNode<'_, GreenSymbol> {
        child(self, 1, self.with_trivia().content())
    }
}

impl<'a> RedNode<'a, GreenTrivia> {
    pub fn comment_nodes(&self) -> impl ExactSizeIterator<Item = RedNode<'_, GreenTriviaElement>> {
        self.green
            .comment_nodes()
            .iter()
            .enumerate()
            .map(move |(index, node)| child(self, index, node))
    }

    pub fn background_after(&self) -> impl ExactSizeIterator<Item = RedNode<'_, GreenBackground>> {
        let first = self.green.comment_nodes().len();
        self.green
            .background_after()
            .iter()
            .enumerate()
            .map(move |(index, node)| child(self, first + index, node))
    }
}

impl<'a> RedNode<'a, GreenTriviaElement> {
    pub fn background_before(
        &self,
    ) -> impl ExactSizeIterator<Item = RedNode<'_, GreenBackground>> {
        self.green
            .background_before()
            .iter()
            .enumerate()
            .map(move |(index, node)| child(self, index, node))
    }

    pub fn comment(&self) -> RedNode<'_, GreenBackground> {
        child(self, self.green.background_before().len(), self.green.comment())
    }
}

/// A terminal placed at an absolute position.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RedTerminal<'a> {
    Background(RedNode<'a, GreenBackground>),
    Symbol(RedNode<'a, GreenSymbol>),
}

impl<'a> RedTerminal<'a> {
    pub fn kind(&self) -> SymbolKind {
        match self {
            RedTerminal::Background(node) => node.green().kind(),
            RedTerminal::Symbol(node) => node.green().kind(),
        }
    }

    pub fn start(&self) -> TextSize {
        match self {
            RedTerminal::Background(node) => node.start(),
            RedTerminal::Symbol(node) => node.start(),
        }
    }

    pub fn range(&self) -> TextRange {
        match self {
            RedTerminal::Background(node) => node.range(),
            RedTerminal::Symbol(node) => node.range(),
        }
    }

    pub fn parent(&self) -> Option<&'a dyn RedParent> {
        match self {
            RedTerminal::Background(node) => node.parent(),
            RedTerminal::Symbol(node) => node.parent(),
        }
    }
}

/// Event produced by [`Walk::walk`], in document order.
#[derive(Clone, Copy)]
pub enum WalkEvent<'a> {
    Enter(&'a dyn RedParent),
    Terminal(RedTerminal<'a>),
    Leave(&'a dyn RedParent),
}

/// Depth-first traversal of a red subtree.
///
/// The callback breaks out of the walk by returning [`ControlFlow::Break`].
pub trait Walk {
    fn walk<B>(&self, f: &mut dyn FnMut(WalkEvent<'_>) -> ControlFlow<B>) -> ControlFlow<B>;

    /// Visits only the terminals, leftmost first.
    fn walk_terminals<B>(
        &self,
        f: &mut dyn FnMut(RedTerminal<'_>) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        self.walk(&mut |event| match event {
            WalkEvent::Terminal(terminal) => f(terminal),
            WalkEvent::Enter(_) | WalkEvent::Leave(_) => ControlFlow::Continue(()),
        })
    }
}

type Callback<'f, B> = &'f mut dyn FnMut(WalkEvent<'_>) -> ControlFlow<B>;

fn background<B>(node: RedNode<'_, GreenBackground>, f: Callback<'_, B>) -> ControlFlow<B> {
    f(WalkEvent::Terminal(RedTerminal::Background(node)))
}

impl Walk for RedNode<'_, GreenDocument> {
    fn walk<B>(&self, f: Callback<'_, B>) -> ControlFlow<B> {
        f(WalkEvent::Enter(self))?;
        for item in self.items() {
            item.walk(f)?;
        }
        self.trailing_trivia().walk(f)?;
        f(WalkEvent::Leave(self))
    }
}

impl Walk for RedItem<'_> {
    fn walk<B>(&self, f: Callback<'_, B>) -> ControlFlow<B> {
        match self {
            RedItem::TagPair(node) => node.walk(f),
            RedItem::Ply(node) => node.walk(f),
            RedItem::Element(node) => node.walk(f),
        }
    }
}

impl Walk for RedNode<'_, GreenTagPair> {
    fn walk<B>(&self, f: Callback<'_, B>) -> ControlFlow<B> {
        f(WalkEvent::Enter(self))?;
        for element in self.elements() {
            element.walk(f)?;
        }
        f(WalkEvent::Leave(self))
    }
}

impl Walk for RedNode<'_, GreenPly> {
    fn walk<B>(&self, f: Callback<'_, B>) -> ControlFlow<B> {
        f(WalkEvent::Enter(self))?;
        if let Some(move_number) = self.move_number() {
            move_number.walk(f)?;
        }
        if let Some(ply_move) = self.ply_move() {
            ply_move.walk(f)?;
        }
        for nag in self.nags() {
            nag.walk(f)?;
        }
        f(WalkEvent::Leave(self))
    }
}

impl<G> Walk for RedNode<'_, G>
where
    G: GreenComposite + AsRef<GreenWithTrivia>,
{
    fn walk<B>(&self, f: Callback<'_, B>) -> ControlFlow<B> {
        f(WalkEvent::Enter(self))?;
        self.leading_trivia().walk(f)?;
        f(WalkEvent::Terminal(RedTerminal::Symbol(self.content())))?;
        f(WalkEvent::Leave(self))
    }
}

impl Walk for RedNode<'_, GreenTrivia> {
    fn walk<B>(&self, f: Callback<'_, B>) -> ControlFlow<B> {
        f(WalkEvent::Enter(self))?;
        for element in self.comment_nodes() {
            element.walk(f)?;
        }
        for node in self.background_after() {
            background(node, f)?;
        }
        f(WalkEvent::Leave(self))
    }
}

impl Walk for RedNode<'_, GreenTriviaElement> {
    fn walk<B>(&self, f: Callback<'_, B>) -> ControlFlow<B> {
        f(WalkEvent::Enter(self))?;
        for node in self.background_before() {
            background(node, f)?;
        }
        background(self.comment(), f)?;
        f(WalkEvent::Leave(self))
    }
}
