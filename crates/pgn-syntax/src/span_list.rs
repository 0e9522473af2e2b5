//! Immutable child sequences with precomputed relative starts.

use std::fmt;

use text_size::TextSize;
use triomphe::ThinArc;

use crate::GreenNode;

/// Ordered, immutable list of green children.
///
/// Every element is stored next to its start relative to the list, and the
/// header holds the total length, so locating a child never re-sums lengths.
/// The empty list does not allocate.
#[derive(Clone, Eq, PartialEq)]
pub struct SpanList<T> {
    ptr: Option<ThinArc<TextSize, Span<T>>>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Span<T> {
    start: TextSize,
    element: T,
}

impl<T> SpanList<T> {
    pub const fn empty() -> Self {
        Self { ptr: None }
    }

    pub fn new(elements: impl IntoIterator<Item = T>) -> Self
    where
        T: GreenNode,
    {
        let mut text_len = TextSize::new(0);
        let spans = elements
            .into_iter()
            .map(|element| {
                let start = text_len;
                text_len += element.text_len();
                Span { start, element }
            })
            .collect::<Vec<_>>();

        if spans.is_empty() {
            return Self::empty();
        }

        Self { ptr: Some(ThinArc::from_header_and_iter(text_len, spans.into_iter())) }
    }

    fn spans(&self) -> &[Span<T>] {
        match &self.ptr {
            None => &[],
            Some(ptr) => &ptr.slice,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.spans().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    /// Sum of the lengths of all elements.
    pub fn text_len(&self) -> TextSize {
        match self.ptr {
            None => TextSize::new(0),
            Some(ref ptr) => ptr.header.header,
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.spans().get(index).map(|span| &span.element)
    }

    /// Start of the element at `index` relative to the list.
    ///
    /// `index == len()` is accepted and yields the end of the list.
    #[track_caller]
    pub fn start(&self, index: usize) -> TextSize {
        if index == self.len() { self.text_len() } else { self.spans()[index].start }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + Clone {
        self.spans().iter().map(|span| &span.element)
    }

    pub fn iter_with_starts(
        &self,
    ) -> impl DoubleEndedIterator<Item = (TextSize, &T)> + ExactSizeIterator + Clone {
        self.spans().iter().map(|span| (span.start, &span.element))
    }

    /// Returns the index of the element covering `offset` and the offset
    /// relative to that element, or `None` when `offset` is past the end.
    pub fn find(&self, offset: TextSize) -> Option<(usize, TextSize)>
    where
        T: GreenNode,
    {
        let spans = self.spans();
        let index = spans.partition_point(|span| span.start + span.element.text_len() <= offset);
        let span = spans.get(index)?;
        Some((index, offset - span.start))
    }
}

impl<T> Default for SpanList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: GreenNode> FromIterator<T> for SpanList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T: fmt::Debug> fmt::Debug for SpanList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpanList")
            .field("elements", &self.iter().collect::<Vec<_>>())
            .field("text_len", &self.text_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GreenWhitespace;

    fn whitespace(lengths: &[u32]) -> SpanList<GreenWhitespace> {
        lengths
            .iter()
            .map(|&len| GreenWhitespace::new(TextSize::new(len)).expect("non-empty whitespace"))
            .collect()
    }

    #[test]
    fn starts_are_cumulative() {
        let list = whitespace(&[2, 1, 5]);

        assert_eq!(list.len(), 3);
        assert_eq!(list.text_len(), TextSize::new(8));
        let starts = list.iter_with_starts().map(|(start, _)| u32::from(start)).collect::<Vec<_>>();
        assert_eq!(starts, [0, 2, 3]);
        assert_eq!(list.start(3), TextSize::new(8));
    }

    #[test]
    fn find_locates_covering_element() {
        let list = whitespace(&[2, 1, 5]);

        assert_eq!(list.find(TextSize::new(0)), Some((0, TextSize::new(0))));
        assert_eq!(list.find(TextSize::new(1)), Some((0, TextSize::new(1))));
        assert_eq!(list.find(TextSize::new(2)), Some((1, TextSize::new(0))));
        assert_eq!(list.find(TextSize::new(7)), Some((2, TextSize::new(4))));
        assert_eq!(list.find(TextSize::new(8)), None);
    }

    #[test]
    fn empty_list() {
        let list = whitespace(&[]);

        assert!(list.is_empty());
        assert_eq!(list, SpanList::empty());
        assert_eq!(list.text_len(), TextSize::new(0));
        assert_eq!(list.start(0), TextSize::new(0));
        assert_eq!(list.find(TextSize::new(0)), None);
        assert!(list.get(0).is_none());
    }
}
