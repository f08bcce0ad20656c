use std::collections::VecDeque;
use std::vec::IntoIter;

/// A peekable iterator that knows how many items it has yielded.
///
/// Like rustlib's [`Peekable`], plus a position the scanner attaches to token spans.
///
/// [`Peekable`]: core::iter::Peekable
pub struct PeekIter<T>
where
    T: Clone,
{
    iter: IntoIter<T>,
    /// A store of items we had to consume from the iterator for peeking.
    lookahead: VecDeque<Option<T>>,
    /// Number of items yielded by `next` so far.
    pos: usize,
}

impl<T> PeekIter<T>
where
    T: Clone,
{
    pub fn new(iter: IntoIter<T>) -> Self {
        Self {
            iter,
            lookahead: VecDeque::with_capacity(1),
            pos: 0,
        }
    }

    /// Index of the next item in the iteration.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns a reference to the next value in the iterator, without consuming it, or `None` if
    /// the iteration is complete.
    pub fn peek(&mut self) -> Option<&T> {
        if self.lookahead.is_empty() {
            let next = self.iter.next();
            self.lookahead.push_back(next);
        }
        self.lookahead[0].as_ref()
    }

    /// Consumes items for as long as `predicate` holds on the next item, collecting them.
    /// The first item failing the predicate is not consumed.
    pub fn collect_while<P, C>(&mut self, predicate: P) -> C
    where
        P: Fn(&T) -> bool,
        C: std::iter::FromIterator<T>,
    {
        let mut collected = Vec::new();
        while let Some(item) = self.peek() {
            if !predicate(item) {
                break;
            }
            if let Some(item) = self.next() {
                collected.push(item);
            }
        }
        collected.into_iter().collect()
    }
}

impl<T> Iterator for PeekIter<T>
where
    T: Clone,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self
            .lookahead
            .pop_front()
            // Note that unwrap_or *cannot* be used here because it is easily evaluated, and will
            // evaluate `self.iter.next()` before the lookahead is checked!
            .unwrap_or_else(|| self.iter.next());
        if next.is_some() {
            self.pos += 1;
        }
        next
    }
}
