//! A single-ended ordered collection with a caller-supplied comparator.
//!
//! `PriorityQueue<T>` is policy-agnostic: the comparator closure is the only
//! knob. It keeps its elements sorted ascending according to that
//! comparator, breaking ties by insertion order (FIFO among equals) — the
//! property FCFS and round-robin exploit by handing in a comparator that
//! never returns [`Ordering::Less`].

use crate::job::HasId;
use std::cmp::Ordering;

/// Ordered, FIFO-on-equal collection of `T`, ordered by a total-order
/// comparator supplied at construction.
///
/// Backed by a `Vec` kept sorted by linear-scan insertion. A linked list
/// would serve identically, but wait queues here stay small, and
/// `remove_by_identity`/`at` are easier to reason about over a contiguous
/// slice than a list.
pub struct PriorityQueue<T> {
    items: Vec<T>,
    comparator: Box<dyn Fn(&T, &T) -> Ordering>,
}

impl<T> PriorityQueue<T> {
    /// Creates an empty queue ordered by `comparator`.
    pub fn new(comparator: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        Self {
            items: Vec::new(),
            comparator: Box::new(comparator),
        }
    }

    /// Inserts `item` at the first position where it compares less than the
    /// element already there, or at the tail if none does. Returns the
    /// zero-based index `item` was stored at.
    pub fn offer(&mut self, item: T) -> usize {
        let index = self
            .items
            .iter()
            .position(|existing| (self.comparator)(&item, existing) == Ordering::Less)
            .unwrap_or(self.items.len());
        self.items.insert(index, item);
        index
    }

    /// The head element, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Removes and returns the head element.
    pub fn poll(&mut self) -> Option<T> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    /// The element at `index`, without removing it.
    pub fn at(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// down to fill the gap.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Number of contained elements.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates head to tail, i.e. in comparator order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Releases internal storage. `Drop` already does this; the method
    /// exists so callers that want an explicit, consuming teardown step
    /// have one to call.
    pub fn destroy(self) {}
}

impl<T: HasId> PriorityQueue<T> {
    /// Removes every element whose handle is identity-equal to `id`.
    /// Compares by [`HasId::id`], never by the ordering comparator. Returns
    /// the number of elements removed.
    pub fn remove_by_identity(&mut self, id: &T::Id) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.id() != *id);
        before - self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fcfs_queue() -> PriorityQueue<i32> {
        PriorityQueue::new(|_, _| Ordering::Greater)
    }

    fn ascending_queue() -> PriorityQueue<i32> {
        PriorityQueue::new(|a: &i32, b: &i32| a.cmp(b))
    }

    #[test]
    fn fcfs_comparator_preserves_insertion_order() {
        let mut q = fcfs_queue();
        assert_eq!(q.offer(30), 0);
        assert_eq!(q.offer(10), 1);
        assert_eq!(q.offer(20), 2);
        assert_eq!(q.poll(), Some(30));
        assert_eq!(q.poll(), Some(10));
        assert_eq!(q.poll(), Some(20));
        assert_eq!(q.poll(), None);
    }

    #[test]
    fn ascending_comparator_orders_by_value_fifo_on_tie() {
        let mut q = ascending_queue();
        q.offer(5);
        q.offer(1);
        q.offer(5);
        q.offer(3);
        let contents: Vec<_> = q.iter().copied().collect();
        assert_eq!(contents, vec![1, 3, 5, 5]);
    }

    #[test]
    fn peek_does_not_remove() {
        let mut q = ascending_queue();
        q.offer(7);
        assert_eq!(q.peek(), Some(&7));
        assert_eq!(q.size(), 1);
    }

    #[test]
    fn at_and_remove_at_out_of_range_are_not_present() {
        let q = ascending_queue();
        assert_eq!(q.at(0), None);
        let mut q = ascending_queue();
        q.offer(1);
        assert_eq!(q.remove_at(5), None);
        assert_eq!(q.remove_at(0), Some(1));
        assert_eq!(q.size(), 0);
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Tagged(u64);
    impl HasId for Tagged {
        type Id = u64;
        fn id(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn remove_by_identity_is_idempotent_and_ignores_comparator() {
        let mut q = PriorityQueue::new(|_: &Tagged, _: &Tagged| Ordering::Greater);
        q.offer(Tagged(1));
        q.offer(Tagged(2));
        q.offer(Tagged(1));
        assert_eq!(q.remove_by_identity(&1), 2);
        assert_eq!(q.size(), 1);
        assert_eq!(q.remove_by_identity(&1), 0);
    }
}
