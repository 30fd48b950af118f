//! Bounded, Append-Only History of Scored Readings
//!
//! ## Overview
//!
//! The dashboard keeps the last few dozen scored readings for two purposes:
//! the reliability index (share of SAFE classifications) and the field-log
//! view. Neither needs more than a fixed trailing window, so the history is a
//! ring buffer with a capacity chosen at construction time (30 for the
//! threshold-additive dashboard, 50 for the continuous-deviation one).
//!
//! ## Semantics
//!
//! - Entries are never mutated after `push`.
//! - When full, `push` overwrites the oldest entry and hands it back.
//! - Iteration is most-recent-first, matching the field-log display.
//!
//! ```text
//! BoundedHistory with capacity 4 after pushing A..F:
//!
//! Physical slots:   [E, F, C, D]   write_pos = 2
//! Logical order:    F, E, D, C     (newest first)
//! Evicted:          A, B
//! ```
//!
//! ## Ownership
//!
//! The history belongs to exactly one orchestrating session. It is not
//! synchronized; appends go through `&mut self`.

/// Fixed-capacity ring buffer iterated newest-first
#[derive(Debug, Clone)]
pub struct BoundedHistory<T> {
    /// Slots; `None` until first written
    data: Vec<Option<T>>,

    /// Index where the next write will occur
    write_pos: usize,

    /// Current number of valid entries
    len: usize,
}

impl<T> BoundedHistory<T> {
    /// Create an empty history; a capacity of zero is raised to one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut data = Vec::with_capacity(capacity);
        data.resize_with(capacity, || None);

        Self {
            data,
            write_pos: 0,
            len: 0,
        }
    }

    /// Append an entry, returning the evicted oldest entry when full
    pub fn push(&mut self, entry: T) -> Option<T> {
        let evicted = self.data[self.write_pos].replace(entry);
        self.write_pos = (self.write_pos + 1) % self.capacity();

        if self.len < self.capacity() {
            self.len += 1;
        }

        evicted
    }

    /// Maximum number of entries retained
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if history is at capacity
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Most recently appended entry
    pub fn latest(&self) -> Option<&T> {
        self.get(0)
    }

    /// Oldest retained entry
    pub fn oldest(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    /// Entry by recency: 0 is the newest, `len - 1` the oldest
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        let capacity = self.capacity();
        let physical = (self.write_pos + capacity - 1 - index) % capacity;
        self.data[physical].as_ref()
    }

    /// Iterate newest to oldest
    pub fn iter(&self) -> HistoryIter<'_, T> {
        HistoryIter {
            history: self,
            index: 0,
        }
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        for slot in self.data.iter_mut() {
            *slot = None;
        }
        self.write_pos = 0;
        self.len = 0;
    }
}

/// Iterator over history entries, newest first
pub struct HistoryIter<'a, T> {
    history: &'a BoundedHistory<T>,
    index: usize,
}

impl<'a, T> Iterator for HistoryIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.history.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.history.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'a, T> ExactSizeIterator for HistoryIter<'a, T> {}

impl<'a, T> IntoIterator for &'a BoundedHistory<T> {
    type Item = &'a T;
    type IntoIter = HistoryIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history() {
        let history: BoundedHistory<u32> = BoundedHistory::new(5);
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.latest().is_none());
        assert!(history.oldest().is_none());
    }

    #[test]
    fn newest_first_iteration() {
        let mut history = BoundedHistory::new(4);
        for i in 0..3 {
            assert!(history.push(i).is_none());
        }

        let values: Vec<i32> = history.iter().copied().collect();
        assert_eq!(values, vec![2, 1, 0]);
        assert_eq!(history.latest(), Some(&2));
        assert_eq!(history.oldest(), Some(&0));
    }

    #[test]
    fn overwrite_evicts_oldest() {
        let mut history = BoundedHistory::new(3);
        let mut evicted = Vec::new();

        for i in 0..5 {
            if let Some(old) = history.push(i) {
                evicted.push(old);
            }
        }

        assert_eq!(history.len(), 3);
        assert!(history.is_full());
        assert_eq!(evicted, vec![0, 1]);

        let values: Vec<i32> = history.iter().copied().collect();
        assert_eq!(values, vec![4, 3, 2]);
        assert_eq!(history.iter().len(), 3);
    }

    #[test]
    fn zero_capacity_holds_one() {
        let mut history = BoundedHistory::new(0);
        history.push("a");
        assert_eq!(history.push("b"), Some("a"));
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.latest(), Some(&"b"));
    }

    #[test]
    fn clear_resets() {
        let mut history = BoundedHistory::new(2);
        history.push(1);
        history.push(2);
        history.clear();
        assert!(history.is_empty());
        history.push(3);
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![3]);
    }
}
