//! Rolling window buffer
//!
//! Keeps the last N entries in chronological order; pushing into a full
//! window evicts the oldest entry.

use std::collections::VecDeque;

/// Fixed-capacity FIFO window shared by every history in the pipeline
#[derive(Clone, Debug)]
pub struct RingBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new entry, returning the evicted one when the window was full
    pub fn push(&mut self, value: T) -> Option<T> {
        let evicted = if self.data.len() == self.capacity {
            self.data.pop_front()
        } else {
            None
        };
        self.data.push_back(value);
        evicted
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check if the window has been filled
    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    pub fn latest(&self) -> Option<&T> {
        self.data.back()
    }

    pub fn oldest(&self) -> Option<&T> {
        self.data.front()
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.data.iter()
    }

    /// The newest `n` entries, oldest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &T> {
        self.data.iter().skip(self.data.len().saturating_sub(n))
    }

    /// The oldest `n` entries
    pub fn earliest(&self, n: usize) -> impl Iterator<Item = &T> {
        self.data.iter().take(n)
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<T: Clone> RingBuffer<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.data.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_when_full() {
        let mut buffer = RingBuffer::new(3);
        assert_eq!(buffer.push(1), None);
        buffer.push(2);
        buffer.push(3);
        assert!(buffer.is_full());
        assert_eq!(buffer.push(4), Some(1));
        assert_eq!(buffer.to_vec(), vec![2, 3, 4]);
        assert_eq!(buffer.oldest(), Some(&2));
        assert_eq!(buffer.latest(), Some(&4));
    }

    #[test]
    fn recent_and_earliest_slices() {
        let mut buffer = RingBuffer::new(10);
        for i in 0..6 {
            buffer.push(i);
        }
        assert_eq!(buffer.recent(2).copied().collect::<Vec<_>>(), vec![4, 5]);
        assert_eq!(buffer.earliest(2).copied().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(buffer.recent(20).count(), 6);
    }

    #[test]
    fn clear_empties_window() {
        let mut buffer = RingBuffer::new(2);
        buffer.push('a');
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 2);
    }
}
