//! Binary Min-Heap implementation
//!
//! A [`DynamicArray`] read as a complete binary tree: the parent of index `i`
//! is `(i - 1) / 2` and its children are `2i + 1` and `2i + 2`. Every node is
//! less than or equal to both of its children, so the minimum is always at
//! index 0.
//!
//! There is no `decrease_key`. The graph algorithms push a fresh entry when a
//! priority improves and skip stale entries as they surface.
//!
//! # Time Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `enqueue` | O(log n)   |
//! | `dequeue` | O(log n)   |
//! | `peek`    | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use rust_classic_collections::PriorityQueue;
//! use rust_classic_collections::heap::MinHeap;
//!
//! let mut heap = MinHeap::new();
//! heap.enqueue(3);
//! heap.enqueue(1);
//! heap.enqueue(2);
//!
//! assert_eq!(heap.dequeue(), Ok(1));
//! assert_eq!(heap.dequeue(), Ok(2));
//! assert_eq!(heap.dequeue(), Ok(3));
//! assert!(heap.dequeue().is_err());
//! ```

use crate::array::DynamicArray;
use crate::error::{CollectionError, Result};
use crate::traits::{Collection, PriorityQueue};
use std::fmt::{self, Write as _};

/// A binary min-heap over a [`DynamicArray`]
#[derive(Clone, Debug)]
pub struct MinHeap<T: Ord> {
    elements: DynamicArray<T>,
}

impl<T: Ord> MinHeap<T> {
    /// Creates an empty heap
    pub fn new() -> Self {
        MinHeap {
            elements: DynamicArray::new(),
        }
    }

    /// Returns the number of queued elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the index of `index`'s child on the given side, if it exists
    fn child(&self, index: usize, offset: usize) -> Option<usize> {
        let child = 2 * index + offset;
        (child < self.elements.len()).then_some(child)
    }

    /// Move element at index up to maintain heap property
    fn percolate_up(&mut self, mut index: usize) {
        let slots = self.elements.live_slots_mut();
        while index > 0 {
            let parent = (index - 1) / 2;
            if slots[index] < slots[parent] {
                slots.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    fn percolate_down(&mut self, mut index: usize) {
        let slots = self.elements.live_slots_mut();
        loop {
            let (left, right) = (2 * index + 1, 2 * index + 2);
            if left >= slots.len() {
                break;
            }
            let smallest = if right < slots.len() && slots[right] < slots[left] {
                right
            } else {
                left
            };
            if slots[index] > slots[smallest] {
                slots.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }

    /// Checks the heap-order property for every parent/child pair
    pub fn is_valid(&self) -> bool {
        self.elements
            .iter()
            .enumerate()
            .skip(1)
            .all(|(i, value)| match self.elements.get((i - 1) / 2) {
                Ok(parent) => parent <= value,
                Err(_) => false,
            })
    }
}

impl<T: Ord> PriorityQueue<T> for MinHeap<T> {
    fn enqueue(&mut self, value: T) {
        self.elements.add_last(value);
        self.percolate_up(self.elements.len() - 1);
    }

    fn dequeue(&mut self) -> Result<T> {
        if self.elements.is_empty() {
            return Err(CollectionError::EmptyCollection);
        }
        let last = self.elements.remove_last()?;
        if self.elements.is_empty() {
            return Ok(last);
        }
        let root = self.elements.set(0, last)?;
        self.percolate_down(0);
        Ok(root)
    }

    fn peek(&self) -> Result<&T> {
        self.elements
            .get(0)
            .map_err(|_| CollectionError::EmptyCollection)
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = MinHeap::new();
        for value in iter {
            heap.enqueue(value);
        }
        heap
    }
}

impl<T: Ord + fmt::Display> Collection for MinHeap<T> {
    fn len(&self) -> usize {
        self.elements.len()
    }

    /// One node per index labelled with its value, edges from parent to child
    fn graph_viz(&self, name: &str) -> String {
        let mut dot = format!("digraph {name} {{\n");
        if self.elements.is_empty() {
            dot.push_str("    null [shape=point];\n");
        } else {
            self.write_subtree(0, &mut dot);
        }
        dot.push_str("}\n");
        dot
    }
}

impl<T: Ord + fmt::Display> MinHeap<T> {
    fn write_subtree(&self, index: usize, dot: &mut String) {
        let Ok(value) = self.elements.get(index) else {
            return;
        };
        let _ = writeln!(dot, "    \"{index}\" [label=\"{value}\"];");
        for child in [self.child(index, 1), self.child(index, 2)].into_iter().flatten() {
            let _ = writeln!(dot, "    \"{index}\" -> \"{child}\";");
            self.write_subtree(child, dot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut heap = MinHeap::new();

        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);

        heap.enqueue(3);
        heap.enqueue(1);
        heap.enqueue(2);

        assert!(!heap.is_empty());
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek(), Ok(&1));

        assert_eq!(heap.dequeue(), Ok(1));
        assert_eq!(heap.dequeue(), Ok(2));
        assert_eq!(heap.dequeue(), Ok(3));
        assert_eq!(heap.dequeue(), Err(CollectionError::EmptyCollection));
    }

    #[test]
    fn test_peek_empty() {
        let heap: MinHeap<i32> = MinHeap::new();
        assert_eq!(heap.peek(), Err(CollectionError::EmptyCollection));
    }

    #[test]
    fn test_duplicate_priorities() {
        let mut heap: MinHeap<i32> = [1, 1, 1].into_iter().collect();
        assert_eq!(heap.len(), 3);
        for _ in 0..3 {
            assert_eq!(heap.dequeue(), Ok(1));
        }
    }

    #[test]
    fn test_ascending_insertion() {
        let mut heap = MinHeap::new();
        for i in 0..100 {
            heap.enqueue(i);
            assert!(heap.is_valid());
        }
        for i in 0..100 {
            assert_eq!(heap.dequeue(), Ok(i));
        }
    }

    #[test]
    fn test_descending_insertion() {
        let mut heap = MinHeap::new();
        for i in (0..100).rev() {
            heap.enqueue(i);
        }
        assert!(heap.is_valid());
        for i in 0..100 {
            assert_eq!(heap.dequeue(), Ok(i));
            assert!(heap.is_valid());
        }
    }

    #[test]
    fn test_interleaved_operations_across_growth() {
        let mut heap = MinHeap::new();
        let mut expected = Vec::new();
        for i in 0..200 {
            let value = (i * 37) % 101;
            heap.enqueue(value);
            expected.push(value);
            if i % 3 == 0 {
                expected.sort_unstable();
                assert_eq!(heap.dequeue(), Ok(expected.remove(0)));
            }
            assert!(heap.is_valid());
        }
        expected.sort_unstable();
        let drained: Vec<i32> = std::iter::from_fn(|| heap.dequeue().ok()).collect();
        assert_eq!(drained, expected);
    }

    #[test]
    fn test_graph_viz() {
        let heap: MinHeap<i32> = [2, 1, 3].into_iter().collect();
        assert_eq!(
            heap.graph_viz("Heap"),
            "digraph Heap {\n    \"0\" [label=\"1\"];\n    \"0\" -> \"1\";\n    \"1\" [label=\"2\"];\n    \"0\" -> \"2\";\n    \"2\" [label=\"3\"];\n}\n"
        );
        let empty: MinHeap<i32> = MinHeap::new();
        assert_eq!(empty.graph_viz("E"), "digraph E {\n    null [shape=point];\n}\n");
    }
}
