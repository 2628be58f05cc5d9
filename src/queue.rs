//! FIFO queue over a [`DoublyLinkedList`]
//!
//! Elements join at the tail and leave from the head, both O(1).

use crate::error::{CollectionError, Result};
use crate::linked_list::DoublyLinkedList;
use crate::traits::{Collection, Searchable};
use std::fmt::{self, Write as _};

/// A first-in, first-out queue
#[derive(Clone, Debug)]
pub struct Queue<T> {
    elements: DoublyLinkedList<T>,
}

impl<T> Queue<T> {
    /// Creates an empty queue
    pub fn new() -> Self {
        Queue {
            elements: DoublyLinkedList::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Adds `value` at the back of the queue
    pub fn enqueue(&mut self, value: T) {
        self.elements.add_last(value);
    }

    /// Removes and returns the front element
    ///
    /// # Errors
    /// [`CollectionError::EmptyCollection`] if the queue is empty.
    pub fn dequeue(&mut self) -> Result<T> {
        self.elements.remove_first()
    }

    /// Returns the front element without removing it
    ///
    /// # Errors
    /// [`CollectionError::EmptyCollection`] if the queue is empty.
    pub fn peek(&self) -> Result<&T> {
        self.elements
            .get(0)
            .map_err(|_| CollectionError::EmptyCollection)
    }

    /// Iterates from front to back
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.elements.iter()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Queue {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T: PartialEq> Searchable<T> for Queue<T> {
    fn linear_search(&self, value: &T) -> Option<usize> {
        self.elements.linear_search(value)
    }
}

impl<T: fmt::Display> Collection for Queue<T> {
    fn len(&self) -> usize {
        self.elements.len()
    }

    /// Records from front to back, chained left to right
    fn graph_viz(&self, name: &str) -> String {
        let mut dot = format!("digraph \"{name}\" {{\n");
        if self.is_empty() {
            dot.push_str("  node [shape=plaintext];\n");
            dot.push_str("  emptyNode [label=\"Empty Queue\"];\n");
            dot.push_str("}\n");
            return dot;
        }
        dot.push_str("rankdir=LR;\n  node [shape=record];\n");
        for (id, value) in self.iter().enumerate() {
            let _ = writeln!(dot, "  node{id} [label=\"{{ {value} }}\"];");
        }
        for id in 1..self.len() {
            let _ = writeln!(dot, "  node{} -> node{id};", id - 1);
        }
        dot.push_str("}\n");
        dot
    }
}
