//! LIFO stack over a [`DynamicArray`]
//!
//! The top of the stack is the last element of the array, so `push` and `pop`
//! never shift anything. Depth-first graph iteration uses this as its work list.

use crate::array::DynamicArray;
use crate::error::{CollectionError, Result};
use crate::traits::{Collection, Searchable};
use std::fmt::{self, Write as _};

/// A last-in, first-out stack
#[derive(Clone, Debug)]
pub struct Stack<T> {
    elements: DynamicArray<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack
    pub fn new() -> Self {
        Stack {
            elements: DynamicArray::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Places `value` on top of the stack
    pub fn push(&mut self, value: T) {
        self.elements.add_last(value);
    }

    /// Removes and returns the top element
    ///
    /// # Errors
    /// [`CollectionError::EmptyCollection`] if the stack is empty.
    pub fn pop(&mut self) -> Result<T> {
        self.elements
            .remove_last()
            .map_err(|_| CollectionError::EmptyCollection)
    }

    /// Returns the top element without removing it
    ///
    /// # Errors
    /// [`CollectionError::EmptyCollection`] if the stack is empty.
    pub fn peek(&self) -> Result<&T> {
        let top = self
            .elements
            .len()
            .checked_sub(1)
            .ok_or(CollectionError::EmptyCollection)?;
        self.elements.get(top)
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

/// Linear search only; a stack has no ordered random access, so binary search
/// keeps the unsupported default
impl<T: PartialEq> Searchable<T> for Stack<T> {
    fn linear_search(&self, value: &T) -> Option<usize> {
        self.elements.linear_search(value)
    }
}

impl<T: fmt::Display> Collection for Stack<T> {
    fn len(&self) -> usize {
        self.elements.len()
    }

    /// Records from top to bottom, chained downwards
    fn graph_viz(&self, name: &str) -> String {
        let mut dot = format!("digraph \"{name}\" {{\n");
        if self.elements.is_empty() {
            dot.push_str("  node [shape=plaintext];\n");
            dot.push_str("  emptyNode [label=\"Empty Stack\"];\n");
            dot.push_str("}\n");
            return dot;
        }
        dot.push_str("rankdir=BT;\n  node [shape=record];\n");
        for (id, value) in self.elements.iter().rev().enumerate() {
            let _ = writeln!(dot, "  node{id} [label=\"{{ {value} }}\"];");
        }
        for id in 1..self.elements.len() {
            let _ = writeln!(dot, "  node{} -> node{id};", id - 1);
        }
        dot.push_str("}\n");
        dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_order() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.peek(), Ok(&3));
        assert_eq!(stack.pop(), Ok(3));
        assert_eq!(stack.pop(), Ok(2));
        assert_eq!(stack.pop(), Ok(1));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_empty_stack() {
        let mut stack: Stack<i32> = Stack::new();
        assert_eq!(stack.pop(), Err(CollectionError::EmptyCollection));
        assert_eq!(stack.peek(), Err(CollectionError::EmptyCollection));
    }

    #[test]
    fn test_search() {
        let mut stack = Stack::new();
        stack.extend(["a", "b"]);
        assert!(stack.contains(&"b"));
        assert_eq!(stack.linear_search(&"c"), None);
        assert_eq!(
            stack.binary_search_by(&"a", |x, y| x.cmp(y)),
            Err(CollectionError::Unsupported("binary search"))
        );
    }

    #[test]
    fn test_graph_viz() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        assert_eq!(
            stack.graph_viz("S"),
            "digraph \"S\" {\nrankdir=BT;\n  node [shape=record];\n  node0 [label=\"{ 2 }\"];\n  node1 [label=\"{ 1 }\"];\n  node0 -> node1;\n}\n"
        );
        let empty: Stack<i32> = Stack::new();
        assert_eq!(
            empty.graph_viz("S"),
            "digraph \"S\" {\n  node [shape=plaintext];\n  emptyNode [label=\"Empty Stack\"];\n}\n"
        );
    }
}
