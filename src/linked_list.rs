//! Doubly linked list over a slot-map arena
//!
//! Nodes live in a [`SlotMap`] and link to their neighbours by key, so the
//! list needs no `Rc`/`RefCell` or raw pointers. Removing a node frees its
//! slot; the generational keys of the remaining nodes stay valid.
//!
//! Positional access walks from whichever end is closer to the index.
//!
//! # Time Complexity
//!
//! | Operation                           | Complexity |
//! |-------------------------------------|------------|
//! | `add_first` / `add_last`            | O(1)       |
//! | `remove_first` / `remove_last`      | O(1)       |
//! | `get` / `set` / `add_at` / `remove_at` | O(n)    |
//! | `linear_search` / `remove`          | O(n)       |
//!
//! # Example
//!
//! ```rust
//! use rust_classic_collections::linked_list::DoublyLinkedList;
//!
//! let mut list = DoublyLinkedList::new();
//! list.add_last(2);
//! list.add_first(1);
//! list.add_at(2, 5).unwrap();
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 5]);
//! assert_eq!(list.remove_at(1), Ok(2));
//! assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![5, 1]);
//! ```

use crate::error::{CollectionError, Result};
use crate::traits::{Collection, Searchable};
use slotmap::{new_key_type, SlotMap};
use std::fmt::{self, Write as _};

new_key_type! {
    /// Arena key of a list node
    struct NodeKey;
}

#[derive(Clone, Debug)]
struct ListNode<T> {
    value: T,
    prev: Option<NodeKey>,
    next: Option<NodeKey>,
}

/// A doubly linked list with O(1) insertion and removal at both ends
#[derive(Clone)]
pub struct DoublyLinkedList<T> {
    nodes: SlotMap<NodeKey, ListNode<T>>,
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
}

impl<T> DoublyLinkedList<T> {
    /// Creates an empty list
    pub fn new() -> Self {
        DoublyLinkedList {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn out_of_range(&self, index: usize) -> CollectionError {
        CollectionError::IndexOutOfRange {
            index,
            len: self.len(),
        }
    }

    /// Finds the key at `index`, walking from the nearer end
    fn key_at(&self, index: usize) -> Result<NodeKey> {
        let len = self.len();
        if index >= len {
            return Err(self.out_of_range(index));
        }
        let (mut current, steps, forward) = if index < len / 2 {
            (self.head, index, true)
        } else {
            (self.tail, len - 1 - index, false)
        };
        for _ in 0..steps {
            current = current
                .and_then(|key| self.nodes.get(key))
                .and_then(|node| if forward { node.next } else { node.prev });
        }
        current.ok_or_else(|| self.out_of_range(index))
    }

    /// Returns the element at `index`
    ///
    /// # Errors
    /// [`CollectionError::IndexOutOfRange`] unless `index < len()`.
    pub fn get(&self, index: usize) -> Result<&T> {
        let key = self.key_at(index)?;
        self.nodes
            .get(key)
            .map(|node| &node.value)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Returns a mutable reference to the element at `index`
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let key = self.key_at(index)?;
        let err = self.out_of_range(index);
        self.nodes.get_mut(key).map(|node| &mut node.value).ok_or(err)
    }

    /// Replaces the element at `index`, returning the previous one
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        Ok(std::mem::replace(self.get_mut(index)?, value))
    }

    /// Inserts `value` before the current head
    pub fn add_first(&mut self, value: T) {
        let key = self.nodes.insert(ListNode {
            value,
            prev: None,
            next: self.head,
        });
        match self.head.and_then(|head| self.nodes.get_mut(head)) {
            Some(old_head) => old_head.prev = Some(key),
            None => self.tail = Some(key),
        }
        self.head = Some(key);
    }

    /// Appends `value` after the current tail
    pub fn add_last(&mut self, value: T) {
        let key = self.nodes.insert(ListNode {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail.and_then(|tail| self.nodes.get_mut(tail)) {
            Some(old_tail) => old_tail.next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
    }

    /// Inserts `value` so that it ends up at `index`
    ///
    /// # Errors
    /// [`CollectionError::IndexOutOfRange`] unless `index <= len()`.
    pub fn add_at(&mut self, index: usize, value: T) -> Result<()> {
        if index == 0 {
            self.add_first(value);
            return Ok(());
        }
        if index == self.len() {
            self.add_last(value);
            return Ok(());
        }
        let next = self.key_at(index)?;
        let prev = self.nodes.get(next).and_then(|node| node.prev);
        let key = self.nodes.insert(ListNode {
            value,
            prev,
            next: Some(next),
        });
        if let Some(node) = self.nodes.get_mut(next) {
            node.prev = Some(key);
        }
        if let Some(node) = prev.and_then(|prev| self.nodes.get_mut(prev)) {
            node.next = Some(key);
        }
        Ok(())
    }

    /// Detaches the node at `key` and relinks its neighbours
    fn unlink(&mut self, key: NodeKey) -> Option<T> {
        let node = self.nodes.remove(key)?;
        match node.prev.and_then(|prev| self.nodes.get_mut(prev)) {
            Some(prev) => prev.next = node.next,
            None => self.head = node.next,
        }
        match node.next.and_then(|next| self.nodes.get_mut(next)) {
            Some(next) => next.prev = node.prev,
            None => self.tail = node.prev,
        }
        Some(node.value)
    }

    /// Removes and returns the first element
    ///
    /// # Errors
    /// [`CollectionError::EmptyCollection`] if the list is empty.
    pub fn remove_first(&mut self) -> Result<T> {
        let head = self.head.ok_or(CollectionError::EmptyCollection)?;
        self.unlink(head).ok_or(CollectionError::EmptyCollection)
    }

    /// Removes and returns the last element
    ///
    /// # Errors
    /// [`CollectionError::EmptyCollection`] if the list is empty.
    pub fn remove_last(&mut self) -> Result<T> {
        let tail = self.tail.ok_or(CollectionError::EmptyCollection)?;
        self.unlink(tail).ok_or(CollectionError::EmptyCollection)
    }

    /// Removes and returns the element at `index`
    ///
    /// # Errors
    /// [`CollectionError::IndexOutOfRange`] unless `index < len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let key = self.key_at(index)?;
        let err = self.out_of_range(index);
        self.unlink(key).ok_or(err)
    }

    /// Drops every element
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates from head to tail; `.rev()` walks from tail to head
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }
}

impl<T: PartialEq + fmt::Debug> DoublyLinkedList<T> {
    /// Removes the first element equal to `value`
    ///
    /// # Errors
    /// [`CollectionError::ValueNotFound`] if no element equals `value`.
    pub fn remove(&mut self, value: &T) -> Result<T> {
        let mut current = self.head;
        while let Some(key) = current {
            let Some(node) = self.nodes.get(key) else {
                break;
            };
            if node.value == *value {
                return self
                    .unlink(key)
                    .ok_or_else(|| CollectionError::ValueNotFound(format!("{value:?}")));
            }
            current = node.next;
        }
        Err(CollectionError::ValueNotFound(format!("{value:?}")))
    }
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DoublyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for DoublyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add_last(value);
        }
    }
}

impl<T> FromIterator<T> for DoublyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = DoublyLinkedList::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a DoublyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Linear search only; there is no random access to bisect over
impl<T: PartialEq> Searchable<T> for DoublyLinkedList<T> {
    fn linear_search(&self, value: &T) -> Option<usize> {
        self.iter().position(|element| element == value)
    }
}

impl<T: fmt::Display> Collection for DoublyLinkedList<T> {
    fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Records with `prev`/`next` ports, linked both ways
    fn graph_viz(&self, name: &str) -> String {
        let mut dot = format!("digraph \"{name}\" {{\n");
        if self.is_empty() {
            dot.push_str("  node [shape=plaintext];\n");
            dot.push_str("  emptyNode [label=\"Empty List\"];\n");
            dot.push_str("}\n");
            return dot;
        }
        dot.push_str("rankdir=LR;\n  node [shape=record];\n");
        for (id, value) in self.iter().enumerate() {
            let _ = writeln!(dot, "  node{id} [label=\"{{<prev> | {value} | <next> }}\"];");
        }
        for id in 1..self.len() {
            let _ = writeln!(dot, "  node{}:next -> node{id}:prev;", id - 1);
            let _ = writeln!(dot, "  node{id}:prev -> node{}:next;", id - 1);
        }
        dot.push_str("}\n");
        dot
    }
}

/// Double-ended iterator over a [`DoublyLinkedList`]
pub struct Iter<'a, T> {
    list: &'a DoublyLinkedList<T>,
    front: Option<NodeKey>,
    back: Option<NodeKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.nodes.get(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.nodes.get(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
