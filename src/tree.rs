//! Ordered map backed by a binary search tree
//!
//! [`OrderedMap`] owns its nodes through `Option<Box<Node>>` links, so the tree
//! has no parent pointers and no shared nodes. Rebalancing is a strategy chosen
//! by type parameter:
//!
//! - [`Unbalanced`]: a plain binary search tree ([`BinarySearchTree`])
//! - [`Avl`](crate::avl::Avl): height-balanced after every insert and delete ([`AvlTree`])
//!
//! Both share the same descent, deletion and traversal code; the strategy only
//! runs on each node on the way back up from an insert or delete.
//!
//! # Example
//!
//! ```rust
//! use rust_classic_collections::tree::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for (code, name) in [("asd", "Amsterdam"), ("ut", "Utrecht"), ("rtd", "Rotterdam")] {
//!     tree.add(code, name).unwrap();
//! }
//!
//! assert_eq!(tree.get(&"ut"), Ok(&"Utrecht"));
//! assert_eq!(tree.keys().iter().map(|k| **k).collect::<Vec<_>>(), vec!["asd", "rtd", "ut"]);
//! assert!(tree.check_invariants().is_ok());
//! ```

use crate::array::DynamicArray;
pub use crate::avl::Avl;
use crate::error::{CollectionError, Result};
use crate::traits::Collection;
use std::cmp::Ordering;
use std::fmt::{self, Write as _};
use std::marker::PhantomData;

pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// A tree node owning its key, value and both subtrees
#[derive(Clone, Debug)]
pub struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    /// Height of the subtree rooted here; a leaf has height 1
    pub(crate) height: usize,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Node {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn left(&self) -> Option<&Node<K, V>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<K, V>> {
        self.right.as_deref()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn link_height(link: &Link<K, V>) -> usize {
        link.as_ref().map_or(0, |node| node.height)
    }

    pub(crate) fn update_height(&mut self) {
        self.height = 1 + Self::link_height(&self.left).max(Self::link_height(&self.right));
    }

    /// Height of the left subtree minus height of the right subtree
    pub fn balance_factor(&self) -> isize {
        Self::link_height(&self.left) as isize - Self::link_height(&self.right) as isize
    }
}

/// Rebalancing strategy applied to each node on the path back to the root
pub trait Balance {
    /// Whether trees using this strategy promise `|balance factor| <= 1`
    const BALANCED: bool;

    /// Restores the strategy's shape invariant for the subtree rooted at `node`
    ///
    /// The children of `node` already satisfy it and the height of `node` is
    /// up to date. Returns the new subtree root.
    fn rebalance<K, V>(node: Box<Node<K, V>>) -> Box<Node<K, V>>;
}

/// No rebalancing: the tree's shape depends on insertion order
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbalanced;

impl Balance for Unbalanced {
    const BALANCED: bool = false;

    fn rebalance<K, V>(node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        node
    }
}

/// Key-ordered map with unique keys
pub struct OrderedMap<K, V, B = Unbalanced> {
    root: Link<K, V>,
    size: usize,
    _balance: PhantomData<B>,
}

/// Plain binary search tree
pub type BinarySearchTree<K, V> = OrderedMap<K, V, Unbalanced>;

/// Height-balanced binary search tree
pub type AvlTree<K, V> = OrderedMap<K, V, Avl>;

impl<K, V, B> OrderedMap<K, V, B> {
    /// Creates an empty map
    pub fn new() -> Self {
        OrderedMap {
            root: None,
            size: 0,
            _balance: PhantomData,
        }
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no entries
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the root node, if any
    pub fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// Returns the height of the tree; an empty tree has height 0
    pub fn height(&self) -> usize {
        Node::link_height(&self.root)
    }

    /// In-order (ascending key) iterator over `(key, value)` pairs
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            stack: DynamicArray::new(),
        };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Returns every key in ascending order
    pub fn keys(&self) -> DynamicArray<&K> {
        self.iter().map(|(key, _)| key).collect()
    }
}

impl<K, V, B> OrderedMap<K, V, B>
where
    K: Ord + fmt::Debug,
    B: Balance,
{
    fn search(&self, key: &K) -> Option<&Node<K, V>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Returns true if `key` is present
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Returns the value stored under `key`
    ///
    /// # Errors
    /// [`CollectionError::KeyNotFound`] if `key` is absent.
    pub fn get(&self, key: &K) -> Result<&V> {
        self.search(key)
            .map(|node| &node.value)
            .ok_or_else(|| CollectionError::key_not_found(key))
    }

    /// Returns a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => return Ok(&mut node.value),
            };
        }
        Err(CollectionError::key_not_found(key))
    }

    /// Inserts a new entry
    ///
    /// # Errors
    /// [`CollectionError::DuplicateKey`] if `key` is already present.
    pub fn add(&mut self, key: K, value: V) -> Result<()> {
        Self::insert(&mut self.root, key, value)?;
        self.size += 1;
        Ok(())
    }

    fn insert(slot: &mut Link<K, V>, key: K, value: V) -> Result<()> {
        let Some(node) = slot.as_mut() else {
            *slot = Some(Box::new(Node::new(key, value)));
            return Ok(());
        };
        match key.cmp(&node.key) {
            Ordering::Less => Self::insert(&mut node.left, key, value)?,
            Ordering::Greater => Self::insert(&mut node.right, key, value)?,
            Ordering::Equal => return Err(CollectionError::duplicate_key(&key)),
        }
        Self::rebalance_slot(slot);
        Ok(())
    }

    /// Removes `key` and returns its value
    ///
    /// A node with two children takes over the key and value of its in-order
    /// successor, which is then unlinked from the right subtree.
    ///
    /// # Errors
    /// [`CollectionError::KeyNotFound`] if `key` is absent.
    pub fn remove(&mut self, key: &K) -> Result<V> {
        let value =
            Self::delete(&mut self.root, key).ok_or_else(|| CollectionError::key_not_found(key))?;
        self.size -= 1;
        Ok(value)
    }

    fn delete(slot: &mut Link<K, V>, key: &K) -> Option<V> {
        let removed = match key.cmp(&slot.as_ref()?.key) {
            Ordering::Less => Self::delete(&mut slot.as_mut()?.left, key)?,
            Ordering::Greater => Self::delete(&mut slot.as_mut()?.right, key)?,
            Ordering::Equal => {
                let mut node = slot.take()?;
                match (node.left.take(), node.right.take()) {
                    (None, child) | (child, None) => {
                        *slot = child;
                        return Some(node.value);
                    }
                    (left, right) => {
                        let mut right = right;
                        let successor = Self::take_min(&mut right)?;
                        node.left = left;
                        node.right = right;
                        node.key = successor.key;
                        let value = std::mem::replace(&mut node.value, successor.value);
                        *slot = Some(node);
                        value
                    }
                }
            }
        };
        Self::rebalance_slot(slot);
        Some(removed)
    }

    /// Unlinks the minimum node of the subtree, rebalancing on the way back up
    fn take_min(slot: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
        let node = slot.as_mut()?;
        if node.left.is_some() {
            let min = Self::take_min(&mut node.left);
            Self::rebalance_slot(slot);
            return min;
        }
        let mut node = slot.take()?;
        *slot = node.right.take();
        Some(node)
    }

    fn rebalance_slot(slot: &mut Link<K, V>) {
        if let Some(mut node) = slot.take() {
            node.update_height();
            *slot = Some(B::rebalance(node));
        }
    }

    /// Verifies ordering, stored heights, size and (for balanced strategies)
    /// the AVL balance condition
    ///
    /// # Errors
    /// [`CollectionError::IllegalState`] describing the first violation found.
    pub fn check_invariants(&self) -> Result<()> {
        let count = Self::check_subtree(&self.root)?;
        if count != self.size {
            return Err(CollectionError::IllegalState(format!(
                "size is {} but the tree holds {count} nodes",
                self.size
            )));
        }
        let mut previous: Option<&K> = None;
        for (key, _) in self.iter() {
            if previous.is_some_and(|previous| previous >= key) {
                return Err(CollectionError::IllegalState(format!(
                    "key {key:?} is out of order"
                )));
            }
            previous = Some(key);
        }
        Ok(())
    }

    /// Returns the number of nodes in the subtree
    fn check_subtree(link: &Link<K, V>) -> Result<usize> {
        let Some(node) = link else {
            return Ok(0);
        };
        let count = Self::check_subtree(&node.left)? + Self::check_subtree(&node.right)? + 1;
        let expected =
            1 + Node::link_height(&node.left).max(Node::link_height(&node.right));
        if node.height != expected {
            return Err(CollectionError::IllegalState(format!(
                "node {:?} stores height {} but has height {expected}",
                node.key, node.height
            )));
        }
        if B::BALANCED && node.balance_factor().abs() > 1 {
            return Err(CollectionError::IllegalState(format!(
                "node {:?} has balance factor {}",
                node.key,
                node.balance_factor()
            )));
        }
        Ok(count)
    }
}

impl<K: fmt::Display, V, B> OrderedMap<K, V, B> {
    /// Collects every value whose key, rendered as text, starts with `prefix`
    ///
    /// Matching ignores case. Prefix order is not key order, so the whole tree
    /// is visited (node, then left, then right).
    pub fn get_by_prefix(&self, prefix: &str) -> DynamicArray<&V> {
        let prefix = prefix.to_lowercase();
        let mut results = DynamicArray::new();
        let mut pending = DynamicArray::new();
        pending.extend(self.root.as_deref());
        while let Ok(node) = pending.remove_last() {
            if node.key.to_string().to_lowercase().starts_with(&prefix) {
                results.add_last(&node.value);
            }
            pending.extend(node.right.as_deref());
            pending.extend(node.left.as_deref());
        }
        results
    }
}

impl<K, V, B> Default for OrderedMap<K, V, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone, B> Clone for OrderedMap<K, V, B> {
    fn clone(&self) -> Self {
        OrderedMap {
            root: self.root.clone(),
            size: self.size,
            _balance: PhantomData,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, B> fmt::Debug for OrderedMap<K, V, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, B> Collection for OrderedMap<K, V, B> {
    fn len(&self) -> usize {
        self.size
    }

    /// One node per key labelled `key: value`, edges from parent to child
    fn graph_viz(&self, name: &str) -> String {
        let mut dot = format!("digraph {name} {{\n");
        match self.root.as_deref() {
            None => dot.push_str("    null [shape=point];\n"),
            Some(root) => write_subtree(root, &mut dot),
        }
        dot.push_str("}\n");
        dot
    }
}

fn write_subtree<K: fmt::Display, V: fmt::Display>(node: &Node<K, V>, dot: &mut String) {
    let _ = writeln!(dot, "    \"{}\" [label=\"{}: {}\"];", node.key, node.key, node.value);
    for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
        let _ = writeln!(dot, "    \"{}\" -> \"{}\";", node.key, child.key);
        write_subtree(child, dot);
    }
}

/// In-order iterator returned by [`OrderedMap::iter`]
pub struct Iter<'a, K, V> {
    stack: DynamicArray<&'a Node<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(current) = node {
            self.stack.add_last(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.remove_last().ok()?;
        self.push_left_spine(node.right.as_deref());
        Some((&node.key, &node.value))
    }
}
