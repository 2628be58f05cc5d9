//! Common traits for the collections in this crate
//!
//! The traits split capabilities the same way the structures need them:
//!
//! - [`Collection`]: size queries and the diagnostic Graphviz export shared by every structure
//! - [`Searchable`]: equality-based search, with binary search only where ordered random access exists
//! - [`Sortable`]: in-place sorting with a caller-supplied three-way comparator
//! - [`PriorityQueue`]: min-first queue semantics used by the graph algorithms
//!
//! Comparators are injected per call (`Fn(&T, &T) -> Ordering`) so the
//! structures themselves stay comparator-agnostic.

use crate::error::{CollectionError, Result};
use std::cmp::Ordering;

/// Base trait for every collection
///
/// # Example
///
/// ```rust
/// use rust_classic_collections::Collection;
/// use rust_classic_collections::array::DynamicArray;
///
/// let mut array = DynamicArray::new();
/// array.add_last("a");
/// array.add_last("b");
///
/// assert_eq!(Collection::len(&array), 2);
/// assert_eq!(array.graph_viz("Chain"), "digraph Chain {\n\"a\" -> \"b\"\n}");
/// ```
pub trait Collection {
    /// Returns the number of elements in the collection
    fn len(&self) -> usize;

    /// Returns true if the collection holds no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders the internal structure as a Graphviz `digraph` named `name`
    ///
    /// The output is meant for external visualization tooling only.
    fn graph_viz(&self, name: &str) -> String;
}

/// Equality and comparator based search
pub trait Searchable<T> {
    /// Returns the index of the first element equal to `value`
    ///
    /// # Time Complexity
    /// O(n)
    fn linear_search(&self, value: &T) -> Option<usize>;

    /// Returns true if any element equals `value`
    fn contains(&self, value: &T) -> bool {
        self.linear_search(value).is_some()
    }

    /// Bisects the collection for an element comparing equal to `target`
    ///
    /// Collections without ordered random access keep this default and
    /// report [`CollectionError::Unsupported`].
    ///
    /// # Time Complexity
    /// O(log n) for the search itself; implementations may verify sortedness first.
    fn binary_search_by<F>(&self, target: &T, compare: F) -> Result<Option<usize>>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        let _ = (target, compare);
        Err(CollectionError::Unsupported("binary search"))
    }
}

/// In-place sorting with an injected comparator
pub trait Sortable<T> {
    /// Returns true if no element compares greater than its successor
    fn is_sorted_by<F>(&self, compare: F) -> bool
    where
        F: Fn(&T, &T) -> Ordering;

    /// Selection sort in ascending order
    ///
    /// # Time Complexity
    /// O(n²), not stable
    fn simple_sort_by<F>(&mut self, compare: F)
    where
        F: Fn(&T, &T) -> Ordering;

    /// Quick sort in ascending order, last element as pivot
    ///
    /// # Time Complexity
    /// O(n log n) average, O(n²) on already-sorted input
    fn quick_sort_by<F>(&mut self, compare: F)
    where
        F: Fn(&T, &T) -> Ordering;
}

/// Min-first priority queue
///
/// # Example
///
/// ```rust
/// use rust_classic_collections::PriorityQueue;
/// use rust_classic_collections::heap::MinHeap;
///
/// let mut heap = MinHeap::new();
/// heap.enqueue(3);
/// heap.enqueue(1);
/// heap.enqueue(2);
///
/// assert_eq!(heap.peek(), Ok(&1));
/// assert_eq!(heap.dequeue(), Ok(1));
/// ```
pub trait PriorityQueue<T> {
    /// Inserts a value
    ///
    /// # Time Complexity
    /// O(log n)
    fn enqueue(&mut self, value: T);

    /// Removes and returns the minimum
    ///
    /// # Errors
    /// Returns [`CollectionError::EmptyCollection`] when there is nothing to remove.
    fn dequeue(&mut self) -> Result<T>;

    /// Returns the minimum without removing it
    ///
    /// # Errors
    /// Returns [`CollectionError::EmptyCollection`] when there is nothing to peek at.
    fn peek(&self) -> Result<&T>;
}

/// Lifts a comparator over `T` to `Option<T>`, placing missing values first
///
/// A missing value compares less than any present value and equal to another
/// missing value, so a present value followed by a missing one is unsorted.
///
/// ```rust
/// use rust_classic_collections::traits::nulls_first;
/// use std::cmp::Ordering;
///
/// let compare = nulls_first(|a: &i32, b: &i32| a.cmp(b));
/// assert_eq!(compare(&None, &Some(1)), Ordering::Less);
/// assert_eq!(compare(&Some(1), &None), Ordering::Greater);
/// assert_eq!(compare(&None, &None), Ordering::Equal);
/// ```
pub fn nulls_first<T, F>(compare: F) -> impl Fn(&Option<T>, &Option<T>) -> Ordering
where
    F: Fn(&T, &T) -> Ordering,
{
    move |a, b| match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare(a, b),
    }
}
