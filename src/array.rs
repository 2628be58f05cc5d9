//! Dynamic Array implementation
//!
//! A contiguous, growable sequence that every other structure in this crate
//! uses for its internal storage.
//!
//! The backing store is a boxed slice of slots. Slots `0..len` are always
//! occupied; everything after `len` is spare capacity. When an insert finds no
//! spare slot the store is reallocated: capacity doubles while it is below
//! [`MAXIMUM_EXTENSION`], and grows by [`MAXIMUM_EXTENSION`] after that. The
//! array never shrinks on its own.
//!
//! # Time Complexity
//!
//! | Operation                     | Complexity       |
//! |-------------------------------|------------------|
//! | `get` / `set`                 | O(1)             |
//! | `add_last` / `remove_last`    | O(1) amortized   |
//! | `add_at` / `remove_at`        | O(n)             |
//! | `linear_search` / `contains`  | O(n)             |
//! | `simple_sort_by`              | O(n²)            |
//! | `quick_sort_by`               | O(n log n) avg   |
//! | `binary_search_by`            | O(n) (sortedness check) |
//!
//! # Example
//!
//! ```rust
//! use rust_classic_collections::array::DynamicArray;
//! use rust_classic_collections::{Searchable, Sortable};
//!
//! let mut array: DynamicArray<i32> = [5, 3, 8, 1].into_iter().collect();
//! array.quick_sort_by(|a, b| a.cmp(b));
//!
//! assert_eq!(array.get(0), Ok(&1));
//! assert_eq!(array.binary_search_by(&8, |a, b| a.cmp(b)), Ok(Some(3)));
//! ```

use crate::error::{CollectionError, Result};
use crate::traits::{nulls_first, Collection, Searchable, Sortable};
use std::cmp::Ordering;
use std::fmt::{self, Write as _};

/// Capacity used by [`DynamicArray::new`]
pub const MINIMUM_CAPACITY: usize = 32;

/// Largest single growth step; below it the capacity doubles instead
pub const MAXIMUM_EXTENSION: usize = 256;

/// A growable, index-addressed sequence
#[derive(Clone)]
pub struct DynamicArray<T> {
    /// Slots `0..size` are `Some`, the rest are spare capacity
    elements: Box<[Option<T>]>,
    size: usize,
}

fn empty_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

fn next_capacity(capacity: usize) -> usize {
    if capacity < MAXIMUM_EXTENSION {
        (capacity * 2).max(1)
    } else {
        capacity + MAXIMUM_EXTENSION
    }
}

impl<T> DynamicArray<T> {
    /// Creates an empty array with [`MINIMUM_CAPACITY`] slots
    pub fn new() -> Self {
        Self::with_capacity(MINIMUM_CAPACITY)
    }

    /// Creates an empty array with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        DynamicArray {
            elements: empty_slots(capacity),
            size: 0,
        }
    }

    /// Returns the number of elements
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the array holds no elements
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots currently allocated
    pub fn capacity(&self) -> usize {
        self.elements.len()
    }

    fn out_of_range(&self, index: usize) -> CollectionError {
        CollectionError::IndexOutOfRange {
            index,
            len: self.size,
        }
    }

    /// Returns the element at `index`
    ///
    /// # Errors
    /// [`CollectionError::IndexOutOfRange`] unless `index < len()`.
    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.size {
            return Err(self.out_of_range(index));
        }
        self.elements[index]
            .as_ref()
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Returns a mutable reference to the element at `index`
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let err = self.out_of_range(index);
        if index >= self.size {
            return Err(err);
        }
        self.elements[index].as_mut().ok_or(err)
    }

    /// Replaces the element at `index`, returning the previous one
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let err = self.out_of_range(index);
        if index >= self.size {
            return Err(err);
        }
        self.elements[index].replace(value).ok_or(err)
    }

    /// Swaps the elements at positions `a` and `b`
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        for index in [a, b] {
            if index >= self.size {
                return Err(self.out_of_range(index));
            }
        }
        self.elements.swap(a, b);
        Ok(())
    }

    /// Inserts `value` at the front, shifting every element one place right
    pub fn add_first(&mut self, value: T) {
        self.insert_slot(0, value);
    }

    /// Appends `value` at the end
    pub fn add_last(&mut self, value: T) {
        self.insert_slot(self.size, value);
    }

    /// Inserts `value` at `index`, shifting the remainder right
    ///
    /// # Errors
    /// [`CollectionError::IndexOutOfRange`] unless `index <= len()`.
    pub fn add_at(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.size {
            return Err(self.out_of_range(index));
        }
        self.insert_slot(index, value);
        Ok(())
    }

    /// `index` must be in `0..=size`
    fn insert_slot(&mut self, index: usize, value: T) {
        if self.size == self.elements.len() {
            self.grow();
        }
        // the free slot at `size` rotates down to `index`
        self.elements[index..=self.size].rotate_right(1);
        self.elements[index] = Some(value);
        self.size += 1;
    }

    fn grow(&mut self) {
        let capacity = next_capacity(self.elements.len());
        log::trace!(
            "growing dynamic array from {} to {} slots",
            self.elements.len(),
            capacity
        );
        let mut elements = empty_slots(capacity);
        for (target, source) in elements.iter_mut().zip(self.elements.iter_mut()) {
            *target = source.take();
        }
        self.elements = elements;
    }

    /// Removes and returns the first element
    ///
    /// # Errors
    /// [`CollectionError::EmptyCollection`] if the array is empty.
    pub fn remove_first(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(CollectionError::EmptyCollection);
        }
        self.remove_at(0)
    }

    /// Removes and returns the last element
    ///
    /// # Errors
    /// [`CollectionError::EmptyCollection`] if the array is empty.
    pub fn remove_last(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(CollectionError::EmptyCollection);
        }
        self.remove_at(self.size - 1)
    }

    /// Removes the element at `index`, shifting the remainder left
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.size {
            return Err(self.out_of_range(index));
        }
        let value = self.elements[index].take();
        self.elements[index..self.size].rotate_left(1);
        self.size -= 1;
        value.ok_or_else(|| self.out_of_range(index))
    }

    /// Drops every element, keeping the allocated capacity
    pub fn clear(&mut self) {
        for slot in &mut self.elements[..self.size] {
            *slot = None;
        }
        self.size = 0;
    }

    /// Returns an iterator over the elements in index order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.elements[..self.size].iter(),
        }
    }

    /// The occupied slots `0..len()`; every one of them is `Some`
    pub(crate) fn live_slots_mut(&mut self) -> &mut [Option<T>] {
        &mut self.elements[..self.size]
    }
}

impl<T: PartialEq + fmt::Debug> DynamicArray<T> {
    /// Removes the first element equal to `value`
    ///
    /// # Errors
    /// [`CollectionError::ValueNotFound`] if no element equals `value`.
    pub fn remove(&mut self, value: &T) -> Result<T> {
        match self.linear_search(value) {
            Some(index) => self.remove_at(index),
            None => Err(CollectionError::ValueNotFound(format!("{value:?}"))),
        }
    }
}

impl<T: PartialEq> Searchable<T> for DynamicArray<T> {
    fn linear_search(&self, value: &T) -> Option<usize> {
        self.iter().position(|element| element == value)
    }

    /// Returns the lowest index comparing equal to `target`
    ///
    /// An array that is not sorted under `compare` yields `Ok(None)` without
    /// searching.
    fn binary_search_by<F>(&self, target: &T, compare: F) -> Result<Option<usize>>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        if !self.is_sorted_by(&compare) {
            return Ok(None);
        }
        let mut found = None;
        let (mut low, mut high) = (0, self.size);
        while low < high {
            let middle = low + (high - low) / 2;
            match compare(self.get(middle)?, target) {
                Ordering::Equal => {
                    found = Some(middle);
                    high = middle;
                }
                Ordering::Less => low = middle + 1,
                Ordering::Greater => high = middle,
            }
        }
        Ok(found)
    }
}

impl<T> Sortable<T> for DynamicArray<T> {
    fn is_sorted_by<F>(&self, compare: F) -> bool
    where
        F: Fn(&T, &T) -> Ordering,
    {
        let mut iter = self.iter();
        let Some(mut previous) = iter.next() else {
            return true;
        };
        for current in iter {
            if compare(previous, current) == Ordering::Greater {
                return false;
            }
            previous = current;
        }
        true
    }

    fn simple_sort_by<F>(&mut self, compare: F)
    where
        F: Fn(&T, &T) -> Ordering,
    {
        selection_sort(self.live_slots_mut(), &nulls_first(compare));
    }

    fn quick_sort_by<F>(&mut self, compare: F)
    where
        F: Fn(&T, &T) -> Ordering,
    {
        quick_sort(self.live_slots_mut(), &nulls_first(compare));
    }
}

fn selection_sort<S, F>(slots: &mut [S], compare: &F)
where
    F: Fn(&S, &S) -> Ordering,
{
    for index in 0..slots.len() {
        let mut smallest = index;
        for candidate in index + 1..slots.len() {
            if compare(&slots[smallest], &slots[candidate]) == Ordering::Greater {
                smallest = candidate;
            }
        }
        slots.swap(index, smallest);
    }
}

fn quick_sort<S, F>(slots: &mut [S], compare: &F)
where
    F: Fn(&S, &S) -> Ordering,
{
    if slots.len() < 2 {
        return;
    }
    let pivot = partition(slots, compare);
    let (left, right) = slots.split_at_mut(pivot);
    quick_sort(left, compare);
    quick_sort(&mut right[1..], compare);
}

/// Lomuto partition around the last element; returns the pivot's final index
fn partition<S, F>(slots: &mut [S], compare: &F) -> usize
where
    F: Fn(&S, &S) -> Ordering,
{
    let last = slots.len() - 1;
    let mut store = 0;
    for index in 0..last {
        if compare(&slots[index], &slots[last]) != Ordering::Greater {
            slots.swap(index, store);
            store += 1;
        }
    }
    slots.swap(store, last);
    store
}

impl<T: fmt::Display> Collection for DynamicArray<T> {
    fn len(&self) -> usize {
        self.size
    }

    /// Chains consecutive elements: `"a" -> "b"`, `"b" -> "c"`, ...
    fn graph_viz(&self, name: &str) -> String {
        let mut dot = format!("digraph {name} {{\n");
        let mut iter = self.iter().peekable();
        while let Some(from) = iter.next() {
            if let Some(to) = iter.peek() {
                let _ = writeln!(dot, "\"{from}\" -> \"{to}\"");
            }
        }
        dot.push('}');
        dot
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        for element in self.iter() {
            write!(f, " {element}")?;
        }
        f.write_str(" ]")
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = DynamicArray::new();
        array.extend(iter);
        array
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add_last(value);
        }
    }
}

/// Borrowing iterator returned by [`DynamicArray::iter`]
pub struct Iter<'a, T> {
    inner: std::slice::Iter<'a, Option<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().and_then(Option::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().and_then(Option::as_ref)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator over the elements of a [`DynamicArray`]
pub struct IntoIter<T> {
    inner: std::iter::Flatten<std::vec::IntoIter<Option<T>>>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: Vec::from(self.elements).into_iter().flatten(),
        }
    }
}
