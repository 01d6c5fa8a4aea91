//! Generic helpers over slices.
//!
//! Every function leaves its input untouched; sorting works on a copy.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// An owned copy of some items that can be sorted with a "less than" function.
#[derive(Debug, Clone, PartialEq)]
pub struct Sortable<T> {
    items: Vec<T>,
}

impl<T: Clone> Sortable<T> {
    pub fn new(items: &[T]) -> Self {
        Self {
            items: items.to_vec(),
        }
    }
}

impl<T> Sortable<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
    /// Stable: items that are neither less nor greater keep their order.
    pub fn sort_by<F>(mut self, mut less: F) -> Vec<T>
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.items.sort_by(|a, b| {
            if less(a, b) {
                Ordering::Less
            } else if less(b, a) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        });
        self.items
    }
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

pub fn map<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    F: FnMut(&T) -> R,
{
    items.iter().map(f).collect()
}

pub fn filter<T, F>(items: &[T], mut f: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    items.iter().filter(|item| f(item)).cloned().collect()
}

pub fn find<T, F>(items: &[T], mut f: F) -> Option<&T>
where
    F: FnMut(&T) -> bool,
{
    items.iter().find(|item| f(item))
}

pub fn contains<T: PartialEq>(items: &[T], item: &T) -> bool {
    index_of(items, item).is_some()
}

/// Folds from `first`; an empty slice gives back `first`.
pub fn reduce<T, R, F>(items: &[T], f: F, first: R) -> R
where
    F: FnMut(R, &T) -> R,
{
    items.iter().fold(first, f)
}

pub fn index_of<T: PartialEq>(items: &[T], search: &T) -> Option<usize> {
    items.iter().position(|item| item == search)
}

pub fn last_index_of<T: PartialEq>(items: &[T], search: &T) -> Option<usize> {
    items.iter().rposition(|item| item == search)
}

/// True for an empty slice.
pub fn every<T, F>(items: &[T], f: F) -> bool
where
    F: FnMut(&T) -> bool,
{
    items.iter().all(f)
}

pub fn sort_by<T, F>(items: &[T], less: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    Sortable::new(items).sort_by(less)
}

/// Groups items by key; each group keeps the input order.
pub fn group_by<T, K, F>(items: &[T], mut key: F) -> HashMap<K, Vec<T>>
where
    T: Clone,
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut groups: HashMap<K, Vec<T>> = HashMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item.clone());
    }
    groups
}
