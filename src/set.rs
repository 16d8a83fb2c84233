// SPDX-License-Identifier: MPL-2.0

//! An ordered set backed by an unbalanced binary search tree.
//!
//! ## Properties:
//! - Ordered: every value in a node's left subtree is strictly smaller than
//!   the node's value, every value in its right subtree strictly greater.
//! - Unique: each value is stored in at most one node.
//! - Unbalanced: the shape of the tree depends only on the order of
//!   insertions and removals. Inserting values in sorted order degenerates
//!   the tree into a chain.
//!
//! ## Storage
//! Nodes are kept in a dense arena and refer to their children by index.
//! Removing a node moves the last node of the arena into the freed slot, so
//! the arena always holds exactly [`OrderedSet::size`] nodes. Dropping the set
//! drops the arena, which never recurses regardless of the tree's shape.
//!
//! ## Example
//! ```
//! use bst_set::OrderedSet;
//!
//! let set: OrderedSet<u32> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
//! assert_eq!(set.minimum(), Ok(&1));
//! assert_eq!(set.maximum(), Ok(&9));
//! assert_eq!(set.successor(&5), Ok(&7));
//! assert_eq!(set.successor(&3), Ok(&4));
//! ```

use core::cmp::Ordering;
use core::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

use serde::{
    de::{SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

/// Errors triggered by queries whose preconditions do not hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum OrderedSetError {
    /// Error when asking an empty set for its minimum or maximum.
    #[error("the set is empty")]
    EmptySet,
    /// Error when asking for the successor of a value that is not in the set.
    #[error("value is not in the set")]
    NotFound,
    /// Error when asking for the successor of the largest value in the set.
    #[error("value is the maximum of the set")]
    NoSuccessor,
}

#[derive(Clone)]
struct Node<T> {
    value: T,
    left: Option<usize>,
    right: Option<usize>,
}

/// Location of a child link: the root slot of the set or one side of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Link {
    Root,
    Left(usize),
    Right(usize),
}

/// A set of unique, totally ordered values stored in a binary search tree.
#[derive(Clone)]
pub struct OrderedSet<T> {
    nodes: Vec<Node<T>>,
    root: Option<usize>,
}

impl<T> OrderedSet<T> {
    /// Largest capacity preallocated from an untrusted size hint.
    const NODES_CAPACITY: usize = 64;

    /// Creates an empty set. Does not allocate.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Creates an empty set with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of values in the set.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the set holds no values.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes every value from the set.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns the smallest value in the set.
    ///
    /// # Errors
    /// [`OrderedSetError::EmptySet`] if the set is empty.
    pub fn minimum(&self) -> Result<&T, OrderedSetError> {
        let root = self.root.ok_or(OrderedSetError::EmptySet)?;
        Ok(&self.nodes[self.leftmost(root)].value)
    }

    /// Returns the largest value in the set.
    ///
    /// # Errors
    /// [`OrderedSetError::EmptySet`] if the set is empty.
    pub fn maximum(&self) -> Result<&T, OrderedSetError> {
        let mut idx = self.root.ok_or(OrderedSetError::EmptySet)?;
        while let Some(next) = self.nodes[idx].right {
            idx = next;
        }
        Ok(&self.nodes[idx].value)
    }

    /// Returns the number of levels of the tree, `0` for an empty set.
    ///
    /// A set of `n` values has a height between `log2(n + 1)` and `n`.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((idx, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[idx];
            stack.extend(
                node.left
                    .into_iter()
                    .chain(node.right)
                    .map(|child| (child, depth + 1)),
            );
        }
        height
    }

    /// Returns references to every value in ascending order.
    ///
    /// This is the hook for rendering or exporting the contents of the set;
    /// the set itself does not prescribe an output format.
    pub fn in_order(&self) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut node = self.root;
        loop {
            while let Some(idx) = node {
                stack.push(idx);
                node = self.nodes[idx].left;
            }
            match stack.pop() {
                Some(idx) => {
                    values.push(&self.nodes[idx].value);
                    node = self.nodes[idx].right;
                }
                None => break,
            }
        }
        values
    }

    /// Returns references to every value, each node before its subtrees.
    /// Inserting the values in this order into an empty set rebuilds the
    /// same tree.
    fn pre_order(&self) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.root.into_iter().collect();
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            values.push(&node.value);
            stack.extend(node.right);
            stack.extend(node.left);
        }
        values
    }

    fn leftmost(&self, mut idx: usize) -> usize {
        while let Some(next) = self.nodes[idx].left {
            idx = next;
        }
        idx
    }

    fn link_mut(&mut self, link: Link) -> &mut Option<usize> {
        match link {
            Link::Root => &mut self.root,
            Link::Left(parent) => &mut self.nodes[parent].left,
            Link::Right(parent) => &mut self.nodes[parent].right,
        }
    }
}

impl<T: Ord> OrderedSet<T> {
    /// Returns `true` if the set contains `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.search(value).1.is_some()
    }

    /// Adds `value` to the set.
    ///
    /// Returns `true` if the value was added, `false` if an equal value was
    /// already present, in which case the set is left unchanged and `value`
    /// is dropped.
    pub fn insert(&mut self, value: T) -> bool {
        let (link, found) = self.search(&value);
        if found.is_some() {
            return false;
        }

        let idx = self.nodes.len();
        self.nodes.push(Node {
            value,
            left: None,
            right: None,
        });
        *self.link_mut(link) = Some(idx);

        true
    }

    /// Removes `value` from the set. Returns `true` if it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes `value` from the set and returns the stored value, if any.
    ///
    /// A node with at most one child is replaced by that child. A node with
    /// two children keeps its place in the tree and takes over the value of
    /// its in-order successor, whose node is removed instead.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let (link, idx) = self.search(value);
        let idx = idx?;

        match (self.nodes[idx].left, self.nodes[idx].right) {
            (Some(_), Some(right)) => {
                let mut successor_link = Link::Right(idx);
                let mut successor = right;
                while let Some(next) = self.nodes[successor].left {
                    successor_link = Link::Left(successor);
                    successor = next;
                }
                *self.link_mut(successor_link) = self.nodes[successor].right;

                let successor_value = self.release(successor);
                // Releasing moves the last node of the arena into the freed slot.
                let idx = if idx == self.nodes.len() { successor } else { idx };
                Some(std::mem::replace(&mut self.nodes[idx].value, successor_value))
            }
            (child, None) | (None, child) => {
                *self.link_mut(link) = child;
                Some(self.release(idx))
            }
        }
    }

    /// Returns the smallest value in the set strictly greater than `value`.
    ///
    /// # Errors
    /// - [`OrderedSetError::NotFound`] if `value` is not in the set.
    /// - [`OrderedSetError::NoSuccessor`] if `value` is the maximum.
    pub fn successor(&self, value: &T) -> Result<&T, OrderedSetError> {
        // Last node at which the descent turned left.
        let mut ancestor = None;
        let mut node = self.root;
        while let Some(idx) = node {
            let current = &self.nodes[idx];
            match value.cmp(&current.value) {
                Ordering::Less => {
                    ancestor = Some(idx);
                    node = current.left;
                }
                Ordering::Greater => node = current.right,
                Ordering::Equal => {
                    let next = match current.right {
                        Some(right) => self.leftmost(right),
                        None => ancestor.ok_or(OrderedSetError::NoSuccessor)?,
                    };
                    return Ok(&self.nodes[next].value);
                }
            }
        }

        Err(OrderedSetError::NotFound)
    }

    /// Descends from the root towards `value`.
    ///
    /// Returns the link that points, or would point, at the node holding
    /// `value`, along with that node's index if it exists.
    fn search(&self, value: &T) -> (Link, Option<usize>) {
        let mut link = Link::Root;
        let mut node = self.root;
        while let Some(idx) = node {
            let current = &self.nodes[idx];
            match value.cmp(&current.value) {
                Ordering::Less => {
                    link = Link::Left(idx);
                    node = current.left;
                }
                Ordering::Greater => {
                    link = Link::Right(idx);
                    node = current.right;
                }
                Ordering::Equal => break,
            }
        }
        (link, node)
    }

    /// Frees the slot of a node that is no longer linked into the tree and
    /// returns its value. The last node of the arena is moved into the slot.
    fn release(&mut self, idx: usize) -> T {
        let last = self.nodes.len() - 1;
        if idx != last {
            let (link, found) = self.search(&self.nodes[last].value);
            debug_assert_eq!(found, Some(last));
            *self.link_mut(link) = Some(idx);
        }
        self.nodes.swap_remove(idx).value
    }
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: PartialEq> PartialEq for OrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.in_order() == other.in_order()
    }
}

impl<T: Eq> Eq for OrderedSet<T> {}

impl<T: Debug> Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.in_order()).finish()
    }
}

#[cfg(feature = "test-util")]
#[cfg_attr(docsrs, doc(cfg(feature = "test-util")))]
impl<T: fmt::Display> fmt::Display for OrderedSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, value) in self.in_order().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "}}")
    }
}

/// Serializes the values in pre-order, so that deserializing rebuilds a tree
/// of the same shape rather than the chain a sorted sequence would produce.
impl<T: Serialize> Serialize for OrderedSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.pre_order())
    }
}

struct OrderedSetVisitor<T> {
    phantom: PhantomData<T>,
}

impl<'de, T: Deserialize<'de> + Ord> Visitor<'de> for OrderedSetVisitor<T> {
    type Value = OrderedSet<T>;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("a sequence of set values")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let capacity = seq
            .size_hint()
            .unwrap_or(0)
            .min(OrderedSet::<T>::NODES_CAPACITY);
        let mut set = OrderedSet::with_capacity(capacity);
        while let Some(value) = seq.next_element()? {
            set.insert(value);
        }

        Ok(set)
    }
}

/// Deserializes from any sequence. Duplicate values are collapsed.
impl<'de, T: Deserialize<'de> + Ord> Deserialize<'de> for OrderedSet<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(OrderedSetVisitor {
            phantom: PhantomData,
        })
    }
}
