// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The priority-queue protocol (C3): a decrease-key-capable min-heap keyed
//! by tentative distance, plus a trivial FIFO variant for unweighted
//! Brandes/BFS.

use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue as HeapQueue;
use std::cmp::Reverse;
use std::collections::VecDeque;
use std::hash::Hash;

/// The decrease-key + extract-min contract shared by the weighted and
/// unweighted traversal engines.
///
/// Calling [`update`](PriorityQueue::update) on an element not present is a
/// logic error; implementations may panic or silently ignore it, but MUST
/// NOT be called that way by a correct caller (the shortest-path engines
/// always check presence first).
pub trait PriorityQueue<V> {
    /// Adds `v` with the given key. The unweighted variant ignores `key`.
    fn insert(&mut self, v: V, key: f64);

    /// Decreases `v`'s key to `key`, which MUST be `<=` its current key.
    /// No-op for the unweighted variant.
    fn update(&mut self, v: V, key: f64);

    /// Extracts and returns the minimum-key element, or the FIFO head.
    fn remove(&mut self) -> Option<V>;

    /// Whether the queue has no elements left.
    fn is_empty(&self) -> bool;

    /// Whether `v` is currently present in the queue.
    fn contains(&self, v: &V) -> bool;
}

/// The weighted variant, backed by [`priority_queue::PriorityQueue`] (a
/// `HashMap`-indexed binary heap with an O(log n) `change_priority`, giving
/// the amortized-logarithmic decrease-key the weighted traversal needs
/// without a hand-rolled lazy-deletion heap).
#[derive(Debug, Default)]
pub struct WeightedQueue<V: Hash + Eq> {
    inner: HeapQueue<V, Reverse<OrderedFloat<f64>>>,
}

impl<V: Hash + Eq + Clone> WeightedQueue<V> {
    /// Creates a new, empty weighted queue.
    pub fn new() -> Self {
        Self {
            inner: HeapQueue::new(),
        }
    }
}

impl<V: Hash + Eq + Clone> PriorityQueue<V> for WeightedQueue<V> {
    fn insert(&mut self, v: V, key: f64) {
        self.inner.push(v, Reverse(OrderedFloat(key)));
    }

    fn update(&mut self, v: V, key: f64) {
        self.inner.change_priority(&v, Reverse(OrderedFloat(key)));
    }

    fn remove(&mut self) -> Option<V> {
        self.inner.pop().map(|(v, _)| v)
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn contains(&self, v: &V) -> bool {
        self.inner.get(v).is_some()
    }
}

/// The unweighted (FIFO) variant used by unweighted BFS/Brandes: `insert`
/// enqueues and ignores the key, `update` is a no-op, `remove` dequeues the
/// head. This makes unweighted Brandes O(V+E) per source rather than
/// O((V+E) log V).
#[derive(Debug, Default)]
pub struct FifoQueue<V> {
    inner: VecDeque<V>,
    queued: std::collections::HashSet<V>,
}

impl<V: Hash + Eq + Clone> FifoQueue<V> {
    /// Creates a new, empty FIFO queue.
    pub fn new() -> Self {
        Self {
            inner: VecDeque::new(),
            queued: std::collections::HashSet::new(),
        }
    }
}

impl<V: Hash + Eq + Clone> PriorityQueue<V> for FifoQueue<V> {
    fn insert(&mut self, v: V, _key: f64) {
        self.queued.insert(v.clone());
        self.inner.push_back(v);
    }

    fn update(&mut self, _v: V, _key: f64) {
        // Unweighted BFS never needs to decrease a key: the first enqueue of
        // a vertex fixes its distance.
    }

    fn remove(&mut self) -> Option<V> {
        let v = self.inner.pop_front()?;
        self.queued.remove(&v);
        Some(v)
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn contains(&self, v: &V) -> bool {
        self.queued.contains(v)
    }
}
