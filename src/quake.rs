//! Quake Heap implementation
//!
//! A quake heap is a forest of height-balanced tournament trees, proposed by
//! Timothy Chan as a simple alternative to Fibonacci heaps.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity           |
//! |----------------|----------------------|
//! | `push`         | O(1) worst-case      |
//! | `pop`          | O(log n) amortized   |
//! | `peek`         | O(1) worst-case      |
//! | `decrease_key` | O(1) amortized       |
//!
//! # Structure
//!
//! Every element lives in exactly one leaf of a tournament tree. Each internal
//! node caches the minimum entry of its subtree, so the winner of a tree's
//! tournament sits at its root. The heap is the collection of tree roots plus
//! a cached handle to the root holding the global minimum.
//!
//! - **Insert** creates a one-leaf tree, O(1).
//! - **Decrease-key** cuts the highest node caching the entry away from its
//!   parent and re-roots it, a single severed edge, O(1).
//! - **Delete-min** removes the path of nodes caching the minimum (each cut
//!   sibling becomes a new root), then links equal-height roots like a binary
//!   counter carry and, when some height's population grows past `alpha` times
//!   the population one level below, dismantles everything taller. The
//!   periodic "quake" is what bounds tree height.
//!
//! # References
//!
//! - Chan, T.M. (2013). "Quake Heaps: A Simple Alternative to Fibonacci
//!   Heaps." *Space-Efficient Data Structures, Streams, and Algorithms*,
//!   LNCS 8066.

use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Type alias for strong node reference
type NodeRef<T, P> = Rc<RefCell<Node<T, P>>>;
/// Type alias for weak node reference (used for parent backlinks)
type WeakNodeRef<T, P> = Weak<RefCell<Node<T, P>>>;
/// Type alias for the shared entry record
type SharedEntry<T, P> = Rc<RefCell<Entry<T, P>>>;

/// Default tuning ratio: never dismantle taller structures.
const DEFAULT_ALPHA: f64 = 1.0;

/// The (key, value) record shared between the caller and the heap.
///
/// The caller holds it through an [`EntryRef`]; the heap holds it through
/// every tournament node that caches it as a subtree minimum. `node` points
/// back at the *topmost* such node, which is the node `decrease_key` cuts.
struct Entry<T, P> {
    key: P,
    value: Option<T>,
    node: WeakNodeRef<T, P>,
}

/// Handle to an element in a quake heap
///
/// Produced by [`QuakeHeap::make_entry`] (or [`DecreaseKeyHeap::push_with_handle`])
/// and accepted by [`QuakeHeap::insert`] and [`QuakeHeap::decrease_key`].
/// The handle stays valid for the caller even after the element is removed
/// from the heap; heap operations on a removed entry report
/// [`HeapError::InvalidHandle`].
pub struct EntryRef<T, P> {
    entry: SharedEntry<T, P>,
}

impl<T, P: Clone> EntryRef<T, P> {
    /// Returns a copy of the entry's current key.
    pub fn key(&self) -> P {
        self.entry.borrow().key.clone()
    }
}

impl<T, P> EntryRef<T, P> {
    /// Borrows the entry's value, or `None` if the value has been moved out
    /// (through [`Heap::pop`] or [`EntryRef::take_value`]).
    pub fn value(&self) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.entry.borrow(), |e| e.value.as_ref()).ok()
    }

    /// Moves the value out of a detached entry, leaving `None` behind.
    ///
    /// Returns `None` without touching the entry while it is still in a
    /// heap: entries inside a heap must keep their value so that
    /// [`QuakeHeap::find_min`] borrows stay valid. Remove the entry first
    /// (via [`QuakeHeap::delete_min`]) to claim its value.
    pub fn take_value(&self) -> Option<T> {
        if self.in_heap() {
            return None;
        }
        self.entry.borrow_mut().value.take()
    }

    /// Returns true while the entry is linked into a heap.
    pub fn in_heap(&self) -> bool {
        self.entry.borrow().node.strong_count() > 0
    }
}

impl<T, P> Clone for EntryRef<T, P> {
    fn clone(&self) -> Self {
        EntryRef {
            entry: Rc::clone(&self.entry),
        }
    }
}

impl<T, P> PartialEq for EntryRef<T, P> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.entry, &other.entry)
    }
}

impl<T, P> Eq for EntryRef<T, P> {}

impl<T, P> fmt::Debug for EntryRef<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntryRef").field(&Rc::as_ptr(&self.entry)).finish()
    }
}

impl<T, P> Handle for EntryRef<T, P> {}

/// Tournament tree node: a binary node caching the minimum entry of its
/// subtree. Children are owned, the parent link is weak, and `root_slot` is
/// `Some` exactly while the node sits in the forest's root list.
struct Node<T, P> {
    left: Option<NodeRef<T, P>>,
    right: Option<NodeRef<T, P>>,
    parent: WeakNodeRef<T, P>,
    entry: SharedEntry<T, P>,
    height: usize,
    root_slot: Option<usize>,
}

impl<T, P> Node<T, P> {
    /// Wraps a single entry in a height-0 node and points the entry back at it.
    fn leaf(entry: &SharedEntry<T, P>) -> NodeRef<T, P> {
        let node = Rc::new(RefCell::new(Node {
            left: None,
            right: None,
            parent: Weak::new(),
            entry: Rc::clone(entry),
            height: 0,
            root_slot: None,
        }));
        entry.borrow_mut().node = Rc::downgrade(&node);
        node
    }
}

/// The root list plus a cached slot for the smallest-keyed root.
///
/// Roots live in a plain vector; each root records its own slot so removal is
/// a swap-remove plus one back-pointer fixup, O(1).
struct Forest<T, P> {
    roots: Vec<NodeRef<T, P>>,
    min_slot: Option<usize>,
}

impl<T, P: Ord> Forest<T, P> {
    fn new() -> Self {
        Forest {
            roots: Vec::new(),
            min_slot: None,
        }
    }

    fn push_root(&mut self, node: NodeRef<T, P>) {
        node.borrow_mut().root_slot = Some(self.roots.len());
        self.roots.push(node);
    }

    /// O(1) removal via the stored slot. The tail root swapped into the
    /// vacated slot gets its slot (and the cached minimum, if it was the
    /// tail) patched up. Removing the cached minimum clears `min_slot`.
    fn remove_root(&mut self, node: &NodeRef<T, P>) {
        let slot = node
            .borrow_mut()
            .root_slot
            .take()
            .expect("removed node is not a root");
        self.roots.swap_remove(slot);
        if self.min_slot == Some(slot) {
            self.min_slot = None;
        }
        if slot < self.roots.len() {
            self.roots[slot].borrow_mut().root_slot = Some(slot);
            if self.min_slot == Some(self.roots.len()) {
                self.min_slot = Some(slot);
            }
        }
    }

    /// Single-comparison minimum update after one root changed.
    fn consider_for_min(&mut self, slot: usize) {
        match self.min_slot {
            None => self.min_slot = Some(slot),
            Some(m) if m != slot => {
                let candidate = self.roots[slot].borrow();
                let current = self.roots[m].borrow();
                let is_less = candidate.entry.borrow().key < current.entry.borrow().key;
                drop(current);
                drop(candidate);
                if is_less {
                    self.min_slot = Some(slot);
                }
            }
            Some(_) => {}
        }
    }

    fn consider_last_for_min(&mut self) {
        debug_assert!(!self.roots.is_empty());
        self.consider_for_min(self.roots.len() - 1);
    }

    /// Full linear scan, used only after bulk restructuring.
    fn recompute_min(&mut self) {
        self.min_slot = None;
        for slot in 0..self.roots.len() {
            self.consider_for_min(slot);
        }
    }

    fn min_root(&self) -> Option<&NodeRef<T, P>> {
        self.min_slot.map(|m| &self.roots[m])
    }

    /// Empties the root list for consolidation, clearing every stored slot.
    fn drain(&mut self) -> Vec<NodeRef<T, P>> {
        self.min_slot = None;
        let roots = std::mem::take(&mut self.roots);
        for root in &roots {
            root.borrow_mut().root_slot = None;
        }
        roots
    }
}

/// Quake Heap
///
/// A min-heap with handle-based `decrease_key`, tunable through the `alpha`
/// ratio: after a delete-min, if the number of nodes at some height `i + 1`
/// exceeds `alpha` times the number at height `i`, every tree taller than `i`
/// is shaken apart. Smaller values keep trees shorter at the price of more
/// restructuring; `alpha = 1.0` never triggers a quake.
///
/// # Example
///
/// ```rust
/// use quake_heap::quake::QuakeHeap;
///
/// let mut heap = QuakeHeap::new();
/// let item = QuakeHeap::make_entry(5, "item");
/// heap.insert(&item);
/// heap.decrease_key(&item, 1).unwrap();
/// assert_eq!(heap.find_min(), Some((&1, &"item")));
/// ```
pub struct QuakeHeap<T, P: Ord> {
    forest: Forest<T, P>,
    len: usize,
    alpha: f64,
    /// Number of live tournament nodes per stored height, maintained at
    /// leaf creation, linking, and node destruction. The quake trigger
    /// compares adjacent levels of this table.
    height_counts: Vec<usize>,
}

impl<T, P: Ord> Default for QuakeHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> QuakeHeap<T, P> {
    /// Creates an empty heap with `alpha = 1.0` (quakes disabled).
    pub fn new() -> Self {
        Self::with_alpha(DEFAULT_ALPHA)
    }

    /// Creates an empty heap with the given tuning ratio.
    ///
    /// # Panics
    ///
    /// Panics unless `alpha` lies in `(0, 1]`.
    pub fn with_alpha(alpha: f64) -> Self {
        assert!(
            alpha > 0.0 && alpha <= 1.0,
            "alpha must lie in (0, 1], got {alpha}"
        );
        QuakeHeap {
            forest: Forest::new(),
            len: 0,
            alpha,
            height_counts: Vec::new(),
        }
    }

    /// The tuning ratio this heap was constructed with.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Creates a detached entry, not yet associated with any heap.
    pub fn make_entry(key: P, value: T) -> EntryRef<T, P> {
        EntryRef {
            entry: Rc::new(RefCell::new(Entry {
                key,
                value: Some(value),
                node: Weak::new(),
            })),
        }
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Inserts a detached entry as a new one-leaf tree.
    ///
    /// The entry must not currently belong to a heap; inserting it again
    /// before removing it corrupts the structure (debug builds assert).
    ///
    /// **Time Complexity**: O(1)
    pub fn insert(&mut self, entry: &EntryRef<T, P>) {
        debug_assert!(!entry.in_heap(), "entry is already in a heap");
        debug_assert!(
            entry.entry.borrow().value.is_some(),
            "entry's value has been taken"
        );
        let leaf = Node::leaf(&entry.entry);
        self.bump_height_count(0);
        self.forest.push_root(leaf);
        self.forest.consider_last_for_min();
        self.len += 1;
    }

    /// Decreases the key of an entry previously inserted into this heap.
    ///
    /// Cuts the topmost node caching the entry away from its parent and
    /// re-roots it: one severed edge, no cascading cache repair. Because the
    /// cut happens at the highest caching node, no ancestor ever caches the
    /// moved entry, so the caches left behind stay valid.
    ///
    /// **Time Complexity**: O(1)
    ///
    /// # Errors
    ///
    /// `HeapError::InvalidHandle` if the entry is not in the heap;
    /// `HeapError::PriorityNotDecreased` if `new_key` is not strictly less
    /// than the current key. Neither error mutates the heap.
    pub fn decrease_key(&mut self, entry: &EntryRef<T, P>, new_key: P) -> Result<(), HeapError> {
        let node = entry
            .entry
            .borrow()
            .node
            .upgrade()
            .ok_or(HeapError::InvalidHandle)?;
        if new_key >= entry.entry.borrow().key {
            return Err(HeapError::PriorityNotDecreased);
        }
        entry.entry.borrow_mut().key = new_key;

        let root_slot = node.borrow().root_slot;
        if let Some(slot) = root_slot {
            // Already a root: the smaller key can only improve its standing.
            self.forest.consider_for_min(slot);
            return Ok(());
        }

        let parent = node
            .borrow()
            .parent
            .upgrade()
            .expect("non-root node must have a parent");
        {
            let mut p = parent.borrow_mut();
            if p.left.as_ref().map_or(false, |l| Rc::ptr_eq(l, &node)) {
                p.left = None;
            } else {
                debug_assert!(p.right.as_ref().map_or(false, |r| Rc::ptr_eq(r, &node)));
                p.right = None;
            }
        }
        node.borrow_mut().parent = Weak::new();
        self.forest.push_root(node);
        self.forest.consider_last_for_min();
        Ok(())
    }

    /// Returns the minimum key and value without removing them, or `None`
    /// if the heap is empty.
    ///
    /// **Time Complexity**: O(1)
    pub fn find_min(&self) -> Option<(&P, &T)> {
        let root = self.forest.min_root()?;
        let entry = Rc::clone(&root.borrow().entry);
        // SAFETY: We bypass RefCell's dynamic borrow checking to return
        // references with lifetime tied to `&self`. The tournament node in
        // the forest holds a strong Rc to the entry, keeping the allocation
        // alive for `&self`'s lifetime, and the borrow checker prevents any
        // `&mut self` call while the returned references exist. No safe
        // `&self` path can mutate the slots either: the key only changes
        // through `decrease_key` (`&mut self`), and `take_value` refuses to
        // move the value out of an entry that is still in a heap — an entry
        // can only become detached through `&mut self` operations.
        unsafe {
            let ptr = entry.as_ptr();
            let value = (*ptr)
                .value
                .as_ref()
                .expect("entry in a heap holds a value");
            Some((&(*ptr).key, value))
        }
    }

    /// Returns a handle to the minimum entry without removing it, or `None`
    /// if the heap is empty.
    pub fn min_entry(&self) -> Option<EntryRef<T, P>> {
        let root = self.forest.min_root()?;
        Some(EntryRef {
            entry: Rc::clone(&root.borrow().entry),
        })
    }

    /// Removes the minimum entry and returns its handle, or `None` if the
    /// heap is empty.
    ///
    /// This is the only operation that restructures globally: it shakes the
    /// minimum root apart, consolidates equal-height roots, and quakes away
    /// overly tall trees when the `alpha` trigger fires.
    ///
    /// **Time Complexity**: O(log n) amortized
    pub fn delete_min(&mut self) -> Option<EntryRef<T, P>> {
        let min_root = {
            let root = self.forest.min_root()?;
            Rc::clone(root)
        };
        self.forest.remove_root(&min_root);
        let min_entry = Rc::clone(&min_root.borrow().entry);

        // Remove the path of nodes caching the minimum; every cut sibling
        // becomes a new root and the surviving leaf is the removed entry's.
        let mut fragments = Vec::new();
        let leaf = self.shake_into(min_root, &mut fragments);
        debug_assert!(Rc::ptr_eq(&leaf.borrow().entry, &min_entry));
        self.retire_node(&leaf);
        min_entry.borrow_mut().node = Weak::new();
        for fragment in fragments {
            self.forest.push_root(fragment);
        }
        self.len -= 1;

        if self.len > 0 {
            self.consolidate_and_quake();
        }
        self.forest.recompute_min();
        Some(EntryRef { entry: min_entry })
    }

    /// Walks from `root` down the path of nodes whose cached minimum is
    /// `root`'s entry (matched by identity, since duplicate keys are legal),
    /// detaching each sibling subtree into `out` and discarding the path
    /// itself. Returns the leaf at the end of the path; the caller decides
    /// whether it survives.
    fn shake_into(
        &mut self,
        root: NodeRef<T, P>,
        out: &mut Vec<NodeRef<T, P>>,
    ) -> NodeRef<T, P> {
        let target = Rc::clone(&root.borrow().entry);
        let mut current = root;
        loop {
            let next = {
                let mut node = current.borrow_mut();
                let left_holds = node
                    .left
                    .as_ref()
                    .map_or(false, |l| Rc::ptr_eq(&l.borrow().entry, &target));
                if left_holds {
                    if let Some(sibling) = node.right.take() {
                        sibling.borrow_mut().parent = Weak::new();
                        out.push(sibling);
                    }
                    node.left.take()
                } else {
                    let right_holds = node
                        .right
                        .as_ref()
                        .map_or(false, |r| Rc::ptr_eq(&r.borrow().entry, &target));
                    if right_holds {
                        if let Some(sibling) = node.left.take() {
                            sibling.borrow_mut().parent = Weak::new();
                            out.push(sibling);
                        }
                        node.right.take()
                    } else {
                        // Tournament structure: the path ends at the leaf.
                        None
                    }
                }
            };
            match next {
                Some(child) => {
                    child.borrow_mut().parent = Weak::new();
                    self.retire_node(&current);
                    current = child;
                }
                None => return current,
            }
        }
    }

    /// Links two subtrees under a fresh parent caching the smaller-keyed
    /// child's entry (ties favor the left). The winning entry's back
    /// reference moves up to the new node, which is now its topmost cache.
    ///
    /// # Panics
    ///
    /// Linking two empty subtrees indicates a defect in the consolidation
    /// logic itself and is a fatal invariant violation.
    fn link(&mut self, left: Option<NodeRef<T, P>>, right: Option<NodeRef<T, P>>) -> NodeRef<T, P> {
        let (entry, height) = match (&left, &right) {
            (Some(l), Some(r)) => {
                let l_node = l.borrow();
                let r_node = r.borrow();
                let entry = if r_node.entry.borrow().key < l_node.entry.borrow().key {
                    Rc::clone(&r_node.entry)
                } else {
                    Rc::clone(&l_node.entry)
                };
                (entry, l_node.height.max(r_node.height) + 1)
            }
            (Some(l), None) => (Rc::clone(&l.borrow().entry), l.borrow().height + 1),
            (None, Some(r)) => (Rc::clone(&r.borrow().entry), r.borrow().height + 1),
            (None, None) => panic!("tournament node: cannot link two empty subtrees"),
        };
        let node = Rc::new(RefCell::new(Node {
            left,
            right,
            parent: Weak::new(),
            entry: Rc::clone(&entry),
            height,
            root_slot: None,
        }));
        {
            let n = node.borrow();
            if let Some(l) = &n.left {
                l.borrow_mut().parent = Rc::downgrade(&node);
            }
            if let Some(r) = &n.right {
                r.borrow_mut().parent = Rc::downgrade(&node);
            }
        }
        entry.borrow_mut().node = Rc::downgrade(&node);
        self.bump_height_count(height);
        node
    }

    /// Post-delete-min rebuild: bucket the roots by height, link equal-height
    /// trees pairwise (carrying upward like binary addition), then evaluate
    /// the quake trigger and dismantle everything above the offending height.
    fn consolidate_and_quake(&mut self) {
        let roots = self.forest.drain();
        let expected_heights = (self.len as f64).log2() as usize + 2;
        let mut buckets: Vec<Vec<NodeRef<T, P>>> = Vec::new();
        buckets.resize_with(expected_heights, Vec::new);
        for root in roots {
            let h = root.borrow().height;
            if h >= buckets.len() {
                buckets.resize_with(h + 1, Vec::new);
            }
            buckets[h].push(root);
        }

        let mut i = 0;
        while i < buckets.len() {
            while buckets[i].len() > 1 {
                let a = buckets[i].pop().expect("bucket holds two nodes");
                let b = buckets[i].pop().expect("bucket holds two nodes");
                let linked = self.link(Some(a), Some(b));
                let h = linked.borrow().height;
                if h >= buckets.len() {
                    buckets.resize_with(h + 1, Vec::new);
                }
                buckets[h].push(linked);
            }
            i += 1;
        }

        let pending: Vec<NodeRef<T, P>> = buckets.into_iter().flatten().collect();
        match self.quake_threshold() {
            Some(cutoff) => self.dismantle_above(cutoff, pending),
            None => {
                for tree in pending {
                    self.forest.push_root(tree);
                }
            }
        }
    }

    /// Smallest height `i` whose next level's node population exceeds
    /// `alpha * n(i)`. With `alpha = 1.0` this never fires, since every node
    /// at height `i + 1` has a child at height `i`.
    fn quake_threshold(&self) -> Option<usize> {
        for i in 0..self.height_counts.len().saturating_sub(1) {
            if self.height_counts[i + 1] as f64 > self.alpha * self.height_counts[i] as f64 {
                return Some(i);
            }
        }
        None
    }

    /// The quake: every tree taller than `cutoff` is shaken apart, its
    /// fragments re-examined until everything left is short enough. The leaf
    /// surviving each shake stays in the heap, so its entry's back reference
    /// is repointed before it is re-rooted.
    fn dismantle_above(&mut self, cutoff: usize, mut pending: Vec<NodeRef<T, P>>) {
        while let Some(tree) = pending.pop() {
            if tree.borrow().height <= cutoff {
                self.forest.push_root(tree);
                continue;
            }
            let leaf = self.shake_into(tree, &mut pending);
            let entry = Rc::clone(&leaf.borrow().entry);
            entry.borrow_mut().node = Rc::downgrade(&leaf);
            pending.push(leaf);
        }
    }

    fn bump_height_count(&mut self, height: usize) {
        if height >= self.height_counts.len() {
            self.height_counts.resize(height + 1, 0);
        }
        self.height_counts[height] += 1;
    }

    fn retire_node(&mut self, node: &NodeRef<T, P>) {
        let height = node.borrow().height;
        debug_assert!(self.height_counts[height] > 0);
        self.height_counts[height] -= 1;
    }

    /// Walks every tree checking the structural invariants: the tournament
    /// property, height labels, parent and root-slot back references, the
    /// topmost entry back reference, leaf count against `len`, and the
    /// per-height node bookkeeping. Intended for tests and debugging.
    pub fn verify_internal_structure(&self) -> bool {
        let mut leaves = 0usize;
        let mut counts: Vec<usize> = Vec::new();
        for (slot, root) in self.forest.roots.iter().enumerate() {
            {
                let r = root.borrow();
                if r.root_slot != Some(slot) || r.parent.upgrade().is_some() {
                    return false;
                }
            }
            if !self.verify_node(root, &mut leaves, &mut counts) {
                return false;
            }
        }

        match self.forest.min_slot {
            None => {
                if !self.forest.roots.is_empty() {
                    return false;
                }
            }
            Some(m) => {
                if m >= self.forest.roots.len() {
                    return false;
                }
                let min_root = self.forest.roots[m].borrow();
                for root in &self.forest.roots {
                    if root.borrow().entry.borrow().key < min_root.entry.borrow().key {
                        return false;
                    }
                }
            }
        }

        if leaves != self.len {
            return false;
        }
        for h in 0..counts.len().max(self.height_counts.len()) {
            let walked = counts.get(h).copied().unwrap_or(0);
            let tracked = self.height_counts.get(h).copied().unwrap_or(0);
            if walked != tracked {
                return false;
            }
        }
        true
    }

    fn verify_node(
        &self,
        node: &NodeRef<T, P>,
        leaves: &mut usize,
        counts: &mut Vec<usize>,
    ) -> bool {
        let n = node.borrow();
        if n.height >= counts.len() {
            counts.resize(n.height + 1, 0);
        }
        counts[n.height] += 1;

        if n.left.is_none() && n.right.is_none() {
            if n.height != 0 {
                return false;
            }
            *leaves += 1;
        } else {
            let mut caches_a_child = false;
            let mut child_heights = Vec::with_capacity(2);
            for child in [&n.left, &n.right].into_iter().flatten() {
                {
                    let c = child.borrow();
                    let back = c.parent.upgrade();
                    if !back.map_or(false, |p| Rc::ptr_eq(&p, node)) || c.root_slot.is_some() {
                        return false;
                    }
                    if n.height <= c.height {
                        return false;
                    }
                    if n.entry.borrow().key > c.entry.borrow().key {
                        return false;
                    }
                    if Rc::ptr_eq(&n.entry, &c.entry) {
                        caches_a_child = true;
                    }
                    child_heights.push(c.height);
                }
                if !self.verify_node(child, leaves, counts) {
                    return false;
                }
            }
            if !caches_a_child {
                return false;
            }
            // Heights are exact at link time; cuts can only leave them as
            // an upper bound, and only by removing a child.
            if child_heights.len() == 2 {
                let tallest = child_heights[0].max(child_heights[1]);
                if n.height != tallest + 1 {
                    return false;
                }
            }
        }

        // If no parent caches this node's entry, this node is the topmost
        // cache and the entry must point back here.
        let parent_caches = n
            .parent
            .upgrade()
            .map_or(false, |p| Rc::ptr_eq(&p.borrow().entry, &n.entry));
        if !parent_caches {
            let back = n.entry.borrow().node.upgrade();
            if !back.map_or(false, |b| Rc::ptr_eq(&b, node)) {
                return false;
            }
        }
        true
    }
}

impl<T, P: Ord + Clone> Heap<T, P> for QuakeHeap<T, P> {
    fn new() -> Self {
        QuakeHeap::new()
    }

    fn is_empty(&self) -> bool {
        QuakeHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        QuakeHeap::len(self)
    }

    fn push(&mut self, priority: P, item: T) {
        let entry = Self::make_entry(priority, item);
        self.insert(&entry);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.find_min()
    }

    fn pop(&mut self) -> Option<(P, T)> {
        let entry = self.delete_min()?;
        let mut e = entry.entry.borrow_mut();
        let key = e.key.clone();
        let value = e.value.take().expect("removed entry still owns its value");
        Some((key, value))
    }
}

impl<T, P: Ord + Clone> DecreaseKeyHeap<T, P> for QuakeHeap<T, P> {
    type Handle = EntryRef<T, P>;

    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle {
        let entry = Self::make_entry(priority, item);
        self.insert(&entry);
        entry
    }

    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError> {
        QuakeHeap::decrease_key(self, handle, new_priority)
    }
}
