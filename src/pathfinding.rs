//! Dijkstra's shortest path algorithm on top of the heap's `decrease_key`
//!
//! This module provides a generic implementation of Dijkstra's algorithm that
//! leverages the efficient `decrease_key` operation of the quake heap (or any
//! other [`DecreaseKeyHeap`]).
//!
//! # Design
//!
//! For performance, only lightweight indices are stored in the heap rather
//! than full node data. A fast hash map (using FxHash) maps node states to
//! their metadata including costs and heap handles.
//!
//! The node type carries its own goal context and implements `is_goal()` to
//! determine when the search should terminate.
//!
//! # Example
//!
//! ```rust
//! use quake_heap::pathfinding::{shortest_path, SearchNode};
//! use quake_heap::quake::QuakeHeap;
//!
//! // Node carries its goal coordinates
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct GridPos { x: i32, y: i32, goal_x: i32, goal_y: i32 }
//!
//! impl SearchNode for GridPos {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, Self::Cost)> {
//!         vec![
//!             (GridPos { x: self.x + 1, y: self.y, goal_x: self.goal_x, goal_y: self.goal_y }, 1),
//!             (GridPos { x: self.x - 1, y: self.y, goal_x: self.goal_x, goal_y: self.goal_y }, 1),
//!             (GridPos { x: self.x, y: self.y + 1, goal_x: self.goal_x, goal_y: self.goal_y }, 1),
//!             (GridPos { x: self.x, y: self.y - 1, goal_x: self.goal_x, goal_y: self.goal_y }, 1),
//!         ]
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.x == self.goal_x && self.y == self.goal_y
//!     }
//! }
//!
//! let start = GridPos { x: 0, y: 0, goal_x: 2, goal_y: 2 };
//!
//! let result = shortest_path::<_, QuakeHeap<_, _>>(&start);
//! let (path, cost) = result.unwrap();
//! assert_eq!(cost, 4); // Manhattan distance
//! assert_eq!(path.len(), 5);
//! ```

use crate::traits::{DecreaseKeyHeap, Handle};
use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::ops::Add;

/// Trait for types that can be used as costs in the search.
///
/// This requires the type to be orderable, copyable, and support addition.
/// It also requires a zero value (`Default`) for initialization.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Trait for nodes in a search graph.
///
/// Implement this trait for your node type to use [`shortest_path`]. The node
/// type must be hashable and cloneable for efficient storage, and carries all
/// context needed to generate successors and recognize a goal.
pub trait SearchNode: Clone + Eq + Hash {
    /// The cost type for edge weights (e.g., u32, u64)
    type Cost: Cost;

    /// Returns all successor nodes along with the cost to reach them.
    ///
    /// This is where you define your graph structure. Each call should return
    /// all neighbors reachable from this node along with their edge costs.
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// Returns true if this node is a goal state.
    fn is_goal(&self) -> bool;
}

/// Internal index type for the hash map.
/// We store these lightweight indices in the heap instead of full node data.
type NodeIndex = usize;

/// Metadata stored for each visited node during search.
struct NodeRecord<N: SearchNode, H: Handle> {
    /// The actual node state
    node: N,
    /// Cost from start to this node
    dist: N::Cost,
    /// Handle into the heap (if still in the open set)
    handle: Option<H>,
    /// Previous node in the path (for reconstruction)
    came_from: Option<NodeIndex>,
    /// Whether this node has been fully processed
    closed: bool,
}

/// The open/closed-set bookkeeping for one search.
struct SearchState<N: SearchNode, H: Handle> {
    /// Maps node index to node data
    records: FxHashMap<NodeIndex, NodeRecord<N, H>>,
    /// Maps node state to its index (for fast lookups)
    state_to_index: FxHashMap<N, NodeIndex>,
}

impl<N: SearchNode, H: Handle> SearchState<N, H> {
    fn new() -> Self {
        SearchState {
            records: FxHashMap::default(),
            state_to_index: FxHashMap::default(),
        }
    }

    /// Gets or creates an index for a node state.
    fn get_or_create_index(&mut self, node: N, dist: N::Cost) -> (NodeIndex, bool) {
        if let Some(&index) = self.state_to_index.get(&node) {
            (index, false)
        } else {
            let index = self.records.len();
            self.state_to_index.insert(node.clone(), index);
            self.records.insert(
                index,
                NodeRecord {
                    node,
                    dist,
                    handle: None,
                    came_from: None,
                    closed: false,
                },
            );
            (index, true)
        }
    }

    /// Reconstructs the path from the start to the given node index.
    fn reconstruct_path(&self, mut current: NodeIndex) -> Vec<N> {
        let mut path = Vec::new();
        loop {
            let record = &self.records[&current];
            path.push(record.node.clone());
            match record.came_from {
                Some(prev) => current = prev,
                None => break,
            }
        }
        path.reverse();
        path
    }
}

/// Runs Dijkstra's algorithm from the start node until `is_goal()` returns
/// true.
///
/// # Type Parameters
/// - `N`: The node type implementing [`SearchNode`]
/// - `H`: The heap type implementing [`DecreaseKeyHeap`]
///
/// # Returns
/// - `Some((path, cost))` if a goal is reachable (path includes both ends)
/// - `None` if no goal exists in the reachable component
pub fn shortest_path<N, H>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, N::Cost>,
{
    let mut heap = H::new();
    let mut state: SearchState<N, H::Handle> = SearchState::new();

    let (start_index, _) = state.get_or_create_index(start.clone(), N::Cost::default());
    let handle = heap.push_with_handle(N::Cost::default(), start_index);
    if let Some(record) = state.records.get_mut(&start_index) {
        record.handle = Some(handle);
    }

    while let Some((dist, current_index)) = heap.pop() {
        let current_record = state.records.get_mut(&current_index)?;
        if current_record.closed {
            continue;
        }
        current_record.closed = true;
        current_record.handle = None;

        let current_node = current_record.node.clone();
        if current_node.is_goal() {
            let path = state.reconstruct_path(current_index);
            return Some((path, dist));
        }

        for (neighbor, edge_cost) in current_node.successors() {
            let tentative = dist + edge_cost;
            let (neighbor_index, is_new) = state.get_or_create_index(neighbor, tentative);
            let record = state.records.get_mut(&neighbor_index)?;

            if record.closed {
                continue;
            }

            if is_new {
                record.dist = tentative;
                record.came_from = Some(current_index);
                let handle = heap.push_with_handle(tentative, neighbor_index);
                record.handle = Some(handle);
            } else if tentative < record.dist {
                record.dist = tentative;
                record.came_from = Some(current_index);
                if let Some(ref handle) = record.handle {
                    let _ = heap.decrease_key(handle, tentative);
                }
            }
        }
    }

    None
}
