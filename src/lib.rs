//! Quake Heap for Rust
//!
//! This crate provides a priority queue with efficient `decrease_key` support,
//! implemented as a quake heap: a forest of tournament trees as described by
//! Timothy Chan ("Quake Heaps: A Simple Alternative to Fibonacci Heaps", 2013).
//!
//! # Features
//!
//! - O(1) worst-case insert and peek
//! - O(1) amortized decrease_key via entry handles
//! - O(log n) amortized delete-min
//! - Tunable rebuild aggressiveness through the `alpha` ratio
//! - Generic Dijkstra shortest path built on the [`DecreaseKeyHeap`] trait
//!
//! # Example
//!
//! ```rust
//! use quake_heap::quake::QuakeHeap;
//! use quake_heap::{DecreaseKeyHeap, Heap};
//!
//! let mut heap = QuakeHeap::new();
//! let handle1 = heap.push_with_handle(5, "item1");
//! let _handle2 = heap.push_with_handle(3, "item2");
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(heap.peek(), Some((&1, &"item1")));
//! ```

pub mod pathfinding;
pub mod quake;
pub mod traits;

// Re-export the main traits for convenience
pub use traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
