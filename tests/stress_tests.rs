//! Stress tests that push the heap to its limits
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load. Each workload
//! runs once with the default alpha (no quakes) and once with alpha = 0.5,
//! where the periodic rebuild actually fires.

use quake_heap::quake::QuakeHeap;
use quake_heap::{DecreaseKeyHeap, Heap};

/// Test massive numbers of inserts and pops
fn check_massive_operations(mut heap: QuakeHeap<i32, i32>) {
    for i in 0..1000 {
        heap.push(i, i);
    }

    assert_eq!(heap.len(), 1000);

    for i in 0..1000 {
        assert_eq!(heap.pop(), Some((i, i)));
    }

    assert!(heap.is_empty());
    assert!(heap.verify_internal_structure());
}

/// Test many decrease_key operations
fn check_many_decrease_keys(mut heap: QuakeHeap<i32, i32>) {
    let mut handles = Vec::new();

    // Insert elements with high priorities
    for i in 0..500 {
        handles.push(heap.push_with_handle(10000 + i, i));
    }

    // Decrease all keys down to their final order
    for (i, handle) in handles.iter().enumerate() {
        assert!(heap.decrease_key(handle, i as i32).is_ok());
    }
    assert!(heap.verify_internal_structure());

    for i in 0..500 {
        assert_eq!(heap.pop(), Some((i, i)));
    }
}

/// Test alternating insert and pop
fn check_alternating_ops(mut heap: QuakeHeap<i32, i32>) {
    for i in 0..200 {
        heap.push(i * 2, i);
        heap.push(i * 2 + 1, i + 1000);

        assert!(heap.pop().is_some());
    }
    assert!(heap.verify_internal_structure());

    while !heap.is_empty() {
        let _ = heap.pop();
    }
    assert!(heap.is_empty());
    assert!(heap.verify_internal_structure());
}

/// Test decrease_key interleaved with pops, on surviving handles only
fn check_decrease_on_many_operations(mut heap: QuakeHeap<i32, i32>) {
    let mut handles = Vec::new();

    for i in 0..300 {
        handles.push(heap.push_with_handle(i * 10, i));
    }

    // Pop the 100 smallest; their handles go stale
    for _ in 0..100 {
        heap.pop();
    }
    for handle in handles.iter().take(100) {
        assert!(!handle.in_heap());
        assert!(heap.decrease_key(handle, i32::MIN).is_err());
    }

    // Decrease every remaining handle below the current minimum
    for handle in handles.iter().skip(100) {
        if let Some((current, _)) = heap.peek() {
            let new_key = current - 1;
            assert!(heap.decrease_key(handle, new_key).is_ok());
        }
    }

    assert!(!heap.is_empty());
    assert!(heap.verify_internal_structure());
}

/// Test with very large priorities
fn check_large_priorities(mut heap: QuakeHeap<i32, i64>) {
    heap.push(1_000_000_000, 1);
    heap.push(-1_000_000_000, 2);
    heap.push(2_000_000_000, 3);

    assert_eq!(heap.pop(), Some((-1_000_000_000, 2)));
    assert_eq!(heap.pop(), Some((1_000_000_000, 1)));
    assert_eq!(heap.pop(), Some((2_000_000_000, 3)));
}

/// Test rapid-fire mixed operations
fn check_rapid_fire(mut heap: QuakeHeap<i32, i32>) {
    let mut handles = Vec::new();

    for i in 0..200 {
        handles.push(heap.push_with_handle(i, i));
    }

    for (i, handle) in handles.iter().enumerate().step_by(2) {
        assert!(heap.decrease_key(handle, i as i32 - 10).is_ok());
    }

    for _ in 0..50 {
        heap.pop();
    }

    for i in 200..250 {
        heap.push(i, i);
    }

    assert!(!heap.is_empty());
    assert!(heap.verify_internal_structure());
    assert!(heap.pop().is_some());
}

/// Waves of inserts, halving decreases, and delete-mins, ending with a full
/// sorted drain.
fn check_wave_workload(mut heap: QuakeHeap<usize, i64>) {
    let n = 400usize;
    let mut handles: Vec<Option<_>> = Vec::new();

    for wave in 1..5i64 {
        let base = handles.len();
        for i in 0..n {
            let key = (base + i) as i64 * 2 * wave;
            handles.push(Some(heap.push_with_handle(key, base + i)));
        }

        // Halve a slice of keys
        for slot in handles.iter().flatten().take(n / wave as usize) {
            if slot.in_heap() {
                let key = slot.key();
                let new_key = key / 2 - 1;
                if new_key < key {
                    heap.decrease_key(slot, new_key).unwrap();
                }
            }
        }

        for _ in 0..n / 2 {
            assert!(heap.pop().is_some());
        }
        assert!(heap.verify_internal_structure());
    }

    let remaining = heap.len();
    let mut last = i64::MIN;
    let mut drained = 0usize;
    while let Some((key, _)) = heap.pop() {
        assert!(key >= last);
        last = key;
        drained += 1;
    }
    assert_eq!(drained, remaining);
    assert!(heap.is_empty());
}

#[test]
fn test_massive() {
    check_massive_operations(QuakeHeap::new());
}

#[test]
fn test_massive_alpha_half() {
    check_massive_operations(QuakeHeap::with_alpha(0.5));
}

#[test]
fn test_many_decrease_keys() {
    check_many_decrease_keys(QuakeHeap::new());
}

#[test]
fn test_many_decrease_keys_alpha_half() {
    check_many_decrease_keys(QuakeHeap::with_alpha(0.5));
}

#[test]
fn test_alternating() {
    check_alternating_ops(QuakeHeap::new());
}

#[test]
fn test_alternating_alpha_half() {
    check_alternating_ops(QuakeHeap::with_alpha(0.5));
}

#[test]
fn test_decrease_on_many() {
    check_decrease_on_many_operations(QuakeHeap::new());
}

#[test]
fn test_decrease_on_many_alpha_half() {
    check_decrease_on_many_operations(QuakeHeap::with_alpha(0.5));
}

#[test]
fn test_large_priorities() {
    check_large_priorities(QuakeHeap::new());
}

#[test]
fn test_rapid_fire() {
    check_rapid_fire(QuakeHeap::new());
}

#[test]
fn test_rapid_fire_alpha_half() {
    check_rapid_fire(QuakeHeap::with_alpha(0.5));
}

#[test]
fn test_wave_workload() {
    check_wave_workload(QuakeHeap::new());
}

#[test]
fn test_wave_workload_alpha_half() {
    check_wave_workload(QuakeHeap::with_alpha(0.5));
}
