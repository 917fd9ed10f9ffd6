//! Integration tests for the Dijkstra consumer
//!
//! Tests cover:
//! - Basic functionality on linear, grid, and weighted graphs
//! - Edge cases (unreachable goals, cycles, start == goal)
//! - Correctness where decrease_key is required for the optimal path

use quake_heap::pathfinding::{shortest_path, SearchNode};
use quake_heap::quake::QuakeHeap;

/// Grid position with walls; carries goal coordinates
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct Grid2D {
    x: i32,
    y: i32,
    goal_x: i32,
    goal_y: i32,
}

impl Grid2D {
    fn new(x: i32, y: i32, goal_x: i32, goal_y: i32) -> Self {
        Grid2D { x, y, goal_x, goal_y }
    }

    // A vertical wall at x == 5 with a gap at y == 9, inside a 10x10 grid
    fn blocked(x: i32, y: i32) -> bool {
        !(0..10).contains(&x) || !(0..10).contains(&y) || (x == 5 && y != 9)
    }
}

impl SearchNode for Grid2D {
    type Cost = u32;

    fn successors(&self) -> Vec<(Self, u32)> {
        [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .filter(|&(x, y)| !Self::blocked(x, y))
            .map(|(x, y)| (Grid2D::new(x, y, self.goal_x, self.goal_y), 1))
            .collect()
    }

    fn is_goal(&self) -> bool {
        self.x == self.goal_x && self.y == self.goal_y
    }
}

#[test]
fn test_grid_open_path() {
    let start = Grid2D::new(0, 0, 4, 4);
    let (path, cost) = shortest_path::<_, QuakeHeap<_, _>>(&start).unwrap();
    assert_eq!(cost, 8);
    assert_eq!(path.len(), 9);
    assert_eq!((path[0].x, path[0].y), (0, 0));
    let last = path.last().unwrap();
    assert_eq!((last.x, last.y), (4, 4));
}

#[test]
fn test_grid_path_around_wall() {
    // Crossing the wall forces a detour through the gap at (5, 9)
    let start = Grid2D::new(0, 0, 9, 0);
    let (path, cost) = shortest_path::<_, QuakeHeap<_, _>>(&start).unwrap();
    // 0,0 up to the gap row, across, and back down: 9 + 9 + 9
    assert_eq!(cost, 27);
    assert!(path.iter().any(|p| p.x == 5 && p.y == 9));
    // Every step moves by exactly one cell
    for pair in path.windows(2) {
        let d = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
        assert_eq!(d, 1);
    }
}

#[test]
fn test_grid_start_is_goal() {
    let start = Grid2D::new(3, 3, 3, 3);
    let (path, cost) = shortest_path::<_, QuakeHeap<_, _>>(&start).unwrap();
    assert_eq!(cost, 0);
    assert_eq!(path.len(), 1);
}

#[test]
fn test_grid_unreachable_goal() {
    // Goal sits on the wall itself, which no successor ever yields
    let start = Grid2D::new(0, 0, 5, 3);
    assert!(shortest_path::<_, QuakeHeap<_, _>>(&start).is_none());
}

/// Weighted graph where the first tentative distance to a node is later
/// improved, exercising decrease_key inside the search.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct Weighted {
    id: u32,
    goal: u32,
}

impl SearchNode for Weighted {
    type Cost = u64;

    fn successors(&self) -> Vec<(Self, u64)> {
        let next = |id| Weighted { id, goal: self.goal };
        match self.id {
            // Diamond with a cheap back road: 0->1 direct costs 100,
            // 0->2->1 costs 3.
            0 => vec![(next(1), 100), (next(2), 1)],
            1 => vec![(next(3), 1)],
            2 => vec![(next(1), 2), (next(4), 50)],
            3 => vec![(next(4), 1)],
            _ => vec![],
        }
    }

    fn is_goal(&self) -> bool {
        self.id == self.goal
    }
}

#[test]
fn test_decrease_key_required_for_optimum() {
    let start = Weighted { id: 0, goal: 4 };
    let (path, cost) = shortest_path::<_, QuakeHeap<_, _>>(&start).unwrap();
    // 0 -> 2 -> 1 -> 3 -> 4 costs 5, beating 0 -> 2 -> 4 at 51
    assert_eq!(cost, 5);
    let ids: Vec<u32> = path.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![0, 2, 1, 3, 4]);
}

#[test]
fn test_cycle_terminates() {
    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    struct Ring {
        id: u32,
        goal: u32,
    }

    impl SearchNode for Ring {
        type Cost = u32;
        fn successors(&self) -> Vec<(Self, u32)> {
            // A 6-cycle walkable in both directions
            let n = |id| Ring { id, goal: self.goal };
            vec![(n((self.id + 1) % 6), 1), (n((self.id + 5) % 6), 1)]
        }
        fn is_goal(&self) -> bool {
            self.id == self.goal
        }
    }

    let start = Ring { id: 0, goal: 4 };
    let (path, cost) = shortest_path::<_, QuakeHeap<_, _>>(&start).unwrap();
    // Going backwards around the ring is shorter: 0 -> 5 -> 4
    assert_eq!(cost, 2);
    assert_eq!(path.len(), 3);
}
