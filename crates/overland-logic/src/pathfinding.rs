//! Budget-bounded A* over the 4-connected terrain grid.
//!
//! The algorithm:
//! 1. Edge weight into a neighbor is `1 / (rate + RATE_EPSILON)` where
//!    `rate` is the traveling agent's movement-point rate on the neighbor's
//!    terrain, so fast terrain is cheap and slow terrain is dear.
//! 2. Cells whose rate is at or below `RATE_EPSILON` are never expanded.
//! 3. The heuristic is plain Manhattan distance. Step weights drop below
//!    1.0 on fast terrain, where the heuristic can overestimate: returned
//!    paths strongly prefer cheap terrain but are not guaranteed to be
//!    strictly cost-optimal. That trade has been good enough in practice.
//! 4. A node-expansion budget caps the search, turning pathological cases
//!    into a clean "unreachable" answer instead of a latency spike.
//!
//! Ties in the frontier break by discovery order, so two calls with the
//! same inputs always return the same path.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use crate::constants::RATE_EPSILON;
use crate::coords::Coord;

/// Frontier entry: estimated total cost plus a discovery counter so entries
/// with equal priority pop in insertion order.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FrontierNode {
    priority: f32,
    order: u32,
    cell: Coord,
}

impl Eq for FrontierNode {}

impl Ord for FrontierNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .partial_cmp(&other.priority)
            .unwrap_or(Ordering::Equal)
            .then(self.order.cmp(&other.order))
    }
}

impl PartialOrd for FrontierNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a path from `start` to `goal`, excluding `start` itself.
///
/// `rate_at` yields the movement-point rate for entering a cell; cells at
/// or below the traversable minimum grow no edges. Returns `None` when the
/// goal is unreachable or the expansion budget runs out first. An empty
/// path means the agent is already standing on the goal.
pub fn find_path(
    start: Coord,
    goal: Coord,
    width: i32,
    height: i32,
    budget: u32,
    rate_at: &dyn Fn(Coord) -> f32,
) -> Option<Vec<Coord>> {
    if start == goal {
        return Some(Vec::new());
    }

    let mut frontier: BinaryHeap<Reverse<FrontierNode>> = BinaryHeap::new();
    let mut came_from: HashMap<Coord, Coord> = HashMap::new();
    let mut cost_so_far: HashMap<Coord, f32> = HashMap::new();
    let mut order = 0u32;
    let mut expanded = 0u32;

    frontier.push(Reverse(FrontierNode {
        priority: 0.0,
        order,
        cell: start,
    }));
    cost_so_far.insert(start, 0.0);

    while let Some(Reverse(node)) = frontier.pop() {
        expanded += 1;
        if expanded > budget {
            return None;
        }

        let current = node.cell;
        if current == goal {
            return Some(reconstruct(&came_from, start, goal));
        }

        let current_cost = *cost_so_far.get(&current).unwrap_or(&f32::INFINITY);
        for next in current.neighbors() {
            if !next.in_bounds(width, height) {
                continue;
            }
            let rate = rate_at(next);
            if rate <= RATE_EPSILON {
                continue;
            }
            let new_cost = current_cost + 1.0 / (rate + RATE_EPSILON);
            let better = match cost_so_far.get(&next) {
                Some(&known) => new_cost < known,
                None => true,
            };
            if better {
                cost_so_far.insert(next, new_cost);
                came_from.insert(next, current);
                order += 1;
                frontier.push(Reverse(FrontierNode {
                    priority: new_cost + next.manhattan(&goal) as f32,
                    order,
                    cell: next,
                }));
            }
        }
    }

    None
}

/// Walk the parent links back from the goal, then flip. The start cell is
/// left out: the first element is the first cell to step into.
fn reconstruct(came_from: &HashMap<Coord, Coord>, start: Coord, goal: Coord) -> Vec<Coord> {
    let mut path = vec![goal];
    let mut node = goal;
    while let Some(&prev) = came_from.get(&node) {
        if prev == start {
            break;
        }
        path.push(prev);
        node = prev;
    }
    path.reverse();
    path
}
