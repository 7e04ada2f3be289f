//! A generic A* engine driven by a four-method search space contract.
//!
//! Implements standard A* search using a [BinaryHeap] min-heap via reversed
//! ordering. Score and came-from bookkeeping use [BTreeMap] as nodes span a
//! virtual infinite grid of sectors, and heap entries tie-break on node
//! ordering with [f32::total_cmp] so that repeated searches over the same
//! data always produce the same route.
//!

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

/// The contract a space must fulfil for routes to be found through it. The
/// engine is agnostic of sectors and waypoints, it only ever sees opaque
/// nodes through these four methods
pub trait SearchSpace {
	/// An addressable point of the space
	type Node: Copy + Ord;
	/// The cost of stepping between two adjacent nodes
	fn cost(&self, from: Self::Node, to: Self::Node) -> f32;
	/// An estimate of the remaining cost between two nodes, used to steer
	/// exploration towards the goal
	fn heuristic(&self, from: Self::Node, to: Self::Node) -> f32;
	/// Whether a step between two adjacent nodes may be taken
	fn passable(&self, from: Self::Node, to: Self::Node) -> bool;
	/// Every node reachable in a single step from `node`, in a stable order
	fn successors(&self, node: Self::Node) -> Vec<Self::Node>;
}

/// Entry in the A* open set (min-heap via reversed ordering)
struct OpenEntry<N> {
	/// The node to explore
	node: N,
	/// Cost so far plus the heuristic estimate to the goal
	f_score: f32,
}

impl<N: Ord> PartialEq for OpenEntry<N> {
	fn eq(&self, other: &Self) -> bool {
		self.f_score.total_cmp(&other.f_score) == Ordering::Equal && self.node == other.node
	}
}

impl<N: Ord> Eq for OpenEntry<N> {}

impl<N: Ord> PartialOrd for OpenEntry<N> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl<N: Ord> Ord for OpenEntry<N> {
	fn cmp(&self, other: &Self) -> Ordering {
		// reversed for min-heap: smallest f_score is "greatest"
		other
			.f_score
			.total_cmp(&self.f_score)
			.then_with(|| other.node.cmp(&self.node))
	}
}

/// Find the cheapest route from `start` to `goal` as an ordered list of
/// nodes inclusive of both ends. Returns [None] when the goal cannot be
/// reached, or when `max_expansions` nodes have been expanded without
/// reaching it - pass [None] as the budget to run the search to exhaustion
pub fn solve<S: SearchSpace>(
	space: &S,
	start: S::Node,
	goal: S::Node,
	max_expansions: Option<usize>,
) -> Option<Vec<S::Node>> {
	if start == goal {
		return Some(vec![start]);
	}
	// cheapest known cost from the start to each discovered node
	let mut g_score: BTreeMap<S::Node, f32> = BTreeMap::new();
	g_score.insert(start, 0.0);
	let mut came_from: BTreeMap<S::Node, S::Node> = BTreeMap::new();
	let mut closed: BTreeSet<S::Node> = BTreeSet::new();
	let mut open = BinaryHeap::new();
	open.push(OpenEntry {
		node: start,
		f_score: space.heuristic(start, goal),
	});
	let mut expansions = 0;
	while let Some(current) = open.pop() {
		let node = current.node;
		if node == goal {
			return Some(reconstruct_path(&came_from, start, goal));
		}
		if !closed.insert(node) {
			continue;
		}
		expansions += 1;
		if let Some(limit) = max_expansions {
			if expansions > limit {
				return None;
			}
		}
		let current_g = *g_score.get(&node).unwrap();
		for next in space.successors(node) {
			if closed.contains(&next) {
				continue;
			}
			if !space.passable(node, next) {
				continue;
			}
			let tentative = current_g + space.cost(node, next);
			let improved = match g_score.get(&next) {
				Some(best) => tentative < *best,
				None => true,
			};
			if improved {
				g_score.insert(next, tentative);
				came_from.insert(next, node);
				open.push(OpenEntry {
					node: next,
					f_score: tentative + space.heuristic(next, goal),
				});
			}
		}
	}
	None
}

/// Walk the came-from records backwards from the goal to produce the ordered
/// route
fn reconstruct_path<N: Copy + Ord>(came_from: &BTreeMap<N, N>, start: N, goal: N) -> Vec<N> {
	let mut nodes = vec![goal];
	let mut current = goal;
	while current != start {
		current = *came_from.get(&current).unwrap();
		nodes.push(current);
	}
	nodes.reverse();
	nodes
}
