//! The global navigation graph and its shortest-path search.

use std::collections::{BinaryHeap, HashMap};

use cgmath::{MetricSpace, Point3};

/// The stitched, world-wide navigation graph.
///
/// Nodes are packed point ids carrying their own world position (see
/// `voxels::location`), so recovering a `Location` from a search result
/// needs no side table. Connections are undirected.
///
/// A graph instance is an immutable snapshot once built: the worker swaps in
/// a fresh one after every rebuild, and queries running against an older
/// snapshot simply see slightly stale data.
#[derive(Debug, Default)]
pub struct NavGraph {
    points: HashMap<u64, Point3<f32>>,
    neighbors: HashMap<u64, Vec<u64>>,
}

impl NavGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        NavGraph::default()
    }

    /// The number of points in the graph.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the graph has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the given point id is part of the graph.
    pub fn has_point(&self, id: u64) -> bool {
        self.points.contains_key(&id)
    }

    /// The world position of a point, if it exists.
    pub fn point_position(&self, id: u64) -> Option<Point3<f32>> {
        self.points.get(&id).copied()
    }

    /// Iterates over every point id in the graph (in no particular order).
    pub fn points(&self) -> impl Iterator<Item = u64> + '_ {
        self.points.keys().copied()
    }

    /// Adds a point with its world position. Re-adding an id updates the
    /// position without duplicating adjacency.
    pub fn add_point(&mut self, id: u64, position: Point3<f32>) {
        self.points.insert(id, position);
        self.neighbors.entry(id).or_default();
    }

    /// Connects two points bidirectionally.
    ///
    /// Ignored unless both endpoints exist: border stitching and local
    /// connections may name candidates that never became points, and those
    /// are simply dropped.
    pub fn connect(&mut self, a: u64, b: u64) {
        if !self.has_point(a) || !self.has_point(b) || a == b {
            return;
        }

        let forward = self.neighbors.entry(a).or_default();
        if !forward.contains(&b) {
            forward.push(b);
        }
        let backward = self.neighbors.entry(b).or_default();
        if !backward.contains(&a) {
            backward.push(a);
        }
    }

    /// The ids connected to a point.
    pub fn connections(&self, id: u64) -> &[u64] {
        self.neighbors.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Finds the graph point nearest to a world position, by Euclidean
    /// distance. Ties break toward the smaller id so the result is stable.
    pub fn closest_point(&self, position: Point3<f32>) -> Option<u64> {
        self.points
            .iter()
            .min_by(|a, b| {
                a.1.distance2(position)
                    .total_cmp(&b.1.distance2(position))
                    .then_with(|| a.0.cmp(b.0))
            })
            .map(|(&id, _)| id)
    }

    /// Runs A* between two points, returning the ordered id sequence
    /// (including both endpoints), or `None` when the points are
    /// disconnected or missing.
    pub fn find_path(&self, from: u64, to: u64) -> Option<Vec<u64>> {
        let goal_position = self.point_position(to)?;
        self.point_position(from)?;

        if from == to {
            return Some(vec![from]);
        }

        let mut open = BinaryHeap::new();
        let mut best_cost: HashMap<u64, f32> = HashMap::new();
        let mut came_from: HashMap<u64, u64> = HashMap::new();

        best_cost.insert(from, 0.0);
        open.push(OpenEntry {
            estimate: self.point_position(from)?.distance(goal_position),
            id: from,
        });

        while let Some(OpenEntry { id: current, .. }) = open.pop() {
            if current == to {
                return Some(reconstruct(&came_from, from, to));
            }

            let current_cost = best_cost[&current];
            let current_position = self.point_position(current)?;

            for &next in self.connections(current) {
                let Some(next_position) = self.point_position(next) else {
                    continue;
                };
                let tentative = current_cost + current_position.distance(next_position);

                if tentative < *best_cost.get(&next).unwrap_or(&f32::INFINITY) {
                    best_cost.insert(next, tentative);
                    came_from.insert(next, current);
                    open.push(OpenEntry {
                        estimate: tentative + next_position.distance(goal_position),
                        id: next,
                    });
                }
            }
        }

        None
    }
}

fn reconstruct(came_from: &HashMap<u64, u64>, from: u64, to: u64) -> Vec<u64> {
    let mut path = vec![to];
    let mut current = to;
    while current != from {
        current = came_from[&current];
        path.push(current);
    }
    path.reverse();
    path
}

/// Open-set entry ordered so the binary heap pops the lowest estimate first.
#[derive(Copy, Clone, PartialEq)]
struct OpenEntry {
    estimate: f32,
    id: u64,
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
