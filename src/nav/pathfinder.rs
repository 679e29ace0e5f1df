//! Path queries over the global navigation graph.
//!
//! Endpoints that are not themselves graph points are snapped to the nearest
//! point within a fixed tolerance before searching; failing to find a path
//! is an ordinary outcome carried in the result type, not a panic.

use cgmath::{MetricSpace, Point3};
use log::debug;
use thiserror::Error;

use super::NavGraph;
use crate::voxels::{Location, VoxelChunk};

/// How far (in world units) an endpoint may sit from its nearest graph
/// point before the query is rejected instead of snapped.
pub const MAX_SNAP_DISTANCE: f32 = 2.5;

/// Why a path query produced no path.
#[derive(Debug, Error, PartialEq)]
pub enum PathError {
    /// An endpoint's local voxel coordinate is outside chunk bounds; the
    /// request itself is invalid.
    #[error("location {0} is outside chunk bounds")]
    OutOfBounds(Location),

    /// No graph point lies within [`MAX_SNAP_DISTANCE`] of the endpoint.
    #[error("no nav point within {MAX_SNAP_DISTANCE} units of {0}")]
    NoNearbyPoint(Location),

    /// Both endpoints resolved to graph points, but they are disconnected.
    #[error("no path between {0} and {1}")]
    NoPath(Location, Location),
}

fn global_position(location: Location) -> Point3<f32> {
    let global = location.global_position();
    Point3::new(global.x as f32, global.y as f32, global.z as f32)
}

fn snap_to_graph(graph: &NavGraph, location: Location) -> Result<Location, PathError> {
    let target = global_position(location);
    let closest = graph
        .closest_point(target)
        .ok_or(PathError::NoNearbyPoint(location))?;

    let snapped = Location::from_packed(closest);
    let distance = global_position(snapped).distance(target);

    if distance > MAX_SNAP_DISTANCE {
        return Err(PathError::NoNearbyPoint(location));
    }

    debug!("snapped {location} to {snapped} ({distance:.2} away)");
    Ok(snapped)
}

/// Finds a path between two locations over the given graph snapshot.
///
/// Either endpoint may be off the graph by up to [`MAX_SNAP_DISTANCE`]; it
/// is substituted by its nearest graph point (at most once per endpoint).
/// The returned sequence runs from the resolved start to the resolved goal,
/// both included.
pub fn get_path(
    graph: &NavGraph,
    from: Location,
    to: Location,
) -> Result<Vec<Location>, PathError> {
    if !VoxelChunk::is_voxel_in_bounds(from.voxel) {
        return Err(PathError::OutOfBounds(from));
    }
    if !VoxelChunk::is_voxel_in_bounds(to.voxel) {
        return Err(PathError::OutOfBounds(to));
    }

    let start = from.pack();
    let goal = to.pack();

    if !graph.has_point(start) {
        let snapped = snap_to_graph(graph, from)?;
        return get_path(graph, snapped, to);
    }

    if !graph.has_point(goal) {
        let snapped = snap_to_graph(graph, to)?;
        return get_path(graph, from, snapped);
    }

    let points = graph
        .find_path(start, goal)
        .ok_or(PathError::NoPath(from, to))?;

    Ok(points.into_iter().map(Location::from_packed).collect())
}
