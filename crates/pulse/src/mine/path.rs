//! Vertex path selector.
//!
//! Walks the vertex set greedily from the origin, always moving to a vertex
//! that is not behind the current one on either axis. The nearest vertex
//! (Manhattan distance) wins, unless the runner-up is within the detour
//! window and starts a strictly longer diagonal run.

use super::align::VertexSet;
use super::model::{Vertex, VertexDistance};

/// Default detour window, in Manhattan distance.
pub const DEFAULT_DETOUR_WINDOW: usize = 3;

/// Pick the next vertex reachable from `(x, y)`, if any.
pub fn next_vertex(x: usize, y: usize, candidates: &[Vertex], detour_window: usize) -> Option<Vertex> {
    let mut distances: Vec<VertexDistance> = candidates
        .iter()
        .enumerate()
        .filter(|(_, v)| v.x >= x && v.y >= y)
        .map(|(index, v)| VertexDistance {
            distance: v.distance_from(x, y),
            index,
        })
        .collect();

    // Stable: equal distances keep coordinate order.
    distances.sort_by_key(|d| d.distance);

    let nearest = distances.first()?;
    let mut choice = candidates[nearest.index];

    if let Some(runner_up) = distances.get(1) {
        let detour = runner_up.distance - nearest.distance;
        let alternative = candidates[runner_up.index];
        if detour <= detour_window && alternative.run_length > choice.run_length {
            choice = alternative;
        }
    }

    Some(choice)
}

/// Consume the vertex set and return the selected path, origin first.
///
/// An empty path means no pattern.
pub fn select_path(mut vertices: VertexSet, detour_window: usize) -> Vec<Vertex> {
    let mut path = Vec::new();

    if let Some(origin) = vertices.remove(0, 0) {
        path.push(origin);
    }

    let (mut x, mut y) = (0, 0);
    loop {
        let remaining: Vec<Vertex> = vertices.iter().collect();
        let Some(next) = next_vertex(x, y, &remaining, detour_window) else {
            break;
        };
        vertices.remove(next.x, next.y);
        path.push(next);
        x = next.x;
        y = next.y;
    }

    tracing::trace!(path = ?path, "selected vertex path");
    path
}
