//! Breadth-first flood over path cells.

use std::collections::VecDeque;

use crate::{array::Array2D, dims::Dims, grid::Grid};

/// Number of steps from `from` to every reachable cell, `None` elsewhere.
pub fn distances(grid: &Grid, from: Dims) -> Array2D<Option<u32>> {
    let Dims(width, height) = grid.size();
    let mut dist = Array2D::new(None, width as usize, height as usize);
    if !grid.is_path(from) {
        return dist;
    }

    dist[from] = Some(0);
    let mut queue = VecDeque::from([from]);
    while let Some(pos) = queue.pop_front() {
        let Some(d) = dist[pos] else { continue };
        for next in grid.neighbors_for_traversal(pos) {
            if dist[next].is_none() {
                dist[next] = Some(d + 1);
                queue.push_back(next);
            }
        }
    }

    dist
}

pub fn shortest_distance(grid: &Grid, from: Dims, to: Dims) -> Option<u32> {
    distances(grid, from).get(to).copied().flatten()
}

pub fn is_reachable(grid: &Grid, from: Dims, to: Dims) -> bool {
    shortest_distance(grid, from, to).is_some()
}
