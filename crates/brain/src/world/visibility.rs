//! Line-of-sight, straight lines and radius-bounded visibility floods.
//! This module exists to keep sight rules deterministic and shared by searches and safety scans.
//! It does not own what callers do with the cells it returns.

use std::collections::{BTreeSet, VecDeque};

use super::*;

/// Non-opaque cells within Chebyshev `radius` of `origin` that the origin can see, row-major.
pub(super) fn flood_visible(map: &Map, origin: Pos, radius: u32) -> Vec<Pos> {
    let mut visited = BTreeSet::new();
    if !map.in_bounds(origin) {
        return Vec::new();
    }
    let mut queue = VecDeque::new();
    visited.insert(origin);
    queue.push_back(origin);

    while let Some(current) = queue.pop_front() {
        for next in neighbors(current) {
            if !map.in_bounds(next) || map.is_opaque(next) || chebyshev(origin, next) > radius {
                continue;
            }
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    visited.into_iter().filter(|&p| has_direct_line_of_sight(map, origin, p)).collect()
}

/// Bresenham line from `from` to `to`, both ends included.
pub(super) fn line(from: Pos, to: Pos) -> Vec<Pos> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let mut x = from.x;
    let mut y = from.y;
    let mut cells = vec![from];
    while x != to.x || y != to.y {
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
        cells.push(Pos { y, x });
    }
    cells
}

pub(super) fn has_direct_line_of_sight(map: &Map, origin: Pos, target: Pos) -> bool {
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;
    let sx = dx.signum();
    let sy = dy.signum();
    let total_dist_x = dx.abs();
    let total_dist_y = dy.abs();

    let mut x = origin.x;
    let mut y = origin.y;
    let mut current_step_x = 0;
    let mut current_step_y = 0;

    while current_step_x < total_dist_x || current_step_y < total_dist_y {
        let lhs = (1 + 2 * current_step_x) * total_dist_y;
        let rhs = (1 + 2 * current_step_y) * total_dist_x;

        if lhs == rhs {
            x += sx;
            y += sy;
            current_step_x += 1;
            current_step_y += 1;
        } else if lhs < rhs {
            x += sx;
            current_step_x += 1;
        } else {
            y += sy;
            current_step_y += 1;
        }

        if x == target.x && y == target.y {
            break;
        }
        if map.is_opaque(Pos { y, x }) {
            return false;
        }
    }
    true
}
