//! Deterministic 8-way movement primitives and shortest-path helpers.
//! This module exists so path distance and single-step movement share one set of walking rules.
//! It does not own goal policy or decide where an agent wants to go.

use std::collections::{BTreeMap, BTreeSet};

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

/// Cells from `start` (exclusive) to `goal` (inclusive).
/// `blocked` cells are avoided unless they are the goal.
pub(super) fn astar_path(map: &Map, start: Pos, goal: Pos, blocked: &[Pos]) -> Option<Vec<Pos>> {
    if !map.is_walkable(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![]);
    }
    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = chebyshev(start, goal);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });
    g_score.insert(start, 0);
    while let Some(curr) = open_set.pop_first() {
        let p = Pos { y: curr.y, x: curr.x };
        if p == goal {
            return reconstruct_path(&came_from, start, goal);
        }
        let cur_g = *g_score.get(&p)?;
        for n in neighbors(p) {
            if !map.is_walkable(n) || (n != goal && blocked.contains(&n)) {
                continue;
            }
            let tg = cur_g + 1;
            if tg < *g_score.get(&n).unwrap_or(&u32::MAX) {
                came_from.insert(n, p);
                g_score.insert(n, tg);
                let h = chebyshev(n, goal);
                open_set.insert(OpenNode { f: tg + h, h, y: n.y, x: n.x });
            }
        }
    }
    None
}

fn reconstruct_path(came: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
    let mut p = goal;
    let mut result = vec![p];
    while p != start {
        p = *came.get(&p)?;
        result.push(p);
    }
    result.reverse();
    result.remove(0);
    Some(result)
}

/// The eight surrounding cells, clockwise from north.
pub fn neighbors(p: Pos) -> [Pos; 8] {
    [
        Pos { y: p.y - 1, x: p.x },
        Pos { y: p.y - 1, x: p.x + 1 },
        Pos { y: p.y, x: p.x + 1 },
        Pos { y: p.y + 1, x: p.x + 1 },
        Pos { y: p.y + 1, x: p.x },
        Pos { y: p.y + 1, x: p.x - 1 },
        Pos { y: p.y, x: p.x - 1 },
        Pos { y: p.y - 1, x: p.x - 1 },
    ]
}

pub fn chebyshev(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::test_support::*;

    #[test]
    fn diagonal_steps_cost_the_same_as_straight_ones() {
        let map = Map::new(10, 10);
        let path = astar_path(&map, Pos { y: 1, x: 1 }, Pos { y: 4, x: 4 }, &[]).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.last(), Some(&Pos { y: 4, x: 4 }));
    }

    #[test]
    fn closed_door_blocks_transit_and_cannot_be_a_goal() {
        let (map, start, door) = door_corridor_fixture();
        let beyond_door = Pos { y: door.y, x: door.x + 2 };
        assert!(astar_path(&map, start, beyond_door, &[]).is_none());
        assert!(astar_path(&map, start, door, &[]).is_none());
    }

    #[test]
    fn blocked_cells_are_routed_around_but_may_be_the_goal() {
        let (map, start, _) = door_corridor_fixture();
        let occupied = Pos { y: start.y, x: start.x + 1 };
        assert!(
            astar_path(&map, start, Pos { y: start.y, x: start.x + 2 }, &[occupied]).is_none(),
            "a one-wide corridor has no way around an occupied cell"
        );
        assert_eq!(astar_path(&map, start, occupied, &[occupied]), Some(vec![occupied]));
    }

    #[test]
    fn same_start_and_goal_is_an_empty_path() {
        let map = Map::new(5, 5);
        let p = Pos { y: 2, x: 2 };
        assert_eq!(astar_path(&map, p, p, &[]), Some(vec![]));
    }

    #[test]
    fn search_is_deterministic() {
        let map = Map::new(12, 12);
        let a = astar_path(&map, Pos { y: 1, x: 1 }, Pos { y: 9, x: 6 }, &[]);
        let b = astar_path(&map, Pos { y: 1, x: 1 }, Pos { y: 9, x: 6 }, &[]);
        assert_eq!(a, b);
    }
}
