use bracket_geometry::prelude::Point;
use bracket_pathfinding::prelude::{Algorithm2D, BaseMap, DistanceAlg, a_star_search};
use smallvec::SmallVec;

use super::MazeLevel;

const STEPS: [Point; 4] = [
    Point { x: 1, y: 0 },
    Point { x: -1, y: 0 },
    Point { x: 0, y: 1 },
    Point { x: 0, y: -1 },
];

struct Walkable<'a> {
    level: &'a MazeLevel,
}

impl Walkable<'_> {
    fn open(&self, point: Point) -> bool {
        self.level.in_bounds(point) && !self.level.is_wall(point)
    }
}

impl BaseMap for Walkable<'_> {
    fn is_opaque(&self, idx: usize) -> bool {
        let point = self.index_to_point2d(idx);
        !self.open(point)
    }

    fn get_available_exits(&self, idx: usize) -> SmallVec<[(usize, f32); 10]> {
        let mut exits = SmallVec::new();
        let point = self.index_to_point2d(idx);
        for dir in STEPS {
            let dest = Point::new(point.x + dir.x, point.y + dir.y);
            if self.open(dest) {
                exits.push((self.point2d_to_index(dest), 1.0));
            }
        }
        exits
    }

    fn get_pathing_distance(&self, idx1: usize, idx2: usize) -> f32 {
        let p1 = self.index_to_point2d(idx1);
        let p2 = self.index_to_point2d(idx2);
        DistanceAlg::Manhattan.distance2d(p1, p2)
    }
}

impl Algorithm2D for Walkable<'_> {
    fn dimensions(&self) -> Point {
        let (rows, cols) = self.level.dimensions();
        Point::new(cols, rows)
    }

    fn in_bounds(&self, point: Point) -> bool {
        self.level.in_bounds(point)
    }
}

/// Whether cardinal steps over non-wall cells lead from `from` to `to`.
pub(super) fn path_exists(level: &MazeLevel, from: Point, to: Point) -> bool {
    let map = Walkable { level };
    if !map.open(from) || !map.open(to) {
        return false;
    }
    if from == to {
        return true;
    }
    a_star_search(map.point2d_to_index(from), map.point2d_to_index(to), &map).success
}
