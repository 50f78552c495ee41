mod reach;

use std::collections::HashSet;

use bracket_geometry::prelude::Point;
use serde::Deserialize;

use crate::error::{LevelError, LevelResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u8")]
pub enum Tile {
    Floor,
    Wall,
    Start,
    Goal,
    PowerUp,
    Coin,
}

impl TryFrom<u8> for Tile {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Tile::Floor),
            1 => Ok(Tile::Wall),
            2 => Ok(Tile::Start),
            3 => Ok(Tile::Goal),
            4 => Ok(Tile::PowerUp),
            5 => Ok(Tile::Coin),
            other => Err(format!("unknown tile code {other}")),
        }
    }
}

/// One maze grid plus the pickup and coin-timer state of its current activation.
///
/// Cells are addressed with `Point { x: column, y: row }`. The grid never changes
/// after construction apart from the start tile, which is read once and then
/// turned into floor.
#[derive(Clone, Debug)]
pub struct MazeLevel {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    start: Option<Point>,
    collected: HashSet<Point>,
    level_start_time: u64,
    coin_duration_ms: u64,
}

impl MazeLevel {
    /// Copies `grid` into a new level. `index` only labels errors.
    pub fn from_grid(
        index: usize,
        grid: &[Vec<Tile>],
        coin_duration_ms: u64,
        now: u64,
    ) -> LevelResult<Self> {
        let expected = grid.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(LevelError::EmptyGrid { level: index });
        }
        if let Some((row, found)) = grid
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(LevelError::RaggedRow {
                level: index,
                row,
                expected,
                found,
            });
        }

        let mut level = Self {
            width: expected as i32,
            height: grid.len() as i32,
            tiles: grid.iter().flatten().copied().collect(),
            start: None,
            collected: HashSet::new(),
            level_start_time: now,
            coin_duration_ms,
        };
        level.start = level.find_start();
        if let Some(start) = level.start {
            let idx = level.idx(start);
            level.tiles[idx] = Tile::Floor;
        }
        Ok(level)
    }

    /// `(rows, cols)`.
    pub fn dimensions(&self) -> (i32, i32) {
        (self.height, self.width)
    }

    /// `(width, height)` in pixels, clamped at `i32::MAX`.
    pub fn pixel_size(&self, tile_size: i32) -> (i32, i32) {
        (
            self.width.saturating_mul(tile_size),
            self.height.saturating_mul(tile_size),
        )
    }

    /// `None` when either side does not fit in an `i32`.
    pub fn checked_pixel_size(&self, tile_size: i32) -> Option<(i32, i32)> {
        Some((
            self.width.checked_mul(tile_size)?,
            self.height.checked_mul(tile_size)?,
        ))
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height
    }

    fn idx(&self, point: Point) -> usize {
        assert!(
            self.in_bounds(point),
            "tile query at row {} col {} outside {}x{} grid",
            point.y,
            point.x,
            self.height,
            self.width
        );
        (point.y * self.width + point.x) as usize
    }

    /// Panics when `point` is outside the grid; check [`MazeLevel::in_bounds`] first.
    pub fn tile_at(&self, point: Point) -> Tile {
        self.tiles[self.idx(point)]
    }

    pub fn is_wall(&self, point: Point) -> bool {
        self.tile_at(point) == Tile::Wall
    }

    pub fn is_goal(&self, point: Point) -> bool {
        self.tile_at(point) == Tile::Goal
    }

    pub fn is_power_up(&self, point: Point) -> bool {
        self.tile_at(point) == Tile::PowerUp
    }

    pub fn is_coin(&self, point: Point) -> bool {
        self.tile_at(point) == Tile::Coin
    }

    pub fn is_collected(&self, point: Point) -> bool {
        self.collected.contains(&point)
    }

    pub fn collect_item(&mut self, point: Point) {
        self.collected.insert(point);
    }

    pub fn coins_available(&self, now: u64) -> bool {
        now.saturating_sub(self.level_start_time) < self.coin_duration_ms
    }

    /// Milliseconds left in the coin window, zero once it has closed.
    pub fn coin_time_remaining(&self, now: u64) -> u64 {
        self.coin_duration_ms
            .saturating_sub(now.saturating_sub(self.level_start_time))
    }

    /// Starts a fresh activation: new coin window, nothing collected.
    pub fn reset_timer(&mut self, now: u64) {
        self.level_start_time = now;
        self.collected.clear();
    }

    pub fn find_start(&self) -> Option<Point> {
        self.cells_matching(Tile::Start).next()
    }

    /// The start cell found at construction.
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Row-major walk over every cell holding `tile`.
    pub fn cells_matching(&self, tile: Tile) -> impl Iterator<Item = Point> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .filter(move |(_, candidate)| **candidate == tile)
            .map(move |(idx, _)| Point::new(idx as i32 % width, idx as i32 / width))
    }

    pub fn path_exists(&self, from: Point, to: Point) -> bool {
        reach::path_exists(self, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const F: Tile = Tile::Floor;
    const W: Tile = Tile::Wall;
    const S: Tile = Tile::Start;
    const G: Tile = Tile::Goal;
    const P: Tile = Tile::PowerUp;
    const C: Tile = Tile::Coin;

    fn level(grid: Vec<Vec<Tile>>) -> MazeLevel {
        MazeLevel::from_grid(0, &grid, 15_000, 0).unwrap()
    }

    #[test]
    fn start_is_found_in_row_major_order_and_normalized() {
        let grid = vec![vec![F, F, W], vec![W, S, S], vec![S, G, F]];
        let maze = level(grid.clone());
        assert_eq!(maze.start(), Some(Point::new(1, 1)));
        assert_eq!(maze.tile_at(Point::new(1, 1)), Tile::Floor);
        // Only the first start marker is normalized.
        assert_eq!(maze.tile_at(Point::new(2, 1)), Tile::Start);
        assert_eq!(maze.find_start(), Some(Point::new(2, 1)));
        // The source grid is left untouched.
        assert_eq!(grid[1][1], Tile::Start);
    }

    #[test]
    fn missing_start_is_none() {
        let maze = level(vec![vec![F, W], vec![G, F]]);
        assert_eq!(maze.start(), None);
    }

    #[test]
    fn geometry_follows_grid_shape() {
        let maze = level(vec![vec![F, F, F], vec![W, W, G]]);
        assert_eq!(maze.dimensions(), (2, 3));
        assert_eq!(maze.pixel_size(32), (96, 64));
        assert!(maze.in_bounds(Point::new(2, 1)));
        assert!(!maze.in_bounds(Point::new(3, 1)));
        assert!(!maze.in_bounds(Point::new(0, 2)));
        assert!(!maze.in_bounds(Point::new(-1, 0)));
    }

    #[test]
    fn predicates_read_tile_codes() {
        let maze = level(vec![vec![W, G, P, C]]);
        assert!(maze.is_wall(Point::new(0, 0)));
        assert!(maze.is_goal(Point::new(1, 0)));
        assert!(maze.is_power_up(Point::new(2, 0)));
        assert!(maze.is_coin(Point::new(3, 0)));
        assert!(!maze.is_coin(Point::new(2, 0)));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_bounds_tile_query_panics() {
        let maze = level(vec![vec![F]]);
        maze.tile_at(Point::new(1, 0));
    }

    #[test]
    fn collecting_is_idempotent() {
        let mut maze = level(vec![vec![P, C]]);
        let cell = Point::new(0, 0);
        assert!(!maze.is_collected(cell));
        maze.collect_item(cell);
        maze.collect_item(cell);
        assert!(maze.is_collected(cell));
        assert_eq!(maze.collected.len(), 1);
    }

    #[test]
    fn coin_window_is_half_open() {
        let mut maze = MazeLevel::from_grid(0, &[vec![C]], 15_000, 1_000).unwrap();
        assert!(maze.coins_available(1_000));
        assert!(maze.coins_available(15_999));
        assert!(!maze.coins_available(16_000));
        assert_eq!(maze.coin_time_remaining(15_000), 1_000);
        assert_eq!(maze.coin_time_remaining(20_000), 0);

        maze.collect_item(Point::new(0, 0));
        maze.reset_timer(30_000);
        assert!(maze.coins_available(44_999));
        assert!(!maze.is_collected(Point::new(0, 0)));
    }

    #[test]
    fn malformed_grids_are_rejected() {
        assert!(matches!(
            MazeLevel::from_grid(3, &[], 1, 0),
            Err(LevelError::EmptyGrid { level: 3 })
        ));
        assert!(matches!(
            MazeLevel::from_grid(0, &[vec![]], 1, 0),
            Err(LevelError::EmptyGrid { .. })
        ));
        assert!(matches!(
            MazeLevel::from_grid(1, &[vec![F, F], vec![F]], 1, 0),
            Err(LevelError::RaggedRow {
                level: 1,
                row: 1,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn tile_codes_cover_the_closed_set() {
        let decoded: Vec<Tile> = (0..=5u8).map(|code| Tile::try_from(code).unwrap()).collect();
        assert_eq!(decoded, vec![F, W, S, G, P, C]);
        assert!(Tile::try_from(6).is_err());
    }

    #[test]
    fn huge_tile_size_does_not_fit() {
        let maze = level(vec![vec![F, F, F]]);
        assert_eq!(maze.checked_pixel_size(32), Some((96, 32)));
        assert_eq!(maze.checked_pixel_size(i32::MAX / 2), None);
        assert_eq!(maze.pixel_size(i32::MAX / 2), (i32::MAX, i32::MAX / 2));
    }
}
