//! Level file loading.
//!
//! The file is a JSON object with a `levels` array of row-major grids of tile
//! codes and an optional `settings` object overriding [`GameConfig`] defaults.
//! Structural problems are fatal; questionable but playable layouts only
//! produce [`LevelWarning`]s.

use std::{fs, path::Path};

use bracket_geometry::prelude::Point;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    config::GameConfig,
    error::{LevelError, LevelResult},
    map::{MazeLevel, Tile},
};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LevelFile {
    levels: Vec<Vec<Vec<Tile>>>,
    #[serde(default)]
    settings: GameConfig,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LevelWarning {
    #[error("level {level} has {count} start tiles; only the first is used")]
    ExtraStarts { level: usize, count: usize },
    #[error("level {level} has no start tile and its fallback spawn {row},{col} is blocked")]
    FallbackBlocked { level: usize, row: i32, col: i32 },
    #[error("level {level} has no goal tile")]
    NoGoal { level: usize },
    #[error("level {level} goal cannot be reached from the spawn cell")]
    GoalUnreachable { level: usize },
}

pub struct LevelSet {
    pub levels: Vec<MazeLevel>,
    pub config: GameConfig,
    pub warnings: Vec<LevelWarning>,
}

pub fn load_levels<P: AsRef<Path>>(path: P, now: u64) -> LevelResult<LevelSet> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let set = parse_levels(&raw, now)?;
    info!(path = %path.display(), levels = set.levels.len(), "level file loaded");
    Ok(set)
}

pub fn parse_levels(json: &str, now: u64) -> LevelResult<LevelSet> {
    let file: LevelFile = serde_json::from_str(json)?;
    if file.levels.is_empty() {
        return Err(LevelError::NoLevels);
    }

    let config = file.settings;
    if config.tile_size <= 0 {
        return Err(LevelError::InvalidSetting {
            name: "tile_size",
            reason: format!("must be positive, got {}", config.tile_size),
        });
    }

    let mut levels = Vec::with_capacity(file.levels.len());
    let mut warnings = Vec::new();
    for (index, grid) in file.levels.iter().enumerate() {
        let level = MazeLevel::from_grid(index, grid, config.coin_duration_ms, now)?;
        if level.checked_pixel_size(config.tile_size).is_none() {
            return Err(LevelError::InvalidSetting {
                name: "tile_size",
                reason: format!(
                    "{} makes level {index} too large to draw",
                    config.tile_size
                ),
            });
        }
        warnings.extend(audit(index, &level, &config));
        levels.push(level);
    }

    for warning in &warnings {
        warn!("{warning}");
    }

    Ok(LevelSet {
        levels,
        config,
        warnings,
    })
}

/// Where the actor appears when `level` becomes active.
pub fn spawn_cell(level: &MazeLevel, config: &GameConfig) -> Point {
    level
        .start()
        .unwrap_or_else(|| config.fallback_spawn.point())
}

fn audit(index: usize, level: &MazeLevel, config: &GameConfig) -> Vec<LevelWarning> {
    let mut warnings = Vec::new();

    // The first start tile was normalized to floor, so any left over are extras.
    let extra = level.cells_matching(Tile::Start).count();
    if extra > 0 {
        warnings.push(LevelWarning::ExtraStarts {
            level: index,
            count: extra + 1,
        });
    }

    let spawn = spawn_cell(level, config);
    if level.start().is_none() && (!level.in_bounds(spawn) || level.is_wall(spawn)) {
        warnings.push(LevelWarning::FallbackBlocked {
            level: index,
            row: spawn.y,
            col: spawn.x,
        });
        return warnings;
    }

    let goals: Vec<Point> = level.cells_matching(Tile::Goal).collect();
    if goals.is_empty() {
        warnings.push(LevelWarning::NoGoal { level: index });
    } else if !goals.iter().any(|&goal| level.path_exists(spawn, goal)) {
        warnings.push(LevelWarning::GoalUnreachable { level: index });
    }

    warnings
}
