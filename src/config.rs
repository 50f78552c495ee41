use bracket_geometry::prelude::Point;
use serde::Deserialize;

pub const DEFAULT_TILE_SIZE: i32 = 32;
pub const DEFAULT_MOVE_DELAY_MS: u64 = 90;
pub const DEFAULT_GLOW_DURATION_MS: u64 = 5_000;
pub const DEFAULT_COIN_DURATION_MS: u64 = 15_000;
pub const DEFAULT_COIN_SCORE: u32 = 100;
pub const DEFAULT_LEVELS_PATH: &str = "levels.json";

/// Tunables read from the optional `settings` block of the level file.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub tile_size: i32,
    pub move_delay_ms: u64,
    pub glow_duration_ms: u64,
    pub coin_duration_ms: u64,
    pub coin_score: u32,
    pub fallback_spawn: SpawnCell,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            move_delay_ms: DEFAULT_MOVE_DELAY_MS,
            glow_duration_ms: DEFAULT_GLOW_DURATION_MS,
            coin_duration_ms: DEFAULT_COIN_DURATION_MS,
            coin_score: DEFAULT_COIN_SCORE,
            fallback_spawn: SpawnCell::default(),
        }
    }
}

/// Spawn cell used when a level has no start tile.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SpawnCell {
    pub row: i32,
    pub col: i32,
}

impl Default for SpawnCell {
    fn default() -> Self {
        Self { row: 1, col: 1 }
    }
}

impl SpawnCell {
    pub fn point(&self) -> Point {
        Point::new(self.col, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_keep_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"coin_score": 250}"#).unwrap();
        assert_eq!(config.coin_score, 250);
        assert_eq!(config.move_delay_ms, DEFAULT_MOVE_DELAY_MS);
        assert_eq!(config.fallback_spawn.point(), Point::new(1, 1));
    }

    #[test]
    fn unknown_setting_is_rejected() {
        assert!(serde_json::from_str::<GameConfig>(r#"{"coin_scor": 1}"#).is_err());
    }
}
