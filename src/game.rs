use chrono::Local;
use tracing::{debug, info};

use crate::{
    actor::{Actor, MoveOutcome, Pickup},
    config::GameConfig,
    data::{LevelSet, spawn_cell},
    error::{LevelError, LevelResult},
    input::Direction,
    map::MazeLevel,
    scripted_input::ScriptedInput,
};

pub const LOG_MAX_ENTRIES: usize = 8;

/// Size of the drawing surface for the active level.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub pixel_width: i32,
    pub pixel_height: i32,
    pub cols: i32,
    pub rows: i32,
}

impl Viewport {
    pub fn for_level(level: &MazeLevel, tile_size: i32) -> Self {
        let (pixel_width, pixel_height) = level.pixel_size(tile_size);
        let tile_size = tile_size.max(1);
        Self {
            pixel_width,
            pixel_height,
            cols: pixel_width / tile_size,
            rows: pixel_height / tile_size,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub outcome: MoveOutcome,
    pub advanced: bool,
}

/// Everything one play session needs: the level list, which one is live,
/// the actor and the score.
pub struct Game {
    levels: Vec<MazeLevel>,
    active: usize,
    actor: Actor,
    score: u32,
    config: GameConfig,
    viewport: Viewport,
    message_log: Vec<String>,
}

impl Game {
    /// Builds the session and enters level 0.
    pub fn new(set: LevelSet, now: u64) -> LevelResult<Self> {
        if set.levels.is_empty() {
            return Err(LevelError::NoLevels);
        }
        let mut game = Self {
            levels: set.levels,
            active: 0,
            actor: Actor::from_config(&set.config),
            score: 0,
            config: set.config,
            viewport: Viewport::default(),
            message_log: Vec::new(),
        };
        game.load_level(0, now);
        Ok(game)
    }

    pub fn load_level(&mut self, index: usize, now: u64) {
        self.active = index % self.levels.len();
        let level = &mut self.levels[self.active];
        level.reset_timer(now);
        self.actor.clear_glow();
        let spawn = spawn_cell(level, &self.config);
        self.actor.set_cell(spawn);
        self.viewport = Viewport::for_level(level, self.config.tile_size);
        info!(
            level = self.active + 1,
            of = self.levels.len(),
            row = spawn.y,
            col = spawn.x,
            "entered level"
        );
        self.push_log_entry(format!(
            "Entered level {}/{}",
            self.active + 1,
            self.levels.len()
        ));
    }

    /// Advances to the next level, wrapping to the first after the last.
    pub fn next_level(&mut self, now: u64) {
        self.load_level((self.active + 1) % self.levels.len(), now);
    }

    pub fn handle_direction(&mut self, direction: Direction, now: u64) -> StepReport {
        let (dr, dc) = direction.delta();
        let level = &mut self.levels[self.active];
        let outcome = self.actor.attempt_move(level, dr, dc, now);
        if !outcome.moved {
            return StepReport {
                outcome,
                advanced: false,
            };
        }

        let position = self.actor.position();
        if let Some(item) = outcome.item {
            debug!(item = item.as_str(), row = position.y, col = position.x, "pickup");
        }
        match outcome.item {
            Some(Pickup::PowerUp) => {
                info!("power-up collected, actor glowing");
                self.push_log_entry("Collected power-up! You are glowing!");
            }
            Some(Pickup::Coin) => {
                self.score = self.score.saturating_add(self.config.coin_score);
                info!(score = self.score, "coin collected");
                self.push_log_entry(format!(
                    "Collected coin! +{} points",
                    self.config.coin_score
                ));
            }
            None => {}
        }

        let advanced = self.levels[self.active].is_goal(position);
        if advanced {
            debug!(row = position.y, col = position.x, "goal reached");
            self.push_log_entry(format!("Reached the goal of level {}", self.active + 1));
            self.next_level(now);
        }

        StepReport { outcome, advanced }
    }

    /// Plays the next scripted move once the actor may move again. A step is
    /// consumed only when the move is actually tried, so keyboard moves in
    /// between never swallow script entries.
    pub fn step_script(&mut self, script: &mut ScriptedInput, now: u64) -> Option<StepReport> {
        if !self.actor.ready_to_move(now) {
            return None;
        }
        let direction = script.next_direction()?;
        Some(self.handle_direction(direction, now))
    }

    /// Per-frame bookkeeping before drawing.
    pub fn update(&mut self, now: u64) {
        let was_glowing = self.actor.is_glowing();
        self.actor.update_glow_status(&self.levels[self.active], now);
        if was_glowing && !self.actor.is_glowing() {
            self.push_log_entry("The glow fades.");
        }
    }

    pub fn active_level(&self) -> &MazeLevel {
        &self.levels[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn message_log(&self) -> &[String] {
        &self.message_log
    }

    fn push_log_entry<S: Into<String>>(&mut self, entry: S) {
        let stamped = format!("[{}] {}", Local::now().format("%H:%M:%S"), entry.into());
        self.message_log.insert(0, stamped);
        self.message_log.truncate(LOG_MAX_ENTRIES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_levels;
    use bracket_geometry::prelude::Point;

    fn game(json: &str) -> Game {
        Game::new(parse_levels(json, 0).unwrap(), 0).unwrap()
    }

    #[test]
    fn level_entry_places_actor_and_sizes_viewport() {
        let game = game(r#"{"levels": [[[0, 0, 0], [0, 2, 3]]]}"#);
        assert_eq!(game.actor().position(), Point::new(1, 1));
        assert_eq!(
            game.viewport(),
            Viewport {
                pixel_width: 96,
                pixel_height: 64,
                cols: 3,
                rows: 2
            }
        );
    }

    #[test]
    fn missing_start_uses_fallback_spawn() {
        let game = game(r#"{"levels": [[[0, 0, 0], [0, 0, 3]]]}"#);
        assert_eq!(game.actor().position(), Point::new(1, 1));
    }

    #[test]
    fn coins_score_once() {
        let mut game = game(r#"{"levels": [[[2, 5, 0, 3]]]}"#);
        game.handle_direction(Direction::Right, 100);
        assert_eq!(game.score(), 100);
        game.handle_direction(Direction::Right, 200);
        game.handle_direction(Direction::Left, 300);
        assert_eq!(game.score(), 100);
    }

    #[test]
    fn score_saturates_instead_of_overflowing() {
        let mut game = game(r#"{"levels": [[[2, 5, 5, 3]]], "settings": {"coin_score": 4294967295}}"#);
        game.handle_direction(Direction::Right, 0);
        game.handle_direction(Direction::Right, 100);
        assert_eq!(game.score(), u32::MAX);
    }

    #[test]
    fn throttled_script_steps_are_kept() {
        let mut game = game(r#"{"levels": [[[2, 0, 0, 3]]]}"#);
        let mut script = ScriptedInput::from_reader("dd".as_bytes()).unwrap();
        game.handle_direction(Direction::Right, 0);
        assert_eq!(game.step_script(&mut script, 50), None);
        assert_eq!(script.remaining(), 2);
        let report = game.step_script(&mut script, 90).unwrap();
        assert!(report.outcome.moved);
        assert_eq!(script.remaining(), 1);
    }

    #[test]
    fn blocked_script_steps_are_consumed() {
        let mut game = game(r#"{"levels": [[[2, 0], [1, 3]]]}"#);
        let mut script = ScriptedInput::from_reader("s".as_bytes()).unwrap();
        let report = game.step_script(&mut script, 0).unwrap();
        assert!(!report.outcome.moved);
        assert_eq!(script.remaining(), 0);
        assert_eq!(game.step_script(&mut script, 200), None);
    }

    #[test]
    fn last_level_wraps_to_first() {
        let mut game = game(r#"{"levels": [[[2, 3]], [[2, 3]]]}"#);
        assert!(game.handle_direction(Direction::Right, 0).advanced);
        assert_eq!(game.active_index(), 1);
        assert!(game.handle_direction(Direction::Right, 100).advanced);
        assert_eq!(game.active_index(), 0);
        assert_eq!(game.actor().position(), Point::new(0, 0));
    }

    #[test]
    fn revisiting_a_level_resets_its_pickups() {
        let mut game = game(r#"{"levels": [[[2, 4, 3]]]}"#);
        let first = game.handle_direction(Direction::Right, 0);
        assert_eq!(first.outcome.item, Some(Pickup::PowerUp));
        assert!(game.handle_direction(Direction::Right, 100).advanced);
        assert!(!game.actor().is_glowing());
        assert!(!game.active_level().is_collected(Point::new(1, 0)));
        let again = game.handle_direction(Direction::Right, 200);
        assert_eq!(again.outcome.item, Some(Pickup::PowerUp));
    }

    #[test]
    fn log_is_newest_first_and_capped() {
        let mut game = game(r#"{"levels": [[[2, 3]]]}"#);
        for step in 0..20 {
            game.handle_direction(Direction::Right, step * 100);
        }
        assert_eq!(game.message_log().len(), LOG_MAX_ENTRIES);
        assert!(game.message_log()[0].ends_with("Entered level 1/1"));
    }
}
