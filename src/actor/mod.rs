use bracket_geometry::prelude::Point;

use crate::config::GameConfig;
use crate::map::MazeLevel;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pickup {
    PowerUp,
    Coin,
}

impl Pickup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pickup::PowerUp => "power-up",
            Pickup::Coin => "coin",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub moved: bool,
    pub item: Option<Pickup>,
}

impl MoveOutcome {
    const REJECTED: Self = Self {
        moved: false,
        item: None,
    };
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Glow {
    #[default]
    Idle,
    Glowing { since: u64 },
}

/// The player token. Holds no level; each query is handed the active one.
#[derive(Clone, Debug)]
pub struct Actor {
    position: Point,
    last_move_time: Option<u64>,
    glow: Glow,
    move_delay_ms: u64,
    glow_duration_ms: u64,
}

impl Actor {
    pub fn new(move_delay_ms: u64, glow_duration_ms: u64) -> Self {
        Self {
            position: Point::new(0, 0),
            last_move_time: None,
            glow: Glow::Idle,
            move_delay_ms,
            glow_duration_ms,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.move_delay_ms, config.glow_duration_ms)
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Teleports without any validation. Only used when entering a level.
    pub fn set_cell(&mut self, point: Point) {
        self.position = point;
    }

    /// False while the move delay since the last accepted move is still running.
    pub fn ready_to_move(&self, now: u64) -> bool {
        self.last_move_time
            .is_none_or(|last| now.saturating_sub(last) >= self.move_delay_ms)
    }

    pub fn attempt_move(&mut self, level: &mut MazeLevel, dr: i32, dc: i32, now: u64) -> MoveOutcome {
        if !self.ready_to_move(now) {
            return MoveOutcome::REJECTED;
        }

        let target = Point::new(self.position.x + dc, self.position.y + dr);
        if !level.in_bounds(target) || level.is_wall(target) {
            return MoveOutcome::REJECTED;
        }

        self.position = target;
        self.last_move_time = Some(now);

        let mut item = None;
        if level.is_power_up(target) && !level.is_collected(target) {
            level.collect_item(target);
            self.activate_glow(now);
            item = Some(Pickup::PowerUp);
        } else if level.is_coin(target) && !level.is_collected(target) && level.coins_available(now)
        {
            level.collect_item(target);
            item = Some(Pickup::Coin);
        }

        MoveOutcome { moved: true, item }
    }

    pub fn activate_glow(&mut self, now: u64) {
        self.glow = Glow::Glowing { since: now };
    }

    pub fn clear_glow(&mut self) {
        self.glow = Glow::Idle;
    }

    /// Drops the glow once it has run its course or the actor stands on `level`'s goal.
    pub fn update_glow_status(&mut self, level: &MazeLevel, now: u64) {
        if let Glow::Glowing { since } = self.glow {
            let expired = now.saturating_sub(since) > self.glow_duration_ms;
            let on_goal = level.in_bounds(self.position) && level.is_goal(self.position);
            if expired || on_goal {
                self.glow = Glow::Idle;
            }
        }
    }

    #[cfg(test)]
    fn glow(&self) -> Glow {
        self.glow
    }

    pub fn is_glowing(&self) -> bool {
        matches!(self.glow, Glow::Glowing { .. })
    }
}
