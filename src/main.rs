use std::{env, path::PathBuf, process, time::Instant};

use anyhow::{Context, anyhow};
use bracket_terminal::prelude::*;
use glowmaze::{
    config::DEFAULT_LEVELS_PATH,
    data,
    game::Game,
    input::{direction_for_key, is_quit_key},
    render::{draw_actor, draw_hud, draw_log, draw_map, map_origin},
    scripted_input::ScriptedInput,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const LEVELS_ENV_VAR: &str = "GLOWMAZE_LEVELS";
const SCRIPT_ENV_VAR: &str = "GLOWMAZE_SCRIPT";

struct GlowMazeState {
    game: Game,
    clock: Instant,
    script: Option<ScriptedInput>,
}

impl GameState for GlowMazeState {
    fn tick(&mut self, ctx: &mut BTerm) {
        let now = self.now();
        self.handle_input(ctx, now);
        self.play_script(now);
        self.game.update(now);
        ctx.cls();
        self.draw_scene(ctx, now);
    }
}

impl GlowMazeState {
    fn now(&self) -> u64 {
        self.clock.elapsed().as_millis() as u64
    }

    fn handle_input(&mut self, ctx: &mut BTerm, now: u64) {
        if let Some(key) = ctx.key {
            if is_quit_key(key) {
                info!(score = self.game.score(), "quitting");
                ctx.quit();
            } else if let Some(direction) = direction_for_key(key) {
                self.game.handle_direction(direction, now);
            }
        }
    }

    fn play_script(&mut self, now: u64) {
        let Some(script) = self.script.as_mut() else {
            return;
        };
        self.game.step_script(script, now);
        if script.remaining() == 0 {
            info!(score = self.game.score(), "script finished");
            self.script = None;
        }
    }

    fn draw_scene(&mut self, ctx: &mut BTerm, now: u64) {
        draw_hud(ctx, &self.game, now);
        let origin = map_origin(ctx, &self.game);
        draw_map(ctx, self.game.active_level(), origin, now);
        draw_actor(ctx, self.game.actor(), self.game.active_level(), origin);
        draw_log(ctx, self.game.message_log());
    }
}

fn levels_path() -> PathBuf {
    env::args()
        .nth(1)
        .or_else(|| env::var(LEVELS_ENV_VAR).ok())
        .unwrap_or_else(|| DEFAULT_LEVELS_PATH.to_string())
        .into()
}

fn run() -> anyhow::Result<()> {
    let path = levels_path();
    let levels = data::load_levels(&path, 0)
        .with_context(|| format!("loading levels from {}", path.display()))?;

    let script = match env::var(SCRIPT_ENV_VAR) {
        Ok(script_path) => Some(
            ScriptedInput::from_file(&script_path)
                .with_context(|| format!("reading input script {script_path}"))?,
        ),
        Err(_) => None,
    };

    let context = BTermBuilder::simple80x50()
        .with_title("GlowMaze")
        .build()
        .map_err(|err| anyhow!(err))?;

    // Level timers count from the first frame the player can see.
    let clock = Instant::now();
    let game = Game::new(levels, 0)?;
    let state = GlowMazeState {
        game,
        clock,
        script,
    };
    main_loop(context, state).map_err(|err| anyhow!(err))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() {
    init_tracing();
    info!("=== GlowMaze startup ===");

    if let Err(err) = run() {
        let message = format!("{err:#}");
        error!(error = %message, "glowmaze stopped");
        process::exit(1);
    }
}
