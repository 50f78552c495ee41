use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::*;

use crate::{
    actor::Actor,
    game::{Game, LOG_MAX_ENTRIES},
    map::{MazeLevel, Tile},
};

pub const HUD_ROWS: i32 = 4;
/// Border, title, one line per kept entry, border.
pub const LOG_ROWS: i32 = LOG_MAX_ENTRIES as i32 + 3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Glyph {
    pub glyph: char,
    pub fg: RGB,
    pub bg: RGB,
}

fn wall_color() -> RGB {
    RGB::from_u8(30, 50, 60)
}

fn floor_color() -> RGB {
    RGB::from_u8(232, 232, 232)
}

fn glow_color() -> RGB {
    RGB::from_u8(255, 105, 180)
}

/// How one cell looks right now. Reads level state, never changes it.
pub fn tile_glyph(level: &MazeLevel, point: Point, now: u64) -> Glyph {
    let floor = Glyph {
        glyph: '.',
        fg: RGB::from_u8(150, 150, 150),
        bg: RGB::named(BLACK),
    };
    match level.tile_at(point) {
        Tile::Wall => Glyph {
            glyph: '#',
            fg: floor_color(),
            bg: wall_color(),
        },
        Tile::Goal => Glyph {
            glyph: '>',
            fg: RGB::from_u8(255, 200, 120),
            bg: RGB::named(BLACK),
        },
        Tile::PowerUp if !level.is_collected(point) => Glyph {
            glyph: '*',
            fg: glow_color(),
            bg: RGB::named(BLACK),
        },
        Tile::Coin if !level.is_collected(point) && level.coins_available(now) => Glyph {
            glyph: '$',
            fg: RGB::from_u8(138, 43, 226),
            bg: RGB::named(BLACK),
        },
        _ => floor,
    }
}

/// Top-left console cell of the map, centring it under the HUD.
pub fn map_origin(ctx: &BTerm, game: &Game) -> Point {
    let (screen_w, _) = ctx.get_char_size();
    let viewport = game.viewport();
    let x = ((screen_w as i32 - viewport.cols) / 2).max(0);
    Point::new(x, HUD_ROWS + 1)
}

pub fn draw_map(ctx: &mut BTerm, level: &MazeLevel, map_origin: Point, now: u64) {
    let (screen_w, screen_h) = ctx.get_char_size();
    let max_draw_y = screen_h as i32 - LOG_ROWS;
    let max_draw_x = screen_w as i32;
    let (rows, cols) = level.dimensions();

    for y in 0..rows {
        let screen_y = map_origin.y + y;
        if screen_y >= max_draw_y {
            break;
        }
        for x in 0..cols {
            let screen_x = map_origin.x + x;
            if screen_x >= max_draw_x {
                break;
            }
            let look = tile_glyph(level, Point::new(x, y), now);
            ctx.set(screen_x, screen_y, look.fg, look.bg, to_cp437(look.glyph));
        }
    }
}

pub fn draw_actor(ctx: &mut BTerm, actor: &Actor, level: &MazeLevel, map_origin: Point) {
    let position = actor.position();
    if !level.in_bounds(position) {
        return;
    }

    if actor.is_glowing() {
        let halo = [
            Point::new(1, 0),
            Point::new(-1, 0),
            Point::new(0, 1),
            Point::new(0, -1),
        ];
        for step in halo {
            let cell = Point::new(position.x + step.x, position.y + step.y);
            if level.in_bounds(cell) && !level.is_wall(cell) {
                ctx.set_bg(
                    map_origin.x + cell.x,
                    map_origin.y + cell.y,
                    RGB::from_u8(90, 30, 60),
                );
            }
        }
    }

    let bg = if actor.is_glowing() {
        glow_color()
    } else {
        RGB::named(BLACK)
    };
    ctx.set(
        map_origin.x + position.x,
        map_origin.y + position.y,
        RGB::from_u8(20, 120, 255),
        bg,
        to_cp437('@'),
    );
}

pub fn draw_hud(ctx: &mut BTerm, game: &Game, now: u64) {
    let (width, _) = ctx.get_char_size();
    ctx.draw_box(0, 0, width - 1, HUD_ROWS, RGB::named(GRAY), RGB::named(BLACK));
    ctx.print_color(
        2,
        1,
        RGB::named(WHITE),
        RGB::named(BLACK),
        format!("Level {}/{}", game.active_index() + 1, game.level_count()),
    );
    ctx.print_color(
        2,
        2,
        RGB::named(WHITE),
        RGB::named(BLACK),
        format!("Score: {}", game.score()),
    );
    if game.actor().is_glowing() {
        ctx.print_color(
            20,
            1,
            glow_color(),
            RGB::named(BLACK),
            "You are Glowing! (Literally)",
        );
    }
    if let Some(label) = coin_timer_label(game.active_level(), now) {
        ctx.print_color(
            20,
            2,
            RGB::from_u8(225, 194, 255),
            RGB::named(BLACK),
            label,
        );
    }
    ctx.print_color(
        2,
        3,
        RGB::named(DARK_GRAY),
        RGB::named(BLACK),
        "WASD/Arrows to move, Q to quit",
    );
}

/// `Purple coins: Ns` while the coin window is open.
pub fn coin_timer_label(level: &MazeLevel, now: u64) -> Option<String> {
    if !level.coins_available(now) {
        return None;
    }
    let seconds = level.coin_time_remaining(now).div_ceil(1000);
    (seconds > 0).then(|| format!("Purple coins: {seconds}s"))
}

/// First console row of the event log panel on a screen `screen_h` rows tall.
pub fn log_panel_top(screen_h: i32) -> i32 {
    (screen_h - LOG_ROWS).max(0)
}

/// Newest entries first, under a title row, boxed along the bottom edge.
pub fn draw_log(ctx: &mut BTerm, log: &[String]) {
    let (screen_w, screen_h) = ctx.get_char_size();
    let top = log_panel_top(screen_h as i32);
    ctx.draw_box(
        0,
        top,
        screen_w as i32 - 1,
        LOG_ROWS - 1,
        RGB::named(DARK_GRAY),
        RGB::named(BLACK),
    );
    ctx.print_color(2, top + 1, RGB::named(WHITE), RGB::named(BLACK), "Event Log");

    let text_width = (screen_w as usize).saturating_sub(4);
    for (line, entry) in log.iter().take(LOG_MAX_ENTRIES).enumerate() {
        let shown: String = entry.chars().take(text_width).collect();
        ctx.print(2, top + 2 + line as i32, shown);
    }
}
