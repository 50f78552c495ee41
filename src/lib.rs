//! Tile maze with timed pickups: a level model, the actor that walks it, and
//! the session that strings levels together.

pub mod actor;
pub mod config;
pub mod data;
pub mod error;
pub mod game;
pub mod input;
pub mod map;
pub mod render;
pub mod scripted_input;
