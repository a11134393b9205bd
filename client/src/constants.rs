use bevy::prelude::*;

pub const WINDOW_TITLE: &str = "Wetness";

/// World units the water level moves per second while a level key is held
pub const WATER_LEVEL_STEP_PER_SECOND: f64 = 0.75;

pub const DEFAULT_COLUMNS: u32 = 5;
pub const COLUMN_SPACING: f32 = 2.5;
/// Height difference between neighbouring blocks in a column
pub const BLOCK_STEP: f32 = 0.6;
pub const BLOCKS_PER_COLUMN: u32 = 6;

pub const WATER_COLOR: Color = Color::srgba(0.1, 0.3, 0.6, 0.45);
pub const HUD_TEXT_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);
