pub mod hud;

use bevy::prelude::*;

use crate::surfaces::WetnessUpdateSet;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, hud::setup_hud).add_systems(
            Update,
            (hud::water_text_update_system, hud::surfaces_text_update_system)
                .after(WetnessUpdateSet),
        );
    }
}
