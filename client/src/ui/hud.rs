use bevy::prelude::*;
use wetness::EnginePhase;

use crate::constants::HUD_TEXT_COLOR;
use crate::surfaces::WetnessState;

#[derive(Component)]
pub struct WaterText;

#[derive(Component)]
pub struct SurfacesText;

pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            BackgroundColor(Color::BLACK.with_alpha(0.5)),
            GlobalZIndex(i32::MAX),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(1.),
                top: Val::Percent(1.),
                padding: UiRect::all(Val::Px(4.0)),
                flex_direction: FlexDirection::Column,
                ..default()
            },
        ))
        .with_children(|root| {
            root.spawn((
                WaterText,
                Text::new("Water: N/A"),
                TextFont::from_font_size(16.0),
                TextColor(HUD_TEXT_COLOR),
            ));
            root.spawn((
                SurfacesText,
                Text::new("Surfaces: N/A"),
                TextFont::from_font_size(16.0),
                TextColor(HUD_TEXT_COLOR),
            ));
            root.spawn((
                Text::new("[Space] wave  [1/2/3] shape  [Up/Down] level  [F] force"),
                TextFont::from_font_size(12.0),
                TextColor(HUD_TEXT_COLOR.with_alpha(0.7)),
            ));
        });
}

pub fn water_text_update_system(
    query: Query<Entity, With<WaterText>>,
    mut writer: TextUiWriter,
    state: Res<WetnessState>,
) {
    let simulation = state.engine.water_level_simulation();
    let mode = if simulation.enabled {
        format!("{} wave around {:.2}", simulation.wave_type, simulation.base_level)
    } else {
        "manual".to_string()
    };
    for entity in query.iter() {
        *writer.text(entity, 0) = format!(
            "Water: {:.2} ({mode})",
            state.engine.water_level()
        );
    }
}

pub fn surfaces_text_update_system(
    query: Query<Entity, With<SurfacesText>>,
    mut writer: TextUiWriter,
    state: Res<WetnessState>,
) {
    let engine = &state.engine;
    let objects = engine.registered_objects();
    let transitioning = objects
        .iter()
        .filter(|id| engine.is_transitioning(id) == Some(true))
        .count();
    let mean_wetness = if objects.is_empty() {
        0.0
    } else {
        objects
            .iter()
            .map(|id| engine.get_wetness_level(id))
            .sum::<f64>()
            / objects.len() as f64
    };
    let phase = match engine.phase() {
        EnginePhase::Idle => "idle",
        EnginePhase::Active => "active",
    };

    for entity in query.iter() {
        *writer.text(entity, 0) = format!(
            "Surfaces: {} {phase}, {transitioning} moving, mean wetness {mean_wetness:.2}",
            objects.len()
        );
    }
}
