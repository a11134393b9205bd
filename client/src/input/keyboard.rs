use bevy::prelude::*;
use std::collections::BTreeMap;
use wetness::{WaterLevelSimulationParams, WaveType};

use crate::constants::WATER_LEVEL_STEP_PER_SECOND;
use crate::surfaces::{ForceWetnessUpdate, WetnessState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WetnessAction {
    ToggleSimulation,
    SineWave,
    TriangleWave,
    SquareWave,
    RaiseWater,
    LowerWater,
    ForceUpdate,
}

#[derive(Resource)]
pub struct KeyMap {
    pub map: BTreeMap<WetnessAction, Vec<KeyCode>>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            map: default_key_map(),
        }
    }
}

pub fn default_key_map() -> BTreeMap<WetnessAction, Vec<KeyCode>> {
    BTreeMap::from([
        (WetnessAction::ToggleSimulation, vec![KeyCode::Space]),
        (WetnessAction::SineWave, vec![KeyCode::Digit1, KeyCode::Numpad1]),
        (WetnessAction::TriangleWave, vec![KeyCode::Digit2, KeyCode::Numpad2]),
        (WetnessAction::SquareWave, vec![KeyCode::Digit3, KeyCode::Numpad3]),
        (WetnessAction::RaiseWater, vec![KeyCode::ArrowUp]),
        (WetnessAction::LowerWater, vec![KeyCode::ArrowDown]),
        (WetnessAction::ForceUpdate, vec![KeyCode::KeyF]),
    ])
}

pub fn is_action_pressed(
    action: WetnessAction,
    keyboard_input: &ButtonInput<KeyCode>,
    key_map: &KeyMap,
) -> bool {
    key_map
        .map
        .get(&action)
        .is_some_and(|keys| keyboard_input.any_pressed(keys.iter().copied()))
}

pub fn is_action_just_pressed(
    action: WetnessAction,
    keyboard_input: &ButtonInput<KeyCode>,
    key_map: &KeyMap,
) -> bool {
    key_map
        .map
        .get(&action)
        .is_some_and(|keys| keyboard_input.any_just_pressed(keys.iter().copied()))
}

pub fn wetness_controls_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    time: Res<Time>,
    mut state: ResMut<WetnessState>,
    mut force: EventWriter<ForceWetnessUpdate>,
) {
    let engine = &mut state.engine;

    if is_action_just_pressed(WetnessAction::ToggleSimulation, &keyboard_input, &key_map) {
        let enabled = !engine.water_level_simulation().enabled;
        engine.enable_water_level_simulation(enabled);
    }

    for (action, wave_type) in [
        (WetnessAction::SineWave, WaveType::Sine),
        (WetnessAction::TriangleWave, WaveType::Triangle),
        (WetnessAction::SquareWave, WaveType::Square),
    ] {
        if is_action_just_pressed(action, &keyboard_input, &key_map) {
            let params = WaterLevelSimulationParams::default().with_wave_type(wave_type);
            if let Err(err) = engine.set_water_level_simulation_params(params) {
                warn!("Could not switch to {wave_type} wave: {err}");
            } else {
                info!("Water level waveform: {wave_type}");
            }
        }
    }

    let mut direction = 0.0;
    if is_action_pressed(WetnessAction::RaiseWater, &keyboard_input, &key_map) {
        direction += 1.0;
    }
    if is_action_pressed(WetnessAction::LowerWater, &keyboard_input, &key_map) {
        direction -= 1.0;
    }
    if direction != 0.0 {
        let step = direction * WATER_LEVEL_STEP_PER_SECOND * time.delta_secs_f64();
        // While the wave runs the keys shift its centre instead
        let result = if engine.water_level_simulation().enabled {
            let base_level = engine.water_level_simulation().base_level + step;
            engine.set_water_level_simulation_params(
                WaterLevelSimulationParams::default().with_base_level(base_level),
            )
        } else {
            let level = engine.water_level() + step;
            engine.set_water_level(level)
        };
        if let Err(err) = result {
            warn!("Could not move the water level: {err}");
        }
    }

    if is_action_just_pressed(WetnessAction::ForceUpdate, &keyboard_input, &key_map) {
        force.write(ForceWetnessUpdate);
    }
}
