use bevy::color::LinearRgba;
use std::collections::HashMap;
use std::sync::Arc;
use wetness::{
    Material, MaterialKind, MaterialPair, SceneAccess, TransitionSettings,
    WaterLevelSimulationParams, WaveType, WetnessEngine,
};

// Exactly representable, so batch spacing never falls under the throttle
const DT: f64 = 0.125;

#[derive(Default)]
struct Scene {
    heights: HashMap<u32, f64>,
    shown: HashMap<u32, Arc<Material>>,
    assignments: usize,
}

impl Scene {
    fn with_object(mut self, id: u32, height: f64) -> Self {
        self.heights.insert(id, height);
        self
    }
}

impl SceneAccess<u32> for Scene {
    fn object_height(&self, id: &u32) -> Option<f64> {
        self.heights.get(id).copied()
    }

    fn assign_material(&mut self, id: &u32, material: Arc<Material>) {
        self.shown.insert(*id, material);
        self.assignments += 1;
    }
}

fn stone() -> MaterialPair {
    MaterialPair::new(
        Arc::new(Material::physically_based(
            "stone",
            LinearRgba::rgb(0.6, 0.6, 0.6),
            0.0,
            0.9,
        )),
        Arc::new(Material::physically_based(
            "stone_wet",
            LinearRgba::rgb(0.2, 0.2, 0.25),
            0.0,
            0.15,
        )),
    )
}

fn roughness(material: &Material) -> f32 {
    match material.kind {
        MaterialKind::PhysicallyBased { roughness, .. } => roughness,
        MaterialKind::SimpleReflectance { .. } => panic!("expected a physically-based material"),
    }
}

#[test]
fn half_wet_object_reaches_target_without_overshoot() {
    let mut scene = Scene::default().with_object(1, 1.0);
    let mut engine = WetnessEngine::new();
    engine.set_water_level(0.0).unwrap();
    engine
        .register_wet_material(
            1,
            stone().with_transition(TransitionSettings::new(2.0, 1.0, 1.0).unwrap()),
            &mut scene,
        )
        .unwrap();

    engine.tick(1.0, &mut scene);

    assert!((engine.target_wetness(&1).unwrap() - 0.5).abs() < 1e-12);
    assert!((engine.get_wetness_level(&1) - 0.5).abs() < 1e-12);
}

#[test]
fn submerged_object_becomes_fully_wet_and_settles() {
    let mut scene = Scene::default().with_object(1, -1.0);
    let mut engine = WetnessEngine::new();
    engine.set_water_level(0.0).unwrap();
    // One unit below the surface is half way through a 2.0 band; doubling
    // the fraction saturates it
    engine
        .register_wet_material(
            1,
            stone().with_transition(TransitionSettings::new(2.0, 1.0, 2.0).unwrap()),
            &mut scene,
        )
        .unwrap();

    for i in 1..=20 {
        engine.tick(i as f64 * DT, &mut scene);
    }

    assert_eq!(engine.target_wetness(&1), Some(1.0));
    assert_eq!(engine.get_wetness_level(&1), 1.0);
    assert_eq!(engine.is_transitioning(&1), Some(false));
    let shown = scene.shown.get(&1).unwrap();
    assert_eq!(roughness(shown), 0.15);
}

#[test]
fn removed_object_reports_unregistered() {
    let mut scene = Scene::default().with_object(1, 0.0);
    let mut engine = WetnessEngine::new();
    engine.register_wet_material(1, stone(), &mut scene).unwrap();

    engine.tick(DT, &mut scene);
    engine.tick(2.0 * DT, &mut scene);
    assert!(engine.get_wetness_level(&1) > 0.0);
    assert_eq!(engine.is_transitioning(&1), Some(true));

    engine.remove_wet_material(&1);
    assert_eq!(engine.get_wetness_level(&1), 0.0);
    assert_eq!(engine.current_wetness(&1), None);
    assert!(engine.registered_objects().is_empty());

    // Unknown ids stay harmless
    engine.remove_wet_material(&1);
    engine.tick(3.0 * DT, &mut scene);
}

#[test]
fn single_batch_respects_rate_limit() {
    let mut scene = Scene::default().with_object(1, 0.0);
    let mut engine = WetnessEngine::new();
    engine.register_wet_material(1, stone(), &mut scene).unwrap();

    engine.tick(DT, &mut scene);
    let first = engine.get_wetness_level(&1);
    assert!(first <= DT + 1e-12, "moved {first} in one step");

    let mut previous = first;
    for i in 2..=15 {
        engine.tick(i as f64 * DT, &mut scene);
        let current = engine.get_wetness_level(&1);
        assert!(current - previous <= DT + 1e-9);
        previous = current;
    }
}

#[test]
fn reregistering_keeps_material_mid_transition() {
    let mut scene = Scene::default().with_object(1, 0.0);
    let mut engine = WetnessEngine::new();
    engine.register_wet_material(1, stone(), &mut scene).unwrap();
    engine.tick(0.3, &mut scene);

    let shown_before = Arc::clone(scene.shown.get(&1).unwrap());
    let wetness_before = engine.get_wetness_level(&1);
    let assignments_before = scene.assignments;

    let registered = engine.register_wet_material(1, stone(), &mut scene).unwrap();

    assert!(!registered);
    assert_eq!(engine.registered_count(), 1);
    assert_eq!(scene.assignments, assignments_before);
    assert!(Arc::ptr_eq(scene.shown.get(&1).unwrap(), &shown_before));
    assert_eq!(engine.get_wetness_level(&1), wetness_before);
}

#[test]
fn settled_objects_are_not_reassigned() {
    let mut scene = Scene::default().with_object(1, 10.0).with_object(2, 0.0);
    let mut engine = WetnessEngine::new();
    engine.register_wet_material(1, stone(), &mut scene).unwrap();
    engine.register_wet_material(2, stone(), &mut scene).unwrap();
    assert_eq!(scene.assignments, 2);

    // Object 1 is far above the water and stays dry: no new materials at all
    for i in 1..=30 {
        engine.tick(i as f64 * DT, &mut scene);
    }
    assert_eq!(engine.get_wetness_level(&2), 1.0);
    let after_settle = scene.assignments;

    for i in 31..=60 {
        let report = engine.tick(i as f64 * DT, &mut scene);
        assert_eq!(report.reassigned, 0);
    }
    assert_eq!(scene.assignments, after_settle);
    assert_eq!(scene.shown.get(&1).unwrap().name, "stone");
}

#[test]
fn batch_shares_one_water_level() {
    let mut scene = Scene::default();
    let mut engine = WetnessEngine::new();
    for id in 0..8 {
        scene.heights.insert(id, 0.3);
        engine.register_wet_material(id, stone(), &mut scene).unwrap();
    }
    engine
        .set_water_level_simulation_params(
            WaterLevelSimulationParams::default()
                .with_enabled(true)
                .with_wave_type(WaveType::Triangle)
                .with_frequency(0.7),
        )
        .unwrap();

    for i in 1..=10 {
        let report = engine.tick(i as f64 * 0.13, &mut scene);
        assert_eq!(report.water_level, engine.water_level());
        let first = engine.get_wetness_level(&0);
        for id in 1..8 {
            assert_eq!(engine.get_wetness_level(&id), first);
        }
    }
}

#[test]
fn mismatched_kinds_switch_at_half_wetness() {
    let dry = Arc::new(Material::physically_based(
        "tile",
        LinearRgba::WHITE,
        0.0,
        0.8,
    ));
    let wet = Arc::new(Material::simple_reflectance(
        "tile_wet",
        LinearRgba::rgb(0.3, 0.3, 0.3),
        LinearRgba::WHITE,
    ));
    let mut scene = Scene::default().with_object(1, 0.0);
    let mut engine = WetnessEngine::new();
    engine
        .register_wet_material(1, MaterialPair::new(Arc::clone(&dry), Arc::clone(&wet)), &mut scene)
        .unwrap();
    assert!(engine.uses_discrete_fallback(&1));

    engine.tick(0.4, &mut scene);
    assert!(Arc::ptr_eq(scene.shown.get(&1).unwrap(), &dry));

    engine.tick(0.6, &mut scene);
    assert!(Arc::ptr_eq(scene.shown.get(&1).unwrap(), &wet));
}

#[test]
fn invalid_registration_is_rejected() {
    let mut scene = Scene::default().with_object(1, 0.0);
    let mut engine = WetnessEngine::new();

    let missing = MaterialPair {
        dry: None,
        ..stone()
    };
    let err = engine.register_wet_material(1, missing, &mut scene).unwrap_err();
    assert!(err.is_configuration());

    let zero_speed = stone().with_transition(TransitionSettings {
        speed: 0.0,
        ..TransitionSettings::default()
    });
    assert!(engine.register_wet_material(1, zero_speed, &mut scene).is_err());

    assert_eq!(engine.registered_count(), 0);
    assert_eq!(scene.assignments, 0);
}

#[test]
fn force_update_ignores_throttle() {
    let mut scene = Scene::default().with_object(1, 0.0);
    let mut engine = WetnessEngine::new();
    engine.register_wet_material(1, stone(), &mut scene).unwrap();

    assert!(engine.tick(0.5, &mut scene).ran);
    assert!(!engine.tick(0.52, &mut scene).ran);

    let report = engine.force_update(&mut scene);
    assert!(report.ran);
    assert_eq!(report.evaluated, 1);
}
