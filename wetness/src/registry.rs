//! Object identity to material pair, settings and transition state.

use std::collections::hash_map::{Entry, HashMap};
use std::hash::Hash;
use std::sync::Arc;

use crate::calculator::TransitionSettings;
use crate::error::{ConfigurationError, MaterialSlot};
use crate::material::Material;
use crate::scheduler::ObjectState;

/// Registration input: a dry/wet material pair and optional tuning.
///
/// Materials are shared with the rendering side; the engine only keeps
/// reference-counted handles. Unset `transition` falls back to the engine
/// defaults at registration time.
#[derive(Debug, Clone, Default)]
pub struct MaterialPair {
    pub dry: Option<Arc<Material>>,
    pub wet: Option<Arc<Material>>,
    pub transition: Option<TransitionSettings>,
}

impl MaterialPair {
    pub fn new(dry: Arc<Material>, wet: Arc<Material>) -> Self {
        Self {
            dry: Some(dry),
            wet: Some(wet),
            transition: None,
        }
    }

    pub fn with_transition(mut self, transition: TransitionSettings) -> Self {
        self.transition = Some(transition);
        self
    }

    /// Checks the pair and fills in the transition settings.
    fn resolve(
        self,
        defaults: &TransitionSettings,
    ) -> Result<(Arc<Material>, Arc<Material>, TransitionSettings), ConfigurationError> {
        let dry = self
            .dry
            .ok_or(ConfigurationError::MissingMaterial(MaterialSlot::Dry))?;
        let wet = self
            .wet
            .ok_or(ConfigurationError::MissingMaterial(MaterialSlot::Wet))?;
        let transition = self.transition.unwrap_or(*defaults);
        transition.validate()?;
        Ok((dry, wet, transition))
    }
}

/// A registered object's validated configuration and live state.
#[derive(Debug, Clone)]
pub struct Registration {
    pub(crate) dry: Arc<Material>,
    pub(crate) wet: Arc<Material>,
    pub(crate) transition: TransitionSettings,
    pub(crate) state: ObjectState,
}

impl Registration {
    pub fn dry(&self) -> &Arc<Material> {
        &self.dry
    }

    pub fn wet(&self) -> &Arc<Material> {
        &self.wet
    }

    pub fn transition(&self) -> &TransitionSettings {
        &self.transition
    }

    pub fn state(&self) -> &ObjectState {
        &self.state
    }

    /// True when the pair cannot be blended and switches at half wetness.
    pub fn uses_discrete_fallback(&self) -> bool {
        !self.dry.kind.same_kind(&self.wet.kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    /// The id was already known; nothing changed.
    AlreadyRegistered,
}

#[derive(Debug)]
pub struct Registry<K> {
    entries: HashMap<K, Registration>,
}

impl<K> Default for Registry<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Registry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id` unless it is already present (first registration wins).
    ///
    /// Invalid input is rejected before anything is stored.
    pub fn register(
        &mut self,
        id: K,
        pair: MaterialPair,
        defaults: &TransitionSettings,
        now: f64,
    ) -> Result<RegisterOutcome, ConfigurationError> {
        let (dry, wet, transition) = pair.resolve(defaults)?;

        match self.entries.entry(id) {
            Entry::Occupied(_) => Ok(RegisterOutcome::AlreadyRegistered),
            Entry::Vacant(slot) => {
                slot.insert(Registration {
                    dry,
                    wet,
                    transition,
                    state: ObjectState::new(now),
                });
                Ok(RegisterOutcome::Registered)
            }
        }
    }

    /// Drops the registration for `id`, if any.
    pub fn remove(&mut self, id: &K) -> Option<Registration> {
        self.entries.remove(id)
    }

    pub fn current_wetness(&self, id: &K) -> Option<f64> {
        self.entries
            .get(id)
            .map(|entry| entry.state.displayed_wetness())
    }

    pub fn get(&self, id: &K) -> Option<&Registration> {
        self.entries.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &K) -> Option<&mut Registration> {
        self.entries.get_mut(id)
    }

    pub fn contains(&self, id: &K) -> bool {
        self.entries.contains_key(id)
    }

    /// Snapshot of registered ids, in no particular order.
    pub fn list_registered(&self) -> Vec<K> {
        self.entries.keys().cloned().collect()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut Registration)> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::color::LinearRgba;

    fn pair() -> MaterialPair {
        MaterialPair::new(
            Arc::new(Material::physically_based("dry", LinearRgba::WHITE, 0.0, 1.0)),
            Arc::new(Material::physically_based("wet", LinearRgba::BLACK, 0.0, 0.1)),
        )
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = Registry::new();
        let defaults = TransitionSettings::default();

        let first = registry.register("rock", pair(), &defaults, 0.0);
        assert_eq!(first, Ok(RegisterOutcome::Registered));

        let faster = TransitionSettings::new(1.0, 9.0, 1.0).unwrap();
        let second = registry.register("rock", pair().with_transition(faster), &defaults, 5.0);
        assert_eq!(second, Ok(RegisterOutcome::AlreadyRegistered));

        assert_eq!(registry.len(), 1);
        let entry = registry.get(&"rock").unwrap();
        assert_eq!(entry.transition(), &defaults);
        assert_eq!(entry.state().last_update(), 0.0);
    }

    #[test]
    fn test_invalid_pair_creates_nothing() {
        let mut registry: Registry<u32> = Registry::new();
        let defaults = TransitionSettings::default();

        let missing_wet = MaterialPair {
            wet: None,
            ..pair()
        };
        assert_eq!(
            registry.register(1, missing_wet, &defaults, 0.0),
            Err(ConfigurationError::MissingMaterial(MaterialSlot::Wet))
        );

        let bad_distance = pair().with_transition(TransitionSettings {
            distance: 0.0,
            ..defaults
        });
        assert_eq!(
            registry.register(1, bad_distance, &defaults, 0.0),
            Err(ConfigurationError::InvalidTransitionDistance(0.0))
        );

        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_and_unknown_ids() {
        let mut registry = Registry::new();
        let defaults = TransitionSettings::default();
        registry.register(7u64, pair(), &defaults, 0.0).unwrap();

        assert_eq!(registry.current_wetness(&7), Some(0.0));
        assert_eq!(registry.current_wetness(&8), None);
        assert!(registry.remove(&8).is_none());
        assert!(registry.contains(&7));
        assert!(registry.remove(&7).is_some());
        assert!(!registry.contains(&7));
        assert_eq!(registry.current_wetness(&7), None);
    }

    #[test]
    fn test_list_registered_is_a_snapshot() {
        let mut registry = Registry::new();
        let defaults = TransitionSettings::default();
        for id in ["a", "b", "c"] {
            registry.register(id, pair(), &defaults, 0.0).unwrap();
        }

        let mut ids = registry.list_registered();
        registry.remove(&"b");
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let mut ids = registry.list_registered();
        ids.sort();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
