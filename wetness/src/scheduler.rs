//! Rate-limited movement of displayed wetness toward its target.
//!
//! ## Per-object state
//! Every registered object carries an [`ObjectState`]. Each batch computes a
//! fresh target wetness; the displayed value then moves toward it by at most
//! `speed * delta_time`, so a sudden change of water level never pops.
//!
//! ## Material refresh
//! The last wetness actually written to the object's material is tracked
//! separately. A new material is only produced when the displayed value has
//! drifted more than [`WETNESS_EPSILON`] from it, or when a transition settles
//! somewhere other than the last written value.

use crate::constants::WETNESS_EPSILON;

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectState {
    /// Wetness currently applied to the material, in [0, 1]
    displayed_wetness: f64,
    /// Target computed in the most recent step
    target_wetness: f64,
    is_transitioning: bool,
    /// Engine clock (seconds) of the last step
    last_update: f64,
    /// Wetness of the material last written to the object
    applied_wetness: Option<f64>,
}

/// What a single [`ObjectState::advance`] call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Signed change of displayed wetness
    pub delta: f64,
    /// True when this step ended a transition
    pub settled: bool,
}

impl ObjectState {
    /// Fresh state for an object registered at `now`, starting dry.
    pub fn new(now: f64) -> Self {
        Self {
            displayed_wetness: 0.0,
            target_wetness: 0.0,
            is_transitioning: false,
            last_update: now,
            applied_wetness: None,
        }
    }

    #[inline]
    pub fn displayed_wetness(&self) -> f64 {
        self.displayed_wetness
    }

    #[inline]
    pub fn target_wetness(&self) -> f64 {
        self.target_wetness
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    #[inline]
    pub fn last_update(&self) -> f64 {
        self.last_update
    }

    #[inline]
    pub fn applied_wetness(&self) -> Option<f64> {
        self.applied_wetness
    }

    /// Moves displayed wetness toward `target` by at most `speed * dt`.
    ///
    /// Within [`WETNESS_EPSILON`] of the target the value snaps to it and the
    /// transition ends. A clock running backwards gives `dt = 0`.
    pub fn advance(&mut self, target: f64, speed: f64, now: f64) -> StepOutcome {
        let target = if target.is_nan() {
            0.0
        } else {
            target.clamp(0.0, 1.0)
        };
        let delta_time = (now - self.last_update).max(0.0);
        let before = self.displayed_wetness;
        let was_transitioning = self.is_transitioning;
        let gap = target - before;

        if gap.abs() <= WETNESS_EPSILON {
            self.is_transitioning = false;
            self.displayed_wetness = target;
        } else {
            self.is_transitioning = true;
            let step = (speed * delta_time).max(0.0);
            self.displayed_wetness = (before + gap.signum() * step.min(gap.abs())).clamp(0.0, 1.0);
        }

        self.target_wetness = target;
        self.last_update = now;

        StepOutcome {
            delta: self.displayed_wetness - before,
            settled: was_transitioning && !self.is_transitioning,
        }
    }

    /// Whether the material must be rebuilt after `outcome`.
    pub fn needs_material_refresh(&self, outcome: &StepOutcome) -> bool {
        match self.applied_wetness {
            None => true,
            Some(applied) => {
                let drift = (self.displayed_wetness - applied).abs();
                drift > WETNESS_EPSILON || (outcome.settled && drift > 0.0)
            }
        }
    }

    /// Records that a material for the current displayed wetness was written.
    pub fn mark_applied(&mut self) {
        self.applied_wetness = Some(self.displayed_wetness);
    }

    /// Records that the dry material was written.
    pub fn mark_dry_applied(&mut self) {
        self.applied_wetness = Some(0.0);
    }
}
