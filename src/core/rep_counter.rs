//! Per-arm curl counter.
//!
//! Two thresholds with a gap between them: the arm has to be seen extended
//! past `extended_angle` before a flex below `flexed_angle` counts, so a
//! signal wobbling around either threshold cannot count twice.

use crate::domain::model::{RepCounterState, Stage};
use crate::domain::ports::ThresholdProvider;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepThresholds {
    /// Above this the arm is at rest and a new rep becomes possible.
    pub extended_angle: f64,
    /// Below this, coming from rest, a rep is completed.
    pub flexed_angle: f64,
}

impl Default for RepThresholds {
    fn default() -> Self {
        Self {
            extended_angle: 160.0,
            flexed_angle: 30.0,
        }
    }
}

impl RepThresholds {
    pub fn from_provider<T: ThresholdProvider + ?Sized>(config: &T) -> Self {
        Self {
            extended_angle: config.extended_angle(),
            flexed_angle: config.flexed_angle(),
        }
    }

    /// Maps an elbow angle to flexion percent: fully flexed is 100, at rest is 0.
    pub fn activity_percent(&self, angle: f64) -> f64 {
        let span = self.extended_angle - self.flexed_angle;
        let percent = (self.extended_angle - angle) / span * 100.0;
        percent.clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RepCounter {
    thresholds: RepThresholds,
    state: RepCounterState,
}

impl RepCounter {
    pub fn new(thresholds: RepThresholds) -> Self {
        Self {
            thresholds,
            state: RepCounterState::default(),
        }
    }

    /// Feeds one angle reading. Returns `true` when this reading completed a rep.
    pub fn update(&mut self, angle: f64) -> bool {
        if angle > self.thresholds.extended_angle {
            self.state.stage = Stage::Down;
            return false;
        }

        if angle < self.thresholds.flexed_angle && self.state.stage == Stage::Down {
            self.state.stage = Stage::Up;
            self.state.count += 1;
            return true;
        }

        false
    }

    pub fn state(&self) -> RepCounterState {
        self.state
    }

    pub fn count(&self) -> u32 {
        self.state.count
    }

    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    pub fn thresholds(&self) -> &RepThresholds {
        &self.thresholds
    }

    pub fn reset(&mut self) {
        self.state = RepCounterState::default();
    }
}
