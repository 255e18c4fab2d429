//! Decides whether the subject is framed well enough for counting.
//!
//! Hip visibility stands in for "whole torso in frame"; the horizontal
//! shoulder distance stands in for distance from the camera.

use crate::domain::model::{FramingVerdict, LandmarkFrame, PoseLandmark, SetupReason};
use crate::domain::ports::ThresholdProvider;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramingGate {
    pub visibility_threshold: f64,
    pub min_shoulder_width: f64,
    pub max_shoulder_width: f64,
}

impl Default for FramingGate {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.65,
            min_shoulder_width: 0.10,
            max_shoulder_width: 0.80,
        }
    }
}

impl FramingGate {
    pub fn from_provider<T: ThresholdProvider + ?Sized>(config: &T) -> Self {
        Self {
            visibility_threshold: config.visibility_threshold(),
            min_shoulder_width: config.min_shoulder_width(),
            max_shoulder_width: config.max_shoulder_width(),
        }
    }

    /// Checks run in priority order and the first failure wins.
    pub fn evaluate(&self, frame: &LandmarkFrame) -> FramingVerdict {
        // A hip the model did not report at all is as good as an invisible one.
        let hip_visible = |hip: PoseLandmark| {
            frame
                .get(hip)
                .is_some_and(|lm| lm.visibility > self.visibility_threshold)
        };
        if !(hip_visible(PoseLandmark::LeftHip) && hip_visible(PoseLandmark::RightHip)) {
            return FramingVerdict::Setup(SetupReason::HipsNotVisible);
        }

        let (Some(left), Some(right)) = (
            frame.get(PoseLandmark::LeftShoulder),
            frame.get(PoseLandmark::RightShoulder),
        ) else {
            return FramingVerdict::Setup(SetupReason::IncompleteLandmarks);
        };

        let shoulder_width = (left.x - right.x).abs();
        if shoulder_width < self.min_shoulder_width {
            FramingVerdict::Setup(SetupReason::TooFar)
        } else if shoulder_width > self.max_shoulder_width {
            FramingVerdict::Setup(SetupReason::TooClose)
        } else {
            FramingVerdict::Active
        }
    }
}
