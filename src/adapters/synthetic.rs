//! Synthetic subject for demos and tests.
//!
//! Places a front-facing figure in normalized image space whose upper arms
//! hang straight down and whose forearms open to a requested elbow angle.

use crate::domain::model::{Landmark, LandmarkFrame, PoseLandmark, Side, POSE_LANDMARK_COUNT};
use crate::domain::ports::PoseSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::VecDeque;

const SHOULDER_Y: f64 = 0.35;
const HIP_Y: f64 = 0.70;
const UPPER_ARM: f64 = 0.15;
const FOREARM: f64 = 0.14;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectPose {
    pub center_x: f64,
    pub shoulder_width: f64,
    pub hip_visibility: f64,
    pub left_elbow_angle: f64,
    pub right_elbow_angle: f64,
}

impl Default for SubjectPose {
    fn default() -> Self {
        Self {
            center_x: 0.5,
            shoulder_width: 0.5,
            hip_visibility: 0.9,
            left_elbow_angle: 170.0,
            right_elbow_angle: 170.0,
        }
    }
}

impl SubjectPose {
    pub fn with_elbow_angles(mut self, left: f64, right: f64) -> Self {
        self.left_elbow_angle = left;
        self.right_elbow_angle = right;
        self
    }

    pub fn with_shoulder_width(mut self, width: f64) -> Self {
        self.shoulder_width = width;
        self
    }

    pub fn with_hip_visibility(mut self, visibility: f64) -> Self {
        self.hip_visibility = visibility;
        self
    }

    pub fn to_frame(&self) -> LandmarkFrame {
        let mut landmarks = vec![Landmark::new(self.center_x, 0.5, 0.9); POSE_LANDMARK_COUNT];
        landmarks[PoseLandmark::Nose.index()] =
            Landmark::new(self.center_x, SHOULDER_Y - 0.15, 0.99);

        for side in Side::BOTH {
            // The subject faces the camera, so their left side is on the image right.
            let (outward, angle, shoulder, elbow, wrist, hip) = match side {
                Side::Left => (
                    1.0,
                    self.left_elbow_angle,
                    PoseLandmark::LeftShoulder,
                    PoseLandmark::LeftElbow,
                    PoseLandmark::LeftWrist,
                    PoseLandmark::LeftHip,
                ),
                Side::Right => (
                    -1.0,
                    self.right_elbow_angle,
                    PoseLandmark::RightShoulder,
                    PoseLandmark::RightElbow,
                    PoseLandmark::RightWrist,
                    PoseLandmark::RightHip,
                ),
            };

            let shoulder_x = self.center_x + outward * self.shoulder_width / 2.0;
            let elbow_y = SHOULDER_Y + UPPER_ARM;
            // The upper arm points straight up from the elbow, so the forearm
            // sits `angle` degrees away from vertical-up, swinging outward.
            let theta = angle.to_radians();
            let wrist_x = shoulder_x + outward * FOREARM * theta.sin();
            let wrist_y = elbow_y - FOREARM * theta.cos();

            landmarks[shoulder.index()] = Landmark::new(shoulder_x, SHOULDER_Y, 0.99);
            landmarks[elbow.index()] = Landmark::new(shoulder_x, elbow_y, 0.95);
            landmarks[wrist.index()] = Landmark::new(wrist_x, wrist_y, 0.9);
            landmarks[hip.index()] = Landmark::new(
                self.center_x + outward * self.shoulder_width / 3.0,
                HIP_Y,
                self.hip_visibility,
            );
        }

        LandmarkFrame::new(landmarks)
    }
}

/// Elbow angles for `reps` curls from rest, `steps` frames per half rep:
/// 170° down to 20° and back.
pub fn curl_angles(reps: usize, steps: usize) -> Vec<f64> {
    let steps = steps.max(1);
    let mut angles = vec![170.0];
    for _ in 0..reps {
        angles.extend((1..=steps).map(|i| 170.0 - 150.0 * i as f64 / steps as f64));
        angles.extend((1..=steps).map(|i| 20.0 + 150.0 * i as f64 / steps as f64));
    }
    angles
}

/// Replays a scripted list of frames.
#[derive(Debug, Default)]
pub struct SyntheticPoseSource {
    frames: VecDeque<LandmarkFrame>,
    frame_interval_ms: u64,
    emitted: u64,
}

impl SyntheticPoseSource {
    pub fn new(frames: impl IntoIterator<Item = LandmarkFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            frame_interval_ms: 33,
            emitted: 0,
        }
    }

    /// A framed subject whose elbows follow the paired angle sequences.
    pub fn from_angles(left: &[f64], right: &[f64]) -> Self {
        let base = SubjectPose::default();
        let frames = left
            .iter()
            .zip(right)
            .map(|(&l, &r)| base.with_elbow_angles(l, r).to_frame());
        Self::new(frames)
    }

    /// A subject doing `reps` full curls with both arms.
    pub fn curls(reps: usize, steps: usize) -> Self {
        let angles = curl_angles(reps, steps);
        Self::from_angles(&angles, &angles)
    }

    pub fn push(&mut self, frame: LandmarkFrame) {
        self.frames.push_back(frame);
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

#[async_trait]
impl PoseSource for SyntheticPoseSource {
    async fn next_frame(&mut self) -> Result<Option<LandmarkFrame>> {
        let Some(mut frame) = self.frames.pop_front() else {
            return Ok(None);
        };
        if frame.timestamp_ms.is_none() {
            frame.timestamp_ms = Some(self.emitted * self.frame_interval_ms);
        }
        self.emitted += 1;
        Ok(Some(frame))
    }
}
