use crate::core::angle::joint_angle;
use crate::core::framing::FramingGate;
use crate::core::rep_counter::{RepCounter, RepThresholds};
use crate::domain::model::{
    Color, DisplayMetrics, FrameReport, FrameStatus, FramingVerdict, LandmarkFrame, LimbJoints,
    RenderCommand, RepCounterState, SetupReason, Side, ACTIVE_MESSAGE, DEFAULT_HINT_TEXT,
    NO_SUBJECT_MESSAGE, POSE_CONNECTIONS,
};
use crate::domain::ports::ThresholdProvider;

/// Owns both arm counters for one workout and turns each frame into a status
/// plus render commands.
pub struct SessionController {
    gate: FramingGate,
    left: RepCounter,
    right: RepCounter,
    hint_text: String,
    last_status: Option<StatusKind>,
}

// Status without the per-frame metrics, used to log transitions only.
#[derive(Debug, Clone, Copy, PartialEq)]
enum StatusKind {
    NoSubject,
    Setup(SetupReason),
    Active,
}

impl SessionController {
    pub fn new(gate: FramingGate, thresholds: RepThresholds, hint_text: impl Into<String>) -> Self {
        Self {
            gate,
            left: RepCounter::new(thresholds),
            right: RepCounter::new(thresholds),
            hint_text: hint_text.into(),
            last_status: None,
        }
    }

    pub fn from_config<T: ThresholdProvider + ?Sized>(config: &T) -> Self {
        Self::new(
            FramingGate::from_provider(config),
            RepThresholds::from_provider(config),
            config.hint_text(),
        )
    }

    pub fn process(&mut self, frame: &LandmarkFrame) -> FrameReport {
        let status = self.evaluate(frame);
        self.log_transition(&status);

        let mut commands = Vec::with_capacity(2);
        match &status {
            FrameStatus::NoSubject => commands.push(RenderCommand::ShowSetupMessage {
                text: NO_SUBJECT_MESSAGE.to_string(),
                color: Color::Red,
            }),
            FrameStatus::Setup { reason } => commands.push(RenderCommand::ShowSetupMessage {
                text: reason.message().to_string(),
                color: Color::Red,
            }),
            FrameStatus::Active { metrics } => commands.push(RenderCommand::ShowWorkoutHud {
                metrics: *metrics,
                hint_text: self.hint_text.clone(),
            }),
        }

        if frame.has_subject() {
            commands.push(RenderCommand::DrawSkeleton {
                landmarks: frame.landmarks.clone(),
                connections: &POSE_CONNECTIONS,
            });
        }

        FrameReport { status, commands }
    }

    fn evaluate(&mut self, frame: &LandmarkFrame) -> FrameStatus {
        if !frame.has_subject() {
            return FrameStatus::NoSubject;
        }

        if let FramingVerdict::Setup(reason) = self.gate.evaluate(frame) {
            return FrameStatus::Setup { reason };
        }

        // Both arms must be measurable before either counter moves.
        let (Some(left), Some(right)) = (
            LimbJoints::from_frame(frame, Side::Left),
            LimbJoints::from_frame(frame, Side::Right),
        ) else {
            return FrameStatus::Setup {
                reason: SetupReason::IncompleteLandmarks,
            };
        };

        let left_percent = self.advance(Side::Left, &left);
        let right_percent = self.advance(Side::Right, &right);

        FrameStatus::Active {
            metrics: DisplayMetrics {
                left_percent,
                right_percent,
                avg_percent: (left_percent + right_percent) / 2.0,
                left_count: self.left.count(),
                right_count: self.right.count(),
            },
        }
    }

    /// Updates one arm's counter and returns its activity percent.
    fn advance(&mut self, side: Side, joints: &LimbJoints) -> f64 {
        let angle = joint_angle(
            joints.shoulder.point(),
            joints.elbow.point(),
            joints.wrist.point(),
        );
        let counter = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };

        tracing::trace!(side = side.label(), angle, stage = ?counter.stage(), "elbow angle");
        if counter.update(angle) {
            tracing::info!("💪 {} arm rep {} completed", side.label(), counter.count());
        }

        counter.thresholds().activity_percent(angle)
    }

    fn log_transition(&mut self, status: &FrameStatus) {
        let kind = match status {
            FrameStatus::NoSubject => StatusKind::NoSubject,
            FrameStatus::Setup { reason } => StatusKind::Setup(*reason),
            FrameStatus::Active { .. } => StatusKind::Active,
        };
        if self.last_status == Some(kind) {
            return;
        }

        match kind {
            StatusKind::NoSubject => tracing::info!("🔍 {}", NO_SUBJECT_MESSAGE),
            StatusKind::Setup(reason) => {
                tracing::info!("⚠️ Setup: {} ({:?})", reason.message(), reason)
            }
            StatusKind::Active => tracing::info!("✅ {}", ACTIVE_MESSAGE),
        }
        self.last_status = Some(kind);
    }

    pub fn counter_state(&self, side: Side) -> RepCounterState {
        match side {
            Side::Left => self.left.state(),
            Side::Right => self.right.state(),
        }
    }

    /// Starts a fresh workout: both counters back to zero and unknown stage.
    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
        self.last_status = None;
        tracing::info!("🔄 Session counters reset");
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(
            FramingGate::default(),
            RepThresholds::default(),
            DEFAULT_HINT_TEXT,
        )
    }
}
