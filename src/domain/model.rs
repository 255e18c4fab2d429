use serde::{Deserialize, Serialize};

/// One body joint estimated by the pose model, in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default = "full_visibility")]
    pub visibility: f64,
}

fn full_visibility() -> f64 {
    1.0
}

impl Landmark {
    pub fn new(x: f64, y: f64, visibility: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility,
        }
    }

    pub fn point(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// MediaPipe Pose landmark indices (33 total).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

pub const POSE_LANDMARK_COUNT: usize = 33;

impl PoseLandmark {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Skeleton edges between landmark indices, as drawn by the pose model's tooling.
pub const POSE_CONNECTIONS: [(usize, usize); 35] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 7),
    (0, 4),
    (4, 5),
    (5, 6),
    (6, 8),
    (9, 10),
    (11, 12),
    (11, 13),
    (13, 15),
    (15, 17),
    (15, 19),
    (15, 21),
    (17, 19),
    (12, 14),
    (14, 16),
    (16, 18),
    (16, 20),
    (16, 22),
    (18, 20),
    (11, 23),
    (12, 24),
    (23, 24),
    (23, 25),
    (24, 26),
    (25, 27),
    (26, 28),
    (27, 29),
    (28, 30),
    (29, 31),
    (30, 32),
    (27, 31),
    (28, 32),
];

/// Landmarks for one detected subject in one frame, indexed by [`PoseLandmark`].
///
/// A `null` entry is a joint the pose model did not report. No entries at all
/// means nobody was detected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<u64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub landmarks: Vec<Option<Landmark>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Option<Landmark>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Option<Landmark>>>::deserialize(deserializer)?.unwrap_or_default())
}

impl LandmarkFrame {
    /// A frame where every landmark in `landmarks` was reported.
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self {
            timestamp_ms: None,
            landmarks: landmarks.into_iter().map(Some).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_subject(&self) -> bool {
        self.landmarks.iter().any(Option::is_some)
    }

    pub fn get(&self, landmark: PoseLandmark) -> Option<&Landmark> {
        self.landmarks.get(landmark.index())?.as_ref()
    }

    /// Marks one joint as not reported.
    pub fn drop_landmark(&mut self, landmark: PoseLandmark) {
        if let Some(slot) = self.landmarks.get_mut(landmark.index()) {
            *slot = None;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    fn joints(self) -> [PoseLandmark; 3] {
        match self {
            Side::Left => [
                PoseLandmark::LeftShoulder,
                PoseLandmark::LeftElbow,
                PoseLandmark::LeftWrist,
            ],
            Side::Right => [
                PoseLandmark::RightShoulder,
                PoseLandmark::RightElbow,
                PoseLandmark::RightWrist,
            ],
        }
    }
}

/// Shoulder, elbow and wrist of one arm in the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbJoints {
    pub shoulder: Landmark,
    pub elbow: Landmark,
    pub wrist: Landmark,
}

impl LimbJoints {
    pub fn from_frame(frame: &LandmarkFrame, side: Side) -> Option<Self> {
        let [shoulder, elbow, wrist] = side.joints();
        Some(Self {
            shoulder: *frame.get(shoulder)?,
            elbow: *frame.get(elbow)?,
            wrist: *frame.get(wrist)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupReason {
    HipsNotVisible,
    TooFar,
    TooClose,
    IncompleteLandmarks,
}

impl SetupReason {
    pub fn message(self) -> &'static str {
        match self {
            SetupReason::HipsNotVisible => "Step Back (Show Hips)",
            SetupReason::TooFar => "Too Far! Step Closer",
            SetupReason::TooClose => "Too Close! Step Back",
            SetupReason::IncompleteLandmarks => "Adjust Position (Body Not Detected)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "snake_case")]
pub enum FramingVerdict {
    Setup(SetupReason),
    Active,
}

impl FramingVerdict {
    pub fn is_active(&self) -> bool {
        matches!(self, FramingVerdict::Active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Unknown,
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RepCounterState {
    pub stage: Stage,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayMetrics {
    pub left_percent: f64,
    pub right_percent: f64,
    pub avg_percent: f64,
    pub left_count: u32,
    pub right_count: u32,
}

/// Overlay colors as BGR triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    pub fn bgr(self) -> (u8, u8, u8) {
        match self {
            Color::Red => (0, 0, 255),
            Color::Green => (0, 255, 0),
            Color::Yellow => (0, 255, 255),
            Color::Blue => (255, 0, 0),
        }
    }
}

pub const NO_SUBJECT_MESSAGE: &str = "Looking for user...";
pub const ACTIVE_MESSAGE: &str = "GO! Workout Active.";
pub const DEFAULT_HINT_TEXT: &str = "Stand angled 45 deg for best results";

/// Drawing instructions handed to a [`Renderer`](crate::domain::ports::Renderer).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum RenderCommand {
    ShowSetupMessage {
        text: String,
        color: Color,
    },
    ShowWorkoutHud {
        metrics: DisplayMetrics,
        hint_text: String,
    },
    DrawSkeleton {
        landmarks: Vec<Option<Landmark>>,
        connections: &'static [(usize, usize)],
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FrameStatus {
    NoSubject,
    Setup { reason: SetupReason },
    Active { metrics: DisplayMetrics },
}

impl FrameStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, FrameStatus::Active { .. })
    }
}

/// What the controller decided for one frame plus the overlay it wants drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub status: FrameStatus,
    pub commands: Vec<RenderCommand>,
}
