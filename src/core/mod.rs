pub mod angle;
pub mod engine;
pub mod framing;
pub mod rep_counter;
pub mod session;

pub use crate::domain::model::{
    DisplayMetrics, FrameReport, FrameStatus, FramingVerdict, LandmarkFrame, RenderCommand,
    RepCounterState, Stage,
};
pub use crate::domain::ports::{PoseSource, Renderer, ThresholdProvider};
pub use crate::utils::error::Result;
