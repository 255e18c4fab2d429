use crate::domain::model::{LandmarkFrame, RenderCommand};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Supplies one landmark set per captured frame.
///
/// `Ok(None)` means the stream has ended. A frame with no landmarks means the
/// pose model found nobody and is still delivered.
#[async_trait]
pub trait PoseSource: Send {
    async fn next_frame(&mut self) -> Result<Option<LandmarkFrame>>;
}

/// Draws the overlay for one frame.
pub trait Renderer {
    fn render(&mut self, frame_index: u64, commands: &[RenderCommand]) -> Result<()>;

    /// Called once after the last frame.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

pub trait ThresholdProvider {
    fn visibility_threshold(&self) -> f64;
    fn min_shoulder_width(&self) -> f64;
    fn max_shoulder_width(&self) -> f64;
    fn extended_angle(&self) -> f64;
    fn flexed_angle(&self) -> f64;
    fn hint_text(&self) -> &str;
}
