// Adapters layer: concrete pose sources and renderers the core is wired to.

pub mod console_renderer;
pub mod json_renderer;
pub mod jsonl_source;
pub mod synthetic;

pub use console_renderer::ConsoleRenderer;
pub use json_renderer::JsonRenderer;
pub use jsonl_source::JsonLinesPoseSource;
pub use synthetic::{curl_angles, SubjectPose, SyntheticPoseSource};
