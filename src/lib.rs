pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};
pub use config::TrainerConfig;

pub use core::{
    engine::{SessionSummary, StopReason, WorkoutEngine},
    session::SessionController,
};
pub use utils::error::{Result, TrainerError};
