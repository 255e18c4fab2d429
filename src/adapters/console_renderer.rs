use crate::domain::model::{Color, DisplayMetrics, RenderCommand};
use crate::domain::ports::Renderer;
use crate::utils::error::{Result, TrainerError};
use std::io::Write;

pub const HUD_BAR_WIDTH: usize = 20;

/// Text progress bar; the fill is the floor of the clamped share of `width`.
pub fn hud_bar(percent: f64, width: usize) -> String {
    let safe = percent.clamp(0.0, 100.0);
    let fill = ((safe / 100.0) * width as f64) as usize;
    format!("[{}{}]", "#".repeat(fill), "-".repeat(width - fill))
}

/// Terminal stand-in for the video overlay.
///
/// Prints a line whenever what the user would see changes (a new setup
/// message, a new rep), or on every frame when `every_frame` is set.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    every_frame: bool,
    ansi_colors: bool,
    last_line: Option<String>,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            every_frame: false,
            ansi_colors: false,
            last_line: None,
        }
    }

    pub fn every_frame(mut self, enabled: bool) -> Self {
        self.every_frame = enabled;
        self
    }

    pub fn ansi_colors(mut self, enabled: bool) -> Self {
        self.ansi_colors = enabled;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if !self.ansi_colors {
            return text.to_string();
        }
        let (b, g, r) = color.bgr();
        format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, text)
    }

    fn hud_line(&self, metrics: &DisplayMetrics, hint_text: &str) -> String {
        let bar = |label: &str, percent: f64, color: Color| {
            format!(
                "{} {} {:>3.0}%",
                label,
                self.paint(&hud_bar(percent, HUD_BAR_WIDTH), color),
                percent.clamp(0.0, 100.0)
            )
        };
        format!(
            "L REPS {} | R REPS {} | {} | {} | {} | {}",
            metrics.left_count,
            metrics.right_count,
            bar("Left Arm", metrics.left_percent, Color::Blue),
            bar("Avg Activity", metrics.avg_percent, Color::Green),
            bar("Right Arm", metrics.right_percent, Color::Blue),
            self.paint(hint_text, Color::Yellow)
        )
    }

    // The part of a frame that decides whether a quiet renderer prints.
    fn change_key(command: &RenderCommand) -> Option<String> {
        match command {
            RenderCommand::ShowSetupMessage { text, .. } => Some(text.clone()),
            RenderCommand::ShowWorkoutHud { metrics, .. } => Some(format!(
                "reps {} {}",
                metrics.left_count, metrics.right_count
            )),
            RenderCommand::DrawSkeleton { .. } => None,
        }
    }

    fn write_line(&mut self, frame_index: u64, line: &str) -> Result<()> {
        writeln!(self.out, "[frame {:>5}] {}", frame_index, line).map_err(|e| {
            TrainerError::RenderError {
                message: e.to_string(),
            }
        })
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, frame_index: u64, commands: &[RenderCommand]) -> Result<()> {
        for command in commands {
            let line = match command {
                RenderCommand::ShowSetupMessage { text, color } => self.paint(text, *color),
                RenderCommand::ShowWorkoutHud { metrics, hint_text } => {
                    self.hud_line(metrics, hint_text)
                }
                RenderCommand::DrawSkeleton { landmarks, connections } => {
                    tracing::trace!(
                        points = landmarks.iter().flatten().count(),
                        edges = connections.len(),
                        "skeleton"
                    );
                    continue;
                }
            };

            let key = Self::change_key(command);
            if self.every_frame || key != self.last_line {
                self.write_line(frame_index, &line)?;
                self.last_line = key;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush().map_err(|e| TrainerError::RenderError {
            message: e.to_string(),
        })
    }
}
