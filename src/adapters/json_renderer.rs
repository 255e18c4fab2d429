use crate::domain::model::RenderCommand;
use crate::domain::ports::Renderer;
use crate::utils::error::{Result, TrainerError};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct FrameLine<'a> {
    frame: u64,
    commands: Vec<&'a RenderCommand>,
}

/// Writes each frame's render commands as one JSON line, for an external
/// overlay process to draw.
pub struct JsonRenderer<W: Write> {
    out: W,
    include_skeleton: bool,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            include_skeleton: true,
        }
    }

    /// Skeleton commands carry every landmark; leave them out for a lighter stream.
    pub fn include_skeleton(mut self, include: bool) -> Self {
        self.include_skeleton = include;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, frame_index: u64, commands: &[RenderCommand]) -> Result<()> {
        let line = FrameLine {
            frame: frame_index,
            commands: commands
                .iter()
                .filter(|c| self.include_skeleton || !matches!(c, RenderCommand::DrawSkeleton { .. }))
                .collect(),
        };
        serde_json::to_writer(&mut self.out, &line)?;
        self.out.write_all(b"\n").map_err(|e| TrainerError::RenderError {
            message: e.to_string(),
        })
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush().map_err(|e| TrainerError::RenderError {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Color, Landmark, POSE_CONNECTIONS};

    #[test]
    fn test_one_line_per_frame_without_skeleton() {
        let mut renderer = JsonRenderer::new(Vec::new()).include_skeleton(false);
        let commands = vec![
            RenderCommand::ShowSetupMessage {
                text: "Looking for user...".to_string(),
                color: Color::Red,
            },
            RenderCommand::DrawSkeleton {
                landmarks: vec![Some(Landmark::new(0.5, 0.5, 1.0)), None],
                connections: &POSE_CONNECTIONS,
            },
        ];
        renderer.render(4, &commands).unwrap();
        renderer.render(5, &commands[..1]).unwrap();

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["frame"], 4);
        assert_eq!(lines[0]["commands"].as_array().unwrap().len(), 1);
        assert_eq!(lines[0]["commands"][0]["command"], "show_setup_message");
    }

    #[test]
    fn test_skeleton_serializes_connections() {
        let mut renderer = JsonRenderer::new(Vec::new());
        renderer
            .render(
                0,
                &[RenderCommand::DrawSkeleton {
                    landmarks: vec![],
                    connections: &POSE_CONNECTIONS,
                }],
            )
            .unwrap();
        let output = String::from_utf8(renderer.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(value["commands"][0]["connections"][0], serde_json::json!([0, 1]));
    }
}
