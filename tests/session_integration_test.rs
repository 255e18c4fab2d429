use curl_counter::adapters::{SubjectPose, SyntheticPoseSource};
use curl_counter::domain::model::{
    FrameStatus, LandmarkFrame, RenderCommand, SetupReason, Side, Stage, NO_SUBJECT_MESSAGE,
};
use curl_counter::domain::ports::Renderer;
use curl_counter::{Result, SessionController, StopReason, TrainerError, WorkoutEngine};

#[derive(Default)]
struct RecordingRenderer {
    frames: Vec<(u64, Vec<RenderCommand>)>,
    finished: bool,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame_index: u64, commands: &[RenderCommand]) -> Result<()> {
        self.frames.push((frame_index, commands.to_vec()));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

// Fails on the given frame, like a closed output pipe.
struct FailingRenderer {
    fail_at: u64,
    finished: bool,
}

impl Renderer for FailingRenderer {
    fn render(&mut self, frame_index: u64, _commands: &[RenderCommand]) -> Result<()> {
        if frame_index == self.fail_at {
            return Err(TrainerError::RenderError {
                message: "broken pipe".to_string(),
            });
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

fn hud_counts(commands: &[RenderCommand]) -> Option<(u32, u32)> {
    commands.iter().find_map(|c| match c {
        RenderCommand::ShowWorkoutHud { metrics, .. } => {
            Some((metrics.left_count, metrics.right_count))
        }
        _ => None,
    })
}

#[tokio::test]
async fn test_left_arm_rep_with_resting_right_arm() {
    let source = SyntheticPoseSource::from_angles(&[170.0, 170.0, 20.0], &[90.0, 90.0, 90.0]);
    let mut engine = WorkoutEngine::new(
        source,
        RecordingRenderer::default(),
        SessionController::default(),
    );

    let summary = engine.run_until(std::future::pending()).await.unwrap();

    assert_eq!(summary.stop_reason, StopReason::EndOfStream);
    assert_eq!(summary.frames, 3);
    assert_eq!(summary.active_frames, 3);
    assert_eq!(summary.left.count, 1);
    assert_eq!(summary.left.stage, Stage::Up);
    assert_eq!(summary.right.count, 0);
    assert_eq!(summary.right.stage, Stage::Unknown);

    let renderer = engine.into_renderer();
    assert!(renderer.finished);
    let counts: Vec<_> = renderer
        .frames
        .iter()
        .map(|(_, commands)| hud_counts(commands))
        .collect();
    assert_eq!(counts, vec![Some((0, 0)), Some((0, 0)), Some((1, 0))]);
}

#[tokio::test]
async fn test_full_curl_sets_count_both_arms() {
    let mut engine = WorkoutEngine::new(
        SyntheticPoseSource::curls(4, 12),
        RecordingRenderer::default(),
        SessionController::default(),
    );

    let summary = engine.run_until(std::future::pending()).await.unwrap();

    assert_eq!(summary.left.count, 4);
    assert_eq!(summary.right.count, 4);
    assert_eq!(summary.frames, summary.active_frames);
}

#[tokio::test]
async fn test_subject_leaving_frame_freezes_counts() {
    let rest = SubjectPose::default().with_elbow_angles(170.0, 170.0);
    let flexed = SubjectPose::default().with_elbow_angles(20.0, 20.0);
    let too_far = flexed.with_shoulder_width(0.05);

    let source = SyntheticPoseSource::new(vec![
        rest.to_frame(),
        LandmarkFrame::empty(),
        too_far.to_frame(),
        flexed.to_frame(),
        LandmarkFrame::empty(),
        rest.to_frame(),
        flexed.to_frame(),
    ]);
    let mut engine = WorkoutEngine::new(
        source,
        RecordingRenderer::default(),
        SessionController::default(),
    );

    let summary = engine.run_until(std::future::pending()).await.unwrap();
    assert_eq!(summary.frames, 7);
    assert_eq!(summary.active_frames, 4);
    assert_eq!(summary.left.count, 2);
    assert_eq!(summary.right.count, 2);

    let renderer = engine.into_renderer();
    let (_, no_subject) = &renderer.frames[1];
    assert_eq!(no_subject.len(), 1, "no skeleton without landmarks");
    assert!(matches!(
        &no_subject[0],
        RenderCommand::ShowSetupMessage { text, .. } if text == NO_SUBJECT_MESSAGE
    ));

    let (_, setup) = &renderer.frames[2];
    assert!(matches!(
        &setup[0],
        RenderCommand::ShowSetupMessage { text, .. } if text == "Too Far! Step Closer"
    ));
    assert!(matches!(setup[1], RenderCommand::DrawSkeleton { .. }));
}

#[tokio::test]
async fn test_frame_limit_stops_early() {
    let mut engine = WorkoutEngine::new(
        SyntheticPoseSource::curls(10, 10),
        RecordingRenderer::default(),
        SessionController::default(),
    )
    .with_max_frames(Some(5));

    let summary = engine.run_until(std::future::pending()).await.unwrap();
    assert_eq!(summary.stop_reason, StopReason::FrameLimit);
    assert_eq!(summary.frames, 5);
    assert_eq!(engine.renderer().frames.len(), 5);
}

#[tokio::test]
async fn test_quit_before_first_frame() {
    let mut engine = WorkoutEngine::new(
        SyntheticPoseSource::curls(1, 5),
        RecordingRenderer::default(),
        SessionController::default(),
    );

    let summary = engine.run_until(async {}).await.unwrap();
    assert_eq!(summary.stop_reason, StopReason::Quit);
    assert_eq!(summary.frames, 0);
    assert!(summary.elapsed_ms < 60_000);
    assert!(engine.renderer().finished);
}

#[test]
fn test_hip_gate_wins_over_distance() {
    let mut session = SessionController::default();
    let frame = SubjectPose::default()
        .with_hip_visibility(0.1)
        .with_shoulder_width(0.95)
        .to_frame();

    let report = session.process(&frame);
    assert_eq!(
        report.status,
        FrameStatus::Setup {
            reason: SetupReason::HipsNotVisible
        }
    );
}

#[tokio::test]
async fn test_render_failure_keeps_counts_and_finishes() {
    let renderer = FailingRenderer {
        fail_at: 3,
        finished: false,
    };
    let mut engine = WorkoutEngine::new(
        SyntheticPoseSource::from_angles(&[170.0, 20.0, 170.0, 20.0], &[90.0; 4]),
        renderer,
        SessionController::default(),
    );

    let result = engine.run_until(std::future::pending()).await;
    assert!(matches!(result, Err(TrainerError::RenderError { .. })));
    // The failing frame was still processed before it was drawn.
    assert_eq!(
        engine
            .session()
            .counter_state(Side::Left)
            .count,
        2
    );
    assert!(engine.renderer().finished);
}
