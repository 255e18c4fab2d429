use crate::core::session::SessionController;
use crate::domain::model::{RepCounterState, Side};
use crate::domain::ports::{PoseSource, Renderer};
use crate::utils::error::Result;
use crate::utils::monitor::FrameMonitor;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::future::Future;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndOfStream,
    FrameLimit,
    Quit,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub frames: u64,
    pub active_frames: u64,
    pub left: RepCounterState,
    pub right: RepCounterState,
    pub stop_reason: StopReason,
}

/// Pulls frames one at a time, runs them through the session and hands the
/// resulting overlay to the renderer before asking for the next frame.
pub struct WorkoutEngine<S: PoseSource, R: Renderer> {
    source: S,
    renderer: R,
    session: SessionController,
    monitor: FrameMonitor,
    max_frames: Option<u64>,
}

impl<S: PoseSource, R: Renderer> WorkoutEngine<S, R> {
    pub fn new(source: S, renderer: R, session: SessionController) -> Self {
        Self {
            source,
            renderer,
            session,
            monitor: FrameMonitor::default(),
            max_frames: None,
        }
    }

    pub fn with_monitor(mut self, monitor: FrameMonitor) -> Self {
        self.monitor = monitor;
        self
    }

    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Runs until the stream ends, the frame limit is reached or Ctrl-C is pressed.
    pub async fn run(&mut self) -> Result<SessionSummary> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Could not listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Like [`run`](Self::run) but stops when `quit` resolves. The frame in
    /// flight is finished first.
    ///
    /// A source or render error still finishes the renderer before it is
    /// returned; the counts reached so far stay readable via [`session`](Self::session).
    pub async fn run_until<F>(&mut self, quit: F) -> Result<SessionSummary>
    where
        F: Future<Output = ()>,
    {
        let started_at = Utc::now();
        let clock = Instant::now();
        let mut frames: u64 = 0;
        let mut active_frames: u64 = 0;

        tracing::info!("🏋️ Starting curl session");
        tokio::pin!(quit);

        let outcome = loop {
            if self.max_frames.is_some_and(|max| frames >= max) {
                break Ok(StopReason::FrameLimit);
            }

            let next = tokio::select! {
                biased;
                _ = &mut quit => None,
                next = self.source.next_frame() => Some(next),
            };

            let frame = match next {
                None => break Ok(StopReason::Quit),
                Some(Err(e)) => break Err(e),
                Some(Ok(Some(frame))) => frame,
                Some(Ok(None)) => break Ok(StopReason::EndOfStream),
            };

            let report = self.session.process(&frame);
            if let Err(e) = self.renderer.render(frames, &report.commands) {
                break Err(e);
            }

            let active = report.status.is_active();
            if active {
                active_frames += 1;
            }
            self.monitor.record_frame(active);
            frames += 1;
        };

        // The renderer is finished and stats are logged even when the loop failed.
        let finished = self.renderer.finish();
        self.monitor.log_final_stats();

        let stop_reason = match outcome {
            Ok(reason) => reason,
            Err(e) => {
                if let Err(finish_error) = finished {
                    tracing::warn!("Renderer did not finish cleanly: {}", finish_error);
                }
                tracing::warn!(
                    "⚠️ Session aborted after {} frames: left {} reps, right {} reps",
                    frames,
                    self.session.counter_state(Side::Left).count,
                    self.session.counter_state(Side::Right).count
                );
                return Err(e);
            }
        };
        finished?;

        let summary = SessionSummary {
            started_at,
            elapsed_ms: u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX),
            frames,
            active_frames,
            left: self.session.counter_state(Side::Left),
            right: self.session.counter_state(Side::Right),
            stop_reason,
        };
        tracing::info!(
            "🏁 Session ended ({:?}) after {} frames: left {} reps, right {} reps",
            summary.stop_reason,
            summary.frames,
            summary.left.count,
            summary.right.count
        );
        Ok(summary)
    }
}
