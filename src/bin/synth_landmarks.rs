use anyhow::Context;
use clap::Parser;
use curl_counter::adapters::synthetic::{curl_angles, SubjectPose};
use curl_counter::domain::model::LandmarkFrame;
use curl_counter::utils::logger;
use std::io::{BufWriter, Write};

#[derive(Parser)]
#[command(name = "synth-landmarks")]
#[command(about = "Writes a synthetic curl session as landmark JSON lines")]
struct Args {
    /// Number of curls
    #[arg(short, long, default_value = "5")]
    reps: usize,

    /// Frames per half rep (down or up)
    #[arg(short, long, default_value = "15")]
    steps: usize,

    /// Only the left arm curls; the right arm hangs at rest
    #[arg(long)]
    left_only: bool,

    /// Empty frames emitted before the subject walks in
    #[arg(long, default_value = "0")]
    empty_frames: usize,

    #[arg(long, default_value = "0.5")]
    shoulder_width: f64,

    #[arg(long, default_value = "0.9")]
    hip_visibility: f64,

    /// Milliseconds between frames
    #[arg(long, default_value = "33")]
    interval_ms: u64,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let pose = SubjectPose::default()
        .with_shoulder_width(args.shoulder_width)
        .with_hip_visibility(args.hip_visibility);

    let frames = std::iter::repeat_with(LandmarkFrame::empty)
        .take(args.empty_frames)
        .chain(curl_angles(args.reps, args.steps).into_iter().map(|angle| {
            let right = if args.left_only { 170.0 } else { angle };
            pose.with_elbow_angles(angle, right).to_frame()
        }));

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut written = 0u64;
    for (i, mut frame) in frames.enumerate() {
        frame.timestamp_ms = Some(i as u64 * args.interval_ms);
        serde_json::to_writer(&mut out, &frame).context("serializing frame")?;
        out.write_all(b"\n").context("writing frame")?;
        written += 1;
    }
    out.flush().context("flushing output")?;

    tracing::info!("Wrote {} frames ({} reps)", written, args.reps);
    Ok(())
}
