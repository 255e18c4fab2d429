use clap::Parser;
use curl_counter::adapters::{ConsoleRenderer, JsonLinesPoseSource, JsonRenderer};
use curl_counter::domain::model::Side;
use curl_counter::domain::ports::Renderer;
use curl_counter::utils::error::ErrorSeverity;
use curl_counter::utils::logger;
use curl_counter::utils::monitor::FrameMonitor;
use curl_counter::{
    CliConfig, OutputFormat, SessionController, SessionSummary, TrainerConfig, TrainerError,
    WorkoutEngine,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting curl-counter");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => exit_with(&e, "Configuration validation failed"),
    };

    let result = match cli.output {
        OutputFormat::Console => {
            let renderer = ConsoleRenderer::new(std::io::stdout().lock())
                .every_frame(config.display.render_every_frame)
                .ansi_colors(config.display.ansi_colors);
            run_session(&config, renderer).await
        }
        OutputFormat::Json => {
            let renderer =
                JsonRenderer::new(std::io::stdout().lock()).include_skeleton(!cli.no_skeleton);
            run_session(&config, renderer).await
        }
    };

    match result {
        Ok(summary) => {
            if cli.output == OutputFormat::Json {
                eprintln!("{}", serde_json::to_string(&summary)?);
            } else {
                println!(
                    "✅ Session finished: {} left reps, {} right reps ({} of {} frames active)",
                    summary.left.count, summary.right.count, summary.active_frames, summary.frames
                );
            }
            Ok(())
        }
        Err(e) => exit_with(&e, "Session failed"),
    }
}

async fn run_session<R: Renderer>(
    config: &TrainerConfig,
    renderer: R,
) -> curl_counter::Result<SessionSummary> {
    // resolve() has already checked the path is present.
    let input = config.input.path.as_deref().unwrap_or("-");
    let source = JsonLinesPoseSource::from_arg(input).await?;
    let monitor = FrameMonitor::new(config.monitoring.enabled)
        .with_log_interval(config.monitoring.log_interval_frames);

    let mut engine = WorkoutEngine::new(source, renderer, SessionController::from_config(config))
        .with_monitor(monitor)
        .with_max_frames(config.input.max_frames);

    let result = engine.run().await;
    if result.is_err() {
        let session = engine.session();
        eprintln!(
            "⚠️ Counted before the error: {} left reps, {} right reps",
            session.counter_state(Side::Left).count,
            session.counter_state(Side::Right).count
        );
    }
    result
}

fn exit_with(e: &TrainerError, context: &str) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
