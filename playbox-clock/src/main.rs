//! playbox-clock - Live clock with a stopwatch in the terminal

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use futures::StreamExt;
use libplaybox::clock::{ClockScreenState, StopwatchState};
use libplaybox::PlayboxService;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "playbox-clock")]
#[command(version, about = "Live clock with a stopwatch")]
#[command(long_about = r#"Print the clock every time it ticks. Press Enter to start or stop the stopwatch.

EXAMPLES:
    # Run until Ctrl-C
    playbox-clock

    # Ten seconds of JSON lines
    playbox-clock --format json --duration 10s

    # Resume a stopwatch started at a known instant (epoch milliseconds)
    playbox-clock --started-at 1704460029500

CONFIGURATION:
    Tick intervals come from the [clock] section of the config file
    ($PLAYBOX_CONFIG or ~/.config/playbox/config.toml).
"#)]
struct Args {
    /// Output format
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    #[arg(value_parser = ["text", "json"])]
    format: String,

    /// Stop after this long (e.g. "5s", "2m")
    #[arg(short, long, value_name = "DURATION")]
    #[arg(value_parser = humantime::parse_duration)]
    duration: Option<Duration>,

    /// Start with a stopwatch already running since this epoch millisecond
    #[arg(long, value_name = "MILLIS")]
    started_at: Option<i64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn render_text(state: &ClockScreenState) -> String {
    let clock = &state.clock;
    let mut line = format!(
        "{} {} {}:{}:{}",
        clock.weekday, clock.day_month, clock.hour, clock.minute, clock.second
    );

    if let Some(ref elapsed) = state.elapsed {
        let status = match state.stopwatch {
            StopwatchState::Started { .. } => "running",
            _ => "stopped",
        };
        line.push_str(&format!(" | stopwatch {} ({})", elapsed, status));
    }

    line
}

fn render(state: &ClockScreenState, format: &str) -> Result<String> {
    match format {
        "json" => serde_json::to_string(state).context("Failed to serialize clock state"),
        _ => Ok(render_text(state)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    libplaybox::logging::init_default(args.verbose);

    tracing::debug!("playbox-clock started with args: {:?}", args);

    let service = PlayboxService::new().context("Failed to load configuration")?;
    let mut engine = service
        .clock_engine()
        .context("Invalid clock configuration")?;
    if let Some(started_at) = args.started_at {
        engine = engine.with_stopwatch(StopwatchState::Started { started_at });
    }

    let handle = engine.spawn();
    let mut states = Box::pin(handle.states());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let deadline = async {
        match args.duration {
            Some(duration) => tokio::time::sleep(duration).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(deadline);

    // Registered once; stays armed across loop iterations
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            state = states.next() => match state {
                // Placeholder until the first tick lands
                Some(state) if state.clock.weekday.is_empty() => {}
                Some(state) => println!("{}", render(&state, &args.format)?),
                None => break,
            },
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(_)) => {
                    handle.toggle();
                }
                Ok(None) => stdin_open = false,
                Err(e) => {
                    tracing::warn!("stdin closed: {}", e);
                    stdin_open = false;
                }
            },
            _ = &mut deadline => break,
            _ = &mut ctrl_c => break,
        }
    }

    handle.cancel();
    Ok(())
}
