mod render;

use chrono::{Local, NaiveTime};
use clap::Parser;
use dpsmeter_core::{Analyzer, AppConfig, LogTail, read_log_file};
use std::path::PathBuf;
use std::time::Instant;
use tokio::time::{Duration, sleep};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "live combat log damage meter")]
struct Cli {
    /// Combat log file to tail (falls back to the configured default)
    file: Option<PathBuf>,

    /// Look-back span for damage-per-second, in seconds
    #[arg(long)]
    window_secs: Option<u64>,

    /// Delay between file polls, in milliseconds
    #[arg(long)]
    poll_ms: Option<u64>,

    /// Minimum delay between status-line redraws, in milliseconds
    #[arg(long)]
    refresh_ms: Option<u64>,

    /// Replay existing file content through the meter before tailing
    #[arg(long)]
    from_start: bool,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load();

    let path = cli
        .file
        .or_else(|| config.log_file.as_ref().map(PathBuf::from))
        .ok_or("error: no log file given and none configured")?;
    let window_secs = cli.window_secs.unwrap_or(config.window_secs);
    let poll_interval = Duration::from_millis(cli.poll_ms.unwrap_or(config.poll_interval_ms));
    let refresh_interval =
        Duration::from_millis(cli.refresh_ms.unwrap_or(config.refresh_interval_ms));

    // When replaying, lines are typically earlier in the day than the
    // moment the meter started; anchor the parser at midnight so same-day
    // history never trips the midnight rollover and lands on tomorrow.
    let now = Local::now().naive_local();
    let session_date = if cli.from_start {
        now.date().and_time(NaiveTime::MIN)
    } else {
        now
    };
    let mut analyzer = Analyzer::new(chrono::Duration::seconds(window_secs as i64));

    // Catch up on existing content before switching to live tailing
    let mut tail = if cli.from_start {
        let (events, end_pos) =
            read_log_file(&path, session_date).map_err(|e| e.to_string())?;
        info!(count = events.len(), "replayed existing events");
        for event in &events {
            analyzer.tick(Some(event), event.timestamp);
        }
        LogTail::from_offset(&path, session_date, end_pos)
            .await
            .map_err(|e| e.to_string())?
    } else {
        LogTail::from_end(&path, session_date)
            .await
            .map_err(|e| e.to_string())?
    };

    let mut last_draw: Option<Instant> = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            polled = tail.poll() => {
                let event = polled.map_err(|e| e.to_string())?;
                let now = Local::now().naive_local();
                analyzer.tick(event.as_ref(), now);

                // redraw throttle lives here, not in the meter
                if last_draw.map_or(true, |t| t.elapsed() >= refresh_interval) {
                    render::draw(analyzer.snapshot()).map_err(|e| e.to_string())?;
                    last_draw = Some(Instant::now());
                }

                // only sleep when the file had nothing new; drain fast otherwise
                if event.is_none() {
                    sleep(poll_interval).await;
                }
            }
        }
    }

    println!();
    Ok(())
}
