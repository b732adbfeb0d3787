use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use rfm_companion::conversation::views::to_percent;
use rfm_companion::{Companion, CompanionConfig, SubmitError};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    // 2. Config (optional JSON path as the only argument)
    let config = match std::env::args().nth(1) {
        Some(path) => CompanionConfig::load(&path)
            .with_context(|| format!("loading config from {path}"))?,
        None => CompanionConfig::default(),
    };
    let name = config.persona_name.clone();
    let companion = Companion::new(config);

    println!("RFM Companion ({name}). Type something to begin, or 'exit' to quit.");

    // 3. Console loop
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.eq_ignore_ascii_case("exit") || text.eq_ignore_ascii_case("quit") {
            break;
        }

        let submission = match companion.submit(text).await {
            Ok(submission) => submission,
            Err(SubmitError::Empty) => continue,
            Err(SubmitError::Busy) => {
                println!("(still thinking...)");
                continue;
            }
        };

        match submission.await {
            Ok(entry) => {
                println!("{name}: {}", entry.response);
                println!(
                    "   tone: {}  intensity: {}%",
                    entry.tone.dominant_tone,
                    to_percent(entry.tone.intensity)
                );
            }
            Err(e) => tracing::error!("Analysis failed: {}", e),
        }
    }

    // 4. Session summary
    match companion.export_session("session").await {
        Ok(Some(path)) => println!("Session exported to {}", path.display()),
        Ok(None) => {}
        Err(e) => tracing::warn!("Session export failed: {}", e),
    }

    let snap = companion.telemetry().await;
    println!(
        "Goodbye. {} conversations, {} rejected, avg latency {:.0}ms, {} field shifts.",
        snap.completed,
        snap.rejected_busy + snap.rejected_empty,
        snap.avg_latency_ms,
        snap.shift_stats.total()
    );
    tracing::info!(session_id = %companion.session_id(), "Session closed");
    Ok(())
}
