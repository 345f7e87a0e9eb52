//! `TaskDeck` demo driver -- a shared board under synthetic peer traffic.
//!
//! Seeds the fixture board, drives a scripted or seeded-random peer feed
//! through the board's public entry points, then prints the column totals
//! and the resulting activity feed. Stale peer edits surface as conflicts
//! and are discarded.
//!
//! # Usage
//!
//! ```bash
//! # Run the default 12 random peer events
//! cargo run --bin taskdeck
//!
//! # More traffic, faster ticks, a fixed seed
//! cargo run --bin taskdeck -- --events 30 --tick-ms 50 --seed 42
//!
//! # Replay the fixed walkthrough script
//! cargo run --bin taskdeck -- --scripted
//! ```

use std::sync::Arc;

use clap::Parser;
use parking_lot::Mutex;
use taskdeck::Board;
use taskdeck::config::{DemoCliArgs, DemoConfig};
use taskdeck::demo;
use taskdeck::sim::{self, FeedStats, RandomPeer, ScriptedSource};
use taskdeck_model::task::TaskStatus;
use taskdeck_model::time::Timestamp;

#[tokio::main]
async fn main() {
    let cli = DemoCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match DemoConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        events = config.events,
        scripted = config.scripted,
        "starting taskdeck demo"
    );

    let board = match demo::demo_board(config.log_capacity) {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(error = %e, "failed to seed demo board");
            std::process::exit(1);
        }
    };
    let board = Arc::new(Mutex::new(board));

    let handle = if config.scripted {
        let script = demo::demo_script(&board.lock());
        sim::spawn_feed(Arc::clone(&board), ScriptedSource::new(script), config.tick)
    } else {
        let seed = config.seed.unwrap_or_else(|| Timestamp::now().as_millis());
        tracing::info!(seed, "running seeded random peer traffic");
        sim::spawn_feed(
            Arc::clone(&board),
            RandomPeer::new(seed, config.events),
            config.tick,
        )
    };

    let stats = match handle.await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!(error = %e, "peer feed task failed");
            std::process::exit(1);
        }
    };

    print_summary(&board.lock(), &config, stats);
}

/// Print the column totals, the activity feed, and the feed tally.
fn print_summary(board: &Board, config: &DemoConfig, stats: FeedStats) {
    println!();
    println!("Columns:");
    for status in TaskStatus::ALL {
        println!(
            "  {:<12} {:>2}",
            status.column_label(),
            board.tasks_by_status(status).len()
        );
    }

    println!();
    println!("Activity feed (newest first):");
    for entry in board.activities() {
        let when = format_timestamp_ms(entry.timestamp.as_millis(), &config.timestamp_format);
        if entry.task_title.is_empty() {
            println!("  [{when}] {} {}: {}", entry.actor, entry.action, entry.details);
        } else {
            println!(
                "  [{when}] {} {} \"{}\": {}",
                entry.actor, entry.action, entry.task_title, entry.details
            );
        }
    }

    println!();
    println!(
        "{} events: {} applied, {} conflicted, {} rejected",
        stats.total(),
        stats.applied,
        stats.conflicted,
        stats.rejected
    );
}

/// Format an epoch-millisecond timestamp with the configured chrono format.
fn format_timestamp_ms(ms: u64, format: &str) -> String {
    use chrono::{Local, TimeZone};
    let secs = (ms / 1000).cast_signed();
    let nsecs = u32::try_from((ms % 1000) * 1_000_000).unwrap_or(0);
    match Local.timestamp_opt(secs, nsecs) {
        chrono::LocalResult::Single(dt) => dt.format(format).to_string(),
        _ => "??:??".to_string(),
    }
}
