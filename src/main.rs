//! Moodboard replay tool.
//!
//! Replays a JSON script of host events against a headless board session
//! and writes any exports to a directory.
//!
//! ```text
//! moodboard <script.json> [out_dir]
//! ```

use anyhow::{Context, Result, bail};
use moodboard::export::DirectorySink;
use moodboard::script::Script;
use moodboard::settings::Settings;
use moodboard::BoardSession;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args_os().skip(1);
    let Some(script_path) = args.next().map(PathBuf::from) else {
        bail!("usage: moodboard <script.json> [out_dir]");
    };
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let script = Script::from_path(&script_path)
        .with_context(|| format!("failed to read script {}", script_path.display()))?;

    let settings = Settings::load();
    let mut session = BoardSession::new(settings);
    if let Some(dir) = script_path.parent() {
        session = session.with_image_dir(dir);
    }

    let mut sink = DirectorySink::new(&out_dir);
    let report = script.replay(&mut session, &mut sink);

    for toast in session.toasts().toasts() {
        info!(variant = ?toast.variant, "{} {}", toast.variant.icon(), toast.message);
    }
    if let Err(violation) = session.state().check_invariants() {
        warn!("Board invariant violated after replay: {}", violation);
    }
    session.perf().log_summary_if_slow();

    info!(
        steps = report.steps,
        changes = report.changes,
        exports = report.exports.len(),
        items = session.state().item_count(),
        "Replay finished"
    );
    println!("{}", serde_json::to_string_pretty(session.state().as_ref())?);
    Ok(())
}
