//! Replay entry point.
//!
//! Usage: `stickyboard-replay <script.json>`. Prints one JSON line per
//! committed gesture. Set `RUST_LOG=debug` to trace gesture handling.

use std::path::PathBuf;
use std::process::ExitCode;
use stickyboard_replay::{load_script, run_script};

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: stickyboard-replay <script.json>");
        return ExitCode::from(2);
    };
    log::info!("Replaying {}", path.display());

    let commits = match load_script(&path).and_then(|script| run_script(&script)) {
        Ok(commits) => commits,
        Err(e) => {
            log::error!("Replay failed: {}", e);
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    for commit in &commits {
        match serde_json::to_string(commit) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                log::error!("Failed to serialize commit: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    log::info!("{} gesture(s) committed", commits.len());
    ExitCode::SUCCESS
}
