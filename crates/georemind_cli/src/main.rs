//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `georemind_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use georemind_core::{core_version, init_logging, open_repository, CoreConfig, ReminderDataSource};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("georemind_cli error={err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    let config = CoreConfig::from_env().map_err(|err| err.to_string())?;

    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(config.log_level.as_str(), &log_dir.to_string_lossy())?;
    }

    println!("georemind_core version={}", core_version());
    println!("georemind_core db_path={}", config.db_path.display());

    let repository = open_repository(&config.db_path).map_err(|err| err.to_string())?;
    let reminders = repository
        .get_reminders()
        .await
        .map_err(|err| err.to_string())?;
    println!("georemind_core reminders={}", reminders.len());
    Ok(())
}
