//! Timeline launcher.
//!
//! # Responsibility
//! - Resolve settings from the working directory and start logging.
//! - Open the active project (creating `default` on first run).
//! - Print the project's timeline.

use log::error;
use std::process::ExitCode;
use timeline_core::{
    init_logging, render_text, AppConfig, JsonProjectStore, ProjectRegistry, ProjectSession,
    TimelineFilter,
};

fn main() -> ExitCode {
    match run() {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            error!("event=launch module=cli status=error error={message}");
            eprintln!("timeline: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<String, String> {
    let working_dir =
        std::env::current_dir().map_err(|err| format!("cannot resolve working directory: {err}"))?;
    let defaults = AppConfig::for_working_dir(&working_dir);
    let config = AppConfig::load(defaults.projects_root).map_err(|err| err.to_string())?;

    // Logging failures are reported but never block the launch.
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("timeline: logging disabled: {err}");
    }

    let store = JsonProjectStore::new(&config.projects_root);
    let project = ProjectRegistry::new(&store)
        .bootstrap()
        .map_err(|err| err.to_string())?;
    let session = ProjectSession::new(&store, project, config.name_policy);

    let cards = session.timeline(&TimelineFilter::default());
    Ok(render_text(session.name(), &cards))
}
