//! glossary-tui - Browse an investment glossary in the terminal
//!
//! This is the main entry point for the glossary-tui application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod cli;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::cli::{Cli, Command};
use crate::component::Component;
use crate::config::Config;
use crate::model::Dataset;
use crate::services::DatasetError;
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();

    let log_path = cli.log_file.clone().or_else(|| config.log_path());
    if let Some(path) = log_path {
        if let Err(e) = logging::init(&path, &config.log_level) {
            eprintln!("Warning: logging disabled: {:#}", e);
        }
    }

    let data_path = cli
        .data
        .clone()
        .or_else(|| config.dataset_path.as_ref().map(PathBuf::from));

    match cli.command {
        Some(Command::Import {
            input,
            output,
            existing,
        }) => {
            let summary = services::import_file(&input, existing.as_deref(), &output)?;
            println!(
                "Added {} new terms; wrote {} entries to {}",
                summary.added,
                summary.total,
                output.display()
            );
            Ok(())
        }
        Some(Command::Search {
            text,
            initial,
            page,
        }) => {
            let dataset = match data_path {
                Some(path) => services::load_file(&path)
                    .with_context(|| format!("Failed to load dataset {}", path.display()))?,
                None => services::load_bundled()?,
            };
            let query = cli::search_query(&dataset, text.as_deref(), initial.as_deref(), page)?;
            let stdout = std::io::stdout();
            cli::print_results(&mut stdout.lock(), &dataset, &query)
        }
        None => {
            let (dataset, load_error) = load_dataset(data_path.as_deref())?;
            let show_splash = config.show_splash && !cli.no_splash;
            run_tui(App::new(dataset, show_splash).with_error(load_error))
        }
    }
}

/// Load the dataset for the interactive UI
///
/// A broken dataset file falls back to the bundled glossary; the error is
/// returned for display instead of aborting.
fn load_dataset(path: Option<&Path>) -> Result<(Dataset, Option<String>)> {
    let Some(path) = path else {
        return Ok((services::load_bundled()?, None));
    };

    match services::load_file(path) {
        Ok(dataset) => {
            tracing::info!(path = %path.display(), entries = dataset.len(), "dataset loaded");
            Ok((dataset, None))
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "dataset failed to load");
            Ok((services::load_bundled()?, Some(fallback_message(path, &e))))
        }
    }
}

fn fallback_message(path: &Path, error: &DatasetError) -> String {
    match error {
        // Io already names the path
        DatasetError::Io { .. } => format!("{} (showing bundled glossary)", error),
        _ => format!("{}: {} (showing bundled glossary)", path.display(), error),
    }
}

fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    app.init()?;
    tracing::info!(
        source = app.domain.dataset.source(),
        entries = app.domain.dataset.len(),
        "glossary started"
    );

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!(error = %err, "fatal error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                tracing::trace!(action = %a, "update");
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick for time-based updates
            let mut current_action = app.update(Action::Tick)?;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        }
    }

    tracing::info!("glossary closed");
    Ok(())
}
