//! tasklist TUI
//!
//! Terminal user interface for the task list.
//!
//! ## Layout
//!
//! - Title line
//! - Error line (only while the error slot is set)
//! - New-task form ("Task: ...")
//! - Task list with checkboxes
//! - Status bar
//!
//! ## Navigation
//!
//! - j/k or ↑/↓: Move selection up/down
//! - gg / G: First / last task
//! - space, x, Enter: Toggle done
//! - d, Delete: Delete task
//! - a, i: Write a new task, Enter to add, Esc to stop
//! - ?: Help
//! - q, Ctrl-C: Quit
//!
//! Requests run on spawned tasks and report back over a channel, so the list
//! stays responsive while the server is slow. Responses are applied in the
//! order they arrive.

mod app;
mod ui;

use std::fs::{self, File};
use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tasklist_core::{Completion, Config, Request, TaskClient};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;

/// Run the TUI application
pub async fn run(config: Config) -> Result<()> {
    // Initialize TUI logging (file-based, only if TASKLIST_LOG is set)
    init_tui_logging(&config);

    let client = TaskClient::new(&config.server_url)?;
    let (tx, rx) = mpsc::unbounded_channel();

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new();

    // Initial load
    let load = app.list.load();
    dispatch(&mut app, &client, &tx, load);

    // Run app
    let result = run_app(&mut terminal, &mut app, &client, &tx, rx).await;

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

/// Send a request in the background; its completion comes back on `tx`
fn dispatch(
    app: &mut App,
    client: &TaskClient,
    tx: &mpsc::UnboundedSender<Completion>,
    request: Request,
) {
    app.dispatched(&request);

    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let completion = request.send(&client).await;
        // Receiver is gone once the app quits
        let _ = tx.send(completion);
    });
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &TaskClient,
    tx: &mpsc::UnboundedSender<Completion>,
    mut rx: mpsc::UnboundedReceiver<Completion>,
) -> Result<()> {
    loop {
        // Check for status message timeout
        app.check_status_timeout();

        // Draw UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        tokio::select! {
            biased;

            // Finished requests, applied in arrival order
            Some(completion) = rx.recv() => {
                app.complete(completion);
            }

            // Poll for terminal events
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                // Check for terminal events (non-blocking)
                if event::poll(std::time::Duration::from_millis(0))? {
                    if let Event::Key(key) = event::read()? {
                        // Only handle key press events (not release)
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }

                        if let Some(request) = app.handle_key(key.code, key.modifiers) {
                            dispatch(app, client, tx, request);
                        }
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Initialize logging for TUI mode
///
/// Only initializes if TASKLIST_LOG environment variable is set.
/// Logs to file (config.log_file or default {data_local_dir}/tasklist/debug.log).
fn init_tui_logging(config: &Config) {
    let Ok(log_level) = std::env::var("TASKLIST_LOG") else {
        return;
    };

    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "tasklist_core={},tasklist_cli={}",
        log_level, log_level
    ));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}
