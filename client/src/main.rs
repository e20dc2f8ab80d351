// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use client::api::HttpTaskApi;
use client::app::App;
use client::config::Config;
use client::error::LogFailures;
use client::terminal::{TerminalGuard, run_event_loop};
use crossterm::{
    cursor,
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc::{self, UnboundedReceiver};

// Everything runs on one thread; network calls only suspend their own task.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {:?}", e);
            std::process::exit(1);
        }
    };

    // The terminal belongs to the UI, so diagnostics go to a file.
    if let Err(e) = init_tracing(&config.log_file) {
        eprintln!("Failed to set up logging: {:?}", e);
        std::process::exit(1);
    }

    tracing::info!("Starting up the task list client against {}", config.api_url);

    if let Err(e) = run(&config).await {
        tracing::error!("The client stopped with an error: {:?}", e);
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }

    tracing::info!("Client closed.");
}

fn init_tracing(log_file: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    Ok(())
}

async fn run(config: &Config) -> Result<()> {
    let api = HttpTaskApi::new(&config.api_url)?;
    let (mut app, mut outcomes) = App::new(api, LogFailures);

    enable_raw_mode().context("Failed to enable raw mode")?;
    // Dropped last, so the terminal is restored on every way out of here
    let _restore = TerminalGuard::new(restore_terminal);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut events = spawn_input_reader();
    app.spawn_load();

    run_event_loop(&mut terminal, &mut app, &mut events, &mut outcomes).await
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        tracing::error!("Failed to disable raw mode: {:?}", e);
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show) {
        tracing::error!("Failed to leave alternate screen: {:?}", e);
    }
}

/// Reads terminal events on a dedicated thread so that a blocking read
/// never stalls the requests in flight.
fn spawn_input_reader() -> UnboundedReceiver<Event> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to read terminal event: {:?}", e);
                    break;
                }
            }
        }
    });
    rx
}
