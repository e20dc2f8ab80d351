// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use anyhow::{Result, bail};
use crossterm::event::Event;
use ratatui::{Terminal, backend::Backend};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::api::TaskApi;
use crate::app::App;
use crate::error::FailureHandler;
use crate::state::Outcome;
use crate::{input, ui};

/// Runs `restore` when dropped, so the terminal is put back on every exit path,
/// including setup steps that fail halfway.
pub struct TerminalGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> TerminalGuard<F> {
    pub fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

/// Redraws, then waits for either a terminal event or a finished round trip.
///
/// Returns `Ok(())` when a key asks to quit, and an error once the input
/// channel is closed, since nothing could stop the loop after that.
pub async fn run_event_loop<B, A, H>(
    terminal: &mut Terminal<B>,
    app: &mut App<A, H>,
    events: &mut UnboundedReceiver<Event>,
    outcomes: &mut UnboundedReceiver<Outcome>,
) -> Result<()>
where
    B: Backend,
    A: TaskApi,
    H: FailureHandler,
{
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    bail!("Terminal input closed");
                };
                if let Event::Key(key) = event {
                    if let Some(command) = input::map_key(app.focus, key) {
                        if !app.execute(command) {
                            return Ok(());
                        }
                    }
                }
            }
            // Answers are applied in arrival order, not request order.
            Some(outcome) = outcomes.recv() => app.receive(outcome),
        }
    }
}
