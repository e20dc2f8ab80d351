// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use std::future::Future;

use chrono::Local;
use common::{NewTask, Task};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::api::TaskApi;
use crate::error::{FailureHandler, Operation};
use crate::input::Command;
use crate::state::{Outcome, TaskBoard};

/// Which part of the screen receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Category,
    Priority,
    DueDate,
    #[default]
    Description,
    AddButton,
    TaskList,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::Category,
        Focus::Priority,
        Focus::DueDate,
        Focus::Description,
        Focus::AddButton,
        Focus::TaskList,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.index() + len - 1) % len]
    }
}

/// The task list client: the board, the view around it, and the service it mirrors.
///
/// Round trips come in two flavours. The `*_task`/`load_all` methods await the
/// answer and apply it on the spot. The `spawn_*` methods fire the request in
/// its own task and hand the outcome back through the channel returned by
/// [`App::new`]; the event loop feeds those to [`App::receive`] in whatever
/// order they arrive.
pub struct App<A: TaskApi, H: FailureHandler> {
    api: A,
    failures: H,
    outcomes: UnboundedSender<Outcome>,
    pub board: TaskBoard,
    pub focus: Focus,
    /// Highlighted row of the task list.
    pub selected: usize,
    /// Spawned round trips that have not answered yet.
    pub pending: usize,
}

impl<A: TaskApi, H: FailureHandler> App<A, H> {
    pub fn new(api: A, failures: H) -> (Self, UnboundedReceiver<Outcome>) {
        let (outcomes, receiver) = mpsc::unbounded_channel();
        let app = Self {
            api,
            failures,
            outcomes,
            board: TaskBoard::default(),
            focus: Focus::default(),
            selected: 0,
            pending: 0,
        };
        (app, receiver)
    }

    pub fn failure_handler(&self) -> &H {
        &self.failures
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.board.tasks.get(self.selected)
    }

    /// The creation request for the form, or `None` when the description is blank.
    fn pending_submission(&self) -> Option<NewTask> {
        let submission = self.board.drafts.submission();
        if submission.is_none() {
            debug!("Ignoring task with a blank description.");
        }
        submission
    }

    pub async fn load_all(&mut self) {
        let outcome = load_round_trip(self.api.clone()).await;
        self.apply(outcome);
    }

    /// Returns `false` without sending anything when the description is blank.
    pub async fn add_task(&mut self) -> bool {
        let Some(new_task) = self.pending_submission() else {
            return false;
        };
        let outcome = create_round_trip(self.api.clone(), new_task).await;
        self.apply(outcome);
        true
    }

    pub async fn toggle_task(&mut self, id: i64) {
        let outcome = toggle_round_trip(self.api.clone(), id).await;
        self.apply(outcome);
    }

    pub async fn delete_task(&mut self, id: i64) {
        let outcome = delete_round_trip(self.api.clone(), id).await;
        self.apply(outcome);
    }

    pub fn spawn_load(&mut self) {
        self.spawn(load_round_trip(self.api.clone()));
    }

    /// Same blank guard as [`App::add_task`].
    pub fn spawn_add(&mut self) -> bool {
        let Some(new_task) = self.pending_submission() else {
            return false;
        };
        self.spawn(create_round_trip(self.api.clone(), new_task));
        true
    }

    pub fn spawn_toggle(&mut self, id: i64) {
        self.spawn(toggle_round_trip(self.api.clone(), id));
    }

    pub fn spawn_delete(&mut self, id: i64) {
        self.spawn(delete_round_trip(self.api.clone(), id));
    }

    fn spawn<F>(&mut self, round_trip: F)
    where
        F: Future<Output = Outcome> + Send + 'static,
    {
        self.pending += 1;
        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            // The receiver is gone only when the client is shutting down.
            let _ = outcomes.send(round_trip.await);
        });
    }

    /// Applies an outcome coming back from a spawned round trip.
    pub fn receive(&mut self, outcome: Outcome) {
        self.pending = self.pending.saturating_sub(1);
        self.apply(outcome);
    }

    /// Folds an outcome into the board. Failures only reach the failure handler.
    pub fn apply(&mut self, outcome: Outcome) {
        if let Outcome::Failed(err) = &outcome {
            self.failures.report(err);
        }
        self.board = std::mem::take(&mut self.board).apply(outcome);
        self.selected = self.selected.min(self.board.tasks.len().saturating_sub(1));
    }

    /// Runs a key command. Returns `false` when the client should exit.
    pub fn execute(&mut self, command: Command) -> bool {
        let drafts = &mut self.board.drafts;
        match command {
            Command::Quit => return false,
            Command::FocusNext => self.focus = self.focus.next(),
            Command::FocusPrevious => self.focus = self.focus.previous(),
            Command::Submit => {
                self.spawn_add();
            }
            Command::InsertChar(c) => drafts.description.push(c),
            Command::Backspace => {
                drafts.description.pop();
            }
            Command::CycleCategory { forward } => drafts.cycle_category(forward),
            Command::CyclePriority { forward } => {
                drafts.priority = if forward {
                    drafts.priority.next()
                } else {
                    drafts.priority.previous()
                };
            }
            Command::SetPriority(priority) => drafts.priority = priority,
            Command::StepDueDate(days) => drafts.step_due_date(days, Local::now().date_naive()),
            Command::ClearDueDate => drafts.clear_due_date(),
            Command::SelectPrevious => self.selected = self.selected.saturating_sub(1),
            Command::SelectNext => {
                if self.selected + 1 < self.board.tasks.len() {
                    self.selected += 1;
                }
            }
            Command::ToggleSelected => {
                if let Some(id) = self.selected_task().map(|t| t.id) {
                    self.spawn_toggle(id);
                }
            }
            Command::DeleteSelected => {
                if let Some(id) = self.selected_task().map(|t| t.id) {
                    self.spawn_delete(id);
                }
            }
        }
        true
    }
}

async fn load_round_trip<A: TaskApi>(api: A) -> Outcome {
    match api.list().await {
        Ok(tasks) => Outcome::Loaded(tasks),
        Err(err) => Outcome::Failed((Operation::Load, err).into()),
    }
}

async fn create_round_trip<A: TaskApi>(api: A, new_task: NewTask) -> Outcome {
    match api.create(new_task).await {
        Ok(task) => Outcome::Created(task),
        Err(err) => Outcome::Failed((Operation::Create, err).into()),
    }
}

async fn toggle_round_trip<A: TaskApi>(api: A, id: i64) -> Outcome {
    match api.toggle(id).await {
        Ok(task) => Outcome::Toggled { id, task },
        Err(err) => Outcome::Failed((Operation::Toggle(id), err).into()),
    }
}

async fn delete_round_trip<A: TaskApi>(api: A, id: i64) -> Outcome {
    match api.delete(id).await {
        Ok(()) => {
            info!("Removing task {} from the list.", id);
            Outcome::Deleted(id)
        }
        Err(err) => Outcome::Failed((Operation::Delete(id), err).into()),
    }
}
