// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use chrono::{Duration, NaiveDate};
use common::{NewTask, Priority, SUGGESTED_CATEGORIES, Task};

use crate::error::ClientError;

/// Unsaved form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drafts {
    pub description: String,
    /// Empty means "no category".
    pub category: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

impl Drafts {
    /// The creation request for the current input, or `None` when the
    /// description is blank and nothing must be sent.
    pub fn submission(&self) -> Option<NewTask> {
        if self.description.trim().is_empty() {
            return None;
        }

        Some(NewTask {
            description: self.description.clone(),
            category: Some(self.category.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            priority: self.priority.value(),
            due_date: self.due_date,
        })
    }

    /// Moves through "no category" followed by the suggested categories.
    /// A free-form value not in the list restarts the cycle.
    pub fn cycle_category(&mut self, forward: bool) {
        let options: Vec<&str> = std::iter::once("")
            .chain(SUGGESTED_CATEGORIES.iter().copied())
            .collect();
        let len = options.len();
        let next = match options.iter().position(|c| *c == self.category) {
            Some(idx) if forward => (idx + 1) % len,
            Some(idx) => (idx + len - 1) % len,
            None if forward => 1,
            None => len - 1,
        };
        self.category = options[next].to_string();
    }

    /// Date picker step. An empty picker starts from `today`.
    pub fn step_due_date(&mut self, days: i64, today: NaiveDate) {
        self.due_date = Some(match self.due_date {
            None => today,
            Some(current) => current
                .checked_add_signed(Duration::days(days))
                .unwrap_or(current),
        });
    }

    pub fn clear_due_date(&mut self) {
        self.due_date = None;
    }
}

/// The finished round trip, ready to be folded into the board.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Loaded(Vec<Task>),
    Created(Task),
    Toggled { id: i64, task: Task },
    Deleted(i64),
    Failed(ClientError),
}

/// Everything the screen shows: the cached tasks, in server order, and the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskBoard {
    pub tasks: Vec<Task>,
    pub drafts: Drafts,
}

impl TaskBoard {
    /// Folds one outcome into the board. A failure leaves it untouched.
    pub fn apply(self, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Loaded(tasks) => self.with_loaded(tasks),
            Outcome::Created(task) => self.with_created(task),
            Outcome::Toggled { id, task } => self.with_toggled(id, task),
            Outcome::Deleted(id) => self.with_deleted(id),
            Outcome::Failed(_) => self,
        }
    }

    /// The fetched collection replaces the local one.
    pub fn with_loaded(self, tasks: Vec<Task>) -> Self {
        Self { tasks, ..self }
    }

    /// Appends the created task and resets the form.
    pub fn with_created(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self.drafts = Drafts::default();
        self
    }

    /// Swaps in the server's copy for every entry carrying `id`.
    pub fn with_toggled(mut self, id: i64, task: Task) -> Self {
        for existing in self.tasks.iter_mut().filter(|t| t.id == id) {
            *existing = task.clone();
        }
        self
    }

    pub fn with_deleted(mut self, id: i64) -> Self {
        self.tasks.retain(|t| t.id != id);
        self
    }

    pub fn find(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }
}
