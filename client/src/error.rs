// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use std::fmt;

use tracing::error;

/// The round trip a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Toggle(i64),
    Delete(i64),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Load => write!(f, "load tasks"),
            Operation::Create => write!(f, "create task"),
            Operation::Toggle(id) => write!(f, "toggle task {id}"),
            Operation::Delete(id) => write!(f, "delete task {id}"),
        }
    }
}

/// A failed round trip.
///
/// Network errors, non-2xx answers and undecodable bodies all end up here:
/// the client only distinguishes "it worked" from "it did not".
#[derive(Debug, Clone, PartialEq)]
pub struct ClientError {
    pub operation: Operation,
    pub message: String,
}

impl ClientError {
    pub fn new(operation: Operation, message: &str) -> Self {
        Self {
            operation,
            message: message.to_string(),
        }
    }
}

/// Keeps the whole context chain of the `anyhow::Error` coming from `api.rs`.
impl From<(Operation, anyhow::Error)> for ClientError {
    fn from((operation, err): (Operation, anyhow::Error)) -> Self {
        Self {
            operation,
            message: format!("{err:#}"),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to {}: {}", self.operation, self.message)
    }
}

impl std::error::Error for ClientError {}

/// Where failed round trips are reported.
/// Nothing reported here is ever shown to the user.
pub trait FailureHandler {
    fn report(&mut self, error: &ClientError);
}

/// Default policy: write the failure to the diagnostic log and move on.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFailures;

impl FailureHandler for LogFailures {
    fn report(&mut self, err: &ClientError) {
        error!("{}", err);
    }
}
