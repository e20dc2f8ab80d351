// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Categories offered by the form selector.
/// The server accepts any text, so this list is a suggestion, not a closed set.
pub const SUGGESTED_CATEGORIES: [&str; 4] = ["Personal", "Work", "Shopping", "Others"];

#[allow(clippy::doc_overindented_list_items)]
/// Represents a task as owned by the task service.
///
/// The client only ever holds a copy of what the server last returned:
/// - `id`, `completed` and `date_created` are assigned by the server.
/// - `category` and `due_date` are optional and come back as `null` when unset.
/// - `priority` is kept verbatim, even outside the 1..=3 range the form offers,
///    so that a task is never rewritten locally.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,

    pub description: String,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default = "default_priority")]
    pub priority: i32,

    #[serde(default)]
    pub completed: bool,

    #[serde(deserialize_with = "timestamp")]
    pub date_created: NaiveDateTime,

    // Some backends answer with a bare date, others with a date-time at midnight.
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub due_date: Option<NaiveDateTime>,
}

impl Task {
    /// Human readable priority, falling back to the raw number for unknown values.
    pub fn priority_label(&self) -> String {
        match Priority::from_value(self.priority) {
            Some(priority) => priority.label().to_string(),
            None => self.priority.to_string(),
        }
    }
}

/// Body of the creation request.
/// Absent optional fields are left out of the JSON entirely rather than
/// being sent as `null` or as an empty string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default = "default_priority")]
    pub priority: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// The three priority levels offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    #[default]
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Wire value (1, 2 or 3).
    pub fn value(self) -> i32 {
        self as i32
    }

    pub fn from_value(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.value() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Next level, wrapping from High back to Low.
    pub fn next(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Priority::Low => Priority::High,
            Priority::Medium => Priority::Low,
            Priority::High => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn default_priority() -> i32 {
    Priority::default().value()
}

/// Parses the timestamp shapes a task service is known to produce:
/// `2025-01-01T10:20:30(.ffffff)`, RFC 3339 with an offset, or a bare `2025-01-01`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    raw.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_local())
        })
        .or_else(|| {
            raw.parse::<NaiveDate>()
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

fn timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}"))),
    }
}
