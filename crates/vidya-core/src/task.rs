//! Study task model.
//!
//! A task is the unit of planning: a subject/name pair with a due date, an
//! estimate of hours left, and a coarse priority. The scheduler reads tasks
//! but never mutates them; the only mutation is [`Task::record_work_session`],
//! applied when a focus session completes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hours credited against a task by one completed work session.
pub const WORK_SESSION_HOURS: f64 = 0.5;

/// Coarse task priority, ordinal 1-3.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Priority {
    /// Numeric weight used by the scoring model.
    pub fn weight(self) -> f64 {
        self.ordinal() as f64
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(value: u8) -> Option<Self> {
        match value {
            1 => Some(Priority::Low),
            2 => Some(Priority::Medium),
            3 => Some(Priority::High),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// A study task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: Uuid,
    /// Subject the task belongs to (e.g. "Math")
    pub subject: String,
    /// Task name (e.g. "Chapter 4 problems")
    pub name: String,
    /// Calendar due date
    pub due_date: NaiveDate,
    /// Estimated hours left, half-hour granularity, never negative
    pub hours_remaining: f64,
    /// Coarse priority
    pub priority: Priority,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(
        subject: impl Into<String>,
        name: impl Into<String>,
        due_date: NaiveDate,
        hours_remaining: f64,
        priority: Priority,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: subject.into(),
            name: name.into(),
            due_date,
            hours_remaining,
            priority,
            created_at: Utc::now(),
        }
    }

    /// Display label, also used for agenda entries.
    pub fn label(&self) -> String {
        format!("{}: {}", self.subject, self.name)
    }

    /// A task with no hours left is complete and never scheduled.
    pub fn is_complete(&self) -> bool {
        self.hours_remaining <= 0.0
    }

    /// Credit one completed work session against the estimate.
    ///
    /// Decreases `hours_remaining` by half an hour, floored at zero.
    pub fn record_work_session(&mut self) {
        self.hours_remaining = (self.hours_remaining - WORK_SESSION_HOURS).max(0.0);
    }
}
