use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timer::TimerMode;

/// Every externally observable state change produces an Event.
///
/// The CLI prints them as JSON lines; they are also the user-notification
/// channel for presence-driven pauses and resumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        duration_secs: i64,
        task_id: Option<Uuid>,
        at: DateTime<Utc>,
    },
    /// `auto` distinguishes an absence-triggered pause from a manual one.
    TimerPaused {
        auto: bool,
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        duration_secs: i64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        at: DateTime<Utc>,
    },
    /// A work period finished; the timer has rolled into `break_mode`.
    /// The owner of the task list credits half an hour to `task_id`.
    WorkCompleted {
        task_id: Option<Uuid>,
        completed_work_sessions: u32,
        break_mode: TimerMode,
        at: DateTime<Utc>,
    },
    /// A break finished; the timer has stopped and the caller should
    /// refresh the current-task display.
    BreakCompleted {
        completed_work_sessions: u32,
        at: DateTime<Utc>,
    },
}
