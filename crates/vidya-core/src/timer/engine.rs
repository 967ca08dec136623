//! Focus timer state machine.
//!
//! The timer owns no threads and reads no clock for progress: the caller
//! invokes [`FocusTimer::tick`] once per elapsed second, and cancels the
//! tick source when the timer stops. Two invariants hold after every
//! transition: `paused => running` and `auto_paused => paused`.
//!
//! Invalid transition calls (pausing an idle timer, resuming an unpaused
//! one) are silent no-ops by contract, not errors.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::settings::{TimerSettings, TimerSnapshot};
use crate::events::Event;

/// Work sessions per cycle; every Nth completed session earns a long break.
pub const SESSIONS_PER_CYCLE: u32 = 4;

/// Current session kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Work,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub fn is_break(&self) -> bool {
        !matches!(self, TimerMode::Work)
    }
}

/// Work/break cycling timer with presence-aware pause state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimer {
    mode: TimerMode,
    remaining_secs: i64,
    total_secs: i64,
    running: bool,
    paused: bool,
    auto_paused: bool,
    completed_work_sessions: u32,
    /// Task credited when a work period completes. Set by the caller when
    /// a task is selected for the session.
    current_task_id: Option<Uuid>,
    settings: TimerSettings,
}

impl FocusTimer {
    /// Create an idle timer in work mode.
    pub fn new(settings: TimerSettings) -> Self {
        let total_secs = settings.secs_for(TimerMode::Work);
        Self {
            mode: TimerMode::Work,
            remaining_secs: total_secs,
            total_secs,
            running: false,
            paused: false,
            auto_paused: false,
            completed_work_sessions: 0,
            current_task_id: None,
            settings,
        }
    }

    /// Rebuild an idle timer from its persisted subset.
    pub fn from_snapshot(snapshot: TimerSnapshot) -> Self {
        let mut timer = Self::new(snapshot.settings);
        timer.completed_work_sessions = snapshot.completed_work_sessions;
        timer
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> i64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> i64 {
        self.total_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_auto_paused(&self) -> bool {
        self.auto_paused
    }

    pub fn completed_work_sessions(&self) -> u32 {
        self.completed_work_sessions
    }

    pub fn current_task_id(&self) -> Option<Uuid> {
        self.current_task_id
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// 0.0 .. 1.0 progress within the current period.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        (1.0 - self.remaining_secs as f64 / self.total_secs as f64).clamp(0.0, 1.0)
    }

    /// The persisted subset of this timer's state.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            completed_work_sessions: self.completed_work_sessions,
            settings: self.settings,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a fresh work session. Valid from any state.
    ///
    /// The caller (re)starts the presence detector and the tick source in
    /// response to the returned event.
    pub fn start(&mut self) -> Event {
        self.begin(TimerMode::Work);
        Event::TimerStarted {
            mode: self.mode,
            duration_secs: self.total_secs,
            task_id: self.current_task_id,
            at: Utc::now(),
        }
    }

    /// Pause the current period. `auto` marks an absence-triggered pause,
    /// eligible for automatic resume; a manual pause is not.
    pub fn pause(&mut self, auto: bool) -> Option<Event> {
        if !self.running || self.paused {
            return None;
        }
        self.paused = true;
        self.auto_paused = auto;
        Some(Event::TimerPaused {
            auto,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if !self.running || !self.paused {
            return None;
        }
        self.paused = false;
        self.auto_paused = false;
        Some(Event::TimerResumed {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Restart the current period from its configured length.
    ///
    /// In a break, the break length is re-chosen from the session count.
    /// The pause flag is left untouched; an unpaused timer keeps ticking
    /// from the full duration.
    pub fn reset(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        if self.mode.is_break() {
            self.mode = self.break_mode();
        }
        self.total_secs = self.settings.secs_for(self.mode);
        self.remaining_secs = self.total_secs;
        Some(Event::TimerReset {
            mode: self.mode,
            duration_secs: self.total_secs,
            at: Utc::now(),
        })
    }

    /// Stop unconditionally: back to an idle work-mode timer.
    ///
    /// The caller stops the presence detector, cancels the tick source,
    /// and persists in response to the returned event.
    pub fn stop(&mut self) -> Event {
        self.running = false;
        self.paused = false;
        self.auto_paused = false;
        self.mode = TimerMode::Work;
        self.total_secs = self.settings.secs_for(TimerMode::Work);
        self.remaining_secs = self.total_secs;
        Event::TimerStopped { at: Utc::now() }
    }

    /// Advance one second. Invoked by the caller's tick source; a paused
    /// or idle timer ignores the call.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running || self.paused {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs <= 0 {
            return Some(self.finish_period());
        }
        None
    }

    /// Replace the session lengths. An idle timer also refreshes its
    /// displayed work duration; a running one keeps the current period
    /// and picks up the new lengths from the next session.
    pub fn set_settings(&mut self, settings: TimerSettings) {
        self.settings = settings;
        if !self.running {
            self.mode = TimerMode::Work;
            self.total_secs = self.settings.secs_for(TimerMode::Work);
            self.remaining_secs = self.total_secs;
        }
    }

    /// Select the task credited by completed work sessions.
    pub fn set_current_task(&mut self, task_id: Option<Uuid>) {
        self.current_task_id = task_id;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn begin(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.running = true;
        self.paused = false;
        self.auto_paused = false;
        self.total_secs = self.settings.secs_for(mode);
        self.remaining_secs = self.total_secs;
    }

    fn break_mode(&self) -> TimerMode {
        if self.completed_work_sessions % SESSIONS_PER_CYCLE == 0 {
            TimerMode::LongBreak
        } else {
            TimerMode::ShortBreak
        }
    }

    fn finish_period(&mut self) -> Event {
        if self.mode == TimerMode::Work {
            self.completed_work_sessions += 1;
            let task_id = self.current_task_id;
            let break_mode = self.break_mode();
            self.begin(break_mode);
            Event::WorkCompleted {
                task_id,
                completed_work_sessions: self.completed_work_sessions,
                break_mode,
                at: Utc::now(),
            }
        } else {
            self.stop();
            Event::BreakCompleted {
                completed_work_sessions: self.completed_work_sessions,
                at: Utc::now(),
            }
        }
    }
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}
