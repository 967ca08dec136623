use serde::{Deserialize, Serialize};

use super::engine::TimerMode;

/// User-configurable session lengths, in minutes. Each must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    pub work_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
        }
    }
}

impl TimerSettings {
    /// Configured length of `mode`, in seconds.
    pub fn secs_for(&self, mode: TimerMode) -> i64 {
        let minutes = match mode {
            TimerMode::Work => self.work_minutes,
            TimerMode::ShortBreak => self.short_break_minutes,
            TimerMode::LongBreak => self.long_break_minutes,
        };
        i64::from(minutes) * 60
    }
}

/// The persisted subset of timer state.
///
/// Session-volatile fields (remaining time, running/paused flags) are
/// deliberately absent: the timer always reloads idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub completed_work_sessions: u32,
    pub settings: TimerSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lengths() {
        let s = TimerSettings::default();
        assert_eq!(s.secs_for(TimerMode::Work), 25 * 60);
        assert_eq!(s.secs_for(TimerMode::ShortBreak), 5 * 60);
        assert_eq!(s.secs_for(TimerMode::LongBreak), 15 * 60);
    }

    #[test]
    fn snapshot_roundtrip() {
        let snap = TimerSnapshot {
            completed_work_sessions: 7,
            settings: TimerSettings::default(),
        };
        let json = serde_json::to_string(&snap).unwrap();
        let decoded: TimerSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, snap);
    }
}
