mod engine;
mod settings;

pub use engine::{FocusTimer, TimerMode, SESSIONS_PER_CYCLE};
pub use settings::{TimerSettings, TimerSnapshot};
