//! # Vidya Core Library
//!
//! Core business logic for Vidya, a study-planning assistant. All
//! operations are available via a standalone CLI binary, which is a thin
//! layer over this library.
//!
//! ## Architecture
//!
//! - **Scheduler**: scores tasks with a multi-factor priority model,
//!   decomposes them into one-hour study blocks, and packs the blocks
//!   into a dated agenda under a daily-hour budget with rest breaks
//! - **Focus Timer**: a work/break state machine that requires the caller
//!   to invoke `tick()` once per second for progress updates
//! - **Presence Bridge**: edge-triggered adapter that auto-pauses the
//!   timer while the user is away and auto-resumes only automatic pauses
//! - **Storage**: SQLite-based task/agenda persistence and TOML-based
//!   configuration
//!
//! The core owns no timers, threads, or cameras: tick sources and
//! presence sampling belong to the caller, which makes every state
//! machine here deterministic and unit-testable.
//!
//! ## Key Components
//!
//! - [`ScheduleBuilder`]: agenda generation
//! - [`FocusTimer`]: timer state machine
//! - [`StudySession`]: orchestration layer composing tasks, agenda,
//!   timer, and presence bridge
//! - [`Database`]: task, agenda, and timer persistence

pub mod error;
pub mod events;
pub mod presence;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod storage;
pub mod task;
pub mod timer;

pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use presence::{NullDetector, PresenceBridge, PresenceDetector};
pub use scheduler::{AgendaEntry, EntryKind, ScheduleBuilder, SchedulerConfig};
pub use scoring::{PriorityModel, ScoreWeights};
pub use session::StudySession;
pub use storage::{Config, Database};
pub use task::{Priority, Task};
pub use timer::{FocusTimer, TimerMode, TimerSettings, TimerSnapshot};
