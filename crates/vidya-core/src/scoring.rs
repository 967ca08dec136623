//! Multi-factor task scoring model.
//!
//! Ranks tasks by combining three signals:
//!
//! - **Urgency**: exponential decay over days until the due date; overdue
//!   tasks get a fixed large value that dominates the sort order.
//! - **Importance**: the user-assigned priority, normalized to (0, 1].
//! - **Magnitude**: log-scaled hours remaining, so long tasks get a mild
//!   boost without swamping urgency.
//!
//! The final score is `urgency^wu * importance^wi * magnitude^wm`. The model
//! is pure arithmetic over well-formed input: it performs no validation and
//! no side effects, and reads no clock -- `today` is injected by the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Exponent weights for the three scoring factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// How much to prioritize tasks that are due soon.
    pub urgency: f64,
    /// How much to prioritize tasks the user marked important.
    pub importance: f64,
    /// A small boost for longer tasks to encourage starting them.
    pub magnitude: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            urgency: 2.0,
            importance: 1.5,
            magnitude: 0.5,
        }
    }
}

/// Decay constant (lambda) for the urgency curve.
pub const URGENCY_DECAY: f64 = 0.1;

/// Fixed urgency for overdue tasks; dominates any on-time urgency in (0, 1].
pub const OVERDUE_URGENCY: f64 = 1000.0;

/// Task scoring model.
#[derive(Debug, Clone, Copy)]
pub struct PriorityModel {
    weights: ScoreWeights,
    decay: f64,
}

impl PriorityModel {
    pub fn new() -> Self {
        Self {
            weights: ScoreWeights::default(),
            decay: URGENCY_DECAY,
        }
    }

    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self {
            weights,
            decay: URGENCY_DECAY,
        }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Score a task as of `today`. Pure and deterministic.
    ///
    /// A task with zero hours remaining scores 0 and therefore sorts last;
    /// callers are expected to filter such tasks out before scheduling.
    pub fn score(&self, task: &Task, today: NaiveDate) -> f64 {
        let days_remaining = (task.due_date - today).num_days();

        let urgency = if days_remaining < 0 {
            OVERDUE_URGENCY
        } else {
            (-self.decay * days_remaining as f64).exp()
        };

        let importance = task.priority.weight() / 3.0;
        let magnitude = task.hours_remaining.ln_1p();

        urgency.powf(self.weights.urgency)
            * importance.powf(self.weights.importance)
            * magnitude.powf(self.weights.magnitude)
    }
}

impl Default for PriorityModel {
    fn default() -> Self {
        Self::new()
    }
}
