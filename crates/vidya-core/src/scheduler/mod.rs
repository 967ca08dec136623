//! Schedule builder: turns a task list into a time-blocked agenda.
//!
//! The pipeline has three stages:
//!
//! 1. Score every task with the [`PriorityModel`] and stable-sort
//!    descending, so equal scores keep their input order.
//! 2. Decompose each task, in sorted order, into whole-hour study blocks.
//!    Fractional remainders below one hour are not scheduled; they stay on
//!    the task for a future session.
//! 3. Pack the blocks chronologically from `today` at the configured day
//!    start, inserting a short break after every second study block of a
//!    day and rolling to the next date once the daily budget is spent.
//!
//! For fixed inputs and a fixed `today` the output is bit-identical across
//! runs: no randomness and no clock reads.

mod agenda;

pub use agenda::{AgendaEntry, EntryKind};

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::error::ValidationError;
use crate::scoring::PriorityModel;
use crate::task::Task;

/// Upper bound on the daily budget, so a day's entries (including breaks)
/// always fit between the day start and midnight.
pub const MAX_DAILY_HOURS: f64 = 12.0;

/// A task plus its transient score; lives only inside one build call.
#[derive(Debug, Clone, Copy)]
struct ScoredTask<'a> {
    task: &'a Task,
    score: f64,
}

/// One hour's worth of one task, produced during decomposition.
#[derive(Debug, Clone)]
struct StudyBlock {
    subject: String,
    name: String,
}

impl StudyBlock {
    fn label(&self) -> String {
        format!("{}: {}", self.subject, self.name)
    }
}

/// Packing knobs for schedule assembly.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Time-of-day the first block of each date starts.
    pub day_start: NaiveTime,
    /// Length of one study block (minutes).
    pub block_minutes: u32,
    /// Length of one rest break (minutes).
    pub break_minutes: u32,
    /// Study blocks between rest breaks.
    pub blocks_between_breaks: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            day_start: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            block_minutes: 60,
            break_minutes: 10,
            blocks_between_breaks: 2,
        }
    }
}

/// Builds a dated, timed agenda from a task list.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    model: PriorityModel,
    config: SchedulerConfig,
}

impl ScheduleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            model: PriorityModel::new(),
            config,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Build the agenda for `tasks` under a daily budget of
    /// `max_daily_hours`, starting on `today`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when `tasks` is empty or the budget
    /// fits less than one block or more than [`MAX_DAILY_HOURS`]. No
    /// partial agenda is produced.
    pub fn build(
        &self,
        tasks: &[Task],
        max_daily_hours: f64,
        today: NaiveDate,
    ) -> Result<Vec<AgendaEntry>, ValidationError> {
        if tasks.is_empty() {
            return Err(ValidationError::EmptyTaskList);
        }
        // The budget must fit at least one block, or no day could hold any
        // work without blowing its own cap.
        let block_hours = f64::from(self.config.block_minutes) / 60.0;
        if !(max_daily_hours >= block_hours && max_daily_hours <= MAX_DAILY_HOURS) {
            return Err(ValidationError::InvalidDailyHours {
                got: max_daily_hours,
                max: MAX_DAILY_HOURS,
            });
        }

        let blocks = self.decompose(tasks, today);
        Ok(self.assemble(blocks, max_daily_hours, today))
    }

    /// Score, sort, and split tasks into whole-hour study blocks.
    ///
    /// All of a higher-scored task's blocks precede all of a lower-scored
    /// task's blocks; ties keep input order (the sort is stable).
    fn decompose(&self, tasks: &[Task], today: NaiveDate) -> Vec<StudyBlock> {
        let mut scored: Vec<ScoredTask> = tasks
            .iter()
            .map(|task| ScoredTask {
                task,
                score: self.model.score(task, today),
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        let mut blocks = Vec::new();
        for entry in &scored {
            let whole_hours = entry.task.hours_remaining.floor() as usize;
            for _ in 0..whole_hours {
                blocks.push(StudyBlock {
                    subject: entry.task.subject.clone(),
                    name: entry.task.name.clone(),
                });
            }
        }
        blocks
    }

    /// Pack blocks chronologically into dated one-hour entries.
    fn assemble(
        &self,
        blocks: Vec<StudyBlock>,
        max_daily_hours: f64,
        today: NaiveDate,
    ) -> Vec<AgendaEntry> {
        let block_hours = f64::from(self.config.block_minutes) / 60.0;

        let mut agenda = Vec::new();
        let mut date = today;
        let mut cursor = self.config.day_start;
        let mut hours_today = 0.0;
        let mut blocks_today = 0u32;

        for block in blocks {
            // Day rollover is decided before each placement, never mid-block.
            if hours_today + block_hours > max_daily_hours {
                date = date + Duration::days(1);
                cursor = self.config.day_start;
                hours_today = 0.0;
                blocks_today = 0;
            }

            let end = cursor + Duration::minutes(i64::from(self.config.block_minutes));
            agenda.push(AgendaEntry {
                date,
                start: cursor,
                end,
                label: block.label(),
                kind: EntryKind::Study,
            });
            cursor = end;
            hours_today += block_hours;
            blocks_today += 1;

            if blocks_today % self.config.blocks_between_breaks == 0
                && hours_today < max_daily_hours
            {
                let break_end = cursor + Duration::minutes(i64::from(self.config.break_minutes));
                agenda.push(AgendaEntry {
                    date,
                    start: cursor,
                    end: break_end,
                    label: "Short Break".to_string(),
                    kind: EntryKind::Break,
                });
                cursor = break_end;
            }
        }

        agenda
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    fn task(subject: &str, name: &str, hours: f64, priority: Priority, due_offset: i64) -> Task {
        Task::new(
            subject,
            name,
            today() + Duration::days(due_offset),
            hours,
            priority,
        )
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn empty_task_list_is_an_error() {
        let err = ScheduleBuilder::new().build(&[], 4.0, today()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyTaskList);
    }

    #[test]
    fn non_positive_budget_is_an_error() {
        let tasks = vec![task("Math", "A", 2.0, Priority::High, 1)];
        let builder = ScheduleBuilder::new();
        assert!(builder.build(&tasks, 0.0, today()).is_err());
        assert!(builder.build(&tasks, -1.0, today()).is_err());
        assert!(builder.build(&tasks, 0.5, today()).is_err());
        assert!(builder.build(&tasks, MAX_DAILY_HOURS + 1.0, today()).is_err());
    }

    #[test]
    fn three_hours_under_two_hour_cap() {
        // One 3-hour task, cap 2: two blocks today (cap reached, so no
        // trailing break), third block the next morning.
        let tasks = vec![task("Math", "Revision", 3.0, Priority::High, 0)];
        let agenda = ScheduleBuilder::new().build(&tasks, 2.0, today()).unwrap();

        assert_eq!(agenda.len(), 3);
        assert_eq!(
            (agenda[0].date, agenda[0].start, agenda[0].end),
            (today(), time(9, 0), time(10, 0))
        );
        assert_eq!(
            (agenda[1].date, agenda[1].start, agenda[1].end),
            (today(), time(10, 0), time(11, 0))
        );
        assert_eq!(
            (agenda[2].date, agenda[2].start, agenda[2].end),
            (today() + Duration::days(1), time(9, 0), time(10, 0))
        );
        assert!(agenda.iter().all(|e| e.kind == EntryKind::Study));
        assert!(agenda.iter().all(|e| e.label == "Math: Revision"));
    }

    #[test]
    fn break_inserted_after_every_second_block() {
        let tasks = vec![task("Math", "Revision", 5.0, Priority::High, 0)];
        let agenda = ScheduleBuilder::new().build(&tasks, 4.0, today()).unwrap();

        // Day 1: study, study, break, study, study (cap reached -> no
        // second break). Day 2: study.
        let kinds: Vec<EntryKind> = agenda.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EntryKind::Study,
                EntryKind::Study,
                EntryKind::Break,
                EntryKind::Study,
                EntryKind::Study,
                EntryKind::Study,
            ]
        );
        let brk = &agenda[2];
        assert_eq!((brk.start, brk.end), (time(11, 0), time(11, 10)));
        assert_eq!(brk.label, "Short Break");
        // Blocks after a break start where the break ended.
        assert_eq!(agenda[3].start, time(11, 10));
        assert_eq!(agenda[5].date, today() + Duration::days(1));
    }

    #[test]
    fn higher_scored_task_is_decomposed_first() {
        let tasks = vec![
            task("History", "Essay", 2.0, Priority::Low, 20),
            task("Math", "Exam prep", 2.0, Priority::High, 1),
        ];
        let agenda = ScheduleBuilder::new().build(&tasks, 12.0, today()).unwrap();
        let study: Vec<&AgendaEntry> = agenda
            .iter()
            .filter(|e| e.kind == EntryKind::Study)
            .collect();
        assert!(study[0].label.starts_with("Math"));
        assert!(study[1].label.starts_with("Math"));
        assert!(study[2].label.starts_with("History"));
    }

    #[test]
    fn equal_scores_keep_input_order() {
        let tasks = vec![
            task("Biology", "Notes", 1.0, Priority::Medium, 3),
            task("Chemistry", "Notes", 1.0, Priority::Medium, 3),
        ];
        let agenda = ScheduleBuilder::new().build(&tasks, 4.0, today()).unwrap();
        let study: Vec<&AgendaEntry> = agenda
            .iter()
            .filter(|e| e.kind == EntryKind::Study)
            .collect();
        assert!(study[0].label.starts_with("Biology"));
        assert!(study[1].label.starts_with("Chemistry"));
    }

    #[test]
    fn zero_hour_tasks_are_never_placed() {
        let tasks = vec![
            task("Math", "Done already", 0.0, Priority::High, 0),
            task("History", "Essay", 1.0, Priority::Low, 5),
        ];
        let agenda = ScheduleBuilder::new().build(&tasks, 4.0, today()).unwrap();
        assert!(agenda.iter().all(|e| !e.label.contains("Done already")));
        assert_eq!(
            agenda
                .iter()
                .filter(|e| e.kind == EntryKind::Study)
                .count(),
            1
        );
    }

    #[test]
    fn fractional_hours_are_dropped_from_decomposition() {
        let tasks = vec![task("Math", "Revision", 2.5, Priority::High, 0)];
        let agenda = ScheduleBuilder::new().build(&tasks, 4.0, today()).unwrap();
        assert_eq!(
            agenda
                .iter()
                .filter(|e| e.kind == EntryKind::Study)
                .count(),
            2
        );
    }

    #[test]
    fn fractional_budget_never_exceeds_cap() {
        let tasks = vec![task("Math", "Revision", 6.0, Priority::High, 0)];
        let agenda = ScheduleBuilder::new().build(&tasks, 2.5, today()).unwrap();
        for date in agenda.iter().map(|e| e.date) {
            let hours: i64 = agenda
                .iter()
                .filter(|e| e.date == date && e.kind == EntryKind::Study)
                .map(|e| e.duration_minutes())
                .sum::<i64>()
                / 60;
            assert!(hours as f64 <= 2.5);
        }
    }

    #[test]
    fn output_is_deterministic() {
        let tasks = vec![
            task("Math", "Exam prep", 3.0, Priority::High, 1),
            task("History", "Essay", 2.0, Priority::Low, 6),
        ];
        let builder = ScheduleBuilder::new();
        let a = builder.build(&tasks, 3.0, today()).unwrap();
        let b = builder.build(&tasks, 3.0, today()).unwrap();
        assert_eq!(a, b);
    }
}
