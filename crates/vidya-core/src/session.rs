//! Study session orchestration.
//!
//! Each core component owns its own state; `StudySession` composes them
//! and is the single source of truth for a running application: the task
//! list, the latest agenda, the focus timer, and the presence bridge.
//! Callers drive it with user actions, a 1-second tick, and presence
//! readings, and persist after every mutating action.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::events::Event;
use crate::scheduler::{AgendaEntry, ScheduleBuilder};
use crate::task::Task;
use crate::timer::{FocusTimer, TimerSettings, TimerSnapshot};
use crate::presence::PresenceBridge;

/// Owns the task list, agenda, timer, and presence bridge.
#[derive(Debug, Default)]
pub struct StudySession {
    tasks: Vec<Task>,
    agenda: Vec<AgendaEntry>,
    timer: FocusTimer,
    bridge: PresenceBridge,
    scheduler: ScheduleBuilder,
}

impl StudySession {
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            timer: FocusTimer::new(settings),
            ..Self::default()
        }
    }

    /// Swap in a scheduler with non-default packing knobs.
    pub fn with_scheduler(mut self, scheduler: ScheduleBuilder) -> Self {
        self.scheduler = scheduler;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn agenda(&self) -> &[AgendaEntry] {
        &self.agenda
    }

    pub fn timer(&self) -> &FocusTimer {
        &self.timer
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    // ── Task list ────────────────────────────────────────────────────

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove a task. Returns whether anything was deleted. A deleted
    /// task stops being credited by the running session.
    pub fn delete_task(&mut self, id: Uuid) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.timer.current_task_id() == Some(id) {
            self.timer.set_current_task(None);
        }
        self.tasks.len() != before
    }

    /// Restore a previously persisted task list and agenda.
    pub fn load(&mut self, tasks: Vec<Task>, agenda: Vec<AgendaEntry>) {
        self.tasks = tasks;
        self.agenda = agenda;
    }

    // ── Scheduling ───────────────────────────────────────────────────

    /// Rebuild the agenda from the incomplete tasks.
    ///
    /// # Errors
    ///
    /// Fails when no incomplete task exists or the budget is invalid;
    /// the previous agenda is kept untouched on failure.
    pub fn generate_agenda(
        &mut self,
        max_daily_hours: f64,
        today: NaiveDate,
    ) -> Result<&[AgendaEntry], ValidationError> {
        let pending: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| !t.is_complete())
            .cloned()
            .collect();
        let agenda = self.scheduler.build(&pending, max_daily_hours, today)?;
        self.agenda = agenda;
        Ok(&self.agenda)
    }

    // ── Timer ────────────────────────────────────────────────────────

    /// Begin a work session, optionally crediting `task_id`.
    pub fn start_timer(&mut self, task_id: Option<Uuid>) -> Event {
        self.timer.set_current_task(task_id);
        self.bridge.reset();
        self.timer.start()
    }

    pub fn pause_timer(&mut self) -> Option<Event> {
        self.timer.pause(false)
    }

    pub fn resume_timer(&mut self) -> Option<Event> {
        self.timer.resume()
    }

    pub fn reset_timer(&mut self) -> Option<Event> {
        self.timer.reset()
    }

    pub fn stop_timer(&mut self) -> Event {
        self.timer.stop()
    }

    /// Advance the timer one second, crediting the current task when a
    /// work period completes.
    pub fn tick(&mut self) -> Option<Event> {
        let event = self.timer.tick()?;
        if let Event::WorkCompleted {
            task_id: Some(id), ..
        } = event
        {
            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                task.record_work_session();
            }
        }
        Some(event)
    }

    /// Feed one presence reading through the bridge.
    pub fn observe_presence(&mut self, present: bool) -> Option<Event> {
        self.bridge.observe(present, &mut self.timer)
    }

    pub fn set_timer_settings(&mut self, settings: TimerSettings) {
        self.timer.set_settings(settings);
    }

    pub fn restore_timer(&mut self, snapshot: TimerSnapshot) {
        self.timer = FocusTimer::from_snapshot(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    fn session_with_task(hours: f64) -> (StudySession, Uuid) {
        let mut session = StudySession::new(TimerSettings::default());
        let task = Task::new("Math", "Revision", today(), hours, Priority::High);
        let id = task.id;
        session.add_task(task);
        (session, id)
    }

    #[test]
    fn completed_work_session_credits_the_task() {
        let (mut session, id) = session_with_task(2.0);
        session.start_timer(Some(id));
        let event = loop {
            if let Some(e) = session.tick() {
                break e;
            }
        };
        assert!(matches!(event, Event::WorkCompleted { .. }));
        assert_eq!(session.task(id).unwrap().hours_remaining, 1.5);
    }

    #[test]
    fn credit_floors_at_zero() {
        let (mut session, id) = session_with_task(0.5);
        session.start_timer(Some(id));
        while !matches!(session.tick(), Some(Event::WorkCompleted { .. })) {}
        assert_eq!(session.task(id).unwrap().hours_remaining, 0.0);
    }

    #[test]
    fn deleting_the_current_task_clears_the_reference() {
        let (mut session, id) = session_with_task(2.0);
        session.start_timer(Some(id));
        assert!(session.delete_task(id));
        assert_eq!(session.timer().current_task_id(), None);
        // The session keeps running; completion simply credits nobody.
        let event = loop {
            if let Some(e) = session.tick() {
                break e;
            }
        };
        assert!(matches!(
            event,
            Event::WorkCompleted { task_id: None, .. }
        ));
    }

    #[test]
    fn agenda_generation_skips_complete_tasks() {
        let (mut session, _) = session_with_task(2.0);
        session.add_task(Task::new("History", "Done", today(), 0.0, Priority::Low));
        let agenda = session.generate_agenda(4.0, today()).unwrap();
        assert!(agenda.iter().all(|e| !e.label.contains("Done")));
    }

    #[test]
    fn agenda_generation_requires_an_incomplete_task() {
        let mut session = StudySession::new(TimerSettings::default());
        session.add_task(Task::new("Math", "Done", today(), 0.0, Priority::High));
        let err = session.generate_agenda(4.0, today()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyTaskList);
    }

    #[test]
    fn failed_generation_keeps_previous_agenda() {
        let (mut session, _) = session_with_task(2.0);
        session.generate_agenda(4.0, today()).unwrap();
        let before = session.agenda().to_vec();
        assert!(session.generate_agenda(0.0, today()).is_err());
        assert_eq!(session.agenda(), &before[..]);
    }

    #[test]
    fn presence_toggles_pause_and_resume() {
        let (mut session, id) = session_with_task(2.0);
        session.start_timer(Some(id));
        assert!(matches!(
            session.observe_presence(false),
            Some(Event::TimerPaused { auto: true, .. })
        ));
        assert!(matches!(
            session.observe_presence(true),
            Some(Event::TimerResumed { .. })
        ));
    }

    #[test]
    fn restarting_rearms_presence_edges() {
        let (mut session, id) = session_with_task(2.0);
        session.start_timer(Some(id));
        session.observe_presence(false);
        session.stop_timer();
        // A fresh session must react to absence again even though the
        // last reading before the restart was already "absent".
        session.start_timer(Some(id));
        assert!(session.observe_presence(false).is_some());
    }
}
