//! Interactive timer run loop.
//!
//! The core exposes `tick()` and presence observation; this command owns
//! the actual intervals, per the reentrancy rule: both intervals are
//! locals of one run loop, so starting a run can never leave a previous
//! tick source alive.

use std::path::PathBuf;
use std::time::Duration;

use clap::Subcommand;
use uuid::Uuid;
use vidya_core::storage::{Config, Database};
use vidya_core::{Event, PresenceDetector, StudySession, TimerSnapshot};

/// Presence readings sampled from a watch file: `1`/`true` means a person
/// is visible. Stands in for the camera-owning collaborator; an absent or
/// unreadable file yields no readings, so the timer never auto-pauses.
struct FilePresence {
    path: PathBuf,
}

impl PresenceDetector for FilePresence {
    fn start(&mut self) {}

    fn stop(&mut self) {}

    fn sample(&mut self) -> Option<bool> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let value = content.trim();
        Some(value == "1" || value.eq_ignore_ascii_case("true"))
    }
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a focus session: one work period plus its break
    Run {
        /// Task to credit; defaults to the oldest incomplete task
        #[arg(long)]
        task: Option<Uuid>,
        /// File sampled every 1.5s for presence (1/true = present)
        #[arg(long)]
        presence_file: Option<PathBuf>,
    },
    /// Print the persisted timer state as JSON
    Status,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run {
            task,
            presence_file,
        } => run_session(task, presence_file),
        TimerAction::Status => {
            let db = Database::open()?;
            let snapshot = db.load_timer()?.unwrap_or(TimerSnapshot {
                completed_work_sessions: 0,
                settings: Config::load_or_default().timer_settings(),
            });
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            Ok(())
        }
    }
}

fn run_session(
    task: Option<Uuid>,
    presence_file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;

    let mut session = StudySession::new(config.timer_settings());
    for task in db.list_tasks()? {
        session.add_task(task);
    }
    if let Some(snapshot) = db.load_timer()? {
        session.restore_timer(snapshot);
        session.set_timer_settings(config.timer_settings());
    }

    let task_id = task.or_else(|| {
        session
            .tasks()
            .iter()
            .find(|t| !t.is_complete())
            .map(|t| t.id)
    });

    let mut detector: Box<dyn PresenceDetector> = match presence_file {
        Some(path) => Box::new(FilePresence { path }),
        None => Box::new(vidya_core::NullDetector),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        emit(&session.start_timer(task_id));
        detector.start();

        let mut tick = tokio::time::interval(Duration::from_secs(1));
        let mut sample = tokio::time::interval(Duration::from_millis(1500));
        // The first tick of a tokio interval fires immediately; swallow it
        // so the work period lasts its full duration.
        tick.tick().await;
        sample.tick().await;

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    let Some(event) = session.tick() else { continue };
                    emit(&event);
                    match &event {
                        Event::WorkCompleted { task_id, .. } => {
                            if let Some(task) = task_id.and_then(|id| session.task(id)) {
                                db.upsert_task(task)?;
                            }
                            db.save_timer(&session.timer().snapshot())?;
                        }
                        Event::BreakCompleted { .. } => {
                            db.save_timer(&session.timer().snapshot())?;
                            detector.stop();
                            break;
                        }
                        _ => {}
                    }
                }
                _ = sample.tick() => {
                    if let Some(present) = detector.sample() {
                        if let Some(event) = session.observe_presence(present) {
                            emit(&event);
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    emit(&session.stop_timer());
                    db.save_timer(&session.timer().snapshot())?;
                    detector.stop();
                    break;
                }
            }
        }

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

fn emit(event: &Event) {
    if let Ok(json) = serde_json::to_string(event) {
        println!("{json}");
    }
}
