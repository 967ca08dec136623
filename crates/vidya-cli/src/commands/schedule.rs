use clap::Subcommand;
use vidya_core::storage::{Config, Database};
use vidya_core::{ScheduleBuilder, SchedulerConfig, StudySession};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Generate a fresh agenda from the incomplete tasks
    Generate {
        /// Daily study budget in hours; defaults to the configured value
        #[arg(long)]
        daily_hours: Option<f64>,
    },
    /// Print the stored agenda as JSON
    Show,
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut db = Database::open()?;

    match action {
        ScheduleAction::Generate { daily_hours } => {
            let daily_hours = daily_hours.unwrap_or(config.scheduler.max_daily_hours);

            let mut scheduler_config = SchedulerConfig::default();
            if let Some(day_start) = config.day_start() {
                scheduler_config.day_start = day_start;
            }

            let mut session = StudySession::new(config.timer_settings())
                .with_scheduler(ScheduleBuilder::with_config(scheduler_config));
            for task in db.list_tasks()? {
                session.add_task(task);
            }

            let today = chrono::Local::now().date_naive();
            let agenda = session.generate_agenda(daily_hours, today)?;
            db.replace_agenda(agenda)?;
            println!("{}", serde_json::to_string_pretty(agenda)?);
        }
        ScheduleAction::Show => {
            let agenda = db.load_agenda()?;
            println!("{}", serde_json::to_string_pretty(&agenda)?);
        }
    }

    Ok(())
}
