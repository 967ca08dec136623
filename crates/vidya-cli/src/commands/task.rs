use chrono::NaiveDate;
use clap::Subcommand;
use uuid::Uuid;
use vidya_core::storage::Database;
use vidya_core::{Priority, Task};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a new study task
    Add {
        /// Subject (e.g. "Math")
        subject: String,
        /// Task name (e.g. "Chapter 4 problems")
        name: String,
        /// Due date, YYYY-MM-DD
        #[arg(long)]
        due: NaiveDate,
        /// Estimated hours of work, half-hour granularity
        #[arg(long)]
        hours: f64,
        /// Priority 1 (low) to 3 (high)
        #[arg(long, default_value = "2")]
        priority: u8,
    },
    /// List all tasks as JSON
    List,
    /// Delete a task by id
    Delete {
        id: Uuid,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        TaskAction::Add {
            subject,
            name,
            due,
            hours,
            priority,
        } => {
            let priority = Priority::from_ordinal(priority)
                .ok_or("priority must be 1, 2, or 3")?;
            if !(hours >= 0.0) {
                return Err("hours must be non-negative".into());
            }
            if due < chrono::Local::now().date_naive() {
                return Err("due date cannot be in the past".into());
            }
            let task = Task::new(subject, name, due, hours, priority);
            db.upsert_task(&task)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List => {
            let tasks = db.list_tasks()?;
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Delete { id } => {
            if db.delete_task(id)? {
                println!("{{\"deleted\": \"{id}\"}}");
            } else {
                return Err(format!("no task with id {id}").into());
            }
        }
    }

    Ok(())
}
