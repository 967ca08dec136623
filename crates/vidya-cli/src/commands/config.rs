use clap::Subcommand;
use vidya_core::storage::{Config, Database};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration as TOML
    Show,
    /// Set a value by dotted key (e.g. timer.work_minutes 50)
    Set {
        key: String,
        value: String,
    },
    /// Wipe all tasks, the agenda, timer state, and settings
    Reset {
        /// Required confirmation flag
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default();
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            config.save()?;
            println!("{key} = {value}");
        }
        ConfigAction::Reset { yes } => {
            if !yes {
                return Err("pass --yes to confirm wiping all data".into());
            }
            Database::open()?.reset()?;
            Config::default().save()?;
            println!("{{\"reset\": true}}");
        }
    }
    Ok(())
}
