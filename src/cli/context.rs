use std::collections::HashSet;
use std::io;

use chrono::{Local, NaiveDate};
use strsim::levenshtein;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    bills::{BillBook, IncomeProfile},
    config::{Config, ConfigManager},
    errors::{CliError, CoreError},
    playground::PlaygroundState,
    storage::JsonStore,
};

use super::commands::{self, CommandRegistry};
use super::io as cli_io;
use super::output::{self, OutputPreferences};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Income profile not set. Use `income set` first.")]
    IncomeNotConfigured,
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

/// Shared shell runtime state: the loaded bill book, its storage, the
/// configuration, and the session-only playground and exclusion toggles.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: JsonStore,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub book: BillBook,
    pub playground: PlaygroundState,
    /// Bills toggled out of the summary totals. Presentation-only state,
    /// never persisted.
    pub excluded_bills: HashSet<Uuid>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let registry = CommandRegistry::new(commands::all_definitions());
        let store = JsonStore::new_default()?;
        let config_manager = ConfigManager::new_default()?;
        let config = config_manager.load()?;
        output::set_preferences(OutputPreferences {
            quiet_mode: config.quiet_mode,
        });
        let book = store.load()?;

        Ok(Self {
            mode,
            registry,
            store,
            config_manager,
            config,
            book,
            playground: PlaygroundState::default(),
            excluded_bills: HashSet::new(),
            last_command: None,
            running: true,
        })
    }

    /// The single place wall-clock time enters the shell; everything below
    /// it takes the date as a parameter.
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn prompt(&self) -> String {
        "bill-core> ".to_string()
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!("Unknown command `{}`.", input));
        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action("Exit shell?", true).map_err(|_| {
            CliError::Io(io::Error::new(io::ErrorKind::Other, "confirm prompt failed"))
        })
    }

    pub fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::IncomeNotConfigured => {
                cli_io::print_error("Income profile not set.");
                cli_io::print_hint("Try `income set monthly 2024-01-01 50000` to get started.");
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }

    /// The stored income profile, required by projection commands.
    pub fn require_income_profile(&self) -> Result<IncomeProfile, CommandError> {
        self.book
            .income_profile
            .clone()
            .ok_or(CommandError::IncomeNotConfigured)
    }

    pub fn save_book(&self) -> Result<(), CommandError> {
        self.store.save(&self.book)?;
        Ok(())
    }

    pub fn is_interactive(&self) -> bool {
        self.mode == CliMode::Interactive
    }
}
