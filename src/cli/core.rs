//! Shell dispatch and CLI error types.

use std::{io, path::PathBuf};

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;
use tracing::info;

use crate::{
    config::ConfigManager,
    core::LedgerManager,
    errors::LedgerError,
    storage::XlsxStorage,
};

use super::commands;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failure of a single shell command. Reported to the user; the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Failure that stops the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
}

/// Startup options gathered from the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub data_file: Option<PathBuf>,
}

impl ShellContext {
    pub fn new(mode: CliMode, options: CliOptions) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new();
        let config = config_manager.load()?;
        let data_file = options
            .data_file
            .unwrap_or_else(|| config_manager.data_file(&config));
        info!(path = %data_file.display(), ?mode, "opening ledger");

        let manager = open_ledger(data_file)?;
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Ok(Self {
            mode,
            registry,
            manager,
            theme: ColorfulTheme::default(),
            config,
            config_manager,
        })
    }

    pub(crate) fn is_interactive(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        String::from("fruit-ledger> ")
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(entry) = self.registry.get(command).copied() else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        let args = entry.parse_args(args)?;
        match (entry.handler)(self, &args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(&message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Ledger(LedgerError::Validation(err)) => {
                output::warning(format!("Please complete all required fields ({}).", err));
                Ok(())
            }
            CommandError::Ledger(err) => {
                output::error(format!("{}. Nothing was saved.", err));
                Ok(())
            }
            other => {
                output::error(other.to_string());
                Ok(())
            }
        }
    }
}

pub(crate) fn open_ledger(path: PathBuf) -> Result<LedgerManager, LedgerError> {
    LedgerManager::open(Box::new(XlsxStorage::new(path)))
}
