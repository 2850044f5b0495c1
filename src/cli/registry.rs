//! Command table for the shell.
//!
//! Every entry declares the `--options` it accepts. Dispatch parses arguments
//! against that list before the handler runs, and the same list drives help
//! output and tab completion.

use crate::cli::args::CommandArgs;
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &CommandArgs) -> CommandResult;

#[derive(Clone, Copy)]
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub options: &'static [&'static str],
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            options: &[],
            handler,
        }
    }

    pub fn with_options(self, options: &'static [&'static str]) -> Self {
        Self { options, ..self }
    }

    pub fn parse_args(&self, args: &[&str]) -> Result<CommandArgs, CommandError> {
        CommandArgs::parse(args, self.options)
    }
}

/// Commands in registration order. A later entry with the same name replaces the earlier one.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CommandEntry) {
        match self.entries.iter_mut().find(|known| known.name == entry.name) {
            Some(known) => *known = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }
}
