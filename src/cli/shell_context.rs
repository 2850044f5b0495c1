use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::LedgerManager,
    ledger::Ledger,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: LedgerManager,
    pub theme: ColorfulTheme,
    pub config: Config,
    pub config_manager: ConfigManager,
}

impl ShellContext {
    pub fn ledger(&self) -> &Ledger {
        self.manager.ledger()
    }

    pub fn currency(&self) -> &str {
        &self.config.currency_symbol
    }
}
