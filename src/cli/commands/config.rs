use std::path::PathBuf;

use tracing::info;

use crate::cli::args::CommandArgs;
use crate::cli::core::{open_ledger, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const SET_USAGE: &str = "usage: config set <currency|data_file> <value>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change the currency symbol and data file",
        "config [show|set <currency|data_file> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &CommandArgs) -> CommandResult {
    match args.positional(0).map(str::to_lowercase).as_deref() {
        None | Some("show") => {
            show_config(context);
            Ok(())
        }
        Some("set") => match (args.positional(1), args.positional(2)) {
            (Some(key), Some(value)) => set_value(context, &key.to_lowercase(), value.trim()),
            _ => Err(CommandError::InvalidArguments(SET_USAGE.into())),
        },
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}`; {}",
            other, SET_USAGE
        ))),
    }
}

fn show_config(context: &ShellContext) {
    output::section("Configuration");
    output::block(format!(
        "  Config file : {}",
        context.config_manager.path().display()
    ));
    output::block(format!("  Data file   : {}", context.manager.path().display()));
    output::block(format!("  Currency    : {}", context.currency()));
}

/// A new data file must open before the config is saved; the session then moves to it.
fn set_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    if value.is_empty() {
        return Err(CommandError::InvalidArguments(format!(
            "a value is required for `{}`",
            key
        )));
    }

    let mut config = context.config.clone();
    match key {
        "currency" => config.currency_symbol = value.to_string(),
        "data_file" | "data-file" => config.data_file = Some(PathBuf::from(value)),
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{}`; {}",
                other, SET_USAGE
            )))
        }
    }

    let manager = if config.data_file != context.config.data_file {
        Some(open_ledger(context.config_manager.data_file(&config))?)
    } else {
        None
    };
    context.config_manager.save(&config)?;
    info!(key, value, path = %context.config_manager.path().display(), "config saved");

    context.config = config;
    if let Some(manager) = manager {
        context.manager = manager;
    }
    output::success(format!("Saved {} = {}.", key, value));
    Ok(())
}
