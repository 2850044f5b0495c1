use crate::cli::args::CommandArgs;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "reload",
            "Re-read the data file from disk",
            "reload",
            cmd_reload,
        ),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
        CommandEntry::new("quit", "Exit the shell", "quit", cmd_exit),
    ]
}

fn cmd_reload(context: &mut ShellContext, _args: &CommandArgs) -> CommandResult {
    let ledger = context.manager.reload()?;
    let (purchases, payments) = (ledger.purchases.len(), ledger.payments.len());
    output::success(format!(
        "Reloaded {}: {} purchases, {} payments.",
        context.manager.path().display(),
        purchases,
        payments
    ));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &CommandArgs) -> CommandResult {
    if let Some(name) = args.positional(0) {
        match context.command(&name.to_lowercase()) {
            Some(command) => help::print_command(command),
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &CommandArgs) -> CommandResult {
    Err(CommandError::ExitRequested)
}
