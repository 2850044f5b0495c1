use std::{
    fmt,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::cli::core::{CliError, CliMode, CliOptions, CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandRegistry;

/// Environment variable switching the shell to non-interactive script mode.
pub const SCRIPT_ENV: &str = "FRUIT_LEDGER_CLI_SCRIPT";

pub fn run_cli(options: CliOptions) -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode, options)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    let helper = CommandHelper::new(&context.registry);
    editor.set_helper(Some(helper));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output::section("Fruit Ledger");
    output::info(format!("Data file: {}", context.manager.path().display()));
    output::hint("Type `help` to list commands.");

    loop {
        let prompt = context.prompt();
        let line = editor.readline(&prompt);

        match line {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                editor.add_history_entry(trimmed).ok();

                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let tokens = match parse_command_line(trimmed) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(&err.message);
            return Ok(LoopControl::Continue);
        }
    };

    if tokens.is_empty() {
        return Ok(LoopControl::Continue);
    }

    let raw = &tokens[0];
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    context.dispatch(&command, raw, &args)
}

/// Completes command names, then the `--options` of the command being typed.
struct CommandHelper {
    commands: Vec<(&'static str, &'static [&'static str])>,
}

impl CommandHelper {
    fn new(registry: &CommandRegistry) -> Self {
        let mut commands: Vec<_> = registry
            .entries()
            .iter()
            .map(|entry| (entry.name, entry.options))
            .collect();
        commands.sort_by_key(|(name, _)| *name);
        Self { commands }
    }

    /// Start of the word under the cursor and its replacements.
    fn candidates(&self, prefix: &str) -> (usize, Vec<String>) {
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let word = &prefix[start..];

        let Some(command) = prefix[..start].split_whitespace().next() else {
            let needle = word.to_ascii_lowercase();
            let names = self
                .commands
                .iter()
                .filter(|(name, _)| name.starts_with(&needle))
                .map(|(name, _)| name.to_string())
                .collect();
            return (start, names);
        };

        let Some(needle) = word.strip_prefix("--") else {
            return (start, Vec::new());
        };
        let command = command.to_ascii_lowercase();
        let options = self
            .commands
            .iter()
            .find(|(name, _)| *name == command)
            .map(|(_, options)| *options)
            .unwrap_or_default()
            .iter()
            .filter(|option| option.starts_with(needle))
            .map(|option| format!("--{}", option))
            .collect();
        (start, options)
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = self.candidates(&line[..pos]);
        let pairs = words
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: word,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_values_stay_together() {
        let tokens = parse_command_line("purchase --farmer 'Don Jose' --boxes 3").unwrap();
        assert_eq!(tokens, vec!["purchase", "--farmer", "Don Jose", "--boxes", "3"]);
    }

    #[test]
    fn unbalanced_quotes_are_rejected() {
        assert!(parse_command_line("farmer \"R1").is_err());
    }

    fn helper() -> CommandHelper {
        let mut registry = CommandRegistry::new();
        crate::cli::commands::register_all(&mut registry);
        CommandHelper::new(&registry)
    }

    #[test]
    fn first_word_completes_command_names() {
        let (start, words) = helper().candidates("pay");
        assert_eq!(start, 0);
        assert_eq!(words, vec!["payment", "payments"]);
    }

    #[test]
    fn later_words_complete_the_command_options() {
        let (start, words) = helper().candidates("payment --farmer R1 --a");
        assert_eq!(start, 20);
        assert_eq!(words, vec!["--amount"]);

        let (_, words) = helper().candidates("ANALYSIS --c");
        assert_eq!(words, vec!["--crop", "--client"]);
    }

    #[test]
    fn values_and_option_free_commands_get_nothing() {
        assert!(helper().candidates("payment --farmer R").1.is_empty());
        assert!(helper().candidates("purchases --").1.is_empty());
    }
}
