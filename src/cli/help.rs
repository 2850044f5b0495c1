use crate::cli::output::{self, section as output_section};
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    for entry in registry.entries() {
        output::block(format!("  {:<12} {}", entry.name, entry.description));
    }
    output::hint("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    output::block(format!("  Description: {}", entry.description));
    output::block(format!("  Usage: {}", entry.usage));
    if !entry.options.is_empty() {
        let options: Vec<String> = entry
            .options
            .iter()
            .map(|option| format!("--{}", option))
            .collect();
        output::block(format!("  Options: {}", options.join(", ")));
    }
}
