use std::path::PathBuf;

use fruit_ledger::{
    cli::{run_cli, CliOptions},
    init,
};

const USAGE: &str = "usage: fruit_ledger_cli [--file <path.xlsx>]";

fn parse_options() -> Result<Option<CliOptions>, String> {
    let mut options = CliOptions::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--file" | "-f" => {
                let path = args
                    .next()
                    .ok_or_else(|| format!("missing value for `{arg}`\n{USAGE}"))?;
                options.data_file = Some(PathBuf::from(path));
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unexpected argument `{other}`\n{USAGE}")),
        }
    }
    Ok(Some(options))
}

fn main() {
    init();

    let options = match parse_options() {
        Ok(Some(options)) => options,
        Ok(None) => {
            println!("{USAGE}");
            return;
        }
        Err(message) => {
            eprintln!("Error: {message}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run_cli(options) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
