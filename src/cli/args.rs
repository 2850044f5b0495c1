//! `--flag value` parsing for shell commands.

use std::{collections::BTreeMap, str::FromStr};

use chrono::NaiveDate;

use crate::cli::core::CommandError;
use crate::ledger::purchase::is_valid_date;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CommandArgs {
    positional: Vec<String>,
    options: BTreeMap<String, Vec<String>>,
}

impl CommandArgs {
    /// Splits `args` into positionals and `--name value` / `--name=value` options.
    /// Options outside `allowed` are rejected.
    pub fn parse(args: &[&str], allowed: &[&str]) -> Result<Self, CommandError> {
        let mut parsed = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let Some(flag) = arg.strip_prefix("--") else {
                parsed.positional.push(arg.to_string());
                continue;
            };
            let (name, value) = match flag.split_once('=') {
                Some((name, value)) => (name.to_string(), value.to_string()),
                None => {
                    let value = iter.next().ok_or_else(|| {
                        CommandError::InvalidArguments(format!("missing value for `--{}`", flag))
                    })?;
                    (flag.to_string(), value.to_string())
                }
            };
            if !allowed.contains(&name.as_str()) {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown option `--{}`",
                    name
                )));
            }
            parsed.options.entry(name).or_default().push(value);
        }
        Ok(parsed)
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.options.is_empty()
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    /// Last value given for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.options
            .get(name)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    pub fn text(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    /// Every value of a repeatable option, also splitting on commas.
    pub fn list(&self, name: &str) -> Vec<String> {
        self.options
            .get(name)
            .into_iter()
            .flatten()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn parsed<T>(&self, name: &str) -> Result<Option<T>, CommandError>
    where
        T: FromStr,
    {
        self.get(name)
            .map(|raw| {
                raw.trim().parse::<T>().map_err(|_| {
                    CommandError::InvalidArguments(format!(
                        "invalid value `{}` for `--{}`",
                        raw, name
                    ))
                })
            })
            .transpose()
    }

    pub fn date(&self, name: &str) -> Result<Option<NaiveDate>, CommandError> {
        self.get(name).map(parse_date).transpose()
    }
}

/// Parses a `YYYY-MM-DD` date within the years a sheet can store.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
        Ok(date) if is_valid_date(date) => Ok(date),
        Ok(_) => Err(CommandError::InvalidArguments(format!(
            "date `{}` is out of range; use a year between 1900 and 9999",
            raw
        ))),
        Err(_) => Err(CommandError::InvalidArguments(format!(
            "invalid date `{}`; expected YYYY-MM-DD",
            raw
        ))),
    }
}

/// Parses a non-negative, finite amount.
pub fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(CommandError::InvalidArguments(format!(
            "invalid amount `{}`; expected a number of at least 0",
            raw
        ))),
    }
}
