//! Interactive prompts for the purchase and payment forms.
//!
//! Only used in interactive mode; script mode takes every value from flags.

use chrono::{Local, NaiveDate};
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};

use crate::cli::args::parse_date;
use crate::cli::core::CommandError;
use crate::cli::ui::format_date;
use crate::core::services::{distinct_values, GroupKey};
use crate::ledger::{PaymentDraft, PurchaseDraft, Purchases};

const OTHER_LABEL: &str = "Other…";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Collects a purchase. Choice lists offer values already present in the table
/// plus a free-text entry.
pub fn purchase_form(
    theme: &ColorfulTheme,
    purchases: &Purchases,
) -> Result<PurchaseDraft, CommandError> {
    let date = prompt_date(theme, "Date")?;
    let farmer = prompt_text(theme, "Farmer (Ra)")?;
    let location = prompt_text(theme, "Location")?;
    let crop = choose_or_enter(theme, "Crop", &distinct_values(purchases, GroupKey::Crop))?;
    let packaging = choose_or_enter(
        theme,
        "Packaging",
        &distinct_values(purchases, GroupKey::Packaging),
    )?;
    let client = choose_or_enter(theme, "Client", &distinct_values(purchases, GroupKey::Client))?;
    let boxes: u32 = Input::with_theme(theme)
        .with_prompt("Number of boxes")
        .default(1)
        .validate_with(|value: &u32| -> Result<(), &str> {
            if *value >= 1 {
                Ok(())
            } else {
                Err("at least one box")
            }
        })
        .interact_text()?;
    let purchase_price = prompt_amount(theme, "Purchase price per box")?;
    let sale_price = prompt_amount(theme, "Sale price per box")?;

    Ok(PurchaseDraft {
        farmer,
        location,
        date,
        boxes,
        purchase_price,
        packaging,
        crop,
        client,
        sale_price,
    })
}

pub fn payment_form(
    theme: &ColorfulTheme,
    farmers: &[String],
) -> Result<PaymentDraft, CommandError> {
    let farmer = select_farmer(theme, farmers)?;
    let date = prompt_date(theme, "Payment date")?;
    let amount = prompt_amount(theme, "Payment amount")?;
    Ok(PaymentDraft {
        farmer,
        date,
        amount,
    })
}

pub fn select_farmer(theme: &ColorfulTheme, farmers: &[String]) -> Result<String, CommandError> {
    let index = Select::with_theme(theme)
        .with_prompt("Select a farmer")
        .items(farmers)
        .default(0)
        .interact()?;
    farmers
        .get(index)
        .cloned()
        .ok_or_else(|| CommandError::InvalidArguments("no farmer selected".into()))
}

/// Multi-selection where picking nothing means "no restriction".
pub fn multi_select(
    theme: &ColorfulTheme,
    prompt: &str,
    options: &[String],
) -> Result<Vec<String>, CommandError> {
    if options.is_empty() {
        return Ok(Vec::new());
    }
    let picked = MultiSelect::with_theme(theme)
        .with_prompt(format!("{prompt} (space to toggle, enter for all)"))
        .items(options)
        .interact()?;
    Ok(picked
        .into_iter()
        .filter_map(|index| options.get(index).cloned())
        .collect())
}

fn prompt_text(theme: &ColorfulTheme, prompt: &str) -> Result<String, CommandError> {
    Ok(Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?)
}

fn prompt_date(theme: &ColorfulTheme, prompt: &str) -> Result<NaiveDate, CommandError> {
    let raw: String = Input::with_theme(theme)
        .with_prompt(format!("{prompt} (YYYY-MM-DD)"))
        .default(format_date(today()))
        .validate_with(|value: &String| -> Result<(), String> {
            parse_date(value).map(|_| ()).map_err(|err| err.to_string())
        })
        .interact_text()?;
    parse_date(&raw)
}

fn prompt_amount(theme: &ColorfulTheme, prompt: &str) -> Result<f64, CommandError> {
    Ok(Input::with_theme(theme)
        .with_prompt(prompt)
        .default(0.0)
        .validate_with(|value: &f64| -> Result<(), &str> {
            if value.is_finite() && *value >= 0.0 {
                Ok(())
            } else {
                Err("amount must be 0 or more")
            }
        })
        .interact_text()?)
}

fn choose_or_enter(
    theme: &ColorfulTheme,
    prompt: &str,
    existing: &[String],
) -> Result<String, CommandError> {
    if existing.is_empty() {
        return prompt_text(theme, prompt);
    }
    let mut items: Vec<&str> = existing.iter().map(String::as_str).collect();
    items.push(OTHER_LABEL);
    let index = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;
    match existing.get(index) {
        Some(value) => Ok(value.clone()),
        None => prompt_text(theme, &format!("New {}", prompt.to_lowercase())),
    }
}
