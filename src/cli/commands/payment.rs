use crate::cli::args::{parse_amount, CommandArgs};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::forms;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{format_date, format_money, Table, TableColumn};
use crate::core::services::{distinct_values, GroupKey, SummaryService};
use crate::ledger::{Payment, PaymentDraft};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "payment",
            "Record a payment to a farmer",
            "payment [--farmer <ra>] [--date YYYY-MM-DD] [--amount <amount>]",
            cmd_payment,
        )
        .with_options(&["farmer", "date", "amount"]),
        CommandEntry::new(
            "payments",
            "List payments, newest first",
            "payments",
            cmd_payments,
        ),
    ]
}

fn cmd_payment(context: &mut ShellContext, args: &CommandArgs) -> CommandResult {
    let farmers = distinct_values(&context.ledger().purchases, GroupKey::Farmer);
    if farmers.is_empty() {
        output::warning("No farmers found. Record a purchase before registering payments.");
        return Ok(());
    }

    let draft = if context.is_interactive() && args.is_empty() {
        output::section("New payment");
        forms::payment_form(&context.theme, &farmers)?
    } else {
        draft_from_args(args, &farmers)?
    };

    context.manager.record_payment(draft)?;
    output::success("Payment recorded.");
    print_payments(context);
    Ok(())
}

fn cmd_payments(context: &mut ShellContext, _args: &CommandArgs) -> CommandResult {
    print_payments(context);
    Ok(())
}

/// Payments may only name a farmer that already has purchases.
fn draft_from_args(args: &CommandArgs, farmers: &[String]) -> Result<PaymentDraft, CommandError> {
    let farmer = args.text("farmer").trim().to_string();
    if !farmers.contains(&farmer) {
        return Err(CommandError::InvalidArguments(format!(
            "unknown farmer `{}`; choose one of: {}",
            farmer,
            farmers.join(", ")
        )));
    }
    let amount = match args.get("amount") {
        Some(raw) => parse_amount(raw)?,
        None => 0.0,
    };
    Ok(PaymentDraft {
        farmer,
        date: args.date("date")?.unwrap_or_else(forms::today),
        amount,
    })
}

fn print_payments(context: &ShellContext) {
    let payments = &context.ledger().payments;
    if payments.is_empty() {
        output::info("No payments recorded yet.");
        return;
    }
    output::section("Payments");
    output::block(payment_table(
        &SummaryService::payments_newest_first(payments),
        context.currency(),
    ));
}

fn payment_table(rows: &[&Payment], symbol: &str) -> String {
    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::left("Ra"),
        TableColumn::right("Amount"),
    ]);
    for row in rows {
        table.push_row(vec![
            format_date(row.date),
            row.farmer.clone(),
            format_money(symbol, row.amount),
        ]);
    }
    table.render()
}
