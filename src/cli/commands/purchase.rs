use crate::cli::args::CommandArgs;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::forms;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::format_money;
use crate::ledger::PurchaseDraft;

const OPTIONS: &[&str] = &[
    "farmer",
    "location",
    "date",
    "boxes",
    "buy",
    "sell",
    "packaging",
    "crop",
    "client",
];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "purchase",
        "Record a fruit purchase",
        "purchase [--farmer <ra>] [--location <text>] [--date YYYY-MM-DD] [--boxes <n>] \
         [--buy <price>] [--sell <price>] [--packaging <text>] [--crop <text>] [--client <text>]",
        cmd_purchase,
    )
    .with_options(OPTIONS)]
}

fn cmd_purchase(context: &mut ShellContext, args: &CommandArgs) -> CommandResult {
    let draft = if context.is_interactive() && args.is_empty() {
        output::section("New purchase");
        forms::purchase_form(&context.theme, &context.ledger().purchases)?
    } else {
        draft_from_args(args)?
    };

    let purchase = context.manager.record_purchase(draft)?;
    let (total_cost, gross_profit) = (purchase.total_cost, purchase.gross_profit());
    let symbol = context.currency();
    output::success(format!(
        "Purchase recorded: total cost {}, gross profit {}",
        format_money(symbol, total_cost),
        format_money(symbol, gross_profit)
    ));
    Ok(())
}

/// Missing flags fall back to form defaults; validation happens on record.
fn draft_from_args(args: &CommandArgs) -> Result<PurchaseDraft, CommandError> {
    Ok(PurchaseDraft {
        farmer: args.text("farmer"),
        location: args.text("location"),
        date: args.date("date")?.unwrap_or_else(forms::today),
        boxes: args.parsed::<u32>("boxes")?.unwrap_or(1),
        purchase_price: args.parsed::<f64>("buy")?.unwrap_or(0.0),
        packaging: args.text("packaging"),
        crop: args.text("crop"),
        client: args.text("client"),
        sale_price: args.parsed::<f64>("sell")?.unwrap_or(0.0),
    })
}
