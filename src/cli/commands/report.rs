//! Read-only views over purchases and per-farmer balances.

use crate::cli::args::CommandArgs;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::forms;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{format_date, format_decimal, format_money, BarChart, Table, TableColumn};
use crate::core::services::{
    distinct_values, AnalysisReport, FarmerSummary, GroupKey, PurchaseFilter, SummaryService,
};
use crate::ledger::Purchase;

pub(crate) const NO_PURCHASES: &str = "No purchases recorded yet.";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "purchases",
            "List purchases, newest first, with overall totals",
            "purchases",
            cmd_purchases,
        ),
        CommandEntry::new(
            "analysis",
            "Profit, boxes, and sale price charts with optional filters",
            "analysis [--farmer <ra,...>] [--crop <crop,...>] [--client <client,...>]",
            cmd_analysis,
        )
        .with_options(&["farmer", "crop", "client"]),
        CommandEntry::new(
            "farmer",
            "Show purchases, payments, and outstanding balance for a farmer",
            "farmer [<ra>]",
            cmd_farmer,
        ),
    ]
}

fn cmd_purchases(context: &mut ShellContext, _args: &CommandArgs) -> CommandResult {
    let purchases = &context.ledger().purchases;
    if purchases.is_empty() {
        output::info(NO_PURCHASES);
        return Ok(());
    }

    let symbol = context.currency();
    let totals = SummaryService::totals(purchases);
    output::section("Purchases");
    output::block(format!(
        "  Total purchased    : {}",
        format_money(symbol, totals.total_spent)
    ));
    output::block(format!("  Total boxes        : {}", totals.total_boxes));
    output::block(format!(
        "  Total gross profit : {}",
        format_money(symbol, totals.total_gross_profit)
    ));
    output::block("");
    output::block(purchase_table(
        &SummaryService::purchases_newest_first(purchases),
        symbol,
    ));
    Ok(())
}

fn cmd_analysis(context: &mut ShellContext, args: &CommandArgs) -> CommandResult {
    let purchases = &context.ledger().purchases;
    if purchases.is_empty() {
        output::info(NO_PURCHASES);
        return Ok(());
    }

    let filter = if context.is_interactive() && args.is_empty() {
        PurchaseFilter::new()
            .farmers(forms::multi_select(
                &context.theme,
                "Farmers",
                &distinct_values(purchases, GroupKey::Farmer),
            )?)
            .crops(forms::multi_select(
                &context.theme,
                "Crops",
                &distinct_values(purchases, GroupKey::Crop),
            )?)
            .clients(forms::multi_select(
                &context.theme,
                "Clients",
                &distinct_values(purchases, GroupKey::Client),
            )?)
    } else {
        PurchaseFilter::new()
            .farmers(args.list("farmer"))
            .crops(args.list("crop"))
            .clients(args.list("client"))
    };

    let report = SummaryService::analysis(purchases, &filter);
    print_analysis(&report, context.currency());
    Ok(())
}

fn cmd_farmer(context: &mut ShellContext, args: &CommandArgs) -> CommandResult {
    let farmers = distinct_values(&context.ledger().purchases, GroupKey::Farmer);

    let farmer = match args.positional(0) {
        Some(farmer) => farmer.trim().to_string(),
        None if context.is_interactive() => {
            if farmers.is_empty() {
                output::info(NO_PURCHASES);
                return Ok(());
            }
            forms::select_farmer(&context.theme, &farmers)?
        }
        None => {
            return Err(CommandError::InvalidArguments(
                "usage: farmer <ra>".to_string(),
            ))
        }
    };

    let ledger = context.ledger();
    let summary = SummaryService::farmer_summary(&ledger.purchases, &ledger.payments, &farmer);
    if summary.purchase_count == 0 && summary.payment_count == 0 {
        output::warning(format!("No records found for `{}`.", farmer));
        return Ok(());
    }
    print_farmer(&summary, context.currency());

    let rows: Vec<&Purchase> = SummaryService::purchases_newest_first(&ledger.purchases)
        .into_iter()
        .filter(|row| row.farmer == farmer)
        .collect();
    if !rows.is_empty() {
        output::block("");
        output::block(purchase_table(&rows, context.currency()));
    }
    Ok(())
}

fn print_analysis(report: &AnalysisReport, symbol: &str) {
    output::section("Analysis");
    if report.rows == 0 {
        output::info("No purchases match the selected filters.");
        return;
    }
    output::block(format!("  Purchases          : {}", report.rows));
    output::block(format!(
        "  Total purchased    : {}",
        format_money(symbol, report.totals.total_spent)
    ));
    output::block(format!("  Total boxes        : {}", report.totals.total_boxes));
    output::block(format!(
        "  Total gross profit : {}",
        format_money(symbol, report.totals.total_gross_profit)
    ));

    output::section("Gross profit by farmer");
    output::block(BarChart::new(&report.profit_by_farmer).render(|v| format_money(symbol, v)));
    output::section("Boxes by crop");
    output::block(BarChart::new(&report.boxes_by_crop).render(|v| format!("{v}")));
    output::section("Average sale price by client");
    output::block(
        BarChart::new(&report.avg_sale_price_by_client).render(|v| format_money(symbol, v)),
    );
}

fn print_farmer(summary: &FarmerSummary, symbol: &str) {
    output::section(format!("Farmer {}", summary.farmer));
    output::block(format!("  Purchases           : {}", summary.purchase_count));
    output::block(format!("  Total boxes         : {}", summary.total_boxes));
    output::block(format!(
        "  Avg purchase price  : {}",
        summary
            .avg_purchase_price
            .map(|avg| format_money(symbol, avg))
            .unwrap_or_else(|| "n/a".to_string())
    ));
    output::block(format!(
        "  Total purchased     : {}",
        format_money(symbol, summary.total_purchased)
    ));
    output::block(format!(
        "  Total paid          : {} ({} payments)",
        format_money(symbol, summary.total_paid),
        summary.payment_count
    ));
    output::block(format!(
        "  Outstanding balance : {}",
        format_money(symbol, summary.balance)
    ));
}

pub(crate) fn purchase_table(rows: &[&Purchase], symbol: &str) -> String {
    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::left("Ra"),
        TableColumn::left("Location"),
        TableColumn::left("Crop"),
        TableColumn::left("Packaging"),
        TableColumn::left("Client"),
        TableColumn::right("Boxes"),
        TableColumn::right("Buy"),
        TableColumn::right("Total"),
        TableColumn::right("Sell"),
        TableColumn::right("Profit"),
    ]);
    for row in rows {
        table.push_row(vec![
            format_date(row.date),
            row.farmer.clone(),
            row.location.clone(),
            row.crop.clone(),
            row.packaging.clone(),
            row.client.clone(),
            row.boxes.to_string(),
            format_decimal(row.purchase_price),
            format_money(symbol, row.total_cost),
            format_decimal(row.sale_price),
            format_money(symbol, row.gross_profit()),
        ]);
    }
    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn purchase_table_shows_totals_and_profit() {
        let purchase = Purchase {
            farmer: "R1".into(),
            location: "Valle".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            boxes: 10,
            purchase_price: 2.0,
            total_cost: 20.0,
            packaging: "Caja".into(),
            crop: "Mango".into(),
            client: "Central".into(),
            sale_price: 3.0,
        };
        let rendered = purchase_table(&[&purchase], "$");
        let row = rendered.lines().nth(2).unwrap();
        assert!(row.starts_with(" 2024-03-01 | R1"));
        assert!(row.contains("$20.00"));
        assert!(row.ends_with("$10.00"));
    }
}
