use std::collections::BTreeMap;

use serde::Serialize;

use crate::ledger::{Payment, Payments, Purchase, Purchases};

use super::aggregation::{group_mean, group_sum, GroupKey, ValueKey};
use super::filter::PurchaseFilter;

/// Headline figures for a set of purchases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub total_spent: f64,
    pub total_boxes: u64,
    pub total_gross_profit: f64,
}

/// Purchases and payments for one farmer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmerSummary {
    pub farmer: String,
    pub purchase_count: usize,
    pub payment_count: usize,
    pub total_boxes: u64,
    /// `None` when the farmer has no purchase rows.
    pub avg_purchase_price: Option<f64>,
    pub total_purchased: f64,
    pub total_paid: f64,
    /// Outstanding amount owed to the farmer; negative after overpayment.
    pub balance: f64,
}

/// Chart series for the analysis view, computed from one filtered selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub rows: usize,
    pub totals: Totals,
    pub profit_by_farmer: BTreeMap<String, f64>,
    pub boxes_by_crop: BTreeMap<String, f64>,
    pub avg_sale_price_by_client: BTreeMap<String, f64>,
}

/// Read-only derivations over ledger tables.
pub struct SummaryService;

impl SummaryService {
    pub fn totals<'a, I>(rows: I) -> Totals
    where
        I: IntoIterator<Item = &'a Purchase>,
    {
        rows.into_iter().fold(Totals::default(), |mut acc, row| {
            acc.total_spent += row.total_cost;
            acc.total_boxes += u64::from(row.boxes);
            acc.total_gross_profit += row.gross_profit();
            acc
        })
    }

    pub fn farmer_summary(
        purchases: &Purchases,
        payments: &Payments,
        farmer: &str,
    ) -> FarmerSummary {
        let bought: Vec<&Purchase> = purchases.iter().filter(|row| row.farmer == farmer).collect();
        let paid: Vec<&Payment> = payments.iter().filter(|row| row.farmer == farmer).collect();

        let total_boxes = bought.iter().map(|row| u64::from(row.boxes)).sum();
        let avg_purchase_price = if bought.is_empty() {
            None
        } else {
            let sum: f64 = bought.iter().map(|row| row.purchase_price).sum();
            Some(sum / bought.len() as f64)
        };
        let total_purchased: f64 = bought.iter().map(|row| row.total_cost).sum();
        let total_paid: f64 = paid.iter().map(|row| row.amount).sum();

        FarmerSummary {
            farmer: farmer.to_string(),
            purchase_count: bought.len(),
            payment_count: paid.len(),
            total_boxes,
            avg_purchase_price,
            total_purchased,
            total_paid,
            balance: total_purchased - total_paid,
        }
    }

    pub fn analysis(purchases: &Purchases, filter: &PurchaseFilter) -> AnalysisReport {
        let selected = filter.apply(purchases);
        AnalysisReport {
            rows: selected.len(),
            totals: Self::totals(&selected),
            profit_by_farmer: group_sum(&selected, GroupKey::Farmer, ValueKey::GrossProfit),
            boxes_by_crop: group_sum(&selected, GroupKey::Crop, ValueKey::Boxes),
            avg_sale_price_by_client: group_mean(&selected, GroupKey::Client, ValueKey::SalePrice),
        }
    }

    /// Purchases ordered newest first; rows sharing a date keep insertion order.
    pub fn purchases_newest_first(purchases: &Purchases) -> Vec<&Purchase> {
        let mut rows: Vec<&Purchase> = purchases.iter().collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }

    /// Payments ordered newest first; rows sharing a date keep insertion order.
    pub fn payments_newest_first(payments: &Payments) -> Vec<&Payment> {
        let mut rows: Vec<&Payment> = payments.iter().collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{PaymentDraft, PurchaseDraft};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn purchase(farmer: &str, date: NaiveDate, boxes: u32, buy: f64, sell: f64) -> PurchaseDraft {
        PurchaseDraft {
            farmer: farmer.into(),
            location: "Valle".into(),
            date,
            boxes,
            purchase_price: buy,
            packaging: "Caja".into(),
            crop: "Mango".into(),
            client: "Central".into(),
            sale_price: sell,
        }
    }

    fn pay(farmer: &str, amount: f64) -> PaymentDraft {
        PaymentDraft {
            farmer: farmer.into(),
            date: day(20),
            amount,
        }
    }

    #[test]
    fn totals_of_empty_table_are_zero() {
        assert_eq!(SummaryService::totals(&Purchases::new()), Totals::default());
    }

    #[test]
    fn totals_sum_cost_boxes_and_profit() {
        let purchases = Purchases::new()
            .append(purchase("R1", day(1), 10, 2.0, 3.0))
            .and_then(|t| t.append(purchase("R2", day(2), 4, 5.0, 4.0)))
            .unwrap();
        let totals = SummaryService::totals(&purchases);
        assert_eq!(totals.total_spent, 40.0);
        assert_eq!(totals.total_boxes, 14);
        assert_eq!(totals.total_gross_profit, 6.0);
    }

    #[test]
    fn farmer_balance_subtracts_payments() {
        let purchases = Purchases::new()
            .append(purchase("R1", day(1), 20, 2.5, 3.0))
            .and_then(|t| t.append(purchase("R1", day(2), 10, 5.0, 6.0)))
            .and_then(|t| t.append(purchase("R9", day(2), 10, 5.0, 6.0)))
            .unwrap();
        let payments = Payments::new().append(pay("R1", 15.0)).append(pay("R1", 25.0));

        let summary = SummaryService::farmer_summary(&purchases, &payments, "R1");
        assert_eq!(summary.total_purchased, 100.0);
        assert_eq!(summary.total_paid, 40.0);
        assert_eq!(summary.balance, 60.0);
        assert_eq!(summary.total_boxes, 30);
        assert_eq!(summary.avg_purchase_price, Some(3.75));
        assert_eq!(summary.purchase_count, 2);
        assert_eq!(summary.payment_count, 2);
    }

    #[test]
    fn overpayment_gives_negative_balance() {
        let purchases = Purchases::new()
            .append(purchase("R1", day(1), 1, 10.0, 12.0))
            .unwrap();
        let payments = Payments::new().append(pay("R1", 25.0));
        let summary = SummaryService::farmer_summary(&purchases, &payments, "R1");
        assert_eq!(summary.balance, -15.0);
    }

    #[test]
    fn farmer_without_purchases_has_no_average() {
        let payments = Payments::new().append(pay("ghost", 5.0));
        let summary = SummaryService::farmer_summary(&Purchases::new(), &payments, "ghost");
        assert_eq!(summary.avg_purchase_price, None);
        assert_eq!(summary.total_paid, 5.0);
        assert_eq!(summary.balance, -5.0);
    }

    #[test]
    fn newest_first_is_stable_for_equal_dates() {
        let purchases = Purchases::new()
            .append(purchase("A", day(1), 1, 1.0, 1.0))
            .and_then(|t| t.append(purchase("B", day(3), 1, 1.0, 1.0)))
            .and_then(|t| t.append(purchase("C", day(3), 1, 1.0, 1.0)))
            .unwrap();
        let order: Vec<&str> = SummaryService::purchases_newest_first(&purchases)
            .into_iter()
            .map(|row| row.farmer.as_str())
            .collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn analysis_uses_filtered_rows_only() {
        let purchases = Purchases::new()
            .append(purchase("R1", day(1), 10, 2.0, 3.0))
            .and_then(|t| t.append(purchase("R2", day(2), 4, 1.0, 5.0)))
            .unwrap();
        let report = SummaryService::analysis(&purchases, &PurchaseFilter::new().farmers(["R2"]));
        assert_eq!(report.rows, 1);
        assert_eq!(report.profit_by_farmer.len(), 1);
        assert_eq!(report.profit_by_farmer["R2"], 16.0);
        assert_eq!(report.boxes_by_crop["Mango"], 4.0);
        assert_eq!(report.avg_sale_price_by_client["Central"], 5.0);
    }

    #[test]
    fn grouped_sums_add_up_to_the_totals() {
        let mut papaya = purchase("R2", day(2), 7, 1.25, 2.5);
        papaya.crop = "Papaya".into();
        let mut loss = purchase("R3", day(3), 3, 4.0, 3.5);
        loss.crop = "Fresa".into();
        let purchases = Purchases::new()
            .append(purchase("R1", day(1), 10, 2.0, 3.0))
            .and_then(|t| t.append(papaya))
            .and_then(|t| t.append(purchase("R1", day(4), 5, 2.2, 2.9)))
            .and_then(|t| t.append(loss))
            .unwrap();
        let totals = SummaryService::totals(&purchases);
        let sum = |group, value| -> f64 { group_sum(&purchases, group, value).values().sum() };

        assert!((sum(GroupKey::Farmer, ValueKey::TotalCost) - totals.total_spent).abs() < 1e-9);
        assert_eq!(sum(GroupKey::Crop, ValueKey::Boxes), totals.total_boxes as f64);
        assert!(
            (sum(GroupKey::Farmer, ValueKey::GrossProfit) - totals.total_gross_profit).abs() < 1e-9
        );
    }
}
