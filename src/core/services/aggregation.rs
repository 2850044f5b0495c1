//! Grouped sums and averages over purchase rows.

use std::collections::{BTreeMap, BTreeSet};

use crate::ledger::Purchase;

/// Text column used to bucket rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Farmer,
    Location,
    Crop,
    Client,
    Packaging,
}

impl GroupKey {
    pub fn of(self, row: &Purchase) -> &str {
        match self {
            GroupKey::Farmer => &row.farmer,
            GroupKey::Location => &row.location,
            GroupKey::Crop => &row.crop,
            GroupKey::Client => &row.client,
            GroupKey::Packaging => &row.packaging,
        }
    }
}

/// Numeric column (or derived value) aggregated within each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKey {
    Boxes,
    PurchasePrice,
    TotalCost,
    SalePrice,
    GrossProfit,
}

impl ValueKey {
    pub fn of(self, row: &Purchase) -> f64 {
        match self {
            ValueKey::Boxes => f64::from(row.boxes),
            ValueKey::PurchasePrice => row.purchase_price,
            ValueKey::TotalCost => row.total_cost,
            ValueKey::SalePrice => row.sale_price,
            ValueKey::GrossProfit => row.gross_profit(),
        }
    }
}

/// Sums `value` per distinct `group` value, keyed in sorted order.
pub fn group_sum<'a, I>(rows: I, group: GroupKey, value: ValueKey) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a Purchase>,
{
    let mut sums = BTreeMap::new();
    for row in rows {
        *sums.entry(group.of(row).to_string()).or_insert(0.0) += value.of(row);
    }
    sums
}

/// Averages `value` per distinct `group` value. Only groups with rows appear,
/// so no average is ever taken over zero rows.
pub fn group_mean<'a, I>(rows: I, group: GroupKey, value: ValueKey) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a Purchase>,
{
    let mut acc: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = acc.entry(group.of(row).to_string()).or_insert((0.0, 0));
        entry.0 += value.of(row);
        entry.1 += 1;
    }
    acc.into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect()
}

/// Sorted, de-duplicated non-blank values of a text column.
pub fn distinct_values<'a, I>(rows: I, key: GroupKey) -> Vec<String>
where
    I: IntoIterator<Item = &'a Purchase>,
{
    rows.into_iter()
        .map(|row| key.of(row).trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
