use std::collections::BTreeSet;

use crate::ledger::{Purchase, Purchases};

/// Set-membership predicates on farmer, crop, and client.
///
/// A predicate that is unset, or set from an empty selection, matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseFilter {
    pub farmers: Option<BTreeSet<String>>,
    pub crops: Option<BTreeSet<String>>,
    pub clients: Option<BTreeSet<String>>,
}

impl PurchaseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn farmers<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.farmers = selection(values);
        self
    }

    pub fn crops<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.crops = selection(values);
        self
    }

    pub fn clients<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clients = selection(values);
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.farmers.is_none() && self.crops.is_none() && self.clients.is_none()
    }

    pub fn matches(&self, row: &Purchase) -> bool {
        member(&self.farmers, &row.farmer)
            && member(&self.crops, &row.crop)
            && member(&self.clients, &row.client)
    }

    /// Rows of `purchases` satisfying every set predicate, in original order.
    pub fn apply(&self, purchases: &Purchases) -> Purchases {
        if self.is_unrestricted() {
            return purchases.clone();
        }
        purchases
            .iter()
            .filter(|row| self.matches(row))
            .cloned()
            .collect()
    }
}

fn selection<I, S>(values: I) -> Option<BTreeSet<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
    if set.is_empty() {
        None
    } else {
        Some(set)
    }
}

fn member(set: &Option<BTreeSet<String>>, value: &str) -> bool {
    set.as_ref().map_or(true, |values| values.contains(value))
}
