use super::{Payments, Purchases};

/// Snapshot of both tables as they were last loaded or persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    pub purchases: Purchases,
    pub payments: Payments,
}

impl Ledger {
    pub fn new(purchases: Purchases, payments: Payments) -> Self {
        Self {
            purchases,
            payments,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.purchases.is_empty() && self.payments.is_empty()
    }
}
