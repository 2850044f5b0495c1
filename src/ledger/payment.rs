use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A payment made to a farmer against the outstanding balance.
///
/// `farmer` is a loose reference to [`Purchase::farmer`](super::Purchase::farmer);
/// nothing guarantees a matching purchase exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub farmer: String,
    pub date: NaiveDate,
    pub amount: f64,
}

/// Payment input captured by a form or command line.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentDraft {
    pub farmer: String,
    pub date: NaiveDate,
    pub amount: f64,
}

impl From<PaymentDraft> for Payment {
    fn from(draft: PaymentDraft) -> Self {
        Self {
            farmer: draft.farmer.trim().to_string(),
            date: draft.date,
            amount: draft.amount,
        }
    }
}
