//! Append-only tables backing the two spreadsheet sheets.
//!
//! Neither table exposes a way to edit or remove rows. Appending produces a new
//! table value and leaves the receiver untouched, so a caller can keep the old
//! snapshot until the new one has been persisted.

use std::slice;

use crate::errors::ValidationError;

use super::{Payment, PaymentDraft, Purchase, PurchaseDraft};

/// Rows of the `Data` sheet in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Purchases {
    rows: Vec<Purchase>,
}

impl Purchases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `draft` and returns a table with the new row appended.
    pub fn append(&self, draft: PurchaseDraft) -> Result<Purchases, ValidationError> {
        let purchase = draft.into_purchase()?;
        let mut rows = self.rows.clone();
        rows.push(purchase);
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Purchase] {
        &self.rows
    }

    pub fn iter(&self) -> slice::Iter<'_, Purchase> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&Purchase> {
        self.rows.last()
    }
}

impl FromIterator<Purchase> for Purchases {
    fn from_iter<I: IntoIterator<Item = Purchase>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Purchases {
    type Item = &'a Purchase;
    type IntoIter = slice::Iter<'a, Purchase>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Rows of the `Pagos` sheet in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payments {
    rows: Vec<Payment>,
}

impl Payments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a table with the payment appended. Payments are not validated.
    pub fn append(&self, draft: PaymentDraft) -> Payments {
        let mut rows = self.rows.clone();
        rows.push(Payment::from(draft));
        Self { rows }
    }

    pub fn rows(&self) -> &[Payment] {
        &self.rows
    }

    pub fn iter(&self) -> slice::Iter<'_, Payment> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&Payment> {
        self.rows.last()
    }
}

impl FromIterator<Payment> for Payments {
    fn from_iter<I: IntoIterator<Item = Payment>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Payments {
    type Item = &'a Payment;
    type IntoIter = slice::Iter<'a, Payment>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
