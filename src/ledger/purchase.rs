use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// One recorded purchase of boxes of a crop from a farmer.
///
/// `total_cost` is stored alongside the inputs it derives from and is only ever
/// computed once, when the row is created from a [`PurchaseDraft`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub farmer: String,
    pub location: String,
    pub date: NaiveDate,
    pub boxes: u32,
    pub purchase_price: f64,
    pub total_cost: f64,
    pub packaging: String,
    pub crop: String,
    pub client: String,
    pub sale_price: f64,
}

impl Purchase {
    /// Gross profit for the row: `(sale price - purchase price) * boxes`.
    pub fn gross_profit(&self) -> f64 {
        (self.sale_price - self.purchase_price) * f64::from(self.boxes)
    }
}

/// Fields of a purchase that can be rejected during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PurchaseField {
    Farmer,
    Location,
    Crop,
    Client,
    Date,
    Boxes,
    PurchasePrice,
    SalePrice,
}

impl PurchaseField {
    pub fn label(self) -> &'static str {
        match self {
            PurchaseField::Farmer => "farmer",
            PurchaseField::Location => "location",
            PurchaseField::Crop => "crop",
            PurchaseField::Client => "client",
            PurchaseField::Date => "date",
            PurchaseField::Boxes => "boxes",
            PurchaseField::PurchasePrice => "purchase price",
            PurchaseField::SalePrice => "sale price",
        }
    }
}

impl fmt::Display for PurchaseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unvalidated purchase input as captured by a form or command line.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseDraft {
    pub farmer: String,
    pub location: String,
    pub date: NaiveDate,
    pub boxes: u32,
    pub purchase_price: f64,
    pub packaging: String,
    pub crop: String,
    pub client: String,
    pub sale_price: f64,
}

impl PurchaseDraft {
    /// Checks the draft and reports every offending field at once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut fields = Vec::new();
        let required = [
            (PurchaseField::Farmer, &self.farmer),
            (PurchaseField::Location, &self.location),
            (PurchaseField::Crop, &self.crop),
            (PurchaseField::Client, &self.client),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                fields.push(field);
            }
        }
        if !is_valid_date(self.date) {
            fields.push(PurchaseField::Date);
        }
        if self.boxes == 0 {
            fields.push(PurchaseField::Boxes);
        }
        if !is_valid_price(self.purchase_price) {
            fields.push(PurchaseField::PurchasePrice);
        }
        if !is_valid_price(self.sale_price) {
            fields.push(PurchaseField::SalePrice);
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(fields))
        }
    }

    /// Validates the draft and turns it into a stored row, computing the total cost.
    pub fn into_purchase(self) -> Result<Purchase, ValidationError> {
        self.validate()?;
        let total_cost = f64::from(self.boxes) * self.purchase_price;
        Ok(Purchase {
            farmer: self.farmer.trim().to_string(),
            location: self.location.trim().to_string(),
            date: self.date,
            boxes: self.boxes,
            purchase_price: self.purchase_price,
            total_cost,
            packaging: self.packaging.trim().to_string(),
            crop: self.crop.trim().to_string(),
            client: self.client.trim().to_string(),
            sale_price: self.sale_price,
        })
    }
}

pub(crate) fn is_valid_price(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Dates the workbook's 1900 date system can store.
pub(crate) fn is_valid_date(date: NaiveDate) -> bool {
    (1900..=9999).contains(&date.year())
}
