use std::fmt;

use thiserror::Error;

use crate::ledger::PurchaseField;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Spreadsheet read error: {0}")]
    Read(#[from] calamine::XlsxError),
    #[error("Spreadsheet write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid sheet contents: {0}")]
    Schema(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Rejected purchase input, listing every field at fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    pub fields: Vec<PurchaseField>,
}

impl ValidationError {
    pub fn new(fields: Vec<PurchaseField>) -> Self {
        Self { fields }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.fields.iter().map(|field| field.label()).collect();
        write!(f, "missing or invalid fields: {}", names.join(", "))
    }
}
