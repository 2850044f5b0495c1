pub mod cells;
pub mod xlsx_backend;

use std::path::Path;

use crate::{
    errors::LedgerError,
    ledger::{Ledger, Payments, Purchases},
};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Sheet holding one row per purchase.
pub const DATA_SHEET: &str = "Data";
/// Sheet holding one row per payment.
pub const PAYMENTS_SHEET: &str = "Pagos";

/// Canonical `Data` header, in the order columns are written.
pub const DATA_COLUMNS: [&str; 10] = [
    "Ra",
    "UBICACIÓN",
    "FECHA",
    "CAJAS",
    "PRECIO DE COMPRA",
    "TOTAL COMPRA",
    "EMPAQUE",
    "CULTIVO",
    "CLIENTE",
    "PRECIO DE VENTA",
];

/// Canonical `Pagos` header, in the order columns are written.
pub const PAYMENT_COLUMNS: [&str; 3] = ["Ra", "FECHA PAGO", "MONTO"];

/// Abstraction over the file that stores both tables.
pub trait LedgerStorage: Send + Sync {
    /// Reads both tables. A missing file yields two empty tables.
    fn load(&self) -> Result<Ledger>;

    /// Rewrites the whole file with both tables.
    fn persist(&self, purchases: &Purchases, payments: &Payments) -> Result<()>;

    fn path(&self) -> &Path;
}

pub use xlsx_backend::XlsxStorage;
