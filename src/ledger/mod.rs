//! Purchase and payment records, their append-only tables, and the snapshot
//! that bundles them.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod payment;
pub mod purchase;
pub mod table;

pub use ledger::Ledger;
pub use payment::{Payment, PaymentDraft};
pub use purchase::{Purchase, PurchaseDraft, PurchaseField};
pub use table::{Payments, Purchases};
