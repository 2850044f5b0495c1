use std::path::Path;

use tracing::debug;

use crate::errors::LedgerError;
use crate::ledger::{Ledger, Payment, PaymentDraft, Purchase, PurchaseDraft};
use crate::storage::LedgerStorage;

/// Facade that owns the storage backend and the current ledger snapshot.
///
/// Each record operation builds the next snapshot, persists both tables, and
/// only then replaces the current snapshot. A validation or I/O failure leaves
/// the snapshot as it was.
pub struct LedgerManager {
    current: Ledger,
    storage: Box<dyn LedgerStorage>,
}

impl LedgerManager {
    /// Loads the ledger from `storage`.
    pub fn open(storage: Box<dyn LedgerStorage>) -> Result<Self, LedgerError> {
        let current = storage.load()?;
        Ok(Self { current, storage })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.current
    }

    pub fn path(&self) -> &Path {
        self.storage.path()
    }

    /// Re-reads the backing file, discarding the in-memory snapshot.
    pub fn reload(&mut self) -> Result<&Ledger, LedgerError> {
        self.current = self.storage.load()?;
        Ok(&self.current)
    }

    pub fn record_purchase(&mut self, draft: PurchaseDraft) -> Result<&Purchase, LedgerError> {
        let purchases = self.current.purchases.append(draft)?;
        self.storage.persist(&purchases, &self.current.payments)?;
        self.current.purchases = purchases;
        debug!(rows = self.current.purchases.len(), "purchase recorded");
        self.current
            .purchases
            .last()
            .ok_or_else(|| LedgerError::Schema("purchase table empty after append".into()))
    }

    pub fn record_payment(&mut self, draft: PaymentDraft) -> Result<&Payment, LedgerError> {
        let payments = self.current.payments.append(draft);
        self.storage.persist(&self.current.purchases, &payments)?;
        self.current.payments = payments;
        debug!(rows = self.current.payments.len(), "payment recorded");
        self.current
            .payments
            .last()
            .ok_or_else(|| LedgerError::Schema("payment table empty after append".into()))
    }
}
