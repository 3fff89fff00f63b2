use super::domain::{BillingId, BillingRecord};

/// Storage abstraction for the billing ledger.
pub trait BillingRepository: Send + Sync {
    fn insert(&self, record: BillingRecord) -> Result<BillingRecord, BillingRepositoryError>;
    fn update(&self, record: BillingRecord) -> Result<(), BillingRepositoryError>;
    fn fetch(&self, id: &BillingId) -> Result<Option<BillingRecord>, BillingRepositoryError>;
    fn all(&self) -> Result<Vec<BillingRecord>, BillingRepositoryError>;
}

/// Error enumeration for ledger store failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BillingRepositoryError {
    #[error("billing {0} already exists")]
    Conflict(BillingId),
    #[error("billing {0} not found")]
    NotFound(BillingId),
    #[error("billing store unavailable: {0}")]
    Unavailable(String),
}
