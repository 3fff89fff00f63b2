//! Campaign billing ledger: the brand invoice with GST and the creator payout booked against it.

pub mod domain;
pub mod identifiers;
pub mod repository;
pub mod router;
pub mod service;

use serde::{Deserialize, Serialize};

pub use domain::{
    BillingId, BillingRecord, BillingSummary, BrandBilling, BrandBillingRequest, CreatorPayout,
    CreatorPayoutRequest,
};
pub use repository::{BillingRepository, BillingRepositoryError};
pub use router::billing_router;
pub use service::{BillingError, BillingService};

pub const DEFAULT_GST_RATE: f64 = 0.18;

/// Tax settings applied when a brand billing is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingConfig {
    pub gst_rate: f64,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            gst_rate: DEFAULT_GST_RATE,
        }
    }
}

impl BillingConfig {
    /// GST owed on `budget_inr`, rounded to whole rupees.
    pub fn tax_on(&self, budget_inr: f64) -> f64 {
        (budget_inr * self.gst_rate).round()
    }
}
