use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    BillingId, BillingRecord, BillingSummary, BrandBilling, BrandBillingRequest, CreatorPayout,
    CreatorPayoutRequest,
};
use super::identifiers::{is_valid_email, is_valid_gstin, is_valid_ifsc, is_valid_pan, is_valid_upi};
use super::repository::{BillingRepository, BillingRepositoryError};
use super::BillingConfig;

/// Service owning id allocation, tax computation, and identifier checks for the ledger.
pub struct BillingService<R> {
    repository: Arc<R>,
    config: BillingConfig,
    sequence: AtomicU64,
}

impl<R> BillingService<R>
where
    R: BillingRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: BillingConfig) -> Self {
        Self {
            repository,
            config,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_billing_id(&self) -> BillingId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        BillingId(format!("bill-{id:06}"))
    }

    /// Validate a brand billing form, apply GST, and open a new ledger record.
    pub fn create_brand_billing(
        &self,
        request: BrandBillingRequest,
    ) -> Result<BillingRecord, BillingError> {
        let company = required_text(request.company, "company")?;
        let gstin = required_text(request.gstin, "GSTIN")?;
        if !is_valid_gstin(&gstin) {
            return Err(BillingError::invalid("GSTIN", "is not a valid GSTIN"));
        }
        let budget_inr = positive_amount(request.budget_inr, "budgetINR")?;
        let email = optional_text(request.email);
        if let Some(email) = email.as_deref() {
            if !is_valid_email(email) {
                return Err(BillingError::invalid("email", "is not a valid e-mail address"));
            }
        }

        let tax = self.config.tax_on(budget_inr);
        let record = BillingRecord {
            id: self.next_billing_id(),
            brand_billing: BrandBilling {
                company,
                gstin,
                address: optional_text(request.address),
                city: optional_text(request.city),
                state: optional_text(request.state),
                pincode: optional_text(request.pincode),
                email,
                phone: optional_text(request.phone),
                budget_inr,
                payment_method: optional_text(request.payment_method),
                tax,
                total_with_tax: budget_inr + tax,
            },
            creator_payout: None,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(record).map_err(log_store_failure)?;
        info!(
            billing_id = %stored.id,
            company = %stored.brand_billing.company,
            total = stored.brand_billing.total_with_tax,
            "brand billing created"
        );
        Ok(stored)
    }

    /// Attach (or replace) the creator payout on an existing billing.
    pub fn add_creator_payout(
        &self,
        request: CreatorPayoutRequest,
    ) -> Result<BillingRecord, BillingError> {
        let billing_id = BillingId(required_text(request.billing_id, "billingId")?);
        let name = required_text(request.name, "name")?;
        let pan = required_text(request.pan, "PAN")?;
        if !is_valid_pan(&pan) {
            return Err(BillingError::invalid("PAN", "is not a valid PAN"));
        }
        let ifsc = optional_text(request.ifsc);
        if ifsc.as_deref().is_some_and(|ifsc| !is_valid_ifsc(ifsc)) {
            return Err(BillingError::invalid("IFSC", "is not a valid IFSC"));
        }
        let upi = optional_text(request.upi);
        if upi.as_deref().is_some_and(|upi| !is_valid_upi(upi)) {
            return Err(BillingError::invalid("UPI", "is not a valid UPI handle"));
        }
        let amount_inr = positive_amount(request.amount_inr, "amountINR")?;

        let mut record = self.fetch(&billing_id)?;
        let replaced = record.creator_payout.is_some();
        record.creator_payout = Some(CreatorPayout {
            name,
            pan,
            upi,
            bank_name: optional_text(request.bank_name),
            account_number: optional_text(request.account_number),
            ifsc,
            address: optional_text(request.address),
            city: optional_text(request.city),
            state: optional_text(request.state),
            pincode: optional_text(request.pincode),
            amount_inr,
        });

        self.repository
            .update(record.clone())
            .map_err(log_store_failure)?;
        info!(billing_id = %record.id, replaced, "creator payout recorded");
        Ok(record)
    }

    /// Full record for the summary view.
    pub fn summary(&self, id: &BillingId) -> Result<BillingRecord, BillingError> {
        self.fetch(id)
    }

    /// Ledger listing, newest first.
    pub fn billings(&self) -> Result<Vec<BillingSummary>, BillingError> {
        let mut records = self.repository.all().map_err(log_store_failure)?;
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records.iter().map(BillingRecord::summary).collect())
    }

    pub fn config(&self) -> &BillingConfig {
        &self.config
    }

    fn fetch(&self, id: &BillingId) -> Result<BillingRecord, BillingError> {
        self.repository
            .fetch(id)
            .map_err(log_store_failure)?
            .ok_or_else(|| BillingError::NotFound(id.clone()))
    }
}

fn log_store_failure(err: BillingRepositoryError) -> BillingRepositoryError {
    warn!(error = %err, "billing store call failed");
    err
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, BillingError> {
    optional_text(value).ok_or(BillingError::MissingField(field))
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn positive_amount(value: Option<f64>, field: &'static str) -> Result<f64, BillingError> {
    match value {
        Some(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        Some(amount) => Err(BillingError::invalid(
            field,
            format!("must be a positive amount (found {amount})"),
        )),
        None => Err(BillingError::MissingField(field)),
    }
}

/// Error raised by the billing service.
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("`{0}` is required")]
    MissingField(&'static str),
    #[error("`{field}` {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("billing {0} not found")]
    NotFound(BillingId),
    #[error(transparent)]
    Repository(#[from] BillingRepositoryError),
}

impl BillingError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::InvalidField { .. })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct MemoryLedger {
        records: Mutex<BTreeMap<BillingId, BillingRecord>>,
    }

    impl BillingRepository for MemoryLedger {
        fn insert(&self, record: BillingRecord) -> Result<BillingRecord, BillingRepositoryError> {
            let mut records = self.records.lock().expect("ledger mutex poisoned");
            if records.contains_key(&record.id) {
                return Err(BillingRepositoryError::Conflict(record.id));
            }
            records.insert(record.id.clone(), record.clone());
            Ok(record)
        }

        fn update(&self, record: BillingRecord) -> Result<(), BillingRepositoryError> {
            let mut records = self.records.lock().expect("ledger mutex poisoned");
            match records.get_mut(&record.id) {
                Some(existing) => {
                    *existing = record;
                    Ok(())
                }
                None => Err(BillingRepositoryError::NotFound(record.id)),
            }
        }

        fn fetch(&self, id: &BillingId) -> Result<Option<BillingRecord>, BillingRepositoryError> {
            Ok(self
                .records
                .lock()
                .expect("ledger mutex poisoned")
                .get(id)
                .cloned())
        }

        fn all(&self) -> Result<Vec<BillingRecord>, BillingRepositoryError> {
            Ok(self
                .records
                .lock()
                .expect("ledger mutex poisoned")
                .values()
                .cloned()
                .collect())
        }
    }

    struct OfflineLedger;

    impl BillingRepository for OfflineLedger {
        fn insert(&self, _: BillingRecord) -> Result<BillingRecord, BillingRepositoryError> {
            Err(BillingRepositoryError::Unavailable("ledger offline".to_string()))
        }

        fn update(&self, _: BillingRecord) -> Result<(), BillingRepositoryError> {
            Err(BillingRepositoryError::Unavailable("ledger offline".to_string()))
        }

        fn fetch(&self, _: &BillingId) -> Result<Option<BillingRecord>, BillingRepositoryError> {
            Err(BillingRepositoryError::Unavailable("ledger offline".to_string()))
        }

        fn all(&self) -> Result<Vec<BillingRecord>, BillingRepositoryError> {
            Err(BillingRepositoryError::Unavailable("ledger offline".to_string()))
        }
    }

    fn service() -> BillingService<MemoryLedger> {
        BillingService::new(Arc::new(MemoryLedger::default()), BillingConfig::default())
    }

    fn brand_request() -> BrandBillingRequest {
        BrandBillingRequest {
            company: Some("Glow Labs Pvt Ltd".to_string()),
            gstin: Some("27ABCDE1234F1Z5".to_string()),
            city: Some("Mumbai".to_string()),
            email: Some("accounts@glowlabs.in".to_string()),
            budget_inr: Some(50_000.0),
            payment_method: Some("NEFT".to_string()),
            ..BrandBillingRequest::default()
        }
    }

    fn payout_request(billing_id: &BillingId) -> CreatorPayoutRequest {
        CreatorPayoutRequest {
            billing_id: Some(billing_id.0.clone()),
            name: Some("Riya Sharma".to_string()),
            pan: Some("ABCDE1234F".to_string()),
            upi: Some("riya.styles@okhdfc".to_string()),
            ifsc: Some("HDFC0001234".to_string()),
            amount_inr: Some(15_000.0),
            ..CreatorPayoutRequest::default()
        }
    }

    #[test]
    fn brand_billing_applies_gst_and_sequential_ids() {
        let service = service();

        let first = service
            .create_brand_billing(brand_request())
            .expect("billing created");
        let second = service
            .create_brand_billing(brand_request())
            .expect("billing created");

        assert_eq!(first.id, BillingId("bill-000001".to_string()));
        assert_eq!(second.id, BillingId("bill-000002".to_string()));
        assert_eq!(first.brand_billing.tax, 9_000.0);
        assert_eq!(first.brand_billing.total_with_tax, 59_000.0);
        assert!(first.creator_payout.is_none());
    }

    #[test]
    fn custom_gst_rate_is_honoured() {
        let service = BillingService::new(
            Arc::new(MemoryLedger::default()),
            BillingConfig { gst_rate: 0.05 },
        );

        let record = service
            .create_brand_billing(brand_request())
            .expect("billing created");

        assert_eq!(record.brand_billing.tax, 2_500.0);
        assert_eq!(record.brand_billing.total_with_tax, 52_500.0);
    }

    #[test]
    fn brand_billing_rejects_bad_fields() {
        let service = service();
        let cases = [
            (
                BrandBillingRequest {
                    company: Some("  ".to_string()),
                    ..brand_request()
                },
                "company",
            ),
            (
                BrandBillingRequest {
                    gstin: Some("27ABCDE1234F1X5".to_string()),
                    ..brand_request()
                },
                "GSTIN",
            ),
            (
                BrandBillingRequest {
                    budget_inr: Some(0.0),
                    ..brand_request()
                },
                "budgetINR",
            ),
            (
                BrandBillingRequest {
                    email: Some("accounts".to_string()),
                    ..brand_request()
                },
                "email",
            ),
        ];

        for (request, expected) in cases {
            let err = service
                .create_brand_billing(request)
                .expect_err("request is invalid");
            assert!(err.is_validation());
            assert!(err.to_string().contains(expected), "{err} should name {expected}");
        }
    }

    #[test]
    fn payout_attaches_to_existing_billing() {
        let service = service();
        let billing = service
            .create_brand_billing(brand_request())
            .expect("billing created");

        let updated = service
            .add_creator_payout(payout_request(&billing.id))
            .expect("payout recorded");

        let payout = updated.creator_payout.as_ref().expect("payout present");
        assert_eq!(payout.pan, "ABCDE1234F");
        assert_eq!(payout.amount_inr, 15_000.0);
        assert_eq!(service.summary(&billing.id).expect("summary"), updated);
    }

    #[test]
    fn payout_for_unknown_billing_is_not_found() {
        let service = service();
        let missing = BillingId("bill-999999".to_string());

        let err = service
            .add_creator_payout(payout_request(&missing))
            .expect_err("no such billing");

        assert!(matches!(err, BillingError::NotFound(id) if id == missing));
    }

    #[test]
    fn payout_validates_optional_bank_details_only_when_present() {
        let service = service();
        let billing = service
            .create_brand_billing(brand_request())
            .expect("billing created");

        let bare = CreatorPayoutRequest {
            upi: None,
            ifsc: None,
            ..payout_request(&billing.id)
        };
        assert!(service.add_creator_payout(bare).is_ok());

        for (request, field) in [
            (
                CreatorPayoutRequest {
                    pan: Some("ABCDE12345".to_string()),
                    ..payout_request(&billing.id)
                },
                "PAN",
            ),
            (
                CreatorPayoutRequest {
                    ifsc: Some("HDFC1001234".to_string()),
                    ..payout_request(&billing.id)
                },
                "IFSC",
            ),
            (
                CreatorPayoutRequest {
                    upi: Some("riya@".to_string()),
                    ..payout_request(&billing.id)
                },
                "UPI",
            ),
            (
                CreatorPayoutRequest {
                    pan: None,
                    ..payout_request(&billing.id)
                },
                "PAN",
            ),
        ] {
            let err = service
                .add_creator_payout(request)
                .expect_err("payout is invalid");
            assert!(err.is_validation());
            assert!(err.to_string().contains(field));
        }
    }

    #[test]
    fn listing_is_newest_first_and_flags_payouts() {
        let service = service();
        let older = service
            .create_brand_billing(brand_request())
            .expect("billing created");
        let newer = service
            .create_brand_billing(BrandBillingRequest {
                company: Some("Chai Point".to_string()),
                ..brand_request()
            })
            .expect("billing created");
        service
            .add_creator_payout(payout_request(&older.id))
            .expect("payout recorded");

        let listing = service.billings().expect("listing");

        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].billing_id, newer.id);
        assert_eq!(listing[0].company, "Chai Point");
        assert!(!listing[0].has_creator_payout);
        assert_eq!(listing[1].billing_id, older.id);
        assert!(listing[1].has_creator_payout);
        assert_eq!(listing[1].total, 59_000.0);
    }

    #[test]
    fn store_outage_surfaces_as_repository_error() {
        let service = BillingService::new(Arc::new(OfflineLedger), BillingConfig::default());

        let err = service
            .create_brand_billing(brand_request())
            .expect_err("ledger offline");

        assert!(matches!(
            err,
            BillingError::Repository(BillingRepositoryError::Unavailable(_))
        ));
        assert!(!err.is_validation());
        assert!(service.billings().is_err());
    }
}
