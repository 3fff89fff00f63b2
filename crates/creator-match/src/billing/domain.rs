use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sequential ledger identifier, e.g. `bill-000001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BillingId(pub String);

impl fmt::Display for BillingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw brand billing form. Required fields are optional here so the service can name what is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandBillingRequest {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, rename = "GSTIN")]
    pub gstin: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, rename = "budgetINR")]
    pub budget_inr: Option<f64>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// Brand side of a billing record with GST applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandBilling {
    pub company: String,
    #[serde(rename = "GSTIN")]
    pub gstin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "budgetINR")]
    pub budget_inr: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub tax: f64,
    pub total_with_tax: f64,
}

/// Raw creator payout form, naming the billing it settles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorPayoutRequest {
    #[serde(default)]
    pub billing_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "PAN")]
    pub pan: Option<String>,
    #[serde(default, rename = "UPI")]
    pub upi: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default, rename = "IFSC")]
    pub ifsc: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default, rename = "amountINR")]
    pub amount_inr: Option<f64>,
}

/// Creator side of a billing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorPayout {
    pub name: String,
    #[serde(rename = "PAN")]
    pub pan: String,
    #[serde(default, rename = "UPI", skip_serializing_if = "Option::is_none")]
    pub upi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, rename = "IFSC", skip_serializing_if = "Option::is_none")]
    pub ifsc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(rename = "amountINR")]
    pub amount_inr: f64,
}

/// Ledger entry: one brand billing plus at most one creator payout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecord {
    pub id: BillingId,
    pub brand_billing: BrandBilling,
    #[serde(default)]
    pub creator_payout: Option<CreatorPayout>,
    pub created_at: DateTime<Utc>,
}

impl BillingRecord {
    pub fn summary(&self) -> BillingSummary {
        BillingSummary {
            billing_id: self.id.clone(),
            company: self.brand_billing.company.clone(),
            budget: self.brand_billing.budget_inr,
            total: self.brand_billing.total_with_tax,
            date: self.created_at,
            has_creator_payout: self.creator_payout.is_some(),
        }
    }
}

/// Row in the billing list view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingSummary {
    pub billing_id: BillingId,
    pub company: String,
    pub budget: f64,
    pub total: f64,
    pub date: DateTime<Utc>,
    pub has_creator_payout: bool,
}
