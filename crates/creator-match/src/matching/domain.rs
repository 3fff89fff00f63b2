use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Identifier wrapper for roster documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CreatorId(pub String);

impl fmt::Display for CreatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inclusive audience age window, carried on the wire as `[min, max]`. Fractional ages are allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeRange {
    pub min: f64,
    pub max: f64,
}

impl AgeRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Both bounds finite and `min <= max`.
    pub fn is_ordered(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    pub fn overlaps(&self, low: f64, high: f64) -> bool {
        self.min.max(low) <= self.max.min(high)
    }
}

impl Serialize for AgeRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.min, self.max].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AgeRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [min, max] = <[f64; 2]>::deserialize(deserializer)?;
        Ok(Self { min, max })
    }
}

/// Brand side restrictions on who may be booked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefConstraints {
    #[serde(default)]
    pub no_adult_content: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline_days: Option<u32>,
}

/// Validated campaign brief used as the query against the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandBrief {
    pub category: String,
    pub platforms: Vec<String>,
    #[serde(rename = "budgetINR")]
    pub budget_inr: f64,
    pub target_locations: Vec<String>,
    #[serde(default)]
    pub target_ages: Option<AgeRange>,
    #[serde(default)]
    pub tone: Vec<String>,
    #[serde(default)]
    pub constraints: Option<BriefConstraints>,
}

impl BrandBrief {
    pub fn excludes_adult_content(&self) -> bool {
        self.constraints
            .as_ref()
            .map(|constraints| constraints.no_adult_content)
            .unwrap_or(false)
    }
}

/// Raw request payload; every field is optional so validation can report all gaps at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefSubmission {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub platforms: Option<Vec<String>>,
    #[serde(default, rename = "budgetINR")]
    pub budget_inr: Option<f64>,
    #[serde(default)]
    pub target_locations: Option<Vec<String>>,
    #[serde(default)]
    pub target_ages: Option<Vec<f64>>,
    #[serde(default)]
    pub tone: Option<Vec<String>>,
    #[serde(default)]
    pub constraints: Option<BriefConstraints>,
}

/// Content-safety markers attached to a creator document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyFlags {
    #[serde(default, deserialize_with = "lenient")]
    pub adult: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub controversial: bool,
}

/// Roster document. Everything except identity is optional: absent, `null` or mistyped values
/// fall back to their defaults and contribute zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorProfile {
    #[serde(alias = "_id")]
    pub id: CreatorId,
    pub handle: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub verticals: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub platforms: Vec<String>,
    #[serde(default, deserialize_with = "lenient_fractions")]
    pub audience_geo: BTreeMap<String, f64>,
    #[serde(default, deserialize_with = "lenient_fractions")]
    pub audience_age: BTreeMap<String, f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub avg_views: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub engagement_rate: f64,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub past_brand_categories: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub content_tone: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub safety_flags: SafetyFlags,
    #[serde(default, rename = "basePriceINR", deserialize_with = "lenient")]
    pub base_price_inr: Option<f64>,
}

/// Weighted sub-scores on a 0-100 scale, kept for audits of a match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub relevance: f64,
    pub audience: f64,
    pub perf_price: f64,
    pub constraints: f64,
}

/// Ranked match returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCreator {
    pub id: CreatorId,
    pub handle: String,
    pub verticals: Vec<String>,
    pub platforms: Vec<String>,
    #[serde(rename = "basePriceINR")]
    pub base_price_inr: Option<f64>,
    pub score: u8,
    pub reasons: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

impl ScoredCreator {
    /// Lower-cased first vertical; blank entries count as no vertical.
    pub fn primary_vertical(&self) -> Option<String> {
        self.verticals
            .first()
            .filter(|vertical| !vertical.trim().is_empty())
            .map(|vertical| vertical.to_lowercase())
    }
}

/// Reads any JSON value and falls back to `T::default()` when it does not fit.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Keeps the string entries of an array and drops everything else.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let strings = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(text) => Some(text),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(strings)
}

/// Keeps the numeric entries of a `{label: fraction}` object and drops everything else.
fn lenient_fractions<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let fractions = match Value::deserialize(deserializer)? {
        Value::Object(entries) => entries
            .into_iter()
            .filter_map(|(label, fraction)| fraction.as_f64().map(|fraction| (label, fraction)))
            .collect(),
        _ => BTreeMap::new(),
    };
    Ok(fractions)
}
