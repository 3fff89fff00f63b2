use serde::{Deserialize, Serialize};

use crate::matching::domain::AgeRange;

/// Tuning knobs for the match scorer.
///
/// The defaults reproduce the production rubric: relevance 40%, audience 30%,
/// performance/price 20%, constraints 10%, engagement normalised against a 6% rate
/// and views against 150k.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchConfig {
    pub weights: MatchWeights,
    pub relevance_mix: RelevanceMix,
    pub audience_mix: AudienceMix,
    pub perf_price_mix: PerfPriceMix,
    /// Engagement rate treated as "perfect" (sample max in the roster is about 0.06).
    pub engagement_cap: f64,
    /// Average views treated as "perfect".
    pub views_cap: f64,
    /// Window applied when a brief carries no target ages.
    pub default_age_range: AgeRange,
    /// Head positions reserved for distinct primary verticals.
    pub diversified_slots: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            relevance_mix: RelevanceMix::default(),
            audience_mix: AudienceMix::default(),
            perf_price_mix: PerfPriceMix::default(),
            engagement_cap: 0.06,
            views_cap: 150_000.0,
            default_age_range: AgeRange::new(18.0, 35.0),
            diversified_slots: 3,
        }
    }
}

/// Outer weights combining the four sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchWeights {
    pub relevance: f64,
    pub audience: f64,
    pub perf_price: f64,
    pub constraints: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            relevance: 0.40,
            audience: 0.30,
            perf_price: 0.20,
            constraints: 0.10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceMix {
    pub category: f64,
    pub platform: f64,
    pub tone: f64,
}

impl Default for RelevanceMix {
    fn default() -> Self {
        Self {
            category: 0.60,
            platform: 0.25,
            tone: 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudienceMix {
    pub geo: f64,
    pub age: f64,
}

impl Default for AudienceMix {
    fn default() -> Self {
        Self { geo: 0.70, age: 0.30 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerfPriceMix {
    pub engagement: f64,
    pub views: f64,
    pub price: f64,
}

impl Default for PerfPriceMix {
    fn default() -> Self {
        Self {
            engagement: 0.55,
            views: 0.35,
            price: 0.10,
        }
    }
}

impl MatchConfig {
    /// Validate tuning at startup.
    /// Returns all problems at once (not just the first).
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let coefficients = [
            ("weights.relevance", self.weights.relevance),
            ("weights.audience", self.weights.audience),
            ("weights.perfPrice", self.weights.perf_price),
            ("weights.constraints", self.weights.constraints),
            ("relevanceMix.category", self.relevance_mix.category),
            ("relevanceMix.platform", self.relevance_mix.platform),
            ("relevanceMix.tone", self.relevance_mix.tone),
            ("audienceMix.geo", self.audience_mix.geo),
            ("audienceMix.age", self.audience_mix.age),
            ("perfPriceMix.engagement", self.perf_price_mix.engagement),
            ("perfPriceMix.views", self.perf_price_mix.views),
            ("perfPriceMix.price", self.perf_price_mix.price),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name}: must be a non-negative number (found {value})"));
            }
        }

        if !self.engagement_cap.is_finite() || self.engagement_cap <= 0.0 {
            errors.push(format!(
                "engagementCap: must be positive (found {})",
                self.engagement_cap
            ));
        }
        if !self.views_cap.is_finite() || self.views_cap <= 0.0 {
            errors.push(format!("viewsCap: must be positive (found {})", self.views_cap));
        }
        if !self.default_age_range.is_ordered() {
            errors.push(format!(
                "defaultAgeRange: min {} must not exceed max {}",
                self.default_age_range.min, self.default_age_range.max
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
