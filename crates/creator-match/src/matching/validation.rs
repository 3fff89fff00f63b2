use std::fmt;

use super::domain::{AgeRange, BrandBrief, BriefSubmission};

const MAX_AUDIENCE_AGE: f64 = 120.0;

/// Single problem found in a brief submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BriefViolation {
    #[error("`{0}` is required")]
    MissingField(&'static str),
    #[error("`{field}` {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl BriefViolation {
    pub fn field(&self) -> &'static str {
        match self {
            BriefViolation::MissingField(field) => field,
            BriefViolation::InvalidField { field, .. } => field,
        }
    }
}

/// Every violation found in one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefRejection {
    pub violations: Vec<BriefViolation>,
}

impl fmt::Display for BriefRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.violations.iter().map(ToString::to_string).collect();
        write!(f, "brief rejected: {}", messages.join("; "))
    }
}

impl std::error::Error for BriefRejection {}

/// Turns raw request payloads into briefs the scorer can trust.
#[derive(Debug, Clone, Copy, Default)]
pub struct BriefValidator;

impl BriefValidator {
    pub fn validate(&self, submission: BriefSubmission) -> Result<BrandBrief, BriefRejection> {
        let mut violations = Vec::new();

        let category = match submission.category {
            Some(category) if category.trim().is_empty() => {
                violations.push(BriefViolation::InvalidField {
                    field: "category",
                    reason: "must not be blank".to_string(),
                });
                None
            }
            Some(category) => Some(category.trim().to_string()),
            None => {
                violations.push(BriefViolation::MissingField("category"));
                None
            }
        };

        let platforms = required(submission.platforms, "platforms", &mut violations);

        let budget_inr = match submission.budget_inr {
            Some(budget) if budget.is_finite() && budget > 0.0 => Some(budget),
            Some(budget) => {
                violations.push(BriefViolation::InvalidField {
                    field: "budgetINR",
                    reason: format!("must be a positive amount (found {budget})"),
                });
                None
            }
            None => {
                violations.push(BriefViolation::MissingField("budgetINR"));
                None
            }
        };

        let target_locations =
            required(submission.target_locations, "targetLocations", &mut violations);

        let target_ages = match submission.target_ages {
            Some(ages) => match age_range(&ages) {
                Ok(range) => Some(range),
                Err(reason) => {
                    violations.push(BriefViolation::InvalidField {
                        field: "targetAges",
                        reason,
                    });
                    None
                }
            },
            None => {
                violations.push(BriefViolation::MissingField("targetAges"));
                None
            }
        };

        match (category, platforms, budget_inr, target_locations, target_ages) {
            (
                Some(category),
                Some(platforms),
                Some(budget_inr),
                Some(target_locations),
                Some(target_ages),
            ) if violations.is_empty() => Ok(BrandBrief {
                category,
                platforms,
                budget_inr,
                target_locations,
                target_ages: Some(target_ages),
                tone: submission.tone.unwrap_or_default(),
                constraints: submission.constraints,
            }),
            _ => Err(BriefRejection { violations }),
        }
    }
}

fn required<T>(
    value: Option<T>,
    field: &'static str,
    violations: &mut Vec<BriefViolation>,
) -> Option<T> {
    if value.is_none() {
        violations.push(BriefViolation::MissingField(field));
    }
    value
}

fn age_range(ages: &[f64]) -> Result<AgeRange, String> {
    let [min, max] = ages else {
        return Err(format!("must be [min, max] (found {} values)", ages.len()));
    };

    let bound = |age: f64| -> Result<f64, String> {
        if (0.0..=MAX_AUDIENCE_AGE).contains(&age) {
            Ok(age)
        } else {
            Err(format!("age {age} outside 0-{MAX_AUDIENCE_AGE}"))
        }
    };

    let (min, max) = (bound(*min)?, bound(*max)?);
    if min > max {
        return Err(format!("min {min} exceeds max {max}"));
    }

    Ok(AgeRange::new(min, max))
}
