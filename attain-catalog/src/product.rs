use serde::{Deserialize, Serialize};

/// A named product tier priced as two bundled offerings.
///
/// Prices and quota credits are per unit (user, seat) per month. The primary
/// offering is never discounted; the secondary offering carries the discount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPlan {
    pub name: String,
    pub primary_list_price: f64,
    pub secondary_list_price: f64,
    #[serde(default)]
    pub primary_quota_credit: Option<f64>,
    #[serde(default)]
    pub secondary_quota_credit: Option<f64>,
}

impl ProductPlan {
    pub fn new(name: impl Into<String>, primary_list_price: f64, secondary_list_price: f64) -> Self {
        Self {
            name: name.into(),
            primary_list_price,
            secondary_list_price,
            primary_quota_credit: None,
            secondary_quota_credit: None,
        }
    }

    pub fn with_quota_credits(mut self, primary: f64, secondary: f64) -> Self {
        self.primary_quota_credit = Some(primary);
        self.secondary_quota_credit = Some(secondary);
        self
    }

    /// Blended list price of one unit for one month.
    pub fn list_unit_price(&self) -> f64 {
        self.primary_list_price + self.secondary_list_price
    }

    pub fn tracks_quota(&self) -> bool {
        self.primary_quota_credit.is_some() || self.secondary_quota_credit.is_some()
    }

    /// Describes the first price or credit that is negative or not a finite number.
    pub(crate) fn amount_problem(&self) -> Option<String> {
        let amounts = [
            ("primary list price", Some(self.primary_list_price)),
            ("secondary list price", Some(self.secondary_list_price)),
            ("primary quota credit", self.primary_quota_credit),
            ("secondary quota credit", self.secondary_quota_credit),
        ];

        amounts.into_iter().find_map(|(label, value)| match value {
            Some(v) if !v.is_finite() || v < 0.0 => {
                Some(format!("{} must be a non-negative number, got {}", label, v))
            }
            _ => None,
        })
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::InvalidPlan {
                name: self.name.clone(),
                reason: "name must not be empty".to_string(),
            });
        }

        if let Some(reason) = self.amount_problem() {
            return Err(CatalogError::InvalidPlan {
                name: self.name.clone(),
                reason,
            });
        }

        Ok(())
    }
}

/// Fixed, insertion-ordered list of plans keyed by exact name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    plans: Vec<ProductPlan>,
}

impl Catalog {
    pub fn new(plans: Vec<ProductPlan>) -> Result<Self, CatalogError> {
        for (idx, plan) in plans.iter().enumerate() {
            plan.validate()?;
            if plans[..idx].iter().any(|p| p.name == plan.name) {
                return Err(CatalogError::DuplicatePlan(plan.name.clone()));
            }
        }

        Ok(Self { plans })
    }

    pub fn get(&self, name: &str) -> Option<&ProductPlan> {
        self.plans.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductPlan> {
        self.plans.iter()
    }

}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate plan name: {0}")]
    DuplicatePlan(String),

    #[error("Invalid plan {name}: {reason}")]
    InvalidPlan { name: String, reason: String },
}
