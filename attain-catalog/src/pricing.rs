use serde::{Deserialize, Serialize};
use attain_core::{CoreResult, ValidationError};
use crate::attainment::attainment_ratio;
use crate::product::{Catalog, ProductPlan};

/// Engine settings. Each historical form variant is one combination of these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingConfig {
    /// Shortest accepted term, in months
    pub min_term_months: i32,

    /// Longest accepted term, in months
    pub max_term_months: i32,

    /// Reject zero units (negative units are always rejected)
    pub require_positive_units: bool,

    /// Restrict target unit prices to [primary, primary + secondary]
    pub bound_unit_price: bool,

    /// Compute quota attainment for plans that carry quota credits
    pub track_quota: bool,

    /// Terms strictly longer than this are annualized
    pub annualize_after_months: i32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            min_term_months: 1,
            max_term_months: 36,
            require_positive_units: true,
            bound_unit_price: true,
            track_quota: true,
            annualize_after_months: 12,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageInput {
    pub units: i32,
    pub term_months: i32,
}

impl UsageInput {
    pub fn new(units: i32, term_months: i32) -> Self {
        Self { units, term_months }
    }
}

/// How the secondary offering is discounted. The two forms are exclusive.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DiscountInput {
    #[default]
    None,
    /// Percentage off the secondary list price, 0..=100
    Percentage(f64),
    /// Blended per-unit monthly price the discount is back-solved from
    TargetUnitPrice(f64),
}

impl DiscountInput {
    /// Build from two independent form fields. The percentage wins when both are set.
    pub fn from_fields(percentage: Option<f64>, target_unit_price: Option<f64>) -> Self {
        match (percentage, target_unit_price) {
            (Some(pct), _) => DiscountInput::Percentage(pct),
            (None, Some(price)) => DiscountInput::TargetUnitPrice(price),
            (None, None) => DiscountInput::None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PricingRequest {
    pub usage: UsageInput,
    #[serde(default)]
    pub discount: DiscountInput,
    /// Quota target for the term, in dollars
    #[serde(default)]
    pub quota_target: Option<f64>,
}

impl Default for UsageInput {
    fn default() -> Self {
        Self { units: 1, term_months: 12 }
    }
}

impl PricingRequest {
    pub fn new(usage: UsageInput) -> Self {
        Self {
            usage,
            discount: DiscountInput::None,
            quota_target: None,
        }
    }

    pub fn with_discount(mut self, discount: DiscountInput) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_quota_target(mut self, target: f64) -> Self {
        self.quota_target = Some(target);
        self
    }
}

/// Revenue for one offering of a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OfferingRevenue {
    pub list_monthly: f64,
    pub monthly: f64,
    pub term: f64,
    pub discount_monthly: f64,
    pub discount_term: f64,
    /// Quota credit earned over the term, net of discount
    pub attainment: Option<f64>,
}

/// Result of one calculation. Values are unrounded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenueBreakdown {
    pub plan: String,
    pub units: i32,
    pub term_months: i32,
    pub discount_fraction: f64,
    pub primary: OfferingRevenue,
    pub secondary: OfferingRevenue,
    pub total_monthly: f64,
    pub total_term: f64,
    pub annualized_revenue: f64,
    pub total_discount_monthly: f64,
    pub total_discount_term: f64,
    /// Sum of per-offering attainment over the raw term
    pub term_attainment: Option<f64>,
    /// Reported attainment: annualized when `annualized` is set, else the term figure
    pub attainment: Option<f64>,
    pub annualized: bool,
    /// Term revenue as a percentage of the quota target
    pub attainment_pct: Option<f64>,
}

/// Subscription revenue and quota attainment calculator
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Look up `plan_name` in `catalog` and compute its breakdown.
    pub fn compute_for(
        &self,
        catalog: &Catalog,
        plan_name: &str,
        request: &PricingRequest,
    ) -> CoreResult<RevenueBreakdown> {
        let plan = catalog
            .get(plan_name)
            .ok_or_else(|| ValidationError::UnknownPlan(plan_name.to_string()))?;
        self.compute(plan, request)
    }

    pub fn compute(&self, plan: &ProductPlan, request: &PricingRequest) -> CoreResult<RevenueBreakdown> {
        let result = self.validate_and_compute(plan, request);
        if let Err(err) = &result {
            tracing::warn!(plan = %plan.name, kind = ?err.kind(), "Rejected pricing request: {}", err);
        }
        result
    }

    fn validate_and_compute(&self, plan: &ProductPlan, request: &PricingRequest) -> CoreResult<RevenueBreakdown> {
        let UsageInput { units, term_months } = request.usage;

        // Plans built outside a Catalog have not been checked yet.
        if let Some(reason) = plan.amount_problem() {
            return Err(ValidationError::InvalidPlan {
                name: plan.name.clone(),
                reason,
            });
        }
        self.validate_term(term_months)?;
        self.validate_units(units)?;
        if let Some(target) = request.quota_target {
            if !target.is_finite() || target < 0.0 {
                return Err(ValidationError::InvalidQuota(target));
            }
        }
        let discount = self.resolve_discount(plan, &request.discount)?;

        let units_f = units as f64;
        let term_f = term_months as f64;

        let primary_monthly = units_f * plan.primary_list_price;
        let secondary_list_monthly = units_f * plan.secondary_list_price;
        let secondary_monthly = secondary_list_monthly * (1.0 - discount);
        let discount_monthly = secondary_list_monthly * discount;
        let discount_term = discount_monthly * term_f;

        let track = self.config.track_quota;
        let credit = |c: Option<f64>| c.filter(|_| track).map(|c| units_f * c * term_f);

        let primary = OfferingRevenue {
            list_monthly: primary_monthly,
            monthly: primary_monthly,
            term: primary_monthly * term_f,
            discount_monthly: 0.0,
            discount_term: 0.0,
            attainment: credit(plan.primary_quota_credit),
        };

        // Only the discounted offering loses attainment, once.
        let secondary = OfferingRevenue {
            list_monthly: secondary_list_monthly,
            monthly: secondary_monthly,
            term: secondary_monthly * term_f,
            discount_monthly,
            discount_term,
            attainment: credit(plan.secondary_quota_credit).map(|a| a - discount_term),
        };

        let total_monthly = primary.monthly + secondary.monthly;
        let total_term = total_monthly * term_f;

        let term_attainment = match (primary.attainment, secondary.attainment) {
            (None, None) => None,
            (p, s) => Some(p.unwrap_or(0.0) + s.unwrap_or(0.0)),
        };
        let annualized = term_months > self.config.annualize_after_months;
        let attainment = term_attainment.map(|total| {
            if annualized {
                (total / term_f) * 12.0
            } else {
                total
            }
        });

        let attainment_pct = request
            .quota_target
            .and_then(|target| attainment_ratio(total_term, target));
        let annualized_revenue = total_monthly * 12.0;

        let figures = [
            primary.term,
            secondary.list_monthly,
            secondary.term,
            discount_term,
            total_term,
            annualized_revenue,
        ];
        let credits = [primary.attainment, secondary.attainment, term_attainment, attainment];
        if figures.into_iter().chain(credits.into_iter().flatten()).any(|v| !v.is_finite()) {
            return Err(ValidationError::InvalidPlan {
                name: plan.name.clone(),
                reason: format!("amounts overflow for {} units over {} months", units, term_months),
            });
        }

        tracing::debug!(
            plan = %plan.name,
            units,
            term_months,
            discount,
            total_term,
            "Computed revenue breakdown"
        );

        Ok(RevenueBreakdown {
            plan: plan.name.clone(),
            units,
            term_months,
            discount_fraction: discount,
            primary,
            secondary,
            total_monthly,
            total_term,
            annualized_revenue,
            total_discount_monthly: discount_monthly,
            total_discount_term: discount_term,
            term_attainment,
            attainment,
            annualized,
            attainment_pct,
        })
    }

    fn validate_term(&self, months: i32) -> CoreResult<()> {
        if months <= 0 || months < self.config.min_term_months || months > self.config.max_term_months {
            return Err(ValidationError::InvalidTerm {
                months,
                min: self.config.min_term_months,
                max: self.config.max_term_months,
            });
        }
        Ok(())
    }

    fn validate_units(&self, units: i32) -> CoreResult<()> {
        if units < 0 || (units == 0 && self.config.require_positive_units) {
            return Err(ValidationError::InvalidUsage { units });
        }
        Ok(())
    }

    /// Resolve the discount fraction applied to the secondary offering.
    fn resolve_discount(&self, plan: &ProductPlan, discount: &DiscountInput) -> CoreResult<f64> {
        let fraction = match *discount {
            DiscountInput::None => 0.0,
            DiscountInput::Percentage(pct) => pct / 100.0,
            DiscountInput::TargetUnitPrice(target) => {
                if !target.is_finite() {
                    return Err(ValidationError::unit_price(target, "not a number"));
                }
                if plan.secondary_list_price <= 0.0 {
                    return Err(ValidationError::unit_price(
                        target,
                        format!("plan {} has no discountable offering", plan.name),
                    ));
                }

                let floor = plan.primary_list_price;
                let ceiling = plan.list_unit_price();
                if self.config.bound_unit_price && (target < floor || target > ceiling) {
                    return Err(ValidationError::unit_price(
                        target,
                        format!("must be between {} and {}", floor, ceiling),
                    ));
                }

                // Implied secondary price is target - primary; measured from the
                // blended ceiling so both band edges resolve to exactly 0 and 1.
                (ceiling - target) / plan.secondary_list_price
            }
        };

        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(ValidationError::InvalidDiscount {
                percent: fraction * 100.0,
            });
        }

        Ok(fraction)
    }
}
