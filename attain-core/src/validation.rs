/// Rejections raised before a revenue breakdown is built.
///
/// Every variant is a local input problem; none of them is fatal to the
/// caller, which decides whether to block the calculation or reset the field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid term: {months} months (allowed {min}..={max})")]
    InvalidTerm { months: i32, min: i32, max: i32 },

    #[error("Invalid usage: {units} units")]
    InvalidUsage { units: i32 },

    #[error("Invalid discount: {percent}% is outside 0..=100")]
    InvalidDiscount { percent: f64 },

    #[error("Invalid unit price: {price} ({reason})")]
    InvalidUnitPrice { price: f64, reason: String },

    #[error("Invalid quota target: {0}")]
    InvalidQuota(f64),

    #[error("Plan not found: {0}")]
    UnknownPlan(String),

    #[error("Invalid plan {name}: {reason}")]
    InvalidPlan { name: String, reason: String },
}

/// Field-level classification, used by front ends to decide which input to reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    Term,
    Usage,
    Discount,
    UnitPrice,
    Quota,
    Plan,
}

impl ValidationError {
    pub fn kind(&self) -> ValidationKind {
        match self {
            ValidationError::InvalidTerm { .. } => ValidationKind::Term,
            ValidationError::InvalidUsage { .. } => ValidationKind::Usage,
            ValidationError::InvalidDiscount { .. } => ValidationKind::Discount,
            ValidationError::InvalidUnitPrice { .. } => ValidationKind::UnitPrice,
            ValidationError::InvalidQuota(_) => ValidationKind::Quota,
            ValidationError::UnknownPlan(_) | ValidationError::InvalidPlan { .. } => ValidationKind::Plan,
        }
    }

    pub fn unit_price(price: f64, reason: impl Into<String>) -> Self {
        ValidationError::InvalidUnitPrice {
            price,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let err = ValidationError::InvalidTerm { months: 0, min: 1, max: 36 };
        assert_eq!(err.kind(), ValidationKind::Term);

        let err = ValidationError::unit_price(10.0, "below primary list price");
        assert_eq!(err.kind(), ValidationKind::UnitPrice);
    }

    #[test]
    fn test_messages() {
        let err = ValidationError::InvalidDiscount { percent: 120.0 };
        assert_eq!(err.to_string(), "Invalid discount: 120% is outside 0..=100");

        let err = ValidationError::UnknownPlan("Gold".to_string());
        assert_eq!(err.to_string(), "Plan not found: Gold");

        let err = ValidationError::InvalidPlan {
            name: "Huge".to_string(),
            reason: "amounts overflow".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid plan Huge: amounts overflow");
        assert_eq!(err.kind(), ValidationKind::Plan);
    }
}
