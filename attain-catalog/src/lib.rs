pub mod product;
pub mod pricing;
pub mod attainment;

pub use product::{Catalog, CatalogError, ProductPlan};
pub use pricing::{
    DiscountInput, OfferingRevenue, PricingConfig, PricingEngine, PricingRequest, RevenueBreakdown,
    UsageInput,
};
pub use attainment::attainment_ratio;
