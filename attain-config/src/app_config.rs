use serde::Deserialize;
use std::env;
use std::path::Path;
use attain_catalog::{Catalog, CatalogError, PricingConfig, PricingEngine, ProductPlan};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub plans: Vec<ProductPlan>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid pricing settings: {0}")]
    Invalid(String),
}

impl Settings {
    pub fn load_from(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::build(
            dir.as_ref(),
            &run_mode,
            config::Environment::with_prefix("ATTAIN")
                .separator("__")
                .try_parsing(true),
        )
    }

    fn build(dir: &Path, run_mode: &str, environment: config::Environment) -> Result<Self, ConfigError> {
        let path = |name: &str| dir.join(name).to_string_lossy().into_owned();

        let s = config::Config::builder()
            // Shared defaults, checked in
            .add_source(config::File::with_name(&path("default")))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&path(run_mode)).required(false))
            // Untracked local overrides
            .add_source(config::File::with_name(&path("local")).required(false))
            // Eg. `ATTAIN__PRICING__MAX_TERM_MONTHS=60`
            .add_source(environment)
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        settings.validate()?;

        tracing::debug!(
            run_mode,
            plans = settings.plans.len(),
            "Loaded settings from {}",
            dir.display()
        );

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.pricing;
        if p.min_term_months > p.max_term_months {
            return Err(ConfigError::Invalid(format!(
                "min_term_months ({}) exceeds max_term_months ({})",
                p.min_term_months, p.max_term_months
            )));
        }
        if p.max_term_months <= 0 {
            return Err(ConfigError::Invalid("max_term_months must be positive".to_string()));
        }
        if p.annualize_after_months < 0 {
            return Err(ConfigError::Invalid("annualize_after_months must not be negative".to_string()));
        }
        Ok(())
    }

    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        Ok(Catalog::new(self.plans.clone())?)
    }

    pub fn engine(&self) -> PricingEngine {
        PricingEngine::new(self.pricing.clone())
    }
}
