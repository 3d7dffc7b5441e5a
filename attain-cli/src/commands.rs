use std::fmt::{self, Write};
use attain_catalog::{Catalog, DiscountInput, PricingEngine, PricingRequest, RevenueBreakdown, UsageInput};
use attain_config::Settings;
use crate::cli::QuoteArgs;
use crate::error::AppError;
use crate::format::{currency, percent};

impl QuoteArgs {
    pub fn to_request(&self) -> PricingRequest {
        PricingRequest {
            usage: UsageInput::new(self.units, self.term),
            discount: DiscountInput::from_fields(self.discount, self.unit_price),
            quota_target: self.quota,
        }
    }
}

/// `attain plans`
pub fn plans(settings: &Settings) -> Result<String, AppError> {
    let catalog = settings.catalog()?;
    let mut out = String::new();
    render_plans(&mut out, &catalog)?;
    Ok(out)
}

/// `attain quote`
pub fn quote(settings: &Settings, args: &QuoteArgs) -> Result<String, AppError> {
    let catalog = settings.catalog()?;
    let engine = settings.engine();

    if args.discount.is_some() && args.unit_price.is_some() {
        tracing::warn!("Both --discount and --unit-price given; using --discount");
    }

    let breakdown = run_quote(&engine, &catalog, args)?;
    if args.json {
        Ok(serde_json::to_string_pretty(&breakdown)?)
    } else {
        let mut out = String::new();
        render_breakdown(&mut out, &breakdown)?;
        Ok(out)
    }
}

pub fn run_quote(engine: &PricingEngine, catalog: &Catalog, args: &QuoteArgs) -> Result<RevenueBreakdown, AppError> {
    Ok(engine.compute_for(catalog, &args.plan, &args.to_request())?)
}

pub fn render_plans(out: &mut impl Write, catalog: &Catalog) -> fmt::Result {
    writeln!(out, "{:<16} {:>12} {:>12} {:>14}", "PLAN", "PRIMARY", "SECONDARY", "QUOTA CREDIT")?;
    for plan in catalog.iter() {
        let credit = if plan.tracks_quota() {
            let show = |c: Option<f64>| c.map(currency).unwrap_or_else(|| "-".into());
            format!("{}/{}", show(plan.primary_quota_credit), show(plan.secondary_quota_credit))
        } else {
            "-".to_string()
        };
        writeln!(
            out,
            "{:<16} {:>12} {:>12} {:>14}",
            plan.name,
            currency(plan.primary_list_price),
            currency(plan.secondary_list_price),
            credit
        )?;
    }
    Ok(())
}

pub fn render_breakdown(out: &mut impl Write, b: &RevenueBreakdown) -> fmt::Result {
    writeln!(out, "Plan: {} ({} units, {} months)", b.plan, b.units, b.term_months)?;
    writeln!(out, "Discount: {}", percent(b.discount_fraction * 100.0))?;
    writeln!(out)?;
    writeln!(out, "{:<12} {:>14} {:>16}", "", "MONTHLY", "TERM")?;
    let rows = [
        ("Primary", b.primary.monthly, b.primary.term),
        ("Secondary", b.secondary.monthly, b.secondary.term),
        ("Discount", b.total_discount_monthly, b.total_discount_term),
        ("Total", b.total_monthly, b.total_term),
    ];
    for (label, monthly, term) in rows {
        writeln!(out, "{:<12} {:>14} {:>16}", label, currency(monthly), currency(term))?;
    }
    writeln!(out)?;
    writeln!(out, "Annualized revenue: {}", currency(b.annualized_revenue))?;

    if let Some(value) = b.attainment {
        let basis = if b.annualized { "annualized" } else { "term" };
        writeln!(out, "Quota attainment ({}): {}", basis, currency(value))?;
    }
    if let Some(pct) = b.attainment_pct {
        writeln!(out, "Attainment vs quota: {}", percent(pct))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use attain_catalog::ProductPlan;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            ProductPlan::new("Standard", 44.0, 29.0).with_quota_credits(14.0, 29.0),
            ProductPlan::new("Basic", 20.0, 10.0),
        ])
        .unwrap()
    }

    fn breakdown_text(b: &RevenueBreakdown) -> String {
        let mut out = String::new();
        render_breakdown(&mut out, b).unwrap();
        out
    }

    fn plans_text(catalog: &Catalog) -> String {
        let mut out = String::new();
        render_plans(&mut out, catalog).unwrap();
        out
    }

    fn args(plan: &str, units: i32, term: i32) -> QuoteArgs {
        QuoteArgs {
            plan: plan.to_string(),
            units,
            term,
            discount: None,
            unit_price: None,
            quota: None,
            json: false,
        }
    }

    #[test]
    fn test_render_breakdown() {
        let mut a = args("Standard", 10, 12);
        a.discount = Some(50.0);
        a.quota = Some(7020.0);

        let b = run_quote(&PricingEngine::default(), &catalog(), &a).unwrap();
        let text = breakdown_text(&b);

        assert!(text.contains("Plan: Standard (10 units, 12 months)"));
        assert!(text.contains("Discount: 50.0%"));
        assert!(text.contains("$585.00"));
        assert!(text.contains("$7,020.00"));
        assert!(text.contains("Quota attainment (term): $3,420.00"));
        assert!(text.contains("Attainment vs quota: 100.0%"));
    }

    #[test]
    fn test_render_annualized_and_untracked() {
        let b = run_quote(&PricingEngine::default(), &catalog(), &args("Standard", 10, 24)).unwrap();
        assert!(breakdown_text(&b).contains("Quota attainment (annualized): $5,160.00"));

        let b = run_quote(&PricingEngine::default(), &catalog(), &args("Basic", 10, 24)).unwrap();
        assert!(!breakdown_text(&b).contains("Quota attainment"));
    }

    #[test]
    fn test_discount_flag_wins_over_unit_price() {
        let mut a = args("Standard", 10, 12);
        a.discount = Some(0.0);
        a.unit_price = Some(44.0);

        let b = run_quote(&PricingEngine::default(), &catalog(), &a).unwrap();
        assert_eq!(b.discount_fraction, 0.0);
    }

    #[test]
    fn test_render_plans() {
        let text = plans_text(&catalog());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Standard"));
        assert!(lines[1].contains("$14.00/$29.00"));
        assert!(lines[2].starts_with("Basic"));
        assert!(lines[2].trim_end().ends_with('-'));
    }

    #[test]
    fn test_render_plans_partial_credit() {
        let mut partial = ProductPlan::new("Partial", 30.0, 15.0).with_quota_credits(9.0, 15.0);
        partial.primary_quota_credit = None;
        let catalog = Catalog::new(vec![partial]).unwrap();

        let text = plans_text(&catalog);
        assert!(text.lines().nth(1).unwrap().contains("-/$15.00"));
    }
}
