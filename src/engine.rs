//! Pricing pipeline orchestration.
//!
//! `price_quotation` composes the pure calculators into the full
//! [`Calculations`] record. The pipeline is total: degraded configuration
//! (unset rates, missing running costs) produces zero-cost contributions and
//! a [`Diagnostic`], never an error, so a quotation is always savable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculators::{
    food_accommodation_cost, incidental_total, mob_demob_cost, other_factors_total, risk_usage,
    totals, working_cost,
};
use crate::config::PricingConfig;
use crate::models::QuotationInputs;

/// Itemized cost breakdown for one quotation. Purely derived from the input
/// and configuration snapshots; recomputed end-to-end on every change and
/// persisted only as a denormalized copy alongside its generating inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculations {
    /// Sum of effective rates times quantity across lines (display field).
    #[serde(with = "rust_decimal::serde::str")]
    pub base_rate: Decimal,
    /// Elapsed working hours, `days x hours_per_day` (display field).
    pub total_hours: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub working_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub mob_demob_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub food_accom_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub risk_usage_total: Decimal,
    /// Legacy half of `risk_usage_total`, kept for older quotation views.
    #[serde(with = "rust_decimal::serde::str")]
    pub risk_adjustment: Decimal,
    /// Legacy half of `risk_usage_total`, kept for older quotation views.
    #[serde(with = "rust_decimal::serde::str")]
    pub usage_load_factor: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub extra_charges: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub incidental_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub other_factors_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub gst_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
}

/// Non-fatal degraded-configuration conditions detected while pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Food resources were requested but no monthly food rate is configured.
    FoodRateUnconfigured,
    /// Accommodation resources were requested but no monthly rate is
    /// configured.
    AccommodationRateUnconfigured,
    /// Mobilization distance is set but this line has no running cost per
    /// km, so it contributes nothing to mob/demob.
    RunningCostMissing { line: String },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::FoodRateUnconfigured => {
                write!(f, "food resources selected but no monthly food rate is configured")
            }
            Diagnostic::AccommodationRateUnconfigured => {
                write!(
                    f,
                    "accommodation resources selected but no monthly accommodation rate is configured"
                )
            }
            Diagnostic::RunningCostMissing { line } => {
                write!(f, "equipment '{line}' has no running cost per km; skipped in mob/demob")
            }
        }
    }
}

/// A complete pricing pass: the breakdown plus any degraded-config
/// diagnostics the host should surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingOutcome {
    pub calculations: Calculations,
    pub diagnostics: Vec<Diagnostic>,
}

/// Multipliers read as 1 when unconfigured; zero and negative values count
/// as unconfigured.
fn factor_or_one(factor: Decimal) -> Decimal {
    if factor > Decimal::ZERO {
        factor
    } else {
        Decimal::ONE
    }
}

/// Price one quotation snapshot against one configuration snapshot.
///
/// Runs the full pipeline end-to-end; factors interact (tier selection
/// feeds working cost while risk/usage reads the monthly column
/// unconditionally), so there is no incremental path.
pub fn price_quotation(inputs: &QuotationInputs, config: &PricingConfig) -> PricingOutcome {
    let mut diagnostics = Vec::new();

    let shift_factor = factor_or_one(config.shift_factors.factor_for(inputs.shift));
    let day_night_factor = factor_or_one(config.day_night_factors.factor_for(inputs.time_of_day));

    let working = working_cost(
        &inputs.lines,
        inputs.legacy_equipment.as_ref(),
        inputs.order_type,
        inputs.days,
        inputs.hours_per_day,
        shift_factor,
        day_night_factor,
    );

    if inputs.food_count > 0 && config.food_rate_per_month <= Decimal::ZERO {
        push_diagnostic(&mut diagnostics, Diagnostic::FoodRateUnconfigured);
    }
    if inputs.accommodation_count > 0 && config.accommodation_rate_per_month <= Decimal::ZERO {
        push_diagnostic(&mut diagnostics, Diagnostic::AccommodationRateUnconfigured);
    }
    let food_accom = food_accommodation_cost(
        inputs.food_count,
        inputs.accommodation_count,
        config.food_rate_per_month,
        config.accommodation_rate_per_month,
        inputs.days,
    );

    if inputs.mob_demob_override <= Decimal::ZERO && inputs.site_distance_km > Decimal::ZERO {
        for line in &inputs.lines {
            if line.running_cost_per_km.unwrap_or(Decimal::ZERO) <= Decimal::ZERO {
                push_diagnostic(
                    &mut diagnostics,
                    Diagnostic::RunningCostMissing {
                        line: line.name.clone(),
                    },
                );
            }
        }
    }
    let mob_demob = mob_demob_cost(
        inputs.mob_demob_override,
        inputs.site_distance_km,
        &inputs.lines,
        inputs.legacy_equipment.and_then(|legacy| legacy.running_cost_per_km),
        inputs.mob_relaxation_pct,
    );

    let risk = risk_usage(&inputs.lines, config.risk_usage_percentage);
    let incidentals = incidental_total(&inputs.incidentals, &config.incidental_options);
    let other_factors = other_factors_total(
        &inputs.other_factors,
        config.rigger_amount,
        config.helper_amount,
    );

    let totals = totals(
        working,
        food_accom,
        mob_demob,
        risk.total,
        inputs.extra_charge,
        incidentals,
        other_factors,
        inputs.include_gst,
    );

    let base_rate: Decimal = if !inputs.lines.is_empty() {
        inputs
            .lines
            .iter()
            .map(|line| line.effective_rate * Decimal::from(line.quantity))
            .sum()
    } else {
        inputs
            .legacy_equipment
            .map(|legacy| legacy.rate)
            .unwrap_or(Decimal::ZERO)
    };

    PricingOutcome {
        calculations: Calculations {
            base_rate,
            total_hours: inputs.days * inputs.hours_per_day,
            working_cost: working,
            mob_demob_cost: mob_demob,
            food_accom_cost: food_accom,
            risk_usage_total: risk.total,
            risk_adjustment: risk.risk_half,
            usage_load_factor: risk.usage_half,
            extra_charges: inputs.extra_charge,
            incidental_cost: incidentals,
            other_factors_cost: other_factors,
            subtotal: totals.subtotal,
            gst_amount: totals.gst_amount,
            total_amount: totals.total_amount,
        },
        diagnostics,
    }
}

fn push_diagnostic(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    warn!(%diagnostic, "degraded pricing configuration");
    diagnostics.push(diagnostic);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IncidentalOption;
    use crate::models::{
        EquipmentLine, IncidentalSelection, LegacySelection, OrderType, OtherFactor,
        OtherFactorSelection, RateTable,
    };
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn crawler_line() -> EquipmentLine {
        let mut line = EquipmentLine::new(
            Uuid::new_v4(),
            "50T Crawler",
            RateTable {
                micro: dec!(4000),
                small: dec!(3500),
                monthly: dec!(500000),
                yearly: dec!(450000),
            },
            OrderType::Micro,
        );
        line.running_cost_per_km = Some(dec!(50));
        line
    }

    fn base_inputs() -> QuotationInputs {
        QuotationInputs {
            lines: vec![crawler_line()],
            days: 5,
            hours_per_day: 8,
            ..QuotationInputs::default()
        }
    }

    #[test]
    fn scenario_a_single_line_no_extras_no_gst() {
        let mut config = PricingConfig::default();
        config.risk_usage_percentage = Decimal::ZERO;

        let outcome = price_quotation(&base_inputs(), &config);
        let calc = &outcome.calculations;
        assert_eq!(calc.working_cost, dec!(160000));
        assert_eq!(calc.subtotal, dec!(160000));
        assert_eq!(calc.gst_amount, Decimal::ZERO);
        assert_eq!(calc.total_amount, dec!(160000));
        assert_eq!(calc.base_rate, dec!(4000));
        assert_eq!(calc.total_hours, 40);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn full_breakdown_with_every_component() {
        let config = PricingConfig {
            risk_usage_percentage: dec!(5),
            food_rate_per_month: dec!(5200),
            accommodation_rate_per_month: dec!(2600),
            incidental_options: vec![IncidentalOption {
                value: "permit".to_string(),
                label: "Road permit".to_string(),
                amount: dec!(5000),
            }],
            rigger_amount: dec!(12000),
            helper_amount: dec!(8000),
            ..PricingConfig::default()
        };

        let mut inputs = base_inputs();
        inputs.food_count = 2;
        inputs.accommodation_count = 1;
        inputs.site_distance_km = dec!(100);
        inputs.mob_relaxation_pct = dec!(10);
        inputs.extra_charge = dec!(2500);
        inputs.incidentals = vec![IncidentalSelection {
            id: "permit".to_string(),
            amount: None,
        }];
        inputs.other_factors = vec![OtherFactorSelection {
            factor: OtherFactor::Rigger,
            amount: None,
        }];
        inputs.include_gst = true;

        let outcome = price_quotation(&inputs, &config);
        let calc = &outcome.calculations;

        assert_eq!(calc.working_cost, dec!(160000));
        // 2 x 200/day x 5 + 1 x 100/day x 5
        assert_eq!(calc.food_accom_cost, dec!(2500));
        // 100 x 2 x 50, relaxed by 10%
        assert_eq!(calc.mob_demob_cost, dec!(9000));
        // 500000 x 5%
        assert_eq!(calc.risk_usage_total, dec!(25000));
        assert_eq!(calc.risk_adjustment + calc.usage_load_factor, dec!(25000));
        assert_eq!(calc.extra_charges, dec!(2500));
        assert_eq!(calc.incidental_cost, dec!(5000));
        assert_eq!(calc.other_factors_cost, dec!(12000));

        let subtotal = dec!(160000) + dec!(2500) + dec!(9000) + dec!(25000) + dec!(2500)
            + dec!(5000)
            + dec!(12000);
        assert_eq!(calc.subtotal, subtotal);
        assert_eq!(calc.gst_amount, subtotal * dec!(0.18));
        assert_eq!(calc.total_amount, subtotal * dec!(1.18));
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn pipeline_is_idempotent() {
        let config = PricingConfig::default();
        let inputs = base_inputs();
        let first = price_quotation(&inputs, &config);
        let second = price_quotation(&inputs, &config);
        assert_eq!(first.calculations, second.calculations);
        assert_eq!(first.diagnostics, second.diagnostics);
    }

    #[test]
    fn unset_food_rate_with_resources_warns_but_prices() {
        let mut inputs = base_inputs();
        inputs.food_count = 3;
        inputs.accommodation_count = 1;

        let outcome = price_quotation(&inputs, &PricingConfig::default());
        assert_eq!(outcome.calculations.food_accom_cost, Decimal::ZERO);
        assert!(outcome
            .diagnostics
            .contains(&Diagnostic::FoodRateUnconfigured));
        assert!(outcome
            .diagnostics
            .contains(&Diagnostic::AccommodationRateUnconfigured));
        // complete record regardless
        assert!(outcome.calculations.total_amount > Decimal::ZERO);
    }

    #[test]
    fn missing_running_cost_warns_per_line() {
        let mut inputs = base_inputs();
        inputs.lines[0].running_cost_per_km = None;
        inputs.site_distance_km = dec!(80);

        let outcome = price_quotation(&inputs, &PricingConfig::default());
        assert_eq!(outcome.calculations.mob_demob_cost, Decimal::ZERO);
        assert_eq!(
            outcome.diagnostics,
            vec![Diagnostic::RunningCostMissing {
                line: "50T Crawler".to_string()
            }]
        );
    }

    #[test]
    fn manual_mob_demob_override_suppresses_running_cost_diagnostic() {
        let mut inputs = base_inputs();
        inputs.lines[0].running_cost_per_km = None;
        inputs.site_distance_km = dec!(80);
        inputs.mob_demob_override = dec!(5000);

        let outcome = price_quotation(&inputs, &PricingConfig::default());
        assert_eq!(outcome.calculations.mob_demob_cost, dec!(5000));
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn legacy_selection_prices_without_lines() {
        let mut inputs = QuotationInputs::default();
        inputs.legacy_equipment = Some(LegacySelection {
            rate: dec!(4000),
            running_cost_per_km: Some(dec!(50)),
        });
        inputs.days = 5;
        inputs.site_distance_km = dec!(100);

        let outcome = price_quotation(&inputs, &PricingConfig::default());
        assert_eq!(outcome.calculations.working_cost, dec!(160000));
        assert_eq!(outcome.calculations.mob_demob_cost, dec!(10000));
        assert_eq!(outcome.calculations.base_rate, dec!(4000));
        // no lines means no monthly base for risk/usage
        assert_eq!(outcome.calculations.risk_usage_total, Decimal::ZERO);
    }

    #[test]
    fn zero_configured_factors_read_as_one() {
        let mut config = PricingConfig::default();
        config.shift_factors.double = Decimal::ZERO;
        config.risk_usage_percentage = Decimal::ZERO;

        let mut inputs = base_inputs();
        inputs.shift = crate::models::ShiftType::Double;

        let outcome = price_quotation(&inputs, &config);
        assert_eq!(outcome.calculations.working_cost, dec!(160000));
    }

    #[test]
    fn calculations_serialize_camel_case_with_string_decimals() {
        let outcome = price_quotation(&base_inputs(), &PricingConfig::default());
        let json = serde_json::to_value(&outcome.calculations).unwrap();
        assert_eq!(json["workingCost"], "160000");
        assert_eq!(json["totalHours"], 40);
        assert!(json.get("gstAmount").is_some());
    }
}
