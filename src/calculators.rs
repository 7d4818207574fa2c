//! Core pricing calculation functions.
//!
//! Pure functions for quotation math - no configuration store access, no
//! I/O. Each function takes everything it needs as explicit parameters so
//! the full pipeline stays referentially transparent.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::{IncidentalOption, TierLimits};
use crate::models::{
    EquipmentLine, IncidentalSelection, LegacySelection, OrderType, OtherFactor,
    OtherFactorSelection,
};

/// Working days assumed per calendar month. Monthly-tier billing and the
/// food/accommodation day rates both divide by this.
pub const WORKING_DAYS_PER_MONTH: u32 = 26;

/// GST rate applied when the quotation is tax-inclusive. Fixed, not
/// configurable.
pub const GST_RATE: Decimal = dec!(0.18);

/// Classify a rental duration into its order-type tier.
///
/// Tiers are evaluated in ascending order; the first tier whose configured
/// maximum covers `days` wins, with `yearly` as the catch-all. A zero day
/// count is not a valid business state and falls back to `micro`.
pub fn classify_order_type(days: u32, limits: &TierLimits) -> OrderType {
    if days == 0 || days <= limits.micro_max_days {
        OrderType::Micro
    } else if days <= limits.small_max_days {
        OrderType::Small
    } else if days <= limits.monthly_max_days {
        OrderType::Monthly
    } else {
        OrderType::Yearly
    }
}

/// Number of 26-working-day billing months covered by `days`, rounded up.
pub fn billing_months(days: u32) -> u32 {
    days.div_ceil(WORKING_DAYS_PER_MONTH)
}

/// Duration factor for one rate: billing months on the monthly tier,
/// elapsed hours everywhere else.
fn duration_factor(order_type: OrderType, days: u32, hours_per_day: u32) -> Decimal {
    match order_type {
        OrderType::Monthly => Decimal::from(billing_months(days)),
        _ => Decimal::from(days) * Decimal::from(hours_per_day),
    }
}

/// Working cost across all equipment lines.
///
/// Each line contributes `effective_rate x quantity` scaled by the duration
/// factor for the current tier. Quotations without lines fall back to the
/// legacy single-equipment rate at quantity 1. Shift and day/night
/// multipliers apply to the summed result.
pub fn working_cost(
    lines: &[EquipmentLine],
    legacy: Option<&LegacySelection>,
    order_type: OrderType,
    days: u32,
    hours_per_day: u32,
    shift_factor: Decimal,
    day_night_factor: Decimal,
) -> Decimal {
    let factor = duration_factor(order_type, days, hours_per_day);
    let base: Decimal = if !lines.is_empty() {
        lines
            .iter()
            .map(|line| line.effective_rate * Decimal::from(line.quantity) * factor)
            .sum()
    } else if let Some(legacy) = legacy {
        legacy.rate * factor
    } else {
        Decimal::ZERO
    };
    base * shift_factor * day_night_factor
}

/// Food and accommodation cost: monthly per-person rates prorated over 26
/// working days, times resource counts, times rental days.
///
/// Unset monthly rates degrade to a zero contribution; the engine reports
/// that separately as a diagnostic.
pub fn food_accommodation_cost(
    food_count: u32,
    accommodation_count: u32,
    food_rate_per_month: Decimal,
    accommodation_rate_per_month: Decimal,
    days: u32,
) -> Decimal {
    let month = Decimal::from(WORKING_DAYS_PER_MONTH);
    let days = Decimal::from(days);
    let food_daily = food_rate_per_month / month;
    let accommodation_daily = accommodation_rate_per_month / month;
    Decimal::from(food_count) * food_daily * days
        + Decimal::from(accommodation_count) * accommodation_daily * days
}

/// Mobilization/demobilization cost.
///
/// A positive manual override wins verbatim and relaxation does not apply
/// to it. Otherwise the cost is round-trip distance times each line's
/// running cost per km times quantity (legacy running cost when no lines),
/// reduced by the relaxation percentage. Lines without a running cost
/// contribute nothing.
pub fn mob_demob_cost(
    manual_override: Decimal,
    distance_km: Decimal,
    lines: &[EquipmentLine],
    legacy_running_cost_per_km: Option<Decimal>,
    relaxation_pct: Decimal,
) -> Decimal {
    if manual_override > Decimal::ZERO {
        return manual_override;
    }
    if distance_km <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let round_trip = distance_km * dec!(2);
    let raw: Decimal = if !lines.is_empty() {
        lines
            .iter()
            .map(|line| {
                round_trip
                    * line.running_cost_per_km.unwrap_or(Decimal::ZERO)
                    * Decimal::from(line.quantity)
            })
            .sum()
    } else {
        round_trip * legacy_running_cost_per_km.unwrap_or(Decimal::ZERO)
    };

    if relaxation_pct > Decimal::ZERO {
        raw * (Decimal::ONE_HUNDRED - relaxation_pct) / Decimal::ONE_HUNDRED
    } else {
        raw
    }
}

/// Risk and usage adjustment with the legacy half split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskUsageSplit {
    pub total: Decimal,
    /// Legacy display field; half of the total.
    pub risk_half: Decimal,
    /// Legacy display field; the other half.
    pub usage_half: Decimal,
}

/// Risk and usage adjustment: a single configured percentage of the total
/// monthly equipment value.
///
/// The monthly rate column is used regardless of the current billing tier:
/// the adjustment is sized against the equipment's full monthly value. The
/// halves are retained for backward-compatible display and always sum
/// exactly to the total.
pub fn risk_usage(lines: &[EquipmentLine], risk_usage_pct: Decimal) -> RiskUsageSplit {
    let monthly_base: Decimal = lines
        .iter()
        .map(|line| line.rates.monthly * Decimal::from(line.quantity))
        .sum();
    let total = monthly_base * risk_usage_pct / Decimal::ONE_HUNDRED;
    let risk_half = total / dec!(2);
    RiskUsageSplit {
        total,
        risk_half,
        usage_half: total - risk_half,
    }
}

/// Sum of selected incidental charges: per-quotation override if present,
/// else the configured default for that id, else zero.
pub fn incidental_total(
    selections: &[IncidentalSelection],
    options: &[IncidentalOption],
) -> Decimal {
    selections
        .iter()
        .map(|selection| {
            selection.amount.unwrap_or_else(|| {
                options
                    .iter()
                    .find(|option| option.value == selection.id)
                    .map(|option| option.amount)
                    .unwrap_or(Decimal::ZERO)
            })
        })
        .sum()
}

/// Sum of priced other factors (rigger and helper), override-else-default.
/// Descriptive factors are selectable but never contribute, even with a
/// custom amount attached.
pub fn other_factors_total(
    selections: &[OtherFactorSelection],
    rigger_amount: Decimal,
    helper_amount: Decimal,
) -> Decimal {
    selections
        .iter()
        .map(|selection| match selection.factor {
            OtherFactor::Rigger => selection.amount.unwrap_or(rigger_amount),
            OtherFactor::Helper => selection.amount.unwrap_or(helper_amount),
            _ => Decimal::ZERO,
        })
        .sum()
}

/// Final totals for one quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub gst_amount: Decimal,
    pub total_amount: Decimal,
}

/// Assemble the subtotal from the seven cost components and apply GST.
#[allow(clippy::too_many_arguments)]
pub fn totals(
    working_cost: Decimal,
    food_accommodation_cost: Decimal,
    mob_demob_cost: Decimal,
    risk_usage_total: Decimal,
    extra_charges: Decimal,
    incidental_total: Decimal,
    other_factors_total: Decimal,
    include_gst: bool,
) -> Totals {
    let subtotal = working_cost
        + food_accommodation_cost
        + mob_demob_cost
        + risk_usage_total
        + extra_charges
        + incidental_total
        + other_factors_total;
    let gst_amount = if include_gst {
        subtotal * GST_RATE
    } else {
        Decimal::ZERO
    };
    Totals {
        subtotal,
        gst_amount,
        total_amount: subtotal + gst_amount,
    }
}
