//! Pricing configuration snapshot.
//!
//! The engine never reads shared mutable state: callers fetch one
//! `PricingConfig` from the configuration service, deserialize it, and pass
//! it explicitly into every computation. Missing fields fall back to the
//! defaults below, so a partially configured tenant still prices (degraded
//! values show up as diagnostics, not errors).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};
use crate::models::{ShiftType, TimeOfDay};

/// Maximum day counts for the first three order-type tiers. `yearly` is the
/// implicit catch-all above `monthly_max_days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TierLimits {
    pub micro_max_days: u32,
    pub small_max_days: u32,
    pub monthly_max_days: u32,
}

impl Default for TierLimits {
    fn default() -> Self {
        Self {
            micro_max_days: 5,
            small_max_days: 25,
            monthly_max_days: 330,
        }
    }
}

/// Multipliers applied to working cost per shift pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShiftFactors {
    pub single: Decimal,
    pub double: Decimal,
}

impl Default for ShiftFactors {
    fn default() -> Self {
        Self {
            single: Decimal::ONE,
            double: Decimal::ONE,
        }
    }
}

impl ShiftFactors {
    pub fn factor_for(&self, shift: ShiftType) -> Decimal {
        match shift {
            ShiftType::Single => self.single,
            ShiftType::Double => self.double,
        }
    }
}

/// Multipliers applied to working cost for day versus night work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DayNightFactors {
    pub day: Decimal,
    pub night: Decimal,
}

impl Default for DayNightFactors {
    fn default() -> Self {
        Self {
            day: Decimal::ONE,
            night: Decimal::ONE,
        }
    }
}

impl DayNightFactors {
    pub fn factor_for(&self, time_of_day: TimeOfDay) -> Decimal {
        match time_of_day {
            TimeOfDay::Day => self.day,
            TimeOfDay::Night => self.night,
        }
    }
}

/// One configurable incidental charge offered on the quotation form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentalOption {
    pub value: String,
    #[serde(default)]
    pub label: String,
    pub amount: Decimal,
}

/// Full pricing configuration as supplied by the configuration service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingConfig {
    pub order_type_limits: TierLimits,
    pub shift_factors: ShiftFactors,
    pub day_night_factors: DayNightFactors,
    /// Percentage of total monthly equipment value charged for operating
    /// risk and usage intensity.
    pub risk_usage_percentage: Decimal,
    /// Monthly food rate per person; prorated over 26 working days.
    pub food_rate_per_month: Decimal,
    /// Monthly accommodation rate per person; prorated over 26 working days.
    pub accommodation_rate_per_month: Decimal,
    pub incidental_options: Vec<IncidentalOption>,
    pub rigger_amount: Decimal,
    pub helper_amount: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            order_type_limits: TierLimits::default(),
            shift_factors: ShiftFactors::default(),
            day_night_factors: DayNightFactors::default(),
            risk_usage_percentage: dec!(5.0),
            food_rate_per_month: Decimal::ZERO,
            accommodation_rate_per_month: Decimal::ZERO,
            incidental_options: Vec::new(),
            rigger_amount: Decimal::ZERO,
            helper_amount: Decimal::ZERO,
        }
    }
}

impl PricingConfig {
    /// Parse a configuration snapshot from its JSON record.
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Configured default amount for an incidental charge id.
    pub fn incidental_amount(&self, id: &str) -> Option<Decimal> {
        self.incidental_options
            .iter()
            .find(|option| option.value == id)
            .map(|option| option.amount)
    }

    /// Check the snapshot for values the engine would silently degrade on.
    ///
    /// Intended for the configuration-load boundary; the engine itself never
    /// calls this and prices whatever it is given.
    pub fn validate(&self) -> Result<()> {
        let mut issues = Vec::new();

        let limits = &self.order_type_limits;
        if limits.micro_max_days == 0 {
            issues.push("micro tier limit is zero days".to_string());
        }
        if limits.small_max_days < limits.micro_max_days
            || limits.monthly_max_days < limits.small_max_days
        {
            issues.push("order type limits must be ascending micro <= small <= monthly".to_string());
        }

        if self.risk_usage_percentage < Decimal::ZERO
            || self.risk_usage_percentage > Decimal::ONE_HUNDRED
        {
            issues.push(format!(
                "risk-usage percentage {} outside 0-100",
                self.risk_usage_percentage
            ));
        }

        for (name, value) in [
            ("shift factor (single)", self.shift_factors.single),
            ("shift factor (double)", self.shift_factors.double),
            ("day factor", self.day_night_factors.day),
            ("night factor", self.day_night_factors.night),
        ] {
            if value < Decimal::ZERO {
                issues.push(format!("{name} is negative"));
            }
        }

        for (name, value) in [
            ("food rate per month", self.food_rate_per_month),
            ("accommodation rate per month", self.accommodation_rate_per_month),
            ("rigger amount", self.rigger_amount),
            ("helper amount", self.helper_amount),
        ] {
            if value < Decimal::ZERO {
                issues.push(format!("{name} is negative"));
            }
        }

        for option in &self.incidental_options {
            if option.amount < Decimal::ZERO {
                issues.push(format!("incidental '{}' amount is negative", option.value));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(PricingError::InvalidConfig(issues.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PricingConfig::default().validate().is_ok());
    }

    #[test]
    fn default_multipliers_are_one() {
        let config = PricingConfig::default();
        assert_eq!(config.shift_factors.factor_for(ShiftType::Double), Decimal::ONE);
        assert_eq!(config.day_night_factors.factor_for(TimeOfDay::Night), Decimal::ONE);
        assert_eq!(config.risk_usage_percentage, dec!(5.0));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = PricingConfig::from_json(r#"{"riskUsagePercentage": "7.5"}"#).unwrap();
        assert_eq!(config.risk_usage_percentage, dec!(7.5));
        assert_eq!(config.order_type_limits, TierLimits::default());
        assert_eq!(config.shift_factors.single, Decimal::ONE);
    }

    #[test]
    fn parses_full_snapshot() {
        let config = PricingConfig::from_json(
            r#"{
                "orderTypeLimits": {"microMaxDays": 3, "smallMaxDays": 20, "monthlyMaxDays": 300},
                "shiftFactors": {"single": 1.0, "double": 1.8},
                "dayNightFactors": {"day": 1.0, "night": 1.25},
                "riskUsagePercentage": 5,
                "foodRatePerMonth": 6500,
                "accommodationRatePerMonth": 9100,
                "incidentalOptions": [
                    {"value": "permit", "label": "Road permit", "amount": 5000},
                    {"value": "escort", "label": "Escort vehicle", "amount": 10000}
                ],
                "riggerAmount": 12000,
                "helperAmount": 8000
            }"#,
        )
        .unwrap();

        assert_eq!(config.order_type_limits.micro_max_days, 3);
        assert_eq!(config.shift_factors.double, dec!(1.8));
        assert_eq!(config.incidental_amount("escort"), Some(dec!(10000)));
        assert_eq!(config.incidental_amount("unknown"), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_reports_every_issue() {
        let mut config = PricingConfig::default();
        config.risk_usage_percentage = dec!(120);
        config.rigger_amount = dec!(-1);
        config.order_type_limits.small_max_days = 2;

        let err = config.validate().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("risk-usage percentage"));
        assert!(message.contains("rigger amount"));
        assert!(message.contains("ascending"));
    }
}
