//! Request DTOs for the quotation boundary.
//!
//! Raw records arriving from the UI (or from a quotation being reloaded)
//! are normalized here: day counts clamp to at least one, working hours
//! default to eight, quantities clamp to at least one, and the relaxation
//! percentage is bounded to 0-100. The engine downstream assumes these
//! pre-validated inputs and never re-checks them.

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::calculators::classify_order_type;
use crate::config::TierLimits;
use crate::error::Result;
use crate::models::{
    EquipmentLine, IncidentalSelection, LegacySelection, OrderType, OtherFactorSelection,
    QuotationInputs, RateTable, RiskLevel, ShiftType, TimeOfDay, UsageLevel,
};

/// One equipment selection as sent by the quotation form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentLineRequest {
    pub id: Option<Uuid>,
    pub name: String,
    pub rates: RateTable,
    /// Manual effective-rate override; a positive value pins the rate.
    pub rate: Option<Decimal>,
    pub running_cost_per_km: Option<Decimal>,
    pub quantity: u32,
}

impl Default for EquipmentLineRequest {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            rates: RateTable::default(),
            rate: None,
            running_cost_per_km: None,
            quantity: 1,
        }
    }
}

impl EquipmentLineRequest {
    fn into_line(self, order_type: OrderType) -> EquipmentLine {
        let mut line = EquipmentLine::new(
            self.id.unwrap_or_else(Uuid::new_v4),
            self.name,
            self.rates,
            order_type,
        );
        line.quantity = self.quantity.max(1);
        line.running_cost_per_km = self.running_cost_per_km;
        match self.rate {
            Some(rate) if rate > Decimal::ZERO && rate != line.rates.rate_for(order_type) => {
                line.override_rate(rate);
            }
            _ => {}
        }
        line
    }
}

/// Full quotation parameter set as sent by the quotation form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuotationRequest {
    pub equipment: Vec<EquipmentLineRequest>,
    pub legacy_equipment: Option<LegacySelection>,
    /// Explicit tier; derived from the day count when absent.
    pub order_type: Option<OrderType>,
    pub number_of_days: u32,
    pub working_hours: u32,
    pub shift_type: ShiftType,
    pub day_night: TimeOfDay,
    pub usage: UsageLevel,
    pub risk_factor: RiskLevel,
    pub food_resources: u32,
    pub accommodation_resources: u32,
    pub site_distance: Decimal,
    /// Manual mob/demob override; zero means "derive from distance".
    pub mob_demob_cost: Decimal,
    pub mob_relaxation_percent: Decimal,
    pub extra_charges: Decimal,
    pub incidental_charges: Vec<IncidentalSelection>,
    pub other_factors: Vec<OtherFactorSelection>,
    pub include_gst: bool,
}

impl Default for QuotationRequest {
    fn default() -> Self {
        Self {
            equipment: Vec::new(),
            legacy_equipment: None,
            order_type: None,
            number_of_days: 1,
            working_hours: 8,
            shift_type: ShiftType::default(),
            day_night: TimeOfDay::default(),
            usage: UsageLevel::default(),
            risk_factor: RiskLevel::default(),
            food_resources: 0,
            accommodation_resources: 0,
            site_distance: Decimal::ZERO,
            mob_demob_cost: Decimal::ZERO,
            mob_relaxation_percent: Decimal::ZERO,
            extra_charges: Decimal::ZERO,
            incidental_charges: Vec::new(),
            other_factors: Vec::new(),
            include_gst: false,
        }
    }
}

impl QuotationRequest {
    /// Parse a quotation payload from its JSON record.
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Normalize into engine inputs, deriving the tier from the day count
    /// when the request carries none.
    pub fn into_inputs(self, limits: &TierLimits) -> QuotationInputs {
        let days = self.number_of_days.max(1);
        let hours_per_day = if self.working_hours == 0 {
            8
        } else {
            self.working_hours
        };
        let order_type = self
            .order_type
            .unwrap_or_else(|| classify_order_type(days, limits));

        QuotationInputs {
            lines: self
                .equipment
                .into_iter()
                .map(|line| line.into_line(order_type))
                .collect(),
            legacy_equipment: self.legacy_equipment,
            order_type,
            days,
            hours_per_day,
            shift: self.shift_type,
            time_of_day: self.day_night,
            usage: self.usage,
            risk: self.risk_factor,
            food_count: self.food_resources,
            accommodation_count: self.accommodation_resources,
            site_distance_km: self.site_distance.max(Decimal::ZERO),
            mob_demob_override: self.mob_demob_cost.max(Decimal::ZERO),
            mob_relaxation_pct: self
                .mob_relaxation_percent
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED),
            extra_charge: self.extra_charges.max(Decimal::ZERO),
            incidentals: self.incidental_charges,
            other_factors: self.other_factors,
            include_gst: self.include_gst,
        }
    }
}
