//! Domain model for quotation pricing.
//!
//! These types mirror the JSON records exchanged with the CRM UI and the
//! persistence layer: equipment lines selected from the catalog, the full
//! quotation parameter set, and the enums behind the various selectors.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Duration-based pricing bracket selecting which rate-table column applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Micro,
    Small,
    Monthly,
    Yearly,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Micro => "micro",
            OrderType::Small => "small",
            OrderType::Monthly => "monthly",
            OrderType::Yearly => "yearly",
        }
    }
}

/// Shift pattern for the working day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    #[default]
    Single,
    Double,
}

/// Whether the job runs during day or night hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    #[default]
    Day,
    Night,
}

/// Usage intensity selector. Informational: pricing uses the combined
/// risk-usage percentage from configuration, not this enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageLevel {
    #[default]
    Normal,
    Heavy,
}

/// Site risk selector. Informational, same as [`UsageLevel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

/// Per-tier rates for one piece of equipment, as supplied by the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    pub micro: Decimal,
    pub small: Decimal,
    pub monthly: Decimal,
    pub yearly: Decimal,
}

impl RateTable {
    /// Rate-table column for the given order type.
    pub fn rate_for(&self, order_type: OrderType) -> Decimal {
        match order_type {
            OrderType::Micro => self.micro,
            OrderType::Small => self.small,
            OrderType::Monthly => self.monthly,
            OrderType::Yearly => self.yearly,
        }
    }
}

/// One selected piece of equipment on a quotation.
///
/// The effective rate follows the rate table for the current order type
/// until the user pins it with [`EquipmentLine::override_rate`]; an
/// overridden rate survives tier changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentLine {
    pub id: Uuid,
    pub name: String,
    pub rates: RateTable,
    #[serde(with = "rust_decimal::serde::str")]
    pub effective_rate: Decimal,
    #[serde(default)]
    pub rate_overridden: bool,
    #[serde(default)]
    pub running_cost_per_km: Option<Decimal>,
    pub quantity: u32,
}

impl EquipmentLine {
    /// New line with quantity 1 and the effective rate taken from the rate
    /// table at the given order type.
    pub fn new(id: Uuid, name: impl Into<String>, rates: RateTable, order_type: OrderType) -> Self {
        Self {
            id,
            name: name.into(),
            rates,
            effective_rate: rates.rate_for(order_type),
            rate_overridden: false,
            running_cost_per_km: None,
            quantity: 1,
        }
    }

    /// Re-read the effective rate from the rate table. No-op while the rate
    /// is manually overridden.
    pub fn refresh_rate(&mut self, order_type: OrderType) {
        if !self.rate_overridden {
            self.effective_rate = self.rates.rate_for(order_type);
        }
    }

    /// Pin the effective rate to a manual value.
    pub fn override_rate(&mut self, rate: Decimal) {
        self.effective_rate = rate;
        self.rate_overridden = true;
    }

    /// Drop a manual rate and fall back to the rate table.
    pub fn clear_rate_override(&mut self, order_type: OrderType) {
        self.rate_overridden = false;
        self.effective_rate = self.rates.rate_for(order_type);
    }
}

/// Single-equipment selection carried by quotations saved before multi-line
/// support. Used only when `lines` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySelection {
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    #[serde(default)]
    pub running_cost_per_km: Option<Decimal>,
}

/// Optional add-on selections. Only rigger and helper carry a priced
/// amount; the rest are descriptive tags on the quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtherFactor {
    Rigger,
    Helper,
    Area,
    Condition,
    CustomerReputation,
}

impl OtherFactor {
    pub fn is_priced(self) -> bool {
        matches!(self, OtherFactor::Rigger | OtherFactor::Helper)
    }
}

/// A selected incidental charge with an optional per-quotation override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentalSelection {
    pub id: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

/// A selected other factor with an optional override for the priced ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherFactorSelection {
    pub factor: OtherFactor,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

/// Full parameter set for one pricing computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationInputs {
    pub lines: Vec<EquipmentLine>,
    #[serde(default)]
    pub legacy_equipment: Option<LegacySelection>,
    pub order_type: OrderType,
    pub days: u32,
    pub hours_per_day: u32,
    pub shift: ShiftType,
    pub time_of_day: TimeOfDay,
    pub usage: UsageLevel,
    pub risk: RiskLevel,
    pub food_count: u32,
    pub accommodation_count: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub site_distance_km: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub mob_demob_override: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub mob_relaxation_pct: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub extra_charge: Decimal,
    pub incidentals: Vec<IncidentalSelection>,
    pub other_factors: Vec<OtherFactorSelection>,
    pub include_gst: bool,
}

impl Default for QuotationInputs {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            legacy_equipment: None,
            order_type: OrderType::Micro,
            days: 1,
            hours_per_day: 8,
            shift: ShiftType::default(),
            time_of_day: TimeOfDay::default(),
            usage: UsageLevel::default(),
            risk: RiskLevel::default(),
            food_count: 0,
            accommodation_count: 0,
            site_distance_km: Decimal::ZERO,
            mob_demob_override: Decimal::ZERO,
            mob_relaxation_pct: Decimal::ZERO,
            extra_charge: Decimal::ZERO,
            incidentals: Vec::new(),
            other_factors: Vec::new(),
            include_gst: false,
        }
    }
}
