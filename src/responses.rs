//! Persisted quotation document.
//!
//! The persistence collaborator stores the computed calculations together
//! with a denormalized copy of the generating inputs, so a saved quotation
//! can be audited and reloaded for editing without recomputation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::Calculations;
use crate::error::Result;
use crate::models::QuotationInputs;

/// A saved quotation: input snapshot plus its derived calculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationDocument {
    pub id: Uuid,
    pub inputs: QuotationInputs,
    pub calculations: Calculations,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuotationDocument {
    pub fn new(inputs: QuotationInputs, calculations: Calculations) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            inputs,
            calculations,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the snapshot after an edit, bumping the update timestamp.
    pub fn touch(&mut self, inputs: QuotationInputs, calculations: Calculations) {
        self.inputs = inputs;
        self.calculations = calculations;
        self.updated_at = Utc::now();
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}
