//! Quote session: reactive recomputation with restore suspension.
//!
//! A session owns one input snapshot and one configuration snapshot for a
//! single editing surface. Every edit re-derives the order-type tier from
//! the day count, refreshes stale equipment rates, and reprices end-to-end.
//! While a previously saved quotation is being loaded the session is in the
//! `Restoring` state and all of that is suspended, so the load cannot
//! overwrite the user's persisted (possibly manually overridden) values.

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::calculators::classify_order_type;
use crate::config::PricingConfig;
use crate::engine::{price_quotation, Calculations, Diagnostic};
use crate::models::{EquipmentLine, OrderType, QuotationInputs, RateTable};
use crate::responses::QuotationDocument;

/// Whether the session reacts to input changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Reactive: edits reclassify and reprice.
    Idle,
    /// A saved quotation is being loaded; recomputation is suspended.
    Restoring,
}

/// One editing session over a quotation.
#[derive(Debug, Clone)]
pub struct QuoteSession {
    inputs: QuotationInputs,
    config: PricingConfig,
    state: SessionState,
    calculations: Calculations,
    diagnostics: Vec<Diagnostic>,
}

impl QuoteSession {
    /// Fresh session with default inputs, priced immediately.
    pub fn new(config: PricingConfig) -> Self {
        let inputs = QuotationInputs::default();
        let outcome = price_quotation(&inputs, &config);
        Self {
            inputs,
            config,
            state: SessionState::Idle,
            calculations: outcome.calculations,
            diagnostics: outcome.diagnostics,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn inputs(&self) -> &QuotationInputs {
        &self.inputs
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn calculations(&self) -> &Calculations {
        &self.calculations
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Mutate the inputs, then (when idle) re-derive the tier from the day
    /// count, refresh non-overridden line rates if the tier changed, and
    /// reprice.
    ///
    /// Because the tier is re-derived here, a manual tier set inside the
    /// closure is overwritten; use [`QuoteSession::set_order_type`] for a
    /// deliberate tier choice.
    pub fn edit(&mut self, mutate: impl FnOnce(&mut QuotationInputs)) {
        mutate(&mut self.inputs);
        if self.state == SessionState::Restoring {
            return;
        }
        let derived = classify_order_type(self.inputs.days, &self.config.order_type_limits);
        if derived != self.inputs.order_type {
            self.apply_order_type(derived);
        }
        self.recompute();
    }

    /// Manually select a tier. Wins until the next day-count change, which
    /// re-derives the tier from the duration.
    pub fn set_order_type(&mut self, order_type: OrderType) {
        if self.state == SessionState::Restoring {
            self.inputs.order_type = order_type;
            return;
        }
        self.apply_order_type(order_type);
        self.recompute();
    }

    /// Replace the configuration snapshot and reprice against it.
    pub fn set_config(&mut self, config: PricingConfig) {
        self.config = config;
        if self.state == SessionState::Idle {
            self.recompute();
        }
    }

    /// Add a catalog selection as a new line, rated at the current tier.
    pub fn add_line(
        &mut self,
        id: Uuid,
        name: impl Into<String>,
        rates: RateTable,
        running_cost_per_km: Option<Decimal>,
    ) {
        let mut line = EquipmentLine::new(id, name, rates, self.inputs.order_type);
        line.running_cost_per_km = running_cost_per_km;
        self.edit(|inputs| inputs.lines.push(line));
    }

    pub fn remove_line(&mut self, id: Uuid) {
        self.edit(|inputs| inputs.lines.retain(|line| line.id != id));
    }

    /// Pin a line's effective rate to a manual value; it will no longer
    /// follow tier changes.
    pub fn override_line_rate(&mut self, id: Uuid, rate: Decimal) {
        self.edit(|inputs| {
            if let Some(line) = inputs.lines.iter_mut().find(|line| line.id == id) {
                line.override_rate(rate);
            }
        });
    }

    /// Enter the `Restoring` state ahead of loading a saved quotation.
    pub fn begin_restore(&mut self) {
        self.state = SessionState::Restoring;
    }

    /// Apply a persisted snapshot verbatim: inputs and the previously saved
    /// calculations land untouched, with no reclassification or repricing.
    pub fn apply_snapshot(&mut self, document: &QuotationDocument) {
        self.inputs = document.inputs.clone();
        self.calculations = document.calculations.clone();
        self.diagnostics.clear();
    }

    /// Leave the `Restoring` state. Does not recompute: the persisted
    /// calculations stand until the first subsequent edit.
    pub fn finish_restore(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Assemble the denormalized document for the persistence collaborator.
    pub fn document(&self) -> QuotationDocument {
        QuotationDocument::new(self.inputs.clone(), self.calculations.clone())
    }

    fn apply_order_type(&mut self, order_type: OrderType) {
        self.inputs.order_type = order_type;
        for line in &mut self.inputs.lines {
            line.refresh_rate(order_type);
        }
    }

    fn recompute(&mut self) {
        let outcome = price_quotation(&self.inputs, &self.config);
        debug!(
            total = %outcome.calculations.total_amount,
            diagnostics = outcome.diagnostics.len(),
            "quotation repriced"
        );
        self.calculations = outcome.calculations;
        self.diagnostics = outcome.diagnostics;
    }
}
