//! Quotation pricing engine for the CraneOps rental CRM.
//!
//! Given a quotation parameter snapshot and a pricing configuration
//! snapshot, deterministically computes an itemized cost breakdown:
//! working cost by order-type tier, mobilization/demobilization, food and
//! accommodation, the risk-and-usage adjustment, incidental and other-factor
//! charges, and GST. Transport and persistence live with the surrounding
//! CRM services; this crate owns only the math and the session
//! recomputation rules.

pub mod calculators;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod requests;
pub mod responses;
pub mod session;

// Re-export commonly used items
pub use calculators::classify_order_type;
pub use config::PricingConfig;
pub use engine::{price_quotation, Calculations, Diagnostic, PricingOutcome};
pub use error::{PricingError, Result};
pub use models::{EquipmentLine, OrderType, QuotationInputs, RateTable};
pub use requests::QuotationRequest;
pub use responses::QuotationDocument;
pub use session::{QuoteSession, SessionState};
