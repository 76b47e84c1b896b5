//! DKA Core Library
//!
//! Single-patient tracking of diabetic ketoacidosis treatment: an
//! append-only clinical record plus a deterministic recommendation engine
//! encoding a fixed medical protocol.
//!
//! # Architecture
//!
//! ```text
//! Lab Panel (Na, K, Cl, HCO3, pH, glucose)
//!         │
//!         ▼
//! Patient Record ── append-only timestamped series
//!         │
//!         ├── anion gap = (Na + K) - (Cl + HCO3)
//!         └── corrected Na = Na + 0.016 × (glucose - 100)
//!         │
//!         ▼
//! Recommendation Engine
//!   gap < 12 → DKA Resolved (stop)
//!   gap ≥ 12 → insulin drip (once) + fluid order + recheck in 1 hour
//!         │
//!         ▼
//! Evaluation history (session) ──→ Flowsheet export (JSON / CSV)
//! ```
//!
//! # Core Principle
//!
//! **The protocol is encoded exactly as given.** Every evaluation is a
//! deterministic function of the latest recorded values plus one bit of
//! decision memory (the insulin-drip flag); the engine never logs, prints,
//! or guesses.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, LabPanel, Recommendation, Evaluation)
//! - [`protocol`]: Severity classification, fluid table, and the engine
//! - [`session`]: Per-episode orchestrator owning the evaluation history
//! - [`export`]: Flowsheet export for the presentation layer

pub mod export;
pub mod models;
pub mod protocol;
pub mod session;

// Re-export commonly used types
pub use export::FlowsheetExport;
pub use models::{
    DerivedSnapshot, DkaSeverity, ElectrolyteReading, Evaluation, FluidOrder, Gender, LabPanel,
    Observation, Patient, Recommendation, Tonicity, ValidationError,
};
pub use protocol::{classify_severity, select_fluid_order, Engine, ProtocolError};
pub use session::DkaSession;

/// Top-level error for callers that don't care which layer failed.
#[derive(Debug, thiserror::Error)]
pub enum DkaError {
    #[error("Validation error: {0}")]
    Validation(#[from] models::ValidationError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] protocol::ProtocolError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
