//! billcheck Core Library
//!
//! Shared functionality for verifying electricity bills:
//! - Field normalizer for loosely-typed extractor output
//! - Slabbed tariff model with TOML configuration
//! - Reconciliation engine that recomputes the bill and flags discrepancies
//! - Extractor response parsing and the extraction prompt
//! - Complaint letter composition (English and Hindi)
//!
//! The normalizer and the reconciliation engine are pure functions over
//! explicit arguments; the tariff schedule is passed in, never global.

pub mod analysis;
pub mod error;
pub mod extraction;
pub mod letter;
pub mod models;
pub mod normalize;
pub mod reconcile;
pub mod tariff;

pub use analysis::BillAnalysis;
pub use error::{Error, Result};
pub use extraction::{extraction_prompt, parse_extraction_response, EXTRACTION_PROMPT};
pub use letter::{compose_letter, Language};
pub use models::{
    BillBreakdown, BillField, DiscrepancyCode, DiscrepancyFinding, IssueKind, NormalizedBill,
    RawBillFields, ValidationIssue, SENTINEL,
};
pub use normalize::normalize;
pub use reconcile::{reconcile, reconcile_with, DiscrepancyThresholds};
pub use tariff::{default_tariff_path, round_currency, Slab, TariffSchedule};
