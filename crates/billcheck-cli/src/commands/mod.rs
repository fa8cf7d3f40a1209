//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Recompute a bill and list issues and findings
//! - `letter` - Complaint letter generation
//! - `prompt` - Extraction prompt for an external vision model
//! - `tariff` - Tariff schedule inspection and validation
//!
//! Shared helpers for reading extractor replies and resolving the tariff
//! live here.

pub mod analyze;
pub mod letter;
pub mod prompt;
pub mod tariff;

// Re-export command functions for main.rs
pub use analyze::*;
pub use letter::*;
pub use prompt::*;
pub use tariff::*;

use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use billcheck_core::{
    parse_extraction_response, BillAnalysis, DiscrepancyCode, RawBillFields, TariffSchedule,
};

/// Read an extractor reply from a file, or stdin when the path is "-"
pub fn read_reply(file: &Path) -> Result<RawBillFields> {
    let content = if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read extractor reply from stdin")?;
        buf
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read extractor reply {}", file.display()))?
    };

    parse_extraction_response(&content).context("Extractor reply is not usable")
}

/// Resolve and validate the tariff schedule
pub fn load_tariff(path: Option<&Path>) -> Result<TariffSchedule> {
    TariffSchedule::load(path).context("Failed to load tariff schedule")
}

/// Read a reply and run the full analysis
pub fn analyze_file(file: &Path, tariff_path: Option<&Path>) -> Result<BillAnalysis> {
    let tariff = load_tariff(tariff_path)?;
    let raw = read_reply(file)?;
    Ok(BillAnalysis::run(&raw, &tariff))
}

/// Parse discrepancy codes given on the command line
pub fn parse_codes(codes: &[String]) -> Result<Vec<DiscrepancyCode>> {
    codes
        .iter()
        .map(|c| c.parse::<DiscrepancyCode>().map_err(|e: String| anyhow!(e)))
        .collect()
}

/// Format an optional rupee amount for display
pub fn format_amount(amount: Option<f64>) -> String {
    amount
        .map(|a| format!("₹{:.2}", a))
        .unwrap_or_else(|| "N/A".to_string())
}
