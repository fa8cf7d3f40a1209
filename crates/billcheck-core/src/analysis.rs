//! End-to-end bill analysis: normalize, then reconcile

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{
    BillBreakdown, DiscrepancyCode, DiscrepancyFinding, NormalizedBill, RawBillFields,
    ValidationIssue,
};
use crate::normalize::normalize;
use crate::reconcile::{reconcile_with, DiscrepancyThresholds};
use crate::tariff::TariffSchedule;

/// Everything computed for one extracted bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillAnalysis {
    pub bill: NormalizedBill,
    pub issues: Vec<ValidationIssue>,
    pub breakdown: BillBreakdown,
    pub findings: Vec<DiscrepancyFinding>,
}

impl BillAnalysis {
    /// Run the pipeline with default thresholds
    pub fn run(raw: &RawBillFields, tariff: &TariffSchedule) -> Self {
        Self::run_with(raw, tariff, &DiscrepancyThresholds::default())
    }

    pub fn run_with(
        raw: &RawBillFields,
        tariff: &TariffSchedule,
        thresholds: &DiscrepancyThresholds,
    ) -> Self {
        let (bill, issues) = normalize(raw);
        let (findings, breakdown) = reconcile_with(&bill, tariff, thresholds);
        Self {
            bill,
            issues,
            breakdown,
            findings,
        }
    }

    /// Findings whose code is not in `exclude`, in original order
    pub fn selected_findings(&self, exclude: &[DiscrepancyCode]) -> Vec<DiscrepancyFinding> {
        self.findings
            .iter()
            .filter(|f| !exclude.contains(&f.code))
            .cloned()
            .collect()
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Pretty JSON export
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
