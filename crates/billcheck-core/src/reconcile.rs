//! Reconciliation engine
//!
//! Recomputes the expected bill under a tariff schedule and classifies
//! deviations. Checks are independent: a bill may raise any combination of
//! findings, and an absent input only suppresses the checks that need it.

use tracing::debug;

use crate::models::{BillBreakdown, DiscrepancyFinding, NormalizedBill};
use crate::tariff::TariffSchedule;

/// Thresholds for discrepancy classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscrepancyThresholds {
    /// Allowed deviation of the stated total from the recomputed one (percentage)
    pub calc_tolerance_percent: f64,
    /// Units per kW of sanctioned load above which usage is flagged
    pub high_use_units_per_kw: f64,
}

impl Default for DiscrepancyThresholds {
    fn default() -> Self {
        Self {
            calc_tolerance_percent: 3.0,
            high_use_units_per_kw: 200.0,
        }
    }
}

/// Reconcile a bill with the default thresholds
pub fn reconcile(
    bill: &NormalizedBill,
    tariff: &TariffSchedule,
) -> (Vec<DiscrepancyFinding>, BillBreakdown) {
    reconcile_with(bill, tariff, &DiscrepancyThresholds::default())
}

/// Reconcile a bill with explicit thresholds
pub fn reconcile_with(
    bill: &NormalizedBill,
    tariff: &TariffSchedule,
    thresholds: &DiscrepancyThresholds,
) -> (Vec<DiscrepancyFinding>, BillBreakdown) {
    let breakdown = tariff.breakdown(bill.sanctioned_load_kw, bill.units_consumed_kwh);
    let mut findings = Vec::new();

    // Only sanctioned load raises MISSING_DATA; other gaps stay normalizer issues
    if bill.sanctioned_load_kw.is_none() {
        findings.push(DiscrepancyFinding::missing_load());
    }

    if let Some(stated) = bill.total_amount_payable.filter(|s| *s != 0.0) {
        let diff_percent = (breakdown.total - stated).abs() / stated.abs() * 100.0;
        if diff_percent > thresholds.calc_tolerance_percent {
            findings.push(DiscrepancyFinding::calc_error(
                breakdown.total,
                stated,
                diff_percent,
            ));
        }
    }

    if let (Some(load), Some(units)) = (bill.sanctioned_load_kw, bill.units_consumed_kwh) {
        if load != 0.0 {
            let units_per_kw = units / load;
            if units_per_kw > thresholds.high_use_units_per_kw {
                findings.push(DiscrepancyFinding::high_use(units_per_kw));
            }
        }
    }

    debug!(
        consumer_id = %bill.consumer_id,
        computed_total = breakdown.total,
        findings = findings.len(),
        "Reconciled bill"
    );

    (findings, breakdown)
}
