//! Field normalizer
//!
//! Converts loosely-typed extractor output into a [`NormalizedBill`].
//! Sentinel handling lives here and nowhere else: downstream code only ever
//! sees `Option<f64>` for numbers and non-empty strings for text.

use serde_json::Value;
use tracing::debug;

use crate::models::{BillField, NormalizedBill, RawBillFields, ValidationIssue, SENTINEL};

/// Outcome of reading one numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
enum NumericField {
    Value(f64),
    Missing,
    Invalid,
}

/// Normalize extractor output
///
/// Never fails. Unusable numeric fields become `None` with an issue recorded;
/// issues are ordered load, units, total.
pub fn normalize(raw: &RawBillFields) -> (NormalizedBill, Vec<ValidationIssue>) {
    let mut issues = Vec::new();

    let mut numeric = |value: &Option<Value>, field: BillField| -> Option<f64> {
        match read_number(value.as_ref()) {
            NumericField::Value(v) => Some(v),
            NumericField::Missing => {
                issues.push(ValidationIssue::missing(field));
                None
            }
            NumericField::Invalid => {
                issues.push(ValidationIssue::invalid(field));
                None
            }
        }
    };

    let sanctioned_load_kw = numeric(&raw.sanctioned_load_kw, BillField::SanctionedLoad);
    let units_consumed_kwh = numeric(&raw.units_consumed_kwh, BillField::UnitsConsumed);
    let total_amount_payable = numeric(&raw.total_amount_payable, BillField::TotalAmountPayable);

    let bill = NormalizedBill {
        consumer_id: read_text(raw.consumer_id.as_ref()),
        consumer_name: read_text(raw.consumer_name.as_ref()),
        sanctioned_load_kw,
        units_consumed_kwh,
        total_amount_payable,
        billing_date: read_text(raw.billing_date.as_ref()),
        provider_name: read_text(raw.provider_name.as_ref()),
    };

    debug!(
        consumer_id = %bill.consumer_id,
        issues = issues.len(),
        "Normalized bill fields"
    );

    (bill, issues)
}

fn read_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => SENTINEL.to_string(),
    }
}

fn read_number(value: Option<&Value>) -> NumericField {
    let parsed = match value {
        None | Some(Value::Null) => return NumericField::Missing,
        Some(Value::String(s)) if s.is_empty() || s == SENTINEL => return NumericField::Missing,
        Some(Value::String(s)) => s.replace(',', "").trim().parse::<f64>().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        Some(_) => None,
    };

    match parsed {
        Some(v) if v.is_finite() && v >= 0.0 => NumericField::Value(v),
        _ => NumericField::Invalid,
    }
}
