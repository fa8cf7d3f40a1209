//! Domain models for billcheck

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder used for any string field the extractor could not supply
pub const SENTINEL: &str = "N/A";

/// Bill fields as returned by the external extractor
///
/// Every value is untrusted: keys may be absent, `null`, the literal `"N/A"`,
/// a number, or a string with thousands separators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBillFields {
    #[serde(default, rename = "Consumer_ID")]
    pub consumer_id: Option<Value>,
    #[serde(default, rename = "Consumer_Name")]
    pub consumer_name: Option<Value>,
    #[serde(default, rename = "Sanctioned_Load_kW")]
    pub sanctioned_load_kw: Option<Value>,
    #[serde(default, rename = "Units_Consumed_kWh")]
    pub units_consumed_kwh: Option<Value>,
    #[serde(default, rename = "Billing_Date")]
    pub billing_date: Option<Value>,
    #[serde(default, rename = "Total_Amount_Payable_INR")]
    pub total_amount_payable: Option<Value>,
    #[serde(default, rename = "Discom_Name")]
    pub provider_name: Option<Value>,
}

impl RawBillFields {
    /// Read fields from an extractor JSON object
    ///
    /// Each field accepts its extractor key or a snake_case alias. The
    /// extractor key wins when both are present; `null` counts as absent.
    /// Unknown keys are ignored.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let get = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| object.get(*key))
                .find(|value| !value.is_null())
                .cloned()
        };

        Self {
            consumer_id: get(&["Consumer_ID", "consumer_id"]),
            consumer_name: get(&["Consumer_Name", "consumer_name"]),
            sanctioned_load_kw: get(&["Sanctioned_Load_kW", "sanctioned_load_kw"]),
            units_consumed_kwh: get(&["Units_Consumed_kWh", "units_consumed_kwh"]),
            billing_date: get(&["Billing_Date", "billing_date"]),
            total_amount_payable: get(&["Total_Amount_Payable_INR", "total_amount_payable"]),
            provider_name: get(&["Discom_Name", "provider_name", "discom_name"]),
        }
    }
}

/// Validated bill record consumed by the reconciliation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBill {
    pub consumer_id: String,
    pub consumer_name: String,
    pub sanctioned_load_kw: Option<f64>,
    pub units_consumed_kwh: Option<f64>,
    pub total_amount_payable: Option<f64>,
    pub billing_date: String,
    /// The discom that issued the bill
    pub provider_name: String,
}

/// Numeric bill fields checked by the normalizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillField {
    SanctionedLoad,
    UnitsConsumed,
    TotalAmountPayable,
}

impl BillField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SanctionedLoad => "sanctioned_load_kw",
            Self::UnitsConsumed => "units_consumed_kwh",
            Self::TotalAmountPayable => "total_amount_payable",
        }
    }

    /// Human-readable name for CLI output
    pub fn label(&self) -> &'static str {
        match self {
            Self::SanctionedLoad => "Sanctioned load (kW)",
            Self::UnitsConsumed => "Units consumed (kWh)",
            Self::TotalAmountPayable => "Total amount payable (₹)",
        }
    }
}

impl std::fmt::Display for BillField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a numeric field was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// Absent, null, empty or the sentinel
    Missing,
    /// Present but not a usable number
    Invalid,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Invalid => "invalid",
        }
    }
}

/// A per-field problem found during normalization
///
/// Informational only; never blocks reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: BillField,
    pub kind: IssueKind,
}

impl ValidationIssue {
    pub fn missing(field: BillField) -> Self {
        Self {
            field,
            kind: IssueKind::Missing,
        }
    }

    pub fn invalid(field: BillField) -> Self {
        Self {
            field,
            kind: IssueKind::Invalid,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.kind.as_str())
    }
}

/// Recomputed charges for a bill
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BillBreakdown {
    pub fixed: f64,
    pub energy: f64,
    pub duty: f64,
    /// Rounded to paise (2 decimals)
    pub total: f64,
}

/// Closed set of discrepancy codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscrepancyCode {
    /// Sanctioned load absent from the bill
    MissingData,
    /// Stated total deviates from the recomputed total
    CalcErr,
    /// Consumption per kW of sanctioned load is abnormally high
    HighUse,
}

impl DiscrepancyCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingData => "MISSING_DATA",
            Self::CalcErr => "CALC_ERR",
            Self::HighUse => "HIGH_USE",
        }
    }

    pub fn all() -> &'static [DiscrepancyCode] {
        &[Self::MissingData, Self::CalcErr, Self::HighUse]
    }
}

impl std::str::FromStr for DiscrepancyCode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "MISSING_DATA" => Ok(Self::MissingData),
            "CALC_ERR" => Ok(Self::CalcErr),
            "HIGH_USE" => Ok(Self::HighUse),
            _ => Err(format!("Unknown discrepancy code: {}", s)),
        }
    }
}

impl std::fmt::Display for DiscrepancyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A business finding raised by reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscrepancyFinding {
    pub code: DiscrepancyCode,
    pub description: String,
    pub description_hindi: String,
}

impl DiscrepancyFinding {
    pub fn missing_load() -> Self {
        Self {
            code: DiscrepancyCode::MissingData,
            description: "Sanctioned load is missing from the bill.".to_string(),
            description_hindi: "बिल में स्वीकृत भार (Sanctioned Load) अंकित नहीं है।".to_string(),
        }
    }

    pub fn calc_error(computed: f64, stated: f64, diff_percent: f64) -> Self {
        Self {
            code: DiscrepancyCode::CalcErr,
            description: format!(
                "Bill calculation mismatch: expected ₹{:.2} but the bill states ₹{:.2} ({:.2}% difference).",
                computed, stated, diff_percent
            ),
            description_hindi: format!(
                "बिल की गणना में अंतर: अपेक्षित राशि ₹{:.2}, जबकि बिल में ₹{:.2} ({:.2}% अंतर)।",
                computed, stated, diff_percent
            ),
        }
    }

    pub fn high_use(units_per_kw: f64) -> Self {
        Self {
            code: DiscrepancyCode::HighUse,
            description: format!(
                "Unusually high consumption: {:.1} units per kW of sanctioned load.",
                units_per_kw
            ),
            description_hindi: format!(
                "असामान्य रूप से अधिक खपत: प्रति kW स्वीकृत भार पर {:.1} यूनिट।",
                units_per_kw
            ),
        }
    }
}
