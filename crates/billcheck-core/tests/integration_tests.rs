//! Integration tests for billcheck-core
//!
//! These tests exercise the full extractor reply → analysis → letter workflow.

use billcheck_core::{
    compose_letter, parse_extraction_response, BillAnalysis, BillField, DiscrepancyCode,
    IssueKind, Language, TariffSchedule, SENTINEL,
};

/// A typical fenced reply from a vision model with every field present
fn overcharged_reply() -> &'static str {
    r#"```json
{
  "Consumer_ID": "4401992817",
  "Consumer_Name": "Ramesh Kumar",
  "Sanctioned_Load_kW": "5",
  "Units_Consumed_kWh": "150",
  "Billing_Date": "05/02/2024",
  "Total_Amount_Payable_INR": "2,000.00",
  "Discom_Name": "Dakshinanchal Vidyut Vitran Nigam Ltd"
}
```"#
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_full_workflow_with_overcharge() {
    let raw = parse_extraction_response(overcharged_reply()).expect("reply should parse");
    let analysis = BillAnalysis::run(&raw, &TariffSchedule::default());

    assert!(analysis.issues.is_empty());
    assert!(approx(analysis.breakdown.fixed, 600.0));
    assert!(approx(analysis.breakdown.energy, 900.0));
    assert!(approx(analysis.breakdown.duty, 75.0));
    assert_eq!(analysis.breakdown.total, 1575.00);

    assert_eq!(analysis.findings.len(), 1);
    let finding = &analysis.findings[0];
    assert_eq!(finding.code, DiscrepancyCode::CalcErr);
    assert!(finding.description.contains("₹1575.00"));
    assert!(finding.description.contains("₹2000.00"));

    let letter = compose_letter(
        &analysis.bill,
        &analysis.selected_findings(&[]),
        "Please also share the meter reading photo.",
        Language::English,
    );
    assert!(letter.contains("Dakshinanchal Vidyut Vitran Nigam Ltd"));
    assert!(letter.contains("Ramesh Kumar"));
    assert!(letter.contains(&finding.description));
}

#[test]
fn test_high_use_reports_ratio_with_one_decimal() {
    let raw = parse_extraction_response(
        r#"{"Sanctioned_Load_kW": 1, "Units_Consumed_kWh": 250}"#,
    )
    .unwrap();
    let analysis = BillAnalysis::run(&raw, &TariffSchedule::default());

    let codes: Vec<_> = analysis.findings.iter().map(|f| f.code).collect();
    assert_eq!(codes, vec![DiscrepancyCode::HighUse]);
    assert!(analysis.findings[0].description.contains("250.0"));
}

#[test]
fn test_missing_load_only_raises_missing_data() {
    let raw = parse_extraction_response(
        r#"{"Consumer_Name": "N/A", "Sanctioned_Load_kW": "N/A", "Units_Consumed_kWh": "N/A", "Total_Amount_Payable_INR": "N/A"}"#,
    )
    .unwrap();
    let analysis = BillAnalysis::run(&raw, &TariffSchedule::default());

    // every numeric field degrades to a Missing issue, in check order
    let issue_fields: Vec<_> = analysis.issues.iter().map(|i| i.field).collect();
    assert_eq!(
        issue_fields,
        vec![
            BillField::SanctionedLoad,
            BillField::UnitsConsumed,
            BillField::TotalAmountPayable
        ]
    );
    assert!(analysis.issues.iter().all(|i| i.kind == IssueKind::Missing));

    assert_eq!(analysis.findings.len(), 1);
    assert_eq!(analysis.findings[0].code, DiscrepancyCode::MissingData);
    assert_eq!(analysis.breakdown.fixed, 0.0);
    assert_eq!(analysis.bill.consumer_name, SENTINEL);
}

#[test]
fn test_matching_bill_has_no_findings() {
    let raw = parse_extraction_response(
        r#"Sure! {"Sanctioned_Load_kW": "2", "Units_Consumed_kWh": "90", "Total_Amount_Payable_INR": "771.75"}"#,
    )
    .unwrap();
    let analysis = BillAnalysis::run(&raw, &TariffSchedule::default());

    // (240 + 495) * 1.05
    assert_eq!(analysis.breakdown.total, 771.75);
    assert!(!analysis.has_findings());
}

#[test]
fn test_division_guards() {
    let raw = parse_extraction_response(
        r#"{"Sanctioned_Load_kW": "0", "Units_Consumed_kWh": "5000", "Total_Amount_Payable_INR": "0"}"#,
    )
    .unwrap();
    let analysis = BillAnalysis::run(&raw, &TariffSchedule::default());

    assert!(analysis.issues.is_empty());
    assert!(analysis.findings.is_empty());
}

#[test]
fn test_alternative_tariff_changes_verdict() {
    let raw = parse_extraction_response(
        r#"{"Sanctioned_Load_kW": "5", "Units_Consumed_kWh": "150", "Total_Amount_Payable_INR": "1732.50"}"#,
    )
    .unwrap();

    // (750 + 900) * 1.05 = 1732.50 under the higher schedule
    let higher = TariffSchedule::two_slab(150.0, 150.0, 6.00, 7.50, 0.05);
    let analysis = BillAnalysis::run(&raw, &higher);
    assert_eq!(analysis.breakdown.total, 1732.50);
    assert!(analysis.findings.is_empty());

    // 1575 vs 1732.50 is ~9% under the default schedule
    let analysis = BillAnalysis::run(&raw, &TariffSchedule::default());
    assert_eq!(analysis.findings[0].code, DiscrepancyCode::CalcErr);
}

#[test]
fn test_hindi_letter_with_exclusions() {
    let raw = parse_extraction_response(
        r#"{"Consumer_ID": "77", "Consumer_Name": "सुनीता", "Sanctioned_Load_kW": "1", "Units_Consumed_kWh": "400", "Total_Amount_Payable_INR": "10", "Discom_Name": "MVVNL"}"#,
    )
    .unwrap();
    let analysis = BillAnalysis::run(&raw, &TariffSchedule::default());
    assert_eq!(analysis.findings.len(), 2);

    let selected = analysis.selected_findings(&[DiscrepancyCode::CalcErr]);
    let letter = compose_letter(&analysis.bill, &selected, "", Language::Hindi);

    assert!(letter.contains("MVVNL"));
    assert!(letter.contains("सुनीता"));
    assert!(letter.contains(&selected[0].description_hindi));
    let calc = analysis
        .findings
        .iter()
        .find(|f| f.code == DiscrepancyCode::CalcErr)
        .unwrap();
    assert!(!letter.contains(&calc.description_hindi));
}
