//! Bill analysis command

use std::path::Path;

use anyhow::Result;
use billcheck_core::BillAnalysis;

use super::{analyze_file, format_amount};

/// Analyze an extractor reply and print the result
pub fn cmd_analyze(file: &Path, tariff_path: Option<&Path>, json: bool) -> Result<()> {
    let analysis = analyze_file(file, tariff_path)?;

    if json {
        println!("{}", analysis.to_json()?);
    } else {
        print_analysis(&analysis);
    }

    Ok(())
}

fn print_analysis(analysis: &BillAnalysis) {
    let bill = &analysis.bill;
    let b = &analysis.breakdown;

    println!(
        "\n⚡ {} (Consumer ID: {})",
        bill.consumer_name, bill.consumer_id
    );
    println!(
        "   Discom: {}    Billing date: {}",
        bill.provider_name, bill.billing_date
    );

    println!("\nRecomputed charges");
    println!("{}", "─".repeat(50));
    println!("  {:<22} {:>14}", "Fixed charge", format_amount(Some(b.fixed)));
    println!("  {:<22} {:>14}", "Energy charge", format_amount(Some(b.energy)));
    println!("  {:<22} {:>14}", "Duty", format_amount(Some(b.duty)));
    println!("  {:<22} {:>14}", "Expected total", format_amount(Some(b.total)));
    println!(
        "  {:<22} {:>14}",
        "Stated total",
        format_amount(bill.total_amount_payable)
    );

    if !analysis.issues.is_empty() {
        println!("\nValidation issues ({})", analysis.issues.len());
        println!("{}", "─".repeat(50));
        for issue in &analysis.issues {
            println!("  ⚠️  {}", issue);
        }
    }

    if analysis.findings.is_empty() {
        println!("\n✅ No significant discrepancies found.");
    } else {
        println!("\nPossible discrepancies ({})", analysis.findings.len());
        println!("{}", "─".repeat(50));
        for finding in &analysis.findings {
            println!("  ❗ [{}] {}", finding.code, finding.description);
        }
        println!();
        println!("Next step: billcheck letter <file> --lang english|hindi");
    }

    println!();
}
