//! Tariff schedule commands

use std::path::Path;

use anyhow::{Context, Result};
use billcheck_core::{default_tariff_path, TariffSchedule};

use super::load_tariff;

/// Show the effective tariff schedule
pub fn cmd_tariff_show(tariff_path: Option<&Path>) -> Result<()> {
    let tariff = load_tariff(tariff_path)?;

    println!("Tariff schedule:\n");
    println!("  Fixed charge:  ₹{:.2} per kW of sanctioned load", tariff.fixed_rate_per_kw);
    println!("  Duty:          {:.2}% of (fixed + energy)", tariff.duty_rate * 100.0);
    println!();
    println!("  {:<20} {:>12}", "SLAB (kWh)", "RATE (₹/kWh)");
    println!("  {}", "-".repeat(33));
    for (band, rate) in slab_bands(&tariff) {
        println!("  {:<20} {:>12.2}", band, rate);
    }
    println!();

    Ok(())
}

/// Show where the tariff override lives
pub fn cmd_tariff_path() -> Result<()> {
    match default_tariff_path() {
        Some(path) => {
            let status = if path.exists() { "in use" } else { "not present" };
            println!("{} ({})", path.display(), status);
        }
        None => println!("(not available)"),
    }
    Ok(())
}

/// Validate a tariff file
pub fn cmd_tariff_check(file: &Path) -> Result<()> {
    let tariff = TariffSchedule::load(Some(file))
        .with_context(|| format!("Tariff file {} is invalid", file.display()))?;
    println!(
        "✓ {} is valid ({} slabs)",
        file.display(),
        tariff.slabs.len()
    );
    Ok(())
}

/// Human-readable band labels, e.g. "0 - 100", "above 100"
pub fn slab_bands(tariff: &TariffSchedule) -> Vec<(String, f64)> {
    let mut lower = 0.0;
    tariff
        .slabs
        .iter()
        .map(|slab| match slab.up_to_kwh {
            Some(upper) => {
                let label = format!("{} - {}", lower, upper);
                lower = upper;
                (label, slab.rate)
            }
            None => (format!("above {}", lower), slab.rate),
        })
        .collect()
}
