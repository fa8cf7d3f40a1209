//! Complaint letter command

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use billcheck_core::{compose_letter, DiscrepancyCode, Language};
use tracing::info;

use super::analyze_file;

/// Write a complaint letter; returns the path written, or `None` when
/// there is nothing to complain about
pub fn cmd_letter(
    file: &Path,
    tariff_path: Option<&Path>,
    language: Language,
    context: &str,
    exclude: &[DiscrepancyCode],
    output: Option<&Path>,
) -> Result<Option<PathBuf>> {
    let analysis = analyze_file(file, tariff_path)?;
    let selected = analysis.selected_findings(exclude);

    if selected.is_empty() {
        if analysis.has_findings() {
            println!("All findings were excluded; no letter written.");
        } else {
            println!("✅ No significant discrepancies found; no letter needed.");
        }
        return Ok(None);
    }

    let letter = compose_letter(&analysis.bill, &selected, context, language);

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
            PathBuf::from(format!("complaint_{}.txt", timestamp))
        }
    };

    std::fs::write(&path, &letter)
        .with_context(|| format!("Failed to write letter to {}", path.display()))?;

    info!(
        path = %path.display(),
        findings = selected.len(),
        language = %language,
        "Letter written"
    );

    println!("{}", letter);
    println!("✓ Letter saved to {}", path.display());

    Ok(Some(path))
}
