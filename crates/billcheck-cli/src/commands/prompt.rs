//! Extraction prompt command

use anyhow::Result;
use billcheck_core::extraction_prompt;

/// Print the prompt to send with a bill photo
pub fn cmd_prompt(context: Option<&str>) -> Result<()> {
    println!("{}", extraction_prompt(context));
    Ok(())
}
