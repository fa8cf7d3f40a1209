//! billcheck CLI - Electricity bill verifier
//!
//! Usage:
//!   billcheck analyze reply.json            Recompute the bill and list discrepancies
//!   billcheck letter reply.json --lang en   Write a complaint letter
//!   billcheck tariff show                   Show the effective tariff
//!   billcheck prompt                        Print the extraction prompt

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use billcheck_core::Language;
use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let tariff_path = cli.tariff.as_deref();

    match cli.command {
        Commands::Analyze { file, json } => commands::cmd_analyze(&file, tariff_path, json),
        Commands::Letter {
            file,
            lang,
            context,
            exclude,
            output,
        } => {
            let language: Language = lang.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            let exclude = commands::parse_codes(&exclude)?;
            commands::cmd_letter(
                &file,
                tariff_path,
                language,
                &context,
                &exclude,
                output.as_deref(),
            )
            .map(|_| ())
        }
        Commands::Tariff { action } => match action {
            None | Some(TariffAction::Show) => commands::cmd_tariff_show(tariff_path),
            Some(TariffAction::Path) => commands::cmd_tariff_path(),
            Some(TariffAction::Check { file }) => commands::cmd_tariff_check(&file),
        },
        Commands::Prompt { context } => commands::cmd_prompt(context.as_deref()),
    }
}
