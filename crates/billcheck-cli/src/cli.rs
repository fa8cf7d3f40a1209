//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// billcheck - Verify an electricity bill and draft a complaint
#[derive(Parser)]
#[command(name = "billcheck")]
#[command(about = "Electricity bill verifier and complaint letter generator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Tariff schedule file (TOML)
    ///
    /// Defaults to the override in the data dir if present,
    /// otherwise the built-in schedule.
    #[arg(long, global = true)]
    pub tariff: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recompute a bill from extracted fields and list discrepancies
    Analyze {
        /// Extractor reply (JSON, fenced JSON, or text containing JSON); "-" for stdin
        file: PathBuf,

        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a complaint letter for the discrepancies found in a bill
    Letter {
        /// Extractor reply (JSON, fenced JSON, or text containing JSON); "-" for stdin
        file: PathBuf,

        /// Letter language: hindi or english
        #[arg(short, long, default_value = "hindi")]
        lang: String,

        /// Additional context to include in the letter
        #[arg(short, long, default_value = "")]
        context: String,

        /// Leave out findings with this code (MISSING_DATA, CALC_ERR, HIGH_USE)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Output file (defaults to complaint_<timestamp>.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect the tariff schedule
    Tariff {
        #[command(subcommand)]
        action: Option<TariffAction>,
    },

    /// Print the extraction prompt to use with a vision model
    Prompt {
        /// Additional context to append to the prompt
        #[arg(short, long)]
        context: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TariffAction {
    /// Show the effective tariff schedule
    Show,
    /// Show the override file location
    Path,
    /// Validate a tariff file
    Check {
        /// Tariff file to validate
        file: PathBuf,
    },
}
