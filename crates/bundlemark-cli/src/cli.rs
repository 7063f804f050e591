use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Replay highlight and redaction events and inspect the resulting annotations.
#[derive(Debug, Parser)]
#[command(name = "bundlemark", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay an event script and print the committed annotations
    Replay {
        /// Path to the JSON event script
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only print annotations of this document
        #[arg(long)]
        document: Option<String>,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format (json prints persistence records)
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Session options file (JSON)
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Assign ids annot-1, annot-2, ... instead of random UUIDs
        #[arg(long)]
        sequential_ids: bool,
    },

    /// Replay an event script and print screen-space overlays for one page
    Overlay {
        /// Path to the JSON event script
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Document to render
        #[arg(long)]
        document: String,

        /// 1-based page number
        #[arg(long)]
        page: u32,

        /// Unscaled page height in PDF units
        #[arg(long, default_value_t = 792.0)]
        page_height: f64,

        /// Zoom factor
        #[arg(long, default_value_t = 1.0)]
        scale: f64,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Session options file (JSON)
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Assign ids annot-1, annot-2, ... instead of random UUIDs
        #[arg(long)]
        sequential_ids: bool,
    },

    /// List the highlight color palette
    Palette {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Convert one PDF-space rectangle to screen-space
    Transform {
        /// Left edge in PDF units
        #[arg(long, allow_negative_numbers = true)]
        x: f64,

        /// Bottom edge in PDF units
        #[arg(long, allow_negative_numbers = true)]
        y: f64,

        /// Width in PDF units
        #[arg(long)]
        width: f64,

        /// Height in PDF units
        #[arg(long)]
        height: f64,

        /// Unscaled page height in PDF units
        #[arg(long, default_value_t = 792.0)]
        page_height: f64,

        /// Zoom factor
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        scale: f64,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Output format for all subcommands.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text (tab-separated)
    Text,
    /// JSON output
    Json,
    /// CSV output
    Csv,
}
