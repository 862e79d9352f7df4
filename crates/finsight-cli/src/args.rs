use crate::types::{LogLevel, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "finsight")]
#[command(about = "Normalize and analyze LLM provider responses", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to $FINSIGHT_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Overrides $FINSIGHT_LOG
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

/// How the parser is chosen. Without either flag the config file decides,
/// then the model name found in the input.
#[derive(Args, Debug, Clone, Default)]
pub struct Selection {
    /// Provider whose response shape the input has (anthropic, openai, google)
    #[arg(long, conflicts_with = "model")]
    pub provider: Option<String>,

    /// Model name to infer the provider from
    #[arg(long)]
    pub model: Option<String>,

    /// Fail when the model name matches no provider instead of assuming Anthropic
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize one response and print the unified JSON
    Parse {
        /// Response JSON file, or `-` for stdin
        file: PathBuf,

        #[command(flatten)]
        selection: Selection,
    },

    /// Normalize, analyze and validate one response
    Process {
        /// Response JSON file, or `-` for stdin
        file: PathBuf,

        #[command(flatten)]
        selection: Selection,

        #[arg(long, default_value = "json")]
        format: OutputFormat,

        /// Print the whole processed response instead of the summary
        #[arg(long)]
        full: bool,

        /// Tool spending limit in USD
        #[arg(long)]
        budget: Option<f64>,
    },

    /// Reassemble a streamed response (one chunk per line) and process it
    Stream {
        /// JSON Lines file, or `-` for stdin
        file: PathBuf,

        #[command(flatten)]
        selection: Selection,

        #[arg(long, default_value = "json")]
        format: OutputFormat,

        #[arg(long)]
        full: bool,

        #[arg(long)]
        budget: Option<f64>,
    },

    /// List built-in providers and the model names they match
    Providers,
}
