//! Command-line arguments.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Render GiNZA dependency parses of Japanese text as a navigable report
#[derive(Parser, Debug)]
#[command(name = "ginza-report")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file, one block per line. Reads stdin when omitted or `-`
    pub input: Option<PathBuf>,

    /// Analyse all lines as a single block
    #[arg(long)]
    pub ignore_line_breaks: bool,

    /// Input is CoNLL-U already produced by GiNZA; `# newdoc` separates blocks
    #[arg(long, conflicts_with_all = ["ginza", "model"])]
    pub conllu: bool,

    /// GiNZA command used to analyse each block
    #[arg(long, value_name = "PROGRAM", default_value = "ginza")]
    pub ginza: String,

    /// Model passed to the GiNZA command with `-m`
    #[arg(long, value_name = "NAME")]
    pub model: Option<String>,

    /// Report settings (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Html)]
    pub format: Format,

    /// Write the report here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Html,
    Text,
}

impl Cli {
    /// Arguments for the GiNZA command.
    pub fn ginza_args(&self) -> Vec<String> {
        match &self.model {
            Some(model) => vec!["-m".to_string(), model.clone()],
            None => Vec::new(),
        }
    }

    /// The input file, or `None` for stdin.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|path| path.as_os_str() != "-")
    }
}
