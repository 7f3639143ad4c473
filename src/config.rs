use std::path::PathBuf;

use clap::Parser;

/// Runs a dealership command script against an in-memory ledger.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "dealership", version)]
pub struct Config {
    /// Command script to execute. Reads stdin when absent or `-`.
    pub script: Option<PathBuf>,

    /// Seed customers from a CSV file with headers `name,id,phone,email`.
    #[arg(long, value_name = "CSV")]
    pub customers: Option<PathBuf>,

    /// Seed catalog items from a CSV file with headers `brand,model,price,stock`.
    #[arg(long, value_name = "CSV")]
    pub items: Option<PathBuf>,

    /// Start from the built-in demo dataset.
    #[arg(long)]
    pub demo: bool,

    /// Stop at the first rejected command instead of logging it and moving on.
    #[arg(long)]
    pub strict: bool,
}

impl Config {
    /// The script path, or `None` when the script comes from stdin.
    pub fn script_path(&self) -> Option<&PathBuf> {
        self.script.as_ref().filter(|p| p.as_os_str() != "-")
    }
}
