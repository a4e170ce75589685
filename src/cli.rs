//! Command-line interface definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;

use crate::error::Result;
use crate::record::CustomerRecord;

/// Offer recommendation CLI scoring one customer record against fitted
/// model artifacts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the fitted classifier artifact (JSON)
    pub model: PathBuf,

    /// Path to the fitted scaler artifact (JSON)
    pub scaler: PathBuf,

    /// Path to the fitted label-encoder artifact (JSON)
    pub encoder: PathBuf,

    /// Customer record as a JSON object, e.g. '{"avg_data_usage_gb": 12.5}'
    pub customer: String,

    /// Enable verbose diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse the customer payload supplied on the command line.
    pub fn customer_record(&self) -> Result<CustomerRecord> {
        CustomerRecord::from_json(&self.customer)
    }
}
