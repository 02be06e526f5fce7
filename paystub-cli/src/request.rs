//! JSON request and tax-table loading.
//!
//! The estimator boundary is JSON-shaped: a request file carries one
//! [`PayStubInput`], and a table file carries a full [`TaxYearConfig`]
//! replacing the builtin 2025 tables. Loaded tables are validated here;
//! the worksheet assumes valid tables.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use paystub_core::{PayStubInput, TaxYearConfig};

/// Reads one estimation request from a JSON file.
pub fn load_request(path: &Path) -> Result<PayStubInput> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read request file '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid request file '{}'", path.display()))
}

/// Reads and validates a replacement tax-table set from a JSON file.
pub fn load_tax_tables(path: &Path) -> Result<TaxYearConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read tax table file '{}'", path.display()))?;
    let config: TaxYearConfig = serde_json::from_str(&text)
        .with_context(|| format!("invalid tax table file '{}'", path.display()))?;
    config
        .validate()
        .with_context(|| format!("malformed tax tables in '{}'", path.display()))?;
    Ok(config)
}
