// Structured-data export: the breakdown result plus an export timestamp,
// mirroring what the diagram renderer's data download produces.
use std::fs;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::error::TaxError;
use crate::types::BreakdownResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BreakdownExport<'a> {
    exported_at: String,
    generator: &'static str,
    #[serde(flatten)]
    breakdown: &'a BreakdownResult,
}

const GENERATOR: &str = concat!("taxflow ", env!("CARGO_PKG_VERSION"));

/// Serialize a breakdown with its export timestamp.
pub fn to_json_string(result: &BreakdownResult) -> Result<String, TaxError> {
    let export = BreakdownExport {
        exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        generator: GENERATOR,
        breakdown: result,
    };
    serde_json::to_string_pretty(&export).map_err(|e| TaxError::Calculation(e.to_string()))
}

/// Write the JSON export to a file.
pub fn write_json(result: &BreakdownResult, path: &Path) -> Result<(), TaxError> {
    let json = to_json_string(result)?;
    fs::write(path, json).map_err(|e| {
        TaxError::Calculation(format!("could not write {}: {e}", path.display()))
    })
}
