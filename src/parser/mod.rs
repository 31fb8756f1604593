// Form 1040 parsing pipeline: file validation, text extraction,
// classification, then field extraction.
pub mod fields;
pub mod form;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::Datelike;

use crate::error::TaxError;
use crate::pdf_extraction::{self, MAX_SCAN_PAGES};
use form::FormType;

/// Earliest tax year with a shipped budget table format we trust.
pub const MIN_SUPPORTED_YEAR: u16 = 2019;

/// Everything the calculator needs from an uploaded return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedReturn {
    pub form_type: FormType,
    pub year: u16,
    /// Name of the heuristic that identified the year, for diagnostics.
    pub year_source: &'static str,
    pub income_tax: i64,
}

/// Latest acceptable tax year: the current calendar year.
pub fn max_supported_year() -> u16 {
    chrono::Local::now().year() as u16
}

/// Parse a Form 1040 PDF end to end.
pub fn parse_return(path: &Path) -> Result<ParsedReturn, TaxError> {
    validate_pdf_input(path)?;
    let pages = pdf_extraction::extract_document_text(path, MAX_SCAN_PAGES)?;
    parse_return_text(&pages.join("\n"))
}

/// Identify the form type only. Input validation matches `parse_return`:
/// non-PDF paths are rejected before extraction runs.
pub fn classify_return(path: &Path) -> Result<FormType, TaxError> {
    validate_pdf_input(path)?;
    let pages = pdf_extraction::extract_document_text(path, MAX_SCAN_PAGES)?;
    form::classify(&pages.join("\n")).ok_or(TaxError::UnsupportedForm)
}

/// Classify and extract fields from already-extracted text.
pub fn parse_return_text(text: &str) -> Result<ParsedReturn, TaxError> {
    let form_type = form::classify(text).ok_or(TaxError::UnsupportedForm)?;
    if form_type == FormType::Form1040X {
        return Err(TaxError::AmendedReturn);
    }

    let (year_source, year) = fields::extract_year_named(text).ok_or(TaxError::YearNotFound)?;
    let max = max_supported_year();
    if year < MIN_SUPPORTED_YEAR || year > max {
        return Err(TaxError::YearOutOfRange {
            year,
            min: MIN_SUPPORTED_YEAR,
            max,
        });
    }

    let income_tax = fields::extract_income_tax(text).ok_or(TaxError::AmountNotFound)?;

    Ok(ParsedReturn {
        form_type,
        year,
        year_source,
        income_tax,
    })
}

// Accept a .pdf suffix, or a %PDF magic header when the name carries no
// suffix. Everything else is rejected before lopdf ever runs.
fn validate_pdf_input(path: &Path) -> Result<(), TaxError> {
    let suffix_ok = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("pdf"));
    if suffix_ok {
        return Ok(());
    }

    let mut magic = [0u8; 4];
    if let Ok(mut file) = File::open(path) {
        if file.read_exact(&mut magic).is_ok() && &magic == b"%PDF" {
            return Ok(());
        }
    }

    Err(TaxError::InvalidFileType(path.to_path_buf()))
}
