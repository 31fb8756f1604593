// Error taxonomy for the breakdown pipeline.
//
// Every variant carries a message a user can act on; the CLI prints the
// Display text verbatim and exits nonzero. Optional data (FICA tables,
// national averages) never produces an error - it degrades to absence.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaxError {
    #[error("Invalid file type for {}. Please supply a PDF file.", .0.display())]
    InvalidFileType(PathBuf),

    #[error("Failed to read the PDF. The file may be corrupted or invalid: {0}")]
    UnreadableDocument(String),

    #[error("This PDF is password-protected. Please unlock it first and try again.")]
    PasswordProtected,

    #[error("This doesn't appear to be a Form 1040, 1040-SR, or 1040-NR. Please supply the correct form.")]
    UnsupportedForm,

    #[error("Amended returns (Form 1040-X) are not supported. Please supply the original Form 1040.")]
    AmendedReturn,

    #[error("Could not identify the tax year from this form. Please ensure it's a complete Form 1040.")]
    YearNotFound,

    #[error("Tax year {year} is not supported. This tool supports years {min}-{max} only.")]
    YearOutOfRange { year: u16, min: u16, max: u16 },

    #[error("Could not find the total tax amount on this form. Please ensure line 24 is visible and complete.")]
    AmountNotFound,

    #[error("Budget data for {year} not found (looked for {})", .path.display())]
    BudgetDataMissing { year: u16, path: PathBuf },

    #[error("Budget data for {year} is invalid: {reason}")]
    BudgetDataInvalid { year: u16, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to calculate breakdown: {0}")]
    Calculation(String),
}

pub type Result<T, E = TaxError> = std::result::Result<T, E>;
