// taxflow - break a Form 1040 tax payment down into federal spending
// categories.
//
// Pipeline: pdf_extraction (text) -> parser (classify + fields) ->
// calculator (allocation + comparison) -> export.
pub mod calculator;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod parser;
pub mod pdf_extraction;
pub mod types;

pub use error::TaxError;
