// PDF text extraction module - pure Rust via lopdf
pub mod page_text;

pub use page_text::extract_document_text;

/// Pages scanned per document. The numbers we need are on page 1 of
/// every 1040 revision; two extra pages of slack cover cover sheets.
pub const MAX_SCAN_PAGES: usize = 3;
