// Line-oriented PDF text extraction - pure Rust implementation.
//
// Walks each page's content stream, decodes Tj/TJ show-text operators
// while tracking the text cursor, then groups the text runs into lines
// by their y position. The field extractor downstream is line-oriented,
// so preserving line structure matters more than exact glyph placement.
use lopdf::{Dictionary, Document, Object};
use std::path::Path;

use crate::error::TaxError;

// Runs whose baselines are within this many points share a line.
const LINE_TOLERANCE: f32 = 3.0;
// Nominal leading used for T* when no explicit leading was seen.
const DEFAULT_LEADING: f32 = 12.0;

/// Extract text from the first `max_pages` pages, one string per page.
/// Lines run top to bottom, runs within a line left to right.
pub fn extract_document_text(pdf_path: &Path, max_pages: usize) -> Result<Vec<String>, TaxError> {
    let document =
        Document::load(pdf_path).map_err(|e| TaxError::UnreadableDocument(e.to_string()))?;

    if document.is_encrypted() {
        return Err(TaxError::PasswordProtected);
    }

    let pages = document.get_pages();
    let mut page_texts = Vec::new();

    for (_page_num, page_id) in pages.iter().take(max_pages) {
        let page_dict = document
            .get_object(*page_id)
            .and_then(Object::as_dict)
            .map_err(|e| TaxError::UnreadableDocument(e.to_string()))?;
        page_texts.push(page_text(&document, page_dict)?);
    }

    Ok(page_texts)
}

/// Extract one page's text by parsing its content stream.
fn page_text(document: &Document, page: &Dictionary) -> Result<String, TaxError> {
    let contents = match page.get(b"Contents") {
        Ok(contents) => contents,
        // A page with no content stream is blank, not an error.
        Err(_) => return Ok(String::new()),
    };
    let content_data = get_content_data(document, contents)
        .map_err(|e| TaxError::UnreadableDocument(e.to_string()))?;

    // Text runs with their baseline positions.
    let mut runs: Vec<(String, f32, f32)> = Vec::new();

    let mut current_x = 0.0_f32;
    let mut current_y = 0.0_f32;
    let mut leading = DEFAULT_LEADING;

    let content_str = String::from_utf8_lossy(&content_data);

    for line in content_str.lines() {
        let line = line.trim();

        if line.ends_with(" Td") || line.ends_with(" TD") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 3 {
                if let (Ok(tx), Ok(ty)) = (parts[0].parse::<f32>(), parts[1].parse::<f32>()) {
                    current_x += tx;
                    current_y += ty;
                    if line.ends_with(" TD") && ty != 0.0 {
                        leading = -ty;
                    }
                }
            }
        } else if line.ends_with(" Tm") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 7 {
                if let (Ok(ex), Ok(ey)) = (parts[4].parse::<f32>(), parts[5].parse::<f32>()) {
                    current_x = ex;
                    current_y = ey;
                }
            }
        } else if line == "T*" {
            current_y -= leading;
        } else if line.ends_with(" TL") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if let Some(Ok(tl)) = parts.first().map(|p| p.parse::<f32>()) {
                leading = tl;
            }
        } else if line.contains("Tj") {
            if let Some(text) = extract_text_from_tj(line) {
                runs.push((text, current_x, current_y));
            }
        } else if line.contains("TJ") {
            if let Some(text) = extract_text_from_tj_array(line) {
                runs.push((text, current_x, current_y));
            }
        }
    }

    Ok(assemble_lines(runs))
}

/// Group runs into lines by baseline, top-to-bottom, left-to-right.
fn assemble_lines(mut runs: Vec<(String, f32, f32)>) -> String {
    // Sort by y descending first (PDF origin is bottom-left); runs that
    // land in the same line bucket are re-sorted by x afterwards.
    runs.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

    let mut lines: Vec<Vec<(String, f32)>> = Vec::new();
    let mut line_y = f32::INFINITY;

    for (text, x, y) in runs {
        if text.trim().is_empty() {
            continue;
        }
        // A malformed stream ("NaN NaN Td") can poison the cursor; such
        // runs cannot be placed on any line.
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        if (line_y - y).abs() > LINE_TOLERANCE {
            lines.push(Vec::new());
            line_y = y;
        }
        if let Some(line) = lines.last_mut() {
            line.push((text.trim().to_string(), x));
        }
    }

    let mut out = Vec::with_capacity(lines.len());
    for mut line in lines {
        line.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        let joined = line
            .into_iter()
            .map(|(text, _)| text)
            .collect::<Vec<_>>()
            .join(" ");
        out.push(joined);
    }

    out.join("\n")
}

// Get content data from content object, following references and
// concatenating stream arrays.
fn get_content_data(document: &Document, contents: &Object) -> Result<Vec<u8>, lopdf::Error> {
    match contents {
        Object::Reference(r) => {
            let obj = document.get_object(*r)?;
            get_content_data(document, obj)
        }
        Object::Stream(stream) => stream.decompressed_content(),
        Object::Array(arr) => {
            let mut data = Vec::new();
            for item in arr {
                data.extend_from_slice(&get_content_data(document, item)?);
            }
            Ok(data)
        }
        _ => Ok(Vec::new()),
    }
}

// Extract text from a Tj operator: (string) Tj
fn extract_text_from_tj(line: &str) -> Option<String> {
    let start = line.find('(')?;
    let end = line.rfind(')')?;
    if end > start {
        Some(decode_pdf_string(&line[start + 1..end]))
    } else {
        None
    }
}

// Extract text from a TJ array operator: [(a) -120 (b)] TJ
fn extract_text_from_tj_array(line: &str) -> Option<String> {
    let start = line.find('[')?;
    let end = line.rfind(']')?;
    if end <= start {
        return None;
    }

    let mut result = String::new();
    let mut in_string = false;
    let mut current = String::new();

    for ch in line[start + 1..end].chars() {
        if ch == '(' && !in_string {
            in_string = true;
            current.clear();
        } else if ch == ')' && in_string {
            in_string = false;
            result.push_str(&decode_pdf_string(&current));
        } else if in_string {
            current.push(ch);
        }
    }

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

// Basic PDF literal-string decoder (escape sequences only).
fn decode_pdf_string(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                match next {
                    'n' => result.push('\n'),
                    'r' => result.push('\r'),
                    't' => result.push('\t'),
                    '\\' => result.push('\\'),
                    '(' => result.push('('),
                    ')' => result.push(')'),
                    _ => result.push(next),
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tj_operator_decodes() {
        assert_eq!(
            extract_text_from_tj("(Total tax) Tj"),
            Some("Total tax".to_string())
        );
        assert_eq!(extract_text_from_tj("no text here"), None);
    }

    #[test]
    fn tj_array_concatenates_strings() {
        assert_eq!(
            extract_text_from_tj_array("[(Form) -250 (1040)] TJ"),
            Some("Form1040".to_string())
        );
    }

    #[test]
    fn escapes_decode() {
        assert_eq!(decode_pdf_string(r"a\(b\)c"), "a(b)c");
        assert_eq!(decode_pdf_string(r"line\nbreak"), "line\nbreak");
    }

    #[test]
    fn runs_group_into_lines_top_down() {
        let runs = vec![
            ("24".to_string(), 10.0, 500.0),
            ("Total tax".to_string(), 40.0, 500.5),
            ("12,345".to_string(), 200.0, 499.0),
            ("Form 1040".to_string(), 10.0, 700.0),
        ];
        let text = assemble_lines(runs);
        assert_eq!(text, "Form 1040\n24 Total tax 12,345");
    }

    #[test]
    fn non_finite_coordinates_are_dropped() {
        let runs = vec![
            ("garbage".to_string(), f32::NAN, f32::NAN),
            ("24 Total tax".to_string(), 10.0, 500.0),
            ("lost".to_string(), 30.0, f32::INFINITY),
        ];
        assert_eq!(assemble_lines(runs), "24 Total tax");
        // A stream yielding only poisoned cursors produces no text.
        assert_eq!(
            assemble_lines(vec![("x".to_string(), 0.0, f32::NAN)]),
            ""
        );
    }

    #[test]
    fn blank_runs_are_dropped() {
        let runs = vec![
            ("   ".to_string(), 0.0, 100.0),
            ("x".to_string(), 0.0, 50.0),
        ];
        assert_eq!(assemble_lines(runs), "x");
    }
}
