//! Plain-text extraction from uploaded PDF bytes.

use crate::errors::AppError;

/// Extracts the plain text of a PDF held in memory.
///
/// All-or-nothing: a document that cannot be parsed, or that yields no text
/// at all (scanned images, empty pages), fails with
/// [`AppError::Extraction`] and produces nothing.
pub fn extract_text(bytes: &[u8]) -> Result<String, AppError> {
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("could not read PDF: {e}")))?;

    let text = normalize_whitespace(&raw);
    if text.is_empty() {
        return Err(AppError::Extraction(
            "no text could be extracted from the PDF".to_string(),
        ));
    }

    Ok(text)
}

/// Tidies extractor output: page breaks become newlines, trailing blanks are
/// dropped, and runs of blank lines collapse to a single separator line.
fn normalize_whitespace(raw: &str) -> String {
    let raw = raw.replace('\u{c}', "\n");

    let mut out = String::with_capacity(raw.len());
    let mut pending_blank = false;
    for line in raw.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if pending_blank {
                out.push('\n');
            }
        }
        pending_blank = false;
        out.push_str(line);
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
