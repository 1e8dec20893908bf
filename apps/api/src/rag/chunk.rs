//! Sliding-window text chunking.
//!
//! Windows are measured in characters, not bytes, so multi-byte input can
//! never be split mid code point. Consecutive chunks share `overlap`
//! characters of context.

use crate::errors::AppError;

/// Checks chunking parameters. `overlap` must be strictly smaller than
/// `size`, otherwise the window could never advance.
pub fn validate_params(size: usize, overlap: usize) -> Result<(), AppError> {
    if size == 0 {
        return Err(AppError::InvalidConfig(
            "chunk size must be greater than zero".to_string(),
        ));
    }
    if overlap >= size {
        return Err(AppError::InvalidConfig(format!(
            "chunk overlap ({overlap}) must be smaller than chunk size ({size})"
        )));
    }
    Ok(())
}

/// Splits `text` into overlapping windows of at most `size` characters.
///
/// Every chunk except the last is exactly `size` characters long and windows
/// advance by `size - overlap`. Text of `size` characters or fewer comes back
/// as a single chunk. Concatenating all chunks while skipping the first
/// `overlap` characters of every chunk after the first reproduces `text`.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Result<Vec<String>, AppError> {
    validate_params(size, overlap)?;

    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= size {
        return Ok(vec![text.to_string()]);
    }

    let step = size - overlap;
    let mut chunks = Vec::new();
    let mut start = 0;
    loop {
        let end = usize::min(start + size, chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            // Stopping here (rather than when `start` runs past the end)
            // avoids a final window that is nothing but the previous
            // chunk's overlap tail.
            break;
        }
        start += step;
    }

    Ok(chunks)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
