//! Paragraph-boundary chunker for leaf section content.
//!
//! Leaf sections can run to many pages; embedding backends want bounded
//! inputs. [`chunk_section`] splits a section's content into
//! [`Paragraph`]s that respect a `max_tokens` limit, cutting on blank lines
//! where possible.
//!
//! Paragraph ids are derived from the section id and the paragraph index,
//! so re-chunking unchanged content reproduces the same ids.
//!
//! # Algorithm
//!
//! 1. Convert `max_tokens` to `max_chars` at 4 chars/token.
//! 2. Split on `\n\n` and pack trimmed paragraphs greedily into a buffer.
//! 3. Flush the buffer when the next paragraph would overflow it.
//! 4. Hard-split a paragraph longer than `max_chars` at the last newline
//!    or space before the limit, falling back to the limit itself.
//! 5. Always return at least one paragraph.
//!
//! ```rust
//! use lawcode_core::chunk::chunk_section;
//!
//! let paragraphs = chunk_section("sec", "First.\n\nSecond.", 512);
//! assert_eq!(paragraphs.len(), 1);
//! assert_eq!(paragraphs[0].paragraph_id, "sec_0");
//! ```

use crate::models::Paragraph;
use crate::normalize::content_hash;

/// Rough characters-per-token ratio.
const CHARS_PER_TOKEN: usize = 4;

/// Split `text` into paragraphs of at most `max_tokens` (approximate).
///
/// Indices are contiguous from 0 and `paragraph_id` is
/// `"<section_id>_<index>"`.
pub fn chunk_section(section_id: &str, text: &str, max_tokens: usize) -> Vec<Paragraph> {
    let max_chars = max_tokens.saturating_mul(CHARS_PER_TOKEN).max(1);
    let mut pieces: Vec<String> = Vec::new();
    let mut buf = String::new();

    for para in text.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
        let joined_len = if buf.is_empty() {
            para.len()
        } else {
            buf.len() + 2 + para.len()
        };
        if joined_len > max_chars && !buf.is_empty() {
            pieces.push(std::mem::take(&mut buf));
        }

        if para.len() > max_chars {
            pieces.extend(hard_split(para, max_chars));
            continue;
        }

        if !buf.is_empty() {
            buf.push_str("\n\n");
        }
        buf.push_str(para);
    }

    if !buf.is_empty() {
        pieces.push(buf);
    }
    if pieces.is_empty() {
        pieces.push(text.trim().to_string());
    }

    pieces
        .into_iter()
        .enumerate()
        .map(|(index, text)| Paragraph {
            paragraph_id: format!("{section_id}_{index}"),
            index,
            hash: content_hash(&text),
            text,
        })
        .collect()
}

/// Cut an oversized paragraph into trimmed pieces no longer than `max_chars`
/// bytes (a single multi-byte char may exceed a very small limit).
fn hard_split(mut remaining: &str, max_chars: usize) -> Vec<String> {
    let mut out = Vec::new();
    while !remaining.is_empty() {
        let cut = if remaining.len() <= max_chars {
            remaining.len()
        } else {
            let limit = floor_char_boundary(remaining, max_chars);
            let soft = remaining[..limit]
                .rfind(['\n', ' '])
                .map(|pos| pos + 1)
                .unwrap_or(limit);
            if soft == 0 {
                next_char_boundary(remaining)
            } else {
                soft
            }
        };
        let piece = remaining[..cut].trim();
        if !piece.is_empty() {
            out.push(piece.to_string());
        }
        remaining = &remaining[cut..];
    }
    out
}

/// Largest char boundary `<= index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Byte length of the first char of a non-empty string.
fn next_char_boundary(s: &str) -> usize {
    s.chars().next().map(char::len_utf8).unwrap_or(s.len())
}
