// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Multiline text wrapping against a fixed column width.

use folio_core::TextStyle;
use serde::Serialize;

use super::metrics::measure;

/// Horizontal placement of wrapped lines within the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Alignment {
    Left,
    Center,
}

/// A block of text broken into lines for one style and width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrappedText {
    pub lines: Vec<String>,
    pub font_size: f32,
    pub line_height: f32,
    /// `lines.len() * line_height`, no extra padding.
    pub total_height: f32,
}

impl WrappedText {
    /// Rendered width of line `index`.
    pub fn line_width(&self, index: usize) -> f32 {
        self.lines
            .get(index)
            .map(|line| measure(line, self.font_size))
            .unwrap_or(0.0)
    }

    /// X offset of each line from the column's left edge.
    pub fn line_offsets(&self, alignment: Alignment, column_width: f32) -> Vec<f32> {
        (0..self.lines.len())
            .map(|index| match alignment {
                Alignment::Left => 0.0,
                Alignment::Center => ((column_width - self.line_width(index)) / 2.0).max(0.0),
            })
            .collect()
    }
}

/// Break `text` into lines no wider than `max_width` at `style.size`.
///
/// Newlines in the input always start a new line. Within a paragraph lines
/// break at whitespace; a single word wider than the column is split at
/// character boundaries.
pub fn wrap_text(text: &str, style: &TextStyle, max_width: f32) -> WrappedText {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();

        for word in words {
            if measure(word, style.size) > max_width {
                if !current_line.is_empty() {
                    lines.push(std::mem::take(&mut current_line));
                }
                let mut chunks = hard_break(word, style.size, max_width);
                // The tail of the broken word can share a line with what follows.
                if let Some(tail) = chunks.pop() {
                    lines.extend(chunks);
                    current_line = tail;
                }
                continue;
            }

            if current_line.is_empty() {
                current_line.push_str(word);
                continue;
            }

            let candidate = format!("{current_line} {word}");
            if measure(&candidate, style.size) <= max_width {
                current_line = candidate;
            } else {
                lines.push(std::mem::replace(&mut current_line, word.to_string()));
            }
        }

        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    let total_height = lines.len() as f32 * style.line_height;
    WrappedText {
        lines,
        font_size: style.size,
        line_height: style.line_height,
        total_height,
    }
}

/// Split a word that cannot fit on one line into column-width chunks.
///
/// Every chunk holds at least one character, so a column narrower than a
/// single glyph still makes progress.
fn hard_break(word: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();

    for c in word.chars() {
        let mut candidate = chunk.clone();
        candidate.push(c);
        if !chunk.is_empty() && measure(&candidate, font_size) > max_width {
            chunks.push(std::mem::take(&mut chunk));
            chunk.push(c);
        } else {
            chunk = candidate;
        }
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}
