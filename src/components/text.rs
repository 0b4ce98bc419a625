//! Display-width aware text helpers
//!
//! Terms and definitions are mostly CJK, which has no spaces to break on and
//! takes two terminal columns per character, so wrapping works per character
//! on display width.

use unicode_width::UnicodeWidthChar;

const ELLIPSIS: char = '…';

/// Wrap `text` to `width` columns, keeping at most `max_lines` lines
///
/// When lines are dropped the last kept line ends with an ellipsis.
pub fn wrap_text(text: &str, width: usize, max_lines: Option<usize>) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_width = 0;
        for c in paragraph.chars() {
            let w = c.width().unwrap_or(0);
            if line_width + w > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            line.push(c);
            line_width += w;
        }
        lines.push(line);
    }

    if let Some(max) = max_lines {
        if lines.len() > max {
            lines.truncate(max);
            if let Some(last) = lines.last_mut() {
                *last = with_ellipsis(last, width);
            }
        }
    }
    lines
}

/// Cut `text` to fit `width` columns, marking the cut with an ellipsis
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return text.to_string();
    }
    with_ellipsis(text, width)
}

fn with_ellipsis(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let budget = width - 1;
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

/// Format a count with thousands separators (1234 -> "1,234")
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
