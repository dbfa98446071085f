//! Keeps message text on one log line

use std::fmt::Write;

/// Longest message preview that will be logged
const MAX_PREVIEW: usize = 160;

/// Escape a message body for single-line logging
///
/// Control characters are escaped, like `\n` → `\\n`. Bodies
/// longer than [`MAX_PREVIEW`] characters are truncated with
/// an ellipsis.
pub(crate) fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_log() {
        assert_eq!("pf-e\\nind\\t\\x07", escape_log("pf-e\nind\t\u{7}"));
        assert_eq!("a\\\\b", escape_log("a\\b"));

        let long = "x".repeat(MAX_PREVIEW + 20);
        let esc = escape_log(&long);
        assert!(esc.ends_with('…'));
        assert_eq!(MAX_PREVIEW + 1, esc.chars().count());
    }
}
