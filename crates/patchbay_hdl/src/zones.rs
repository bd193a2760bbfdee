//! The head/body/tail zone split and generated-statement recognition.

use crate::error::HdlError;

/// A Verilog source split at its two structural anchors.
///
/// All three zones are slices of the original text: `head` runs from the
/// start of the file through the `);` closing the module port list, `tail`
/// runs from the start of the final `endmodule` line to end of file, and
/// `body` is everything in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceZones<'a> {
    /// Module header, ending with the port list terminator `);`.
    pub head: &'a str,
    /// The mutable zone holding generated assigns and hand-written lines.
    pub body: &'a str,
    /// The final `endmodule` line and everything after it.
    pub tail: &'a str,
}

/// Splits a Verilog source into its three zones.
///
/// The head anchor is the first `);` in the file (the port list terminator;
/// the file contract guarantees exactly one head boundary). The tail anchor
/// is the *last* line whose trimmed text is `endmodule` — the token may
/// appear earlier inside comments, so earlier occurrences are never trusted.
pub fn split_zones(text: &str) -> Result<SourceZones<'_>, HdlError> {
    let head_end = text
        .find(");")
        .map(|idx| idx + 2)
        .ok_or_else(|| HdlError::MalformedSource {
            reason: "missing `);` port list terminator".to_string(),
        })?;

    let tail_start = last_endmodule_line_start(text).ok_or_else(|| HdlError::MalformedSource {
        reason: "missing `endmodule` line".to_string(),
    })?;

    if tail_start < head_end {
        return Err(HdlError::MalformedSource {
            reason: "`endmodule` precedes the port list terminator".to_string(),
        });
    }

    Ok(SourceZones {
        head: &text[..head_end],
        body: &text[head_end..tail_start],
        tail: &text[tail_start..],
    })
}

/// Byte offset of the start of the last line that is exactly `endmodule`.
///
/// Case-insensitive, surrounding whitespace allowed, nothing else on the
/// line.
fn last_endmodule_line_start(text: &str) -> Option<usize> {
    let mut offset = 0usize;
    let mut found = None;
    for line in text.split_inclusive('\n') {
        let content = line.strip_suffix('\n').unwrap_or(line);
        if content.trim().eq_ignore_ascii_case("endmodule") {
            found = Some(offset);
        }
        offset += line.len();
    }
    found
}

/// Whether a body line has the generated-statement shape:
/// `assign <ident> = <ident>;` with nothing else on the line.
///
/// Hand-written assigns with expressions, concatenations, or bit selects do
/// not match and are preserved.
pub fn is_generated_assign(line: &str) -> bool {
    let rest = line.trim_start();
    let Some(rest) = rest.strip_prefix("assign") else {
        return false;
    };
    if !rest.starts_with(|c: char| c.is_whitespace()) {
        return false;
    }
    let rest = rest.trim_start();
    let Some(rest) = take_ident(rest) else {
        return false;
    };
    let rest = rest.trim_start();
    let Some(rest) = rest.strip_prefix('=') else {
        return false;
    };
    let rest = rest.trim_start();
    let Some(rest) = take_ident(rest) else {
        return false;
    };
    let rest = rest.trim_start();
    let Some(rest) = rest.strip_prefix(';') else {
        return false;
    };
    rest.trim().is_empty()
}

/// Strips one signal identifier (letters, digits, `_`, `$`) off the front.
/// Returns `None` if the text does not start with one.
fn take_ident(text: &str) -> Option<&str> {
    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    // identifiers cannot start with a digit
    if text.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(&text[end..])
}
