//! `.properties` line format
//!
//! Parsing follows the conventional rules: `#`/`!` comment lines, backslash
//! line continuations, `=`/`:`/whitespace separators and `\uXXXX` escapes.
//! Serialization escapes everything outside printable ASCII so the written
//! file is plain ASCII regardless of platform encoding.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use thiserror::Error;

/// Map of physical keys to values
pub type PropertyMap = HashMap<String, String>;

/// Syntax error in properties content, with its 1-based line number
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {reason}")]
pub struct SyntaxError {
    pub line: usize,
    pub reason: String,
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Split input on `\n`, `\r` or `\r\n`
fn natural_lines(input: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = input.as_bytes();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&input[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&input[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < bytes.len() {
        lines.push(&input[start..]);
    }
    lines
}

/// A line continues when it ends in an odd number of backslashes
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Parse properties content into a map
///
/// Later duplicates of a key overwrite earlier ones.
///
/// # Errors
///
/// Returns a [`SyntaxError`] for a malformed `\uXXXX` escape.
pub fn parse(input: &str) -> Result<PropertyMap, SyntaxError> {
    let lines = natural_lines(input);
    let mut map = PropertyMap::new();
    let mut i = 0;

    while i < lines.len() {
        let line_no = i + 1;
        let mut current = lines[i].trim_start_matches(is_blank);
        i += 1;

        if current.is_empty() || current.starts_with(['#', '!']) {
            continue;
        }

        let mut logical = String::new();
        loop {
            if !continues(current) {
                logical.push_str(current);
                break;
            }
            logical.push_str(&current[..current.len() - 1]);
            match lines.get(i) {
                Some(next) => {
                    current = next.trim_start_matches(is_blank);
                    i += 1;
                }
                None => break,
            }
        }

        let (key, value) = split_entry(&logical, line_no)?;
        map.insert(key, value);
    }

    Ok(map)
}

fn split_entry(logical: &str, line: usize) -> Result<(String, String), SyntaxError> {
    let mut key_end = logical.len();
    let mut value_start = logical.len();
    let mut has_separator = false;
    let mut escaped = false;

    for (idx, c) in logical.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = idx;
                value_start = idx + 1;
                has_separator = true;
                break;
            }
            c if is_blank(c) => {
                key_end = idx;
                value_start = idx + 1;
                break;
            }
            _ => {}
        }
    }

    let mut rest = logical[value_start..].trim_start_matches(is_blank);
    if !has_separator {
        if let Some(stripped) = rest.strip_prefix(['=', ':']) {
            rest = stripped.trim_start_matches(is_blank);
        }
    }

    Ok((unescape(&logical[..key_end], line)?, unescape(rest, line)?))
}

fn unescape(raw: &str, line: usize) -> Result<String, SyntaxError> {
    if !raw.contains('\\') {
        return Ok(raw.to_string());
    }

    // UTF-16 units so that escaped surrogate pairs recombine
    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut buf = [0u16; 2];
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        let decoded = if c == '\\' {
            match chars.next() {
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    if hex.len() != 4 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
                        return Err(SyntaxError {
                            line,
                            reason: format!("malformed \\uxxxx encoding '\\u{hex}'"),
                        });
                    }
                    let unit = u16::from_str_radix(&hex, 16).map_err(|e| SyntaxError {
                        line,
                        reason: e.to_string(),
                    })?;
                    units.push(unit);
                    continue;
                }
                Some('t') => '\t',
                Some('n') => '\n',
                Some('r') => '\r',
                Some('f') => '\x0c',
                Some(other) => other,
                None => break,
            }
        } else {
            c
        };
        units.extend_from_slice(decoded.encode_utf16(&mut buf));
    }

    Ok(String::from_utf16_lossy(&units))
}

fn escape(text: &str, is_key: bool, out: &mut String) {
    let mut buf = [0u16; 2];
    for (idx, c) in text.chars().enumerate() {
        match c {
            ' ' if idx == 0 || is_key => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => {
                for unit in c.encode_utf16(&mut buf) {
                    let _ = write!(out, "\\u{unit:04X}");
                }
            }
        }
    }
}

/// Serialize entries as properties text
///
/// `header` lines are written as comments (an empty header still produces a
/// lone `#` line); lines already starting with `#` or `!` keep their marker.
/// The optional `timestamp` comment follows. Entries are sorted by key.
pub fn serialize(entries: &PropertyMap, header: Option<&str>, timestamp: Option<&str>) -> String {
    let mut out = String::new();

    if let Some(header) = header {
        if header.is_empty() {
            out.push_str("#\n");
        }
        for line in natural_lines(header) {
            if !line.starts_with(['#', '!']) {
                out.push('#');
            }
            escape_comment(line, &mut out);
            out.push('\n');
        }
    }
    if let Some(timestamp) = timestamp {
        out.push('#');
        out.push_str(timestamp);
        out.push('\n');
    }

    let sorted: BTreeMap<&String, &String> = entries.iter().collect();
    for (key, value) in sorted {
        escape(key, true, &mut out);
        out.push('=');
        escape(value, false, &mut out);
        out.push('\n');
    }

    out
}

fn escape_comment(line: &str, out: &mut String) {
    let mut buf = [0u16; 2];
    for c in line.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            for unit in c.encode_utf16(&mut buf) {
                let _ = write!(out, "\\u{unit:04X}");
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
