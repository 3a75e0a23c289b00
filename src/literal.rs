//! Ruby literal rendering for catalog values
//!
//! Two styles are produced:
//! - [`inspect`] gives the compact one-line form Ruby's `inspect` prints,
//!   e.g. `{"a"=>[1, "b"]}`
//! - [`pretty`] gives a multi-line form with one element per line and
//!   two-space indentation per nesting level

use std::fmt::Write as _;

use serde_json::{Map, Value};

/// Indentation added per nesting level by [`pretty`]
const INDENT: &str = "  ";

/// Escape single quotes for a single-quoted Ruby literal
#[must_use]
pub fn escape_single(s: &str) -> String {
    s.replace('\'', "\\'")
}

/// Render a parameter value the way an example block embeds it
///
/// Strings and scalars become single-quoted strings; arrays and hashes are
/// embedded as Ruby literals.
#[must_use]
pub fn param_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", escape_single(s)),
        Value::Number(n) => format!("'{n}'"),
        Value::Bool(b) => format!("'{b}'"),
        Value::Null => "nil".to_string(),
        Value::Array(_) | Value::Object(_) => inspect(value),
    }
}

/// Ruby double-quoted string literal for `s`
#[must_use]
pub fn inspect_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{0c}' => out.push_str("\\f"),
            '\u{0b}' => out.push_str("\\v"),
            '\u{08}' => out.push_str("\\b"),
            '\u{07}' => out.push_str("\\a"),
            '\u{1b}' => out.push_str("\\e"),
            '#' if matches!(chars.peek(), Some('{' | '$' | '@')) => out.push_str("\\#"),
            '\u{7f}' => out.push_str("\\x7F"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\u{:04X}", u32::from(c));
            },
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Compact Ruby literal, as printed by `inspect`
#[must_use]
pub fn inspect(value: &Value) -> String {
    match value {
        Value::Null => "nil".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => inspect_str(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(inspect).collect();
            format!("[{}]", items.join(", "))
        },
        Value::Object(map) => {
            let pairs: Vec<String> =
                map.iter().map(|(k, v)| format!("{}=>{}", inspect_str(k), inspect(v))).collect();
            format!("{{{}}}", pairs.join(", "))
        },
    }
}

/// Multi-line Ruby literal, starting at column zero
///
/// Nested lines are indented relative to the first line; callers embedding
/// the result deeper re-indent every line after the first.
#[must_use]
pub fn pretty(value: &Value) -> String {
    let mut out = String::new();
    write_pretty(&mut out, value, 0);
    out
}

/// [`pretty`] for a mapping
#[must_use]
pub fn pretty_map(map: &Map<String, Value>) -> String {
    let mut out = String::new();
    write_map(&mut out, map, 0);
    out
}

fn write_pretty(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Array(items) if !items.is_empty() => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                out.push_str(&INDENT.repeat(depth + 1));
                write_pretty(out, item, depth + 1);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(&INDENT.repeat(depth));
            out.push(']');
        },
        Value::Object(map) => write_map(out, map, depth),
        other => out.push_str(&inspect(other)),
    }
}

fn write_map(out: &mut String, map: &Map<String, Value>, depth: usize) {
    if map.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    for (i, (key, value)) in map.iter().enumerate() {
        out.push_str(&INDENT.repeat(depth + 1));
        out.push_str(&inspect_str(key));
        out.push_str(" => ");
        write_pretty(out, value, depth + 1);
        if i + 1 < map.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str(&INDENT.repeat(depth));
    out.push('}');
}
