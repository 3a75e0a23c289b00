//! Content sanitizing for file resources
//!
//! Inline file content ends up inside a double-quoted Ruby string in the
//! generated spec, so anything Ruby would interpret there has to be escaped
//! first. The alternative is digest mode, where only the MD5 of the raw
//! content is embedded.

use serde_json::Value;
use thiserror::Error;

use crate::catalog::Resource;
use crate::literal;

/// Type name of file resources
pub const FILE_TYPE: &str = "File";

/// Parameter holding inline file content
pub const CONTENT_PARAM: &str = "content";

/// Parameter holding the lifecycle state
const ENSURE_PARAM: &str = "ensure";

/// Ruby special variable that would otherwise be interpolated as `#$Escape...`
const SPECIAL_TOKEN: &str = "$EscapeControlCharactersOnReceive";

/// Escaping could not be applied to a content value
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SanitizeError {
    /// Content is a structured value rather than text
    #[error("content is not text (found {0})")]
    NotText(&'static str),
}

/// Return the inline content of a file resource that should be verified
///
/// The resource must be a `File`, its `ensure` must be `file` or `present`
/// (or absent entirely), and it must carry a non-null `content`.
#[must_use]
pub fn content_check_target(resource: &Resource) -> Option<&Value> {
    if resource.type_name != FILE_TYPE {
        return None;
    }

    let present = match resource.param(ENSURE_PARAM) {
        None => true,
        Some(Value::String(state)) => state == "file" || state == "present",
        Some(_) => false,
    };

    resource.param(CONTENT_PARAM).filter(|content| present && !content.is_null())
}

/// Escape text for embedding in a double-quoted Ruby literal
///
/// Backslashes are doubled first so the escapes added by later steps are
/// not escaped again.
#[must_use]
pub fn escape_content(content: &str) -> String {
    content
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('@', "\\@")
        .replace("$;", "\\$;")
        .replace(SPECIAL_TOKEN, &format!("\\{SPECIAL_TOKEN}"))
}

/// Escape a content value, failing for anything that is not a string
pub fn sanitize(content: &Value) -> Result<String, SanitizeError> {
    match content {
        Value::String(text) => Ok(escape_content(text)),
        other => Err(SanitizeError::NotText(kind_of(other))),
    }
}

/// Escape a content value, falling back to its unmodified rendering
#[must_use]
pub fn sanitize_or_raw(title: &str, content: &Value) -> String {
    sanitize(content).unwrap_or_else(|err| {
        log::warn!("Leaving content of File[{title}] unescaped: {err}");
        raw_text(content)
    })
}

/// MD5 hex digest of the raw, unescaped content
#[must_use]
pub fn content_digest(content: &Value) -> String {
    format!("{:x}", md5::compute(raw_text(content)))
}

fn raw_text(content: &Value) -> String {
    match content {
        Value::String(text) => text.clone(),
        other => literal::inspect(other),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}
