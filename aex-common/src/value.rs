//! Raw JSON value helpers
//!
//! The record store returns untyped row collections: a field may arrive as a
//! string, a number, a boolean, or null depending on which upstream tool
//! wrote it. Scores and compensation figures are kept as display strings
//! (source precision preserved) and only parsed to f64 on demand.

use serde_json::Value;

/// Convert a raw field value into its display string.
///
/// - Strings are trimmed; empty or whitespace-only strings count as absent.
/// - Numbers render via `serde_json::Number`'s `Display`, which preserves
///   the source precision (`"72.5"` stays `"72.5"`, not `"72.50"`).
/// - Booleans render as `"true"`/`"false"` (used by flag fields).
/// - Null and structured values count as absent.
pub fn display_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a display string as a score or compensation figure.
///
/// Returns `None` for anything that is not a finite number; an unparseable
/// value is treated as absent, never as zero.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
