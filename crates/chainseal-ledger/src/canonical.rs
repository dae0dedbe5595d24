//! Canonical JSON encoding — the hashing substrate.
//!
//! Hashing is only reproducible if semantically equal payloads always
//! produce the same bytes, regardless of the order a caller inserted keys
//! into its maps. `encode` guarantees that:
//!
//! - object keys are emitted in lexicographic order, at every depth
//! - arrays keep their element order (order is semantic for arrays)
//! - no whitespace is emitted
//! - strings and numbers use serde_json's deterministic formatting
//!
//! The one JSON shape the encoder refuses is unbounded nesting: payloads
//! deeper than `MAX_DEPTH` fail with `LedgerError::Encoding` instead of
//! recursing without limit. Encoding has no side effects.

use chainseal_contracts::{LedgerError, LedgerResult};
use serde_json::Value;

/// Maximum nesting depth a payload may have and still be canonicalized.
pub const MAX_DEPTH: usize = 128;

/// Encode `value` into its canonical string form.
///
/// Deterministic for semantically equal values: two `Value`s that compare
/// equal encode to identical strings, whatever the in-memory map ordering
/// of the process that built them.
pub fn encode(value: &Value) -> LedgerResult<String> {
    let mut out = String::new();
    write_value(&mut out, value, 0)?;
    Ok(out)
}

fn write_value(out: &mut String, value: &Value, depth: usize) -> LedgerResult<()> {
    if depth > MAX_DEPTH {
        return Err(LedgerError::Encoding {
            reason: format!("payload nesting exceeds {} levels", MAX_DEPTH),
        });
    }

    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(out, s)?,
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item, depth + 1)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            // Sort keys explicitly rather than relying on the map type, so
            // the encoding is identical whether or not serde_json was built
            // with preserve_order.
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key)?;
                out.push(':');
                write_value(out, &map[key], depth + 1)?;
            }
            out.push('}');
        }
    }

    Ok(())
}

/// Emit a JSON string literal with serde_json's escaping rules.
fn write_string(out: &mut String, s: &str) -> LedgerResult<()> {
    let literal = serde_json::to_string(s).map_err(|e| LedgerError::Encoding {
        reason: format!("string cannot be encoded: {}", e),
    })?;
    out.push_str(&literal);
    Ok(())
}
