//! Structural ABI fingerprints
//!
//! Two ABIs that differ only in JSON key order must hash identically, so
//! the digest is taken over a canonical serialization with object keys
//! sorted at every level.

use alloy_primitives::keccak256;
use serde_json::Value;

/// keccak256 digest of an ABI's canonical serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint a JSON value.
    pub fn of(value: &Value) -> Self {
        let mut buf = String::new();
        write_canonical(value, &mut buf);
        Self(keccak256(buf.as_bytes()).0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Append the canonical (key-sorted, compact) form of `value` to `out`.
///
/// Scalars render through `Value`'s own compact Display, which is
/// deterministic; only containers need explicit handling.
fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
