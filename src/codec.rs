//! Entity codec - records to and from their JSON text form.
//!
//! Stored and transported records are plain JSON objects. Inputs may carry a
//! top-level `schemaVersion`; anything newer than [`SCHEMA_VERSION`] is
//! refused rather than half-understood.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::LedgerError;

/// Highest record schema version this crate understands.
pub const SCHEMA_VERSION: u64 = 1;

const SCHEMA_VERSION_FIELD: &str = "schemaVersion";

/// Serialize a record to JSON bytes.
pub fn encode<T: Serialize + ?Sized>(kind: &str, value: &T) -> Result<Vec<u8>, LedgerError> {
    serde_json::to_vec(value).map_err(|e| LedgerError::decode(kind, e))
}

/// Deserialize a record from JSON bytes.
pub fn decode<T: DeserializeOwned>(kind: &str, bytes: &[u8]) -> Result<T, LedgerError> {
    let mut value: Value = serde_json::from_slice(bytes).map_err(|e| LedgerError::decode(kind, e))?;

    if let Value::Object(fields) = &mut value {
        if let Some(version) = fields.remove(SCHEMA_VERSION_FIELD) {
            match version.as_u64() {
                Some(v) if v <= SCHEMA_VERSION => {}
                _ => {
                    return Err(LedgerError::decode(
                        kind,
                        format!("unsupported schema version {}", version),
                    ))
                }
            }
        }
    }

    serde_json::from_value(value).map_err(|e| LedgerError::decode(kind, e))
}

/// Deserialize a record from a JSON string argument.
pub fn decode_str<T: DeserializeOwned>(kind: &str, text: &str) -> Result<T, LedgerError> {
    decode(kind, text.as_bytes())
}
