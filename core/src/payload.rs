#![deny(missing_docs)]

//! # Payload Decoding
//!
//! Best-effort decoding of request/response example bodies.
//!
//! JSON is attempted first and YAML second. Both decoders produce a
//! `serde_yaml::Value`, so the inferencer sees one value type regardless of the
//! source format. A payload that neither decoder accepts is a normal outcome
//! (`None`), not an error.

use serde_yaml::{Mapping, Value};
use tracing::debug;

/// The wire format a payload was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    /// Parsed by the JSON decoder.
    Json,
    /// Rejected as JSON, parsed by the YAML decoder.
    Yaml,
}

/// A successfully decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPayload {
    /// The decoded value.
    pub value: Value,
    /// Which decoder accepted it.
    pub format: PayloadFormat,
}

/// Decodes payload text as JSON, falling back to YAML.
///
/// Returns `None` when both decoders fail, or when the text decodes to `null`
/// (an empty YAML document describes nothing).
pub fn decode_payload(text: &str) -> Option<DecodedPayload> {
    let decoded = match decode_json(text) {
        Some(value) => DecodedPayload {
            value,
            format: PayloadFormat::Json,
        },
        None => DecodedPayload {
            value: decode_yaml(text)?,
            format: PayloadFormat::Yaml,
        },
    };

    if decoded.value.is_null() {
        return None;
    }
    Some(decoded)
}

/// JSON objects may repeat a key; the last occurrence wins and keeps the
/// position of the first, so decoding goes through `serde_json::Value`.
fn decode_json(text: &str) -> Option<Value> {
    let json = match serde_json::from_str::<serde_json::Value>(text) {
        Ok(json) => json,
        Err(e) => {
            debug!(error = %e, "payload is not JSON, trying YAML");
            return None;
        }
    };
    match serde_yaml::to_value(json) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, "JSON payload could not be converted");
            None
        }
    }
}

/// YAML merge keys (`<<: *anchor`) are resolved before inference.
fn decode_yaml(text: &str) -> Option<Value> {
    let value = match serde_yaml::from_str::<Value>(text) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "payload is not YAML either");
            return None;
        }
    };
    match resolve_merge_keys(value) {
        Ok(value) => Some(value),
        Err(msg) => {
            debug!(error = %msg, "YAML merge keys could not be applied");
            None
        }
    }
}

/// Replaces `<<` entries with the members they merge in.
///
/// Merged members come first, in source order, with earlier sources taking
/// precedence; the mapping's own members then override them in place.
fn resolve_merge_keys(value: Value) -> Result<Value, String> {
    match value {
        Value::Mapping(mapping) => {
            let merge_key = Value::String("<<".to_string());
            let mut merged = Mapping::new();
            let mut own = Mapping::with_capacity(mapping.len());

            for (key, member) in mapping {
                let member = resolve_merge_keys(member)?;
                if key != merge_key {
                    own.insert(key, member);
                    continue;
                }
                let sources = match member {
                    Value::Mapping(source) => vec![source],
                    Value::Sequence(items) => items
                        .into_iter()
                        .map(|item| match item {
                            Value::Mapping(source) => Ok(source),
                            _ => Err("merge sequence entries must be mappings".to_string()),
                        })
                        .collect::<Result<Vec<_>, _>>()?,
                    _ => return Err("merge key value must be a mapping or a sequence".into()),
                };
                for source in sources {
                    for (k, v) in source {
                        if !merged.contains_key(&k) {
                            merged.insert(k, v);
                        }
                    }
                }
            }

            for (key, member) in own {
                merged.insert(key, member);
            }
            Ok(Value::Mapping(merged))
        }
        Value::Sequence(items) => items
            .into_iter()
            .map(resolve_merge_keys)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Sequence),
        Value::Tagged(mut tagged) => {
            tagged.value = resolve_merge_keys(tagged.value)?;
            Ok(Value::Tagged(tagged))
        }
        scalar => Ok(scalar),
    }
}
