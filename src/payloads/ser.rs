use serde::{Serialize, Serializer};

/// Serializes the value held by an `Option` as-is.
///
/// plist encodes `Some(value)` as a single-key dictionary, which devices reject.
/// Fields using this must also be skipped when `None`; `#[payload]` adds both.
pub fn serialize_option_some<S, T>(value: &Option<T>, ser: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    match value {
        Some(value) => value.serialize(ser),
        None => ser.serialize_unit(),
    }
}
