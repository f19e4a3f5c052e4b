//! JSON normalization for bodies declared as `application/json`.
//!
//! Nesting depth is unbounded. Parsing, re-serializing and dropping the parsed
//! tree all run without recursing on the thread stack past a fixed red zone,
//! so a deeply nested body cannot overflow it.

use bytes::Bytes;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

// Same thresholds serde_stacker uses for parsing.
const RED_ZONE: usize = 64 * 1024;
const STACK_GROWTH: usize = 1024 * 1024;

/// Parses `body` and re-serializes it without insignificant whitespace.
/// Object key order is kept; duplicate keys collapse to the last.
pub(crate) fn normalize(body: &[u8]) -> Result<Bytes, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_slice(body);
    de.disable_recursion_limit();
    let parsed = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;

    let out = serde_json::to_vec(&Stacked(&parsed));
    drop_flat(parsed);
    Ok(Bytes::from(out?))
}

/// Serializes a [`Value`], moving to a heap-allocated stack segment whenever
/// the current one runs low.
struct Stacked<'a>(&'a Value);

impl Serialize for Stacked<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || match self.0 {
            Value::Array(items) => serializer.collect_seq(items.iter().map(Stacked)),
            Value::Object(map) => serializer.collect_map(map.iter().map(|(k, v)| (k, Stacked(v)))),
            scalar => scalar.serialize(serializer),
        })
    }
}

/// Drops a [`Value`] without the recursion of its default drop glue.
fn drop_flat(value: Value) {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            Value::Array(items) => pending.extend(items),
            Value::Object(map) => pending.extend(map.into_iter().map(|(_, v)| v)),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_whitespace_and_keeps_key_order() {
        let out = normalize(b"{ \"b\" : 1,\n  \"a\" : [1, 2] }").unwrap();
        assert_eq!(&out[..], br#"{"b":1,"a":[1,2]}"#);
    }

    #[test]
    fn collapses_duplicate_keys_to_last() {
        let out = normalize(br#"{"k":1,"k":2}"#).unwrap();
        assert_eq!(&out[..], br#"{"k":2}"#);
    }

    #[test]
    fn accepts_scalars() {
        assert_eq!(&normalize(b" 42 ").unwrap()[..], b"42");
        assert_eq!(&normalize(b"\"s\"").unwrap()[..], b"\"s\"");
        assert_eq!(&normalize(b"null").unwrap()[..], b"null");
    }

    #[test]
    fn rejects_garbage() {
        assert!(normalize(b"{not json").is_err());
        assert!(normalize(b"").is_err());
    }

    #[test]
    fn rejects_trailing_data() {
        assert!(normalize(b"{} {}").is_err());
        assert!(normalize(b"[1] x").is_err());
    }

    #[test]
    fn nesting_far_past_default_limit() {
        let depth = 20_000;
        let input = format!("{}{}", "[ ".repeat(depth), "]".repeat(depth));
        let out = normalize(input.as_bytes()).unwrap();
        assert_eq!(out.len(), 2 * depth);
        assert!(out.starts_with(b"[[[") && out.ends_with(b"]]]"));
    }

    #[test]
    fn deep_objects_round_trip() {
        let depth = 5_000;
        let input = format!("{}1{}", r#"{"k": "#.repeat(depth), "}".repeat(depth));
        let out = normalize(input.as_bytes()).unwrap();
        assert_eq!(out, format!("{}1{}", r#"{"k":"#.repeat(depth), "}".repeat(depth)));
    }
}
