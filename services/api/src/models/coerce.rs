//! Lenient field decoding for resource payloads
//!
//! Create and update payloads are not validated: any JSON value is accepted
//! and coerced. Numbers are taken as-is (integers truncate), numeric strings
//! are read up to their first non-numeric character, booleans become 1 or 0,
//! and anything else becomes 0 or the empty string.
//!
//! The `opt_*` variants treat `null` like an omitted field so a PATCH can
//! leave a column untouched.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .map_or(0, int_value))
}

pub fn int32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    int(deserializer).map(saturate_i32)
}

pub fn float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .map_or(0.0, float_value))
}

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .map_or_else(String::new, string_value))
}

pub fn opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(present(Option::<Value>::deserialize(deserializer)?).map(|v| int_value(&v)))
}

pub fn opt_int32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    opt_int(deserializer).map(|v| v.map(saturate_i32))
}

pub fn opt_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(present(Option::<Value>::deserialize(deserializer)?).map(|v| float_value(&v)))
}

pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(present(Option::<Value>::deserialize(deserializer)?).map(|v| string_value(&v)))
}

fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn int_value(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => parse_int_prefix(s),
        Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

fn float_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_float_prefix(s),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    }
}

fn string_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        _ => String::new(),
    }
}

/// Length of the optional sign plus leading digits of `s`
fn sign_and_digits(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    end
}

fn parse_int_prefix(s: &str) -> i64 {
    let s = s.trim_start();
    let end = sign_and_digits(s);
    s[..end].parse::<i64>().unwrap_or_else(|_| {
        // Overflowing digit runs saturate; a bare sign is 0.
        let digits = s[..end].trim_start_matches(['+', '-']);
        match (digits.is_empty(), s.starts_with('-')) {
            (true, _) => 0,
            (false, true) => i64::MIN,
            (false, false) => i64::MAX,
        }
    })
}

fn parse_float_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = sign_and_digits(s);
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exponent = sign_and_digits(&s[end + 1..]);
        if s[end + 1..end + 1 + exponent].bytes().any(|b| b.is_ascii_digit()) {
            end += 1 + exponent;
        }
    }
    s[..end].parse::<f64>().unwrap_or(0.0)
}
