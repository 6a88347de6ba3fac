//! Implicit resolution of plain scalars.
//!
//! An untagged plain scalar goes through a fixed cascade of core-schema rules: null, then
//! booleans, then integers, then floating points, then timestamps, then the string catch-all.
//! This cascade cannot fail; content that matches no rule is a string.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{timestamp::parse_timestamp, yaml::Yaml};

/// Resolve the representation of an untagged plain scalar into its value.
///
/// Quoted and block scalars must not go through this function: their content is never subject to
/// implicit resolution.
#[must_use]
pub fn resolve_plain_scalar(v: String) -> Yaml {
    if let Some(number) = v.strip_prefix("0x") {
        if let Ok(i) = i64::from_str_radix(number, 16) {
            return Yaml::Integer(i);
        }
    } else if let Some(number) = v.strip_prefix("0o") {
        if let Ok(i) = i64::from_str_radix(number, 8) {
            return Yaml::Integer(i);
        }
    } else if let Some(number) = v.strip_prefix('+') {
        if let Ok(i) = number.parse::<i64>() {
            return Yaml::Integer(i);
        }
    }
    match v.as_str() {
        "~" | "" | "null" | "Null" | "NULL" => return Yaml::Null,
        "true" | "True" | "TRUE" => return Yaml::Boolean(true),
        "false" | "False" | "FALSE" => return Yaml::Boolean(false),
        _ => {}
    }
    if let Ok(integer) = v.parse::<i64>() {
        Yaml::Integer(integer)
    } else if let Some(float) = parse_core_schema_fp(&v) {
        Yaml::Float(float.into())
    } else if let Some(timestamp) = parse_timestamp(&v) {
        Yaml::Timestamp(timestamp)
    } else {
        Yaml::String(v)
    }
}

/// Parse the given string as a floating point according to the core schema.
///
/// # Return
/// Returns `Some` if parsing succeeded, `None` otherwise. This function is used in the process of
/// resolving scalars, where failing to parse a scalar as a floating point is not an error. As
/// such, this function purposefully does not return a `Result`.
#[must_use]
pub fn parse_core_schema_fp(v: &str) -> Option<f64> {
    match v {
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => Some(f64::INFINITY),
        "-.inf" | "-.Inf" | "-.INF" => Some(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => Some(f64::NAN),
        // Test that `v` contains a digit so as not to pass in strings like `inf`,
        // which rust will parse as a float.
        _ if v.as_bytes().iter().any(u8::is_ascii_digit) => v.parse::<f64>().ok(),
        _ => None,
    }
}

/// Decode the contents of a `!!binary` scalar.
///
/// YAML allows the base64 content to be broken across lines; whitespace is ignored.
pub(crate) fn parse_binary(v: &str) -> Option<Vec<u8>> {
    let condensed: String = v.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(condensed.as_bytes()).ok()
}
