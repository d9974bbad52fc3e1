use crate::{Result, Violation};
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;

/// Create an object from a generic JSON value tree.
///
/// All implementations route through the same validated parse path, so a
/// value built from JSON bytes, JSON text, or an already-parsed [Value] is
/// checked against exactly the same constraints.
pub trait FromJson: Sized {
    /// Creates an object from an already-parsed JSON value.
    fn from_value(value: Value) -> Result<Self>;

    /// Creates an object from JSON bytes.
    fn from_json_slice(slice: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(slice)?;
        Self::from_value(value)
    }

    /// Creates an object from JSON text.
    fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(value)
    }
}

/// Writes an object to JSON.
pub trait ToJson: Serialize {
    /// Writes a value as JSON.
    fn to_json_writer(&self, writer: impl Write, pretty: bool) -> Result<()> {
        if pretty {
            serde_json::to_writer_pretty(writer, self).map_err(crate::Error::from)
        } else {
            serde_json::to_writer(writer, self).map_err(crate::Error::from)
        }
    }

    /// Writes a value as JSON bytes.
    fn to_json_vec(&self, pretty: bool) -> Result<Vec<u8>> {
        if pretty {
            serde_json::to_vec_pretty(self).map_err(crate::Error::from)
        } else {
            serde_json::to_vec(self).map_err(crate::Error::from)
        }
    }

    /// Writes a value as a JSON string.
    fn to_json_string(&self, pretty: bool) -> Result<String> {
        if pretty {
            serde_json::to_string_pretty(self).map_err(crate::Error::from)
        } else {
            serde_json::to_string(self).map_err(crate::Error::from)
        }
    }
}

impl<T: Serialize> ToJson for T {}

// JSON integers and floats compare unequal in serde_json, so whole-valued
// numbers are written back as integers to keep round-trips stable.
pub(crate) fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

pub(crate) fn as_object<'a>(
    value: &'a Value,
    what: &str,
) -> std::result::Result<&'a Map<String, Value>, Violation> {
    value
        .as_object()
        .ok_or_else(|| Violation::structural(format!("{what} must be a JSON object")))
}

pub(crate) fn as_array<'a>(value: &'a Value, what: &str) -> std::result::Result<&'a Vec<Value>, Violation> {
    value
        .as_array()
        .ok_or_else(|| Violation::structural(format!("{what} must be a JSON array")))
}

pub(crate) fn as_str<'a>(value: &'a Value, what: &str) -> std::result::Result<&'a str, Violation> {
    value
        .as_str()
        .ok_or_else(|| Violation::structural(format!("{what} must be a JSON string")))
}

pub(crate) fn as_f64(value: &Value, what: &str) -> std::result::Result<f64, Violation> {
    value
        .as_f64()
        .ok_or_else(|| Violation::structural(format!("{what} must be a JSON number")))
}

pub(crate) fn required_str<T>(
    object: &Map<String, Value>,
    key: &str,
    parse: impl Fn(&str) -> std::result::Result<T, Violation>,
    violations: &mut Vec<Violation>,
) -> Option<T> {
    match object.get(key) {
        None | Some(Value::Null) => {
            violations.push(Violation::structural("missing required field").at(key));
            None
        }
        Some(value) => str_field(value, key, parse, violations),
    }
}

pub(crate) fn optional_str<T>(
    object: &Map<String, Value>,
    key: &str,
    parse: impl Fn(&str) -> std::result::Result<T, Violation>,
    violations: &mut Vec<Violation>,
) -> Option<T> {
    match object.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => str_field(value, key, parse, violations),
    }
}

pub(crate) fn optional_str_list<T>(
    object: &Map<String, Value>,
    key: &str,
    parse: impl Fn(&str) -> std::result::Result<T, Violation>,
    violations: &mut Vec<Violation>,
) -> Option<Vec<T>> {
    let value = match object.get(key) {
        None | Some(Value::Null) => return None,
        Some(value) => value,
    };
    let array = match as_array(value, key) {
        Ok(array) => array,
        Err(violation) => {
            violations.push(violation.at(key));
            return None;
        }
    };
    let mut items = Vec::with_capacity(array.len());
    let mut ok = true;
    for (i, element) in array.iter().enumerate() {
        match as_str(element, "value").and_then(|s| parse(s)) {
            Ok(item) => items.push(item),
            Err(violation) => {
                violations.push(violation.at(format!("[{i}]")).at(key));
                ok = false;
            }
        }
    }
    ok.then_some(items)
}

pub(crate) fn optional_number<T>(
    object: &Map<String, Value>,
    key: &str,
    parse: impl Fn(f64) -> std::result::Result<T, Violation>,
    violations: &mut Vec<Violation>,
) -> Option<T> {
    match object.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => match as_f64(value, key).and_then(|number| parse(number)) {
            Ok(parsed) => Some(parsed),
            Err(violation) => {
                violations.push(violation.at(key));
                None
            }
        },
    }
}

fn str_field<T>(
    value: &Value,
    key: &str,
    parse: impl Fn(&str) -> std::result::Result<T, Violation>,
    violations: &mut Vec<Violation>,
) -> Option<T> {
    match as_str(value, key).and_then(|s| parse(s)) {
        Ok(parsed) => Some(parsed),
        Err(violation) => {
            violations.push(violation.at(key));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    #[test]
    fn whole_numbers_serialize_as_integers() {
        assert_eq!(super::number(-150.0), json!(-150));
        assert_eq!(super::number(47.014448), json!(47.014448));
    }

    #[test]
    fn integers_and_floats_are_distinct_values() {
        assert_ne!(Value::from(100_i64), Value::from(100.0_f64));
    }
}
