use serde_json::{Map, Number, Value};

use crate::util::parse_index;
use crate::{Assign, JsonPointerError, Pointer};

/// Raw JSON text, parsed once up front.
#[derive(Debug, Clone)]
pub struct JsonSource {
    parsed: Value,
}

impl JsonSource {
    pub(crate) fn parse(text: &[u8]) -> Result<Self, JsonPointerError> {
        let parsed = serde_json::from_slice(text)
            .map_err(|e| JsonPointerError::ParseFailure(e.to_string()))?;
        Ok(Self { parsed })
    }

    pub fn resolve(&self, dst: &mut dyn Assign, pointer: &str) -> Result<(), JsonPointerError> {
        if pointer.is_empty() {
            return dst.assign(generic_value(&self.parsed)?);
        }

        let ptr = Pointer::new(pointer)?;
        let mut current = &self.parsed;
        for token in ptr.tokens() {
            current = match current {
                Value::Object(map) => map.get(token).ok_or_else(|| {
                    JsonPointerError::NotFound(format!("property '{token}'"))
                })?,
                Value::Array(items) => &items[parse_index(token, items.len())?],
                other => {
                    return Err(JsonPointerError::TypeMismatch(format!(
                        "cannot index into {} with '{token}'",
                        kind(other)
                    )))
                }
            };
        }
        dst.assign(generic_value(current)?)
    }
}

fn kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(true) => "true",
        Value::Bool(false) => "false",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Converts a parsed JSON node into the generic value handed to
/// destinations.
///
/// All numbers become `f64`. A failing element aborts its array, while a
/// failing object member is dropped from the object.
pub(crate) fn generic_value(node: &Value) -> Result<Value, JsonPointerError> {
    let value = match node {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::String(s) => Value::String(s.clone()),
        Value::Number(n) => n
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| {
                JsonPointerError::TypeMismatch(format!("number {n} is not a finite float"))
            })?,
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    generic_value(item).map_err(|e| {
                        JsonPointerError::TypeMismatch(format!(
                            "failed to convert array item {i}: {e}"
                        ))
                    })
                })
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(members) => Value::Object(
            members
                .iter()
                .filter_map(|(key, member)| match generic_value(member) {
                    Ok(converted) => Some((key.clone(), converted)),
                    Err(e) => {
                        log::debug!("dropping member '{key}': {e}");
                        None
                    }
                })
                .collect::<Map<String, Value>>(),
        ),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DOC: &str = r#"{
        "foo": "bar",
        "array": [1, 2, 3],
        "nested": {"key": "value", "num": 42}
    }"#;

    fn resolve(pointer: &str) -> Result<Value, JsonPointerError> {
        let mut out = Value::Null;
        JsonSource::parse(DOC.as_bytes())?.resolve(&mut out, pointer)?;
        Ok(out)
    }

    #[test]
    fn test_json_walk() {
        assert_eq!(resolve("/foo").unwrap(), json!("bar"));
        assert_eq!(resolve("/array/0").unwrap(), json!(1.0));
        assert_eq!(resolve("/nested/key").unwrap(), json!("value"));
        assert_eq!(resolve("/nested/num").unwrap(), json!(42.0));
    }

    #[test]
    fn test_json_root_is_generic() {
        assert_eq!(
            resolve("").unwrap(),
            json!({
                "foo": "bar",
                "array": [1.0, 2.0, 3.0],
                "nested": {"key": "value", "num": 42.0}
            })
        );
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            resolve("/nonexistent"),
            Err(JsonPointerError::NotFound(_))
        ));
        assert!(matches!(
            resolve("/array/foo"),
            Err(JsonPointerError::TypeMismatch(_))
        ));
        assert!(matches!(
            resolve("/array/10"),
            Err(JsonPointerError::OutOfBounds { index: 10, len: 3 })
        ));
        assert!(matches!(
            resolve("/foo/bar"),
            Err(JsonPointerError::TypeMismatch(_))
        ));
        assert!(matches!(resolve("foo"), Err(JsonPointerError::MalformedPointer(_))));
    }

    #[test]
    fn test_parse_failure() {
        let err = JsonSource::parse(br#"{"foo": "bar", "invalid": }"#).unwrap_err();
        assert!(matches!(err, JsonPointerError::ParseFailure(_)));
        assert!(err.to_string().contains("failed to parse JSON"));
    }

    #[test]
    fn test_generic_value_numbers() {
        assert_eq!(generic_value(&json!(7)).unwrap(), json!(7.0));
        assert_eq!(generic_value(&json!(-3)).unwrap(), json!(-3.0));
        assert_eq!(generic_value(&json!(0.5)).unwrap(), json!(0.5));
        assert_eq!(
            generic_value(&json!([null, true, "s"])).unwrap(),
            json!([null, true, "s"])
        );
    }
}
