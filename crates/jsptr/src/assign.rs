//! Writing resolved values into caller-supplied destinations.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::JsonPointerError;

/// A destination a resolved value can be written into.
///
/// Every [`DeserializeOwned`] type is a destination: the generic value is
/// converted with `serde_json::from_value`, and the destination is only
/// replaced once that conversion succeeds. A failed conversion leaves it
/// untouched and reports [`JsonPointerError::TypeMismatch`].
///
/// # Example
///
/// ```
/// use jsptr::Assign;
/// use serde_json::json;
///
/// let mut n: u32 = 0;
/// n.assign(json!(7)).unwrap();
/// assert_eq!(n, 7);
///
/// assert!(n.assign(json!("seven")).is_err());
/// assert_eq!(n, 7);
/// ```
pub trait Assign {
    /// Converts `value` into the destination's type and stores it.
    fn assign(&mut self, value: Value) -> Result<(), JsonPointerError>;
}

impl<T: DeserializeOwned> Assign for T {
    fn assign(&mut self, value: Value) -> Result<(), JsonPointerError> {
        let converted = serde_json::from_value(value).map_err(|e| {
            JsonPointerError::TypeMismatch(format!(
                "cannot assign to {}: {e}",
                std::any::type_name::<T>()
            ))
        })?;
        *self = converted;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_assign_compatible() {
        let mut s = String::new();
        s.assign(json!("hello")).unwrap();
        assert_eq!(s, "hello");

        let mut f = 0.0_f64;
        f.assign(json!(42.0)).unwrap();
        assert_eq!(f, 42.0);

        let mut v = Value::Null;
        v.assign(json!({"a": [1, 2]})).unwrap();
        assert_eq!(v, json!({"a": [1, 2]}));

        let mut m: HashMap<String, i64> = HashMap::new();
        m.assign(json!({"a": 1})).unwrap();
        assert_eq!(m.get("a"), Some(&1));
    }

    #[test]
    fn test_assign_incompatible_leaves_destination() {
        let mut b = true;
        let err = b.assign(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, JsonPointerError::TypeMismatch(_)));
        assert!(b);
    }

    #[test]
    fn test_assign_through_trait_object() {
        let mut s = String::from("before");
        let dst: &mut dyn Assign = &mut s;
        dst.assign(json!("after")).unwrap();
        assert_eq!(s, "after");
    }
}
