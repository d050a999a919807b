//! Shapes of values a pointer can be resolved against.
//!
//! Every value handed to [`Pointer::retrieve`](crate::Pointer::retrieve)
//! implements [`Target`]. A target reports one [`Shape`], which decides the
//! navigation strategy, and can render itself as a generic
//! [`serde_json::Value`] for the final assignment.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::record::{record_value, Record};
use crate::source::{generic_value, Resolve};
use crate::{Assign, JsonPointerError};

/// The structural category of a value.
pub enum Shape<'a> {
    /// The value resolves pointers itself.
    Resolver(&'a dyn Resolve),
    /// Raw JSON text, parsed before navigation.
    Text(&'a [u8]),
    /// A container keyed by strings.
    Keyed(Vec<(&'a str, &'a dyn Target)>),
    /// An ordered container.
    Indexed(Vec<&'a dyn Target>),
    /// A map whose keys are not strings. Carries the type name for errors.
    OpaqueKeyed(&'static str),
    /// A value with a fixed set of named fields.
    Record(&'a dyn Record),
    /// A nullable indirection. `None` refers to nothing.
    Reference(Option<&'a dyn Target>),
    /// Anything else.
    Scalar,
}

impl Shape<'_> {
    /// Short human-readable name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Resolver(_) => "custom source",
            Shape::Text(_) => "text",
            Shape::Keyed(_) => "map",
            Shape::Indexed(_) => "sequence",
            Shape::OpaqueKeyed(_) => "non-string-keyed map",
            Shape::Record(_) => "record",
            Shape::Reference(Some(_)) => "reference",
            Shape::Reference(None) => "empty reference",
            Shape::Scalar => "scalar value",
        }
    }
}

/// A value a JSON pointer can be resolved against.
///
/// Implementors only need [`Target::shape`]; the generic value is derived
/// from the shape unless the type is a scalar, which must provide it.
pub trait Target {
    /// Reports how this value is navigated.
    fn shape(&self) -> Shape<'_>;

    /// Renders this value as a generic JSON value.
    fn to_value(&self) -> Result<Value, JsonPointerError> {
        shape_value(self.shape())
    }
}

fn shape_value(shape: Shape<'_>) -> Result<Value, JsonPointerError> {
    match shape {
        Shape::Resolver(custom) => {
            let mut out = Value::Null;
            custom.resolve_json_pointer(&mut out as &mut dyn Assign, "")?;
            Ok(out)
        }
        Shape::Text(bytes) => Ok(Value::String(String::from_utf8_lossy(bytes).into_owned())),
        Shape::Keyed(entries) => entries
            .into_iter()
            .map(|(key, value)| Ok((key.to_string(), value.to_value()?)))
            .collect::<Result<Map<String, Value>, JsonPointerError>>()
            .map(Value::Object),
        Shape::Indexed(items) => items
            .into_iter()
            .map(|item| item.to_value())
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Shape::OpaqueKeyed(type_name) => Err(JsonPointerError::TypeMismatch(format!(
            "{type_name} has no generic value"
        ))),
        Shape::Record(record) => record_value(record),
        Shape::Reference(None) => Ok(Value::Null),
        Shape::Reference(Some(inner)) => inner.to_value(),
        Shape::Scalar => Err(JsonPointerError::TypeMismatch(
            "scalar target does not provide a generic value".to_string(),
        )),
    }
}

macro_rules! scalar_target {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Target for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar
                }

                fn to_value(&self) -> Result<Value, JsonPointerError> {
                    serde_json::to_value(self).map_err(|e| {
                        JsonPointerError::TypeMismatch(format!(
                            "cannot convert {}: {e}",
                            stringify!($ty)
                        ))
                    })
                }
            }
        )*
    };
}

scalar_target!(
    (), bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl Target for str {
    fn shape(&self) -> Shape<'_> {
        Shape::Text(self.as_bytes())
    }

    fn to_value(&self) -> Result<Value, JsonPointerError> {
        Ok(Value::String(self.to_string()))
    }
}

impl Target for String {
    fn shape(&self) -> Shape<'_> {
        self.as_str().shape()
    }

    fn to_value(&self) -> Result<Value, JsonPointerError> {
        Ok(Value::String(self.clone()))
    }
}

impl Target for Cow<'_, str> {
    fn shape(&self) -> Shape<'_> {
        self.as_ref().shape()
    }

    fn to_value(&self) -> Result<Value, JsonPointerError> {
        self.as_ref().to_value()
    }
}

/// Raw JSON bytes.
///
/// Byte containers are sequences of numbers by default; wrapping them in
/// `JsonText` makes them parse as a JSON document instead.
///
/// ```
/// use jsptr::{JsonText, Pointer};
///
/// let doc = br#"{"a": [true]}"#.to_vec();
/// let mut flag = false;
/// Pointer::new("/a/0").unwrap().retrieve(&mut flag, &JsonText(&doc)).unwrap();
/// assert!(flag);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonText<B>(pub B);

impl<B: AsRef<[u8]>> Target for JsonText<B> {
    fn shape(&self) -> Shape<'_> {
        Shape::Text(self.0.as_ref())
    }

    fn to_value(&self) -> Result<Value, JsonPointerError> {
        let parsed: Value = serde_json::from_slice(self.0.as_ref())
            .map_err(|e| JsonPointerError::ParseFailure(e.to_string()))?;
        generic_value(&parsed)
    }
}

impl<T: Target + ?Sized> Target for &T {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn to_value(&self) -> Result<Value, JsonPointerError> {
        (**self).to_value()
    }
}

impl<T: Target + ?Sized> Target for Box<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn to_value(&self) -> Result<Value, JsonPointerError> {
        (**self).to_value()
    }
}

impl<T: Target + ?Sized> Target for Rc<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn to_value(&self) -> Result<Value, JsonPointerError> {
        (**self).to_value()
    }
}

impl<T: Target + ?Sized> Target for Arc<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn to_value(&self) -> Result<Value, JsonPointerError> {
        (**self).to_value()
    }
}

impl<T: Target> Target for Option<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Reference(self.as_ref().map(|value| value as &dyn Target))
    }
}

impl<T: Target> Target for [T] {
    fn shape(&self) -> Shape<'_> {
        Shape::Indexed(self.iter().map(|value| value as &dyn Target).collect())
    }
}

impl<T: Target> Target for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        self.as_slice().shape()
    }
}

impl<T: Target, const N: usize> Target for [T; N] {
    fn shape(&self) -> Shape<'_> {
        self.as_slice().shape()
    }
}

impl<T: Target> Target for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Indexed(self.iter().map(|value| value as &dyn Target).collect())
    }
}

/// Map key types.
///
/// Only maps whose keys are text can be navigated by pointer tokens; other
/// key types still render a generic value, with keys stringified.
pub trait MapKey {
    /// Whether keys of this type are text.
    const TEXTUAL: bool;

    /// The key as pointer-addressable text, if it is text.
    fn as_key(&self) -> Option<&str>;

    /// The key as an object key of the generic value.
    fn to_key(&self) -> String;
}

macro_rules! textual_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MapKey for $ty {
                const TEXTUAL: bool = true;

                fn as_key(&self) -> Option<&str> {
                    Some(self.as_ref())
                }

                fn to_key(&self) -> String {
                    let key: &str = self.as_ref();
                    key.to_string()
                }
            }
        )*
    };
}

macro_rules! opaque_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MapKey for $ty {
                const TEXTUAL: bool = false;

                fn as_key(&self) -> Option<&str> {
                    None
                }

                fn to_key(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

textual_key!(String, &str, Box<str>, Rc<str>, Arc<str>, Cow<'_, str>);
opaque_key!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

fn keyed_shape<'a, K, V>(
    type_name: &'static str,
    entries: impl Iterator<Item = (&'a K, &'a V)>,
) -> Shape<'a>
where
    K: MapKey + 'a,
    V: Target + 'a,
{
    if !K::TEXTUAL {
        return Shape::OpaqueKeyed(type_name);
    }
    Shape::Keyed(
        entries
            .filter_map(|(key, value)| Some((key.as_key()?, value as &dyn Target)))
            .collect(),
    )
}

fn keyed_value<'a, K, V>(
    entries: impl Iterator<Item = (&'a K, &'a V)>,
) -> Result<Value, JsonPointerError>
where
    K: MapKey + 'a,
    V: Target + 'a,
{
    entries
        .map(|(key, value)| Ok((key.to_key(), value.to_value()?)))
        .collect::<Result<Map<String, Value>, JsonPointerError>>()
        .map(Value::Object)
}

impl<K: MapKey, V: Target, S: BuildHasher> Target for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        keyed_shape(std::any::type_name::<Self>(), self.iter())
    }

    fn to_value(&self) -> Result<Value, JsonPointerError> {
        keyed_value(self.iter())
    }
}

impl<K: MapKey, V: Target> Target for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        keyed_shape(std::any::type_name::<Self>(), self.iter())
    }

    fn to_value(&self) -> Result<Value, JsonPointerError> {
        keyed_value(self.iter())
    }
}

impl<K: MapKey, V: Target, S: BuildHasher> Target for indexmap::IndexMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        keyed_shape(std::any::type_name::<Self>(), self.iter())
    }

    fn to_value(&self) -> Result<Value, JsonPointerError> {
        keyed_value(self.iter())
    }
}

impl Target for Map<String, Value> {
    fn shape(&self) -> Shape<'_> {
        Shape::Keyed(
            self.iter()
                .map(|(key, value)| (key.as_str(), value as &dyn Target))
                .collect(),
        )
    }

    fn to_value(&self) -> Result<Value, JsonPointerError> {
        Ok(Value::Object(self.clone()))
    }
}

impl Target for Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            Value::String(text) => text.shape(),
            Value::Array(items) => items.shape(),
            Value::Object(map) => map.shape(),
            Value::Null | Value::Bool(_) | Value::Number(_) => Shape::Scalar,
        }
    }

    fn to_value(&self) -> Result<Value, JsonPointerError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_shapes() {
        assert!(matches!(42_i32.shape(), Shape::Scalar));
        assert!(matches!(true.shape(), Shape::Scalar));
        assert!(matches!(json!(1.5).shape(), Shape::Scalar));
        assert!(matches!(Value::Null.shape(), Shape::Scalar));
        assert_eq!(42_u8.to_value().unwrap(), json!(42));
        assert_eq!(().to_value().unwrap(), Value::Null);
    }

    #[test]
    fn test_text_shapes() {
        assert!(matches!("{}".shape(), Shape::Text(b"{}")));
        assert!(matches!(String::from("[]").shape(), Shape::Text(b"[]")));
        assert!(matches!(json!("x").shape(), Shape::Text(b"x")));
        assert_eq!("abc".to_value().unwrap(), json!("abc"));
    }

    #[test]
    fn test_sequence_shapes() {
        let v = vec![1_i32, 2, 3];
        match v.shape() {
            Shape::Indexed(items) => assert_eq!(items.len(), 3),
            other => panic!("unexpected shape {}", other.kind()),
        }
        assert_eq!([1_i32, 2].to_value().unwrap(), json!([1, 2]));
        assert_eq!(
            VecDeque::from(vec!["a", "b"]).to_value().unwrap(),
            json!(["a", "b"])
        );
    }

    #[test]
    fn test_map_shapes() {
        let m: HashMap<String, i32> = HashMap::from([("a".to_string(), 1)]);
        match m.shape() {
            Shape::Keyed(entries) => assert_eq!(entries[0].0, "a"),
            other => panic!("unexpected shape {}", other.kind()),
        }

        let opaque: BTreeMap<i32, &str> = BTreeMap::from([(1, "one")]);
        assert!(matches!(opaque.shape(), Shape::OpaqueKeyed(_)));
        assert_eq!(opaque.to_value().unwrap(), json!({"1": "one"}));
    }

    #[test]
    fn test_reference_shapes() {
        let none: Option<i32> = None;
        assert!(matches!(none.shape(), Shape::Reference(None)));
        assert_eq!(none.to_value().unwrap(), Value::Null);

        let some = Some(vec![1_i32]);
        assert!(matches!(some.shape(), Shape::Reference(Some(_))));
        assert_eq!(some.to_value().unwrap(), json!([1]));

        let boxed: Box<str> = "7".into();
        assert!(matches!(boxed.shape(), Shape::Text(_)));
        assert_eq!(Arc::new(5_i64).to_value().unwrap(), json!(5));
    }

    #[test]
    fn test_json_text_value_is_parsed() {
        let text = JsonText(b"{\"n\": 1}".to_vec());
        assert_eq!(text.to_value().unwrap(), json!({"n": 1.0}));

        let broken = JsonText("{");
        assert!(matches!(
            broken.to_value(),
            Err(JsonPointerError::ParseFailure(_))
        ));
    }
}
