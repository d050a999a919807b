//! Navigation strategies, one per source shape.

mod indexed;
mod json;
mod keyed;
mod record;
mod scalar;

pub use indexed::IndexedSource;
pub use json::JsonSource;
pub use keyed::KeyedSource;
pub use record::RecordSource;
pub use scalar::ScalarSource;

pub(crate) use json::generic_value;

use crate::{Assign, JsonPointerError, Shape, Target};

/// Resolves pointer text against a value and writes the result into `dst`.
///
/// Values that implement this and report [`Shape::Resolver`] bypass the
/// built-in navigation entirely.
///
/// ```
/// use jsptr::{Assign, JsonPointerError, Pointer, Resolve, Shape, Target};
/// use serde_json::json;
///
/// struct Constant;
///
/// impl Resolve for Constant {
///     fn resolve_json_pointer(
///         &self,
///         dst: &mut dyn Assign,
///         pointer: &str,
///     ) -> Result<(), JsonPointerError> {
///         match pointer {
///             "/answer" => dst.assign(json!(42)),
///             other => Err(JsonPointerError::NotFound(other.to_string())),
///         }
///     }
/// }
///
/// impl Target for Constant {
///     fn shape(&self) -> Shape<'_> {
///         Shape::Resolver(self)
///     }
/// }
///
/// let mut n = 0_i32;
/// Pointer::new("/answer").unwrap().retrieve(&mut n, &Constant).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait Resolve {
    fn resolve_json_pointer(
        &self,
        dst: &mut dyn Assign,
        pointer: &str,
    ) -> Result<(), JsonPointerError>;
}

/// A value bound to the navigation strategy for its shape.
pub enum Source<'a> {
    Custom(&'a dyn Resolve),
    Scalar(ScalarSource<'a>),
    Keyed(KeyedSource<'a>),
    Indexed(IndexedSource<'a>),
    Record(RecordSource<'a>),
    Json(JsonSource),
}

impl<'a> Source<'a> {
    /// Picks the strategy for `target`.
    ///
    /// Text is parsed here, so malformed JSON fails before any navigation.
    /// Maps with non-string keys cannot be addressed and are rejected.
    pub fn new(target: &'a dyn Target) -> Result<Self, JsonPointerError> {
        let shape = target.shape();
        log::trace!("resolving against {}", shape.kind());
        let source = match shape {
            Shape::Resolver(custom) => Source::Custom(custom),
            Shape::Text(text) => Source::Json(JsonSource::parse(text)?),
            Shape::Keyed(entries) => Source::Keyed(KeyedSource::new(target, entries)),
            Shape::Indexed(items) => Source::Indexed(IndexedSource::new(target, items)),
            Shape::OpaqueKeyed(type_name) => {
                return Err(JsonPointerError::TypeMismatch(format!(
                    "cannot use JSON pointer with non-string-keyed map type {type_name}"
                )))
            }
            Shape::Record(_) => Source::Record(RecordSource::new(target)),
            Shape::Reference(Some(inner)) => return Self::new(inner),
            Shape::Reference(None) | Shape::Scalar => Source::Scalar(ScalarSource::new(target)),
        };
        Ok(source)
    }

    /// Resolves `pointer` and writes the located value into `dst`.
    pub fn resolve(&self, dst: &mut dyn Assign, pointer: &str) -> Result<(), JsonPointerError> {
        match self {
            Source::Custom(custom) => custom.resolve_json_pointer(dst, pointer),
            Source::Scalar(source) => source.resolve(dst, pointer),
            Source::Keyed(source) => source.resolve(dst, pointer),
            Source::Indexed(source) => source.resolve(dst, pointer),
            Source::Record(source) => source.resolve(dst, pointer),
            Source::Json(source) => source.resolve(dst, pointer),
        }
    }

    /// Name of the strategy, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Source::Custom(_) => "custom",
            Source::Scalar(_) => "scalar",
            Source::Keyed(_) => "keyed",
            Source::Indexed(_) => "indexed",
            Source::Record(_) => "record",
            Source::Json(_) => "json",
        }
    }
}

impl Resolve for Source<'_> {
    fn resolve_json_pointer(
        &self,
        dst: &mut dyn Assign,
        pointer: &str,
    ) -> Result<(), JsonPointerError> {
        self.resolve(dst, pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::collections::{BTreeMap, HashMap};

    fn kind_of(target: &dyn Target) -> Result<&'static str, JsonPointerError> {
        Source::new(target).map(|source| source.kind())
    }

    #[test]
    fn test_dispatch_by_shape() {
        assert_eq!(kind_of(&42_i32).unwrap(), "scalar");
        assert_eq!(kind_of(&"[1]").unwrap(), "json");
        assert_eq!(kind_of(&String::from("{}")).unwrap(), "json");
        assert_eq!(kind_of(&HashMap::<String, i32>::new()).unwrap(), "keyed");
        assert_eq!(kind_of(&json!({"a": 1})).unwrap(), "keyed");
        assert_eq!(kind_of(&vec![1_i32, 2]).unwrap(), "indexed");
        assert_eq!(kind_of(&[[1_i32], [2]]).unwrap(), "indexed");
        assert_eq!(kind_of(&Value::Null).unwrap(), "scalar");
    }

    #[test]
    fn test_dispatch_rejects_non_string_keys() {
        let m: BTreeMap<u32, &str> = BTreeMap::from([(1, "one")]);
        assert!(matches!(
            kind_of(&m),
            Err(JsonPointerError::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_dispatch_parses_text_eagerly() {
        assert!(matches!(
            kind_of(&r#"{"foo": "bar", "invalid": }"#),
            Err(JsonPointerError::ParseFailure(_))
        ));
    }

    #[test]
    fn test_dispatch_follows_references() {
        let some = Some(Box::new(vec![1_i32]));
        assert_eq!(kind_of(&some).unwrap(), "indexed");

        let none: Option<Vec<i32>> = None;
        assert_eq!(kind_of(&none).unwrap(), "scalar");

        let mut out = json!("untouched");
        Source::new(&none).unwrap().resolve(&mut out, "").unwrap();
        assert_eq!(out, Value::Null);
    }
}
