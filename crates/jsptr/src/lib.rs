//! JSON Pointer (RFC 6901) resolution over JSON text and native Rust values.
//!
//! A [`Pointer`] is resolved against anything that implements [`Target`]:
//! raw JSON text, string-keyed maps, sequences, records declared with
//! [`record!`], or values that implement [`Resolve`] themselves. The
//! located value is written into a caller-supplied destination through
//! [`Assign`].
//!
//! # Example
//!
//! ```
//! use jsptr::{record, Pointer};
//! use std::collections::HashMap;
//!
//! // JSON text is parsed, then walked.
//! // Numbers in JSON text come out as floats.
//! let mut n = 0.0_f64;
//! Pointer::new("/array/1").unwrap().retrieve(&mut n, r#"{"array": [1, 2, 3]}"#).unwrap();
//! assert_eq!(n, 2.0);
//!
//! // Maps and sequences are walked in place.
//! let mut scores: HashMap<String, Vec<u32>> = HashMap::new();
//! scores.insert("ann".into(), vec![7, 9]);
//! let mut best = 0_u32;
//! Pointer::new("/ann/1").unwrap().retrieve(&mut best, &scores).unwrap();
//! assert_eq!(best, 9);
//!
//! // Records are addressed by external field name.
//! struct Config {
//!     port: u16,
//! }
//! record!(Config { pub port = "listen_port" });
//!
//! let mut port = 0_u16;
//! Pointer::new("/listen_port").unwrap().retrieve(&mut port, &Config { port: 8080 }).unwrap();
//! assert_eq!(port, 8080);
//! ```

use thiserror::Error;

mod assign;
mod cache;
mod pointer;
mod record;
pub mod source;
mod target;
mod util;

pub use assign::Assign;
pub use cache::{record_shape, FieldDescriptor, RecordShapeInfo};
pub use pointer::Pointer;
pub use record::{FieldSpec, Record, RecordType, SKIP};
pub use source::{Resolve, Source};
pub use target::{JsonText, MapKey, Shape, Target};
pub use util::{parse_tokens, unescape_component};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    /// Pointer text that is neither empty nor starts with `/`.
    #[error("invalid JSON pointer: {0}")]
    MalformedPointer(String),
    /// JSON text that could not be parsed.
    #[error("failed to parse JSON: {0}")]
    ParseFailure(String),
    /// A key or field that does not exist.
    #[error("{0} not found")]
    NotFound(String),
    /// An array index outside `0..len`.
    #[error("array index {index} out of bounds (length {len})")]
    OutOfBounds { index: i64, len: usize },
    /// Navigation into the wrong kind of value, an invalid index token, or
    /// a destination that cannot hold the result.
    #[error("{0}")]
    TypeMismatch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            JsonPointerError::MalformedPointer("foo".into()).to_string(),
            "invalid JSON pointer: foo"
        );
        assert_eq!(
            JsonPointerError::NotFound("property 'x'".into()).to_string(),
            "property 'x' not found"
        );
        assert_eq!(
            JsonPointerError::OutOfBounds { index: 10, len: 3 }.to_string(),
            "array index 10 out of bounds (length 3)"
        );
        assert!(JsonPointerError::ParseFailure("eof".into())
            .to_string()
            .starts_with("failed to parse JSON"));
    }
}
