//! Parsed JSON Pointers.

use std::fmt;
use std::str::FromStr;

use crate::source::Source;
use crate::util::parse_tokens;
use crate::{Assign, JsonPointerError, Target};

/// A validated JSON Pointer: its text plus the decoded tokens.
///
/// Pointers are immutable once built and can be reused against any number
/// of targets, from any number of threads.
///
/// # Example
///
/// ```
/// use jsptr::Pointer;
///
/// let ptr = Pointer::new("/foo/a~1b").unwrap();
/// assert_eq!(ptr.pattern(), "/foo/a~1b");
/// assert_eq!(ptr.tokens(), ["foo", "a/b"]);
///
/// let mut out = String::new();
/// ptr.retrieve(&mut out, r#"{"foo": {"a/b": "hi"}}"#).unwrap();
/// assert_eq!(out, "hi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Pointer {
    pattern: String,
    tokens: Vec<String>,
}

impl Pointer {
    /// Parses pointer text.
    ///
    /// # Errors
    ///
    /// [`JsonPointerError::MalformedPointer`] if the text is neither empty
    /// nor starts with `/`.
    pub fn new(pattern: impl Into<String>) -> Result<Self, JsonPointerError> {
        let pattern = pattern.into();
        let tokens = parse_tokens(&pattern)?;
        Ok(Self { pattern, tokens })
    }

    /// The root pointer, `""`.
    pub fn root() -> Self {
        Self::default()
    }

    /// The text this pointer was built from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Decoded reference tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Resolves this pointer against `target` and writes the result into
    /// `dst`.
    ///
    /// `dst` is only written on success.
    pub fn retrieve<D, T>(&self, dst: &mut D, target: &T) -> Result<(), JsonPointerError>
    where
        D: Assign,
        T: Target + ?Sized,
    {
        log::trace!("retrieving '{}'", self.pattern);
        Source::new(&target)?.resolve(dst, &self.pattern)
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl FromStr for Pointer {
    type Err = JsonPointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Pointer {
    type Error = JsonPointerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Pointer {
    type Error = JsonPointerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for Pointer {
    fn as_ref(&self) -> &str {
        &self.pattern
    }
}
