use crate::{Assign, JsonPointerError, Target};

/// A value that cannot be indexed into.
pub struct ScalarSource<'a> {
    data: &'a dyn Target,
}

impl<'a> ScalarSource<'a> {
    pub(crate) fn new(data: &'a dyn Target) -> Self {
        Self { data }
    }

    /// Only the root pointer resolves, yielding the value itself.
    pub fn resolve(&self, dst: &mut dyn Assign, pointer: &str) -> Result<(), JsonPointerError> {
        if !pointer.is_empty() {
            return Err(JsonPointerError::TypeMismatch(format!(
                "cannot index into {} with pointer '{pointer}'",
                self.data.shape().kind()
            )));
        }
        dst.assign(self.data.to_value()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_root() {
        let mut out = 0.0_f64;
        ScalarSource::new(&2.5_f64).resolve(&mut out, "").unwrap();
        assert_eq!(out, 2.5);
    }

    #[test]
    fn test_scalar_rejects_any_path() {
        let mut out = false;
        for pointer in ["/", "/0", "/foo", "/foo/bar"] {
            let err = ScalarSource::new(&true).resolve(&mut out, pointer).unwrap_err();
            assert!(matches!(err, JsonPointerError::TypeMismatch(_)));
        }
    }
}
