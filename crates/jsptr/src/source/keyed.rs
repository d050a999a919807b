use std::collections::HashMap;

use crate::util::parse_index;
use crate::{Assign, JsonPointerError, Pointer, Shape, Target};

/// A container keyed by strings.
pub struct KeyedSource<'a> {
    data: &'a dyn Target,
    entries: HashMap<&'a str, &'a dyn Target>,
}

impl<'a> KeyedSource<'a> {
    pub(crate) fn new(data: &'a dyn Target, entries: Vec<(&'a str, &'a dyn Target)>) -> Self {
        Self {
            data,
            entries: entries.into_iter().collect(),
        }
    }

    pub fn resolve(&self, dst: &mut dyn Assign, pointer: &str) -> Result<(), JsonPointerError> {
        if pointer.is_empty() {
            return dst.assign(self.data.to_value()?);
        }

        let ptr = Pointer::new(pointer)?;
        let mut tokens = ptr.tokens().iter();
        let Some(first) = tokens.next() else {
            return dst.assign(self.data.to_value()?);
        };

        let mut current = *self
            .entries
            .get(first.as_str())
            .ok_or_else(|| not_found(first))?;
        for token in tokens {
            current = descend(current, token)?;
        }
        dst.assign(current.to_value()?)
    }
}

/// One navigation step below the top-level map.
///
/// Only maps and sequences can be stepped into.
fn descend<'a>(current: &'a dyn Target, token: &str) -> Result<&'a dyn Target, JsonPointerError> {
    match current.shape() {
        Shape::Keyed(entries) => entries
            .into_iter()
            .find_map(|(key, value)| (key == token).then_some(value))
            .ok_or_else(|| not_found(token)),
        Shape::Indexed(items) => {
            let index = parse_index(token, items.len())?;
            Ok(items[index])
        }
        other => Err(JsonPointerError::TypeMismatch(format!(
            "cannot index into {} with '{token}'",
            other.kind()
        ))),
    }
}

fn not_found(token: &str) -> JsonPointerError {
    JsonPointerError::NotFound(format!("property '{token}'"))
}
