use crate::source::Source;
use crate::util::{format_tokens, parse_index};
use crate::{Assign, JsonPointerError, Pointer, Target};

/// An ordered container.
///
/// Elements may differ in shape, so every path that goes deeper than one
/// element is handed to a fresh [`Source`] built for that element.
pub struct IndexedSource<'a> {
    data: &'a dyn Target,
    items: Vec<&'a dyn Target>,
}

impl<'a> IndexedSource<'a> {
    pub(crate) fn new(data: &'a dyn Target, items: Vec<&'a dyn Target>) -> Self {
        Self { data, items }
    }

    pub fn resolve(&self, dst: &mut dyn Assign, pointer: &str) -> Result<(), JsonPointerError> {
        if pointer.is_empty() {
            return dst.assign(self.data.to_value()?);
        }

        let ptr = Pointer::new(pointer)?;
        let Some((first, rest)) = ptr.tokens().split_first() else {
            return dst.assign(self.data.to_value()?);
        };

        let index = parse_index(first, self.items.len())?;
        let element = self.items[index];
        if rest.is_empty() {
            return dst.assign(element.to_value()?);
        }

        let remaining = format_tokens(rest);
        log::trace!("delegating '{remaining}' to element {index}");
        Source::new(element)?.resolve(dst, &remaining)
    }
}
