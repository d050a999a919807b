use crate::cache::record_shape;
use crate::record::deref_record;
use crate::{Assign, JsonPointerError, Pointer, Target};

/// A record, navigated by external field names.
///
/// Each token goes through the cached name table of the record it lands on,
/// so embedded fields are addressed as if they belonged to the outer record.
pub struct RecordSource<'a> {
    data: &'a dyn Target,
}

impl<'a> RecordSource<'a> {
    pub(crate) fn new(data: &'a dyn Target) -> Self {
        Self { data }
    }

    pub fn resolve(&self, dst: &mut dyn Assign, pointer: &str) -> Result<(), JsonPointerError> {
        if pointer.is_empty() {
            return dst.assign(self.data.to_value()?);
        }

        let ptr = Pointer::new(pointer)?;
        let mut current = self.data;
        for token in ptr.tokens() {
            let record = deref_record(current, token)?;
            let shape = record_shape(record.record_type());
            let field = shape.get(token).ok_or_else(|| {
                JsonPointerError::NotFound(format!(
                    "field '{token}' in record {}",
                    shape.type_name()
                ))
            })?;
            current = field.reach(record)?;
        }
        dst.assign(current.to_value()?)
    }
}
