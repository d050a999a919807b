//! Process-wide cache of record name tables.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use indexmap::IndexMap;

use crate::record::{deref_record, Record, RecordType};
use crate::{JsonPointerError, Target};

/// How to reach one visible field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    access_path: Vec<usize>,
    external_name: String,
}

impl FieldDescriptor {
    /// Positions from the outer record down to the field. Every position but
    /// the last selects an embedded record.
    pub fn access_path(&self) -> &[usize] {
        &self.access_path
    }

    pub fn external_name(&self) -> &str {
        &self.external_name
    }

    /// Walks the access path on `record`.
    pub(crate) fn reach<'a>(
        &self,
        record: &'a dyn Record,
    ) -> Result<&'a dyn Target, JsonPointerError> {
        let Some((last, embedding)) = self.access_path.split_last() else {
            return Err(self.missing());
        };
        let mut holder = record;
        for &position in embedding {
            let embedded = holder.field(position).ok_or_else(|| self.missing())?;
            holder = deref_record(embedded, &self.external_name)?;
        }
        holder.field(*last).ok_or_else(|| self.missing())
    }

    fn missing(&self) -> JsonPointerError {
        JsonPointerError::NotFound(format!(
            "field '{}' at {:?}",
            self.external_name, self.access_path
        ))
    }
}

/// Name table of one record type, in declaration order.
#[derive(Debug, Clone)]
pub struct RecordShapeInfo {
    type_name: &'static str,
    fields: IndexMap<String, FieldDescriptor>,
}

impl RecordShapeInfo {
    fn build(record_type: RecordType) -> Self {
        let mut fields = IndexMap::new();
        let mut chain = vec![record_type.id()];
        collect_fields(record_type, &[], &mut chain, &mut fields);
        Self {
            type_name: record_type.name(),
            fields,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn get(&self, external_name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(external_name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn collect_fields(
    record_type: RecordType,
    prefix: &[usize],
    chain: &mut Vec<TypeId>,
    out: &mut IndexMap<String, FieldDescriptor>,
) {
    for (position, declared) in record_type.fields().into_iter().enumerate() {
        let mut access_path = prefix.to_vec();
        access_path.push(position);

        if let Some(embedded) = declared.embedded_type() {
            if chain.contains(&embedded.id()) {
                log::debug!(
                    "not flattening {} into {}: already on the embedding chain",
                    embedded.name(),
                    record_type.name()
                );
                continue;
            }
            chain.push(embedded.id());
            collect_fields(embedded, &access_path, chain, out);
            chain.pop();
            continue;
        }

        if !declared.is_public() {
            continue;
        }
        let Some(name) = declared.external_name() else {
            continue;
        };
        out.insert(
            name.to_string(),
            FieldDescriptor {
                access_path,
                external_name: name.to_string(),
            },
        );
    }
}

type ShapeTable = HashMap<TypeId, Arc<RecordShapeInfo>>;

static SHAPES: OnceLock<RwLock<ShapeTable>> = OnceLock::new();

/// Returns the name table for `record_type`, building it on first use.
///
/// Tables live for the rest of the process. Readers share a read lock; a
/// miss takes the write lock and checks again before building, so each type
/// is built at most once.
pub fn record_shape(record_type: RecordType) -> Arc<RecordShapeInfo> {
    let shapes = SHAPES.get_or_init(|| RwLock::new(HashMap::new()));

    if let Some(info) = shapes
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&record_type.id())
    {
        return Arc::clone(info);
    }

    let mut table = shapes.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(info) = table.get(&record_type.id()) {
        return Arc::clone(info);
    }

    let info = Arc::new(RecordShapeInfo::build(record_type));
    log::debug!(
        "built name table for {} ({} fields)",
        info.type_name(),
        info.len()
    );
    table.insert(record_type.id(), Arc::clone(&info));
    info
}
