use serde_json::{Map, Value};

use crate::domain::filter::schema::EntitySchema;

/// A stored row, as field name to JSON value.
pub type Record = Map<String, Value>;

/// Everything needed to search one kind of record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// Path segment the entity is addressed by, e.g. `citizens`.
    pub name: &'static str,
    pub table: &'static str,
    pub primary_key: &'static str,
    pub schema: EntitySchema,
}

impl EntityDescriptor {
    /// Removes protected columns before a record leaves the service.
    pub fn redact(&self, mut record: Record) -> Record {
        for field in self.schema.protected {
            record.remove(*field);
        }
        record
    }
}
