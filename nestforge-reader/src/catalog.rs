//! Engine-neutral catalog rows and table assembly.

use nestforge_schema::{Column, Relation, Table};

use crate::infer_relation_type;

/// A foreign key as reported by the catalog, before inference.
#[derive(Debug, Clone)]
pub(crate) struct ForeignKeyRow {
    pub column_name: String,
    pub foreign_table_name: String,
    pub foreign_column_name: String,
    pub is_unique: bool,
    pub is_primary_key: bool,
}

impl ForeignKeyRow {
    fn into_relation(self) -> Relation {
        Relation::new(
            self.column_name,
            self.foreign_table_name,
            self.foreign_column_name,
            infer_relation_type(self.is_unique, self.is_primary_key),
        )
    }
}

/// Assemble one table, keeping catalog column order.
pub(crate) fn assemble_table(
    name: String,
    columns: Vec<Column>,
    foreign_keys: Vec<ForeignKeyRow>,
) -> Table {
    Table {
        table_name: name,
        columns,
        relations: foreign_keys
            .into_iter()
            .map(ForeignKeyRow::into_relation)
            .collect(),
    }
}

/// MySQL reports missing comments as empty strings.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
