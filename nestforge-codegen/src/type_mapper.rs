//! Catalog type to TypeORM / TypeScript type mapping.
//!
//! Both tables are immutable constants; generators receive them through a
//! [`TypeMapper`] value rather than reaching for global state.

/// What to return when a catalog type is not in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Pass the catalog type through unchanged.
    Raw,
    /// Use a fixed type.
    Fixed(&'static str),
}

/// An immutable lookup table from catalog type names to target type names.
#[derive(Debug, Clone, Copy)]
pub struct TypeTable {
    entries: &'static [(&'static str, &'static str)],
    fallback: Fallback,
}

impl TypeTable {
    pub const fn new(entries: &'static [(&'static str, &'static str)], fallback: Fallback) -> Self {
        Self { entries, fallback }
    }

    /// Exact (case-insensitive) lookup without fallback.
    pub fn get(&self, catalog: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(from, _)| from.eq_ignore_ascii_case(catalog.trim()))
            .map(|(_, to)| *to)
    }

    /// Lookup, degrading to the fallback for unknown types.
    pub fn map<'a>(&self, catalog: &'a str) -> &'a str {
        match (self.get(catalog), self.fallback) {
            (Some(found), _) => found,
            (None, Fallback::Raw) => catalog,
            (None, Fallback::Fixed(ty)) => ty,
        }
    }
}

/// Catalog type -> TypeORM `@Column({ type })` annotation.
pub const COLUMN_TYPES: TypeTable = TypeTable::new(
    &[
        ("integer", "int"),
        ("int", "int"),
        ("smallint", "smallint"),
        ("tinyint", "tinyint"),
        ("bigint", "bigint"),
        ("uuid", "uuid"),
        ("timestamp without time zone", "timestamp"),
        ("timestamp with time zone", "timestamptz"),
        ("timestamp", "timestamp"),
        ("datetime", "datetime"),
        ("date", "date"),
        ("character varying", "varchar"),
        ("varchar", "varchar"),
        ("character", "char"),
        ("char", "char"),
        ("text", "text"),
        ("bytea", "bytea"),
        ("blob", "blob"),
        ("boolean", "boolean"),
        ("json", "json"),
        ("jsonb", "jsonb"),
        ("double precision", "float"),
        ("real", "float"),
        ("double", "double"),
        ("float", "float"),
        ("numeric", "decimal"),
        ("decimal", "decimal"),
    ],
    Fallback::Raw,
);

/// Catalog type -> TypeScript value type.
pub const TS_TYPES: TypeTable = TypeTable::new(
    &[
        ("integer", "number"),
        ("int", "number"),
        ("smallint", "number"),
        ("tinyint", "number"),
        ("bigint", "number"),
        ("double precision", "number"),
        ("real", "number"),
        ("double", "number"),
        ("float", "number"),
        ("numeric", "number"),
        ("decimal", "number"),
        ("uuid", "string"),
        ("character varying", "string"),
        ("varchar", "string"),
        ("character", "string"),
        ("char", "string"),
        ("text", "string"),
        ("timestamp without time zone", "Date"),
        ("timestamp with time zone", "Date"),
        ("timestamp", "Date"),
        ("datetime", "Date"),
        ("date", "Date"),
        ("bytea", "Buffer"),
        ("blob", "Buffer"),
        ("boolean", "boolean"),
        ("json", "any"),
        ("jsonb", "any"),
    ],
    Fallback::Fixed("any"),
);

/// Primitive category of a mapped TypeScript type; drives validator choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Number,
    Date,
    Boolean,
    Other,
}

/// The pair of tables a generator run uses.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper {
    column: TypeTable,
    value: TypeTable,
}

impl TypeMapper {
    pub const fn new(column: TypeTable, value: TypeTable) -> Self {
        Self { column, value }
    }

    /// TypeORM column annotation for a catalog type.
    pub fn column_type<'a>(&self, catalog: &'a str) -> &'a str {
        self.column.map(catalog)
    }

    /// TypeScript type for a catalog type.
    pub fn ts_type<'a>(&self, catalog: &'a str) -> &'a str {
        self.value.map(catalog)
    }

    pub fn primitive(&self, catalog: &str) -> PrimitiveKind {
        match self.ts_type(catalog) {
            "string" => PrimitiveKind::String,
            "number" => PrimitiveKind::Number,
            "Date" => PrimitiveKind::Date,
            "boolean" => PrimitiveKind::Boolean,
            _ => PrimitiveKind::Other,
        }
    }
}

impl Default for TypeMapper {
    fn default() -> Self {
        Self::new(COLUMN_TYPES, TS_TYPES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_types() {
        let mapper = TypeMapper::default();
        assert_eq!(mapper.column_type("integer"), "int");
        assert_eq!(mapper.column_type("character varying"), "varchar");
        assert_eq!(mapper.column_type("timestamp without time zone"), "timestamp");
        assert_eq!(mapper.column_type("double precision"), "float");
    }

    #[test]
    fn test_ts_types() {
        let mapper = TypeMapper::default();
        assert_eq!(mapper.ts_type("uuid"), "string");
        assert_eq!(mapper.ts_type("bigint"), "number");
        assert_eq!(mapper.ts_type("timestamp without time zone"), "Date");
        assert_eq!(mapper.ts_type("bytea"), "Buffer");
        assert_eq!(mapper.ts_type("jsonb"), "any");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mapper = TypeMapper::default();
        assert_eq!(mapper.ts_type("VARCHAR"), "string");
        assert_eq!(mapper.column_type("Integer"), "int");
    }

    #[test]
    fn test_unknown_types_degrade() {
        let mapper = TypeMapper::default();
        assert_eq!(mapper.column_type("tsvector"), "tsvector");
        assert_eq!(mapper.ts_type("tsvector"), "any");
        assert_eq!(mapper.primitive("tsvector"), PrimitiveKind::Other);
    }

    #[test]
    fn test_primitive_kind() {
        let mapper = TypeMapper::default();
        assert_eq!(mapper.primitive("character varying"), PrimitiveKind::String);
        assert_eq!(mapper.primitive("integer"), PrimitiveKind::Number);
        assert_eq!(mapper.primitive("date"), PrimitiveKind::Date);
        assert_eq!(mapper.primitive("boolean"), PrimitiveKind::Boolean);
    }

    #[test]
    fn test_injected_tables() {
        const CUSTOM: TypeTable = TypeTable::new(&[("money", "string")], Fallback::Fixed("unknown"));
        let mapper = TypeMapper::new(COLUMN_TYPES, CUSTOM);
        assert_eq!(mapper.ts_type("money"), "string");
        assert_eq!(mapper.ts_type("integer"), "unknown");
    }
}
