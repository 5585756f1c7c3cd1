use nestforge_core::project_name;
use serde::{Deserialize, Serialize};

/// Audit timestamp columns managed by the ORM.
const AUDIT_COLUMNS: [&str; 3] = ["created_at", "updated_at", "deleted_at"];

/// Column carrying the stable external token of a row.
pub const EXTERNAL_ID: &str = "external_id";

/// A table column as read from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub column_name: String,
    pub data_type: String,
    #[serde(default)]
    pub character_maximum_length: Option<i64>,
    pub is_nullable: bool,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub column_default: Option<String>,
    #[serde(default)]
    pub column_comment: Option<String>,
}

impl Column {
    /// Create a non-nullable column with no length, default or comment.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            column_name: name.into(),
            data_type: data_type.into(),
            character_maximum_length: None,
            is_nullable: false,
            is_primary_key: false,
            column_default: None,
            column_comment: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub fn max_length(mut self, length: i64) -> Self {
        self.character_maximum_length = Some(length);
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.column_default = Some(value.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.column_comment = Some(comment.into());
        self
    }

    /// The surrogate key column (`id`).
    pub fn is_surrogate_id(&self) -> bool {
        self.column_name == "id"
    }

    /// One of `created_at`, `updated_at`, `deleted_at`.
    pub fn is_audit(&self) -> bool {
        AUDIT_COLUMNS.contains(&self.column_name.as_str())
    }

    /// A bare foreign-key id column (`*_id` other than `external_id`).
    pub fn is_foreign_key_id(&self) -> bool {
        self.column_name.ends_with("_id") && self.column_name != EXTERNAL_ID
    }

    /// Whether the column belongs to the externally-visible shape.
    ///
    /// Surrogate ids, audit timestamps and bare foreign-key ids are either
    /// managed by the ORM or represented through the relation object.
    pub fn is_public(&self) -> bool {
        !(self.is_surrogate_id() || self.is_audit() || self.is_foreign_key_id())
    }
}

/// Relationship cardinality.
///
/// Introspection only ever infers [`RelationType::ManyToOne`] and
/// [`RelationType::OneToOne`]; the collection variants exist so documents
/// written by hand can express the inverse side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationType {
    ManyToOne,
    OneToOne,
    OneToMany,
    ManyToMany,
}

impl RelationType {
    /// TypeORM decorator name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::ManyToOne => "ManyToOne",
            RelationType::OneToOne => "OneToOne",
            RelationType::OneToMany => "OneToMany",
            RelationType::ManyToMany => "ManyToMany",
        }
    }

    /// Whether the owning property holds many related rows.
    pub fn is_collection(&self) -> bool {
        matches!(self, RelationType::OneToMany | RelationType::ManyToMany)
    }
}

/// A foreign key owned by a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub column_name: String,
    pub foreign_table_name: String,
    pub foreign_column_name: String,
    pub relation_type: RelationType,
}

impl Relation {
    pub fn new(
        column: impl Into<String>,
        foreign_table: impl Into<String>,
        foreign_column: impl Into<String>,
        relation_type: RelationType,
    ) -> Self {
        Self {
            column_name: column.into(),
            foreign_table_name: foreign_table.into(),
            foreign_column_name: foreign_column.into(),
            relation_type,
        }
    }

    /// Property holding the related entity (`optin_id` -> `optin`).
    pub fn property_name(&self) -> &str {
        self.column_name
            .strip_suffix("_id")
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.column_name)
    }

    /// Public field carrying the related row's external id (`optin_eid`).
    pub fn external_field(&self) -> String {
        format!("{}_eid", self.property_name())
    }
}

/// A table with its columns in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub table_name: String,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table_name: name.into(),
            columns: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    /// Look up a column by name.
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.column_name == name)
    }

    /// The relation backed by `column`, if any.
    pub fn relation_for(&self, column: &str) -> Option<&Relation> {
        self.relations.iter().find(|r| r.column_name == column)
    }

    /// Columns of the externally-visible shape, in catalog order.
    pub fn public_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(|c| c.is_public() && self.relation_for(&c.column_name).is_none())
    }

    /// Whether the table carries an `external_id` column.
    pub fn has_external_id(&self) -> bool {
        self.find_column(EXTERNAL_ID).is_some()
    }
}

/// A relation whose target table is not part of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingRelation {
    pub table: String,
    pub column: String,
    pub foreign_table: String,
}

/// Root of the schema document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaModel {
    pub database_name: String,
    pub project_name: String,
    pub schema: Vec<Table>,
}

impl SchemaModel {
    /// Build a model, deriving the project name from the database name.
    pub fn new(database_name: impl Into<String>, tables: Vec<Table>) -> Self {
        let database_name = database_name.into();
        Self {
            project_name: project_name(&database_name),
            database_name,
            schema: tables,
        }
    }

    pub fn tables(&self) -> &[Table] {
        &self.schema
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.schema.iter().find(|t| t.table_name == name)
    }

    /// Largest column count across all tables.
    pub fn max_column_count(&self) -> usize {
        self.schema
            .iter()
            .map(|t| t.columns.len())
            .max()
            .unwrap_or(0)
    }

    /// Relations pointing at tables absent from the model.
    ///
    /// Generators still render these; the references simply won't resolve
    /// in the generated project.
    pub fn dangling_relations(&self) -> Vec<DanglingRelation> {
        self.schema
            .iter()
            .flat_map(|table| {
                table
                    .relations
                    .iter()
                    .filter(|r| self.table(&r.foreign_table_name).is_none())
                    .map(|r| DanglingRelation {
                        table: table.table_name.clone(),
                        column: r.column_name.clone(),
                        foreign_table: r.foreign_table_name.clone(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_filter_excludes_managed_columns() {
        for name in ["id", "created_at", "updated_at", "deleted_at"] {
            assert!(!Column::new(name, "integer").is_public(), "{name}");
        }
    }

    #[test]
    fn test_public_filter_excludes_foreign_key_ids() {
        assert!(!Column::new("optin_id", "integer").is_public());
        assert!(!Column::new("user_account_id", "uuid").is_public());
        assert!(Column::new("external_id", "uuid").is_public());
    }

    #[test]
    fn test_public_filter_keeps_everything_else() {
        for name in ["label", "identifier", "id_card", "ids", "valid", "created"] {
            assert!(Column::new(name, "text").is_public(), "{name}");
        }
    }

    #[test]
    fn test_relation_property_and_external_field() {
        let rel = Relation::new("optin_id", "tb_optin", "id", RelationType::ManyToOne);
        assert_eq!(rel.property_name(), "optin");
        assert_eq!(rel.external_field(), "optin_eid");

        let odd = Relation::new("owner", "tb_user", "id", RelationType::OneToOne);
        assert_eq!(odd.property_name(), "owner");
        assert_eq!(odd.external_field(), "owner_eid");
    }

    #[test]
    fn test_relation_type_serializes_pascal_case() {
        let json = serde_json::to_string(&RelationType::ManyToOne).unwrap();
        assert_eq!(json, "\"ManyToOne\"");
        assert!(RelationType::OneToMany.is_collection());
        assert!(!RelationType::OneToOne.is_collection());
    }

    #[test]
    fn test_public_columns_skip_relation_backing_columns() {
        let table = Table::new("tb_optout")
            .column(Column::new("id", "integer").primary_key())
            .column(Column::new("reason", "text"))
            .column(Column::new("optin", "integer"))
            .relation(Relation::new(
                "optin",
                "tb_optin",
                "id",
                RelationType::ManyToOne,
            ));

        let names: Vec<_> = table.public_columns().map(|c| &c.column_name).collect();
        assert_eq!(names, ["reason"]);
    }

    #[test]
    fn test_project_name_derived() {
        let model = SchemaModel::new("opt_service", vec![]);
        assert_eq!(model.project_name, "OptService");
    }

    #[test]
    fn test_dangling_relations() {
        let model = SchemaModel::new(
            "db",
            vec![
                Table::new("tb_optout").relation(Relation::new(
                    "optin_id",
                    "tb_optin",
                    "id",
                    RelationType::ManyToOne,
                )),
            ],
        );

        let dangling = model.dangling_relations();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].foreign_table, "tb_optin");
    }
}
