//! Per-table names and field projections shared by the file generators.

use nestforge_schema::{Column, Relation, Table};

use crate::{
    naming::NamingConvention,
    type_mapper::{PrimitiveKind, TypeMapper},
};

/// Every generated identifier derived from one table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityNames {
    /// Catalog table name (`tb_optin`).
    pub table: String,
    /// PascalCase stem (`Optin`).
    pub stem: String,
    /// kebab-case file and route stem (`optin`).
    pub slug: String,
    /// camelCase variable stem (`optin`).
    pub variable: String,
}

impl EntityNames {
    pub fn new(table: &str, naming: &NamingConvention) -> Self {
        let stem = naming.type_name(table);
        Self {
            table: table.to_string(),
            variable: naming.safe_name(&lower_first(&stem)),
            slug: naming.file_name(table),
            stem,
        }
    }

    pub fn entity(&self) -> String {
        format!("{}Entity", self.stem)
    }

    pub fn service(&self) -> String {
        format!("{}Service", self.stem)
    }

    pub fn controller(&self) -> String {
        format!("{}Controller", self.stem)
    }

    pub fn module(&self) -> String {
        format!("{}Module", self.stem)
    }

    pub fn query_dto(&self) -> String {
        format!("{}QueryDTO", self.stem)
    }

    pub fn persist_dto(&self) -> String {
        format!("{}PersistDTO", self.stem)
    }

    pub fn query_interface(&self) -> String {
        format!("I{}QueryDTO", self.stem)
    }

    pub fn persist_interface(&self) -> String {
        format!("I{}PersistDTO", self.stem)
    }

    /// Import specifier of the entity from a sibling per-table directory.
    pub fn entity_import(&self) -> String {
        format!("../entities/{}.entity", self.slug)
    }

    /// Import specifier of a per-table file from `src/app`.
    pub fn app_import(&self, kind: &str) -> String {
        format!("./{}/{}.{}", self.slug, self.slug, kind)
    }

    /// Import specifier of a per-table file from its own directory.
    pub fn local_import(&self, kind: &str) -> String {
        format!("./{}.{}", self.slug, kind)
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// A public column as seen by the DTO, interface and service generators.
#[derive(Debug, Clone)]
pub struct FieldView<'a> {
    pub column: &'a Column,
    /// Entity property (`externalId`).
    pub property: String,
    pub ts_type: &'a str,
    pub primitive: PrimitiveKind,
}

impl FieldView<'_> {
    /// DTO field name; DTOs keep the catalog spelling (`external_id`).
    pub fn name(&self) -> &str {
        &self.column.column_name
    }

    pub fn is_nullable(&self) -> bool {
        self.column.is_nullable
    }

    pub fn is_uuid(&self) -> bool {
        self.column.data_type.eq_ignore_ascii_case("uuid")
    }
}

/// A foreign key as seen by the generators.
#[derive(Debug, Clone)]
pub struct RelationView<'a> {
    pub relation: &'a Relation,
    /// Entity property and service variable (`optin`).
    pub property: String,
    /// DTO field carrying the related external id (`optin_eid`).
    pub external_field: String,
    pub target: EntityNames,
    pub nullable: bool,
}

impl RelationView<'_> {
    pub fn is_collection(&self) -> bool {
        self.relation.relation_type.is_collection()
    }
}

/// A table projected through the naming convention and type mapper.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    pub table: &'a Table,
    pub names: EntityNames,
    pub fields: Vec<FieldView<'a>>,
    pub relations: Vec<RelationView<'a>>,
}

impl<'a> TableView<'a> {
    pub fn new(table: &'a Table, naming: &NamingConvention, mapper: &TypeMapper) -> Self {
        let fields = table
            .public_columns()
            .map(|column| FieldView {
                column,
                property: naming.property_name(&column.column_name),
                ts_type: mapper.ts_type(&column.data_type),
                primitive: mapper.primitive(&column.data_type),
            })
            .collect();

        let relations = table
            .relations
            .iter()
            .map(|relation| RelationView {
                relation,
                property: naming.property_name(relation.property_name()),
                external_field: relation.external_field(),
                target: EntityNames::new(&relation.foreign_table_name, naming),
                nullable: table
                    .find_column(&relation.column_name)
                    .is_some_and(|c| c.is_nullable),
            })
            .collect();

        Self {
            table,
            names: EntityNames::new(&table.table_name, naming),
            fields,
            relations,
        }
    }

    /// Relations carried through DTOs as `<rel>_eid`; collection sides are
    /// only present on the entity.
    pub fn owning_relations(&self) -> impl Iterator<Item = &RelationView<'a>> {
        self.relations.iter().filter(|r| !r.is_collection())
    }

    /// Whether deletes can be soft (the table has a `deleted_at` column).
    pub fn has_soft_delete(&self) -> bool {
        self.table.find_column("deleted_at").is_some()
    }

    /// Distinct relation targets other than the table itself, in order.
    pub fn related_entities(&self) -> Vec<&EntityNames> {
        let mut targets: Vec<&EntityNames> = Vec::new();
        for relation in &self.relations {
            if relation.target.table != self.names.table
                && !targets.iter().any(|t| t.table == relation.target.table)
            {
                targets.push(&relation.target);
            }
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use nestforge_schema::RelationType;

    use super::*;
    use crate::naming::NEST_NAMING;

    fn optout() -> Table {
        Table::new("tb_optout")
            .column(Column::new("id", "integer").primary_key())
            .column(Column::new("external_id", "uuid"))
            .column(Column::new("reason", "text").nullable())
            .column(Column::new("optin_id", "integer"))
            .column(Column::new("created_at", "timestamp without time zone"))
            .relation(Relation::new(
                "optin_id",
                "tb_optin",
                "id",
                RelationType::ManyToOne,
            ))
    }

    #[test]
    fn test_entity_names() {
        let names = EntityNames::new("tb_order_item", &NEST_NAMING);
        assert_eq!(names.entity(), "OrderItemEntity");
        assert_eq!(names.query_dto(), "OrderItemQueryDTO");
        assert_eq!(names.persist_interface(), "IOrderItemPersistDTO");
        assert_eq!(names.slug, "order-item");
        assert_eq!(names.variable, "orderItem");
        assert_eq!(names.entity_import(), "../entities/order-item.entity");
        assert_eq!(names.app_import("module"), "./order-item/order-item.module");
    }

    #[test]
    fn test_reserved_variable_is_escaped() {
        let names = EntityNames::new("tb_delete", &NEST_NAMING);
        assert_eq!(names.variable, "_delete");
        assert_eq!(names.service(), "DeleteService");
    }

    #[test]
    fn test_fields_are_public_columns_only() {
        let table = optout();
        let view = TableView::new(&table, &NEST_NAMING, &TypeMapper::default());
        let fields: Vec<_> = view.fields.iter().map(|f| f.name()).collect();
        assert_eq!(fields, ["external_id", "reason"]);
        assert_eq!(view.fields[0].property, "externalId");
        assert!(view.fields[0].is_uuid());
        assert_eq!(view.fields[1].ts_type, "string");
    }

    #[test]
    fn test_relation_view() {
        let table = optout();
        let view = TableView::new(&table, &NEST_NAMING, &TypeMapper::default());
        let relation = &view.relations[0];
        assert_eq!(relation.property, "optin");
        assert_eq!(relation.external_field, "optin_eid");
        assert_eq!(relation.target.entity(), "OptinEntity");
        assert!(!relation.nullable);
        assert_eq!(view.owning_relations().count(), 1);
        assert!(!view.has_soft_delete());
    }

    #[test]
    fn test_self_reference_is_not_a_related_entity() {
        let table = Table::new("tb_category")
            .column(Column::new("parent_id", "integer").nullable())
            .relation(Relation::new(
                "parent_id",
                "tb_category",
                "id",
                RelationType::ManyToOne,
            ));
        let view = TableView::new(&table, &NEST_NAMING, &TypeMapper::default());
        assert!(view.related_entities().is_empty());
        assert!(view.relations[0].nullable);
    }
}
