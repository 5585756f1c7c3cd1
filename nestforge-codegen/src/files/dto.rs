//! DTO generator: query and persist shapes with validation.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use nestforge_core::GeneratedFile;

use super::table_file;
use crate::{
    ast::{Class, Decorator, Import, JsObject, Property, ts_string},
    builder::{CodeFragment, Renderable},
    code_file::CodeFile,
    type_mapper::PrimitiveKind,
    view::{FieldView, RelationView, TableView},
};

const UUID_EXAMPLE: &str = "b2e293e5-4a4a-4b29-b9a4-4b2b4a4a4b2b";

/// `src/app/<slug>/<slug>.dto.ts`.
pub struct DtoFile<'a> {
    view: TableView<'a>,
}

/// Names pulled from `class-validator` and `class-transformer` while
/// building the classes.
#[derive(Default)]
struct Used {
    validators: BTreeSet<&'static str>,
    transform: bool,
}

impl<'a> DtoFile<'a> {
    pub fn new(view: TableView<'a>) -> Self {
        Self { view }
    }

    fn field_property(field: &FieldView<'_>, used: &mut Used) -> Property {
        let column = field.column;
        let mut validators = vec![presence(field.is_nullable())];

        if field.is_uuid() {
            validators.push("IsUUID");
        } else {
            match field.primitive {
                PrimitiveKind::String => validators.push("IsString"),
                PrimitiveKind::Number => validators.push("IsNumber"),
                PrimitiveKind::Date => validators.push("IsDate"),
                PrimitiveKind::Boolean => validators.push("IsBoolean"),
                PrimitiveKind::Other => {}
            }
        }
        used.validators.extend(validators.iter().copied());

        let mut decorators: Vec<Decorator> = validators.into_iter().map(Decorator::new).collect();
        if field.primitive == PrimitiveKind::String
            && let Some(length) = column.character_maximum_length
        {
            used.validators.insert("MaxLength");
            decorators.push(Decorator::new("MaxLength").arg(length.to_string()));
        }
        if field.primitive == PrimitiveKind::Date {
            used.transform = true;
            decorators.push(Decorator::new("Type").arg("() => Date"));
        }

        let description = column
            .column_comment
            .clone()
            .unwrap_or_else(|| format!("{} field", column.column_name));
        decorators.push(
            Decorator::new("ApiProperty").object_arg(
                JsObject::new()
                    .raw("example", example(field))
                    .string("description", description)
                    .raw_if(field.is_nullable(), "required", "false"),
            ),
        );

        Property::new(field.name(), field.ts_type)
            .decorators(decorators)
            .optional(field.is_nullable())
    }

    fn relation_property(relation: &RelationView<'_>, used: &mut Used) -> Property {
        let presence = presence(relation.nullable);
        used.validators.insert(presence);
        used.validators.insert("IsUUID");

        Property::new(&relation.external_field, "string")
            .decorator(Decorator::new(presence))
            .decorator(Decorator::new("IsUUID"))
            .decorator(
                Decorator::new("ApiProperty").object_arg(
                    JsObject::new()
                        .string("example", UUID_EXAMPLE)
                        .string(
                            "description",
                            format!(
                                "External id of the related {}",
                                relation.relation.foreign_table_name
                            ),
                        )
                        .raw_if(relation.nullable, "required", "false"),
                ),
            )
            .optional(relation.nullable)
    }

    fn class(&self, name: String, interface: String, used: &mut Used) -> Class {
        let mut class = Class::new(name).implements(interface);
        for field in &self.view.fields {
            class = class.property(Self::field_property(field, used));
        }
        for relation in self.view.owning_relations() {
            class = class.property(Self::relation_property(relation, used));
        }
        class
    }
}

fn presence(nullable: bool) -> &'static str {
    if nullable { "IsOptional" } else { "IsNotEmpty" }
}

/// Swagger example literal for a field.
fn example(field: &FieldView<'_>) -> String {
    if field.is_uuid() || field.name() == "external_id" {
        return ts_string(UUID_EXAMPLE);
    }
    match field.primitive {
        PrimitiveKind::Number => "12345".to_string(),
        PrimitiveKind::Boolean => "true".to_string(),
        PrimitiveKind::Date => ts_string("2024-01-01T00:00:00Z"),
        PrimitiveKind::String => ts_string("example"),
        PrimitiveKind::Other => ts_string(
            field
                .column
                .column_default
                .as_deref()
                .unwrap_or("example"),
        ),
    }
}

impl GeneratedFile for DtoFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        table_file(base, &self.view.names, "dto")
    }

    fn render(&self) -> String {
        let names = &self.view.names;
        let mut used = Used::default();
        let query = self.class(names.query_dto(), names.query_interface(), &mut used);
        let persist = self.class(names.persist_dto(), names.persist_interface(), &mut used);

        let mut file = CodeFile::new();
        if !used.validators.is_empty() {
            file = file.import(Import::new("class-validator").named_all(used.validators));
        }
        if used.transform {
            file = file.import(Import::new("class-transformer").named("Type"));
        }
        file.import(Import::new("@nestjs/swagger").named("ApiProperty"))
            .import(
                Import::new(names.local_import("interface"))
                    .named_all([names.persist_interface(), names.query_interface()]),
            )
            .add(
                std::iter::once(CodeFragment::jsdoc(format!(
                    "Public shape of {} without surrogate keys or audit columns.",
                    names.table
                )))
                .chain(query.to_fragments())
                .collect::<Vec<_>>(),
            )
            .add(persist)
            .render()
    }
}

#[cfg(test)]
mod tests {
    use nestforge_schema::{Column, Relation, RelationType, Table};

    use super::*;
    use crate::{naming::NEST_NAMING, type_mapper::TypeMapper};

    fn render(table: &Table) -> String {
        let view = TableView::new(table, &NEST_NAMING, &TypeMapper::default());
        DtoFile::new(view).render()
    }

    fn optin() -> Table {
        Table::new("tb_optin")
            .column(Column::new("id", "integer").primary_key())
            .column(Column::new("external_id", "uuid"))
            .column(Column::new("label", "character varying").max_length(100))
            .column(Column::new("created_at", "timestamp without time zone"))
    }

    #[test]
    fn test_optin_dto_excludes_id_and_audit() {
        let out = render(&optin());
        assert!(!out.contains(" id:"));
        assert!(!out.contains("created_at"));
        assert!(out.contains("export class OptinQueryDTO implements IOptinQueryDTO {"));
        assert!(out.contains("export class OptinPersistDTO implements IOptinPersistDTO {"));
        assert!(out.contains("  external_id: string;"));
        assert!(out.contains("  label: string;"));
    }

    #[test]
    fn test_validation_by_length_and_kind() {
        let out = render(&optin());
        assert!(out.contains(
            "  @IsNotEmpty()\n  @IsString()\n  @MaxLength(100)\n  @ApiProperty({ example: 'example', description: 'label field' })\n  label: string;"
        ));
        assert!(out.contains("  @IsNotEmpty()\n  @IsUUID()\n"));
        assert!(out.contains(
            "import { IsNotEmpty, IsString, IsUUID, MaxLength } from 'class-validator';"
        ));
        assert!(!out.contains("class-transformer"));
    }

    #[test]
    fn test_nullable_fields_are_optional() {
        let table = Table::new("tb_event")
            .column(Column::new("happened_at", "date").nullable())
            .column(Column::new("score", "numeric").nullable().comment("Final score"));
        let out = render(&table);
        assert!(out.contains(
            "  @IsOptional()\n  @IsDate()\n  @Type(() => Date)\n"
        ));
        assert!(out.contains("  happened_at?: Date;"));
        assert!(out.contains(
            "@ApiProperty({ example: 12345, description: 'Final score', required: false })"
        ));
        assert!(out.contains("import { Type } from 'class-transformer';"));
    }

    #[test]
    fn test_relation_adds_external_id_field() {
        let table = Table::new("tb_optout")
            .column(Column::new("optin_id", "integer"))
            .relation(Relation::new(
                "optin_id",
                "tb_optin",
                "id",
                RelationType::ManyToOne,
            ));
        let out = render(&table);
        assert!(out.contains("  optin_eid: string;"));
        assert!(out.contains("External id of the related tb_optin"));
        assert!(!out.contains("optin_id:"));
    }
}
