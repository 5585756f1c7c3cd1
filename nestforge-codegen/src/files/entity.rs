//! TypeORM entity generator.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use nestforge_core::GeneratedFile;
use nestforge_schema::{Column, RelationType};

use super::app_dir;
use crate::{
    ast::{Class, Decorator, Import, JsObject, Property, ts_string},
    code_file::CodeFile,
    naming::NamingConvention,
    type_mapper::TypeMapper,
    view::{RelationView, TableView},
};

/// `src/app/entities/<slug>.entity.ts`.
pub struct EntityFile<'a> {
    view: TableView<'a>,
    naming: NamingConvention,
    mapper: TypeMapper,
}

impl<'a> EntityFile<'a> {
    pub fn new(view: TableView<'a>, naming: NamingConvention, mapper: TypeMapper) -> Self {
        Self {
            view,
            naming,
            mapper,
        }
    }

    fn column_property(&self, column: &Column, typeorm: &mut BTreeSet<&'static str>) -> Property {
        let property = self.naming.property_name(&column.column_name);
        let ts_type = self.mapper.ts_type(&column.data_type);
        let column_type = self.mapper.column_type(&column.data_type);

        if column.is_surrogate_id() {
            typeorm.insert("PrimaryGeneratedColumn");
            let decorator = if column.data_type.eq_ignore_ascii_case("uuid") {
                Decorator::new("PrimaryGeneratedColumn").string_arg("uuid")
            } else {
                Decorator::new("PrimaryGeneratedColumn")
            };
            return Property::new(property, ts_type).decorator(decorator);
        }

        let options = JsObject::new()
            .string("name", &column.column_name)
            .string("type", column_type);

        if column.is_audit() {
            let decorator = match column.column_name.as_str() {
                "created_at" => "CreateDateColumn",
                "updated_at" => "UpdateDateColumn",
                _ => "DeleteDateColumn",
            };
            typeorm.insert(decorator);
            let options = options.raw_if(column.is_nullable, "nullable", "true");
            return Property::new(property, ts_type)
                .decorator(Decorator::new(decorator).object_arg(options));
        }

        if column.is_primary_key {
            typeorm.insert("PrimaryColumn");
            return Property::new(property, ts_type)
                .decorator(Decorator::new("PrimaryColumn").object_arg(options));
        }

        typeorm.insert("Column");
        let options = options
            .raw_if(column.is_nullable, "nullable", "true")
            .raw_opt(
                "length",
                column.character_maximum_length.map(|l| l.to_string()),
            )
            .raw_opt(
                "default",
                column_default(column).map(|d| format!("() => {}", ts_string(d))),
            );

        let mut prop = Property::new(property, ts_type);
        if column.is_public() {
            let description = column
                .column_comment
                .as_deref()
                .unwrap_or(&column.column_name);
            prop = prop.decorator(
                Decorator::new("ApiProperty").object_arg(
                    JsObject::new()
                        .string("description", description)
                        .raw_if(column.is_nullable, "required", "false"),
                ),
            );
        }
        prop.decorator(Decorator::new("Column").object_arg(options))
    }

    fn relation_property(
        &self,
        relation: &RelationView<'_>,
        typeorm: &mut BTreeSet<&'static str>,
    ) -> Property {
        let target = relation.target.entity();
        let kind = relation.relation.relation_type;
        typeorm.insert(kind.as_str());

        let mut decorator = Decorator::new(kind.as_str()).arg(format!("() => {}", target));
        if kind == RelationType::OneToMany {
            decorator = decorator.arg(format!(
                "(related) => related.{}",
                self.view.names.variable
            ));
        }

        let prop = Property::new(
            &relation.property,
            if relation.is_collection() {
                format!("{}[]", target)
            } else {
                target
            },
        )
        .decorator(decorator);

        match kind {
            RelationType::ManyToOne | RelationType::OneToOne => {
                typeorm.insert("JoinColumn");
                prop.decorator(Decorator::new("JoinColumn").object_arg(
                    JsObject::new().string("name", &relation.relation.column_name),
                ))
            }
            RelationType::ManyToMany => {
                typeorm.insert("JoinTable");
                prop.decorator(Decorator::new("JoinTable"))
            }
            RelationType::OneToMany => prop,
        }
    }

    fn class(&self, typeorm: &mut BTreeSet<&'static str>) -> Class {
        let table = self.view.table;
        let mut class = Class::new(self.view.names.entity())
            .decorator(Decorator::new("Entity").string_arg(&table.table_name));

        for column in &table.columns {
            let property = match self
                .view
                .relations
                .iter()
                .find(|r| r.relation.column_name == column.column_name)
            {
                Some(relation) => {
                    // A key that is also a foreign key keeps its primary column.
                    if column.is_primary_key {
                        class = class.property(self.column_property(column, typeorm));
                    }
                    self.relation_property(relation, typeorm)
                }
                None => self.column_property(column, typeorm),
            };
            class = class.property(property);
        }

        // Relations declared without a backing column in the column list.
        for relation in &self.view.relations {
            if table.find_column(&relation.relation.column_name).is_none() {
                class = class.property(self.relation_property(relation, typeorm));
            }
        }

        typeorm.insert("Entity");
        class
    }
}

/// A column default expressed as SQL, or `None` for sequence-backed values.
fn column_default(column: &Column) -> Option<&str> {
    column
        .column_default
        .as_deref()
        .filter(|d| !d.starts_with("nextval("))
}

impl GeneratedFile for EntityFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        app_dir(base)
            .join("entities")
            .join(format!("{}.entity.ts", self.view.names.slug))
    }

    fn render(&self) -> String {
        let mut typeorm = BTreeSet::new();
        let class = self.class(&mut typeorm);

        let mut file = CodeFile::new().import(Import::new("typeorm").named_all(typeorm));
        if !self.view.fields.is_empty() {
            file = file.import(Import::new("@nestjs/swagger").named("ApiProperty"));
        }
        for related in self.view.related_entities() {
            file = file.import(
                Import::new(format!("./{}.entity", related.slug)).named(related.entity()),
            );
        }

        file.add(class).render()
    }
}
