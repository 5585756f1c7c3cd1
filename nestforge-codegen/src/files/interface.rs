//! DTO interface generator.

use std::path::{Path, PathBuf};

use nestforge_core::GeneratedFile;

use super::table_file;
use crate::{
    ast::{Interface, InterfaceField},
    code_file::CodeFile,
    view::TableView,
};

/// `src/app/<slug>/<slug>.interface.ts`: contracts the DTO classes implement.
pub struct InterfaceFile<'a> {
    view: TableView<'a>,
}

impl<'a> InterfaceFile<'a> {
    pub fn new(view: TableView<'a>) -> Self {
        Self { view }
    }

    fn interface(&self, name: String) -> Interface {
        let mut interface = Interface::new(name);
        for field in &self.view.fields {
            interface = interface.field_with(
                InterfaceField::new(field.name(), field.ts_type).optional(field.is_nullable()),
            );
        }
        for relation in self.view.owning_relations() {
            interface = interface.field_with(
                InterfaceField::new(&relation.external_field, "string")
                    .optional(relation.nullable),
            );
        }
        interface
    }
}

impl GeneratedFile for InterfaceFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        table_file(base, &self.view.names, "interface")
    }

    fn render(&self) -> String {
        CodeFile::new()
            .add(self.interface(self.view.names.query_interface()))
            .add(self.interface(self.view.names.persist_interface()))
            .render()
    }
}

#[cfg(test)]
mod tests {
    use nestforge_schema::{Column, Relation, RelationType, Table};

    use super::*;
    use crate::{naming::NEST_NAMING, type_mapper::TypeMapper};

    #[test]
    fn test_optout_interfaces() {
        let table = Table::new("tb_optout")
            .column(Column::new("id", "integer").primary_key())
            .column(Column::new("external_id", "uuid"))
            .column(Column::new("reason", "text").nullable())
            .column(Column::new("optin_id", "integer"))
            .relation(Relation::new(
                "optin_id",
                "tb_optin",
                "id",
                RelationType::ManyToOne,
            ));
        let view = TableView::new(&table, &NEST_NAMING, &TypeMapper::default());

        insta::assert_snapshot!(InterfaceFile::new(view).render(), @r"
        export interface IOptoutQueryDTO {
          external_id: string;
          reason?: string;
          optin_eid: string;
        }

        export interface IOptoutPersistDTO {
          external_id: string;
          reason?: string;
          optin_eid: string;
        }
        ");
    }
}
