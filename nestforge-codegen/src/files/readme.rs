//! README generator with a data dictionary.

use std::path::{Path, PathBuf};

use nestforge_core::GeneratedFile;
use nestforge_schema::{Column, SchemaModel, Table};

/// `README.md`: title, diagram and one section per table.
pub struct ReadmeFile<'a> {
    model: &'a SchemaModel,
}

impl<'a> ReadmeFile<'a> {
    pub fn new(model: &'a SchemaModel) -> Self {
        Self { model }
    }

    fn table_section(table: &Table) -> String {
        let mut out = format!("### `{}`\n\n", table.table_name);
        out.push_str("| Column | Type | Nullable | Comment |\n");
        out.push_str("|--------|------|----------|---------|\n");
        for column in &table.columns {
            out.push_str(&column_row(column));
        }

        if !table.relations.is_empty() {
            out.push_str("\n**Relations**\n\n");
            for relation in &table.relations {
                out.push_str(&format!(
                    "- `{}` → `{}.{}` ({})\n",
                    relation.column_name,
                    relation.foreign_table_name,
                    relation.foreign_column_name,
                    relation.relation_type.as_str()
                ));
            }
        }
        out
    }
}

fn column_row(column: &Column) -> String {
    let ty = match column.character_maximum_length {
        Some(length) => format!("{}({})", column.data_type, length),
        None => column.data_type.clone(),
    };
    let mut name = format!("`{}`", column.column_name);
    if column.is_primary_key {
        name.push_str(" (PK)");
    }
    format!(
        "| {} | {} | {} | {} |\n",
        name,
        ty,
        if column.is_nullable { "yes" } else { "no" },
        column
            .column_comment
            .as_deref()
            .map(escape_cell)
            .unwrap_or_default()
    )
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

impl GeneratedFile for ReadmeFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("README.md")
    }

    fn render(&self) -> String {
        let mut out = format!("# {}\n\n", self.model.project_name);
        out.push_str(&format!(
            "NestJS service generated from the `{}` database.\n\n",
            self.model.database_name
        ));
        out.push_str("## Diagram\n\n![Diagram](public/diagram.png)\n\n");
        out.push_str("## Data dictionary\n");
        for table in self.model.tables() {
            out.push('\n');
            out.push_str(&Self::table_section(table));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use nestforge_schema::{Relation, RelationType};

    use super::*;

    #[test]
    fn test_readme_dictionary() {
        let model = SchemaModel::new(
            "opt_db",
            vec![
                Table::new("tb_optin")
                    .column(Column::new("id", "integer").primary_key())
                    .column(Column::new("label", "character varying").max_length(100).comment("Shown | to users")),
                Table::new("tb_optout")
                    .column(Column::new("optin_id", "integer").nullable())
                    .relation(Relation::new("optin_id", "tb_optin", "id", RelationType::ManyToOne)),
            ],
        );

        insta::assert_snapshot!(ReadmeFile::new(&model).render(), @r"
        # OptDb

        NestJS service generated from the `opt_db` database.

        ## Diagram

        ![Diagram](public/diagram.png)

        ## Data dictionary

        ### `tb_optin`

        | Column | Type | Nullable | Comment |
        |--------|------|----------|---------|
        | `id` (PK) | integer | no |  |
        | `label` | character varying(100) | no | Shown \| to users |

        ### `tb_optout`

        | Column | Type | Nullable | Comment |
        |--------|------|----------|---------|
        | `optin_id` | integer | yes |  |

        **Relations**

        - `optin_id` → `tb_optin.id` (ManyToOne)
        ");
    }
}
