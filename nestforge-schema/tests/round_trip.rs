use nestforge_schema::{Column, Relation, RelationType, SchemaModel, Table};
use tempfile::TempDir;

fn sample_model() -> SchemaModel {
    SchemaModel::new(
        "opt_service",
        vec![
            Table::new("tb_optin")
                .column(Column::new("id", "integer").primary_key())
                .column(Column::new("external_id", "uuid"))
                .column(Column::new("label", "character varying").max_length(100))
                .column(
                    Column::new("created_at", "timestamp without time zone")
                        .default_value("now()"),
                ),
            Table::new("tb_optout")
                .column(Column::new("id", "integer").primary_key())
                .column(Column::new("external_id", "uuid"))
                .column(Column::new("reason", "text").nullable().comment("Why"))
                .column(Column::new("optin_id", "integer"))
                .relation(Relation::new(
                    "optin_id",
                    "tb_optin",
                    "id",
                    RelationType::ManyToOne,
                )),
        ],
    )
}

#[test]
fn save_then_load_preserves_tables() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("db.reader.postgres.json");
    let model = sample_model();

    model.save(&path).unwrap();
    let loaded = SchemaModel::load(&path).unwrap();

    assert_eq!(loaded, model);
    let names: Vec<_> = loaded.schema[1]
        .columns
        .iter()
        .map(|c| c.column_name.as_str())
        .collect();
    assert_eq!(names, ["id", "external_id", "reason", "optin_id"]);
    assert_eq!(loaded.schema[1].relations, model.schema[1].relations);
}

#[test]
fn save_is_deterministic() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("schema.json");
    let model = sample_model();

    model.save(&path).unwrap();
    let first = std::fs::read(&path).unwrap();
    SchemaModel::load(&path).unwrap().save(&path).unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn document_shape_matches_contract() {
    let json = sample_model().to_json_string().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["databaseName"], "opt_service");
    assert_eq!(value["projectName"], "OptService");
    assert_eq!(value["schema"][1]["relations"][0]["relationType"], "ManyToOne");
    assert_eq!(
        value["schema"][0]["columns"][2]["characterMaximumLength"],
        100
    );
}
