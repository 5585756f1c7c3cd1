//! Reruns over the same model must leave every file byte-identical.

use std::{collections::BTreeMap, path::Path};

use nestforge_codegen::{Component, Generator, ProjectSettings, files::scaffold_files};
use nestforge_core::GeneratedFile;
use nestforge_schema::{Column, Relation, RelationType, SchemaModel, Table};
use tempfile::TempDir;

fn model() -> SchemaModel {
    SchemaModel::new(
        "shop",
        vec![
            Table::new("tb_customer")
                .column(Column::new("id", "integer").primary_key())
                .column(Column::new("external_id", "uuid"))
                .column(Column::new("email", "character varying").max_length(255))
                .column(Column::new("deleted_at", "timestamp with time zone").nullable()),
            Table::new("tb_order")
                .column(Column::new("id", "integer").primary_key())
                .column(Column::new("external_id", "uuid"))
                .column(Column::new("customer_id", "integer"))
                .column(Column::new("total", "numeric"))
                .relation(Relation::new(
                    "customer_id",
                    "tb_customer",
                    "id",
                    RelationType::ManyToOne,
                )),
        ],
    )
}

fn snapshot(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<String, Vec<u8>>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_string_lossy().into_owned();
                out.insert(rel, std::fs::read(&path).unwrap());
            }
        }
    }
    let mut out = BTreeMap::new();
    walk(dir, dir, &mut out);
    out
}

#[test]
fn test_rerun_is_byte_identical() {
    let temp = TempDir::new().unwrap();
    let model = model();
    let settings = ProjectSettings::default();
    let generator = Generator::new(&model, &settings);

    let first = generator.generate(&Component::ALL, temp.path()).unwrap();
    let before = snapshot(temp.path());

    let second = generator.generate(&Component::ALL, temp.path()).unwrap();
    let after = snapshot(temp.path());

    assert_eq!(before, after);
    assert!(second.written.is_empty(), "rewritten: {:?}", second.written);
    assert_eq!(second.unchanged.len(), first.written.len());
}

#[test]
fn test_preview_matches_written_text() {
    let temp = TempDir::new().unwrap();
    let model = model();
    let settings = ProjectSettings::default();
    let generator = Generator::new(&model, &settings);

    generator.generate(&Component::ALL, temp.path()).unwrap();
    for file in generator.preview(&Component::ALL) {
        if file.path.ends_with(".png") {
            continue;
        }
        let on_disk = std::fs::read_to_string(temp.path().join(&file.path)).unwrap();
        assert_eq!(on_disk, file.content, "{} differs from preview", file.path);
    }
}

#[test]
fn test_scaffold_survives_regeneration() {
    let temp = TempDir::new().unwrap();
    for file in scaffold_files() {
        file.write(temp.path()).unwrap();
    }
    let edited = temp.path().join("src/app/health/health.service.ts");
    std::fs::write(&edited, "// customised").unwrap();

    let model = model();
    let settings = ProjectSettings::default();
    Generator::new(&model, &settings)
        .generate(&Component::ALL, temp.path())
        .unwrap();
    for file in scaffold_files() {
        file.write(temp.path()).unwrap();
    }

    assert_eq!(std::fs::read_to_string(edited).unwrap(), "// customised");
}
