//! NestJS service generator.

use std::path::{Path, PathBuf};

use nestforge_core::GeneratedFile;

use super::table_file;
use crate::{
    ast::{Class, Decorator, Import, JsObject, Method, Param, Property, ts_string},
    builder::CodeFragment,
    code_file::CodeFile,
    view::TableView,
};

/// `src/app/<slug>/<slug>.service.ts`: CRUD keyed by external id.
pub struct ServiceFile<'a> {
    view: TableView<'a>,
}

impl<'a> ServiceFile<'a> {
    pub fn new(view: TableView<'a>) -> Self {
        Self { view }
    }

    fn entity(&self) -> String {
        self.view.names.entity()
    }

    fn query_dto(&self) -> String {
        self.view.names.query_dto()
    }

    /// `{ where: { externalId }, relations: { optin: true } }`
    fn lookup(&self) -> String {
        let relations = self
            .view
            .owning_relations()
            .fold(JsObject::new(), |obj, r| obj.raw(&r.property, "true"));
        let mut query = JsObject::new().object("where", JsObject::new().shorthand("externalId"));
        if !relations.is_empty() {
            query = query.object("relations", relations);
        }
        query.build_inline()
    }

    fn log(&self, message: &str) -> CodeFragment {
        CodeFragment::line(format!("this.logger.log({});", message))
    }

    fn create(&self) -> Method {
        Method::new("create")
            .async_()
            .param(Param::new("dto", self.view.names.persist_dto()))
            .returns(format!("Promise<{}>", self.query_dto()))
            .body([
                self.log(&ts_string(&format!("Creating {}", self.view.names.slug))),
                CodeFragment::line(format!("const entity = new {}();", self.entity())),
                CodeFragment::line("await this.applyDTO(entity, dto);"),
                CodeFragment::line(format!(
                    "const saved = await this.repository({}).save(entity);",
                    self.entity()
                )),
                CodeFragment::line("return this.toDTO(saved);"),
            ])
    }

    fn find_by_external_id(&self) -> Method {
        Method::new("findByExternalId")
            .async_()
            .param(Param::new("externalId", "string"))
            .returns(format!("Promise<{}>", self.query_dto()))
            .body([
                self.log(&format!(
                    "`Finding {} ${{externalId}}`",
                    self.view.names.slug
                )),
                CodeFragment::line("return this.toDTO(await this.findEntity(externalId));"),
            ])
    }

    fn find_all(&self) -> Method {
        let relations = self
            .view
            .owning_relations()
            .fold(JsObject::new(), |obj, r| obj.raw(&r.property, "true"));
        let options = if relations.is_empty() {
            String::new()
        } else {
            JsObject::new().object("relations", relations).build_inline()
        };

        Method::new("findAll")
            .async_()
            .returns(format!("Promise<{}[]>", self.query_dto()))
            .body([
                self.log(&ts_string(&format!("Finding all {}", self.view.names.slug))),
                CodeFragment::line(format!(
                    "const entities = await this.repository({}).find({});",
                    self.entity(),
                    options
                )),
                CodeFragment::line("return entities.map((entity) => this.toDTO(entity));"),
            ])
    }

    fn update_by_external_id(&self) -> Method {
        Method::new("updateByExternalId")
            .async_()
            .param(Param::new("externalId", "string"))
            .param(Param::new("dto", self.view.names.persist_dto()))
            .returns(format!("Promise<{}>", self.query_dto()))
            .body([
                self.log(&format!(
                    "`Updating {} ${{externalId}}`",
                    self.view.names.slug
                )),
                CodeFragment::line("const entity = await this.findEntity(externalId);"),
                CodeFragment::line("await this.applyDTO(entity, dto);"),
                CodeFragment::line(format!(
                    "const saved = await this.repository({}).save(entity);",
                    self.entity()
                )),
                CodeFragment::line("return this.toDTO(saved);"),
            ])
    }

    fn delete_by_external_id(&self) -> Method {
        let operation = if self.view.has_soft_delete() {
            "softDelete"
        } else {
            "delete"
        };
        Method::new("deleteByExternalId")
            .async_()
            .param(Param::new("externalId", "string"))
            .returns("Promise<void>")
            .body([
                self.log(&format!(
                    "`Deleting {} ${{externalId}}`",
                    self.view.names.slug
                )),
                CodeFragment::line("const entity = await this.findEntity(externalId);"),
                CodeFragment::line(format!(
                    "await this.repository({}).{}({{ externalId: entity.externalId }});",
                    self.entity(),
                    operation
                )),
            ])
    }

    fn find_entity(&self) -> Method {
        Method::new("findEntity")
            .private()
            .async_()
            .param(Param::new("externalId", "string"))
            .returns(format!("Promise<{}>", self.entity()))
            .body([
                CodeFragment::line(format!(
                    "const entity = await this.repository({}).findOne({});",
                    self.entity(),
                    self.lookup()
                )),
                not_found_guard("entity", &self.view.names.stem),
                CodeFragment::line("return entity;"),
            ])
    }

    /// Copies public fields and resolves every `<rel>_eid` to its entity.
    fn apply_dto(&self) -> Method {
        let mut body: Vec<CodeFragment> = self
            .view
            .fields
            .iter()
            .map(|f| {
                CodeFragment::line(format!("entity.{} = dto.{};", f.property, f.name()))
            })
            .collect();

        for relation in self.view.owning_relations() {
            let variable = &relation.property;
            let lookup = JsObject::new()
                .object(
                    "where",
                    JsObject::new().raw("externalId", format!("dto.{}", relation.external_field)),
                )
                .build_inline();
            let resolve = vec![
                CodeFragment::line(format!(
                    "const {} = await this.repository({}).findOne({});",
                    variable,
                    relation.target.entity(),
                    lookup
                )),
                not_found_guard(variable, &relation.target.stem),
                CodeFragment::line(format!("entity.{} = {};", variable, variable)),
            ];
            if relation.nullable {
                // An omitted optional id clears the relation instead of matching any row.
                body.push(CodeFragment::block(
                    format!("if (dto.{}) {{", relation.external_field),
                    resolve,
                    Some("} else {".to_string()),
                ));
                body.push(CodeFragment::indent(vec![CodeFragment::line(format!(
                    "entity.{} = null;",
                    variable
                ))]));
                body.push(CodeFragment::line("}"));
            } else {
                body.extend(resolve);
            }
        }

        Method::new("applyDTO")
            .private()
            .async_()
            .param(Param::new("entity", self.entity()))
            .param(Param::new("dto", self.view.names.persist_dto()))
            .returns("Promise<void>")
            .body(body)
    }

    fn to_dto(&self) -> Method {
        let mut body = vec![CodeFragment::line(format!(
            "const dto = new {}();",
            self.query_dto()
        ))];
        body.extend(self.view.fields.iter().map(|f| {
            CodeFragment::line(format!("dto.{} = entity.{};", f.name(), f.property))
        }));
        body.extend(self.view.owning_relations().map(|r| {
            CodeFragment::line(format!(
                "dto.{} = entity.{}?.externalId;",
                r.external_field, r.property
            ))
        }));
        body.push(CodeFragment::line("return dto;"));

        Method::new("toDTO")
            .private()
            .param(Param::new("entity", self.entity()))
            .returns(self.query_dto())
            .body(body)
    }

    fn repository(&self) -> Method {
        Method::new("repository<T extends ObjectLiteral>")
            .private()
            .param(Param::new("target", "EntityTarget<T>"))
            .returns("Repository<T>")
            .body_line("return this.dataSourceService.getDataSource().getRepository(target);")
    }

    fn class(&self) -> Class {
        let service = self.view.names.service();
        Class::new(&service)
            .decorator(Decorator::new("Injectable"))
            .property(
                Property::new("logger", "Logger")
                    .modifiers("private readonly")
                    .initializer(format!("new Logger({}.name)", service)),
            )
            .method(
                Method::constructor().param(
                    Param::new("dataSourceService", "DataSourceService")
                        .modifiers("private readonly"),
                ),
            )
            .method(self.create())
            .method(self.find_by_external_id())
            .method(self.find_all())
            .method(self.update_by_external_id())
            .method(self.delete_by_external_id())
            .method(self.find_entity())
            .method(self.apply_dto())
            .method(self.to_dto())
            .method(self.repository())
    }
}

fn not_found_guard(variable: &str, stem: &str) -> CodeFragment {
    CodeFragment::braced(
        format!("if (!{}) {{", variable),
        vec![CodeFragment::line(format!(
            "throw new NotFoundException({});",
            ts_string(&format!("{} not found", stem))
        ))],
    )
}

impl GeneratedFile for ServiceFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        table_file(base, &self.view.names, "service")
    }

    fn render(&self) -> String {
        let names = &self.view.names;
        let mut file = CodeFile::new()
            .import(Import::new("@nestjs/common").named_all([
                "Injectable",
                "Logger",
                "NotFoundException",
            ]))
            .import(Import::new("typeorm").named_all(["EntityTarget", "ObjectLiteral", "Repository"]))
            .import(Import::new("../config/datasource.service").named("DataSourceService"))
            .import(Import::new(names.entity_import()).named(names.entity()))
            .import(
                Import::new(names.local_import("dto"))
                    .named_all([names.persist_dto(), names.query_dto()]),
            );

        for relation in self.view.owning_relations() {
            file = file.import(
                Import::new(relation.target.entity_import()).named(relation.target.entity()),
            );
        }

        file.add(self.class()).render()
    }
}
