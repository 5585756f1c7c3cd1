//! NestJS controller generator.

use std::path::{Path, PathBuf};

use nestforge_core::GeneratedFile;

use super::table_file;
use crate::{
    ast::{Class, Decorator, Import, JsArray, JsObject, Method, Param, ts_string},
    builder::CodeFragment,
    code_file::CodeFile,
    view::EntityNames,
};

/// Postgres and MySQL codes for a unique-constraint violation.
const UNIQUE_VIOLATION: &str = "error.code === '23505' || error.code === 'ER_DUP_ENTRY'";

/// `src/app/<slug>/<slug>.controller.ts`: REST routes guarded by JWT.
pub struct ControllerFile {
    names: EntityNames,
}

impl ControllerFile {
    pub fn new(names: EntityNames) -> Self {
        Self { names }
    }

    fn service_field(&self) -> String {
        format!("{}Service", self.names.variable)
    }

    fn call(&self, expr: &str) -> String {
        format!("this.{}.{}", self.service_field(), expr)
    }

    fn operation(summary: &str) -> Decorator {
        Decorator::new("ApiOperation").object_arg(JsObject::new().string("summary", summary))
    }

    fn response(status: u16, description: &str, ty: Option<String>) -> Decorator {
        Decorator::new("ApiResponse").object_arg(
            JsObject::new()
                .raw("status", status.to_string())
                .string("description", description)
                .raw_opt("type", ty),
        )
    }

    fn route_method(&self, name: &str, verb: &str, path: Option<&str>) -> Method {
        let route = match path {
            Some(p) => Decorator::new(verb).string_arg(p),
            None => Decorator::new(verb),
        };
        Method::new(name)
            .decorator(route)
            .decorator(Decorator::new("UseGuards").arg("JwtAuthGuard"))
    }

    fn external_id_param() -> Param {
        Param::new("externalId", "string")
            .decorator(Decorator::new("Param").string_arg("externalId"))
    }

    fn body_param(&self) -> Param {
        Param::new("dto", self.names.persist_dto()).decorator(Decorator::new("Body"))
    }

    /// `try { return await <call>; } catch (error) { <handler> }`
    fn guarded(&self, call: &str, returns: bool, handler: Vec<CodeFragment>) -> Vec<CodeFragment> {
        let statement = if returns {
            format!("return await {};", self.call(call))
        } else {
            format!("await {};", self.call(call))
        };
        vec![
            CodeFragment::block("try {", vec![CodeFragment::line(statement)], None),
            CodeFragment::braced("} catch (error) {", handler),
        ]
    }

    fn rethrow_not_found(&self, action: &str) -> Vec<CodeFragment> {
        vec![
            CodeFragment::braced(
                "if (error instanceof NotFoundException) {",
                vec![CodeFragment::line("throw error;")],
            ),
            CodeFragment::line(format!(
                "throw new InternalServerErrorException({});",
                ts_string(&format!("Failed to {} {}", action, self.names.slug))
            )),
        ]
    }

    fn create(&self) -> Method {
        let stem = &self.names.stem;
        let handler = vec![
            CodeFragment::braced(
                format!("if ({}) {{", UNIQUE_VIOLATION),
                vec![CodeFragment::line(format!(
                    "throw new BadRequestException({});",
                    ts_string(&format!("{} already exists", stem))
                ))],
            ),
            CodeFragment::line(format!(
                "throw new InternalServerErrorException({});",
                ts_string(&format!("Failed to create {}", self.names.slug))
            )),
        ];
        self.route_method("create", "Post", None)
            .decorator(Self::operation(&format!("Create a {}", self.names.slug)))
            .decorator(Self::response(
                201,
                "Created",
                Some(self.names.query_dto()),
            ))
            .decorator(Self::response(
                400,
                &format!("Invalid data or {} already exists", stem),
                None,
            ))
            .async_()
            .param(self.body_param())
            .returns(format!("Promise<{}>", self.names.query_dto()))
            .body(self.guarded("create(dto)", true, handler))
    }

    fn find_by_external_id(&self) -> Method {
        self.route_method("findByExternalId", "Get", Some(":externalId"))
            .decorator(Self::operation(&format!(
                "Find a {} by external id",
                self.names.slug
            )))
            .decorator(Self::response(200, "Found", Some(self.names.query_dto())))
            .decorator(Self::response(404, &format!("{} not found", self.names.stem), None))
            .async_()
            .param(Self::external_id_param())
            .returns(format!("Promise<{}>", self.names.query_dto()))
            .body_line(format!(
                "return await {};",
                self.call("findByExternalId(externalId)")
            ))
    }

    fn find_all(&self) -> Method {
        self.route_method("findAll", "Get", None)
            .decorator(Self::operation(&format!("List every {}", self.names.slug)))
            .decorator(Self::response(
                200,
                "Listed",
                Some(JsArray::new().raw(self.names.query_dto()).build()),
            ))
            .async_()
            .returns(format!("Promise<{}[]>", self.names.query_dto()))
            .body_line(format!("return await {};", self.call("findAll()")))
    }

    fn update_by_external_id(&self) -> Method {
        self.route_method("updateByExternalId", "Put", Some(":externalId"))
            .decorator(Self::operation(&format!(
                "Update a {} by external id",
                self.names.slug
            )))
            .decorator(Self::response(200, "Updated", Some(self.names.query_dto())))
            .decorator(Self::response(404, &format!("{} not found", self.names.stem), None))
            .async_()
            .param(Self::external_id_param())
            .param(self.body_param())
            .returns(format!("Promise<{}>", self.names.query_dto()))
            .body(self.guarded(
                "updateByExternalId(externalId, dto)",
                true,
                self.rethrow_not_found("update"),
            ))
    }

    fn delete_by_external_id(&self) -> Method {
        self.route_method("deleteByExternalId", "Delete", Some(":externalId"))
            .decorator(Self::operation(&format!(
                "Delete a {} by external id",
                self.names.slug
            )))
            .decorator(Self::response(204, "Deleted", None))
            .decorator(Self::response(404, &format!("{} not found", self.names.stem), None))
            .async_()
            .param(Self::external_id_param())
            .returns("Promise<void>")
            .body(self.guarded(
                "deleteByExternalId(externalId)",
                false,
                self.rethrow_not_found("delete"),
            ))
    }

    fn class(&self) -> Class {
        Class::new(self.names.controller())
            .decorator(Decorator::new("ApiTags").string_arg(&self.names.slug))
            .decorator(Decorator::new("ApiBearerAuth").string_arg("access_token"))
            .decorator(Decorator::new("Controller").string_arg(&self.names.slug))
            .method(
                Method::constructor().param(
                    Param::new(self.service_field(), self.names.service())
                        .modifiers("private readonly"),
                ),
            )
            .method(self.create())
            .method(self.find_all())
            .method(self.find_by_external_id())
            .method(self.update_by_external_id())
            .method(self.delete_by_external_id())
    }
}

impl GeneratedFile for ControllerFile {
    fn path(&self, base: &Path) -> PathBuf {
        table_file(base, &self.names, "controller")
    }

    fn render(&self) -> String {
        CodeFile::new()
            .import(Import::new("@nestjs/common").named_all([
                "BadRequestException",
                "Body",
                "Controller",
                "Delete",
                "Get",
                "InternalServerErrorException",
                "NotFoundException",
                "Param",
                "Post",
                "Put",
                "UseGuards",
            ]))
            .import(Import::new("@nestjs/swagger").named_all([
                "ApiBearerAuth",
                "ApiOperation",
                "ApiResponse",
                "ApiTags",
            ]))
            .import(Import::new(self.names.local_import("service")).named(self.names.service()))
            .import(
                Import::new(self.names.local_import("dto"))
                    .named_all([self.names.persist_dto(), self.names.query_dto()]),
            )
            .import(Import::new("../middleware/jwt-auth.guard").named("JwtAuthGuard"))
            .add(self.class())
            .render()
    }
}
