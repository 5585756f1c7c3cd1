//! Application entry point generator.

use std::path::{Path, PathBuf};

use nestforge_core::GeneratedFile;

use crate::{
    ast::{Import, JsObject, ts_string},
    builder::CodeFragment,
    code_file::CodeFile,
};

/// `src/main.ts`: bootstrap with CORS, Swagger, a TCP microservice and the
/// data source.
pub struct MainTs {
    app_name: String,
}

impl MainTs {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    fn bootstrap(&self) -> CodeFragment {
        let microservice = JsObject::new()
            .raw("transport", "Transport.TCP")
            .object(
                "options",
                JsObject::new()
                    .raw("retryAttempts", "5")
                    .raw("retryDelay", "3000"),
            );
        let cors = JsObject::new()
            .string(
                "allowedHeaders",
                "Authorization, X-Requested-With, Content-Type, Accept",
            )
            .string("origin", "*")
            .string("methods", "GET,HEAD,PUT,PATCH,POST,DELETE,OPTIONS")
            .raw("credentials", "true");

        let swagger = vec![
            CodeFragment::line("const config = new DocumentBuilder()"),
            CodeFragment::indent(vec![
                CodeFragment::line(".setTitle(name)"),
                CodeFragment::line(".setDescription(`${name} API`)"),
                CodeFragment::line(".setVersion('1.0')"),
                CodeFragment::line(
                    ".addBearerAuth({ type: 'http', scheme: 'bearer', bearerFormat: 'JWT' }, 'access_token')",
                ),
                CodeFragment::line(".build();"),
            ]),
            CodeFragment::line("const document = SwaggerModule.createDocument(app, config);"),
            CodeFragment::line("SwaggerModule.setup('api', app, document);"),
        ];

        CodeFragment::braced(
            "async function bootstrap(): Promise<void> {",
            vec![
                CodeFragment::line("const app = await NestFactory.create(AppModule);"),
                CodeFragment::line("const env = app.get(EnvironmentService).getEnv();"),
                CodeFragment::line(format!(
                    "const name = env.get<string>('MICROSERVICE_NAME') || {};",
                    ts_string(&self.app_name)
                )),
                CodeFragment::blank(),
                microservice.to_block("app.connectMicroservice<MicroserviceOptions>(", ");"),
                cors.to_block("app.enableCors(", ");"),
                CodeFragment::blank(),
                CodeFragment::line("await app.get(DataSourceService).getDataSource().initialize();"),
                CodeFragment::line("logger.log('Data source initialized');"),
                CodeFragment::blank(),
                CodeFragment::braced(
                    "if (process.env.NODE_ENV !== 'production') {",
                    swagger,
                ),
                CodeFragment::blank(),
                CodeFragment::line("await app.startAllMicroservices();"),
                CodeFragment::line("await app.listen(process.env.PORT || env.get<string>('PORT'));"),
                CodeFragment::line("logger.log(`${name} is running on ${await app.getUrl()}`);"),
            ],
        )
    }
}

impl GeneratedFile for MainTs {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src").join("main.ts")
    }

    fn render(&self) -> String {
        CodeFile::new()
            .import(Import::new("reflect-metadata"))
            .import(Import::new("@nestjs/common").named("Logger"))
            .import(Import::new("@nestjs/core").named("NestFactory"))
            .import(
                Import::new("@nestjs/microservices")
                    .named_all(["MicroserviceOptions", "Transport"]),
            )
            .import(Import::new("@nestjs/swagger").named_all(["DocumentBuilder", "SwaggerModule"]))
            .import(Import::new("./app/app.module").named("AppModule"))
            .import(Import::new("./app/config/datasource.service").named("DataSourceService"))
            .import(Import::new("./app/config/environment.service").named("EnvironmentService"))
            .add(CodeFragment::line("const logger = new Logger('Bootstrap');"))
            .add(self.bootstrap())
            .add(CodeFragment::block(
                "bootstrap().catch((error) => {",
                vec![
                    CodeFragment::line("logger.error('Application failed to start', error);"),
                    CodeFragment::line("process.exit(1);"),
                ],
                Some("});".to_string()),
            ))
            .render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_bootstrap() {
        let out = MainTs::new("opt-service").render();
        assert!(out.starts_with("import 'reflect-metadata';\n"));
        assert!(out.contains("const name = env.get<string>('MICROSERVICE_NAME') || 'opt-service';"));
        assert!(out.contains("  app.connectMicroservice<MicroserviceOptions>({\n    transport: Transport.TCP,\n"));
        assert!(out.contains("SwaggerModule.setup('api', app, document);"));
        assert!(out.contains("await app.get(DataSourceService).getDataSource().initialize();"));
        assert!(out.ends_with("  process.exit(1);\n});\n"));
    }
}
