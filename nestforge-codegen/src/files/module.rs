//! Per-table NestJS module generator.

use std::path::{Path, PathBuf};

use nestforge_core::GeneratedFile;

use super::table_file;
use crate::{
    ast::{Import, JsArray, JsObject},
    builder::CodeFragment,
    code_file::CodeFile,
    view::EntityNames,
};

/// `src/app/<slug>/<slug>.module.ts`.
pub struct ModuleFile {
    names: EntityNames,
}

impl ModuleFile {
    pub fn new(names: EntityNames) -> Self {
        Self { names }
    }
}

impl GeneratedFile for ModuleFile {
    fn path(&self, base: &Path) -> PathBuf {
        table_file(base, &self.names, "module")
    }

    fn render(&self) -> String {
        let names = &self.names;
        let metadata = JsObject::new()
            .array("imports", JsArray::new().raw("JwtAuthGuardModule"))
            .array("controllers", JsArray::new().raw(names.controller()))
            .array("providers", JsArray::new().raw(names.service()))
            .array("exports", JsArray::new().raw(names.service()));

        CodeFile::new()
            .import(Import::new("@nestjs/common").named("Module"))
            .import(Import::new("../middleware/jwt-auth.guard.module").named("JwtAuthGuardModule"))
            .import(Import::new(names.local_import("controller")).named(names.controller()))
            .import(Import::new(names.local_import("service")).named(names.service()))
            .add(vec![
                metadata.to_block("@Module(", ")"),
                CodeFragment::line(format!("export class {} {{}}", names.module())),
            ])
            .render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::NEST_NAMING;

    #[test]
    fn test_module_file() {
        let file = ModuleFile::new(EntityNames::new("tb_optin", &NEST_NAMING));

        assert_eq!(
            file.path(Path::new("build")),
            PathBuf::from("build/src/app/optin/optin.module.ts")
        );
        insta::assert_snapshot!(file.render(), @r"
        import { Module } from '@nestjs/common';
        import { JwtAuthGuardModule } from '../middleware/jwt-auth.guard.module';
        import { OptinController } from './optin.controller';
        import { OptinService } from './optin.service';

        @Module({
          imports: [JwtAuthGuardModule],
          controllers: [OptinController],
          providers: [OptinService],
          exports: [OptinService],
        })
        export class OptinModule {}
        ");
    }
}
