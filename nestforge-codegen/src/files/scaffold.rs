//! Static project files the generated sources depend on.
//!
//! These are written once and left alone afterwards, so edits made in the
//! generated project survive reruns.

use nestforge_core::File;

const JWT_AUTH_GUARD: &str = r#"import {
  CanActivate,
  ExecutionContext,
  Injectable,
  Logger,
  UnauthorizedException,
} from '@nestjs/common';
import { HttpService } from '@nestjs/axios';
import { firstValueFrom } from 'rxjs';
import { EnvironmentService } from '../config/environment.service';

@Injectable()
export class JwtAuthGuard implements CanActivate {
  private readonly logger: Logger = new Logger(JwtAuthGuard.name);

  constructor(
    private readonly httpService: HttpService,
    private readonly environmentService: EnvironmentService,
  ) {}

  async canActivate(context: ExecutionContext): Promise<boolean> {
    const request = context.switchToHttp().getRequest();
    const authorization: string | undefined = request.headers['authorization'];
    if (!authorization || !authorization.startsWith('Bearer ')) {
      throw new UnauthorizedException('Missing bearer token');
    }

    const endpoint = this.environmentService.getEnv().get<string>('ENDPOINT_SESSION_TOKEN');
    try {
      const response = await firstValueFrom(
        this.httpService.get(endpoint, { headers: { Authorization: authorization } }),
      );
      request.session = response.data;
      return true;
    } catch (error) {
      this.logger.warn(`Session verification failed: ${error.message}`);
      throw new UnauthorizedException('Invalid session');
    }
  }
}
"#;

const JWT_AUTH_GUARD_MODULE: &str = r#"import { Module } from '@nestjs/common';
import { HttpModule } from '@nestjs/axios';
import { JwtAuthGuard } from './jwt-auth.guard';

@Module({
  imports: [HttpModule],
  providers: [JwtAuthGuard],
  exports: [JwtAuthGuard, HttpModule],
})
export class JwtAuthGuardModule {}
"#;

const ENVIRONMENT_SERVICE: &str = r#"import { Injectable } from '@nestjs/common';
import { ConfigService } from '@nestjs/config';

@Injectable()
export class EnvironmentService {
  constructor(private readonly configService: ConfigService) {}

  getEnv(): ConfigService {
    return this.configService;
  }
}
"#;

const ENVIRONMENT_MODULE: &str = r#"import { Global, Module } from '@nestjs/common';
import { EnvironmentService } from './environment.service';

@Global()
@Module({
  providers: [EnvironmentService],
  exports: [EnvironmentService],
})
export class EnvironmentModule {}
"#;

const DATASOURCE_MODULE: &str = r#"import { Global, Module } from '@nestjs/common';
import { DataSourceService } from './datasource.service';

@Global()
@Module({
  providers: [DataSourceService],
  exports: [DataSourceService],
})
export class DataSourceModule {}
"#;

const HEALTH_SERVICE: &str = r#"import { Injectable, Logger } from '@nestjs/common';
import { DataSourceService } from '../config/datasource.service';

export interface HealthStatus {
  status: 'ok' | 'error';
  database: 'up' | 'down';
}

@Injectable()
export class HealthService {
  private readonly logger: Logger = new Logger(HealthService.name);

  constructor(private readonly dataSourceService: DataSourceService) {}

  async check(): Promise<HealthStatus> {
    try {
      await this.dataSourceService.getDataSource().query('SELECT 1');
      return { status: 'ok', database: 'up' };
    } catch (error) {
      this.logger.error(`Database check failed: ${error.message}`);
      return { status: 'error', database: 'down' };
    }
  }
}
"#;

const HEALTH_CONTROLLER: &str = r#"import { Controller, Get, ServiceUnavailableException } from '@nestjs/common';
import { ApiTags } from '@nestjs/swagger';
import { HealthService, HealthStatus } from './health.service';

@ApiTags('health')
@Controller('health')
export class HealthController {
  constructor(private readonly healthService: HealthService) {}

  @Get()
  async check(): Promise<HealthStatus> {
    const status = await this.healthService.check();
    if (status.status !== 'ok') {
      throw new ServiceUnavailableException(status);
    }
    return status;
  }
}
"#;

const HEALTH_MODULE: &str = r#"import { Module } from '@nestjs/common';
import { HealthController } from './health.controller';
import { HealthService } from './health.service';

@Module({
  controllers: [HealthController],
  providers: [HealthService],
})
export class HealthModule {}
"#;

const VERSION_CONTROLLER: &str = r#"import { Controller, Get } from '@nestjs/common';
import { ApiTags } from '@nestjs/swagger';

@ApiTags('version')
@Controller('version')
export class VersionController {
  @Get()
  version(): { name: string; version: string } {
    return {
      name: process.env.MICROSERVICE_NAME || process.env.npm_package_name || 'unknown',
      version: process.env.npm_package_version || 'unknown',
    };
  }
}
"#;

const VERSION_MODULE: &str = r#"import { Module } from '@nestjs/common';
import { VersionController } from './version.controller';

@Module({
  controllers: [VersionController],
})
export class VersionModule {}
"#;

const TSCONFIG: &str = r#"{
  "compilerOptions": {
    "module": "commonjs",
    "declaration": true,
    "removeComments": true,
    "emitDecoratorMetadata": true,
    "experimentalDecorators": true,
    "allowSyntheticDefaultImports": true,
    "target": "ES2021",
    "sourceMap": true,
    "outDir": "./dist",
    "baseUrl": "./",
    "incremental": true,
    "skipLibCheck": true,
    "strictNullChecks": false,
    "noImplicitAny": false,
    "strictBindCallApply": false,
    "forceConsistentCasingInFileNames": false,
    "noFallthroughCasesInSwitch": false
  }
}
"#;

const NEST_CLI: &str = r#"{
  "$schema": "https://json.schemastore.org/nest-cli",
  "collection": "@nestjs/schematics",
  "sourceRoot": "src",
  "compilerOptions": {
    "deleteOutDir": true
  }
}
"#;

const PRETTIERRC: &str = r#"{
  "singleQuote": true,
  "trailingComma": "all",
  "printWidth": 100
}
"#;

const GITIGNORE: &str = r#"# Dependencies
node_modules/

# Build output
dist/

# Environment
.env
.env.test

# Logs
*.log
"#;

const SCAFFOLD: &[(&str, &str)] = &[
    ("src/app/middleware/jwt-auth.guard.ts", JWT_AUTH_GUARD),
    ("src/app/middleware/jwt-auth.guard.module.ts", JWT_AUTH_GUARD_MODULE),
    ("src/app/config/environment.service.ts", ENVIRONMENT_SERVICE),
    ("src/app/config/environment.module.ts", ENVIRONMENT_MODULE),
    ("src/app/config/datasource.module.ts", DATASOURCE_MODULE),
    ("src/app/health/health.service.ts", HEALTH_SERVICE),
    ("src/app/health/health.controller.ts", HEALTH_CONTROLLER),
    ("src/app/health/health.module.ts", HEALTH_MODULE),
    ("src/app/version/version.controller.ts", VERSION_CONTROLLER),
    ("src/app/version/version.module.ts", VERSION_MODULE),
    ("tsconfig.json", TSCONFIG),
    ("nest-cli.json", NEST_CLI),
    (".prettierrc", PRETTIERRC),
    (".gitignore", GITIGNORE),
];

/// Every static file, each created only when missing.
pub fn scaffold_files() -> Vec<File> {
    SCAFFOLD
        .iter()
        .map(|(path, content)| File::new(*path, *content).if_missing())
        .collect()
}

#[cfg(test)]
mod tests {
    use nestforge_core::{GeneratedFile, WriteResult};

    use super::*;

    #[test]
    fn test_scaffold_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let guard = dir.path().join("src/app/middleware/jwt-auth.guard.ts");
        std::fs::create_dir_all(guard.parent().unwrap()).unwrap();
        std::fs::write(&guard, "// edited").unwrap();

        let results: Vec<_> = scaffold_files()
            .iter()
            .map(|f| (f.relative_path().to_path_buf(), f.write(dir.path()).unwrap()))
            .collect();

        let guard_result = results
            .iter()
            .find(|(p, _)| p.ends_with("jwt-auth.guard.ts"))
            .map(|(_, r)| *r);
        assert_eq!(guard_result, Some(WriteResult::Skipped));
        assert_eq!(std::fs::read_to_string(&guard).unwrap(), "// edited");
        assert!(dir.path().join("src/app/health/health.module.ts").exists());
        assert!(dir.path().join(".prettierrc").exists());
    }

    #[test]
    fn test_modules_match_app_module_imports() {
        let paths: Vec<_> = scaffold_files()
            .iter()
            .map(|f| f.relative_path().to_string_lossy().into_owned())
            .collect();
        for module in [
            "src/app/config/environment.module.ts",
            "src/app/config/datasource.module.ts",
            "src/app/version/version.module.ts",
            "src/app/middleware/jwt-auth.guard.module.ts",
            "src/app/health/health.module.ts",
        ] {
            assert!(paths.iter().any(|p| p == module), "missing {}", module);
        }
    }
}
