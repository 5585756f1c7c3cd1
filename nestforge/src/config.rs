//! Run configuration assembled from flags, environment and `.env`.

use std::path::{Path, PathBuf};

use clap::Args;
use eyre::{Result, eyre};
use nestforge_codegen::ProjectSettings;
use nestforge_core::{DatabaseEngine, to_kebab_case};
use nestforge_reader::ConnectionConfig;
use nestforge_schema::{DEFAULT_SCHEMA_FILE, SchemaModel};

/// Database connection flags. Each falls back to a `DB_*` variable.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Database host
    #[arg(short = 'h', long, env = "DB_HOST", default_value = "localhost")]
    pub host: String,

    /// Database port (defaults to the engine's port, 5432 for postgres)
    #[arg(short, long, env = "DB_PORT")]
    pub port: Option<u16>,

    /// Database name
    #[arg(short, long, env = "DB_NAME")]
    pub database: Option<String>,

    /// Database user
    #[arg(short, long, env = "DB_USER", default_value = "postgres")]
    pub user: String,

    /// Database password
    #[arg(short = 'P', long, alias = "pw", env = "DB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Database engine (postgres or mysql)
    #[arg(short = 't', long, alias = "dbType", env = "DB_TYPE", default_value = "postgres")]
    pub db_type: DatabaseEngine,
}

/// Where and what to generate.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output directory of the generated project
    #[arg(short, long, alias = "outputDir", default_value = "./build")]
    pub output_dir: PathBuf,

    /// Components to generate, comma-separated or repeated (all when omitted)
    #[arg(
        short = 'f',
        long,
        alias = "generate",
        short_alias = 'g',
        value_delimiter = ','
    )]
    pub components: Vec<String>,

    /// Application name used in package.json, .env and Swagger
    #[arg(short, long)]
    pub app: Option<String>,

    /// Schema document path, relative to the output directory
    #[arg(long, default_value = DEFAULT_SCHEMA_FILE)]
    pub schema_file: PathBuf,

    /// Number of components generated in parallel
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,
}

/// Post-processing switches.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct PostProcessArgs {
    /// Skip `npx prettier --write src`
    #[arg(long)]
    pub no_format: bool,

    /// Skip `npm install`
    #[arg(long)]
    pub no_install: bool,

    /// Skip copying static scaffold files
    #[arg(long)]
    pub no_scaffold: bool,
}

/// Which post-processing steps run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostProcessOptions {
    pub scaffold: bool,
    pub format: bool,
    pub install: bool,
}

impl From<PostProcessArgs> for PostProcessOptions {
    fn from(args: PostProcessArgs) -> Self {
        Self {
            scaffold: !args.no_scaffold,
            format: !args.no_format,
            install: !args.no_install,
        }
    }
}

/// Immutable settings for one run, passed by reference to every stage.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub engine: DatabaseEngine,
    pub host: String,
    pub port: u16,
    pub database: Option<String>,
    pub user: String,
    pub password: Option<String>,
    pub output_dir: PathBuf,
    pub app: Option<String>,
    pub components: Vec<String>,
    pub schema_file: PathBuf,
    pub jobs: usize,
    pub post: PostProcessOptions,
}

impl GeneratorConfig {
    pub fn new(conn: &ConnectionArgs, out: &OutputArgs, post: PostProcessArgs) -> Self {
        Self {
            engine: conn.db_type,
            host: conn.host.clone(),
            port: conn.port.unwrap_or(conn.db_type.default_port()),
            database: conn.database.clone().filter(|d| !d.is_empty()),
            user: conn.user.clone(),
            password: conn.password.clone(),
            output_dir: out.output_dir.clone(),
            app: out.app.clone(),
            components: out.components.clone(),
            schema_file: out.schema_file.clone(),
            jobs: out.jobs.max(1),
            post: post.into(),
        }
    }

    /// Schema document location; relative paths live under the output
    /// directory.
    pub fn schema_path(&self) -> PathBuf {
        if self.schema_file.is_absolute() {
            self.schema_file.clone()
        } else {
            self.output_dir.join(&self.schema_file)
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Connection for introspection. The database name is mandatory here.
    pub fn connection(&self) -> Result<ConnectionConfig> {
        let database = self
            .database
            .as_deref()
            .ok_or_else(|| eyre!("no database name given; pass --database or set DB_NAME"))?;
        let mut config = ConnectionConfig::new(&self.host, database)
            .engine(self.engine)
            .port(self.port)
            .user(&self.user);
        if let Some(password) = &self.password {
            config = config.password(password);
        }
        Ok(config)
    }

    /// Settings embedded in the generated project.
    ///
    /// The application name defaults to the kebab-cased database name.
    pub fn project_settings(&self, model: &SchemaModel) -> ProjectSettings {
        let app = self
            .app
            .clone()
            .unwrap_or_else(|| to_kebab_case(&model.database_name));
        ProjectSettings::new(app, self.engine)
            .host(&self.host)
            .port(self.port)
            .database(self.database.as_deref().unwrap_or(&model.database_name))
            .user(&self.user)
            .password(self.password.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    #[command(disable_help_flag = true)]
    struct TestCli {
        #[command(flatten)]
        conn: ConnectionArgs,
        #[command(flatten)]
        out: OutputArgs,
        #[command(flatten)]
        post: PostProcessArgs,
    }

    fn parse(args: &[&str]) -> GeneratorConfig {
        let cli = TestCli::try_parse_from(std::iter::once("nestforge").chain(args.iter().copied()))
            .unwrap();
        GeneratorConfig::new(&cli.conn, &cli.out, cli.post)
    }

    #[test]
    fn test_short_flags() {
        let config = parse(&[
            "-h", "db.internal", "-p", "6543", "-d", "opt", "-u", "app", "-P", "secret", "-t",
            "mysql", "-o", "out", "-a", "opt-service",
        ]);
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6543);
        assert_eq!(config.database.as_deref(), Some("opt"));
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.engine, DatabaseEngine::Mysql);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.app.as_deref(), Some("opt-service"));
    }

    #[test]
    fn test_aliases_and_component_lists() {
        let config = parse(&[
            "--dbType", "mysql", "--pw", "x", "--outputDir", "gen", "-g", "entities,dtos",
            "--generate", "main",
        ]);
        assert_eq!(config.engine, DatabaseEngine::Mysql);
        assert_eq!(config.password.as_deref(), Some("x"));
        assert_eq!(config.output_dir, PathBuf::from("gen"));
        assert_eq!(config.components, vec!["entities", "dtos", "main"]);
    }

    #[test]
    fn test_schema_path_under_output_dir() {
        let config = parse(&["-o", "build"]);
        assert_eq!(
            config.schema_path(),
            PathBuf::from("build").join(DEFAULT_SCHEMA_FILE)
        );
        assert_eq!(config.post, PostProcessOptions { scaffold: true, format: true, install: true });
    }

    fn output() -> OutputArgs {
        OutputArgs {
            output_dir: PathBuf::from("build"),
            components: Vec::new(),
            app: None,
            schema_file: PathBuf::from(DEFAULT_SCHEMA_FILE),
            jobs: 1,
        }
    }

    #[test]
    fn test_port_defaults_to_engine() {
        let conn = ConnectionArgs {
            db_type: DatabaseEngine::Mysql,
            ..Default::default()
        };
        let config = GeneratorConfig::new(&conn, &output(), PostProcessArgs::default());
        assert_eq!(config.port, 3306);

        let conn = ConnectionArgs::default();
        let config = GeneratorConfig::new(&conn, &output(), PostProcessArgs::default());
        assert_eq!(config.port, 5432);
    }

    #[test]
    fn test_connection_requires_database() {
        let conn = ConnectionArgs {
            host: "localhost".into(),
            database: None,
            ..Default::default()
        };
        let config = GeneratorConfig::new(&conn, &output(), PostProcessArgs::default());
        assert!(config.connection().is_err());

        let conn = ConnectionArgs {
            database: Some(String::new()),
            ..conn
        };
        let config = GeneratorConfig::new(&conn, &output(), PostProcessArgs::default());
        assert!(config.connection().is_err());

        let config = parse(&["-d", "shop", "-P", "pw"]);
        let conn = config.connection().unwrap();
        assert_eq!(conn.database, "shop");
        assert_eq!(conn.password.as_deref(), Some("pw"));
    }

    #[test]
    fn test_project_settings_default_app_name() {
        let config = parse(&["--no-install"]);
        let model = SchemaModel::new("opt_db", Vec::new());
        let settings = config.project_settings(&model);
        assert_eq!(settings.app_name, "opt-db");
        assert!(!config.post.install);
    }
}
