use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// A file produced by a generator.
///
/// Implementors only describe where the file goes and what it contains;
/// the write contract (parent directory creation, overwrite policy) is
/// shared.
pub trait GeneratedFile {
    /// Destination under `base`, the project output directory.
    fn path(&self, base: &Path) -> PathBuf;

    fn rules(&self) -> FileRules {
        FileRules::default()
    }

    fn render(&self) -> String;

    /// Render binary content. Text files use [`GeneratedFile::render`].
    fn render_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.render().into_bytes())
    }

    /// Whether the written bytes differ from [`GeneratedFile::render`].
    fn is_binary(&self) -> bool {
        false
    }

    /// Write under `base` following [`GeneratedFile::rules`].
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);
        write_with_rules(&path, &self.rules(), || self.render_bytes())
    }
}

fn write_with_rules(
    path: &Path,
    rules: &FileRules,
    content: impl FnOnce() -> Result<Vec<u8>>,
) -> Result<WriteResult> {
    match rules.overwrite {
        Overwrite::Always => {
            let bytes = content()?;
            if std::fs::read(path).is_ok_and(|existing| existing == bytes) {
                return Ok(WriteResult::Unchanged);
            }
            write_file(path, &bytes)?;
            Ok(WriteResult::Written)
        }
        Overwrite::IfMissing => {
            if path.exists() {
                Ok(WriteResult::Skipped)
            } else {
                write_file(path, &content()?)?;
                Ok(WriteResult::Written)
            }
        }
    }
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write {}", path.display()))
}

/// What a write did on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// Created or rewritten.
    Written,
    /// Content on disk already matched
    Unchanged,
    /// Left alone: create-once file already present.
    Skipped,
}

/// A file with fixed content, used for static scaffold files.
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
    rules: FileRules,
}

impl File {
    /// Relative to the output directory; overwritten on every run unless
    /// [`File::if_missing`] is set.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    /// Only create the file when it does not exist yet.
    pub fn if_missing(mut self) -> Self {
        self.rules = FileRules::create_once();
        self
    }

    /// Path relative to the output directory.
    pub fn relative_path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl GeneratedFile for File {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.path)
    }

    fn rules(&self) -> FileRules {
        self.rules.clone()
    }

    fn render(&self) -> String {
        self.content.clone()
    }
}

/// Write policy of a generated file.
#[derive(Debug, Clone, Default)]
pub struct FileRules {
    pub overwrite: Overwrite,
}

impl FileRules {
    /// Generated output, replaced on every run.
    pub fn always_overwrite() -> Self {
        Self {
            overwrite: Overwrite::Always,
        }
    }

    /// Scaffolding the user is expected to edit.
    pub fn create_once() -> Self {
        Self {
            overwrite: Overwrite::IfMissing,
        }
    }
}

/// Policy for a file that already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overwrite {
    /// Replace when the content differs.
    #[default]
    Always,
    /// Keep whatever is on disk.
    IfMissing,
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    struct Greeting(&'static str);

    impl GeneratedFile for Greeting {
        fn path(&self, base: &Path) -> PathBuf {
            base.join("src").join("greeting.ts")
        }

        fn render(&self) -> String {
            format!("export const greeting = \"{}\";\n", self.0)
        }
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("test.txt");

        write_file(&path, b"nested").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_generated_file_write_then_unchanged() {
        let temp = TempDir::new().unwrap();
        let file = Greeting("hi");

        assert_eq!(file.write(temp.path()).unwrap(), WriteResult::Written);
        assert_eq!(file.write(temp.path()).unwrap(), WriteResult::Unchanged);

        let content = fs::read_to_string(temp.path().join("src/greeting.ts")).unwrap();
        assert_eq!(content, "export const greeting = \"hi\";\n");
    }

    #[test]
    fn test_generated_file_overwrites_changed_content() {
        let temp = TempDir::new().unwrap();
        Greeting("hi").write(temp.path()).unwrap();

        let result = Greeting("bye").write(temp.path()).unwrap();

        assert_eq!(result, WriteResult::Written);
        let content = fs::read_to_string(temp.path().join("src/greeting.ts")).unwrap();
        assert!(content.contains("bye"));
    }

    #[test]
    fn test_file_if_missing_creates_new() {
        let temp = TempDir::new().unwrap();
        let file = File::new("tsconfig.json", "{}").if_missing();

        assert_eq!(file.write(temp.path()).unwrap(), WriteResult::Written);
        assert_eq!(
            fs::read_to_string(temp.path().join("tsconfig.json")).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_file_if_missing_skips_existing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("tsconfig.json"), "original").unwrap();

        let file = File::new("tsconfig.json", "should not write").if_missing();

        assert_eq!(file.write(temp.path()).unwrap(), WriteResult::Skipped);
        assert_eq!(
            fs::read_to_string(temp.path().join("tsconfig.json")).unwrap(),
            "original"
        );
    }

    #[test]
    fn test_concurrent_parent_creation_is_tolerated() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().to_path_buf();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let base = base.clone();
                std::thread::spawn(move || {
                    File::new(format!("src/app/shared/{}.ts", i), "x")
                        .write(&base)
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), WriteResult::Written);
        }
    }
}
