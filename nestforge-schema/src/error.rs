use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for schema document operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("run 'nestforge introspect' to create the schema document"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    #[diagnostic(code(nestforge::write_error))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema document")]
    #[diagnostic(code(nestforge::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize schema document")]
    #[diagnostic(code(nestforge::serialize_error))]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate column '{column}' in table '{table}'")]
    #[diagnostic(
        code(nestforge::duplicate_column),
        help("column names must be unique within a table")
    )]
    DuplicateColumn {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared again here")]
        span: Option<SourceSpan>,
        table: String,
        column: String,
    },
}

impl Error {
    /// Create a parse error from a JSON error with source context
    pub fn parse(source: serde_json::Error, src: &str, filename: &str) -> Box<Self> {
        let span = line_col_to_offset(src, source.line(), source.column())
            .map(|offset| SourceSpan::from((offset, 1)));
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a duplicate column error, pointing at the repeated declaration
    pub fn duplicate_column(
        table: impl Into<String>,
        column: impl Into<String>,
        src: &str,
        filename: &str,
    ) -> Box<Self> {
        let column = column.into();
        let needle = format!("\"columnName\": \"{}\"", column);
        let span = src
            .match_indices(&needle)
            .nth(1)
            .map(|(offset, _)| SourceSpan::from((offset, needle.len())));
        Box::new(Error::DuplicateColumn {
            src: NamedSource::new(filename, src.to_string()),
            span,
            table: table.into(),
            column,
        })
    }
}

/// serde_json reports 1-based lines and columns; miette wants a byte offset.
fn line_col_to_offset(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let offset = line_start + column.saturating_sub(1);
    (offset <= src.len()).then_some(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_to_offset() {
        let src = "{\n  \"a\": 1\n}";
        assert_eq!(line_col_to_offset(src, 1, 1), Some(0));
        assert_eq!(line_col_to_offset(src, 2, 3), Some(4));
        assert_eq!(line_col_to_offset(src, 0, 0), None);
    }

    #[test]
    fn test_parse_error_has_span() {
        let src = "{\n  \"databaseName\": \n}";
        let err = serde_json::from_str::<serde_json::Value>(src).unwrap_err();
        let boxed = Error::parse(err, src, "schema.json");
        match *boxed {
            Error::Parse { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
