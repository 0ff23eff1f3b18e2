//! Error types.
//!
//! [`LoadError`] and [`ConfigError`] describe failures of the adapters;
//! [`RunError`] wraps every per-instance failure with the path of the
//! instance it belongs to.

use std::path::{Path, PathBuf};

use crate::models::Violation;
use crate::validation::ValidationError;

/// Failure while reading an instance.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The input could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input ended before a required field.
    #[error("line {line}: unexpected end of input while reading {field}")]
    UnexpectedEof { field: String, line: usize },

    /// A token is not a valid non-negative integer.
    #[error("line {line}: could not parse '{token}' as {field}")]
    Parse {
        field: String,
        token: String,
        line: usize,
    },

    /// A catalog references a book outside the book list.
    #[error("line {line}: library {library} references book {book}, but the instance has {book_count} books")]
    UnknownBook {
        library: usize,
        book: usize,
        book_count: usize,
        line: usize,
    },
}

/// Failure while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failure of one instance's pipeline.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("could not load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("{} is not a valid instance: {}", .path.display(), join(.errors))]
    Invalid {
        path: PathBuf,
        errors: Vec<ValidationError>,
    },

    #[error("schedule for {} breaks {} invariant(s): {}", .path.display(), .violations.len(), join_violations(.violations))]
    Audit {
        path: PathBuf,
        violations: Vec<Violation>,
    },

    #[error("could not write the schedule for {} to {}: {source}", .path.display(), .output.display())]
    Write {
        path: PathBuf,
        output: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("worker for {} panicked: {message}", .path.display())]
    Panicked { path: PathBuf, message: String },
}

impl RunError {
    /// Path of the instance that failed.
    pub fn path(&self) -> &Path {
        match self {
            RunError::Load { path, .. }
            | RunError::Invalid { path, .. }
            | RunError::Audit { path, .. }
            | RunError::Write { path, .. }
            | RunError::Panicked { path, .. } => path,
        }
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ViolationType;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_load_error_messages() {
        let e = LoadError::Parse {
            field: "day budget".into(),
            token: "x".into(),
            line: 1,
        };
        assert_eq!(e.to_string(), "line 1: could not parse 'x' as day budget");

        let e = LoadError::UnknownBook {
            library: 2,
            book: 9,
            book_count: 6,
            line: 7,
        };
        assert!(e.to_string().contains("library 2 references book 9"));
    }

    #[test]
    fn test_run_error_carries_path() {
        let e = RunError::Load {
            path: PathBuf::from("in/a.txt"),
            source: LoadError::UnexpectedEof {
                field: "library count".into(),
                line: 1,
            },
        };
        assert_eq!(e.path(), Path::new("in/a.txt"));
        assert_eq!(
            e.to_string(),
            "could not load in/a.txt: line 1: unexpected end of input while reading library count"
        );
    }

    #[test]
    fn test_run_error_joins_details() {
        let e = RunError::Invalid {
            path: PathBuf::from("b.txt"),
            errors: vec![
                ValidationError {
                    kind: ValidationErrorKind::UnknownBook,
                    message: "first".into(),
                },
                ValidationError {
                    kind: ValidationErrorKind::DuplicateId,
                    message: "second".into(),
                },
            ],
        };
        assert_eq!(e.to_string(), "b.txt is not a valid instance: first; second");

        let e = RunError::Audit {
            path: PathBuf::from("c.txt"),
            violations: vec![Violation::new(ViolationType::DuplicateDelivery, 0, "dup")],
        };
        assert_eq!(e.to_string(), "schedule for c.txt breaks 1 invariant(s): dup");
    }
}
