//! Instance loader.
//!
//! Reads the whitespace-delimited text encoding of a scanning instance:
//!
//! ```raw
//! B L D                      // books, libraries, scanning days
//! v_0 ... v_{B-1}            // book values; the id is the position
//! n_0 s_0 r_0                // library 0: catalog size, signup days, books per day
//! b_0 ... b_{n_0-1}          // library 0: catalog
//! ...                        // libraries 1 .. L-1
//! ```
//!
//! Line breaks carry no meaning beyond error reporting: every error names
//! the field being read and the 1-based line where reading stopped.
//! Tokens after the last library are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::LoadError;
use crate::models::{Instance, Library};

/// Cap on capacity reserved from header counts; larger inputs grow as
/// tokens arrive.
const PREALLOC_LIMIT: usize = 1 << 16;

/// Loader for the text encoding of an instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstanceLoader;

impl InstanceLoader {
    /// Creates a loader.
    pub fn new() -> Self {
        Self
    }

    /// Loads an instance from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Instance, LoadError> {
        let mut sc = Scanner::new(rdr);

        let book_count: usize = sc.next(|| "book count".into())?;
        let library_count: usize = sc.next(|| "library count".into())?;
        let days: u64 = sc.next(|| "day budget".into())?;

        let mut values = Vec::with_capacity(book_count.min(PREALLOC_LIMIT));
        for id in 0..book_count {
            values.push(sc.next::<u64>(|| format!("value of book {id}"))?);
        }
        debug!(books = values.len(), "read book values");

        let mut libraries = Vec::with_capacity(library_count.min(PREALLOC_LIMIT));
        for id in 0..library_count {
            let size: usize = sc.next(|| format!("catalog size of library {id}"))?;
            let signup: u64 = sc.next(|| format!("signup days of library {id}"))?;
            let rate: u64 = sc.next(|| format!("books per day of library {id}"))?;

            let mut books = Vec::with_capacity(size.min(book_count).min(PREALLOC_LIMIT));
            for pos in 0..size {
                let book: usize = sc.next(|| format!("book {pos} of library {id}"))?;
                if book >= book_count {
                    return Err(LoadError::UnknownBook {
                        library: id,
                        book,
                        book_count,
                        line: sc.line(),
                    });
                }
                books.push(book);
            }

            libraries.push(
                Library::new(id)
                    .with_signup_days(signup)
                    .with_books_per_day(rate)
                    .with_books(books),
            );
        }

        let instance = Instance::from_values(&values, libraries, days);
        for library in instance.libraries() {
            debug!("{library}");
        }
        debug!(
            libraries = instance.library_count(),
            days = instance.days(),
            "read libraries"
        );

        Ok(instance)
    }

    /// Loads an instance from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Instance, LoadError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads an instance from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Instance, LoadError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads an instance from a string slice.
    #[inline]
    pub fn parse_str(&self, s: &str) -> Result<Instance, LoadError> {
        self.from_bufread(s.as_bytes())
    }
}

/// Reads whitespace-delimited tokens, tracking the current line.
struct Scanner<R> {
    rdr: R,
    buf: String,
    pos: usize,
    line: usize,
}

impl<R: BufRead> Scanner<R> {
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            pos: 0,
            line: 0,
        }
    }

    /// Line of the most recently read token (1-based, 0 before any input).
    fn line(&self) -> usize {
        self.line
    }

    /// Parses the next token; `field` names it in errors.
    fn next<T: FromStr>(&mut self, field: impl FnOnce() -> String) -> Result<T, LoadError> {
        loop {
            let rest = &self.buf[self.pos..];
            let trimmed = rest.trim_start();
            if !trimmed.is_empty() {
                let start = self.pos + (rest.len() - trimmed.len());
                let len = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
                let end = start + len;
                self.pos = end;

                let token = &self.buf[start..end];
                return token.parse().map_err(|_| LoadError::Parse {
                    field: field(),
                    token: token.to_string(),
                    line: self.line,
                });
            }

            self.buf.clear();
            self.pos = 0;
            if self.rdr.read_line(&mut self.buf)? == 0 {
                return Err(LoadError::UnexpectedEof {
                    field: field(),
                    line: self.line,
                });
            }
            self.line += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "6 2 7\n1 2 3 5 8 13\n4 1 2\n0 1 2 3\n2 1 1\n4 5\n";

    #[test]
    fn test_load_sample() {
        let inst = InstanceLoader::new().parse_str(SAMPLE).unwrap();
        assert_eq!(inst.book_count(), 6);
        assert_eq!(inst.library_count(), 2);
        assert_eq!(inst.days(), 7);
        assert_eq!(inst.book_value(5), 13);

        let l0 = &inst.libraries()[0];
        assert_eq!(l0.id, 0);
        assert_eq!(l0.signup_days, 1);
        assert_eq!(l0.books_per_day, 2);
        assert_eq!(l0.books, vec![0, 1, 2, 3]);
        assert_eq!(l0.catalog_value, 11);

        let l1 = &inst.libraries()[1];
        assert_eq!(l1.books, vec![4, 5]);
        assert_eq!(l1.catalog_value, 21);
    }

    #[test]
    fn test_line_breaks_not_significant() {
        let flat = SAMPLE.replace('\n', " ");
        let a = InstanceLoader::new().parse_str(SAMPLE).unwrap();
        let b = InstanceLoader::new().parse_str(&flat).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_catalog() {
        let inst = InstanceLoader::new().parse_str("1 1 3\n9\n0 2 1\n\n").unwrap();
        assert!(inst.libraries()[0].books.is_empty());
    }

    #[test]
    fn test_parse_error_reports_field_and_line() {
        let err = InstanceLoader::new()
            .parse_str("2 1 5\n4 x\n1 1 1\n0\n")
            .unwrap_err();
        match err {
            LoadError::Parse { field, token, line } => {
                assert_eq!(field, "value of book 1");
                assert_eq!(token, "x");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_value_rejected() {
        let err = InstanceLoader::new().parse_str("1 0 5\n-4\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_truncated_input() {
        let err = InstanceLoader::new()
            .parse_str("3 1 5\n1 2 3\n2 1 1\n0\n")
            .unwrap_err();
        match err {
            LoadError::UnexpectedEof { field, line } => {
                assert_eq!(field, "book 1 of library 0");
                assert_eq!(line, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_huge_header_counts() {
        let err = InstanceLoader::new()
            .parse_str("1000000000000000 0 5\n1\n")
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnexpectedEof { ref field, line: 2 } if field == "value of book 1"
        ));

        let err = InstanceLoader::new()
            .parse_str("1 1000000000000000 5\n1\n")
            .unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedEof { .. }));

        let err = InstanceLoader::new()
            .parse_str("1 1 5\n1\n1000000000000000 1 1\n0\n")
            .unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_empty_input() {
        let err = InstanceLoader::new().parse_str("").unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnexpectedEof { ref field, line: 0 } if field == "book count"
        ));
    }

    #[test]
    fn test_unknown_book_reference() {
        let err = InstanceLoader::new()
            .parse_str("2 1 5\n1 1\n2 1 1\n0 2\n")
            .unwrap_err();
        match err {
            LoadError::UnknownBook {
                library,
                book,
                book_count,
                line,
            } => {
                assert_eq!((library, book, book_count, line), (0, 2, 2, 4));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = InstanceLoader::new()
            .from_path("/definitely/not/here.txt")
            .unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
