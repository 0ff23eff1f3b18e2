//! Schedule writer.
//!
//! Output encoding:
//!
//! ```raw
//! E                          // number of entries
//! l_0 k_0                    // library id, shipped book count
//! b_0 ... b_{k_0-1}          // shipped book ids, in shipping order
//! ...
//! ```

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::models::Schedule;

/// Writes a schedule in the text encoding.
pub fn write_schedule<W: Write>(schedule: &Schedule, mut out: W) -> io::Result<()> {
    writeln!(out, "{}", schedule.entry_count())?;
    for entry in &schedule.entries {
        writeln!(out, "{} {}", entry.library_id, entry.book_count())?;
        let mut first = true;
        for book in &entry.books {
            if !first {
                out.write_all(b" ")?;
            }
            write!(out, "{book}")?;
            first = false;
        }
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Renders a schedule in the text encoding.
pub fn render_schedule(schedule: &Schedule) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_schedule(schedule, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Writes a schedule to `path`, creating parent directories as needed.
pub fn write_schedule_file(schedule: &Schedule, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_schedule(schedule, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScanEntry;

    #[test]
    fn test_render() {
        let mut s = Schedule::new();
        s.add_entry(ScanEntry::new(1, vec![5, 4]));
        s.add_entry(ScanEntry::new(0, vec![3, 2, 1, 0]));
        assert_eq!(render_schedule(&s), "2\n1 2\n5 4\n0 4\n3 2 1 0\n");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_schedule(&Schedule::new()), "0\n");
    }

    #[test]
    fn test_write_file_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/a.txt");
        let mut s = Schedule::new();
        s.add_entry(ScanEntry::new(3, vec![7]));

        write_schedule_file(&s, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n3 1\n7\n");
    }

    #[test]
    fn test_write_file_unwritable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_schedule_file(&Schedule::new(), &blocker.join("a.txt"));
        assert!(err.is_err());
    }
}
