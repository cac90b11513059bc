/*!
# Saving Results

Writes `(x, y)` series, one `"(<x>, <y>)"` record per line, as used for the
integration error sweep. The CSV writer lives in [`csv`] behind the `csv` feature.

```rust
use mini_mc::io::write_pairs;

let mut out = Vec::new();
write_pairs(&mut out, &[(1.0, -0.5), (2.0, 0.25)]).unwrap();
assert_eq!(String::from_utf8(out).unwrap(), "(1, -0.5)\n(2, 0.25)\n");
```
*/

#[cfg(feature = "csv")]
pub mod csv;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Writes one `"(<x>, <y>)"` line per pair.
pub fn write_pairs<W: Write>(mut writer: W, pairs: &[(f64, f64)]) -> Result<()> {
    for (x, y) in pairs {
        writeln!(writer, "({x}, {y})")?;
    }
    writer.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes `pairs` to it with [`write_pairs`].
pub fn save_pairs<P: AsRef<Path>>(path: P, pairs: &[(f64, f64)]) -> Result<()> {
    let file = File::create(path)?;
    write_pairs(BufWriter::new(file), pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_series_writes_nothing() {
        let mut out = Vec::new();
        write_pairs(&mut out, &[]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn saved_file_has_one_record_per_line() {
        let file = NamedTempFile::new().expect("Could not create temp file");
        let pairs = [(1.0, 0.125), (2.0, -3.0), (3.0, 1e-3)];
        save_pairs(file.path(), &pairs).unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["(1, 0.125)", "(2, -3)", "(3, 0.001)"]);
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_pairs(dir.path(), &[(0.0, 0.0)]).unwrap_err();
        assert!(matches!(err, crate::error::McError::Io(_)));
    }
}
