//! Reading and writing canonical state-month CSV files.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::StateMonthRecord;

/// Reads every record from a canonical state-month CSV.
///
/// # Errors
///
/// Returns an error if the header is missing a canonical column or any row
/// fails to parse (the aggregator requires well-formed input).
pub fn read_records<R: Read>(reader: R) -> Result<Vec<StateMonthRecord>, csv::Error> {
    csv::Reader::from_reader(reader).deserialize().collect()
}

/// Writes `records` as a canonical state-month CSV, header first.
///
/// # Errors
///
/// Returns an error if a row cannot be serialized or written.
pub fn write_records<'a, W: Write>(
    writer: W,
    records: impl IntoIterator<Item = &'a StateMonthRecord>,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    let mut wrote_any = false;
    for record in records {
        writer.serialize(record)?;
        wrote_any = true;
    }
    if !wrote_any {
        writer.write_record(crate::CANONICAL_HEADER)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a file by filling `<path>.tmp` and renaming it over `path` once
/// `write` succeeds, so an interrupted run never leaves a truncated file
/// under the final name.
///
/// # Errors
///
/// Returns whatever `write` returns, or an I/O error from creating,
/// flushing, or renaming the temporary file. The temporary file is removed
/// on any failure.
pub fn write_atomic<E, F>(path: &Path, write: F) -> Result<(), E>
where
    E: From<std::io::Error>,
    F: FnOnce(&mut BufWriter<File>) -> Result<(), E>,
{
    let tmp_path = tmp_path_for(path);
    let file = File::create(&tmp_path)?;
    let result = fill_and_rename(file, &tmp_path, path, write);
    if result.is_err() {
        std::fs::remove_file(&tmp_path).ok();
    }
    result
}

fn fill_and_rename<E, F>(file: File, tmp_path: &Path, path: &Path, write: F) -> Result<(), E>
where
    E: From<std::io::Error>,
    F: FnOnce(&mut BufWriter<File>) -> Result<(), E>,
{
    let mut out = BufWriter::new(file);
    write(&mut out)?;
    out.flush()?;
    drop(out);
    std::fs::rename(tmp_path, path)?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(month: &str, fips: u32, offenses: i64) -> StateMonthRecord {
        StateMonthRecord {
            month: month.parse().unwrap(),
            state_fips: Some(fips),
            state_abbr: "DC".to_string(),
            state_name: "District of Columbia".to_string(),
            offenses,
            clearances: 1,
            population: 2_820_000,
        }
    }

    #[test]
    fn write_then_read_preserves_rows() {
        let rows = vec![record("2021-01", 11, 900), record("2021-02", 11, 950)];
        let mut buf = Vec::new();
        write_records(&mut buf, &rows).unwrap();
        assert_eq!(read_records(buf.as_slice()).unwrap(), rows);
    }

    #[test]
    fn empty_table_still_has_header() {
        let mut buf = Vec::new();
        write_records(&mut buf, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "month,state_fips,state_abbr,state_name,offenses,clearances,population\n"
        );
    }

    #[test]
    fn rejects_non_numeric_offenses() {
        let data = "month,state_fips,state_abbr,state_name,offenses,clearances,population\n\
                    2021-01,11,DC,District of Columbia,lots,1,0\n";
        assert!(read_records(data.as_bytes()).is_err());
    }

    #[test]
    fn atomic_write_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "old").unwrap();
        write_atomic::<std::io::Error, _>(&path, |w| w.write_all(b"new")).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert!(!dir.path().join("out.csv.tmp").exists());
    }

    #[test]
    fn failed_atomic_write_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "old").unwrap();
        let result = write_atomic::<std::io::Error, _>(&path, |w| {
            w.write_all(b"partial")?;
            Err(std::io::Error::other("boom"))
        });
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old");
        assert!(!dir.path().join("out.csv.tmp").exists());
    }

    #[test]
    fn failed_rename_removes_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory under the final name cannot be replaced.
        let path = dir.path().join("out.csv");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let result = write_atomic::<std::io::Error, _>(&path, |w| w.write_all(b"new"));
        assert!(result.is_err());
        assert!(path.join("keep").exists());
        assert!(!dir.path().join("out.csv.tmp").exists());
    }
}
