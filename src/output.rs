//! JSON output of assembled curricula.

use crate::record::Curriculum;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name for the `position`-th curriculum of a batch (1-based).
pub fn record_file_name(position: usize, curriculum_id: &str) -> String {
    format!("{position:02}_{curriculum_id}.json")
}

/// Write `value` as pretty JSON via a temp file in the same directory, so a
/// reader never observes a half-written record.
pub fn write_json_atomic<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    serde_json::to_writer_pretty(&mut file, value)
        .with_context(|| format!("serializing {}", path.display()))?;
    file.write_all(b"\n")?;
    file.flush()?;
    file.persist(path)
        .with_context(|| format!("persisting {}", path.display()))?;
    Ok(())
}

/// Write each curriculum to `<dir>/<NN>_<id>.json` and return the paths.
pub fn write_curricula(dir: &Path, curricula: &[Curriculum]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(curricula.len());
    for (idx, curriculum) in curricula.iter().enumerate() {
        let path = dir.join(record_file_name(idx + 1, curriculum.id()));
        write_json_atomic(&path, curriculum)?;
        tracing::debug!(path = %path.display(), "wrote curriculum record");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    #[test]
    fn file_names_are_zero_padded() {
        assert_eq!(record_file_name(1, "DAN_Foundation"), "01_DAN_Foundation.json");
        assert_eq!(record_file_name(12, "DSC_Expert"), "12_DSC_Expert.json");
    }

    #[test]
    fn atomic_write_creates_directories_and_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("record.json");
        write_json_atomic(&path, &json!({"version": 1})).unwrap();
        write_json_atomic(&path, &json!({"version": 2})).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["version"], json!(2));
        let leftovers = fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1, "temp files should not linger");
    }
}
