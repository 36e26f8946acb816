use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use atomicwrites::{AtomicFile, OverwriteBehavior};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub fn atomic_save_json<T: Serialize>(path: &Path, object: &T) -> Result<(), FileOperationError> {
    let af = AtomicFile::new(path, OverwriteBehavior::AllowOverwrite);
    af.write(|f| serde_json::to_writer_pretty(BufWriter::new(f), object))?;
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, FileOperationError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let data = serde_json::from_reader(reader)?;
    Ok(data)
}

#[derive(Debug, Error)]
pub enum FileOperationError {
    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),

    #[error(transparent)]
    AtomicWriteError(#[from] atomicwrites::Error<io::Error>),

    #[error(transparent)]
    AtomicWriteSerdeJsonError(#[from] atomicwrites::Error<serde_json::Error>),
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_save_and_read_json() {
        let temp_dir = TempDir::new().expect("Failed to create temporary directory");
        let path = temp_dir.path().join("object.json");

        let mut object: BTreeMap<String, u32> = BTreeMap::new();
        object.insert("slop".to_string(), 2);
        object.insert("end".to_string(), 5);

        atomic_save_json(&path, &object).expect("save");
        let loaded: BTreeMap<String, u32> = read_json(&path).expect("read");
        assert_eq!(object, loaded);
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temporary directory");
        let res: Result<BTreeMap<String, u32>, _> = read_json(&temp_dir.path().join("absent.json"));
        assert!(matches!(res, Err(FileOperationError::IoError(_))));
    }
}
