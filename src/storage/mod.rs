use anyhow::Context;
use directories_next::BaseDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[cfg(test)]
pub mod memory;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not access {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not encode question bank")]
    Encode(#[from] serde_json::Error),
}

/// Named slots of text that survive between runs.
pub trait Storage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, slot: &str, contents: &str) -> Result<(), StorageError>;
    fn remove(&mut self, slot: &str) -> Result<(), StorageError>;
}

pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let mut dir = BaseDirs::new()
        .context("could not locate system directories")?
        .data_dir()
        .to_path_buf();
    dir.push("quiz-bank");
    Ok(dir)
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Keeps each slot in its own JSON file under a directory.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        FileStorage { dir }
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slot))
    }
}

impl Storage for FileStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(slot);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path)(e)),
        }
    }

    fn write(&mut self, slot: &str, contents: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;
        let path = self.slot_path(slot);
        let staging_path = path.with_extension("json.tmp");
        fs::write(&staging_path, contents).map_err(io_error(&staging_path))?;
        if let Err(e) = fs::rename(&staging_path, &path) {
            fs::remove_file(&staging_path).ok();
            return Err(io_error(&path)(e));
        }
        Ok(())
    }

    fn remove(&mut self, slot: &str) -> Result<(), StorageError> {
        let path = self.slot_path(slot);
        match fs::remove_file(&path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(io_error(&path)(e)),
            _ => Ok(()),
        }
    }
}
