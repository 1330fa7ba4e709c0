//! Where the series file lives.
//!
//! The store only ever reads or replaces the whole file, so a backend is
//! just "give me the text, if any" and "replace it with this".

use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::StoreError;

pub trait StorageBackend {
    /// Current contents, or `None` if nothing has been stored yet.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replace the contents.
    fn write(&self, contents: &str) -> Result<(), StoreError>;

    /// Human-readable location for logs.
    fn location(&self) -> String;
}

/// A CSV file on disk. Writes go to a sibling temp file that is renamed over
/// the target, so a failed write leaves the previous file intact.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|source| StoreError::Read {
                path: self.path.display().to_string(),
                source,
            })
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_err(e))?;
        }

        let temp_path = self.path.with_extension("csv.tmp");
        let result = (|| -> std::io::Result<()> {
            let mut writer = BufWriter::new(File::create(&temp_path)?);
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
            fs::rename(&temp_path, &self.path)
        })();

        result.map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            self.write_err(e)
        })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-process storage for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    contents: RefCell<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: RefCell::new(Some(contents.into())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.contents())
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        *self.contents.borrow_mut() = Some(contents.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

impl<T: StorageBackend + ?Sized> StorageBackend for &T {
    fn read(&self) -> Result<Option<String>, StoreError> {
        (**self).read()
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        (**self).write(contents)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
