//! File-system collaborator.
//!
//! The generator touches the file system only through [`FileSystem`], so
//! callers can direct output to disk ([`OsFileSystem`]) or keep it in memory
//! ([`MemoryFileSystem`]).

use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// File operations the generator needs.
pub trait FileSystem {
    /// Returns true if a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Returns true if a directory exists at `path`.
    fn directory_exists(&self, path: &Path) -> bool;

    /// Reads a whole file as text.
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be read.
    fn read_text(&self, path: &Path) -> io::Result<String>;

    /// Writes a whole file, replacing any previous content.
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be written.
    fn write_text(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn directory_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write_text(&self, path: &Path, content: &str) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
    }
}

/// In-memory [`FileSystem`].
///
/// Files live in an ordered map; directories exist only when added with
/// [`MemoryFileSystem::with_directory`] or implied by a written file.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: Mutex<BTreeMap<PathBuf, String>>,
    directories: Mutex<BTreeSet<PathBuf>>,
}

impl MemoryFileSystem {
    /// Creates an empty file system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an existing directory.
    #[must_use]
    pub fn with_directory(self, path: impl Into<PathBuf>) -> Self {
        self.directories.lock().insert(path.into());
        self
    }

    /// Adds an existing file.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.lock().insert(path.into(), content.into());
        self
    }

    /// Returns the content of a file.
    #[must_use]
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().get(path.as_ref()).cloned()
    }

    /// Returns the paths of all files, in path order.
    #[must_use]
    pub fn files(&self) -> Vec<PathBuf> {
        self.files.lock().keys().cloned().collect()
    }

    /// Number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.lock().len()
    }

    /// Returns true if there are no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.lock().is_empty()
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().contains_key(path)
    }

    fn directory_exists(&self, path: &Path) -> bool {
        self.directories.lock().contains(path)
            || self.files.lock().keys().any(|file| file.parent() == Some(path))
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        self.files.lock().get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }

    fn write_text(&self, path: &Path, content: &str) -> io::Result<()> {
        self.files
            .lock()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}
