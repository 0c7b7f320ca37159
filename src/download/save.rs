//! Saving downloaded bytes to the user's device.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Offers downloaded bytes to the user as a file.
pub trait SaveAction: Send {
    /// Stores `bytes` under `file_name` and returns where they ended up.
    fn save(&self, bytes: &[u8], file_name: &str) -> io::Result<PathBuf>;
}

/// Saves into a fixed directory, replacing any previous file of the same name.
#[derive(Debug, Clone)]
pub struct DirectorySaveAction {
    dir: PathBuf,
}

impl DirectorySaveAction {
    /// Creates a save action targeting `dir`. The directory is created on demand.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SaveAction for DirectorySaveAction {
    fn save(&self, bytes: &[u8], file_name: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let target = self.dir.join(file_name);
        let temp_path = self.dir.join(format!(".{file_name}.part"));

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &target)?;

        Ok(target)
    }
}
