//! Client-local theme preference.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::models::Theme;

/// File-backed theme preference.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored theme. Missing or unreadable files yield the default.
    pub fn load(&self) -> Theme {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Theme::from_stored(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored theme");
                Theme::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read theme preference");
                Theme::default()
            }
        }
    }

    /// Persist the theme, creating parent directories as needed.
    pub fn save(&self, theme: Theme) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, theme.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_dark() {
        let dir = TempDir::new().unwrap();
        let store = ThemeStore::new(dir.path().join("theme"));
        assert_eq!(store.load(), Theme::Dark);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = ThemeStore::new(dir.path().join("nested").join("theme"));

        store.save(Theme::Light).unwrap();
        assert_eq!(store.load(), Theme::Light);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "light");

        store.save(Theme::Dark).unwrap();
        assert_eq!(store.load(), Theme::Dark);
    }

    #[test]
    fn test_garbage_is_dark() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("theme");
        fs::write(&path, "solarized").unwrap();

        assert_eq!(ThemeStore::new(&path).load(), Theme::Dark);
    }

    #[test]
    fn test_only_exact_light_is_light() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("theme");
        fs::write(&path, "light\n").unwrap();

        assert_eq!(ThemeStore::new(&path).load(), Theme::Dark);
    }
}
