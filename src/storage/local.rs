use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::storage::{ArtifactStore, StorageError};

/// Subdirectory of the public root that holds product images.
pub const IMAGE_SUBDIR: &str = "images";

/// Filesystem-backed artifact store rooted at the public-serving directory.
///
/// Locators are paths relative to that root (`images/<file>`), so the same
/// string works both for building a servable URL and for re-deriving the
/// deletable filesystem path.
pub struct LocalArtifactStore {
    public_dir: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    fn resolve(&self, locator: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(locator);
        let traversal = relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_)));
        if relative.is_absolute() || traversal {
            return Err(StorageError::InvalidLocator(locator.to_string()));
        }
        Ok(self.public_dir.join(relative))
    }
}

impl ArtifactStore for LocalArtifactStore {
    fn save(&self, bytes: &[u8], file_name: &str) -> Result<String, StorageError> {
        let dir = self.public_dir.join(IMAGE_SUBDIR);
        // create_dir_all is idempotent, so concurrent saves are fine.
        fs::create_dir_all(&dir).map_err(|source| StorageError::Write {
            name: file_name.to_string(),
            source,
        })?;

        fs::write(dir.join(file_name), bytes).map_err(|source| StorageError::Write {
            name: file_name.to_string(),
            source,
        })?;

        Ok(format!("{IMAGE_SUBDIR}/{file_name}"))
    }

    fn delete(&self, locator: &str) -> Result<(), StorageError> {
        let path = self.resolve(locator)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Delete {
                locator: locator.to_string(),
                source,
            }),
        }
    }
}
