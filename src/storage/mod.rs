//! Artifact storage backends for optimized product images.
//!
//! Both backends implement [`ArtifactStore`]; which one is active is decided
//! once at startup from configuration. Services only ever see the trait.

use std::path::Path;

use thiserror::Error;

use crate::imaging::OUTPUT_EXTENSION;

mod local;
mod remote;

pub use local::LocalArtifactStore;
pub use remote::RemoteArtifactStore;

/// Errors raised while persisting or removing artifacts.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write artifact `{name}`: {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to delete artifact `{locator}`: {source}")]
    Delete {
        locator: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid artifact locator `{0}`")]
    InvalidLocator(String),
    #[error("failed to upload artifact `{name}`: {source}")]
    Upload {
        name: String,
        #[source]
        source: Box<ureq::Error>,
    },
}

/// Persistence capability for optimized image artifacts.
///
/// `save` returns the locator stored on the product record: a path relative
/// to the public-serving root for the local backend, an absolute URL for the
/// remote one.
pub trait ArtifactStore: Send + Sync {
    fn save(&self, bytes: &[u8], file_name: &str) -> Result<String, StorageError>;

    /// Remove the artifact behind `locator`. A missing file is success;
    /// callers treat cleanup as best-effort.
    fn delete(&self, locator: &str) -> Result<(), StorageError>;
}

/// Whether `locator` points into the local artifact store rather than a
/// remote object store.
pub fn is_store_local(locator: &str) -> bool {
    !locator.starts_with("http://") && !locator.starts_with("https://")
}

/// Derive the artifact file name for a product.
///
/// The product id guarantees per-product uniqueness; the original base name
/// keeps the file recognizable. The fixed output extension is always
/// appended.
pub fn artifact_file_name(product_id: i32, original_file_name: &str) -> String {
    let stem = Path::new(original_file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("");

    let sanitized: String = stem
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();

    let base = if sanitized.is_empty() {
        "image".to_string()
    } else {
        sanitized
    };

    format!("{product_id}-{base}.{OUTPUT_EXTENSION}")
}
