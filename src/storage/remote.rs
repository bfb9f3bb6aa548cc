use crate::storage::{ArtifactStore, StorageError};

/// Object-store backend that uploads artifacts over HTTP and stores the
/// publicly fetchable URL as the locator.
pub struct RemoteArtifactStore {
    base_url: String,
    agent: ureq::Agent,
}

impl RemoteArtifactStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            agent: ureq::agent(),
        }
    }
}

impl ArtifactStore for RemoteArtifactStore {
    fn save(&self, bytes: &[u8], file_name: &str) -> Result<String, StorageError> {
        // The timestamp disambiguates re-uploads for the same product, since
        // remote objects are never overwritten in place.
        let name = format!("{}-{file_name}", chrono::Utc::now().timestamp_millis());
        let url = format!("{}/{name}", self.base_url);

        self.agent
            .put(&url)
            .set("Content-Type", "image/jpeg")
            .send_bytes(bytes)
            .map_err(|source| StorageError::Upload {
                name,
                source: Box::new(source),
            })?;

        Ok(url)
    }

    fn delete(&self, locator: &str) -> Result<(), StorageError> {
        // Remote artifacts are not garbage-collected.
        log::warn!("leaving remote artifact in place: {locator}");
        Ok(())
    }
}
