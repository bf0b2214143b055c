//! Blob store for uploaded images, kept on the local filesystem.
//!
//! Files land in `{upload_dir}/{bucket}/{folder}/{name}` and are served back under
//! `{public_base}/{bucket}/...` by the static file route.

use crate::errors::{Error, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Component, Path, PathBuf},
    str::FromStr,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Storage buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Images,
    Content,
}

impl Bucket {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Content => "content",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "images" => Ok(Self::Images),
            "content" => Ok(Self::Content),
            other => Err(Error::validation(format!("Unknown bucket: {other}"))),
        }
    }
}

/// Filesystem-backed blob store.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_base: String,
}

impl LocalBlobStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stores `bytes` under a fresh unique name and returns its public URL.
    ///
    /// The extension is taken from `file_name`; `folder` nests the file inside the
    /// bucket.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(
        &self,
        bytes: &[u8],
        file_name: &str,
        bucket: Bucket,
        folder: Option<&str>,
    ) -> Result<String> {
        if bytes.is_empty() {
            return Err(Error::validation("Uploaded file is empty"));
        }

        let relative = match folder.map(str::trim).filter(|f| !f.is_empty()) {
            Some(folder) => {
                let folder = checked_relative(folder.trim_matches('/'))?;
                folder.join(unique_name(file_name))
            }
            None => PathBuf::from(unique_name(file_name)),
        };

        let target = self.root.join(bucket.as_str()).join(&relative);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await.map_err(|e| Error::Storage {
            message: format!("Failed to write {}: {e}", target.display()),
        })?;

        let url = self.public_url(&path_to_url(&relative), bucket);
        info!(%bucket, %url, "Stored upload");
        Ok(url)
    }

    /// Removes a previously uploaded file, given its public URL or bucket-relative path.
    #[instrument(skip(self))]
    pub async fn delete(&self, public_url: &str, bucket: Bucket) -> Result<()> {
        let prefix = format!("{}/{}/", self.public_base, bucket);
        let relative = public_url.strip_prefix(&prefix).unwrap_or(public_url);
        if relative.starts_with("http://") || relative.starts_with("https://") {
            return Err(Error::validation(format!(
                "{public_url} is not stored in the {bucket} bucket"
            )));
        }

        let target = self.root.join(bucket.as_str()).join(checked_relative(relative)?);
        tokio::fs::remove_file(&target).await.map_err(|e| Error::Storage {
            message: format!("Failed to delete {}: {e}", target.display()),
        })?;
        debug!(path = %target.display(), "Deleted upload");
        Ok(())
    }

    /// Public URL for a bucket-relative path. Absolute `http` URLs pass through.
    #[must_use]
    pub fn public_url(&self, path: &str, bucket: Bucket) -> String {
        if path.starts_with("http") {
            return path.to_string();
        }
        format!(
            "{}/{}/{}",
            self.public_base,
            bucket,
            path.trim_start_matches('/')
        )
    }
}

/// `{millis}-{random}.{ext}`
fn unique_name(file_name: &str) -> String {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map_or_else(|| "bin".to_string(), str::to_ascii_lowercase);
    let random = Uuid::new_v4().simple().to_string();
    format!("{}-{}.{ext}", Utc::now().timestamp_millis(), &random[..12])
}

/// Rejects absolute paths and parent-directory components.
fn checked_relative(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    if path.as_os_str().is_empty()
        || !path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
    {
        return Err(Error::validation(format!(
            "Invalid storage path: {}",
            path.display()
        )));
    }
    Ok(path.to_path_buf())
}

fn path_to_url(path: &Path) -> String {
    path.components()
        .filter_map(|component| component.as_os_str().to_str())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn temp_store() -> LocalBlobStore {
        let root = std::env::temp_dir().join(format!("storefront-test-{}", Uuid::new_v4()));
        LocalBlobStore::new(root, "/uploads/")
    }

    #[tokio::test]
    async fn test_upload_then_delete() -> Result<()> {
        let store = temp_store();
        let url = store
            .upload(b"\x89PNG", "Logo.PNG", Bucket::Images, Some("branding"))
            .await?;

        assert!(url.starts_with("/uploads/images/branding/"));
        assert!(url.ends_with(".png"));

        let relative = url.strip_prefix("/uploads/images/").unwrap();
        let on_disk = store.root().join("images").join(relative);
        assert!(on_disk.exists());

        store.delete(&url, Bucket::Images).await?;
        assert!(!on_disk.exists());

        tokio::fs::remove_dir_all(store.root()).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_rejects_traversal_and_empty_files() {
        let store = temp_store();
        assert!(
            store
                .upload(b"data", "x.txt", Bucket::Content, Some("../etc"))
                .await
                .is_err()
        );
        assert!(store.upload(b"", "x.txt", Bucket::Content, None).await.is_err());
        assert!(
            store
                .delete("/uploads/content/../../secret", Bucket::Content)
                .await
                .is_err()
        );
    }

    #[test]
    fn test_public_url() {
        let store = LocalBlobStore::new("data/uploads", "/uploads");
        assert_eq!(
            store.public_url("team/a.jpg", Bucket::Images),
            "/uploads/images/team/a.jpg"
        );
        assert_eq!(
            store.public_url("https://cdn.example.com/a.jpg", Bucket::Images),
            "https://cdn.example.com/a.jpg"
        );
    }

    #[test]
    fn test_unique_name_keeps_extension() {
        assert!(unique_name("photo.JPG").ends_with(".jpg"));
        assert!(unique_name("README").ends_with(".bin"));
        assert_ne!(unique_name("a.png"), unique_name("a.png"));
    }
}
