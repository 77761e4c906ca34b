//! Shared key generation for storage backends.
//!
//! Key format: `assets/img/{bucket_dir}/{stem}/{name}` where `name` is
//! `original{.ext}` for the untouched upload and `{size_name}.webp` for variants.

use crate::{StorageError, StorageResult};

const KEY_ROOT: &str = "assets/img";

/// Destination folder for one upload: `assets/img/{bucket_dir}/{stem}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFolder(String);

impl UploadFolder {
    /// Build the folder for a bucket directory and filename stem.
    ///
    /// Surrounding slashes on `bucket_dir` are dropped. Empty segments and
    /// segments containing `..` are rejected.
    pub fn new(bucket_dir: &str, stem: &str) -> StorageResult<Self> {
        let bucket_dir = bucket_dir.trim().trim_matches('/');
        if bucket_dir.is_empty() {
            return Err(StorageError::InvalidKey("bucket directory is empty".to_string()));
        }
        if stem.is_empty() {
            return Err(StorageError::InvalidKey("filename stem is empty".to_string()));
        }
        if bucket_dir.contains("..") || stem.contains("..") || stem.contains('/') {
            return Err(StorageError::InvalidKey(format!(
                "invalid path segment in {}/{}",
                bucket_dir, stem
            )));
        }

        Ok(UploadFolder(format!("{}/{}/{}", KEY_ROOT, bucket_dir, stem)))
    }

    /// Key of the untouched upload, e.g. `.../original.jpg`.
    pub fn original_key(&self, extension: &str) -> String {
        format!("{}/original{}", self.0, extension)
    }

    /// Key of a resized variant, e.g. `.../s.webp`.
    pub fn variant_key(&self, size_name: &str) -> String {
        format!("{}/{}.webp", self.0, size_name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let folder = UploadFolder::new("demo", "photo").unwrap();
        assert_eq!(folder.as_str(), "assets/img/demo/photo");
        assert_eq!(folder.original_key(".jpg"), "assets/img/demo/photo/original.jpg");
        assert_eq!(folder.original_key(""), "assets/img/demo/photo/original");
        assert_eq!(folder.variant_key("xxl"), "assets/img/demo/photo/xxl.webp");
    }

    #[test]
    fn test_nested_bucket_dir_is_trimmed() {
        let folder = UploadFolder::new("/users/42/", "avatar").unwrap();
        assert_eq!(folder.variant_key("t"), "assets/img/users/42/avatar/t.webp");
    }

    #[test]
    fn test_rejects_bad_segments() {
        assert!(UploadFolder::new("", "photo").is_err());
        assert!(UploadFolder::new("///", "photo").is_err());
        assert!(UploadFolder::new("../etc", "photo").is_err());
        assert!(UploadFolder::new("demo", "").is_err());
        assert!(UploadFolder::new("demo", "a/b").is_err());
    }
}
