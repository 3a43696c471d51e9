// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Filesystem-backed object store: each bucket is a directory under a root.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use super::{ObjectReader, ObjectStore};

pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, bucket: &str, object_path: &str) -> Result<PathBuf> {
        let relative = Path::new(object_path.trim_start_matches('/'));
        if relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_)))
        {
            anyhow::bail!("Invalid object path: '{object_path}'");
        }
        Ok(self.root.join(bucket).join(relative))
    }
}

#[async_trait(?Send)]
impl ObjectStore for LocalObjectStore {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        if bucket.is_empty() || bucket.contains(['/', '\\']) || bucket == ".." {
            return Ok(false);
        }
        match fs::metadata(self.root.join(bucket)).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to inspect bucket '{bucket}'")),
        }
    }

    async fn open(&self, bucket: &str, object_path: &str) -> Result<ObjectReader> {
        let path = self.object_path(bucket, object_path)?;
        let file = fs::File::open(&path)
            .await
            .with_context(|| format!("Failed to open object {bucket}/{object_path}"))?;
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_bucket_and_object_access() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("bucket/a")).unwrap();
        std::fs::write(dir.path().join("bucket/a/b.log"), b"payload").unwrap();

        let store = LocalObjectStore::new(dir.path());
        assert!(store.bucket_exists("bucket").await.unwrap());
        assert!(!store.bucket_exists("missing").await.unwrap());
        assert!(!store.bucket_exists("").await.unwrap());

        let mut reader = store.open("bucket", "a/b.log").await.unwrap();
        let mut content = String::new();
        reader.read_to_string(&mut content).await.unwrap();
        assert_eq!(content, "payload");

        assert!(store.open("bucket", "a/missing.log").await.is_err());
    }

    #[tokio::test]
    async fn test_object_path_cannot_escape_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path());
        assert!(store.open("bucket", "../secret").await.is_err());
        assert!(store.open("bucket", "a/../../secret").await.is_err());
    }
}
