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

//! Metadata store backed by a YAML snapshot file.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use super::MetaStore;
use super::types::{CollectionInfo, SegmentInfo, Session};

/// Point-in-time dump of cluster metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaSnapshot {
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub collections: Vec<CollectionInfo>,
    #[serde(default)]
    pub segments: Vec<SegmentInfo>,
}

pub struct SnapshotStore {
    source: String,
    snapshot: MetaSnapshot,
}

impl SnapshotStore {
    pub fn from_snapshot(source: impl Into<String>, snapshot: MetaSnapshot) -> Self {
        Self {
            source: source.into(),
            snapshot,
        }
    }

    /// Read and parse a snapshot file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read metadata snapshot {}", path.display()))?;
        let snapshot: MetaSnapshot = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse metadata snapshot {}", path.display()))?;

        tracing::info!(
            "Loaded snapshot {} ({} sessions, {} collections, {} segments)",
            path.display(),
            snapshot.sessions.len(),
            snapshot.collections.len(),
            snapshot.segments.len()
        );

        Ok(Self::from_snapshot(path.display().to_string(), snapshot))
    }
}

#[async_trait(?Send)]
impl MetaStore for SnapshotStore {
    fn source(&self) -> &str {
        &self.source
    }

    async fn list_sessions(&self) -> Result<Vec<Session>> {
        Ok(self.snapshot.sessions.clone())
    }

    async fn list_collections(&self) -> Result<Vec<CollectionInfo>> {
        Ok(self.snapshot.collections.clone())
    }

    async fn get_collection(&self, id: i64) -> Result<CollectionInfo> {
        self.snapshot
            .collections
            .iter()
            .find(|collection| collection.id == id)
            .cloned()
            .with_context(|| format!("collection {id} not found"))
    }

    async fn list_segments(
        &self,
        filter: &dyn for<'a> Fn(&'a SegmentInfo) -> bool,
    ) -> Result<Vec<SegmentInfo>> {
        Ok(self
            .snapshot
            .segments
            .iter()
            .filter(|segment| filter(segment))
            .cloned()
            .collect())
    }

    async fn close(&self) {
        tracing::debug!("Closed metadata snapshot {}", self.source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::SegmentState;

    const SNAPSHOT: &str = r#"
sessions:
  - server_id: 3
    server_name: indexcoord
    address: 10.0.0.3:31000
collections:
  - id: 42
    name: books
    schema:
      fields:
        - field_id: 100
          name: book_id
          is_primary_key: true
        - field_id: 101
          name: embedding
segments:
  - id: 1
    collection_id: 42
    state: Flushed
    binlogs:
      - field_id: 100
        binlogs:
          - log_path: files/insert_log/42/1/100/1
  - id: 2
    collection_id: 7
    state: Compacted
"#;

    #[tokio::test]
    async fn test_load_snapshot_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.yaml");
        std::fs::write(&path, SNAPSHOT).unwrap();

        let store = SnapshotStore::load(&path).await.unwrap();
        assert_eq!(store.source(), path.display().to_string());

        let sessions = store.list_sessions().await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].server_name, "indexcoord");

        let collection = store.get_collection(42).await.unwrap();
        assert_eq!(collection.primary_key().map(|f| f.field_id), Some(100));
        assert!(store.get_collection(9).await.is_err());

        let segments = store
            .list_segments(&|segment| segment.collection_id == 42)
            .await
            .unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].state, SegmentState::Flushed);
        assert_eq!(segments[0].binlogs[0].binlogs.len(), 1);

        // Unrecognized states are tolerated
        let all = store.list_segments(&|_| true).await.unwrap();
        assert_eq!(all[1].state, SegmentState::Unknown);
    }

    #[tokio::test]
    async fn test_load_missing_snapshot_fails() {
        assert!(
            SnapshotStore::load(Path::new("/nonexistent/meta.yaml"))
                .await
                .is_err()
        );
    }
}
