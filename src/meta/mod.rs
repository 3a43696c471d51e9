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

//! Metadata-store collaborator
//!
//! Peripheral commands enumerate cluster objects through [`MetaStore`]. The
//! navigation core only passes the store around; it never interprets what
//! the store returns.

mod snapshot;
mod types;

use anyhow::Result;
use async_trait::async_trait;

pub use snapshot::{MetaSnapshot, SnapshotStore};
pub use types::{
    Binlog, CollectionInfo, CollectionSchema, FieldBinlog, FieldSchema, SegmentInfo, SegmentState,
    Session,
};

/// Read access to cluster metadata.
#[async_trait(?Send)]
pub trait MetaStore {
    /// Human-readable identity of the store, used in state labels.
    fn source(&self) -> &str;

    /// Registered component sessions.
    async fn list_sessions(&self) -> Result<Vec<Session>>;

    async fn list_collections(&self) -> Result<Vec<CollectionInfo>>;

    async fn get_collection(&self, id: i64) -> Result<CollectionInfo>;

    /// Segments accepted by `filter`.
    async fn list_segments(
        &self,
        filter: &dyn for<'a> Fn(&'a SegmentInfo) -> bool,
    ) -> Result<Vec<SegmentInfo>>;

    /// Release the underlying client.
    async fn close(&self) {}
}
