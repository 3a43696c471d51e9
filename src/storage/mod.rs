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

//! Object-storage collaborator used by the download workflow.

mod local;

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::AsyncRead;

pub use local::LocalObjectStore;

/// Byte stream of one stored object.
pub type ObjectReader = Box<dyn AsyncRead + Unpin>;

#[async_trait(?Send)]
pub trait ObjectStore {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Open `object_path` in `bucket` for reading.
    async fn open(&self, bucket: &str, object_path: &str) -> Result<ObjectReader>;
}
