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

//! Cluster metadata models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A component registered with the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub server_id: i64,
    pub server_name: String,
    pub address: String,
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} ({})", self.server_name, self.server_id, self.address)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub schema: CollectionSchema,
}

impl CollectionInfo {
    /// The field marked as primary key, if any.
    pub fn primary_key(&self) -> Option<&FieldSchema> {
        self.schema.fields.iter().find(|field| field.is_primary_key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchema {
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub field_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub data_type: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum SegmentState {
    Growing,
    Sealed,
    Flushing,
    Flushed,
    Dropped,
    #[default]
    Unknown,
}

impl From<String> for SegmentState {
    fn from(state: String) -> Self {
        match state.as_str() {
            "Growing" => SegmentState::Growing,
            "Sealed" => SegmentState::Sealed,
            "Flushing" => SegmentState::Flushing,
            "Flushed" => SegmentState::Flushed,
            "Dropped" => SegmentState::Dropped,
            _ => SegmentState::Unknown,
        }
    }
}

/// A storage unit holding a subset of a collection's rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentInfo {
    pub id: i64,
    pub collection_id: i64,
    #[serde(default)]
    pub partition_id: i64,
    #[serde(default)]
    pub state: SegmentState,
    #[serde(default)]
    pub num_rows: i64,
    #[serde(default)]
    pub binlogs: Vec<FieldBinlog>,
}

/// Binlog files persisted for one field of a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldBinlog {
    pub field_id: i64,
    #[serde(default)]
    pub binlogs: Vec<Binlog>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binlog {
    pub log_path: String,
    #[serde(default)]
    pub entries_num: i64,
}
