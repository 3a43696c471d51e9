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

//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::utils::expand_tilde;

/// Main configuration structure.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub meta: MetaConfig,

    #[serde(default)]
    pub rpc: RpcConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub download: DownloadConfig,

    #[serde(default)]
    pub interactive: InteractiveConfig,
}

/// Metadata source settings.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct MetaConfig {
    /// Path of the metadata snapshot opened by `connect` when no path is given.
    #[serde(default)]
    pub snapshot: Option<String>,
}

/// Settings for connections opened by `visit`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RpcConfig {
    /// Management port exposing /healthz and /metrics on every component.
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

/// Object storage settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one sub-directory per bucket.
    #[serde(default = "default_storage_root")]
    pub root: String,

    /// Bucket used when the bucket prompt is left blank.
    #[serde(default)]
    pub bucket: Option<String>,
}

/// Download workflow settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DownloadConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

/// Interactive session settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InteractiveConfig {
    #[serde(default = "default_history_file")]
    pub history_file: String,

    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Consecutive failed reads tolerated before the session stops (0 = never).
    #[serde(default = "default_max_read_failures")]
    pub max_read_failures: usize,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            metrics_port: default_metrics_port(),
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
            bucket: None,
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl Default for InteractiveConfig {
    fn default() -> Self {
        Self {
            history_file: default_history_file(),
            max_history: default_max_history(),
            max_read_failures: default_max_read_failures(),
        }
    }
}

impl Config {
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.meta
            .snapshot
            .as_deref()
            .map(|path| expand_tilde(PathBuf::from(path).as_path()))
    }

    pub fn storage_root(&self) -> PathBuf {
        expand_tilde(PathBuf::from(&self.storage.root).as_path())
    }

    pub fn output_dir(&self) -> PathBuf {
        expand_tilde(PathBuf::from(&self.download.output_dir).as_path())
    }

    pub fn history_path(&self) -> PathBuf {
        expand_tilde(PathBuf::from(&self.interactive.history_file).as_path())
    }
}

impl RpcConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

// Default value functions for serde
pub(super) fn default_metrics_port() -> u16 {
    9091
}

pub(super) fn default_connect_timeout() -> u64 {
    5
}

pub(super) fn default_request_timeout() -> u64 {
    30
}

pub(super) fn default_storage_root() -> String {
    ".".to_string()
}

pub(super) fn default_output_dir() -> String {
    ".".to_string()
}

pub(super) fn default_history_file() -> String {
    "~/.birdwatcher_history".to_string()
}

pub(super) fn default_max_history() -> usize {
    1000
}

pub(super) fn default_max_read_failures() -> usize {
    16
}
