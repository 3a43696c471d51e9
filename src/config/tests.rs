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

//! Configuration tests.

use std::path::{Path, PathBuf};

use super::types::Config;
use super::utils::expand_tilde;

#[test]
fn test_expand_tilde() {
    let path = Path::new("~/.birdwatcher_history");
    let expanded = expand_tilde(path);

    if let Some(home) = dirs::home_dir() {
        assert_eq!(expanded, home.join(".birdwatcher_history"));
    }

    // Paths without a leading tilde are left alone
    let path = Path::new("/tmp/~file");
    assert_eq!(expand_tilde(path), PathBuf::from("/tmp/~file"));
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert!(config.meta.snapshot.is_none());
    assert_eq!(config.rpc.metrics_port, 9091);
    assert_eq!(config.rpc.connect_timeout, 5);
    assert_eq!(config.rpc.request_timeout, 30);
    assert_eq!(config.storage.root, ".");
    assert!(config.storage.bucket.is_none());
    assert_eq!(config.download.output_dir, ".");
    assert_eq!(config.interactive.max_history, 1000);
    assert_eq!(config.interactive.max_read_failures, 16);
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
meta:
  snapshot: /data/meta.yaml
rpc:
  metrics_port: 19091
storage:
  root: /var/lib/minio
  bucket: a-bucket
"#;

    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.snapshot_path(), Some(PathBuf::from("/data/meta.yaml")));
    assert_eq!(config.rpc.metrics_port, 19091);
    // Unspecified fields fall back to defaults
    assert_eq!(config.rpc.connect_timeout, 5);
    assert_eq!(config.storage_root(), PathBuf::from("/var/lib/minio"));
    assert_eq!(config.storage.bucket.as_deref(), Some("a-bucket"));
    assert_eq!(config.download.output_dir, ".");
    assert_eq!(config.interactive.max_read_failures, 16);
}

#[test]
fn test_empty_yaml_is_default() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config.rpc.metrics_port, 9091);
}

#[test]
fn test_invalid_yaml_is_error() {
    assert!(Config::from_yaml("rpc: [unclosed").is_err());
    assert!(Config::from_yaml("rpc:\n  metrics_port: not-a-port\n").is_err());
}

#[tokio::test]
async fn test_load_missing_file_uses_defaults() {
    let config = Config::load(Path::new("/nonexistent/birdwatcher/config.yaml"))
        .await
        .unwrap();
    assert_eq!(config.rpc.metrics_port, 9091);
}

#[tokio::test]
async fn test_load_with_priority_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.yaml");
    std::fs::write(&path, "download:\n  output_dir: /tmp/out\n").unwrap();

    let config = Config::load_with_priority(Some(&path)).await.unwrap();
    assert_eq!(config.output_dir(), PathBuf::from("/tmp/out"));

    let missing = dir.path().join("missing.yaml");
    assert!(Config::load_with_priority(Some(&missing)).await.is_err());
}
