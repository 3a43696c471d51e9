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

//! Shared fixtures for session integration tests.

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use birdwatcher::config::Config;
use birdwatcher::meta::{
    Binlog, CollectionInfo, CollectionSchema, FieldBinlog, FieldSchema, MetaSnapshot, SegmentInfo,
    SegmentState, Session, SnapshotStore,
};
use birdwatcher::rpc::{Connection, Connector, CoordClient, MetricsRequest};
use birdwatcher::session::State;
use birdwatcher::states::{MetaState, SessionContext, StartState};
use birdwatcher::storage::LocalObjectStore;

pub const SNAPSHOT_SOURCE: &str = "fixture";

/// Everything the fake RPC collaborators observed.
#[derive(Debug, Default)]
pub struct RpcLog {
    pub connects: Vec<String>,
    pub requests: Vec<MetricsRequest>,
    pub health_checks: usize,
    pub closes: usize,
}

pub type SharedLog = Rc<RefCell<RpcLog>>;

pub struct FakeConnector {
    log: SharedLog,
    refuse: bool,
}

impl FakeConnector {
    pub fn new(log: SharedLog) -> Self {
        Self { log, refuse: false }
    }

    pub fn refusing(log: SharedLog) -> Self {
        Self { log, refuse: true }
    }
}

#[async_trait(?Send)]
impl Connector for FakeConnector {
    async fn connect(&self, session: &Session) -> Result<Connection> {
        if self.refuse {
            anyhow::bail!("connection refused by {}", session.address);
        }
        self.log.borrow_mut().connects.push(session.to_string());
        let client = FakeClient {
            log: Rc::clone(&self.log),
        };
        Ok(Connection::new(Box::new(client), session.address.clone()))
    }
}

struct FakeClient {
    log: SharedLog,
}

#[async_trait(?Send)]
impl CoordClient for FakeClient {
    async fn get_metrics(&self, request: &MetricsRequest) -> Result<String> {
        self.log.borrow_mut().requests.push(request.clone());
        Ok("milvus_up 1".to_string())
    }

    async fn health(&self) -> Result<String> {
        self.log.borrow_mut().health_checks += 1;
        Ok("OK".to_string())
    }

    async fn close(&self) -> Result<()> {
        self.log.borrow_mut().closes += 1;
        Ok(())
    }
}

pub fn session(name: &str, id: i64, address: &str) -> Session {
    Session {
        server_id: id,
        server_name: name.to_string(),
        address: address.to_string(),
    }
}

pub fn segment(id: i64, collection_id: i64, field_binlogs: Vec<(i64, Vec<&str>)>) -> SegmentInfo {
    SegmentInfo {
        id,
        collection_id,
        partition_id: 1,
        state: SegmentState::Flushed,
        num_rows: 100,
        binlogs: field_binlogs
            .into_iter()
            .map(|(field_id, paths)| FieldBinlog {
                field_id,
                binlogs: paths
                    .into_iter()
                    .map(|path| Binlog {
                        log_path: path.to_string(),
                        entries_num: 100,
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Cluster with one querycoord, two querynodes and collection 42 whose pk is field 7.
pub fn cluster_snapshot() -> MetaSnapshot {
    MetaSnapshot {
        sessions: vec![
            session("querycoord", 1, "10.0.0.1:19531"),
            session("querynode", 10, "10.0.0.10:21123"),
            session("querynode", 11, "10.0.0.11:21123"),
        ],
        collections: vec![
            CollectionInfo {
                id: 42,
                name: "books".to_string(),
                schema: CollectionSchema {
                    fields: vec![
                        FieldSchema {
                            field_id: 7,
                            name: "book_id".to_string(),
                            is_primary_key: true,
                            data_type: Some("Int64".to_string()),
                        },
                        FieldSchema {
                            field_id: 8,
                            name: "embedding".to_string(),
                            is_primary_key: false,
                            data_type: Some("FloatVector".to_string()),
                        },
                    ],
                },
            },
            CollectionInfo {
                id: 43,
                name: "no_pk".to_string(),
                schema: CollectionSchema::default(),
            },
        ],
        segments: vec![
            segment(1, 42, vec![(7, vec!["a/b.log"]), (8, vec!["a/vec.log"])]),
            segment(5, 99, vec![(7, vec!["other/c.log"])]),
        ],
    }
}

/// Config pointing storage and downloads into `dir`.
pub fn test_config(dir: &Path) -> Config {
    let mut config = Config::default();
    config.storage.root = dir.join("storage").to_string_lossy().into_owned();
    config.download.output_dir = dir.join("out").to_string_lossy().into_owned();
    config.interactive.max_read_failures = 1;
    config
}

pub fn context(config: Config, connector: FakeConnector) -> Rc<SessionContext> {
    let objects = LocalObjectStore::new(config.storage_root());
    Rc::new(SessionContext::new(
        config,
        Box::new(connector),
        Box::new(objects),
    ))
}

/// A meta state over [`cluster_snapshot`] with the start state as parent.
pub fn meta_state(ctx: &Rc<SessionContext>) -> Box<MetaState> {
    let parent: Box<dyn State> = Box::new(StartState::new(Rc::clone(ctx)));
    let store = SnapshotStore::from_snapshot(SNAPSHOT_SOURCE, cluster_snapshot());
    Box::new(MetaState::new(Box::new(store), Rc::clone(ctx), Some(parent)))
}

pub fn meta_label() -> String {
    format!("Meta({SNAPSHOT_SOURCE})")
}
