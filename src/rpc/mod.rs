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

//! RPC collaborator
//!
//! `visit` opens a [`Connection`] to one component through a [`Connector`].
//! The connection is owned exclusively by the state created for that visit
//! and is closed when that state is left with `back` or the session ends.

mod http;

use anyhow::Result;
use async_trait::async_trait;
use std::time::Instant;

use crate::meta::Session;

pub use http::{HttpConnector, HttpCoordClient, filter_metrics, management_url};

/// Parameters of a metrics query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsRequest {
    /// Only keep metric families whose name starts with this prefix.
    pub prefix: Option<String>,
}

/// Typed client for one cluster component.
#[async_trait(?Send)]
pub trait CoordClient {
    async fn get_metrics(&self, request: &MetricsRequest) -> Result<String>;

    async fn health(&self) -> Result<String>;

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Opens connections to component sessions.
#[async_trait(?Send)]
pub trait Connector {
    async fn connect(&self, session: &Session) -> Result<Connection>;
}

/// Identity of an open connection.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    pub endpoint: String,
    pub opened_at: Instant,
}

/// An open channel plus the typed client using it.
pub struct Connection {
    client: Box<dyn CoordClient>,
    handle: ConnectionHandle,
}

impl Connection {
    pub fn new(client: Box<dyn CoordClient>, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            handle: ConnectionHandle {
                endpoint: endpoint.into(),
                opened_at: Instant::now(),
            },
        }
    }

    pub fn client(&self) -> &dyn CoordClient {
        self.client.as_ref()
    }

    /// Close the connection, logging instead of failing.
    pub async fn close(self) {
        match self.client.close().await {
            Ok(()) => tracing::debug!(
                "Closed connection to {} after {:?}",
                self.handle.endpoint,
                self.handle.opened_at.elapsed()
            ),
            Err(e) => tracing::warn!(
                "Failed to close connection to {}: {}",
                self.handle.endpoint,
                e
            ),
        }
    }
}
