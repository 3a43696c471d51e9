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

//! Connections over a component's HTTP management port.

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::RpcConfig;
use crate::meta::Session;

use super::{Connection, Connector, CoordClient, MetricsRequest};

/// Build the management base URL for a session address (`host:port`).
pub fn management_url(address: &str, metrics_port: u16) -> Result<String> {
    let host = match address.rsplit_once(':') {
        Some((host, _)) => host,
        None => address,
    };
    if host.is_empty() {
        anyhow::bail!("Invalid component address: '{address}'");
    }
    Ok(format!("http://{host}:{metrics_port}"))
}

/// Keep the Prometheus exposition lines belonging to metrics with `prefix`.
pub fn filter_metrics(text: &str, prefix: Option<&str>) -> String {
    let Some(prefix) = prefix else {
        return text.to_string();
    };

    text.lines()
        .filter(|line| {
            let name = match line.strip_prefix('#') {
                // "# HELP name ..." and "# TYPE name ..."
                Some(comment) => comment.split_whitespace().nth(1).unwrap_or_default(),
                None => line
                    .split(['{', ' '])
                    .next()
                    .unwrap_or_default(),
            };
            name.starts_with(prefix)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Connector probing `/healthz` before handing out a client.
pub struct HttpConnector {
    http: reqwest::Client,
    metrics_port: u16,
}

impl HttpConnector {
    pub fn new(config: &RpcConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            metrics_port: config.metrics_port,
        })
    }
}

#[async_trait(?Send)]
impl Connector for HttpConnector {
    async fn connect(&self, session: &Session) -> Result<Connection> {
        let base_url = management_url(&session.address, self.metrics_port)?;
        tracing::debug!("Connecting to {} via {}", session, base_url);

        let client = HttpCoordClient {
            http: self.http.clone(),
            base_url: base_url.clone(),
        };
        client
            .health()
            .await
            .with_context(|| format!("Failed to connect to {session}"))?;

        Ok(Connection::new(Box::new(client), base_url))
    }
}

/// Client for one component's management endpoints.
pub struct HttpCoordClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCoordClient {
    async fn get_text(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("Request to {url} was rejected"))?;

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response from {url}"))
    }
}

#[async_trait(?Send)]
impl CoordClient for HttpCoordClient {
    async fn get_metrics(&self, request: &MetricsRequest) -> Result<String> {
        let text = self.get_text("/metrics").await?;
        Ok(filter_metrics(&text, request.prefix.as_deref()))
    }

    async fn health(&self) -> Result<String> {
        self.get_text("/healthz").await
    }

    async fn close(&self) -> Result<()> {
        tracing::trace!("Releasing client for {}", self.base_url);
        Ok(())
    }
}
