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

//! State scoped to one visited cluster component.

use async_trait::async_trait;
use clap::ValueEnum;
use std::fmt;

use crate::commands::metrics::{healthz_command, metrics_command, show_health, show_metrics};
use crate::meta::Session;
use crate::rpc::Connection;
use crate::session::navigation::{back_command, exit_command, global_util_commands, print_version};
use crate::session::{CmdState, CommandTree, Prompt, State, Transition};

/// Component types that can be visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServiceKind {
    #[value(name = "rootcoord")]
    RootCoord,
    #[value(name = "datacoord")]
    DataCoord,
    #[value(name = "querycoord")]
    QueryCoord,
    #[value(name = "indexcoord")]
    IndexCoord,
    #[value(name = "datanode")]
    DataNode,
    #[value(name = "querynode")]
    QueryNode,
    #[value(name = "indexnode")]
    IndexNode,
    #[value(name = "proxy")]
    Proxy,
}

impl ServiceKind {
    /// Server name the component registers its session under.
    pub fn session_name(self) -> &'static str {
        match self {
            ServiceKind::RootCoord => "rootcoord",
            ServiceKind::DataCoord => "datacoord",
            ServiceKind::QueryCoord => "querycoord",
            ServiceKind::IndexCoord => "indexcoord",
            ServiceKind::DataNode => "datanode",
            ServiceKind::QueryNode => "querynode",
            ServiceKind::IndexNode => "indexnode",
            ServiceKind::Proxy => "proxy",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ServiceKind::RootCoord => "RootCoord",
            ServiceKind::DataCoord => "DataCoord",
            ServiceKind::QueryCoord => "QueryCoord",
            ServiceKind::IndexCoord => "IndexCoord",
            ServiceKind::DataNode => "DataNode",
            ServiceKind::QueryNode => "QueryNode",
            ServiceKind::IndexNode => "IndexNode",
            ServiceKind::Proxy => "Proxy",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone)]
enum CoordAction {
    Metrics,
    Healthz,
    Back,
    Exit,
    Version,
}

/// State entered by `visit`. Owns the connection to the component.
pub struct CoordState {
    base: CmdState<CoordAction>,
    session: Session,
    connection: Option<Connection>,
    parent: Box<dyn State>,
}

impl CoordState {
    pub fn new(
        kind: ServiceKind,
        session: Session,
        connection: Connection,
        parent: Box<dyn State>,
    ) -> Self {
        let label = format!("{}-{}({})", kind, session.server_id, session.address);
        Self {
            base: CmdState::new(label, move || Self::setup_commands(kind)),
            session,
            connection: Some(connection),
            parent,
        }
    }

    fn setup_commands(kind: ServiceKind) -> CommandTree<CoordAction> {
        CommandTree::new(kind.session_name())
            .command(metrics_command(CoordAction::Metrics))
            .command(healthz_command(CoordAction::Healthz))
            .command(back_command(CoordAction::Back))
            .command(exit_command(CoordAction::Exit))
            .commands(global_util_commands(CoordAction::Version))
    }

    async fn back(self: Box<Self>) -> Transition {
        let this = *self;
        if let Some(connection) = this.connection {
            connection.close().await;
        }
        Transition::to(this.parent)
    }
}

#[async_trait(?Send)]
impl State for CoordState {
    fn label(&self) -> &str {
        self.base.label()
    }

    async fn process(self: Box<Self>, line: &str, _prompt: &mut dyn Prompt) -> Transition {
        let mut this = self;
        let Some(invocation) = this.base.take_invocation(line) else {
            return Transition::to(this);
        };

        match invocation.action {
            CoordAction::Metrics => match this.connection.as_ref() {
                Some(connection) => show_metrics(connection.client(), &invocation.matches).await,
                None => eprintln!("Connection to {} is closed", this.session),
            },
            CoordAction::Healthz => match this.connection.as_ref() {
                Some(connection) => show_health(connection.client()).await,
                None => eprintln!("Connection to {} is closed", this.session),
            },
            CoordAction::Back => return this.back().await,
            CoordAction::Exit => return Transition::exit(this),
            CoordAction::Version => print_version(),
        }

        Transition::to(this)
    }

    async fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.close().await;
        }
        self.parent.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_kind_names() {
        let kind = ServiceKind::from_str("querycoord", false).unwrap();
        assert_eq!(kind, ServiceKind::QueryCoord);
        assert_eq!(kind.session_name(), "querycoord");
        assert_eq!(kind.to_string(), "QueryCoord");

        assert!(ServiceKind::from_str("QueryCoord", false).is_err());
        assert_eq!(ServiceKind::value_variants().len(), 8);
    }

    #[test]
    fn test_commands_for_kind() {
        let tree = CoordState::setup_commands(ServiceKind::DataNode);
        assert_eq!(tree.names(), vec!["metrics", "healthz", "back", "exit", "version"]);
    }
}
