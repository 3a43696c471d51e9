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

//! State attached to a metadata store.

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Arg, ArgMatches};
use owo_colors::OwoColorize;
use std::rc::Rc;

use crate::commands::download_pk::{download_pk_command, run_download_pk};
use crate::commands::show::{show_collections, show_command, show_segments, show_sessions};
use crate::meta::{MetaStore, Session};
use crate::session::navigation::{back_command, exit_command, global_util_commands, print_version};
use crate::session::{CmdState, CommandNode, CommandTree, Prompt, State, Transition};

use super::{CoordState, EndingState, ServiceKind, SessionContext};

#[derive(Debug, Clone)]
enum MetaAction {
    ShowSessions,
    ShowCollections,
    ShowSegments,
    Visit,
    DownloadPk,
    Disconnect,
    Back,
    Exit,
    Version,
}

fn visit_command<A>(action: A) -> CommandNode<A> {
    CommandNode::new("visit", "connect to a component and enter its state")
        .arg(
            Arg::new("kind")
                .required(true)
                .value_parser(clap::value_parser!(ServiceKind))
                .help("component type"),
        )
        .arg(
            Arg::new("id")
                .long("id")
                .value_parser(clap::value_parser!(i64))
                .help("server id of the component (prompted when several match)"),
        )
        .action(action)
}

/// State holding an open metadata store.
pub struct MetaState {
    base: CmdState<MetaAction>,
    store: Box<dyn MetaStore>,
    ctx: Rc<SessionContext>,
    parent: Option<Box<dyn State>>,
}

impl MetaState {
    pub fn new(
        store: Box<dyn MetaStore>,
        ctx: Rc<SessionContext>,
        parent: Option<Box<dyn State>>,
    ) -> Self {
        let label = format!("Meta({})", store.source());
        Self {
            base: CmdState::new(label, Self::setup_commands),
            store,
            ctx,
            parent,
        }
    }

    fn setup_commands() -> CommandTree<MetaAction> {
        CommandTree::new("birdwatcher")
            .command(show_command(
                MetaAction::ShowSessions,
                MetaAction::ShowCollections,
                MetaAction::ShowSegments,
            ))
            .command(visit_command(MetaAction::Visit))
            .command(download_pk_command(MetaAction::DownloadPk))
            .command(
                CommandNode::new("disconnect", "close the metadata store and end the session")
                    .action(MetaAction::Disconnect),
            )
            .command(back_command(MetaAction::Back))
            .command(exit_command(MetaAction::Exit))
            .commands(global_util_commands(MetaAction::Version))
    }

    /// Find the session to visit, asking the user when several qualify.
    async fn select_session(
        &self,
        kind: ServiceKind,
        id: Option<i64>,
        prompt: &mut dyn Prompt,
    ) -> Result<Session> {
        let mut candidates: Vec<Session> = self
            .store
            .list_sessions()
            .await?
            .into_iter()
            .filter(|session| session.server_name == kind.session_name())
            .filter(|session| id.is_none_or(|id| session.server_id == id))
            .collect();

        match (candidates.len(), id) {
            (0, Some(id)) => anyhow::bail!("No {kind} session with id {id}"),
            (0, None) => anyhow::bail!("No {kind} session registered"),
            (1, _) => return Ok(candidates.remove(0)),
            _ => {}
        }

        let items: Vec<String> = candidates.iter().map(ToString::to_string).collect();
        let index = prompt.select(&format!("Select {kind} session"), &items)?;
        candidates
            .into_iter()
            .nth(index)
            .context("Selected session does not exist")
    }

    async fn visit(self: Box<Self>, matches: &ArgMatches, prompt: &mut dyn Prompt) -> Transition {
        let Some(&kind) = matches.get_one::<ServiceKind>("kind") else {
            return Transition::to(self);
        };
        let id = matches.get_one::<i64>("id").copied();

        let selected = self.select_session(kind, id, prompt).await;
        let session = match selected {
            Ok(session) => session,
            Err(e) => {
                eprintln!("✗ {:#}", e);
                return Transition::to(self);
            }
        };

        let connected = self.ctx.connector.connect(&session).await;
        match connected {
            Ok(connection) => {
                println!("✓ Connected to {}", session.to_string().green());
                Transition::to(Box::new(CoordState::new(kind, session, connection, self)))
            }
            Err(e) => {
                eprintln!("✗ Failed to connect to {}: {:#}", session.to_string().red(), e);
                Transition::to(self)
            }
        }
    }

    async fn back(self: Box<Self>) -> Transition {
        let mut this = self;
        match this.parent.take() {
            Some(parent) => {
                this.store.close().await;
                Transition::to(parent)
            }
            None => {
                println!("Already at the top level");
                Transition::to(this)
            }
        }
    }

    async fn disconnect(self: Box<Self>) -> Transition {
        let mut this = self;
        this.store.close().await;
        if let Some(mut parent) = this.parent.take() {
            parent.close().await;
        }
        Transition::to(Box::new(EndingState::new(this.base.label())))
    }
}

#[async_trait(?Send)]
impl State for MetaState {
    fn label(&self) -> &str {
        self.base.label()
    }

    async fn process(self: Box<Self>, line: &str, prompt: &mut dyn Prompt) -> Transition {
        let mut this = self;
        let Some(invocation) = this.base.take_invocation(line) else {
            return Transition::to(this);
        };

        let matches = &invocation.matches;
        match invocation.action {
            MetaAction::ShowSessions => show_sessions(this.store.as_ref()).await,
            MetaAction::ShowCollections => show_collections(this.store.as_ref(), matches).await,
            MetaAction::ShowSegments => show_segments(this.store.as_ref(), matches).await,
            MetaAction::DownloadPk => {
                run_download_pk(
                    this.store.as_ref(),
                    this.ctx.objects.as_ref(),
                    &this.ctx.config,
                    prompt,
                    matches,
                )
                .await
            }
            MetaAction::Visit => return this.visit(matches, prompt).await,
            MetaAction::Disconnect => return this.disconnect().await,
            MetaAction::Back => return this.back().await,
            MetaAction::Exit => return Transition::exit(this),
            MetaAction::Version => print_version(),
        }

        Transition::to(this)
    }

    async fn close(&mut self) {
        self.store.close().await;
        if let Some(parent) = self.parent.as_mut() {
            parent.close().await;
        }
    }
}
