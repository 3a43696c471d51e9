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

//! Root state of every session.

use async_trait::async_trait;
use clap::{Arg, ArgMatches};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::rc::Rc;

use crate::meta::{MetaStore, SnapshotStore};
use crate::session::navigation::{exit_command, global_util_commands, print_version};
use crate::session::{CmdState, CommandNode, CommandTree, Prompt, State, Transition};

use super::{MetaState, SessionContext};

#[derive(Debug, Clone)]
enum StartAction {
    Connect,
    Version,
    Exit,
}

/// The offline root. Has no parent and holds no connection.
pub struct StartState {
    base: CmdState<StartAction>,
    ctx: Rc<SessionContext>,
}

impl StartState {
    pub const LABEL: &'static str = "Offline";

    pub fn new(ctx: Rc<SessionContext>) -> Self {
        Self {
            base: CmdState::new(Self::LABEL, Self::setup_commands),
            ctx,
        }
    }

    fn setup_commands() -> CommandTree<StartAction> {
        CommandTree::new("birdwatcher")
            .command(
                CommandNode::new("connect", "connect to a metadata snapshot")
                    .arg(
                        Arg::new("snapshot")
                            .long("snapshot")
                            .value_parser(clap::value_parser!(PathBuf))
                            .help("snapshot file to open (defaults to meta.snapshot)"),
                    )
                    .action(StartAction::Connect),
            )
            .command(exit_command(StartAction::Exit))
            .commands(global_util_commands(StartAction::Version))
    }

    async fn connect(self: Box<Self>, matches: &ArgMatches) -> Transition {
        let path = matches
            .get_one::<PathBuf>("snapshot")
            .cloned()
            .or_else(|| self.ctx.config.snapshot_path());
        let Some(path) = path else {
            println!("No snapshot given. Use --snapshot or set meta.snapshot in the config file");
            return Transition::to(self);
        };

        match SnapshotStore::load(&path).await {
            Ok(store) => {
                println!("✓ Connected to {}", store.source().green());
                let ctx = Rc::clone(&self.ctx);
                let parent: Box<dyn State> = self;
                Transition::to(Box::new(MetaState::new(
                    Box::new(store),
                    ctx,
                    Some(parent),
                )))
            }
            Err(e) => {
                eprintln!("✗ {} {:#}", "Failed to connect:".red(), e);
                Transition::to(self)
            }
        }
    }
}

#[async_trait(?Send)]
impl State for StartState {
    fn label(&self) -> &str {
        self.base.label()
    }

    async fn process(self: Box<Self>, line: &str, _prompt: &mut dyn Prompt) -> Transition {
        let mut this = self;
        let Some(invocation) = this.base.take_invocation(line) else {
            return Transition::to(this);
        };

        match invocation.action {
            StartAction::Connect => this.connect(&invocation.matches).await,
            StartAction::Version => {
                print_version();
                Transition::to(this)
            }
            StartAction::Exit => Transition::exit(this),
        }
    }
}
