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

//! Session navigation core
//!
//! The interactive session is a loop over a single "current" [`State`].
//! Each state represents one location in the cluster topology and owns the
//! command vocabulary for that location.
//!
//! ## Architecture
//!
//! - `state`: the [`State`] trait, [`Transition`] and the exit sentinel
//! - `tree`: command trees built from clap commands plus action tags
//! - `base`: [`CmdState`], the shared dispatch/rebuild behavior
//! - `navigation`: fixed commands every state mounts (back, exit, version)
//! - `prompt`: the prompt collaborator (rustyline and scripted)
//! - `driver`: the outer read-eval loop
//!
//! Data threaded through the core is the state value itself. Cluster data
//! flows through collaborators and never enters these types.

mod base;
mod driver;
pub mod navigation;
mod prompt;
mod state;
mod tree;

pub use base::CmdState;
pub use driver::{SessionSummary, run_session};
pub use prompt::{Prompt, PromptError, RustylinePrompt, ScriptedPrompt};
pub use state::{SessionError, State, Transition};
pub use tree::{CommandNode, CommandTree, DispatchError, Invocation};
