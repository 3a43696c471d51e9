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

//! The state abstraction driven by the session loop

use async_trait::async_trait;

use super::prompt::Prompt;

/// Errors a state hands back to the driver.
///
/// Only the exit sentinel exists: every other failure is reported inside
/// [`State::process`] and never reaches the driver.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("exit requested")]
    Exit,
}

/// Outcome of processing one input line.
///
/// `next` is always a usable state, even when `result` carries the exit
/// sentinel.
pub struct Transition {
    pub next: Box<dyn State>,
    pub result: Result<(), SessionError>,
}

impl Transition {
    /// Remain in (or move to) `next` and keep the loop running.
    pub fn to(next: Box<dyn State>) -> Self {
        Self {
            next,
            result: Ok(()),
        }
    }

    /// Terminate the loop, leaving `current` as the final state.
    pub fn exit(current: Box<dyn State>) -> Self {
        Self {
            next: current,
            result: Err(SessionError::Exit),
        }
    }

    pub fn is_exit(&self) -> bool {
        matches!(self.result, Err(SessionError::Exit))
    }
}

/// One location in the cluster topology.
///
/// Implementations are a closed set (see `crate::states`). A state takes
/// itself by value when processing so that navigation is plain ownership
/// handoff: a child owns its parent, `back` returns the parent and drops
/// the child.
#[async_trait(?Send)]
pub trait State {
    /// Fixed label computed at construction, used as the prompt.
    fn label(&self) -> &str;

    /// Dispatch one line of input and return the state to continue with.
    async fn process(self: Box<Self>, line: &str, prompt: &mut dyn Prompt) -> Transition;

    /// Whether the session should stop as soon as this state becomes current.
    fn is_ending(&self) -> bool {
        false
    }

    /// Release held resources, including those of parent states.
    async fn close(&mut self) {}
}
