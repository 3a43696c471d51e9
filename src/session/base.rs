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

//! Shared dispatch behavior for every state

use super::tree::{CommandTree, Invocation};

/// Command tree ownership shared by all concrete states.
///
/// The tree is discarded and rebuilt from `setup` after every dispatch, so
/// each call starts from the declared defaults no matter what the previous
/// command parsed.
pub struct CmdState<A> {
    label: String,
    tree: CommandTree<A>,
    setup: Box<dyn Fn() -> CommandTree<A>>,
}

impl<A: Clone> CmdState<A> {
    pub fn new(label: impl Into<String>, setup: impl Fn() -> CommandTree<A> + 'static) -> Self {
        let tree = setup();
        Self {
            label: label.into(),
            tree,
            setup: Box::new(setup),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tree(&self) -> &CommandTree<A> {
        &self.tree
    }

    /// Parse `line`, rebuild the tree, and return the matched invocation.
    ///
    /// Unmatched input and argument errors are printed and yield `None`.
    pub fn take_invocation(&mut self, line: &str) -> Option<Invocation<A>> {
        let dispatched = self.tree.dispatch(line);
        self.reset();

        match dispatched {
            Ok(invocation) => invocation,
            Err(err) => {
                tracing::debug!("Dispatch failed in {}: {}", self.label, err);
                err.report();
                None
            }
        }
    }

    /// Replace the tree with a fresh one from the setup routine.
    pub fn reset(&mut self) {
        self.tree = (self.setup)();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tree::CommandNode;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Action {
        Ping,
    }

    #[test]
    fn test_tree_rebuilt_after_every_dispatch() {
        let builds = Rc::new(Cell::new(0));
        let counter = Rc::clone(&builds);
        let mut state = CmdState::new("test", move || {
            counter.set(counter.get() + 1);
            CommandTree::new("test").command(CommandNode::new("ping", "").action(Action::Ping))
        });
        assert_eq!(builds.get(), 1);

        assert!(state.take_invocation("ping").is_some());
        assert_eq!(builds.get(), 2);

        assert!(state.take_invocation("pong").is_none());
        assert_eq!(builds.get(), 3);

        assert_eq!(state.tree().names(), vec!["ping"]);
        assert_eq!(state.label(), "test");
    }
}
