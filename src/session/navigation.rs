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

//! Navigation and utility commands mounted by every state

use super::tree::CommandNode;

pub fn back_command<A>(action: A) -> CommandNode<A> {
    CommandNode::new("back", "go back to the previous state").action(action)
}

pub fn exit_command<A>(action: A) -> CommandNode<A> {
    CommandNode::new("exit", "close the session and exit").action(action)
}

/// Utilities available everywhere regardless of location.
pub fn global_util_commands<A>(version: A) -> Vec<CommandNode<A>> {
    vec![CommandNode::new("version", "print the birdwatcher version").action(version)]
}

pub fn print_version() {
    println!("birdwatcher {}", env!("CARGO_PKG_VERSION"));
}
