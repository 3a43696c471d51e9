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

//! Terminal state.

use async_trait::async_trait;

use crate::session::{Prompt, State, Transition};

/// A state that ends the session as soon as it becomes current.
pub struct EndingState {
    label: String,
}

impl EndingState {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[async_trait(?Send)]
impl State for EndingState {
    fn label(&self) -> &str {
        &self.label
    }

    async fn process(self: Box<Self>, _line: &str, _prompt: &mut dyn Prompt) -> Transition {
        Transition::exit(self)
    }

    fn is_ending(&self) -> bool {
        true
    }
}
