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

//! Concrete session states
//!
//! The variant set is closed:
//!
//! - [`StartState`]: the root, not attached to anything (`Offline`)
//! - [`MetaState`]: attached to a metadata store
//! - [`CoordState`]: visiting one component, owns its [`Connection`](crate::rpc::Connection)
//! - [`EndingState`]: terminates the session as soon as it becomes current

mod coord;
mod ending;
mod meta;
mod start;

use crate::config::Config;
use crate::rpc::Connector;
use crate::storage::ObjectStore;

pub use coord::{CoordState, ServiceKind};
pub use ending::EndingState;
pub use meta::MetaState;
pub use start::StartState;

/// Collaborators shared by every state of one session.
pub struct SessionContext {
    pub config: Config,
    pub connector: Box<dyn Connector>,
    pub objects: Box<dyn ObjectStore>,
}

impl SessionContext {
    pub fn new(
        config: Config,
        connector: Box<dyn Connector>,
        objects: Box<dyn ObjectStore>,
    ) -> Self {
        Self {
            config,
            connector,
            objects,
        }
    }
}
