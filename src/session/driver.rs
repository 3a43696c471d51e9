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

//! The outer read-eval loop

use std::time::{Duration, Instant};

use crate::config::InteractiveConfig;

use super::prompt::{Prompt, PromptError};
use super::state::State;

/// Summary of a finished interactive session.
#[derive(Debug)]
pub struct SessionSummary {
    pub duration: Duration,
    pub commands_processed: usize,
    pub final_label: String,
}

/// Run the session loop from `start` until an exit is requested or an
/// ending state becomes current.
///
/// Read failures leave the current state untouched and the loop retries.
/// An interrupted read is always retried. After `max_read_failures`
/// consecutive end-of-input or I/O failures (0 disables the limit) the loop
/// stops, which covers a permanently closed input stream.
pub async fn run_session(
    start: Box<dyn State>,
    prompt: &mut dyn Prompt,
    config: &InteractiveConfig,
) -> SessionSummary {
    let start_time = Instant::now();
    let mut current = start;
    let mut commands_processed = 0;
    let mut read_failures = 0;

    loop {
        let line = match prompt.read_line(current.label()) {
            Ok(line) => {
                read_failures = 0;
                line
            }
            Err(PromptError::Interrupted) => {
                read_failures = 0;
                tracing::debug!("Prompt interrupted, reading again");
                continue;
            }
            Err(e) => {
                read_failures += 1;
                tracing::debug!("Prompt read failed ({}): {}", read_failures, e);
                if config.max_read_failures > 0 && read_failures >= config.max_read_failures {
                    tracing::warn!(
                        "Giving up after {} consecutive failed reads",
                        read_failures
                    );
                    break;
                }
                continue;
            }
        };

        let transition = current.process(&line, prompt).await;
        let exit = transition.is_exit();
        current = transition.next;
        commands_processed += 1;

        if exit {
            tracing::debug!("Exit requested at {}", current.label());
            break;
        }
        if current.is_ending() {
            tracing::debug!("Reached ending state {}", current.label());
            break;
        }
    }

    current.close().await;

    SessionSummary {
        duration: start_time.elapsed(),
        commands_processed,
        final_label: current.label().to_string(),
    }
}
