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

use anyhow::{Context, Result};
use clap::Parser;
use std::rc::Rc;

use birdwatcher::{
    cli::Cli,
    config::Config,
    rpc::HttpConnector,
    session::{RustylinePrompt, run_session},
    states::{SessionContext, StartState},
    storage::LocalObjectStore,
    utils::init_logging,
};

/// Fold command-line overrides into the loaded configuration.
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(ref snapshot) = cli.snapshot {
        config.meta.snapshot = Some(snapshot.to_string_lossy().into_owned());
    }
    if let Some(ref root) = cli.storage_root {
        config.storage.root = root.to_string_lossy().into_owned();
    }
    if let Some(ref history) = cli.history_file {
        config.interactive.history_file = history.to_string_lossy().into_owned();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut config = Config::load_with_priority(cli.config.as_deref())
        .await
        .context("Failed to load configuration")?;
    apply_overrides(&mut config, &cli);
    tracing::debug!("Effective configuration: {:?}", config);

    let connector = HttpConnector::new(&config.rpc).context("Failed to build RPC client")?;
    let objects = LocalObjectStore::new(config.storage_root());
    let mut prompt = RustylinePrompt::new(
        Some(config.history_path()),
        config.interactive.max_history,
    )?;

    let interactive = config.interactive.clone();
    let ctx = SessionContext::new(config, Box::new(connector), Box::new(objects));
    let start = Box::new(StartState::new(Rc::new(ctx)));

    let summary = run_session(start, &mut prompt, &interactive).await;
    tracing::info!(
        "Session ended in {} after {} command(s) in {:?}",
        summary.final_label,
        summary.commands_processed,
        summary.duration
    );

    Ok(())
}
