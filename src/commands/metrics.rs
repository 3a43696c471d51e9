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

//! Commands served by a visited component.

use clap::{Arg, ArgMatches};
use owo_colors::OwoColorize;

use crate::rpc::{CoordClient, MetricsRequest};
use crate::session::CommandNode;

pub fn metrics_command<A>(action: A) -> CommandNode<A> {
    CommandNode::new("metrics", "show the metrics provided by this component")
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .help("only show metric families whose name starts with this prefix"),
        )
        .action(action)
}

pub fn healthz_command<A>(action: A) -> CommandNode<A> {
    CommandNode::new("healthz", "query the health endpoint of this component").action(action)
}

pub async fn show_metrics(client: &dyn CoordClient, matches: &ArgMatches) {
    let request = MetricsRequest {
        prefix: matches.get_one::<String>("prefix").cloned(),
    };

    match client.get_metrics(&request).await {
        Ok(text) if text.trim().is_empty() => println!("{}", "No metrics".dimmed()),
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("{} {:#}", "Failed to get metrics:".red(), e),
    }
}

pub async fn show_health(client: &dyn CoordClient) {
    match client.health().await {
        Ok(status) => println!("Health: {}", status.trim().green()),
        Err(e) => eprintln!("{} {:#}", "Health check failed:".red(), e),
    }
}
