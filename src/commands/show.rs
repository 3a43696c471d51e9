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

//! Metadata listing commands (`show ...`).

use clap::{Arg, ArgMatches};
use owo_colors::OwoColorize;

use crate::meta::MetaStore;
use crate::session::CommandNode;

/// `show` with its `session`, `collections` and `segments` children.
pub fn show_command<A>(sessions: A, collections: A, segments: A) -> CommandNode<A> {
    CommandNode::new("show", "show cluster metadata")
        .child(CommandNode::new("session", "list registered component sessions").action(sessions))
        .child(
            CommandNode::new("collections", "list collections")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .value_parser(clap::value_parser!(i64))
                        .help("only show the collection with this id"),
                )
                .action(collections),
        )
        .child(
            CommandNode::new("segments", "list segments")
                .arg(
                    Arg::new("collection")
                        .long("collection")
                        .value_parser(clap::value_parser!(i64))
                        .help("only show segments of this collection"),
                )
                .action(segments),
        )
}

pub async fn show_sessions(store: &dyn MetaStore) {
    let sessions = match store.list_sessions().await {
        Ok(sessions) => sessions,
        Err(e) => {
            eprintln!("{} {:#}", "Failed to list sessions:".red(), e);
            return;
        }
    };

    if sessions.is_empty() {
        println!("{}", "No sessions registered".dimmed());
        return;
    }

    for session in &sessions {
        println!(
            "  {} {} {} {}",
            "●".blue(),
            session.server_name.bold(),
            session.server_id.to_string().yellow(),
            session.address.dimmed()
        );
    }
}

pub async fn show_collections(store: &dyn MetaStore, matches: &ArgMatches) {
    let listed = match matches.get_one::<i64>("id") {
        Some(&id) => store.get_collection(id).await.map(|collection| vec![collection]),
        None => store.list_collections().await,
    };
    let collections = match listed {
        Ok(collections) => collections,
        Err(e) => {
            eprintln!("{} {:#}", "Failed to list collections:".red(), e);
            return;
        }
    };

    if collections.is_empty() {
        println!("{}", "No collections found".dimmed());
        return;
    }

    for collection in &collections {
        println!(
            "  {} {} {}",
            "●".blue(),
            collection.id.to_string().yellow(),
            collection.name.bold()
        );
        for field in &collection.schema.fields {
            let marker = if field.is_primary_key { " (pk)" } else { "" };
            println!(
                "    {} {} {}{}",
                "•".dimmed(),
                field.field_id,
                field.name,
                marker.green()
            );
        }
    }
}

pub async fn show_segments(store: &dyn MetaStore, matches: &ArgMatches) {
    let collection = matches.get_one::<i64>("collection").copied();
    let listed = store
        .list_segments(&|segment| collection.is_none_or(|id| segment.collection_id == id))
        .await;
    let segments = match listed {
        Ok(segments) => segments,
        Err(e) => {
            eprintln!("{} {:#}", "Failed to list segments:".red(), e);
            return;
        }
    };

    if segments.is_empty() {
        println!("{}", "No segments found".dimmed());
        return;
    }

    for segment in &segments {
        let binlog_files: usize = segment
            .binlogs
            .iter()
            .map(|field_binlog| field_binlog.binlogs.len())
            .sum();
        println!(
            "  {} segment {} collection {} partition {} {:?} rows {} binlogs {}",
            "●".blue(),
            segment.id.to_string().yellow(),
            segment.collection_id,
            segment.partition_id,
            segment.state,
            segment.num_rows,
            binlog_files
        );
    }
}
