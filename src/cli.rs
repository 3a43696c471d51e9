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

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "birdwatcher",
    version,
    about = "Interactive inspection shell for vector database clusters",
    long_about = "birdwatcher opens an interactive session against a cluster's metadata snapshot.\nFrom there it can list sessions, collections and segments, visit individual components\nto query their metrics and health, and download primary key binlogs from object storage.",
    after_help = "EXAMPLES:\n  Start with defaults:          birdwatcher\n  Use a specific snapshot:      birdwatcher --snapshot ./meta.yaml\n  Point at a bucket root:       birdwatcher --storage-root /data/minio\n\nInside the session type 'help' for the commands available in the current state."
)]
pub struct Cli {
    #[arg(
        short = 'F',
        long,
        help = "Configuration file path\nConfig loading priority:\n  1. This flag's value\n  2. Current directory (./birdwatcher.yaml)\n  3. User config (~/.config/birdwatcher/config.yaml)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        help = "Metadata snapshot used by 'connect' when no --snapshot is given there"
    )]
    pub snapshot: Option<PathBuf>,

    #[arg(long, help = "Directory whose subdirectories are treated as buckets")]
    pub storage_root: Option<PathBuf>,

    #[arg(long, help = "File used to persist the command history")]
    pub history_file: Option<PathBuf>,

    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,
}
