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

//! Download the primary-key binlogs of a collection from object storage.

use clap::{Arg, ArgMatches};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::config::Config;
use crate::meta::{MetaStore, SegmentInfo};
use crate::session::{CommandNode, Prompt};
use crate::storage::ObjectStore;

/// Reasons the download workflow stopped early.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("failed to create segment folder {}: {source}", path.display())]
    SegmentDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to download {bucket}/{object}: {reason}")]
    Fetch {
        bucket: String,
        object: String,
        reason: String,
    },

    #[error("object path '{0}' has no file name")]
    ObjectName(String),

    #[error("failed to open file {}: {source}", path.display())]
    CreateFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub fn download_pk_command<A>(action: A) -> CommandNode<A> {
    CommandNode::new("download-pk", "download pk column of a collection")
        .arg(
            Arg::new("id")
                .long("id")
                .required(true)
                .value_parser(clap::value_parser!(i64))
                .help("collection id to download"),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .value_parser(clap::value_parser!(PathBuf))
                .help("destination root [default: download.output_dir]"),
        )
        .action(action)
}

/// Run `download-pk`: resolve the pk field, ask for the bucket, then copy files.
pub async fn run_download_pk(
    store: &dyn MetaStore,
    objects: &dyn ObjectStore,
    config: &Config,
    prompt: &mut dyn Prompt,
    matches: &ArgMatches,
) {
    let Some(&collection_id) = matches.get_one::<i64>("id") else {
        eprintln!("{}", "Collection id is required".red());
        return;
    };

    let collection = match store.get_collection(collection_id).await {
        Ok(collection) => collection,
        Err(e) => {
            eprintln!("{} {:#}", "Failed to get collection:".red(), e);
            return;
        }
    };

    let Some(pk_field) = collection.primary_key() else {
        println!("collection pk not found");
        return;
    };

    let segments = match store
        .list_segments(&|segment| segment.collection_id == collection_id)
        .await
    {
        Ok(segments) => segments,
        Err(e) => {
            eprintln!("{} {:#}", "Failed to list segments:".red(), e);
            return;
        }
    };

    let bucket = match prompt.read_line("BucketName") {
        Ok(input) if !input.trim().is_empty() => input.trim().to_string(),
        Ok(_) => match config.storage.bucket.clone() {
            Some(bucket) => bucket,
            None => {
                println!("Bucket name is required");
                return;
            }
        },
        Err(e) => {
            eprintln!("{} {}", "Failed to read bucket name:".red(), e);
            return;
        }
    };

    match objects.bucket_exists(&bucket).await {
        Ok(true) => {}
        Ok(false) => {
            println!("Bucket not exist");
            return;
        }
        Err(e) => {
            eprintln!("{} {:#}", "Cannot access object storage:".red(), e);
            return;
        }
    }

    let dest_root = matches
        .get_one::<PathBuf>("output-dir")
        .cloned()
        .unwrap_or_else(|| config.output_dir());

    match download_binlogs(
        objects,
        &bucket,
        collection_id,
        pk_field.field_id,
        &segments,
        &dest_root,
    )
    .await
    {
        Ok(count) => println!(
            "pk file download completed for collection :{collection_id}, {count} file(s) downloaded"
        ),
        Err(e) => eprintln!("{} {}", "Download aborted:".red(), e),
    }
}

/// Copy every binlog of `field_id` in `segments` to
/// `dest_root/<collection_id>/<segment_id>/<file name>`.
///
/// Failing to create the collection folder is reported but not fatal. Any later
/// failure stops the whole run. Returns the number of files written.
pub async fn download_binlogs(
    objects: &dyn ObjectStore,
    bucket: &str,
    collection_id: i64,
    field_id: i64,
    segments: &[SegmentInfo],
    dest_root: &Path,
) -> Result<usize, DownloadError> {
    let collection_dir = dest_root.join(collection_id.to_string());
    if let Err(e) = fs::create_dir(&collection_dir).await {
        tracing::warn!(
            "Failed to create folder {}: {}",
            collection_dir.display(),
            e
        );
        eprintln!(
            "{} {}: {}",
            "Failed to create folder,".yellow(),
            collection_dir.display(),
            e
        );
    }

    let mut count = 0;
    for segment in segments {
        for field_binlog in segment
            .binlogs
            .iter()
            .filter(|field_binlog| field_binlog.field_id == field_id)
        {
            let folder = collection_dir.join(segment.id.to_string());
            fs::create_dir_all(&folder)
                .await
                .map_err(|source| DownloadError::SegmentDir {
                    path: folder.clone(),
                    source,
                })?;

            for binlog in &field_binlog.binlogs {
                let mut reader = objects.open(bucket, &binlog.log_path).await.map_err(|e| {
                    DownloadError::Fetch {
                        bucket: bucket.to_string(),
                        object: binlog.log_path.clone(),
                        reason: format!("{e:#}"),
                    }
                })?;

                let name = Path::new(&binlog.log_path)
                    .file_name()
                    .ok_or_else(|| DownloadError::ObjectName(binlog.log_path.clone()))?;
                let target = folder.join(name);

                let file = fs::File::create(&target)
                    .await
                    .map_err(|source| DownloadError::CreateFile {
                        path: target.clone(),
                        source,
                    })?;
                let mut writer = BufWriter::new(file);
                let write_error = |source: std::io::Error| DownloadError::Write {
                    path: target.clone(),
                    source,
                };
                tokio::io::copy(&mut reader, &mut writer)
                    .await
                    .map_err(write_error)?;
                writer.flush().await.map_err(write_error)?;

                count += 1;
                tracing::debug!("Downloaded {} to {}", binlog.log_path, target.display());
            }
        }
    }

    Ok(count)
}
