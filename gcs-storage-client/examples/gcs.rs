/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use aws_sdk_s3::error::DisplayErrorContext;
use clap::Parser;
use gcs_storage_client::blocking::StorageClient;
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Debug, Clone, clap::Parser)]
#[command(name = "gcs")]
#[command(about = "Manages Google Cloud Storage buckets and objects.")]
pub struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::Subcommand)]
enum Command {
    /// Make a bucket
    Mb { bucket: String },

    /// Remove an empty bucket
    Rb { bucket: String },

    /// List the buckets of the project
    LsBuckets,

    /// Check whether a bucket exists
    Exists { bucket: String },

    /// Upload a local file to <GsUri>
    Put {
        #[arg(required = true)]
        source: PathBuf,
        #[arg(required = true)]
        dest: GsUri,
    },

    /// Download <GsUri> to a local file
    Get {
        #[arg(required = true)]
        source: GsUri,
        #[arg(required = true)]
        dest: PathBuf,
    },

    /// List the objects under <GsUri> (gs://bucket or gs://bucket/prefix)
    Ls { uri: GsUri },

    /// Remove a single object
    Rm { uri: GsUri },

    /// Show the metadata of a single object
    Stat { uri: GsUri },
}

#[derive(Clone, Debug)]
struct GsUri {
    bucket: String,
    key: String,
}

impl FromStr for GsUri {
    type Err = BoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s
            .strip_prefix("gs://")
            .ok_or_else(|| format!("`{s}` is not a gs:// URI"))?;
        let (bucket, key) = path.split_once('/').unwrap_or((path, ""));
        Ok(GsUri {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
        })
    }
}

fn run(storage: &StorageClient, command: Command) -> bool {
    use Command::*;
    match command {
        Mb { bucket } => storage.create_bucket(&bucket),
        Rb { bucket } => storage.delete_bucket(&bucket),
        LsBuckets => {
            for name in storage.list_buckets() {
                println!("gs://{name}");
            }
            true
        }
        Exists { bucket } => {
            let exists = storage.bucket_exists(&bucket);
            println!("{exists}");
            exists
        }
        Put { source, dest } => storage.upload_file(&dest.bucket, &source, &dest.key),
        Get { source, dest } => storage.download_file(&source.bucket, &source.key, &dest),
        Ls { uri } => {
            for key in storage.list_files(&uri.bucket, &uri.key) {
                println!("gs://{}/{key}", uri.bucket);
            }
            true
        }
        Rm { uri } => storage.delete_file(&uri.bucket, &uri.key),
        Stat { uri } => match storage.get_file_metadata(&uri.bucket, &uri.key) {
            Some(meta) => {
                println!("name:         {}", meta.name());
                println!("size:         {}", meta.size());
                println!("content type: {}", meta.content_type().unwrap_or("-"));
                if let Some(updated) = meta.updated() {
                    println!("updated:      {updated}");
                }
                println!("checksum:     {}", meta.checksum().unwrap_or("-"));
                true
            }
            None => false,
        },
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let storage = match StorageClient::from_env() {
        Ok(storage) => storage,
        Err(err) => {
            tracing::error!("failed to configure client: {}", DisplayErrorContext(&err));
            return ExitCode::FAILURE;
        }
    };

    if run(&storage, args.command) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
