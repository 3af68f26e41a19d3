/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! A synchronous façade over [`Client`].
//!
//! Every [`StorageClient`] operation is one blocking round trip. Failures are not returned to
//! the caller: they are logged (target `gcs_storage_client::blocking`) and projected onto a
//! sentinel value. A missing bucket or object is logged at `WARN`, every other failure at
//! `ERROR`. Use [`StorageClient::client`] when the cause of a failure matters.
//!
//! The façade drives its own current-thread runtime and must not be called from within an
//! async context.

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::path::Path;

use aws_smithy_types::error::display::DisplayErrorContext;
use tokio::runtime::Runtime;

use crate::config::ConfigLoader;
use crate::error::{self, ErrorKind};
use crate::types::ObjectMetadata;
use crate::{Client, Config};

/// Blocking Google Cloud Storage client.
///
/// # Examples
///
/// ```no_run
/// let storage = gcs_storage_client::blocking::StorageClient::from_env()?;
/// if storage.upload_file("my-bucket", "report.csv", "reports/2024/report.csv") {
///     println!("{:?}", storage.get_file_metadata("my-bucket", "reports/2024/report.csv"));
/// }
/// # Ok::<(), gcs_storage_client::error::Error>(())
/// ```
#[derive(Debug)]
pub struct StorageClient {
    client: Client,
    runtime: Runtime,
    log_sink: Option<tracing::Dispatch>,
}

impl StorageClient {
    /// Create a client configured from the environment (and a `.env` file, if present).
    ///
    /// Fails with [`ErrorKind::ConfigInvalid`] if the project or credentials cannot be resolved.
    pub fn from_env() -> Result<Self, error::Error> {
        Self::from_loader(crate::from_env())
    }

    /// Create a client from an explicitly configured loader
    pub fn from_loader(loader: ConfigLoader) -> Result<Self, error::Error> {
        let runtime = build_runtime()?;
        let config = runtime.block_on(loader.load())?;
        Ok(Self {
            client: Client::new(config),
            runtime,
            log_sink: None,
        })
    }

    /// Create a client from a resolved config
    pub fn new(config: Config) -> Result<Self, error::Error> {
        Self::from_client(Client::new(config))
    }

    /// Wrap an existing async client
    pub fn from_client(client: Client) -> Result<Self, error::Error> {
        Ok(Self {
            client,
            runtime: build_runtime()?,
            log_sink: None,
        })
    }

    /// Send every log event of this client to `dispatch` instead of the default subscriber.
    pub fn with_log_sink(mut self, dispatch: tracing::Dispatch) -> Self {
        self.log_sink = Some(dispatch);
        self
    }

    /// The underlying async client, whose operations return typed errors
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Create a bucket in the configured project. Returns `true` on success.
    pub fn create_bucket(&self, bucket_name: &str) -> bool {
        let call = Call::new("create_bucket").bucket(bucket_name);
        let create = self.client.create_bucket().bucket(bucket_name).send();
        self.run(&call, create, |_| call.succeeded(format_args!("created bucket")))
            .is_some()
    }

    /// Delete an empty bucket. Returns `true` on success.
    pub fn delete_bucket(&self, bucket_name: &str) -> bool {
        let call = Call::new("delete_bucket").bucket(bucket_name);
        let delete = self.client.delete_bucket().bucket(bucket_name).send();
        self.run(&call, delete, |_| call.succeeded(format_args!("deleted bucket")))
            .is_some()
    }

    /// Names of all buckets in the project.
    ///
    /// An empty result is also returned on failure.
    pub fn list_buckets(&self) -> Vec<String> {
        let call = Call::new("list_buckets");
        self.run(&call, self.client.list_buckets().send(), |names| {
            call.queried(format_args!("listed {} buckets", names.len()))
        })
        .unwrap_or_default()
    }

    /// Whether the bucket exists.
    ///
    /// `false` is also returned when the check itself failed.
    pub fn bucket_exists(&self, bucket_name: &str) -> bool {
        let call = Call::new("bucket_exists").bucket(bucket_name);
        let exists = self.client.bucket_exists().bucket(bucket_name).send();
        self.run(&call, exists, |exists| {
            call.queried(format_args!("bucket exists: {exists}"))
        })
        .unwrap_or(false)
    }

    /// Upload a local file to `dest_key`, overwriting any existing object. Returns `true` on
    /// success.
    pub fn upload_file(
        &self,
        bucket_name: &str,
        source_path: impl AsRef<Path>,
        dest_key: &str,
    ) -> bool {
        let source_path = source_path.as_ref();
        let call = Call::new("upload_file")
            .bucket(bucket_name)
            .key(dest_key)
            .path(source_path);
        let upload = self
            .client
            .upload()
            .bucket(bucket_name)
            .key(dest_key)
            .source(source_path)
            .send();
        self.run(&call, upload, |output| {
            call.succeeded(format_args!("uploaded {} bytes", output.content_length()))
        })
        .is_some()
    }

    /// Download `source_key` into a local file, creating or overwriting it. Returns `true` on
    /// success.
    pub fn download_file(
        &self,
        bucket_name: &str,
        source_key: &str,
        dest_path: impl AsRef<Path>,
    ) -> bool {
        let dest_path = dest_path.as_ref();
        let call = Call::new("download_file")
            .bucket(bucket_name)
            .key(source_key)
            .path(dest_path);
        let download = self
            .client
            .download()
            .bucket(bucket_name)
            .key(source_key)
            .destination(dest_path)
            .send();
        self.run(&call, download, |output| {
            call.succeeded(format_args!("downloaded {} bytes", output.bytes_written()))
        })
        .is_some()
    }

    /// Keys of the objects in the bucket starting with `prefix`; an empty prefix lists every
    /// object.
    ///
    /// An empty result is also returned on failure.
    pub fn list_files(&self, bucket_name: &str, prefix: &str) -> Vec<String> {
        let call = Call::new("list_files").bucket(bucket_name).prefix(prefix);
        let list = self
            .client
            .list_objects()
            .bucket(bucket_name)
            .prefix(prefix)
            .send();
        self.run(&call, list, |keys| {
            call.queried(format_args!("listed {} objects", keys.len()))
        })
        .unwrap_or_default()
    }

    /// Delete a single object. Returns `false` if the object does not exist or could not be
    /// deleted.
    pub fn delete_file(&self, bucket_name: &str, key: &str) -> bool {
        let call = Call::new("delete_file").bucket(bucket_name).key(key);
        let delete = self
            .client
            .delete_object()
            .bucket(bucket_name)
            .key(key)
            .send();
        self.run(&call, delete, |_| call.succeeded(format_args!("deleted object")))
            .is_some()
    }

    /// Metadata of a single object, or `None` if it does not exist or could not be fetched.
    pub fn get_file_metadata(&self, bucket_name: &str, key: &str) -> Option<ObjectMetadata> {
        let call = Call::new("get_file_metadata").bucket(bucket_name).key(key);
        let head = self
            .client
            .object_metadata()
            .bucket(bucket_name)
            .key(key)
            .send();
        self.run(&call, head, |meta| {
            call.queried(format_args!("object is {} bytes", meta.size()))
        })
    }

    /// Drive `fut` to completion and log the outcome.
    ///
    /// The log sink (when set) is the default subscriber for the whole call, so events and
    /// spans from the async layer reach it too.
    fn run<T, F, S>(&self, call: &Call<'_>, fut: F, on_success: S) -> Option<T>
    where
        F: Future<Output = Result<T, error::Error>>,
        S: FnOnce(&T),
    {
        let drive = || match self.runtime.block_on(fut) {
            Ok(value) => {
                on_success(&value);
                Some(value)
            }
            Err(err) => {
                call.failed(&err);
                None
            }
        };
        match &self.log_sink {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, drive),
            None => drive(),
        }
    }
}

fn build_runtime() -> Result<Runtime, error::Error> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(error::from_kind(ErrorKind::RuntimeError))
}

/// Log context of a single façade call
struct Call<'a> {
    operation: &'static str,
    bucket: Option<&'a str>,
    key: Option<&'a str>,
    prefix: Option<&'a str>,
    path: Option<Cow<'a, str>>,
}

impl<'a> Call<'a> {
    fn new(operation: &'static str) -> Self {
        Self {
            operation,
            bucket: None,
            key: None,
            prefix: None,
            path: None,
        }
    }

    fn bucket(mut self, bucket: &'a str) -> Self {
        self.bucket = Some(bucket);
        self
    }

    fn key(mut self, key: &'a str) -> Self {
        self.key = Some(key);
        self
    }

    fn prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = Some(prefix);
        self
    }

    fn path(mut self, path: &'a Path) -> Self {
        self.path = Some(path.to_string_lossy());
        self
    }

    /// A state-changing call completed
    fn succeeded(&self, message: fmt::Arguments<'_>) {
        tracing::info!(
            operation = self.operation,
            bucket = self.bucket,
            key = self.key,
            prefix = self.prefix,
            path = self.path.as_deref(),
            "{message}"
        );
    }

    /// A read-only call completed
    fn queried(&self, message: fmt::Arguments<'_>) {
        tracing::debug!(
            operation = self.operation,
            bucket = self.bucket,
            key = self.key,
            prefix = self.prefix,
            path = self.path.as_deref(),
            "{message}"
        );
    }

    fn failed(&self, err: &error::Error) {
        let error = DisplayErrorContext(err);
        if err.is_not_found() {
            tracing::warn!(
                operation = self.operation,
                bucket = self.bucket,
                key = self.key,
                prefix = self.prefix,
                path = self.path.as_deref(),
                error = %error,
                "{} failed: not found",
                self.operation
            );
        } else {
            tracing::error!(
                operation = self.operation,
                bucket = self.bucket,
                key = self.key,
                prefix = self.prefix,
                path = self.path.as_deref(),
                error = %error,
                "{} failed: {}",
                self.operation,
                err
            );
        }
    }
}
