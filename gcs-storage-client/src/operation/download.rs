/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fs::Permissions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use aws_sdk_s3::primitives::ByteStream;
use tempfile::NamedTempFile;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::Instrument;

use crate::error;
use crate::types::{require_bucket, require_key};

/// Fluent builder for downloading a single object to a local file
#[derive(Debug)]
pub struct DownloadFluentBuilder {
    handle: Arc<crate::client::Handle>,
    bucket: Option<String>,
    key: Option<String>,
    destination: Option<PathBuf>,
}

/// Response type for a single object download
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct DownloadOutput {
    /// Number of bytes written to the destination file
    pub bytes_written: u64,
}

impl DownloadOutput {
    /// Number of bytes written to the destination file
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl DownloadFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            bucket: None,
            key: None,
            destination: None,
        }
    }

    /// The bucket to download from
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// The key of the object to download
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// The local file to write the object to
    pub fn destination(mut self, path: impl Into<PathBuf>) -> Self {
        self.destination = Some(path.into());
        self
    }

    /// Download the object.
    ///
    /// The body is streamed into a temporary file next to the destination, which replaces the
    /// destination only once the whole object has been written. A failed lookup or transfer
    /// leaves any existing file at the destination untouched.
    ///
    /// A destination that is read-only or a directory when the object is found is refused. It is
    /// not checked again before the rename, so one that becomes read-only during the transfer is
    /// still replaced. A symbolic link is followed and its target replaced; the link itself is
    /// kept. Other hard links to the destination keep the old contents.
    pub async fn send(self) -> Result<DownloadOutput, error::Error> {
        let bucket = self.bucket.unwrap_or_default();
        let key = self.key.unwrap_or_default();
        require_bucket(&bucket)?;
        require_key(&key)?;
        let destination = self
            .destination
            .ok_or_else(|| error::invalid_input("a destination path is required"))?;

        let output = self
            .handle
            .client()
            .get_object()
            .bucket(&bucket)
            .key(&key)
            .send()
            .instrument(tracing::debug_span!("send-get-object", bucket = %bucket, key = %key))
            .await?;

        let destination = resolve_links(destination).await?;
        let existing_permissions = check_writable(&destination).await?;
        let staging = staging_file(&destination)?;
        let mut body = output.body;
        let bytes_written = write_body(&staging, &mut body).await?;
        if let Some(permissions) = existing_permissions {
            fs::set_permissions(staging.path(), permissions).await?;
        }
        // dropping the staging file on any earlier return removes it
        staging.persist(&destination).map_err(|err| err.error)?;

        Ok(DownloadOutput { bytes_written })
    }
}

/// Create the staging file in the destination's directory, so that it can be renamed over the
/// destination.
fn staging_file(destination: &Path) -> io::Result<NamedTempFile> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(".download-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // the mode a newly created file gets, subject to the umask
        builder.permissions(Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Follow symbolic links, so that the rename replaces the link target rather than the link.
///
/// A path that does not exist, including a dangling link, is used as is.
async fn resolve_links(destination: PathBuf) -> Result<PathBuf, error::Error> {
    match fs::canonicalize(&destination).await {
        Ok(resolved) => Ok(resolved),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(destination),
        Err(err) => Err(err.into()),
    }
}

/// Check an existing destination may be replaced, returning its permissions.
async fn check_writable(destination: &Path) -> Result<Option<Permissions>, error::Error> {
    match fs::metadata(destination).await {
        Ok(metadata) if metadata.is_dir() => Err(io::Error::other(format!(
            "destination {} is a directory",
            destination.display()
        ))
        .into()),
        Ok(metadata) if metadata.permissions().readonly() => Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("destination {} is read-only", destination.display()),
        )
        .into()),
        Ok(metadata) => Ok(Some(metadata.permissions())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

async fn write_body(
    staging: &NamedTempFile,
    body: &mut ByteStream,
) -> Result<u64, error::Error> {
    let mut file = fs::File::from_std(staging.as_file().try_clone()?);
    let mut bytes_written = 0u64;
    while let Some(chunk) = body.try_next().await? {
        file.write_all(&chunk).await?;
        bytes_written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(bytes_written)
}
