/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::PathBuf;
use std::sync::Arc;

use aws_sdk_s3::primitives::ByteStream;
use tracing::Instrument;

use crate::error::{self, ErrorKind};
use crate::types::{require_bucket, require_key, unquote_etag};

/// Fluent builder for uploading a local file as a single object
#[derive(Debug)]
pub struct UploadFluentBuilder {
    handle: Arc<crate::client::Handle>,
    bucket: Option<String>,
    key: Option<String>,
    source: Option<PathBuf>,
    content_type: Option<String>,
}

/// Response type for a single object upload
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct UploadOutput {
    /// Entity tag of the stored object
    pub e_tag: Option<String>,

    /// Number of bytes uploaded
    pub content_length: u64,

    /// The `Content-Type` the object was stored with
    pub content_type: String,
}

impl UploadOutput {
    /// Entity tag of the stored object
    pub fn e_tag(&self) -> Option<&str> {
        self.e_tag.as_deref()
    }

    /// Number of bytes uploaded
    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    /// The `Content-Type` the object was stored with
    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

impl UploadFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            bucket: None,
            key: None,
            source: None,
            content_type: None,
        }
    }

    /// The bucket to upload into
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// The key to store the object under
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// The local file to upload
    pub fn source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Explicit `Content-Type` of the object.
    ///
    /// When not set, the content type is guessed from the source file's extension, falling back
    /// to `application/octet-stream`.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Upload the file.
    ///
    /// The file is streamed from disk rather than read into memory. An existing object with the
    /// same key is replaced.
    pub async fn send(self) -> Result<UploadOutput, error::Error> {
        let bucket = self.bucket.unwrap_or_default();
        let key = self.key.unwrap_or_default();
        require_bucket(&bucket)?;
        require_key(&key)?;
        let source = self
            .source
            .ok_or_else(|| error::invalid_input("a source path is required"))?;

        let file_meta = tokio::fs::metadata(&source).await?;
        if !file_meta.is_file() {
            return Err(error::Error::new(
                ErrorKind::IOError,
                format!("`{}` is not a regular file", source.display()),
            ));
        }
        let content_length = file_meta.len();
        let content_type = self.content_type.unwrap_or_else(|| {
            mime_guess::from_path(&source)
                .first_or_octet_stream()
                .essence_str()
                .to_owned()
        });

        let body = ByteStream::from_path(&source).await?;
        let request_length: i64 = content_length.try_into().map_err(|_| {
            error::invalid_input(format!("content length {content_length} is too large"))
        })?;

        tracing::trace!(
            "uploading {} ({content_length} bytes, {content_type})",
            source.display()
        );
        let resp = self
            .handle
            .client()
            .put_object()
            .bucket(&bucket)
            .key(&key)
            .content_length(request_length)
            .content_type(&content_type)
            .body(body)
            .send()
            .instrument(tracing::debug_span!("send-put-object", bucket = %bucket, key = %key))
            .await?;

        Ok(UploadOutput {
            e_tag: resp.e_tag().map(unquote_etag),
            content_length,
            content_type,
        })
    }
}
