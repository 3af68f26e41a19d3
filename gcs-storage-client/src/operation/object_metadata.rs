/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use aws_sdk_s3::operation::head_object::HeadObjectOutput;
use tracing::Instrument;

use crate::error::{self, ErrorKind};
use crate::types::{require_bucket, require_key, unquote_etag, ObjectMetadata};

/// Fluent builder for fetching the metadata of a single object
#[derive(Debug)]
pub struct ObjectMetadataFluentBuilder {
    handle: Arc<crate::client::Handle>,
    bucket: Option<String>,
    key: Option<String>,
}

impl ObjectMetadataFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            bucket: None,
            key: None,
        }
    }

    /// The bucket containing the object
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// The key of the object
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Fetch the metadata. The object body is not transferred.
    pub async fn send(self) -> Result<ObjectMetadata, error::Error> {
        let bucket = self.bucket.unwrap_or_default();
        let key = self.key.unwrap_or_default();
        require_bucket(&bucket)?;
        require_key(&key)?;

        let output = self
            .handle
            .client()
            .head_object()
            .bucket(&bucket)
            .key(&key)
            .send()
            .instrument(tracing::debug_span!("send-head-object", bucket = %bucket, key = %key))
            .await?;

        object_metadata(key, &output)
    }
}

fn object_metadata(
    name: String,
    output: &HeadObjectOutput,
) -> Result<ObjectMetadata, error::Error> {
    let size = output
        .content_length()
        .and_then(|len| u64::try_from(len).ok())
        .ok_or_else(|| {
            error::Error::new(
                ErrorKind::ServiceError,
                format!(
                    "object `{name}` metadata has an invalid content length: {:?}",
                    output.content_length()
                ),
            )
        })?;
    let modified = output.last_modified().cloned();
    Ok(ObjectMetadata {
        name,
        size,
        content_type: output.content_type().map(str::to_owned),
        created: modified,
        updated: modified,
        checksum: output.e_tag().map(unquote_etag),
    })
}
