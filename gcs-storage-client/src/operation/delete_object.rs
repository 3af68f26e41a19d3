/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use tracing::Instrument;

use crate::error;
use crate::types::{require_bucket, require_key};

/// Fluent builder for deleting a single object
#[derive(Debug)]
pub struct DeleteObjectFluentBuilder {
    handle: Arc<crate::client::Handle>,
    bucket: Option<String>,
    key: Option<String>,
}

impl DeleteObjectFluentBuilder {
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

    /// The key of the object to delete
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Delete the object.
    ///
    /// The XML API acknowledges deletes of missing keys as success, so the object is looked up
    /// first and a missing key fails with [`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound).
    pub async fn send(self) -> Result<(), error::Error> {
        let bucket = self.bucket.unwrap_or_default();
        let key = self.key.unwrap_or_default();
        require_bucket(&bucket)?;
        require_key(&key)?;

        let client = self.handle.client();
        client
            .head_object()
            .bucket(&bucket)
            .key(&key)
            .send()
            .instrument(tracing::debug_span!("send-head-object", bucket = %bucket, key = %key))
            .await?;

        client
            .delete_object()
            .bucket(&bucket)
            .key(&key)
            .send()
            .instrument(tracing::debug_span!("send-delete-object", bucket = %bucket, key = %key))
            .await?;
        Ok(())
    }
}
