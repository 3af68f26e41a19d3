/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use tracing::Instrument;

use crate::error;
use crate::types::require_bucket;

/// Fluent builder for deleting a bucket
#[derive(Debug)]
pub struct DeleteBucketFluentBuilder {
    handle: Arc<crate::client::Handle>,
    bucket: Option<String>,
}

impl DeleteBucketFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            bucket: None,
        }
    }

    /// The name of the bucket to delete
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Delete the bucket.
    ///
    /// The service refuses to delete a bucket that still contains objects; that fails with
    /// [`ErrorKind::Conflict`](crate::error::ErrorKind::Conflict). Objects are never deleted
    /// on the caller's behalf.
    pub async fn send(self) -> Result<(), error::Error> {
        let bucket = self.bucket.unwrap_or_default();
        require_bucket(&bucket)?;

        self.handle
            .client()
            .delete_bucket()
            .bucket(&bucket)
            .send()
            .instrument(tracing::debug_span!("send-delete-bucket", bucket = %bucket))
            .await?;
        Ok(())
    }
}
