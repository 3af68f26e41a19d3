/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use tracing::Instrument;

use crate::error;
use crate::types::require_bucket;

/// Fluent builder for checking whether a bucket exists
#[derive(Debug)]
pub struct BucketExistsFluentBuilder {
    handle: Arc<crate::client::Handle>,
    bucket: Option<String>,
}

impl BucketExistsFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            bucket: None,
        }
    }

    /// The name of the bucket to look for
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Check for the bucket.
    pub async fn send(self) -> Result<bool, error::Error> {
        let bucket = self.bucket.unwrap_or_default();
        require_bucket(&bucket)?;

        let result = self
            .handle
            .client()
            .head_bucket()
            .bucket(&bucket)
            .send()
            .instrument(tracing::debug_span!("send-head-bucket", bucket = %bucket))
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(err) => {
                let err = error::Error::from(err);
                if err.is_not_found() {
                    Ok(false)
                } else {
                    Err(err)
                }
            }
        }
    }
}
