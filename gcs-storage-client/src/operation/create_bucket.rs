/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use tracing::Instrument;

use crate::error;
use crate::operation::project_scoped;
use crate::types::validate_bucket_name;

/// Fluent builder for creating a bucket
#[derive(Debug)]
pub struct CreateBucketFluentBuilder {
    handle: Arc<crate::client::Handle>,
    bucket: Option<String>,
}

impl CreateBucketFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            bucket: None,
        }
    }

    /// The name of the bucket to create
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Create the bucket
    pub async fn send(self) -> Result<(), error::Error> {
        let bucket = self.bucket.unwrap_or_default();
        validate_bucket_name(&bucket)?;

        self.handle
            .client()
            .create_bucket()
            .bucket(&bucket)
            .customize()
            .mutate_request(project_scoped(self.handle.project_id()))
            .send()
            .instrument(tracing::debug_span!("send-create-bucket", bucket = %bucket))
            .await?;
        Ok(())
    }
}
