/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use tracing::Instrument;

use crate::error::{self, ErrorKind};
use crate::types::require_bucket;

/// Fluent builder for listing the object keys in a bucket
#[derive(Debug)]
pub struct ListObjectsFluentBuilder {
    handle: Arc<crate::client::Handle>,
    bucket: Option<String>,
    prefix: Option<String>,
}

impl ListObjectsFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            bucket: None,
            prefix: None,
        }
    }

    /// The bucket to list
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Only list keys that begin with this prefix. An empty prefix lists every key.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set or clear the key prefix
    pub fn set_prefix(mut self, prefix: Option<String>) -> Self {
        self.prefix = prefix;
        self
    }

    /// List every matching key.
    ///
    /// The listing is flat: no delimiter is sent, so keys under nested "directories" are
    /// included. Keys are returned in the order the service reports them.
    pub async fn send(self) -> Result<Vec<String>, error::Error> {
        let bucket = self.bucket.unwrap_or_default();
        require_bucket(&bucket)?;
        let prefix = self.prefix.filter(|p| !p.is_empty());

        let mut keys = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let output = self
                .handle
                .client()
                .list_objects_v2()
                .bucket(&bucket)
                .set_prefix(prefix.clone())
                .set_continuation_token(next_token.take())
                .send()
                .instrument(tracing::debug_span!("send-list-objects", bucket = %bucket))
                .await?;

            keys.extend(
                output
                    .contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_owned)),
            );

            match (output.is_truncated(), output.next_continuation_token()) {
                (Some(true), Some(token)) => next_token = Some(token.to_owned()),
                (Some(true), None) => {
                    return Err(error::Error::new(
                        ErrorKind::ServiceError,
                        format!(
                            "listing of {bucket} is truncated after {} keys but has no continuation token",
                            keys.len()
                        ),
                    ))
                }
                _ => break,
            }
        }

        tracing::trace!("listed {} keys in {bucket}", keys.len());
        Ok(keys)
    }
}
