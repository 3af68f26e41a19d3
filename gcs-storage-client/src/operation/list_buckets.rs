/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use tracing::Instrument;

use crate::error;
use crate::operation::project_scoped;

/// Fluent builder for listing the buckets of the configured project
#[derive(Debug)]
pub struct ListBucketsFluentBuilder {
    handle: Arc<crate::client::Handle>,
}

impl ListBucketsFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self { handle }
    }

    /// List all bucket names, following continuation tokens until the listing is exhausted.
    pub async fn send(self) -> Result<Vec<String>, error::Error> {
        let mut names = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .handle
                .client()
                .list_buckets()
                .set_continuation_token(next_token.take())
                .customize()
                .mutate_request(project_scoped(self.handle.project_id()))
                .send()
                .instrument(tracing::debug_span!("send-list-buckets"))
                .await?;

            names.extend(
                output
                    .buckets()
                    .iter()
                    .filter_map(|bucket| bucket.name().map(str::to_owned)),
            );

            match output.continuation_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_owned()),
                _ => break,
            }
        }

        Ok(names)
    }
}
