/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_runtime_api::client::orchestrator::HttpRequest;

/// Types for bucket creation
pub mod create_bucket;

/// Types for bucket deletion
pub mod delete_bucket;

/// Types for listing the buckets of a project
pub mod list_buckets;

/// Types for checking bucket existence
pub mod bucket_exists;

/// Types for single object upload operation
pub mod upload;

/// Types for single object download operation
pub mod download;

/// Types for listing the objects of a bucket
pub mod list_objects;

/// Types for single object deletion
pub mod delete_object;

/// Types for single object metadata retrieval
pub mod object_metadata;

/// Scopes project-level requests (bucket listing and creation) to a project.
const PROJECT_ID_HEADER: &str = "x-goog-project-id";

/// Request mutator adding the project header.
///
/// `project_id` is validated to be a legal header value when the config is built.
pub(crate) fn project_scoped(project_id: &str) -> impl Fn(&mut HttpRequest) + Send + Sync + 'static {
    let project_id = project_id.to_owned();
    move |request: &mut HttpRequest| {
        request
            .headers_mut()
            .insert(PROJECT_ID_HEADER, project_id.clone());
    }
}
