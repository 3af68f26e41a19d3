/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use crate::operation::bucket_exists::BucketExistsFluentBuilder;
use crate::operation::create_bucket::CreateBucketFluentBuilder;
use crate::operation::delete_bucket::DeleteBucketFluentBuilder;
use crate::operation::delete_object::DeleteObjectFluentBuilder;
use crate::operation::download::DownloadFluentBuilder;
use crate::operation::list_buckets::ListBucketsFluentBuilder;
use crate::operation::list_objects::ListObjectsFluentBuilder;
use crate::operation::object_metadata::ObjectMetadataFluentBuilder;
use crate::operation::upload::UploadFluentBuilder;
use crate::Config;

/// Async client for Google Cloud Storage.
///
/// Every operation is a single logical request whose failure is returned as a typed
/// [`Error`](crate::error::Error). Requests are never retried.
///
/// Cloning a `Client` is cheap; clones share the same configuration and SDK client.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) handle: Arc<Handle>,
}

/// Whatever is needed to carry out operations
#[derive(Debug)]
pub(crate) struct Handle {
    pub(crate) config: crate::Config,
}

impl Handle {
    /// The SDK client to use for requests
    pub(crate) fn client(&self) -> &aws_sdk_s3::Client {
        self.config.client()
    }

    pub(crate) fn project_id(&self) -> &str {
        self.config.project_id()
    }
}

impl Client {
    /// Creates a new client from a storage client config.
    pub fn new(config: Config) -> Client {
        let handle = Arc::new(Handle { config });
        Client { handle }
    }

    /// Returns the client's configuration
    pub fn config(&self) -> &Config {
        &self.handle.config
    }

    /// Create a bucket in the configured project.
    ///
    /// The name is checked against the bucket naming rules before any request is sent.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// async fn create(client: &gcs_storage_client::Client) -> Result<(), gcs_storage_client::error::Error> {
    ///     client.create_bucket().bucket("my-bucket").send().await
    /// }
    /// ```
    pub fn create_bucket(&self) -> CreateBucketFluentBuilder {
        CreateBucketFluentBuilder::new(self.handle.clone())
    }

    /// Delete an empty bucket.
    pub fn delete_bucket(&self) -> DeleteBucketFluentBuilder {
        DeleteBucketFluentBuilder::new(self.handle.clone())
    }

    /// List the names of all buckets in the configured project.
    pub fn list_buckets(&self) -> ListBucketsFluentBuilder {
        ListBucketsFluentBuilder::new(self.handle.clone())
    }

    /// Check whether a bucket exists.
    ///
    /// Absence is `Ok(false)`. Any other failure, including a permission error, is an `Err`.
    pub fn bucket_exists(&self) -> BucketExistsFluentBuilder {
        BucketExistsFluentBuilder::new(self.handle.clone())
    }

    /// Upload a local file as a single object, replacing any object with the same key.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    ///
    /// async fn upload_file(
    ///     client: &gcs_storage_client::Client,
    ///     path: &Path,
    /// ) -> Result<(), gcs_storage_client::error::Error> {
    ///     let output = client
    ///         .upload()
    ///         .bucket("my-bucket")
    ///         .key("data/report.csv")
    ///         .source(path)
    ///         .send()
    ///         .await?;
    ///     println!("uploaded {} bytes", output.content_length());
    ///     Ok(())
    /// }
    /// ```
    pub fn upload(&self) -> UploadFluentBuilder {
        UploadFluentBuilder::new(self.handle.clone())
    }

    /// Download a single object to a local file, replacing the file if it exists.
    pub fn download(&self) -> DownloadFluentBuilder {
        DownloadFluentBuilder::new(self.handle.clone())
    }

    /// List the keys of the objects in a bucket, optionally restricted to a prefix.
    pub fn list_objects(&self) -> ListObjectsFluentBuilder {
        ListObjectsFluentBuilder::new(self.handle.clone())
    }

    /// Delete a single object.
    ///
    /// Deleting a key that does not exist fails with
    /// [`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound).
    pub fn delete_object(&self) -> DeleteObjectFluentBuilder {
        DeleteObjectFluentBuilder::new(self.handle.clone())
    }

    /// Retrieve the metadata of a single object.
    pub fn object_metadata(&self) -> ObjectMetadataFluentBuilder {
        ObjectMetadataFluentBuilder::new(self.handle.clone())
    }
}

#[cfg(test)]
pub(crate) fn test_client(client: aws_sdk_s3::Client) -> Client {
    let config = Config::builder()
        .project_id("test-project")
        .client(client)
        .build()
        .expect("valid test config");
    Client::new(config)
}
