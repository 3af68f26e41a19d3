/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/* End of automatically managed default lints */

//! Google Cloud Storage client
//!
//! A thin client for creating, listing and deleting buckets and for moving single objects
//! between the local filesystem and a bucket. Requests go to the Cloud Storage XML API
//! (S3-interoperable) authenticated with a service-account HMAC key.
//!
//! Two layers are provided:
//!
//! - [`Client`]: async, every operation returns a typed [`error::Error`].
//! - [`blocking::StorageClient`]: synchronous façade which logs failures and reports them as
//!   sentinel values (`false`, an empty `Vec` or `None`).
//!
//! # Examples
//!
//! ```no_run
//! # async fn example() -> Result<(), gcs_storage_client::error::Error> {
//! let config = gcs_storage_client::from_env().load().await?;
//! let client = gcs_storage_client::Client::new(config);
//! let keys = client.list_objects().bucket("my-bucket").prefix("data/").send().await?;
//! # let _ = keys;
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

/// Error types emitted by `gcs-storage-client`
pub mod error;

/// Common types used by `gcs-storage-client`
pub mod types;

/// Storage client configuration
pub mod config;

/// Async storage client
pub mod client;

/// Storage operations
pub mod operation;

/// Blocking storage client
pub mod blocking;

pub use self::client::Client;
pub use self::config::Config;

/// Create a config loader that resolves the project and credentials from the environment
pub fn from_env() -> config::ConfigLoader {
    config::ConfigLoader::default()
}
