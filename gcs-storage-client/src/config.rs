/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error;

pub(crate) mod credentials;
pub(crate) mod loader;

pub use credentials::HmacKey;
pub use loader::ConfigLoader;

/// Default endpoint of the Cloud Storage XML API
pub const DEFAULT_ENDPOINT: &str = "https://storage.googleapis.com";

/// Configuration for a [`Client`](crate::client::Client)
///
/// A `Config` is resolved once and is immutable afterwards; there is no reload.
#[derive(Debug, Clone)]
pub struct Config {
    project_id: String,
    client: aws_sdk_s3::Client,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The project that bucket listing and bucket creation are scoped to.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// The SDK client instance that will be used to send requests to Cloud Storage.
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Clone, Default)]
pub struct Builder {
    project_id: Option<String>,
    client: Option<aws_sdk_s3::Client>,
}

impl Builder {
    /// Set the project identifier.
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set an explicit SDK client to use.
    ///
    /// The client must already be configured with an endpoint and credentials. Use
    /// [`from_env`](crate::from_env) to have one built from the process configuration.
    pub fn client(mut self, client: aws_sdk_s3::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Consumes the builder and constructs a [`Config`]
    pub fn build(self) -> Result<Config, error::Error> {
        let project_id = self
            .project_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| error::config_invalid("project id is required"))?;
        // sent verbatim as a request header
        if !project_id.chars().all(|c| c.is_ascii_graphic()) {
            return Err(error::config_invalid(format!(
                "project id `{project_id}` contains invalid characters"
            )));
        }
        let client = self
            .client
            .ok_or_else(|| error::config_invalid("an SDK client is required"))?;

        Ok(Config { project_id, client })
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::config::{BehaviorVersion, Region};

    use crate::error::ErrorKind;

    use super::Config;

    fn sdk_client() -> aws_sdk_s3::Client {
        let conf = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::from_static("auto"))
            .build();
        aws_sdk_s3::Client::from_conf(conf)
    }

    #[test]
    fn test_build_requires_project_id() {
        let client = sdk_client();
        let err = Config::builder().client(client).build().unwrap_err();
        assert_eq!(&ErrorKind::ConfigInvalid, err.kind());

        let client = sdk_client();
        let err = Config::builder()
            .project_id("  ")
            .client(client)
            .build()
            .unwrap_err();
        assert_eq!(&ErrorKind::ConfigInvalid, err.kind());

        let client = sdk_client();
        let err = Config::builder()
            .project_id("my project")
            .client(client)
            .build()
            .unwrap_err();
        assert_eq!(&ErrorKind::ConfigInvalid, err.kind());
    }

    #[test]
    fn test_build_requires_client() {
        let err = Config::builder()
            .project_id("test-project")
            .build()
            .unwrap_err();
        assert_eq!(&ErrorKind::ConfigInvalid, err.kind());
    }

    #[test]
    fn test_build() {
        let client = sdk_client();
        let config = Config::builder()
            .project_id("test-project")
            .client(client)
            .build()
            .unwrap();
        assert_eq!("test-project", config.project_id());
    }
}
