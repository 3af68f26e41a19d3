/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error;

const ACTIVE_STATE: &str = "ACTIVE";
const SERVICE_ACCOUNT_TYPE: &str = "service_account";

/// A service-account HMAC key used to sign requests to the interoperable XML API.
///
/// Parsed from the `storage#hmacKey` resource returned by the Cloud Storage JSON API
/// (e.g. `gcloud storage hmac create <service-account> --format=json`).
#[derive(Clone, Deserialize)]
pub struct HmacKey {
    secret: String,
    metadata: HmacKeyMetadata,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HmacKeyMetadata {
    access_id: String,
    #[serde(default)]
    project_id: Option<String>,
    #[serde(default)]
    service_account_email: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

impl HmacKey {
    /// Parse key material from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, error::Error> {
        let key: HmacKey = serde_json::from_str(json)?;
        key.validate()?;
        Ok(key)
    }

    /// Read and parse key material from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, error::Error> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| {
            error::config_invalid(format!(
                "failed to read HMAC key file `{}`: {err}",
                path.display()
            ))
        })?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<(), error::Error> {
        if self.metadata.access_id.is_empty() || self.secret.is_empty() {
            return Err(error::config_invalid(
                "HMAC key must have a non-empty access id and secret",
            ));
        }

        match self.metadata.state.as_deref() {
            None | Some(ACTIVE_STATE) => Ok(()),
            Some(state) => Err(error::config_invalid(format!(
                "HMAC key `{}` is {state}, only {ACTIVE_STATE} keys can authenticate",
                self.metadata.access_id
            ))),
        }
    }

    /// The access id (the public half of the key).
    pub fn access_id(&self) -> &str {
        &self.metadata.access_id
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }

    /// The project that owns the key, if recorded in the key material.
    pub fn project_id(&self) -> Option<&str> {
        self.metadata.project_id.as_deref()
    }

    /// The service account the key belongs to, if recorded in the key material.
    pub fn service_account_email(&self) -> Option<&str> {
        self.metadata.service_account_email.as_deref()
    }
}

/// The fields of an application default credentials file needed to explain why it was not used
#[derive(Debug, Deserialize)]
struct ApplicationCredentials {
    #[serde(rename = "type")]
    kind: Option<String>,
    client_email: Option<String>,
}

/// Error for a configuration whose only credentials are the application default credentials
/// file at `path`.
///
/// Those credentials authorize OAuth requests to the JSON API and cannot sign requests to the
/// XML API, so the error names the HMAC key that is needed instead.
pub(crate) fn application_credentials_unsupported(env_var: &str, path: &Path) -> error::Error {
    let file = path.display();
    let hint = "create an HMAC key with `gcloud storage hmac create <service-account-email>` \
                and point GCS_HMAC_KEY_FILE at it";
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            return error::config_invalid(format!(
                "no HMAC key configured and the {env_var} file `{file}` cannot be read ({err}); {hint}"
            ))
        }
    };
    match serde_json::from_str::<ApplicationCredentials>(&contents) {
        Ok(creds) if creds.kind.as_deref() == Some(SERVICE_ACCOUNT_TYPE) => {
            let account = creds.client_email.as_deref().unwrap_or("<service-account-email>");
            error::config_invalid(format!(
                "`{file}` named by {env_var} is a service account key for {account}, which cannot \
                 sign requests to the interoperable XML API; create an HMAC key with \
                 `gcloud storage hmac create {account}` and point GCS_HMAC_KEY_FILE at it"
            ))
        }
        Ok(creds) => error::config_invalid(format!(
            "`{file}` named by {env_var} holds `{}` credentials, which cannot sign requests to \
             the interoperable XML API; {hint}",
            creds.kind.as_deref().unwrap_or("unknown")
        )),
        Err(err) => error::config_invalid(format!(
            "no HMAC key configured and the {env_var} file `{file}` is not valid JSON ({err}); {hint}"
        )),
    }
}

impl fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacKey")
            .field("access_id", &self.metadata.access_id)
            .field("secret", &"** redacted **")
            .field("project_id", &self.metadata.project_id)
            .field("service_account_email", &self.metadata.service_account_email)
            .finish()
    }
}
