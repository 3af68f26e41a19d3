/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::net::Ipv4Addr;

use aws_smithy_types::DateTime;

use crate::error;

const MIN_BUCKET_NAME_LEN: usize = 3;
const MAX_BUCKET_NAME_LEN: usize = 63;
const MAX_DOTTED_BUCKET_NAME_LEN: usize = 222;

/// Metadata of a single object as reported by the storage service.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectMetadata {
    /// The object key
    pub name: String,

    /// Size of the object in bytes
    pub size: u64,

    /// The object's `Content-Type`, if one was stored with it
    pub content_type: Option<String>,

    /// Creation time of the live object.
    ///
    /// Objects are immutable and unversioned, so this is the time of the last write.
    pub created: Option<DateTime>,

    /// Last modification time
    pub updated: Option<DateTime>,

    /// Content checksum (the entity tag, which is the hex MD5 digest for non-composite objects)
    pub checksum: Option<String>,
}

impl ObjectMetadata {
    /// The object key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of the object in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The object's `Content-Type`
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Creation time of the live object
    pub fn created(&self) -> Option<&DateTime> {
        self.created.as_ref()
    }

    /// Last modification time
    pub fn updated(&self) -> Option<&DateTime> {
        self.updated.as_ref()
    }

    /// Content checksum
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }
}

/// Strip the quotes the service wraps entity tags in.
pub(crate) fn unquote_etag(etag: &str) -> String {
    etag.trim_matches('"').to_owned()
}

/// Validate a bucket name against the Cloud Storage naming rules.
///
/// Names are 3 to 63 characters long, or up to 222 characters when they contain dots, in
/// which case every dot-separated component is at most 63 characters and none is empty. Names
/// shaped like an IPv4 address are rejected. Ownership of dotted (domain) names is verified by
/// the service, not here.
pub(crate) fn validate_bucket_name(name: &str) -> Result<(), error::Error> {
    let max_len = if name.contains('.') {
        MAX_DOTTED_BUCKET_NAME_LEN
    } else {
        MAX_BUCKET_NAME_LEN
    };
    if name.len() < MIN_BUCKET_NAME_LEN || name.len() > max_len {
        return Err(error::invalid_input(format!(
            "bucket name `{name}` must be between {MIN_BUCKET_NAME_LEN} and {max_len} characters"
        )));
    }

    let valid_char = |c: char| {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_' || c == '.'
    };
    if !name.chars().all(valid_char) {
        return Err(error::invalid_input(format!(
            "bucket name `{name}` may only contain lowercase letters, digits, `-`, `_` and `.`"
        )));
    }

    let alphanumeric = |c: Option<char>| {
        c.is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    };
    if !alphanumeric(name.chars().next()) || !alphanumeric(name.chars().last()) {
        return Err(error::invalid_input(format!(
            "bucket name `{name}` must start and end with a letter or digit"
        )));
    }

    if name
        .split('.')
        .any(|component| component.is_empty() || component.len() > MAX_BUCKET_NAME_LEN)
    {
        return Err(error::invalid_input(format!(
            "each dot-separated component of bucket name `{name}` must be between 1 and {MAX_BUCKET_NAME_LEN} characters"
        )));
    }

    if name.parse::<Ipv4Addr>().is_ok() {
        return Err(error::invalid_input(format!(
            "bucket name `{name}` must not be an IP address"
        )));
    }

    if name.starts_with("goog") || name.contains("google") {
        return Err(error::invalid_input(format!(
            "bucket name `{name}` must not begin with `goog` or contain `google`"
        )));
    }

    Ok(())
}

/// Validate a bucket name before a request that addresses an existing bucket.
///
/// Only emptiness is checked; the service is the authority on whether the bucket exists.
pub(crate) fn require_bucket(name: &str) -> Result<(), error::Error> {
    if name.is_empty() {
        return Err(error::invalid_input("bucket name must not be empty"));
    }
    Ok(())
}

pub(crate) fn require_key(key: &str) -> Result<(), error::Error> {
    if key.is_empty() {
        return Err(error::invalid_input("object key must not be empty"));
    }
    Ok(())
}
