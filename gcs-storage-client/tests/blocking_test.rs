/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::operation::create_bucket::CreateBucketOutput;
use aws_sdk_s3::operation::delete_bucket::{DeleteBucketError, DeleteBucketOutput};
use aws_sdk_s3::operation::delete_object::DeleteObjectOutput;
use aws_sdk_s3::operation::get_object::{GetObjectError, GetObjectOutput};
use aws_sdk_s3::operation::head_bucket::{HeadBucketError, HeadBucketOutput};
use aws_sdk_s3::operation::head_object::HeadObjectOutput;
use aws_sdk_s3::operation::list_buckets::ListBucketsError;
use aws_sdk_s3::operation::list_objects_v2::{ListObjectsV2Error, ListObjectsV2Output};
use aws_sdk_s3::operation::put_object::{PutObjectError, PutObjectOutput};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::Object;
use aws_smithy_mocks_experimental::{mock, mock_client, RuleMode};
use aws_smithy_runtime::test_util::capture_test_logs::capture_test_logs;
use aws_smithy_runtime_api::http::StatusCode;
use aws_smithy_types::body::SdkBody;
use aws_smithy_types::error::ErrorMetadata;
use gcs_storage_client::blocking::StorageClient;
use gcs_storage_client::error::ErrorKind;
use test_common::{assert_same_contents, create_test_dir, random_bytes, CapturedLogs};

const BUCKET: &str = "test-bucket";

fn storage_client(sdk: aws_sdk_s3::Client) -> StorageClient {
    let config = gcs_storage_client::Config::builder()
        .project_id("test-project")
        .client(sdk)
        .build()
        .unwrap();
    StorageClient::new(config).unwrap()
}

fn empty_response(status: u16) -> HttpResponse {
    HttpResponse::new(StatusCode::try_from(status).unwrap(), SdkBody::empty())
}

fn not_found() -> HttpResponse {
    empty_response(404)
}

#[test]
fn test_upload_then_download_round_trip() {
    let data = random_bytes(64 * 1024);
    let test_dir = create_test_dir(&[("source.bin", &data[..])]);
    let source = test_dir.path().join("source.bin");
    let destination = test_dir.path().join("downloaded.bin");

    let expected_len = data.len() as i64;
    let put_object = mock!(aws_sdk_s3::Client::put_object)
        .match_requests(move |r| {
            r.bucket() == Some(BUCKET)
                && r.key() == Some("blobs/source.bin")
                && r.content_length() == Some(expected_len)
        })
        .then_output(|| PutObjectOutput::builder().build());
    let get_object = mock!(aws_sdk_s3::Client::get_object)
        .match_requests(|r| r.key() == Some("blobs/source.bin"))
        .then_output(move || {
            GetObjectOutput::builder()
                .body(ByteStream::from(data.clone()))
                .build()
        });
    let storage = storage_client(mock_client!(
        aws_sdk_s3,
        RuleMode::Sequential,
        &[&put_object, &get_object]
    ));

    assert!(storage.upload_file(BUCKET, &source, "blobs/source.bin"));
    assert!(storage.download_file(BUCKET, "blobs/source.bin", &destination));
    assert_same_contents(&source, &destination);
}

#[test]
fn test_deleted_object_is_absent() {
    let head_object = mock!(aws_sdk_s3::Client::head_object)
        .then_output(|| HeadObjectOutput::builder().content_length(3).build());
    let delete_object = mock!(aws_sdk_s3::Client::delete_object)
        .then_output(|| DeleteObjectOutput::builder().build());
    let head_after_delete = mock!(aws_sdk_s3::Client::head_object).then_http_response(not_found);
    let head_second_delete = mock!(aws_sdk_s3::Client::head_object).then_http_response(not_found);
    let logs = CapturedLogs::for_target("gcs_storage_client");
    let storage = storage_client(mock_client!(
        aws_sdk_s3,
        RuleMode::Sequential,
        &[
            &head_object,
            &delete_object,
            &head_after_delete,
            &head_second_delete
        ]
    ))
    .with_log_sink(logs.dispatch());

    assert!(storage.delete_file(BUCKET, "doomed.txt"));
    assert_eq!(None, storage.get_file_metadata(BUCKET, "doomed.txt"));
    assert!(!storage.delete_file(BUCKET, "doomed.txt"));

    // one delete request only; the second attempt stops at the lookup
    assert_eq!(1, delete_object.num_calls());
    let warnings = logs.lines_containing("WARN");
    assert_eq!(2, warnings.len());
    assert!(warnings[0].contains("get_file_metadata failed: not found"));
    assert!(warnings[1].contains("delete_file failed: not found"));
    assert!(warnings[1].contains("key=\"doomed.txt\""));
}

#[test]
fn test_bucket_existence_follows_create_and_delete() {
    let create_bucket = mock!(aws_sdk_s3::Client::create_bucket)
        .match_requests(|r| r.bucket() == Some("fresh-bucket"))
        .then_output(|| CreateBucketOutput::builder().build());
    let head_after_create = mock!(aws_sdk_s3::Client::head_bucket)
        .then_output(|| HeadBucketOutput::builder().build());
    let delete_bucket = mock!(aws_sdk_s3::Client::delete_bucket)
        .match_requests(|r| r.bucket() == Some("fresh-bucket"))
        .then_output(|| DeleteBucketOutput::builder().build());
    let head_after_delete = mock!(aws_sdk_s3::Client::head_bucket).then_http_response(not_found);
    let storage = storage_client(mock_client!(
        aws_sdk_s3,
        RuleMode::Sequential,
        &[
            &create_bucket,
            &head_after_create,
            &delete_bucket,
            &head_after_delete
        ]
    ));

    assert!(storage.create_bucket("fresh-bucket"));
    assert!(storage.bucket_exists("fresh-bucket"));
    assert!(storage.delete_bucket("fresh-bucket"));
    assert!(!storage.bucket_exists("fresh-bucket"));
}

#[test]
fn test_list_files_filters_by_prefix() {
    let all_keys = mock!(aws_sdk_s3::Client::list_objects_v2)
        .match_requests(|r| r.prefix().is_none())
        .then_output(|| {
            ListObjectsV2Output::builder()
                .contents(Object::builder().key("data/a.txt").build())
                .contents(Object::builder().key("data/b.txt").build())
                .contents(Object::builder().key("other.txt").build())
                .build()
        });
    let data_keys = mock!(aws_sdk_s3::Client::list_objects_v2)
        .match_requests(|r| r.prefix() == Some("data/"))
        .then_output(|| {
            ListObjectsV2Output::builder()
                .contents(Object::builder().key("data/a.txt").build())
                .contents(Object::builder().key("data/b.txt").build())
                .build()
        });
    let storage = storage_client(mock_client!(
        aws_sdk_s3,
        RuleMode::MatchAny,
        &[&all_keys, &data_keys]
    ));

    assert_eq!(
        vec!["data/a.txt", "data/b.txt"],
        storage.list_files(BUCKET, "data/")
    );
    assert_eq!(3, storage.list_files(BUCKET, "").len());
}

#[test]
fn test_metadata_reflects_upload() {
    let data = random_bytes(1234);
    let test_dir = create_test_dir(&[("report.json", &data[..])]);
    let source = test_dir.path().join("report.json");

    let put_object = mock!(aws_sdk_s3::Client::put_object)
        .match_requests(|r| r.content_type() == Some("application/json"))
        .then_output(|| PutObjectOutput::builder().e_tag("\"abc123\"").build());
    let head_object = mock!(aws_sdk_s3::Client::head_object)
        .match_requests(|r| r.key() == Some("reports/report.json"))
        .then_output(|| {
            HeadObjectOutput::builder()
                .content_length(1234)
                .content_type("application/json")
                .e_tag("\"abc123\"")
                .build()
        });
    let storage = storage_client(mock_client!(
        aws_sdk_s3,
        RuleMode::Sequential,
        &[&put_object, &head_object]
    ));

    assert!(storage.upload_file(BUCKET, &source, "reports/report.json"));
    let meta = storage
        .get_file_metadata(BUCKET, "reports/report.json")
        .unwrap();
    assert_eq!("reports/report.json", meta.name());
    assert_eq!(data.len() as u64, meta.size());
    assert_eq!(Some("application/json"), meta.content_type());
    assert_eq!(Some("abc123"), meta.checksum());
}

#[test]
fn test_failures_are_logged_and_projected_to_sentinels() {
    let test_dir = create_test_dir(&[("local.txt", &b"local"[..])]);

    let no_such_bucket = || ErrorMetadata::builder().code("NoSuchBucket").build();
    let put_object = mock!(aws_sdk_s3::Client::put_object)
        .then_error(move || PutObjectError::generic(no_such_bucket()));
    let get_object = mock!(aws_sdk_s3::Client::get_object)
        .then_error(move || GetObjectError::generic(no_such_bucket()));
    let delete_bucket = mock!(aws_sdk_s3::Client::delete_bucket)
        .then_error(move || DeleteBucketError::generic(no_such_bucket()));
    let list_objects = mock!(aws_sdk_s3::Client::list_objects_v2).then_error(|| {
        ListObjectsV2Error::generic(
            ErrorMetadata::builder()
                .code("UserProjectAccountProblem")
                .build(),
        )
    });
    let list_buckets = mock!(aws_sdk_s3::Client::list_buckets).then_error(|| {
        ListBucketsError::generic(ErrorMetadata::builder().code("AccessDenied").build())
    });
    let head_object = mock!(aws_sdk_s3::Client::head_object).then_http_response(not_found);
    let logs = CapturedLogs::for_target("gcs_storage_client");
    let storage = storage_client(mock_client!(
        aws_sdk_s3,
        RuleMode::MatchAny,
        &[
            &put_object,
            &get_object,
            &delete_bucket,
            &list_objects,
            &list_buckets,
            &head_object
        ]
    ))
    .with_log_sink(logs.dispatch());

    assert!(!storage.upload_file("missing-bucket", test_dir.path().join("local.txt"), "k"));
    assert!(!storage.download_file("missing-bucket", "k", test_dir.path().join("out.txt")));
    assert!(!test_dir.path().join("out.txt").exists());
    assert!(!storage.delete_bucket("missing-bucket"));
    assert!(storage.list_files("missing-bucket", "").is_empty());
    assert!(storage.list_buckets().is_empty());
    assert_eq!(None, storage.get_file_metadata(BUCKET, "missing-key"));

    let failures = logs.lines_containing(" failed: ");
    assert_eq!(6, failures.len(), "{}", logs.contents());
    // missing resources are warnings, everything else is an error
    assert_eq!(4, logs.lines_containing("WARN").len());
    assert_eq!(2, logs.lines_containing("ERROR").len());
    assert!(logs.contents().contains("list_files failed: service error"));
    assert!(logs.contents().contains("list_buckets failed: permission denied"));
}

#[test]
fn test_missing_local_file_is_reported() {
    let put_object =
        mock!(aws_sdk_s3::Client::put_object).then_output(|| PutObjectOutput::builder().build());
    let logs = CapturedLogs::for_target("gcs_storage_client");
    let storage = storage_client(mock_client!(
        aws_sdk_s3,
        RuleMode::MatchAny,
        &[&put_object]
    ))
    .with_log_sink(logs.dispatch());

    assert!(!storage.upload_file(BUCKET, "/no/such/local/file.txt", "key"));
    assert_eq!(0, put_object.num_calls());
    let errors = logs.lines_containing("upload_file failed: I/O error");
    assert_eq!(1, errors.len());
    assert!(errors[0].contains("path=\"/no/such/local/file.txt\""));
}

#[test]
fn test_logs_reach_default_subscriber_without_sink() {
    let (_guard, rx) = capture_test_logs();

    let head_bucket =
        mock!(aws_sdk_s3::Client::head_bucket).then_http_response(|| empty_response(403));
    let storage = storage_client(mock_client!(
        aws_sdk_s3,
        RuleMode::Sequential,
        &[&head_bucket]
    ));

    assert!(!storage.bucket_exists("someone-elses-bucket"));
    assert!(rx.contents().contains("bucket_exists failed: permission denied"));
}

#[test]
fn test_typed_errors_through_async_client() {
    let head_bucket = mock!(aws_sdk_s3::Client::head_bucket).then_error(|| {
        HeadBucketError::generic(ErrorMetadata::builder().code("AccessDenied").build())
    });
    let storage = storage_client(mock_client!(
        aws_sdk_s3,
        RuleMode::Sequential,
        &[&head_bucket]
    ));

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let err = runtime
        .block_on(storage.client().bucket_exists().bucket(BUCKET).send())
        .unwrap_err();
    assert_eq!(&ErrorKind::PermissionDenied, err.kind());
}
