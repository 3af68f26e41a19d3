/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Helpers shared by the storage client's tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::{fs, path::Path};

use tempfile::{tempdir, TempDir};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Create a directory containing `files`, given as paths relative to the directory and their
/// contents. Parent directories are created as needed.
pub fn create_test_dir(files: &[(&str, &[u8])]) -> TempDir {
    let temp_dir = tempdir().unwrap();

    for (path, contents) in files {
        let full_path = temp_dir.path().join(path);
        let parent = full_path.parent().unwrap();
        fs::create_dir_all(parent).unwrap();
        fs::write(&full_path, contents).unwrap();
    }

    temp_dir
}

/// `len` bytes of random data
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    fastrand::fill(&mut data);
    data
}

/// Assert two local files have identical contents
pub fn assert_same_contents(expected: &Path, actual: &Path) {
    let expected_data = fs::read(expected).unwrap();
    let actual_data = fs::read(actual).unwrap();
    assert_eq!(
        expected_data.len(),
        actual_data.len(),
        "{} and {} differ in size",
        expected.display(),
        actual.display()
    );
    assert!(
        expected_data == actual_data,
        "{} and {} differ in contents",
        expected.display(),
        actual.display()
    );
}

/// In-memory log sink.
///
/// Hand [`CapturedLogs::dispatch`] to the code under test and inspect the formatted output
/// afterwards with [`CapturedLogs::contents`].
#[derive(Clone, Debug)]
pub struct CapturedLogs {
    buf: Arc<Mutex<Vec<u8>>>,
    directives: String,
}

impl Default for CapturedLogs {
    fn default() -> Self {
        Self {
            buf: Arc::default(),
            directives: "debug".to_owned(),
        }
    }
}

impl CapturedLogs {
    /// Capture every event at `DEBUG` or above
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture events at `DEBUG` or above from `target` (and its child modules) only
    pub fn for_target(target: &str) -> Self {
        Self {
            directives: format!("{target}=debug"),
            ..Self::default()
        }
    }

    /// A dispatcher formatting the selected events into this buffer
    pub fn dispatch(&self) -> tracing::Dispatch {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_env_filter(EnvFilter::new(&self.directives))
            .finish();
        tracing::Dispatch::new(subscriber)
    }

    /// Everything captured so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }

    /// Captured lines containing `needle`
    pub fn lines_containing(&self, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_owned)
            .collect()
    }

    /// True when nothing has been captured
    pub fn is_empty(&self) -> bool {
        self.buf.lock().unwrap().is_empty()
    }
}

/// Writer handed out by [`CapturedLogs`] for a single event
#[derive(Debug)]
pub struct CapturedWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Write for CapturedWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter {
            buf: self.buf.clone(),
        }
    }
}
