// Copyright 2025 Bench Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Offline result fetcher replaying bundles saved on local disk.
//!
//! Useful for re-running extractions against bundles captured earlier
//! without touching the gateway.

use async_trait::async_trait;
use bench_observatory_core::ResultBundle;
use std::path::PathBuf;
use tracing::debug;

use crate::{ResultFetcher, Result, RetrievalError};

/// Resolves content references against a directory of saved bundles.
///
/// A reference `QmHash` is looked up as `<root>/QmHash.json`, falling back
/// to the bare file name.
pub struct FileResultFetcher {
    root: PathBuf,
}

impl FileResultFetcher {
    /// Create a fetcher reading bundles under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn bundle_path(&self, reference: &str) -> PathBuf {
        let with_extension = self.root.join(format!("{reference}.json"));
        if with_extension.exists() {
            with_extension
        } else {
            self.root.join(reference)
        }
    }
}

#[async_trait]
impl ResultFetcher for FileResultFetcher {
    async fn fetch(&self, reference: &str) -> Result<ResultBundle> {
        let path = self.bundle_path(reference);
        debug!(path = %path.display(), "reading saved result bundle");

        let body = std::fs::read_to_string(&path).map_err(|source| RetrievalError::Io {
            reference: reference.to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&body)?)
    }
}
