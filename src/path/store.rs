use futures::channel::oneshot;
use futures::future::{self, BoxFuture, FutureExt};
use std::collections::HashMap;
use std::path::{Component, Path as FsPath, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::format::parse_path;
use super::Path;
use crate::error::LoadError;

/// Resolves a resource identifier to raw bytes
pub trait PathSource: Send + Sync {
    fn fetch(&self, identifier: &str) -> BoxFuture<'_, Result<Vec<u8>, LoadError>>;
}

/// Serves curve files from a directory on disk
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &FsPath {
        &self.root
    }

    /// Map an identifier to a file under the root, refusing anything that
    /// would leave it
    fn resolve(&self, identifier: &str) -> Option<PathBuf> {
        let relative = FsPath::new(identifier);
        let stays_inside = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        if identifier.is_empty() || !stays_inside {
            return None;
        }
        Some(self.root.join(relative))
    }

    fn read(&self, identifier: &str) -> Result<Vec<u8>, LoadError> {
        let file = self
            .resolve(identifier)
            .ok_or_else(|| LoadError::not_found(identifier))?;

        std::fs::read(&file).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => LoadError::not_found(identifier),
            _ => LoadError::Io {
                identifier: identifier.to_string(),
                source,
            },
        })
    }
}

impl PathSource for DirectorySource {
    fn fetch(&self, identifier: &str) -> BoxFuture<'_, Result<Vec<u8>, LoadError>> {
        future::ready(self.read(identifier)).boxed()
    }
}

/// In-memory resources, keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, identifier: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(identifier, bytes);
        self
    }

    pub fn insert(&mut self, identifier: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(identifier.into(), bytes.into());
    }
}

impl PathSource for MemorySource {
    fn fetch(&self, identifier: &str) -> BoxFuture<'_, Result<Vec<u8>, LoadError>> {
        let result = self
            .entries
            .get(identifier)
            .cloned()
            .ok_or_else(|| LoadError::not_found(identifier));
        future::ready(result).boxed()
    }
}

/// How many extra attempts a failed fetch gets, and how long to wait before
/// each one
///
/// Parse errors are never retried, the same bytes would fail again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryPolicy {
    pub retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(250);

    pub const NONE: Self = Self {
        retries: 0,
        backoff: Duration::ZERO,
    };

    pub const fn retries(retries: u32) -> Self {
        Self {
            retries,
            backoff: Self::DEFAULT_BACKOFF,
        }
    }

    pub const fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn should_retry(&self, attempt: u32, error: &LoadError) -> bool {
        attempt < self.retries && !matches!(error, LoadError::Parse { .. })
    }
}

/// Loads named curve resources into [`Path`]s
#[derive(Clone)]
pub struct PathStore {
    source: Arc<dyn PathSource>,
    retry: RetryPolicy,
}

impl PathStore {
    pub fn new(source: impl PathSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
            retry: RetryPolicy::NONE,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Fetch and parse `identifier`; the whole path or an error, never a part
    pub async fn load(&self, identifier: &str) -> Result<Path, LoadError> {
        let mut attempt = 0;
        loop {
            log::info!("Loading path {identifier:?} (attempt {})", attempt + 1);

            let result = match self.source.fetch(identifier).await {
                Ok(bytes) => parse_path(identifier, &bytes),
                Err(e) => Err(e),
            };

            match result {
                Ok(path) => {
                    log::info!(
                        "Loaded path {identifier:?}: {} points, {:.2} units long",
                        path.len(),
                        path.arc_length()
                    );
                    return Ok(path);
                }
                Err(e) if self.retry.should_retry(attempt, &e) => {
                    log::warn!("{e}, retrying in {:?}", self.retry.backoff);
                    delay(self.retry.backoff).await;
                    attempt += 1;
                }
                Err(e) => {
                    log::warn!("{e}");
                    return Err(e);
                }
            }
        }
    }
}

/// Resolves after `duration` without needing an async runtime
async fn delay(duration: Duration) {
    if duration.is_zero() {
        return;
    }

    let (sender, receiver) = oneshot::channel();
    let spawned = thread::Builder::new()
        .name("path-retry-timer".into())
        .spawn(move || {
            thread::sleep(duration);
            let _ = sender.send(());
        });

    match spawned {
        Ok(_) => {
            // Canceled only if the timer thread died; either way the wait is over
            let _ = receiver.await;
        }
        Err(e) => {
            log::debug!("No timer thread ({e}), waiting inline");
            thread::sleep(duration);
        }
    }
}

impl std::fmt::Debug for PathStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathStore")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
