use futures::channel::oneshot;
use std::thread;

use super::{Path, PathStore};
use crate::error::LoadError;

/// Load state of the scene's path, checked once per frame
#[derive(Debug, Default)]
pub enum PathState {
    #[default]
    Loading,
    Ready(Path),
    Failed(LoadError),
}

impl PathState {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Ready(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Short label for status displays
    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "unavailable",
        }
    }
}

impl From<Result<Path, LoadError>> for PathState {
    fn from(result: Result<Path, LoadError>) -> Self {
        match result {
            Ok(path) => Self::Ready(path),
            Err(e) => Self::Failed(e),
        }
    }
}

/// A path load running off the frame loop
///
/// The result is delivered exactly once by [`PendingPath::poll`]. Dropping the
/// handle discards whatever the worker produces.
#[derive(Debug)]
pub struct PendingPath {
    identifier: String,
    receiver: Option<oneshot::Receiver<Result<Path, LoadError>>>,
}

impl PendingPath {
    /// Start loading `identifier` on a worker thread
    pub fn spawn(store: PathStore, identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        let (sender, receiver) = oneshot::channel();

        let id = identifier.clone();
        let spawned = thread::Builder::new()
            .name("path-loader".into())
            .spawn(move || {
                let result = pollster::block_on(store.load(&id));
                if sender.send(result).is_err() {
                    log::debug!("Path {id:?} finished after its scene was torn down");
                }
            });

        // On spawn failure the closure (and sender) is dropped, poll reports it
        if let Err(e) = spawned {
            log::warn!("Could not start path loader: {e}");
        }

        Self {
            identifier,
            receiver: Some(receiver),
        }
    }

    /// A load that has already finished
    pub fn completed(identifier: impl Into<String>, result: Result<Path, LoadError>) -> Self {
        let (sender, receiver) = oneshot::channel();
        // Receiver is alive, send cannot fail
        let _ = sender.send(result);
        Self {
            identifier: identifier.into(),
            receiver: Some(receiver),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// True once the result has been handed out
    pub fn is_finished(&self) -> bool {
        self.receiver.is_none()
    }

    /// Non-blocking check; `Some` exactly once
    pub fn poll(&mut self) -> Option<Result<Path, LoadError>> {
        let receiver = self.receiver.as_mut()?;

        let result = match receiver.try_recv() {
            Ok(None) => return None,
            Ok(Some(result)) => result,
            Err(oneshot::Canceled) => Err(LoadError::Io {
                identifier: self.identifier.clone(),
                source: std::io::Error::other("path loader stopped without a result"),
            }),
        };

        self.receiver = None;
        Some(result)
    }
}
