//! Non-blocking verification runs
//!
//! The engine runs on tokio's blocking pool; its events travel over a
//! [`ProgressBus`] back to whoever holds the [`VerificationRun`]. Each run owns
//! its own engine and manifest, so concurrent runs share nothing.

use crate::config::ScanConfig;
use crate::error::VerifyError;
use crate::manifest::Manifest;
use crate::progress::{ProgressBus, ProgressEvent, ProgressReceiver};
use crate::tree::hasher::FileHasher;
use crate::tree::walker::WalkerConfig;
use crate::verify::{dispatch, VerificationEngine, VerificationObserver, VerificationResult};
use futures::Stream;
use std::path::PathBuf;
use tokio::task::JoinHandle;
use tracing::debug;

/// Starts verification runs off the caller's execution context
#[derive(Debug, Clone, Default)]
pub struct AsyncRunner {
    walker_config: WalkerConfig,
    hasher: FileHasher,
}

impl AsyncRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(scan: &ScanConfig) -> Self {
        Self {
            walker_config: scan.walker_config(),
            hasher: FileHasher::new().with_chunk_size(scan.chunk_size),
        }
    }

    /// Start a run and return a handle for its events and result.
    ///
    /// # Panics
    /// Must be called from within a tokio runtime.
    pub fn start(&self, manifest: Manifest, root_directory: impl Into<PathBuf>) -> VerificationRun {
        let root_directory = root_directory.into();
        debug!(root = %root_directory.display(), entries = manifest.len(), "Spawning verification worker");

        let (mut bus, events) = ProgressBus::new_pair();
        let mut engine = VerificationEngine::new(manifest, root_directory)
            .with_walker_config(self.walker_config.clone())
            .with_hasher(self.hasher.clone());
        let handle = tokio::task::spawn_blocking(move || engine.run(&mut bus));

        VerificationRun { events, handle }
    }

    /// Start a run whose events are delivered to `observer` on a separate task.
    ///
    /// The returned handle resolves once the observer has seen every event.
    ///
    /// # Panics
    /// Must be called from within a tokio runtime.
    pub fn start_with_observer<O>(
        &self,
        manifest: Manifest,
        root_directory: impl Into<PathBuf>,
        mut observer: O,
    ) -> JoinHandle<Result<VerificationResult, VerifyError>>
    where
        O: VerificationObserver + Send + 'static,
    {
        let mut run = self.start(manifest, root_directory);
        tokio::spawn(async move {
            while let Some(event) = run.next_event().await {
                dispatch(&mut observer, &event);
            }
            run.wait().await
        })
    }
}

/// Handle to an in-flight verification
pub struct VerificationRun {
    events: ProgressReceiver,
    handle: JoinHandle<Result<VerificationResult, VerifyError>>,
}

impl VerificationRun {
    /// Next event, or `None` once the worker is done emitting
    pub async fn next_event(&mut self) -> Option<ProgressEvent> {
        self.events.recv().await
    }

    /// Wait for the worker and return its result.
    ///
    /// Events not yet received are dropped.
    pub async fn wait(self) -> Result<VerificationResult, VerifyError> {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(VerifyError::Worker(e.to_string())),
        }
    }

    /// Events as a stream. A fatal error ends the stream with one `Err` item.
    pub fn into_stream(self) -> impl Stream<Item = Result<ProgressEvent, VerifyError>> {
        futures::stream::unfold(Some(self), |state| async move {
            let mut run = state?;
            match run.next_event().await {
                Some(event) => Some((Ok(event), Some(run))),
                None => match run.wait().await {
                    Ok(_) => None,
                    Err(e) => Some((Err(e), None)),
                },
            }
        })
    }
}
