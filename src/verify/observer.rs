//! Observer side of the verification event contract

use crate::progress::ProgressEvent;
use crate::types::FileDigestSet;
use crate::verify::VerificationResult;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;

/// Receives the events of one verification run, in order.
///
/// Every method has a no-op default so an observer only implements what it needs.
pub trait VerificationObserver {
    fn on_started(&mut self, _root_directory: &Path) {}

    fn on_file_checked(&mut self, _relative_path: &str, _digests: &FileDigestSet, _all_matched: bool) {}

    fn on_finished(&mut self, _result: &VerificationResult) {}
}

/// Route a materialized event to the matching observer method
pub fn dispatch<O: VerificationObserver + ?Sized>(observer: &mut O, event: &ProgressEvent) {
    match event {
        ProgressEvent::Started { root_directory } => observer.on_started(root_directory),
        ProgressEvent::FileChecked {
            relative_path,
            digests,
            all_digests_matched,
        } => observer.on_file_checked(relative_path, digests, *all_digests_matched),
        ProgressEvent::Finished { result } => observer.on_finished(result),
    }
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl VerificationObserver for NoopObserver {}

/// Records every event
impl VerificationObserver for Vec<ProgressEvent> {
    fn on_started(&mut self, root_directory: &Path) {
        self.push(ProgressEvent::Started {
            root_directory: root_directory.to_path_buf(),
        });
    }

    fn on_file_checked(&mut self, relative_path: &str, digests: &FileDigestSet, all_matched: bool) {
        self.push(ProgressEvent::FileChecked {
            relative_path: relative_path.to_string(),
            digests: digests.clone(),
            all_digests_matched: all_matched,
        });
    }

    fn on_finished(&mut self, result: &VerificationResult) {
        self.push(ProgressEvent::Finished {
            result: result.clone(),
        });
    }
}

impl<T: VerificationObserver + ?Sized> VerificationObserver for &mut T {
    fn on_started(&mut self, root_directory: &Path) {
        (**self).on_started(root_directory)
    }

    fn on_file_checked(&mut self, relative_path: &str, digests: &FileDigestSet, all_matched: bool) {
        (**self).on_file_checked(relative_path, digests, all_matched)
    }

    fn on_finished(&mut self, result: &VerificationResult) {
        (**self).on_finished(result)
    }
}

/// Adapts a closure taking whole events into an observer
pub struct ObserverFn<F>(pub F);

impl<F: FnMut(ProgressEvent)> VerificationObserver for ObserverFn<F> {
    fn on_started(&mut self, root_directory: &Path) {
        (self.0)(ProgressEvent::Started {
            root_directory: root_directory.to_path_buf(),
        })
    }

    fn on_file_checked(&mut self, relative_path: &str, digests: &FileDigestSet, all_matched: bool) {
        (self.0)(ProgressEvent::FileChecked {
            relative_path: relative_path.to_string(),
            digests: digests.clone(),
            all_digests_matched: all_matched,
        })
    }

    fn on_finished(&mut self, result: &VerificationResult) {
        (self.0)(ProgressEvent::Finished {
            result: result.clone(),
        })
    }
}

/// Observer shared between the context that drives it and the one that reads it
pub struct SharedObserver<O> {
    inner: Arc<Mutex<O>>,
}

impl<O> SharedObserver<O> {
    pub fn new(observer: O) -> Self {
        Self {
            inner: Arc::new(Mutex::new(observer)),
        }
    }

    /// Run `f` with the wrapped observer locked
    pub fn with<R>(&self, f: impl FnOnce(&mut O) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }
}

impl<O> Clone for SharedObserver<O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<O: VerificationObserver> VerificationObserver for SharedObserver<O> {
    fn on_started(&mut self, root_directory: &Path) {
        self.inner.lock().on_started(root_directory)
    }

    fn on_file_checked(&mut self, relative_path: &str, digests: &FileDigestSet, all_matched: bool) {
        self.inner
            .lock()
            .on_file_checked(relative_path, digests, all_matched)
    }

    fn on_finished(&mut self, result: &VerificationResult) {
        self.inner.lock().on_finished(result)
    }
}
