//! Event bus carrying progress from a verification worker to its observer.

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::progress::event::ProgressEvent;
use crate::types::FileDigestSet;
use crate::verify::{VerificationObserver, VerificationResult};
use std::path::Path;

pub type ProgressReceiver = UnboundedReceiver<ProgressEvent>;

/// Sending half of a progress channel. Usable as an observer from any thread.
#[derive(Clone)]
pub struct ProgressBus {
    sender: UnboundedSender<ProgressEvent>,
}

impl ProgressBus {
    pub fn new_pair() -> (Self, ProgressReceiver) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn emit(&self, event: ProgressEvent) {
        // A dropped receiver means nobody is watching; the run still completes.
        let _ = self.sender.send(event);
    }
}

impl VerificationObserver for ProgressBus {
    fn on_started(&mut self, root_directory: &Path) {
        self.emit(ProgressEvent::Started {
            root_directory: root_directory.to_path_buf(),
        });
    }

    fn on_file_checked(&mut self, relative_path: &str, digests: &FileDigestSet, all_matched: bool) {
        self.emit(ProgressEvent::FileChecked {
            relative_path: relative_path.to_string(),
            digests: digests.clone(),
            all_digests_matched: all_matched,
        });
    }

    fn on_finished(&mut self, result: &VerificationResult) {
        self.emit(ProgressEvent::Finished {
            result: result.clone(),
        });
    }
}
