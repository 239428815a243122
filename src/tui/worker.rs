//! Background assessment worker.
//!
//! The model call blocks for up to the configured timeout, so it runs on its
//! own thread and reports back over a channel that the TUI main loop polls.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::{AssessmentError, AssessmentService, RequestId};
use crate::domain::{BiometricInput, RiskAssessmentResult};
use crate::ports::GenerativeModel;

/// Progress updates from the assessment worker.
#[derive(Debug, Clone)]
pub enum AssessmentProgress {
    /// Request sent, waiting on the model
    Requesting,
    /// Finished, successfully or not
    Complete {
        request: RequestId,
        outcome: Result<RiskAssessmentResult, AssessmentError>,
    },
}

/// Handle to a running assessment worker.
pub struct AssessmentWorkerHandle {
    /// Receiver for progress updates
    pub progress_rx: Receiver<AssessmentProgress>,
    request: RequestId,
    /// Thread handle (for joining)
    _handle: JoinHandle<()>,
}

impl AssessmentWorkerHandle {
    /// Try to receive the next progress update (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<AssessmentProgress> {
        self.progress_rx.try_recv().ok()
    }

    /// Submission this worker is answering.
    #[must_use]
    pub fn request(&self) -> RequestId {
        self.request
    }
}

/// Worker that runs one assessment in the background.
pub struct AssessmentWorker;

impl AssessmentWorker {
    /// Spawn a background assessment for one submission.
    ///
    /// Returns a handle to receive progress updates.
    pub fn spawn<M>(
        service: Arc<AssessmentService<M>>,
        request: RequestId,
        input: BiometricInput,
    ) -> AssessmentWorkerHandle
    where
        M: GenerativeModel + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run_assessment(&service, request, &input, &tx);
        });

        AssessmentWorkerHandle {
            progress_rx: rx,
            request,
            _handle: handle,
        }
    }

    fn run_assessment<M>(
        service: &AssessmentService<M>,
        request: RequestId,
        input: &BiometricInput,
        tx: &Sender<AssessmentProgress>,
    ) where
        M: GenerativeModel,
    {
        let _ = tx.send(AssessmentProgress::Requesting);

        let outcome = service.assess(input);

        // The receiver is gone if the UI quit; nothing left to report to.
        let _ = tx.send(AssessmentProgress::Complete { request, outcome });
    }
}
