// LabelDesk - app/requests.rs
//
// Runs backend calls off the UI thread.
//
// Architecture:
//   - `AppState` queues `ApiCall`s; the GUI hands them to `RequestManager`.
//   - Each call runs on its own short-lived background thread through the
//     shared `ReviewApi`.
//   - Results come back as `Completion`s over an mpsc channel that the UI
//     thread drains each frame (same pattern as the log poller).
//
// In-flight calls are never cancelled. Stale image-list completions are
// recognised by their generation in `AppState::apply`, not here.

use crate::core::model::{AcceptRequest, AcceptResponse, PendingImage, Stats, UploadResponse};
use crate::platform::api::{endpoints, ReviewApi};
use crate::platform::thumbnail::{self, Thumbnail};
use crate::util::constants::THUMBNAIL_MAX_EDGE;
use crate::util::error::ApiError;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};

/// One backend operation requested by the app state.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    /// Fetch the pending set. `generation` identifies this load so that an
    /// older response arriving late can be discarded.
    ListImages { generation: u64 },
    Stats,
    Accept(AcceptRequest),
    Remove { filename: String },
    Upload { paths: Vec<PathBuf> },
    /// One-shot `/logs` fetch for the clipboard.
    CopyLogs,
    Thumbnail { url: String },
}

impl ApiCall {
    /// Endpoint path (or image URL) the call hits, for logging.
    pub fn endpoint(&self) -> &str {
        match self {
            ApiCall::ListImages { .. } => endpoints::IMAGES,
            ApiCall::Stats => endpoints::STATS,
            ApiCall::Accept(_) => endpoints::ACCEPT,
            ApiCall::Remove { .. } => endpoints::REMOVE,
            ApiCall::Upload { .. } => endpoints::UPLOAD,
            ApiCall::CopyLogs => endpoints::LOGS,
            ApiCall::Thumbnail { url } => url,
        }
    }
}

/// Result of an `ApiCall`, one variant per call kind.
#[derive(Debug)]
pub enum Outcome {
    Images(Result<Vec<PendingImage>, ApiError>),
    Stats(Result<Stats, ApiError>),
    Accepted(Result<AcceptResponse, ApiError>),
    Removed(Result<(), ApiError>),
    Uploaded(Result<UploadResponse, ApiError>),
    LogsForCopy(Result<Vec<String>, ApiError>),
    Thumbnail(Result<Thumbnail, ApiError>),
}

/// A finished call together with the request that produced it.
#[derive(Debug)]
pub struct Completion {
    pub call: ApiCall,
    pub outcome: Outcome,
}

/// Run `call` synchronously against `api`.
pub fn execute(api: &dyn ReviewApi, call: &ApiCall) -> Outcome {
    match call {
        ApiCall::ListImages { .. } => Outcome::Images(api.list_images()),
        ApiCall::Stats => Outcome::Stats(api.stats()),
        ApiCall::Accept(request) => Outcome::Accepted(api.accept(request)),
        ApiCall::Remove { filename } => Outcome::Removed(api.remove(filename)),
        ApiCall::Upload { paths } => Outcome::Uploaded(api.upload(paths)),
        ApiCall::CopyLogs => Outcome::LogsForCopy(api.logs()),
        ApiCall::Thumbnail { url } => Outcome::Thumbnail(
            api.fetch_image(url)
                .and_then(|bytes| thumbnail::decode_thumbnail(url, &bytes, THUMBNAIL_MAX_EDGE)),
        ),
    }
}

// =============================================================================
// RequestManager
// =============================================================================

/// Dispatches `ApiCall`s to background threads and collects their results.
pub struct RequestManager {
    api: Arc<dyn ReviewApi>,
    tx: mpsc::Sender<Completion>,
    rx: mpsc::Receiver<Completion>,
    in_flight: Arc<AtomicUsize>,
}

impl RequestManager {
    pub fn new(api: Arc<dyn ReviewApi>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            api,
            tx,
            rx,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Start `call` on a background thread.
    pub fn submit(&self, call: ApiCall) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let in_flight = Arc::clone(&self.in_flight);
        in_flight.fetch_add(1, Ordering::SeqCst);

        tracing::debug!(endpoint = call.endpoint(), "Request submitted");
        std::thread::spawn(move || {
            let outcome = execute(api.as_ref(), &call);
            // Receiver gone means the app is shutting down.
            let _ = tx.send(Completion { call, outcome });
            // Decrement only after sending: in_flight() == 0 guarantees the
            // completion is already in the channel.
            in_flight.fetch_sub(1, Ordering::SeqCst);
        });
    }

    /// Number of calls that have not finished yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Drain up to `max` finished calls without blocking.
    pub fn poll_completions(&self, max: usize) -> Vec<Completion> {
        let mut completions = Vec::new();
        while completions.len() < max {
            match self.rx.try_recv() {
                Ok(c) => completions.push(c),
                Err(_) => break,
            }
        }
        completions
    }
}
