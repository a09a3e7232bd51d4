// LabelDesk - app/state.rs
//
// Application state and the review workflow. Owned by the eframe::App
// implementation and mutated only from the UI thread.
//
// User actions never touch the network directly: they queue `ApiCall`s in
// the outbox, which the GUI hands to `RequestManager` each frame. Results
// come back through `apply`. This keeps the whole load -> reclassify ->
// accept -> reconcile cycle testable without a window or a server.

use crate::app::log_poll::LogPollProgress;
use crate::app::requests::{ApiCall, Completion, Outcome};
use crate::core::console::{self, LogConsole};
use crate::core::model::{ColumnCounts, Stats};
use crate::core::notice::{NoticeBoard, NoticeLevel};
use crate::core::queue::ReviewQueue;
use crate::platform::thumbnail::Thumbnail;
use crate::util::constants::NOTICE_DURATION_MS;
use crate::util::error::ApiError;
use chrono::{DateTime, Local};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::Duration;

/// Notice texts shown to the reviewer.
pub mod messages {
    pub const CONNECTION_ERROR: &str = "Connection error";
    pub const NOTHING_TO_ACCEPT: &str = "Nothing to accept";
    pub const PROCESSING: &str = "Processing...";
    pub const ACCEPT_FAILED: &str = "Error processing batch";
    pub const UPLOADING: &str = "Uploading images...";
    pub const UPLOAD_FAILED: &str = "Upload failed";
    pub const REMOVE_FAILED: &str = "Could not remove image";
    pub const LOAD_FAILED: &str = "Could not load images";
    pub const STATS_UPDATED: &str = "Statistics updated";
    pub const LOGS_COPIED: &str = "Logs copied to clipboard";
    pub const LOGS_COPY_FAILED: &str = "Could not copy logs";
}

/// Top-level tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Classify,
    Statistics,
}

/// Load state of the review columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueStatus {
    /// Nothing requested yet.
    Idle,
    Loading,
    Ready,
    /// The last load failed; the columns show an error marker.
    Failed(String),
}

/// An action waiting for the reviewer's yes/no.
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    /// Accept the whole queue. `count` is the size shown in the prompt; the
    /// request itself is rebuilt from the columns on confirm.
    Accept { count: usize },
    Remove { filename: String },
}

impl Confirmation {
    pub fn prompt(&self) -> String {
        match self {
            Confirmation::Accept { count } => {
                format!("Accept {count} classifications?")
            }
            Confirmation::Remove { filename } => {
                format!("Remove \"{filename}\" from the classification queue?")
            }
        }
    }
}

/// Thumbnail cache slot for one image URL.
#[derive(Debug, Clone, PartialEq)]
pub enum ThumbnailSlot {
    Loading,
    Ready,
    Failed,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Pending images and their current columns.
    pub queue: ReviewQueue,

    pub queue_status: QueueStatus,

    /// Latest aggregate counters from the backend.
    pub stats: Option<Stats>,

    /// When `stats` was last refreshed successfully.
    pub stats_updated: Option<DateTime<Local>>,

    pub console: LogConsole,

    pub notices: NoticeBoard,

    /// Pending yes/no dialog.
    pub confirmation: Option<Confirmation>,

    pub active_tab: Tab,

    /// API base shown in the status bar.
    pub api_base: String,

    pub dark_mode: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,

    /// Text for the GUI to place on the clipboard.
    pub pending_clipboard: Option<String>,

    /// Per-URL thumbnail state.
    pub thumbnails: HashMap<String, ThumbnailSlot>,

    /// Decoded thumbnails waiting to be uploaded as textures.
    decoded_thumbnails: Vec<(String, Thumbnail)>,

    /// URLs whose textures the GUI should release.
    evicted_thumbnails: Vec<String>,

    /// Calls queued for the request manager.
    outbox: Vec<ApiCall>,

    /// Generation of the most recently issued image-list load.
    load_generation: u64,
}

impl AppState {
    pub fn new(api_base: String, auto_scroll: bool, dark_mode: bool, debug_mode: bool) -> Self {
        Self {
            queue: ReviewQueue::new(),
            queue_status: QueueStatus::Idle,
            stats: None,
            stats_updated: None,
            console: LogConsole::new(auto_scroll),
            notices: NoticeBoard::new(Duration::from_millis(NOTICE_DURATION_MS)),
            confirmation: None,
            active_tab: Tab::Classify,
            api_base,
            dark_mode,
            debug_mode,
            pending_clipboard: None,
            thumbnails: HashMap::new(),
            decoded_thumbnails: Vec::new(),
            evicted_thumbnails: Vec::new(),
            outbox: Vec::new(),
            load_generation: 0,
        }
    }

    /// Live column counts.
    pub fn counts(&self) -> ColumnCounts {
        self.queue.counts()
    }

    /// Calls queued since the last drain.
    pub fn take_outbox(&mut self) -> Vec<ApiCall> {
        std::mem::take(&mut self.outbox)
    }

    /// Decoded thumbnails not yet turned into textures.
    pub fn take_decoded_thumbnails(&mut self) -> Vec<(String, Thumbnail)> {
        std::mem::take(&mut self.decoded_thumbnails)
    }

    /// URLs no longer in the queue whose textures can be dropped.
    pub fn take_evicted_thumbnails(&mut self) -> Vec<String> {
        std::mem::take(&mut self.evicted_thumbnails)
    }

    /// Forget cached thumbnails for images that left the queue.
    fn evict_stale_thumbnails(&mut self) {
        let live: HashSet<&str> = self
            .queue
            .items()
            .iter()
            .map(|item| item.url.as_str())
            .collect();
        let stale: Vec<String> = self
            .thumbnails
            .keys()
            .filter(|url| !live.contains(url.as_str()))
            .cloned()
            .collect();
        if stale.is_empty() {
            return;
        }
        tracing::debug!(count = stale.len(), "Evicting stale thumbnails");
        for url in &stale {
            self.thumbnails.remove(url);
        }
        self.decoded_thumbnails
            .retain(|(url, _)| live.contains(url.as_str()));
        self.evicted_thumbnails.extend(stale);
    }

    fn notify(&mut self, text: impl Into<String>, level: NoticeLevel) {
        self.notices.show(text, level);
    }

    // -------------------------------------------------------------------------
    // User actions
    // -------------------------------------------------------------------------

    /// Re-fetch the pending set. Any load still in flight becomes stale.
    pub fn request_reload(&mut self) {
        self.load_generation += 1;
        self.queue_status = QueueStatus::Loading;
        self.outbox.push(ApiCall::ListImages {
            generation: self.load_generation,
        });
    }

    pub fn request_stats(&mut self) {
        self.outbox.push(ApiCall::Stats);
    }

    /// Refresh button: queue and stats together.
    pub fn refresh_all(&mut self) {
        self.request_reload();
        self.request_stats();
    }

    /// "Refresh stats" button on the statistics tab.
    pub fn refresh_stats_clicked(&mut self) {
        self.request_stats();
        self.notify(messages::STATS_UPDATED, NoticeLevel::Info);
    }

    /// Start the accept flow from current column membership.
    ///
    /// An empty queue only shows a notice; otherwise a confirmation opens.
    pub fn request_accept(&mut self) {
        let request = self.queue.accept_request();
        if request.is_empty() {
            self.notify(messages::NOTHING_TO_ACCEPT, NoticeLevel::Info);
            return;
        }
        self.confirmation = Some(Confirmation::Accept {
            count: request.len(),
        });
    }

    /// Ask to remove `filename` from the pending set. Ignored while another
    /// confirmation is open.
    pub fn request_remove(&mut self, filename: &str) {
        if self.confirmation.is_some() {
            tracing::debug!(filename, "Remove ignored: a confirmation is already open");
            return;
        }
        self.confirmation = Some(Confirmation::Remove {
            filename: filename.to_string(),
        });
    }

    /// The reviewer said yes to the open confirmation.
    pub fn confirm(&mut self) {
        match self.confirmation.take() {
            Some(Confirmation::Accept { .. }) => {
                // The columns stay interactive behind the dialog, so read
                // membership now rather than when the dialog opened.
                let request = self.queue.accept_request();
                if request.is_empty() {
                    self.notify(messages::NOTHING_TO_ACCEPT, NoticeLevel::Info);
                    return;
                }
                tracing::info!(items = request.len(), "Submitting accept batch");
                self.notify(messages::PROCESSING, NoticeLevel::Info);
                self.outbox.push(ApiCall::Accept(request));
            }
            Some(Confirmation::Remove { filename }) => {
                tracing::info!(filename = %filename, "Requesting removal");
                self.outbox.push(ApiCall::Remove { filename });
            }
            None => {}
        }
    }

    /// The reviewer said no (or closed the dialog).
    pub fn dismiss_confirmation(&mut self) {
        self.confirmation = None;
    }

    /// Upload the picked files. An empty selection does nothing.
    pub fn request_upload(&mut self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            return;
        }
        tracing::info!(files = paths.len(), "Uploading images");
        self.notify(messages::UPLOADING, NoticeLevel::Info);
        self.outbox.push(ApiCall::Upload { paths });
    }

    /// Copy the backend log to the clipboard (one fresh fetch).
    pub fn request_copy_logs(&mut self) {
        self.outbox.push(ApiCall::CopyLogs);
    }

    pub fn set_console_visible(&mut self, visible: bool) {
        if self.console.set_visible(visible) {
            tracing::debug!(visible, "Log console visibility changed");
        }
    }

    pub fn toggle_console(&mut self) {
        let visible = !self.console.is_visible();
        self.set_console_visible(visible);
    }

    /// Queue a thumbnail fetch for `url` unless one is cached or in flight.
    pub fn ensure_thumbnail(&mut self, url: &str) {
        if url.is_empty() || self.thumbnails.contains_key(url) {
            return;
        }
        self.thumbnails
            .insert(url.to_string(), ThumbnailSlot::Loading);
        self.outbox.push(ApiCall::Thumbnail {
            url: url.to_string(),
        });
    }

    // -------------------------------------------------------------------------
    // Results
    // -------------------------------------------------------------------------

    /// Apply a finished backend call.
    pub fn apply(&mut self, completion: Completion) {
        let Completion { call, outcome } = completion;
        match outcome {
            Outcome::Images(result) => {
                let generation = match call {
                    ApiCall::ListImages { generation } => generation,
                    _ => self.load_generation,
                };
                self.apply_images(generation, result);
            }
            Outcome::Stats(result) => self.apply_stats(result),
            Outcome::Accepted(result) => self.apply_accept(result),
            Outcome::Removed(result) => {
                let filename = match call {
                    ApiCall::Remove { filename } => filename,
                    _ => String::new(),
                };
                self.apply_remove(&filename, result);
            }
            Outcome::Uploaded(result) => self.apply_upload(result),
            Outcome::LogsForCopy(result) => self.apply_copy_logs(result),
            Outcome::Thumbnail(result) => {
                if let ApiCall::Thumbnail { url } = call {
                    self.apply_thumbnail(url, result);
                }
            }
        }
    }

    fn apply_images(
        &mut self,
        generation: u64,
        result: Result<Vec<crate::core::model::PendingImage>, ApiError>,
    ) {
        if generation != self.load_generation {
            tracing::debug!(
                generation,
                latest = self.load_generation,
                "Discarding stale image list"
            );
            return;
        }
        match result {
            Ok(images) => {
                let summary = self.queue.load(images);
                self.queue_status = QueueStatus::Ready;
                self.evict_stale_thumbnails();
                let counts = self.queue.counts();
                tracing::info!(
                    loaded = summary.loaded,
                    duplicates = summary.duplicates,
                    ia = counts.ia,
                    real = counts.real,
                    "Review queue loaded"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading images");
                self.queue.clear();
                self.queue_status = QueueStatus::Failed(e.to_string());
                let text = if e.is_transport() {
                    messages::CONNECTION_ERROR
                } else {
                    messages::LOAD_FAILED
                };
                self.notify(text, NoticeLevel::Error);
            }
        }
    }

    fn apply_stats(&mut self, result: Result<Stats, ApiError>) {
        match result {
            Ok(stats) => {
                self.stats = Some(stats);
                self.stats_updated = Some(Local::now());
            }
            Err(e) => tracing::error!(error = %e, "Error loading stats"),
        }
    }

    fn apply_accept(&mut self, result: Result<crate::core::model::AcceptResponse, ApiError>) {
        match result {
            Ok(response) => {
                let counts = response.stats;
                tracing::info!(real = counts.real, ia = counts.ia, "Accept batch processed");
                self.notify(
                    format!("Processed: {} Real, {} AI", counts.real, counts.ia),
                    NoticeLevel::Success,
                );
                // Accepted items leave the pending set; re-sync with the backend.
                self.request_reload();
                self.request_stats();
            }
            Err(e) => {
                tracing::error!(error = %e, "Accept batch failed");
                let text = if e.is_transport() {
                    messages::CONNECTION_ERROR
                } else {
                    messages::ACCEPT_FAILED
                };
                self.notify(text, NoticeLevel::Error);
            }
        }
    }

    fn apply_remove(&mut self, filename: &str, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                tracing::info!(filename, "Image removed from queue");
                self.queue.remove(filename);
                self.notify(format!("\"{filename}\" removed"), NoticeLevel::Success);
                self.request_reload();
            }
            Err(e) => {
                tracing::error!(filename, error = %e, "Error removing image");
                let text = if e.is_transport() {
                    messages::CONNECTION_ERROR.to_string()
                } else {
                    format!(
                        "Error: {}",
                        e.server_message().unwrap_or(messages::REMOVE_FAILED)
                    )
                };
                self.notify(text, NoticeLevel::Error);
            }
        }
    }

    fn apply_upload(&mut self, result: Result<crate::core::model::UploadResponse, ApiError>) {
        match result {
            Ok(response) => {
                if response.errors.is_empty() {
                    tracing::info!(files = response.files.len(), "Upload complete");
                    self.notify(
                        format!("Upload complete: {} files", response.files.len()),
                        NoticeLevel::Success,
                    );
                } else {
                    for err in &response.errors {
                        tracing::error!(error = %err, "Upload error reported by server");
                    }
                    self.notify(
                        format!("{} upload errors (see log)", response.errors.len()),
                        NoticeLevel::Error,
                    );
                }
                self.request_reload();
            }
            Err(e) => {
                tracing::error!(error = %e, "Upload failed");
                let text = match e {
                    ApiError::Transport { .. } => messages::CONNECTION_ERROR.to_string(),
                    ApiError::File { ref path, .. } => format!("Cannot read {}", path.display()),
                    _ => messages::UPLOAD_FAILED.to_string(),
                };
                self.notify(text, NoticeLevel::Error);
            }
        }
    }

    fn apply_copy_logs(&mut self, result: Result<Vec<String>, ApiError>) {
        match result {
            Ok(lines) => {
                self.pending_clipboard = Some(console::clipboard_text(&lines));
                self.notify(messages::LOGS_COPIED, NoticeLevel::Success);
            }
            Err(e) => {
                tracing::error!(error = %e, "Error copying logs");
                self.notify(messages::LOGS_COPY_FAILED, NoticeLevel::Error);
            }
        }
    }

    fn apply_thumbnail(&mut self, url: String, result: Result<Thumbnail, ApiError>) {
        match result {
            Ok(thumb) => {
                self.thumbnails.insert(url.clone(), ThumbnailSlot::Ready);
                self.decoded_thumbnails.push((url, thumb));
            }
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Thumbnail unavailable");
                self.thumbnails.insert(url, ThumbnailSlot::Failed);
            }
        }
    }

    /// Apply a message from the log poller.
    pub fn apply_log_poll(&mut self, progress: LogPollProgress) {
        match progress {
            LogPollProgress::Lines(lines) => self.console.replace(lines),
            LogPollProgress::Failed(message) => {
                tracing::debug!(error = %message, "Log console refresh failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{
        AcceptCounts, AcceptItem, AcceptResponse, Label, PendingImage, Prediction, UploadResponse,
    };

    fn state() -> AppState {
        AppState::new("http://test/api".into(), true, true, false)
    }

    fn pending(filename: &str, label: Label) -> PendingImage {
        PendingImage {
            filename: filename.into(),
            url: format!("/images/entrada/{filename}"),
            prediction: Prediction::scored(label, 0.8),
        }
    }

    fn loaded_state(images: Vec<PendingImage>) -> AppState {
        let mut s = state();
        s.request_reload();
        let call = s.take_outbox().remove(0);
        s.apply(Completion {
            call,
            outcome: Outcome::Images(Ok(images)),
        });
        s
    }

    fn status_error(code: u16, message: Option<&str>) -> ApiError {
        ApiError::Status {
            endpoint: "/x".into(),
            code,
            message: message.map(str::to_string),
        }
    }

    fn transport_error() -> ApiError {
        ApiError::Transport {
            endpoint: "/x".into(),
            message: "refused".into(),
        }
    }

    #[test]
    fn reload_marks_loading_and_queues_call() {
        let mut s = state();
        s.request_reload();
        assert_eq!(s.queue_status, QueueStatus::Loading);
        assert_eq!(s.take_outbox(), vec![ApiCall::ListImages { generation: 1 }]);
        assert!(s.take_outbox().is_empty());
    }

    #[test]
    fn load_partitions_and_counts() {
        let s = loaded_state(vec![
            pending("a.png", Label::Ia),
            pending("b.png", Label::Real),
            PendingImage {
                filename: "c.png".into(),
                url: String::new(),
                prediction: Prediction::default(),
            },
        ]);
        assert_eq!(s.queue_status, QueueStatus::Ready);
        assert_eq!(s.counts(), ColumnCounts { ia: 1, real: 2 });
        assert_eq!(s.counts().total(), 3);
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut s = state();
        s.request_reload();
        s.request_reload();
        let calls = s.take_outbox();
        let (first, second) = (calls[0].clone(), calls[1].clone());

        // Newer response lands first, older one afterwards.
        s.apply(Completion {
            call: second,
            outcome: Outcome::Images(Ok(vec![pending("new.png", Label::Ia)])),
        });
        s.apply(Completion {
            call: first,
            outcome: Outcome::Images(Ok(vec![pending("old.png", Label::Real)])),
        });
        assert!(s.queue.get("new.png").is_some());
        assert!(s.queue.get("old.png").is_none());
    }

    #[test]
    fn failed_load_shows_error_marker() {
        let mut s = loaded_state(vec![pending("a.png", Label::Ia)]);
        s.request_reload();
        let call = s.take_outbox().remove(0);
        s.apply(Completion {
            call,
            outcome: Outcome::Images(Err(transport_error())),
        });
        assert!(matches!(s.queue_status, QueueStatus::Failed(_)));
        assert!(s.queue.is_empty());
        assert_eq!(s.notices.last_text(), Some(messages::CONNECTION_ERROR));
        // No automatic retry.
        assert!(s.take_outbox().is_empty());
    }

    #[test]
    fn empty_accept_makes_no_call() {
        let mut s = loaded_state(vec![]);
        s.request_accept();
        assert!(s.confirmation.is_none());
        assert!(s.take_outbox().is_empty());
        assert_eq!(s.notices.last_text(), Some(messages::NOTHING_TO_ACCEPT));
    }

    #[test]
    fn accept_submits_corrected_labels_after_confirmation() {
        let mut s = loaded_state(vec![pending("x.png", Label::Ia), pending("y.png", Label::Real)]);
        s.queue.begin_drag("x.png");
        s.queue.drop_on(Label::Real);

        s.request_accept();
        let prompt = s.confirmation.as_ref().unwrap().prompt();
        assert_eq!(prompt, "Accept 2 classifications?");
        assert!(s.take_outbox().is_empty(), "nothing sent before confirming");

        s.confirm();
        let calls = s.take_outbox();
        assert_eq!(calls.len(), 1);
        let ApiCall::Accept(request) = &calls[0] else {
            panic!("expected accept call, got {calls:?}");
        };
        assert!(request.items.contains(&AcceptItem {
            filename: "x.png".into(),
            label: Label::Real,
        }));
        assert_eq!(request.label_of("y.png"), Some(Label::Real));
    }

    #[test]
    fn accept_uses_columns_at_confirm_time() {
        let mut s = loaded_state(vec![pending("x.png", Label::Ia)]);
        s.request_accept();
        // The dialog does not block the columns.
        s.queue.move_item("x.png", Label::Real);
        s.confirm();
        let calls = s.take_outbox();
        let ApiCall::Accept(request) = &calls[0] else {
            panic!("expected accept call, got {calls:?}");
        };
        assert_eq!(request.label_of("x.png"), Some(Label::Real));
    }

    #[test]
    fn accept_confirmed_after_queue_emptied_makes_no_call() {
        let mut s = loaded_state(vec![pending("x.png", Label::Ia)]);
        s.request_accept();
        s.request_reload();
        let call = s.take_outbox().remove(0);
        s.apply(Completion {
            call,
            outcome: Outcome::Images(Ok(vec![])),
        });
        s.confirm();
        assert!(s.take_outbox().is_empty());
        assert_eq!(s.notices.last_text(), Some(messages::NOTHING_TO_ACCEPT));
    }

    #[test]
    fn remove_does_not_replace_open_accept_dialog() {
        let mut s = loaded_state(vec![pending("x.png", Label::Ia)]);
        s.request_accept();
        s.request_remove("x.png");
        assert_eq!(s.confirmation, Some(Confirmation::Accept { count: 1 }));
        s.confirm();
        let calls = s.take_outbox();
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], ApiCall::Accept(_)));
    }

    #[test]
    fn dismissed_accept_sends_nothing() {
        let mut s = loaded_state(vec![pending("x.png", Label::Ia)]);
        s.request_accept();
        s.dismiss_confirmation();
        s.confirm();
        assert!(s.take_outbox().is_empty());
    }

    #[test]
    fn successful_accept_refreshes_queue_and_stats_once() {
        let mut s = loaded_state(vec![pending("x.png", Label::Ia)]);
        s.request_accept();
        s.confirm();
        let call = s.take_outbox().remove(0);
        s.apply(Completion {
            call,
            outcome: Outcome::Accepted(Ok(AcceptResponse {
                stats: AcceptCounts { real: 0, ia: 1 },
            })),
        });
        let follow_ups = s.take_outbox();
        assert_eq!(follow_ups.len(), 2);
        assert_eq!(
            follow_ups
                .iter()
                .filter(|c| matches!(c, ApiCall::ListImages { .. }))
                .count(),
            1
        );
        assert_eq!(
            follow_ups.iter().filter(|c| **c == ApiCall::Stats).count(),
            1
        );
        assert_eq!(s.notices.last_text(), Some("Processed: 0 Real, 1 AI"));
    }

    #[test]
    fn failed_accept_leaves_queue_untouched() {
        let mut s = loaded_state(vec![pending("x.png", Label::Ia)]);
        s.queue.move_item("x.png", Label::Real);
        s.request_accept();
        s.confirm();
        let call = s.take_outbox().remove(0);
        s.apply(Completion {
            call,
            outcome: Outcome::Accepted(Err(status_error(500, None))),
        });
        assert!(s.take_outbox().is_empty());
        assert_eq!(s.queue.column_of("x.png"), Some(Label::Real));
        assert_eq!(s.notices.last_text(), Some(messages::ACCEPT_FAILED));
    }

    #[test]
    fn failed_remove_keeps_item_in_place() {
        let mut s = loaded_state(vec![
            pending("a.png", Label::Ia),
            pending("b.png", Label::Ia),
            pending("c.png", Label::Real),
        ]);
        let before: Vec<_> = s.queue.items().to_vec();
        s.request_remove("a.png");
        assert_eq!(
            s.confirmation.as_ref().unwrap().prompt(),
            "Remove \"a.png\" from the classification queue?"
        );
        s.confirm();
        let call = s.take_outbox().remove(0);
        assert_eq!(call, ApiCall::Remove { filename: "a.png".into() });
        s.apply(Completion {
            call,
            outcome: Outcome::Removed(Err(status_error(400, Some("File not found")))),
        });
        assert_eq!(s.queue.items(), before.as_slice());
        assert_eq!(s.notices.last_text(), Some("Error: File not found"));
        assert!(s.take_outbox().is_empty());
    }

    #[test]
    fn failed_remove_without_message_uses_fallback() {
        let mut s = loaded_state(vec![pending("a.png", Label::Ia)]);
        s.apply(Completion {
            call: ApiCall::Remove { filename: "a.png".into() },
            outcome: Outcome::Removed(Err(status_error(500, None))),
        });
        assert_eq!(
            s.notices.last_text(),
            Some("Error: Could not remove image")
        );
    }

    #[test]
    fn successful_remove_reloads() {
        let mut s = loaded_state(vec![pending("a.png", Label::Ia)]);
        s.apply(Completion {
            call: ApiCall::Remove { filename: "a.png".into() },
            outcome: Outcome::Removed(Ok(())),
        });
        assert!(s.queue.get("a.png").is_none());
        assert!(matches!(
            s.take_outbox().as_slice(),
            [ApiCall::ListImages { .. }]
        ));
    }

    #[test]
    fn upload_reports_server_errors_and_reloads() {
        let mut s = state();
        s.request_upload(vec![PathBuf::from("a.png"), PathBuf::from("b.png")]);
        assert_eq!(s.notices.last_text(), Some(messages::UPLOADING));
        let call = s.take_outbox().remove(0);
        s.apply(Completion {
            call,
            outcome: Outcome::Uploaded(Ok(UploadResponse {
                files: vec!["a.png".into()],
                errors: vec!["b.png: unsupported".into()],
            })),
        });
        assert_eq!(s.notices.last_text(), Some("1 upload errors (see log)"));
        assert!(matches!(
            s.take_outbox().as_slice(),
            [ApiCall::ListImages { .. }]
        ));
    }

    #[test]
    fn empty_upload_selection_is_ignored() {
        let mut s = state();
        s.request_upload(Vec::new());
        assert!(s.take_outbox().is_empty());
    }

    #[test]
    fn copy_logs_fills_clipboard() {
        let mut s = state();
        s.request_copy_logs();
        let call = s.take_outbox().remove(0);
        s.apply(Completion {
            call,
            outcome: Outcome::LogsForCopy(Ok(vec!["one".into(), "two".into()])),
        });
        assert_eq!(s.pending_clipboard.as_deref(), Some("one\ntwo"));
        assert_eq!(s.notices.last_text(), Some(messages::LOGS_COPIED));
    }

    #[test]
    fn copy_logs_failure_notifies() {
        let mut s = state();
        s.apply(Completion {
            call: ApiCall::CopyLogs,
            outcome: Outcome::LogsForCopy(Err(transport_error())),
        });
        assert!(s.pending_clipboard.is_none());
        assert_eq!(s.notices.last_text(), Some(messages::LOGS_COPY_FAILED));
    }

    #[test]
    fn stats_failure_keeps_previous() {
        let mut s = state();
        s.apply(Completion {
            call: ApiCall::Stats,
            outcome: Outcome::Stats(Ok(Stats::Indexed {
                total_indexed: 3,
                real: 2,
                ia: 1,
            })),
        });
        s.apply(Completion {
            call: ApiCall::Stats,
            outcome: Outcome::Stats(Err(transport_error())),
        });
        assert!(matches!(s.stats, Some(Stats::Indexed { total_indexed: 3, .. })));
        assert!(s.stats_updated.is_some());
    }

    #[test]
    fn thumbnails_requested_once() {
        let mut s = state();
        s.ensure_thumbnail("/a.png");
        s.ensure_thumbnail("/a.png");
        s.ensure_thumbnail("");
        assert_eq!(
            s.take_outbox(),
            vec![ApiCall::Thumbnail { url: "/a.png".into() }]
        );
        s.apply(Completion {
            call: ApiCall::Thumbnail { url: "/a.png".into() },
            outcome: Outcome::Thumbnail(Ok(Thumbnail {
                width: 1,
                height: 1,
                rgba: vec![0, 0, 0, 255],
            })),
        });
        assert_eq!(s.thumbnails.get("/a.png"), Some(&ThumbnailSlot::Ready));
        assert_eq!(s.take_decoded_thumbnails().len(), 1);
        assert!(s.take_decoded_thumbnails().is_empty());
    }

    #[test]
    fn reload_evicts_thumbnails_for_departed_images() {
        let mut s = loaded_state(vec![pending("a.png", Label::Ia), pending("b.png", Label::Real)]);
        let gone = "/images/entrada/a.png";
        let kept = "/images/entrada/b.png";
        s.ensure_thumbnail(gone);
        s.ensure_thumbnail(kept);
        for call in s.take_outbox() {
            s.apply(Completion {
                call,
                outcome: Outcome::Thumbnail(Ok(Thumbnail {
                    width: 1,
                    height: 1,
                    rgba: vec![0, 0, 0, 255],
                })),
            });
        }

        s.request_reload();
        let call = s.take_outbox().remove(0);
        s.apply(Completion {
            call,
            outcome: Outcome::Images(Ok(vec![pending("b.png", Label::Real)])),
        });

        assert!(!s.thumbnails.contains_key(gone));
        assert_eq!(s.thumbnails.get(kept), Some(&ThumbnailSlot::Ready));
        assert_eq!(s.take_evicted_thumbnails(), vec![gone.to_string()]);
        assert!(s.take_evicted_thumbnails().is_empty());
        let decoded: Vec<String> = s
            .take_decoded_thumbnails()
            .into_iter()
            .map(|(url, _)| url)
            .collect();
        assert_eq!(decoded, vec![kept.to_string()]);
    }

    #[test]
    fn log_poll_lines_replace_console() {
        let mut s = state();
        s.toggle_console();
        assert!(s.console.is_visible());
        s.apply_log_poll(LogPollProgress::Lines(vec!["[ERROR] x".into()]));
        s.apply_log_poll(LogPollProgress::Failed("down".into()));
        assert_eq!(s.console.lines().len(), 1);
        s.toggle_console();
        assert!(!s.console.is_visible());
    }
}
