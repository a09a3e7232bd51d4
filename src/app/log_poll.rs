// LabelDesk - app/log_poll.rs
//
// Backend log console polling as a cancellable periodic task.
//
// Architecture:
//   - `LogPoller` lives on the UI thread; `run_log_poll` runs on a
//     background thread that fetches `/logs` immediately on start and then
//     once per poll interval.
//   - An `Arc<AtomicBool>` cancel flag stops the thread. The sleep between
//     fetches is sliced so cancel is noticed within
//     LOG_POLL_CANCEL_CHECK_INTERVAL_MS.
//   - Results are sent as `LogPollProgress` over an mpsc channel and drained
//     by the UI each frame.
//
// The poller is tied to console visibility by `sync_with`: showing the
// console starts it (one fetch fires right away), hiding it stops it, so
// no request is made while the console is hidden.

use crate::platform::api::ReviewApi;
use crate::util::constants::LOG_POLL_CANCEL_CHECK_INTERVAL_MS;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

/// Messages from the poll thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogPollProgress {
    /// A full fresh log set.
    Lines(Vec<String>),
    /// One fetch failed; polling continues.
    Failed(String),
}

/// Manages the log poll thread.
pub struct LogPoller {
    api: Arc<dyn ReviewApi>,
    interval: Duration,
    progress_rx: Option<mpsc::Receiver<LogPollProgress>>,
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl LogPoller {
    pub fn new(api: Arc<dyn ReviewApi>, interval: Duration) -> Self {
        Self {
            api,
            interval,
            progress_rx: None,
            cancel_flag: None,
        }
    }

    /// Start polling. A poller that is already running is restarted.
    pub fn start(&mut self) {
        self.stop();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));

        let api = Arc::clone(&self.api);
        let interval = self.interval;
        std::thread::spawn(move || run_log_poll(api, interval, tx, cancel));

        tracing::info!(interval_ms = self.interval.as_millis() as u64, "Log polling started");
    }

    /// Stop polling. Messages not yet drained are discarded.
    pub fn stop(&mut self) {
        if let Some(flag) = self.cancel_flag.take() {
            flag.store(true, Ordering::SeqCst);
            tracing::info!("Log polling stopped");
        }
        self.progress_rx = None;
    }

    pub fn is_active(&self) -> bool {
        self.cancel_flag.is_some()
    }

    /// Start or stop so that polling runs exactly while `visible` is true.
    pub fn sync_with(&mut self, visible: bool) {
        match (visible, self.is_active()) {
            (true, false) => self.start(),
            (false, true) => self.stop(),
            _ => {}
        }
    }

    /// Drain all queued messages without blocking.
    pub fn poll_progress(&self) -> Vec<LogPollProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while let Ok(msg) = rx.try_recv() {
                messages.push(msg);
            }
        }
        messages
    }
}

impl Drop for LogPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Background poll loop: fetch, publish, sleep, repeat until cancelled or
/// the receiver is dropped.
fn run_log_poll(
    api: Arc<dyn ReviewApi>,
    interval: Duration,
    tx: mpsc::Sender<LogPollProgress>,
    cancel: Arc<AtomicBool>,
) {
    let slice = Duration::from_millis(LOG_POLL_CANCEL_CHECK_INTERVAL_MS).min(interval);
    let slices = (interval.as_millis() / slice.as_millis().max(1)).max(1);

    loop {
        if cancel.load(Ordering::SeqCst) {
            return;
        }

        let msg = match api.logs() {
            Ok(lines) => {
                tracing::trace!(lines = lines.len(), "Logs fetched");
                LogPollProgress::Lines(lines)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Log fetch failed");
                LogPollProgress::Failed(e.to_string())
            }
        };
        if cancel.load(Ordering::SeqCst) || tx.send(msg).is_err() {
            return;
        }

        for _ in 0..slices {
            std::thread::sleep(slice);
            if cancel.load(Ordering::SeqCst) {
                return;
            }
        }
    }
}
