// LabelDesk - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the UI panels, the request manager, and the log poller.

use crate::app::log_poll::LogPoller;
use crate::app::requests::RequestManager;
use crate::app::state::{AppState, Tab};
use crate::platform::api::ReviewApi;
use crate::ui;
use crate::util::constants::MAX_COMPLETIONS_PER_FRAME;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// The LabelDesk application.
pub struct LabelDeskApp {
    pub state: AppState,
    pub requests: RequestManager,
    pub log_poller: LogPoller,
    /// Uploaded thumbnail textures keyed by image URL.
    textures: HashMap<String, egui::TextureHandle>,
}

impl LabelDeskApp {
    /// Create the application and kick off the initial queue and stats load.
    pub fn new(mut state: AppState, api: Arc<dyn ReviewApi>, log_poll_interval: Duration) -> Self {
        state.refresh_all();
        Self {
            state,
            requests: RequestManager::new(Arc::clone(&api)),
            log_poller: LogPoller::new(api, log_poll_interval),
            textures: HashMap::new(),
        }
    }

    /// Hand queued calls to the request manager.
    fn flush_outbox(&mut self) {
        for call in self.state.take_outbox() {
            self.requests.submit(call);
        }
    }
}

impl eframe::App for LabelDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(if self.state.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        // Poll finished backend calls.
        let completions = self.requests.poll_completions(MAX_COMPLETIONS_PER_FRAME);
        let had_completions = !completions.is_empty();
        for completion in completions {
            self.state.apply(completion);
        }

        // Poll log console refreshes.
        for progress in self.log_poller.poll_progress() {
            self.state.apply_log_poll(progress);
        }

        // Upload freshly decoded thumbnails as textures.
        for url in self.state.take_evicted_thumbnails() {
            self.textures.remove(&url);
        }
        for (url, thumb) in self.state.take_decoded_thumbnails() {
            let image =
                egui::ColorImage::from_rgba_unmultiplied([thumb.width, thumb.height], &thumb.rgba);
            let texture = ctx.load_texture(url.clone(), image, egui::TextureOptions::LINEAR);
            self.textures.insert(url, texture);
        }

        // ---- Handle flags set by panels ----
        if let Some(text) = self.state.pending_clipboard.take() {
            ctx.copy_text(text);
        }

        // Top toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::panels::toolbar::render(ui, &mut self.state);
        });

        // Status bar
        let in_flight = self.requests.in_flight();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui::panels::status::render(ui, &self.state, in_flight);
        });

        // Log console (bottom, only while visible)
        if self.state.console.is_visible() {
            egui::TopBottomPanel::bottom("log_console")
                .resizable(true)
                .default_height(ui::theme::CONSOLE_HEIGHT)
                .show(ctx, |ui| {
                    ui::panels::console::render(ui, &mut self.state);
                });
        }

        // Central panel
        egui::CentralPanel::default().show(ctx, |ui| match self.state.active_tab {
            Tab::Classify => ui::panels::queue::render(ui, &mut self.state, &self.textures),
            Tab::Statistics => ui::panels::stats::render(ui, &mut self.state),
        });

        // Overlays
        ui::panels::confirm::render(ctx, &mut self.state);
        ui::panels::notice::render(ctx, &self.state);

        // The console may have been opened or closed this frame.
        self.log_poller.sync_with(self.state.console.is_visible());

        self.flush_outbox();

        // Keep repainting while work is outstanding so results appear promptly.
        if had_completions {
            ctx.request_repaint();
        }
        if self.requests.in_flight() > 0 || self.log_poller.is_active() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
        if let Some(remaining) = self.state.notices.remaining_at(std::time::Instant::now()) {
            ctx.request_repaint_after(remaining);
        }
    }

    /// Called by eframe when the application window is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.log_poller.stop();
        tracing::info!("LabelDesk exiting");
    }
}
