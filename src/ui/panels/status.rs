// LabelDesk - ui/panels/status.rs
//
// Bottom status bar: backend address, load state, column counts.

use crate::app::state::{AppState, QueueStatus};
use crate::core::model::Label;
use crate::ui::theme;

/// Render the status bar. `in_flight` is the number of unfinished requests.
pub fn render(ui: &mut egui::Ui, state: &AppState, in_flight: usize) {
    ui.set_min_height(theme::STATUS_BAR_HEIGHT);
    ui.horizontal_centered(|ui| {
        ui.label(egui::RichText::new(&state.api_base).monospace().weak());
        ui.separator();

        match &state.queue_status {
            QueueStatus::Idle => {}
            QueueStatus::Loading => {
                ui.spinner();
                ui.label("Loading queue...");
            }
            QueueStatus::Ready => {
                ui.label(format!("{} pending", state.counts().total()));
            }
            QueueStatus::Failed(message) => {
                ui.colored_label(theme::ERROR_BADGE, "Queue unavailable")
                    .on_hover_text(message);
            }
        }

        if in_flight > 0 {
            ui.separator();
            ui.label(egui::RichText::new(format!("{in_flight} request(s) running")).weak());
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if state.debug_mode {
                ui.label(egui::RichText::new("DEBUG").small().strong());
                ui.separator();
            }
            let counts = state.counts();
            for label in Label::all().iter().rev() {
                ui.colored_label(
                    theme::label_colour(*label),
                    format!("{}: {}", label.heading(), counts.get(*label)),
                );
            }
            let corrected = state.queue.corrected_count();
            if corrected > 0 {
                ui.colored_label(theme::CORRECTED_BADGE, format!("{corrected} corrected"));
            }
        });
    });
}
