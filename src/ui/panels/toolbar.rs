// LabelDesk - ui/panels/toolbar.rs
//
// Top toolbar: tab switch, upload, refresh, accept, console toggle, theme.

use crate::app::state::{AppState, Tab};
use crate::util::constants::UPLOAD_EXTENSIONS;

/// Render the toolbar.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.selectable_value(&mut state.active_tab, Tab::Classify, "Classify");
        ui.selectable_value(&mut state.active_tab, Tab::Statistics, "Statistics");

        ui.separator();

        if ui
            .button("Upload\u{2026}")
            .on_hover_text("Send images to the classifier")
            .clicked()
        {
            if let Some(paths) = rfd::FileDialog::new()
                .add_filter("Images", UPLOAD_EXTENSIONS)
                .pick_files()
            {
                state.request_upload(paths);
            }
        }

        if ui
            .button("\u{27f3} Refresh")
            .on_hover_text("Reload the queue and statistics")
            .clicked()
        {
            state.refresh_all();
        }

        let total = state.counts().total();
        let accept = ui.add_enabled(
            state.confirmation.is_none(),
            egui::Button::new(format!("\u{2714} Accept all ({total})")),
        );
        if accept
            .on_hover_text("Commit every image with its current column as the label")
            .clicked()
        {
            state.request_accept();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let theme_icon = if state.dark_mode { "\u{2600}" } else { "\u{1f319}" };
            if ui
                .button(theme_icon)
                .on_hover_text("Toggle light/dark theme")
                .clicked()
            {
                state.dark_mode = !state.dark_mode;
            }

            let console_label = if state.console.is_visible() {
                "Hide log"
            } else {
                "Show log"
            };
            if ui.button(console_label).clicked() {
                state.toggle_console();
            }
        });
    });
}
