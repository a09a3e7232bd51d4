// LabelDesk - ui/panels/notice.rs
//
// Transient notice overlay, anchored to the top centre of the window.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the current notice, if one has not yet expired.
pub fn render(ctx: &egui::Context, state: &AppState) {
    let Some(notice) = state.notices.current() else {
        return;
    };

    egui::Area::new(egui::Id::new("notice_overlay"))
        .anchor(egui::Align2::CENTER_TOP, [0.0, 48.0])
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(theme::notice_colour(notice.level))
                .corner_radius(6.0)
                .inner_margin(egui::Margin::symmetric(14, 8))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(&notice.text)
                            .color(egui::Color32::WHITE)
                            .strong(),
                    );
                });
        });
}
