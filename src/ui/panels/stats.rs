// LabelDesk - ui/panels/stats.rs
//
// Statistics tab: the backend's aggregate counters plus when they were last
// fetched.

use crate::app::state::AppState;

/// Render the statistics tab.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("Statistics");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("\u{27f3} Refresh stats").clicked() {
                state.refresh_stats_clicked();
            }
        });
    });
    ui.separator();

    let Some(ref stats) = state.stats else {
        ui.centered_and_justified(|ui| {
            ui.label("No statistics loaded yet.");
        });
        return;
    };

    egui::Grid::new("stats_grid")
        .num_columns(2)
        .spacing([24.0, 6.0])
        .striped(true)
        .show(ui, |ui| {
            for (name, value) in stats.rows() {
                ui.label(name);
                ui.label(egui::RichText::new(value.to_string()).strong());
                ui.end_row();
            }
        });

    if let Some(updated) = state.stats_updated {
        ui.add_space(8.0);
        ui.label(
            egui::RichText::new(format!("Updated {}", updated.format("%H:%M:%S")))
                .small()
                .weak(),
        );
    }
}
