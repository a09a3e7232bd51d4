// LabelDesk - ui/panels/console.rs
//
// Backend log console. Each refresh replaces the whole list (the backend
// returns its full recent log every time). Lines are coloured by their
// [ERROR] / [WARNING] tag.

use crate::app::state::AppState;
use crate::core::console::LogSeverity;
use crate::ui::theme;

/// Render the log console contents.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.strong("Server log");
        let (errors, warnings, _) = state.console.severity_counts();
        if errors > 0 {
            ui.colored_label(
                theme::log_severity_colour(LogSeverity::Error, true),
                format!("{errors} errors"),
            );
        }
        if warnings > 0 {
            ui.colored_label(
                theme::log_severity_colour(LogSeverity::Warning, true),
                format!("{warnings} warnings"),
            );
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("\u{2715}").on_hover_text("Close").clicked() {
                state.set_console_visible(false);
            }
            if ui.small_button("Copy").on_hover_text("Copy logs to clipboard").clicked() {
                state.request_copy_logs();
            }
            ui.checkbox(&mut state.console.auto_scroll, "Auto-scroll");
        });
    });
    ui.separator();

    let scroll_to_end = state.console.take_scroll_request();
    let dark_mode = state.dark_mode;

    egui::ScrollArea::vertical()
        .id_salt("log_console_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            if state.console.lines().is_empty() {
                ui.label(egui::RichText::new("No log output yet.").weak());
                return;
            }
            for line in state.console.lines() {
                ui.label(
                    egui::RichText::new(&line.text)
                        .monospace()
                        .color(theme::log_severity_colour(line.severity, dark_mode)),
                );
            }
            if scroll_to_end {
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
            }
        });
}
