// LabelDesk - ui/panels/confirm.rs
//
// Yes/no dialog for accept and remove. Nothing is sent to the backend until
// the reviewer confirms.

use crate::app::state::AppState;

/// Render the confirmation dialog (if one is pending).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let Some(ref confirmation) = state.confirmation else {
        return;
    };
    let prompt = confirmation.prompt();

    let mut open = true;
    let mut confirmed = false;
    let mut dismissed = false;
    egui::Window::new("Confirm")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(320.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.label(prompt);
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("Yes").clicked() {
                    confirmed = true;
                }
                if ui.button("No").clicked() {
                    dismissed = true;
                }
            });
        });

    if confirmed {
        state.confirm();
    } else if dismissed || !open || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        state.dismiss_confirmation();
    }
}
