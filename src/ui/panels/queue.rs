// LabelDesk - ui/panels/queue.rs
//
// The two review columns ("AI-generated" and "Real").
//
// Cards are egui drag sources carrying the filename; each column is a drop
// zone. Every interaction is collected as a `CardAction` while rendering
// and applied to the review queue afterwards, so the queue is never
// mutated while a column is borrowing it. The columns are a projection of
// `ReviewQueue`; they hold no state of their own.

use crate::app::state::{AppState, QueueStatus, ThumbnailSlot};
use crate::core::format;
use crate::core::model::Label;
use crate::core::queue::{DropOutcome, ReviewItem};
use crate::ui::theme;
use std::collections::HashMap;

/// Interaction gathered during rendering.
enum CardAction {
    BeginDrag(String),
    Drop { filename: String, target: Label },
    Remove(String),
    Thumbnail(String),
}

/// Render both review columns.
pub fn render(
    ui: &mut egui::Ui,
    state: &mut AppState,
    textures: &HashMap<String, egui::TextureHandle>,
) {
    let mut actions: Vec<CardAction> = Vec::new();

    {
        let state: &AppState = state;
        ui.columns(Label::all().len(), |columns| {
            for (col_ui, &label) in columns.iter_mut().zip(Label::all()) {
                render_column(col_ui, state, label, textures, &mut actions);
            }
        });
    }

    for action in actions {
        match action {
            CardAction::BeginDrag(filename) => {
                state.queue.begin_drag(&filename);
            }
            CardAction::Drop { filename, target } => {
                // Payload from egui wins over anything stale in the queue.
                state.queue.begin_drag(&filename);
                if let DropOutcome::Moved { from, to } = state.queue.drop_on(target) {
                    tracing::info!(filename = %filename, from = %from, to = %to, "Reclassified");
                }
            }
            CardAction::Remove(filename) => state.request_remove(&filename),
            CardAction::Thumbnail(url) => state.ensure_thumbnail(&url),
        }
    }

    // Released outside both columns.
    if state.queue.dragging().is_some() && !egui::DragAndDrop::has_any_payload(ui.ctx()) {
        state.queue.cancel_drag();
    }
}

fn render_column(
    ui: &mut egui::Ui,
    state: &AppState,
    label: Label,
    textures: &HashMap<String, egui::TextureHandle>,
    actions: &mut Vec<CardAction>,
) {
    let count = state.counts().get(label);
    ui.horizontal(|ui| {
        ui.heading(egui::RichText::new(label.heading()).color(theme::label_colour(label)));
        ui.label(egui::RichText::new(format!("({count})")).weak());
    });
    ui.separator();

    let frame = egui::Frame::new()
        .fill(theme::label_bg_colour(label))
        .corner_radius(6.0)
        .inner_margin(egui::Margin::same(8));

    let (_, dropped) = ui.dnd_drop_zone::<String, ()>(frame, |ui| {
        ui.set_min_size(ui.available_size());

        match &state.queue_status {
            QueueStatus::Failed(message) => {
                ui.colored_label(theme::ERROR_BADGE, "\u{26a0} Could not load images")
                    .on_hover_text(message);
                return;
            }
            QueueStatus::Loading if state.queue.is_empty() => {
                ui.spinner();
                return;
            }
            _ => {}
        }

        if count == 0 {
            ui.label(egui::RichText::new("No images").weak());
            return;
        }

        egui::ScrollArea::vertical()
            .id_salt(("queue_column", label.as_str()))
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for item in state.queue.column(label) {
                        render_card(ui, state, item, textures, actions);
                    }
                });
            });
    });

    if let Some(filename) = dropped {
        actions.push(CardAction::Drop {
            filename: filename.as_ref().clone(),
            target: label,
        });
    }
}

fn render_card(
    ui: &mut egui::Ui,
    state: &AppState,
    item: &ReviewItem,
    textures: &HashMap<String, egui::TextureHandle>,
    actions: &mut Vec<CardAction>,
) {
    let being_dragged = state.queue.is_dragging(&item.filename);

    ui.vertical(|ui| {
        ui.set_width(theme::CARD_WIDTH);

        let id = egui::Id::new(("review_card", &item.filename));
        let drag = ui.dnd_drag_source(id, item.filename.clone(), |ui| {
            ui.set_width(theme::CARD_WIDTH);
            ui.vertical_centered(|ui| {
                render_thumbnail(ui, state, item, textures, actions);

                let name = format::truncate_filename(&item.filename, theme::CARD_NAME_CHARS);
                let mut text = egui::RichText::new(name).small();
                if being_dragged {
                    text = text.weak();
                }
                ui.label(text).on_hover_text(&item.filename);

                ui.horizontal(|ui| {
                    let badge = format::confidence_text(&item.prediction);
                    let colour = if item.prediction.is_error() {
                        theme::ERROR_BADGE
                    } else {
                        theme::label_colour(item.original)
                    };
                    ui.label(egui::RichText::new(badge).small().strong().color(colour))
                        .on_hover_text(format!("Predicted: {}", item.original.heading()));
                    if item.is_corrected() {
                        ui.label(
                            egui::RichText::new("moved")
                                .small()
                                .color(theme::CORRECTED_BADGE),
                        );
                    }
                });
            });
        });
        if drag.response.drag_started() {
            actions.push(CardAction::BeginDrag(item.filename.clone()));
        }

        if ui
            .add_enabled(
                state.confirmation.is_none(),
                egui::Button::new("\u{2715} Remove").small(),
            )
            .on_hover_text("Discard this image from the queue")
            .clicked()
        {
            actions.push(CardAction::Remove(item.filename.clone()));
        }
    });
}

fn render_thumbnail(
    ui: &mut egui::Ui,
    state: &AppState,
    item: &ReviewItem,
    textures: &HashMap<String, egui::TextureHandle>,
    actions: &mut Vec<CardAction>,
) {
    if let Some(texture) = textures.get(&item.url) {
        let size = fit_thumbnail(texture.size_vec2(), theme::THUMBNAIL_SIZE);
        ui.add(egui::Image::new(egui::load::SizedTexture::new(
            texture.id(),
            size,
        )));
        return;
    }

    let placeholder = match state.thumbnails.get(&item.url) {
        None => {
            if !item.url.is_empty() {
                actions.push(CardAction::Thumbnail(item.url.clone()));
            }
            "\u{2026}"
        }
        Some(ThumbnailSlot::Loading) | Some(ThumbnailSlot::Ready) => "\u{2026}",
        Some(ThumbnailSlot::Failed) => "?",
    };
    let side = theme::THUMBNAIL_SIZE;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, 4.0, ui.visuals().faint_bg_color);
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        placeholder,
        egui::FontId::proportional(18.0),
        ui.visuals().weak_text_color(),
    );
}

/// Scale `size` down so its longer edge is at most `max_edge`.
fn fit_thumbnail(size: egui::Vec2, max_edge: f32) -> egui::Vec2 {
    let longest = size.x.max(size.y);
    if longest <= max_edge || longest <= 0.0 {
        size
    } else {
        size * (max_edge / longest)
    }
}
