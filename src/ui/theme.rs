// LabelDesk - ui/theme.rs
//
// Colour scheme, label and log-severity colour mapping, layout constants.
// No dependencies on app state or business logic.

use crate::core::console::LogSeverity;
use crate::core::model::Label;
use crate::core::notice::NoticeLevel;
use egui::Color32;

/// Accent colour for a review column.
pub fn label_colour(label: Label) -> Color32 {
    match label {
        Label::Ia => Color32::from_rgb(168, 85, 247),  // Purple 500
        Label::Real => Color32::from_rgb(34, 197, 94), // Green 500
    }
}

/// Subtle column background tint.
pub fn label_bg_colour(label: Label) -> Color32 {
    match label {
        Label::Ia => Color32::from_rgba_premultiplied(168, 85, 247, 18),
        Label::Real => Color32::from_rgba_premultiplied(34, 197, 94, 18),
    }
}

/// Text colour for a backend log line.
pub fn log_severity_colour(severity: LogSeverity, dark_mode: bool) -> Color32 {
    match (severity, dark_mode) {
        (LogSeverity::Error, _) => Color32::from_rgb(239, 68, 68), // Red 500
        (LogSeverity::Warning, _) => Color32::from_rgb(217, 119, 6), // Amber 600
        (LogSeverity::Info, true) => Color32::from_rgb(209, 213, 219), // Gray 300
        (LogSeverity::Info, false) => Color32::from_rgb(55, 65, 81), // Gray 700
    }
}

/// Notice background colour.
pub fn notice_colour(level: NoticeLevel) -> Color32 {
    match level {
        NoticeLevel::Info => Color32::from_rgb(37, 99, 235),    // Blue 600
        NoticeLevel::Success => Color32::from_rgb(22, 163, 74), // Green 600
        NoticeLevel::Error => Color32::from_rgb(220, 38, 38),   // Red 600
    }
}

/// Badge colour for a "corrected" item (moved out of its predicted column).
pub const CORRECTED_BADGE: Color32 = Color32::from_rgb(245, 158, 11); // Amber 500

/// Badge colour when the backend could not classify an image.
pub const ERROR_BADGE: Color32 = Color32::from_rgb(248, 113, 113); // Red 400

/// Layout constants.
pub const THUMBNAIL_SIZE: f32 = 96.0;
pub const CARD_WIDTH: f32 = 132.0;
pub const CARD_NAME_CHARS: usize = 18;
pub const CONSOLE_HEIGHT: f32 = 220.0;
pub const STATUS_BAR_HEIGHT: f32 = 28.0;
