// LabelDesk - core/format.rs
//
// Display formatting shared by the review columns and notices.

use crate::core::model::Prediction;
use crate::util::constants::CONFIDENCE_ERROR_TOKEN;

/// Whole-number percentage for a confidence in [0, 1].
///
/// Rounds half away from zero and clamps to 0..=100; NaN maps to 0.
pub fn confidence_percent(confidence: f64) -> u8 {
    if confidence.is_nan() {
        return 0;
    }
    (confidence * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Confidence badge text: `87%` for a scored prediction, `Err` when the
/// backend could not classify the image.
pub fn confidence_text(prediction: &Prediction) -> String {
    match prediction.confidence() {
        Some(confidence) => format!("{}%", confidence_percent(confidence)),
        None => CONFIDENCE_ERROR_TOKEN.to_string(),
    }
}

/// Shorten `name` to at most `max` characters, keeping the end (extension)
/// visible.
pub fn truncate_filename(name: &str, max: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max || max < 2 {
        return name.to_string();
    }
    let tail: String = chars[chars.len() - (max - 1)..].iter().collect();
    format!("\u{2026}{tail}")
}
