// LabelDesk - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// Wire types mirror the classifier API's JSON exactly; everything the
// backend may omit or send malformed is defaulted here so one bad field
// never fails a whole load.

use serde::{Deserialize, Serialize};

// =============================================================================
// Label
// =============================================================================

/// Classification value. Also identifies the review column an item sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// AI-generated.
    Ia,
    Real,
}

impl Label {
    /// Returns all variants in column display order.
    pub fn all() -> &'static [Label] {
        &[Label::Ia, Label::Real]
    }

    /// Wire value, as sent to and received from the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Ia => "ia",
            Label::Real => "real",
        }
    }

    /// Column heading.
    pub fn heading(&self) -> &'static str {
        match self {
            Label::Ia => "AI-generated",
            Label::Real => "Real",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Prediction
// =============================================================================

/// Sentinel string the backend sends when inference failed.
pub const PREDICTION_ERROR_SENTINEL: &str = "Error";

/// The backend's predicted label for a pending image.
///
/// Either a scored prediction object or, when inference failed, a bare
/// string (the backend uses `"Error"`). Anything else is kept as
/// `Malformed` rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prediction {
    Scored {
        label: String,
        #[serde(default)]
        confidence: f64,
    },
    Sentinel(String),
    Malformed(serde_json::Value),
}

impl Default for Prediction {
    fn default() -> Self {
        Prediction::Sentinel(PREDICTION_ERROR_SENTINEL.to_string())
    }
}

impl Prediction {
    /// Build a scored prediction for a known label.
    pub fn scored(label: Label, confidence: f64) -> Self {
        Prediction::Scored {
            label: label.as_str().to_string(),
            confidence,
        }
    }

    /// Column an item starts in. Only an exact `"ia"` label lands in the
    /// AI column; every other label, the sentinel and malformed values
    /// fall back to `Real`.
    pub fn column(&self) -> Label {
        match self {
            Prediction::Scored { label, .. } if label == Label::Ia.as_str() => Label::Ia,
            _ => Label::Real,
        }
    }

    /// Confidence of a scored prediction.
    pub fn confidence(&self) -> Option<f64> {
        match self {
            Prediction::Scored { confidence, .. } => Some(*confidence),
            _ => None,
        }
    }

    /// True when the backend could not classify the image.
    pub fn is_error(&self) -> bool {
        !matches!(self, Prediction::Scored { .. })
    }
}

// =============================================================================
// Pending images
// =============================================================================

/// An image awaiting human review, as listed by `GET /images`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingImage {
    /// Unique, stable identifier.
    pub filename: String,
    /// Display source; may be relative to the server root.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub prediction: Prediction,
}

// =============================================================================
// Accept
// =============================================================================

/// One accepted label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptItem {
    pub filename: String,
    pub label: Label,
}

/// Body of `POST /accept`: the human-corrected labels of every item in the
/// queue at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AcceptRequest {
    pub items: Vec<AcceptItem>,
}

impl AcceptRequest {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Label submitted for `filename`, if present.
    pub fn label_of(&self, filename: &str) -> Option<Label> {
        self.items
            .iter()
            .find(|item| item.filename == filename)
            .map(|item| item.label)
    }
}

/// Per-label counts reported back by `POST /accept`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AcceptCounts {
    #[serde(default)]
    pub real: u64,
    #[serde(default)]
    pub ia: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AcceptResponse {
    #[serde(default)]
    pub stats: AcceptCounts,
}

// =============================================================================
// Upload / remove
// =============================================================================

/// Body of a successful `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Names of the files the server stored.
    #[serde(default)]
    pub files: Vec<String>,
    /// Per-file problems reported by the server.
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Body of `POST /remove`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveRequest {
    pub filename: String,
}

/// Shape of an error body (`{"error": "..."}`) the backend may send with a
/// non-2xx status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================================
// Stats
// =============================================================================

/// Aggregate counters from `GET /stats`.
///
/// Two backend generations exist: a flat index summary and a breakdown of
/// the base dataset versus human classifications. Both are display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stats {
    Learned {
        #[serde(rename = "dataset_base_real")]
        base_real: u64,
        #[serde(rename = "dataset_base_ia")]
        base_ia: u64,
        #[serde(rename = "clasificaciones_real")]
        classified_real: u64,
        #[serde(rename = "clasificaciones_ia")]
        classified_ia: u64,
        total_learned: u64,
    },
    Indexed {
        total_indexed: u64,
        real: u64,
        ia: u64,
    },
}

impl Stats {
    /// `(caption, value)` rows in display order.
    pub fn rows(&self) -> Vec<(&'static str, u64)> {
        match self {
            Stats::Learned {
                base_real,
                base_ia,
                classified_real,
                classified_ia,
                total_learned,
            } => vec![
                ("Base dataset (Real)", *base_real),
                ("Base dataset (AI)", *base_ia),
                ("Classified (Real)", *classified_real),
                ("Classified (AI)", *classified_ia),
                ("Total learned", *total_learned),
            ],
            Stats::Indexed {
                total_indexed,
                real,
                ia,
            } => vec![
                ("Total indexed", *total_indexed),
                ("Real", *real),
                ("AI-generated", *ia),
            ],
        }
    }
}

// =============================================================================
// Column counts
// =============================================================================

/// Live number of items in each review column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnCounts {
    pub ia: usize,
    pub real: usize,
}

impl ColumnCounts {
    pub fn get(&self, label: Label) -> usize {
        match label {
            Label::Ia => self.ia,
            Label::Real => self.real,
        }
    }

    pub fn total(&self) -> usize {
        self.ia + self.real
    }
}
