// LabelDesk - core/queue.rs
//
// The review queue: the single source of truth for which column every
// loaded pending image sits in. The UI renders a projection of this store
// and feeds drag-and-drop events back into it; the accept request is read
// from it, never from widget state.
//
// Invariant: the two columns partition the loaded set. Every loaded
// filename is held exactly once, and its `column` is the only place its
// current label lives.

use crate::core::model::{AcceptItem, AcceptRequest, ColumnCounts, Label, PendingImage, Prediction};

/// A pending image under review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewItem {
    pub filename: String,
    pub url: String,
    pub prediction: Prediction,
    /// Column the backend's prediction placed the item in.
    pub original: Label,
    /// Column the item is in now. Changed only by a completed drop.
    pub column: Label,
}

impl ReviewItem {
    fn from_pending(image: PendingImage) -> Self {
        let column = image.prediction.column();
        Self {
            filename: image.filename,
            url: image.url,
            prediction: image.prediction,
            original: column,
            column,
        }
    }

    /// True when the reviewer moved the item away from its predicted column.
    pub fn is_corrected(&self) -> bool {
        self.column != self.original
    }
}

/// Result of dropping an item on a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The item changed column.
    Moved { from: Label, to: Label },
    /// The item was already in the target column; nothing changed.
    Unchanged,
    /// No item with that filename is loaded (or nothing was being dragged).
    Unknown,
}

/// Outcome of `ReviewQueue::load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub loaded: usize,
    /// Entries dropped because their filename was already loaded.
    pub duplicates: usize,
}

/// Ordered store of review items plus the in-progress drag payload.
#[derive(Debug, Default)]
pub struct ReviewQueue {
    /// Global display order. A cross-column move re-appends the item so
    /// it shows up at the end of its new column.
    items: Vec<ReviewItem>,
    /// Filename recorded at drag start.
    dragging: Option<String>,
}

impl ReviewQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole queue with a freshly fetched pending set.
    ///
    /// Each image starts in the column its prediction names. Duplicate
    /// filenames keep their first occurrence.
    pub fn load(&mut self, images: Vec<PendingImage>) -> LoadSummary {
        self.items.clear();
        self.dragging = None;

        let mut summary = LoadSummary::default();
        for image in images {
            if self.position(&image.filename).is_some() {
                tracing::warn!(filename = %image.filename, "Duplicate pending image ignored");
                summary.duplicates += 1;
                continue;
            }
            self.items.push(ReviewItem::from_pending(image));
            summary.loaded += 1;
        }
        summary
    }

    /// Drop every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.dragging = None;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in global order.
    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    /// Items currently in `label`'s column, in column order.
    pub fn column(&self, label: Label) -> impl Iterator<Item = &ReviewItem> {
        self.items.iter().filter(move |item| item.column == label)
    }

    pub fn get(&self, filename: &str) -> Option<&ReviewItem> {
        self.items.iter().find(|item| item.filename == filename)
    }

    /// Current column of `filename`.
    pub fn column_of(&self, filename: &str) -> Option<Label> {
        self.get(filename).map(|item| item.column)
    }

    /// Live column counts, recomputed from membership.
    pub fn counts(&self) -> ColumnCounts {
        let ia = self.column(Label::Ia).count();
        ColumnCounts {
            ia,
            real: self.items.len() - ia,
        }
    }

    /// Number of items the reviewer moved away from their prediction.
    pub fn corrected_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_corrected()).count()
    }

    // -------------------------------------------------------------------------
    // Drag and drop
    // -------------------------------------------------------------------------

    /// Record `filename` as the drag payload. Returns false (and records
    /// nothing) for an unknown filename.
    pub fn begin_drag(&mut self, filename: &str) -> bool {
        if self.position(filename).is_none() {
            return false;
        }
        self.dragging = Some(filename.to_string());
        true
    }

    /// Filename being dragged, if any.
    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    pub fn is_dragging(&self, filename: &str) -> bool {
        self.dragging.as_deref() == Some(filename)
    }

    /// Abandon the drag without moving anything.
    pub fn cancel_drag(&mut self) {
        self.dragging = None;
    }

    /// Drop the dragged item on `target`. Clears the drag payload.
    pub fn drop_on(&mut self, target: Label) -> DropOutcome {
        match self.dragging.take() {
            Some(filename) => self.move_item(&filename, target),
            None => DropOutcome::Unknown,
        }
    }

    /// Move `filename` into `target`'s column.
    ///
    /// Dropping into the column the item is already in changes nothing,
    /// not even its position.
    pub fn move_item(&mut self, filename: &str, target: Label) -> DropOutcome {
        if self.dragging.as_deref() == Some(filename) {
            self.dragging = None;
        }
        let Some(pos) = self.position(filename) else {
            return DropOutcome::Unknown;
        };
        let from = self.items[pos].column;
        if from == target {
            return DropOutcome::Unchanged;
        }
        let mut item = self.items.remove(pos);
        item.column = target;
        self.items.push(item);
        tracing::debug!(filename, from = %from, to = %target, "Item reclassified");
        DropOutcome::Moved { from, to: target }
    }

    /// Remove `filename` from the queue.
    pub fn remove(&mut self, filename: &str) -> Option<ReviewItem> {
        let pos = self.position(filename)?;
        if self.dragging.as_deref() == Some(filename) {
            self.dragging = None;
        }
        Some(self.items.remove(pos))
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Build the accept request from current membership: the AI column in
    /// column order, then the Real column.
    pub fn accept_request(&self) -> AcceptRequest {
        let items = Label::all()
            .iter()
            .flat_map(|&label| {
                self.column(label).map(move |item| AcceptItem {
                    filename: item.filename.clone(),
                    label,
                })
            })
            .collect();
        AcceptRequest { items }
    }

    fn position(&self, filename: &str) -> Option<usize> {
        self.items.iter().position(|item| item.filename == filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(filename: &str, label: Label, confidence: f64) -> PendingImage {
        PendingImage {
            filename: filename.to_string(),
            url: format!("/images/entrada/{filename}"),
            prediction: Prediction::scored(label, confidence),
        }
    }

    fn sample_queue() -> ReviewQueue {
        let mut queue = ReviewQueue::new();
        queue.load(vec![
            pending("a.png", Label::Ia, 0.9),
            pending("b.png", Label::Real, 0.8),
            pending("c.png", Label::Ia, 0.7),
            PendingImage {
                filename: "d.png".to_string(),
                url: String::new(),
                prediction: Prediction::default(),
            },
        ]);
        queue
    }

    fn names(queue: &ReviewQueue, label: Label) -> Vec<String> {
        queue.column(label).map(|i| i.filename.clone()).collect()
    }

    #[test]
    fn load_partitions_by_prediction() {
        let queue = sample_queue();
        assert_eq!(names(&queue, Label::Ia), vec!["a.png", "c.png"]);
        assert_eq!(names(&queue, Label::Real), vec!["b.png", "d.png"]);
        let counts = queue.counts();
        assert_eq!((counts.ia, counts.real), (2, 2));
        assert_eq!(counts.total(), queue.len());
    }

    #[test]
    fn load_replaces_previous_contents() {
        let mut queue = sample_queue();
        queue.move_item("a.png", Label::Real);
        let summary = queue.load(vec![pending("z.png", Label::Ia, 0.5)]);
        assert_eq!(summary.loaded, 1);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.column_of("a.png"), None);
        assert_eq!(queue.column_of("z.png"), Some(Label::Ia));
    }

    #[test]
    fn duplicate_filenames_keep_first() {
        let mut queue = ReviewQueue::new();
        let summary = queue.load(vec![
            pending("a.png", Label::Ia, 0.9),
            pending("a.png", Label::Real, 0.9),
        ]);
        assert_eq!(summary, LoadSummary { loaded: 1, duplicates: 1 });
        assert_eq!(queue.column_of("a.png"), Some(Label::Ia));
    }

    #[test]
    fn every_item_in_exactly_one_column() {
        let mut queue = sample_queue();
        queue.move_item("a.png", Label::Real);
        queue.move_item("b.png", Label::Ia);
        for item in queue.items() {
            let in_ia = names(&queue, Label::Ia).contains(&item.filename);
            let in_real = names(&queue, Label::Real).contains(&item.filename);
            assert!(in_ia ^ in_real, "{} must be in exactly one column", item.filename);
        }
        assert_eq!(queue.counts().total(), 4);
    }

    #[test]
    fn drag_drop_moves_item_and_clears_payload() {
        let mut queue = sample_queue();
        assert!(queue.begin_drag("a.png"));
        assert!(queue.is_dragging("a.png"));
        let outcome = queue.drop_on(Label::Real);
        assert_eq!(
            outcome,
            DropOutcome::Moved {
                from: Label::Ia,
                to: Label::Real
            }
        );
        assert_eq!(queue.dragging(), None);
        // Appended at the end of the target column.
        assert_eq!(names(&queue, Label::Real), vec!["b.png", "d.png", "a.png"]);
        assert_eq!(queue.counts(), ColumnCounts { ia: 1, real: 3 });
    }

    #[test]
    fn drop_is_idempotent() {
        let mut queue = sample_queue();
        queue.move_item("a.png", Label::Real);
        let before: Vec<_> = queue.items().to_vec();
        assert_eq!(queue.move_item("a.png", Label::Real), DropOutcome::Unchanged);
        assert_eq!(queue.items(), before.as_slice());
    }

    #[test]
    fn drop_is_reversible() {
        let mut queue = sample_queue();
        queue.move_item("a.png", Label::Real);
        assert!(queue.get("a.png").unwrap().is_corrected());
        queue.move_item("a.png", Label::Ia);
        let item = queue.get("a.png").unwrap();
        assert_eq!(item.column, Label::Ia);
        assert!(!item.is_corrected());
        assert_eq!(queue.corrected_count(), 0);
        assert_eq!(queue.counts(), ColumnCounts { ia: 2, real: 2 });
    }

    #[test]
    fn same_column_drop_keeps_position() {
        let mut queue = sample_queue();
        queue.begin_drag("a.png");
        assert_eq!(queue.drop_on(Label::Ia), DropOutcome::Unchanged);
        assert_eq!(names(&queue, Label::Ia), vec!["a.png", "c.png"]);
        assert_eq!(queue.dragging(), None);
    }

    #[test]
    fn unknown_drag_and_drop() {
        let mut queue = sample_queue();
        assert!(!queue.begin_drag("nope.png"));
        assert_eq!(queue.drop_on(Label::Ia), DropOutcome::Unknown);
        assert_eq!(queue.move_item("nope.png", Label::Ia), DropOutcome::Unknown);
    }

    #[test]
    fn cancel_drag_moves_nothing() {
        let mut queue = sample_queue();
        queue.begin_drag("b.png");
        queue.cancel_drag();
        assert_eq!(queue.drop_on(Label::Ia), DropOutcome::Unknown);
        assert_eq!(queue.column_of("b.png"), Some(Label::Real));
    }

    #[test]
    fn accept_request_reflects_current_membership() {
        let mut queue = ReviewQueue::new();
        queue.load(vec![pending("x.png", Label::Ia, 0.95)]);
        queue.begin_drag("x.png");
        queue.drop_on(Label::Real);
        let request = queue.accept_request();
        assert_eq!(
            request.items,
            vec![AcceptItem {
                filename: "x.png".to_string(),
                label: Label::Real
            }]
        );
    }

    #[test]
    fn accept_request_orders_ia_then_real() {
        let queue = sample_queue();
        let request = queue.accept_request();
        let pairs: Vec<_> = request
            .items
            .iter()
            .map(|i| (i.filename.as_str(), i.label))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("a.png", Label::Ia),
                ("c.png", Label::Ia),
                ("b.png", Label::Real),
                ("d.png", Label::Real),
            ]
        );
    }

    #[test]
    fn empty_queue_builds_empty_request() {
        assert!(ReviewQueue::new().accept_request().is_empty());
    }

    #[test]
    fn remove_drops_item() {
        let mut queue = sample_queue();
        let removed = queue.remove("c.png").unwrap();
        assert_eq!(removed.filename, "c.png");
        assert_eq!(queue.counts(), ColumnCounts { ia: 1, real: 2 });
        assert!(queue.remove("c.png").is_none());
    }
}
