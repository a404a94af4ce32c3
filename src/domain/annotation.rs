use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::Serialize;

use super::viewport::{Point3, ViewportCorners};

/// Descriptive metadata the host keeps alongside an annotation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationMetadata {
    pub tool_name: String,
    pub view_plane_normal: Point3,
    pub view_up: Point3,
    pub frame_of_reference_uid: Option<String>,
    /// Always `None`: the overlay belongs to the viewport, not to an image
    pub referenced_image_id: Option<String>,
}

/// Cached scale-overlay record for one viewport
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationState {
    pub annotation_uid: String,
    pub viewport_id: String,
    pub metadata: AnnotationMetadata,
    /// World corners captured at the last enable or camera change
    pub corners: ViewportCorners,
}

/// Keyed store of overlay records, one per enabled viewport
///
/// Writes are unconditional: the most recent trigger for a viewport wins.
#[derive(Debug, Default)]
pub struct AnnotationStore {
    records: HashMap<String, AnnotationState>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `state.viewport_id`, returning the previous one
    pub fn insert(&mut self, state: AnnotationState) -> Option<AnnotationState> {
        self.records.insert(state.viewport_id.clone(), state)
    }

    /// Insert or replace the record and hand back a reference to the stored value
    pub fn upsert(&mut self, state: AnnotationState) -> &AnnotationState {
        match self.records.entry(state.viewport_id.clone()) {
            Entry::Occupied(mut entry) => {
                entry.insert(state);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(state),
        }
    }

    pub fn get(&self, viewport_id: &str) -> Option<&AnnotationState> {
        self.records.get(viewport_id)
    }

    pub fn remove(&mut self, viewport_id: &str) -> Option<AnnotationState> {
        self.records.remove(viewport_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnnotationState> {
        self.records.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(viewport_id: &str, width: f64) -> AnnotationState {
        AnnotationState {
            annotation_uid: format!("scaleoverlay-{viewport_id}"),
            viewport_id: viewport_id.to_string(),
            metadata: AnnotationMetadata {
                tool_name: "ScaleOverlay".to_string(),
                view_plane_normal: [0.0, 0.0, 1.0],
                view_up: [0.0, -1.0, 0.0],
                frame_of_reference_uid: None,
                referenced_image_id: None,
            },
            corners: ViewportCorners::axis_aligned(width, width, 0.0),
        }
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = AnnotationStore::new();
        assert!(store.insert(record("a", 100.0)).is_none());
        let previous = store.insert(record("a", 200.0)).unwrap();

        assert_eq!(previous.corners.extent().unwrap().world_width, 100.0);
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("a").unwrap().corners.extent().unwrap().world_width,
            200.0
        );
    }

    #[test]
    fn test_viewports_are_independent() {
        let mut store = AnnotationStore::new();
        store.insert(record("a", 100.0));
        store.insert(record("b", 300.0));
        assert_eq!(store.len(), 2);

        let stored = store.upsert(record("b", 400.0));
        assert_eq!(stored.corners.extent().unwrap().world_width, 400.0);
        assert_eq!(store.len(), 2);

        store.remove("a");
        assert!(store.get("a").is_none());
        assert!(store.get("b").is_some());
        assert_eq!(store.iter().count(), 1);
    }
}
