//! Authoritative per-example scene state.

use crate::layers::{self, ReorderDirection};
use crate::shapes::{ShapeDescriptor, ShapePatch};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Scene construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("Duplicate shape id: {0}")]
    DuplicateId(String),
}

/// Shapes in paint order plus the UI state that refers to them.
///
/// `selected_id`, when set, always names a shape in `shapes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    /// Shapes back to front.
    shapes: Vec<ShapeDescriptor>,
    selected_id: Option<String>,
    /// Free-text inputs keyed by field name.
    pub live_text_fields: BTreeMap<String, String>,
}

impl SceneState {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from seed shapes, ordering them by `z_order`.
    /// Equal ranks keep their seed order.
    pub fn from_shapes(shapes: impl IntoIterator<Item = ShapeDescriptor>) -> Result<Self, SceneError> {
        let mut scene = Self::new();
        for shape in shapes {
            scene.insert(shape)?;
        }
        Ok(scene)
    }

    /// Insert a shape at the position its `z_order` dictates.
    pub fn insert(&mut self, shape: ShapeDescriptor) -> Result<usize, SceneError> {
        if self.contains(&shape.id) {
            return Err(SceneError::DuplicateId(shape.id));
        }
        let index = layers::insertion_index(&self.shapes, shape.z_order, |s| s.z_order);
        self.shapes.insert(index, shape);
        Ok(index)
    }

    pub fn shapes(&self) -> &[ShapeDescriptor] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&ShapeDescriptor> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ShapeDescriptor> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    /// Apply a partial update to one shape. Returns true if it changed.
    pub fn update(&mut self, id: &str, patch: &ShapePatch) -> bool {
        self.get_mut(id).is_some_and(|shape| shape.apply(patch))
    }

    /// Shape ids back to front.
    pub fn paint_order(&self) -> Vec<&str> {
        self.shapes.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected(&self) -> Option<&ShapeDescriptor> {
        self.selected_id.as_deref().and_then(|id| self.get(id))
    }

    /// Select a shape. Unknown ids leave the selection unchanged and return false.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.selected_id = Some(id.to_string());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }

    /// Reorder a shape and renumber `z_order` to match the new paint order.
    /// Returns false if the shape is unknown or already at the boundary.
    pub fn reorder(&mut self, id: &str, direction: ReorderDirection) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if layers::reorder(&mut self.shapes, index, direction).is_none() {
            return false;
        }
        self.renumber();
        true
    }

    /// Remove a shape, clearing the selection if it pointed at it.
    pub fn remove(&mut self, id: &str) -> Option<ShapeDescriptor> {
        let index = self.index_of(id)?;
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        Some(self.shapes.remove(index))
    }

    fn renumber(&mut self) {
        for (rank, shape) in self.shapes.iter_mut().enumerate() {
            shape.z_order = rank as i32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn trio() -> SceneState {
        SceneState::from_shapes([
            ShapeDescriptor::star("s1", Point::new(400.0, 90.0), 5, 20.0, 40.0).with_z_order(2),
            ShapeDescriptor::rect("r1", Point::new(50.0, 50.0), 100.0, 80.0).with_z_order(0),
            ShapeDescriptor::circle("c1", Point::new(250.0, 90.0), 40.0).with_z_order(1),
        ])
        .unwrap()
    }

    #[test]
    fn test_seed_sorted_by_z_order() {
        assert_eq!(trio().paint_order(), ["r1", "c1", "s1"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut scene = trio();
        let dup = ShapeDescriptor::circle("c1", Point::ZERO, 1.0);
        assert_eq!(scene.insert(dup), Err(SceneError::DuplicateId("c1".to_string())));
    }

    #[test]
    fn test_reorder_front_renumbers() {
        let mut scene = trio();
        assert!(scene.reorder("r1", ReorderDirection::Front));
        assert_eq!(scene.paint_order(), ["c1", "s1", "r1"]);
        let ranks: Vec<i32> = scene.shapes().iter().map(|s| s.z_order).collect();
        assert_eq!(ranks, [0, 1, 2]);
        // Idempotent at the boundary
        assert!(!scene.reorder("r1", ReorderDirection::Front));
        assert_eq!(scene.paint_order(), ["c1", "s1", "r1"]);
    }

    #[test]
    fn test_reorder_up() {
        let mut scene = trio();
        assert!(scene.reorder("r1", ReorderDirection::Up));
        assert_eq!(scene.paint_order(), ["c1", "r1", "s1"]);
    }

    #[test]
    fn test_selection_references_existing_shape() {
        let mut scene = trio();
        assert!(!scene.select("missing"));
        assert_eq!(scene.selected_id(), None);
        assert!(scene.select("c1"));
        assert_eq!(scene.selected().map(|s| s.id.as_str()), Some("c1"));
        scene.remove("c1");
        assert_eq!(scene.selected_id(), None);
    }

    #[test]
    fn test_update_position() {
        let mut scene = trio();
        assert!(scene.update("c1", &ShapePatch::position(Point::new(1.0, 2.0))));
        assert_eq!(scene.get("c1").unwrap().position, Point::new(1.0, 2.0));
        assert!(!scene.update("missing", &ShapePatch::position(Point::ZERO)));
    }
}
