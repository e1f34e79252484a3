//! Scripted interaction replay.
//!
//! A script names a library page and lists user actions to perform on it:
//!
//! ```json
//! {
//!   "library": "fabric",
//!   "actions": [
//!     { "action": "pointer", "example": "layers", "event": { "down": { "position": { "x": 100, "y": 90 } } } },
//!     { "action": "pointer", "example": "layers", "event": { "up": { "position": { "x": 100, "y": 90 } } } },
//!     { "action": "reorder", "direction": "front" },
//!     { "action": "export", "kind": "print" }
//!   ]
//! }
//! ```

use crate::download::{Download, ExportKind};
use crate::library::{ExampleKind, LibraryProfile};
use crate::page::Page;
use serde::{Deserialize, Serialize};
use showcase_core::input::PointerEvent;
use showcase_core::layers::ReorderDirection;
use showcase_render::CanvasAdapter;
use std::time::Duration;

/// A replay script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub library: LibraryProfile,
    #[serde(default)]
    pub actions: Vec<ReplayAction>,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReplayAction {
    /// Pointer input on one canvas, in display coordinates.
    Pointer { example: ExampleKind, event: PointerEvent },
    /// Typing into a text field of the text example.
    Text { field: String, value: String },
    /// A layer button of the layers example.
    Reorder { direction: ReorderDirection },
    /// An export button.
    Export { kind: ExportKind },
    /// Time passing.
    Tick { ms: u64 },
    /// The container changing width.
    Resize { width: f64 },
}

/// Apply `actions` to `page`, returning the downloads the export buttons produced.
/// Actions aimed at examples the page does not show are skipped.
pub fn run_actions<A: CanvasAdapter>(page: &mut Page<A>, actions: &[ReplayAction]) -> Vec<Download> {
    let mut downloads = Vec::new();
    for (index, action) in actions.iter().enumerate() {
        match action {
            ReplayAction::Pointer { example, event } => match page.controller_mut(*example) {
                Some(controller) => controller.handle_pointer(event),
                None => log::warn!("Action {index}: {example} is not mounted"),
            },
            ReplayAction::Text { field, value } => {
                let accepted = page
                    .controller_mut(ExampleKind::Text)
                    .is_some_and(|c| c.set_text_field(field, value));
                if !accepted {
                    log::warn!("Action {index}: text field {field} is not editable");
                }
            }
            ReplayAction::Reorder { direction } => {
                let moved = page
                    .controller_mut(ExampleKind::Layers)
                    .is_some_and(|c| c.reorder(*direction));
                log::debug!("Action {index}: reorder {direction} moved={moved}");
            }
            ReplayAction::Export { kind } => match page.export(*kind) {
                Some(download) => downloads.push(download),
                None => log::warn!("Action {index}: export {kind} unavailable"),
            },
            ReplayAction::Tick { ms } => page.tick(Duration::from_millis(*ms)),
            ReplayAction::Resize { width } => {
                page.resize(*width);
            }
        }
    }
    downloads
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = ReplayScript::from_json(
            r#"{
                "library": "paper",
                "actions": [
                    { "action": "pointer", "example": "rotation", "event": { "down": { "position": { "x": 300, "y": 150 } } } },
                    { "action": "pointer", "example": "rotation", "event": "leave" },
                    { "action": "text", "field": "first", "value": "hi" },
                    { "action": "tick", "ms": 16 },
                    { "action": "resize", "width": 400 },
                    { "action": "export", "kind": "preview" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(script.library, LibraryProfile::Paper);
        assert_eq!(script.actions.len(), 6);
        assert_eq!(
            script.actions[0],
            ReplayAction::Pointer {
                example: ExampleKind::Rotation,
                event: PointerEvent::down(300.0, 150.0),
            }
        );
        assert_eq!(script.actions[5], ReplayAction::Export { kind: ExportKind::Preview });
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!(ReplayScript::from_json(r#"{ "library": "konva", "actions": [{ "action": "zoom" }] }"#).is_err());
    }
}
