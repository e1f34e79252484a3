//! Showcase Core Library
//!
//! Plain shape data and renderer-independent interaction logic for the
//! canvas library showcase.

pub mod animation;
pub mod color;
pub mod events;
pub mod input;
pub mod layers;
pub mod scene;
pub mod selection;
pub mod shapes;
pub mod viewport;

pub use animation::{RotationTween, Spinner, TweenProfile, ROTATION_STEP_DEGREES};
pub use color::{ColorParseError, ShapeColor};
pub use events::{AdapterEvent, ShapeRef};
pub use input::{MouseButton, PointerEvent, PressState, DRAG_THRESHOLD};
pub use layers::ReorderDirection;
pub use scene::{SceneError, SceneState};
pub use selection::{Handle, HandleKind, ManipulationState};
pub use shapes::{Shadow, ShapeDescriptor, ShapeKind, ShapePatch};
pub use viewport::Viewport;
