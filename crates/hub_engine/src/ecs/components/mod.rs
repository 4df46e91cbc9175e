//! ECS Components module
//!
//! Plain data records attached to entities, one instance per kind.

pub mod transform;
pub mod renderable;
pub mod collision;
pub mod ui;

pub use transform::Transform;
pub use renderable::{DrawDepth, Render};
pub use collision::{BoxCollider, Rect};
pub use ui::{Clickable, Text};
