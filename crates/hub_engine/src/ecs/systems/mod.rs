//! Engine systems driven by the frame phases

pub mod collision_system;
pub mod rendering_system;

pub use collision_system::{CollisionSystem, SweepStats};
pub use rendering_system::{DrawItem, RenderSystem};
