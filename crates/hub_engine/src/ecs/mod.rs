//! Entity-Component implementation
//!
//! Entities are generational handles into a [`World`]. Each entity owns a
//! map from component kind to component instance, an active flag and at
//! most one box collider.

pub mod world;
pub mod entity;
pub mod component;
pub mod components;
pub mod systems;

pub use world::{SharedWorld, World};
pub use entity::{ColliderId, Entity, EntityBuilder};
pub use component::{Component, ComponentKind, ComponentMap};
pub use components::{BoxCollider, Clickable, DrawDepth, Rect, Render, Text, Transform};
pub use systems::{CollisionSystem, DrawItem, RenderSystem, SweepStats};
