//! Scene lifecycle
//!
//! A scene owns the entities and subscriptions it creates through its
//! [`SceneContext`]. The [`SceneManager`] keeps exactly one scene active and
//! tears the outgoing scene down before loading the next one.
//!
//! Teardown is done by the framework, not the scene:
//!
//! ```text
//! set_active("b")
//!   a: unsubscribe_all → destroy_all_entities → on_unload
//!   b: on_load
//! ```

mod context;
mod scene_manager;

pub use context::{SceneContext, SceneSwitcher, SharedResources};
pub use scene_manager::{SceneManager, SceneState, SharedScenes};

use crate::render::Surface;

/// A screen of the application
pub trait Scene {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Build entities and subscribe listeners through `ctx`
    fn on_load(&mut self, ctx: &mut SceneContext);

    /// Release scene-held state.
    ///
    /// Tracked listeners and entities are already gone when this runs.
    fn on_unload(&mut self, _ctx: &mut SceneContext) {}

    /// Per-tick update while active
    fn update(&mut self, _ctx: &mut SceneContext, _dt: f32) {}

    /// Direct drawing after the frame's entities have been rendered
    fn draw_overlay(&mut self, _surface: &mut dyn Surface) {}
}
