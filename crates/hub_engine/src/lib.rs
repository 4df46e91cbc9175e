//! # Hub Engine
//!
//! A small entity-component engine for 2D minigame hubs.
//!
//! ## Features
//!
//! - **Entities**: generational handles over a type-keyed component map
//! - **Events**: synchronous typed channels with snapshot delivery
//! - **Collisions**: axis-aligned box overlap, reported every frame
//! - **Scenes**: tracked entities and listeners, torn down on switch
//! - **Headless**: recording surface and scripted input for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hub_engine::prelude::*;
//!
//! struct Title;
//!
//! impl Scene for Title {
//!     fn name(&self) -> &str {
//!         "title"
//!     }
//!
//!     fn on_load(&mut self, ctx: &mut SceneContext) {
//!         ctx.create_entity(EntityBuilder::new().at(10.0, 10.0).with_collider(32.0, 32.0));
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = Engine::headless(EngineConfig::default().with_max_frames(60))?;
//!     engine.scenes().borrow_mut().register("title", Box::new(Title));
//!     engine.scenes().borrow_mut().set_active("title");
//!     engine.start()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod foundation;
pub mod config;
pub mod events;
pub mod ecs;
pub mod assets;
pub mod render;
pub mod input;
pub mod achievements;
pub mod scene;

mod engine;

pub use config::EngineConfig;
pub use engine::{Engine, EngineError};

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Engine, EngineConfig, EngineError,
        config::Config,
        foundation::time::Timer,
        events::{listener, CollisionEvent, EventBus, Events, KeyEvent, Listener, MouseButtonEvent, Tick},
        ecs::{
            BoxCollider, Clickable, DrawDepth, Entity, EntityBuilder, Render, SharedWorld, Text,
            Transform, World,
        },
        assets::{AssetCache, FontHandle, ResourceLoader, SoundHandle, TextureHandle},
        render::{Color, HeadlessSurface, SharedSurface, Surface},
        input::{InputEvent, KeyCode, MouseButton, ScriptedInput, SharedInput},
        achievements::{AchievementBackend, AchievementRelay},
        scene::{Scene, SceneContext, SceneManager, SceneSwitcher, SharedResources},
    };
}
