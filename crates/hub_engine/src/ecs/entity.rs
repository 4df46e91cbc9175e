//! Entity handles and blueprints

use slotmap::new_key_type;

use super::component::{Component, ComponentMap};
use super::components::{DrawDepth, Render, Transform};
use crate::assets::TextureHandle;

new_key_type! {
    /// Entity identifier.
    ///
    /// Generational: once an entity is despawned its handle never matches
    /// a later entity, even if the slot is reused.
    pub struct Entity;

    /// Identifier of a box collider owned by an entity
    pub struct ColliderId;
}

/// Blueprint consumed by [`World::spawn`](super::World::spawn).
///
/// Transform and Render get default values when the blueprint does not
/// supply them.
#[derive(Debug, Default)]
pub struct EntityBuilder {
    pub(crate) components: ComponentMap,
    pub(crate) collider: Option<(f32, f32)>,
    pub(crate) inactive: bool,
}

impl EntityBuilder {
    /// Start an empty blueprint
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the entity at `(x, y)`
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.components.insert(Transform::new(x, y));
        self
    }

    /// Use a prepared Render component
    pub fn with_render(mut self, render: Render) -> Self {
        self.components.insert(render);
        self
    }

    /// Set the texture on the entity's Render component
    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.edit_render(|render| render.set_texture(Some(texture)));
        self
    }

    /// Set the draw depth on the entity's Render component
    pub fn with_depth(mut self, depth: DrawDepth) -> Self {
        self.edit_render(|render| render.set_draw_depth(depth));
        self
    }

    /// Attach a `width` x `height` box collider anchored at the Transform.
    ///
    /// # Panics
    /// A size that is negative or not finite is a programming error.
    pub fn with_collider(mut self, width: f32, height: f32) -> Self {
        assert!(
            width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0,
            "invalid collider size {width}x{height}"
        );
        self.collider = Some((width, height));
        self
    }

    /// Add any other component; replaces an earlier one of the same kind
    pub fn with_component<T: Component>(mut self, component: T) -> Self {
        self.components.insert(component);
        self
    }

    /// Spawn the entity inactive
    pub fn inactive(mut self) -> Self {
        self.inactive = true;
        self
    }

    fn edit_render(&mut self, edit: impl FnOnce(&mut Render)) {
        let mut render = self.components.remove::<Render>().unwrap_or_default();
        edit(&mut render);
        self.components.insert(render);
    }

    /// Fill in the default components and hand the parts to the world
    pub(crate) fn finish(mut self) -> (ComponentMap, Option<(f32, f32)>, bool) {
        if !self.components.contains::<Transform>() {
            self.components.insert(Transform::default());
        }
        if !self.components.contains::<Render>() {
            self.components.insert(Render::default());
        }
        (self.components, self.collider, !self.inactive)
    }
}
