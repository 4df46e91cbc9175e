//! ECS World implementation
//!
//! The world owns every entity record, the live entity list (insertion
//! ordered) and the collider registry. It is an explicit context object:
//! systems receive it by reference, and tests can build as many isolated
//! worlds as they like.
//!
//! Collider registration invariant: a collider is registered with the
//! [`CollisionSystem`] exactly when its entity is active and still owns it.
//! Every method below preserves this.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::SlotMap;

use super::component::{Component, ComponentMap};
use super::components::{BoxCollider, Clickable, Rect, Render, Transform};
use super::entity::{ColliderId, Entity, EntityBuilder};
use super::systems::CollisionSystem;
use super::DrawDepth;
use crate::assets::TextureHandle;

/// World shared between the engine, its systems and scenes
pub type SharedWorld = Rc<RefCell<World>>;

#[derive(Debug)]
struct EntityRecord {
    components: ComponentMap,
    active: bool,
    collider: Option<ColliderId>,
}

/// ECS World containing all entities and components
#[derive(Debug, Default)]
pub struct World {
    records: SlotMap<Entity, EntityRecord>,
    live: Vec<Entity>,
    colliders: SlotMap<ColliderId, BoxCollider>,
    collision: CollisionSystem,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new world behind a shared handle
    pub fn shared() -> SharedWorld {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Build an entity from `builder` and append it to the live list
    pub fn spawn(&mut self, builder: EntityBuilder) -> Entity {
        let (components, collider, active) = builder.finish();
        let entity = self.records.insert(EntityRecord {
            components,
            active,
            collider: None,
        });
        self.live.push(entity);

        if let Some((width, height)) = collider {
            self.set_collider(entity, Some((width, height)));
        }

        log::trace!("Spawned {:?} (active: {})", entity, active);
        entity
    }

    /// Deactivate `entity`, then remove it from the live list and drop it.
    ///
    /// Returns false, with a warning, when the entity is already gone.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.records.contains_key(entity) {
            log::warn!("Entity {:?} was already removed from the world or never added", entity);
            return false;
        }

        // Unregisters the collider while the entity is still known
        self.set_active(entity, false);

        match self.live.iter().position(|&e| e == entity) {
            Some(index) => {
                self.live.remove(index);
            }
            None => log::warn!("Entity {:?} missing from the live list during despawn", entity),
        }

        if let Some(record) = self.records.remove(entity) {
            if let Some(collider) = record.collider {
                self.colliders.remove(collider);
            }
        }
        true
    }

    /// Whether `entity` is still in the world
    pub fn contains(&self, entity: Entity) -> bool {
        self.records.contains_key(entity)
    }

    /// Whether `entity` exists and is active
    pub fn is_active(&self, entity: Entity) -> bool {
        self.records.get(entity).is_some_and(|r| r.active)
    }

    /// Change the active flag, registering or unregistering the collider.
    ///
    /// Returns false if the entity does not exist.
    pub fn set_active(&mut self, entity: Entity, active: bool) -> bool {
        let Some(record) = self.records.get_mut(entity) else {
            log::warn!("Cannot set active state of unknown entity {:?}", entity);
            return false;
        };

        let changed = record.active != active;
        record.active = active;

        if changed {
            if let Some(collider) = record.collider {
                if active {
                    self.collision.register(collider);
                } else {
                    self.collision.unregister(collider);
                }
            }
        }
        true
    }

    /// Replace the entity's collider. `None` removes it.
    ///
    /// The previous collider is unregistered before the new one is
    /// registered, and only active entities get registered.
    pub fn set_collider(&mut self, entity: Entity, size: Option<(f32, f32)>) -> Option<ColliderId> {
        let Some(record) = self.records.get_mut(entity) else {
            log::warn!("Cannot set collider on unknown entity {:?}", entity);
            return None;
        };

        if let Some(old) = record.collider.take() {
            self.collision.unregister(old);
            self.colliders.remove(old);
        }

        let new = size.map(|(width, height)| {
            self.colliders.insert(BoxCollider::new(entity, width, height))
        });
        record.collider = new;

        if let Some(collider) = new {
            if record.active {
                self.collision.register(collider);
            }
        }
        new
    }

    /// The collider owned by `entity`
    pub fn collider_of(&self, entity: Entity) -> Option<ColliderId> {
        self.records.get(entity).and_then(|r| r.collider)
    }

    /// Look up collider data
    pub fn collider(&self, id: ColliderId) -> Option<&BoxCollider> {
        self.colliders.get(id)
    }

    /// World-space box of a collider, if its parent has a Transform
    pub fn collider_bounds(&self, id: ColliderId) -> Option<Rect> {
        let collider = self.colliders.get(id)?;
        let transform = self.component::<Transform>(collider.parent)?;
        Some(collider.bounds(transform))
    }

    /// Intersection test between two colliders.
    ///
    /// A side whose parent lacks a Transform never intersects anything.
    pub fn colliders_intersect(&self, a: ColliderId, b: ColliderId) -> bool {
        match (self.collider_bounds(a), self.collider_bounds(b)) {
            (Some(a), Some(b)) => a.intersects(&b),
            _ => false,
        }
    }

    /// Entities eligible for this frame's sweep, in live-list order
    pub fn collision_candidates(&self) -> Vec<(Entity, ColliderId)> {
        self.live
            .iter()
            .filter_map(|&entity| {
                let record = self.records.get(entity)?;
                let collider = record.collider?;
                let eligible = record.active
                    && self.collision.is_registered(collider)
                    && record.components.contains::<Transform>();
                eligible.then_some((entity, collider))
            })
            .collect()
    }

    /// The collider registry
    pub fn collision(&self) -> &CollisionSystem {
        &self.collision
    }

    /// Borrow a component of `entity`
    pub fn component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.records.get(entity)?.components.get::<T>()
    }

    /// Mutably borrow a component of `entity`
    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.records.get_mut(entity)?.components.get_mut::<T>()
    }

    /// Whether `entity` has a component of kind `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.records
            .get(entity)
            .is_some_and(|r| r.components.contains::<T>())
    }

    /// Insert a component, replacing any of the same kind
    pub fn insert_component<T: Component>(&mut self, entity: Entity, component: T) -> Option<T> {
        match self.records.get_mut(entity) {
            Some(record) => record.components.insert(component),
            None => {
                log::warn!("Cannot add component to unknown entity {:?}", entity);
                None
            }
        }
    }

    /// Remove a component from `entity`
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.records.get_mut(entity)?.components.remove::<T>()
    }

    /// All components of `entity`
    pub fn components(&self, entity: Entity) -> Option<&ComponentMap> {
        self.records.get(entity).map(|r| &r.components)
    }

    /// Set the texture on the entity's Render component
    pub fn set_texture(&mut self, entity: Entity, texture: Option<TextureHandle>) -> bool {
        self.with_render(entity, |render| render.set_texture(texture))
    }

    /// Set visibility on the entity's Render component
    pub fn set_visible(&mut self, entity: Entity, visible: bool) -> bool {
        self.with_render(entity, |render| render.set_visible(visible))
    }

    /// Set the draw depth on the entity's Render component
    pub fn set_draw_depth(&mut self, entity: Entity, depth: DrawDepth) -> bool {
        self.with_render(entity, |render| render.set_draw_depth(depth))
    }

    /// Move the entity; false if it has no Transform
    pub fn set_position(&mut self, entity: Entity, x: f32, y: f32) -> bool {
        match self.component_mut::<Transform>(entity) {
            Some(transform) => {
                transform.set_position(x, y);
                true
            }
            None => {
                log::warn!("Entity {:?} does not have a Transform component", entity);
                false
            }
        }
    }

    fn with_render(&mut self, entity: Entity, edit: impl FnOnce(&mut Render)) -> bool {
        match self.component_mut::<Render>(entity) {
            Some(render) => {
                edit(render);
                true
            }
            None => {
                log::warn!("Entity {:?} does not have a Render component", entity);
                false
            }
        }
    }

    /// Topmost active, enabled click target under `(x, y)`.
    ///
    /// Higher draw depth wins; within a depth the later entity wins.
    pub fn click_at(&self, x: f32, y: f32) -> Option<Entity> {
        let mut best: Option<(DrawDepth, usize, Entity)> = None;
        for (order, &entity) in self.live.iter().enumerate() {
            if !self.is_active(entity) {
                continue;
            }
            let enabled = self
                .component::<Clickable>(entity)
                .is_some_and(|c| c.enabled);
            if !enabled {
                continue;
            }
            let hit = self
                .collider_of(entity)
                .and_then(|c| self.collider_bounds(c))
                .is_some_and(|bounds| bounds.contains_point(x, y));
            if !hit {
                continue;
            }
            let depth = self
                .component::<Render>(entity)
                .map_or(DrawDepth::Default, |r| r.draw_depth);
            if best.map_or(true, |(d, o, _)| (depth, order) > (d, o)) {
                best = Some((depth, order, entity));
            }
        }
        best.map(|(_, _, entity)| entity)
    }

    /// Live entities in insertion order
    pub fn entities(&self) -> &[Entity] {
        &self.live
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether the world has no live entities
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
