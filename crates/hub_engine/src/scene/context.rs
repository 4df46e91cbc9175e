//! Per-scene tracking of entities and subscriptions

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::assets::ResourceLoader;
use crate::ecs::{Entity, EntityBuilder, SharedWorld, Text};
use crate::events::{listener_addr, EventBus, Events, Listener};

/// Shared handle to the resource loader
pub type SharedResources = Rc<RefCell<dyn ResourceLoader>>;

/// Deferred scene switch.
///
/// Scenes and their listeners run while the manager is busy, so they
/// request a switch here and the manager applies it after the tick.
/// The latest request wins.
#[derive(Debug, Clone, Default)]
pub struct SceneSwitcher {
    pending: Rc<RefCell<Option<String>>>,
}

impl SceneSwitcher {
    /// Create a switcher with nothing pending
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for `name` to become the active scene
    pub fn request(&self, name: impl Into<String>) {
        let name = name.into();
        log::debug!("Scene switch requested: {}", name);
        *self.pending.borrow_mut() = Some(name);
    }

    /// Pending request, if any
    pub fn pending(&self) -> Option<String> {
        self.pending.borrow().clone()
    }

    /// Remove and return the pending request
    pub fn take(&self) -> Option<String> {
        self.pending.borrow_mut().take()
    }
}

struct Subscription {
    channel: *const (),
    listener: *const (),
    detach: Box<dyn Fn() -> bool>,
}

/// A scene's gateway to the engine.
///
/// Entities and listeners created through the context are tracked so the
/// manager can remove all of them when the scene unloads.
pub struct SceneContext {
    world: SharedWorld,
    events: Events,
    resources: SharedResources,
    switcher: SceneSwitcher,
    entities: Vec<Entity>,
    subscriptions: Vec<Subscription>,
}

impl fmt::Debug for SceneContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneContext")
            .field("entities", &self.entities)
            .field("subscriptions", &self.subscriptions.len())
            .finish_non_exhaustive()
    }
}

impl SceneContext {
    /// Create an empty context over the shared engine state
    pub fn new(
        world: SharedWorld,
        events: Events,
        resources: SharedResources,
        switcher: SceneSwitcher,
    ) -> Self {
        Self {
            world,
            events,
            resources,
            switcher,
            entities: Vec::new(),
            subscriptions: Vec::new(),
        }
    }

    /// Spawn an entity into the world and track it
    pub fn create_entity(&mut self, builder: EntityBuilder) -> Entity {
        let entity = self.world.borrow_mut().spawn(builder);
        self.entities.push(entity);
        entity
    }

    /// Spawn a text entity. The text is rasterised into its texture.
    pub fn create_text(&mut self, builder: EntityBuilder, text: Text) -> Entity {
        let texture = self
            .resources
            .borrow_mut()
            .render_text(text.font, &text.content, text.color);
        self.create_entity(builder.with_texture(texture).with_component(text))
    }

    /// Edit an entity's [`Text`] and re-rasterise it if the edit changed anything.
    ///
    /// Returns false, with a warning, if the entity has no Text component.
    pub fn update_text(&mut self, entity: Entity, edit: impl FnOnce(&mut Text)) -> bool {
        let text = {
            let mut world = self.world.borrow_mut();
            let Some(text) = world.component_mut::<Text>(entity) else {
                log::warn!("Entity {:?} does not have a Text component", entity);
                return false;
            };
            let before = text.clone();
            edit(text);
            if *text == before {
                return true;
            }
            text.clone()
        };
        let texture = self
            .resources
            .borrow_mut()
            .render_text(text.font, &text.content, text.color);
        self.world.borrow_mut().set_texture(entity, Some(texture))
    }

    /// Track an entity that was spawned elsewhere.
    ///
    /// Returns false, with a warning, if it is already tracked or not in the world.
    pub fn track_entity(&mut self, entity: Entity) -> bool {
        if !self.world.borrow().contains(entity) {
            log::warn!("Cannot track {:?}: entity is not in the world", entity);
            return false;
        }
        if self.entities.contains(&entity) {
            log::warn!("Entity {:?} is already tracked by this scene", entity);
            return false;
        }
        self.entities.push(entity);
        true
    }

    /// Stop tracking `entity` and remove it from the world.
    ///
    /// Destroying twice warns and returns false.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        match self.entities.iter().position(|&e| e == entity) {
            Some(index) => {
                self.entities.remove(index);
            }
            None => log::warn!("Entity {:?} is not tracked by this scene", entity),
        }
        self.world.borrow_mut().despawn(entity)
    }

    /// Remove every tracked entity from the world. Returns how many were removed.
    pub fn destroy_all_entities(&mut self) -> usize {
        let entities = std::mem::take(&mut self.entities);
        let mut world = self.world.borrow_mut();
        entities
            .into_iter()
            .filter(|&entity| world.despawn(entity))
            .count()
    }

    /// Subscribe `listener` to `bus` and track the pair
    pub fn subscribe<A: 'static>(&mut self, bus: &EventBus<A>, listener: Listener<A>) {
        bus.subscribe(Rc::clone(&listener));
        let channel = bus.channel_addr();
        let addr = listener_addr(&listener);
        let bus = bus.clone();
        self.subscriptions.push(Subscription {
            channel,
            listener: addr,
            detach: Box::new(move || bus.unsubscribe(&listener)),
        });
    }

    /// Unsubscribe `listener` from `bus` and drop one matching tracking record
    pub fn unsubscribe<A: 'static>(&mut self, bus: &EventBus<A>, listener: &Listener<A>) -> bool {
        let channel = bus.channel_addr();
        let addr = listener_addr(listener);
        if let Some(index) = self
            .subscriptions
            .iter()
            .position(|s| std::ptr::eq(s.channel, channel) && std::ptr::eq(s.listener, addr))
        {
            self.subscriptions.remove(index);
        }
        bus.unsubscribe(listener)
    }

    /// Reverse every tracked subscription, across all buses.
    ///
    /// Returns how many listeners were still attached.
    pub fn unsubscribe_all(&mut self) -> usize {
        let subscriptions = std::mem::take(&mut self.subscriptions);
        subscriptions.iter().filter(|s| (s.detach)()).count()
    }

    /// Entities tracked by this scene, oldest first
    pub fn tracked_entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Number of tracked subscriptions
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// The shared world
    pub fn world(&self) -> &SharedWorld {
        &self.world
    }

    /// The engine's event hub
    pub fn events(&self) -> &Events {
        &self.events
    }

    /// The resource loader
    pub fn resources(&self) -> &SharedResources {
        &self.resources
    }

    /// Handle for deferred scene switches, cloneable into listeners
    pub fn switcher(&self) -> &SceneSwitcher {
        &self.switcher
    }

    /// Request a switch to `name` after the current tick
    pub fn request_scene(&self, name: impl Into<String>) {
        self.switcher.request(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCache;
    use crate::ecs::{Render, World};
    use crate::events::{listener, Tick};
    use crate::render::Color;
    use std::cell::Cell;

    fn context() -> SceneContext {
        let resources: SharedResources = Rc::new(RefCell::new(AssetCache::new("assets")));
        SceneContext::new(World::shared(), Events::new(), resources, SceneSwitcher::new())
    }

    #[test]
    fn test_create_and_destroy_entity() {
        let mut ctx = context();
        let entity = ctx.create_entity(EntityBuilder::new().with_collider(4.0, 4.0));
        assert_eq!(ctx.tracked_entities(), [entity]);
        assert_eq!(ctx.world().borrow().collision().len(), 1);

        assert!(ctx.destroy_entity(entity));
        assert!(ctx.tracked_entities().is_empty());
        assert!(!ctx.world().borrow().contains(entity));
        assert!(ctx.world().borrow().collision().is_empty());

        assert!(!ctx.destroy_entity(entity));
    }

    #[test]
    fn test_track_entity_rejects_duplicates_and_strangers() {
        let mut ctx = context();
        let entity = ctx.world().borrow_mut().spawn(EntityBuilder::new());
        assert!(ctx.track_entity(entity));
        assert!(!ctx.track_entity(entity));
        assert_eq!(ctx.tracked_entities().len(), 1);

        let stranger = ctx.world().borrow_mut().spawn(EntityBuilder::new());
        ctx.world().borrow_mut().despawn(stranger);
        assert!(!ctx.track_entity(stranger));
    }

    #[test]
    fn test_destroy_all_entities_leaves_untracked() {
        let mut ctx = context();
        let outsider = ctx.world().borrow_mut().spawn(EntityBuilder::new());
        ctx.create_entity(EntityBuilder::new());
        ctx.create_entity(EntityBuilder::new());

        assert_eq!(ctx.destroy_all_entities(), 2);
        assert_eq!(ctx.world().borrow().entities(), [outsider]);
    }

    #[test]
    fn test_unsubscribe_all_spans_buses() {
        let mut ctx = context();
        let hits = Rc::new(Cell::new(0));
        let on_tick = {
            let hits = Rc::clone(&hits);
            listener(move |_: &Tick| hits.set(hits.get() + 1))
        };
        let on_quit = {
            let hits = Rc::clone(&hits);
            listener(move |_: &()| hits.set(hits.get() + 1))
        };
        let events = ctx.events().clone();
        ctx.subscribe(&events.tick, on_tick);
        ctx.subscribe(&events.quit, Rc::clone(&on_quit));
        ctx.subscribe(&events.quit, on_quit);
        assert_eq!(ctx.subscription_count(), 3);

        assert_eq!(ctx.unsubscribe_all(), 3);
        assert_eq!(ctx.subscription_count(), 0);
        events.tick.emit(&Tick { dt: 0.016 });
        events.quit.emit(&());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_unsubscribe_drops_tracking_record() {
        let mut ctx = context();
        let events = ctx.events().clone();
        let noop = listener(|_: &()| {});
        ctx.subscribe(&events.pre_tick, Rc::clone(&noop));

        assert!(ctx.unsubscribe(&events.pre_tick, &noop));
        assert_eq!(ctx.subscription_count(), 0);
        assert!(!ctx.unsubscribe(&events.pre_tick, &noop));
        assert_eq!(ctx.unsubscribe_all(), 0);
    }

    #[test]
    fn test_text_entity_is_rasterised_and_refreshed() {
        let mut ctx = context();
        let font = ctx.resources().borrow_mut().get_font(None, 10);
        let entity = ctx.create_text(
            EntityBuilder::new().at(5.0, 5.0),
            Text::new("Menu", font, Color::WHITE),
        );
        let first = ctx.world().borrow().component::<Render>(entity).and_then(|r| r.texture);
        let size = first.and_then(|t| ctx.resources().borrow().texture_size(t));
        assert_eq!(size, Some((24, 10)));

        assert!(ctx.update_text(entity, |text| text.content = "Main Menu".to_string()));
        let second = ctx.world().borrow().component::<Render>(entity).and_then(|r| r.texture);
        assert_ne!(first, second);
        let size = second.and_then(|t| ctx.resources().borrow().texture_size(t));
        assert_eq!(size, Some((54, 10)));

        let plain = ctx.create_entity(EntityBuilder::new());
        assert!(!ctx.update_text(plain, |text| text.color = Color::RED));
    }

    #[test]
    fn test_update_text_skips_unchanged_text() {
        let cache = Rc::new(RefCell::new(AssetCache::new("assets")));
        let resources: SharedResources = cache.clone();
        let mut ctx =
            SceneContext::new(World::shared(), Events::new(), resources, SceneSwitcher::new());
        let font = cache.borrow_mut().get_font(None, 10);
        let entity = ctx.create_text(EntityBuilder::new(), Text::new("Snake", font, Color::WHITE));
        let texture = ctx.world().borrow().component::<Render>(entity).and_then(|r| r.texture);
        let issued = cache.borrow().texture_count();

        for _ in 0..50 {
            assert!(ctx.update_text(entity, |text| text.color = Color::WHITE));
        }
        assert_eq!(cache.borrow().texture_count(), issued);

        // Toggling a highlight back and forth reuses the two rendered textures
        for _ in 0..50 {
            assert!(ctx.update_text(entity, |text| text.color = Color::RED));
            assert!(ctx.update_text(entity, |text| text.color = Color::WHITE));
        }
        assert_eq!(cache.borrow().texture_count(), issued + 1);
        let current = ctx.world().borrow().component::<Render>(entity).and_then(|r| r.texture);
        assert_eq!(current, texture);
    }

    #[test]
    fn test_text_without_font_uses_fallback() {
        let mut ctx = context();
        let entity = ctx.create_text(EntityBuilder::new(), Text::new("?", None, Color::WHITE));
        let texture = ctx.world().borrow().component::<Render>(entity).and_then(|r| r.texture);
        let size = texture.and_then(|t| ctx.resources().borrow().texture_size(t));
        assert_eq!(size, Some((50, 20)));
    }

    #[test]
    fn test_switcher_latest_request_wins() {
        let ctx = context();
        let listener_side = ctx.switcher().clone();
        ctx.request_scene("snake");
        listener_side.request("credits");
        assert_eq!(ctx.switcher().take().as_deref(), Some("credits"));
        assert_eq!(ctx.switcher().pending(), None);
    }
}
