//! Named scene registry with a single active slot

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::context::{SceneContext, SceneSwitcher, SharedResources};
use super::Scene;
use crate::ecs::SharedWorld;
use crate::events::{listener, Events, Listener, Tick};
use crate::render::Surface;

/// Shared handle to the scene manager
pub type SharedScenes = Rc<RefCell<SceneManager>>;

/// Lifecycle state of a registered scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    /// Registered, not loaded
    Unloaded,
    /// Loaded and receiving updates
    Active,
}

struct SceneEntry {
    scene: Box<dyn Scene>,
    ctx: SceneContext,
    state: SceneState,
}

impl SceneEntry {
    fn load(&mut self) {
        log::info!("Loading scene: {}", self.scene.name());
        self.state = SceneState::Active;
        self.scene.on_load(&mut self.ctx);
    }

    fn unload(&mut self) {
        log::info!("Unloading scene: {}", self.scene.name());
        let listeners = self.ctx.unsubscribe_all();
        let entities = self.ctx.destroy_all_entities();
        log::debug!(
            "Scene {} released {} listeners and {} entities",
            self.scene.name(),
            listeners,
            entities
        );
        self.scene.on_unload(&mut self.ctx);
        self.state = SceneState::Unloaded;
    }
}

/// Owns the registered scenes and switches between them.
///
/// At most one scene is active. Switching always unloads the outgoing scene
/// completely before the incoming one loads.
pub struct SceneManager {
    world: SharedWorld,
    events: Events,
    resources: SharedResources,
    switcher: SceneSwitcher,
    scenes: HashMap<String, SceneEntry>,
    active: Option<String>,
}

impl SceneManager {
    /// Create an empty manager over the shared engine state
    pub fn new(world: SharedWorld, events: Events, resources: SharedResources) -> Self {
        Self {
            world,
            events,
            resources,
            switcher: SceneSwitcher::new(),
            scenes: HashMap::new(),
            active: None,
        }
    }

    /// Register `scene` under `name`.
    ///
    /// An existing scene with that name is replaced with a warning. If it was
    /// active it is unloaded first and no scene is active afterwards.
    pub fn register(&mut self, name: impl Into<String>, scene: Box<dyn Scene>) {
        let name = name.into();
        if let Some(mut previous) = self.scenes.remove(&name) {
            log::warn!("Scene '{}' already registered, replacing it", name);
            if previous.state == SceneState::Active {
                previous.unload();
                self.active = None;
            }
        }

        let ctx = SceneContext::new(
            Rc::clone(&self.world),
            self.events.clone(),
            Rc::clone(&self.resources),
            self.switcher.clone(),
        );
        self.scenes.insert(
            name,
            SceneEntry {
                scene,
                ctx,
                state: SceneState::Unloaded,
            },
        );
    }

    /// Make `name` the active scene.
    ///
    /// Unknown or already-active names warn and return false.
    pub fn set_active(&mut self, name: &str) -> bool {
        if !self.scenes.contains_key(name) {
            log::warn!("Scene '{}' not found", name);
            return false;
        }
        if self.active.as_deref() == Some(name) {
            log::warn!("Scene '{}' is already active", name);
            return false;
        }

        if let Some(current) = self.active.take() {
            if let Some(entry) = self.scenes.get_mut(&current) {
                entry.unload();
            }
        }

        self.active = Some(name.to_string());
        if let Some(entry) = self.scenes.get_mut(name) {
            entry.load();
        }
        true
    }

    /// Apply a pending switch request. Returns whether a switch happened.
    pub fn apply_pending(&mut self) -> bool {
        match self.switcher.take() {
            Some(name) => self.set_active(&name),
            None => false,
        }
    }

    /// Update the active scene, then apply any switch it requested
    pub fn update(&mut self, dt: f32) {
        if let Some(entry) = self
            .active
            .as_ref()
            .and_then(|name| self.scenes.get_mut(name))
        {
            entry.scene.update(&mut entry.ctx, dt);
        }
        self.apply_pending();
    }

    /// Let the active scene draw on top of the rendered frame
    pub fn draw_overlay(&mut self, surface: &mut dyn Surface) {
        if let Some(entry) = self
            .active
            .as_ref()
            .and_then(|name| self.scenes.get_mut(name))
        {
            entry.scene.draw_overlay(surface);
        }
    }

    /// Name of the active scene
    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Lifecycle state of `name`, if registered
    pub fn state(&self, name: &str) -> Option<SceneState> {
        self.scenes.get(name).map(|entry| entry.state)
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    /// Number of registered scenes
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether no scene is registered
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Tracking context of `name`
    pub fn context(&self, name: &str) -> Option<&SceneContext> {
        self.scenes.get(name).map(|entry| &entry.ctx)
    }

    /// Switch handle shared by every scene context
    pub fn switcher(&self) -> &SceneSwitcher {
        &self.switcher
    }

    /// Subscribe the manager's update to the tick phase
    pub fn attach(this: SharedScenes, events: &Events) -> Listener<Tick> {
        let dispatch = listener(move |tick: &Tick| this.borrow_mut().update(tick.dt));
        events.tick.subscribe(Rc::clone(&dispatch));
        dispatch
    }
}
