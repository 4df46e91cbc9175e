//! Core engine implementation
//!
//! Every frame runs the same fixed sequence:
//!
//! ```text
//! pre_tick   input pump, collision sweep
//! tick       scene manager (active scene update, pending switch)
//! late_tick  render system
//! overlay    active scene draws on top
//! present
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use thiserror::Error;

use crate::{
    assets::AssetCache,
    config::{ConfigError, EngineConfig},
    ecs::{CollisionSystem, RenderSystem, SharedWorld, SweepStats, World},
    events::{listener, Events, Tick},
    foundation::time::Timer,
    input::{InputPump, KeyState, ScriptedInput, SharedInput},
    render::{HeadlessSurface, SharedSurface},
    scene::{SceneManager, SharedResources, SharedScenes},
};

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// `start` was called before any scene was activated
    #[error("No active scene; call set_active before start")]
    NoActiveScene,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Main engine struct
///
/// Owns the shared world, the event hub and the scene manager, and drives
/// the frame loop.
pub struct Engine {
    config: EngineConfig,
    world: SharedWorld,
    events: Events,
    scenes: SharedScenes,
    surface: SharedSurface,
    resources: SharedResources,
    keys: Rc<RefCell<KeyState>>,
    renderer: Rc<RefCell<RenderSystem>>,
    sweep_stats: Rc<RefCell<SweepStats>>,
    timer: Timer,
    running: Rc<Cell<bool>>,
}

impl Engine {
    /// Create an engine over the given platform services
    pub fn new(
        config: EngineConfig,
        surface: SharedSurface,
        input: SharedInput,
        resources: SharedResources,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!("Initializing engine: {}", config.window.title);

        let world = World::shared();
        let events = Events::new();
        let scenes = Rc::new(RefCell::new(SceneManager::new(
            Rc::clone(&world),
            events.clone(),
            Rc::clone(&resources),
        )));
        let keys = Rc::new(RefCell::new(KeyState::new()));
        let renderer = Rc::new(RefCell::new(RenderSystem::new(config.background_color)));
        let sweep_stats = Rc::new(RefCell::new(SweepStats::default()));
        let running = Rc::new(Cell::new(true));

        // Subscription order fixes the order within each phase
        {
            let running = Rc::clone(&running);
            events.quit.subscribe(listener(move |_: &()| {
                log::info!("Engine shutdown requested");
                running.set(false);
            }));
        }
        InputPump::attach(input, Rc::clone(&keys), &events);
        CollisionSystem::attach(Rc::clone(&world), &events, Rc::clone(&sweep_stats));
        SceneManager::attach(Rc::clone(&scenes), &events);
        RenderSystem::attach(
            Rc::clone(&renderer),
            Rc::clone(&world),
            Rc::clone(&surface),
            &events,
        );

        Ok(Self {
            config,
            world,
            events,
            scenes,
            surface,
            resources,
            keys,
            renderer,
            sweep_stats,
            timer: Timer::new(),
            running,
        })
    }

    /// Create an engine with a recording surface, no input and a file-backed asset cache
    pub fn headless(config: EngineConfig) -> Result<Self, EngineError> {
        let surface: SharedSurface = Rc::new(RefCell::new(HeadlessSurface::new(
            config.window.width,
            config.window.height,
        )));
        let input: SharedInput = Rc::new(RefCell::new(ScriptedInput::new()));
        let resources: SharedResources =
            Rc::new(RefCell::new(AssetCache::new(config.assets_path.clone())));
        Self::new(config, surface, input, resources)
    }

    /// Run frames until `exit` is called or `max_frames` is reached
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.scenes.borrow().active_name().is_none() {
            return Err(EngineError::NoActiveScene);
        }

        log::info!("Starting main loop...");
        self.running.set(true);
        self.timer = Timer::new();

        while self.running.get() {
            if self
                .config
                .max_frames
                .is_some_and(|max| self.timer.frame_count() >= max)
            {
                break;
            }
            self.step();
            self.timer.pace(self.config.fps_limit);
        }

        log::info!(
            "Engine stopped after {} frames ({:.1} fps average)",
            self.timer.frame_count(),
            self.timer.average_fps()
        );
        Ok(())
    }

    /// Run one frame timed by the wall clock
    pub fn step(&mut self) {
        let dt = self.timer.tick();
        self.run_frame(dt);
    }

    /// Run one frame with an explicit `dt` in seconds
    pub fn frame(&mut self, dt: f32) {
        self.timer.record(dt);
        self.run_frame(dt);
    }

    fn run_frame(&mut self, dt: f32) {
        self.events.pre_tick.emit(&());
        self.events.tick.emit(&Tick { dt });
        self.events.late_tick.emit(&());

        let mut surface = self.surface.borrow_mut();
        self.scenes.borrow_mut().draw_overlay(&mut *surface);
        surface.present();

        log::trace!(
            "Frame {}: {} collisions, {} drawn",
            self.timer.frame_count(),
            self.sweep_stats.borrow().collisions,
            self.renderer.borrow().last_drawn()
        );
    }

    /// Stop the loop at the top of the next iteration
    pub fn exit(&self) {
        self.running.set(false);
    }

    /// Whether the loop would keep running
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// The shared world
    pub fn world(&self) -> &SharedWorld {
        &self.world
    }

    /// The event hub
    pub fn events(&self) -> &Events {
        &self.events
    }

    /// The scene manager
    pub fn scenes(&self) -> &SharedScenes {
        &self.scenes
    }

    /// The drawing surface
    pub fn surface(&self) -> &SharedSurface {
        &self.surface
    }

    /// The resource loader
    pub fn resources(&self) -> &SharedResources {
        &self.resources
    }

    /// Keys currently held
    pub fn key_state(&self) -> &Rc<RefCell<KeyState>> {
        &self.keys
    }

    /// Counters from the latest collision sweep
    pub fn sweep_stats(&self) -> SweepStats {
        *self.sweep_stats.borrow()
    }

    /// The render system
    pub fn renderer(&self) -> &Rc<RefCell<RenderSystem>> {
        &self.renderer
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Frames run so far
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }
}
