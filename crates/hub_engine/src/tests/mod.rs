//! Cross-module tests driving the engine frame by frame

mod frame_integration;

use std::cell::RefCell;
use std::rc::Rc;

use crate::assets::AssetCache;
use crate::input::{ScriptedInput, SharedInput};
use crate::render::{HeadlessSurface, SharedSurface};
use crate::scene::SharedResources;
use crate::{Engine, EngineConfig};

/// Engine wired to a recording surface and a scripted input source
pub(crate) struct Harness {
    pub engine: Engine,
    pub surface: Rc<RefCell<HeadlessSurface>>,
    pub input: Rc<RefCell<ScriptedInput>>,
}

impl Harness {
    pub fn new() -> Self {
        crate::foundation::logging::init_for_tests();
        let surface = Rc::new(RefCell::new(HeadlessSurface::new(800, 600)));
        let input = Rc::new(RefCell::new(ScriptedInput::new()));
        let shared_surface: SharedSurface = surface.clone();
        let shared_input: SharedInput = input.clone();
        let resources: SharedResources = Rc::new(RefCell::new(AssetCache::new("assets")));
        let engine = Engine::new(
            EngineConfig::default().with_fps_limit(0),
            shared_surface,
            shared_input,
            resources,
        )
        .unwrap();
        Self {
            engine,
            surface,
            input,
        }
    }
}
