//! Minigame hub demo
//!
//! Runs the hub headlessly: a scripted input session walks the main menu,
//! visits a game placeholder and the credits, then quits.

mod scenes;
mod script;
mod text;

use std::cell::RefCell;
use std::rc::Rc;

use hub_engine::achievements::{AchievementRelay, RecordingAchievements};
use hub_engine::assets::AssetCache;
use hub_engine::config::{Config, ConfigError};
use hub_engine::input::{ScriptedInput, SharedInput};
use hub_engine::render::{Color, HeadlessSurface, SharedSurface};
use hub_engine::scene::SharedResources;
use hub_engine::{Engine, EngineConfig, EngineError};
use thiserror::Error;

use crate::scenes::{CreditsScene, MainMenuScene, PlaceholderScene, MAIN_MENU};

/// Hub-level errors
#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

fn load_config() -> Result<EngineConfig, AppError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            Ok(EngineConfig::load_from_file(&path)?)
        }
        None => Ok(EngineConfig {
            background_color: Color::new(20, 20, 50),
            ..EngineConfig::default()
        }),
    }
}

fn run() -> Result<(), AppError> {
    let mut config = load_config()?;
    config.window.title = "Minigame Hub".to_string();
    let (width, height) = (config.window.width as f32, config.window.height as f32);

    let mut input = ScriptedInput::new();
    script::demo_session(&mut input, width);
    let input: SharedInput = Rc::new(RefCell::new(input));
    let surface: SharedSurface = Rc::new(RefCell::new(HeadlessSurface::new(
        config.window.width,
        config.window.height,
    )));
    let resources: SharedResources =
        Rc::new(RefCell::new(AssetCache::new(config.assets_path.clone())));

    let mut engine = Engine::new(config, surface, input, resources)?;

    let achievements = Rc::new(RefCell::new(RecordingAchievements::new()));
    AchievementRelay::attach(achievements.clone(), engine.events());

    {
        let mut scenes = engine.scenes().borrow_mut();
        scenes.register(MAIN_MENU, Box::new(MainMenuScene::new(width)));
        scenes.register("snake", Box::new(PlaceholderScene::new("Snake", width, height)));
        scenes.register(
            "blackjack",
            Box::new(PlaceholderScene::new("Blackjack", width, height)),
        );
        scenes.register(
            "roadrunner",
            Box::new(PlaceholderScene::new("Roadrunner", width, height)),
        );
        scenes.register("credits", Box::new(CreditsScene::new(width)));
        scenes.set_active(MAIN_MENU);
    }

    engine.start()?;

    log::info!(
        "Session finished after {} frames; achievements: {:?}",
        engine.frame_count(),
        achievements.borrow().unlocked()
    );
    Ok(())
}

fn main() {
    hub_engine::foundation::logging::init();
    log::info!("Starting Minigame Hub");

    if let Err(e) = run() {
        log::error!("Minigame Hub failed: {}", e);
        std::process::exit(1);
    }
}
