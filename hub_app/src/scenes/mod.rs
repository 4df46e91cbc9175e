//! Hub scenes

pub mod credits;
mod main_menu;
mod placeholder;

pub use credits::CreditsScene;
pub use main_menu::MainMenuScene;
pub use placeholder::PlaceholderScene;

/// Registry name of the main menu
pub const MAIN_MENU: &str = "main_menu";

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use hub_engine::achievements::{AchievementRelay, RecordingAchievements};
    use hub_engine::assets::AssetCache;
    use hub_engine::ecs::{Entity, Text};
    use hub_engine::input::{InputEvent, KeyCode, ScriptedInput, SharedInput};
    use hub_engine::render::{HeadlessSurface, SharedSurface};
    use hub_engine::scene::SharedResources;
    use hub_engine::{Engine, EngineConfig};

    use super::*;
    use crate::text::{HIGHLIGHT_COLOR, TEXT_COLOR};

    struct Hub {
        engine: Engine,
        input: Rc<RefCell<ScriptedInput>>,
        achievements: Rc<RefCell<RecordingAchievements>>,
    }

    fn hub() -> Hub {
        hub_engine::foundation::logging::init_for_tests();
        let config = EngineConfig::default().with_fps_limit(0).with_max_frames(500);
        let input = Rc::new(RefCell::new(ScriptedInput::new()));
        let shared_input: SharedInput = input.clone();
        let surface: SharedSurface = Rc::new(RefCell::new(HeadlessSurface::new(800, 600)));
        let resources: SharedResources = Rc::new(RefCell::new(AssetCache::new("assets")));
        let engine = Engine::new(config, surface, shared_input, resources).unwrap();

        let achievements = Rc::new(RefCell::new(RecordingAchievements::new()));
        AchievementRelay::attach(achievements.clone(), engine.events());
        {
            let mut scenes = engine.scenes().borrow_mut();
            scenes.register(MAIN_MENU, Box::new(MainMenuScene::new(800.0)));
            scenes.register("snake", Box::new(PlaceholderScene::new("Snake", 800.0, 600.0)));
            scenes.register(
                "roadrunner",
                Box::new(PlaceholderScene::new("Roadrunner", 800.0, 600.0)),
            );
            scenes.register("credits", Box::new(CreditsScene::new(800.0)));
            scenes.set_active(MAIN_MENU);
        }
        Hub {
            engine,
            input,
            achievements,
        }
    }

    impl Hub {
        fn press(&mut self, key: KeyCode) {
            self.input.borrow_mut().push_frame(vec![InputEvent::KeyDown(key)]);
            self.engine.frame(0.016);
        }

        fn active(&self) -> Option<String> {
            self.engine.scenes().borrow().active_name().map(str::to_string)
        }

        fn text_entity(&self, content: &str) -> Option<Entity> {
            let world = self.engine.world().borrow();
            let found = world.entities().iter().copied().find(|&entity| {
                world
                    .component::<Text>(entity)
                    .is_some_and(|text| text.content == content)
            });
            found
        }

        fn text_color(&self, content: &str) -> Option<hub_engine::render::Color> {
            let entity = self.text_entity(content)?;
            self.engine
                .world()
                .borrow()
                .component::<Text>(entity)
                .map(|text| text.color)
        }
    }

    #[test]
    fn test_cursor_collision_highlights_selection() {
        let mut hub = hub();
        hub.engine.frame(0.016);
        assert_eq!(hub.text_color("Snake"), Some(HIGHLIGHT_COLOR));
        assert_eq!(hub.text_color("Blackjack"), Some(TEXT_COLOR));

        hub.press(KeyCode::Down);
        assert_eq!(hub.text_color("Snake"), Some(TEXT_COLOR));
        assert_eq!(hub.text_color("Blackjack"), Some(HIGHLIGHT_COLOR));
    }

    #[test]
    fn test_enter_opens_game_and_escape_returns() {
        let mut hub = hub();
        hub.press(KeyCode::Enter);
        assert_eq!(hub.active().as_deref(), Some("snake"));
        assert!(hub.text_entity("Snake - Placeholder").is_some());
        assert!(hub.text_entity("Main Menu").is_none());

        hub.engine.frame(0.5);
        hub.press(KeyCode::Escape);
        assert_eq!(hub.active().as_deref(), Some(MAIN_MENU));
        assert!(hub.text_entity("Snake - Placeholder").is_none());
    }

    #[test]
    fn test_credits_unlock_achievement_once() {
        let mut hub = hub();
        hub.press(KeyCode::Up);
        hub.press(KeyCode::Up);
        hub.press(KeyCode::Enter);
        assert_eq!(hub.active().as_deref(), Some("credits"));

        hub.press(KeyCode::Escape);
        hub.press(KeyCode::Up);
        hub.press(KeyCode::Up);
        hub.press(KeyCode::Space);
        assert_eq!(hub.active().as_deref(), Some("credits"));
        assert_eq!(
            hub.achievements.borrow().unlocked(),
            ["CREDITS_VISITED".to_string()]
        );
    }

    #[test]
    fn test_roadrunner_sits_between_blackjack_and_credits() {
        let mut hub = hub();
        hub.press(KeyCode::Down);
        hub.press(KeyCode::Down);
        hub.engine.frame(0.016);
        assert_eq!(hub.text_color("Roadrunner"), Some(HIGHLIGHT_COLOR));

        hub.press(KeyCode::Enter);
        assert_eq!(hub.active().as_deref(), Some("roadrunner"));
        assert!(hub.text_entity("Roadrunner - Placeholder").is_some());
    }

    #[test]
    fn test_quit_item_stops_engine() {
        let mut hub = hub();
        hub.press(KeyCode::Up);
        hub.press(KeyCode::Enter);
        assert!(!hub.engine.is_running());
    }

    #[test]
    fn test_demo_session_runs_to_quit() {
        let mut hub = hub();
        crate::script::demo_session(&mut hub.input.borrow_mut(), 800.0);
        hub.engine.start().unwrap();

        assert!(!hub.engine.is_running());
        assert!(hub.engine.frame_count() < 500);
        assert_eq!(hub.active().as_deref(), Some(MAIN_MENU));
        assert!(hub.achievements.borrow().is_unlocked("CREDITS_VISITED"));
    }
}
