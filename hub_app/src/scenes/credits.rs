//! Credits with clickable links

use std::rc::Rc;

use hub_engine::ecs::Clickable;
use hub_engine::events::{listener, AchievementUnlocked, KeyEvent, MouseButtonEvent};
use hub_engine::input::{KeyCode, MouseButton};
use hub_engine::render::Color;
use hub_engine::scene::{Scene, SceneContext};

use super::MAIN_MENU;
use crate::text::{centered_line, fit_collider, TEXT_COLOR};

const CATEGORY_COLOR: Color = Color(180, 220, 255);
const LINK_COLOR: Color = Color(100, 150, 255);
const ACHIEVEMENT_ID: &str = "CREDITS_VISITED";

/// Top edge of the first link line
pub const FIRST_LINK_Y: f32 = 155.0;

struct Line {
    text: &'static str,
    size: u32,
    color: Color,
    y: f32,
    url: Option<&'static str>,
}

const fn item(text: &'static str, y: f32) -> Line {
    Line { text, size: 26, color: TEXT_COLOR, y, url: None }
}

const fn category(text: &'static str, y: f32) -> Line {
    Line { text, size: 32, color: CATEGORY_COLOR, y, url: None }
}

const fn link(url: &'static str, y: f32) -> Line {
    Line { text: url, size: 22, color: LINK_COLOR, y, url: Some(url) }
}

const LINES: &[Line] = &[
    Line { text: "Credits", size: 48, color: TEXT_COLOR, y: 50.0, url: None },
    category("Libraries", 110.0),
    item("Rust", 135.0),
    link("https://www.rust-lang.org/", FIRST_LINK_Y),
    item("log and env_logger", 195.0),
    link("https://github.com/rust-lang/log", 215.0),
    item("slotmap", 255.0),
    link("https://github.com/orlp/slotmap", 275.0),
    category("Assets", 315.0),
    item("52 Card Decks - More Than Just A Game", 340.0),
    item("Press ESC to return to Main Menu", 400.0),
];

/// Credits screen. The first visit unlocks an achievement.
pub struct CreditsScene {
    width: f32,
    visited: bool,
}

impl CreditsScene {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            visited: false,
        }
    }
}

impl Scene for CreditsScene {
    fn name(&self) -> &str {
        "Credits"
    }

    fn on_load(&mut self, ctx: &mut SceneContext) {
        let center = self.width / 2.0;
        for line in LINES {
            let entity = centered_line(ctx, line.text, line.size, line.color, center, line.y);
            if let Some(url) = line.url {
                fit_collider(ctx, entity);
                ctx.world()
                    .borrow_mut()
                    .insert_component(entity, Clickable::link(url));
            }
        }

        let events = ctx.events().clone();
        if !self.visited {
            self.visited = true;
            events.achievement_unlocked.emit(&AchievementUnlocked {
                id: ACHIEVEMENT_ID.to_string(),
            });
        }

        let switcher = ctx.switcher().clone();
        ctx.subscribe(
            &events.key_down,
            listener(move |event: &KeyEvent| {
                if event.key == KeyCode::Escape {
                    log::info!("ESC pressed in Credits, returning to menu");
                    switcher.request(MAIN_MENU);
                }
            }),
        );

        let world = Rc::clone(ctx.world());
        ctx.subscribe(
            &events.mouse_button_down,
            listener(move |event: &MouseButtonEvent| {
                if event.button != MouseButton::Left {
                    return;
                }
                let world = world.borrow();
                let url = world
                    .click_at(event.x, event.y)
                    .and_then(|entity| world.component::<Clickable>(entity))
                    .and_then(|clickable| clickable.url.as_deref());
                if let Some(url) = url {
                    log::info!("Link clicked: {}", url);
                }
            }),
        );
    }

    fn on_unload(&mut self, _ctx: &mut SceneContext) {
        log::info!("Credits unloaded");
    }
}
