//! Main menu: keyboard and mouse navigation over the hub's games

use std::cell::Cell;
use std::rc::Rc;

use hub_engine::ecs::{Clickable, Entity, EntityBuilder, SharedWorld, Transform};
use hub_engine::events::{listener, CollisionEvent, EventBus, KeyEvent, MouseButtonEvent};
use hub_engine::input::{KeyCode, MouseButton};
use hub_engine::scene::{Scene, SceneContext, SceneSwitcher};

use crate::text::{centered_line, fit_collider, HIGHLIGHT_COLOR, TEXT_COLOR};

const TITLE_FONT_SIZE: u32 = 48;
const ITEM_FONT_SIZE: u32 = 36;
const FIRST_ITEM_Y: f32 = 200.0;
const ITEM_SPACING: f32 = 60.0;
const CURSOR_SIZE: f32 = 4.0;

/// Menu label and the scene it opens; `None` quits
const OPTIONS: [(&str, Option<&str>); 5] = [
    ("Snake", Some("snake")),
    ("Blackjack", Some("blackjack")),
    ("Roadrunner", Some("roadrunner")),
    ("Credits", Some("credits")),
    ("Quit", None),
];

/// Selection state shared by the input listeners
struct MenuControl {
    world: SharedWorld,
    switcher: SceneSwitcher,
    quit: EventBus<()>,
    items: Vec<Entity>,
    cursor: Entity,
    selected: Cell<usize>,
}

impl MenuControl {
    fn move_selection(&self, step: isize) {
        let count = self.items.len() as isize;
        let next = (self.selected.get() as isize + step).rem_euclid(count);
        self.select_index(next as usize);
    }

    fn select_index(&self, index: usize) {
        self.selected.set(index);
        // The cursor sits inside the item; the resulting collision drives the highlight
        let mut world = self.world.borrow_mut();
        let target = world
            .component::<Transform>(self.items[index])
            .map(Transform::position);
        if let Some((x, y)) = target {
            world.set_position(self.cursor, x + 2.0, y + 2.0);
        }
    }

    fn activate(&self) {
        let (label, target) = OPTIONS[self.selected.get()];
        log::info!("Selected: {}", label);
        match target {
            Some(scene) => self.switcher.request(scene),
            None => self.quit.emit(&()),
        }
    }

    fn on_key(&self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::W | KeyCode::K => self.move_selection(-1),
            KeyCode::Down | KeyCode::S | KeyCode::J => self.move_selection(1),
            KeyCode::Enter | KeyCode::Space => self.activate(),
            _ => {}
        }
    }

    fn on_click(&self, event: &MouseButtonEvent) {
        if event.button != MouseButton::Left {
            return;
        }
        let hit = self.world.borrow().click_at(event.x, event.y);
        if let Some(index) = hit.and_then(|entity| self.items.iter().position(|&e| e == entity)) {
            log::info!("Clicked on: {}", OPTIONS[index].0);
            self.select_index(index);
            self.activate();
        }
    }
}

/// The hub's entry scene
pub struct MainMenuScene {
    width: f32,
    touching: Rc<Cell<Option<Entity>>>,
    highlighted: Option<Entity>,
}

impl MainMenuScene {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            touching: Rc::default(),
            highlighted: None,
        }
    }
}

impl Scene for MainMenuScene {
    fn name(&self) -> &str {
        "Main Menu"
    }

    fn on_load(&mut self, ctx: &mut SceneContext) {
        let center = self.width / 2.0;
        centered_line(ctx, "Main Menu", TITLE_FONT_SIZE, TEXT_COLOR, center, 100.0);

        let mut items = Vec::with_capacity(OPTIONS.len());
        for (i, (label, _)) in OPTIONS.iter().enumerate() {
            let y = FIRST_ITEM_Y + i as f32 * ITEM_SPACING;
            let item = centered_line(ctx, label, ITEM_FONT_SIZE, TEXT_COLOR, center, y);
            fit_collider(ctx, item);
            ctx.world().borrow_mut().insert_component(item, Clickable::new());
            items.push(item);
        }

        let cursor = ctx.create_entity(EntityBuilder::new().with_collider(CURSOR_SIZE, CURSOR_SIZE));
        let events = ctx.events().clone();
        let control = Rc::new(MenuControl {
            world: Rc::clone(ctx.world()),
            switcher: ctx.switcher().clone(),
            quit: events.quit.clone(),
            items,
            cursor,
            selected: Cell::new(0),
        });
        control.select_index(0);

        let keys = Rc::clone(&control);
        ctx.subscribe(
            &events.key_down,
            listener(move |event: &KeyEvent| keys.on_key(event.key)),
        );
        let mouse = Rc::clone(&control);
        ctx.subscribe(
            &events.mouse_button_down,
            listener(move |event: &MouseButtonEvent| mouse.on_click(event)),
        );
        let touching = Rc::clone(&self.touching);
        ctx.subscribe(
            &events.collision,
            listener(move |event: &CollisionEvent| {
                if let Some(other) = event.other(cursor) {
                    touching.set(Some(other));
                }
            }),
        );
    }

    fn on_unload(&mut self, _ctx: &mut SceneContext) {
        self.touching.set(None);
        self.highlighted = None;
        log::info!("Main menu unloaded");
    }

    fn update(&mut self, ctx: &mut SceneContext, _dt: f32) {
        let touching = self.touching.take();
        if touching == self.highlighted {
            return;
        }
        if let Some(previous) = self.highlighted {
            ctx.update_text(previous, |text| text.color = TEXT_COLOR);
        }
        if let Some(current) = touching {
            ctx.update_text(current, |text| text.color = HIGHLIGHT_COLOR);
        }
        self.highlighted = touching;
    }
}
