use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::Harness;
use crate::assets::TextureHandle;
use crate::ecs::{Clickable, DrawDepth, Entity, EntityBuilder, Rect};
use crate::events::{listener, CollisionEvent, MouseButtonEvent, Tick};
use crate::input::{InputEvent, MouseButton};
use crate::render::{Color, DrawCommand, Surface};
use crate::scene::{Scene, SceneContext};
use crate::{Engine, EngineConfig};

type Journal = Rc<RefCell<Vec<String>>>;

/// Two overlapping boxes; logs collisions and updates
struct Overlap {
    journal: Journal,
    entities: Rc<RefCell<Vec<Entity>>>,
}

impl Scene for Overlap {
    fn name(&self) -> &str {
        "overlap"
    }

    fn on_load(&mut self, ctx: &mut SceneContext) {
        let a = ctx.create_entity(
            EntityBuilder::new()
                .at(0.0, 0.0)
                .with_collider(10.0, 10.0)
                .with_texture(TextureHandle::from_raw(1))
                .with_depth(DrawDepth::Ui),
        );
        let b = ctx.create_entity(
            EntityBuilder::new()
                .at(5.0, 5.0)
                .with_collider(10.0, 10.0)
                .with_texture(TextureHandle::from_raw(2))
                .with_depth(DrawDepth::Background),
        );
        self.entities.borrow_mut().extend([a, b]);

        let journal = Rc::clone(&self.journal);
        let events = ctx.events().clone();
        ctx.subscribe(
            &events.collision,
            listener(move |_: &CollisionEvent| journal.borrow_mut().push("collision".to_string())),
        );
    }

    fn update(&mut self, _ctx: &mut SceneContext, dt: f32) {
        self.journal.borrow_mut().push(format!("update {dt}"));
    }

    fn draw_overlay(&mut self, surface: &mut dyn Surface) {
        self.journal.borrow_mut().push("overlay".to_string());
        surface.stroke_rect(Rect::new(0.0, 0.0, 100.0, 100.0), Color::WHITE, 2);
    }
}

fn overlap_harness() -> (Harness, Journal, Rc<RefCell<Vec<Entity>>>) {
    let harness = Harness::new();
    let journal = Journal::default();
    let entities = Rc::new(RefCell::new(Vec::new()));
    {
        let mut scenes = harness.engine.scenes().borrow_mut();
        scenes.register(
            "overlap",
            Box::new(Overlap {
                journal: Rc::clone(&journal),
                entities: Rc::clone(&entities),
            }),
        );
        scenes.set_active("overlap");
    }
    (harness, journal, entities)
}

#[test]
fn test_collision_then_separation() {
    let (mut harness, journal, entities) = overlap_harness();

    harness.engine.frame(0.5);
    assert_eq!(harness.engine.sweep_stats().collisions, 1);

    let b = entities.borrow()[1];
    harness.engine.world().borrow_mut().set_position(b, 20.0, 20.0);
    harness.engine.frame(0.5);
    assert_eq!(harness.engine.sweep_stats().collisions, 0);

    let collisions = journal.borrow().iter().filter(|e| *e == "collision").count();
    assert_eq!(collisions, 1);
}

#[test]
fn test_phases_run_in_fixed_order() {
    let (mut harness, journal, _) = overlap_harness();
    let events = harness.engine.events().clone();
    {
        let journal = Rc::clone(&journal);
        events.pre_tick.subscribe(listener(move |_: &()| journal.borrow_mut().push("pre".to_string())));
    }
    {
        let journal = Rc::clone(&journal);
        events.tick.subscribe(listener(move |_: &Tick| journal.borrow_mut().push("tick".to_string())));
    }
    {
        let journal = Rc::clone(&journal);
        events.late_tick.subscribe(listener(move |_: &()| journal.borrow_mut().push("late".to_string())));
    }

    harness.engine.frame(0.25);
    assert_eq!(
        *journal.borrow(),
        vec!["collision", "pre", "update 0.25", "tick", "late", "overlay"]
    );
}

#[test]
fn test_frame_draws_by_depth_then_overlay() {
    let (mut harness, _, _) = overlap_harness();
    harness.engine.frame(0.016);

    let surface = harness.surface.borrow();
    assert_eq!(surface.frames_presented(), 1);
    assert_eq!(
        surface.last_frame(),
        [
            DrawCommand::Clear(Color::BLACK),
            DrawCommand::Blit { texture: TextureHandle::from_raw(2), x: 5, y: 5 },
            DrawCommand::Blit { texture: TextureHandle::from_raw(1), x: 0, y: 0 },
            DrawCommand::StrokeRect {
                rect: Rect::new(0.0, 0.0, 100.0, 100.0),
                color: Color::WHITE,
                width: 2,
            },
        ]
    );
}

#[test]
fn test_max_frames_bounds_start() {
    let journal = Journal::default();
    let config = EngineConfig::default().with_fps_limit(0).with_max_frames(3);
    let mut engine = Engine::headless(config).unwrap();
    {
        let mut scenes = engine.scenes().borrow_mut();
        scenes.register(
            "overlap",
            Box::new(Overlap {
                journal: Rc::clone(&journal),
                entities: Rc::default(),
            }),
        );
        scenes.set_active("overlap");
    }

    engine.start().unwrap();
    assert_eq!(engine.frame_count(), 3);
    let updates = journal.borrow().iter().filter(|e| e.starts_with("update")).count();
    assert_eq!(updates, 3);
}

#[test]
fn test_exit_stops_loop_after_current_frame() {
    let (mut harness, _, _) = overlap_harness();
    let running = Rc::new(Cell::new(0));
    {
        let running = Rc::clone(&running);
        let quit = harness.engine.events().quit.clone();
        harness.engine.events().tick.subscribe(listener(move |_: &Tick| {
            running.set(running.get() + 1);
            if running.get() == 2 {
                quit.emit(&());
            }
        }));
    }

    harness.engine.start().unwrap();
    assert_eq!(running.get(), 2);
    assert_eq!(harness.engine.frame_count(), 2);
}

/// Clickable link under the cursor
struct Links {
    clicked: Rc<RefCell<Vec<String>>>,
}

impl Scene for Links {
    fn name(&self) -> &str {
        "links"
    }

    fn on_load(&mut self, ctx: &mut SceneContext) {
        ctx.create_entity(
            EntityBuilder::new()
                .at(100.0, 100.0)
                .with_collider(80.0, 20.0)
                .with_component(Clickable::link("https://example.org/a")),
        );
        ctx.create_entity(
            EntityBuilder::new()
                .at(100.0, 140.0)
                .with_collider(80.0, 20.0)
                .with_component(Clickable::link("https://example.org/b")),
        );

        let world = Rc::clone(ctx.world());
        let clicked = Rc::clone(&self.clicked);
        let events = ctx.events().clone();
        ctx.subscribe(
            &events.mouse_button_down,
            listener(move |event: &MouseButtonEvent| {
                let world = world.borrow();
                let url = world
                    .click_at(event.x, event.y)
                    .and_then(|entity| world.component::<Clickable>(entity))
                    .and_then(|clickable| clickable.url.clone());
                if let Some(url) = url {
                    clicked.borrow_mut().push(url);
                }
            }),
        );
    }
}

#[test]
fn test_mouse_click_resolves_link() {
    let mut harness = Harness::new();
    let clicked = Rc::new(RefCell::new(Vec::new()));
    {
        let mut scenes = harness.engine.scenes().borrow_mut();
        scenes.register("links", Box::new(Links { clicked: Rc::clone(&clicked) }));
        scenes.set_active("links");
    }

    harness.input.borrow_mut().push_frame(vec![
        InputEvent::MouseButtonDown { x: 110.0, y: 145.0, button: MouseButton::Left },
        InputEvent::MouseButtonDown { x: 10.0, y: 10.0, button: MouseButton::Left },
    ]);
    harness.engine.frame(0.016);

    assert_eq!(*clicked.borrow(), vec!["https://example.org/b".to_string()]);
}
