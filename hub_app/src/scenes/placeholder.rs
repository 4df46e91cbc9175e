//! Stand-in for a minigame that is not part of the hub yet

use rand::Rng;

use hub_engine::ecs::{DrawDepth, Entity, EntityBuilder, Rect, Transform};
use hub_engine::events::{listener, KeyEvent};
use hub_engine::input::KeyCode;
use hub_engine::render::{Color, Surface};
use hub_engine::scene::{Scene, SceneContext};

use super::MAIN_MENU;
use crate::text::{centered_line, TEXT_COLOR};

const TITLE_FONT_SIZE: u32 = 48;
const HINT_FONT_SIZE: u32 = 36;
const BLOCK_COUNT: usize = 6;
const BLOCK_SIZE: u32 = 24;
const MAX_SPEED: f32 = 120.0;
const BORDER: f32 = 10.0;
const BORDER_COLOR: Color = Color(90, 90, 140);

struct Block {
    entity: Entity,
    velocity: (f32, f32),
}

/// Title, hint and a few drifting blocks inside a border
pub struct PlaceholderScene {
    game_name: String,
    width: f32,
    height: f32,
    blocks: Vec<Block>,
}

impl PlaceholderScene {
    pub fn new(game_name: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            game_name: game_name.into(),
            width,
            height,
            blocks: Vec::new(),
        }
    }

    fn playfield(&self) -> Rect {
        Rect::new(
            BORDER,
            BORDER,
            self.width - 2.0 * BORDER,
            self.height - 2.0 * BORDER,
        )
    }
}

impl Scene for PlaceholderScene {
    fn name(&self) -> &str {
        &self.game_name
    }

    fn on_load(&mut self, ctx: &mut SceneContext) {
        let center = self.width / 2.0;
        let middle = self.height / 2.0;
        centered_line(
            ctx,
            &format!("{} - Placeholder", self.game_name),
            TITLE_FONT_SIZE,
            TEXT_COLOR,
            center,
            middle - 50.0,
        );
        centered_line(
            ctx,
            "Press ESC to return to Main Menu",
            HINT_FONT_SIZE,
            TEXT_COLOR,
            center,
            middle + 50.0,
        );

        let texture = ctx
            .resources()
            .borrow_mut()
            .get_image("block.png", Some((BLOCK_SIZE, BLOCK_SIZE)));
        let field = self.playfield();
        let size = BLOCK_SIZE as f32;
        let (max_x, max_y) = (field.right() - size, field.bottom() - size);
        let block_count = if max_x < field.x || max_y < field.y {
            log::warn!(
                "{}x{} window leaves no room for blocks in {}",
                self.width,
                self.height,
                self.game_name
            );
            0
        } else {
            BLOCK_COUNT
        };
        let mut rng = rand::thread_rng();
        for _ in 0..block_count {
            let x = rng.gen_range(field.x..=max_x);
            let y = rng.gen_range(field.y..=max_y);
            let entity = ctx.create_entity(
                EntityBuilder::new()
                    .at(x, y)
                    .with_texture(texture)
                    .with_depth(DrawDepth::Object),
            );
            let velocity = (
                rng.gen_range(-MAX_SPEED..MAX_SPEED),
                rng.gen_range(-MAX_SPEED..MAX_SPEED),
            );
            self.blocks.push(Block { entity, velocity });
        }

        let switcher = ctx.switcher().clone();
        let name = self.game_name.clone();
        let events = ctx.events().clone();
        ctx.subscribe(
            &events.key_down,
            listener(move |event: &KeyEvent| {
                if event.key == KeyCode::Escape {
                    log::info!("ESC pressed in {}, returning to menu", name);
                    switcher.request(MAIN_MENU);
                }
            }),
        );
    }

    fn on_unload(&mut self, _ctx: &mut SceneContext) {
        self.blocks.clear();
        log::info!("{} placeholder unloaded", self.game_name);
    }

    fn update(&mut self, ctx: &mut SceneContext, dt: f32) {
        let field = self.playfield();
        let size = BLOCK_SIZE as f32;
        let mut world = ctx.world().borrow_mut();
        for block in &mut self.blocks {
            let Some(transform) = world.component_mut::<Transform>(block.entity) else {
                continue;
            };
            transform.translate(block.velocity.0 * dt, block.velocity.1 * dt);
            if transform.x < field.x || transform.x + size > field.right() {
                block.velocity.0 = -block.velocity.0;
                transform.x = transform.x.clamp(field.x, field.right() - size);
            }
            if transform.y < field.y || transform.y + size > field.bottom() {
                block.velocity.1 = -block.velocity.1;
                transform.y = transform.y.clamp(field.y, field.bottom() - size);
            }
        }
    }

    fn draw_overlay(&mut self, surface: &mut dyn Surface) {
        surface.stroke_rect(self.playfield(), BORDER_COLOR, 2);
    }
}
