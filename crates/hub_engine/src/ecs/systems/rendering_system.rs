//! Render system
//!
//! Runs in the late-tick phase. Collects active entities that have a
//! Transform and a drawable Render, sorts them by draw depth (stable, so
//! live-list order breaks ties) and blits them onto the surface.

use std::cell::RefCell;
use std::rc::Rc;

use crate::assets::TextureHandle;
use crate::ecs::{DrawDepth, Entity, Render, SharedWorld, Transform, World};
use crate::events::{listener, Events, Listener};
use crate::render::{Color, SharedSurface, Surface};

/// One entry of the frame's paint order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawItem {
    /// Source entity
    pub entity: Entity,
    /// Texture to blit
    pub texture: TextureHandle,
    /// Integer blit position (truncated)
    pub x: i32,
    /// Integer blit position (truncated)
    pub y: i32,
    /// Sort key
    pub depth: DrawDepth,
}

/// Draws every visible entity once per frame
#[derive(Debug)]
pub struct RenderSystem {
    background: Color,
    last_drawn: usize,
}

impl Default for RenderSystem {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

impl RenderSystem {
    /// Create a render system clearing to `background`
    pub fn new(background: Color) -> Self {
        Self {
            background,
            last_drawn: 0,
        }
    }

    /// Colour used to clear the surface
    pub fn set_background_color(&mut self, color: Color) {
        self.background = color;
    }

    /// Current clear colour
    pub fn background_color(&self) -> Color {
        self.background
    }

    /// Entities drawn in the most recent frame
    pub fn last_drawn(&self) -> usize {
        self.last_drawn
    }

    /// Paint order for the current world state
    pub fn draw_list(world: &World) -> Vec<DrawItem> {
        let mut items: Vec<DrawItem> = world
            .entities()
            .iter()
            .filter(|&&entity| world.is_active(entity))
            .filter_map(|&entity| {
                let transform = world.component::<Transform>(entity)?;
                let render = world.component::<Render>(entity)?;
                if !render.visible {
                    return None;
                }
                let texture = render.texture?;
                Some(DrawItem {
                    entity,
                    texture,
                    x: transform.x as i32,
                    y: transform.y as i32,
                    depth: render.draw_depth,
                })
            })
            .collect();

        items.sort_by_key(|item| item.depth);
        items
    }

    /// Clear the surface and blit the frame's draw list
    pub fn render(&mut self, world: &World, surface: &mut dyn Surface) {
        surface.clear(self.background);

        let items = Self::draw_list(world);
        for item in &items {
            surface.blit(item.texture, item.x, item.y);
        }

        self.last_drawn = items.len();
        log::trace!("Rendered {} entities", self.last_drawn);
    }

    /// Subscribe rendering to the late-tick phase
    pub fn attach(
        this: Rc<RefCell<Self>>,
        world: SharedWorld,
        surface: SharedSurface,
        events: &Events,
    ) -> Listener<()> {
        let draw = listener(move |_: &()| {
            let world = world.borrow();
            let mut surface = surface.borrow_mut();
            this.borrow_mut().render(&world, &mut *surface);
        });
        events.late_tick.subscribe(Rc::clone(&draw));
        draw
    }
}
