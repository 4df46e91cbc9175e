//! Text layout helpers shared by the hub scenes

use hub_engine::ecs::{DrawDepth, Entity, EntityBuilder, Render, Text};
use hub_engine::render::Color;
use hub_engine::scene::SceneContext;

pub const TEXT_COLOR: Color = Color(230, 230, 230);
pub const HIGHLIGHT_COLOR: Color = Color(255, 255, 0);

/// Pixel size of the entity's current texture
pub fn texture_size(ctx: &SceneContext, entity: Entity) -> Option<(u32, u32)> {
    let texture = ctx
        .world()
        .borrow()
        .component::<Render>(entity)
        .and_then(|render| render.texture)?;
    ctx.resources().borrow().texture_size(texture)
}

/// Text line horizontally centred on `center_x`, top edge at `y`
pub fn centered_line(
    ctx: &mut SceneContext,
    content: &str,
    size: u32,
    color: Color,
    center_x: f32,
    y: f32,
) -> Entity {
    let font = ctx.resources().borrow_mut().get_font(None, size);
    let entity = ctx.create_text(
        EntityBuilder::new().at(center_x, y).with_depth(DrawDepth::Ui),
        Text::new(content, font, color),
    );
    match texture_size(ctx, entity) {
        Some((width, _)) => {
            ctx.world()
                .borrow_mut()
                .set_position(entity, center_x - (width / 2) as f32, y);
        }
        None => log::warn!("Could not get width for text line '{}'", content),
    }
    entity
}

/// Give `entity` a collider matching its texture, so it can be hit or clicked
pub fn fit_collider(ctx: &SceneContext, entity: Entity) {
    if let Some((width, height)) = texture_size(ctx, entity) {
        ctx.world()
            .borrow_mut()
            .set_collider(entity, Some((width as f32, height as f32)));
    }
}
