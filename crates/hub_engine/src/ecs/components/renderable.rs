//! Render component for entities that can be drawn
//!
//! The component only stores what the render backend needs: a visibility
//! flag, an opaque texture handle and a draw depth used as the sort key.

use crate::assets::TextureHandle;
use crate::ecs::Component;

/// Paint order bucket. Lower values are drawn first, so later depths
/// occlude earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DrawDepth {
    /// Backdrops
    Background = 0,
    /// Level geometry
    Terrain = 1,
    /// Game pieces
    Object = 2,
    /// Text and menus
    Ui = 3,
    /// Unassigned
    #[default]
    Default = 4,
}

/// Component for entities that can be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct Render {
    /// Whether this object is visible
    pub visible: bool,

    /// Texture to blit; `None` means nothing to draw
    pub texture: Option<TextureHandle>,

    /// Sort key for paint order
    pub draw_depth: DrawDepth,
}

impl Default for Render {
    fn default() -> Self {
        Self {
            visible: true,
            texture: None,
            draw_depth: DrawDepth::Default,
        }
    }
}

impl Render {
    /// Visible render component with a texture at the given depth
    pub fn textured(texture: TextureHandle, draw_depth: DrawDepth) -> Self {
        Self {
            visible: true,
            texture: Some(texture),
            draw_depth,
        }
    }

    /// Set visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Replace the texture
    pub fn set_texture(&mut self, texture: Option<TextureHandle>) {
        self.texture = texture;
    }

    /// Set the draw depth
    pub fn set_draw_depth(&mut self, depth: DrawDepth) {
        self.draw_depth = depth;
    }

    /// Visible and has something to draw
    pub fn is_drawable(&self) -> bool {
        self.visible && self.texture.is_some()
    }
}

impl Component for Render {}
