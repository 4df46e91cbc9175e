//! # Rendering abstraction
//!
//! The engine does not rasterise anything itself. It decides *what* to draw
//! and in which order, and hands blits to a [`Surface`] provided by the
//! platform layer. [`HeadlessSurface`] records the commands instead, which
//! is what tests and the headless demo use.

mod headless;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::assets::TextureHandle;
use crate::ecs::Rect;

pub use headless::{DrawCommand, HeadlessSurface};

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Black
    pub const BLACK: Color = Color(0, 0, 0);
    /// White
    pub const WHITE: Color = Color(255, 255, 255);
    /// Red, used for text fallbacks
    pub const RED: Color = Color(255, 0, 0);
    /// Magenta, used for missing images
    pub const MAGENTA: Color = Color(255, 0, 255);

    /// Create a colour from components
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }
}

/// Drawing target for one frame
///
/// Single-threaded: surfaces are shared as `Rc<RefCell<dyn Surface>>`.
pub trait Surface {
    /// Framebuffer size in pixels
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface
    fn clear(&mut self, color: Color);

    /// Copy `texture` with its top-left corner at `(x, y)`
    fn blit(&mut self, texture: TextureHandle, x: i32, y: i32);

    /// Outline `rect` (scene overlays, e.g. playfield borders)
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: u32);

    /// Show the finished frame
    fn present(&mut self);
}

/// Surface shared between the render system, overlays and the engine loop
pub type SharedSurface = Rc<RefCell<dyn Surface>>;
