//! Recording surface for tests and windowless runs

use super::{Color, Surface};
use crate::assets::TextureHandle;
use crate::ecs::Rect;

/// A draw call captured by [`HeadlessSurface`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Surface cleared
    Clear(Color),
    /// Texture copied
    Blit {
        /// Texture drawn
        texture: TextureHandle,
        /// Left edge
        x: i32,
        /// Top edge
        y: i32,
    },
    /// Rectangle outline
    StrokeRect {
        /// Outline bounds
        rect: Rect,
        /// Stroke colour
        color: Color,
        /// Stroke width in pixels
        width: u32,
    },
}

/// Surface that records commands of the frame in progress
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    width: u32,
    height: u32,
    pending: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames_presented: u64,
}

impl HeadlessSurface {
    /// Create a surface of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pending: Vec::new(),
            last_frame: Vec::new(),
            frames_presented: 0,
        }
    }

    /// Commands issued since the last `present`
    pub fn commands(&self) -> &[DrawCommand] {
        &self.pending
    }

    /// Commands of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    /// Number of frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Textures blitted in the last presented frame, in paint order
    pub fn last_frame_blits(&self) -> Vec<TextureHandle> {
        self.last_frame
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Blit { texture, .. } => Some(*texture),
                _ => None,
            })
            .collect()
    }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.pending.push(DrawCommand::Clear(color));
    }

    fn blit(&mut self, texture: TextureHandle, x: i32, y: i32) {
        self.pending.push(DrawCommand::Blit { texture, x, y });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: u32) {
        self.pending.push(DrawCommand::StrokeRect { rect, color, width });
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
    }
}
