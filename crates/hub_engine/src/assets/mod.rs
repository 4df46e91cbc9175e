//! Asset loading and caching
//!
//! Scenes ask a [`ResourceLoader`] for images, sounds and fonts by name and
//! get back opaque handles that components store without interpreting.
//! Loading never fails from the caller's point of view. A missing or
//! broken image resolves to a magenta fallback texture. A missing sound or
//! font resolves to `None`.

mod image_loader;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::render::Color;

pub use image_loader::probe_dimensions;

/// Opaque texture handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(u32);

impl TextureHandle {
    /// Wrap a backend-specific texture id
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Backend-specific texture id
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Opaque sound handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(u32);

/// Opaque font handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(u32);

/// Asset errors. They stay inside the loader, which logs them and falls back.
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset file is missing
    #[error("Asset not found: {0}")]
    NotFound(PathBuf),

    /// Asset file could not be decoded
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),
}

/// Resource loader consumed by scenes and text entities
pub trait ResourceLoader {
    /// Image by file name, optionally scaled to `size`
    fn get_image(&mut self, name: &str, size: Option<(u32, u32)>) -> TextureHandle;

    /// Sound by file name
    fn get_sound(&mut self, name: &str) -> Option<SoundHandle>;

    /// Font by file name (`None` = built-in default) at a point size
    fn get_font(&mut self, name: Option<&str>, size: u32) -> Option<FontHandle>;

    /// Rasterise `text`; a `None` font yields the text fallback texture
    fn render_text(&mut self, font: Option<FontHandle>, text: &str, color: Color) -> TextureHandle;

    /// Pixel size of a texture issued by this loader
    fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)>;
}

#[derive(Debug, Clone)]
struct TextureInfo {
    width: u32,
    height: u32,
}

#[derive(Debug, Clone)]
struct FontInfo {
    size: u32,
}

const FALLBACK_IMAGE_SIZE: (u32, u32) = (32, 32);
const FALLBACK_TEXT_SIZE: (u32, u32) = (50, 20);
const DEFAULT_FONT: &str = "<default>";

/// File-backed loader that caches every lookup by `(name, size)`, and
/// rendered text by `(font, content, color)`.
///
/// Image sizes are probed from the file header. Text textures are sized
/// from the font's point size. Pixel data stays with the platform backend.
#[derive(Debug)]
pub struct AssetCache {
    base_path: PathBuf,
    textures: Vec<TextureInfo>,
    images: HashMap<(String, Option<(u32, u32)>), TextureHandle>,
    sounds: HashMap<String, Option<SoundHandle>>,
    fonts: HashMap<(String, u32), Option<FontHandle>>,
    font_info: Vec<FontInfo>,
    texts: HashMap<(FontHandle, String, Color), TextureHandle>,
    next_sound: u32,
    fallback_image: TextureHandle,
    fallback_text: TextureHandle,
}

impl AssetCache {
    /// Create a cache rooted at `base_path`
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let mut cache = Self {
            base_path: base_path.into(),
            textures: Vec::new(),
            images: HashMap::new(),
            sounds: HashMap::new(),
            fonts: HashMap::new(),
            font_info: Vec::new(),
            texts: HashMap::new(),
            next_sound: 0,
            fallback_image: TextureHandle(0),
            fallback_text: TextureHandle(0),
        };
        cache.fallback_image = cache.new_texture(FALLBACK_IMAGE_SIZE);
        cache.fallback_text = cache.new_texture(FALLBACK_TEXT_SIZE);
        cache
    }

    /// Texture returned for images that fail to load
    pub fn fallback_image(&self) -> TextureHandle {
        self.fallback_image
    }

    /// Texture returned for text that cannot be rendered
    pub fn fallback_text(&self) -> TextureHandle {
        self.fallback_text
    }

    /// Number of textures issued, fallbacks included
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    fn path(&self, folder: &str, name: &str) -> PathBuf {
        self.base_path.join(folder).join(name)
    }

    fn new_texture(&mut self, (width, height): (u32, u32)) -> TextureHandle {
        let handle = TextureHandle(self.textures.len() as u32);
        self.textures.push(TextureInfo { width, height });
        handle
    }

    fn load_image(&mut self, name: &str, size: Option<(u32, u32)>) -> Result<TextureHandle, AssetError> {
        let path = self.path("images", name);
        log::info!("Loading image: {}", path.display());
        let native = probe_dimensions(&path)?;
        Ok(self.new_texture(size.unwrap_or(native)))
    }

    fn require_file(path: &Path) -> Result<(), AssetError> {
        if path.is_file() {
            Ok(())
        } else {
            Err(AssetError::NotFound(path.to_path_buf()))
        }
    }
}

impl ResourceLoader for AssetCache {
    fn get_image(&mut self, name: &str, size: Option<(u32, u32)>) -> TextureHandle {
        let key = (name.to_string(), size);
        if let Some(&handle) = self.images.get(&key) {
            return handle;
        }

        let handle = match self.load_image(name, size) {
            Ok(handle) => handle,
            Err(e) => {
                log::error!("Error loading image '{}': {}", name, e);
                self.fallback_image
            }
        };
        self.images.insert(key, handle);
        handle
    }

    fn get_sound(&mut self, name: &str) -> Option<SoundHandle> {
        if let Some(&cached) = self.sounds.get(name) {
            return cached;
        }

        let sound = match Self::require_file(&self.path("sounds", name)) {
            Ok(()) => {
                let handle = SoundHandle(self.next_sound);
                self.next_sound += 1;
                Some(handle)
            }
            Err(e) => {
                log::error!("Error loading sound '{}': {}", name, e);
                None
            }
        };
        self.sounds.insert(name.to_string(), sound);
        sound
    }

    fn get_font(&mut self, name: Option<&str>, size: u32) -> Option<FontHandle> {
        let key = (name.unwrap_or(DEFAULT_FONT).to_string(), size);
        if let Some(&cached) = self.fonts.get(&key) {
            return cached;
        }

        let available = match name {
            None => Ok(()),
            Some(file) => Self::require_file(&self.path("fonts", file)),
        };
        let font = match available {
            Ok(()) => {
                let handle = FontHandle(self.font_info.len() as u32);
                self.font_info.push(FontInfo { size });
                Some(handle)
            }
            Err(e) => {
                log::error!("Error loading font '{}' size {}: {}", key.0, size, e);
                None
            }
        };
        self.fonts.insert(key, font);
        font
    }

    fn render_text(&mut self, font: Option<FontHandle>, text: &str, color: Color) -> TextureHandle {
        let loaded = font.and_then(|f| self.font_info.get(f.0 as usize).map(|info| (f, info.size)));
        let Some((font, point_size)) = loaded else {
            log::error!("Font not loaded for text '{}'", text);
            return self.fallback_text;
        };
        let key = (font, text.to_string(), color);
        if let Some(&handle) = self.texts.get(&key) {
            return handle;
        }

        // Monospace estimate: glyphs are ~0.6 em wide
        let chars = text.chars().count() as u32;
        let width = (chars * point_size * 3).div_ceil(5).max(1);
        let handle = self.new_texture((width, point_size));
        self.texts.insert(key, handle);
        handle
    }

    fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)> {
        self.textures
            .get(texture.0 as usize)
            .map(|info| (info.width, info.height))
    }
}
