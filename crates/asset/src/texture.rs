//! Texture data and the image-loading collaborator.

use std::path::Path;

use crate::{
    error::{AssetError, Result},
    resolver::ResourceResolver,
};

/// Texture data in CPU-friendly format before GPU upload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// Supported texture formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextureFormat {
    #[default]
    Rgba8,
}

impl TextureData {
    /// A 0x0 texture, used when a model has no diffuse map.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a new texture with given dimensions and RGBA8 format.
    ///
    /// Returns `None` if `data` does not hold exactly `width * height` pixels.
    pub fn new_rgba8(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        (data.len() == expected).then_some(Self {
            data,
            width,
            height,
            format: TextureFormat::Rgba8,
        })
    }

    /// Decode an encoded image (PNG) into RGBA8.
    ///
    /// With `flip_vertical` the rows are reversed so row 0 is the bottom of
    /// the image, matching texture coordinates with a bottom-left origin.
    pub fn decode(bytes: &[u8], path: &Path, flip_vertical: bool) -> Result<Self> {
        let img = image::load_from_memory(bytes).map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let img = if flip_vertical { img.flipv() } else { img };

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let data = rgba.into_raw();

        log::info!(
            "Loaded texture {} {}x{} with {} bytes",
            path.display(),
            width,
            height,
            data.len()
        );

        Ok(Self {
            data,
            width,
            height,
            format: TextureFormat::Rgba8,
        })
    }

    /// Get the number of bytes per pixel for the format.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self.format {
            TextureFormat::Rgba8 => 4,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if the texture data is valid.
    pub fn is_valid(&self) -> bool {
        let expected_size =
            (self.width as usize) * (self.height as usize) * self.bytes_per_pixel() as usize;
        self.data.len() == expected_size && !self.is_empty()
    }

    /// RGBA of the pixel at (`x`, `y`) in stored row order.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Capability that turns a texture path into pixels.
///
/// With `flip_vertical` the returned rows start at the bottom of the image.
pub trait TextureSource {
    fn load_texture(&self, path: &str, flip_vertical: bool) -> Result<TextureData>;
}

impl<T: TextureSource + ?Sized> TextureSource for &T {
    fn load_texture(&self, path: &str, flip_vertical: bool) -> Result<TextureData> {
        (**self).load_texture(path, flip_vertical)
    }
}

/// Reads image bytes through a resolver and decodes them with `image`.
#[derive(Clone, Debug)]
pub struct ImageTextureSource<R> {
    resolver: R,
}

impl<R: ResourceResolver> ImageTextureSource<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }
}

impl<R: ResourceResolver> TextureSource for ImageTextureSource<R> {
    fn load_texture(&self, path: &str, flip_vertical: bool) -> Result<TextureData> {
        let path = Path::new(path);
        let bytes = self.resolver.read_bytes(path)?;
        TextureData::decode(&bytes, path, flip_vertical)
    }
}
