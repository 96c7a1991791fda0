use crate::assets::store::PaletteId;
use crate::foundation::error::{RastileError, RastileResult};

/// Flat palette-indexed image, the alternative layer content source.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    palette: PaletteId,
}

impl Bitmap {
    /// Build a bitmap from row-major indexed pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>, palette: PaletteId) -> RastileResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| RastileError::validation("bitmap dimensions overflow"))?;
        if expected == 0 || pixels.len() != expected {
            return Err(RastileError::validation(format!(
                "bitmap is {width}x{height} but holds {} bytes",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
            palette,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Backing palette id.
    pub fn palette(&self) -> PaletteId {
        self.palette
    }

    /// Swap the backing palette.
    pub fn set_palette(&mut self, palette: PaletteId) {
        self.palette = palette;
    }

    /// Palette index at `(x, y)`, or `None` outside the extent.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }
}
