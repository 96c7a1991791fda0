use crate::assets::store::PaletteId;
use crate::foundation::core::PixelRect;
use crate::foundation::error::{RastileError, RastileResult};

/// One named picture: a source rectangle into the spriteset atlas.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Picture {
    /// Authoring name, unique within the spriteset.
    pub name: String,
    /// Source rectangle in atlas pixel coordinates.
    pub rect: PixelRect,
}

/// Shared palette-indexed atlas plus an array of named picture rectangles.
///
/// Every rectangle is validated against the atlas extent at construction.
/// Immutable after creation except for palette swaps.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Spriteset {
    atlas_width: u32,
    atlas_height: u32,
    atlas: Vec<u8>,
    pictures: Vec<Picture>,
    palette: PaletteId,
}

impl Spriteset {
    /// Build a spriteset from a row-major indexed atlas and picture table.
    pub fn new(
        atlas_width: u32,
        atlas_height: u32,
        atlas: Vec<u8>,
        pictures: Vec<Picture>,
        palette: PaletteId,
    ) -> RastileResult<Self> {
        let expected = (atlas_width as usize)
            .checked_mul(atlas_height as usize)
            .ok_or_else(|| RastileError::validation("atlas dimensions overflow"))?;
        if atlas.len() != expected {
            return Err(RastileError::validation(format!(
                "atlas is {atlas_width}x{atlas_height} but holds {} bytes",
                atlas.len()
            )));
        }
        if pictures.is_empty() {
            return Err(RastileError::validation(
                "spriteset needs at least one picture",
            ));
        }
        let extent = PixelRect::new(0, 0, atlas_width as i32, atlas_height as i32);
        for pic in &pictures {
            if pic.rect.is_empty() || pic.rect.intersect(extent) != pic.rect {
                return Err(RastileError::validation(format!(
                    "picture '{}' does not fit the atlas extent",
                    pic.name
                )));
            }
        }
        Ok(Self {
            atlas_width,
            atlas_height,
            atlas,
            pictures,
            palette,
        })
    }

    /// Number of pictures.
    pub fn picture_count(&self) -> usize {
        self.pictures.len()
    }

    /// Picture metadata by index.
    pub fn picture(&self, index: usize) -> Option<&Picture> {
        self.pictures.get(index)
    }

    /// Picture index by authoring name.
    pub fn picture_index(&self, name: &str) -> Option<usize> {
        self.pictures.iter().position(|p| p.name == name)
    }

    /// Backing palette id.
    pub fn palette(&self) -> PaletteId {
        self.palette
    }

    /// Swap the backing palette.
    pub fn set_palette(&mut self, palette: PaletteId) {
        self.palette = palette;
    }

    /// Palette index of pixel `(x, y)` inside picture `index`.
    ///
    /// Coordinates are picture-local; flips mirror them inside the picture
    /// rectangle before the atlas fetch. Out-of-range lookups return `None`
    /// and render as transparent.
    pub fn picture_pixel(
        &self,
        index: usize,
        x: i32,
        y: i32,
        flip_h: bool,
        flip_v: bool,
    ) -> Option<u8> {
        let rect = self.pictures.get(index)?.rect;
        let (w, h) = (rect.width(), rect.height());
        if x < 0 || y < 0 || x >= w || y >= h {
            return None;
        }
        let sx = if flip_h { w - 1 - x } else { x };
        let sy = if flip_v { h - 1 - y } else { y };
        let ax = (rect.x0 + sx) as usize;
        let ay = (rect.y0 + sy) as usize;
        self.atlas.get(ay * self.atlas_width as usize + ax).copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/spriteset.rs"]
mod tests;
