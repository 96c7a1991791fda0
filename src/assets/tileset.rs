use crate::assets::store::PaletteId;
use crate::foundation::error::{RastileError, RastileResult};

/// Indexed collection of fixed-size tile images sharing one palette.
///
/// Tile pixels are 8-bit palette indices, stored tile-major in row-major
/// order. Each tile carries one type/flags byte for game-side queries (solid,
/// ladder, hazard, ...); the compositor never interprets it. Immutable after
/// creation except for palette swaps.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tileset {
    tile_width: u32,
    tile_height: u32,
    pixels: Vec<u8>,
    types: Vec<u8>,
    palette: PaletteId,
}

impl Tileset {
    /// Build a tileset from tile-major pixel data.
    ///
    /// `pixels.len()` must be a whole multiple of `tile_width * tile_height`;
    /// `types` must carry one byte per tile.
    pub fn new(
        tile_width: u32,
        tile_height: u32,
        pixels: Vec<u8>,
        types: Vec<u8>,
        palette: PaletteId,
    ) -> RastileResult<Self> {
        if tile_width == 0 || tile_height == 0 {
            return Err(RastileError::validation("tile dimensions must be > 0"));
        }
        let tile_px = (tile_width as usize)
            .checked_mul(tile_height as usize)
            .ok_or_else(|| RastileError::validation("tile dimensions overflow"))?;
        if pixels.is_empty() || !pixels.len().is_multiple_of(tile_px) {
            return Err(RastileError::validation(
                "tileset pixel data is not a whole number of tiles",
            ));
        }
        let tile_count = pixels.len() / tile_px;
        if types.len() != tile_count {
            return Err(RastileError::validation(format!(
                "tileset has {tile_count} tiles but {} type bytes",
                types.len()
            )));
        }
        Ok(Self {
            tile_width,
            tile_height,
            pixels,
            types,
            palette,
        })
    }

    /// Tile width in pixels.
    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// Tile height in pixels.
    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Number of tiles.
    pub fn tile_count(&self) -> usize {
        self.types.len()
    }

    /// Backing palette id.
    pub fn palette(&self) -> PaletteId {
        self.palette
    }

    /// Swap the backing palette. The only mutation a tileset allows.
    pub fn set_palette(&mut self, palette: PaletteId) {
        self.palette = palette;
    }

    /// Type/flags byte of `tile`, or `None` when out of range.
    pub fn tile_type(&self, tile: usize) -> Option<u8> {
        self.types.get(tile).copied()
    }

    /// Palette index of pixel `(x, y)` inside `tile`.
    ///
    /// Returns `None` when the tile index or coordinates are out of range;
    /// callers treat that as an empty (transparent) pixel.
    pub fn tile_pixel(&self, tile: usize, x: u32, y: u32) -> Option<u8> {
        if tile >= self.tile_count() || x >= self.tile_width || y >= self.tile_height {
            return None;
        }
        let tile_px = (self.tile_width * self.tile_height) as usize;
        let offset = tile * tile_px + (y * self.tile_width + x) as usize;
        self.pixels.get(offset).copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/tileset.rs"]
mod tests;
