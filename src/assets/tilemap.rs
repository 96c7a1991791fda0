use crate::assets::store::TilesetId;
use crate::assets::tileset::Tileset;
use crate::foundation::error::{RastileError, RastileResult};

/// One grid cell of a tilemap sub-layer.
///
/// `index: None` is the empty cell; out-of-range indices are also rendered as
/// empty, never treated as fatal. `rotate` transposes the tile a quarter turn
/// before the flips apply, matching the diagonal-flip convention of TMX-style
/// editors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TileCell {
    /// Tile index into the referenced tileset, or `None` for empty.
    pub index: Option<u16>,
    /// Mirror the tile horizontally.
    #[serde(default)]
    pub flip_h: bool,
    /// Mirror the tile vertically.
    #[serde(default)]
    pub flip_v: bool,
    /// Transpose the tile (diagonal flip).
    #[serde(default)]
    pub rotate: bool,
}

impl TileCell {
    /// Cell showing `index` with no flips.
    pub fn tile(index: u16) -> Self {
        Self {
            index: Some(index),
            ..Self::default()
        }
    }

    /// The empty cell.
    pub const EMPTY: Self = Self {
        index: None,
        flip_h: false,
        flip_v: false,
        rotate: false,
    };
}

/// One named cell grid inside a tilemap, drawn in pack order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TilemapSubLayer {
    /// Authoring name ("background", "objects", ...).
    pub name: String,
    /// Row-major cells, `cols * rows` of them.
    pub cells: Vec<TileCell>,
}

/// Fixed-size 2D grid of tile references organized in named sub-layers.
///
/// All sub-layers share the grid dimensions and the referenced tileset.
/// Sub-layers composite into their layer slot in storage order, first at the
/// bottom. Immutable after creation; queried per cell at render time.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tilemap {
    cols: u32,
    rows: u32,
    sublayers: Vec<TilemapSubLayer>,
    tileset: TilesetId,
}

impl Tilemap {
    /// Build a tilemap from one or more equally sized sub-layers.
    pub fn new(
        cols: u32,
        rows: u32,
        sublayers: Vec<TilemapSubLayer>,
        tileset: TilesetId,
    ) -> RastileResult<Self> {
        if cols == 0 || rows == 0 {
            return Err(RastileError::validation("tilemap dimensions must be > 0"));
        }
        if sublayers.is_empty() {
            return Err(RastileError::validation(
                "tilemap needs at least one sub-layer",
            ));
        }
        let cells = (cols as usize)
            .checked_mul(rows as usize)
            .ok_or_else(|| RastileError::validation("tilemap dimensions overflow"))?;
        for sub in &sublayers {
            if sub.cells.len() != cells {
                return Err(RastileError::validation(format!(
                    "sub-layer '{}' has {} cells, expected {cells}",
                    sub.name,
                    sub.cells.len()
                )));
            }
        }
        Ok(Self {
            cols,
            rows,
            sublayers,
            tileset,
        })
    }

    /// Single-sub-layer convenience constructor.
    pub fn single(
        cols: u32,
        rows: u32,
        cells: Vec<TileCell>,
        tileset: TilesetId,
    ) -> RastileResult<Self> {
        Self::new(
            cols,
            rows,
            vec![TilemapSubLayer {
                name: "main".to_string(),
                cells,
            }],
            tileset,
        )
    }

    /// Grid width in cells.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Grid height in cells.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Referenced tileset id.
    pub fn tileset(&self) -> TilesetId {
        self.tileset
    }

    /// Sub-layers in draw order.
    pub fn sublayers(&self) -> &[TilemapSubLayer] {
        &self.sublayers
    }

    /// Pixel extent of the map under `tileset`'s tile dimensions.
    pub fn pixel_extent(&self, tileset: &Tileset) -> (u32, u32) {
        (
            self.cols * tileset.tile_width(),
            self.rows * tileset.tile_height(),
        )
    }

    /// Cell at `(col, row)` of `sublayer`, or `None` when out of range.
    pub fn cell(&self, sublayer: usize, col: u32, row: u32) -> Option<TileCell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        let sub = self.sublayers.get(sublayer)?;
        sub.cells.get((row * self.cols + col) as usize).copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/tilemap.rs"]
mod tests;
