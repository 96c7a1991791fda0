use crate::assets::bitmap::Bitmap;
use crate::assets::palette::Palette;
use crate::assets::spriteset::Spriteset;
use crate::assets::tilemap::Tilemap;
use crate::assets::tileset::Tileset;
use crate::foundation::error::{RastileError, RastileResult};

macro_rules! asset_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Clone,
            Copy,
            Debug,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(pub(crate) u32);

        impl $name {
            /// Raw arena index, stable for the lifetime of the store.
            pub fn as_u32(self) -> u32 {
                self.0
            }
        }
    };
}

asset_id!(
    /// Stable handle to a [`Palette`] in the asset store.
    PaletteId
);
asset_id!(
    /// Stable handle to a [`Tileset`] in the asset store.
    TilesetId
);
asset_id!(
    /// Stable handle to a [`Tilemap`] in the asset store.
    TilemapId
);
asset_id!(
    /// Stable handle to a [`Spriteset`] in the asset store.
    SpritesetId
);
asset_id!(
    /// Stable handle to a [`Bitmap`] in the asset store.
    BitmapId
);

/// Id-keyed arenas for every asset kind the compositor consumes.
///
/// Assets are inserted once (already validated in-memory structures handed
/// over by loader collaborators) and addressed by stable ids thereafter.
/// Shared palettes are expressed as ids, so destroying nothing and dangling
/// nothing: an id stays valid for the lifetime of the store. Cross-references
/// (tileset to palette, tilemap to tileset) are checked at insertion.
#[derive(Clone, Debug, Default)]
pub struct AssetStore {
    palettes: Vec<Palette>,
    tilesets: Vec<Tileset>,
    tilemaps: Vec<Tilemap>,
    spritesets: Vec<Spriteset>,
    bitmaps: Vec<Bitmap>,
}

impl AssetStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(len: usize, kind: &str) -> RastileResult<u32> {
        u32::try_from(len).map_err(|_| RastileError::validation(format!("{kind} arena is full")))
    }

    /// Insert a palette, returning its stable id.
    pub fn insert_palette(&mut self, palette: Palette) -> RastileResult<PaletteId> {
        let id = PaletteId(Self::next_id(self.palettes.len(), "palette")?);
        self.palettes.push(palette);
        Ok(id)
    }

    /// Insert a tileset; its palette id must already resolve.
    pub fn insert_tileset(&mut self, tileset: Tileset) -> RastileResult<TilesetId> {
        if self.palette(tileset.palette()).is_none() {
            return Err(RastileError::config(
                "tileset references an unknown palette",
            ));
        }
        let id = TilesetId(Self::next_id(self.tilesets.len(), "tileset")?);
        self.tilesets.push(tileset);
        Ok(id)
    }

    /// Insert a tilemap; its tileset id must already resolve.
    pub fn insert_tilemap(&mut self, tilemap: Tilemap) -> RastileResult<TilemapId> {
        if self.tileset(tilemap.tileset()).is_none() {
            return Err(RastileError::config(
                "tilemap references an unknown tileset",
            ));
        }
        let id = TilemapId(Self::next_id(self.tilemaps.len(), "tilemap")?);
        self.tilemaps.push(tilemap);
        Ok(id)
    }

    /// Insert a spriteset; its palette id must already resolve.
    pub fn insert_spriteset(&mut self, spriteset: Spriteset) -> RastileResult<SpritesetId> {
        if self.palette(spriteset.palette()).is_none() {
            return Err(RastileError::config(
                "spriteset references an unknown palette",
            ));
        }
        let id = SpritesetId(Self::next_id(self.spritesets.len(), "spriteset")?);
        self.spritesets.push(spriteset);
        Ok(id)
    }

    /// Insert a bitmap; its palette id must already resolve.
    pub fn insert_bitmap(&mut self, bitmap: Bitmap) -> RastileResult<BitmapId> {
        if self.palette(bitmap.palette()).is_none() {
            return Err(RastileError::config("bitmap references an unknown palette"));
        }
        let id = BitmapId(Self::next_id(self.bitmaps.len(), "bitmap")?);
        self.bitmaps.push(bitmap);
        Ok(id)
    }

    /// Palette by id.
    pub fn palette(&self, id: PaletteId) -> Option<&Palette> {
        self.palettes.get(id.0 as usize)
    }

    /// Mutable palette access (color swaps, cycling, raster effects).
    pub fn palette_mut(&mut self, id: PaletteId) -> Option<&mut Palette> {
        self.palettes.get_mut(id.0 as usize)
    }

    /// Tileset by id.
    pub fn tileset(&self, id: TilesetId) -> Option<&Tileset> {
        self.tilesets.get(id.0 as usize)
    }

    /// Mutable tileset access (palette swap).
    pub fn tileset_mut(&mut self, id: TilesetId) -> Option<&mut Tileset> {
        self.tilesets.get_mut(id.0 as usize)
    }

    /// Tilemap by id.
    pub fn tilemap(&self, id: TilemapId) -> Option<&Tilemap> {
        self.tilemaps.get(id.0 as usize)
    }

    /// Spriteset by id.
    pub fn spriteset(&self, id: SpritesetId) -> Option<&Spriteset> {
        self.spritesets.get(id.0 as usize)
    }

    /// Mutable spriteset access (palette swap).
    pub fn spriteset_mut(&mut self, id: SpritesetId) -> Option<&mut Spriteset> {
        self.spritesets.get_mut(id.0 as usize)
    }

    /// Bitmap by id.
    pub fn bitmap(&self, id: BitmapId) -> Option<&Bitmap> {
        self.bitmaps.get(id.0 as usize)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
