//! Rastile is a software 2D tile-and-sprite frame compositor for retro-style
//! games.
//!
//! Every frame, an [`Engine`] composites any number of scrollable and
//! transformable tile layers plus a pool of independently animated sprites
//! into a fixed-size RGBA8 framebuffer, and answers exact per-pixel collision
//! queries between sprites, all on the CPU, bit-exact under any combination
//! of scroll, scaling, rotation and transparency.
//!
//! # Frame pipeline
//!
//! 1. **Animate**: advance palette cycles and sequence players to the
//!    requested [`FrameIndex`]
//! 2. **Layers**: blit enabled layers back-to-front by slot index, one
//!    scanline at a time (the raster callback runs before each line)
//! 3. **Sprites**: blit enabled sprites in increasing slot order, recording
//!    per-pixel collision coverage
//! 4. **Collide**: broad-phase AABB filtering, then exact opaque-pixel
//!    overlap for the surviving pairs
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Explicit context**: all state lives in the [`Engine`] value; any
//!   number of independent engines coexist in one process.
//! - **No IO**: loaders hand the engine already-validated in-memory assets;
//!   the compositor never touches a file.
//! - **Never abort mid-frame**: malformed per-frame input is normalized
//!   (wrapped angles, clamped pivots) and broken bindings render as empty.
//! - **Nearest-neighbor sampling** for scaled/rotated content, preserving
//!   hard retro pixel edges.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod assets;
mod engine;
mod foundation;
mod render;
mod scene;

pub use animation::cycle::{CycleDirection, PaletteCycle};
pub use animation::player::{PlayState, SequencePlayer};
pub use animation::sequence::{Sequence, SequencePack, SequenceStep, StepValue};
pub use assets::bitmap::Bitmap;
pub use assets::palette::{PALETTE_MAX_ENTRIES, Palette};
pub use assets::spriteset::{Picture, Spriteset};
pub use assets::store::{AssetStore, BitmapId, PaletteId, SpritesetId, TilemapId, TilesetId};
pub use assets::tilemap::{TileCell, Tilemap, TilemapSubLayer};
pub use assets::tileset::Tileset;
pub use engine::{Engine, EngineConfig, RasterLine};
pub use foundation::core::{
    Affine, FrameIndex, FrameSize, Fps, PixelRect, Point, Rect, Rgb8, Vec2,
};
pub use foundation::error::{RastileError, RastileResult};
pub use render::collision::CollisionReport;
pub use render::frame::{Blend, FrameBuffer};
pub use scene::layer::{Layer, LayerContent, LayerTransform};
pub use scene::sprite::{Sprite, SpriteFlags};
