use crate::assets::bitmap::Bitmap;
use crate::assets::palette::Palette;
use crate::assets::store::AssetStore;
use crate::assets::tilemap::Tilemap;
use crate::assets::tileset::Tileset;
use crate::foundation::core::{PixelRect, Point, Rgb8};
use crate::foundation::math::wrap_coord;
use crate::render::frame::FrameBuffer;
use crate::scene::layer::{Layer, LayerContent};

/// Indexed pixel source a layer slot resolves to for one scanline.
///
/// Sampling is nearest-neighbor throughout; coordinates handed to `sample`
/// are already wrapped (orthogonal path) or bounds-checked (affine path).
enum Source<'a> {
    Tilemap {
        map: &'a Tilemap,
        tiles: &'a Tileset,
        palette: &'a Palette,
    },
    Bitmap {
        bitmap: &'a Bitmap,
        palette: &'a Palette,
    },
}

impl<'a> Source<'a> {
    fn resolve(layer: &Layer, assets: &'a AssetStore) -> Option<Self> {
        match layer.content()? {
            LayerContent::Tilemap(id) => {
                let map = assets.tilemap(id)?;
                let tiles = assets.tileset(map.tileset())?;
                let palette = assets.palette(tiles.palette())?;
                Some(Self::Tilemap {
                    map,
                    tiles,
                    palette,
                })
            }
            LayerContent::Bitmap(id) => {
                let bitmap = assets.bitmap(id)?;
                let palette = assets.palette(bitmap.palette())?;
                Some(Self::Bitmap { bitmap, palette })
            }
        }
    }

    /// Pixel extent of the source, used for wrap-around scrolling.
    fn extent(&self) -> (i64, i64) {
        match self {
            Self::Tilemap { map, tiles, .. } => {
                let (w, h) = map.pixel_extent(tiles);
                (i64::from(w), i64::from(h))
            }
            Self::Bitmap { bitmap, .. } => (i64::from(bitmap.width()), i64::from(bitmap.height())),
        }
    }

    /// Opaque color at `(sx, sy)`, or `None` for transparent/empty pixels.
    ///
    /// Coordinates must lie inside the extent. Tilemap sub-layers are probed
    /// topmost-first, so the first hit is the composited result; out-of-range
    /// tile indices read as empty, never as an error.
    fn sample(&self, sx: i64, sy: i64) -> Option<Rgb8> {
        match self {
            Self::Tilemap {
                map,
                tiles,
                palette,
            } => {
                let (tw, th) = (tiles.tile_width(), tiles.tile_height());
                let col = (sx as u32) / tw;
                let row = (sy as u32) / th;
                let in_x = (sx as u32) % tw;
                let in_y = (sy as u32) % th;
                for sub in (0..map.sublayers().len()).rev() {
                    let cell = match map.cell(sub, col, row) {
                        Some(c) => c,
                        None => continue,
                    };
                    let index = match cell.index {
                        Some(i) => usize::from(i),
                        None => continue,
                    };
                    let (mut px, mut py) = (in_x, in_y);
                    // Diagonal flip only makes sense for square tiles.
                    if cell.rotate && tw == th {
                        std::mem::swap(&mut px, &mut py);
                    }
                    if cell.flip_h {
                        px = tw - 1 - px;
                    }
                    if cell.flip_v {
                        py = th - 1 - py;
                    }
                    let idx = match tiles.tile_pixel(index, px, py) {
                        Some(i) => i,
                        None => continue,
                    };
                    if palette.is_transparent(idx) {
                        continue;
                    }
                    if let Some(color) = palette.color(idx) {
                        return Some(color);
                    }
                }
                None
            }
            Self::Bitmap { bitmap, palette } => {
                let idx = bitmap.pixel(sx as u32, sy as u32)?;
                if palette.is_transparent(idx) {
                    return None;
                }
                palette.color(idx)
            }
        }
    }
}

/// Blit one destination scanline of `layer` into the frame.
///
/// The orthogonal path wraps the scroll offset modulo the map extent; the
/// affine path inverse-maps each destination pixel about the layer pivot and
/// treats source-exterior pixels as transparent. Transparent pixels leave the
/// accumulated frame untouched, so lower layers (or the background color)
/// show through.
pub(crate) fn blit_layer_line(layer: &Layer, assets: &AssetStore, y: u32, frame: &mut FrameBuffer) {
    if !layer.enabled() {
        return;
    }
    let source = match Source::resolve(layer, assets) {
        Some(s) => s,
        None => return,
    };
    let screen = PixelRect::new(0, 0, frame.width() as i32, frame.height() as i32);
    let clip = layer.clip().map_or(screen, |c| c.intersect(screen));
    let line = y as i32;
    if clip.is_empty() || line < clip.y0 || line >= clip.y1 {
        return;
    }

    let (src_w, src_h) = source.extent();
    let blend = layer.blend();
    let transform = layer.transform();

    if transform.is_identity() {
        let scroll_x = layer.scroll().x.floor() as i64;
        let scroll_y = layer.scroll().y.floor() as i64;
        let sy = wrap_coord(i64::from(y) + scroll_y, src_h);
        for x in clip.x0..clip.x1 {
            let sx = wrap_coord(i64::from(x) + scroll_x, src_w);
            if let Some(color) = source.sample(sx, sy) {
                frame.put(x as u32, y, color, blend);
            }
        }
        return;
    }

    if transform.scale.x == 0.0 || transform.scale.y == 0.0 {
        return;
    }
    let pivot = transform.pivot.to_vec2();
    let forward = kurbo::Affine::translate(pivot)
        * kurbo::Affine::rotate(transform.angle_rad)
        * kurbo::Affine::scale_non_uniform(transform.scale.x, transform.scale.y)
        * kurbo::Affine::translate(-pivot);
    let inverse = forward.inverse();
    let scroll = layer.scroll();
    for x in clip.x0..clip.x1 {
        let dest = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        let src = inverse * dest;
        let sx = (src.x + scroll.x).floor() as i64;
        let sy = (src.y + scroll.y).floor() as i64;
        if sx < 0 || sy < 0 || sx >= src_w || sy >= src_h {
            continue;
        }
        if let Some(color) = source.sample(sx, sy) {
            frame.put(x as u32, y, color, blend);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layer.rs"]
mod tests;
