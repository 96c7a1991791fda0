use crate::assets::store::AssetStore;
use crate::foundation::core::{PixelRect, Point, Vec2};
use crate::render::collision::SpriteCoverage;
use crate::render::frame::FrameBuffer;
use crate::scene::sprite::{Sprite, SpriteBlit};

/// Blit one enabled sprite into the frame.
///
/// The pivot point of the (transformed) bounding box lands on the sprite
/// position. Transparent source pixels write nothing and register no
/// collision coverage. Returns the per-pixel destination coverage when the
/// sprite has collision enabled, `None` otherwise.
pub(crate) fn blit_sprite(
    slot: usize,
    sprite: &Sprite,
    assets: &AssetStore,
    frame: &mut FrameBuffer,
) -> Option<SpriteCoverage> {
    if !sprite.enabled() {
        return None;
    }
    let set = assets.spriteset(sprite.spriteset()?)?;
    let picture = sprite.picture() as usize;
    let rect = set.picture(picture)?.rect;
    let palette = assets.palette(set.palette())?;
    let (w, h) = (rect.width(), rect.height());
    let flags = sprite.flags();
    let screen = PixelRect::new(0, 0, frame.width() as i32, frame.height() as i32);
    let blend = sprite.blend();

    let mut coverage: Option<SpriteCoverage> = None;

    match sprite.blit_mode() {
        SpriteBlit::Plain => {
            let origin_x = (sprite.position().x - sprite.pivot().x * f64::from(w)).floor() as i32;
            let origin_y = (sprite.position().y - sprite.pivot().y * f64::from(h)).floor() as i32;
            let dest = PixelRect::from_origin_size(origin_x, origin_y, w, h).intersect(screen);
            if flags.collision {
                coverage = Some(SpriteCoverage::new(slot, dest));
            }
            for y in dest.y0..dest.y1 {
                for x in dest.x0..dest.x1 {
                    let idx = match set.picture_pixel(
                        picture,
                        x - origin_x,
                        y - origin_y,
                        flags.flip_h,
                        flags.flip_v,
                    ) {
                        Some(i) => i,
                        None => continue,
                    };
                    if palette.is_transparent(idx) {
                        continue;
                    }
                    if let Some(color) = palette.color(idx) {
                        frame.put(x as u32, y as u32, color, blend);
                        if let Some(cov) = coverage.as_mut() {
                            cov.mark(x, y);
                        }
                    }
                }
            }
        }
        SpriteBlit::Affine => {
            let scale = sprite.scale();
            if scale.x == 0.0 || scale.y == 0.0 {
                // Degenerate scale draws nothing; an empty coverage keeps the
                // collision pass consistent.
                if flags.collision {
                    coverage = Some(SpriteCoverage::new(slot, PixelRect::new(0, 0, 0, 0)));
                }
                return coverage;
            }
            let pivot_px = Vec2::new(
                sprite.pivot().x * f64::from(w),
                sprite.pivot().y * f64::from(h),
            );
            let forward = kurbo::Affine::translate(sprite.position().to_vec2())
                * kurbo::Affine::rotate(sprite.effective_angle())
                * kurbo::Affine::scale_non_uniform(scale.x, scale.y)
                * kurbo::Affine::translate(-pivot_px);
            let inverse = forward.inverse();

            let dest = transformed_bounds(forward, w, h).intersect(screen);
            if flags.collision {
                coverage = Some(SpriteCoverage::new(slot, dest));
            }
            for y in dest.y0..dest.y1 {
                for x in dest.x0..dest.x1 {
                    let src = inverse * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                    let (sx, sy) = (src.x.floor() as i32, src.y.floor() as i32);
                    let idx =
                        match set.picture_pixel(picture, sx, sy, flags.flip_h, flags.flip_v) {
                            Some(i) => i,
                            None => continue,
                        };
                    if palette.is_transparent(idx) {
                        continue;
                    }
                    if let Some(color) = palette.color(idx) {
                        frame.put(x as u32, y as u32, color, blend);
                        if let Some(cov) = coverage.as_mut() {
                            cov.mark(x, y);
                        }
                    }
                }
            }
        }
    }

    coverage
}

/// Axis-aligned bounds of the transformed `w`x`h` picture rectangle.
///
/// Bounds the destination pixel scan of the affine path; half a pixel of
/// slack on each side covers nearest-neighbor rounding at steep angles.
fn transformed_bounds(forward: kurbo::Affine, w: i32, h: i32) -> PixelRect {
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(f64::from(w), 0.0),
        Point::new(0.0, f64::from(h)),
        Point::new(f64::from(w), f64::from(h)),
    ];
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for c in corners {
        let p = forward * c;
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    PixelRect::new(
        (min_x - 0.5).floor() as i32,
        (min_y - 0.5).floor() as i32,
        (max_x + 0.5).ceil() as i32,
        (max_y + 0.5).ceil() as i32,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/sprite.rs"]
mod tests;
