use super::*;
use crate::assets::palette::Palette;
use crate::assets::spriteset::{Picture, Spriteset};
use crate::foundation::core::{FrameSize, Rgb8};
use crate::scene::sprite::SpriteFlags;

const RED: Rgb8 = Rgb8::new(255, 0, 0);
const BLACK: Rgb8 = Rgb8::new(0, 0, 0);

/// Store with a 4x2 atlas: picture 0 ("square") fully opaque, picture 1
/// ("dot") opaque only at its top-left pixel.
fn sprite_store() -> AssetStore {
    let mut store = AssetStore::new();
    let pal = store
        .insert_palette(Palette::new(vec![BLACK, RED]).unwrap())
        .unwrap();
    let atlas = vec![
        1, 1, 1, 0, //
        1, 1, 0, 0,
    ];
    let set = Spriteset::new(
        4,
        2,
        atlas,
        vec![
            Picture {
                name: "square".to_string(),
                rect: PixelRect::from_origin_size(0, 0, 2, 2),
            },
            Picture {
                name: "dot".to_string(),
                rect: PixelRect::from_origin_size(2, 0, 2, 2),
            },
        ],
        pal,
    )
    .unwrap();
    store.insert_spriteset(set).unwrap();
    store
}

fn sprite(picture: u32) -> Sprite {
    let mut s = Sprite::default();
    s.bind(crate::assets::store::SpritesetId(0), picture);
    s
}

fn frame(w: u32, h: u32) -> FrameBuffer {
    let mut fb = FrameBuffer::new(
        FrameSize {
            width: w,
            height: h,
        },
        4 * w as usize,
    )
    .unwrap();
    fb.clear(BLACK);
    fb
}

fn red_pixels(fb: &FrameBuffer) -> Vec<(u32, u32)> {
    let mut out = Vec::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            if fb.pixel(x, y) == RED {
                out.push((x, y));
            }
        }
    }
    out
}

#[test]
fn plain_blit_places_origin_at_position() {
    let store = sprite_store();
    let mut fb = frame(4, 4);
    let mut s = sprite(0);
    s.set_position(Point::new(1.0, 1.0));
    blit_sprite(0, &s, &store, &mut fb);
    assert_eq!(red_pixels(&fb), vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
}

#[test]
fn pivot_fraction_anchors_the_bounding_box() {
    let store = sprite_store();
    let mut fb = frame(4, 4);
    let mut s = sprite(0);
    s.set_pivot(Vec2::new(0.5, 0.5));
    s.set_position(Point::new(2.0, 2.0));
    blit_sprite(0, &s, &store, &mut fb);
    assert_eq!(red_pixels(&fb), vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
}

#[test]
fn transparent_source_pixels_are_skipped() {
    let store = sprite_store();
    let mut fb = frame(2, 2);
    let s = sprite(1);
    blit_sprite(0, &s, &store, &mut fb);
    assert_eq!(red_pixels(&fb), vec![(0, 0)]);
}

#[test]
fn flips_mirror_the_picture() {
    let store = sprite_store();
    let mut fb = frame(2, 2);
    let mut s = sprite(1);
    s.set_flags(SpriteFlags {
        flip_h: true,
        flip_v: true,
        ..SpriteFlags::default()
    });
    blit_sprite(0, &s, &store, &mut fb);
    assert_eq!(red_pixels(&fb), vec![(1, 1)]);
}

#[test]
fn scale_selects_the_affine_path_and_doubles_extent() {
    let store = sprite_store();
    let mut fb = frame(4, 4);
    let mut s = sprite(0);
    s.set_scale(Vec2::new(2.0, 2.0));
    assert_eq!(s.blit_mode(), SpriteBlit::Affine);
    blit_sprite(0, &s, &store, &mut fb);
    assert_eq!(red_pixels(&fb).len(), 16);
}

#[test]
fn rotation_is_gated_by_the_rotate_flag() {
    let store = sprite_store();
    let mut s = sprite(0);
    s.set_angle_rad(std::f64::consts::FRAC_PI_4);
    assert_eq!(s.blit_mode(), SpriteBlit::Plain);

    s.set_flags(SpriteFlags {
        rotate: true,
        ..SpriteFlags::default()
    });
    assert_eq!(s.blit_mode(), SpriteBlit::Affine);

    // a quarter turn of the opaque square about its center covers the same box
    let mut fb = frame(4, 4);
    s.set_angle_rad(std::f64::consts::FRAC_PI_2);
    s.set_pivot(Vec2::new(0.5, 0.5));
    s.set_position(Point::new(2.0, 2.0));
    blit_sprite(0, &s, &store, &mut fb);
    assert_eq!(red_pixels(&fb), vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
}

#[test]
fn disabled_sprite_draws_nothing_and_has_no_coverage() {
    let store = sprite_store();
    let mut fb = frame(4, 4);
    let mut s = sprite(0);
    s.set_flags(SpriteFlags {
        collision: true,
        ..SpriteFlags::default()
    });
    s.set_enabled(false);
    assert!(blit_sprite(0, &s, &store, &mut fb).is_none());
    assert!(red_pixels(&fb).is_empty());
}

#[test]
fn coverage_is_returned_only_with_collision_enabled() {
    let store = sprite_store();
    let mut fb = frame(4, 4);
    let s = sprite(0);
    assert!(blit_sprite(0, &s, &store, &mut fb).is_none());

    let mut fb = frame(4, 4);
    let mut s = sprite(1);
    s.set_flags(SpriteFlags {
        collision: true,
        ..SpriteFlags::default()
    });
    let cov = blit_sprite(3, &s, &store, &mut fb).expect("coverage");
    assert_eq!(cov.slot(), 3);
    // only the opaque pixel registers
    assert!(cov.test(0, 0));
    assert!(!cov.test(1, 0));
    assert!(!cov.test(1, 1));
}

#[test]
fn offscreen_pixels_are_clipped() {
    let store = sprite_store();
    let mut fb = frame(2, 2);
    let mut s = sprite(0);
    s.set_position(Point::new(1.0, 1.0));
    blit_sprite(0, &s, &store, &mut fb);
    assert_eq!(red_pixels(&fb), vec![(1, 1)]);
}

#[test]
fn transformed_bounds_cover_rotated_corners() {
    let forward = kurbo::Affine::rotate(std::f64::consts::FRAC_PI_4);
    let bounds = transformed_bounds(forward, 10, 10);
    // a 45-degree rotation spans roughly 10*sqrt(2) pixels plus slack
    assert!(bounds.width() >= 14);
    assert!(bounds.height() >= 14);
}
