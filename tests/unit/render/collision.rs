use super::*;

/// Coverage with every pixel of its rectangle set.
fn solid(slot: usize, rect: PixelRect) -> SpriteCoverage {
    let mut cov = SpriteCoverage::new(slot, rect);
    for y in rect.y0..rect.y1 {
        for x in rect.x0..rect.x1 {
            cov.mark(x, y);
        }
    }
    cov
}

#[test]
fn coverage_bits_are_per_pixel() {
    let mut cov = SpriteCoverage::new(0, PixelRect::new(10, 10, 80, 12));
    cov.mark(10, 10);
    cov.mark(79, 11);
    assert!(cov.test(10, 10));
    assert!(cov.test(79, 11));
    assert!(!cov.test(11, 10));
    assert!(!cov.test(9, 10));
    assert!(!cov.test(10, 12));
}

#[test]
fn overlapping_solid_squares_collide() {
    // the 16x16 squares at (0,0) and (8,8): an 8x8 overlap region
    let a = solid(0, PixelRect::from_origin_size(0, 0, 16, 16));
    let b = solid(1, PixelRect::from_origin_size(8, 8, 16, 16));
    let report = CollisionReport::compute(&[a, b]);
    assert!(report.collides(0, 1));
    assert!(report.collides(1, 0));
    assert!(report.sprite_collided(0));
    assert_eq!(report.pairs().collect::<Vec<_>>(), vec![(0, 1)]);
}

#[test]
fn touching_edges_do_not_collide() {
    // at (0,0) and (16,16) the boxes share zero pixels
    let a = solid(0, PixelRect::from_origin_size(0, 0, 16, 16));
    let b = solid(1, PixelRect::from_origin_size(16, 16, 16, 16));
    let report = CollisionReport::compute(&[a, b]);
    assert!(!report.collides(0, 1));
    assert!(report.is_empty());
}

#[test]
fn aabb_overlap_without_pixel_overlap_is_no_collision() {
    // boxes overlap but the set pixels are disjoint corners
    let mut a = SpriteCoverage::new(0, PixelRect::from_origin_size(0, 0, 4, 4));
    a.mark(0, 0);
    let mut b = SpriteCoverage::new(1, PixelRect::from_origin_size(2, 2, 4, 4));
    b.mark(5, 5);
    let report = CollisionReport::compute(&[a, b]);
    assert!(!report.collides(0, 1));
}

#[test]
fn identical_opaque_sprites_always_collide() {
    let a = solid(2, PixelRect::from_origin_size(5, 5, 8, 8));
    let b = solid(7, PixelRect::from_origin_size(5, 5, 8, 8));
    let report = CollisionReport::compute(&[a, b]);
    assert!(report.collides(7, 2));
}

#[test]
fn all_pairs_are_considered() {
    let a = solid(0, PixelRect::from_origin_size(0, 0, 4, 4));
    let b = solid(1, PixelRect::from_origin_size(2, 0, 4, 4));
    let c = solid(2, PixelRect::from_origin_size(100, 0, 4, 4));
    let report = CollisionReport::compute(&[a, b, c]);
    assert!(report.collides(0, 1));
    assert!(!report.collides(0, 2));
    assert!(!report.collides(1, 2));
    assert!(!report.sprite_collided(2));
}

#[test]
fn self_collision_is_never_reported() {
    let a = solid(0, PixelRect::from_origin_size(0, 0, 4, 4));
    let report = CollisionReport::compute(&[a]);
    assert!(!report.collides(0, 0));
    assert!(!report.sprite_collided(0));
}

#[test]
fn empty_coverage_rectangles_never_collide() {
    let a = SpriteCoverage::new(0, PixelRect::new(0, 0, 0, 0));
    let b = solid(1, PixelRect::from_origin_size(0, 0, 4, 4));
    let report = CollisionReport::compute(&[a, b]);
    assert!(report.is_empty());
}
