use super::*;

fn two_tile_set() -> Tileset {
    // two 2x2 tiles: tile 0 all 1s, tile 1 counts 0..4
    let pixels = vec![1, 1, 1, 1, 0, 1, 2, 3];
    Tileset::new(2, 2, pixels, vec![0, 7], PaletteId(0)).unwrap()
}

#[test]
fn construction_validates_shape() {
    assert!(Tileset::new(0, 2, vec![0; 4], vec![0], PaletteId(0)).is_err());
    // 5 bytes is not a whole number of 2x2 tiles
    assert!(Tileset::new(2, 2, vec![0; 5], vec![0], PaletteId(0)).is_err());
    // type byte count must match the tile count
    assert!(Tileset::new(2, 2, vec![0; 8], vec![0], PaletteId(0)).is_err());
    assert!(Tileset::new(2, 2, vec![0; 8], vec![0, 0], PaletteId(0)).is_ok());
}

#[test]
fn tile_pixel_fetch_and_bounds() {
    let ts = two_tile_set();
    assert_eq!(ts.tile_count(), 2);
    assert_eq!(ts.tile_pixel(0, 0, 0), Some(1));
    assert_eq!(ts.tile_pixel(1, 1, 1), Some(3));
    assert_eq!(ts.tile_pixel(1, 0, 1), Some(2));
    // out-of-range tile or coordinate reads as empty
    assert_eq!(ts.tile_pixel(2, 0, 0), None);
    assert_eq!(ts.tile_pixel(0, 2, 0), None);
    assert_eq!(ts.tile_pixel(0, 0, 2), None);
}

#[test]
fn tile_types_are_per_tile() {
    let ts = two_tile_set();
    assert_eq!(ts.tile_type(0), Some(0));
    assert_eq!(ts.tile_type(1), Some(7));
    assert_eq!(ts.tile_type(2), None);
}

#[test]
fn palette_swap_is_the_only_mutation() {
    let mut ts = two_tile_set();
    assert_eq!(ts.palette(), PaletteId(0));
    ts.set_palette(PaletteId(3));
    assert_eq!(ts.palette(), PaletteId(3));
}
