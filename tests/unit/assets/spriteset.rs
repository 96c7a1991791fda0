use super::*;

fn checker_set() -> Spriteset {
    // 4x2 atlas, two 2x2 pictures side by side
    let atlas = vec![
        1, 2, 5, 6, //
        3, 4, 7, 8,
    ];
    let pictures = vec![
        Picture {
            name: "left".to_string(),
            rect: PixelRect::from_origin_size(0, 0, 2, 2),
        },
        Picture {
            name: "right".to_string(),
            rect: PixelRect::from_origin_size(2, 0, 2, 2),
        },
    ];
    Spriteset::new(4, 2, atlas, pictures, PaletteId(0)).unwrap()
}

#[test]
fn construction_validates_atlas_and_rects() {
    assert!(Spriteset::new(2, 2, vec![0; 3], Vec::new(), PaletteId(0)).is_err());
    assert!(Spriteset::new(2, 2, vec![0; 4], Vec::new(), PaletteId(0)).is_err());
    let out_of_atlas = vec![Picture {
        name: "bad".to_string(),
        rect: PixelRect::from_origin_size(1, 0, 2, 2),
    }];
    assert!(Spriteset::new(2, 2, vec![0; 4], out_of_atlas, PaletteId(0)).is_err());
}

#[test]
fn lookup_by_index_and_name() {
    let set = checker_set();
    assert_eq!(set.picture_count(), 2);
    assert_eq!(set.picture(1).unwrap().name, "right");
    assert_eq!(set.picture_index("left"), Some(0));
    assert_eq!(set.picture_index("missing"), None);
    assert!(set.picture(2).is_none());
}

#[test]
fn picture_pixel_is_picture_local() {
    let set = checker_set();
    assert_eq!(set.picture_pixel(0, 0, 0, false, false), Some(1));
    assert_eq!(set.picture_pixel(0, 1, 1, false, false), Some(4));
    assert_eq!(set.picture_pixel(1, 0, 0, false, false), Some(5));
    assert_eq!(set.picture_pixel(1, 1, 1, false, false), Some(8));
    assert_eq!(set.picture_pixel(0, 2, 0, false, false), None);
    assert_eq!(set.picture_pixel(0, -1, 0, false, false), None);
}

#[test]
fn flips_mirror_inside_the_picture_rect() {
    let set = checker_set();
    assert_eq!(set.picture_pixel(0, 0, 0, true, false), Some(2));
    assert_eq!(set.picture_pixel(0, 0, 0, false, true), Some(3));
    assert_eq!(set.picture_pixel(0, 0, 0, true, true), Some(4));
    // flips never leak into the neighboring picture
    assert_eq!(set.picture_pixel(1, 0, 0, true, false), Some(6));
}
