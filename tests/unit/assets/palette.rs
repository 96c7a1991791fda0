use super::*;

fn grayscale(n: u8) -> Palette {
    let entries = (0..n).map(|i| Rgb8::new(i, i, i)).collect();
    Palette::new(entries).unwrap()
}

#[test]
fn construction_enforces_entry_count() {
    assert!(Palette::new(Vec::new()).is_err());
    assert!(Palette::new(vec![Rgb8::BLACK; 257]).is_err());
    assert!(Palette::new(vec![Rgb8::BLACK; 256]).is_ok());
}

#[test]
fn transparent_index_defaults_to_zero() {
    let pal = grayscale(4);
    assert_eq!(pal.transparent_index(), Some(0));
    assert!(pal.is_transparent(0));
    assert!(!pal.is_transparent(1));

    let opaque = Palette::with_transparent(vec![Rgb8::BLACK; 4], None).unwrap();
    assert!(!opaque.is_transparent(0));
}

#[test]
fn transparent_index_must_resolve() {
    assert!(Palette::with_transparent(vec![Rgb8::BLACK; 4], Some(4)).is_err());
    assert!(Palette::with_transparent(vec![Rgb8::BLACK; 4], Some(3)).is_ok());
}

#[test]
fn color_lookup_out_of_range_is_none() {
    let pal = grayscale(4);
    assert_eq!(pal.color(3), Some(Rgb8::new(3, 3, 3)));
    assert_eq!(pal.color(4), None);
}

#[test]
fn cycle_forward_moves_colors_to_higher_indices() {
    let mut pal = grayscale(6);
    pal.cycle_range(1, 4, 1).unwrap();
    // range [1,5): 1,2,3,4 -> 4,1,2,3
    assert_eq!(pal.color(1), Some(Rgb8::new(4, 4, 4)));
    assert_eq!(pal.color(2), Some(Rgb8::new(1, 1, 1)));
    assert_eq!(pal.color(4), Some(Rgb8::new(3, 3, 3)));
    // entries outside the range are untouched
    assert_eq!(pal.color(0), Some(Rgb8::new(0, 0, 0)));
    assert_eq!(pal.color(5), Some(Rgb8::new(5, 5, 5)));
}

#[test]
fn cycle_of_size_k_restores_after_k_single_steps() {
    let mut pal = grayscale(8);
    let original = pal.clone();
    for _ in 0..5 {
        pal.cycle_range(2, 5, 1).unwrap();
    }
    assert_eq!(pal, original);
}

#[test]
fn cycle_negative_shift_reverses_positive() {
    let mut pal = grayscale(8);
    let original = pal.clone();
    pal.cycle_range(0, 8, 3).unwrap();
    pal.cycle_range(0, 8, -3).unwrap();
    assert_eq!(pal, original);
}

#[test]
fn cycle_range_validation() {
    let mut pal = grayscale(4);
    assert!(pal.cycle_range(0, 0, 1).is_err());
    assert!(pal.cycle_range(2, 3, 1).is_err());
    assert!(pal.cycle_range(0, 4, 1).is_ok());
}
