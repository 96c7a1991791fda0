use super::*;

#[test]
fn steps_need_positive_finite_durations() {
    let step = |ms: f64| SequenceStep {
        value: StepValue::Picture(0),
        duration_ms: ms,
    };
    assert!(Sequence::new(Vec::new(), false).is_err());
    assert!(Sequence::new(vec![step(0.0)], false).is_err());
    assert!(Sequence::new(vec![step(-5.0)], false).is_err());
    assert!(Sequence::new(vec![step(f64::NAN)], false).is_err());
    assert!(Sequence::new(vec![step(16.6)], false).is_ok());
}

#[test]
fn mixed_target_kinds_are_rejected() {
    let steps = vec![
        SequenceStep {
            value: StepValue::Picture(0),
            duration_ms: 100.0,
        },
        SequenceStep {
            value: StepValue::PaletteDelta {
                first: 0,
                count: 4,
                shift: 1,
            },
            duration_ms: 100.0,
        },
    ];
    assert!(Sequence::new(steps, true).is_err());
}

#[test]
fn target_kind_predicates() {
    let pics = Sequence::from_pictures(&[0, 1, 2], 100.0, true).unwrap();
    assert!(pics.drives_pictures());
    assert!(!pics.drives_palette());

    let pal = Sequence::new(
        vec![SequenceStep {
            value: StepValue::PaletteDelta {
                first: 0,
                count: 4,
                shift: 1,
            },
            duration_ms: 50.0,
        }],
        true,
    )
    .unwrap();
    assert!(pal.drives_palette());
}

#[test]
fn pack_names_are_unique_and_sorted() {
    let mut pack = SequencePack::new();
    let walk = Sequence::from_pictures(&[0, 1], 100.0, true).unwrap();
    pack.insert("walk", walk.clone()).unwrap();
    pack.insert("idle", walk.clone()).unwrap();
    assert!(pack.insert("walk", walk).is_err());
    assert_eq!(pack.len(), 2);
    assert!(pack.get("walk").is_some());
    assert!(pack.get("run").is_none());
    let names: Vec<&str> = pack.names().collect();
    assert_eq!(names, vec!["idle", "walk"]);
}
