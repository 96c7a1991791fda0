use super::*;

fn pictures(durations_ms: &[f64], looped: bool) -> Sequence {
    let steps = durations_ms
        .iter()
        .enumerate()
        .map(|(i, &d)| crate::animation::sequence::SequenceStep {
            value: StepValue::Picture(i as u32),
            duration_ms: d,
        })
        .collect();
    Sequence::new(steps, looped).unwrap()
}

fn applied(player: &mut SequencePlayer, delta_ms: f64) -> Vec<StepValue> {
    let mut out = Vec::new();
    player.tick(delta_ms, |v| out.push(v));
    out
}

#[test]
fn starts_playing_at_step_zero() {
    let player = SequencePlayer::new(pictures(&[100.0, 100.0], true));
    assert_eq!(player.state(), PlayState::Playing);
    assert_eq!(player.step(), 0);
    assert_eq!(player.current_value(), StepValue::Picture(0));
}

#[test]
fn looping_sequence_positions_match_elapsed_time() {
    // the [100,100,100] ms looping scenario
    let mut player = SequencePlayer::new(pictures(&[100.0, 100.0, 100.0], true));
    player.tick(250.0, |_| {});
    assert_eq!(player.step(), 2);
    assert_eq!(player.current_value(), StepValue::Picture(2));

    player.tick(100.0, |_| {});
    // total 350 ms, wrapped back to step 0
    assert_eq!(player.step(), 0);
    assert_eq!(player.state(), PlayState::Playing);
}

#[test]
fn non_looping_sequence_stops_after_cumulative_duration() {
    let mut player = SequencePlayer::new(pictures(&[100.0, 100.0, 100.0], false));
    player.tick(299.0, |_| {});
    assert_eq!(player.state(), PlayState::Playing);
    assert_eq!(player.step(), 2);

    player.tick(1.0, |_| {});
    assert_eq!(player.state(), PlayState::Stopped);
    // the last step's value is held at and after the stop point
    assert_eq!(player.current_value(), StepValue::Picture(2));

    player.tick(1000.0, |_| {});
    assert_eq!(player.state(), PlayState::Stopped);
    assert_eq!(player.current_value(), StepValue::Picture(2));
}

#[test]
fn one_large_delta_applies_every_crossed_step() {
    let mut player = SequencePlayer::new(pictures(&[10.0, 10.0, 10.0], false));
    let steps = applied(&mut player, 25.0);
    assert_eq!(steps, vec![StepValue::Picture(1), StepValue::Picture(2)]);
}

#[test]
fn pause_freezes_and_resume_continues_exactly() {
    let mut player = SequencePlayer::new(pictures(&[100.0, 100.0], true));
    player.tick(90.0, |_| {});
    player.pause();
    assert_eq!(player.state(), PlayState::Paused);
    assert!(applied(&mut player, 500.0).is_empty());
    assert_eq!(player.step(), 0);

    player.resume();
    let steps = applied(&mut player, 10.0);
    assert_eq!(steps, vec![StepValue::Picture(1)]);
}

#[test]
fn resume_is_a_noop_unless_paused() {
    let mut player = SequencePlayer::new(pictures(&[100.0], false));
    player.stop();
    player.resume();
    assert_eq!(player.state(), PlayState::Stopped);
}
