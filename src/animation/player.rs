use crate::animation::sequence::{Sequence, StepValue};
use crate::foundation::error::{RastileError, RastileResult};

/// Playback state of one sequence binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PlayState {
    /// Initial/terminal; ticking has no effect on the bound target.
    Stopped,
    /// Time accumulates; step crossings apply values to the target.
    Playing,
    /// Time accumulation is frozen; resuming continues exactly where left.
    Paused,
}

/// Per-binding playback state machine over one sequence.
///
/// Each binding (one per sprite, one per palette) owns its player and
/// elapsed-time accumulator, so any number run concurrently. Binding a new
/// sequence replaces the player wholesale, restarting at step 0, Playing.
///
/// A non-looping sequence enters [`PlayState::Stopped`] exactly when the
/// cumulative duration of all steps has elapsed; the last step's value was
/// applied on entry to that step and is simply held from then on.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "PlayerData")]
pub struct SequencePlayer {
    sequence: Sequence,
    state: PlayState,
    step: usize,
    elapsed_ms: f64,
}

/// Raw deserialization mirror; the step index and accumulator are checked
/// against the (already validated) sequence before a player exists.
#[derive(serde::Deserialize)]
struct PlayerData {
    sequence: Sequence,
    state: PlayState,
    step: usize,
    elapsed_ms: f64,
}

impl TryFrom<PlayerData> for SequencePlayer {
    type Error = RastileError;

    fn try_from(raw: PlayerData) -> RastileResult<Self> {
        if raw.step >= raw.sequence.steps().len() {
            return Err(RastileError::animation(format!(
                "player step {} is outside the sequence ({} steps)",
                raw.step,
                raw.sequence.steps().len()
            )));
        }
        if !raw.elapsed_ms.is_finite() || raw.elapsed_ms < 0.0 {
            return Err(RastileError::animation(
                "player elapsed time must be a non-negative finite number of ms",
            ));
        }
        Ok(Self {
            sequence: raw.sequence,
            state: raw.state,
            step: raw.step,
            elapsed_ms: raw.elapsed_ms,
        })
    }
}

impl SequencePlayer {
    /// Start playing `sequence` from step 0.
    pub fn new(sequence: Sequence) -> Self {
        Self {
            sequence,
            state: PlayState::Playing,
            step: 0,
            elapsed_ms: 0.0,
        }
    }

    /// The bound sequence.
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Current playback state.
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Index of the current step.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Value of the current step.
    pub fn current_value(&self) -> StepValue {
        self.sequence.steps()[self.step].value
    }

    /// Freeze time accumulation. No-op unless Playing.
    pub fn pause(&mut self) {
        if self.state == PlayState::Playing {
            self.state = PlayState::Paused;
        }
    }

    /// Resume a paused player at the exact point it froze.
    pub fn resume(&mut self) {
        if self.state == PlayState::Paused {
            self.state = PlayState::Playing;
        }
    }

    /// Stop playback; the target keeps whatever value was last applied.
    pub fn stop(&mut self) {
        self.state = PlayState::Stopped;
        self.elapsed_ms = 0.0;
    }

    /// Advance by `delta_ms`, calling `apply` for every step crossed.
    ///
    /// Several steps may be crossed by one large delta; `apply` runs once per
    /// crossing in order, so palette-delta targets accumulate every rotation
    /// and picture targets end up holding the final step's picture.
    pub fn tick(&mut self, delta_ms: f64, mut apply: impl FnMut(StepValue)) {
        if self.state != PlayState::Playing || !(delta_ms > 0.0) {
            return;
        }
        self.elapsed_ms += delta_ms;
        loop {
            let duration = self.sequence.steps()[self.step].duration_ms;
            if self.elapsed_ms < duration {
                break;
            }
            self.elapsed_ms -= duration;
            if self.step + 1 < self.sequence.steps().len() {
                self.step += 1;
                apply(self.current_value());
            } else if self.sequence.looped() {
                self.step = 0;
                apply(self.current_value());
            } else {
                self.state = PlayState::Stopped;
                self.elapsed_ms = 0.0;
                break;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/player.rs"]
mod tests;
