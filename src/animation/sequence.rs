use std::collections::BTreeMap;

use crate::foundation::error::{RastileError, RastileResult};

/// Payload applied to the bound target when a sequence step becomes current.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum StepValue {
    /// New picture index for a sprite binding.
    Picture(u32),
    /// In-place rotation of a palette sub-range for a palette binding.
    PaletteDelta {
        /// First palette entry of the rotated range.
        first: u16,
        /// Number of entries in the rotated range.
        count: u16,
        /// Rotation amount; positive moves colors toward higher indices.
        shift: i32,
    },
}

/// One timed step of a sequence.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequenceStep {
    /// Value applied when this step becomes current.
    pub value: StepValue,
    /// How long the step stays current, in milliseconds; must be > 0.
    pub duration_ms: f64,
}

/// Ordered list of timed steps driving one animation binding.
///
/// All steps of one sequence address the same target kind: picture-index
/// steps bind to sprites, palette-delta steps bind to palettes. Mixing kinds
/// is rejected at construction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "SequenceData")]
pub struct Sequence {
    steps: Vec<SequenceStep>,
    looped: bool,
}

/// Raw deserialization mirror; [`Sequence::new`] revalidates the fields.
#[derive(serde::Deserialize)]
struct SequenceData {
    steps: Vec<SequenceStep>,
    looped: bool,
}

impl TryFrom<SequenceData> for Sequence {
    type Error = RastileError;

    fn try_from(raw: SequenceData) -> RastileResult<Self> {
        Self::new(raw.steps, raw.looped)
    }
}

impl Sequence {
    /// Build a validated sequence.
    pub fn new(steps: Vec<SequenceStep>, looped: bool) -> RastileResult<Self> {
        if steps.is_empty() {
            return Err(RastileError::animation("sequence needs at least one step"));
        }
        for (i, step) in steps.iter().enumerate() {
            if !(step.duration_ms > 0.0) || !step.duration_ms.is_finite() {
                return Err(RastileError::animation(format!(
                    "step {i} duration must be a positive finite number of ms"
                )));
            }
        }
        let mixed = steps
            .windows(2)
            .any(|w| std::mem::discriminant(&w[0].value) != std::mem::discriminant(&w[1].value));
        if mixed {
            return Err(RastileError::animation(
                "sequence mixes picture and palette-delta steps",
            ));
        }
        Ok(Self { steps, looped })
    }

    /// Shorthand for a picture-index sequence with one shared step duration.
    pub fn from_pictures(pictures: &[u32], duration_ms: f64, looped: bool) -> RastileResult<Self> {
        let steps = pictures
            .iter()
            .map(|&p| SequenceStep {
                value: StepValue::Picture(p),
                duration_ms,
            })
            .collect();
        Self::new(steps, looped)
    }

    /// Steps in play order.
    pub fn steps(&self) -> &[SequenceStep] {
        &self.steps
    }

    /// Whether playback wraps to step 0 after the last step.
    pub fn looped(&self) -> bool {
        self.looped
    }

    /// Whether every step carries a picture index (sprite binding).
    pub fn drives_pictures(&self) -> bool {
        matches!(self.steps[0].value, StepValue::Picture(_))
    }

    /// Whether every step carries a palette delta (palette binding).
    pub fn drives_palette(&self) -> bool {
        matches!(self.steps[0].value, StepValue::PaletteDelta { .. })
    }
}

/// Named collection of sequences, queried by name.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequencePack {
    sequences: BTreeMap<String, Sequence>,
}

impl SequencePack {
    /// Empty pack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sequence under a unique name.
    pub fn insert(&mut self, name: impl Into<String>, sequence: Sequence) -> RastileResult<()> {
        let name = name.into();
        if self.sequences.contains_key(&name) {
            return Err(RastileError::animation(format!(
                "sequence name '{name}' is already taken"
            )));
        }
        self.sequences.insert(name, sequence);
        Ok(())
    }

    /// Sequence by name.
    pub fn get(&self, name: &str) -> Option<&Sequence> {
        self.sequences.get(name)
    }

    /// Number of sequences.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Whether the pack is empty.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sequences.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sequence.rs"]
mod tests;
