use crate::assets::palette::Palette;
use crate::foundation::error::{RastileError, RastileResult};

/// Rotation direction of a palette cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CycleDirection {
    /// Colors move toward higher indices each step.
    #[default]
    Forward,
    /// Colors move toward lower indices each step.
    Backward,
}

/// Palette color-cycling parameters: a sub-range, a tick period, a direction.
///
/// Every `period_ticks` frame ticks the entries of `[first, first + count)`
/// rotate by one position, wrapping at the range boundary. The permutation is
/// purely in-place table motion; pixel data is never touched. A cycle over a
/// range of size K returns to the original entry order after exactly K steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PaletteCycle {
    /// First palette entry of the cycled range.
    pub first: u16,
    /// Number of entries in the cycled range; must be > 0.
    pub count: u16,
    /// Frame ticks between rotation steps; must be > 0.
    pub period_ticks: u32,
    /// Rotation direction.
    pub direction: CycleDirection,
}

impl PaletteCycle {
    /// Validate the cycle against the palette it will drive.
    pub fn validate(&self, palette: &Palette) -> RastileResult<()> {
        if self.count == 0 {
            return Err(RastileError::animation("palette cycle range is empty"));
        }
        if self.period_ticks == 0 {
            return Err(RastileError::animation("palette cycle period must be > 0"));
        }
        let end = usize::from(self.first) + usize::from(self.count);
        if end > palette.len() {
            return Err(RastileError::animation(
                "palette cycle range is outside the palette",
            ));
        }
        Ok(())
    }
}

/// Running cycle state held by the engine per animated palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub(crate) struct CycleState {
    params: PaletteCycle,
    counter: u32,
}

impl CycleState {
    pub(crate) fn new(params: PaletteCycle) -> Self {
        Self { params, counter: 0 }
    }

    pub(crate) fn params(&self) -> PaletteCycle {
        self.params
    }

    /// Advance by `ticks` frame ticks, rotating the palette at each period.
    ///
    /// The range was validated on enable and palettes never change size, so
    /// the in-place rotation cannot fail here.
    pub(crate) fn tick(&mut self, ticks: u64, palette: &mut Palette) {
        let shift = match self.params.direction {
            CycleDirection::Forward => 1,
            CycleDirection::Backward => -1,
        };
        let mut remaining = ticks;
        while remaining > 0 {
            let until_step = u64::from(self.params.period_ticks - self.counter);
            if remaining < until_step {
                self.counter += remaining as u32;
                break;
            }
            remaining -= until_step;
            self.counter = 0;
            let _ = palette.cycle_range(
                usize::from(self.params.first),
                usize::from(self.params.count),
                shift,
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/cycle.rs"]
mod tests;
