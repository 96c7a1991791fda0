use crate::foundation::core::Rgb8;
use crate::foundation::error::{RastileError, RastileResult};

/// Maximum entry count of an indexed palette.
pub const PALETTE_MAX_ENTRIES: usize = 256;

/// Indexed RGB color table backing tilesets, spritesets and bitmaps.
///
/// The entry count is fixed at creation. One index may be marked transparent
/// (index 0 by retro convention, the default); source pixels carrying that
/// index are skipped by every blit path.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    entries: Vec<Rgb8>,
    transparent: Option<u8>,
}

impl Palette {
    /// Build a palette from up to 256 entries, index 0 transparent.
    pub fn new(entries: Vec<Rgb8>) -> RastileResult<Self> {
        Self::with_transparent(entries, Some(0))
    }

    /// Build a palette with an explicit transparent index (or none).
    pub fn with_transparent(entries: Vec<Rgb8>, transparent: Option<u8>) -> RastileResult<Self> {
        if entries.is_empty() {
            return Err(RastileError::validation("palette must have >= 1 entry"));
        }
        if entries.len() > PALETTE_MAX_ENTRIES {
            return Err(RastileError::validation(format!(
                "palette holds at most {PALETTE_MAX_ENTRIES} entries, got {}",
                entries.len()
            )));
        }
        if let Some(t) = transparent
            && usize::from(t) >= entries.len()
        {
            return Err(RastileError::validation(
                "transparent index is outside the palette",
            ));
        }
        Ok(Self {
            entries,
            transparent,
        })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; palettes have at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index treated as transparent by the blitters, if any.
    pub fn transparent_index(&self) -> Option<u8> {
        self.transparent
    }

    /// Whether `index` resolves to a transparent pixel.
    pub fn is_transparent(&self, index: u8) -> bool {
        self.transparent == Some(index)
    }

    /// Color at `index`, or `None` when the index is outside the table.
    pub fn color(&self, index: u8) -> Option<Rgb8> {
        self.entries.get(usize::from(index)).copied()
    }

    /// Replace the color at `index`.
    pub fn set_color(&mut self, index: u8, color: Rgb8) -> RastileResult<()> {
        let slot = self
            .entries
            .get_mut(usize::from(index))
            .ok_or_else(|| RastileError::config("palette index out of range"))?;
        *slot = color;
        Ok(())
    }

    /// Rotate the entries of `[first, first + count)` in place by `shift`.
    ///
    /// Positive shifts move each color toward higher indices, wrapping at the
    /// range boundary; negative shifts move toward lower indices. Rotating a
    /// range of size K by K (in any number of single steps) restores the
    /// original order. This is the primitive under palette cycling and
    /// palette-delta sequence steps.
    pub fn cycle_range(&mut self, first: usize, count: usize, shift: i32) -> RastileResult<()> {
        if count == 0 {
            return Err(RastileError::config("palette cycle range is empty"));
        }
        let end = first
            .checked_add(count)
            .ok_or_else(|| RastileError::config("palette cycle range overflows"))?;
        if end > self.entries.len() {
            return Err(RastileError::config(
                "palette cycle range is outside the palette",
            ));
        }
        let span = &mut self.entries[first..end];
        let by = (i64::from(shift)).rem_euclid(count as i64) as usize;
        span.rotate_right(by);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/palette.rs"]
mod tests;
