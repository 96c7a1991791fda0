use std::collections::BTreeSet;

use crate::foundation::core::PixelRect;

/// Per-pixel destination coverage of one collision-enabled sprite.
///
/// One bit per pixel of the sprite's clipped destination rectangle, set for
/// exactly the opaque pixels the blit touched. Rebuilt from scratch every
/// frame during the sprite pass.
#[derive(Clone, Debug)]
pub(crate) struct SpriteCoverage {
    slot: usize,
    rect: PixelRect,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl SpriteCoverage {
    pub(crate) fn new(slot: usize, rect: PixelRect) -> Self {
        let words_per_row = (rect.width() as usize).div_ceil(64);
        let bits = vec![0; words_per_row * rect.height() as usize];
        Self {
            slot,
            rect,
            words_per_row,
            bits,
        }
    }

    pub(crate) fn slot(&self) -> usize {
        self.slot
    }

    pub(crate) fn rect(&self) -> PixelRect {
        self.rect
    }

    /// Mark screen pixel `(x, y)` as covered. Must lie inside the rectangle.
    pub(crate) fn mark(&mut self, x: i32, y: i32) {
        debug_assert!(self.rect.contains(x, y));
        let dx = (x - self.rect.x0) as usize;
        let dy = (y - self.rect.y0) as usize;
        self.bits[dy * self.words_per_row + dx / 64] |= 1u64 << (dx % 64);
    }

    /// Whether screen pixel `(x, y)` is covered.
    pub(crate) fn test(&self, x: i32, y: i32) -> bool {
        if !self.rect.contains(x, y) {
            return false;
        }
        let dx = (x - self.rect.x0) as usize;
        let dy = (y - self.rect.y0) as usize;
        self.bits[dy * self.words_per_row + dx / 64] & (1u64 << (dx % 64)) != 0
    }
}

/// Result of one frame's collision pass, valid until the next sprite pass.
///
/// Broad phase: axis-aligned bounding box intersection over every pair of
/// collision-enabled sprites. Narrow phase, only for intersecting pairs:
/// exact opaque-pixel overlap over the shared rectangle. Results are
/// symmetric by construction.
#[derive(Clone, Debug, Default)]
pub struct CollisionReport {
    pairs: BTreeSet<(usize, usize)>,
}

impl CollisionReport {
    /// Run broad and narrow phase over the frame's coverage records.
    pub(crate) fn compute(coverages: &[SpriteCoverage]) -> Self {
        let mut pairs = BTreeSet::new();
        for (i, a) in coverages.iter().enumerate() {
            for b in &coverages[i + 1..] {
                let overlap = a.rect().intersect(b.rect());
                if overlap.is_empty() {
                    continue;
                }
                if Self::pixels_overlap(a, b, overlap) {
                    pairs.insert(ordered(a.slot(), b.slot()));
                }
            }
        }
        Self { pairs }
    }

    fn pixels_overlap(a: &SpriteCoverage, b: &SpriteCoverage, overlap: PixelRect) -> bool {
        for y in overlap.y0..overlap.y1 {
            for x in overlap.x0..overlap.x1 {
                if a.test(x, y) && b.test(x, y) {
                    return true;
                }
            }
        }
        false
    }

    /// Whether sprites `a` and `b` had overlapping opaque pixels this frame.
    ///
    /// Symmetric in its arguments. Sprites without collision enabled (or
    /// disabled slots) never collide.
    pub fn collides(&self, a: usize, b: usize) -> bool {
        a != b && self.pairs.contains(&ordered(a, b))
    }

    /// Whether sprite `slot` collided with any other sprite this frame.
    pub fn sprite_collided(&self, slot: usize) -> bool {
        self.pairs.iter().any(|&(a, b)| a == slot || b == slot)
    }

    /// All colliding pairs, each reported once with the lower slot first.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.iter().copied()
    }

    /// Whether no pair collided this frame.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
#[path = "../../tests/unit/render/collision.rs"]
mod tests;
