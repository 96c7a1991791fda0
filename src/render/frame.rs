use crate::foundation::core::{FrameSize, Rgb8};
use crate::foundation::error::{RastileError, RastileResult};

/// Per-layer / per-sprite pixel write mode.
///
/// `Opaque` is the default and preserves strict overwrite compositing; the
/// arithmetic modes read the accumulated destination pixel first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Blend {
    /// Source replaces destination.
    #[default]
    Opaque,
    /// 50/50 average of source and destination.
    Mix50,
    /// Saturating per-channel addition.
    Add,
    /// Saturating per-channel subtraction (destination minus source).
    Sub,
}

/// Fixed-size RGBA8 framebuffer with explicit pitch.
///
/// The buffer is exclusively owned by the engine and rewritten every frame;
/// rows are `pitch` bytes apart with at least `4 * width` payload bytes each.
/// Output pixels are fully opaque (straight alpha 255); transparency only
/// exists on the source side, as skipped palette indices.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pitch: usize,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Allocate a zeroed framebuffer. `pitch` must be at least `4 * width`.
    pub fn new(size: FrameSize, pitch: usize) -> RastileResult<Self> {
        if size.width == 0 || size.height == 0 {
            return Err(RastileError::validation("frame dimensions must be > 0"));
        }
        let min_pitch = (size.width as usize)
            .checked_mul(4)
            .ok_or_else(|| RastileError::validation("frame width overflows pitch"))?;
        if pitch < min_pitch {
            return Err(RastileError::validation(format!(
                "pitch {pitch} is below the minimum {min_pitch} for width {}",
                size.width
            )));
        }
        let bytes = pitch
            .checked_mul(size.height as usize)
            .ok_or_else(|| RastileError::validation("frame dimensions overflow"))?;
        Ok(Self {
            width: size.width,
            height: size.height,
            pitch,
            data: vec![0; bytes],
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Raw pixel bytes, `pitch * height` of them.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Fill every pixel with an opaque color.
    pub fn clear(&mut self, color: Rgb8) {
        for y in 0..self.height as usize {
            let row = &mut self.data[y * self.pitch..y * self.pitch + 4 * self.width as usize];
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&[color.r, color.g, color.b, 255]);
            }
        }
    }

    /// Opaque color currently stored at `(x, y)`; coordinates must be in range.
    pub fn pixel(&self, x: u32, y: u32) -> Rgb8 {
        debug_assert!(x < self.width && y < self.height);
        let at = y as usize * self.pitch + 4 * x as usize;
        Rgb8::new(self.data[at], self.data[at + 1], self.data[at + 2])
    }

    /// Write `color` at `(x, y)` under `blend`; coordinates must be in range.
    pub fn put(&mut self, x: u32, y: u32, color: Rgb8, blend: Blend) {
        debug_assert!(x < self.width && y < self.height);
        let at = y as usize * self.pitch + 4 * x as usize;
        let out = match blend {
            Blend::Opaque => color,
            Blend::Mix50 => {
                let dst = Rgb8::new(self.data[at], self.data[at + 1], self.data[at + 2]);
                Rgb8::new(
                    mix50(dst.r, color.r),
                    mix50(dst.g, color.g),
                    mix50(dst.b, color.b),
                )
            }
            Blend::Add => {
                let dst = Rgb8::new(self.data[at], self.data[at + 1], self.data[at + 2]);
                Rgb8::new(
                    dst.r.saturating_add(color.r),
                    dst.g.saturating_add(color.g),
                    dst.b.saturating_add(color.b),
                )
            }
            Blend::Sub => {
                let dst = Rgb8::new(self.data[at], self.data[at + 1], self.data[at + 2]);
                Rgb8::new(
                    dst.r.saturating_sub(color.r),
                    dst.g.saturating_sub(color.g),
                    dst.b.saturating_sub(color.b),
                )
            }
        };
        self.data[at] = out.r;
        self.data[at + 1] = out.g;
        self.data[at + 2] = out.b;
        self.data[at + 3] = 255;
    }
}

fn mix50(a: u8, b: u8) -> u8 {
    ((u16::from(a) + u16::from(b) + 1) / 2) as u8
}
