use crate::assets::store::{BitmapId, TilemapId};
use crate::foundation::core::{PixelRect, Point, Vec2};
use crate::foundation::math::{normalize_scale, wrap_angle_rad};
use crate::render::frame::Blend;

/// Affine transform of a layer: rotation and per-axis scale about a pivot.
///
/// Screen-space pivot point; the identity transform selects the fast
/// orthogonal scanline path.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerTransform {
    /// Rotation angle in radians, wrapped into `[0, TAU)`.
    pub angle_rad: f64,
    /// Per-axis scale factors.
    pub scale: Vec2,
    /// Screen-space pivot the rotation/scale is applied about.
    pub pivot: Point,
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self {
            angle_rad: 0.0,
            scale: Vec2::new(1.0, 1.0),
            pivot: Point::ZERO,
        }
    }
}

impl LayerTransform {
    /// Wrap the angle and take absolute scales; never rejects input.
    pub(crate) fn normalized(self) -> Self {
        Self {
            angle_rad: wrap_angle_rad(self.angle_rad),
            scale: Vec2::new(normalize_scale(self.scale.x), normalize_scale(self.scale.y)),
            pivot: self.pivot,
        }
    }

    /// Whether the transform selects the orthogonal blit path.
    pub(crate) fn is_identity(self) -> bool {
        self.angle_rad == 0.0 && self.scale.x == 1.0 && self.scale.y == 1.0
    }
}

/// Content source bound to a layer slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LayerContent {
    /// A tilemap with all of its sub-layers.
    Tilemap(TilemapId),
    /// A flat indexed bitmap.
    Bitmap(BitmapId),
}

/// One render layer slot: content binding plus scroll, transform and clip.
///
/// Slots are allocated once at engine construction and only ever rebound.
/// An unbound or disabled slot contributes nothing to the output. Layers
/// composite back-to-front by increasing slot index.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    content: Option<LayerContent>,
    scroll: Vec2,
    transform: LayerTransform,
    clip: Option<PixelRect>,
    blend: Blend,
    enabled: bool,
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            content: None,
            scroll: Vec2::ZERO,
            transform: LayerTransform::default(),
            clip: None,
            blend: Blend::Opaque,
            enabled: true,
        }
    }
}

impl Layer {
    /// Bound content, if any.
    pub fn content(&self) -> Option<LayerContent> {
        self.content
    }

    /// Bind a content source, replacing any previous binding.
    pub fn set_content(&mut self, content: LayerContent) {
        self.content = Some(content);
    }

    /// Unbind the slot; it renders nothing until rebound.
    pub fn clear_content(&mut self) {
        self.content = None;
    }

    /// Scroll position in map pixels; unbounded, wraps modulo the map extent.
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Set the scroll position.
    pub fn set_scroll(&mut self, scroll: Vec2) {
        self.scroll = scroll;
    }

    /// Current transform.
    pub fn transform(&self) -> LayerTransform {
        self.transform
    }

    /// Set the transform; malformed input is normalized, never rejected.
    pub fn set_transform(&mut self, transform: LayerTransform) {
        self.transform = transform.normalized();
    }

    /// Clip rectangle in screen coordinates, `None` meaning the full frame.
    pub fn clip(&self) -> Option<PixelRect> {
        self.clip
    }

    /// Restrict writes to `clip` (intersected with the frame at render time).
    pub fn set_clip(&mut self, clip: Option<PixelRect>) {
        self.clip = clip;
    }

    /// Pixel write mode.
    pub fn blend(&self) -> Blend {
        self.blend
    }

    /// Set the pixel write mode.
    pub fn set_blend(&mut self, blend: Blend) {
        self.blend = blend;
    }

    /// Whether the slot takes part in compositing.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the slot. Disabled slots never write a pixel.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
