use crate::animation::player::SequencePlayer;
use crate::assets::store::SpritesetId;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::{clamp_pivot, normalize_scale, wrap_angle_rad};
use crate::render::frame::Blend;

/// Per-sprite capability flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SpriteFlags {
    /// Mirror the picture horizontally.
    #[serde(default)]
    pub flip_h: bool,
    /// Mirror the picture vertically.
    #[serde(default)]
    pub flip_v: bool,
    /// Honor the rotation angle (scaling applies regardless).
    #[serde(default)]
    pub rotate: bool,
    /// Take part in collision detection.
    #[serde(default)]
    pub collision: bool,
}

/// Blit strategy resolved once per sprite at the start of its render step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SpriteBlit {
    /// Unit scale, no effective rotation: direct copy with optional flips.
    Plain,
    /// Inverse-affine sampling over the transformed bounding box.
    Affine,
}

/// One sprite slot: picture binding plus position, pivot, transform, flags.
///
/// Slots are allocated once at engine construction. The pivot is a fraction
/// of the picture's bounding box in each axis; the pivot point lands exactly
/// on the sprite position. Sprites blit after all layers, in increasing slot
/// order (lower index below higher).
#[derive(Clone, Debug)]
pub struct Sprite {
    spriteset: Option<SpritesetId>,
    picture: u32,
    position: Point,
    pivot: Vec2,
    scale: Vec2,
    angle_rad: f64,
    flags: SpriteFlags,
    blend: Blend,
    enabled: bool,
    pub(crate) player: Option<SequencePlayer>,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            spriteset: None,
            picture: 0,
            position: Point::ZERO,
            pivot: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
            angle_rad: 0.0,
            flags: SpriteFlags::default(),
            blend: Blend::Opaque,
            enabled: true,
            player: None,
        }
    }
}

impl Sprite {
    /// Bound spriteset, if any.
    pub fn spriteset(&self) -> Option<SpritesetId> {
        self.spriteset
    }

    /// Current picture index into the bound spriteset.
    pub fn picture(&self) -> u32 {
        self.picture
    }

    /// Bind a spriteset and picture. Validated by the engine before the call.
    pub(crate) fn bind(&mut self, spriteset: SpritesetId, picture: u32) {
        self.spriteset = Some(spriteset);
        self.picture = picture;
    }

    /// Replace the picture index. Validated by the engine before the call.
    pub(crate) fn set_picture_unchecked(&mut self, picture: u32) {
        self.picture = picture;
    }

    /// Unbind the slot; it renders nothing until rebound.
    pub fn clear_content(&mut self) {
        self.spriteset = None;
        self.picture = 0;
        self.player = None;
    }

    /// Pivot-relative screen position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Set the screen position.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Pivot fraction of the bounding box per axis, in `[0, 1]`.
    pub fn pivot(&self) -> Vec2 {
        self.pivot
    }

    /// Set the pivot fraction; values are clamped into `[0, 1]`.
    pub fn set_pivot(&mut self, pivot: Vec2) {
        self.pivot = Vec2::new(clamp_pivot(pivot.x), clamp_pivot(pivot.y));
    }

    /// Per-axis scale factors.
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Set the scale; negative or non-finite input is normalized.
    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = Vec2::new(normalize_scale(scale.x), normalize_scale(scale.y));
    }

    /// Rotation angle in radians, wrapped into `[0, TAU)`.
    pub fn angle_rad(&self) -> f64 {
        self.angle_rad
    }

    /// Set the rotation angle; wrapped, only honored when `flags.rotate`.
    pub fn set_angle_rad(&mut self, angle_rad: f64) {
        self.angle_rad = wrap_angle_rad(angle_rad);
    }

    /// Capability flags.
    pub fn flags(&self) -> SpriteFlags {
        self.flags
    }

    /// Replace the capability flags.
    pub fn set_flags(&mut self, flags: SpriteFlags) {
        self.flags = flags;
    }

    /// Pixel write mode.
    pub fn blend(&self) -> Blend {
        self.blend
    }

    /// Set the pixel write mode.
    pub fn set_blend(&mut self, blend: Blend) {
        self.blend = blend;
    }

    /// Whether the slot takes part in compositing and collision.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the slot. Disabled slots never render or collide.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Running sequence player, if a sequence is bound.
    pub fn player(&self) -> Option<&SequencePlayer> {
        self.player.as_ref()
    }

    /// Effective rotation after the rotate capability gate.
    pub(crate) fn effective_angle(&self) -> f64 {
        if self.flags.rotate { self.angle_rad } else { 0.0 }
    }

    /// Resolve the blit strategy for this frame's render step.
    pub(crate) fn blit_mode(&self) -> SpriteBlit {
        if self.effective_angle() != 0.0 || self.scale.x != 1.0 || self.scale.y != 1.0 {
            SpriteBlit::Affine
        } else {
            SpriteBlit::Plain
        }
    }
}
