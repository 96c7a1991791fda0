use std::collections::BTreeMap;

use crate::animation::cycle::{CycleState, PaletteCycle};
use crate::animation::player::{PlayState, SequencePlayer};
use crate::animation::sequence::{Sequence, StepValue};
use crate::assets::store::{AssetStore, BitmapId, PaletteId, SpritesetId, TilemapId};
use crate::foundation::core::{FrameIndex, FrameSize, Fps, Rgb8};
use crate::foundation::error::{RastileError, RastileResult};
use crate::render::collision::CollisionReport;
use crate::render::frame::FrameBuffer;
use crate::render::layer::blit_layer_line;
use crate::render::sprite::blit_sprite;
use crate::scene::layer::{Layer, LayerContent};
use crate::scene::sprite::Sprite;

/// Engine construction parameters, applied by [`EngineConfig::build`].
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// Output framebuffer dimensions.
    pub size: FrameSize,
    /// Timeline frame rate; converts frame ticks to sequence milliseconds.
    pub fps: Fps,
    /// Number of layer slots, fixed for the engine's lifetime.
    pub num_layers: usize,
    /// Number of sprite slots, fixed for the engine's lifetime.
    pub num_sprites: usize,
    /// Color the frame clears to below the bottom layer.
    pub background: Rgb8,
    /// Bytes per framebuffer row; `None` means tight `4 * width`.
    pub pitch: Option<usize>,
}

impl EngineConfig {
    /// Start a config for a `width` x `height` framebuffer with 4 layer and
    /// 64 sprite slots at 60 fps.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: FrameSize { width, height },
            fps: Fps::default(),
            num_layers: 4,
            num_sprites: 64,
            background: Rgb8::BLACK,
            pitch: None,
        }
    }

    /// Set the timeline frame rate.
    pub fn fps(mut self, fps: Fps) -> Self {
        self.fps = fps;
        self
    }

    /// Set the layer slot count.
    pub fn layers(mut self, num_layers: usize) -> Self {
        self.num_layers = num_layers;
        self
    }

    /// Set the sprite slot count.
    pub fn sprites(mut self, num_sprites: usize) -> Self {
        self.num_sprites = num_sprites;
        self
    }

    /// Set the background color.
    pub fn background(mut self, background: Rgb8) -> Self {
        self.background = background;
        self
    }

    /// Set an explicit framebuffer pitch in bytes per row.
    pub fn pitch(mut self, pitch: usize) -> Self {
        self.pitch = Some(pitch);
        self
    }

    /// Allocate the engine. Fails atomically: on error no engine exists.
    pub fn build(self) -> RastileResult<Engine> {
        Engine::new(self)
    }
}

/// Mutable per-scanline view handed to the raster callback.
///
/// The callback runs before each destination scanline of the layer pass and
/// may retune layer scroll/transform bindings and palette colors mid-frame,
/// the classic scanline raster effect. Sprites composite after the whole
/// layer pass and are unaffected.
pub struct RasterLine<'a> {
    /// All layer slots, mutable.
    pub layers: &'a mut [Layer],
    /// The asset store, mutable for palette retuning.
    pub assets: &'a mut AssetStore,
}

type RasterFn = Box<dyn FnMut(u32, RasterLine<'_>)>;

/// The frame compositor: an explicit engine context.
///
/// Owns the framebuffer, the fixed layer/sprite slot arrays, the asset store
/// and all animation state. Any number of engines coexist in one process.
/// Rendering is single-threaded and synchronous: [`Engine::render`] advances
/// animators to the requested frame, composites layers back-to-front, then
/// sprites in slot order, and returns with collision results ready. Frame
/// pacing is the caller's responsibility; the engine never blocks on timing.
pub struct Engine {
    fps: Fps,
    background: Rgb8,
    assets: AssetStore,
    layers: Vec<Layer>,
    sprites: Vec<Sprite>,
    frame: FrameBuffer,
    cycles: BTreeMap<PaletteId, CycleState>,
    palette_players: BTreeMap<PaletteId, SequencePlayer>,
    raster: Option<RasterFn>,
    collisions: CollisionReport,
    last_frame: Option<FrameIndex>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("size", &self.frame_size())
            .field("fps", &self.fps)
            .field("num_layers", &self.layers.len())
            .field("num_sprites", &self.sprites.len())
            .field("last_frame", &self.last_frame)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Allocate an engine from a validated config.
    pub fn new(config: EngineConfig) -> RastileResult<Self> {
        let pitch = config
            .pitch
            .unwrap_or((config.size.width as usize).saturating_mul(4));
        let mut frame = FrameBuffer::new(config.size, pitch)?;
        frame.clear(config.background);
        Ok(Self {
            fps: config.fps,
            background: config.background,
            assets: AssetStore::new(),
            layers: vec![Layer::default(); config.num_layers],
            sprites: vec![Sprite::default(); config.num_sprites],
            frame,
            cycles: BTreeMap::new(),
            palette_players: BTreeMap::new(),
            raster: None,
            collisions: CollisionReport::default(),
            last_frame: None,
        })
    }

    /// Timeline frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Output dimensions.
    pub fn frame_size(&self) -> FrameSize {
        FrameSize {
            width: self.frame.width(),
            height: self.frame.height(),
        }
    }

    /// Bytes per framebuffer row.
    pub fn pitch(&self) -> usize {
        self.frame.pitch()
    }

    /// Finished frame pixels in RGBA8, `pitch()` bytes per row.
    pub fn frame_bytes(&self) -> &[u8] {
        self.frame.bytes()
    }

    /// Composited color at `(x, y)` of the last rendered frame.
    pub fn frame_pixel(&self, x: u32, y: u32) -> Rgb8 {
        self.frame.pixel(x, y)
    }

    /// Number of layer slots.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Number of sprite slots.
    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    /// Background color below the bottom layer.
    pub fn background(&self) -> Rgb8 {
        self.background
    }

    /// Set the background color; takes effect on the next render.
    pub fn set_background(&mut self, background: Rgb8) {
        self.background = background;
    }

    /// Read-only asset access.
    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Mutable asset access (insertion, palette edits).
    pub fn assets_mut(&mut self) -> &mut AssetStore {
        &mut self.assets
    }

    /// Layer slot by index.
    pub fn layer(&self, slot: usize) -> RastileResult<&Layer> {
        self.layers
            .get(slot)
            .ok_or_else(|| RastileError::config(format!("layer slot {slot} out of range")))
    }

    /// Mutable layer slot by index (scroll, transform, clip, blend, enable).
    pub fn layer_mut(&mut self, slot: usize) -> RastileResult<&mut Layer> {
        self.layers
            .get_mut(slot)
            .ok_or_else(|| RastileError::config(format!("layer slot {slot} out of range")))
    }

    /// Bind a tilemap to a layer slot, replacing any previous content.
    pub fn set_layer_tilemap(&mut self, slot: usize, tilemap: TilemapId) -> RastileResult<()> {
        if self.assets.tilemap(tilemap).is_none() {
            return Err(RastileError::config("unknown tilemap id"));
        }
        self.layer_mut(slot)?
            .set_content(LayerContent::Tilemap(tilemap));
        Ok(())
    }

    /// Bind a flat bitmap to a layer slot, replacing any previous content.
    pub fn set_layer_bitmap(&mut self, slot: usize, bitmap: BitmapId) -> RastileResult<()> {
        if self.assets.bitmap(bitmap).is_none() {
            return Err(RastileError::config("unknown bitmap id"));
        }
        self.layer_mut(slot)?
            .set_content(LayerContent::Bitmap(bitmap));
        Ok(())
    }

    /// Sprite slot by index.
    pub fn sprite(&self, slot: usize) -> RastileResult<&Sprite> {
        self.sprites
            .get(slot)
            .ok_or_else(|| RastileError::config(format!("sprite slot {slot} out of range")))
    }

    /// Mutable sprite slot by index (position, pivot, scale, flags, enable).
    pub fn sprite_mut(&mut self, slot: usize) -> RastileResult<&mut Sprite> {
        self.sprites
            .get_mut(slot)
            .ok_or_else(|| RastileError::config(format!("sprite slot {slot} out of range")))
    }

    /// Bind a spriteset and picture to a sprite slot.
    pub fn config_sprite(
        &mut self,
        slot: usize,
        spriteset: SpritesetId,
        picture: u32,
    ) -> RastileResult<()> {
        let count = self
            .assets
            .spriteset(spriteset)
            .ok_or_else(|| RastileError::config("unknown spriteset id"))?
            .picture_count();
        if picture as usize >= count {
            return Err(RastileError::config(format!(
                "picture {picture} out of range (spriteset has {count})"
            )));
        }
        self.sprite_mut(slot)?.bind(spriteset, picture);
        Ok(())
    }

    /// Replace a sprite's picture index.
    ///
    /// An out-of-range index is rejected and the sprite keeps its previous
    /// picture; never a crash, never a half-applied state.
    pub fn set_sprite_picture(&mut self, slot: usize, picture: u32) -> RastileResult<()> {
        let sprite = self.sprite(slot)?;
        let set = sprite
            .spriteset()
            .ok_or_else(|| RastileError::config("sprite has no spriteset bound"))?;
        let count = self
            .assets
            .spriteset(set)
            .map(|s| s.picture_count())
            .unwrap_or(0);
        if picture as usize >= count {
            return Err(RastileError::config(format!(
                "picture {picture} out of range (spriteset has {count})"
            )));
        }
        self.sprite_mut(slot)?.set_picture_unchecked(picture);
        Ok(())
    }

    /// Bind a picture-index sequence to a sprite, starting at step 0, Playing.
    ///
    /// Replaces any previous binding. Step 0's picture is applied
    /// immediately; steps whose picture falls outside the bound spriteset are
    /// skipped at apply time, leaving the previous picture in place.
    pub fn set_sprite_sequence(&mut self, slot: usize, sequence: Sequence) -> RastileResult<()> {
        if !sequence.drives_pictures() {
            return Err(RastileError::animation(
                "sequence does not drive picture indices",
            ));
        }
        if self.sprite(slot)?.spriteset().is_none() {
            return Err(RastileError::config("sprite has no spriteset bound"));
        }
        let player = SequencePlayer::new(sequence);
        if let StepValue::Picture(p) = player.current_value() {
            // Apply step 0 now; an out-of-range picture keeps the old one.
            let _ = self.set_sprite_picture(slot, p);
        }
        self.sprites[slot].player = Some(player);
        Ok(())
    }

    /// Pause a sprite's sequence; resuming continues where it froze.
    pub fn pause_sprite_sequence(&mut self, slot: usize) -> RastileResult<()> {
        if let Some(player) = self.sprite_mut(slot)?.player.as_mut() {
            player.pause();
        }
        Ok(())
    }

    /// Resume a paused sprite sequence.
    pub fn resume_sprite_sequence(&mut self, slot: usize) -> RastileResult<()> {
        if let Some(player) = self.sprite_mut(slot)?.player.as_mut() {
            player.resume();
        }
        Ok(())
    }

    /// Stop a sprite's sequence; the current picture is kept.
    pub fn stop_sprite_sequence(&mut self, slot: usize) -> RastileResult<()> {
        if let Some(player) = self.sprite_mut(slot)?.player.as_mut() {
            player.stop();
        }
        Ok(())
    }

    /// Playback state of a sprite's sequence, if one is bound.
    pub fn sprite_sequence_state(&self, slot: usize) -> RastileResult<Option<PlayState>> {
        Ok(self.sprite(slot)?.player().map(|p| p.state()))
    }

    /// Bind a palette-delta sequence to a palette, starting at step 0.
    ///
    /// Step 0's rotation is applied immediately; replaces any previous
    /// binding on the same palette.
    pub fn set_palette_sequence(
        &mut self,
        palette: PaletteId,
        sequence: Sequence,
    ) -> RastileResult<()> {
        if !sequence.drives_palette() {
            return Err(RastileError::animation(
                "sequence does not drive palette deltas",
            ));
        }
        if self.assets.palette(palette).is_none() {
            return Err(RastileError::config("unknown palette id"));
        }
        let player = SequencePlayer::new(sequence);
        apply_palette_step(&mut self.assets, palette, player.current_value());
        self.palette_players.insert(palette, player);
        Ok(())
    }

    /// Remove a palette's sequence binding, keeping the current table order.
    pub fn stop_palette_sequence(&mut self, palette: PaletteId) {
        self.palette_players.remove(&palette);
    }

    /// Playback state of a palette's sequence, if one is bound.
    pub fn palette_sequence_state(&self, palette: PaletteId) -> Option<PlayState> {
        self.palette_players.get(&palette).map(|p| p.state())
    }

    /// Enable color cycling on a palette. Idempotent per palette: enabling
    /// again replaces the running cycle and restarts its period.
    pub fn set_palette_cycle(&mut self, palette: PaletteId, cycle: PaletteCycle) -> RastileResult<()> {
        let pal = self
            .assets
            .palette(palette)
            .ok_or_else(|| RastileError::config("unknown palette id"))?;
        cycle.validate(pal)?;
        self.cycles.insert(palette, CycleState::new(cycle));
        Ok(())
    }

    /// Disable color cycling on a palette. Idempotent; the table keeps its
    /// current (possibly rotated) order.
    pub fn disable_palette_cycle(&mut self, palette: PaletteId) {
        self.cycles.remove(&palette);
    }

    /// Active cycle parameters of a palette, if any.
    pub fn palette_cycle(&self, palette: PaletteId) -> Option<PaletteCycle> {
        self.cycles.get(&palette).map(|c| c.params())
    }

    /// Install the raster scanline callback, replacing any previous one.
    pub fn set_raster_callback(&mut self, callback: impl FnMut(u32, RasterLine<'_>) + 'static) {
        self.raster = Some(Box::new(callback));
    }

    /// Remove the raster scanline callback.
    pub fn clear_raster_callback(&mut self) {
        self.raster = None;
    }

    /// Collision results of the last rendered frame.
    pub fn collisions(&self) -> &CollisionReport {
        &self.collisions
    }

    /// Render the frame at `frame`, synchronously and to completion.
    ///
    /// Advances all active palette cycles and sequence players across the
    /// frame delta since the previous render (re-rendering the same or an
    /// earlier frame advances nothing), clears to the background color,
    /// composites enabled layers back-to-front by slot index, then enabled
    /// sprites in increasing slot order while recording collision coverage.
    /// Steady-state rendering never fails; malformed bindings degrade to
    /// empty output for the entity concerned.
    #[tracing::instrument(skip(self), fields(frame = frame.0))]
    pub fn render(&mut self, frame: FrameIndex) {
        let ticks = match self.last_frame {
            None => frame.0,
            Some(last) => frame.0.saturating_sub(last.0),
        };
        self.last_frame = Some(frame);
        if ticks > 0 {
            self.advance_animators(ticks);
        }

        self.frame.clear(self.background);

        tracing::debug!(layers = self.layers.len(), "layer pass");
        let mut raster = self.raster.take();
        for y in 0..self.frame.height() {
            if let Some(cb) = raster.as_mut() {
                cb(
                    y,
                    RasterLine {
                        layers: &mut self.layers,
                        assets: &mut self.assets,
                    },
                );
            }
            for layer in &self.layers {
                blit_layer_line(layer, &self.assets, y, &mut self.frame);
            }
        }
        self.raster = raster;

        tracing::debug!(sprites = self.sprites.len(), "sprite pass");
        let mut coverages = Vec::new();
        for (slot, sprite) in self.sprites.iter().enumerate() {
            if let Some(cov) = blit_sprite(slot, sprite, &self.assets, &mut self.frame) {
                coverages.push(cov);
            }
        }
        self.collisions = CollisionReport::compute(&coverages);
        tracing::trace!(
            candidates = coverages.len(),
            pairs = self.collisions.pairs().count(),
            "collision pass"
        );
    }

    /// Advance palette cycles and sequence players by `ticks` frame ticks.
    fn advance_animators(&mut self, ticks: u64) {
        let delta_ms = self.fps.frames_to_ms(ticks);

        for (&palette, state) in &mut self.cycles {
            if let Some(pal) = self.assets.palette_mut(palette) {
                state.tick(ticks, pal);
            }
        }

        for (&palette, player) in &mut self.palette_players {
            let mut steps = Vec::new();
            player.tick(delta_ms, |value| steps.push(value));
            for value in steps {
                apply_palette_step(&mut self.assets, palette, value);
            }
        }

        for sprite in &mut self.sprites {
            let Some(player) = sprite.player.as_mut() else {
                continue;
            };
            let mut last_picture = None;
            player.tick(delta_ms, |value| {
                if let StepValue::Picture(p) = value {
                    last_picture = Some(p);
                }
            });
            let Some(picture) = last_picture else {
                continue;
            };
            let Some(set) = sprite.spriteset() else {
                continue;
            };
            let in_range = self
                .assets
                .spriteset(set)
                .is_some_and(|s| (picture as usize) < s.picture_count());
            if in_range {
                sprite.set_picture_unchecked(picture);
            }
        }
    }
}

fn apply_palette_step(assets: &mut AssetStore, palette: PaletteId, value: StepValue) {
    if let StepValue::PaletteDelta {
        first,
        count,
        shift,
    } = value
        && let Some(pal) = assets.palette_mut(palette)
    {
        // Out-of-range deltas are skipped; rendering must not abort.
        let _ = pal.cycle_range(usize::from(first), usize::from(count), shift);
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
