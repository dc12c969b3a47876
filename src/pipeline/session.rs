//! Render Session
//!
//! The explicit context object the host's draw-loop hooks talk to. It owns
//! what would otherwise be ambient process state: the current rendering
//! phase, the active pack pipeline slot, the texture tracker wiring and the
//! frame's debug overlay lines.
//!
//! # Hook pairing
//!
//! Every `begin_*` hook pushes the phase that was current on entry and the
//! matching `end_*` hook restores it, so nesting (e.g. block entities drawn
//! during terrain) unwinds correctly and the machine always returns to
//! `None` by the end of the frame. All hooks degrade to silent no-ops when
//! no pipeline is attached — shaders-off never fails a draw call.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Mat4, Vec3};
use log::debug;
use smallvec::SmallVec;

use crate::gl::{RenderDevice, TextureHandle};
use crate::pipeline::phase::{TerrainLayer, WorldRenderingPhase};
use crate::pipeline::pipeline::PackPipeline;
use crate::pipeline::selector::ProgramSelector;
use crate::textures::tracker::{TextureResource, TextureTracker};
use crate::uniforms::state::CapturedRenderState;

/// Session-long rendering context driven by the host's draw loop.
#[derive(Default)]
pub struct RenderSession {
    phase: WorldRenderingPhase,
    phase_stack: SmallVec<[WorldRenderingPhase; 4]>,
    pipeline: Option<PackPipeline>,
    tracker: TextureTracker,
    state: Rc<CapturedRenderState>,
    debug_text: Vec<String>,
}

impl RenderSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Pipeline lifecycle ─────────────────────────────────────────────────

    /// Installs a freshly loaded pack pipeline, tearing down any previous
    /// one and wiring the texture tracker's rebind callback to the new
    /// selector.
    pub fn attach_pipeline(&mut self, device: &mut dyn RenderDevice, pipeline: PackPipeline) {
        self.detach_pipeline(device);

        let selector = pipeline.selector();
        self.tracker.set_bind_callback(Box::new(
            move |device: &mut dyn RenderDevice, resource: Option<&TextureResource>| {
                selector.borrow_mut().on_primary_texture_changed(device, resource);
            },
        ));

        debug!("attaching shader pack '{}'", pipeline.name());
        self.pipeline = Some(pipeline);
        self.phase = WorldRenderingPhase::None;
        self.phase_stack.clear();
    }

    /// Unloads the active pipeline (pack unload or host resource reload).
    pub fn detach_pipeline(&mut self, device: &mut dyn RenderDevice) {
        if let Some(mut pipeline) = self.pipeline.take() {
            self.tracker.clear_bind_callback();
            pipeline.destroy(device);
        }
        self.phase = WorldRenderingPhase::None;
        self.phase_stack.clear();
    }

    #[must_use]
    pub fn has_active_pipeline(&self) -> bool {
        self.pipeline.is_some()
    }

    #[must_use]
    pub fn active_pack_name(&self) -> Option<&str> {
        self.pipeline.as_ref().map(PackPipeline::name)
    }

    // ── Phase state machine ────────────────────────────────────────────────

    /// The current phase; `None` whenever no pipeline is active.
    #[must_use]
    pub fn current_phase(&self) -> WorldRenderingPhase {
        if self.pipeline.is_some() {
            self.phase
        } else {
            WorldRenderingPhase::None
        }
    }

    /// Sets the phase directly. Silent no-op without an active pipeline.
    pub fn set_phase(&mut self, phase: WorldRenderingPhase) {
        if self.pipeline.is_some() {
            self.phase = phase;
        }
    }

    /// Enters `phase`, remembering the prior one for [`leave_phase`], and
    /// binds the mapped program.
    ///
    /// [`leave_phase`]: Self::leave_phase
    pub fn enter_phase(&mut self, device: &mut dyn RenderDevice, phase: WorldRenderingPhase) {
        let Some(pipeline) = &self.pipeline else {
            return;
        };
        self.phase_stack.push(self.phase);
        self.phase = phase;
        pipeline.select(device, phase);
    }

    /// Restores the phase that was current when the matching
    /// [`enter_phase`](Self::enter_phase) ran.
    pub fn leave_phase(&mut self, device: &mut dyn RenderDevice) {
        let Some(pipeline) = &self.pipeline else {
            return;
        };
        self.phase = self.phase_stack.pop().unwrap_or(WorldRenderingPhase::None);
        pipeline.select(device, self.phase);
    }

    // ── Frame boundaries ───────────────────────────────────────────────────

    /// Frame-start hook: captures the matrices the host is about to draw
    /// with, runs the pack's clear passes and resets the debug overlay.
    pub fn begin_world_rendering(
        &mut self,
        device: &mut dyn RenderDevice,
        model_view: Mat4,
        projection: Mat4,
        camera_position: Vec3,
        tick_delta: f32,
    ) {
        self.state.set_gbuffer_model_view(model_view);
        self.state.set_gbuffer_projection(projection);
        self.state.set_camera_position(camera_position);
        self.state.set_tick_delta(tick_delta);
        self.state.advance_frame();

        self.debug_text.clear();

        let Some(pipeline) = &self.pipeline else {
            return;
        };

        self.phase = WorldRenderingPhase::None;
        self.phase_stack.clear();
        pipeline.begin_frame(device);
        pipeline.add_debug_lines(&mut self.debug_text);
    }

    /// Frame-end hook: unwinds to `None` and restores the host default
    /// program.
    pub fn end_world_rendering(&mut self, device: &mut dyn RenderDevice) {
        let Some(pipeline) = &self.pipeline else {
            return;
        };
        self.phase = WorldRenderingPhase::None;
        self.phase_stack.clear();
        pipeline.select(device, WorldRenderingPhase::None);
    }

    // ── Paired draw-phase hooks ────────────────────────────────────────────

    pub fn begin_sky_rendering(&mut self, device: &mut dyn RenderDevice) {
        self.enter_phase(device, WorldRenderingPhase::Sky);
    }

    pub fn end_sky_rendering(&mut self, device: &mut dyn RenderDevice) {
        self.leave_phase(device);
    }

    pub fn begin_terrain_layer(&mut self, device: &mut dyn RenderDevice, layer: TerrainLayer) {
        self.enter_phase(device, WorldRenderingPhase::from_terrain_layer(layer));
    }

    pub fn end_terrain_layer(&mut self, device: &mut dyn RenderDevice) {
        self.leave_phase(device);
    }

    pub fn begin_entities(&mut self, device: &mut dyn RenderDevice) {
        self.enter_phase(device, WorldRenderingPhase::Entities);
    }

    pub fn end_entities(&mut self, device: &mut dyn RenderDevice) {
        self.leave_phase(device);
    }

    pub fn begin_block_entities(&mut self, device: &mut dyn RenderDevice) {
        self.enter_phase(device, WorldRenderingPhase::BlockEntities);
    }

    pub fn end_block_entities(&mut self, device: &mut dyn RenderDevice) {
        self.leave_phase(device);
    }

    pub fn begin_particles(&mut self, device: &mut dyn RenderDevice) {
        self.enter_phase(device, WorldRenderingPhase::Particles);
    }

    pub fn end_particles(&mut self, device: &mut dyn RenderDevice) {
        self.leave_phase(device);
    }

    pub fn begin_clouds(&mut self, device: &mut dyn RenderDevice) {
        self.enter_phase(device, WorldRenderingPhase::Clouds);
    }

    pub fn end_clouds(&mut self, device: &mut dyn RenderDevice) {
        self.leave_phase(device);
    }

    pub fn begin_weather(&mut self, device: &mut dyn RenderDevice) {
        self.enter_phase(device, WorldRenderingPhase::RainSnow);
    }

    pub fn end_weather(&mut self, device: &mut dyn RenderDevice) {
        self.leave_phase(device);
    }

    pub fn begin_world_border(&mut self, device: &mut dyn RenderDevice) {
        self.enter_phase(device, WorldRenderingPhase::WorldBorder);
    }

    pub fn end_world_border(&mut self, device: &mut dyn RenderDevice) {
        self.leave_phase(device);
    }

    // ── Texture lifecycle notifications ────────────────────────────────────

    /// Host interception point for texture-unit binds.
    pub fn on_set_shader_texture(
        &mut self,
        device: &mut dyn RenderDevice,
        unit: u32,
        handle: TextureHandle,
    ) {
        self.tracker.on_bind(device, unit, handle);
    }

    /// Host interception point for texture deletion.
    pub fn on_delete_texture(&mut self, handle: TextureHandle) {
        self.tracker.on_delete(handle);
    }

    /// Registers a texture allocated by the host or by a pack loader.
    pub fn track_texture(&mut self, handle: TextureHandle, resource: TextureResource) {
        self.tracker.track(handle, resource);
    }

    #[must_use]
    pub fn texture_tracker(&self) -> &TextureTracker {
        &self.tracker
    }

    // ── Shared per-frame state and diagnostics ─────────────────────────────

    /// The captured state uniform suppliers read from. Clone the `Rc` into
    /// supplier closures when building [`ProgramUniforms`].
    ///
    /// [`ProgramUniforms`]: crate::uniforms::ProgramUniforms
    #[must_use]
    pub fn captured_state(&self) -> Rc<CapturedRenderState> {
        Rc::clone(&self.state)
    }

    /// Appends a human-readable line to the host debug overlay. Lines are
    /// cleared at the next frame start; ordering within a frame is append
    /// order.
    pub fn add_debug_text(&mut self, line: impl Into<String>) {
        self.debug_text.push(line.into());
    }

    #[must_use]
    pub fn debug_text(&self) -> &[String] {
        &self.debug_text
    }

    /// Shared access to the active selector, for host components that need
    /// to query the bound program.
    #[must_use]
    pub fn selector(&self) -> Option<Rc<RefCell<ProgramSelector>>> {
        self.pipeline.as_ref().map(PackPipeline::selector)
    }
}
