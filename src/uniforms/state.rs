//! Captured Render State
//!
//! A per-frame snapshot of the values the host engine feeds the draw loop:
//! model-view and projection matrices, camera position and the partial-tick
//! interpolation factor. Hooks write it at frame boundaries; uniform
//! suppliers read it through a shared `Rc`.
//!
//! All fields use `Cell` because suppliers are plain `Fn` closures invoked
//! from `update()` while the session holds the other reference — single
//! render thread, so the interior mutability is purely a borrow-shape fix.

use std::cell::Cell;

use glam::{Mat4, Vec3};

/// Frame-synchronous rendering state shared between hooks and uniform
/// suppliers.
#[derive(Default)]
pub struct CapturedRenderState {
    gbuffer_model_view: Cell<Mat4>,
    gbuffer_projection: Cell<Mat4>,
    camera_position: Cell<Vec3>,
    tick_delta: Cell<f32>,
    frame_counter: Cell<u32>,
}

impl CapturedRenderState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_gbuffer_model_view(&self, matrix: Mat4) {
        self.gbuffer_model_view.set(matrix);
    }

    #[must_use]
    pub fn gbuffer_model_view(&self) -> Mat4 {
        self.gbuffer_model_view.get()
    }

    pub fn set_gbuffer_projection(&self, matrix: Mat4) {
        self.gbuffer_projection.set(matrix);
    }

    #[must_use]
    pub fn gbuffer_projection(&self) -> Mat4 {
        self.gbuffer_projection.get()
    }

    pub fn set_camera_position(&self, position: Vec3) {
        self.camera_position.set(position);
    }

    #[must_use]
    pub fn camera_position(&self) -> Vec3 {
        self.camera_position.get()
    }

    pub fn set_tick_delta(&self, tick_delta: f32) {
        self.tick_delta.set(tick_delta);
    }

    #[must_use]
    pub fn tick_delta(&self) -> f32 {
        self.tick_delta.get()
    }

    /// Bumps the frame counter. Wraps at 720720, which is divisible by every
    /// integer up to 16, so packs using modular frame arithmetic never see a
    /// discontinuity at the wrap point.
    pub fn advance_frame(&self) {
        self.frame_counter
            .set((self.frame_counter.get() + 1) % 720_720);
    }

    #[must_use]
    pub fn frame_counter(&self) -> u32 {
        self.frame_counter.get()
    }
}
