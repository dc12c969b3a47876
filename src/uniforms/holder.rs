//! Program Uniform Holder
//!
//! Collects the uniform wrappers of one compiled program behind a fluent
//! builder, in the order the pack declares them. The pipeline calls
//! [`ProgramUniforms::update_all`] right after binding the program so the
//! GPU slots are fresh for the next batch of draw calls.

use glam::{IVec2, IVec3, Mat4, Vec2, Vec3, Vec4};

use crate::gl::{RenderDevice, UniformLocation};
use crate::uniforms::notifier::ValueUpdateNotifier;
use crate::uniforms::uniform::{CachedUniform, UniformSlot, UniformUpdateFrequency};

/// All uniform bindings of a single compiled program.
///
/// Owned by the program's registry entry, so the wrappers are destroyed
/// together with the program and can never outlive their slots.
#[derive(Default)]
pub struct ProgramUniforms {
    uniforms: Vec<Box<dyn UniformSlot>>,
}

impl ProgramUniforms {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uniform1f(
        &mut self,
        frequency: UniformUpdateFrequency,
        location: UniformLocation,
        supplier: impl FnMut() -> f32 + 'static,
    ) -> &mut Self {
        self.push(CachedUniform::new(location, frequency, supplier))
    }

    pub fn uniform1i(
        &mut self,
        frequency: UniformUpdateFrequency,
        location: UniformLocation,
        supplier: impl FnMut() -> i32 + 'static,
    ) -> &mut Self {
        self.push(CachedUniform::new(location, frequency, supplier))
    }

    /// Boolean uniform, carried as a 0/1 integer projection.
    pub fn uniform1b(
        &mut self,
        frequency: UniformUpdateFrequency,
        location: UniformLocation,
        mut supplier: impl FnMut() -> bool + 'static,
    ) -> &mut Self {
        self.push(CachedUniform::new(location, frequency, move || {
            i32::from(supplier())
        }))
    }

    pub fn uniform2f(
        &mut self,
        frequency: UniformUpdateFrequency,
        location: UniformLocation,
        supplier: impl FnMut() -> Vec2 + 'static,
    ) -> &mut Self {
        self.push(CachedUniform::new(location, frequency, supplier))
    }

    pub fn uniform3f(
        &mut self,
        frequency: UniformUpdateFrequency,
        location: UniformLocation,
        supplier: impl FnMut() -> Vec3 + 'static,
    ) -> &mut Self {
        self.push(CachedUniform::new(location, frequency, supplier))
    }

    /// Truncates a four-component supplier to its xyz part.
    pub fn uniform_truncated3f(
        &mut self,
        frequency: UniformUpdateFrequency,
        location: UniformLocation,
        mut supplier: impl FnMut() -> Vec4 + 'static,
    ) -> &mut Self {
        self.push(CachedUniform::new(location, frequency, move || {
            supplier().truncate()
        }))
    }

    pub fn uniform4f(
        &mut self,
        frequency: UniformUpdateFrequency,
        location: UniformLocation,
        supplier: impl FnMut() -> Vec4 + 'static,
    ) -> &mut Self {
        self.push(CachedUniform::new(location, frequency, supplier))
    }

    pub fn uniform2i(
        &mut self,
        frequency: UniformUpdateFrequency,
        location: UniformLocation,
        supplier: impl FnMut() -> IVec2 + 'static,
    ) -> &mut Self {
        self.push(CachedUniform::new(location, frequency, supplier))
    }

    pub fn uniform3i(
        &mut self,
        frequency: UniformUpdateFrequency,
        location: UniformLocation,
        supplier: impl FnMut() -> IVec3 + 'static,
    ) -> &mut Self {
        self.push(CachedUniform::new(location, frequency, supplier))
    }

    pub fn uniform_matrix(
        &mut self,
        frequency: UniformUpdateFrequency,
        location: UniformLocation,
        supplier: impl FnMut() -> Mat4 + 'static,
    ) -> &mut Self {
        self.push(CachedUniform::new(location, frequency, supplier))
    }

    /// Float uniform re-armed by `notifier` instead of per-frame polling.
    pub fn notified_uniform1f(
        &mut self,
        location: UniformLocation,
        supplier: impl FnMut() -> f32 + 'static,
        notifier: &mut ValueUpdateNotifier,
    ) -> &mut Self {
        self.push(CachedUniform::notified(location, supplier, notifier))
    }

    /// Integer uniform re-armed by `notifier` instead of per-frame polling.
    pub fn notified_uniform1i(
        &mut self,
        location: UniformLocation,
        supplier: impl FnMut() -> i32 + 'static,
        notifier: &mut ValueUpdateNotifier,
    ) -> &mut Self {
        self.push(CachedUniform::notified(location, supplier, notifier))
    }

    /// Matrix uniform re-armed by `notifier` instead of per-frame polling.
    pub fn notified_uniform_matrix(
        &mut self,
        location: UniformLocation,
        supplier: impl FnMut() -> Mat4 + 'static,
        notifier: &mut ValueUpdateNotifier,
    ) -> &mut Self {
        self.push(CachedUniform::notified(location, supplier, notifier))
    }

    fn push<T: crate::uniforms::uniform::UniformValue>(
        &mut self,
        uniform: CachedUniform<T>,
    ) -> &mut Self {
        self.uniforms.push(Box::new(uniform));
        self
    }

    /// Updates every binding per its frequency contract. The owning program
    /// must be bound when this is called.
    pub fn update_all(&mut self, device: &mut dyn RenderDevice) {
        for uniform in &mut self.uniforms {
            uniform.update(device);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.uniforms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.uniforms.is_empty()
    }
}
