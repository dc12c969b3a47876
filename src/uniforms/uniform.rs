//! Cached Uniform Wrappers
//!
//! Each wrapper owns one uniform slot of a compiled program: a typed value
//! supplier, the last value written to the GPU, and an update-frequency
//! contract. `update()` recomputes the value, compares it against the cache
//! and only writes through the [`RenderDevice`] on an actual change, so a
//! frame with stable inputs costs zero GPU uniform calls.
//!
//! Boolean uniforms have no native GPU type; they are carried as a 0/1
//! integer projection (see [`ProgramUniforms::uniform1b`]).
//!
//! [`ProgramUniforms::uniform1b`]: super::holder::ProgramUniforms::uniform1b

use std::cell::Cell;
use std::rc::Rc;

use glam::{IVec2, IVec3, Mat4, Vec2, Vec3, Vec4};

use crate::gl::{RenderDevice, UniformLocation};
use crate::uniforms::notifier::ValueUpdateNotifier;

/// How often a uniform binding re-evaluates its supplier.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UniformUpdateFrequency {
    /// Exactly one successful GPU write over the binding's lifetime.
    Once,
    /// Re-evaluated every frame; written only on change.
    PerFrame,
    /// Re-evaluated only after a [`ValueUpdateNotifier`] event.
    OnNotify,
}

/// A value that can be written to a program uniform slot.
pub trait UniformValue: Copy + PartialEq + 'static {
    fn write(self, device: &mut dyn RenderDevice, location: UniformLocation);
}

impl UniformValue for i32 {
    fn write(self, device: &mut dyn RenderDevice, location: UniformLocation) {
        device.uniform1i(location, self);
    }
}

impl UniformValue for f32 {
    fn write(self, device: &mut dyn RenderDevice, location: UniformLocation) {
        device.uniform1f(location, self);
    }
}

impl UniformValue for Vec2 {
    fn write(self, device: &mut dyn RenderDevice, location: UniformLocation) {
        device.uniform2f(location, self);
    }
}

impl UniformValue for Vec3 {
    fn write(self, device: &mut dyn RenderDevice, location: UniformLocation) {
        device.uniform3f(location, self);
    }
}

impl UniformValue for Vec4 {
    fn write(self, device: &mut dyn RenderDevice, location: UniformLocation) {
        device.uniform4f(location, self);
    }
}

impl UniformValue for IVec2 {
    fn write(self, device: &mut dyn RenderDevice, location: UniformLocation) {
        device.uniform2i(location, self);
    }
}

impl UniformValue for IVec3 {
    fn write(self, device: &mut dyn RenderDevice, location: UniformLocation) {
        device.uniform3i(location, self);
    }
}

impl UniformValue for Mat4 {
    fn write(self, device: &mut dyn RenderDevice, location: UniformLocation) {
        device.uniform_matrix4f(location, &self);
    }
}

/// Object-safe view of a cached uniform, used by [`ProgramUniforms`] to hold
/// heterogeneous wrappers in one list.
///
/// [`ProgramUniforms`]: super::holder::ProgramUniforms
pub trait UniformSlot {
    /// Re-evaluates the binding per its frequency contract and writes the
    /// value to the GPU if it changed.
    fn update(&mut self, device: &mut dyn RenderDevice);

    fn location(&self) -> UniformLocation;
}

/// A typed uniform wrapper with change detection.
pub struct CachedUniform<T: UniformValue> {
    location: UniformLocation,
    frequency: UniformUpdateFrequency,
    supplier: Box<dyn FnMut() -> T>,
    cached: Option<T>,
    /// Set by the registered notifier listener; only present for
    /// [`UniformUpdateFrequency::OnNotify`] bindings.
    dirty: Option<Rc<Cell<bool>>>,
}

impl<T: UniformValue> CachedUniform<T> {
    pub fn new(
        location: UniformLocation,
        frequency: UniformUpdateFrequency,
        supplier: impl FnMut() -> T + 'static,
    ) -> Self {
        debug_assert!(
            frequency != UniformUpdateFrequency::OnNotify,
            "OnNotify bindings must be built with CachedUniform::notified"
        );
        Self {
            location,
            frequency,
            supplier: Box::new(supplier),
            cached: None,
            dirty: None,
        }
    }

    /// Builds an `OnNotify` binding registered with `notifier`. The producer
    /// re-arms the comparison by calling [`ValueUpdateNotifier::notify`].
    pub fn notified(
        location: UniformLocation,
        supplier: impl FnMut() -> T + 'static,
        notifier: &mut ValueUpdateNotifier,
    ) -> Self {
        let dirty = Rc::new(Cell::new(false));
        let flag = Rc::clone(&dirty);
        notifier.set_listener(move || flag.set(true));

        Self {
            location,
            frequency: UniformUpdateFrequency::OnNotify,
            supplier: Box::new(supplier),
            cached: None,
            dirty: Some(dirty),
        }
    }

    fn should_poll(&self) -> bool {
        match self.frequency {
            UniformUpdateFrequency::Once => self.cached.is_none(),
            UniformUpdateFrequency::PerFrame => true,
            UniformUpdateFrequency::OnNotify => {
                // First update always populates the cache; afterwards only a
                // notification re-arms the poll.
                self.cached.is_none()
                    || self
                        .dirty
                        .as_ref()
                        .is_some_and(|flag| flag.replace(false))
            }
        }
    }
}

impl<T: UniformValue> UniformSlot for CachedUniform<T> {
    fn update(&mut self, device: &mut dyn RenderDevice) {
        if !self.should_poll() {
            return;
        }

        let value = (self.supplier)();
        if self.cached != Some(value) {
            value.write(device, self.location);
            self.cached = Some(value);
        }
    }

    fn location(&self) -> UniformLocation {
        self.location
    }
}
