//! Texture Tracker
//!
//! Process-wide registry mapping host-issued texture handles to their
//! logical resources, fed by the host's allocation/bind/delete interception
//! points. The pipeline registers one callback that fires when the primary
//! sampling unit is rebound, so it can react to externally swapped textures
//! (mipmap or PBR substitution).
//!
//! # Re-entrancy
//!
//! A callback may itself rebind unit 0 (e.g. by swapping in a PBR variant),
//! which would recurse into [`TextureTracker::on_bind`]. A single in-flight
//! flag suppresses nested notifications while one is being processed;
//! nested rebinds are dropped, not queued, and logged at `trace` level.
//!
//! All state lives behind `Cell`/`RefCell`: the tracker is only touched
//! from the render thread, and the guard substitutes for a lock against
//! logical recursion within that thread.

use std::cell::{Cell, RefCell};

use log::trace;
use rustc_hash::FxHashMap;

use crate::gl::{PRIMARY_SAMPLER_UNIT, RenderDevice, TextureHandle};

/// Logical description of a tracked texture.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TextureResource {
    pub handle: TextureHandle,
    /// Whether auxiliary PBR data (normal/specular) is paired with this
    /// texture. Consumers default to "no PBR data present" when absent.
    pub has_pbr: bool,
    pub label: Option<String>,
}

impl TextureResource {
    #[must_use]
    pub fn new(handle: TextureHandle) -> Self {
        Self {
            handle,
            has_pbr: false,
            label: None,
        }
    }

    #[must_use]
    pub fn with_pbr(mut self) -> Self {
        self.has_pbr = true;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Callback invoked when the primary sampling unit is rebound. Receives the
/// tracked resource for the newly bound handle, or `None` for an untracked
/// one.
pub type BindCallback = Box<dyn FnMut(&mut dyn RenderDevice, Option<&TextureResource>)>;

/// Registry of live texture resources with bind/delete interception.
#[derive(Default)]
pub struct TextureTracker {
    textures: RefCell<FxHashMap<u32, TextureResource>>,
    bind_locked: Cell<bool>,
    bind_callback: RefCell<Option<BindCallback>>,
    /// Set when the callback is unregistered while a notification is in
    /// flight, so the taken-out callback is not re-installed afterwards.
    callback_cleared: Cell<bool>,
}

impl TextureTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `resource` under `handle`. Called from the host's texture
    /// allocation interception point.
    pub fn track(&self, handle: TextureHandle, resource: TextureResource) {
        self.textures.borrow_mut().insert(handle.0, resource);
    }

    /// Returns the tracked resource for `handle`, or `None` if the handle
    /// was never tracked or has been deleted. Never panics for unknown
    /// handles.
    #[must_use]
    pub fn get(&self, handle: TextureHandle) -> Option<TextureResource> {
        self.textures.borrow().get(&handle.0).cloned()
    }

    /// Installs the pipeline-level rebind callback, replacing any previous
    /// one.
    pub fn set_bind_callback(&self, callback: BindCallback) {
        *self.bind_callback.borrow_mut() = Some(callback);
    }

    pub fn clear_bind_callback(&self) {
        self.callback_cleared.set(true);
        *self.bind_callback.borrow_mut() = None;
    }

    /// Host interception point: `handle` was just bound to texture unit
    /// `unit`.
    ///
    /// Only the primary sampling unit is observed. Invokes at most one
    /// pipeline callback per outer call and restores the physical binding
    /// afterwards, so observers never regress the hardware state a caller
    /// expects.
    pub fn on_bind(&self, device: &mut dyn RenderDevice, unit: u32, handle: TextureHandle) {
        if unit != PRIMARY_SAMPLER_UNIT {
            return;
        }

        if self.bind_locked.replace(true) {
            trace!("dropping nested bind notification for texture {handle:?}");
            return;
        }

        // Clone out of the registry so the callback may call track()/get()
        // without hitting an outstanding borrow.
        let resource = self.textures.borrow().get(&handle.0).cloned();

        // Take the callback out of its slot for the duration of the call so
        // a callback that re-wires the tracker cannot collide with a live
        // borrow. It goes back afterwards unless the dispatch unregistered
        // or replaced it.
        let callback = self.bind_callback.borrow_mut().take();
        if let Some(mut callback) = callback {
            self.callback_cleared.set(false);
            callback(device, resource.as_ref());
            device.bind_texture(PRIMARY_SAMPLER_UNIT, handle);

            if !self.callback_cleared.get() {
                let mut slot = self.bind_callback.borrow_mut();
                if slot.is_none() {
                    *slot = Some(callback);
                }
            }
        }

        self.bind_locked.set(false);
    }

    /// Host interception point: `handle` was deleted. Idempotent; deleting
    /// an untracked handle is not an error.
    pub fn on_delete(&self, handle: TextureHandle) {
        self.textures.borrow_mut().remove(&handle.0);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.borrow().is_empty()
    }
}
