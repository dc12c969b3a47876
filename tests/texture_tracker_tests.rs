//! Texture Tracker Tests
//!
//! Tests for:
//! - Track / get / delete registry behavior
//! - Bind callback dispatch with tracked and untracked handles
//! - Binding restoration after the callback runs
//! - Non-primary units being ignored
//! - The re-entrancy guard dropping nested bind notifications

mod common;

use std::cell::Cell;
use std::rc::Rc;

use prism::gl::{RenderDevice, TextureHandle};
use prism::{TextureResource, TextureTracker};

use common::{GpuCall, RecordingDevice};

// ============================================================================
// Registry Behavior
// ============================================================================

#[test]
fn tracked_textures_are_retrievable() {
    let tracker = TextureTracker::new();
    let handle = TextureHandle(42);

    tracker.track(handle, TextureResource::new(handle).with_label("terrain"));

    let resource = tracker.get(handle).expect("tracked handle must resolve");
    assert_eq!(resource.label.as_deref(), Some("terrain"));
    assert!(!resource.has_pbr);
}

#[test]
fn unknown_handles_resolve_to_none() {
    let tracker = TextureTracker::new();
    assert!(tracker.get(TextureHandle(999)).is_none());
}

#[test]
fn delete_is_idempotent() {
    let tracker = TextureTracker::new();
    let handle = TextureHandle(7);

    tracker.track(handle, TextureResource::new(handle));
    assert_eq!(tracker.len(), 1);

    tracker.on_delete(handle);
    tracker.on_delete(handle);
    tracker.on_delete(TextureHandle(8)); // never tracked

    assert!(tracker.is_empty(), "Deletes must not error or leave entries");
    assert!(tracker.get(handle).is_none());
}

#[test]
fn retrack_replaces_the_resource() {
    let tracker = TextureTracker::new();
    let handle = TextureHandle(7);

    tracker.track(handle, TextureResource::new(handle));
    tracker.track(handle, TextureResource::new(handle).with_pbr());

    assert!(tracker.get(handle).expect("still tracked").has_pbr);
    assert_eq!(tracker.len(), 1);
}

// ============================================================================
// Bind Callback Dispatch
// ============================================================================

#[test]
fn callback_receives_the_tracked_resource() {
    let tracker = TextureTracker::new();
    let handle = TextureHandle(3);
    tracker.track(handle, TextureResource::new(handle).with_pbr());

    let seen_pbr = Rc::new(Cell::new(false));
    let sink = Rc::clone(&seen_pbr);
    tracker.set_bind_callback(Box::new(move |_, resource| {
        sink.set(resource.is_some_and(|r| r.has_pbr));
    }));

    let mut device = RecordingDevice::new();
    tracker.on_bind(&mut device, 0, handle);

    assert!(seen_pbr.get(), "Callback must see the tracked resource");
}

#[test]
fn callback_receives_none_for_untracked_handles() {
    let tracker = TextureTracker::new();

    let saw_none = Rc::new(Cell::new(false));
    let sink = Rc::clone(&saw_none);
    tracker.set_bind_callback(Box::new(move |_, resource| {
        sink.set(resource.is_none());
    }));

    let mut device = RecordingDevice::new();
    tracker.on_bind(&mut device, 0, TextureHandle(55));

    assert!(saw_none.get(), "Untracked handles still notify, with None");
}

#[test]
fn binding_is_restored_after_the_callback() {
    let tracker = TextureTracker::new();
    let bound = TextureHandle(3);
    let swapped = TextureHandle(4);
    tracker.track(bound, TextureResource::new(bound));

    // A callback that disturbs unit 0 while reacting to the bind.
    tracker.set_bind_callback(Box::new(move |device, _| {
        device.bind_texture(0, swapped);
    }));

    let mut device = RecordingDevice::new();
    tracker.on_bind(&mut device, 0, bound);

    let last_bind = device
        .calls
        .iter()
        .rev()
        .find(|call| matches!(call, GpuCall::BindTexture(0, _)));
    assert_eq!(
        last_bind,
        Some(&GpuCall::BindTexture(0, bound)),
        "The handle the host bound must be in place when on_bind returns"
    );
}

#[test]
fn non_primary_units_are_ignored() {
    let tracker = TextureTracker::new();

    let fired = Rc::new(Cell::new(false));
    let sink = Rc::clone(&fired);
    tracker.set_bind_callback(Box::new(move |_, _| sink.set(true)));

    let mut device = RecordingDevice::new();
    tracker.on_bind(&mut device, 2, TextureHandle(1));

    assert!(!fired.get(), "Only unit 0 rebinds are observed");
    assert!(device.calls.is_empty());
}

#[test]
fn cleared_callback_no_longer_fires() {
    let tracker = TextureTracker::new();

    let fired = Rc::new(Cell::new(false));
    let sink = Rc::clone(&fired);
    tracker.set_bind_callback(Box::new(move |_, _| sink.set(true)));
    tracker.clear_bind_callback();

    let mut device = RecordingDevice::new();
    tracker.on_bind(&mut device, 0, TextureHandle(1));

    assert!(!fired.get());
}

#[test]
fn callback_that_unregisters_itself_stays_unregistered() {
    let tracker = Rc::new(TextureTracker::new());

    let invocations = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&invocations);
    let inner_tracker = Rc::clone(&tracker);
    tracker.set_bind_callback(Box::new(move |_, _| {
        counter.set(counter.get() + 1);
        // Pipeline teardown in reaction to a bind: the callback must not
        // come back after this notification finishes.
        inner_tracker.clear_bind_callback();
    }));

    let mut device = RecordingDevice::new();
    tracker.on_bind(&mut device, 0, TextureHandle(1));
    assert_eq!(invocations.get(), 1);

    tracker.on_bind(&mut device, 0, TextureHandle(1));
    assert_eq!(
        invocations.get(),
        1,
        "A callback unregistered during dispatch must not be re-installed"
    );
}

#[test]
fn callback_replaced_during_dispatch_wins() {
    let tracker = Rc::new(TextureTracker::new());

    let replacement_fired = Rc::new(Cell::new(false));
    let sink = Rc::clone(&replacement_fired);
    let inner_tracker = Rc::clone(&tracker);
    tracker.set_bind_callback(Box::new(move |_, _| {
        let sink = Rc::clone(&sink);
        inner_tracker.set_bind_callback(Box::new(move |_, _| sink.set(true)));
    }));

    let mut device = RecordingDevice::new();
    tracker.on_bind(&mut device, 0, TextureHandle(1));
    assert!(!replacement_fired.get());

    tracker.on_bind(&mut device, 0, TextureHandle(1));
    assert!(
        replacement_fired.get(),
        "A callback installed during dispatch replaces the in-flight one"
    );
}

// ============================================================================
// Re-entrancy Guard
// ============================================================================

#[test]
fn nested_bind_notifications_are_dropped() {
    let tracker = Rc::new(TextureTracker::new());
    let outer = TextureHandle(1);
    let nested = TextureHandle(2);

    let invocations = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&invocations);
    let inner_tracker = Rc::clone(&tracker);
    tracker.set_bind_callback(Box::new(move |device: &mut dyn RenderDevice, _| {
        counter.set(counter.get() + 1);
        // Reacting to the bind by rebinding unit 0 recurses into on_bind;
        // the guard must swallow it instead of notifying again.
        inner_tracker.on_bind(device, 0, nested);
    }));

    let mut device = RecordingDevice::new();
    tracker.on_bind(&mut device, 0, outer);

    assert_eq!(
        invocations.get(),
        1,
        "The nested notification must be dropped, not queued"
    );

    // The guard unlocks once the outer notification finishes.
    tracker.on_bind(&mut device, 0, outer);
    assert_eq!(
        invocations.get(),
        2,
        "A later bind must notify again after the guard released"
    );
}
