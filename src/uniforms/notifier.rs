//! Value Update Notifier
//!
//! A producer-side registration point used to announce "this value may have
//! changed". Uniform wrappers with [`UniformUpdateFrequency::OnNotify`]
//! register themselves here so a producer event re-arms their comparison
//! instead of relying on per-frame polling.
//!
//! The slot holds at most one listener; registering again replaces the
//! previous one.
//!
//! [`UniformUpdateFrequency::OnNotify`]: super::UniformUpdateFrequency::OnNotify

/// Single-slot change notifier.
#[derive(Default)]
pub struct ValueUpdateNotifier {
    listener: Option<Box<dyn Fn()>>,
}

impl ValueUpdateNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `listener`, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl Fn() + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Announces that the produced value may have changed.
    pub fn notify(&self) {
        if let Some(listener) = &self.listener {
            listener();
        }
    }

    /// Whether a listener is currently registered.
    #[must_use]
    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }
}
