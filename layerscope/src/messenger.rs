//! Notification of the map shell about layer changes.

/// Messenger is used to notify the application that the set of layers or their content changed
/// and the map should be redrawn.
pub trait Messenger: Send + Sync {
    /// Requests redraw of the map.
    fn request_redraw(&self);
}

/// Messenger that does nothing. Used when the store is not connected to any map.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyMessenger;

impl Messenger for DummyMessenger {
    fn request_redraw(&self) {}
}
