//! Deterministic headless host.
//!
//! Frames only happen when [`ManualHost::dispatch_frames`] is called and
//! resizes only when [`ManualHost::resize`] is called, which makes the
//! renderer lifecycle fully scriptable from tests, benches and offline
//! exporters.

use super::{FrameHandle, Host, ListenerId, Viewport};
use crate::renderer::ParticleFieldRenderer;
use crate::surface::Surface;
use std::collections::BTreeSet;

/// Host with an explicit frame pump.
#[derive(Debug, Clone)]
pub struct ManualHost {
    viewport: Viewport,
    reduced_motion: bool,
    next_id: u64,
    pending: BTreeSet<FrameHandle>,
    listeners: BTreeSet<ListenerId>,
}

impl ManualHost {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_viewport(Viewport::new(width, height))
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            viewport,
            reduced_motion: false,
            next_id: 1,
            pending: BTreeSet::new(),
            listeners: BTreeSet::new(),
        }
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    /// Change the viewport without notifying listeners.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    pub fn is_frame_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver every frame pending right now. Frames requested while
    /// delivering belong to the next call. Returns how many ticks ran.
    pub fn dispatch_frames<S: Surface>(&mut self, renderer: &mut ParticleFieldRenderer<S>) -> usize {
        let batch = std::mem::take(&mut self.pending);
        batch
            .into_iter()
            .filter(|&handle| renderer.handle_frame(handle, self).is_some())
            .count()
    }

    /// Change the viewport and notify every registered listener.
    /// Returns how many listeners acted on it.
    pub fn resize<S: Surface>(
        &mut self,
        width: f32,
        height: f32,
        renderer: &mut ParticleFieldRenderer<S>,
    ) -> usize {
        self.viewport.width = width;
        self.viewport.height = height;

        let listeners: Vec<ListenerId> = self.listeners.iter().copied().collect();
        listeners
            .into_iter()
            .filter(|&id| renderer.handle_resize(id, self))
            .count()
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Host for ManualHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle::new(self.next_id());
        self.pending.insert(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.remove(&handle);
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        let id = ListenerId::new(self.next_id());
        self.listeners.insert(id);
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_requests_and_cancels() {
        let mut host = ManualHost::new(100.0, 100.0);
        let a = host.request_frame();
        let b = host.request_frame();
        assert_ne!(a, b);
        assert_eq!(host.pending_frames(), 2);

        host.cancel_frame(a);
        assert!(!host.is_frame_pending(a));
        assert!(host.is_frame_pending(b));

        host.cancel_frame(a);
        assert_eq!(host.pending_frames(), 1);
    }

    #[test]
    fn test_listeners_register_and_remove() {
        let mut host = ManualHost::new(100.0, 100.0);
        let id = host.add_resize_listener();
        assert_eq!(host.listener_count(), 1);
        host.remove_resize_listener(id);
        host.remove_resize_listener(id);
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_viewport_and_preference() {
        let host = ManualHost::with_viewport(Viewport::new(640.0, 480.0).with_device_pixel_ratio(1.5))
            .with_reduced_motion(true);
        assert!(host.prefers_reduced_motion());
        assert_eq!(host.viewport().pixel_ratio(), 1.5);
    }
}
