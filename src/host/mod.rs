//! Host environment abstraction.
//!
//! The renderer never owns an event loop. A host reports the viewport and
//! the reduced-motion preference, hands out frame handles and resize
//! listener ids, and later calls back into the renderer with them:
//! - [`ManualHost`]: deterministic, headless, driven explicitly
//! - `paced` (feature `tokio`): wall-clock pacing for a `ManualHost`

pub mod manual;
#[cfg(feature = "tokio")]
pub mod paced;

pub use manual::ManualHost;
#[cfg(feature = "tokio")]
pub use paced::run_paced;

/// Largest device pixel ratio honoured when sizing the backing buffer.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Token for one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Token for one registered resize listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Logical viewport as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in logical pixels.
    pub width: f32,
    /// Height in logical pixels.
    pub height: f32,
    /// Raw device pixel ratio, before clamping.
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    pub fn with_device_pixel_ratio(mut self, ratio: f32) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Device pixel ratio clamped to `[1, MAX_PIXEL_RATIO]`.
    pub fn pixel_ratio(&self) -> f32 {
        clamp_pixel_ratio(self.device_pixel_ratio)
    }
}

/// Clamp a device pixel ratio to `[1, MAX_PIXEL_RATIO]`.
///
/// Missing (non-finite or non-positive) ratios count as 1.
pub fn clamp_pixel_ratio(ratio: f32) -> f32 {
    if !ratio.is_finite() || ratio <= 0.0 {
        return 1.0;
    }
    ratio.clamp(1.0, MAX_PIXEL_RATIO)
}

/// Backing buffer size for a logical size at a (clamped) pixel ratio.
pub fn backing_size(width: f32, height: f32, pixel_ratio: f32) -> (u32, u32) {
    (
        (width * pixel_ratio).floor().max(0.0) as u32,
        (height * pixel_ratio).floor().max(0.0) as u32,
    )
}

/// What the renderer needs from its environment.
pub trait Host {
    fn viewport(&self) -> Viewport;

    /// Reduced-motion accessibility preference. Read once per mount.
    fn prefers_reduced_motion(&self) -> bool;

    /// Schedule a frame callback for the next visual frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a scheduled frame. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    fn add_resize_listener(&mut self) -> ListenerId;

    /// Deregister a listener. Unknown ids are ignored.
    fn remove_resize_listener(&mut self, id: ListenerId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_ratio_clamped() {
        assert_eq!(clamp_pixel_ratio(0.5), 1.0);
        assert_eq!(clamp_pixel_ratio(1.5), 1.5);
        assert_eq!(clamp_pixel_ratio(3.0), 2.0);
        assert_eq!(clamp_pixel_ratio(0.0), 1.0);
        assert_eq!(clamp_pixel_ratio(f32::NAN), 1.0);
        assert_eq!(clamp_pixel_ratio(f32::INFINITY), 1.0);
    }

    #[test]
    fn test_backing_size_floors() {
        assert_eq!(backing_size(800.0, 600.0, 2.0), (1600, 1200));
        assert_eq!(backing_size(333.0, 201.0, 1.5), (499, 301));
        assert_eq!(backing_size(0.0, 0.0, 2.0), (0, 0));
    }

    #[test]
    fn test_viewport_pixel_ratio() {
        let viewport = Viewport::new(1024.0, 768.0).with_device_pixel_ratio(3.0);
        assert_eq!(viewport.pixel_ratio(), 2.0);
        assert_eq!(Viewport::new(10.0, 10.0).pixel_ratio(), 1.0);
    }
}
