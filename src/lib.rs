//! Particle Field
//!
//! Ambient particle-field renderer for decorative full-viewport backgrounds.
//!
//! # Features
//!
//! - Area-scaled particle density with soft-wrap drift
//! - Proximity links faded by distance, hue cycled over time and position
//! - Device-pixel-ratio aware backing buffers (ratio clamped to 1..=2)
//! - Reduced-motion profile: fewer, slower particles and a single static frame
//! - Token-checked frame and resize callbacks so teardown never draws
//! - CPU raster surface via image/imageproc and a recording display list
//! - Paced frame driver via tokio (when the `tokio` feature is enabled)
//!
//! # Example
//!
//! ```
//! use particle_field::{DisplayList, ManualHost, ParticleFieldRenderer};
//!
//! let mut host = ManualHost::new(800.0, 600.0);
//! let mut renderer = ParticleFieldRenderer::new();
//! renderer.start(DisplayList::new(), &mut host);
//! assert_eq!(renderer.session().unwrap().particles().len(), 21);
//!
//! host.dispatch_frames(&mut renderer);
//! let surface = renderer.stop(&mut host).unwrap();
//! assert!(surface.draw_count() > 0);
//! ```

pub mod export;
pub mod field;
pub mod host;
pub mod renderer;
pub mod surface;

// Re-export commonly used types
pub use export::{parse_hex_color, ExportError, FrameExporter};
pub use field::{ConfigError, FieldParams, FrameStats, Hsla, MotionProfile, Particle, Session};
pub use host::{FrameHandle, Host, ListenerId, ManualHost, Viewport};
pub use renderer::{ParticleFieldRenderer, RendererConfig, RendererStatus};
pub use surface::{DisplayList, DrawCommand, RasterSurface, Surface};
