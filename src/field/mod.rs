//! Particle field simulation.
//!
//! Provides the pieces a renderer session is assembled from:
//! - Particle data, area-scaled spawning and soft-wrap motion
//! - O(n²) proximity links with distance-faded opacity
//! - Hue-cycled HSL colours
//! - Tunable, serialisable parameters for both motion profiles

pub mod color;
pub mod links;
pub mod params;
pub mod particle;
pub mod session;

pub use color::Hsla;
pub use links::{find_links, for_each_link, link_alpha, Link};
pub use params::{ConfigError, FieldParams, MotionParams, MotionProfile, ToneParams};
pub use particle::{particle_count, spawn_particles, Particle, MAX_PARTICLES};
pub use session::{FrameStats, Session};
