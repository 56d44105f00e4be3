//! Per-mount session state and the frame algorithm.
//!
//! A [`Session`] is created when a renderer mounts and dropped when it stops.
//! It owns the surface and the particle set; nothing outside the session
//! reads or writes either.

use super::color::Hsla;
use super::links::{for_each_link, link_alpha};
use super::params::{FieldParams, MotionProfile};
use super::particle::{spawn_particles, Particle};
use crate::host::{backing_size, FrameHandle, ListenerId, Viewport};
use crate::surface::Surface;
use rand::Rng;

/// Summary of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// 1-based index of the frame within its session.
    pub frame: u64,
    pub particles: usize,
    pub links: usize,
    /// Hue counter after this frame's advance.
    pub hue: f64,
}

/// State of one mounted renderer.
pub struct Session<S: Surface> {
    surface: S,
    width: f32,
    height: f32,
    pixel_ratio: f32,
    profile: MotionProfile,
    hue: f64,
    particles: Vec<Particle>,
    pending_frame: Option<FrameHandle>,
    resize_listener: ListenerId,
    frames: u64,
    generation: u64,
    last_frame: Option<FrameStats>,
}

impl<S: Surface> Session<S> {
    /// The pixel ratio is taken from `viewport` here and kept for the whole
    /// session; later resizes only change the logical size.
    pub(crate) fn new(
        surface: S,
        viewport: Viewport,
        profile: MotionProfile,
        resize_listener: ListenerId,
    ) -> Self {
        Self {
            surface,
            width: 0.0,
            height: 0.0,
            pixel_ratio: viewport.pixel_ratio(),
            profile,
            hue: 0.0,
            particles: Vec::new(),
            pending_frame: None,
            resize_listener,
            frames: 0,
            generation: 0,
            last_frame: None,
        }
    }

    /// Resize the backing buffer to the viewport and respawn every particle.
    pub(crate) fn resize<R: Rng + ?Sized>(
        &mut self,
        viewport: Viewport,
        params: &FieldParams,
        rng: &mut R,
    ) {
        self.width = viewport.width.max(0.0);
        self.height = viewport.height.max(0.0);

        let backing = backing_size(self.width, self.height, self.pixel_ratio);
        self.surface.resize(backing, (self.width, self.height));
        self.surface.set_scale(self.pixel_ratio);

        self.particles = spawn_particles(
            rng,
            self.width,
            self.height,
            params,
            params.motion(self.profile),
        );
        self.generation += 1;

        log::debug!(
            "Spawned {} particles for {}x{} (backing {}x{}, ratio {})",
            self.particles.len(),
            self.width,
            self.height,
            backing.0,
            backing.1,
            self.pixel_ratio
        );
    }

    /// Advance the field by one frame and paint it.
    pub(crate) fn tick(&mut self, params: &FieldParams) -> FrameStats {
        let motion = params.motion(self.profile);
        let (width, height) = (self.width, self.height);

        self.hue += params.hue_step as f64;
        let base_hue = self.hue.rem_euclid(360.0) as f32;

        self.surface.clear(width, height);

        for p in &mut self.particles {
            p.advance(width, height, params.edge_margin);
        }

        let surface = &mut self.surface;
        let particles = &self.particles;

        let tone = &params.particle_tone;
        for p in particles {
            let color = Hsla::new(
                base_hue + p.x / tone.hue_spread,
                tone.saturation,
                tone.lightness,
                params.particle_alpha,
            );
            surface.fill_circle(p.x, p.y, p.r, color);
        }

        let tone = &params.link_tone;
        let max_distance_sq = motion.link_distance_sq();
        let links = for_each_link(particles, max_distance_sq, |a, b, distance_sq| {
            let color = Hsla::new(
                base_hue + (a.x + b.x) / tone.hue_spread,
                tone.saturation,
                tone.lightness,
                link_alpha(distance_sq, max_distance_sq, params.link_fade),
            );
            surface.stroke_line((a.x, a.y), (b.x, b.y), params.link_width, color);
        });

        self.frames += 1;
        let stats = FrameStats {
            frame: self.frames,
            particles: particles.len(),
            links,
            hue: self.hue,
        };
        self.last_frame = Some(stats);
        log::trace!("Frame {}: {} particles, {} links", stats.frame, stats.particles, links);
        stats
    }

    pub(crate) fn take_pending_frame(&mut self) -> Option<FrameHandle> {
        self.pending_frame.take()
    }

    pub(crate) fn set_pending_frame(&mut self, handle: FrameHandle) {
        self.pending_frame = Some(handle);
    }

    pub(crate) fn into_surface(self) -> S {
        self.surface
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Logical viewport size the particles were spawned for.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn profile(&self) -> MotionProfile {
        self.profile
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    pub fn resize_listener(&self) -> ListenerId {
        self.resize_listener
    }

    /// Frames rendered since mount.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Number of times the particle set has been (re)spawned.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_frame(&self) -> Option<FrameStats> {
        self.last_frame
    }
}
