//! Particle field renderer: the mountable unit hosts interact with.
//!
//! Lifecycle: `start` mounts a session on a surface, the host calls back
//! with frame handles and resize notifications, `stop` tears down. Each
//! callback carries the token the renderer handed out (frame handle or
//! listener id); anything that does not match the live session is ignored,
//! so a cancelled frame can never draw after teardown.

use crate::field::{ConfigError, FieldParams, FrameStats, MotionProfile, Session};
use crate::host::{FrameHandle, Host, ListenerId};
use crate::surface::Surface;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Renderer configuration.
#[derive(Debug, Clone, Default)]
pub struct RendererConfig {
    pub params: FieldParams,
    /// Seed for spawn randomness. `None` seeds from system entropy.
    pub seed: Option<u64>,
}

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererStatus {
    /// Never started, or stopped.
    Stopped,
    /// Mounted on a surface without a 2D context; does nothing.
    Inert,
    /// Mounted and scheduling a frame per visual frame.
    Animating,
    /// Mounted under reduced motion; the static frame has been drawn.
    Static,
}

enum Mount<S: Surface> {
    Unmounted,
    Inert(S),
    Active(Session<S>),
}

/// Ambient particle field bound to one surface at a time.
pub struct ParticleFieldRenderer<S: Surface> {
    params: FieldParams,
    rng: StdRng,
    mount: Mount<S>,
}

impl<S: Surface> ParticleFieldRenderer<S> {
    /// Renderer with the default parameters, seeded from system entropy.
    pub fn new() -> Self {
        Self::from_parts(FieldParams::default(), None)
    }

    /// Build a renderer after validating `config.params`.
    pub fn with_config(config: RendererConfig) -> Result<Self, ConfigError> {
        config.params.validate()?;
        Ok(Self::from_parts(config.params, config.seed))
    }

    fn from_parts(params: FieldParams, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            params,
            rng,
            mount: Mount::Unmounted,
        }
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    /// Mount on `surface`.
    ///
    /// Registers a resize listener, sizes the surface and spawns, then
    /// schedules the first frame, or under reduced motion draws the single
    /// static frame right away. A surface without a 2D context leaves the
    /// renderer inert. Starting a mounted renderer remounts it.
    pub fn start<H: Host + ?Sized>(&mut self, surface: S, host: &mut H) {
        if !matches!(self.mount, Mount::Unmounted) {
            log::debug!("Renderer already mounted, remounting");
            self.stop(host);
        }

        if !surface.has_context_2d() {
            log::debug!("Surface has no 2D context, renderer stays inert");
            self.mount = Mount::Inert(surface);
            return;
        }

        let listener = host.add_resize_listener();
        let viewport = host.viewport();
        let profile = MotionProfile::from_preference(host.prefers_reduced_motion());

        let mut session = Session::new(surface, viewport, profile, listener);
        session.resize(viewport, &self.params, &mut self.rng);

        if profile.is_animated() {
            session.set_pending_frame(host.request_frame());
        } else {
            session.tick(&self.params);
        }

        log::info!(
            "Particle field started: {}x{}, {} particles, {:?} motion",
            viewport.width,
            viewport.height,
            session.particles().len(),
            profile
        );
        self.mount = Mount::Active(session);
    }

    /// Tear down: cancel the pending frame, remove the resize listener and
    /// give the surface back. Safe to call any number of times.
    pub fn stop<H: Host + ?Sized>(&mut self, host: &mut H) -> Option<S> {
        match std::mem::replace(&mut self.mount, Mount::Unmounted) {
            Mount::Unmounted => None,
            Mount::Inert(surface) => Some(surface),
            Mount::Active(mut session) => {
                if let Some(handle) = session.take_pending_frame() {
                    host.cancel_frame(handle);
                }
                host.remove_resize_listener(session.resize_listener());
                log::info!(
                    "Particle field stopped after {} frames",
                    session.frames_rendered()
                );
                Some(session.into_surface())
            }
        }
    }

    /// Frame callback. Runs one tick if `handle` is the pending frame.
    pub fn handle_frame<H: Host + ?Sized>(
        &mut self,
        handle: FrameHandle,
        host: &mut H,
    ) -> Option<FrameStats> {
        let Mount::Active(session) = &mut self.mount else {
            log::trace!("Ignoring frame {:?}: not mounted", handle);
            return None;
        };
        if session.pending_frame() != Some(handle) {
            log::trace!("Ignoring stale frame {:?}", handle);
            return None;
        }
        session.take_pending_frame();

        let stats = session.tick(&self.params);
        if session.profile().is_animated() {
            session.set_pending_frame(host.request_frame());
        }
        Some(stats)
    }

    /// Resize callback. Respawns if `listener` belongs to the live session.
    ///
    /// Nothing is drawn here. Under normal motion the next scheduled frame
    /// paints the new set; under reduced motion the session stays parked
    /// after its single frame.
    pub fn handle_resize<H: Host + ?Sized>(&mut self, listener: ListenerId, host: &mut H) -> bool {
        let Mount::Active(session) = &mut self.mount else {
            return false;
        };
        if session.resize_listener() != listener {
            return false;
        }

        session.resize(host.viewport(), &self.params, &mut self.rng);
        true
    }

    pub fn status(&self) -> RendererStatus {
        match &self.mount {
            Mount::Unmounted => RendererStatus::Stopped,
            Mount::Inert(_) => RendererStatus::Inert,
            Mount::Active(session) if session.profile().is_animated() => RendererStatus::Animating,
            Mount::Active(_) => RendererStatus::Static,
        }
    }

    /// Whether a frame is scheduled and will draw when delivered.
    pub fn is_running(&self) -> bool {
        matches!(&self.mount, Mount::Active(s) if s.pending_frame().is_some())
    }

    pub fn session(&self) -> Option<&Session<S>> {
        match &self.mount {
            Mount::Active(session) => Some(session),
            _ => None,
        }
    }

    /// The mounted surface, including an inert one.
    pub fn surface(&self) -> Option<&S> {
        match &self.mount {
            Mount::Unmounted => None,
            Mount::Inert(surface) => Some(surface),
            Mount::Active(session) => Some(session.surface()),
        }
    }
}

impl<S: Surface> Default for ParticleFieldRenderer<S> {
    fn default() -> Self {
        Self::new()
    }
}
