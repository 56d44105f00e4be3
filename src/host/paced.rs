//! Wall-clock frame pacing for a [`ManualHost`].

use super::ManualHost;
use crate::renderer::ParticleFieldRenderer;
use crate::surface::Surface;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

/// Pump frames at `fps` until `max_frames` ticks ran or nothing is pending.
///
/// `on_frame` sees the renderer after every delivered frame; an error from it
/// stops the loop and is returned. Returns the number of ticks that ran.
pub async fn run_paced<S, F, E>(
    renderer: &mut ParticleFieldRenderer<S>,
    host: &mut ManualHost,
    fps: u32,
    max_frames: usize,
    mut on_frame: F,
) -> Result<usize, E>
where
    S: Surface,
    F: FnMut(&ParticleFieldRenderer<S>) -> Result<(), E>,
{
    let period = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut rendered = 0;
    while rendered < max_frames && host.pending_frames() > 0 {
        ticker.tick().await;
        let ran = host.dispatch_frames(renderer);
        if ran > 0 {
            rendered += ran;
            on_frame(renderer)?;
        }
    }

    log::debug!("Paced driver finished after {} frames", rendered);
    Ok(rendered)
}
