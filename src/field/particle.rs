//! Particle data, spawning and soft-wrap motion.

use super::params::{FieldParams, MotionParams};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single drifting point.
///
/// Velocity and radius are chosen at spawn and never change; only the
/// position moves, one velocity step per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub r: f32,
}

impl Particle {
    /// Apply one frame of velocity, then soft-wrap into the inflated bound.
    #[inline]
    pub fn advance(&mut self, width: f32, height: f32, margin: f32) {
        self.x = wrap_axis(self.x + self.vx, width, margin);
        self.y = wrap_axis(self.y + self.vy, height, margin);
    }

    /// Whether the position lies inside `[-margin, extent + margin]` on both axes.
    pub fn within_bounds(&self, width: f32, height: f32, margin: f32) -> bool {
        (-margin..=width + margin).contains(&self.x) && (-margin..=height + margin).contains(&self.y)
    }

    #[inline]
    pub fn distance_sq(&self, other: &Particle) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Re-enter at the opposite edge once a coordinate leaves `[-margin, extent + margin]`.
#[inline]
fn wrap_axis(value: f32, extent: f32, margin: f32) -> f32 {
    if value < -margin {
        extent + margin
    } else if value > extent + margin {
        -margin
    } else {
        value
    }
}

/// Upper bound on a spawned set, whatever the density parameters say.
pub const MAX_PARTICLES: usize = 10_000;

/// Number of particles for a logical viewport.
///
/// Density follows area (`floor(width * height / area_per_particle)`) unless
/// the motion profile pins a fixed count. The result never exceeds
/// [`MAX_PARTICLES`]; a non-finite quotient counts as zero.
pub fn particle_count(width: f32, height: f32, params: &FieldParams, motion: &MotionParams) -> usize {
    if let Some(count) = motion.fixed_count {
        return count.min(MAX_PARTICLES);
    }
    let area = width.max(0.0) as f64 * height.max(0.0) as f64;
    let count = (area / params.area_per_particle as f64).floor();
    if !count.is_finite() || count <= 0.0 {
        return 0;
    }
    (count as usize).min(MAX_PARTICLES)
}

/// Spawn a fresh particle set covering the viewport.
pub fn spawn_particles<R: Rng + ?Sized>(
    rng: &mut R,
    width: f32,
    height: f32,
    params: &FieldParams,
    motion: &MotionParams,
) -> Vec<Particle> {
    let count = particle_count(width, height, params, motion);
    let (min_r, max_r) = params.radius_range;

    (0..count)
        .map(|_| Particle {
            x: rng.gen::<f32>() * width,
            y: rng.gen::<f32>() * height,
            vx: (rng.gen::<f32>() - 0.5) * 2.0 * motion.max_speed,
            vy: (rng.gen::<f32>() - 0.5) * 2.0 * motion.max_speed,
            r: min_r + rng.gen::<f32>() * (max_r - min_r),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_count_scales_with_area() {
        let params = FieldParams::default();
        assert_eq!(particle_count(800.0, 600.0, &params, &params.normal), 21);
        assert_eq!(particle_count(1600.0, 1200.0, &params, &params.normal), 87);
        assert_eq!(particle_count(100.0, 100.0, &params, &params.normal), 0);
    }

    #[test]
    fn test_reduced_count_is_fixed() {
        let params = FieldParams::default();
        assert_eq!(particle_count(800.0, 600.0, &params, &params.reduced), 40);
        assert_eq!(particle_count(3840.0, 2160.0, &params, &params.reduced), 40);
    }

    #[test]
    fn test_degenerate_density_is_bounded() {
        let mut params = FieldParams::default();
        params.area_per_particle = 0.0;
        assert_eq!(particle_count(800.0, 600.0, &params, &params.normal), 0);

        params.area_per_particle = f32::NAN;
        assert_eq!(particle_count(800.0, 600.0, &params, &params.normal), 0);

        params.area_per_particle = 1e-6;
        assert_eq!(particle_count(800.0, 600.0, &params, &params.normal), MAX_PARTICLES);
    }

    #[test]
    fn test_zero_viewport_spawns_nothing() {
        let params = FieldParams::default();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(spawn_particles(&mut rng, 0.0, 0.0, &params, &params.normal).is_empty());
    }

    #[test]
    fn test_spawned_attributes_within_ranges() {
        let params = FieldParams::default();
        let mut rng = StdRng::seed_from_u64(42);
        let particles = spawn_particles(&mut rng, 1280.0, 720.0, &params, &params.normal);

        assert_eq!(particles.len(), 41);
        for p in &particles {
            assert!((0.0..=1280.0).contains(&p.x));
            assert!((0.0..=720.0).contains(&p.y));
            assert!(p.vx.abs() <= 0.2 && p.vy.abs() <= 0.2);
            assert!((0.5..=2.0).contains(&p.r));
        }
    }

    #[test]
    fn test_reduced_speed_is_slower() {
        let params = FieldParams::default();
        let mut rng = StdRng::seed_from_u64(3);
        let particles = spawn_particles(&mut rng, 1280.0, 720.0, &params, &params.reduced);
        assert!(particles.iter().all(|p| p.vx.abs() <= 0.05 && p.vy.abs() <= 0.05));
    }

    #[test]
    fn test_wrap_left_edge_reappears_right() {
        let mut p = Particle { x: -19.9, y: 50.0, vx: -0.2, vy: 0.0, r: 1.0 };
        p.advance(800.0, 600.0, 20.0);
        assert_eq!(p.x, 820.0);
        assert_eq!(p.y, 50.0);
    }

    #[test]
    fn test_wrap_bottom_edge_reappears_top() {
        let mut p = Particle { x: 10.0, y: 619.95, vx: 0.0, vy: 0.1, r: 1.0 };
        p.advance(800.0, 600.0, 20.0);
        assert_eq!(p.y, -20.0);
    }

    #[test]
    fn test_inside_bound_moves_freely() {
        let mut p = Particle { x: 10.0, y: 10.0, vx: 0.2, vy: -0.1, r: 1.0 };
        p.advance(800.0, 600.0, 20.0);
        assert!((p.x - 10.2).abs() < 1e-5);
        assert!((p.y - 9.9).abs() < 1e-5);
        assert!(p.within_bounds(800.0, 600.0, 20.0));
    }
}
