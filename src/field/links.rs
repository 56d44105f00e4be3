//! Proximity links between particle pairs.
//!
//! Every unordered pair is tested (O(n²)). Particle counts stay in the tens
//! to low hundreds, so no spatial index is built.

use super::particle::Particle;

/// A pair of particles close enough to be joined by a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance_sq: f32,
}

/// Visit every unordered pair `(i, j)`, `i < j`, with squared distance
/// strictly below `max_distance_sq`. Returns the number of pairs visited.
pub fn for_each_link<F>(particles: &[Particle], max_distance_sq: f32, mut visit: F) -> usize
where
    F: FnMut(&Particle, &Particle, f32),
{
    let mut linked = 0;
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let dist_sq = a.distance_sq(b);
            if dist_sq < max_distance_sq {
                visit(a, b, dist_sq);
                linked += 1;
            }
        }
    }
    linked
}

/// Collect all links, mostly useful for inspection and tests.
pub fn find_links(particles: &[Particle], max_distance_sq: f32) -> Vec<Link> {
    let mut links = Vec::new();
    for (i, a) in particles.iter().enumerate() {
        for (offset, b) in particles[i + 1..].iter().enumerate() {
            let distance_sq = a.distance_sq(b);
            if distance_sq < max_distance_sq {
                links.push(Link {
                    a: i,
                    b: i + 1 + offset,
                    distance_sq,
                });
            }
        }
    }
    links
}

/// Link opacity: 1.0 for coincident points, falling linearly in squared
/// distance to `1.0 - fade` at the threshold.
#[inline]
pub fn link_alpha(distance_sq: f32, max_distance_sq: f32, fade: f32) -> f32 {
    1.0 - (distance_sq / max_distance_sq) * fade
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32) -> Particle {
        Particle { x, y, vx: 0.0, vy: 0.0, r: 1.0 }
    }

    #[test]
    fn test_link_requires_strictly_smaller_distance() {
        let particles = [at(0.0, 0.0), at(110.0, 0.0), at(0.0, 109.9)];
        let links = find_links(&particles, 110.0 * 110.0);
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].a, links[0].b), (0, 2));
    }

    #[test]
    fn test_for_each_link_matches_find_links() {
        let particles: Vec<Particle> = (0..12)
            .map(|i| at((i * 37 % 200) as f32, (i * 53 % 150) as f32))
            .collect();
        let expected = find_links(&particles, 60.0 * 60.0);
        let mut seen = Vec::new();
        let count = for_each_link(&particles, 60.0 * 60.0, |_, _, d| seen.push(d));
        assert_eq!(count, expected.len());
        assert_eq!(seen, expected.iter().map(|l| l.distance_sq).collect::<Vec<_>>());
    }

    #[test]
    fn test_alpha_fades_to_thirty_percent() {
        let max = 110.0 * 110.0;
        assert_eq!(link_alpha(0.0, max, 0.7), 1.0);
        assert!((link_alpha(max, max, 0.7) - 0.3).abs() < 1e-6);

        let near = link_alpha(20.0 * 20.0, max, 0.7);
        let far = link_alpha(90.0 * 90.0, max, 0.7);
        assert!(near > far);
    }

    #[test]
    fn test_single_particle_has_no_links() {
        assert_eq!(for_each_link(&[at(1.0, 1.0)], 100.0, |_, _, _| {}), 0);
        assert!(find_links(&[], 100.0).is_empty());
    }
}
