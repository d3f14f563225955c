//! Collision Detection
//!
//! Circle tests for the ship, box-vs-square tests for lasers, and the
//! pair search used by the laser phase of the tick.

use crate::core::constants::{LASER_WIDTH, LASER_HEIGHT};
use crate::core::vec2::Vec2;
use crate::game::asteroid::Asteroid;
use crate::game::laser::Laser;
use crate::game::ship::Ship;

/// Check if two circles overlap (touching does not count).
#[inline]
pub fn circles_overlap(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    let combined = radius_a + radius_b;
    pos_a.distance_squared(pos_b) < combined * combined
}

/// Ship against any round target (asteroid, boss, pickup).
#[inline]
pub fn ship_hits_circle(ship: &Ship, center: Vec2, radius: f32) -> bool {
    circles_overlap(ship.center(), ship.radius(), center, radius)
}

/// Laser box against the bounding square of a round target.
#[inline]
pub fn laser_hits_circle(laser: &Laser, center: Vec2, radius: f32) -> bool {
    let p = laser.position;
    p.x < center.x + radius
        && p.x + LASER_WIDTH > center.x - radius
        && p.y < center.y + radius
        && p.y + LASER_HEIGHT > center.y - radius
}

/// Result of the laser-vs-asteroid search.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LaserAsteroidHits {
    /// Lasers that hit something (ascending, unique)
    pub lasers: Vec<usize>,
    /// Asteroids destroyed, in the order they were first hit
    pub asteroids: Vec<usize>,
}

/// Find every laser/asteroid overlap.
///
/// A laser keeps scanning after its first hit, so one bolt can take out
/// several rocks it overlaps in the same frame. Each asteroid is listed once.
pub fn find_laser_asteroid_hits(lasers: &[Laser], asteroids: &[Asteroid]) -> LaserAsteroidHits {
    let mut hits = LaserAsteroidHits::default();

    for (i, laser) in lasers.iter().enumerate() {
        for (j, asteroid) in asteroids.iter().enumerate() {
            if !laser_hits_circle(laser, asteroid.position, asteroid.radius) {
                continue;
            }
            if hits.lasers.last() != Some(&i) {
                hits.lasers.push(i);
            }
            if !hits.asteroids.contains(&j) {
                hits.asteroids.push(j);
            }
        }
    }

    hits
}

/// Index of the first asteroid touching the ship.
pub fn first_asteroid_hitting_ship(ship: &Ship, asteroids: &[Asteroid]) -> Option<usize> {
    asteroids
        .iter()
        .position(|a| ship_hits_circle(ship, a.position, a.radius))
}

/// Remove the given indices from a vector, keeping the order of the rest.
pub fn remove_indices<T>(items: &mut Vec<T>, indices: &[usize]) {
    if indices.is_empty() {
        return;
    }
    let mut idx = 0;
    items.retain(|_| {
        let keep = !indices.contains(&idx);
        idx += 1;
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::DeterministicRng;

    fn asteroid_at(x: f32, y: f32, radius: f32) -> Asteroid {
        let mut rng = DeterministicRng::new(0);
        Asteroid::spawn(&mut rng, Vec2::new(x, y), radius, 1.0, None)
    }

    #[test]
    fn test_circles_overlap() {
        let a = Vec2::new(0.0, 0.0);
        assert!(circles_overlap(a, 10.0, Vec2::new(15.0, 0.0), 10.0));
        // Exactly touching is not a hit
        assert!(!circles_overlap(a, 10.0, Vec2::new(20.0, 0.0), 10.0));
    }

    #[test]
    fn test_ship_hits_circle() {
        let ship = Ship::new();
        // Ship centre is (220, 300), radius 20
        assert!(ship_hits_circle(&ship, Vec2::new(260.0, 300.0), 25.0));
        assert!(!ship_hits_circle(&ship, Vec2::new(265.0, 300.0), 25.0));
    }

    #[test]
    fn test_laser_box() {
        let laser = Laser::new(Vec2::new(100.0, 100.0), 0.0);
        assert!(laser_hits_circle(&laser, Vec2::new(140.0, 103.0), 25.0));
        // Box right edge is 120, square left edge is 120: no overlap
        assert!(!laser_hits_circle(&laser, Vec2::new(140.0, 103.0), 20.0));
        // Vertical miss
        assert!(!laser_hits_circle(&laser, Vec2::new(110.0, 140.0), 30.0));
    }

    #[test]
    fn test_one_laser_many_asteroids() {
        let lasers = vec![
            Laser::new(Vec2::new(100.0, 100.0), 0.0),
            Laser::new(Vec2::new(100.0, 500.0), 0.0),
        ];
        let asteroids = vec![
            asteroid_at(110.0, 100.0, 20.0),
            asteroid_at(600.0, 100.0, 20.0),
            asteroid_at(115.0, 105.0, 20.0),
        ];

        let hits = find_laser_asteroid_hits(&lasers, &asteroids);
        assert_eq!(hits.lasers, vec![0]);
        assert_eq!(hits.asteroids, vec![0, 2]);
    }

    #[test]
    fn test_asteroid_listed_once() {
        let lasers = vec![
            Laser::new(Vec2::new(100.0, 100.0), 0.0),
            Laser::new(Vec2::new(105.0, 102.0), 0.0),
        ];
        let asteroids = vec![asteroid_at(110.0, 100.0, 30.0)];

        let hits = find_laser_asteroid_hits(&lasers, &asteroids);
        assert_eq!(hits.lasers, vec![0, 1]);
        assert_eq!(hits.asteroids, vec![0]);
    }

    #[test]
    fn test_remove_indices() {
        let mut v = vec!['a', 'b', 'c', 'd', 'e'];
        remove_indices(&mut v, &[3, 0]);
        assert_eq!(v, vec!['b', 'c', 'e']);
    }
}
