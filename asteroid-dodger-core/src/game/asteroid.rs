//! Asteroids
//!
//! Movement, size classes, splitting, and the procedurally generated look
//! that renderers draw. The look is rolled from the simulation RNG so a
//! replayed session looks identical too.

use serde::{Serialize, Deserialize};

use crate::core::constants::{
    ASTEROID_BASE_SPEED, LARGE_ASTEROID_RADIUS, MEDIUM_ASTEROID_RADIUS,
    MIN_ASTEROID_POINTS, MOTION_BLUR_POSITIONS,
};
use crate::core::rng::DeterministicRng;
use crate::core::vec2::Vec2;

// =============================================================================
// SIZE CLASS
// =============================================================================

/// Size class, decides how an asteroid breaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidSize {
    Small,
    Medium,
    Large,
}

impl AsteroidSize {
    /// Classify by radius.
    pub fn from_radius(radius: f32) -> Self {
        if radius >= LARGE_ASTEROID_RADIUS {
            AsteroidSize::Large
        } else if radius >= MEDIUM_ASTEROID_RADIUS {
            AsteroidSize::Medium
        } else {
            AsteroidSize::Small
        }
    }

    /// Number of children and their inclusive radius range.
    fn split_params(self) -> Option<(usize, i32, i32)> {
        match self {
            AsteroidSize::Large => Some((3, 20, 30)),
            AsteroidSize::Medium => Some((2, 15, 22)),
            AsteroidSize::Small => None,
        }
    }
}

// =============================================================================
// LOOK
// =============================================================================

/// One of the four rock colour schemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RockPalette {
    GrayStone,
    BrownRock,
    BlueGray,
    Tan,
}

impl RockPalette {
    pub const ALL: [RockPalette; 4] = [
        RockPalette::GrayStone,
        RockPalette::BrownRock,
        RockPalette::BlueGray,
        RockPalette::Tan,
    ];

    /// Base, highlight and shadow colours as 8-bit RGB.
    pub fn rgb(self) -> [[u8; 3]; 3] {
        match self {
            RockPalette::GrayStone => [[120, 120, 120], [140, 140, 140], [100, 100, 100]],
            RockPalette::BrownRock => [[140, 130, 110], [160, 150, 130], [120, 110, 90]],
            RockPalette::BlueGray => [[100, 110, 120], [120, 130, 140], [80, 90, 100]],
            RockPalette::Tan => [[130, 115, 100], [150, 135, 120], [110, 95, 80]],
        }
    }
}

/// Outline vertex in the asteroid's local polar frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutlinePoint {
    /// Degrees, before rotation
    pub angle: f32,
    /// Distance from the centre
    pub distance: f32,
}

/// A crack running outwards from near the centre.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crack {
    pub angle: f32,
    pub start: f32,
    pub end: f32,
    /// Stroke width, 1 or 2
    pub width: u8,
}

/// A surface crater.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crater {
    pub angle: f32,
    pub distance: f32,
    pub size: f32,
}

/// A glinting mineral speck.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mineral {
    pub angle: f32,
    pub distance: f32,
    /// 150..=255
    pub brightness: u8,
}

/// Everything a renderer needs to draw a rock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AsteroidLook {
    pub palette: RockPalette,
    pub outline: Vec<OutlinePoint>,
    pub cracks: Vec<Crack>,
    pub craters: Vec<Crater>,
    pub minerals: Vec<Mineral>,
}

impl AsteroidLook {
    /// Roll a look for a rock of the given radius.
    pub fn generate(rng: &mut DeterministicRng, radius: f32) -> Self {
        let palette = *rng.choose(&RockPalette::ALL).unwrap_or(&RockPalette::GrayStone);

        let vertex_count = rng.next_int_range(8, 12) as usize;
        let outline = (0..vertex_count)
            .map(|i| OutlinePoint {
                angle: 360.0 / vertex_count as f32 * i as f32 + rng.next_f32_range(-15.0, 15.0),
                distance: radius * rng.next_f32_range(0.8, 1.1),
            })
            .collect();

        let crack_count = rng.next_int_range(3, 6);
        let cracks = (0..crack_count)
            .map(|_| Crack {
                angle: rng.next_f32_range(0.0, 360.0),
                start: rng.next_f32_range(0.0, radius * 0.4),
                end: rng.next_f32_range(radius * 0.6, radius * 0.95),
                width: rng.next_int_range(1, 2) as u8,
            })
            .collect();

        let crater_count = rng.next_int_range(3, 6);
        let craters = (0..crater_count)
            .map(|_| Crater {
                angle: rng.next_f32_range(0.0, 360.0),
                distance: rng.next_f32_range(0.0, radius * 0.6),
                size: rng.next_f32_range(radius * 0.1, radius * 0.3),
            })
            .collect();

        let minerals = if rng.chance(0.3) {
            let count = rng.next_int_range(3, 8);
            (0..count)
                .map(|_| Mineral {
                    angle: rng.next_f32_range(0.0, 360.0),
                    distance: rng.next_f32_range(0.0, radius * 0.8),
                    brightness: rng.next_int_range(150, 255) as u8,
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            palette,
            outline,
            cracks,
            craters,
            minerals,
        }
    }
}

// =============================================================================
// ASTEROID
// =============================================================================

/// A drifting rock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// `5 × difficulty` at creation
    pub base_speed: f32,
    pub points: u32,
    pub size: AsteroidSize,
    /// Degrees in [0, 360)
    pub angle: f32,
    /// Degrees per frame
    pub rotation_speed: f32,
    /// Oldest first, at most 3 entries
    pub trail: Vec<Vec2>,
    pub look: AsteroidLook,
}

impl Asteroid {
    /// Create an asteroid.
    ///
    /// Without an explicit velocity it drifts straight left at its base speed.
    pub fn spawn(
        rng: &mut DeterministicRng,
        position: Vec2,
        radius: f32,
        speed_multiplier: f32,
        velocity: Option<Vec2>,
    ) -> Self {
        let base_speed = ASTEROID_BASE_SPEED * speed_multiplier;
        let velocity = velocity.unwrap_or(Vec2::new(-base_speed, 0.0));
        let points = MIN_ASTEROID_POINTS.max((radius / 2.0) as u32);

        let angle = rng.next_f32_range(0.0, 360.0);
        let rotation_speed = rng.next_f32_range(-2.0, 2.0);
        let look = AsteroidLook::generate(rng, radius);

        Self {
            position,
            velocity,
            radius,
            base_speed,
            points,
            size: AsteroidSize::from_radius(radius),
            angle,
            rotation_speed,
            trail: Vec::with_capacity(MOTION_BLUR_POSITIONS + 1),
            look,
        }
    }

    /// Advance one frame, scaled by `time_scale` (0.5 under time slow).
    pub fn update(&mut self, time_scale: f32) {
        self.trail.push(self.position);
        if self.trail.len() > MOTION_BLUR_POSITIONS {
            self.trail.remove(0);
        }

        self.position += self.velocity * time_scale;
        self.angle += self.rotation_speed * time_scale;
        if self.angle >= 360.0 {
            self.angle -= 360.0;
        } else if self.angle < 0.0 {
            self.angle += 360.0;
        }
    }

    /// Fully past the left edge.
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.position.x < -self.radius
    }

    /// Large and medium rocks break into children.
    #[inline]
    pub fn can_break(&self) -> bool {
        self.size != AsteroidSize::Small
    }

    /// Children produced when this rock breaks (empty for small rocks).
    ///
    /// Children fan out leftwards within ±45° and are placed on a ring of
    /// half the parent radius.
    pub fn split(&self, rng: &mut DeterministicRng, difficulty: f32) -> Vec<Asteroid> {
        let Some((count, min_radius, max_radius)) = self.size.split_params() else {
            return Vec::new();
        };

        // One radius roll shared by all siblings
        let child_radius = rng.next_int_range(min_radius, max_radius) as f32;

        (0..count)
            .map(|i| {
                let heading = rng.next_f32_range(-45.0, 45.0);
                let speed = self.base_speed * rng.next_f32_range(0.8, 1.3);
                let velocity = Vec2::new(
                    speed * (heading + 180.0).to_radians().cos(),
                    speed * heading.to_radians().sin(),
                );

                let offset_angle = 360.0 / count as f32 * i as f32;
                let position = self.position + Vec2::from_polar(self.radius * 0.5, offset_angle);

                Asteroid::spawn(rng, position, child_radius, difficulty, Some(velocity))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rock(rng: &mut DeterministicRng, radius: f32) -> Asteroid {
        Asteroid::spawn(rng, Vec2::new(400.0, 300.0), radius, 1.0, None)
    }

    #[test]
    fn test_size_classes() {
        assert_eq!(AsteroidSize::from_radius(50.0), AsteroidSize::Large);
        assert_eq!(AsteroidSize::from_radius(40.0), AsteroidSize::Large);
        assert_eq!(AsteroidSize::from_radius(39.0), AsteroidSize::Medium);
        assert_eq!(AsteroidSize::from_radius(25.0), AsteroidSize::Medium);
        assert_eq!(AsteroidSize::from_radius(24.0), AsteroidSize::Small);
    }

    #[test]
    fn test_points() {
        let mut rng = DeterministicRng::new(1);
        assert_eq!(rock(&mut rng, 50.0).points, 25);
        assert_eq!(rock(&mut rng, 31.0).points, 15);
        assert_eq!(rock(&mut rng, 15.0).points, 10);
    }

    #[test]
    fn test_default_velocity_and_update() {
        let mut rng = DeterministicRng::new(2);
        let mut a = Asteroid::spawn(&mut rng, Vec2::new(800.0, 100.0), 30.0, 2.0, None);
        assert_eq!(a.velocity, Vec2::new(-10.0, 0.0));

        a.update(0.5);
        assert_eq!(a.position, Vec2::new(795.0, 100.0));
        assert_eq!(a.trail, vec![Vec2::new(800.0, 100.0)]);

        for _ in 0..10 {
            a.update(1.0);
        }
        assert_eq!(a.trail.len(), MOTION_BLUR_POSITIONS);
        assert!(a.angle >= 0.0 && a.angle < 360.0);
    }

    #[test]
    fn test_off_screen() {
        let mut rng = DeterministicRng::new(3);
        let mut a = Asteroid::spawn(&mut rng, Vec2::new(-29.0, 0.0), 30.0, 1.0, None);
        assert!(!a.is_off_screen());
        a.position.x = -30.5;
        assert!(a.is_off_screen());
    }

    #[test]
    fn test_split_counts_and_radii() {
        let mut rng = DeterministicRng::new(4);

        let large = rock(&mut rng, 45.0);
        let children = large.split(&mut rng, 1.0);
        assert_eq!(children.len(), 3);
        assert!(children.iter().all(|c| (20.0..=30.0).contains(&c.radius)));
        // Siblings share a radius
        assert!(children.iter().all(|c| c.radius == children[0].radius));

        let medium = rock(&mut rng, 30.0);
        let children = medium.split(&mut rng, 1.0);
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|c| (15.0..=22.0).contains(&c.radius)));

        let small = rock(&mut rng, 20.0);
        assert!(!small.can_break());
        assert!(small.split(&mut rng, 1.0).is_empty());
    }

    #[test]
    fn test_split_children_head_left() {
        let mut rng = DeterministicRng::new(5);
        let parent = rock(&mut rng, 48.0);
        for _ in 0..20 {
            for child in parent.split(&mut rng, 1.5) {
                assert!(child.velocity.x < 0.0);
                let speed = child.velocity.length();
                assert!(speed >= parent.base_speed * 0.8 - 1e-3);
                assert!(speed <= parent.base_speed * 1.3 + 1e-3);
                assert_eq!(child.base_speed, 7.5);
                // Placed on the half-radius ring
                let offset = child.position.distance(parent.position);
                assert!((offset - 24.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_look_ranges() {
        let mut rng = DeterministicRng::new(6);
        for _ in 0..50 {
            let look = AsteroidLook::generate(&mut rng, 40.0);
            assert!((8..=12).contains(&look.outline.len()));
            assert!((3..=6).contains(&look.cracks.len()));
            assert!((3..=6).contains(&look.craters.len()));
            assert!(look.minerals.is_empty() || (3..=8).contains(&look.minerals.len()));
            assert!(look.outline.iter().all(|p| p.distance >= 32.0 && p.distance <= 44.0));
            assert!(look.minerals.iter().all(|m| m.brightness >= 150));
        }
    }
}
