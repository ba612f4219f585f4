//! Geometry queries against the platform snapshot
//!
//! Collision tests use inclusive overlap so resting contact still counts.
//! Ground probes use strict overlap so a probe that only touches an edge
//! does not detect the surface it starts on.

use bevy::prelude::*;

use crate::constants::*;
use crate::world::{PlatformRect, PlatformSnapshot};

/// Inclusive AABB overlap (touching edges count)
pub fn intersects(a: Rect, b: Rect) -> bool {
    a.min.x <= b.max.x && b.min.x <= a.max.x && a.min.y <= b.max.y && b.min.y <= a.max.y
}

/// Exclusive AABB overlap (touching edges do not count)
pub fn intersects_strict(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && b.min.x < a.max.x && a.min.y < b.max.y && b.min.y < a.max.y
}

/// Axis-aligned body: center position plus size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub center: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    /// Point at the middle of the bottom edge
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.center.x, self.bottom())
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// X of the side facing `direction` (+1 right, -1 left)
    pub fn leading_x(&self, direction: f32) -> f32 {
        self.center.x + direction.signum() * self.size.x / 2.0
    }

    /// The same body standing with its feet at `feet`
    pub fn standing_at(&self, feet: Vec2) -> Body {
        Body::new(Vec2::new(feet.x, feet.y + self.size.y / 2.0), self.size)
    }
}

/// Small probe rectangle hanging directly beneath `point`
pub fn ground_probe(point: Vec2) -> Rect {
    let half_w = GROUND_PROBE_SIZE.x / 2.0;
    Rect::new(
        point.x - half_w,
        point.y - GROUND_PROBE_SIZE.y,
        point.x + half_w,
        point.y,
    )
}

/// Does `probe` strictly overlap any solid platform?
pub fn probe_hits(probe: Rect, platforms: &PlatformSnapshot) -> bool {
    platforms
        .solid()
        .any(|(_, p)| intersects_strict(probe, p.bounds))
}

/// Is there ground directly beneath `point`?
pub fn is_ground_at(point: Vec2, platforms: &PlatformSnapshot) -> bool {
    probe_hits(ground_probe(point), platforms)
}

/// Thin probe under a body's feet, slightly narrower than the body
pub fn foot_probe(center: Vec2, size: Vec2) -> Rect {
    let bottom = center.y - size.y / 2.0;
    Rect::new(
        center.x - size.x / 2.0 + FOOT_PROBE_INSET,
        bottom - 1.0 - FOOT_PROBE_DEPTH,
        center.x + size.x / 2.0 - FOOT_PROBE_INSET,
        bottom - 1.0,
    )
}

/// Is `body` standing on something?
pub fn is_grounded(body: &Body, platforms: &PlatformSnapshot) -> bool {
    probe_hits(foot_probe(body.center, body.size), platforms)
}

/// Index of the first solid platform under a body's full width
pub fn platform_under(body: &Body, platforms: &PlatformSnapshot) -> Option<usize> {
    let bottom = body.bottom();
    let half_w = body.size.x / 2.0;
    let probe = Rect::new(
        body.center.x - half_w,
        bottom - 5.0,
        body.center.x + half_w,
        bottom,
    );
    platforms
        .solid()
        .find(|(_, p)| intersects_strict(probe, p.bounds))
        .map(|(i, _)| i)
}

/// Index of the first solid platform within `depth` beneath a point
pub fn platform_below_point(point: Vec2, depth: f32, platforms: &PlatformSnapshot) -> Option<usize> {
    let probe = Rect::new(point.x - 2.0, point.y - depth, point.x + 2.0, point.y);
    platforms
        .solid()
        .find(|(_, p)| intersects_strict(probe, p.bounds))
        .map(|(i, _)| i)
}

/// Does `rect` strictly overlap a solid platform accepted by `filter`?
pub fn any_solid_overlap(
    rect: Rect,
    platforms: &PlatformSnapshot,
    filter: impl Fn(&PlatformRect) -> bool,
) -> bool {
    platforms
        .solid()
        .any(|(_, p)| filter(p) && intersects_strict(rect, p.bounds))
}

/// Does `rect` overlap a solid platform taller than `min_height`?
pub fn hits_wall(rect: Rect, min_height: f32, platforms: &PlatformSnapshot) -> bool {
    any_solid_overlap(rect, platforms, |p| p.height() > min_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn floor() -> PlatformSnapshot {
        PlatformSnapshot::new(vec![PlatformRect::solid(0.0, -20.0, 100.0, 20.0)])
    }

    #[test]
    fn test_inclusive_vs_strict_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        assert!(intersects(a, b));
        assert!(!intersects_strict(a, b));
    }

    #[test]
    fn test_ground_at_surface() {
        let snapshot = floor();
        assert!(is_ground_at(Vec2::new(50.0, 0.0), &snapshot));
        assert!(!is_ground_at(Vec2::new(50.0, 10.0), &snapshot));
        assert!(!is_ground_at(Vec2::new(150.0, 0.0), &snapshot));
    }

    fn body(x: f32, y: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(32.0, 32.0))
    }

    #[test]
    fn test_grounded_body() {
        let snapshot = floor();
        assert!(is_grounded(&body(50.0, 16.0), &snapshot));
        assert!(!is_grounded(&body(50.0, 30.0), &snapshot));
        // Feet hanging off the edge with only the inset strip over air
        assert!(!is_grounded(&body(117.0, 16.0), &snapshot));
    }

    #[test]
    fn test_platform_under() {
        let snapshot = PlatformSnapshot::new(vec![
            PlatformRect::solid(0.0, -20.0, 100.0, 20.0),
            PlatformRect::solid(200.0, -20.0, 100.0, 20.0),
        ]);
        assert_eq!(platform_under(&body(250.0, 16.0), &snapshot), Some(1));
        assert_eq!(platform_under(&body(150.0, 16.0), &snapshot), None);
    }

    #[test]
    fn test_body_edges() {
        let b = body(100.0, 16.0);
        assert_eq!(b.feet(), Vec2::new(100.0, 0.0));
        assert_eq!(b.leading_x(1.0), 116.0);
        assert_eq!(b.leading_x(-1.0), 84.0);
        assert_eq!(b.standing_at(Vec2::new(10.0, 50.0)).center, Vec2::new(10.0, 66.0));
    }

    #[test]
    fn test_is_ground_at_matches_probe_overlap_for_random_layouts() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let count = rng.gen_range(0..12);
            let rects: Vec<Rect> = (0..count)
                .map(|_| {
                    let x = rng.gen_range(-200.0..200.0);
                    let y = rng.gen_range(-200.0..200.0);
                    let w = rng.gen_range(1.0..120.0);
                    let h = rng.gen_range(1.0..40.0);
                    Rect::new(x, y, x + w, y + h)
                })
                .collect();
            let snapshot = PlatformSnapshot::from_rects(rects.iter().copied());

            for _ in 0..20 {
                let point = Vec2::new(rng.gen_range(-220.0..220.0), rng.gen_range(-220.0..220.0));
                let (px, py) = (point.x, point.y);
                let expected = rects.iter().any(|r| {
                    px - 5.0 < r.max.x && r.min.x < px + 5.0 && py - 5.0 < r.max.y && r.min.y < py
                });
                assert_eq!(is_ground_at(point, &snapshot), expected, "point {:?}", point);
            }
        }
    }
}
