//! Reachability analysis - sight lines, gap measurement and jump feasibility
//!
//! Every query is a pure function of the platform snapshot and tuning. A
//! `false` answer never means an error; callers fall back to replanning,
//! turning around or moving directly.

use bevy::prelude::*;

use crate::constants::*;
use crate::geometry::{
    Body, hits_wall, intersects_strict, is_ground_at, platform_below_point, platform_under,
    probe_hits,
};
use crate::tuning::PursuitTuning;
use crate::world::PlatformSnapshot;

/// A measured span with no ground beneath it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gap {
    pub start_x: f32,
    pub end_x: f32,
    pub width: f32,
}

impl Gap {
    pub fn new(start_x: f32, end_x: f32) -> Self {
        Self {
            start_x,
            end_x,
            width: (end_x - start_x).abs(),
        }
    }
}

/// Result of a forward gap scan
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GapScan {
    /// Ground the whole way
    Solid,
    /// Ground lost and regained within the scan
    Gap(Gap),
    /// Ground lost and never regained; too wide to measure
    Unbounded { start_x: f32 },
}

impl GapScan {
    /// Measured width; unbounded gaps are infinitely wide
    pub fn width(&self) -> f32 {
        match self {
            GapScan::Solid => 0.0,
            GapScan::Gap(gap) => gap.width,
            GapScan::Unbounded { .. } => f32::INFINITY,
        }
    }
}

/// Reachability queries against one tick's platform snapshot
#[derive(Clone, Copy)]
pub struct Reachability<'a> {
    platforms: &'a PlatformSnapshot,
    tuning: &'a PursuitTuning,
}

impl<'a> Reachability<'a> {
    pub fn new(platforms: &'a PlatformSnapshot, tuning: &'a PursuitTuning) -> Self {
        Self { platforms, tuning }
    }

    pub fn platforms(&self) -> &'a PlatformSnapshot {
        self.platforms
    }

    // =========================================================================
    // Detection and sight
    // =========================================================================

    /// Is `target` inside the detection box around `from` and visible?
    /// Flyers pass `gap_aware = false` since chasms don't stop them.
    pub fn detect_target(&self, from: &Body, target: &Body, range: f32, gap_aware: bool) -> bool {
        if range <= 0.0 {
            return false;
        }
        let delta = target.center - from.center;
        if delta.x.abs() >= range || delta.y.abs() >= range * self.tuning.reach.detection_height_ratio
        {
            return false;
        }

        if gap_aware && self.gap_hides(from.center, target.center) {
            return false;
        }
        if self.walls_clear(from.center, target.center) {
            return true;
        }

        // Center line is blocked; try the head and the feet
        let reach = (target.size.y / 2.0 - 4.0).max(0.0);
        self.walls_clear(from.center, target.center + Vec2::Y * reach)
            || self.walls_clear(from.center, target.center - Vec2::Y * reach)
    }

    /// Sight line between two points: no hiding gap and no wall.
    pub fn check_line_of_sight(&self, from: Vec2, to: Vec2) -> bool {
        !self.gap_hides(from, to) && self.walls_clear(from, to)
    }

    /// Long, nearly horizontal lines across a chasm don't count as sight
    fn gap_hides(&self, from: Vec2, to: Vec2) -> bool {
        let delta = to - from;
        let dist = delta.length();
        if dist < f32::EPSILON {
            return false;
        }
        let ny = delta.y / dist;
        ny.abs() < SIGHT_HORIZONTAL_SLOPE
            && delta.x.abs() > SIGHT_MIN_GAP_SPAN
            && dist >= self.tuning.reach.sight_gap_grace
            && self.has_ground_gap_between(from, to)
    }

    /// Sample the segment and check each probe against thick platforms
    pub fn walls_clear(&self, from: Vec2, to: Vec2) -> bool {
        let dist = from.distance(to);
        if dist < f32::EPSILON {
            return true;
        }
        let samples =
            ((dist / SIGHT_SAMPLE_SPACING) as usize).clamp(SIGHT_MIN_SAMPLES, SIGHT_MAX_SAMPLES);
        let probe_size = Vec2::splat(SIGHT_PROBE_SIZE);

        (1..samples).all(|i| {
            let point = from.lerp(to, i as f32 / samples as f32);
            let probe = Rect::from_center_size(point, probe_size);
            !hits_wall(probe, self.tuning.reach.wall_threshold, self.platforms)
        })
    }

    /// Is there a column between the two points with no ground below the line?
    pub fn has_ground_gap_between(&self, from: Vec2, to: Vec2) -> bool {
        let span = to.x - from.x;
        let steps = ((span.abs() / SIGHT_SAMPLE_SPACING) as usize).max(5);
        let low = from.y.min(to.y) - 100.0;
        let high = from.y.max(to.y);

        (1..steps).any(|i| {
            let x = from.x + span * i as f32 / steps as f32;
            !probe_hits(Rect::new(x - 2.0, low, x + 2.0, high), self.platforms)
        })
    }

    // =========================================================================
    // Edges and gaps
    // =========================================================================

    /// No ground just past the leading edge?
    pub fn is_at_platform_edge(&self, body: &Body, direction: f32) -> bool {
        let lead = body.leading_x(direction);
        let reach = lead + direction.signum() * EDGE_PROBE_DISTANCE;
        let feet = body.bottom();
        let probe = Rect::new(lead.min(reach), feet - 5.0, lead.max(reach), feet);
        !probe_hits(probe, self.platforms)
    }

    /// Is the leading edge lined up with the supporting platform's edge?
    pub fn is_at_correct_edge(&self, body: &Body, direction: f32) -> bool {
        let Some(platform) =
            platform_under(body, self.platforms).and_then(|i| self.platforms.get(i))
        else {
            return false;
        };
        let tolerance = self.tuning.behavior.edge_align_tolerance;
        if direction > 0.0 {
            (body.leading_x(1.0) - platform.bounds.max.x).abs() < tolerance
        } else {
            (body.leading_x(-1.0) - platform.bounds.min.x).abs() < tolerance
        }
    }

    /// Does the ground fall away a short distance ahead?
    pub fn need_to_jump_gap(&self, body: &Body, direction: f32) -> bool {
        let dir = direction.signum();
        let near = body.leading_x(dir) + dir * GAP_PROBE_OFFSET;
        let far = near + dir * 10.0;
        let feet = body.bottom();
        let probe = Rect::new(near.min(far), feet - 21.0, near.max(far), feet - 1.0);
        !probe_hits(probe, self.platforms)
    }

    /// Does a narrow column at `x` find ground just beneath `feet_y`?
    fn column_has_ground(&self, x: f32, feet_y: f32) -> bool {
        let depth = self.tuning.reach.gap_probe_depth;
        probe_hits(
            Rect::new(x - 2.0, feet_y - depth, x + 2.0, feet_y + 1.0),
            self.platforms,
        )
    }

    /// Step outward from `origin_x` (a leading edge) looking for where ground
    /// is lost and where it comes back. Ground under the first column means
    /// the platform continues past the edge, which is never a gap.
    pub fn measure_gap(&self, origin_x: f32, feet_y: f32, direction: f32) -> GapScan {
        let reach = &self.tuning.reach;
        let dir = direction.signum();
        let start = origin_x + dir * 2.0;
        let step = reach.gap_scan_step.max(1.0);

        let mut gap_start = None;
        let mut travelled = 0.0;
        while travelled <= reach.gap_scan_max {
            let x = start + dir * travelled;
            let ground = self.column_has_ground(x, feet_y);
            match (gap_start, ground) {
                (None, true) if travelled == 0.0 => return GapScan::Solid,
                (None, false) => gap_start = Some(x),
                (Some(s), true) => return GapScan::Gap(Gap::new(s, x)),
                _ => {}
            }
            travelled += step;
        }

        match gap_start {
            None => GapScan::Solid,
            Some(start_x) => GapScan::Unbounded { start_x },
        }
    }

    /// Gap scan from a body's leading edge
    pub fn measure_gap_ahead(&self, body: &Body, direction: f32) -> GapScan {
        self.measure_gap(body.leading_x(direction), body.bottom(), direction)
    }

    /// Can a gap of `width` be cleared at `speed` with `boost`?
    pub fn can_jump_gap(&self, width: f32, speed: f32, boost: f32) -> bool {
        self.tuning.reach.can_jump_gap(width, speed, boost)
    }

    // =========================================================================
    // Jumps
    // =========================================================================

    /// Any column between the two x positions with nothing to stand on?
    pub fn is_gap_in_jump_path(&self, start_x: f32, end_x: f32, start_feet: f32, end_feet: f32) -> bool {
        let span = end_x - start_x;
        let steps = ((span.abs() / 10.0) as usize).max(10);
        let high = start_feet.max(end_feet) + 1.0;
        let low = start_feet.min(end_feet) - 120.0;

        (1..steps).any(|i| {
            let x = start_x + span * i as f32 / steps as f32;
            !probe_hits(Rect::new(x - 5.0, low, x + 5.0, high), self.platforms)
        })
    }

    /// Would a platform get in the way of a jump from `from` to `landing`?
    /// Also true when there is nowhere to land.
    pub fn has_obstacles_in_jump_path(&self, from: &Body, landing: Vec2) -> bool {
        let has_landing =
            (-3..=3).any(|k| is_ground_at(landing + Vec2::X * (k as f32 * 5.0), self.platforms));
        !has_landing || self.trajectory_blocked(from, landing)
    }

    /// Sample a parabolic arc from `from`'s feet to `landing` and test the body
    /// against platforms along it. The surfaces taken off from and landed on
    /// are ignored.
    fn trajectory_blocked(&self, from: &Body, landing: Vec2) -> bool {
        let samples = self.tuning.reach.trajectory_samples.max(4);
        let start = from.feet();
        let rise = landing.y - start.y;
        let arc = (rise + 30.0).max(40.0);

        (2..samples - 1).any(|i| {
            let t = i as f32 / samples as f32;
            let feet = start.lerp(landing, t) + Vec2::Y * arc * 4.0 * t * (1.0 - t);
            let rect = from.standing_at(feet).rect();
            let support = if t < 0.5 { start.y } else { landing.y };

            self.platforms.solid().any(|(_, p)| {
                p.height() > 5.0
                    && p.bounds.max.y > support + 1.0
                    && intersects_strict(rect, p.bounds)
            })
        })
    }

    /// How far `landing` is from the far edge of the platform beneath it
    fn landing_edge_clearance(&self, landing: Vec2, direction: f32) -> f32 {
        let Some(platform) =
            platform_below_point(landing, 5.0, self.platforms).and_then(|i| self.platforms.get(i))
        else {
            return 0.0;
        };
        if direction >= 0.0 {
            platform.bounds.max.x - landing.x
        } else {
            landing.x - platform.bounds.min.x
        }
    }

    /// Composite feasibility check for jumping from `start` so the feet land
    /// at `landing`.
    pub fn can_jump_directly_to(&self, start: &Body, landing: Vec2) -> bool {
        let reach = &self.tuning.reach;
        let dx = landing.x - start.center.x;
        let dy = landing.y - start.bottom();

        if dx.abs() > reach.max_jump_distance {
            return false;
        }
        if dy > reach.max_jump_rise || dy < -reach.max_jump_drop {
            return false;
        }
        if !is_ground_at(landing, self.platforms) {
            return false;
        }
        if self.trajectory_blocked(start, landing) {
            return false;
        }
        self.landing_edge_clearance(landing, dx) >= reach.unsafe_edge_distance
    }

    /// Can `from` walk to `to_feet` without jumping or falling?
    pub fn is_direct_walk_possible(&self, from: &Body, to_feet: Vec2) -> bool {
        let feet = from.bottom();
        (to_feet.y - feet).abs() <= self.tuning.behavior.waypoint_jump_rise
            && !self.is_gap_in_jump_path(from.center.x, to_feet.x, feet, to_feet.y)
            && self.walls_clear(from.center, from.standing_at(to_feet).center)
    }

    /// Should `from` jump straight up toward something standing at `target_feet`?
    pub fn should_jump_to_reach(&self, from: &Body, target_feet: Vec2, max_jump_height: f32) -> bool {
        let behavior = &self.tuning.behavior;
        let rise = target_feet.y - from.bottom();
        let dx = (target_feet.x - from.center.x).abs();

        if rise <= behavior.reach_jump_min_rise || rise > max_jump_height {
            return false;
        }
        if dx < behavior.reach_jump_min_dx || dx >= behavior.reach_jump_max_dx {
            return false;
        }

        let Some(target_platform) = platform_below_point(target_feet, 5.0, self.platforms) else {
            return false;
        };
        if platform_under(from, self.platforms) == Some(target_platform) {
            return false;
        }
        if self.is_gap_in_jump_path(from.center.x, target_feet.x, from.bottom(), target_feet.y) {
            return false;
        }
        !self.has_obstacles_in_jump_path(from, target_feet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::PlatformRect;

    fn pursuer_at(x: f32, feet: f32) -> Body {
        Body::new(Vec2::new(x, feet + PURSUER_SIZE.y / 2.0), PURSUER_SIZE)
    }

    fn target_at(x: f32, feet: f32) -> Body {
        Body::new(Vec2::new(x, feet + TARGET_SIZE.y / 2.0), TARGET_SIZE)
    }

    #[test]
    fn test_gap_blocks_sight_without_obstruction() {
        // Both bodies are centered at y = 0, standing on tops at y = -16
        let platforms = PlatformSnapshot::new(vec![
            PlatformRect::solid(0.0, -36.0, 100.0, 20.0),
            PlatformRect::solid(450.0, -36.0, 150.0, 20.0),
        ]);
        let tuning = PursuitTuning::default();
        let reach = Reachability::new(&platforms, &tuning);
        assert!(!reach.check_line_of_sight(Vec2::new(0.0, 0.0), Vec2::new(500.0, 0.0)));
        // No wall in the way either
        assert!(reach.walls_clear(Vec2::new(0.0, 0.0), Vec2::new(500.0, 0.0)));
    }

    #[test]
    fn test_close_gap_does_not_hide() {
        let platforms = PlatformSnapshot::new(vec![
            PlatformRect::solid(0.0, -20.0, 100.0, 20.0),
            PlatformRect::solid(150.0, -20.0, 100.0, 20.0),
        ]);
        let tuning = PursuitTuning::default();
        let reach = Reachability::new(&platforms, &tuning);
        assert!(reach.check_line_of_sight(Vec2::new(50.0, 16.0), Vec2::new(180.0, 24.0)));
    }

    #[test]
    fn test_sight_over_continuous_floor() {
        let platforms = PlatformSnapshot::new(vec![PlatformRect::solid(-100.0, -20.0, 800.0, 20.0)]);
        let tuning = PursuitTuning::default();
        let reach = Reachability::new(&platforms, &tuning);
        assert!(reach.check_line_of_sight(Vec2::new(0.0, 16.0), Vec2::new(500.0, 24.0)));
    }

    #[test]
    fn test_thick_platform_blocks_thin_does_not() {
        let tuning = PursuitTuning::default();
        let floor = PlatformRect::solid(-100.0, -20.0, 500.0, 20.0);

        let wall = PlatformSnapshot::new(vec![floor, PlatformRect::solid(95.0, 0.0, 10.0, 80.0)]);
        let reach = Reachability::new(&wall, &tuning);
        assert!(!reach.check_line_of_sight(Vec2::new(0.0, 16.0), Vec2::new(200.0, 16.0)));

        let ledge = PlatformSnapshot::new(vec![floor, PlatformRect::solid(60.0, 12.0, 80.0, 10.0)]);
        let reach = Reachability::new(&ledge, &tuning);
        assert!(reach.check_line_of_sight(Vec2::new(0.0, 16.0), Vec2::new(200.0, 16.0)));
    }

    #[test]
    fn test_detect_falls_back_to_head_line() {
        let platforms = PlatformSnapshot::new(vec![
            PlatformRect::solid(-50.0, -20.0, 350.0, 20.0),
            // Low wall that cuts the center line but not the line to the head
            PlatformRect::solid(95.0, -20.0, 10.0, 42.0),
        ]);
        let tuning = PursuitTuning::default();
        let reach = Reachability::new(&platforms, &tuning);
        let pursuer = pursuer_at(0.0, 0.0);
        let target = target_at(200.0, 0.0);

        assert!(!reach.walls_clear(pursuer.center, target.center));
        assert!(reach.detect_target(&pursuer, &target, 300.0, true));
    }

    #[test]
    fn test_detection_box() {
        let platforms = PlatformSnapshot::new(vec![PlatformRect::solid(-500.0, -20.0, 1000.0, 20.0)]);
        let tuning = PursuitTuning::default();
        let reach = Reachability::new(&platforms, &tuning);
        let pursuer = pursuer_at(0.0, 0.0);

        assert!(reach.detect_target(&pursuer, &target_at(250.0, 0.0), 300.0, true));
        assert!(!reach.detect_target(&pursuer, &target_at(350.0, 0.0), 300.0, true));
        assert!(reach.detect_target(&pursuer, &target_at(350.0, 0.0), 390.0, true));
        // Zero range disables detection
        assert!(!reach.detect_target(&pursuer, &target_at(10.0, 0.0), 0.0, true));
    }

    #[test]
    fn test_measure_gap_simple() {
        let platforms = PlatformSnapshot::new(vec![
            PlatformRect::solid(0.0, -20.0, 100.0, 20.0),
            PlatformRect::solid(140.0, -20.0, 100.0, 20.0),
        ]);
        let tuning = PursuitTuning::default();
        let reach = Reachability::new(&platforms, &tuning);

        match reach.measure_gap(100.0, 0.0, 1.0) {
            GapScan::Gap(gap) => {
                assert_eq!(gap.start_x, 102.0);
                assert_eq!(gap.end_x, 142.0);
                assert_eq!(gap.width, 40.0);
            }
            other => panic!("expected a gap, got {:?}", other),
        }

        // Scanning left from the far platform finds the same gap
        assert_eq!(reach.measure_gap(140.0, 0.0, -1.0).width(), 40.0);
    }

    #[test]
    fn test_measure_gap_solid_and_unbounded() {
        let platforms = PlatformSnapshot::new(vec![PlatformRect::solid(0.0, -20.0, 1000.0, 20.0)]);
        let tuning = PursuitTuning::default();
        let reach = Reachability::new(&platforms, &tuning);
        assert_eq!(reach.measure_gap(100.0, 0.0, 1.0), GapScan::Solid);
        assert_eq!(reach.measure_gap(1000.0, 0.0, 1.0).width(), f32::INFINITY);
    }

    #[test]
    fn test_measure_gap_is_monotonic_in_gap_width() {
        let tuning = PursuitTuning::default();
        let mut last = 0.0;
        for step in 0..90 {
            let gap = step as f32 * 4.0;
            let platforms = PlatformSnapshot::new(vec![
                PlatformRect::solid(0.0, -20.0, 100.0, 20.0),
                PlatformRect::solid(100.0 + gap, -20.0, 300.0, 20.0),
            ]);
            let reach = Reachability::new(&platforms, &tuning);
            let width = reach.measure_gap(100.0, 0.0, 1.0).width();
            assert!(width >= last, "gap {} measured {} after {}", gap, width, last);
            last = width;
        }
        assert_eq!(last, f32::INFINITY);
    }

    #[test]
    fn test_ground_past_edge_is_solid_not_unbounded() {
        // Continuous floor from the edge to the end of the second platform
        let platforms = PlatformSnapshot::new(vec![
            PlatformRect::solid(0.0, -20.0, 100.0, 20.0),
            PlatformRect::solid(100.0, -20.0, 300.0, 20.0),
        ]);
        let tuning = PursuitTuning::default();
        let reach = Reachability::new(&platforms, &tuning);
        assert_eq!(reach.measure_gap(100.0, 0.0, 1.0), GapScan::Solid);

        let narrow = PlatformSnapshot::new(vec![
            PlatformRect::solid(0.0, -20.0, 100.0, 20.0),
            PlatformRect::solid(104.0, -20.0, 300.0, 20.0),
        ]);
        let reach = Reachability::new(&narrow, &tuning);
        let width = reach.measure_gap(100.0, 0.0, 1.0).width();
        assert!(width > 0.0 && width.is_finite(), "narrow gap measured {}", width);
    }

    #[test]
    fn test_edge_probes() {
        let platforms = PlatformSnapshot::new(vec![
            PlatformRect::solid(0.0, -20.0, 100.0, 20.0),
            PlatformRect::solid(140.0, -20.0, 100.0, 20.0),
        ]);
        let tuning = PursuitTuning::default();
        let reach = Reachability::new(&platforms, &tuning);

        let middle = pursuer_at(50.0, 0.0);
        assert!(!reach.is_at_platform_edge(&middle, 1.0));
        assert!(!reach.need_to_jump_gap(&middle, 1.0));

        let edge = pursuer_at(84.5, 0.0);
        assert!(reach.is_at_platform_edge(&edge, 1.0));
        assert!(!reach.is_at_platform_edge(&edge, -1.0));
        assert!(reach.need_to_jump_gap(&edge, 1.0));
        assert!(reach.is_at_correct_edge(&edge, 1.0));
        assert!(!reach.is_at_correct_edge(&edge, -1.0));
    }

    #[test]
    fn test_can_jump_directly_to() {
        let platforms = PlatformSnapshot::new(vec![
            PlatformRect::solid(-100.0, -20.0, 200.0, 20.0),
            PlatformRect::solid(140.0, -20.0, 260.0, 20.0),
            PlatformRect::solid(-100.0, 30.0, 80.0, 20.0),
        ]);
        let tuning = PursuitTuning::default();
        let reach = Reachability::new(&platforms, &tuning);
        let start = pursuer_at(84.0, 0.0);

        assert!(reach.can_jump_directly_to(&start, Vec2::new(270.0, 0.0)));
        // Too far
        assert!(!reach.can_jump_directly_to(&start, Vec2::new(390.0, 0.0)));
        // Nothing to land on
        assert!(!reach.can_jump_directly_to(&start, Vec2::new(120.0, 0.0)));
        // Too high: the ledge top sits 50 above the feet
        assert!(!reach.can_jump_directly_to(&start, Vec2::new(-60.0, 50.0)));
    }

    #[test]
    fn test_landing_too_close_to_far_edge() {
        let platforms = PlatformSnapshot::new(vec![
            PlatformRect::solid(-100.0, -20.0, 200.0, 20.0),
            PlatformRect::solid(140.0, -20.0, 50.0, 20.0),
        ]);
        let tuning = PursuitTuning::default();
        let reach = Reachability::new(&platforms, &tuning);
        let start = pursuer_at(84.0, 0.0);
        assert!(reach.can_jump_directly_to(&start, Vec2::new(160.0, 0.0)));
        assert!(!reach.can_jump_directly_to(&start, Vec2::new(180.0, 0.0)));
    }

    #[test]
    fn test_ceiling_blocks_jump_arc() {
        let platforms = PlatformSnapshot::new(vec![
            PlatformRect::solid(-100.0, -20.0, 400.0, 20.0),
            // Thick slab hanging right where the arc peaks
            PlatformRect::solid(40.0, 40.0, 60.0, 40.0),
        ]);
        let tuning = PursuitTuning::default();
        let reach = Reachability::new(&platforms, &tuning);
        let start = pursuer_at(0.0, 0.0);
        assert!(reach.has_obstacles_in_jump_path(&start, Vec2::new(140.0, 0.0)));
        assert!(!reach.can_jump_directly_to(&start, Vec2::new(140.0, 0.0)));
    }

    #[test]
    fn test_should_jump_to_reach_target_above() {
        let platforms = PlatformSnapshot::new(vec![
            PlatformRect::solid(-200.0, -20.0, 400.0, 20.0),
            PlatformRect::solid(40.0, 70.0, 100.0, 10.0),
            PlatformRect::solid(-40.0, 190.0, 100.0, 10.0),
        ]);
        let tuning = PursuitTuning::default();
        let reach = Reachability::new(&platforms, &tuning);
        let pursuer = pursuer_at(0.0, 0.0);
        let max_height = 160.0;

        assert!(reach.should_jump_to_reach(&pursuer, Vec2::new(90.0, 80.0), max_height));
        // 200 above with a 10 unit offset is out of reach
        assert!(!reach.should_jump_to_reach(&pursuer, Vec2::new(10.0, 200.0), max_height));
        // Same platform never needs a jump
        assert!(!reach.should_jump_to_reach(&pursuer, Vec2::new(60.0, 0.0), max_height));
    }

    #[test]
    fn test_direct_walk() {
        let platforms = PlatformSnapshot::new(vec![
            PlatformRect::solid(-100.0, -20.0, 300.0, 20.0),
            PlatformRect::solid(300.0, -20.0, 200.0, 20.0),
        ]);
        let tuning = PursuitTuning::default();
        let reach = Reachability::new(&platforms, &tuning);
        let pursuer = pursuer_at(0.0, 0.0);
        assert!(reach.is_direct_walk_possible(&pursuer, Vec2::new(150.0, 0.0)));
        assert!(!reach.is_direct_walk_possible(&pursuer, Vec2::new(350.0, 0.0)));
        assert!(!reach.is_direct_walk_possible(&pursuer, Vec2::new(150.0, 60.0)));
    }
}
