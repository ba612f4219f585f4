//! ECS wiring - snapshot refresh, nav graph rebuild and pursuer updates
//!
//! Systems run chained in FixedUpdate so every pursuer sees the same
//! platform snapshot for the whole tick.

use bevy::prelude::*;

use crate::ai::{NavGraph, PursuerProfileDatabase, PursuitContext, update};
use crate::geometry::Body;
use crate::pursuer::{BodySize, Pursuer, PursuitTarget};
use crate::tuning::PursuitTuning;
use crate::world::{Collider, PlatformRect, PlatformSnapshot};

/// Registers the pursuit resources and systems
pub struct PursuitPlugin;

impl Plugin for PursuitPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(PursuitTuning::load())
            .init_resource::<PursuerProfileDatabase>()
            .init_resource::<PlatformSnapshot>()
            .init_resource::<NavGraph>()
            .add_systems(
                FixedUpdate,
                (refresh_platform_snapshot, rebuild_nav_graph, update_pursuers).chain(),
            );
    }
}

/// Copy every collider into the snapshot pursuers read this tick
pub fn refresh_platform_snapshot(
    mut snapshot: ResMut<PlatformSnapshot>,
    colliders: Query<(&Transform, &Collider)>,
) {
    let platforms = colliders
        .iter()
        .map(|(transform, collider)| {
            let bounds = Rect::from_center_size(transform.translation.truncate(), collider.size);
            PlatformRect::new(bounds, collider.kind)
        })
        .collect();
    snapshot.replace(platforms);
}

/// Rebuild the waypoint graph when the solid layout or the nav tuning changed
pub fn rebuild_nav_graph(
    mut nav_graph: ResMut<NavGraph>,
    snapshot: Res<PlatformSnapshot>,
    tuning: Res<PursuitTuning>,
) {
    if tuning.is_changed() {
        nav_graph.dirty = true;
    }
    if !nav_graph.is_stale(&snapshot) {
        return;
    }
    nav_graph.rebuild(&snapshot, &tuning.nav);
}

/// Advance every pursuer by one tick and mirror its position into `Transform`
pub fn update_pursuers(
    time: Res<Time>,
    snapshot: Res<PlatformSnapshot>,
    nav_graph: Res<NavGraph>,
    tuning: Res<PursuitTuning>,
    mut pursuers: Query<(&mut Pursuer, &mut Transform), Without<PursuitTarget>>,
    target: Query<(&Transform, &BodySize), With<PursuitTarget>>,
) {
    let target_body = target
        .iter()
        .next()
        .map(|(transform, size)| Body::new(transform.translation.truncate(), size.0));
    let ctx = PursuitContext::new(&snapshot, &nav_graph, &tuning);
    let dt = time.delta_secs();

    for (mut pursuer, mut transform) in &mut pursuers {
        update(&mut pursuer, target_body.as_ref(), &ctx, dt);
        transform.translation.x = pursuer.position.x;
        transform.translation.y = pursuer.position.y;
    }
}
