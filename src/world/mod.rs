//! World components: collidables and the per-tick platform snapshot
//!
//! The level collaborator owns the real entities. Pursuers only ever read the
//! `PlatformSnapshot`, which is rebuilt once per tick before any pursuer runs.

use bevy::prelude::*;

/// What a collidable is, resolved once per collision pair
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColliderKind {
    /// Static level geometry
    #[default]
    Platform,
    /// Level geometry whose position changes between ticks
    MovingPlatform,
    /// Exit door (player-only interaction)
    Door,
    /// Pickup (player-only interaction)
    Collectible,
}

/// How a pursuer reacts when its bounds overlap a collidable
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionResponse {
    /// Land on, bump into, or bounce off
    Solid,
    /// Pass straight through
    Pass,
}

impl ColliderKind {
    /// Dispatch table for pursuer collisions
    pub fn pursuer_response(self) -> CollisionResponse {
        match self {
            ColliderKind::Platform | ColliderKind::MovingPlatform => CollisionResponse::Solid,
            ColliderKind::Door | ColliderKind::Collectible => CollisionResponse::Pass,
        }
    }

    pub fn is_solid(self) -> bool {
        self.pursuer_response() == CollisionResponse::Solid
    }
}

/// Collidable level entity. Paired with a `Transform` whose translation is the center.
#[derive(Component, Clone, Copy, Debug)]
pub struct Collider {
    pub kind: ColliderKind,
    pub size: Vec2,
}

impl Collider {
    pub fn platform(size: Vec2) -> Self {
        Self {
            kind: ColliderKind::Platform,
            size,
        }
    }
}

/// One collidable as seen by the pursuit core
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlatformRect {
    pub bounds: Rect,
    pub kind: ColliderKind,
}

impl PlatformRect {
    pub fn new(bounds: Rect, kind: ColliderKind) -> Self {
        Self { bounds, kind }
    }

    /// Solid platform from its left/bottom corner and size
    pub fn solid(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            bounds: Rect::new(x, y, x + width, y + height),
            kind: ColliderKind::Platform,
        }
    }

    pub fn height(&self) -> f32 {
        self.bounds.height()
    }
}

/// Read-only list of collidables, consistent for the whole tick
#[derive(Resource, Clone, Debug, Default)]
pub struct PlatformSnapshot {
    platforms: Vec<PlatformRect>,
    /// Bumped whenever the layout changes: platform count, kinds, or the
    /// bounds of any static platform. Moving platforms only bump on count/kind.
    pub generation: u64,
}

impl PlatformSnapshot {
    pub fn new(platforms: Vec<PlatformRect>) -> Self {
        Self {
            platforms,
            generation: 0,
        }
    }

    /// Snapshot of plain solid platforms
    pub fn from_rects(rects: impl IntoIterator<Item = Rect>) -> Self {
        Self::new(
            rects
                .into_iter()
                .map(|bounds| PlatformRect::new(bounds, ColliderKind::Platform))
                .collect(),
        )
    }

    /// Replace the contents, bumping the generation if the layout changed
    pub fn replace(&mut self, platforms: Vec<PlatformRect>) {
        let reshaped = platforms.len() != self.platforms.len()
            || platforms.iter().zip(&self.platforms).any(|(a, b)| {
                a.kind != b.kind || (a.kind == ColliderKind::Platform && a.bounds != b.bounds)
            });
        self.platforms = platforms;
        if reshaped {
            self.generation += 1;
        }
    }

    pub fn get(&self, index: usize) -> Option<&PlatformRect> {
        self.platforms.get(index)
    }

    pub fn all(&self) -> &[PlatformRect] {
        &self.platforms
    }

    /// Solid collidables with their snapshot index
    pub fn solid(&self) -> impl Iterator<Item = (usize, &PlatformRect)> {
        self.platforms
            .iter()
            .enumerate()
            .filter(|(_, p)| p.kind.is_solid())
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}
