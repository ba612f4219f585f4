//! Per-pursuer countdown timers, ticked together in one pass

/// What a countdown is for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// Time left in the current state (Idle, Recovery, Patrol minimum)
    State,
    /// Must reach zero before another jump is allowed
    JumpCooldown,
    /// How long the last known target position stays trustworthy
    Memory,
    /// Until the next waypoint path search
    PathRefresh,
    /// Run-up before a queued jump launches
    PreJump,
    /// Collision suppression window after a gap jump
    GapJump,
}

impl TimerKind {
    pub const ALL: [TimerKind; 6] = [
        TimerKind::State,
        TimerKind::JumpCooldown,
        TimerKind::Memory,
        TimerKind::PathRefresh,
        TimerKind::PreJump,
        TimerKind::GapJump,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Fixed table of countdowns. Values never go below zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimerTable {
    remaining: [f32; 6],
}

impl TimerTable {
    /// Count every timer down by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        for t in &mut self.remaining {
            *t = (*t - dt).max(0.0);
        }
    }

    pub fn set(&mut self, kind: TimerKind, seconds: f32) {
        self.remaining[kind.index()] = seconds.max(0.0);
    }

    pub fn clear(&mut self, kind: TimerKind) {
        self.remaining[kind.index()] = 0.0;
    }

    pub fn get(&self, kind: TimerKind) -> f32 {
        self.remaining[kind.index()]
    }

    pub fn is_running(&self, kind: TimerKind) -> bool {
        self.get(kind) > 0.0
    }

    pub fn is_done(&self, kind: TimerKind) -> bool {
        !self.is_running(kind)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
