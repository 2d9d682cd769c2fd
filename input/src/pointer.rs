use std::time::Instant;

use derive_more::{Display, From};

use floatdesk_geometry::Point;
use floatdesk_util::CoalescingKey;

/// Identifies one pointer contact (finger, mouse, pen) for the lifetime of the contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
pub struct PointerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A low level pointer event in logical client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer: PointerId,
    pub phase: PointerPhase,
    pub pos: Point,
    pub time: Instant,
}

impl PointerEvent {
    pub fn new(
        pointer: impl Into<PointerId>,
        phase: PointerPhase,
        pos: impl Into<Point>,
        time: Instant,
    ) -> Self {
        Self {
            pointer: pointer.into(),
            phase,
            pos: pos.into(),
            time,
        }
    }

    pub fn down(pointer: impl Into<PointerId>, pos: impl Into<Point>, time: Instant) -> Self {
        Self::new(pointer, PointerPhase::Down, pos, time)
    }

    pub fn moved(pointer: impl Into<PointerId>, pos: impl Into<Point>, time: Instant) -> Self {
        Self::new(pointer, PointerPhase::Move, pos, time)
    }

    pub fn up(pointer: impl Into<PointerId>, pos: impl Into<Point>, time: Instant) -> Self {
        Self::new(pointer, PointerPhase::Up, pos, time)
    }

    pub fn cancel(pointer: impl Into<PointerId>, pos: impl Into<Point>, time: Instant) -> Self {
        Self::new(pointer, PointerPhase::Cancel, pos, time)
    }

    /// `true` for up and cancel.
    pub fn ends_contact(&self) -> bool {
        matches!(self.phase, PointerPhase::Up | PointerPhase::Cancel)
    }
}

/// Moves of the same pointer supersede each other, everything else is kept.
impl CoalescingKey for PointerEvent {
    type Key = PointerId;

    fn coalescing_key(&self) -> Option<PointerId> {
        (self.phase == PointerPhase::Move).then_some(self.pointer)
    }
}

/// An active pointer contact as tracked by the recognizer.
#[derive(Debug, Clone, Copy)]
pub struct Pointer {
    pub id: PointerId,
    pub pos: Point,
    pub start: Point,
    pub start_time: Instant,
}

impl Pointer {
    pub fn new(id: PointerId, pos: Point, start_time: Instant) -> Self {
        Self {
            id,
            pos,
            start: pos,
            start_time,
        }
    }

    /// Distance travelled from where the contact started.
    pub fn travelled(&self) -> f64 {
        self.start.distance(self.pos)
    }
}
