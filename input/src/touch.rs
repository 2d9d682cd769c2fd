use std::time::Instant;

use winit::event::{Touch, TouchPhase};

use crate::{PointerEvent, PointerId, PointerPhase};

/// The entry point for hosts running a winit event loop: touches go through this conversion
/// before they reach a recognizer.
pub trait TouchExtensions {
    /// Converts a winit touch into a pointer event in logical coordinates.
    fn to_pointer_event(&self, scale_factor: f64, time: Instant) -> PointerEvent;
}

impl TouchExtensions for Touch {
    fn to_pointer_event(&self, scale_factor: f64, time: Instant) -> PointerEvent {
        let phase = match self.phase {
            TouchPhase::Started => PointerPhase::Down,
            TouchPhase::Moved => PointerPhase::Move,
            TouchPhase::Ended => PointerPhase::Up,
            TouchPhase::Cancelled => PointerPhase::Cancel,
        };
        let pos = self.location.to_logical::<f64>(scale_factor);
        PointerEvent::new(PointerId(self.id), phase, (pos.x, pos.y), time)
    }
}

#[cfg(test)]
mod tests {
    use winit::{dpi::PhysicalPosition, event::DeviceId};

    use super::*;
    use floatdesk_geometry::Point;

    fn touch(id: u64, phase: TouchPhase, x: f64, y: f64) -> Touch {
        #[allow(unused_unsafe)]
        let device_id = unsafe { DeviceId::dummy() };
        Touch {
            device_id,
            phase,
            location: PhysicalPosition::new(x, y),
            force: None,
            id,
        }
    }

    #[test]
    fn maps_phases_and_scales_to_logical() {
        let now = Instant::now();
        let event = touch(7, TouchPhase::Started, 200.0, 100.0).to_pointer_event(2.0, now);
        assert_eq!(event.pointer, PointerId(7));
        assert_eq!(event.phase, PointerPhase::Down);
        assert_eq!(event.pos, Point::new(100.0, 50.0));

        let phases = [
            (TouchPhase::Moved, PointerPhase::Move),
            (TouchPhase::Ended, PointerPhase::Up),
            (TouchPhase::Cancelled, PointerPhase::Cancel),
        ];
        for (touch_phase, phase) in phases {
            let event = touch(7, touch_phase, 0.0, 0.0).to_pointer_event(1.0, now);
            assert_eq!(event.phase, phase);
        }
    }
}
