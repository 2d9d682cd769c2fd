use floatdesk_geometry::{Point, Vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    /// Classifies a displacement by its dominant axis. Ties go to the horizontal axis.
    pub fn from_displacement(d: Vector) -> Self {
        if d.x.abs() >= d.y.abs() {
            if d.x >= 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            }
        } else if d.y > 0.0 {
            SwipeDirection::Down
        } else {
            SwipeDirection::Up
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// A single contact started to move. `at` is where the drag began.
    DragStart { at: Point },
    /// Movement since the previous drag update.
    Drag(Vector),
    DragEnd,
    PinchStart,
    /// `scale` is relative to the distance when the pinch began, `delta` is relative to the
    /// previously emitted scale.
    Pinch { scale: f64, delta: f64 },
    PinchEnd,
    RotateStart,
    /// `rotation` in degrees since the rotation began, `delta` since the previous update.
    ///
    /// Clockwise rotation on screen is positive.
    Rotate { rotation: f64, delta: f64 },
    RotateEnd,
    LongPress { at: Point },
    ThreeFingerSwipe(SwipeDirection),
}

/// Callbacks for recognized gestures. Every callback is optional.
pub trait GestureHandler {
    fn on_drag_start(&mut self, _at: Point) {}
    fn on_drag(&mut self, _delta: Vector) {}
    fn on_drag_end(&mut self) {}
    fn on_pinch_start(&mut self) {}
    fn on_pinch(&mut self, _scale: f64, _delta: f64) {}
    fn on_pinch_end(&mut self) {}
    fn on_rotate_start(&mut self) {}
    fn on_rotate(&mut self, _rotation: f64, _delta: f64) {}
    fn on_rotate_end(&mut self) {}
    fn on_long_press(&mut self, _at: Point) {}
    fn on_three_finger_swipe(&mut self, _direction: SwipeDirection) {}
}

impl GestureEvent {
    pub fn dispatch<H: GestureHandler + ?Sized>(&self, handler: &mut H) {
        use GestureEvent::*;
        match *self {
            DragStart { at } => handler.on_drag_start(at),
            Drag(delta) => handler.on_drag(delta),
            DragEnd => handler.on_drag_end(),
            PinchStart => handler.on_pinch_start(),
            Pinch { scale, delta } => handler.on_pinch(scale, delta),
            PinchEnd => handler.on_pinch_end(),
            RotateStart => handler.on_rotate_start(),
            Rotate { rotation, delta } => handler.on_rotate(rotation, delta),
            RotateEnd => handler.on_rotate_end(),
            LongPress { at } => handler.on_long_press(at),
            ThreeFingerSwipe(direction) => handler.on_three_finger_swipe(direction),
        }
    }
}

pub fn dispatch_all<H: GestureHandler + ?Sized>(
    events: impl IntoIterator<Item = GestureEvent>,
    handler: &mut H,
) {
    for event in events {
        event.dispatch(handler);
    }
}
