//! The gesture state machine.
//!
//! The number of active contacts selects the mode:
//!
//! - 1: dragging (and a possible long press),
//! - 2: pinching and rotating,
//! - 3: three finger swipes,
//! - anything else: idle.
//!
//! Every change of the contact count leaves the current mode (emitting its end events) and
//! enters the mode for the new count with a fresh reference state.
use std::{mem, time::Instant};

use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, warn};

use floatdesk_geometry::{EPSILON, Line, Point, centroid, normalize_degrees};

use crate::{
    GestureConfig, GestureEvent, NoCapture, Pointer, PointerCapture, PointerEvent, PointerId,
    PointerPhase, SwipeDirection,
};

#[derive(Debug)]
pub struct GestureRecognizer<C: PointerCapture = NoCapture> {
    config: GestureConfig,
    capture: C,
    /// Active contacts in the order they went down.
    pointers: IndexMap<PointerId, Pointer>,
    mode: GestureMode,
    long_press: Option<LongPressTimer>,
}

#[derive(Debug, Default)]
enum GestureMode {
    #[default]
    Idle,
    Dragging(Drag),
    PinchRotate(PinchRotate),
    ThreeFinger(Swipe),
}

/// The single owned long press timer. Cleared on every transition that invalidates it.
#[derive(Debug, Clone, Copy)]
struct LongPressTimer {
    pointer: PointerId,
    deadline: Instant,
}

#[derive(Debug)]
struct Drag {
    pointer: PointerId,
    last: Point,
    started: bool,
}

#[derive(Debug)]
struct PinchRotate {
    /// `None` while the two contacts coincide.
    reference: Option<Reference>,
    last_scale: f64,
    last_rotation: f64,
    pinching: bool,
    rotating: bool,
}

#[derive(Debug, Clone, Copy)]
struct Reference {
    distance: f64,
    degrees: f64,
}

#[derive(Debug)]
struct Swipe {
    reference: Point,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self::with_capture(config, NoCapture)
    }
}

impl<C: PointerCapture> GestureRecognizer<C> {
    pub fn with_capture(config: GestureConfig, capture: C) -> Self {
        Self {
            config,
            capture,
            pointers: IndexMap::new(),
            mode: GestureMode::Idle,
            long_press: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// `true` while at least one contact is down.
    pub fn is_active(&self) -> bool {
        !self.pointers.is_empty()
    }

    pub fn long_press_pending(&self) -> bool {
        self.long_press.is_some()
    }

    /// Feeds one pointer event and returns the gestures it produced.
    pub fn handle(&mut self, event: &PointerEvent) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        // A timer that expired before this event fires first.
        self.fire_long_press(event.time, &mut events);

        match event.phase {
            PointerPhase::Down => self.pointer_down(event, &mut events),
            PointerPhase::Move => self.pointer_moved(event.pointer, event.pos, &mut events),
            PointerPhase::Up if !self.pointers.contains_key(&event.pointer) => {
                warn!("Ignoring release of unknown {}", event.pointer);
            }
            PointerPhase::Up => {
                // The release position is the final sample of the contact.
                self.pointer_moved(event.pointer, event.pos, &mut events);
                self.pointer_up(event.pointer, &mut events);
            }
            PointerPhase::Cancel => self.pointer_up(event.pointer, &mut events),
        }

        events
    }

    /// Advances time. Fires the long press when its deadline passed.
    pub fn tick(&mut self, now: Instant) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        self.fire_long_press(now, &mut events);
        events
    }

    /// Drops all contacts and ends the active gesture.
    pub fn reset(&mut self) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        self.leave_mode(&mut events);
        for id in mem::take(&mut self.pointers).into_keys() {
            self.release_capture(id);
        }
        self.long_press = None;
        events
    }

    fn pointer_down(&mut self, event: &PointerEvent, events: &mut Vec<GestureEvent>) {
        let id = event.pointer;
        if self.pointers.contains_key(&id) {
            warn!("Ignoring duplicate down of {id}");
            return;
        }

        self.pointers
            .insert(id, Pointer::new(id, event.pos, event.time));
        if let Err(e) = self.capture.acquire(id) {
            debug!("Failed to capture {id}: {e:?}");
        }

        self.long_press = (self.pointers.len() == 1).then(|| LongPressTimer {
            pointer: id,
            deadline: event.time + self.config.long_press_delay(),
        });

        self.enter_mode(events);
    }

    fn pointer_moved(&mut self, id: PointerId, pos: Point, events: &mut Vec<GestureEvent>) {
        let Some(pointer) = self.pointers.get_mut(&id) else {
            warn!("Ignoring event of unknown {id}");
            return;
        };
        pointer.pos = pos;

        if pointer.travelled() > self.config.long_press_slop
            && self.long_press.is_some_and(|lp| lp.pointer == id)
        {
            self.long_press = None;
        }

        match &mut self.mode {
            GestureMode::Idle => {}
            GestureMode::Dragging(drag) => {
                if drag.pointer == id {
                    drag.update(pos, events);
                }
            }
            GestureMode::PinchRotate(pinch_rotate) => {
                if let Some(line) = contact_line(&self.pointers) {
                    pinch_rotate.update(line, &self.config, events);
                }
            }
            GestureMode::ThreeFinger(swipe) => {
                if let Some(center) = centroid(self.pointers.values().map(|p| p.pos)) {
                    swipe.update(center, self.config.swipe_threshold, events);
                }
            }
        }
    }

    fn pointer_up(&mut self, id: PointerId, events: &mut Vec<GestureEvent>) {
        if self.pointers.shift_remove(&id).is_none() {
            warn!("Ignoring release of unknown {id}");
            return;
        }
        self.release_capture(id);

        if self.long_press.is_some_and(|lp| lp.pointer == id) {
            self.long_press = None;
        }

        if self.pointers.is_empty() {
            self.leave_mode(events);
            self.long_press = None;
            return;
        }

        self.enter_mode(events);
    }

    /// Leaves the current mode and enters the one matching the number of contacts.
    fn enter_mode(&mut self, events: &mut Vec<GestureEvent>) {
        self.leave_mode(events);

        self.mode = match self.pointers.len() {
            1 => self
                .pointers
                .first()
                .map(|(&pointer, contact)| {
                    GestureMode::Dragging(Drag {
                        pointer,
                        last: contact.pos,
                        started: false,
                    })
                })
                .unwrap_or_default(),
            2 => GestureMode::PinchRotate(PinchRotate::new(contact_line(&self.pointers))),
            3 => GestureMode::ThreeFinger(Swipe {
                reference: centroid(self.pointers.values().map(|p| p.pos)).unwrap_or_default(),
            }),
            _ => GestureMode::Idle,
        };
    }

    fn leave_mode(&mut self, events: &mut Vec<GestureEvent>) {
        match mem::take(&mut self.mode) {
            GestureMode::Dragging(drag) if drag.started => events.push(GestureEvent::DragEnd),
            GestureMode::PinchRotate(pinch_rotate) => {
                if pinch_rotate.pinching {
                    events.push(GestureEvent::PinchEnd);
                }
                if pinch_rotate.rotating {
                    events.push(GestureEvent::RotateEnd);
                }
            }
            _ => {}
        }
    }

    fn fire_long_press(&mut self, now: Instant, events: &mut Vec<GestureEvent>) {
        let Some(timer) = self.long_press.take_if(|timer| now >= timer.deadline) else {
            return;
        };

        if self.pointers.len() == 1
            && let Some(pointer) = self.pointers.get(&timer.pointer)
        {
            events.push(GestureEvent::LongPress { at: pointer.pos });
        }
    }

    fn release_capture(&mut self, id: PointerId) {
        if let Err(e) = self.capture.release(id) {
            debug!("Failed to release capture of {id}: {e:?}");
        }
    }
}

/// The line from the first to the second contact, if exactly two are down.
fn contact_line(pointers: &IndexMap<PointerId, Pointer>) -> Option<Line> {
    let (first, second) = pointers.values().map(|p| p.pos).collect_tuple()?;
    Some(Line::new(first, second))
}

impl Drag {
    fn update(&mut self, pos: Point, events: &mut Vec<GestureEvent>) {
        let delta = pos - self.last;
        if delta.is_zero() {
            return;
        }
        if !self.started {
            self.started = true;
            events.push(GestureEvent::DragStart { at: self.last });
        }
        self.last = pos;
        events.push(GestureEvent::Drag(delta));
    }
}

impl PinchRotate {
    fn new(line: Option<Line>) -> Self {
        Self {
            reference: line.and_then(Reference::from_line),
            last_scale: 1.0,
            last_rotation: 0.0,
            pinching: false,
            rotating: false,
        }
    }

    fn update(&mut self, line: Line, config: &GestureConfig, events: &mut Vec<GestureEvent>) {
        let Some(reference) = self.reference else {
            // Coinciding contacts have no distance to scale from. Wait until they separate.
            self.reference = Reference::from_line(line);
            return;
        };

        let distance = line.length();
        if distance <= EPSILON {
            return;
        }

        let scale = distance / reference.distance;
        if (scale - self.last_scale).abs() > config.pinch_hysteresis {
            if !self.pinching {
                self.pinching = true;
                events.push(GestureEvent::PinchStart);
            }
            events.push(GestureEvent::Pinch {
                scale,
                delta: scale / self.last_scale,
            });
            self.last_scale = scale;
        }

        let rotation = normalize_degrees(line.degrees() - reference.degrees);
        let delta = normalize_degrees(rotation - self.last_rotation);
        if delta.abs() > config.rotate_threshold {
            if !self.rotating {
                self.rotating = true;
                events.push(GestureEvent::RotateStart);
            }
            events.push(GestureEvent::Rotate { rotation, delta });
            self.last_rotation = rotation;
        }
    }
}

impl Reference {
    fn from_line(line: Line) -> Option<Self> {
        let distance = line.length();
        (distance > EPSILON).then(|| Self {
            distance,
            degrees: line.degrees(),
        })
    }
}

impl Swipe {
    fn update(&mut self, center: Point, threshold: f64, events: &mut Vec<GestureEvent>) {
        let displacement = center - self.reference;
        if displacement.length() <= threshold {
            return;
        }
        events.push(GestureEvent::ThreeFingerSwipe(
            SwipeDirection::from_displacement(displacement),
        ));
        // Repeated swipes without lifting measure from here.
        self.reference = center;
    }
}
