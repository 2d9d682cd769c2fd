//! Routes pointer events to per-window gesture recognizers and applies the recognized gestures
//! to the window manager.

use std::{collections::HashMap, time::Instant};

use itertools::Itertools;
use log::{debug, trace, warn};

use floatdesk_geometry::{Point, Vector};
use floatdesk_input::{
    GestureConfig, GestureHandler, GestureRecognizer, PointerEvent, PointerId, PointerPhase,
    SwipeDirection, dispatch_all,
};

use crate::{KeyValueStore, WindowId, WindowManager};

#[derive(Debug, Default)]
pub struct WindowGestures {
    config: GestureConfig,
    /// Only windows with contacts down have a recognizer.
    recognizers: HashMap<WindowId, GestureRecognizer>,
    /// The window each active contact is bound to until it is lifted.
    routes: HashMap<PointerId, WindowId>,
}

impl WindowGestures {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            recognizers: HashMap::new(),
            routes: HashMap::new(),
        }
    }

    /// `true` if no contact is down on any window.
    pub fn is_idle(&self) -> bool {
        self.recognizers.is_empty() && self.routes.is_empty()
    }

    /// Routes an event to the window under the contact it belongs to.
    ///
    /// A contact is bound to the window it went down on. Contacts going down outside of all
    /// windows join the gesture in progress, if there is exactly one.
    pub fn route<S: KeyValueStore>(
        &mut self,
        manager: &mut WindowManager<S>,
        event: &PointerEvent,
    ) {
        let window = match event.phase {
            PointerPhase::Down => manager
                .hit_test(event.pos)
                .cloned()
                .or_else(|| self.recognizers.keys().exactly_one().ok().cloned()),
            _ => self.routes.get(&event.pointer).cloned(),
        };
        let Some(window) = window else {
            trace!("No window for {:?} of {}", event.phase, event.pointer);
            return;
        };

        if event.phase == PointerPhase::Down {
            if let Some(bound) = self.routes.get(&event.pointer) {
                warn!("Ignoring duplicate down of {}, bound to {bound}", event.pointer);
                return;
            }
            self.routes.insert(event.pointer, window.clone());
        }
        if event.ends_contact() {
            self.routes.remove(&event.pointer);
        }

        self.handle_pointer(manager, &window, event);
    }

    /// Feeds an event to the recognizer of `window`. The first contact focuses the window.
    pub fn handle_pointer<S: KeyValueStore>(
        &mut self,
        manager: &mut WindowManager<S>,
        window: &WindowId,
        event: &PointerEvent,
    ) {
        if manager.window(window).is_none() {
            self.forget(window);
            return;
        }

        if event.phase == PointerPhase::Down && !self.recognizers.contains_key(window) {
            manager.focus(window);
        }

        let recognizer = self
            .recognizers
            .entry(window.clone())
            .or_insert_with(|| GestureRecognizer::new(self.config.clone()));
        let events = recognizer.handle(event);
        if !recognizer.is_active() {
            self.recognizers.remove(window);
        }

        dispatch_all(events, &mut WindowTarget { manager, window });
    }

    /// Fires pending long presses.
    pub fn tick<S: KeyValueStore>(&mut self, manager: &mut WindowManager<S>, now: Instant) {
        for (window, recognizer) in &mut self.recognizers {
            let events = recognizer.tick(now);
            dispatch_all(
                events,
                &mut WindowTarget {
                    manager: &mut *manager,
                    window,
                },
            );
        }
    }

    /// Drops the gesture state of a window, for example after it was closed.
    pub fn forget(&mut self, window: &WindowId) {
        if let Some(mut recognizer) = self.recognizers.remove(window) {
            // Releases the captures. The end events are meaningless without the window.
            recognizer.reset();
        }
        self.routes.retain(|_, w| w != window);
    }
}

/// Applies gestures to one window.
struct WindowTarget<'a, S: KeyValueStore> {
    manager: &'a mut WindowManager<S>,
    window: &'a WindowId,
}

impl<S: KeyValueStore> GestureHandler for WindowTarget<'_, S> {
    fn on_drag_start(&mut self, at: Point) {
        debug!("Drag of {} started at {at:?}", self.window);
    }

    fn on_drag(&mut self, delta: Vector) {
        self.manager.drag(self.window, delta.x, delta.y);
    }

    fn on_drag_end(&mut self) {
        self.manager.drag_end(self.window);
    }

    fn on_pinch(&mut self, _scale: f64, delta: f64) {
        self.manager.pinch_resize(self.window, delta);
    }

    fn on_pinch_end(&mut self) {
        self.manager.pinch_end(self.window);
    }

    fn on_rotate(&mut self, _rotation: f64, delta: f64) {
        self.manager.rotate(self.window, delta);
    }

    fn on_rotate_end(&mut self) {
        self.manager.rotate_end(self.window);
    }

    fn on_long_press(&mut self, at: Point) {
        debug!("Long press on {} at {at:?}", self.window);
        self.manager.toggle_maximize(self.window);
    }

    fn on_three_finger_swipe(&mut self, direction: SwipeDirection) {
        debug!("Three finger swipe {direction:?} on {}", self.window);
        self.manager.three_finger_swipe(self.window, direction);
    }
}
