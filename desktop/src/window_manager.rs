use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, error};

use floatdesk_geometry::{Point, Rect, Size, round_to_multiple};
use floatdesk_input::SwipeDirection;

use crate::{
    Geometry, KeyValueStore, MemoryStore, WindowDescriptor, WindowId, WindowManagerConfig,
    WindowMode, WindowRecord,
    layout::{PersistedLayout, load_layout, remove_layout, save_layout},
};

/// Owns the floating windows: their geometry, stacking order, focus, and persisted layout.
///
/// Every operation on an unknown window id is a no-op.
///
/// Focus invariants:
///
/// - At most one window is focused.
/// - Every focus event assigns a z-index higher than all previous ones.
/// - While a visible modal window exists, no other window can take the focus.
///
/// Layouts are persisted at the end of interactions and on mode changes, never for
/// intermediate drag or resize steps.
#[derive(Debug)]
pub struct WindowManager<S: KeyValueStore = MemoryStore> {
    config: WindowManagerConfig,
    store: S,
    /// In opening order, which is also the focus cycling order.
    windows: IndexMap<WindowId, WindowRecord>,
    focused: Option<WindowId>,
    z_counter: u64,
    viewport: Option<Size>,
}

impl<S: KeyValueStore> WindowManager<S> {
    pub fn new(config: WindowManagerConfig, store: S) -> Self {
        Self {
            config,
            store,
            windows: IndexMap::new(),
            focused: None,
            z_counter: 0,
            viewport: None,
        }
    }

    pub fn config(&self) -> &WindowManagerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    /// Sets the area windows can be resized and maximized into. Maximized windows follow, also
    /// the minimized ones that return to the maximized state.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = Some(viewport);
        let bounds = Rect::from_size(viewport);
        for record in self.windows.values_mut() {
            if record.restore_geometry.is_some() {
                record.geometry = Geometry::from_bounds(bounds);
            }
        }
    }

    pub fn window(&self, id: &WindowId) -> Option<&WindowRecord> {
        self.windows.get(id)
    }

    pub fn geometry(&self, id: &WindowId) -> Option<Geometry> {
        self.window(id).map(|w| w.geometry)
    }

    pub fn focused(&self) -> Option<&WindowId> {
        self.focused.as_ref()
    }

    /// All windows in opening order.
    pub fn windows(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.values()
    }

    /// All windows from bottom to top.
    pub fn z_ordered(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.values().sorted_by_key(|w| w.z_index)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// The topmost visible window at `point`.
    pub fn hit_test(&self, point: Point) -> Option<&WindowId> {
        self.windows
            .values()
            .filter(|w| w.is_visible() && w.geometry.bounds().contains(point))
            .max_by_key(|w| w.z_index)
            .map(|w| &w.id)
    }

    /// Opens a window, or re-focuses it if it is already open. Content of an already open window
    /// is replaced only if the descriptor carries some.
    pub fn open(&mut self, descriptor: WindowDescriptor) -> &WindowRecord {
        let id = descriptor.id.clone();

        if let Some(record) = self.windows.get_mut(&id) {
            if let Some(content) = descriptor.content {
                record.content = Some(content);
            }
            self.focus(&id);
            return &self.windows[&id];
        }

        let persisted = load_layout(&self.store, &id);
        let geometry = persisted
            .as_ref()
            .map(PersistedLayout::geometry)
            .unwrap_or(descriptor.geometry)
            .with_min_size(self.config.min_size());

        let mut record = WindowRecord::new(descriptor, geometry);
        if let Some(layout) = &persisted {
            if layout.maximized
                && let Some(viewport) = self.viewport
            {
                maximize_into(&mut record, viewport);
            }
            if layout.minimized {
                record.mode = WindowMode::Minimized;
            }
        }
        let visible = record.is_visible();
        self.windows.insert(id.clone(), record);

        if !visible || !self.focus(&id) {
            // Opened behind a modal or minimized: still stacked above everything else.
            self.raise(&id);
            if let Some(modal) = self.blocking_modal(&id).cloned() {
                self.focus(&modal);
            }
        }

        &self.windows[&id]
    }

    /// Raises the window above all others and gives it the focus.
    ///
    /// A minimized window leaves the minimized state. Returns `false` if the window does not
    /// exist or a modal window blocks the focus change.
    pub fn focus(&mut self, id: &WindowId) -> bool {
        if !self.windows.contains_key(id) {
            debug!("Can't focus unknown window {id}");
            return false;
        }
        if let Some(modal) = self.blocking_modal(id) {
            debug!("Can't focus {id} while {modal} is modal");
            return false;
        }

        if let Some(previous) = self.focused.take()
            && let Some(record) = self.windows.get_mut(&previous)
        {
            record.focused = false;
        }

        self.raise(id);
        let Some(record) = self.windows.get_mut(id) else {
            return false;
        };
        record.focused = true;
        if record.mode == WindowMode::Minimized {
            record.mode = if record.restore_geometry.is_some() {
                WindowMode::Maximized
            } else {
                WindowMode::Normal
            };
            self.persist(id);
        }
        self.focused = Some(id.clone());
        true
    }

    /// Closes the window and forgets its persisted layout.
    pub fn close(&mut self, id: &WindowId) -> Option<WindowRecord> {
        let Some(record) = self.windows.shift_remove(id) else {
            debug!("Can't close unknown window {id}");
            return None;
        };

        if let Err(e) = remove_layout(&mut self.store, id) {
            error!("Failed to remove layout of {id}: {e:?}");
        }

        if self.focused.as_ref() == Some(id) {
            self.focused = None;
            self.focus_topmost();
        }
        Some(record)
    }

    /// Moves the window. Not persisted until [`Self::drag_end`].
    pub fn drag(&mut self, id: &WindowId, dx: f64, dy: f64) {
        let Some(record) = self.normal_window_mut(id) else {
            return;
        };
        record.geometry.x += dx;
        record.geometry.y += dy;
    }

    pub fn drag_end(&mut self, id: &WindowId) {
        self.end_interaction(id);
    }

    /// Resizes the window, clamped to the minimum size and to the viewport right and below the
    /// window's origin. Not persisted until [`Self::resize_end`].
    pub fn resize(&mut self, id: &WindowId, width: f64, height: f64) {
        if !(width.is_finite() && height.is_finite()) {
            return;
        }
        let min = self.config.min_size();
        let viewport = self.viewport;
        let Some(record) = self.normal_window_mut(id) else {
            return;
        };

        let mut size = Size::new(width, height);
        if let Some(viewport) = viewport {
            let available = Size::new(
                viewport.width - record.geometry.x,
                viewport.height - record.geometry.y,
            );
            size = size.min(available);
        }
        let size = size.max(min);
        record.geometry.width = size.width;
        record.geometry.height = size.height;
    }

    pub fn resize_end(&mut self, id: &WindowId) {
        self.end_interaction(id);
    }

    /// Scales the window by `scale_delta` relative to its current pinch scale. The resulting
    /// scale is clamped to the configured range relative to the size when the pinch began.
    pub fn pinch_resize(&mut self, id: &WindowId, scale_delta: f64) {
        if !(scale_delta.is_finite() && scale_delta > 0.0) {
            return;
        }
        let (min_scale, max_scale) = (self.config.min_scale, self.config.max_scale);
        let min_size = self.config.min_size();
        let Some(record) = self.normal_window_mut(id) else {
            return;
        };

        let base = *record.pinch_base.get_or_insert(record.geometry.size());
        let scale = (record.geometry.scale * scale_delta).clamp(min_scale, max_scale);
        let size = (base * scale).max(min_size);
        record.geometry.scale = scale;
        record.geometry.width = size.width;
        record.geometry.height = size.height;
    }

    /// Commits the pinched size and resets the scale.
    pub fn pinch_end(&mut self, id: &WindowId) {
        let Some(record) = self.windows.get_mut(id) else {
            return;
        };
        record.pinch_base = None;
        record.geometry.scale = 1.0;
        self.end_interaction(id);
    }

    /// Accumulates the live rotation.
    pub fn rotate(&mut self, id: &WindowId, delta_degrees: f64) {
        if !delta_degrees.is_finite() {
            return;
        }
        if let Some(record) = self.normal_window_mut(id) {
            record.geometry.rotation += delta_degrees;
        }
    }

    /// Rotation is transient, it does not survive the gesture.
    pub fn rotate_end(&mut self, id: &WindowId) {
        if let Some(record) = self.windows.get_mut(id) {
            record.geometry.rotation = 0.0;
        }
    }

    /// Rounds the window's origin to the nearest grid multiple.
    pub fn snap_to_grid(&mut self, id: &WindowId) {
        let grid = self.config.grid_size;
        if let Some(record) = self.windows.get_mut(id) {
            record.geometry.x = round_to_multiple(record.geometry.x, grid);
            record.geometry.y = round_to_multiple(record.geometry.y, grid);
        }
    }

    pub fn minimize(&mut self, id: &WindowId) {
        let Some(record) = self.windows.get_mut(id) else {
            return;
        };
        if record.mode == WindowMode::Minimized {
            return;
        }
        record.mode = WindowMode::Minimized;
        record.focused = false;
        self.persist(id);

        if self.focused.as_ref() == Some(id) {
            self.focused = None;
            self.focus_topmost();
        }
    }

    /// Fills the viewport. Needs a viewport.
    pub fn maximize(&mut self, id: &WindowId) {
        let Some(viewport) = self.viewport else {
            debug!("Can't maximize {id} without a viewport");
            return;
        };
        let Some(record) = self.windows.get_mut(id) else {
            return;
        };
        if record.mode == WindowMode::Maximized {
            return;
        }
        maximize_into(record, viewport);
        self.persist(id);
        self.focus(id);
    }

    /// Returns to the normal state and the geometry from before maximizing.
    pub fn restore(&mut self, id: &WindowId) {
        let Some(record) = self.windows.get_mut(id) else {
            return;
        };
        if record.mode == WindowMode::Normal {
            return;
        }
        if let Some(geometry) = record.restore_geometry.take() {
            record.geometry = geometry;
        }
        record.mode = WindowMode::Normal;
        self.persist(id);
        self.focus(id);
    }

    pub fn toggle_maximize(&mut self, id: &WindowId) {
        match self.window(id).map(|w| w.mode) {
            Some(WindowMode::Maximized) => self.restore(id),
            Some(_) => self.maximize(id),
            None => {}
        }
    }

    /// Down minimizes, up toggles maximize, left and right cycle the focus.
    pub fn three_finger_swipe(&mut self, id: &WindowId, direction: SwipeDirection) {
        if !self.windows.contains_key(id) {
            return;
        }
        match direction {
            SwipeDirection::Down => self.minimize(id),
            SwipeDirection::Up => self.toggle_maximize(id),
            SwipeDirection::Left => {
                self.cycle_focus(false);
            }
            SwipeDirection::Right => {
                self.cycle_focus(true);
            }
        }
    }

    /// Moves the focus to the next (or previous) visible window in opening order.
    pub fn cycle_focus(&mut self, forward: bool) -> Option<WindowId> {
        let visible: Vec<WindowId> = self
            .windows
            .values()
            .filter(|w| w.is_visible())
            .map(|w| w.id.clone())
            .collect();
        if visible.is_empty() {
            return None;
        }

        let len = visible.len();
        let next = match self
            .focused
            .as_ref()
            .and_then(|f| visible.iter().position(|id| id == f))
        {
            Some(current) if forward => (current + 1) % len,
            Some(current) => (current + len - 1) % len,
            None => 0,
        };

        let id = visible[next].clone();
        self.focus(&id).then_some(id)
    }

    /// Persists the layout of the window right now.
    pub fn save(&mut self, id: &WindowId) {
        self.persist(id);
    }

    pub fn save_all(&mut self) {
        let ids: Vec<WindowId> = self.windows.keys().cloned().collect();
        for id in &ids {
            self.persist(id);
        }
    }

    fn end_interaction(&mut self, id: &WindowId) {
        if !self.windows.contains_key(id) {
            return;
        }
        if self.config.snap_to_grid {
            self.snap_to_grid(id);
        }
        self.persist(id);
    }

    fn persist(&mut self, id: &WindowId) {
        let Some(record) = self.windows.get(id) else {
            return;
        };
        let layout = PersistedLayout::from_record(record);
        if let Err(e) = save_layout(&mut self.store, id, &layout) {
            error!("Failed to persist layout of {id}: {e:?}");
        }
    }

    fn raise(&mut self, id: &WindowId) {
        self.z_counter += 1;
        if let Some(record) = self.windows.get_mut(id) {
            record.z_index = self.z_counter;
        }
    }

    /// A visible modal window other than `id` that keeps the focus, if `id` isn't modal itself.
    fn blocking_modal(&self, id: &WindowId) -> Option<&WindowId> {
        if self.windows.get(id).is_some_and(|w| w.modal) {
            return None;
        }
        self.windows
            .values()
            .filter(|w| w.modal && w.is_visible() && &w.id != id)
            .max_by_key(|w| w.z_index)
            .map(|w| &w.id)
    }

    fn focus_topmost(&mut self) {
        let topmost = self
            .windows
            .values()
            .filter(|w| w.is_visible())
            .max_by_key(|w| w.z_index)
            .map(|w| w.id.clone());
        if let Some(id) = topmost {
            self.focus(&id);
        }
    }

    /// Interactive geometry changes apply only to windows in the normal state.
    fn normal_window_mut(&mut self, id: &WindowId) -> Option<&mut WindowRecord> {
        match self.windows.get_mut(id) {
            Some(record) if record.mode == WindowMode::Normal => Some(record),
            Some(_) => None,
            None => {
                debug!("Ignoring geometry change of unknown window {id}");
                None
            }
        }
    }
}

fn maximize_into(record: &mut WindowRecord, viewport: Size) {
    if record.restore_geometry.is_none() {
        record.restore_geometry = Some(record.geometry);
    }
    record.geometry = Geometry::from_bounds(Rect::from_size(viewport));
    record.mode = WindowMode::Maximized;
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::layout::layout_key;

    fn manager() -> WindowManager {
        WindowManager::new(WindowManagerConfig::default(), MemoryStore::new())
    }

    fn chat() -> WindowDescriptor {
        WindowDescriptor::new("chat", "Chat", (80.0, 80.0, 360.0, 320.0))
    }

    fn contacts() -> WindowDescriptor {
        WindowDescriptor::new("contacts", "Contacts", (500.0, 100.0, 300.0, 400.0))
    }

    fn id(s: &str) -> WindowId {
        s.into()
    }

    fn focused_count<S: KeyValueStore>(m: &WindowManager<S>) -> usize {
        m.windows().filter(|w| w.focused).count()
    }

    #[test]
    fn chat_scenario_snaps_after_drag() {
        let mut m = manager();
        m.open(chat());
        m.drag(&id("chat"), 50.0, -10.0);
        assert_eq!(m.geometry(&id("chat")).unwrap().origin(), Point::new(130.0, 70.0));
        assert!(!m.store().contains_key(&layout_key(&id("chat"))));

        m.drag_end(&id("chat"));
        let geometry = m.geometry(&id("chat")).unwrap();
        assert_eq!((geometry.x, geometry.y), (120.0, 72.0));
        assert!(m.store().contains_key(&layout_key(&id("chat"))));
    }

    #[test]
    fn snap_to_grid_rounds_to_nearest_multiple() {
        let mut m = manager();
        m.open(WindowDescriptor::new("w", "W", (130.0, 101.0, 300.0, 200.0)));
        m.snap_to_grid(&id("w"));
        assert_eq!(m.geometry(&id("w")).unwrap().origin(), Point::new(120.0, 96.0));
    }

    #[test]
    fn open_twice_refocuses() {
        let mut m = manager();
        m.open(chat());
        m.open(contacts());
        let z_before = m.window(&id("chat")).unwrap().z_index;

        let record = m.open(chat().with_content("hello"));
        assert_eq!(record.content.as_deref(), Some("hello"));
        assert!(record.focused);
        assert!(record.z_index > z_before);
        assert_eq!(m.len(), 2);
        assert_eq!(focused_count(&m), 1);

        // Reopening without content keeps the current content.
        m.open(chat());
        assert_eq!(m.window(&id("chat")).unwrap().content.as_deref(), Some("hello"));
    }

    #[test]
    fn focus_is_exclusive_and_z_strictly_increases() {
        let mut m = manager();
        m.open(chat());
        m.open(contacts());
        let mut last_z = 0;
        for name in ["chat", "contacts", "contacts", "chat"] {
            assert!(m.focus(&id(name)));
            let z = m.window(&id(name)).unwrap().z_index;
            assert!(z > last_z);
            last_z = z;
            assert_eq!(focused_count(&m), 1);
            assert_eq!(m.focused(), Some(&id(name)));
        }
        let order: Vec<_> = m.z_ordered().map(|w| w.id.to_string()).collect();
        assert_eq!(order, ["contacts", "chat"]);
    }

    #[test]
    fn resize_never_goes_below_minimum() {
        let mut m = manager();
        m.open(chat());
        m.resize(&id("chat"), 10.0, -50.0);
        let g = m.geometry(&id("chat")).unwrap();
        assert_eq!((g.width, g.height), (220.0, 160.0));
    }

    #[test]
    fn resize_is_clamped_to_viewport() {
        let mut m = manager();
        m.set_viewport(Size::new(800.0, 600.0));
        m.open(chat());
        m.resize(&id("chat"), 2000.0, 300.0);
        let g = m.geometry(&id("chat")).unwrap();
        assert_eq!((g.width, g.height), (720.0, 300.0));
    }

    #[test]
    fn descriptor_defaults_are_clamped_to_minimum() {
        let mut m = manager();
        let record = m.open(WindowDescriptor::new("tiny", "Tiny", (0.0, 0.0, 10.0, 10.0)));
        assert_eq!(record.geometry.size(), Size::new(220.0, 160.0));
    }

    #[test]
    fn close_forgets_everything() {
        let mut m = manager();
        m.open(chat());
        m.drag_end(&id("chat"));
        assert!(m.store().contains_key(&layout_key(&id("chat"))));

        assert!(m.close(&id("chat")).is_some());
        assert!(!m.focus(&id("chat")));
        assert_eq!(m.geometry(&id("chat")), None);
        assert!(!m.store().contains_key(&layout_key(&id("chat"))));
        assert_eq!(m.focused(), None);
        assert!(m.close(&id("chat")).is_none());
    }

    #[test]
    fn closing_focused_window_focuses_topmost() {
        let mut m = manager();
        m.open(chat());
        m.open(contacts());
        m.open(WindowDescriptor::new("settings", "Settings", (0.0, 0.0, 300.0, 300.0)));
        m.focus(&id("chat"));
        m.close(&id("chat"));
        assert_eq!(m.focused(), Some(&id("settings")));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut m = manager();
        let ghost = id("ghost");
        m.drag(&ghost, 1.0, 1.0);
        m.drag_end(&ghost);
        m.resize(&ghost, 500.0, 500.0);
        m.pinch_resize(&ghost, 1.2);
        m.pinch_end(&ghost);
        m.rotate(&ghost, 10.0);
        m.rotate_end(&ghost);
        m.snap_to_grid(&ghost);
        m.minimize(&ghost);
        m.maximize(&ghost);
        m.restore(&ghost);
        m.three_finger_swipe(&ghost, SwipeDirection::Down);
        assert!(!m.focus(&ghost));
        assert!(m.is_empty());
        assert!(m.store().is_empty());
    }

    #[test]
    fn pinch_scales_within_range_and_commits() {
        let mut m = WindowManager::new(
            WindowManagerConfig::default().with_min_size(100.0, 100.0),
            MemoryStore::new(),
        );
        m.open(WindowDescriptor::new("w", "W", (0.0, 0.0, 300.0, 200.0)));
        let w = id("w");

        m.pinch_resize(&w, 1.5);
        assert_relative_eq!(m.geometry(&w).unwrap().width, 450.0);
        m.pinch_resize(&w, 1.5);
        // 2.25 is clamped to 1.6.
        let g = m.geometry(&w).unwrap();
        assert_relative_eq!(g.scale, 1.6);
        assert_relative_eq!(g.width, 480.0);
        assert_relative_eq!(g.height, 320.0);

        m.pinch_resize(&w, 0.1);
        let g = m.geometry(&w).unwrap();
        assert_relative_eq!(g.scale, 0.6);
        assert_relative_eq!(g.width, 180.0);
        assert_relative_eq!(g.height, 120.0);

        m.pinch_end(&w);
        let g = m.geometry(&w).unwrap();
        assert_eq!(g.scale, 1.0);
        assert_relative_eq!(g.width, 180.0);
        assert!(m.store().contains_key(&layout_key(&w)));

        // The next pinch measures from the committed size.
        m.pinch_resize(&w, 1.5);
        assert_relative_eq!(m.geometry(&w).unwrap().width, 270.0);
    }

    #[test]
    fn pinch_never_shrinks_below_minimum() {
        let mut m = manager();
        m.open(chat());
        m.pinch_resize(&id("chat"), 0.5);
        let g = m.geometry(&id("chat")).unwrap();
        assert_relative_eq!(g.width, 220.0);
        assert_relative_eq!(g.height, 192.0);
    }

    #[test]
    fn rotation_is_transient() {
        let mut m = manager();
        m.open(chat());
        m.rotate(&id("chat"), 10.0);
        m.rotate(&id("chat"), 5.5);
        assert_relative_eq!(m.geometry(&id("chat")).unwrap().rotation, 15.5);
        m.save(&id("chat"));
        m.rotate_end(&id("chat"));
        assert_eq!(m.geometry(&id("chat")).unwrap().rotation, 0.0);

        let json = m.store().get(&layout_key(&id("chat"))).unwrap();
        assert!(!json.contains("rotation"));
    }

    #[test]
    fn maximize_and_restore_round_trip() {
        let mut m = manager();
        m.set_viewport(Size::new(1280.0, 800.0));
        m.open(chat());
        let before = m.geometry(&id("chat")).unwrap();

        m.maximize(&id("chat"));
        let record = m.window(&id("chat")).unwrap();
        assert_eq!(record.mode, WindowMode::Maximized);
        assert_eq!(record.geometry, Geometry::new(0.0, 0.0, 1280.0, 800.0));

        // Maximized windows can't be dragged.
        m.drag(&id("chat"), 10.0, 10.0);
        assert_eq!(m.geometry(&id("chat")).unwrap().origin(), Point::ZERO);

        m.restore(&id("chat"));
        assert_eq!(m.geometry(&id("chat")).unwrap(), before);
        assert_eq!(m.window(&id("chat")).unwrap().mode, WindowMode::Normal);
    }

    #[test]
    fn maximize_needs_viewport() {
        let mut m = manager();
        m.open(chat());
        m.maximize(&id("chat"));
        assert_eq!(m.window(&id("chat")).unwrap().mode, WindowMode::Normal);
    }

    #[test]
    fn minimize_hands_focus_to_topmost_visible() {
        let mut m = manager();
        m.open(chat());
        m.open(contacts());
        m.minimize(&id("contacts"));
        let record = m.window(&id("contacts")).unwrap();
        assert_eq!(record.mode, WindowMode::Minimized);
        assert!(!record.focused);
        assert_eq!(m.focused(), Some(&id("chat")));

        // Minimized windows are not hit.
        assert_eq!(m.hit_test(Point::new(600.0, 200.0)), None);

        // Focusing brings it back.
        m.focus(&id("contacts"));
        assert_eq!(m.window(&id("contacts")).unwrap().mode, WindowMode::Normal);
    }

    #[test]
    fn minimized_maximized_window_restores_to_normal_geometry() {
        let mut m = manager();
        m.set_viewport(Size::new(1000.0, 700.0));
        m.open(chat());
        m.maximize(&id("chat"));
        m.minimize(&id("chat"));
        m.restore(&id("chat"));
        assert_eq!(
            m.geometry(&id("chat")).unwrap(),
            Geometry::new(80.0, 80.0, 360.0, 320.0)
        );
    }

    #[test]
    fn minimized_maximized_window_follows_viewport() {
        let mut m = manager();
        m.set_viewport(Size::new(1280.0, 800.0));
        m.open(chat());
        m.maximize(&id("chat"));
        m.minimize(&id("chat"));
        m.set_viewport(Size::new(1000.0, 600.0));

        m.focus(&id("chat"));
        let record = m.window(&id("chat")).unwrap();
        assert_eq!(record.mode, WindowMode::Maximized);
        assert_eq!(record.geometry, Geometry::new(0.0, 0.0, 1000.0, 600.0));

        m.restore(&id("chat"));
        assert_eq!(
            m.geometry(&id("chat")).unwrap(),
            Geometry::new(80.0, 80.0, 360.0, 320.0)
        );
    }

    #[test]
    fn swipes_minimize_and_cycle() {
        let mut m = manager();
        m.set_viewport(Size::new(1280.0, 800.0));
        m.open(chat());
        m.open(contacts());
        m.open(WindowDescriptor::new("settings", "Settings", (0.0, 0.0, 300.0, 300.0)));

        m.three_finger_swipe(&id("settings"), SwipeDirection::Right);
        assert_eq!(m.focused(), Some(&id("chat")));
        m.three_finger_swipe(&id("chat"), SwipeDirection::Left);
        assert_eq!(m.focused(), Some(&id("settings")));

        m.three_finger_swipe(&id("contacts"), SwipeDirection::Down);
        assert_eq!(m.window(&id("contacts")).unwrap().mode, WindowMode::Minimized);
        m.three_finger_swipe(&id("settings"), SwipeDirection::Left);
        // Skips the minimized contacts window.
        assert_eq!(m.focused(), Some(&id("chat")));

        m.three_finger_swipe(&id("chat"), SwipeDirection::Up);
        assert_eq!(m.window(&id("chat")).unwrap().mode, WindowMode::Maximized);
        m.three_finger_swipe(&id("chat"), SwipeDirection::Up);
        assert_eq!(m.window(&id("chat")).unwrap().mode, WindowMode::Normal);
    }

    #[test]
    fn modal_window_keeps_focus() {
        let mut m = manager();
        m.open(chat());
        m.open(WindowDescriptor::new("confirm", "Confirm", (100.0, 100.0, 240.0, 160.0)).modal());
        assert!(!m.focus(&id("chat")));
        assert_eq!(m.focused(), Some(&id("confirm")));

        // Windows opened behind a modal don't steal focus, the modal stays on top.
        m.open(contacts());
        assert_eq!(m.focused(), Some(&id("confirm")));
        let top = m.z_ordered().last().unwrap();
        assert_eq!(top.id, id("confirm"));

        m.close(&id("confirm"));
        assert!(m.focus(&id("chat")));
    }

    #[test]
    fn restores_persisted_layout() {
        let mut store = MemoryStore::new();
        store
            .set(
                &layout_key(&id("chat")),
                r#"{"x":240,"y":48,"width":400,"height":300}"#.into(),
            )
            .unwrap();
        let mut m = WindowManager::new(WindowManagerConfig::default(), store);
        let record = m.open(chat());
        assert_eq!(record.geometry, Geometry::new(240.0, 48.0, 400.0, 300.0));
    }

    #[test]
    fn malformed_persisted_layout_falls_back_to_defaults() {
        let mut store = MemoryStore::new();
        store
            .set(&layout_key(&id("chat")), "definitely not json".into())
            .unwrap();
        let mut m = WindowManager::new(WindowManagerConfig::default(), store);
        let record = m.open(chat());
        assert_eq!(record.geometry, Geometry::new(80.0, 80.0, 360.0, 320.0));
    }

    #[test]
    fn persisted_minimized_window_opens_minimized_and_unfocused() {
        let mut store = MemoryStore::new();
        store
            .set(
                &layout_key(&id("chat")),
                r#"{"x":0,"y":0,"width":400,"height":300,"minimized":true}"#.into(),
            )
            .unwrap();
        let mut m = WindowManager::new(WindowManagerConfig::default(), store);
        let record = m.open(chat());
        assert_eq!(record.mode, WindowMode::Minimized);
        assert!(!record.focused);
        assert_eq!(m.focused(), None);
    }

    #[test]
    fn maximized_layout_persists_normal_geometry() {
        let mut m = manager();
        m.set_viewport(Size::new(1280.0, 800.0));
        m.open(chat());
        m.maximize(&id("chat"));

        let store = m.store().clone();
        let mut reopened = WindowManager::new(WindowManagerConfig::default(), store);
        reopened.set_viewport(Size::new(1280.0, 800.0));
        reopened.open(chat());
        assert_eq!(
            reopened.window(&id("chat")).unwrap().mode,
            WindowMode::Maximized
        );
        reopened.restore(&id("chat"));
        assert_eq!(
            reopened.geometry(&id("chat")).unwrap(),
            Geometry::new(80.0, 80.0, 360.0, 320.0)
        );
    }

    #[test]
    fn hit_test_picks_topmost() {
        let mut m = manager();
        m.open(WindowDescriptor::new("a", "A", (0.0, 0.0, 300.0, 300.0)));
        m.open(WindowDescriptor::new("b", "B", (100.0, 100.0, 300.0, 300.0)));
        assert_eq!(m.hit_test(Point::new(150.0, 150.0)), Some(&id("b")));
        m.focus(&id("a"));
        assert_eq!(m.hit_test(Point::new(150.0, 150.0)), Some(&id("a")));
        assert_eq!(m.hit_test(Point::new(350.0, 350.0)), Some(&id("b")));
        assert_eq!(m.hit_test(Point::new(900.0, 900.0)), None);
    }

    #[test]
    fn snapping_can_be_disabled() {
        let mut m = WindowManager::new(
            WindowManagerConfig::default().with_snap_to_grid(false),
            MemoryStore::new(),
        );
        m.open(chat());
        m.drag(&id("chat"), 50.0, -10.0);
        m.drag_end(&id("chat"));
        assert_eq!(m.geometry(&id("chat")).unwrap().origin(), Point::new(130.0, 70.0));
    }
}
