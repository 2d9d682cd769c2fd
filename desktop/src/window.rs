use derive_more::{Deref, Display, From};

use floatdesk_geometry::{Point, Rect, Size};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Deref)]
pub struct WindowId(String);

impl From<&str> for WindowId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Position, size, and the transient transforms of a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, clockwise positive. Only non-zero while a rotate gesture is live.
    pub rotation: f64,
    /// Only different from 1.0 while a pinch gesture is live.
    pub scale: f64,
}

impl Geometry {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
            scale: 1.0,
        }
    }

    pub fn from_bounds(bounds: Rect) -> Self {
        let (origin, size) = (bounds.origin(), bounds.size());
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The untransformed bounds.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.origin(), self.size())
    }

    /// Grows the size to at least `min`.
    #[must_use]
    pub fn with_min_size(mut self, min: Size) -> Self {
        let size = self.size().max(min);
        self.width = size.width;
        self.height = size.height;
        self
    }
}

impl From<(f64, f64, f64, f64)> for Geometry {
    fn from((x, y, width, height): (f64, f64, f64, f64)) -> Self {
        Self::new(x, y, width, height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

#[derive(Debug, Clone)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub content: Option<String>,
    pub geometry: Geometry,
    pub z_index: u64,
    pub focused: bool,
    pub mode: WindowMode,
    pub modal: bool,
    /// The geometry before the window got maximized.
    pub(crate) restore_geometry: Option<Geometry>,
    /// The size at the start of the live pinch gesture.
    pub(crate) pinch_base: Option<Size>,
}

impl WindowRecord {
    pub(crate) fn new(descriptor: WindowDescriptor, geometry: Geometry) -> Self {
        Self {
            id: descriptor.id,
            title: descriptor.title,
            content: descriptor.content,
            geometry,
            z_index: 0,
            focused: false,
            mode: WindowMode::Normal,
            modal: descriptor.modal,
            restore_geometry: None,
            pinch_base: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.mode != WindowMode::Minimized
    }

    /// The geometry the window returns to when it leaves the maximized state.
    pub fn normal_geometry(&self) -> Geometry {
        self.restore_geometry.unwrap_or(self.geometry)
    }
}

/// Everything needed to open a window.
#[derive(Debug, Clone)]
pub struct WindowDescriptor {
    pub id: WindowId,
    pub title: String,
    /// Used when no layout was persisted for this window.
    pub geometry: Geometry,
    pub content: Option<String>,
    pub modal: bool,
}

impl WindowDescriptor {
    pub fn new(
        id: impl Into<WindowId>,
        title: impl Into<String>,
        geometry: impl Into<Geometry>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            geometry: geometry.into(),
            content: None,
            modal: false,
        }
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn modal(mut self) -> Self {
        self.modal = true;
        self
    }
}
