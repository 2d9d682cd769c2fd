use crate::{Point, Size};

/// An axis aligned rectangle in screen space.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(origin: impl Into<Point>, size: impl Into<Size>) -> Self {
        Self {
            origin: origin.into(),
            size: size.into(),
        }
    }

    /// A rectangle at the origin.
    pub fn from_size(size: impl Into<Size>) -> Self {
        Self::new(Point::ZERO, size)
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// The bottom right corner, exclusive.
    pub fn end(&self) -> Point {
        self.origin + self.size
    }

    /// NaN sizes are empty too.
    pub fn is_empty(&self) -> bool {
        !(self.size.width > 0.0 && self.size.height > 0.0)
    }

    /// The left and top edges are inside, the right and bottom edges are not.
    pub fn contains(&self, p: Point) -> bool {
        let end = self.end();
        (self.origin.x..end.x).contains(&p.x) && (self.origin.y..end.y).contains(&p.y)
    }
}

impl From<(Point, Size)> for Rect {
    fn from((origin, size): (Point, Size)) -> Self {
        Self { origin, size }
    }
}
