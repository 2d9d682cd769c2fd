use super::Point;

/// A line segment, used to describe the relation between two pointer contacts.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
}

impl Line {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// The direction from `p1` to `p2` in degrees. Rotating `p2` clockwise on screen around `p1`
    /// increases it.
    pub fn degrees(&self) -> f64 {
        let d = self.delta();
        d.y.atan2(d.x).to_degrees()
    }

    pub fn length(&self) -> f64 {
        self.delta().length()
    }

    pub fn delta(&self) -> Point {
        self.p2 - self.p1
    }

    pub fn center(&self) -> Point {
        self.p1 + self.delta() / 2.0
    }
}
