use anyhow::Result;

use crate::PointerId;

/// Routes all events of a pointer to the target for as long as the contact lasts, even when it
/// leaves the target's bounds.
///
/// Capturing is best effort. The recognizer logs and ignores failures.
pub trait PointerCapture {
    fn acquire(&mut self, pointer: PointerId) -> Result<()>;
    fn release(&mut self, pointer: PointerId) -> Result<()>;
}

/// For targets that receive all pointer events anyway.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn acquire(&mut self, _pointer: PointerId) -> Result<()> {
        Ok(())
    }

    fn release(&mut self, _pointer: PointerId) -> Result<()> {
        Ok(())
    }
}
