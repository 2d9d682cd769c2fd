//! Pointer gesture recognition.
//!
//! A [`GestureRecognizer`] is attached to exactly one target. It consumes [`PointerEvent`]s and
//! frame ticks and produces [`GestureEvent`]s, which can be forwarded to a [`GestureHandler`].
mod capture;
mod config;
mod gesture;
mod pointer;
mod recognizer;
mod touch;

pub use capture::*;
pub use config::*;
pub use gesture::*;
pub use pointer::*;
pub use recognizer::*;
pub use touch::*;
