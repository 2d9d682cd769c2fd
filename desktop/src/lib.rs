//! Floating windows on a touch desktop.
//!
//! The [`WindowManager`] owns window records, their stacking order, focus, and persisted layouts.
//! [`WindowGestures`] turns pointer contacts into gestures and applies them to the windows under
//! the contacts.
mod config;
pub mod layout;
mod store;
mod window;
mod window_gestures;
mod window_manager;

pub use config::*;
pub use store::*;
pub use window::*;
pub use window_gestures::*;
pub use window_manager::*;
