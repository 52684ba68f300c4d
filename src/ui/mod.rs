//! UI system.
//!
//! Everything here is a reference entity: plain screen-space widgets a game
//! can use as-is or crib from when building its own. None of them consult
//! the camera; a game that wants world-space sprites writes its own
//! [`Drawable`](crate::entity::Drawable) that subtracts the camera before
//! painting.

pub mod widget;
