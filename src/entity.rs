//! Entity contracts.
//!
//! An entity is anything a state hands to the engine. Entities opt into
//! capabilities by implementing any subset of the three narrow traits here:
//! [`Drawable`] paints cells, [`Interactive`] consumes key events, and
//! [`TimeAware`] consumes elapsed frame time. A menu is typically drawable
//! and interactive; an animation is drawable and time-aware; a backdrop is
//! just drawable.
//!
//! Entities are shared between the state that declares them and whatever
//! game code mutates them, so they travel as [`Shared`] handles. The engine
//! borrows each one only for the duration of a single dispatch.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::geo::Point;
use crate::screen::KeyEvent;
use crate::screen::Screen;

/// A shared, mutably-borrowable handle to an entity.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps an entity for sharing between a state and the engine.
pub fn shared<T>(entity: T) -> Shared<T> {
  Rc::new(RefCell::new(entity))
}

/// An entity that paints into the screen.
///
/// `camera` is the world coordinate of the top-left visible cell; an entity
/// that lives in world space subtracts it before writing. The reference
/// widgets ignore it and paint in screen space. The ratios are the current
/// terminal dimensions divided by the dimensions observed at engine start;
/// entities that rescale themselves cache the last observed pair to detect
/// resizes.
pub trait Drawable {
  /// Paints this entity.
  fn draw(&mut self, screen: &mut dyn Screen, camera: Point, ratio_x: f32, ratio_y: f32);
}

/// An entity that consumes key events.
pub trait Interactive {
  /// Processes one key event. Delivered before any drawing on the frame the
  /// key arrived in.
  fn process_key(&mut self, key: &KeyEvent, camera: Point);
}

/// An entity that consumes elapsed frame time.
///
/// `dt` is the nominal frame period, `1s / fps`, never the measured
/// wall-clock interval: game logic advances by the advertised rate, not by
/// scheduling jitter.
pub trait TimeAware {
  /// Advances this entity by one frame.
  fn process_frame(&mut self, dt: Duration, camera: Point);
}

/// An entity painted after every state drawable, in screen space.
///
/// Overlays ignore the camera and the scale ratios by construction, and
/// always end up on top of the frame.
pub trait Overlay {
  /// Paints this overlay.
  fn draw(&mut self, screen: &mut dyn Screen);
}
