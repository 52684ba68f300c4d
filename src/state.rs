//! Game states.
//!
//! Any computation can be summarized by a state machine; a game, similarly
//! so. A [`State`] is one named node of that machine: it owns the entities
//! that are active while it is current, and decides every frame which node
//! runs next. The engine queries it each frame, so every method here must be
//! cheap.

use std::fmt;
use std::rc::Rc;

use crate::entity::Drawable;
use crate::entity::Interactive;
use crate::entity::Shared;
use crate::entity::TimeAware;
use crate::geo::Point;

/// Names a node of the state machine.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct StateKey(String);

impl StateKey {
  /// Creates a key from anything string-like.
  pub fn new(name: impl Into<String>) -> Self {
    Self(name.into())
  }

  /// Returns the key's name.
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for StateKey {
  fn from(name: &str) -> Self {
    Self::new(name)
  }
}

impl From<String> for StateKey {
  fn from(name: String) -> Self {
    Self::new(name)
  }
}

impl fmt::Display for StateKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// A shared handle to a state.
///
/// The state table and the engine's notion of "current" both hold one, so
/// states persist across transitions: a re-entered state resumes exactly
/// where it was left, unless the game resets it.
pub type StateRef = Rc<dyn State>;

/// A named node of the state machine.
///
/// All five queries run every frame. The entity lists may change between
/// frames, and `next_state` may read mutable entity state (say, a menu
/// selection) to pick the transition; returning the state's own key keeps
/// it resident. Transitions happen every frame, even self-transitions, so a
/// state cannot assume it is only visited when the node actually changes.
pub trait State {
  /// The entities to paint, in z-order: later entries paint over earlier
  /// ones.
  fn drawables(&self) -> Vec<Shared<dyn Drawable>>;

  /// The entities that receive key events, in delivery order.
  fn interactables(&self) -> Vec<Shared<dyn Interactive>> {
    Vec::new()
  }

  /// The entities that receive frame time, in delivery order.
  fn time_aware(&self) -> Vec<Shared<dyn TimeAware>> {
    Vec::new()
  }

  /// The world coordinate of the top-left visible cell.
  fn camera(&self) -> Point {
    Point::zero()
  }

  /// The key of the state to run next frame.
  fn next_state(&self) -> StateKey;
}
