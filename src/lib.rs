//! A state-machine engine for keyboard-driven terminal cell games.
//!
//! You describe a game as a table of [`State`]s, each of which exposes the
//! entities active while it is current; the [`Engine`] runs a fixed frame
//! loop that feeds key events to the interactive ones, elapsed time to the
//! time-aware ones, composites the drawable ones into character cells at a
//! configured refresh rate, and asks the state for its successor. Resizes
//! are handled by handing every drawable the current scale ratios; widgets
//! that care (the `Flex` family in [`ui::widget`]) re-derive their geometry
//! from them.
//!
//! ```no_run
//! use std::collections::HashMap;
//! use std::rc::Rc;
//!
//! use tableau::screen::Style;
//! use tableau::ui::widget::StrictRectangle;
//! use tableau::{shared, Drawable, Engine, EngineOpts, Rect, Shared, State, StateKey, StateRef};
//!
//! struct Splash {
//!   backdrop: Shared<StrictRectangle>,
//! }
//!
//! impl State for Splash {
//!   fn drawables(&self) -> Vec<Shared<dyn Drawable>> {
//!     vec![self.backdrop.clone() as Shared<dyn Drawable>]
//!   }
//!
//!   fn next_state(&self) -> StateKey {
//!     StateKey::from("splash")
//!   }
//! }
//!
//! fn main() -> Result<(), tableau::Error> {
//!   let splash = Splash {
//!     backdrop: shared(StrictRectangle {
//!       area: Rect::new(0, 0, 20, 10),
//!       style: Style::default(),
//!     }),
//!   };
//!
//!   let mut states: HashMap<StateKey, StateRef> = HashMap::new();
//!   states.insert(StateKey::from("splash"), Rc::new(splash) as StateRef);
//!
//!   let mut engine = Engine::new()?;
//!   engine.configure(EngineOpts {
//!     fps: 30,
//!     initial_state: StateKey::from("splash"),
//!     states,
//!     overlays: Vec::new(),
//!   });
//!   engine.run()
//! }
//! ```

#![deny(unused)]

pub mod engine;
pub mod entity;
pub mod geo;
pub mod screen;
pub mod state;
pub mod timing;
pub mod ui;

pub use crate::engine::Engine;
pub use crate::engine::EngineOpts;
pub use crate::engine::Error;
pub use crate::entity::shared;
pub use crate::entity::Drawable;
pub use crate::entity::Interactive;
pub use crate::entity::Overlay;
pub use crate::entity::Shared;
pub use crate::entity::TimeAware;
pub use crate::geo::Point;
pub use crate::geo::Rect;
pub use crate::screen::Screen;
pub use crate::state::State;
pub use crate::state::StateKey;
pub use crate::state::StateRef;
