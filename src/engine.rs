//! The engine runtime.
//!
//! The engine will run your game. It owns the screen, the state table, the
//! current state and the frame clock, and drives a fixed loop: flush the
//! previous frame, wait for one input event or one tick (whichever first),
//! dispatch keys to the current state's interactables, advance its
//! time-aware entities by the nominal frame period, paint its drawables in
//! declaration order, paint the overlays on top, then look up the next
//! state. The only clean exit is Ctrl-C; on every exit path, clean or not,
//! the terminal is cleared and released before control returns.

use std::collections::HashMap;
use std::panic;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::debug;
use tracing::trace;

use crate::entity::Overlay;
use crate::entity::Shared;
use crate::screen::term::Term;
use crate::screen::Event;
use crate::screen::KeyCode;
use crate::screen::KeyEvent;
use crate::screen::KeyModifiers;
use crate::screen::Screen;
use crate::state::StateKey;
use crate::state::StateRef;
use crate::timing::FrameClock;

/// The frame rate used when a configuration asks for 0.
const DEFAULT_FPS: u32 = 30;

/// Errors surfaced by the engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The terminal could not be opened or initialized.
  #[error("terminal unavailable: {0}")]
  TerminalUnavailable(#[from] crossterm::ErrorKind),

  /// A state-table lookup failed: either the configured initial state or a
  /// `next_state` result names no registered state.
  #[error("no state registered for key {0:?}")]
  MissingSuccessor(StateKey),
}

/// Configuration for [`Engine::configure`].
pub struct EngineOpts {
  /// Target frames per second. 0 selects the default of 30.
  pub fps: u32,
  /// The key of the state the engine starts in; must name an entry of
  /// `states`.
  pub initial_state: StateKey,
  /// The full state table. Every key any state can transition to must be
  /// present; a miss is fatal at runtime.
  pub states: HashMap<StateKey, StateRef>,
  /// Drawables painted after every state drawable, in screen space. May be
  /// empty.
  pub overlays: Vec<Shared<dyn Overlay>>,
}

/// The engine.
///
/// Build one with [`Engine::new`] (which opens the terminal) or
/// [`Engine::with_screen`] (any [`Screen`], e.g. a
/// [`BufferScreen`](crate::screen::buffer::BufferScreen) for headless runs),
/// [`configure`](Engine::configure) it, then block in [`run`](Engine::run).
pub struct Engine<S = Term> {
  screen: S,
  fps: u32,
  current: Option<StateRef>,
  current_key: StateKey,
  states: HashMap<StateKey, StateRef>,
  overlays: Vec<Shared<dyn Overlay>>,
}

impl Engine<Term> {
  /// Opens the terminal and builds an engine around it.
  ///
  /// Ownership of the terminal passes to the engine; it is released when
  /// [`run`](Engine::run) returns, on every path.
  pub fn new() -> Result<Engine<Term>, Error> {
    let mut screen = Term::init()?;
    screen.clear();
    Ok(Engine::with_screen(screen))
  }
}

impl<S: Screen> Engine<S> {
  /// Builds an engine around an already-open screen.
  pub fn with_screen(screen: S) -> Engine<S> {
    Engine {
      screen,
      fps: DEFAULT_FPS,
      current: None,
      current_key: StateKey::from(""),
      states: HashMap::new(),
      overlays: Vec::new(),
    }
  }

  /// Returns the current screen dimensions in cells.
  pub fn screen_size(&self) -> (i32, i32) {
    self.screen.size()
  }

  /// Returns the configured target frame rate.
  pub fn fps(&self) -> u32 {
    self.fps
  }

  /// Borrows the underlying screen.
  pub fn screen(&self) -> &S {
    &self.screen
  }

  /// Installs the frame rate, the state table and the overlays, and latches
  /// the initial state.
  ///
  /// The table is not validated here: a missing `initial_state`, like any
  /// missing transition target, surfaces as
  /// [`Error::MissingSuccessor`] once [`run`](Engine::run) starts.
  pub fn configure(&mut self, opts: EngineOpts) {
    self.fps = if opts.fps == 0 { DEFAULT_FPS } else { opts.fps };
    self.current = opts.states.get(&opts.initial_state).cloned();
    self.current_key = opts.initial_state;
    self.states = opts.states;
    self.overlays = opts.overlays;
  }

  /// Runs the frame loop until Ctrl-C or a fatal failure.
  ///
  /// Ctrl-C is the one clean exit and returns `Ok`. A missing transition
  /// target returns [`Error::MissingSuccessor`]. A panic raised by an
  /// entity resumes after the terminal is restored, so the caller keeps
  /// the original trace. On all three paths the screen is cleared and
  /// released exactly once.
  pub fn run(&mut self) -> Result<(), Error> {
    let result = panic::catch_unwind(panic::AssertUnwindSafe(|| self.frame_loop()));

    self.screen.clear();
    self.screen.fini();

    match result {
      Ok(result) => result,
      Err(panicked) => panic::resume_unwind(panicked),
    }
  }

  fn frame_loop(&mut self) -> Result<(), Error> {
    let mut current = match self.current.clone() {
      Some(state) => state,
      None => return Err(Error::MissingSuccessor(self.current_key.clone())),
    };
    let mut camera = current.camera();

    let (initial_x, initial_y) = self.screen.size();
    let mut ratio_x = 1.0f32;
    let mut ratio_y = 1.0f32;

    let mut clock = FrameClock::new(self.fps);
    let events = self.screen.events();

    debug!(fps = self.fps, state = %self.current_key, "engine running");

    loop {
      self.screen.show();

      // At most one event per frame; a tick with no event means "advance
      // time without input". The binding is fresh each iteration, so a
      // tick-only frame can never re-deliver a stale key.
      let event = match events.recv_timeout(clock.until_tick()) {
        Ok(event) => Some(event),
        Err(mpsc::RecvTimeoutError::Timeout) => {
          clock.tick();
          None
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
          // The producer is gone (terminal torn down elsewhere); keep
          // ticking so time-aware entities still advance.
          thread::sleep(clock.until_tick());
          clock.tick();
          None
        }
      };

      match event {
        Some(Event::Resize(width, height)) => {
          ratio_x = width as f32 / initial_x as f32;
          ratio_y = height as f32 / initial_y as f32;
          debug!(
            width,
            height,
            ratio_x = f64::from(ratio_x),
            ratio_y = f64::from(ratio_y),
            "screen resized"
          );
          self.screen.sync();
        }
        Some(Event::Key(key)) => {
          // Escape route (usually SIGINT, delivered as a key in raw mode).
          if is_interrupt(&key) {
            debug!("interrupt received, shutting down");
            return Ok(());
          }
          for entity in current.interactables() {
            entity.borrow_mut().process_key(&key, camera);
          }
        }
        None => {}
      }

      for entity in current.time_aware() {
        entity.borrow_mut().process_frame(clock.period(), camera);
      }

      for entity in current.drawables() {
        entity.borrow_mut().draw(&mut self.screen, camera, ratio_x, ratio_y);
      }

      for overlay in &self.overlays {
        overlay.borrow_mut().draw(&mut self.screen);
      }

      // The lookup happens every frame, self-transitions included.
      let next = current.next_state();
      current = match self.states.get(&next) {
        Some(state) => state.clone(),
        None => return Err(Error::MissingSuccessor(next)),
      };
      if next != self.current_key {
        debug!(from = %self.current_key, to = %next, "state transition");
      }
      self.current_key = next;
      camera = current.camera();

      clock.count_frame();
      trace!(
        frame = clock.frame_count(),
        fps = clock.measure_fps(Duration::from_millis(500)),
        "frame complete"
      );
    }
  }
}

/// Whether `key` is the canonical interrupt, Ctrl-C.
fn is_interrupt(key: &KeyEvent) -> bool {
  key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
