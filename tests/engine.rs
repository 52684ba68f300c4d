//! End-to-end tests of the frame loop, driven through a `BufferScreen`.
//!
//! Every test scripts its input queue up front, runs the engine to an exit
//! (interrupt, missing successor, or a deliberate panic) and then inspects
//! the recorded cell writes and lifecycle counters.

use std::cell::Cell;
use std::cell::RefCell;
use std::collections::HashMap;
use std::panic;
use std::rc::Rc;
use std::time::Duration;

use tableau::screen::buffer::BufferScreen;
use tableau::screen::KeyCode;
use tableau::screen::Style;
use tableau::ui::widget::FlexRectangle;
use tableau::ui::widget::StrictRectangle;
use tableau::{shared, Drawable, Engine, EngineOpts, Error, Interactive, Overlay, TimeAware};
use tableau::{Point, Rect, Screen, Shared, State, StateKey, StateRef};

type Log = Rc<RefCell<Vec<String>>>;

/// A state assembled from parts, so tests can mix and match entities.
struct TestState {
  drawables: Vec<Shared<dyn Drawable>>,
  interactables: Vec<Shared<dyn Interactive>>,
  time_aware: Vec<Shared<dyn TimeAware>>,
  camera: Point,
  next: Box<dyn Fn() -> StateKey>,
}

impl TestState {
  fn with_drawables(drawables: Vec<Shared<dyn Drawable>>, next: Box<dyn Fn() -> StateKey>) -> Self {
    TestState {
      drawables,
      interactables: Vec::new(),
      time_aware: Vec::new(),
      camera: Point::zero(),
      next,
    }
  }
}

impl State for TestState {
  fn drawables(&self) -> Vec<Shared<dyn Drawable>> {
    self.drawables.clone()
  }

  fn interactables(&self) -> Vec<Shared<dyn Interactive>> {
    self.interactables.clone()
  }

  fn time_aware(&self) -> Vec<Shared<dyn TimeAware>> {
    self.time_aware.clone()
  }

  fn camera(&self) -> Point {
    self.camera
  }

  fn next_state(&self) -> StateKey {
    (self.next)()
  }
}

/// Returns a `next_state` that keeps `key` resident for `frames` more
/// transitions, then names a key nobody registered. Since the transition
/// runs at the end of each frame, `frames = n` means `n + 1` frames render.
fn self_loop_for(frames: u32, key: &'static str) -> Box<dyn Fn() -> StateKey> {
  let remaining = Cell::new(frames);
  Box::new(move || {
    if remaining.get() == 0 {
      StateKey::from("the-end")
    } else {
      remaining.set(remaining.get() - 1);
      StateKey::from(key)
    }
  })
}

fn forever(key: &'static str) -> Box<dyn Fn() -> StateKey> {
  Box::new(move || StateKey::from(key))
}

fn single_state(key: &'static str, state: TestState) -> HashMap<StateKey, StateRef> {
  let mut states: HashMap<StateKey, StateRef> = HashMap::new();
  states.insert(StateKey::from(key), Rc::new(state) as StateRef);
  states
}

fn opts(fps: u32, key: &'static str, states: HashMap<StateKey, StateRef>) -> EngineOpts {
  EngineOpts {
    fps,
    initial_state: StateKey::from(key),
    states,
    overlays: Vec::new(),
  }
}

/// A drawable that records its invocation and stamps one marker cell.
struct Mark {
  tag: &'static str,
  col: i32,
  log: Log,
}

impl Drawable for Mark {
  fn draw(&mut self, screen: &mut dyn Screen, camera: Point, _ratio_x: f32, _ratio_y: f32) {
    self
      .log
      .borrow_mut()
      .push(format!("draw {} @{},{}", self.tag, camera.x(), camera.y()));
    screen.set(self.col, 0, self.tag.chars().next().unwrap(), Style::default());
  }
}

/// An overlay that records its invocation and stamps one marker cell.
struct OverlayMark {
  tag: &'static str,
  col: i32,
  log: Log,
}

impl Overlay for OverlayMark {
  fn draw(&mut self, screen: &mut dyn Screen) {
    self.log.borrow_mut().push(format!("overlay {}", self.tag));
    screen.set(self.col, 0, self.tag.chars().next().unwrap(), Style::default());
  }
}

/// An interactable that records every key it sees.
struct KeyProbe {
  tag: &'static str,
  log: Log,
}

impl Interactive for KeyProbe {
  fn process_key(&mut self, key: &tableau::screen::KeyEvent, camera: Point) {
    self.log.borrow_mut().push(format!(
      "key {} {:?} @{},{}",
      self.tag,
      key.code,
      camera.x(),
      camera.y()
    ));
  }
}

/// A time-aware entity that records every frame duration it sees.
struct TimeProbe {
  seen: Rc<RefCell<Vec<Duration>>>,
}

impl TimeAware for TimeProbe {
  fn process_frame(&mut self, dt: Duration, _camera: Point) {
    self.seen.borrow_mut().push(dt);
  }
}

/// A drawable that records the scale ratios it is handed.
struct RatioProbe {
  seen: Rc<RefCell<Vec<(f32, f32)>>>,
}

impl Drawable for RatioProbe {
  fn draw(&mut self, _screen: &mut dyn Screen, _camera: Point, ratio_x: f32, ratio_y: f32) {
    self.seen.borrow_mut().push((ratio_x, ratio_y));
  }
}

/// A drawable that always panics.
struct Bomb;

impl Drawable for Bomb {
  fn draw(&mut self, _screen: &mut dyn Screen, _camera: Point, _ratio_x: f32, _ratio_y: f32) {
    panic!("widget exploded");
  }
}

#[test]
fn ctrl_c_exits_cleanly_and_finalizes_once() {
  let screen = BufferScreen::new(80, 24);
  screen.queue_interrupt();

  let state = TestState::with_drawables(
    vec![shared(StrictRectangle {
      area: Rect::new(0, 0, 4, 2),
      style: Style::default(),
    }) as Shared<dyn Drawable>],
    forever("stay"),
  );

  let mut engine = Engine::with_screen(screen);
  engine.configure(opts(60, "stay", single_state("stay", state)));

  assert!(engine.run().is_ok());
  assert!(engine.screen().shows() >= 1);
  assert_eq!(engine.screen().clears(), 1);
  assert_eq!(engine.screen().finis(), 1);
}

#[test]
fn missing_successor_is_fatal_but_cleans_up() {
  let screen = BufferScreen::new(80, 24);

  let state = TestState::with_drawables(
    vec![shared(StrictRectangle {
      area: Rect::new(0, 0, 4, 2),
      style: Style::default(),
    }) as Shared<dyn Drawable>],
    forever("nowhere"),
  );

  let mut engine = Engine::with_screen(screen);
  engine.configure(opts(60, "stay", single_state("stay", state)));

  match engine.run() {
    Err(Error::MissingSuccessor(key)) => assert_eq!(key, StateKey::from("nowhere")),
    other => panic!("unexpected result: {:?}", other),
  }
  assert_eq!(engine.screen().clears(), 1);
  assert_eq!(engine.screen().finis(), 1);

  // The one frame that did render matches the widget contract: corners on
  // the perimeter of the closed range.
  assert_eq!(engine.screen().cell(0, 0), Some(('┌', Style::default())));
  assert_eq!(engine.screen().cell(4, 0), Some(('┐', Style::default())));
  assert_eq!(engine.screen().cell(0, 2), Some(('└', Style::default())));
  assert_eq!(engine.screen().cell(4, 2), Some(('┘', Style::default())));
  assert_eq!(engine.screen().cell(2, 1), Some((' ', Style::default())));
}

#[test]
fn drawables_paint_in_declaration_order_and_overlays_last() {
  let log: Log = Rc::new(RefCell::new(Vec::new()));
  let screen = BufferScreen::new(80, 24);
  screen.queue_key(KeyCode::Char('x'));
  screen.queue_interrupt();

  let state = TestState::with_drawables(
    vec![
      shared(Mark {
        tag: "a",
        col: 0,
        log: log.clone(),
      }) as Shared<dyn Drawable>,
      shared(Mark {
        tag: "b",
        col: 1,
        log: log.clone(),
      }) as Shared<dyn Drawable>,
    ],
    forever("stay"),
  );

  let mut engine = Engine::with_screen(screen);
  let mut options = opts(60, "stay", single_state("stay", state));
  options.overlays = vec![shared(OverlayMark {
    tag: "o",
    col: 2,
    log: log.clone(),
  }) as Shared<dyn Overlay>];
  engine.configure(options);

  assert!(engine.run().is_ok());
  assert_eq!(
    *log.borrow(),
    vec!["draw a @0,0", "draw b @0,0", "overlay o"]
  );

  // The raw write log agrees: state drawables in declaration order, then
  // the overlay, strictly after them.
  let writes: Vec<(i32, char)> = engine
    .screen()
    .log()
    .iter()
    .map(|call| (call.col, call.glyph))
    .collect();
  assert_eq!(writes, vec![(0, 'a'), (1, 'b'), (2, 'o')]);
}

#[test]
fn keys_reach_every_interactable_once_before_any_draw() {
  let log: Log = Rc::new(RefCell::new(Vec::new()));
  let screen = BufferScreen::new(80, 24);
  screen.queue_key(KeyCode::Down);
  screen.queue_interrupt();

  let mut state = TestState::with_drawables(
    vec![shared(Mark {
      tag: "d",
      col: 0,
      log: log.clone(),
    }) as Shared<dyn Drawable>],
    forever("stay"),
  );
  state.interactables = vec![
    shared(KeyProbe {
      tag: "p",
      log: log.clone(),
    }) as Shared<dyn Interactive>,
    shared(KeyProbe {
      tag: "q",
      log: log.clone(),
    }) as Shared<dyn Interactive>,
  ];
  state.camera = Point::new(7, 3);

  let mut engine = Engine::with_screen(screen);
  engine.configure(opts(60, "stay", single_state("stay", state)));

  assert!(engine.run().is_ok());
  assert_eq!(
    *log.borrow(),
    vec!["key p Down @7,3", "key q Down @7,3", "draw d @7,3"]
  );
}

#[test]
fn resize_rescales_from_the_initial_dimensions() {
  let flex = shared(FlexRectangle::new(
    Rect::new(10, 5, 20, 4),
    Style::default(),
    Style::default(),
  ));
  let ratios = Rc::new(RefCell::new(Vec::new()));

  let screen = BufferScreen::new(80, 24);
  screen.queue_resize(160, 24);
  screen.queue_interrupt();

  let state = TestState::with_drawables(
    vec![
      flex.clone() as Shared<dyn Drawable>,
      shared(RatioProbe {
        seen: ratios.clone(),
      }) as Shared<dyn Drawable>,
    ],
    forever("stay"),
  );

  let mut engine = Engine::with_screen(screen);
  engine.configure(opts(60, "stay", single_state("stay", state)));

  assert!(engine.run().is_ok());
  assert_eq!(*ratios.borrow(), vec![(2.0, 1.0)]);
  assert_eq!(flex.borrow().area, Rect::new(20, 5, 40, 4));
  // A resize forces one full repaint.
  assert_eq!(engine.screen().syncs(), 1);
}

#[test]
fn time_aware_entities_advance_by_the_nominal_period() {
  let seen = Rc::new(RefCell::new(Vec::new()));
  let screen = BufferScreen::new(80, 24);

  let mut state = TestState::with_drawables(Vec::new(), self_loop_for(1, "stay"));
  state.time_aware = vec![shared(TimeProbe { seen: seen.clone() }) as Shared<dyn TimeAware>];

  let mut engine = Engine::with_screen(screen);
  engine.configure(opts(100, "stay", single_state("stay", state)));

  match engine.run() {
    Err(Error::MissingSuccessor(_)) => {}
    other => panic!("unexpected result: {:?}", other),
  }

  let period = Duration::from_secs(1) / 100;
  assert_eq!(*seen.borrow(), vec![period, period]);
}

#[test]
fn steady_state_renders_identically_frame_over_frame() {
  let screen = BufferScreen::new(80, 24);

  let state = TestState::with_drawables(
    vec![shared(StrictRectangle {
      area: Rect::new(0, 0, 4, 2),
      style: Style::default(),
    }) as Shared<dyn Drawable>],
    self_loop_for(2, "stay"),
  );

  let mut engine = Engine::with_screen(screen);
  engine.configure(opts(240, "stay", single_state("stay", state)));

  match engine.run() {
    Err(Error::MissingSuccessor(_)) => {}
    other => panic!("unexpected result: {:?}", other),
  }

  // Three frames rendered; with no input and no time-aware entities the
  // write sequence repeats exactly.
  let log = engine.screen().log();
  assert_eq!(log.len() % 3, 0);
  let frame = log.len() / 3;
  assert!(frame > 0);
  assert_eq!(log[..frame], log[frame..2 * frame]);
  assert_eq!(log[frame..2 * frame], log[2 * frame..]);
}

#[test]
fn a_panicking_widget_still_restores_the_screen() {
  let screen = BufferScreen::new(80, 24);

  let state =
    TestState::with_drawables(vec![shared(Bomb) as Shared<dyn Drawable>], forever("stay"));

  let mut engine = Engine::with_screen(screen);
  engine.configure(opts(60, "stay", single_state("stay", state)));

  let result = panic::catch_unwind(panic::AssertUnwindSafe(|| engine.run()));
  assert!(result.is_err());
  assert_eq!(engine.screen().clears(), 1);
  assert_eq!(engine.screen().finis(), 1);
}

#[test]
fn transitions_swap_the_active_state_every_frame() {
  let log: Log = Rc::new(RefCell::new(Vec::new()));

  let opening = TestState::with_drawables(
    vec![shared(Mark {
      tag: "a",
      col: 0,
      log: log.clone(),
    }) as Shared<dyn Drawable>],
    forever("stage"),
  );
  let stage = TestState::with_drawables(
    vec![shared(Mark {
      tag: "b",
      col: 1,
      log: log.clone(),
    }) as Shared<dyn Drawable>],
    self_loop_for(1, "stage"),
  );

  let mut states: HashMap<StateKey, StateRef> = HashMap::new();
  states.insert(StateKey::from("opening"), Rc::new(opening) as StateRef);
  states.insert(StateKey::from("stage"), Rc::new(stage) as StateRef);

  let mut engine = Engine::with_screen(BufferScreen::new(80, 24));
  engine.configure(opts(240, "opening", states));

  match engine.run() {
    Err(Error::MissingSuccessor(key)) => assert_eq!(key, StateKey::from("the-end")),
    other => panic!("unexpected result: {:?}", other),
  }
  assert_eq!(*log.borrow(), vec!["draw a @0,0", "draw b @0,0", "draw b @0,0"]);
}

#[test]
fn menu_navigation_clamps_through_the_engine() {
  use tableau::ui::widget::BasicMenu;

  let menu = shared(BasicMenu {
    area: Rect::new(0, 0, 10, 5),
    style: Style::default(),
    items: vec![String::from("a"), String::from("b"), String::from("c")],
    current_selected: 0,
  });

  let screen = BufferScreen::new(80, 24);
  screen.queue_key(KeyCode::Down);
  screen.queue_key(KeyCode::Down);
  screen.queue_key(KeyCode::Down);
  screen.queue_key(KeyCode::Up);
  screen.queue_interrupt();

  let mut state = TestState::with_drawables(
    vec![menu.clone() as Shared<dyn Drawable>],
    forever("stay"),
  );
  state.interactables = vec![menu.clone() as Shared<dyn Interactive>];

  let mut engine = Engine::with_screen(screen);
  engine.configure(opts(60, "stay", single_state("stay", state)));

  assert!(engine.run().is_ok());
  // Clamped at the last item, then stepped back once.
  assert_eq!(menu.borrow().current_selected, 1);
}
