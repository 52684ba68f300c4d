//! An in-memory screen for tests and headless runs.
//!
//! [`BufferScreen`] composites into a cell grid instead of a terminal, and
//! its event stream replays whatever was queued onto it. The full ordered
//! log of cell writes is kept, so a test can assert not just on the final
//! picture but on the order things were painted in.

use std::sync::mpsc;

use crate::screen::Event;
use crate::screen::KeyCode;
use crate::screen::KeyEvent;
use crate::screen::KeyModifiers;
use crate::screen::Screen;
use crate::screen::Style;

/// A single recorded cell write.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SetCall {
  /// The column written to.
  pub col: i32,
  /// The row written to.
  pub row: i32,
  /// The glyph written.
  pub glyph: char,
  /// The style written.
  pub style: Style,
}

/// A [`Screen`] that composites into memory.
///
/// Events are queued ahead of a run with [`queue_key`], [`queue_resize`] and
/// friends; the internal sender stays alive for the screen's lifetime, so an
/// engine that drains the queue keeps ticking rather than spinning on a
/// disconnected channel. The cell grid keeps its construction dimensions;
/// a queued resize only changes what the engine observes.
///
/// [`queue_key`]: BufferScreen::queue_key
/// [`queue_resize`]: BufferScreen::queue_resize
pub struct BufferScreen {
  width: i32,
  height: i32,
  cells: Vec<Option<(char, Style)>>,
  log: Vec<SetCall>,

  shows: u32,
  syncs: u32,
  clears: u32,
  finis: u32,

  tx: mpsc::Sender<Event>,
  rx: Option<mpsc::Receiver<Event>>,
}

impl BufferScreen {
  /// Creates a new screen of the given dimensions.
  pub fn new(width: i32, height: i32) -> Self {
    let (tx, rx) = mpsc::channel();
    Self {
      width,
      height,
      cells: vec![None; (width * height).max(0) as usize],
      log: Vec::new(),
      shows: 0,
      syncs: 0,
      clears: 0,
      finis: 0,
      tx,
      rx: Some(rx),
    }
  }

  /// Queues an arbitrary event.
  pub fn queue_event(&self, event: Event) {
    let _ = self.tx.send(event);
  }

  /// Queues a plain key press.
  pub fn queue_key(&self, code: KeyCode) {
    self.queue_event(Event::Key(KeyEvent::new(code, KeyModifiers::empty())));
  }

  /// Queues the canonical interrupt, Ctrl-C.
  pub fn queue_interrupt(&self) {
    self.queue_event(Event::Key(KeyEvent::new(
      KeyCode::Char('c'),
      KeyModifiers::CONTROL,
    )));
  }

  /// Queues a resize announcement for the given dimensions.
  pub fn queue_resize(&self, width: i32, height: i32) {
    self.queue_event(Event::Resize(width, height));
  }

  /// Returns the glyph/style pair last written at `(col, row)`, if any.
  pub fn cell(&self, col: i32, row: i32) -> Option<(char, Style)> {
    if col < 0 || row < 0 || col >= self.width || row >= self.height {
      return None;
    }
    self.cells[(row * self.width + col) as usize]
  }

  /// Returns the ordered log of every cell write so far.
  pub fn log(&self) -> &[SetCall] {
    &self.log
  }

  /// Returns how many frames have been flushed.
  pub fn shows(&self) -> u32 {
    self.shows
  }

  /// Returns how many full resyncs were requested.
  pub fn syncs(&self) -> u32 {
    self.syncs
  }

  /// Returns how many times the screen was cleared.
  pub fn clears(&self) -> u32 {
    self.clears
  }

  /// Returns how many times the screen was released.
  pub fn finis(&self) -> u32 {
    self.finis
  }
}

impl Screen for BufferScreen {
  fn size(&self) -> (i32, i32) {
    (self.width, self.height)
  }

  fn set(&mut self, col: i32, row: i32, glyph: char, style: Style) {
    if col < 0 || row < 0 || col >= self.width || row >= self.height {
      return;
    }
    self.cells[(row * self.width + col) as usize] = Some((glyph, style));
    self.log.push(SetCall {
      col,
      row,
      glyph,
      style,
    });
  }

  fn show(&mut self) {
    self.shows += 1;
  }

  fn sync(&mut self) {
    self.syncs += 1;
  }

  fn clear(&mut self) {
    // Counted but not applied: the grid keeps the last composited picture,
    // so a test can still inspect it after the engine's exit cleanup.
    self.clears += 1;
  }

  fn events(&mut self) -> mpsc::Receiver<Event> {
    self.rx.take().expect("event stream already started")
  }

  fn fini(&mut self) {
    self.finis += 1;
  }
}
