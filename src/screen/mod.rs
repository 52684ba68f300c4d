//! The terminal abstraction.
//!
//! The engine composites frames of character cells into a [`Screen`]. The
//! trait is deliberately small: the engine needs the current size, a cell
//! write, a frame flush, a full resync, a clear, a shutdown, and a stream of
//! input events. Two backends are provided: [`term::Term`] drives a real
//! terminal through crossterm, and [`buffer::BufferScreen`] composites into
//! memory for tests and headless runs.

use std::sync::mpsc;

pub mod buffer;
pub mod term;

pub use crossterm::event::KeyCode;
pub use crossterm::event::KeyEvent;
pub use crossterm::event::KeyModifiers;
pub use palette::named as colors;

/// An RGB value used by a [`Style`].
pub type Rgb = palette::Srgb<u8>;

bitflags::bitflags! {
  /// Attribute bits carried by a [`Style`].
  pub struct Attrs: u8 {
    const BOLD = 1 << 0;
    const DIM = 1 << 1;
    const UNDERLINE = 1 << 2;
    const REVERSE = 1 << 3;
  }
}

/// A foreground/background color pair plus attribute bits.
///
/// A channel of `None` means "reset to whatever the terminal's default is".
/// `Style` values compare with `==`, so widgets and tests can cache and
/// match them.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Style {
  fg: Option<Rgb>,
  bg: Option<Rgb>,
  attrs: Attrs,
}

impl Style {
  /// Creates the neutral style: default colors, no attributes.
  #[inline]
  pub fn new() -> Self {
    Self {
      fg: None,
      bg: None,
      attrs: Attrs::empty(),
    }
  }

  /// Returns a copy of this style with the given foreground color.
  #[inline]
  pub fn with_fg(mut self, color: impl Into<Rgb>) -> Self {
    self.fg = Some(color.into());
    self
  }

  /// Returns a copy of this style with the given background color.
  #[inline]
  pub fn with_bg(mut self, color: impl Into<Rgb>) -> Self {
    self.bg = Some(color.into());
    self
  }

  /// Returns a copy of this style with the given attribute bits.
  #[inline]
  pub fn with_attrs(mut self, attrs: Attrs) -> Self {
    self.attrs = attrs;
    self
  }

  /// Returns the foreground color, if one is set.
  #[inline]
  pub fn fg(self) -> Option<Rgb> {
    self.fg
  }

  /// Returns the background color, if one is set.
  #[inline]
  pub fn bg(self) -> Option<Rgb> {
    self.bg
  }

  /// Returns the attribute bits.
  #[inline]
  pub fn attrs(self) -> Attrs {
    self.attrs
  }
}

impl Default for Style {
  fn default() -> Self {
    Self::new()
  }
}

/// An input event produced by a [`Screen`]'s event stream.
///
/// Anything the backend reads that is neither a key press nor a resize is
/// dropped at the source.
#[derive(Clone, Debug)]
pub enum Event {
  /// A key was pressed.
  Key(KeyEvent),
  /// The terminal was resized to the given cell dimensions.
  Resize(i32, i32),
}

/// The terminal surface the engine composites into.
///
/// Cell writes with negative coordinates, or coordinates beyond the current
/// size, must be silently discarded by the implementation.
pub trait Screen {
  /// Returns the current dimensions in cells, as `(width, height)`.
  fn size(&self) -> (i32, i32);

  /// Writes one cell at `(col, row)`.
  fn set(&mut self, col: i32, row: i32, glyph: char, style: Style);

  /// Flushes the composed frame to the viewer.
  fn show(&mut self);

  /// Forces a full repaint, e.g. after a resize invalidated the window.
  fn sync(&mut self);

  /// Clears the back buffer.
  fn clear(&mut self);

  /// Starts the background event producer and returns its receiving end.
  ///
  /// Called once per engine run. The producer terminates on its own when
  /// the receiver goes away or the terminal stops delivering events.
  fn events(&mut self) -> mpsc::Receiver<Event>;

  /// Releases the terminal. Idempotent.
  fn fini(&mut self);
}
