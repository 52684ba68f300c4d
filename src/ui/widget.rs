//! The reference widget catalogue.
//!
//! Two kinds of geometry show up here. *Strict* widgets sit wherever their
//! rectangle says, whatever the terminal does. *Flex* widgets remember the
//! rectangle they were born with and re-derive their position and size from
//! it whenever the observed scale ratios change, so they keep their relative
//! place when the terminal is resized mid-game.
//!
//! All rectangles are inclusive: a widget with width 4 spans five columns.

use crate::entity::Drawable;
use crate::entity::Interactive;
use crate::entity::Overlay;
use crate::geo::Point;
use crate::geo::Rect;
use crate::screen::KeyCode;
use crate::screen::KeyEvent;
use crate::screen::Screen;
use crate::screen::Style;

const HLINE: char = '─';
const VLINE: char = '│';
const ULCORNER: char = '┌';
const URCORNER: char = '┐';
const LLCORNER: char = '└';
const LRCORNER: char = '┘';

/// Inner horizontal padding of a [`FlexChatBox`], in cells.
const TEXT_PAD_X: i32 = 3;
/// Inner vertical padding of a [`FlexChatBox`], in cells.
const TEXT_PAD_Y: i32 = 2;

/// Fills `rect`'s closed cell range with space cells.
fn fill_rect(screen: &mut dyn Screen, rect: Rect, style: Style) {
  for row in rect.y()..=rect.bottom() {
    for col in rect.x()..=rect.right() {
      screen.set(col, row, ' ', style);
    }
  }
}

/// Draws single-line border glyphs on `rect`'s edges, with corner glyphs
/// when both dimensions are nonzero.
fn border_rect(screen: &mut dyn Screen, rect: Rect, style: Style) {
  for col in rect.x()..=rect.right() {
    screen.set(col, rect.y(), HLINE, style);
    screen.set(col, rect.bottom(), HLINE, style);
  }
  for row in rect.y()..=rect.bottom() {
    screen.set(rect.x(), row, VLINE, style);
    screen.set(rect.right(), row, VLINE, style);
  }

  if rect.width != 0 && rect.height != 0 {
    screen.set(rect.x(), rect.y(), ULCORNER, style);
    screen.set(rect.right(), rect.y(), URCORNER, style);
    screen.set(rect.x(), rect.bottom(), LLCORNER, style);
    screen.set(rect.right(), rect.bottom(), LRCORNER, style);
  }
}

/// Scales `v` by `ratio`, rounding to the nearest cell.
fn scale(v: i32, ratio: f32) -> i32 {
  (v as f32 * ratio).round() as i32
}

/// A solid bordered rectangle.
///
/// The background fill covers the whole closed range, border cells
/// included; the border is painted over it afterwards. One style serves
/// both.
pub struct StrictRectangle {
  /// The rectangle to paint.
  pub area: Rect,
  /// The style for the fill and the border.
  pub style: Style,
}

impl StrictRectangle {
  fn paint(&self, screen: &mut dyn Screen) {
    fill_rect(screen, self.area, self.style);
    border_rect(screen, self.area, self.style);
  }
}

impl Drawable for StrictRectangle {
  fn draw(&mut self, screen: &mut dyn Screen, _camera: Point, _ratio_x: f32, _ratio_y: f32) {
    self.paint(screen);
  }
}

impl Overlay for StrictRectangle {
  fn draw(&mut self, screen: &mut dyn Screen) {
    self.paint(screen);
  }
}

/// A bordered rectangle that tracks terminal resizes.
///
/// Geometry is re-derived from the original rectangle whenever the observed
/// scale ratios change; each axis rescales against its own ratio.
pub struct FlexRectangle {
  /// The rectangle currently painted. Overwritten on rescale.
  pub area: Rect,
  /// The reference rectangle the rescaled geometry derives from.
  pub original: Rect,
  /// The style for the background fill.
  pub bg_style: Style,
  /// The style for the border.
  pub border_style: Style,

  ratios: (f32, f32),
}

impl FlexRectangle {
  /// Creates a rectangle at `area`, which also becomes the reference
  /// geometry for rescaling.
  pub fn new(area: Rect, bg_style: Style, border_style: Style) -> Self {
    Self {
      area,
      original: area,
      bg_style,
      border_style,
      ratios: (1.0, 1.0),
    }
  }
}

/// Re-derives `area` from `original` on a ratio change.
///
/// Shared by every flex widget; comparison is exact `f32` equality, which is
/// stable because both sides come from the same division in the engine.
fn rescale(area: &mut Rect, original: Rect, cached: &mut (f32, f32), ratio_x: f32, ratio_y: f32) {
  if cached.0 != ratio_x {
    cached.0 = ratio_x;
    area.origin[0] = scale(original.x(), ratio_x);
    area.width = scale(original.width, ratio_x);
  }
  if cached.1 != ratio_y {
    cached.1 = ratio_y;
    area.origin[1] = scale(original.y(), ratio_y);
    area.height = scale(original.height, ratio_y);
  }
}

impl Drawable for FlexRectangle {
  fn draw(&mut self, screen: &mut dyn Screen, _camera: Point, ratio_x: f32, ratio_y: f32) {
    rescale(
      &mut self.area,
      self.original,
      &mut self.ratios,
      ratio_x,
      ratio_y,
    );
    fill_rect(screen, self.area, self.bg_style);
    border_rect(screen, self.area, self.border_style);
  }
}

/// Bounded, unscrollable text.
///
/// Content is laid out one cell per code point, advancing columns and
/// wrapping to the next row on reaching the right edge. Drawing stops once
/// the next row would fall below the rectangle. No word wrap.
pub struct Text {
  /// The rectangle the text is confined to.
  pub area: Rect,
  /// The text style.
  pub style: Style,
  /// The text itself.
  pub content: String,
}

impl Text {
  fn paint(&self, screen: &mut dyn Screen) {
    let mut col = self.area.x();
    let mut row = self.area.y();
    for glyph in self.content.chars() {
      screen.set(col, row, glyph, self.style);
      col += 1;
      if col >= self.area.x() + self.area.width {
        row += 1;
        col = self.area.x();
      }
      if row > self.area.bottom() {
        break;
      }
    }
  }
}

impl Drawable for Text {
  fn draw(&mut self, screen: &mut dyn Screen, _camera: Point, _ratio_x: f32, _ratio_y: f32) {
    self.paint(screen);
  }
}

impl Overlay for Text {
  fn draw(&mut self, screen: &mut dyn Screen) {
    self.paint(screen);
  }
}

/// A bordered menu with a `*` selection marker.
///
/// Item `i` renders on row `y + 1 + i`, starting three columns in; the
/// marker sits one column in on the selected row. Items wider than the box
/// are truncated at the border, and items below the box are invisible but
/// stay selectable: the selection is clamped to the item list, not to what
/// happens to be on screen.
pub struct BasicMenu {
  /// The rectangle to paint.
  pub area: Rect,
  /// The style for the interior, the items and the border.
  pub style: Style,
  /// The selectable items, one per row.
  pub items: Vec<String>,
  /// The index of the selected item.
  pub current_selected: usize,
}

impl Drawable for BasicMenu {
  fn draw(&mut self, screen: &mut dyn Screen, _camera: Point, _ratio_x: f32, _ratio_y: f32) {
    fill_rect(screen, self.area, self.style);

    for (i, item) in self.items.iter().enumerate() {
      let row = self.area.y() + 1 + i as i32;
      if row > self.area.bottom() {
        break;
      }
      let mut col = self.area.x() + 3;
      for glyph in item.chars() {
        if col >= self.area.right() {
          break;
        }
        screen.set(col, row, glyph, self.style);
        col += 1;
      }
    }

    let marker_row = self.area.y() + 1 + self.current_selected as i32;
    if marker_row <= self.area.bottom() {
      screen.set(self.area.x() + 1, marker_row, '*', self.style);
    }

    border_rect(screen, self.area, self.style);
  }
}

impl Interactive for BasicMenu {
  fn process_key(&mut self, key: &KeyEvent, _camera: Point) {
    match key.code {
      KeyCode::Down if self.current_selected + 1 < self.items.len() => {
        self.current_selected += 1;
      }
      KeyCode::Up if self.current_selected > 0 => {
        self.current_selected -= 1;
      }
      _ => {}
    }
  }
}

/// A flex-resizing box that pages through a word list.
///
/// Words are laid out space-separated with word-level wrapping inside the
/// box's inner padding. Every draw recomputes how many words fit on the
/// current page; pressing space advances past exactly that many, while any
/// words remain. When the page cannot show every remaining word, an
/// ellipsis occupies the last three cells of the bottom inner row.
pub struct FlexChatBox {
  /// The rectangle currently painted. Overwritten on rescale.
  pub area: Rect,
  /// The reference rectangle the rescaled geometry derives from.
  pub original: Rect,
  /// The style for the box and its text.
  pub style: Style,
  /// The words to page through.
  pub content: Vec<String>,
  /// The index of the first word of the current page.
  pub current_word: usize,

  next_word: usize,
  ratios: (f32, f32),
}

impl FlexChatBox {
  /// Creates a chat box at `area`, which also becomes the reference
  /// geometry for rescaling.
  pub fn new(area: Rect, style: Style, content: Vec<String>) -> Self {
    Self {
      area,
      original: area,
      style,
      content,
      current_word: 0,
      next_word: 0,
      ratios: (1.0, 1.0),
    }
  }
}

impl Drawable for FlexChatBox {
  fn draw(&mut self, screen: &mut dyn Screen, _camera: Point, ratio_x: f32, ratio_y: f32) {
    rescale(
      &mut self.area,
      self.original,
      &mut self.ratios,
      ratio_x,
      ratio_y,
    );
    fill_rect(screen, self.area, self.style);
    border_rect(screen, self.area, self.style);

    let left = self.area.x() + TEXT_PAD_X;
    let right = self.area.right() - TEXT_PAD_X;
    let top = self.area.y() + TEXT_PAD_Y;
    let bottom = self.area.bottom() - TEXT_PAD_Y;

    let mut col = left;
    let mut row = top;
    self.next_word = 0;

    for word in &self.content[self.current_word.min(self.content.len())..] {
      let len = word.chars().count() as i32;
      if col + len - 1 > right && col > left {
        row += 1;
        col = left;
      }
      if row > bottom {
        break;
      }
      for glyph in word.chars() {
        if col > right {
          break;
        }
        screen.set(col, row, glyph, self.style);
        col += 1;
      }
      col += 1;
      self.next_word += 1;
    }

    if self.current_word + self.next_word < self.content.len() {
      for (i, glyph) in "...".chars().enumerate() {
        screen.set(right - 2 + i as i32, bottom, glyph, self.style);
      }
    }
  }
}

impl Interactive for FlexChatBox {
  fn process_key(&mut self, key: &KeyEvent, _camera: Point) {
    if key.code == KeyCode::Char(' ') && self.current_word < self.content.len() {
      self.current_word += self.next_word;
      // Spent until the next draw recomputes the page.
      self.next_word = 0;
    }
  }
}
