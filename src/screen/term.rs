//! The crossterm-backed terminal screen.
//!
//! Construction errors are reported, since the terminal may legitimately be
//! unavailable (pipes, CI). Errors after that panic: once the terminal is in
//! raw mode, a failed write is effectively unrecoverable, and the engine's
//! cleanup guard restores the terminal on the way out.

use std::io;
use std::sync::mpsc;
use std::thread;

use crate::screen::Attrs;
use crate::screen::Event;
use crate::screen::Screen;
use crate::screen::Style;

/// A [`Screen`] over a real terminal.
pub struct Term<W: io::Write = io::Stdout> {
  w: W,
  open: bool,
}

impl Term {
  /// Opens the terminal on stdout: alternate screen, raw mode, hidden
  /// cursor, no line wrap.
  pub fn init() -> crossterm::Result<Term> {
    Term::with(io::stdout())
  }
}

impl<W: io::Write> Term<W> {
  /// Opens the terminal for `w`.
  pub fn with(mut w: W) -> crossterm::Result<Term<W>> {
    crossterm::execute!(
      w,
      crossterm::terminal::EnterAlternateScreen,
      crossterm::cursor::Hide,
      crossterm::terminal::DisableLineWrap,
    )?;
    crossterm::terminal::enable_raw_mode()?;

    Ok(Term { w, open: true })
  }

  fn cleanup(&mut self) {
    if !self.open {
      return;
    }
    self.open = false;

    crossterm::execute!(
      self.w,
      crossterm::terminal::LeaveAlternateScreen,
      crossterm::cursor::Show,
      crossterm::terminal::EnableLineWrap,
    )
    .unwrap();
    crossterm::terminal::disable_raw_mode().unwrap();
    self.w.flush().unwrap();
  }
}

impl<W: io::Write> Screen for Term<W> {
  fn size(&self) -> (i32, i32) {
    let (cols, rows) = crossterm::terminal::size().unwrap();
    (cols as i32, rows as i32)
  }

  fn set(&mut self, col: i32, row: i32, glyph: char, style: Style) {
    // The terminal itself discards writes beyond its bounds; this guard
    // only keeps the u16 casts honest for coordinates it cannot express.
    if col < 0 || row < 0 || col > i32::from(u16::MAX) || row > i32::from(u16::MAX) {
      return;
    }

    use crossterm::style::Attribute;
    use crossterm::style::Color;
    use crossterm::style::Colors;

    let to_color = |rgb: Option<crate::screen::Rgb>| match rgb {
      Some(rgb) => Color::Rgb {
        r: rgb.red,
        g: rgb.green,
        b: rgb.blue,
      },
      None => Color::Reset,
    };

    crossterm::queue!(
      self.w,
      crossterm::cursor::MoveTo(col as u16, row as u16),
      crossterm::style::SetAttribute(Attribute::Reset),
      crossterm::style::SetColors(Colors {
        foreground: Some(to_color(style.fg())),
        background: Some(to_color(style.bg())),
      }),
    )
    .unwrap();

    let attrs = [
      (Attrs::BOLD, Attribute::Bold),
      (Attrs::DIM, Attribute::Dim),
      (Attrs::UNDERLINE, Attribute::Underlined),
      (Attrs::REVERSE, Attribute::Reverse),
    ];
    for &(flag, attr) in &attrs {
      if style.attrs().contains(flag) {
        crossterm::queue!(self.w, crossterm::style::SetAttribute(attr)).unwrap();
      }
    }

    crossterm::queue!(self.w, crossterm::style::Print(glyph)).unwrap();
  }

  fn show(&mut self) {
    self.w.flush().unwrap();
  }

  fn sync(&mut self) {
    crossterm::execute!(
      self.w,
      crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
    )
    .unwrap();
  }

  fn clear(&mut self) {
    crossterm::queue!(
      self.w,
      crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
    )
    .unwrap();
  }

  fn events(&mut self) -> mpsc::Receiver<Event> {
    // A bounded channel of capacity 1 suffices: the engine is the only
    // reader, and it drains at most one event per frame anyway.
    let (tx, rx) = mpsc::sync_channel(1);

    thread::spawn(move || loop {
      match crossterm::event::read() {
        Ok(crossterm::event::Event::Key(key)) => {
          if tx.send(Event::Key(key)).is_err() {
            return;
          }
        }
        Ok(crossterm::event::Event::Resize(cols, rows)) => {
          if tx.send(Event::Resize(cols as i32, rows as i32)).is_err() {
            return;
          }
        }
        Ok(_) => continue,
        Err(_) => return,
      }
    });

    rx
  }

  fn fini(&mut self) {
    self.cleanup();
  }
}

impl<W: io::Write> Drop for Term<W> {
  fn drop(&mut self) {
    self.cleanup();
  }
}
