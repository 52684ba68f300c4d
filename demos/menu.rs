//! A menu, a pair of flex boxes, and not much else.
//!
//! Run in a real terminal; arrow keys move the menu selection, space pages
//! the chat box, and Ctrl-C quits.

use std::collections::HashMap;
use std::rc::Rc;

use tableau::screen::colors;
use tableau::screen::Style;
use tableau::ui::widget::BasicMenu;
use tableau::ui::widget::FlexChatBox;
use tableau::ui::widget::FlexRectangle;
use tableau::ui::widget::StrictRectangle;
use tableau::ui::widget::Text;
use tableau::{shared, Drawable, Engine, EngineOpts, Interactive, Overlay};
use tableau::{Rect, Shared, State, StateKey, StateRef};

const MAIN_MENU: &str = "main-menu";

const CHAT_TEXT: &str = "omg i'm quite a big sentence since I want to test \
how the texting wraps around the box and manages to go over to the next \
page... and in fact the text just keeps on going since this is but an \
example on how to use the chat box entity.";

struct MainMenu {
  background: Shared<StrictRectangle>,
  menu: Shared<BasicMenu>,
  flex: Shared<FlexRectangle>,
  chat: Shared<FlexChatBox>,
}

impl MainMenu {
  fn new(width: i32, height: i32) -> MainMenu {
    MainMenu {
      background: shared(StrictRectangle {
        area: Rect::new(-1, -1, width + 1, height + 1),
        style: Style::default(),
      }),
      menu: shared(BasicMenu {
        area: Rect::new(10, 10, width / 9, height / 8),
        style: Style::default(),
        items: vec![
          String::from("foobar"),
          String::from("barfoobar"),
          String::from("foo"),
        ],
        current_selected: 0,
      }),
      flex: shared(FlexRectangle::new(
        Rect::new(10 + width / 3, 10, 50, height / 8),
        Style::default(),
        Style::default().with_fg(colors::ROYALBLUE),
      )),
      chat: shared(FlexChatBox::new(
        Rect::new(width - 100, 10, 50, 5),
        Style::default(),
        CHAT_TEXT.split_whitespace().map(String::from).collect(),
      )),
    }
  }
}

impl State for MainMenu {
  fn drawables(&self) -> Vec<Shared<dyn Drawable>> {
    vec![
      self.background.clone() as Shared<dyn Drawable>,
      self.menu.clone() as Shared<dyn Drawable>,
      self.flex.clone() as Shared<dyn Drawable>,
      self.chat.clone() as Shared<dyn Drawable>,
    ]
  }

  fn interactables(&self) -> Vec<Shared<dyn Interactive>> {
    vec![
      self.menu.clone() as Shared<dyn Interactive>,
      self.chat.clone() as Shared<dyn Interactive>,
    ]
  }

  fn next_state(&self) -> StateKey {
    StateKey::from(MAIN_MENU)
  }
}

fn main() -> Result<(), tableau::Error> {
  let mut engine = Engine::new()?;
  let (width, height) = engine.screen_size();

  let help = shared(Text {
    area: Rect::new(1, height - 1, width - 2, 0),
    style: Style::default().with_fg(colors::GRAY),
    content: String::from("arrows: select | space: page | ctrl-c: quit"),
  });

  let mut states: HashMap<StateKey, StateRef> = HashMap::new();
  states.insert(
    StateKey::from(MAIN_MENU),
    Rc::new(MainMenu::new(width, height)) as StateRef,
  );

  engine.configure(EngineOpts {
    fps: 10,
    initial_state: StateKey::from(MAIN_MENU),
    states,
    overlays: vec![help as Shared<dyn Overlay>],
  });

  engine.run()
}
