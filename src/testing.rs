use std::cell::RefCell;
use std::rc::Rc;

use crate::detector::{AnchorRect, EditableKind, InputType, Position};
use crate::error::{Result, SlasherError};
use crate::target::{EditableTarget, PageContext};

#[derive(Debug)]
struct FieldState {
    kind: Option<EditableKind>,
    text: String,
    focused: bool,
    caret: Option<u32>,
    caret_fails: bool,
    focus_count: usize,
    rect: AnchorRect,
    scroll: Position,
}

#[derive(Clone, Debug)]
pub struct FakeField(Rc<RefCell<FieldState>>);

impl FakeField {
    fn with_kind(kind: Option<EditableKind>, text: &str) -> Self {
        Self(Rc::new(RefCell::new(FieldState {
            kind,
            text: text.to_string(),
            focused: true,
            caret: None,
            caret_fails: false,
            focus_count: 0,
            rect: AnchorRect {
                left: 100.0,
                top: 50.0,
            },
            scroll: Position { x: 0.0, y: 10.0 },
        })))
    }

    pub fn input(ty: &str, text: &str) -> Self {
        Self::with_kind(Some(EditableKind::Input(InputType::parse(ty))), text)
    }

    pub fn textarea(text: &str) -> Self {
        Self::with_kind(Some(EditableKind::TextArea), text)
    }

    pub fn content_editable(text: &str) -> Self {
        Self::with_kind(Some(EditableKind::ContentEditable), text)
    }

    pub fn plain(text: &str) -> Self {
        Self::with_kind(None, text)
    }

    pub fn type_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    pub fn blur(&self) {
        self.0.borrow_mut().focused = false;
    }

    pub fn fail_caret(&self) {
        self.0.borrow_mut().caret_fails = true;
    }

    pub fn caret(&self) -> Option<u32> {
        self.0.borrow().caret
    }

    pub fn focus_count(&self) -> usize {
        self.0.borrow().focus_count
    }
}

impl EditableTarget for FakeField {
    fn kind(&self) -> Option<EditableKind> {
        self.0.borrow().kind
    }

    fn is_focused(&self) -> bool {
        self.0.borrow().focused
    }

    fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    fn place_caret(&self, offset: u32) -> Result<()> {
        let mut state = self.0.borrow_mut();
        if state.caret_fails {
            return Err(SlasherError::Caret("detached node".to_string()));
        }
        state.caret = Some(offset);
        Ok(())
    }

    fn focus(&self) {
        let mut state = self.0.borrow_mut();
        state.focused = true;
        state.focus_count += 1;
    }

    fn anchor_rect(&self) -> AnchorRect {
        self.0.borrow().rect
    }

    fn scroll(&self) -> Position {
        self.0.borrow().scroll
    }
}

#[derive(Clone, Debug)]
pub struct FakePage(Rc<RefCell<String>>);

impl FakePage {
    pub fn new(url: &str) -> Self {
        Self(Rc::new(RefCell::new(url.to_string())))
    }

    pub fn navigate(&self, url: &str) {
        *self.0.borrow_mut() = url.to_string();
    }
}

impl PageContext for FakePage {
    fn url(&self) -> String {
        self.0.borrow().clone()
    }
}
