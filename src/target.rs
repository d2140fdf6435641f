use crate::detector::{AnchorRect, EditableKind, Position};
use crate::error::Result;

// Handles never keep the element alive; check `is_focused` before trusting one
// captured on an earlier event.
pub trait EditableTarget: Clone {
    fn kind(&self) -> Option<EditableKind>;
    fn is_focused(&self) -> bool;
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
    // UTF-16 offset.
    fn place_caret(&self, offset: u32) -> Result<()>;
    fn focus(&self);
    fn anchor_rect(&self) -> AnchorRect;
    fn scroll(&self) -> Position;
}

// The page the engine runs in. Read on every filter pass, since single-page
// apps change the url without reloading the content script.
pub trait PageContext {
    fn url(&self) -> String;
}

impl PageContext for String {
    fn url(&self) -> String {
        self.clone()
    }
}

impl PageContext for &'static str {
    fn url(&self) -> String {
        self.to_string()
    }
}
