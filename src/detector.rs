use regex::Regex;
use std::sync::OnceLock;

pub const TRIGGER: char = '/';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputType {
    Text,
    Search,
    Url,
    Email,
    Tel,
    Password,
    Number,
    Other,
}

impl InputType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Self::Text,
            "search" => Self::Search,
            "url" => Self::Url,
            "email" => Self::Email,
            "tel" => Self::Tel,
            "password" => Self::Password,
            "number" => Self::Number,
            _ => Self::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditableKind {
    Input(InputType),
    TextArea,
    ContentEditable,
}

impl EditableKind {
    pub fn is_trigger_eligible(self) -> bool {
        match self {
            Self::Input(ty) => matches!(
                ty,
                InputType::Text
                    | InputType::Search
                    | InputType::Url
                    | InputType::Email
                    | InputType::Tel
            ),
            Self::TextArea | Self::ContentEditable => true,
        }
    }

    // Whether `setSelectionRange` is allowed. Browsers throw for email, url
    // and number inputs.
    pub fn supports_selection_range(self) -> bool {
        match self {
            Self::Input(ty) => matches!(
                ty,
                InputType::Text | InputType::Search | InputType::Password | InputType::Tel
            ),
            Self::TextArea => true,
            Self::ContentEditable => false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnchorRect {
    pub left: f64,
    pub top: f64,
}

pub fn anchor_position(rect: AnchorRect, scroll: Position, offset_y: f64) -> Position {
    Position {
        x: rect.left + scroll.x,
        y: rect.top + scroll.y + offset_y,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trigger {
    pub slash: usize,
    pub query: String,
}

impl Trigger {
    pub fn span(&self) -> std::ops::Range<usize> {
        self.slash..self.slash + TRIGGER.len_utf8() + self.query.len()
    }
}

fn trigger_run_re() -> &'static Regex {
    static RE_TRIGGER: OnceLock<Regex> = OnceLock::new();
    RE_TRIGGER.get_or_init(|| Regex::new(r"^/(\S*)").unwrap())
}

// Looks at the last slash anywhere in `text`, not just the one nearest the
// caret. A stale slash earlier in the field therefore still counts.
pub fn find_trigger(text: &str) -> Option<Trigger> {
    let slash = text.rfind(TRIGGER)?;
    let query = trigger_run_re()
        .captures(&text[slash..])
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    Some(Trigger { slash, query })
}

#[derive(Clone, Debug)]
pub struct DetectionState<T> {
    pub position: Position,
    pub visible: bool,
    pub active: Option<T>,
    pub search: String,
}

impl<T> Default for DetectionState<T> {
    fn default() -> Self {
        Self::hidden()
    }
}

impl<T> DetectionState<T> {
    pub fn hidden() -> Self {
        Self {
            position: Position::default(),
            visible: false,
            active: None,
            search: String::new(),
        }
    }

    pub fn shown(active: T, position: Position, search: String) -> Self {
        Self {
            position,
            visible: true,
            active: Some(active),
            search,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_query_after_last_slash() {
        let trigger = find_trigger("send /mai").unwrap();
        assert_eq!(trigger.slash, 5);
        assert_eq!(trigger.query, "mai");
        assert_eq!(trigger.span(), 5..9);
    }

    #[test]
    fn bare_slash_is_still_a_trigger() {
        let trigger = find_trigger("a/").unwrap();
        assert_eq!(trigger.query, "");
    }

    #[test]
    fn query_stops_at_whitespace() {
        let trigger = find_trigger("x /sig rest of line").unwrap();
        assert_eq!(trigger.query, "sig");
        assert_eq!(trigger.span(), 2..6);
    }

    #[test]
    fn stale_slash_reactivates() {
        let trigger = find_trigger("see a/b for details").unwrap();
        assert_eq!(trigger.slash, 5);
        assert_eq!(trigger.query, "b");
    }

    #[test]
    fn no_slash_no_trigger() {
        assert!(find_trigger("plain text").is_none());
        assert!(find_trigger("").is_none());
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "émoji ☕ /caf";
        assert_eq!(find_trigger(text), find_trigger(text));
        assert_eq!(find_trigger(text).unwrap().query, "caf");
    }

    #[test]
    fn classifies_eligibility() {
        assert!(EditableKind::Input(InputType::parse("")).is_trigger_eligible());
        assert!(EditableKind::Input(InputType::parse("EMAIL")).is_trigger_eligible());
        assert!(EditableKind::TextArea.is_trigger_eligible());
        assert!(EditableKind::ContentEditable.is_trigger_eligible());
        assert!(!EditableKind::Input(InputType::Password).is_trigger_eligible());
        assert!(!EditableKind::Input(InputType::parse("checkbox")).is_trigger_eligible());
    }

    #[test]
    fn range_selection_support() {
        assert!(EditableKind::Input(InputType::Tel).supports_selection_range());
        assert!(EditableKind::Input(InputType::Password).supports_selection_range());
        assert!(!EditableKind::Input(InputType::Email).supports_selection_range());
        assert!(!EditableKind::Input(InputType::Url).supports_selection_range());
        assert!(!EditableKind::Input(InputType::Number).supports_selection_range());
    }

    #[test]
    fn anchor_includes_scroll_and_offset() {
        let pos = anchor_position(
            AnchorRect {
                left: 10.0,
                top: 40.0,
            },
            Position { x: 0.0, y: 300.0 },
            20.0,
        );
        assert_eq!(pos, Position { x: 10.0, y: 360.0 });
    }
}
