use tracing::{debug, warn};

use crate::command::Command;
use crate::detector::{find_trigger, EditableKind};
use crate::target::EditableTarget;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextChange {
    pub start: usize,
    pub end: usize,
    pub insert: String,
}

impl TextChange {
    pub fn new(start: usize, end: usize, insert: impl Into<String>) -> Self {
        Self {
            start,
            end,
            insert: insert.into(),
        }
    }

    pub fn apply_to(&self, text: &str) -> String {
        let start = self.start.min(text.len());
        let end = self.end.clamp(start, text.len());
        let mut out = String::with_capacity(text.len() - (end - start) + self.insert.len());
        out.push_str(&text[..start]);
        out.push_str(&self.insert);
        out.push_str(&text[end..]);
        out
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Splice {
    pub text: String,
    pub change: TextChange,
    // Byte offset into `text`.
    pub caret: usize,
    pub caret_utf16: u32,
}

pub fn byte_idx_to_utf16(s: &str, byte_idx: usize) -> u32 {
    s[..byte_idx.min(s.len())].encode_utf16().count() as u32
}

// Only the first placeholder is consumed. Without one the caret goes after
// the insert.
pub fn splice(text: &str, replacement: &str, placeholder: &str) -> Option<Splice> {
    let trigger = find_trigger(text)?;
    let span = trigger.span();

    let placeholder_at = if placeholder.is_empty() {
        None
    } else {
        replacement.find(placeholder)
    };
    let cleaned = match placeholder_at {
        Some(_) => replacement.replacen(placeholder, "", 1),
        None => replacement.to_string(),
    };

    let caret = span.start + placeholder_at.unwrap_or(cleaned.len());
    let change = TextChange::new(span.start, span.end, cleaned);
    let next = change.apply_to(text);
    let caret_utf16 = byte_idx_to_utf16(&next, caret);

    Some(Splice {
        text: next,
        change,
        caret,
        caret_utf16,
    })
}

// Caret failures degrade to a bare focus.
pub fn apply<T: EditableTarget>(target: &T, command: &Command, placeholder: &str) -> bool {
    let text = target.text();
    let Some(splice) = splice(&text, &command.replacement, placeholder) else {
        debug!(command = %command.command, "no trigger left to replace");
        target.focus();
        return false;
    };

    debug!(
        command = %command.command,
        start = splice.change.start,
        end = splice.change.end,
        "splicing command"
    );
    target.set_text(&splice.text);

    let positionable = target.kind().is_some_and(|kind| {
        kind == EditableKind::ContentEditable || kind.supports_selection_range()
    });
    if positionable {
        if let Err(err) = target.place_caret(splice.caret_utf16) {
            warn!(error = %err, "caret placement failed, focusing only");
        }
    }
    target.focus();
    true
}

// Picks the first text node among a contentEditable's children and clamps the
// caret into it. `None` entries are non-text children.
pub fn text_node_caret<I>(node_lengths: I, offset: u32) -> Option<(usize, u32)>
where
    I: IntoIterator<Item = Option<u32>>,
{
    node_lengths
        .into_iter()
        .enumerate()
        .find_map(|(idx, len)| len.map(|len| (idx, offset.min(len))))
}
