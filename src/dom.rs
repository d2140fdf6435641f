use leptos::prelude::{document, window};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlElement, HtmlInputElement, HtmlTextAreaElement, Node, Text};

use crate::detector::{AnchorRect, EditableKind, InputType, Position};
use crate::error::{Result, SlasherError};
use crate::splicer::text_node_caret;
use crate::target::{EditableTarget, PageContext};

#[derive(Clone, Copy, Debug, Default)]
pub struct DomPage;

impl PageContext for DomPage {
    fn url(&self) -> String {
        document().url().unwrap_or_default()
    }
}

#[derive(Clone, Debug)]
pub struct DomEditable {
    element: HtmlElement,
}

impl DomEditable {
    pub fn from_event_target(target: Option<EventTarget>) -> Option<Self> {
        target?
            .dyn_into::<HtmlElement>()
            .ok()
            .map(|element| Self { element })
    }

    fn place_range_caret(&self, offset: u32) -> Result<()> {
        let children: Vec<Node> = {
            let list = self.element.child_nodes();
            (0..list.length()).filter_map(|idx| list.item(idx)).collect()
        };
        let lengths = children.iter().map(|node| {
            (node.node_type() == Node::TEXT_NODE).then(|| node.unchecked_ref::<Text>().length())
        });
        let (idx, offset) = text_node_caret(lengths, offset)
            .ok_or_else(|| SlasherError::Caret("no text node to hold the caret".to_string()))?;
        let node = &children[idx];

        let range = document().create_range()?;
        range.set_start(node, offset)?;
        range.collapse_with_to_start(true);

        let selection = window()
            .get_selection()?
            .ok_or_else(|| SlasherError::Caret("document has no selection".to_string()))?;
        selection.remove_all_ranges()?;
        selection.add_range(&range)?;
        Ok(())
    }
}

impl EditableTarget for DomEditable {
    fn kind(&self) -> Option<EditableKind> {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            return Some(EditableKind::Input(InputType::parse(&input.type_())));
        }
        if self.element.is_instance_of::<HtmlTextAreaElement>() {
            return Some(EditableKind::TextArea);
        }
        self.element
            .is_content_editable()
            .then_some(EditableKind::ContentEditable)
    }

    fn is_focused(&self) -> bool {
        document()
            .active_element()
            .is_some_and(|active| self.element.is_same_node(Some(active.as_ref())))
    }

    fn text(&self) -> String {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            return input.value();
        }
        if let Some(area) = self.element.dyn_ref::<HtmlTextAreaElement>() {
            return area.value();
        }
        self.element.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.set_value(text);
        } else if let Some(area) = self.element.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(text);
        } else {
            self.element.set_text_content(Some(text));
        }
    }

    // Only the first text node of a contentEditable region is considered.
    fn place_caret(&self, offset: u32) -> Result<()> {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            return Ok(input.set_selection_range(offset, offset)?);
        }
        if let Some(area) = self.element.dyn_ref::<HtmlTextAreaElement>() {
            return Ok(area.set_selection_range(offset, offset)?);
        }
        self.place_range_caret(offset)
    }

    fn focus(&self) {
        if let Err(err) = self.element.focus() {
            warn!(error = ?err, "could not focus field");
        }
    }

    fn anchor_rect(&self) -> AnchorRect {
        let rect = self.element.get_bounding_client_rect();
        AnchorRect {
            left: rect.left(),
            top: rect.top(),
        }
    }

    fn scroll(&self) -> Position {
        let window = window();
        Position {
            x: window.scroll_x().unwrap_or_default(),
            y: window.scroll_y().unwrap_or_default(),
        }
    }
}
