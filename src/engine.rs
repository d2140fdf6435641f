use tracing::debug;

use crate::command::{Command, CommandList};
use crate::config::EngineConfig;
use crate::detector::{anchor_position, find_trigger, DetectionState};
use crate::matcher::CommandSet;
use crate::selection::{NavKey, SelectionState, Transition};
use crate::splicer;
use crate::target::{EditableTarget, PageContext};

#[derive(Clone, Debug)]
pub enum EngineEvent<T> {
    Input(T),
    // `KeyboardEvent.key`
    Key(String),
    // A click on a list row.
    Select(Command),
    CommandsReplaced(CommandList),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub prevent_default: bool,
    pub changed: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderFrame {
    pub candidates: CommandList,
    pub x: f64,
    pub y: f64,
    pub visible: bool,
    pub selected_index: usize,
}

pub struct SlashEngine<T> {
    config: EngineConfig,
    page: Box<dyn PageContext>,
    commands: CommandSet,
    detection: DetectionState<T>,
    selection: SelectionState,
    shown: Vec<String>,
}

impl<T: EditableTarget> SlashEngine<T> {
    pub fn new(config: EngineConfig, page: impl PageContext + 'static) -> Self {
        Self {
            config,
            page: Box::new(page),
            commands: CommandSet::default(),
            detection: DetectionState::hidden(),
            selection: SelectionState::Closed,
            shown: Vec::new(),
        }
    }

    pub fn detection(&self) -> &DetectionState<T> {
        &self.detection
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn handle(&mut self, event: EngineEvent<T>) -> Outcome {
        let before = self.frame();
        let prevent_default = match event {
            EngineEvent::Input(target) => {
                self.on_input(target);
                false
            }
            EngineEvent::Key(key) => self.on_key(&key),
            EngineEvent::Select(command) => {
                if self.is_live() {
                    self.confirm(&command);
                } else {
                    debug!(command = %command.command, "selection after focus moved, dropping");
                    self.close();
                }
                false
            }
            EngineEvent::CommandsReplaced(list) => {
                debug!(count = list.len(), "command list replaced");
                self.commands = CommandSet::new(list);
                self.refresh(false);
                false
            }
        };
        Outcome {
            prevent_default,
            changed: self.frame() != before,
        }
    }

    pub fn candidates(&self) -> CommandList {
        if !self.detection.visible {
            return Vec::new();
        }
        self.commands
            .visible_candidates(&self.page.url(), &self.detection.search)
    }

    pub fn frame(&self) -> RenderFrame {
        let candidates = self.candidates();
        let visible = self.selection.is_open() && self.is_live() && !candidates.is_empty();
        RenderFrame {
            x: self.detection.position.x,
            y: self.detection.position.y,
            selected_index: self.selection.index(),
            visible,
            candidates,
        }
    }

    // The tracked field still owns focus.
    fn is_live(&self) -> bool {
        self.detection
            .active
            .as_ref()
            .is_some_and(|target| target.is_focused())
    }

    fn on_input(&mut self, target: T) {
        let eligible = target
            .kind()
            .is_some_and(|kind| kind.is_trigger_eligible());
        if !eligible || !target.is_focused() {
            debug!("input on an unfocused or unsupported element");
            self.close();
            return;
        }

        self.detection = match find_trigger(&target.text()) {
            Some(trigger) => {
                let position = anchor_position(
                    target.anchor_rect(),
                    target.scroll(),
                    self.config.anchor_offset_y,
                );
                DetectionState::shown(target, position, trigger.query)
            }
            None => DetectionState::hidden(),
        };
        self.refresh(true);
    }

    fn on_key(&mut self, key: &str) -> bool {
        let Some(key) = NavKey::from_key(key) else {
            return false;
        };
        if !self.selection.is_open() {
            return false;
        }
        if !self.is_live() {
            debug!("tracked field lost focus, closing");
            self.close();
            return false;
        }

        let candidates = self.candidates();
        match self.selection.on_key(key, candidates.len()) {
            Transition::Ignored => false,
            Transition::Moved(_) => true,
            Transition::Confirm(index) => {
                if let Some(entry) = candidates.get(index) {
                    self.confirm(&entry.command);
                }
                true
            }
            Transition::Cancelled => {
                self.close();
                true
            }
        }
    }

    fn confirm(&mut self, command: &Command) {
        if let Some(target) = self.detection.active.clone() {
            splicer::apply(&target, command, &self.config.caret_placeholder);
        }
        self.close();
    }

    fn close(&mut self) {
        self.detection = DetectionState::hidden();
        self.selection = SelectionState::Closed;
        self.shown.clear();
    }

    fn refresh(&mut self, reset: bool) {
        if self.detection.visible && !self.is_live() {
            debug!("tracked field lost focus, closing");
            self.close();
            return;
        }
        let names: Vec<String> = self
            .candidates()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        if reset {
            self.selection = SelectionState::Closed;
        }
        let list_changed = names != self.shown;
        self.selection
            .sync(self.detection.visible, names.len(), list_changed);
        self.shown = names;
    }
}
