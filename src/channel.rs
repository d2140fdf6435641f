use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, error};
use wasm_bindgen::prelude::*;

use crate::command::{CommandEntry, CommandList, UpdateMessage};
use crate::error::Result;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["browser", "runtime", "onMessage"], js_name = addListener)]
    fn add_message_listener(listener: &Closure<dyn FnMut(JsValue)>);
    #[wasm_bindgen(js_namespace = ["browser", "runtime", "onMessage"], js_name = removeListener)]
    fn remove_message_listener(listener: &Closure<dyn FnMut(JsValue)>);
    #[wasm_bindgen(catch, js_namespace = ["browser", "tabs"], js_name = query)]
    async fn tabs_query(query: JsValue) -> std::result::Result<JsValue, JsValue>;
    #[wasm_bindgen(catch, js_namespace = ["browser", "tabs"], js_name = sendMessage)]
    async fn tabs_send_message(tab_id: i32, message: JsValue)
        -> std::result::Result<JsValue, JsValue>;
}

pub type SubscriptionId = u64;
pub type UpdateCallback = Box<dyn Fn(CommandList)>;

pub trait UpdateChannel {
    fn subscribe(&self, callback: UpdateCallback) -> SubscriptionId;
    fn unsubscribe(&self, id: SubscriptionId);
}

#[derive(Deserialize)]
struct Tab {
    #[serde(default)]
    id: Option<i32>,
}

#[derive(Default)]
pub struct BrowserChannel {
    next_id: Cell<SubscriptionId>,
    listeners: RefCell<HashMap<SubscriptionId, Closure<dyn FnMut(JsValue)>>>,
}

impl BrowserChannel {
    pub async fn publish_update(&self, commands: &[CommandEntry]) -> Result<()> {
        let message = UpdateMessage::commands_updated(commands)
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())?;
        let tabs: Vec<Tab> =
            serde_wasm_bindgen::from_value(tabs_query(js_sys::Object::new().into()).await?)?;

        for id in tabs.into_iter().filter_map(|tab| tab.id) {
            if let Err(err) = tabs_send_message(id, message.clone()).await {
                error!(tab = id, error = ?err, "error while publishing commands updated event");
            }
        }
        Ok(())
    }
}

impl UpdateChannel for BrowserChannel {
    fn subscribe(&self, callback: UpdateCallback) -> SubscriptionId {
        let listener = Closure::<dyn FnMut(JsValue)>::new(move |raw: JsValue| {
            match serde_wasm_bindgen::from_value::<UpdateMessage>(raw) {
                Ok(message) => {
                    if let Some(commands) = message.into_command_list() {
                        callback(commands);
                    }
                }
                Err(err) => debug!(error = %err, "ignoring unrelated runtime message"),
            }
        });
        add_message_listener(&listener);

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().insert(id, listener);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if let Some(listener) = self.listeners.borrow_mut().remove(&id) {
            remove_message_listener(&listener);
        }
    }
}

#[derive(Default)]
pub struct LocalChannel {
    next_id: Cell<SubscriptionId>,
    subscribers: RefCell<Vec<(SubscriptionId, Rc<dyn Fn(CommandList)>)>>,
}

impl LocalChannel {
    pub fn publish_update(&self, commands: &[CommandEntry]) {
        let subscribers: Vec<_> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in subscribers {
            callback(commands.to_vec());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl UpdateChannel for LocalChannel {
    fn subscribe(&self, callback: UpdateCallback) -> SubscriptionId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers.borrow_mut().push((id, Rc::from(callback)));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().retain(|(sub, _)| *sub != id);
    }
}
