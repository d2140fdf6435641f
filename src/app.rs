use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{error, warn};

use crate::channel::{BrowserChannel, UpdateChannel};
use crate::command::Command;
use crate::config::EngineConfig;
use crate::dom::{DomEditable, DomPage};
use crate::engine::{EngineEvent, Outcome, RenderFrame, SlashEngine};
use crate::store::{BrowserStore, CommandStore};
use crate::view::{CommandListView, RenderSink, SignalSink};

#[component]
pub fn App(config: EngineConfig) -> impl IntoView {
    let list_offset_y = config.list_offset_y;
    let engine = StoredValue::new_local(SlashEngine::<DomEditable>::new(config, DomPage));
    let channel = StoredValue::new_local(BrowserChannel::default());
    let (frame, set_frame) = signal(RenderFrame::default());
    let sink = SignalSink(set_frame);

    let dispatch = move |event: EngineEvent<DomEditable>| -> Outcome {
        let outcome = engine
            .try_update_value(|engine| engine.handle(event))
            .unwrap_or_default();
        if outcome.changed {
            engine.with_value(|engine| sink.render(engine.frame()));
        }
        outcome
    };

    spawn_local(async move {
        let store = BrowserStore;
        if let Err(err) = store.init().await {
            warn!(error = %err, "could not seed command storage");
        }
        match store.load_all().await {
            Ok(commands) if !commands.is_empty() => {
                dispatch(EngineEvent::CommandsReplaced(commands));
            }
            Ok(_) => {}
            Err(err) => error!(error = %err, "failed to load commands"),
        }
    });

    let subscription = channel.with_value(|channel| {
        channel.subscribe(Box::new(move |commands| {
            dispatch(EngineEvent::CommandsReplaced(commands));
        }))
    });

    let input_handle = window_event_listener(ev::input, move |e| {
        if let Some(target) = DomEditable::from_event_target(e.target()) {
            dispatch(EngineEvent::Input(target));
        }
    });
    let keydown_handle = window_event_listener(ev::keydown, move |e| {
        if dispatch(EngineEvent::Key(e.key())).prevent_default {
            e.prevent_default();
        }
    });

    on_cleanup(move || {
        input_handle.remove();
        keydown_handle.remove();
        channel.with_value(|channel| channel.unsubscribe(subscription));
    });

    let on_select = Callback::new(move |command: Command| {
        dispatch(EngineEvent::Select(command));
    });

    view! {
        <CommandListView frame=frame list_offset_y=list_offset_y on_select=on_select />
    }
}
