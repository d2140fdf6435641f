use leptos::prelude::*;

use crate::command::Command;
use crate::engine::RenderFrame;

pub trait RenderSink {
    fn render(&self, frame: RenderFrame);
}

#[derive(Clone, Copy)]
pub struct SignalSink(pub WriteSignal<RenderFrame>);

impl RenderSink for SignalSink {
    fn render(&self, frame: RenderFrame) {
        self.0.set(frame);
    }
}

#[component]
pub fn CommandView(command: Command, selected: bool, on_select: Callback<Command>) -> impl IntoView {
    let title = command.title.clone();
    let keyword = format!("/{}", command.command);
    let description = command.description.clone();
    let row_style = if selected {
        "padding: 0.625rem; cursor: pointer; background: rgba(225, 29, 72, 0.2); border-left: 2px solid #f43f5e;"
    } else {
        "padding: 0.625rem; cursor: pointer; border-left: 2px solid transparent;"
    };

    view! {
        <li>
            <div
                style=row_style
                // Keep focus in the page field so the splice can land there.
                on:mousedown=|ev| ev.prevent_default()
                on:click=move |_| on_select.run(command.clone())
            >
                <div style="display: flex; align-items: center; gap: 0.5rem; margin-bottom: 0.25rem;">
                    <p style="margin: 0; font-weight: 500; font-size: 0.875rem; color: #e7e5e4;">{title}</p>
                    <span style="background: #57534e; color: white; font-size: 0.75rem; font-family: monospace; padding: 0.125rem 0.375rem; border-radius: 4px; flex-shrink: 0;">
                        {keyword}
                    </span>
                </div>
                {(!description.is_empty()).then(|| view! {
                    <p style="margin: 0; font-size: 0.75rem; color: #a8a29e;">{description}</p>
                })}
            </div>
        </li>
    }
}

#[component]
pub fn CommandListView(
    frame: ReadSignal<RenderFrame>,
    list_offset_y: f64,
    on_select: Callback<Command>,
) -> impl IntoView {
    move || {
        let frame = frame.get();
        if !frame.visible {
            return None;
        }
        let selected = frame.selected_index;
        let rows = frame
            .candidates
            .into_iter()
            .enumerate()
            .map(|(idx, entry)| {
                view! { <CommandView command=entry.command selected={idx == selected} on_select=on_select /> }
            })
            .collect::<Vec<_>>();

        Some(view! {
            <div style=format!("position: absolute; top: {}px; left: {}px; z-index: 10000; background: #292524; border: 1px solid #44403c; border-radius: 8px; box-shadow: 0 10px 15px rgba(0, 0, 0, 0.3);", frame.y + list_offset_y, frame.x)>
                <ul style="margin: 0; padding: 0; list-style: none;">{rows}</ul>
            </div>
        })
    }
}
