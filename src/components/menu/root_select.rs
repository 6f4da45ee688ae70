use crate::state::AppContext;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Picks which root tree is shown.
#[component]
pub fn RootSelect() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let roots = move || {
        app_state.0.editor.with(|editor| {
            editor
                .forest()
                .roots()
                .map(|e| (e.id.clone(), e.name.clone()))
                .collect::<Vec<_>>()
        })
    };

    let on_change = move |ev: web_sys::Event| {
        if let Some(select) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        {
            let id = select.value();
            app_state
                .0
                .select_root(if id.is_empty() { None } else { Some(id) });
        }
    };

    view! {
        <select
            data-name="RootSelect"
            aria-label="Select menu to view"
            class="border-input h-9 w-full rounded-md border bg-background px-3 text-sm shadow-xs outline-none focus-visible:ring-2 focus-visible:ring-ring/50 sm:w-[200px]"
            disabled=move || app_state.0.busy.get()
            prop:value=move || app_state.0.selected_root.get().unwrap_or_default()
            on:change=on_change
        >
            <For
                each=roots
                key=|(id, name)| (id.clone(), name.clone())
                children=move |(id, name)| {
                    let option_id = id.clone();
                    let selected = move || {
                        app_state.0.selected_root.get().as_deref() == Some(option_id.as_str())
                    };
                    view! { <option value=id selected=selected>{name}</option> }
                }
            />
        </select>
    }
}
