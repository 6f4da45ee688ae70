use crate::components::hooks::use_dom_id::use_dom_id;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Input, Label, Panel, PanelContent, PanelHeader, PanelTitle,
    Spinner,
};
use crate::state::{AppContext, FormContext};
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Side form for creating a root, adding a child or renaming an item.
///
/// The title lives in `AppState::draft`, so it is kept when a save fails.
#[component]
pub fn MenuForm(on_save: Callback<String>, on_cancel: Callback<()>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let title = app_state.0.draft;
    let input_ref: NodeRef<html::Input> = NodeRef::new();
    let input_id = StoredValue::new(use_dom_id("menu_title"));

    let context = Memo::new(move |_| {
        let mode = app_state.0.form.get()?;
        app_state
            .0
            .editor
            .with(|editor| FormContext::for_mode(editor.forest(), &mode).ok())
    });

    // Focus the input every time the form is opened.
    Effect::new(move |_| {
        if app_state.0.form.get().is_none() {
            return;
        }

        // Defer to next tick so the Input is mounted.
        let _ = window().set_timeout_with_callback_and_timeout_and_arguments_0(
            wasm_bindgen::closure::Closure::once_into_js(move || {
                if let Some(el) = input_ref.get_untracked() {
                    let _ = el.focus();
                }
            })
            .as_ref()
            .unchecked_ref(),
            0,
        );
    });

    let busy = move || app_state.0.busy.get();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if app_state.0.busy.get_untracked() {
            return;
        }
        on_save.run(title.get_untracked());
    };

    move || {
        context.get().map(|ctx| {
            let id = input_id.get_value();
            let heading = ctx.title.clone();
            let parent_label = ctx.parent_label.clone();
            let hint = ctx.level_hint();
            view! {
                <Panel class="w-full">
                    <PanelHeader>
                        <PanelTitle>{heading}</PanelTitle>
                    </PanelHeader>
                    <PanelContent>
                        <div class="space-y-2">
                            <Label class="text-xs">"Parent Item"</Label>
                            <div class="rounded-md border bg-muted p-2 text-sm">
                                {parent_label}
                            </div>
                        </div>

                        <div class="space-y-2">
                            <Label class="text-xs">"Depth Level"</Label>
                            <div class="text-sm">{hint}</div>
                        </div>

                        <form class="space-y-4" on:submit=on_submit>
                            <div class="space-y-2">
                                <Label html_for=id.clone() class="text-xs">"Menu Title"</Label>
                                <Input
                                    id=id
                                    placeholder="Enter menu title"
                                    bind_value=title
                                    required=true
                                    disabled=Signal::derive(busy)
                                    node_ref=input_ref
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex gap-2">
                                <Button size=ButtonSize::Sm attr:disabled=busy>
                                    <span class="inline-flex items-center gap-2">
                                        <Show when=busy fallback=|| ().into_view()>
                                            <Spinner class="size-3 text-primary-foreground" />
                                        </Show>
                                        "Save"
                                    </span>
                                </Button>
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    attr:r#type="button"
                                    attr:disabled=busy
                                    on:click=move |_| on_cancel.run(())
                                >
                                    "Cancel"
                                </Button>
                            </div>
                        </form>
                    </PanelContent>
                </Panel>
            }
        })
    }
}
