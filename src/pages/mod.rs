use crate::components::layout::AppShell;
use crate::components::menu::{MenuForm, MenuTree, RootSelect};
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Panel, Spinner,
};
use crate::state::{AppContext, FormMode, MenuUiActions};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;

#[component]
pub fn MenuPage() -> impl IntoView {
    let state = expect_context::<AppContext>().0;

    let load_menus = move || {
        if state.loading.get_untracked() {
            return;
        }

        let mut editor = state.editor.get_untracked();
        state.loading.set(true);
        state.error.set(None);

        spawn_local(async move {
            match editor.load().await {
                Ok(_) => {
                    state.editor.set(editor);
                    state.settle_after_change(&[]);
                }
                Err(e) => state.error.set(Some(e.to_string())),
            }
            state.loading.set(false);
        });
    };

    // Work on a copy of the editor; it is published only when the call succeeds.
    let on_save = move |name: String| {
        if state.busy.get_untracked() {
            return;
        }
        let Some(mode) = state.form.get_untracked() else {
            return;
        };

        let mut editor = state.editor.get_untracked();
        state.busy.set(true);
        state.error.set(None);

        spawn_local(async move {
            let result = match &mode {
                FormMode::AddRoot => editor.create_child(None, &name).await,
                FormMode::AddChild { parent_id } => {
                    editor.create_child(Some(parent_id.as_str()), &name).await
                }
                FormMode::Rename { id } => editor.rename(id, &name).await,
            };

            match result {
                Ok(node) => {
                    state.editor.set(editor);
                    state.form.set(None);
                    if mode == FormMode::AddRoot {
                        state.select_root(Some(node.id));
                    }
                    state.settle_after_change(&[]);
                }
                Err(e) => state.error.set(Some(e.to_string())),
            }
            state.busy.set(false);
        });
    };

    let on_delete = move |id: String| {
        if state.busy.get_untracked() {
            return;
        }

        let mut editor = state.editor.get_untracked();
        state.busy.set(true);
        state.error.set(None);

        spawn_local(async move {
            match editor.delete(&id).await {
                Ok(removed) => {
                    state.editor.set(editor);
                    state.settle_after_change(&removed);
                }
                Err(e) => state.error.set(Some(e.to_string())),
            }
            state.busy.set(false);
        });
    };

    let open_form = move |mode: FormMode| state.open_form(mode);

    let on_cancel = move || {
        state.form.set(None);
    };

    provide_context(MenuUiActions {
        open_add_child: Callback::new(move |parent_id| open_form(FormMode::AddChild { parent_id })),
        open_rename: Callback::new(move |id| open_form(FormMode::Rename { id })),
        delete: Callback::new(on_delete),
    });

    let save_cb = Callback::new(on_save);
    let cancel_cb = Callback::new(move |_| on_cancel());

    // Esc closes the form unless a save is in flight.
    let key_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape"
            && state.form.get_untracked().is_some()
            && !state.busy.get_untracked()
        {
            ev.prevent_default();
            on_cancel();
        }
    });
    on_cleanup(move || key_handle.remove());

    load_menus();

    let busy = move || state.busy.get();
    let has_roots = move || state.editor.with(|editor| !editor.forest().is_empty());
    let root_form_open = move || state.form.get() == Some(FormMode::AddRoot);
    let side_form_open = move || {
        state
            .form
            .get()
            .is_some_and(|mode| mode != FormMode::AddRoot)
    };

    view! {
        <div class="flex-1 p-4 md:p-8">
            <div class="mx-auto max-w-5xl">
                <Show
                    when=move || !state.loading.get()
                    fallback=|| view! {
                        <div class="flex items-center justify-center gap-2 p-8 text-sm text-muted-foreground">
                            <Spinner />
                            "Loading..."
                        </div>
                    }
                >
                    <div class="flex flex-col gap-4 lg:flex-row lg:gap-8">
                        <div class="flex-1 space-y-4">
                            <div class="mb-6 flex items-center gap-4">
                                <h1 class="text-xl font-semibold">"Menus"</h1>
                                <div class="text-sm text-muted-foreground">"System management"</div>
                            </div>

                            <Show when=move || state.error.get().is_some() fallback=|| ().into_view()>
                                {move || {
                                    state.error.get().map(|e| {
                                        view! {
                                            <Alert class="flex items-center justify-between gap-3">
                                                <AlertDescription class="text-xs">{e}</AlertDescription>
                                                <Show when=move || !has_roots() fallback=|| ().into_view()>
                                                    <Button
                                                        variant=ButtonVariant::Outline
                                                        size=ButtonSize::Sm
                                                        attr:disabled=busy
                                                        on:click=move |_| load_menus()
                                                    >
                                                        "Retry"
                                                    </Button>
                                                </Show>
                                            </Alert>
                                        }
                                    })
                                }}
                            </Show>

                            <Show
                                when=root_form_open
                                fallback=move || view! {
                                    <div class="flex flex-col gap-4">
                                        <div class="flex flex-col gap-2 sm:flex-row sm:items-center">
                                            <Show when=has_roots fallback=|| ().into_view()>
                                                <RootSelect />
                                            </Show>
                                            <Button
                                                variant=ButtonVariant::Outline
                                                class="w-full sm:w-auto"
                                                attr:disabled=busy
                                                on:click=move |_| open_form(FormMode::AddRoot)
                                            >
                                                "Create Root Menu"
                                            </Button>
                                        </div>

                                        <div class="flex w-full gap-2 sm:w-auto">
                                            <Button
                                                variant=ButtonVariant::Secondary
                                                class="flex-1 text-sm sm:flex-none"
                                                on:click=move |_| state.set_expanded(true)
                                            >
                                                "Expand All"
                                            </Button>
                                            <Button
                                                variant=ButtonVariant::Outline
                                                class="flex-1 text-sm sm:flex-none"
                                                on:click=move |_| state.set_expanded(false)
                                            >
                                                "Collapse All"
                                            </Button>
                                        </div>
                                    </div>

                                    <Show when=has_roots fallback=|| ().into_view()>
                                        <Panel class="p-4">
                                            <div class="max-h-[calc(100vh-350px)] overflow-y-auto lg:max-h-[calc(100vh-250px)]">
                                                <MenuTree />
                                            </div>
                                        </Panel>
                                    </Show>
                                }
                            >
                                <div class="mx-auto w-full max-w-md">
                                    <MenuForm on_save=save_cb on_cancel=cancel_cb />
                                </div>
                            </Show>
                        </div>

                        <Show when=side_form_open fallback=|| ().into_view()>
                            <div class="w-full lg:w-80">
                                <MenuForm on_save=save_cb on_cancel=cancel_cb />
                            </div>
                        </Show>
                    </div>
                </Show>
            </div>
        </div>
    }
}

/// The menus page inside the app chrome.
#[component]
pub fn MenusRoute() -> impl IntoView {
    view! {
        <AppShell>
            <MenuPage />
        </AppShell>
    }
}
