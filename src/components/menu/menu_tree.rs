use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::forest::TreeRow;
use crate::state::{AppContext, MenuUiActions};
use icons::{ChevronDown, Pencil, Plus, Trash2};
use leptos::prelude::*;

/// Horizontal offset per tree level, in pixels.
pub(crate) const INDENT_PX: usize = 20;

/// Vertical centre of a row, where the elbow meets the label.
const ELBOW_TOP_PX: usize = 12;

fn row_padding(depth: usize) -> String {
    format!("padding-left: {}px", depth * INDENT_PX)
}

/// Inline styles for the connector lines drawn left of a row.
///
/// Every enclosing level gets a full-height guide; the row's own level gets a
/// guide that stops at the elbow when it is the last sibling, plus the elbow.
pub(crate) fn connector_lines(depth: usize, is_last: bool) -> Vec<String> {
    if depth == 0 {
        return vec![];
    }

    let x = |level: usize| level * INDENT_PX - INDENT_PX / 2;

    let mut lines: Vec<String> = (1..depth)
        .map(|level| format!("left: {}px; top: 0; bottom: 0; width: 1px", x(level)))
        .collect();

    let bottom = if is_last {
        format!("{ELBOW_TOP_PX}px")
    } else {
        "0".to_string()
    };
    lines.push(format!(
        "left: {}px; top: 0; bottom: {bottom}; width: 1px",
        x(depth)
    ));
    lines.push(format!(
        "left: {}px; top: {ELBOW_TOP_PX}px; width: {}px; height: 1px",
        x(depth),
        INDENT_PX / 2
    ));
    lines
}

#[component]
fn MenuTreeRow(row: TreeRow) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let actions = expect_context::<MenuUiActions>();
    let busy = move || app_state.0.busy.get();

    let id_sv = StoredValue::new(row.entry.id.clone());
    let lines = connector_lines(row.depth, row.is_last);

    let chevron = if row.has_children {
        view! { <ChevronDown class="size-4 shrink-0 text-muted-foreground" /> }.into_any()
    } else {
        view! { <div class="w-4 shrink-0"></div> }.into_any()
    };

    view! {
        <div class="relative" role="treeitem" attr:aria-level={(row.depth + 1).to_string()}>
            {lines
                .into_iter()
                .map(|style| view! { <div class="absolute bg-border" style=style></div> })
                .collect_view()}

            <div class="group relative z-10 flex items-center py-1.5" style=row_padding(row.depth)>
                {chevron}
                <span class="ml-1 text-sm text-foreground">{row.entry.name.clone()}</span>

                <div class="ml-2 flex items-center gap-1 opacity-0 transition-opacity group-hover:opacity-100 focus-within:opacity-100">
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::IconXs
                        class="hover:bg-blue-100"
                        attr:title="Add child"
                        attr:disabled=busy
                        on:click=move |_| actions.open_add_child.run(id_sv.get_value())
                    >
                        <Plus class="size-4" />
                    </Button>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::IconXs
                        class="hover:bg-yellow-100"
                        attr:title="Rename"
                        attr:disabled=busy
                        on:click=move |_| actions.open_rename.run(id_sv.get_value())
                    >
                        <Pencil class="size-4" />
                    </Button>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::IconXs
                        class="hover:bg-red-100"
                        attr:title="Delete"
                        attr:disabled=busy
                        on:click=move |_| actions.delete.run(id_sv.get_value())
                    >
                        <Trash2 class="size-4" />
                    </Button>
                </div>
            </div>
        </div>
    }
}

/// The selected root's tree, flattened into rows.
#[component]
pub fn MenuTree() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let rows = move || {
        let Some(root) = app_state.0.selected_root.get() else {
            return vec![];
        };
        let expanded = app_state.0.expanded.get();
        app_state
            .0
            .editor
            .with(|editor| editor.forest().flatten(&root, expanded))
    };

    view! {
        <div class="relative space-y-0.5" role="tree">
            <For
                each=rows
                key=|row| {
                    (
                        row.entry.id.clone(),
                        row.entry.name.clone(),
                        row.depth,
                        row.has_children,
                        row.is_last,
                    )
                }
                children=move |row| view! { <MenuTreeRow row=row /> }
            />
        </div>
    }
}
