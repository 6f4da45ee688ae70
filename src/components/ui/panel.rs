use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Panel, div, "bg-card text-card-foreground rounded-lg border shadow-sm"}
    clx! {PanelHeader, div, "flex flex-col gap-1 border-b px-4 py-3"}
    clx! {PanelTitle, h3, "text-lg font-medium leading-none"}
    clx! {PanelContent, div, "space-y-4 p-4"}
}

pub use components::*;
