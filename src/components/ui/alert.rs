use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full rounded-lg border border-destructive/50 px-4 py-3 text-sm text-destructive"}
    clx! {AlertDescription, p, "text-sm leading-relaxed"}
}

pub use components::*;
