use leptos::prelude::*;
use leptos_router::hooks::use_location;

#[component]
pub fn Sidebar() -> impl IntoView {
    let location = use_location();
    let on_menus = move || {
        let path = location.pathname.get();
        path == "/" || path.starts_with("/menus")
    };

    view! {
        <aside class="hidden h-screen w-64 shrink-0 bg-[#1A1C1E] md:block">
            <div class="flex h-full flex-col">
                <div class="border-b border-gray-800 p-4">
                    <span class="text-xl font-semibold text-white">"Menu Admin"</span>
                </div>

                <nav class="flex-1 py-2">
                    <div class="space-y-1 px-3">
                        <a
                            href="/menus"
                            class=move || {
                                if on_menus() {
                                    "block w-full rounded-md bg-[#00A550] px-3 py-2 text-left text-sm text-white"
                                } else {
                                    "block w-full rounded-md px-3 py-2 text-left text-sm text-gray-300 hover:bg-white/10"
                                }
                            }
                        >
                            "Menus"
                        </a>
                    </div>
                </nav>
            </div>
        </aside>
    }
}

/// Sidebar plus the routed page.
#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    view! {
        <div class="flex min-h-screen bg-background text-foreground">
            <Sidebar />
            <main class="flex-1 overflow-y-auto">{children()}</main>
        </div>
    }
}
