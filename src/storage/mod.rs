use serde::{Deserialize, Serialize};

pub(crate) const SELECTED_ROOT_KEY: &str = "menu_admin_selected_root";
pub(crate) const EXPANDED_KEY: &str = "menu_admin_expanded";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let json = local_storage()?.get_item(key).ok().flatten()?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, &json);
        }
    }
}

pub(crate) fn load_selected_root() -> Option<String> {
    load_json_from_storage::<String>(SELECTED_ROOT_KEY).filter(|id| !id.trim().is_empty())
}

pub(crate) fn save_selected_root(id: Option<&str>) {
    match id {
        Some(id) => save_json_to_storage(SELECTED_ROOT_KEY, &id),
        None => {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(SELECTED_ROOT_KEY);
            }
        }
    }
}

/// Trees start expanded unless the user collapsed them last time.
pub(crate) fn load_expanded() -> bool {
    load_json_from_storage::<bool>(EXPANDED_KEY).unwrap_or(true)
}

pub(crate) fn save_expanded(expanded: bool) {
    save_json_to_storage(EXPANDED_KEY, &expanded);
}
