use crate::api::ApiClient;
use crate::forest::{ForestError, MenuForest, ROOT_LABEL};
use crate::storage::{load_expanded, load_selected_root, save_expanded, save_selected_root};
use crate::store::MenuEditor;
use leptos::prelude::*;

/// What the side form is editing.
#[derive(Clone, Debug, PartialEq, Eq, strum::Display)]
pub(crate) enum FormMode {
    #[strum(to_string = "Create Root Menu")]
    AddRoot,
    #[strum(to_string = "Add New Menu Item")]
    AddChild { parent_id: String },
    #[strum(to_string = "Edit Menu Item")]
    Rename { id: String },
}

impl FormMode {
    fn target_id(&self) -> Option<&str> {
        match self {
            Self::AddRoot => None,
            Self::AddChild { parent_id } => Some(parent_id.as_str()),
            Self::Rename { id } => Some(id.as_str()),
        }
    }

    /// False once the node the form points at has been deleted.
    pub fn survives(&self, removed: &[String]) -> bool {
        self.target_id()
            .map_or(true, |id| !removed.iter().any(|r| r == id))
    }
}

/// Everything the form shows besides the input itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FormContext {
    pub title: String,
    pub parent_label: String,
    /// Depth of the item being created or edited.
    pub level: usize,
    pub initial_name: String,
}

impl FormContext {
    pub fn for_mode(forest: &MenuForest, mode: &FormMode) -> Result<Self, ForestError> {
        let title = mode.to_string();
        match mode {
            FormMode::AddRoot => Ok(Self {
                title,
                parent_label: ROOT_LABEL.to_string(),
                level: 0,
                initial_name: String::new(),
            }),
            FormMode::AddChild { parent_id } => {
                let parent = forest
                    .entry(parent_id)
                    .ok_or_else(|| ForestError::NotFound(parent_id.clone()))?;
                Ok(Self {
                    title,
                    parent_label: parent.name.clone(),
                    level: forest.depth(parent_id)? + 1,
                    initial_name: String::new(),
                })
            }
            FormMode::Rename { id } => {
                let entry = forest
                    .entry(id)
                    .ok_or_else(|| ForestError::NotFound(id.clone()))?;
                Ok(Self {
                    title,
                    parent_label: forest.parent_name(id),
                    level: forest.depth(id)?,
                    initial_name: entry.name.clone(),
                })
            }
        }
    }

    pub fn level_hint(&self) -> String {
        format!(
            "{} (Child items will be at level {})",
            self.level,
            self.level + 1
        )
    }
}

/// Keep `current` while it is still a root, otherwise fall back to the first root.
pub(crate) fn resolve_selected_root(forest: &MenuForest, current: Option<&str>) -> Option<String> {
    current
        .filter(|id| forest.entry(id).is_some_and(|e| e.parent_id.is_none()))
        .map(str::to_string)
        .or_else(|| forest.first_root_id())
}

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub editor: RwSignal<MenuEditor<ApiClient>>,

    /// Initial fetch in flight.
    pub loading: RwSignal<bool>,
    /// A mutation is in flight; controls stay disabled until it settles.
    pub busy: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,

    /// Root currently shown in the tree (persisted).
    pub selected_root: RwSignal<Option<String>>,
    /// Expand All / Collapse All (persisted).
    pub expanded: RwSignal<bool>,

    pub form: RwSignal<Option<FormMode>>,
    /// Text in the form's title input.
    pub draft: RwSignal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_editor(
            MenuEditor::new(ApiClient::from_env()),
            load_selected_root(),
            load_expanded(),
        )
    }

    pub(crate) fn with_editor(
        editor: MenuEditor<ApiClient>,
        selected_root: Option<String>,
        expanded: bool,
    ) -> Self {
        Self {
            editor: RwSignal::new(editor),
            loading: RwSignal::new(false),
            busy: RwSignal::new(false),
            error: RwSignal::new(None),
            selected_root: RwSignal::new(selected_root),
            expanded: RwSignal::new(expanded),
            form: RwSignal::new(None),
            draft: RwSignal::new(String::new()),
        }
    }

    /// Show the form for `mode` with a fresh input, even if it was already open.
    pub fn open_form(&self, mode: FormMode) {
        let initial = self.editor.with_untracked(|editor| {
            FormContext::for_mode(editor.forest(), &mode)
                .map(|ctx| ctx.initial_name)
                .unwrap_or_default()
        });
        self.error.set(None);
        self.draft.set(initial);
        self.form.set(Some(mode));
    }

    pub fn select_root(&self, id: Option<String>) {
        save_selected_root(id.as_deref());
        self.selected_root.set(id);
    }

    pub fn set_expanded(&self, expanded: bool) {
        save_expanded(expanded);
        self.expanded.set(expanded);
    }

    /// Re-derive selection and form after the forest changed shape.
    pub fn settle_after_change(&self, removed: &[String]) {
        let current = self.selected_root.get_untracked();
        let (next, needs_first_root) = self.editor.with_untracked(|editor| {
            (
                resolve_selected_root(editor.forest(), current.as_deref()),
                editor.needs_first_root(),
            )
        });

        if next != current {
            self.select_root(next);
        }

        if self
            .form
            .get_untracked()
            .is_some_and(|mode| !mode.survives(removed))
        {
            self.form.set(None);
        }

        if needs_first_root && self.form.get_untracked() != Some(FormMode::AddRoot) {
            self.draft.set(String::new());
            self.form.set(Some(FormMode::AddRoot));
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

/// Tree row actions, provided by the menus page.
#[derive(Clone, Copy)]
pub(crate) struct MenuUiActions {
    pub open_add_child: Callback<String>,
    pub open_rename: Callback<String>,
    pub delete: Callback<String>,
}
