use crate::api::{ApiError, ApiResult, CreateMenuItemRequest, UpdateMenuItemRequest};
use crate::forest::{ForestError, MenuForest};
use crate::models::MenuNode;
use leptos::logging::{error, log, warn};

/// The remote menu backend.
///
/// Only these four calls reach the server; everything else is answered from
/// the local [`MenuForest`].
pub(crate) trait MenuStore {
    async fn fetch_all(&self) -> ApiResult<Vec<MenuNode>>;
    async fn create(&self, req: &CreateMenuItemRequest) -> ApiResult<MenuNode>;
    async fn rename(&self, id: &str, req: &UpdateMenuItemRequest) -> ApiResult<MenuNode>;
    async fn delete(&self, id: &str) -> ApiResult<()>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ValidationError {
    EmptyName,
    UnknownParent(String),
    UnknownNode(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Menu title cannot be empty"),
            Self::UnknownParent(id) => write!(f, "Unknown parent menu: {id}"),
            Self::UnknownNode(id) => write!(f, "Menu item not found: {id}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Clone, Debug)]
pub(crate) enum MenuError {
    /// Rejected locally; the store was not called.
    Validation(ValidationError),
    /// The store call failed; the forest is unchanged.
    Remote(ApiError),
    /// The store answered with something the forest cannot hold.
    Hierarchy(ForestError),
}

impl std::fmt::Display for MenuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "{e}"),
            Self::Remote(e) => write!(f, "{e}"),
            Self::Hierarchy(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for MenuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Remote(e) => Some(e),
            Self::Hierarchy(e) => Some(e),
        }
    }
}

impl From<ValidationError> for MenuError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<ApiError> for MenuError {
    fn from(e: ApiError) -> Self {
        Self::Remote(e)
    }
}

impl From<ForestError> for MenuError {
    fn from(e: ForestError) -> Self {
        Self::Hierarchy(e)
    }
}

fn validate_name(name: &str) -> Result<&str, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        Err(ValidationError::EmptyName)
    } else {
        Ok(name)
    }
}

/// Command API over the cached forest.
///
/// Every mutation is validated, sent to the store, and only then patched into
/// the forest. A failed store call leaves the forest exactly as it was.
/// Callers issue one mutation at a time.
#[derive(Clone, Debug)]
pub(crate) struct MenuEditor<S> {
    store: S,
    forest: MenuForest,
}

impl<S> MenuEditor<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            forest: MenuForest::new(),
        }
    }

    pub fn forest(&self) -> &MenuForest {
        &self.forest
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub fn replace_forest(&mut self, forest: MenuForest) {
        self.forest = forest;
    }

    /// No roots left: the UI has to offer creating the first one.
    pub fn needs_first_root(&self) -> bool {
        self.forest.is_empty()
    }
}

impl<S: MenuStore> MenuEditor<S> {
    /// Replace the forest with a full fetch. Returns the node count.
    pub async fn load(&mut self) -> Result<usize, MenuError> {
        let nodes = self
            .store
            .fetch_all()
            .await
            .inspect_err(|e| error!("[menus] load failed: {e}"))?;

        let forest = MenuForest::from_nodes(nodes)
            .inspect_err(|e| error!("[menus] load rejected: {e}"))?;
        let count = forest.len();
        self.forest = forest;

        log!("[menus] loaded {count} items");
        Ok(count)
    }

    /// Create `name` as the last child of `parent_id`, or as a new root.
    pub async fn create_child(
        &mut self,
        parent_id: Option<&str>,
        name: &str,
    ) -> Result<MenuNode, MenuError> {
        let name = validate_name(name)?;
        // An empty parent id names no parent.
        let parent_id = parent_id.filter(|p| !p.is_empty());
        if let Some(parent) = parent_id {
            if !self.forest.contains(parent) {
                return Err(ValidationError::UnknownParent(parent.to_string()).into());
            }
        }

        let req = CreateMenuItemRequest {
            name: name.to_string(),
            parent_id: parent_id.map(str::to_string),
            order: 0,
        };
        let mut node = self
            .store
            .create(&req)
            .await
            .inspect_err(|e| error!("[menus] create failed: {e}"))?;

        if node.is_root() && req.parent_id.is_none() {
            node.parent_id = None;
        } else if node.parent_id != req.parent_id {
            warn!(
                "[menus] store placed {} under {:?}, keeping requested parent {:?}",
                node.id, node.parent_id, req.parent_id
            );
            node.parent_id = req.parent_id;
        }

        self.forest
            .insert(node.clone())
            .inspect_err(|e| error!("[menus] created item rejected locally: {e}"))?;

        log!("[menus] created {} ({})", node.id, node.name);
        Ok(node)
    }

    pub async fn rename(&mut self, id: &str, new_name: &str) -> Result<MenuNode, MenuError> {
        let name = validate_name(new_name)?;
        if !self.forest.contains(id) {
            return Err(ValidationError::UnknownNode(id.to_string()).into());
        }

        let req = UpdateMenuItemRequest {
            name: name.to_string(),
        };
        let updated = self
            .store
            .rename(id, &req)
            .await
            .inspect_err(|e| error!("[menus] rename of {id} failed: {e}"))?;

        self.forest
            .rename(id, name, Some(updated.updated_at.as_str()))?;

        log!("[menus] renamed {id} to {name}");
        self.forest
            .find(id)
            .ok_or_else(|| ForestError::NotFound(id.to_string()).into())
    }

    /// Delete a node and its whole subtree. Returns the removed ids.
    pub async fn delete(&mut self, id: &str) -> Result<Vec<String>, MenuError> {
        if !self.forest.contains(id) {
            return Err(ValidationError::UnknownNode(id.to_string()).into());
        }

        self.store
            .delete(id)
            .await
            .inspect_err(|e| error!("[menus] delete of {id} failed: {e}"))?;

        let removed = self.forest.remove(id)?;
        log!("[menus] deleted {id} ({} items)", removed.len());
        Ok(removed)
    }
}
