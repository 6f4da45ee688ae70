use serde::{Deserialize, Deserializer, Serialize};

/// One menu entry as exchanged with the menu API.
///
/// The backend speaks camelCase (`parentId`, `createdAt`, ...). Optional fields
/// are tolerated as missing or `null` so that partially hydrated payloads
/// still parse.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MenuNode {
    /// Empty until the backend has persisted the node.
    #[serde(default)]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,

    /// Sibling sort key. Always sent as 0; display order is insertion order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: i64,

    /// `None` marks a root menu.
    #[serde(default)]
    pub parent_id: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// An absent, `null` or empty `parentId` marks a root.
    pub fn is_root(&self) -> bool {
        self.parent_id.as_deref().map_or(true, str::is_empty)
    }
}

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}
