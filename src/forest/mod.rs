//! In-memory menu forest.
//!
//! Nodes live in an arena: each slot keeps the node's own fields, the slot
//! index of its parent and the slot indices of its children in display order.
//! An id index makes lookups O(1); walks use explicit stacks, never recursion.

use crate::models::MenuNode;
use std::collections::{HashMap, HashSet};

/// Label shown for the parent of a root menu.
pub(crate) const ROOT_LABEL: &str = "Root";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ForestError {
    EmptyId,
    DuplicateId(String),
    UnknownParent(String),
    NotFound(String),
    InconsistentHierarchy(String),
}

impl std::fmt::Display for ForestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Menu item has no id"),
            Self::DuplicateId(id) => write!(f, "Duplicate menu id: {id}"),
            Self::UnknownParent(id) => write!(f, "Unknown parent menu: {id}"),
            Self::NotFound(id) => write!(f, "Menu item not found: {id}"),
            Self::InconsistentHierarchy(msg) => write!(f, "Inconsistent menu hierarchy: {msg}"),
        }
    }
}

impl std::error::Error for ForestError {}

/// A node's own fields, without its children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MenuEntry {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub order: i64,
    pub parent_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl MenuEntry {
    fn split(node: MenuNode) -> (Self, Vec<MenuNode>) {
        let entry = Self {
            id: node.id,
            name: node.name,
            url: node.url,
            icon: node.icon,
            order: node.order,
            parent_id: node.parent_id,
            created_at: node.created_at,
            updated_at: node.updated_at,
        };
        (entry, node.children)
    }

    fn to_node(&self, children: Vec<MenuNode>) -> MenuNode {
        MenuNode {
            id: self.id.clone(),
            name: self.name.clone(),
            url: self.url.clone(),
            icon: self.icon.clone(),
            order: self.order,
            parent_id: self.parent_id.clone(),
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
            children,
        }
    }
}

/// One line of the rendered tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TreeRow {
    pub entry: MenuEntry,
    pub depth: usize,
    pub has_children: bool,
    /// Last among its siblings (the connector line stops here).
    pub is_last: bool,
}

#[derive(Clone, Debug)]
struct Slot {
    entry: MenuEntry,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct MenuForest {
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
    index: HashMap<String, usize>,
    roots: Vec<usize>,
}

impl MenuForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest from a `GET /menus` payload.
    ///
    /// Accepts both a purely nested payload and one that also repeats child
    /// entries at the top level. Roots are hydrated first; remaining top-level
    /// entries are skipped when already known, otherwise attached under their
    /// parent once it exists.
    pub fn from_nodes(nodes: Vec<MenuNode>) -> Result<Self, ForestError> {
        let mut forest = Self::new();
        let (roots, mut pending): (Vec<MenuNode>, Vec<MenuNode>) =
            nodes.into_iter().partition(MenuNode::is_root);

        for root in roots {
            forest.insert(root)?;
        }

        while !pending.is_empty() {
            let mut progressed = false;
            let mut waiting = Vec::new();

            for node in pending {
                if forest.contains(&node.id) {
                    // Already placed; its nested children may still be new.
                    progressed = true;
                    for mut child in node.children {
                        if child.is_root() {
                            child.parent_id = Some(node.id.clone());
                        }
                        waiting.push(child);
                    }
                    continue;
                }
                match node.parent_id.as_deref() {
                    Some(parent) if forest.contains(parent) => {
                        forest.insert(node)?;
                        progressed = true;
                    }
                    _ => waiting.push(node),
                }
            }

            if !progressed {
                let parent = waiting
                    .first()
                    .and_then(|n| n.parent_id.clone())
                    .unwrap_or_default();
                return Err(ForestError::UnknownParent(parent));
            }
            pending = waiting;
        }

        Ok(forest)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn entry(&self, id: &str) -> Option<&MenuEntry> {
        self.index
            .get(id)
            .and_then(|&idx| self.slot(idx))
            .map(|s| &s.entry)
    }

    pub fn roots(&self) -> impl Iterator<Item = &MenuEntry> + '_ {
        self.roots
            .iter()
            .filter_map(|&idx| self.slot(idx))
            .map(|s| &s.entry)
    }

    pub fn first_root_id(&self) -> Option<String> {
        self.roots().next().map(|e| e.id.clone())
    }

    pub fn children(&self, id: &str) -> Vec<&MenuEntry> {
        let Some(slot) = self.index.get(id).and_then(|&idx| self.slot(idx)) else {
            return vec![];
        };
        slot.children
            .iter()
            .filter_map(|&c| self.slot(c))
            .map(|s| &s.entry)
            .collect()
    }

    /// The node with `id`, its subtree included.
    pub fn find(&self, id: &str) -> Option<MenuNode> {
        let idx = *self.index.get(id)?;
        self.materialize(idx)
    }

    /// Distance from the node's root: roots are at 0.
    ///
    /// Follows `parent_id` links through the id index. A link to an id that
    /// is not in the forest, or a walk longer than the forest, is reported as
    /// an inconsistent hierarchy.
    pub fn depth(&self, id: &str) -> Result<usize, ForestError> {
        let mut current = self
            .entry(id)
            .ok_or_else(|| ForestError::NotFound(id.to_string()))?;
        let mut hops = 0;

        while let Some(parent_id) = current.parent_id.as_deref() {
            if hops >= self.len() {
                return Err(ForestError::InconsistentHierarchy(format!(
                    "parent chain of {id} does not reach a root"
                )));
            }
            current = self.entry(parent_id).ok_or_else(|| {
                ForestError::InconsistentHierarchy(format!(
                    "{} references missing parent {parent_id}",
                    current.id
                ))
            })?;
            hops += 1;
        }

        Ok(hops)
    }

    /// Name of the node's parent, or [`ROOT_LABEL`] for roots and unknown ids.
    pub fn parent_name(&self, id: &str) -> String {
        self.entry(id)
            .and_then(|e| e.parent_id.as_deref())
            .and_then(|p| self.entry(p))
            .map(|p| p.name.clone())
            .unwrap_or_else(|| ROOT_LABEL.to_string())
    }

    /// Ids of the node and all of its descendants, in pre-order.
    pub fn subtree_ids(&self, id: &str) -> Result<Vec<String>, ForestError> {
        let idx = *self
            .index
            .get(id)
            .ok_or_else(|| ForestError::NotFound(id.to_string()))?;
        Ok(self
            .preorder(idx)
            .into_iter()
            .filter_map(|i| self.slot(i))
            .map(|s| s.entry.id.clone())
            .collect())
    }

    /// Append a node (with any children it carries) as the last child of its
    /// `parent_id`, or as the last root when it has none.
    ///
    /// Nothing is changed unless the whole subtree can be placed.
    pub fn insert(&mut self, node: MenuNode) -> Result<(), ForestError> {
        let parent = match node.parent_id.as_deref().filter(|p| !p.is_empty()) {
            None => None,
            Some(p) => Some(
                *self
                    .index
                    .get(p)
                    .ok_or_else(|| ForestError::UnknownParent(p.to_string()))?,
            ),
        };
        self.validate_subtree(&node)?;
        self.attach(node, parent);
        Ok(())
    }

    /// Replace a node's name in place; `updated_at` is kept when not given.
    pub fn rename(
        &mut self,
        id: &str,
        name: &str,
        updated_at: Option<&str>,
    ) -> Result<&MenuEntry, ForestError> {
        let idx = *self
            .index
            .get(id)
            .ok_or_else(|| ForestError::NotFound(id.to_string()))?;
        let slot = self
            .slots
            .get_mut(idx)
            .and_then(Option::as_mut)
            .ok_or_else(|| ForestError::NotFound(id.to_string()))?;

        slot.entry.name = name.to_string();
        if let Some(ts) = updated_at.filter(|ts| !ts.trim().is_empty()) {
            slot.entry.updated_at = ts.to_string();
        }
        Ok(&slot.entry)
    }

    /// Detach a node from its owning sequence and drop its whole subtree.
    ///
    /// Returns the removed ids in pre-order.
    pub fn remove(&mut self, id: &str) -> Result<Vec<String>, ForestError> {
        let idx = *self
            .index
            .get(id)
            .ok_or_else(|| ForestError::NotFound(id.to_string()))?;

        let parent = self.slot(idx).and_then(|s| s.parent);
        match parent {
            Some(p) => {
                if let Some(parent) = self.slots.get_mut(p).and_then(Option::as_mut) {
                    parent.children.retain(|&c| c != idx);
                }
            }
            None => self.roots.retain(|&r| r != idx),
        }

        let doomed = self.preorder(idx);
        let mut removed = Vec::with_capacity(doomed.len());
        for i in doomed {
            if let Some(slot) = self.slots.get_mut(i).and_then(Option::take) {
                self.index.remove(&slot.entry.id);
                self.free.push(i);
                removed.push(slot.entry.id);
            }
        }

        Ok(removed)
    }

    /// Nested snapshot of the whole forest, roots in order.
    pub fn to_nodes(&self) -> Vec<MenuNode> {
        self.roots
            .iter()
            .filter_map(|&idx| self.materialize(idx))
            .collect()
    }

    /// Rows of one root's tree in display order.
    ///
    /// With `expanded == false` only the root row is produced.
    pub fn flatten(&self, root_id: &str, expanded: bool) -> Vec<TreeRow> {
        let Some(&root) = self.index.get(root_id) else {
            return vec![];
        };

        let mut rows = Vec::new();
        let mut stack = vec![(root, 0usize, true)];
        while let Some((idx, depth, is_last)) = stack.pop() {
            let Some(slot) = self.slot(idx) else {
                continue;
            };
            rows.push(TreeRow {
                entry: slot.entry.clone(),
                depth,
                has_children: !slot.children.is_empty(),
                is_last,
            });
            if expanded {
                let last = slot.children.len().saturating_sub(1);
                for (i, &c) in slot.children.iter().enumerate().rev() {
                    stack.push((c, depth + 1, i == last));
                }
            }
        }
        rows
    }

    fn slot(&self, idx: usize) -> Option<&Slot> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn alloc(&mut self, slot: Slot) -> usize {
        let id = slot.entry.id.clone();
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(slot);
                idx
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        };
        self.index.insert(id, idx);
        idx
    }

    fn preorder(&self, idx: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![idx];
        while let Some(i) = stack.pop() {
            let Some(slot) = self.slot(i) else {
                continue;
            };
            out.push(i);
            stack.extend(slot.children.iter().rev());
        }
        out
    }

    fn materialize(&self, idx: usize) -> Option<MenuNode> {
        // Reverse pre-order visits every descendant before its ancestor.
        let mut built: HashMap<usize, MenuNode> = HashMap::new();
        for i in self.preorder(idx).into_iter().rev() {
            let slot = self.slot(i)?;
            let children = slot
                .children
                .iter()
                .filter_map(|c| built.remove(c))
                .collect();
            built.insert(i, slot.entry.to_node(children));
        }
        built.remove(&idx)
    }

    fn validate_subtree(&self, node: &MenuNode) -> Result<(), ForestError> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack: Vec<(&MenuNode, Option<&str>)> = vec![(node, None)];

        while let Some((n, container)) = stack.pop() {
            if n.id.is_empty() {
                return Err(ForestError::EmptyId);
            }
            if self.index.contains_key(&n.id) || !seen.insert(n.id.as_str()) {
                return Err(ForestError::DuplicateId(n.id.clone()));
            }
            let declared = n.parent_id.as_deref().filter(|p| !p.is_empty());
            if let (Some(container), Some(declared)) = (container, declared) {
                if declared != container {
                    return Err(ForestError::InconsistentHierarchy(format!(
                        "{} declares parent {declared} but is nested under {container}",
                        n.id
                    )));
                }
            }
            for child in &n.children {
                stack.push((child, Some(n.id.as_str())));
            }
        }

        Ok(())
    }

    fn attach(&mut self, node: MenuNode, parent: Option<usize>) {
        let mut stack = vec![(node, parent)];
        while let Some((node, parent)) = stack.pop() {
            let (mut entry, children) = MenuEntry::split(node);

            // Nested children may omit parentId; they belong to their container.
            // Roots never keep a parent id, not even an empty one.
            entry.parent_id = parent
                .and_then(|p| self.slot(p))
                .map(|s| s.entry.id.clone());

            let idx = self.alloc(Slot {
                entry,
                parent,
                children: Vec::new(),
            });
            match parent {
                Some(p) => {
                    if let Some(parent_slot) = self.slots.get_mut(p).and_then(Option::as_mut) {
                        parent_slot.children.push(idx);
                    }
                }
                None => self.roots.push(idx),
            }

            for child in children.into_iter().rev() {
                stack.push((child, Some(idx)));
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn node(id: &str, name: &str, parent: Option<&str>, children: Vec<MenuNode>) -> MenuNode {
        MenuNode {
            id: id.to_string(),
            name: name.to_string(),
            url: None,
            icon: None,
            order: 0,
            parent_id: parent.map(str::to_string),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            updated_at: "2024-01-01T00:00:00.000Z".to_string(),
            children,
        }
    }

    /// `[{1 Main [{2 About}]}]`
    pub(crate) fn main_about() -> Vec<MenuNode> {
        vec![node("1", "Main", None, vec![node("2", "About", Some("1"), vec![])])]
    }

    /// Two roots; the first three levels deep.
    fn two_menus() -> MenuForest {
        MenuForest::from_nodes(vec![
            node(
                "a",
                "Header",
                None,
                vec![
                    node(
                        "a1",
                        "Products",
                        Some("a"),
                        vec![
                            node("a1x", "Laptops", Some("a1"), vec![]),
                            node("a1y", "Phones", Some("a1"), vec![]),
                        ],
                    ),
                    node("a2", "Pricing", Some("a"), vec![]),
                ],
            ),
            node("b", "Footer", None, vec![node("b1", "Legal", Some("b"), vec![])]),
        ])
        .expect("fixture should load")
    }

    fn names(entries: Vec<&MenuEntry>) -> Vec<String> {
        entries.into_iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_from_nodes_roundtrips_nested_payload() {
        let forest = MenuForest::from_nodes(main_about()).expect("should load");
        assert_eq!(forest.len(), 2);
        assert_eq!(forest.to_nodes(), main_about());
    }

    #[test]
    fn test_from_nodes_skips_repeated_top_level_children() {
        let mut payload = main_about();
        payload.push(node("2", "About", Some("1"), vec![]));

        let forest = MenuForest::from_nodes(payload).expect("should load");
        assert_eq!(forest.len(), 2);
        assert_eq!(forest.roots().count(), 1);
        assert_eq!(forest.to_nodes(), main_about());
    }

    #[test]
    fn test_from_nodes_keeps_children_of_repeated_top_level_entries() {
        // 2 is nested under 1 one level deep, and repeated at top level with child 3.
        let payload = vec![
            node("1", "Main", None, vec![node("2", "About", Some("1"), vec![])]),
            node(
                "2",
                "About",
                Some("1"),
                vec![node("3", "Team", Some("2"), vec![node("4", "Jobs", None, vec![])])],
            ),
        ];

        let forest = MenuForest::from_nodes(payload).expect("should load");
        assert_eq!(forest.len(), 4);
        assert_eq!(names(forest.children("2")), vec!["Team"]);
        assert_eq!(forest.depth("4"), Ok(3));
        assert_eq!(forest.entry("4").and_then(|e| e.parent_id.as_deref()), Some("3"));
    }

    #[test]
    fn test_from_nodes_treats_empty_parent_id_as_root() {
        let payload = vec![
            node("1", "Main", Some(""), vec![node("2", "About", Some(""), vec![])]),
            node("5", "Footer", None, vec![]),
        ];

        let forest = MenuForest::from_nodes(payload).expect("should load");
        assert_eq!(forest.roots().count(), 2);
        assert!(forest.entry("1").is_some_and(|e| e.parent_id.is_none()));
        assert_eq!(forest.entry("2").and_then(|e| e.parent_id.as_deref()), Some("1"));
        assert_eq!(forest.depth("2"), Ok(1));
    }

    #[test]
    fn test_from_nodes_attaches_flat_entries_in_any_order() {
        let payload = vec![
            node("3", "Team", Some("2"), vec![]),
            node("2", "About", Some("1"), vec![]),
            node("1", "Main", None, vec![]),
        ];
        let forest = MenuForest::from_nodes(payload).expect("should load");
        assert_eq!(forest.depth("3"), Ok(2));
        assert_eq!(names(forest.children("1")), vec!["About"]);
    }

    #[test]
    fn test_from_nodes_rejects_unknown_parent() {
        let mut payload = main_about();
        payload.push(node("9", "Orphan", Some("ghost"), vec![]));
        assert_eq!(
            MenuForest::from_nodes(payload).unwrap_err(),
            ForestError::UnknownParent("ghost".to_string())
        );
    }

    #[test]
    fn test_from_nodes_rejects_duplicate_ids_across_roots() {
        let payload = vec![
            node("1", "Main", None, vec![node("x", "Shared", Some("1"), vec![])]),
            node("2", "Other", None, vec![node("x", "Shared", Some("2"), vec![])]),
        ];
        assert_eq!(
            MenuForest::from_nodes(payload).unwrap_err(),
            ForestError::DuplicateId("x".to_string())
        );
    }

    #[test]
    fn test_nested_child_without_parent_id_adopts_container() {
        let payload = vec![node("1", "Main", None, vec![node("2", "About", None, vec![])])];
        let forest = MenuForest::from_nodes(payload).expect("should load");
        assert_eq!(forest.entry("2").and_then(|e| e.parent_id.as_deref()), Some("1"));
        assert_eq!(forest.roots().count(), 1);
    }

    #[test]
    fn test_nested_child_with_foreign_parent_id_is_inconsistent() {
        let payload = vec![node("1", "Main", None, vec![node("2", "About", Some("7"), vec![])])];
        assert!(matches!(
            MenuForest::from_nodes(payload),
            Err(ForestError::InconsistentHierarchy(_))
        ));
    }

    #[test]
    fn test_find_nested_node_with_subtree() {
        let forest = two_menus();
        let found = forest.find("a1").expect("a1 should be found");
        assert_eq!(found.name, "Products");
        assert_eq!(
            found.children.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            vec!["a1x", "a1y"]
        );
        assert!(forest.find("nope").is_none());
    }

    #[test]
    fn test_depth_of_roots_and_children() {
        let forest = two_menus();
        for id in ["a", "a1", "a1x", "a1y", "a2", "b", "b1"] {
            let entry = forest.entry(id).expect("fixture id");
            let depth = forest.depth(id).expect("depth should resolve");
            match entry.parent_id.as_deref() {
                None => assert_eq!(depth, 0),
                Some(parent) => assert_eq!(depth, forest.depth(parent).unwrap() + 1),
            }
        }
        assert_eq!(forest.depth("a1x"), Ok(2));
    }

    #[test]
    fn test_depth_reports_dangling_parent() {
        let mut forest = MenuForest::from_nodes(main_about()).expect("should load");
        let idx = forest.index["2"];
        forest.slots[idx].as_mut().unwrap().entry.parent_id = Some("ghost".to_string());

        assert!(matches!(
            forest.depth("2"),
            Err(ForestError::InconsistentHierarchy(_))
        ));
    }

    #[test]
    fn test_depth_reports_parent_cycle() {
        let mut forest = MenuForest::from_nodes(main_about()).expect("should load");
        let idx = forest.index["1"];
        forest.slots[idx].as_mut().unwrap().entry.parent_id = Some("2".to_string());

        assert!(matches!(
            forest.depth("2"),
            Err(ForestError::InconsistentHierarchy(_))
        ));
    }

    #[test]
    fn test_depth_of_unknown_id() {
        let forest = two_menus();
        assert_eq!(forest.depth("zz"), Err(ForestError::NotFound("zz".to_string())));
    }

    #[test]
    fn test_insert_appends_as_last_child() {
        let mut forest = MenuForest::from_nodes(main_about()).expect("should load");
        forest
            .insert(node("3", "Contact", Some("1"), vec![]))
            .expect("insert should succeed");
        assert_eq!(names(forest.children("1")), vec!["About", "Contact"]);
        assert_eq!(forest.depth("3"), Ok(1));
    }

    #[test]
    fn test_insert_root_appends_after_existing_roots() {
        let mut forest = two_menus();
        forest
            .insert(node("c", "Sidebar", None, vec![]))
            .expect("insert should succeed");
        assert_eq!(
            forest.roots().map(|e| e.id.as_str()).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_insert_failures_leave_forest_untouched() {
        let mut forest = two_menus();
        let before = forest.to_nodes();

        assert_eq!(
            forest.insert(node("n", "New", Some("ghost"), vec![])),
            Err(ForestError::UnknownParent("ghost".to_string()))
        );
        assert_eq!(
            forest.insert(node("a2", "Again", Some("a"), vec![])),
            Err(ForestError::DuplicateId("a2".to_string()))
        );
        assert_eq!(
            forest.insert(node("", "Unsaved", Some("a"), vec![])),
            Err(ForestError::EmptyId)
        );
        // Duplicate hidden deep in the carried subtree.
        assert_eq!(
            forest.insert(node(
                "n",
                "New",
                Some("a"),
                vec![node("b1", "Clash", Some("n"), vec![])]
            )),
            Err(ForestError::DuplicateId("b1".to_string()))
        );

        assert_eq!(forest.to_nodes(), before);
    }

    #[test]
    fn test_rename_changes_only_name_and_timestamp() {
        let mut forest = two_menus();
        let before = forest.find("a1").expect("a1");

        forest
            .rename("a1", "Catalog", Some("2024-02-02T00:00:00.000Z"))
            .expect("rename should succeed");

        let after = forest.find("a1").expect("a1");
        assert_eq!(after.name, "Catalog");
        assert_eq!(after.updated_at, "2024-02-02T00:00:00.000Z");
        assert_eq!(
            MenuNode {
                name: before.name.clone(),
                updated_at: before.updated_at.clone(),
                ..after
            },
            before
        );
        assert_eq!(names(forest.children("a")), vec!["Catalog", "Pricing"]);
    }

    #[test]
    fn test_rename_root_without_timestamp_keeps_updated_at() {
        let mut forest = two_menus();
        forest.rename("b", "Bottom", None).expect("rename root");
        let b = forest.entry("b").expect("b");
        assert_eq!(b.name, "Bottom");
        assert_eq!(b.updated_at, "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_remove_cascades_to_descendants() {
        let mut forest = two_menus();
        let subtree = forest.subtree_ids("a1").expect("a1 subtree");
        assert_eq!(subtree, vec!["a1", "a1x", "a1y"]);

        let removed = forest.remove("a1").expect("remove should succeed");
        assert_eq!(removed, subtree);
        for id in &subtree {
            assert!(forest.find(id).is_none());
            assert!(!forest.contains(id));
        }
        assert_eq!(names(forest.children("a")), vec!["Pricing"]);
        assert_eq!(forest.len(), 4);
    }

    #[test]
    fn test_remove_last_root_empties_forest() {
        let mut forest = MenuForest::from_nodes(main_about()).expect("should load");
        forest
            .insert(node("3", "Contact", Some("1"), vec![]))
            .expect("insert");
        forest.remove("1").expect("remove root");
        assert!(forest.is_empty());
        assert!(forest.to_nodes().is_empty());
        assert!(forest.first_root_id().is_none());
    }

    #[test]
    fn test_freed_slots_are_reused_without_leaking_structure() {
        let mut forest = two_menus();
        forest.remove("a1").expect("remove");
        forest
            .insert(node("n1", "Docs", Some("b"), vec![node("n2", "API", Some("n1"), vec![])]))
            .expect("insert into freed slots");

        assert_eq!(names(forest.children("b")), vec!["Legal", "Docs"]);
        assert_eq!(names(forest.children("n1")), vec!["API"]);
        assert!(forest.children("n2").is_empty());
        assert_eq!(forest.depth("n2"), Ok(2));
    }

    #[test]
    fn test_parent_name_labels() {
        let forest = two_menus();
        assert_eq!(forest.parent_name("a1x"), "Products");
        assert_eq!(forest.parent_name("a"), ROOT_LABEL);
        assert_eq!(forest.parent_name("missing"), ROOT_LABEL);
    }

    #[test]
    fn test_flatten_rows_in_display_order() {
        let forest = two_menus();
        let rows = forest.flatten("a", true);
        let got: Vec<(&str, usize, bool, bool)> = rows
            .iter()
            .map(|r| (r.entry.id.as_str(), r.depth, r.has_children, r.is_last))
            .collect();
        assert_eq!(
            got,
            vec![
                ("a", 0, true, true),
                ("a1", 1, true, false),
                ("a1x", 2, false, false),
                ("a1y", 2, false, true),
                ("a2", 1, false, true),
            ]
        );
    }

    #[test]
    fn test_flatten_collapsed_shows_root_only() {
        let forest = two_menus();
        let rows = forest.flatten("b", false);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].has_children);
        assert!(forest.flatten("missing", true).is_empty());
    }
}
