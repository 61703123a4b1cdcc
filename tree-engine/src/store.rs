//! FILENAME: tree-engine/src/store.rs
//! PURPOSE: The lazily-populated drill-down tree store.
//! CONTEXT: Holds every row fetched so far as an arena of nodes linked by
//! index, plus the expansion and in-flight state. The store never fetches
//! by itself: `toggle` reports when a child fetch is needed, the caller
//! performs it and hands the result to `merge_children`. Fetched children
//! are an append-only cache; collapsing a row never evicts them.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use model::{RowId, TreeRow};

/// Index of a node inside the store's arena.
pub type NodeIdx = usize;

/// A materialized tree node: the fetched row plus its position in the tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub row: TreeRow,

    /// Depth below the root level (roots are 0).
    pub depth: usize,

    pub parent: Option<NodeIdx>,

    /// `None` until the first child fetch succeeds; `Some(empty)` when the
    /// backend answered with no children (never refetched).
    pub children: Option<SmallVec<[NodeIdx; 8]>>,
}

impl TreeNode {
    fn new(row: TreeRow, depth: usize, parent: Option<NodeIdx>) -> Self {
        TreeNode {
            row,
            depth,
            parent,
            children: None,
        }
    }
}

/// Result of toggling a row's expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Row is now expanded; its children are already cached (or it is a
    /// leaf, or a fetch for it is already in flight) — no fetch needed.
    Expanded,
    /// Row is now expanded and the caller must fetch its children.
    ExpandedNeedsFetch,
    /// Row is now collapsed. Cached children are kept.
    Collapsed,
    /// No row with that id has been fetched.
    NotFound,
}

/// Result of merging a fetched child level into the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Children were attached under the parent.
    Attached(usize),
    /// The parent already had children; nothing was changed.
    AlreadyLoaded,
    /// The parent is not in the tree (stale response after a root reload).
    ParentNotFound,
}

/// The drill-down tree state for one result view. Lives and dies with its
/// owning view; it is never persisted.
#[derive(Debug, Clone, Default)]
pub struct TreeStore {
    nodes: Vec<TreeNode>,
    roots: Vec<NodeIdx>,

    /// Row id -> arena index. First registration wins when the backend
    /// violates the id-uniqueness assumption.
    index: FxHashMap<RowId, NodeIdx>,

    /// Ids whose subtrees are currently unfolded in the view.
    expanded: FxHashSet<RowId>,

    /// Ids with an outstanding child fetch; dedups concurrent expands.
    in_flight: FxHashSet<RowId>,
}

impl TreeStore {
    pub fn new() -> Self {
        TreeStore::default()
    }

    /// Replaces the whole tree with a fresh set of root rows.
    /// All expansion and in-flight state is discarded.
    pub fn set_root(&mut self, rows: Vec<TreeRow>) {
        self.nodes.clear();
        self.roots.clear();
        self.index.clear();
        self.expanded.clear();
        self.in_flight.clear();

        for row in rows {
            let idx = self.push_node(TreeNode::new(row, 0, None));
            self.roots.push(idx);
        }
    }

    fn push_node(&mut self, node: TreeNode) -> NodeIdx {
        let idx = self.nodes.len();
        self.index.entry(node.row.id).or_insert(idx);
        self.nodes.push(node);
        idx
    }

    /// Toggles expansion of a row.
    ///
    /// Expanding a non-leaf row whose children were never fetched marks the
    /// row in flight and asks the caller to fetch. Leaves, rows with cached
    /// children and rows already in flight expand without a fetch.
    pub fn toggle(&mut self, id: RowId) -> ToggleOutcome {
        let idx = match self.index.get(&id) {
            Some(&idx) => idx,
            None => return ToggleOutcome::NotFound,
        };

        if self.expanded.remove(&id) {
            return ToggleOutcome::Collapsed;
        }
        self.expanded.insert(id);

        let node = &self.nodes[idx];
        if !node.row.leaf && node.children.is_none() && !self.in_flight.contains(&id) {
            self.in_flight.insert(id);
            ToggleOutcome::ExpandedNeedsFetch
        } else {
            ToggleOutcome::Expanded
        }
    }

    /// Whether expanding this row right now would require a fetch.
    pub fn needs_fetch(&self, id: RowId) -> bool {
        match self.index.get(&id) {
            Some(&idx) => {
                let node = &self.nodes[idx];
                !node.row.leaf && node.children.is_none() && !self.in_flight.contains(&id)
            }
            None => false,
        }
    }

    /// Marks a child fetch as started without toggling expansion. Used by
    /// callers that prefetch levels (e.g. drill-to-depth, export warmup).
    pub fn begin_fetch(&mut self, id: RowId) -> bool {
        if self.needs_fetch(id) {
            self.in_flight.insert(id);
            true
        } else {
            false
        }
    }

    /// Clears the in-flight flag after a failed fetch so a later expand may
    /// try again. Tree contents are left unchanged.
    pub fn abort_fetch(&mut self, id: RowId) {
        self.in_flight.remove(&id);
    }

    /// Attaches one fetched child level under `parent_id`.
    ///
    /// Idempotent: a parent that already has children (even an empty list)
    /// is left untouched, so a duplicate response can never duplicate rows.
    /// An empty `rows` list still marks the parent as loaded — the backend
    /// said there is nothing below, and we do not retry.
    pub fn merge_children(&mut self, parent_id: RowId, rows: Vec<TreeRow>) -> MergeOutcome {
        self.in_flight.remove(&parent_id);

        let parent_idx = match self.index.get(&parent_id) {
            Some(&idx) => idx,
            None => return MergeOutcome::ParentNotFound,
        };

        if self.nodes[parent_idx].children.is_some() {
            return MergeOutcome::AlreadyLoaded;
        }

        let depth = self.nodes[parent_idx].depth + 1;
        let mut children: SmallVec<[NodeIdx; 8]> = SmallVec::new();
        let count = rows.len();

        for row in rows {
            let idx = self.push_node(TreeNode::new(row, depth, Some(parent_idx)));
            children.push(idx);
        }

        self.nodes[parent_idx].children = Some(children);
        MergeOutcome::Attached(count)
    }

    pub fn is_expanded(&self, id: RowId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn is_in_flight(&self, id: RowId) -> bool {
        self.in_flight.contains(&id)
    }

    /// Total number of fetched nodes (roots plus all fetched descendants).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: NodeIdx) -> &TreeNode {
        &self.nodes[idx]
    }

    pub fn node_by_id(&self, id: RowId) -> Option<&TreeNode> {
        self.index.get(&id).map(|&idx| &self.nodes[idx])
    }

    pub fn roots(&self) -> &[NodeIdx] {
        &self.roots
    }

    /// Non-leaf node ids at the given depth whose children are unfetched
    /// and not in flight. Drives level-by-level drill-down.
    pub fn unfetched_at_depth(&self, depth: usize) -> Vec<RowId> {
        self.nodes
            .iter()
            .filter(|n| {
                n.depth == depth
                    && !n.row.leaf
                    && n.children.is_none()
                    && !self.in_flight.contains(&n.row.id)
            })
            .map(|n| n.row.id)
            .collect()
    }
}
