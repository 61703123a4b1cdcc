//! FILENAME: tree-engine/src/view.rs
//! PURPOSE: Flattened projections of the tree store.
//! CONTEXT: Turns the arena into ordered row lists: `flatten` walks the
//! ENTIRE fetched tree (export semantics — expansion state is ignored on
//! purpose), `visible` descends only into expanded nodes (what the table
//! shows on screen). Both emit parents before children, depth-first.

use serde::{Deserialize, Serialize};

use model::PeriodColumn;

use crate::store::{NodeIdx, TreeStore};

/// One row of a flattened view: tree position plus the projected cells,
/// one slot per visible column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRow {
    pub id: model::RowId,

    /// Depth below the root level (roots are 0).
    pub level: usize,

    pub name: String,

    /// Raw numeric cells in visible-column order; `None` where the row has
    /// no value for that column.
    pub values: Vec<Option<f64>>,
}

/// Flattens the whole fetched tree in depth-first pre-order, regardless of
/// which rows are currently expanded. Exports always cover everything that
/// has been fetched, not just what is on screen.
pub fn flatten(store: &TreeStore, columns: &[PeriodColumn]) -> Vec<FlatRow> {
    let mut out = Vec::with_capacity(store.len());
    for &root in store.roots() {
        walk(store, root, columns, false, &mut out);
    }
    out
}

/// Flattens only the visible part of the tree: children are emitted only
/// under rows that are currently expanded.
pub fn visible(store: &TreeStore, columns: &[PeriodColumn]) -> Vec<FlatRow> {
    let mut out = Vec::new();
    for &root in store.roots() {
        walk(store, root, columns, true, &mut out);
    }
    out
}

fn walk(
    store: &TreeStore,
    idx: NodeIdx,
    columns: &[PeriodColumn],
    expansion_gated: bool,
    out: &mut Vec<FlatRow>,
) {
    let node = store.node(idx);
    out.push(FlatRow {
        id: node.row.id,
        level: node.depth,
        name: node.row.text.clone(),
        values: columns.iter().map(|c| node.row.value(&c.key)).collect(),
    });

    if expansion_gated && !store.is_expanded(node.row.id) {
        return;
    }

    if let Some(children) = &node.children {
        for &child in children {
            walk(store, child, columns, expansion_gated, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{derive_columns, TreeRow};

    fn sample_store() -> (TreeStore, Vec<PeriodColumn>) {
        let mut root_a = TreeRow::new(1, "Region A", false);
        root_a.set_value("2020 г.", 100.0);
        let mut root_b = TreeRow::new(4, "Region B", true);
        root_b.set_value("2020 г.", 7.0);

        let mut store = TreeStore::new();
        store.set_root(vec![root_a, root_b]);

        let mut child = TreeRow::new(2, "District A1", false);
        child.set_value("2020 г.", 40.0);
        store.begin_fetch(1);
        store.merge_children(1, vec![child]);

        let mut grandchild = TreeRow::new(3, "Village A1a", true);
        grandchild.set_value("2021 г.", 5.0);
        store.begin_fetch(2);
        store.merge_children(2, vec![grandchild]);

        let rows: Vec<TreeRow> = (0..store.len()).map(|i| store.node(i).row.clone()).collect();
        let columns = derive_columns(&rows);
        (store, columns)
    }

    #[test]
    fn flatten_is_preorder_and_ignores_expansion() {
        let (store, columns) = sample_store();

        // Nothing is expanded, yet every fetched node is emitted.
        let flat = flatten(&store, &columns);
        assert_eq!(flat.len(), store.len());

        let names: Vec<&str> = flat.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Region A", "District A1", "Village A1a", "Region B"]
        );
        let levels: Vec<usize> = flat.iter().map(|r| r.level).collect();
        assert_eq!(levels, vec![0, 1, 2, 0]);
    }

    #[test]
    fn flatten_projects_visible_columns_with_gaps() {
        let (store, columns) = sample_store();
        let keys: Vec<&str> = columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["2020 г.", "2021 г."]);

        let flat = flatten(&store, &columns);
        // Region A has 2020 but not 2021.
        assert_eq!(flat[0].values, vec![Some(100.0), None]);
        // Village A1a has only 2021.
        assert_eq!(flat[2].values, vec![None, Some(5.0)]);
    }

    #[test]
    fn visible_respects_expansion() {
        let (mut store, columns) = sample_store();

        let names = |store: &TreeStore| -> Vec<String> {
            visible(store, &columns).into_iter().map(|r| r.name).collect()
        };

        assert_eq!(names(&store), vec!["Region A", "Region B"]);

        store.toggle(1);
        assert_eq!(names(&store), vec!["Region A", "District A1", "Region B"]);

        store.toggle(2);
        assert_eq!(
            names(&store),
            vec!["Region A", "District A1", "Village A1a", "Region B"]
        );

        // Collapsing the middle hides its subtree but keeps the data.
        store.toggle(2);
        assert_eq!(names(&store), vec!["Region A", "District A1", "Region B"]);
        assert_eq!(flatten(&store, &columns).len(), 4);
    }
}
