//! The synthetic three-level tree behind the wheel
//!
//! A root with exactly one branch per [`Category`] (in [`Category::ALL`]
//! order), each branch holding the items of that category as leaves in
//! input order. Items with an unknown category symbol are left out.

use tracing::trace;

use super::{Category, Item};

/// Index of a node in a [`Hierarchy`]
pub type NodeIndex = usize;

/// Index of the root node
pub const ROOT: NodeIndex = 0;

/// What a hierarchy node stands for
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Root,
    Branch(Category),
    Leaf { item_id: String, category: Category },
}

/// A node of the hierarchy with its polar position
///
/// `angle` is in degrees, clockwise from 12 o'clock; `radius` is the
/// distance from the centre. Both are zero until a layout runs.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub kind: NodeKind,
    pub parent: Option<NodeIndex>,
    pub children: Vec<NodeIndex>,
    pub depth: usize,
    pub angle: f64,
    pub radius: f64,
}

impl TreeNode {
    fn new(kind: NodeKind, parent: Option<NodeIndex>, depth: usize) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            depth,
            angle: 0.0,
            radius: 0.0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Item id for leaves
    pub fn item_id(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf { item_id, .. } => Some(item_id),
            _ => None,
        }
    }
}

/// Arena-backed root → category → item tree
#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    nodes: Vec<TreeNode>,
}

impl Hierarchy {
    /// Build the tree from items in their given order
    pub fn from_items(items: &[Item]) -> Self {
        let mut nodes = Vec::with_capacity(items.len() + Category::ALL.len() + 1);
        nodes.push(TreeNode::new(NodeKind::Root, None, 0));

        for category in Category::ALL {
            let branch = nodes.len();
            nodes.push(TreeNode::new(NodeKind::Branch(category), Some(ROOT), 1));
            nodes[ROOT].children.push(branch);
        }

        let mut skipped = 0usize;
        for item in items {
            let Some(category) = item.category() else {
                skipped += 1;
                continue;
            };
            let branch = Self::branch_index(category);
            let leaf = nodes.len();
            nodes.push(TreeNode::new(
                NodeKind::Leaf {
                    item_id: item.id.clone(),
                    category,
                },
                Some(branch),
                2,
            ));
            nodes[branch].children.push(leaf);
        }

        trace!(
            leaf_count = nodes.len() - Category::ALL.len() - 1,
            skipped, "Built category hierarchy"
        );
        Self { nodes }
    }

    /// Node index of a category branch
    pub fn branch_index(category: Category) -> NodeIndex {
        1 + category.index()
    }

    pub fn node(&self, index: NodeIndex) -> &TreeNode {
        &self.nodes[index]
    }

    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> &mut TreeNode {
        &mut self.nodes[index]
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Leaves in layout order: branch by branch, items in input order
    pub fn leaves(&self) -> Vec<NodeIndex> {
        self.nodes[ROOT]
            .children
            .iter()
            .flat_map(|&branch| self.nodes[branch].children.iter().copied())
            .collect()
    }

    /// Height of the tree: 2 when any leaf exists, 1 otherwise
    pub fn height(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Chain of nodes from `index` up to the root, inclusive
    pub fn ancestors(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut chain = vec![index];
        let mut current = index;
        while let Some(parent) = self.nodes[current].parent {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Deepest node that is an ancestor of both `a` and `b`
    pub fn common_ancestor(&self, a: NodeIndex, b: NodeIndex) -> NodeIndex {
        let from_b = self.ancestors(b);
        self.ancestors(a)
            .into_iter()
            .find(|candidate| from_b.contains(candidate))
            .unwrap_or(ROOT)
    }

    /// Unique tree path from `a` to `b` through their common ancestor
    pub fn path(&self, a: NodeIndex, b: NodeIndex) -> Vec<NodeIndex> {
        let lca = self.common_ancestor(a, b);

        let mut path: Vec<NodeIndex> = self
            .ancestors(a)
            .into_iter()
            .take_while(|&n| n != lca)
            .collect();
        path.push(lca);

        let mut down: Vec<NodeIndex> = self
            .ancestors(b)
            .into_iter()
            .take_while(|&n| n != lca)
            .collect();
        down.reverse();
        path.extend(down);
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Item> {
        vec![
            Item::new("Rose", "Rose", Category::Spring),
            Item::new("Oud", "Oud", Category::Winter),
            Item::new("Neroli", "Neroli", Category::Spring),
            Item::with_symbol("Ghost", "Ghost", "??"),
        ]
    }

    #[test]
    fn test_root_has_four_branches() {
        let tree = Hierarchy::from_items(&[]);
        assert_eq!(tree.node(ROOT).children.len(), 4);
        for category in Category::ALL {
            let branch = tree.node(Hierarchy::branch_index(category));
            assert_eq!(branch.kind, NodeKind::Branch(category));
            assert!(branch.children.is_empty());
        }
        assert!(tree.leaves().is_empty());
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn test_leaves_grouped_by_branch_in_input_order() {
        let tree = Hierarchy::from_items(&items());
        let ids: Vec<_> = tree
            .leaves()
            .into_iter()
            .filter_map(|i| tree.node(i).item_id())
            .collect();
        assert_eq!(ids, vec!["Rose", "Neroli", "Oud"]);
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn test_unknown_category_excluded() {
        let tree = Hierarchy::from_items(&items());
        assert!(tree.nodes().iter().all(|n| n.item_id() != Some("Ghost")));
    }

    fn leaf(tree: &Hierarchy, id: &str) -> NodeIndex {
        tree.leaves()
            .into_iter()
            .find(|&i| tree.node(i).item_id() == Some(id))
            .unwrap()
    }

    #[test]
    fn test_path_within_branch() {
        let tree = Hierarchy::from_items(&items());
        let (rose, neroli) = (leaf(&tree, "Rose"), leaf(&tree, "Neroli"));
        let path = tree.path(rose, neroli);
        assert_eq!(
            path,
            vec![rose, Hierarchy::branch_index(Category::Spring), neroli]
        );
    }

    #[test]
    fn test_path_across_branches_goes_through_root() {
        let tree = Hierarchy::from_items(&items());
        let (rose, oud) = (leaf(&tree, "Rose"), leaf(&tree, "Oud"));
        let path = tree.path(rose, oud);
        assert_eq!(
            path,
            vec![
                rose,
                Hierarchy::branch_index(Category::Spring),
                ROOT,
                Hierarchy::branch_index(Category::Winter),
                oud
            ]
        );
    }

    #[test]
    fn test_path_to_self() {
        let tree = Hierarchy::from_items(&items());
        let rose = leaf(&tree, "Rose");
        assert_eq!(tree.path(rose, rose), vec![rose]);
    }
}
