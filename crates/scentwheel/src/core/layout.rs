//! Radial cluster layout
//!
//! Places every leaf of the category hierarchy on the outer ring and every
//! inner node at the mean angle of its children. Consecutive leaves in the
//! same branch are one unit apart, leaves across a branch boundary two
//! units, which leaves a visible gap between the seasons.

use anyhow::Result;
use std::collections::HashMap;
use std::f64::consts::PI;
use tracing::{info, span, trace, Level};

use super::bundle::Point;
use super::hierarchy::{Hierarchy, NodeIndex, ROOT};
use super::{Catalog, Database, DiagramError, Item};

/// Full turn in layout units
pub const FULL_TURN: f64 = 360.0;

/// Core trait for layout algorithms
///
/// Each chart kind can arrange the same database differently; the output
/// type carries whatever positions the renderer needs.
pub trait LayoutAlgorithm<D: Database>: Send + Sync {
    /// The output type of this layout algorithm
    type Output;

    /// Arrange elements in the database using this layout algorithm
    fn layout(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this layout algorithm
    fn name(&self) -> &'static str;

    /// Get the version of this layout algorithm
    fn version(&self) -> &'static str;
}

/// Positioned hierarchy with an id → leaf lookup
#[derive(Debug, Clone, PartialEq)]
pub struct RadialLayout {
    tree: Hierarchy,
    leaves: HashMap<String, NodeIndex>,
    radius: f64,
}

impl RadialLayout {
    pub fn tree(&self) -> &Hierarchy {
        &self.tree
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Leaf node index for an item id
    pub fn leaf(&self, id: &str) -> Option<NodeIndex> {
        self.leaves.get(id).copied()
    }

    /// `(angle, radius)` of an item, angle in degrees
    pub fn position(&self, id: &str) -> Option<(f64, f64)> {
        self.leaf(id).map(|i| {
            let node = self.tree.node(i);
            (node.angle, node.radius)
        })
    }

    /// Number of positioned leaves
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Cartesian point of a node relative to the centre
    pub fn point(&self, index: NodeIndex) -> Point {
        let node = self.tree.node(index);
        Point::polar(node.angle, node.radius)
    }

    /// Control points of the tree path between two leaves
    pub fn route(&self, a: NodeIndex, b: NodeIndex) -> Vec<Point> {
        self.tree
            .path(a, b)
            .into_iter()
            .map(|i| self.point(i))
            .collect()
    }
}

/// Lay out `items` on a wheel of the given outer radius
///
/// ```rust
/// use scentwheel::{compute_layout, Category, Item};
///
/// let items = vec![
///     Item::new("Rose", "Rose", Category::Spring),
///     Item::new("Oud", "Oud", Category::Winter),
/// ];
/// let layout = compute_layout(&items, 300.0);
/// let (angle, radius) = layout.position("Rose").unwrap();
/// assert!(angle >= 0.0 && angle < 360.0);
/// assert_eq!(radius, 300.0);
/// ```
pub fn compute_layout(items: &[Item], radius: f64) -> RadialLayout {
    let mut tree = Hierarchy::from_items(items);
    let leaves = tree.leaves();

    if let (Some(&first), Some(&last)) = (leaves.first(), leaves.last()) {
        let mut x = 0.0;
        let mut previous: Option<NodeIndex> = None;
        for &leaf in &leaves {
            if let Some(prev) = previous {
                x += separation(&tree, leaf, prev);
            }
            tree.node_mut(leaf).angle = x;
            previous = Some(leaf);
        }

        let x0 = tree.node(first).angle - separation(&tree, first, last) / 2.0;
        let x1 = tree.node(last).angle + separation(&tree, last, first) / 2.0;
        let span = x1 - x0;

        for &leaf in &leaves {
            let node = tree.node_mut(leaf);
            node.angle = (node.angle - x0) / span * FULL_TURN;
        }
    }

    let height = tree.height().max(1) as f64;
    for index in (0..tree.len()).rev() {
        let children = tree.node(index).children.clone();
        if !children.is_empty() {
            let mean = children.iter().map(|&c| tree.node(c).angle).sum::<f64>()
                / children.len() as f64;
            tree.node_mut(index).angle = mean;
        }
        let node = tree.node_mut(index);
        node.radius = if node.is_leaf() {
            radius
        } else {
            node.depth as f64 / height * radius
        };
    }
    tree.node_mut(ROOT).radius = 0.0;

    let lookup: HashMap<String, NodeIndex> = leaves
        .iter()
        .filter_map(|&i| tree.node(i).item_id().map(|id| (id.to_string(), i)))
        .collect();

    trace!(leaf_count = lookup.len(), radius, "Computed radial cluster layout");

    RadialLayout {
        tree,
        leaves: lookup,
        radius,
    }
}

/// Gap between two neighbouring leaves: 1 within a branch, 2 across
fn separation(tree: &Hierarchy, a: NodeIndex, b: NodeIndex) -> f64 {
    if tree.node(a).parent == tree.node(b).parent {
        1.0
    } else {
        2.0
    }
}

/// Convert degrees to radians
pub fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Cluster layout over the catalog at a fixed radius
#[derive(Debug, Clone, Copy)]
pub struct RadialClusterLayout {
    radius: f64,
}

impl RadialClusterLayout {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl LayoutAlgorithm<Catalog> for RadialClusterLayout {
    type Output = RadialLayout;

    fn layout(&self, database: &Catalog) -> Result<Self::Output> {
        let layout_span = span!(
            Level::INFO,
            "layout_wheel",
            item_count = database.node_count(),
            radius = self.radius
        );
        let _enter = layout_span.enter();

        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(
                DiagramError::layout_error(format!("invalid radius {}", self.radius)).into(),
            );
        }

        let layout = compute_layout(database.items(), self.radius);

        info!(
            leaf_count = layout.leaf_count(),
            excluded = database.node_count() - layout.leaf_count(),
            "Wheel layout completed"
        );
        Ok(layout)
    }

    fn name(&self) -> &'static str {
        "radial-cluster"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}
