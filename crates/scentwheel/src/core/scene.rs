//! Retained draw-state of the wheel
//!
//! A [`Scene`] is the complete list of drawable primitives produced by one
//! full redraw: one label per laid-out item and one curve per admitted
//! relation. Renderers only read it. The only mutation after construction
//! is the emphasis patch driven by the selection.

use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, span, trace, Level};
use unicode_width::UnicodeWidthStr;

use super::bundle::{bundle_curve, PathCommand, Point, BUNDLE_TENSION};
use super::layout::{compute_layout, to_radians, RadialLayout};
use super::viewport::{Viewport, LABEL_OFFSET};
use super::{Catalog, Category, Database, Relation};

/// Perpendicular slack around a label when hit-testing, in pixels
pub const HIT_SLACK: f64 = 2.0;

/// Rough advance of one label cell relative to the font size
const GLYPH_ASPECT: f64 = 0.6;

/// Which end of the label sits at its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    End,
}

impl fmt::Display for TextAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextAnchor::Start => write!(f, "start"),
            TextAnchor::End => write!(f, "end"),
        }
    }
}

/// A labeled point on the outer ring
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPrimitive {
    pub id: String,
    pub name: String,
    pub category: Category,
    /// Degrees clockwise from 12 o'clock, in [0, 360)
    pub angle: f64,
    pub radius: f64,
    /// In the active category; only active labels react to pointer events
    pub active: bool,
    pub font_size: u32,
}

impl LabelPrimitive {
    /// Labels on the left half are turned half a revolution to stay upright
    pub fn is_flipped(&self) -> bool {
        self.angle >= 180.0
    }

    pub fn anchor(&self) -> TextAnchor {
        if self.is_flipped() {
            TextAnchor::End
        } else {
            TextAnchor::Start
        }
    }

    /// Rotation of the label ray in degrees (0 = pointing right)
    pub fn rotation(&self) -> f64 {
        self.angle - 90.0
    }

    /// Distance of the label anchor from the centre
    pub fn label_radius(&self) -> f64 {
        self.radius + LABEL_OFFSET
    }

    /// The leaf position on the ring
    pub fn leaf_point(&self) -> Point {
        Point::polar(self.angle, self.radius)
    }

    /// Where the label text starts (or ends, when flipped)
    pub fn anchor_point(&self) -> Point {
        Point::polar(self.angle, self.label_radius())
    }

    /// Estimated rendered width of the label in pixels
    pub fn text_extent(&self) -> f64 {
        UnicodeWidthStr::width(self.id.as_str()) as f64 * self.font_size as f64 * GLYPH_ASPECT
    }

    /// Baseline distance from `point` (relative to the centre) when it lies
    /// on the label
    fn distance_to(&self, point: Point) -> Option<f64> {
        let theta = to_radians(self.rotation());
        let (dx, dy) = (theta.cos(), theta.sin());
        let along = point.x * dx + point.y * dy;
        let across = (point.x * dy - point.y * dx).abs();

        let start = self.label_radius() - HIT_SLACK;
        let end = self.label_radius() + self.text_extent() + HIT_SLACK;
        let half_height = self.font_size as f64 / 2.0 + HIT_SLACK;

        (along >= start && along <= end && across <= half_height).then_some(across)
    }
}

/// Stable identifier of a curve: the index of its relation in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurveId(pub usize);

/// A bundled link between two labels
#[derive(Debug, Clone, PartialEq)]
pub struct CurvePrimitive {
    pub id: CurveId,
    pub ids: [String; 2],
    pub commands: Vec<PathCommand>,
    pub emphasized: bool,
}

impl CurvePrimitive {
    /// Returns true if either endpoint is `id`
    pub fn involves(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }
}

/// Everything one full redraw produced
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    viewport: Viewport,
    radius: f64,
    category: Category,
    labels: Vec<LabelPrimitive>,
    curves: Vec<CurvePrimitive>,
    curve_index: HashMap<CurveId, usize>,
    skipped_relations: usize,
}

impl Scene {
    /// Lay out the catalog and build all primitives for `category`
    ///
    /// Relations of other categories are not considered; relations of the
    /// active category with a missing or uncategorised endpoint are skipped.
    pub fn build(catalog: &Catalog, category: Category, viewport: Viewport) -> Self {
        let radius = viewport.radius();
        let build_span = span!(
            Level::INFO,
            "build_scene",
            category = %category,
            width = viewport.width,
            height = viewport.height,
            radius
        );
        let _enter = build_span.enter();

        let layout = compute_layout(catalog.items(), radius);
        let tree = layout.tree();
        let font_size = viewport.font_size();

        let labels: Vec<LabelPrimitive> = tree
            .leaves()
            .into_iter()
            .filter_map(|index| {
                let node = tree.node(index);
                let item = catalog.get_node(node.item_id()?)?;
                let item_category = item.category()?;
                Some(LabelPrimitive {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    category: item_category,
                    angle: node.angle,
                    radius: node.radius,
                    active: item_category == category,
                    font_size,
                })
            })
            .collect();

        let mut curves = Vec::new();
        let mut skipped_relations = 0usize;
        for (index, relation) in catalog.relations().iter().enumerate() {
            if !relation.is_in(category) {
                continue;
            }
            match Self::route(&layout, relation) {
                Some(commands) => curves.push(CurvePrimitive {
                    id: CurveId(index),
                    ids: relation.ids.clone(),
                    commands,
                    emphasized: false,
                }),
                None => {
                    skipped_relations += 1;
                    debug!(
                        source = relation.source(),
                        target = relation.target(),
                        "Skipping relation with unknown endpoint"
                    );
                }
            }
        }

        let curve_index = curves
            .iter()
            .enumerate()
            .map(|(position, curve)| (curve.id, position))
            .collect();

        info!(
            label_count = labels.len(),
            curve_count = curves.len(),
            skipped_relations,
            "Scene built"
        );

        Self {
            viewport,
            radius,
            category,
            labels,
            curves,
            curve_index,
            skipped_relations,
        }
    }

    fn route(layout: &RadialLayout, relation: &Relation) -> Option<Vec<PathCommand>> {
        let source = layout.leaf(relation.source())?;
        let target = layout.leaf(relation.target())?;
        Some(bundle_curve(&layout.route(source, target), BUNDLE_TENSION))
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn labels(&self) -> &[LabelPrimitive] {
        &self.labels
    }

    pub fn curves(&self) -> &[CurvePrimitive] {
        &self.curves
    }

    /// Relations of the active category that could not be drawn
    pub fn skipped_relations(&self) -> usize {
        self.skipped_relations
    }

    pub fn label(&self, id: &str) -> Option<&LabelPrimitive> {
        self.labels.iter().find(|label| label.id == id)
    }

    pub fn curve(&self, id: CurveId) -> Option<&CurvePrimitive> {
        self.curve_index.get(&id).map(|&i| &self.curves[i])
    }

    /// Set the emphasis of a single curve; returns false for unknown ids
    pub fn set_emphasis(&mut self, id: CurveId, emphasized: bool) -> bool {
        match self.curve_index.get(&id) {
            Some(&i) => {
                self.curves[i].emphasized = emphasized;
                true
            }
            None => false,
        }
    }

    /// Emphasize exactly the curves touching `selection`
    ///
    /// Only the emphasis flags change. Returns the number of emphasized
    /// curves.
    pub fn apply_selection(&mut self, selection: Option<&str>) -> usize {
        let mut emphasized = 0;
        for curve in &mut self.curves {
            curve.emphasized = selection.is_some_and(|s| curve.involves(s));
            emphasized += usize::from(curve.emphasized);
        }
        trace!(?selection, emphasized, "Applied selection patch");
        emphasized
    }

    pub fn emphasized(&self) -> impl Iterator<Item = &CurvePrimitive> {
        self.curves.iter().filter(|c| c.emphasized)
    }

    /// Label under a point given in container pixel coordinates
    ///
    /// When labels overlap the one closest to the pointer along its
    /// baseline wins.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&LabelPrimitive> {
        let (cx, cy) = self.viewport.center();
        let point = Point::new(x - cx, y - cy);
        self.labels
            .iter()
            .filter_map(|label| label.distance_to(point).map(|d| (d, label)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, label)| label)
    }
}
