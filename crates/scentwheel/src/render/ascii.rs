//! Terminal preview of the wheel
//!
//! The scene is scaled onto a [`GlyphCanvas`]. Terminal cells are about
//! twice as tall as they are wide, so rows are scaled at half the column
//! rate to keep the wheel round.

use anyhow::Result;
use tracing::{debug, span, Level};
use unicode_width::UnicodeWidthStr;

use crate::core::{sample, DiagramError, GlyphCanvas, Point, Renderer, Scene, Tone};

/// Default preview width in terminal columns
pub const DEFAULT_COLUMNS: usize = 100;

/// Narrowest and widest accepted preview
pub const MIN_COLUMNS: usize = 10;
pub const MAX_COLUMNS: usize = 1000;

/// Tallest preview a scene may scale to
pub const MAX_ROWS: usize = 1000;

const CELL_ASPECT: f64 = 2.0;
const SAMPLES_PER_SEGMENT: usize = 12;

const LINK_GLYPH: char = '·';
const EMPHASIS_GLYPH: char = '*';
const ACTIVE_LEAF: char = '●';
const MUTED_LEAF: char = '○';

/// Renders a scene onto a character canvas
#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    columns: usize,
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
        }
    }
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preview `columns` wide, clamped to `MIN_COLUMNS..=MAX_COLUMNS`
    pub fn with_columns(columns: usize) -> Self {
        Self {
            columns: columns.clamp(MIN_COLUMNS, MAX_COLUMNS),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }
}

/// Maps scene coordinates (relative to the centre) onto canvas cells
struct Projection {
    scale: f64,
    origin: (f64, f64),
}

impl Projection {
    fn cell(&self, point: Point) -> (i64, i64) {
        (
            (self.origin.0 + point.x * self.scale).round() as i64,
            (self.origin.1 + point.y * self.scale / CELL_ASPECT).round() as i64,
        )
    }
}

impl Renderer for AsciiRenderer {
    type Output = GlyphCanvas;

    fn render(&self, scene: &Scene) -> Result<Self::Output> {
        let render_span = span!(Level::INFO, "render_ascii", columns = self.columns);
        let _enter = render_span.enter();

        let viewport = scene.viewport();
        let (scale, rows) = if viewport.is_measurable() {
            let columns = self.columns as f64;
            let rows = (viewport.height * columns / viewport.width / CELL_ASPECT).ceil();
            if rows > MAX_ROWS as f64 {
                return Err(DiagramError::render_error(format!(
                    "{}x{} container needs {} preview rows, at most {} fit",
                    viewport.width, viewport.height, rows, MAX_ROWS
                ))
                .into());
            }
            (columns / viewport.width, rows as usize)
        } else {
            (0.0, 1)
        };
        let mut canvas = GlyphCanvas::new(self.columns, rows);
        let projection = Projection {
            scale,
            origin: (self.columns as f64 / 2.0, rows as f64 / 2.0),
        };

        // plain curves first so emphasized ones end up on top
        let mut curves: Vec<_> = scene.curves().iter().collect();
        curves.sort_by_key(|curve| curve.emphasized);
        for curve in curves {
            let (glyph, tone) = if curve.emphasized {
                (EMPHASIS_GLYPH, Tone::Emphasis)
            } else {
                (LINK_GLYPH, Tone::Link)
            };
            for point in sample(&curve.commands, SAMPLES_PER_SEGMENT) {
                let (x, y) = projection.cell(point);
                canvas.plot(x, y, glyph, tone);
            }
        }

        for label in scene.labels() {
            let (tone, marker) = if label.active {
                (Tone::Active, ACTIVE_LEAF)
            } else {
                (Tone::Muted, MUTED_LEAF)
            };
            let (lx, ly) = projection.cell(label.leaf_point());
            canvas.draw_text(lx, ly, &marker.to_string(), tone);

            let (ax, ay) = projection.cell(label.anchor_point());
            let width = UnicodeWidthStr::width(label.id.as_str()) as i64;
            let start = if label.is_flipped() { ax - width + 1 } else { ax };
            canvas.draw_text(start, ay, &label.id, tone);
        }

        debug!(width = canvas.width(), height = canvas.height(), "Preview rendered");
        Ok(canvas)
    }

    fn name(&self) -> &'static str {
        "ascii"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Catalog, Category, Item, Relation, Viewport};

    fn scene() -> Scene {
        let catalog = Catalog::from_parts(
            vec![
                Item::new("Rose", "Rose", Category::Spring),
                Item::new("Yuzu", "Yuzu", Category::Summer),
                Item::new("Oud", "Oud", Category::Winter),
            ],
            vec![Relation::new("Rose", "Oud", Category::Winter)],
        )
        .unwrap();
        Scene::build(&catalog, Category::Winter, Viewport::new(1000.0, 1000.0))
    }

    #[test]
    fn test_labels_and_markers_present() {
        let text = AsciiRenderer::new().render(&scene()).unwrap().to_string();
        for id in ["Rose", "Yuzu", "Oud"] {
            assert!(text.contains(id), "missing {id}:\n{text}");
        }
        assert_eq!(text.matches(ACTIVE_LEAF).count(), 1);
        assert_eq!(text.matches(MUTED_LEAF).count(), 2);
    }

    #[test]
    fn test_curve_glyphs_follow_emphasis() {
        let mut scene = scene();
        let plain = AsciiRenderer::new().render(&scene).unwrap().to_string();
        assert!(plain.contains(LINK_GLYPH));
        assert!(!plain.contains(EMPHASIS_GLYPH));

        scene.apply_selection(Some("Oud"));
        let emphasized = AsciiRenderer::new().render(&scene).unwrap().to_string();
        assert!(emphasized.contains(EMPHASIS_GLYPH));
        assert!(!emphasized.contains(LINK_GLYPH));
    }

    #[test]
    fn test_canvas_matches_columns() {
        let canvas = AsciiRenderer::with_columns(60).render(&scene()).unwrap();
        assert_eq!(canvas.width(), 60);
        assert_eq!(canvas.height(), 30);
    }

    #[test]
    fn test_columns_are_clamped() {
        assert_eq!(AsciiRenderer::with_columns(0).columns(), MIN_COLUMNS);
        assert_eq!(AsciiRenderer::with_columns(usize::MAX).columns(), MAX_COLUMNS);
        let canvas = AsciiRenderer::with_columns(1_000_000_000)
            .render(&scene())
            .unwrap();
        assert_eq!(canvas.width(), MAX_COLUMNS);
        assert_eq!(canvas.height(), MAX_COLUMNS / 2);
    }

    #[test]
    fn test_tall_thin_container_is_rejected() {
        let catalog = Catalog::from_parts(vec![Item::new("Rose", "Rose", Category::Spring)], vec![])
            .unwrap();
        let scene = Scene::build(&catalog, Category::Spring, Viewport::new(1.0, 1.0e9));
        let err = AsciiRenderer::new().render(&scene).unwrap_err();
        assert!(err.to_string().contains("Render error"), "{err}");
    }
}
