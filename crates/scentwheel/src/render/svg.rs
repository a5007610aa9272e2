//! SVG markup for the wheel
//!
//! Output layout:
//!
//! ```text
//! <svg xmlns=".." width="W" height="H">
//!   <g transform="translate(W/2,H/2)">
//!     <g class="links"> <path class="link[ active]" d=".."/> ... </g>
//!     <g class="nodes"> <text class="node[ active]" ..>id</text> ... </g>
//!   </g>
//! </svg>
//! ```

use anyhow::Result;
use std::fmt::Write as _;
use tracing::{debug, span, Level};

use crate::core::{num, to_svg_path, CurvePrimitive, LabelPrimitive, Renderer, Scene};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Renders a scene as SVG markup
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    pretty: bool,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put every element on its own indented line
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn newline(&self, out: &mut String, depth: usize) {
        if self.pretty {
            out.push('\n');
            out.push_str(&"  ".repeat(depth));
        }
    }

    fn write_curve(&self, out: &mut String, curve: &CurvePrimitive) -> std::fmt::Result {
        let class = if curve.emphasized { "link active" } else { "link" };
        write!(
            out,
            r#"<path class="{}" data-source="{}" data-target="{}" d="{}"/>"#,
            class,
            escape_xml(&curve.ids[0]),
            escape_xml(&curve.ids[1]),
            to_svg_path(&curve.commands)
        )
    }

    fn write_label(&self, out: &mut String, label: &LabelPrimitive) -> std::fmt::Result {
        let class = if label.active { "node active" } else { "node" };
        let flip = if label.is_flipped() { "rotate(180)" } else { "" };
        write!(
            out,
            r#"<text class="{}" transform="rotate({})translate({}){}" text-anchor="{}" font-size="{}px" style="cursor: pointer">{}</text>"#,
            class,
            num(label.rotation()),
            num(label.label_radius()),
            flip,
            label.anchor(),
            label.font_size,
            escape_xml(&label.id)
        )
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&self, scene: &Scene) -> Result<Self::Output> {
        let render_span = span!(
            Level::INFO,
            "render_svg",
            labels = scene.labels().len(),
            curves = scene.curves().len()
        );
        let _enter = render_span.enter();

        let viewport = scene.viewport();
        let (cx, cy) = viewport.center();
        let mut out = String::new();

        write!(
            out,
            r#"<svg xmlns="{}" width="{}" height="{}">"#,
            SVG_NS,
            num(viewport.width),
            num(viewport.height)
        )?;
        self.newline(&mut out, 1);
        write!(out, r#"<g transform="translate({},{})">"#, num(cx), num(cy))?;

        self.newline(&mut out, 2);
        out.push_str(r#"<g class="links">"#);
        for curve in scene.curves() {
            self.newline(&mut out, 3);
            self.write_curve(&mut out, curve)?;
        }
        self.newline(&mut out, 2);
        out.push_str("</g>");

        self.newline(&mut out, 2);
        out.push_str(r#"<g class="nodes">"#);
        for label in scene.labels() {
            self.newline(&mut out, 3);
            self.write_label(&mut out, label)?;
        }
        self.newline(&mut out, 2);
        out.push_str("</g>");

        self.newline(&mut out, 1);
        out.push_str("</g>");
        self.newline(&mut out, 0);
        out.push_str("</svg>");

        debug!(bytes = out.len(), "SVG rendered");
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "svg"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "svg"
    }
}

/// Escape text for use in XML content and attribute values
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
