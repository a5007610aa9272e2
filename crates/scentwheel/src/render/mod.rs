//! Output backends for a built [`Scene`](crate::core::Scene)
//!
//! - [`SvgRenderer`]: standalone SVG markup matching the browser chart
//! - [`AsciiRenderer`]: character preview for terminals

mod ascii;
mod svg;

pub use ascii::*;
pub use svg::*;
