//! Terminal colorization for wheel previews
//!
//! Applies ANSI escape codes per canvas cell tone using crossterm.

use crossterm::style::{Color, Stylize};
use scentwheel::{Cell, GlyphCanvas, Tone};

/// Colour for a cell tone; `None` keeps the terminal default
fn tone_color(tone: Tone) -> Option<Color> {
    match tone {
        Tone::Blank => None,
        Tone::Link => Some(Color::DarkCyan),
        Tone::Emphasis => Some(Color::Yellow),
        Tone::Muted => Some(Color::DarkGrey),
        Tone::Active => Some(Color::Green),
    }
}

fn paint_row(row: &[Cell]) -> String {
    let mut line = String::with_capacity(row.len() * 4);
    for cell in row.iter().filter(|cell| cell.glyph != '\0') {
        match tone_color(cell.tone) {
            Some(color) if cell.tone == Tone::Active => {
                line.push_str(&format!("{}", cell.glyph.to_string().with(color).bold()))
            }
            Some(color) => line.push_str(&format!("{}", cell.glyph.to_string().with(color))),
            None => line.push(cell.glyph),
        }
    }
    line
}

/// Colorize a rendered preview
///
/// - Link curves: dark cyan
/// - Emphasized curves: yellow
/// - Active leaves and labels: bold green
/// - Other leaves and labels: dark grey
pub fn colorize_canvas(canvas: &GlyphCanvas) -> String {
    canvas
        .lines()
        .iter()
        .map(|row| paint_row(row))
        .collect::<Vec<_>>()
        .join("\n")
}
