//! Character canvas for terminal previews
//!
//! Every cell carries a [`Tone`] next to its glyph so the CLI can colour
//! emphasized curves and active labels without re-parsing the text.

use unicode_width::UnicodeWidthChar;

/// Visual role of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub enum Tone {
    #[default]
    Blank,
    /// Plain link curve
    Link,
    /// Link touching the selection
    Emphasis,
    /// Leaf or label outside the active category
    Muted,
    /// Leaf or label in the active category
    Active,
}

impl Tone {
    /// Labels and leaves always win over curves
    fn is_text(&self) -> bool {
        matches!(self, Tone::Muted | Tone::Active)
    }
}

/// One character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub tone: Tone,
}

impl Cell {
    const BLANK: Cell = Cell {
        glyph: ' ',
        tone: Tone::Blank,
    };

    /// Trailing half of a double-width glyph
    const CONTINUATION: Cell = Cell {
        glyph: '\0',
        tone: Tone::Blank,
    };
}

/// Fixed-size grid of toned character cells
#[derive(Debug, Clone)]
pub struct GlyphCanvas {
    width: usize,
    height: usize,
    grid: Vec<Vec<Cell>>,
}

impl GlyphCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            width,
            height,
            grid: vec![vec![Cell::BLANK; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.grid.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Plot a curve glyph; ignores cells off the grid or holding text
    ///
    /// An emphasized curve overwrites a plain one, never the reverse.
    pub fn plot(&mut self, x: i64, y: i64, glyph: char, tone: Tone) {
        let Some((x, y)) = self.index(x, y) else {
            return;
        };
        let cell = &mut self.grid[y][x];
        if cell.tone.is_text() || cell.glyph == '\0' || tone < cell.tone {
            return;
        }
        *cell = Cell { glyph, tone };
    }

    /// Write text starting at `(x, y)`, clipped at the grid edges
    ///
    /// Double-width characters occupy two cells.
    pub fn draw_text(&mut self, x: i64, y: i64, text: &str, tone: Tone) {
        let mut column = x;
        for c in text.chars() {
            let width = UnicodeWidthChar::width(c).unwrap_or(0) as i64;
            if width == 0 {
                continue;
            }
            let fits = (0..width).all(|dx| self.index(column + dx, y).is_some());
            if fits {
                if let Some((cx, cy)) = self.index(column, y) {
                    self.grid[cy][cx] = Cell { glyph: c, tone };
                    for dx in 1..width as usize {
                        self.grid[cy][cx + dx] = Cell::CONTINUATION;
                    }
                }
            }
            column += width;
        }
    }

    fn index(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then_some((x, y))
    }

    /// Rows with trailing blanks, empty outer rows and the common left
    /// margin removed
    pub fn lines(&self) -> Vec<Vec<Cell>> {
        let mut rows: Vec<Vec<Cell>> = self
            .grid
            .iter()
            .map(|row| {
                let end = row
                    .iter()
                    .rposition(|c| c.glyph != ' ')
                    .map_or(0, |i| i + 1);
                row[..end].to_vec()
            })
            .collect();

        while rows.first().is_some_and(|row| row.is_empty()) {
            rows.remove(0);
        }
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        let margin = rows
            .iter()
            .filter(|row| !row.is_empty())
            .map(|row| row.iter().take_while(|c| c.glyph == ' ').count())
            .min()
            .unwrap_or(0);

        if margin > 0 {
            for row in &mut rows {
                row.drain(..margin.min(row.len()));
            }
        }
        rows
    }
}

impl std::fmt::Display for GlyphCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text: Vec<String> = self
            .lines()
            .iter()
            .map(|row| row.iter().filter(|c| c.glyph != '\0').map(|c| c.glyph).collect())
            .collect();
        write!(f, "{}", text.join("\n"))
    }
}
