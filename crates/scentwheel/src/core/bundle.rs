//! Hierarchical edge bundling curves
//!
//! A relation follows the tree path between its two leaves. The control
//! points of that path are first pulled toward the straight chord by
//! `1 - β`, then smoothed with a uniform cubic B-spline. β = 1 follows the
//! tree exactly, β = 0 degenerates into the chord.

use std::fmt::Write as _;

use super::layout::to_radians;

/// Bundling tension used by the wheel
pub const BUNDLE_TENSION: f64 = 0.85;

/// A point relative to the wheel centre (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `angle` degrees clockwise from 12 o'clock, `radius` out
    pub fn polar(angle: f64, radius: f64) -> Self {
        let theta = to_radians(angle);
        Self {
            x: radius * theta.sin(),
            y: -radius * theta.cos(),
        }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// One drawing instruction of a curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
}

/// Pull each control point toward the chord between the endpoints
pub fn straighten(control: &[Point], beta: f64) -> Vec<Point> {
    let (Some(first), Some(last)) = (control.first(), control.last()) else {
        return Vec::new();
    };
    let j = control.len() - 1;
    if j == 0 {
        return Vec::new();
    }

    control
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let chord = first.lerp(last, i as f64 / j as f64);
            Point::new(
                beta * p.x + (1.0 - beta) * chord.x,
                beta * p.y + (1.0 - beta) * chord.y,
            )
        })
        .collect()
}

/// Uniform cubic B-spline through `points`, clamped at both ends
///
/// Two points give a straight segment; a single point draws nothing.
pub fn basis_spline(points: &[Point]) -> Vec<PathCommand> {
    let mut commands = Vec::new();
    if points.len() < 2 {
        return commands;
    }

    commands.push(PathCommand::MoveTo(points[0]));
    if points.len() == 2 {
        commands.push(PathCommand::LineTo(points[1]));
        return commands;
    }

    let (mut p0, mut p1) = (points[0], points[1]);
    commands.push(PathCommand::LineTo(Point::new(
        (5.0 * p0.x + p1.x) / 6.0,
        (5.0 * p0.y + p1.y) / 6.0,
    )));

    for &p in &points[2..] {
        commands.push(basis_segment(p0, p1, p));
        p0 = p1;
        p1 = p;
    }

    commands.push(basis_segment(p0, p1, p1));
    commands.push(PathCommand::LineTo(p1));
    commands
}

fn basis_segment(p0: Point, p1: Point, p: Point) -> PathCommand {
    PathCommand::CubicTo(
        Point::new((2.0 * p0.x + p1.x) / 3.0, (2.0 * p0.y + p1.y) / 3.0),
        Point::new((p0.x + 2.0 * p1.x) / 3.0, (p0.y + 2.0 * p1.y) / 3.0),
        Point::new(
            (p0.x + 4.0 * p1.x + p.x) / 6.0,
            (p0.y + 4.0 * p1.y + p.y) / 6.0,
        ),
    )
}

/// Bundled curve through a tree route
pub fn bundle_curve(control: &[Point], beta: f64) -> Vec<PathCommand> {
    basis_spline(&straighten(control, beta))
}

/// Serialise commands as an SVG path `d` attribute
pub fn to_svg_path(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for command in commands {
        match command {
            PathCommand::MoveTo(p) => {
                let _ = write!(d, "M{},{}", num(p.x), num(p.y));
            }
            PathCommand::LineTo(p) => {
                let _ = write!(d, "L{},{}", num(p.x), num(p.y));
            }
            PathCommand::CubicTo(c1, c2, p) => {
                let _ = write!(
                    d,
                    "C{},{},{},{},{},{}",
                    num(c1.x),
                    num(c1.y),
                    num(c2.x),
                    num(c2.y),
                    num(p.x),
                    num(p.y)
                );
            }
        }
    }
    d
}

/// Format a coordinate with at most three decimals
pub(crate) fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{:.3}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Flatten commands into a polyline with `steps` samples per cubic
pub fn sample(commands: &[PathCommand], steps: usize) -> Vec<Point> {
    let steps = steps.max(1);
    let mut points = Vec::new();
    let mut cursor = Point::default();

    for command in commands {
        match *command {
            PathCommand::MoveTo(p) => {
                points.push(p);
                cursor = p;
            }
            PathCommand::LineTo(p) => {
                for s in 1..=steps {
                    points.push(cursor.lerp(&p, s as f64 / steps as f64));
                }
                cursor = p;
            }
            PathCommand::CubicTo(c1, c2, p) => {
                for s in 1..=steps {
                    let t = s as f64 / steps as f64;
                    let u = 1.0 - t;
                    let (a, b, c, e) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
                    points.push(Point::new(
                        a * cursor.x + b * c1.x + c * c2.x + e * p.x,
                        a * cursor.y + b * c1.y + c * c2.y + e * p.y,
                    ));
                }
                cursor = p;
            }
        }
    }
    points
}
