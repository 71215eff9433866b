//! The drawing capability the renderers need, plus a recording backend.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Integer pixel coordinates, origin at the top-left of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (i32, i32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// A 2D canvas owned by the caller.
///
/// The renderers only ever query its size and issue filled circles and
/// straight lines; creating, clearing and presenting the canvas is left to
/// whoever owns it.
pub trait Surface {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn draw_circle(&mut self, color: Rgb, center: Point, radius: i32);
    fn draw_line(&mut self, color: Rgb, a: Point, b: Point, thickness: i32);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn width(&self) -> i32 {
        (**self).width()
    }

    fn height(&self) -> i32 {
        (**self).height()
    }

    fn draw_circle(&mut self, color: Rgb, center: Point, radius: i32) {
        (**self).draw_circle(color, center, radius)
    }

    fn draw_line(&mut self, color: Rgb, a: Point, b: Point, thickness: i32) {
        (**self).draw_line(color, a, b, thickness)
    }
}

/// One primitive issued against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCall {
    Circle {
        color: Rgb,
        center: Point,
        radius: i32,
    },
    Line {
        color: Rgb,
        a: Point,
        b: Point,
        thickness: i32,
    },
}

/// A surface that keeps every draw call, in order, instead of rasterizing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingSurface {
    width: i32,
    height: i32,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn circles(&self) -> impl Iterator<Item = (Rgb, Point, i32)> + '_ {
        self.calls.iter().filter_map(|c| match *c {
            DrawCall::Circle {
                color,
                center,
                radius,
            } => Some((color, center, radius)),
            DrawCall::Line { .. } => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (Rgb, Point, Point, i32)> + '_ {
        self.calls.iter().filter_map(|c| match *c {
            DrawCall::Line {
                color,
                a,
                b,
                thickness,
            } => Some((color, a, b, thickness)),
            DrawCall::Circle { .. } => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn draw_circle(&mut self, color: Rgb, center: Point, radius: i32) {
        self.calls.push(DrawCall::Circle {
            color,
            center,
            radius,
        });
    }

    fn draw_line(&mut self, color: Rgb, a: Point, b: Point, thickness: i32) {
        self.calls.push(DrawCall::Line {
            color,
            a,
            b,
            thickness,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_in_order() {
        let mut s = RecordingSurface::new(640, 480);
        s.draw_line(Rgb::NEUTRAL, Point::new(0, 0), Point::new(10, 10), 3);
        s.draw_circle(Rgb::new(1, 2, 3), Point::new(5, 5), 4);

        assert_eq!((s.width(), s.height()), (640, 480));
        assert_eq!(s.calls().len(), 2);
        assert!(matches!(s.calls()[0], DrawCall::Line { .. }));
        assert_eq!(s.circles().count(), 1);
        assert_eq!(s.lines().count(), 1);

        s.clear();
        assert!(s.calls().is_empty());
    }

    #[test]
    fn draws_through_mutable_reference() {
        fn paint<S: Surface>(mut target: S) {
            let h = target.height();
            target.draw_circle(Rgb::NEUTRAL, Point::new(0, h / 2), 1);
        }

        let mut s = RecordingSurface::new(10, 10);
        paint(&mut s);
        assert_eq!(s.circles().next(), Some((Rgb::NEUTRAL, Point::new(0, 5), 1)));
    }

    #[test]
    fn point_serializes_as_pair() {
        let json = serde_json::to_string(&Point::new(3, -4)).unwrap();
        assert_eq!(json, "[3,-4]");
        let p: Point = serde_json::from_str("[7,8]").unwrap();
        assert_eq!(p, Point::new(7, 8));
    }
}
