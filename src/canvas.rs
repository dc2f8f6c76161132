//! The drawing surface and its two primitive operations.
//!
//! A [`Canvas`] records what is drawn as an ordered list of [`Primitive`]s.
//! Nothing is rasterised until the canvas is rendered, so a primitive's
//! geometry (in particular the laid-out text bounds) can be inspected
//! directly. See [`crate::render`] for serialisation and rasterisation.

use crate::fonts::Font;
use crate::text::TextBlock;
use crate::theme::Theme;
use serde::Serialize;
use std::f32::consts::PI;

/// Distance from the arrow tip to each base vertex of the head.
pub const ARROW_HEAD_LENGTH: f32 = 15.0;
/// Angle between the shaft and each side of the head.
pub const ARROW_HEAD_SPREAD: f32 = PI / 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Rect {
        rect: Rect,
        fill: String,
        stroke: String,
        stroke_width: f32,
    },
    Line {
        from: Point,
        to: Point,
        stroke: String,
        stroke_width: f32,
    },
    Polygon {
        points: Vec<Point>,
        fill: String,
    },
    /// Text laid out with its top-left corner at `bounds.x`, `bounds.y`.
    Text {
        bounds: Rect,
        block: TextBlock,
        font: Font,
        fill: String,
        centered: bool,
    },
}

#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    theme: Theme,
    primitives: Vec<Primitive>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, theme: Theme) -> Self {
        Self {
            width,
            height,
            theme,
            primitives: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> &str {
        &self.theme.background
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Draws a filled, bordered rectangle with `text` centred inside it.
    ///
    /// An empty label draws the rectangle only.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_box(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        text: &str,
        fill: &str,
        font: &Font,
    ) {
        let rect = Rect::new(x, y, width, height);
        self.push(Primitive::Rect {
            rect,
            fill: fill.to_string(),
            stroke: self.theme.border_color.clone(),
            stroke_width: self.theme.border_width,
        });

        let block = font.measure(text);
        if block.is_empty() {
            return;
        }
        let bounds = center_block(&rect, &block);
        self.push(Primitive::Text {
            bounds,
            block,
            font: font.clone(),
            fill: self.theme.text_color.clone(),
            centered: true,
        });
    }

    /// Draws a line from `(x1, y1)` to `(x2, y2)` ending in a filled
    /// triangular head. Coincident endpoints get no head.
    pub fn draw_arrow(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: &str, width: f32) {
        let from = Point::new(x1, y1);
        let to = Point::new(x2, y2);
        self.push(Primitive::Line {
            from,
            to,
            stroke: color.to_string(),
            stroke_width: width,
        });

        match arrowhead(from, to) {
            Some(points) => self.push(Primitive::Polygon {
                points: points.to_vec(),
                fill: color.to_string(),
            }),
            None => tracing::debug!(x = x2, y = y2, "skipping head of zero-length arrow"),
        }
    }

    /// Draws free text with its top-left corner at `(x, y)`.
    pub fn draw_text(&mut self, x: f32, y: f32, text: &str, font: &Font) {
        let block = font.measure(text);
        if block.is_empty() {
            return;
        }
        let bounds = Rect::new(x, y, block.width, block.height);
        self.push(Primitive::Text {
            bounds,
            block,
            font: font.clone(),
            fill: self.theme.text_color.clone(),
            centered: false,
        });
    }
}

/// Returns the tip and the two base vertices of the head for an arrow ending
/// at `to`, or `None` when the direction is undefined.
pub fn arrowhead(from: Point, to: Point) -> Option<[Point; 3]> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx.hypot(dy) <= f32::EPSILON {
        return None;
    }
    let angle = dy.atan2(dx);
    let base = |offset: f32| {
        Point::new(
            to.x - ARROW_HEAD_LENGTH * (angle + offset).cos(),
            to.y - ARROW_HEAD_LENGTH * (angle + offset).sin(),
        )
    };
    Some([to, base(-ARROW_HEAD_SPREAD), base(ARROW_HEAD_SPREAD)])
}

fn center_block(rect: &Rect, block: &TextBlock) -> Rect {
    Rect::new(
        rect.x + (rect.width - block.width) / 2.0,
        rect.y + (rect.height - block.height) / 2.0,
        block.width,
        block.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(400, 300, Theme::onboarding())
    }

    fn text_bounds(canvas: &Canvas) -> Vec<Rect> {
        canvas
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { bounds, .. } => Some(*bounds),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn box_text_is_centered_inside_the_rectangle() {
        let mut canvas = canvas();
        let font = Font::builtin(18.0);
        canvas.draw_box(50.0, 100.0, 250.0, 80.0, "Login Component", "#E3F2FD", &font);

        let rect = Rect::new(50.0, 100.0, 250.0, 80.0);
        let bounds = text_bounds(&canvas);
        assert_eq!(bounds.len(), 1);
        let text = bounds[0];
        assert!(rect.contains_rect(&text), "{text:?} escapes {rect:?}");
        let left_gap = text.x - rect.x;
        let right_gap = rect.right() - text.right();
        assert!((left_gap - right_gap).abs() < 1e-3);
        let top_gap = text.y - rect.y;
        let bottom_gap = rect.bottom() - text.bottom();
        assert!((top_gap - bottom_gap).abs() < 1e-3);
    }

    #[test]
    fn multi_line_box_text_is_contained() {
        let mut canvas = canvas();
        let font = Font::builtin(14.0);
        canvas.draw_box(10.0, 10.0, 180.0, 70.0, "Generate\nPolicy Recs", "#FFF3E0", &font);
        let rect = Rect::new(10.0, 10.0, 180.0, 70.0);
        for bounds in text_bounds(&canvas) {
            assert!(rect.contains_rect(&bounds));
        }
    }

    #[test]
    fn box_uses_theme_border() {
        let mut canvas = canvas();
        canvas.draw_box(0.0, 0.0, 10.0, 10.0, "", "#FCE4EC", &Font::builtin(12.0));
        match &canvas.primitives()[0] {
            Primitive::Rect {
                fill,
                stroke,
                stroke_width,
                ..
            } => {
                assert_eq!(fill, "#FCE4EC");
                assert_eq!(stroke, "#333333");
                assert_eq!(*stroke_width, 2.0);
            }
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn empty_label_draws_only_the_rectangle() {
        let font = Font::builtin(14.0);
        let mut labelled = canvas();
        labelled.draw_box(50.0, 1080.0, 100.0, 40.0, "", "#E3F2FD", &font);

        let mut bare = canvas();
        bare.push(Primitive::Rect {
            rect: Rect::new(50.0, 1080.0, 100.0, 40.0),
            fill: "#E3F2FD".to_string(),
            stroke: "#333333".to_string(),
            stroke_width: 2.0,
        });

        assert_eq!(labelled.primitives(), bare.primitives());
    }

    #[test]
    fn arrowhead_base_vertices_sit_at_fixed_length() {
        let cases = [
            (Point::new(175.0, 180.0), Point::new(175.0, 240.0)),
            (Point::new(700.0, 320.0), Point::new(400.0, 380.0)),
            (Point::new(570.0, 950.0), Point::new(1075.0, 150.0)),
            (Point::new(10.0, 10.0), Point::new(9.0, 10.0)),
        ];
        for (from, to) in cases {
            let [tip, left, right] = arrowhead(from, to).unwrap();
            assert_eq!(tip, to);
            assert!((left.distance(&to) - ARROW_HEAD_LENGTH).abs() < 1e-3);
            assert!((right.distance(&to) - ARROW_HEAD_LENGTH).abs() < 1e-3);
        }
    }

    #[test]
    fn arrowhead_points_back_along_the_shaft() {
        let [_, left, right] = arrowhead(Point::new(0.0, 0.0), Point::new(0.0, 100.0)).unwrap();
        assert!(left.y < 100.0 && right.y < 100.0);
        assert!((left.x + right.x).abs() < 1e-3, "head should be symmetric about the shaft");
        let half_width = (left.x - right.x).abs() / 2.0;
        assert!((half_width - ARROW_HEAD_LENGTH * 0.5).abs() < 1e-3);
    }

    #[test]
    fn degenerate_arrow_skips_head() {
        assert!(arrowhead(Point::new(5.0, 5.0), Point::new(5.0, 5.0)).is_none());

        let mut canvas = canvas();
        canvas.draw_arrow(5.0, 5.0, 5.0, 5.0, "#333333", 3.0);
        assert_eq!(canvas.primitives().len(), 1);
        assert!(matches!(canvas.primitives()[0], Primitive::Line { .. }));
    }

    #[test]
    fn arrow_pushes_line_then_head() {
        let mut canvas = canvas();
        canvas.draw_arrow(500.0, 580.0, 500.0, 640.0, "#333333", 3.0);
        assert_eq!(canvas.primitives().len(), 2);
        assert!(matches!(
            &canvas.primitives()[1],
            Primitive::Polygon { points, .. } if points.len() == 3
        ));
    }

    #[test]
    fn free_text_is_anchored_top_left() {
        let mut canvas = canvas();
        canvas.draw_text(160.0, 1090.0, "Frontend/UI", &Font::builtin(14.0));
        let bounds = text_bounds(&canvas);
        assert_eq!(bounds[0].x, 160.0);
        assert_eq!(bounds[0].y, 1090.0);
        assert!(bounds[0].width > 0.0);
    }
}
