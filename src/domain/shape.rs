//! Polygon and rectangle shapes in natural image coordinates

use super::geometry::Point;

/// Named rectangle corner, in canonical vertex order
#[repr(u8)]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    #[default]
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl From<usize> for Corner {
    fn from(index: usize) -> Self {
        match index {
            0 => Corner::TopLeft,
            1 => Corner::TopRight,
            2 => Corner::BottomRight,
            _ => Corner::BottomLeft,
        }
    }
}

impl From<Corner> for usize {
    fn from(corner: Corner) -> Self {
        corner as usize
    }
}

impl Corner {
    /// Corner on the other side of a vertical axis (left <-> right)
    pub fn horizontal_mirror(self) -> Self {
        match self {
            Corner::TopLeft => Corner::TopRight,
            Corner::TopRight => Corner::TopLeft,
            Corner::BottomRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::BottomRight,
        }
    }

    /// Corner on the other side of a horizontal axis (top <-> bottom)
    pub fn vertical_mirror(self) -> Self {
        match self {
            Corner::TopLeft => Corner::BottomLeft,
            Corner::TopRight => Corner::BottomRight,
            Corner::BottomRight => Corner::TopRight,
            Corner::BottomLeft => Corner::TopLeft,
        }
    }
}

/// A labelled shape drawn over the image
///
/// Rectangle vertices are always `[top_left, top_right, bottom_right,
/// bottom_left]`. Polygon vertices keep their insertion order and always
/// number at least three.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Polygon { vertices: Vec<Point>, text: String },
    Rectangle { vertices: [Point; 4], text: String },
}

impl Shape {
    /// Axis-aligned rectangle spanning two opposite corners, in any order
    pub fn rectangle(a: Point, b: Point) -> Self {
        Shape::Rectangle {
            vertices: canonical_corners(a, b),
            text: String::new(),
        }
    }

    /// Polygon from an ordered vertex list, `None` with fewer than 3 vertices
    pub fn polygon(vertices: Vec<Point>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        Some(Shape::Polygon {
            vertices,
            text: String::new(),
        })
    }

    /// Builder-style label setter
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn vertices(&self) -> &[Point] {
        match self {
            Shape::Polygon { vertices, .. } => vertices.as_slice(),
            Shape::Rectangle { vertices, .. } => vertices.as_slice(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Shape::Polygon { text, .. } | Shape::Rectangle { text, .. } => text,
        }
    }

    pub fn set_text(&mut self, label: impl Into<String>) {
        match self {
            Shape::Polygon { text, .. } | Shape::Rectangle { text, .. } => *text = label.into(),
        }
    }

    pub fn is_rectangle(&self) -> bool {
        matches!(self, Shape::Rectangle { .. })
    }

    /// Containment test
    ///
    /// Rectangles use an inclusive box test. Polygons are prefiltered by
    /// their bounding box, then classified by even-odd ray casting.
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Shape::Rectangle { vertices, .. } => {
                let [tl, _, br, _] = *vertices;
                point.x >= tl.x && point.x <= br.x && point.y >= tl.y && point.y <= br.y
            }
            Shape::Polygon { vertices, .. } => {
                self.bounding_rect().contains(point) && ray_cast(vertices, point)
            }
        }
    }

    /// Smallest axis-aligned rectangle enclosing every vertex
    pub fn bounding_rect(&self) -> Shape {
        match self {
            Shape::Rectangle { vertices, .. } => Shape::Rectangle {
                vertices: *vertices,
                text: String::new(),
            },
            Shape::Polygon { vertices, .. } => {
                let Some(&first) = vertices.first() else {
                    return Shape::rectangle(Point::default(), Point::default());
                };
                let (min, max) = vertices.iter().skip(1).fold((first, first), |(min, max), v| {
                    (
                        Point::new(min.x.min(v.x), min.y.min(v.y)),
                        Point::new(max.x.max(v.x), max.y.max(v.y)),
                    )
                });
                Shape::rectangle(min, max)
            }
        }
    }

    pub fn left(&self) -> f64 {
        self.bounds().0
    }

    pub fn top(&self) -> f64 {
        self.bounds().1
    }

    pub fn right(&self) -> f64 {
        self.bounds().2
    }

    pub fn bottom(&self) -> f64 {
        self.bounds().3
    }

    pub fn width(&self) -> f64 {
        self.right() - self.left()
    }

    pub fn height(&self) -> f64 {
        self.bottom() - self.top()
    }

    /// Area of the bounding rectangle
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Overlap of the two bounding rectangles
    ///
    /// Returns `None` unless the overlap has positive extent on both axes.
    pub fn intersection(&self, other: &Shape) -> Option<Shape> {
        let (l1, t1, r1, b1) = self.bounds();
        let (l2, t2, r2, b2) = other.bounds();
        let left = l1.max(l2);
        let top = t1.max(t2);
        let right = r1.min(r2);
        let bottom = b1.min(b2);
        if left < right && top < bottom {
            Some(Shape::rectangle(Point::new(left, top), Point::new(right, bottom)))
        } else {
            None
        }
    }

    /// Move every vertex by `diff`
    pub fn translate(&mut self, diff: Point) {
        match self {
            Shape::Polygon { vertices, .. } => vertices.iter_mut().for_each(|v| *v = v.offset(diff)),
            Shape::Rectangle { vertices, .. } => vertices.iter_mut().for_each(|v| *v = v.offset(diff)),
        }
    }

    /// Move a single vertex by `diff` and return the index now under the pointer
    ///
    /// For a rectangle the index names a corner. If the move drags it past
    /// the opposite edge the rectangle is flipped back into canonical order
    /// and the returned index is the mirrored corner.
    pub fn translate_point(&mut self, diff: Point, index: usize) -> usize {
        match self {
            Shape::Polygon { vertices, .. } => {
                if let Some(v) = vertices.get_mut(index) {
                    *v = v.offset(diff);
                } else {
                    log::debug!("vertex {index} out of range ({} vertices)", vertices.len());
                }
                index
            }
            Shape::Rectangle { vertices, .. } => {
                let mut left = vertices[0].x;
                let mut top = vertices[0].y;
                let mut right = vertices[1].x;
                let mut bottom = vertices[2].y;

                let mut corner = Corner::from(index);
                match corner {
                    Corner::TopLeft => {
                        top += diff.y;
                        left += diff.x;
                    }
                    Corner::TopRight => {
                        top += diff.y;
                        right += diff.x;
                    }
                    Corner::BottomRight => {
                        bottom += diff.y;
                        right += diff.x;
                    }
                    Corner::BottomLeft => {
                        bottom += diff.y;
                        left += diff.x;
                    }
                }

                if left > right {
                    std::mem::swap(&mut left, &mut right);
                    corner = corner.horizontal_mirror();
                }
                if top > bottom {
                    std::mem::swap(&mut top, &mut bottom);
                    corner = corner.vertical_mirror();
                }

                *vertices = canonical_corners(Point::new(left, top), Point::new(right, bottom));
                corner.into()
            }
        }
    }

    /// Move the bottom-right corner to `point`, keeping the top-left corner
    /// fixed and restoring canonical order. No-op on polygons.
    pub fn set_bottom_right(&mut self, point: Point) {
        if let Shape::Rectangle { vertices, .. } = self {
            *vertices = canonical_corners(vertices[0], point);
        }
    }

    /// Re-span a rectangle between two arbitrary opposite corners. No-op on polygons.
    pub fn set_corners(&mut self, a: Point, b: Point) {
        if let Shape::Rectangle { vertices, .. } = self {
            *vertices = canonical_corners(a, b);
        }
    }

    /// Four-vertex polygon with the same corners and label
    pub fn to_polygon(&self) -> Shape {
        Shape::Polygon {
            vertices: self.vertices().to_vec(),
            text: self.text().to_owned(),
        }
    }

    /// Bounding rectangle carrying this shape's label
    pub fn to_rectangle(&self) -> Shape {
        self.bounding_rect().with_text(self.text())
    }

    /// Rectangle becomes polygon, polygon becomes its bounding rectangle
    pub fn toggled_kind(&self) -> Shape {
        match self {
            Shape::Rectangle { .. } => self.to_polygon(),
            Shape::Polygon { .. } => self.to_rectangle(),
        }
    }

    /// Split the closing edge (last vertex to first) at its midpoint
    ///
    /// Rectangles are converted to polygons first. Returns the index of the
    /// inserted vertex, or `None` for a polygon with no vertices.
    pub fn insert_midpoint(&mut self) -> Option<usize> {
        if self.is_rectangle() {
            *self = self.to_polygon();
        }
        let Shape::Polygon { vertices, .. } = self else {
            return None;
        };
        let (&first, &last) = (vertices.first()?, vertices.last()?);
        vertices.push(last.midpoint(first));
        Some(vertices.len() - 1)
    }

    /// Same kind of shape with every vertex mapped through `f`
    ///
    /// Rectangles are rebuilt from their mapped top-left and bottom-right
    /// corners so the result stays canonical.
    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> Shape {
        match self {
            Shape::Polygon { vertices, text } => Shape::Polygon {
                vertices: vertices.iter().map(|&v| f(v)).collect(),
                text: text.clone(),
            },
            Shape::Rectangle { vertices, text } => Shape::Rectangle {
                vertices: canonical_corners(f(vertices[0]), f(vertices[2])),
                text: text.clone(),
            },
        }
    }

    /// (left, top, right, bottom) of the bounding rectangle
    fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            Shape::Rectangle { vertices, .. } => {
                (vertices[0].x, vertices[0].y, vertices[2].x, vertices[2].y)
            }
            Shape::Polygon { .. } => self.bounding_rect().bounds(),
        }
    }
}

/// `[top_left, top_right, bottom_right, bottom_left]` of the box spanning `a` and `b`
fn canonical_corners(a: Point, b: Point) -> [Point; 4] {
    let left = a.x.min(b.x);
    let right = a.x.max(b.x);
    let top = a.y.min(b.y);
    let bottom = a.y.max(b.y);
    [
        Point::new(left, top),
        Point::new(right, top),
        Point::new(right, bottom),
        Point::new(left, bottom),
    ]
}

/// Even-odd crossing count of a ray cast from `point` toward -x
///
/// An edge only counts when it straddles the ray's y (half-open on the
/// upper end), so horizontal edges, which have no finite x-crossing, are
/// skipped and the division below never sees a zero rise.
fn ray_cast(vertices: &[Point], point: Point) -> bool {
    let Some(mut j) = vertices.len().checked_sub(1) else {
        return false;
    };
    let mut inside = false;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[j];
        if (a.y > point.y) != (b.y > point.y) {
            let crossing_x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if crossing_x < point.x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(l: f64, t: f64, r: f64, b: f64) -> Shape {
        Shape::rectangle(Point::new(l, t), Point::new(r, b))
    }

    fn assert_canonical(shape: &Shape) {
        let v = shape.vertices();
        assert_eq!(v.len(), 4);
        assert!(v[0].x <= v[1].x, "{v:?}");
        assert!(v[0].y <= v[2].y, "{v:?}");
        assert_eq!(v[0].y, v[1].y);
        assert_eq!(v[1].x, v[2].x);
        assert_eq!(v[2].y, v[3].y);
        assert_eq!(v[3].x, v[0].x);
    }

    #[test]
    fn test_rectangle_is_canonical_from_any_corners() {
        let r = Shape::rectangle(Point::new(10.0, 0.0), Point::new(0.0, 10.0));
        assert_canonical(&r);
        assert_eq!(r.vertices()[0], Point::new(0.0, 0.0));
        assert_eq!(r.vertices()[2], Point::new(10.0, 10.0));
    }

    #[test]
    fn test_polygon_needs_three_vertices() {
        assert!(Shape::polygon(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).is_none());
        assert!(
            Shape::polygon(vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0)
            ])
            .is_some()
        );
    }

    #[test]
    fn test_rectangle_contains() {
        let r = rect(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(5.0, 5.0)));
        assert!(!r.contains(Point::new(15.0, 5.0)));
        assert!(!r.contains(Point::new(5.0, -1.0)));
    }

    #[test]
    fn test_polygon_agrees_with_rectangle_away_from_edges() {
        let r = rect(0.0, 0.0, 10.0, 10.0);
        let p = r.to_polygon();
        for point in [
            Point::new(5.0, 5.0),
            Point::new(1.5, 8.5),
            Point::new(15.0, 5.0),
            Point::new(-3.0, 4.0),
            Point::new(5.0, 12.0),
            Point::new(20.0, 20.0),
        ] {
            assert_eq!(r.contains(point), p.contains(point), "{point:?}");
        }
    }

    #[test]
    fn test_polygon_contains_concave() {
        // U shape opening upward
        let u = Shape::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 7.0),
            Point::new(7.0, 7.0),
            Point::new(7.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
        .unwrap();
        assert!(u.contains(Point::new(1.5, 5.0)));
        assert!(u.contains(Point::new(8.5, 5.0)));
        assert!(u.contains(Point::new(5.0, 8.5)));
        assert!(!u.contains(Point::new(5.0, 3.0)));
    }

    #[test]
    fn test_polygon_contains_triangle_with_vertical_edge() {
        let tri = Shape::polygon(vec![
            Point::new(10.0, 10.0),
            Point::new(10.0, 30.0),
            Point::new(30.0, 30.0),
        ])
        .unwrap();
        assert!(tri.contains(Point::new(12.0, 25.0)));
        assert!(!tri.contains(Point::new(25.0, 15.0)));
    }

    #[test]
    fn test_bounding_rect() {
        let tri = Shape::polygon(vec![
            Point::new(4.0, 9.0),
            Point::new(-2.0, 3.0),
            Point::new(7.0, 1.0),
        ])
        .unwrap();
        let b = tri.bounding_rect();
        assert!(b.is_rectangle());
        assert_eq!(b.vertices()[0], Point::new(-2.0, 1.0));
        assert_eq!(b.vertices()[2], Point::new(7.0, 9.0));
        assert_eq!(tri.area(), 72.0);
    }

    #[test]
    fn test_intersection() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(5.0, 5.0, 15.0, 15.0);
        let i = a.intersection(&b).unwrap();
        assert_eq!(i, rect(5.0, 5.0, 10.0, 10.0));
        assert_eq!(i.area(), 25.0);

        let c = rect(0.0, 0.0, 5.0, 5.0);
        let d = rect(6.0, 6.0, 10.0, 10.0);
        assert!(c.intersection(&d).is_none());
        // Touching edges have zero extent
        assert!(c.intersection(&rect(5.0, 0.0, 8.0, 5.0)).is_none());
    }

    #[test]
    fn test_translate() {
        let mut tri = Shape::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
        ])
        .unwrap();
        tri.translate(Point::new(1.0, 2.0));
        assert_eq!(
            tri.vertices(),
            &[Point::new(1.0, 2.0), Point::new(5.0, 2.0), Point::new(1.0, 6.0)]
        );
    }

    #[test]
    fn test_polygon_translate_point_keeps_index() {
        let mut tri = Shape::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
        ])
        .unwrap();
        assert_eq!(tri.translate_point(Point::new(10.0, 10.0), 1), 1);
        assert_eq!(tri.vertices()[1], Point::new(14.0, 10.0));
        assert_eq!(tri.vertices()[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_resize_without_flip() {
        let mut r = rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(r.translate_point(Point::new(5.0, 3.0), 2), 2);
        assert_eq!(r, rect(0.0, 0.0, 15.0, 13.0));
    }

    #[test]
    fn test_resize_horizontal_flip_remaps_corner() {
        let mut r = rect(0.0, 0.0, 10.0, 10.0);
        let corner = r.translate_point(Point::new(25.0, 0.0), 0);
        assert_eq!(corner, 1);
        assert_canonical(&r);
        assert_eq!(r, rect(10.0, 0.0, 25.0, 10.0));
    }

    #[test]
    fn test_resize_vertical_flip_remaps_corner() {
        let mut r = rect(0.0, 0.0, 10.0, 10.0);
        let corner = r.translate_point(Point::new(0.0, 25.0), 0);
        assert_eq!(corner, 3);
        assert_canonical(&r);
        assert_eq!(r, rect(0.0, 10.0, 10.0, 25.0));
    }

    #[test]
    fn test_resize_diagonal_flip_remaps_to_opposite_corner() {
        let mut r = rect(0.0, 0.0, 10.0, 10.0);
        let corner = r.translate_point(Point::new(-20.0, -20.0), 2);
        assert_eq!(corner, 0);
        assert_canonical(&r);
        assert_eq!(r, rect(-10.0, -10.0, 0.0, 0.0));
    }

    #[test]
    fn test_continued_drag_after_flip_follows_pointer() {
        let mut r = rect(0.0, 0.0, 10.0, 10.0);
        let corner = r.translate_point(Point::new(20.0, 0.0), 0);
        let corner = r.translate_point(Point::new(5.0, 0.0), corner);
        assert_eq!(corner, 1);
        assert_eq!(r, rect(10.0, 0.0, 25.0, 10.0));
    }

    #[test]
    fn test_set_bottom_right() {
        let mut r = rect(10.0, 10.0, 10.0, 10.0);
        r.set_bottom_right(Point::new(30.0, 40.0));
        assert_eq!(r, rect(10.0, 10.0, 30.0, 40.0));
        r.set_bottom_right(Point::new(0.0, 0.0));
        assert_canonical(&r);
        assert_eq!(r, rect(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_toggle_kind_keeps_label() {
        let r = rect(0.0, 0.0, 10.0, 10.0).with_text("cat");
        let p = r.toggled_kind();
        assert!(!p.is_rectangle());
        assert_eq!(p.text(), "cat");
        assert_eq!(p.vertices(), r.vertices());
        let back = p.toggled_kind();
        assert_eq!(back, r);
    }

    #[test]
    fn test_insert_midpoint() {
        let mut r = rect(0.0, 0.0, 10.0, 10.0);
        let index = r.insert_midpoint();
        assert_eq!(index, Some(4));
        assert!(!r.is_rectangle());
        assert_eq!(r.vertices()[4], Point::new(0.0, 5.0));
    }

    #[test]
    fn test_empty_polygon_does_not_panic() {
        let mut empty = Shape::Polygon {
            vertices: Vec::new(),
            text: String::new(),
        };
        assert!(!empty.contains(Point::new(0.0, 0.0)));
        assert!(!empty.contains(Point::new(5.0, 5.0)));
        assert_eq!(empty.bounding_rect(), rect(0.0, 0.0, 0.0, 0.0));
        assert_eq!(empty.area(), 0.0);
        assert_eq!(empty.insert_midpoint(), None);
        assert!(empty.vertices().is_empty());
    }

    #[test]
    fn test_corner_mirrors() {
        assert_eq!(Corner::TopLeft.horizontal_mirror(), Corner::TopRight);
        assert_eq!(Corner::BottomLeft.horizontal_mirror(), Corner::BottomRight);
        assert_eq!(Corner::TopLeft.vertical_mirror(), Corner::BottomLeft);
        assert_eq!(Corner::TopRight.vertical_mirror(), Corner::BottomRight);
        assert_eq!(usize::from(Corner::from(2)), 2);
    }
}
