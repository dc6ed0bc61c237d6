use crate::domain::{CoordinateTransform, Point, Shape};

use super::style;

/// Everything needed to redraw the overlay, in display coordinates
///
/// The shapes are owned copies, so drawing can never reach back into the
/// natural-space shapes the session stores.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderFrame {
    /// Shapes in z-order, projected to display space
    pub shapes: Vec<Shape>,
    pub selected: Option<usize>,
    /// Vertices of the selected shape, where resize handles go
    pub handles: Vec<Point>,
}

impl RenderFrame {
    pub fn project(
        shapes: &[Shape],
        selected: Option<usize>,
        transform: &CoordinateTransform,
    ) -> Self {
        let shapes: Vec<Shape> = shapes
            .iter()
            .map(|shape| transform.to_display_shape(shape))
            .collect();
        let selected = selected.filter(|&i| i < shapes.len());
        let handles = selected
            .map(|i| shapes[i].vertices().to_vec())
            .unwrap_or_default();
        Self {
            shapes,
            selected,
            handles,
        }
    }

    /// Fill color for the shape at `index`
    pub fn fill(&self, index: usize) -> [u8; 4] {
        if self.selected == Some(index) {
            style::SELECTED_FILL
        } else {
            style::FILL
        }
    }

    /// Square of side `HANDLE_SIZE` centered on each resize handle
    pub fn handle_boxes(&self) -> Vec<Shape> {
        let half = style::HANDLE_SIZE / 2.0;
        self.handles
            .iter()
            .map(|h| {
                Shape::rectangle(
                    h.offset(Point::new(-half, -half)),
                    h.offset(Point::new(half, half)),
                )
            })
            .collect()
    }

    /// Label of the selected shape and where to center it
    pub fn selected_label(&self) -> Option<(Point, &str)> {
        let shape = self.shapes.get(self.selected?)?;
        if shape.text().is_empty() {
            return None;
        }
        let center = Point::new(
            (shape.left() + shape.right()) / 2.0,
            (shape.top() + shape.bottom()) / 2.0,
        );
        Some((center, shape.text()))
    }
}
