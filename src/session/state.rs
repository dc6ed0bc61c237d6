use crate::config::BoxTagConfig;
use crate::domain::{CoordinateTransform, Point, Shape};
use crate::render::RenderFrame;
use crate::session::handlers;
use crate::session::messages::{EditMsg, Outcome};

/// What an in-flight gesture is doing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    Drawing,
    Moving,
    Resizing,
}

/// Coarse state of the editor, for callers that render cursors or hints
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Drawing,
    Moving,
    Resizing,
    Labelling,
}

/// State carried from pointer-down to pointer-up
#[derive(Clone, Debug)]
pub struct Gesture {
    pub kind: GestureKind,
    /// Index of the shape being drawn, moved or resized
    pub target: usize,
    /// Natural-space pointer-down position
    pub anchor: Point,
    /// Natural-space position of the last handled event
    pub previous: Point,
    /// Vertex being dragged while resizing
    pub vertex: usize,
    /// Transform in effect at pointer-down, used for the whole gesture
    pub transform: CoordinateTransform,
}

/// Shapes and selection for the one image being edited
#[derive(Clone, Debug, Default)]
pub struct EditorSession {
    pub(crate) shapes: Vec<Shape>,
    pub(crate) selected: Option<usize>,
    pub(crate) transform: CoordinateTransform,
    pub(crate) gesture: Option<Gesture>,
    pub(crate) label_open: bool,
    pub(crate) config: BoxTagConfig,
}

impl EditorSession {
    pub fn new(config: BoxTagConfig, transform: CoordinateTransform) -> Self {
        Self {
            config,
            transform,
            ..Default::default()
        }
    }

    /// Feed one event or command through the state machine
    pub fn handle(&mut self, msg: impl Into<EditMsg>) -> Outcome {
        handlers::handle_edit_msg(self, msg.into())
    }

    /// Swap in a new transform after the image or its rendered size changed
    ///
    /// A gesture already in flight keeps the transform it started with.
    pub fn set_transform(&mut self, transform: CoordinateTransform) {
        log::debug!("transform updated: {:?}", transform);
        self.transform = transform;
    }

    pub fn transform(&self) -> CoordinateTransform {
        self.transform
    }

    pub fn config(&self) -> &BoxTagConfig {
        &self.config
    }

    /// Natural-space shapes, in z-order
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|i| self.shapes.get(i))
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn label_open(&self) -> bool {
        self.label_open
    }

    pub fn state(&self) -> EditState {
        if self.label_open {
            return EditState::Labelling;
        }
        match self.gesture.as_ref().map(|g| g.kind) {
            None => EditState::Idle,
            Some(GestureKind::Drawing) => EditState::Drawing,
            Some(GestureKind::Moving) => EditState::Moving,
            Some(GestureKind::Resizing) => EditState::Resizing,
        }
    }

    /// Display-space snapshot for the renderer
    pub fn frame(&self) -> RenderFrame {
        RenderFrame::project(&self.shapes, self.selected, &self.transform)
    }
}
