//! Edit message handlers
//!
//! Pointer events drive the draw/move/resize gestures. Commands apply
//! discrete edits to the selected shape between gestures.

use crate::domain::{Point, Shape, disambiguate};
use crate::session::messages::{EditCommand, EditMsg, Outcome, PointerEvent, PointerKind};
use crate::session::state::{EditorSession, Gesture, GestureKind};

/// Handle an EditMsg, modifying session state
pub fn handle_edit_msg(session: &mut EditorSession, msg: EditMsg) -> Outcome {
    match msg {
        EditMsg::Pointer(event) => handle_pointer(session, event),
        EditMsg::Command(command) => handle_command(session, command),
    }
}

// ============================================================================
// Pointer handlers
// ============================================================================

fn handle_pointer(session: &mut EditorSession, event: PointerEvent) -> Outcome {
    if session.label_open {
        log::debug!("ignoring {:?} while label overlay is open", event.kind);
        return Outcome::Unchanged;
    }
    match event.kind {
        PointerKind::Down => pointer_down(session, event.position()),
        PointerKind::Move => pointer_move(session, event.position()),
        PointerKind::Up => pointer_up(session, event.position()),
    }
}

fn pointer_down(session: &mut EditorSession, display: Point) -> Outcome {
    // A missed release ends the previous gesture where it was last seen
    if let Some(gesture) = session.gesture.take() {
        log::debug!("pointer down during a gesture, releasing it first");
        let last = gesture.previous;
        finish_gesture(session, gesture, last);
    }

    let transform = session.transform;
    let point = transform.to_natural(display);
    let radius = session.config.resize_radius;

    let grabbed = session.selected_shape().and_then(|shape| {
        let vertex = shape
            .vertices()
            .iter()
            .position(|v| v.near(point, radius))
            .map(|i| (GestureKind::Resizing, i));
        let inside = shape.bounding_rect().contains(point);
        vertex.or_else(|| inside.then_some((GestureKind::Moving, 0)))
    });

    let (kind, target, vertex) = match (grabbed, session.selected) {
        (Some((kind, vertex)), Some(selected)) => (kind, selected, vertex),
        _ => {
            session.shapes.push(Shape::rectangle(point, point));
            (GestureKind::Drawing, session.shapes.len() - 1, 2)
        }
    };

    log::debug!("{kind:?} shape {target} from {point:?}");
    session.gesture = Some(Gesture {
        kind,
        target,
        anchor: point,
        previous: point,
        vertex,
        transform,
    });

    match kind {
        GestureKind::Drawing => Outcome::Redraw,
        GestureKind::Moving | GestureKind::Resizing => Outcome::Unchanged,
    }
}

fn pointer_move(session: &mut EditorSession, display: Point) -> Outcome {
    let Some(gesture) = session.gesture.as_mut() else {
        log::debug!("pointer move without a gesture, ignoring");
        return Outcome::Unchanged;
    };
    let Some(shape) = session.shapes.get_mut(gesture.target) else {
        log::warn!("gesture target {} no longer exists", gesture.target);
        session.gesture = None;
        return Outcome::Unchanged;
    };

    let point = gesture.transform.to_natural(display);
    let diff = point.diff(gesture.previous);
    if diff == Point::default() {
        return Outcome::Unchanged;
    }

    match gesture.kind {
        GestureKind::Drawing => shape.set_corners(gesture.anchor, point),
        GestureKind::Moving => shape.translate(diff),
        GestureKind::Resizing => gesture.vertex = shape.translate_point(diff, gesture.vertex),
    }
    gesture.previous = point;
    Outcome::Redraw
}

fn pointer_up(session: &mut EditorSession, display: Point) -> Outcome {
    let Some(gesture) = session.gesture.take() else {
        log::debug!("pointer up without a gesture, ignoring");
        return Outcome::Unchanged;
    };
    let point = gesture.transform.to_natural(display);
    finish_gesture(session, gesture, point)
}

/// End `gesture` with the pointer released at the natural-space `point`
fn finish_gesture(session: &mut EditorSession, gesture: Gesture, point: Point) -> Outcome {
    if gesture.kind != GestureKind::Drawing {
        return Outcome::Redraw;
    }

    if gesture.anchor.manhattan_distance(point) < session.config.click_threshold {
        // A click, not a drawing: drop the placeholder and select under the pointer
        if gesture.target < session.shapes.len() {
            session.shapes.remove(gesture.target);
        }
        let candidates: Vec<(usize, &Shape)> = session
            .shapes
            .iter()
            .enumerate()
            .filter(|(_, shape)| shape.contains(point))
            .collect();
        session.selected = disambiguate(&candidates);
        log::debug!(
            "click at {point:?}: {} candidates, selected {:?}",
            candidates.len(),
            session.selected
        );
    } else {
        if let Some(shape) = session.shapes.get_mut(gesture.target) {
            shape.set_corners(gesture.anchor, point);
        }
        session.selected = Some(gesture.target);
        log::debug!("drew shape {}", gesture.target);
    }
    Outcome::Redraw
}

// ============================================================================
// Command handlers
// ============================================================================

fn handle_command(session: &mut EditorSession, command: EditCommand) -> Outcome {
    match command {
        EditCommand::Load(shapes) => replace_shapes(session, shapes),
        EditCommand::Clear => replace_shapes(session, Vec::new()),
        EditCommand::CommitLabel(text) => commit_label(session, text),
        EditCommand::CancelLabel => {
            session.label_open = false;
            Outcome::Unchanged
        }
        command if session.label_open || session.gesture.is_some() => {
            log::debug!("ignoring {command:?} while busy");
            Outcome::Unchanged
        }
        EditCommand::DeleteSelected => delete_selected(session),
        EditCommand::InsertPoint => with_selected(session, |shape| {
            shape.insert_midpoint();
        }),
        EditCommand::ToggleKind => with_selected(session, |shape| {
            *shape = shape.toggled_kind();
        }),
        EditCommand::BeginLabel => match session.selected_shape() {
            Some(shape) => {
                let text = shape.text().to_owned();
                session.label_open = true;
                Outcome::EditLabel(text)
            }
            None => Outcome::Unchanged,
        },
    }
}

fn replace_shapes(session: &mut EditorSession, shapes: Vec<Shape>) -> Outcome {
    log::debug!("loading {} shapes", shapes.len());
    session.shapes = shapes;
    session.selected = None;
    session.gesture = None;
    session.label_open = false;
    Outcome::Redraw
}

fn commit_label(session: &mut EditorSession, text: String) -> Outcome {
    if !session.label_open {
        log::debug!("label commit without an open overlay, ignoring");
        return Outcome::Unchanged;
    }
    session.label_open = false;
    with_selected(session, |shape| shape.set_text(text))
}

fn delete_selected(session: &mut EditorSession) -> Outcome {
    let Some(index) = session.selected.filter(|&i| i < session.shapes.len()) else {
        return Outcome::Unchanged;
    };
    session.shapes.remove(index);
    session.selected = match (session.shapes.len(), index) {
        (0, _) => None,
        (len, 0) => Some(len - 1),
        (_, index) => Some(index - 1),
    };
    Outcome::Redraw
}

fn with_selected(session: &mut EditorSession, edit: impl FnOnce(&mut Shape)) -> Outcome {
    match session.selected.and_then(|i| session.shapes.get_mut(i)) {
        Some(shape) => {
            edit(shape);
            Outcome::Redraw
        }
        None => Outcome::Unchanged,
    }
}
