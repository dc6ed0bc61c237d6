//! Message types for an editing session
//!
//! This module contains:
//! - Pointer events, already reduced to a single display-space position
//! - Edit commands (delete, relabel, reshape, load)
//! - EditMsg, the single entry point into the state machine

use serde::{Deserialize, Serialize};

use crate::domain::{Point, Shape};

// ============================================================================
// Pointer Types
// ============================================================================

/// Phase of a pointer gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// A pointer event in display coordinates
///
/// Touch input is reduced to its first touch point before it gets here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Down,
            x,
            y,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Move,
            x,
            y,
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Up,
            x,
            y,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// ============================================================================
// Command Types
// ============================================================================

/// Discrete edits, accepted only between gestures
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    /// Remove the selected shape
    DeleteSelected,
    /// Add a vertex to the selected shape
    InsertPoint,
    /// Switch the selected shape between rectangle and polygon
    ToggleKind,
    /// Open the label overlay for the selected shape
    BeginLabel,
    /// Store the overlay text on the selected shape and close the overlay
    CommitLabel(String),
    /// Close the overlay without changes
    CancelLabel,
    /// Replace the shape list, e.g. after opening another image
    Load(Vec<Shape>),
    /// Remove every shape
    Clear,
}

/// Everything the editing state machine accepts
#[derive(Debug, Clone, PartialEq)]
pub enum EditMsg {
    Pointer(PointerEvent),
    Command(EditCommand),
}

impl From<PointerEvent> for EditMsg {
    fn from(event: PointerEvent) -> Self {
        EditMsg::Pointer(event)
    }
}

impl From<EditCommand> for EditMsg {
    fn from(command: EditCommand) -> Self {
        EditMsg::Command(command)
    }
}

/// What the caller should do after a message was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing visible changed
    Unchanged,
    /// Shapes or selection changed, redraw
    Redraw,
    /// Show the label overlay prefilled with this text
    EditLabel(String),
}
