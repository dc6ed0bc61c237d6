//! Editing session
//!
//! This module contains:
//! - Session state (shapes, selection, in-flight gesture)
//! - Message types for pointer input and edit commands
//! - Message handlers implementing the draw/move/resize state machine
//! - Keyboard shortcut mapping

pub mod handlers;
pub mod messages;
pub mod shortcuts;
pub mod state;

pub use messages::{EditCommand, EditMsg, Outcome, PointerEvent, PointerKind};
pub use state::{EditState, EditorSession, Gesture, GestureKind};
