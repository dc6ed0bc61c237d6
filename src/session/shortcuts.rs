use crate::session::messages::EditCommand;
use crate::session::state::EditorSession;

/// Keys the editor reacts to, as reported by the windowing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Enter,
    Escape,
    Character(char),
}

/// Map a key press to an edit command
///
/// Key repeat is harmless here: every command either needs a selection or
/// an open label overlay, and is refused by the session otherwise.
pub fn handle_key_event(session: &EditorSession, key: Key) -> Option<EditCommand> {
    // The overlay owns the keyboard while it is open
    if session.label_open() {
        return match key {
            Key::Escape => Some(EditCommand::CancelLabel),
            _ => None,
        };
    }

    session.selected_shape()?;

    match key {
        Key::Delete | Key::Backspace => Some(EditCommand::DeleteSelected),
        // Enter: edit the label of the selected shape
        Key::Enter => Some(EditCommand::BeginLabel),
        // P: add a vertex
        Key::Character(c) if c.eq_ignore_ascii_case(&'p') => Some(EditCommand::InsertPoint),
        // T: toggle rectangle/polygon
        Key::Character(c) if c.eq_ignore_ascii_case(&'t') => Some(EditCommand::ToggleKind),
        _ => None,
    }
}
