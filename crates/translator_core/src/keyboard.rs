/// Keys the input box cares about. Everything else is edited by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub const fn enter() -> Self {
        Self {
            key: Key::Enter,
            shift: false,
        }
    }

    pub const fn shift_enter() -> Self {
        Self {
            key: Key::Enter,
            shift: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    InsertNewline,
    Ignore,
}

/// Plain Enter submits, Shift+Enter inserts a newline, and nothing fires while
/// an IME composition is active.
pub fn key_action(press: KeyPress, composing: bool) -> KeyAction {
    if composing {
        return KeyAction::Ignore;
    }
    match press.key {
        Key::Enter if press.shift => KeyAction::InsertNewline,
        Key::Enter => KeyAction::Submit,
        Key::Other => KeyAction::Ignore,
    }
}
