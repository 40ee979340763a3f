/// Document events, targeted at an element id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Element was clicked (header cells, buttons)
    Click { target: String },
    /// Text control value changed
    Input { target: String, value: String },
    /// Form submission requested
    Submit { target: String },
    /// Dialog is about to be shown
    DialogShown { target: String },
    /// Dialog finished hiding
    DialogHidden { target: String },
    /// Key press at document level
    Key { key: Key, modifiers: Modifiers },
}

impl Event {
    /// Target element id, if the event has one.
    pub fn target(&self) -> Option<&str> {
        match self {
            Event::Click { target }
            | Event::Input { target, .. }
            | Event::Submit { target }
            | Event::DialogShown { target }
            | Event::DialogHidden { target } => Some(target),
            Event::Key { .. } => None,
        }
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub fn new() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// What the handler decided about the event's default behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventControl {
    /// Cancel the default action (e.g. the form submission).
    pub prevent_default: bool,
    /// Stop the event reaching other handlers.
    pub stop_propagation: bool,
}

impl EventControl {
    /// Let the event continue normally.
    pub const PROCEED: Self = Self {
        prevent_default: false,
        stop_propagation: false,
    };

    /// Cancel the default action and stop propagation.
    pub const CANCEL: Self = Self {
        prevent_default: true,
        stop_propagation: true,
    };

    pub fn is_cancelled(&self) -> bool {
        self.prevent_default
    }
}
