use std::collections::HashMap;

use gradedom::{Key, Modifiers};

/// A key combination (key + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    /// The key code
    pub key: Key,
    /// Modifier keys
    pub modifiers: Modifiers,
}

impl KeyCombo {
    /// Create a new key combo
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Create a key combo without modifiers
    pub const fn key(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Add ctrl modifier
    pub const fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }
}

/// Page-level actions bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    /// Move focus to the first search box.
    FocusSearch,
    /// Hide the open dialog.
    CloseDialog,
}

/// Key bindings of a page.
#[derive(Debug, Clone)]
pub struct Keybinds {
    binds: HashMap<KeyCombo, Shortcut>,
}

impl Default for Keybinds {
    /// `Ctrl+F` focuses search, `Escape` closes the open dialog.
    fn default() -> Self {
        Self::empty()
            .bind(KeyCombo::key(Key::Char('f')).ctrl(), Shortcut::FocusSearch)
            .bind(KeyCombo::key(Key::Escape), Shortcut::CloseDialog)
    }
}

impl Keybinds {
    /// Bindings with nothing bound.
    pub fn empty() -> Self {
        Self {
            binds: HashMap::new(),
        }
    }

    /// Bind a combo, replacing any earlier binding for it.
    pub fn bind(mut self, combo: KeyCombo, shortcut: Shortcut) -> Self {
        self.binds.insert(combo, shortcut);
        self
    }

    pub fn unbind(&mut self, combo: &KeyCombo) -> Option<Shortcut> {
        self.binds.remove(combo)
    }

    /// Shortcut bound to a key press, if any. Letter keys ignore case.
    pub fn lookup(&self, key: Key, modifiers: Modifiers) -> Option<Shortcut> {
        let key = match key {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        };
        self.binds.get(&KeyCombo::new(key, modifiers)).copied()
    }
}
