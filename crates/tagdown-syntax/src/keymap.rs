//! Default editing keymap, as plain data.
//!
//! The host editor owns key handling; this module only names the bindings
//! the language ships with. `Mod` is the platform command/control key.

/// A single key binding: a key descriptor and the editor command it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: &'static str,
    pub command: &'static str,
}

/// The default keymap included by [`build_language`] unless opted out.
///
/// [`build_language`]: crate::language::build_language
pub fn default_keymap() -> Vec<KeyBinding> {
    vec![
        KeyBinding {
            key: "Mod-b",
            command: "toggle-strong",
        },
        KeyBinding {
            key: "Mod-i",
            command: "toggle-emphasis",
        },
        KeyBinding {
            key: "Mod-k",
            command: "insert-link",
        },
        KeyBinding {
            key: "Mod-Shift-.",
            command: "toggle-blockquote",
        },
        KeyBinding {
            key: "Mod-Shift-t",
            command: "insert-tag",
        },
    ]
}
