use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};
use fluent_scroll_core::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// Key code plus modifiers, as matched against incoming key events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

/// Runtime keymap
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
    /// Action bound to the two-key "gg" sequence
    sequence_g: Option<Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();
        let mut sequence_g = None;

        let mut bind = |key_str: &str, action: Action| {
            if key_str == "gg" {
                sequence_g = Some(action);
                return;
            }

            let Some(binding) = parse_key_binding(key_str) else {
                warn!("Invalid key binding '{}' for {:?}, skipping", key_str, action);
                return;
            };
            if let Some(existing) = bindings.get(&binding) {
                warn!(
                    "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                    key_str, existing, action
                );
            } else {
                bindings.insert(binding, action);
            }
        };

        bind(&config.quit, Action::Quit);
        bind(&config.focus_next, Action::FocusNext);
        bind(&config.focus_prev, Action::FocusPrev);
        bind(&config.scroll_down, Action::ScrollDown);
        bind(&config.scroll_up, Action::ScrollUp);
        bind(&config.page_down, Action::PageDown);
        bind(&config.page_up, Action::PageUp);
        bind(&config.jump_to_top, Action::JumpToTop);
        bind(&config.jump_to_bottom, Action::JumpToBottom);
        bind(&config.cycle_easing, Action::CycleEasing);
        bind(&config.toggle_animation, Action::ToggleAnimation);
        bind(&config.help, Action::Help);

        // Fixed bindings
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        bindings.insert(KeyBinding::simple(KeyCode::Esc), Action::ExitMode);
        bindings.entry(KeyBinding::simple(KeyCode::Down)).or_insert(Action::ScrollDown);
        bindings.entry(KeyBinding::simple(KeyCode::Up)).or_insert(Action::ScrollUp);
        bindings.entry(KeyBinding::simple(KeyCode::PageDown)).or_insert(Action::PageDown);
        bindings.entry(KeyBinding::simple(KeyCode::PageUp)).or_insert(Action::PageUp);
        bindings.entry(KeyBinding::simple(KeyCode::Home)).or_insert(Action::JumpToTop);
        bindings.entry(KeyBinding::simple(KeyCode::End)).or_insert(Action::JumpToBottom);
        bindings.entry(KeyBinding::simple(KeyCode::BackTab)).or_insert(Action::FocusPrev);
        bindings.entry(KeyBinding::shift(KeyCode::BackTab)).or_insert(Action::FocusPrev);

        Self {
            bindings,
            sequence_g,
        }
    }

    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    /// Action completing the "gg" sequence, if one is configured
    pub fn sequence_g_action(&self) -> Option<&Action> {
        self.sequence_g.as_ref()
    }

    /// A bare `g` starts the sequence
    pub fn is_g_prefix(&self, binding: &KeyBinding) -> bool {
        self.sequence_g.is_some()
            && binding.code == KeyCode::Char('g')
            && binding.modifiers == KeyModifiers::NONE
    }
}

/// Parse Vim-style key notation.
///
/// Accepts single characters (`j`, `?`), uppercase letters as Shift (`G`),
/// and bracketed forms with an optional `C-` or `S-` modifier
/// (`<C-d>`, `<S-Tab>`, `<PageDown>`, `<F5>`).
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();

    if let Some(inner) = s.strip_prefix('<').and_then(|rest| rest.strip_suffix('>')) {
        return parse_special_key(inner);
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if c.is_ascii_uppercase() {
        Some(KeyBinding::shift(KeyCode::Char(c)))
    } else {
        Some(KeyBinding::simple(KeyCode::Char(c)))
    }
}

/// Content of a `<...>` binding
fn parse_special_key(inner: &str) -> Option<KeyBinding> {
    if let Some(rest) = inner.strip_prefix("C-") {
        return parse_key_name(rest).map(KeyBinding::ctrl);
    }
    if let Some(rest) = inner.strip_prefix("S-") {
        return parse_key_name(rest).map(KeyBinding::shift);
    }
    parse_key_name(inner).map(KeyBinding::simple)
}

fn parse_key_name(name: &str) -> Option<KeyCode> {
    let lower = name.to_lowercase();
    let code = match lower.as_str() {
        "cr" | "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" | "spc" => KeyCode::Char(' '),
        "bs" | "backspace" => KeyCode::Backspace,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        other => {
            if let Some(n) = other.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                return (1..=12).contains(&n).then_some(KeyCode::F(n));
            }
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c.to_ascii_lowercase())
        }
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_keys() {
        assert_eq!(
            parse_key_binding("j"),
            Some(KeyBinding::simple(KeyCode::Char('j')))
        );
        assert_eq!(
            parse_key_binding("?"),
            Some(KeyBinding::simple(KeyCode::Char('?')))
        );
        assert_eq!(
            parse_key_binding("G"),
            Some(KeyBinding::shift(KeyCode::Char('G')))
        );
        assert_eq!(parse_key_binding("jk"), None);
        assert_eq!(parse_key_binding(""), None);
    }

    #[test]
    fn test_parse_modified_keys() {
        assert_eq!(
            parse_key_binding("<C-d>"),
            Some(KeyBinding::ctrl(KeyCode::Char('d')))
        );
        assert_eq!(
            parse_key_binding("<C-U>"),
            Some(KeyBinding::ctrl(KeyCode::Char('u')))
        );
        assert_eq!(
            parse_key_binding("<S-Tab>"),
            Some(KeyBinding::shift(KeyCode::Tab))
        );
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(
            parse_key_binding("<Tab>"),
            Some(KeyBinding::simple(KeyCode::Tab))
        );
        assert_eq!(
            parse_key_binding("<PageDown>"),
            Some(KeyBinding::simple(KeyCode::PageDown))
        );
        assert_eq!(
            parse_key_binding("<Space>"),
            Some(KeyBinding::simple(KeyCode::Char(' ')))
        );
        assert_eq!(
            parse_key_binding("<F5>"),
            Some(KeyBinding::simple(KeyCode::F(5)))
        );
        assert_eq!(parse_key_binding("<F13>"), None);
        assert_eq!(parse_key_binding("<Nope>"), None);
    }

    #[test]
    fn test_keymap_defaults() {
        let keymap = Keymap::default();

        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('j'))),
            Some(&Action::ScrollDown)
        );
        assert_eq!(
            keymap.get(&KeyBinding::ctrl(KeyCode::Char('d'))),
            Some(&Action::PageDown)
        );
        assert_eq!(
            keymap.get(&KeyBinding::shift(KeyCode::Char('G'))),
            Some(&Action::JumpToBottom)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('e'))),
            Some(&Action::CycleEasing)
        );
        assert_eq!(
            keymap.get(&KeyBinding::ctrl(KeyCode::Char('c'))),
            Some(&Action::Quit)
        );
        assert_eq!(keymap.sequence_g_action(), Some(&Action::JumpToTop));
        assert!(keymap.is_g_prefix(&KeyBinding::simple(KeyCode::Char('g'))));
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let config = KeymapConfig {
            help: "q".to_string(),
            ..KeymapConfig::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('q'))),
            Some(&Action::Quit)
        );
    }

    #[test]
    fn test_custom_top_binding_disables_sequence() {
        let config = KeymapConfig {
            jump_to_top: "t".to_string(),
            ..KeymapConfig::default()
        };
        let keymap = Keymap::from_config(&config);
        assert!(keymap.sequence_g_action().is_none());
        assert!(!keymap.is_g_prefix(&KeyBinding::simple(KeyCode::Char('g'))));
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('t'))),
            Some(&Action::JumpToTop)
        );
    }
}
