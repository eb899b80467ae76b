use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Dock bindings that fire no matter which input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    SelectNext,
    SelectPrevious,
    NextSlide,
    PreviousSlide,
    Send,
    FocusSearch,
}

/// Modifiers that suppress the global bindings (Cmd shows up as Super or Meta
/// depending on the terminal).
fn command_modifier_held(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META)
}

/// Map a key press to a global action. While Ctrl/Cmd is held only the
/// focus-search shortcut is recognized.
pub fn global_action(key: &KeyEvent) -> Option<GlobalAction> {
    if command_modifier_held(key.modifiers) {
        return match key.code {
            KeyCode::Char('f') | KeyCode::Char('F') => Some(GlobalAction::FocusSearch),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Down => Some(GlobalAction::SelectNext),
        KeyCode::Up => Some(GlobalAction::SelectPrevious),
        KeyCode::Right => Some(GlobalAction::NextSlide),
        KeyCode::Left => Some(GlobalAction::PreviousSlide),
        KeyCode::Enter => Some(GlobalAction::Send),
        _ => None,
    }
}

/// Ctrl+C leaves the Dock from any state.
pub fn is_force_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn arrows_and_enter_map_without_modifiers() {
        let none = KeyModifiers::NONE;
        assert_eq!(global_action(&key(KeyCode::Down, none)), Some(GlobalAction::SelectNext));
        assert_eq!(global_action(&key(KeyCode::Up, none)), Some(GlobalAction::SelectPrevious));
        assert_eq!(global_action(&key(KeyCode::Right, none)), Some(GlobalAction::NextSlide));
        assert_eq!(global_action(&key(KeyCode::Left, none)), Some(GlobalAction::PreviousSlide));
        assert_eq!(global_action(&key(KeyCode::Enter, none)), Some(GlobalAction::Send));
        assert_eq!(global_action(&key(KeyCode::Char('f'), none)), None);
    }

    #[test]
    fn modifiers_suppress_everything_but_focus() {
        for modifier in [KeyModifiers::CONTROL, KeyModifiers::SUPER, KeyModifiers::META] {
            assert_eq!(global_action(&key(KeyCode::Down, modifier)), None);
            assert_eq!(global_action(&key(KeyCode::Enter, modifier)), None);
            assert_eq!(
                global_action(&key(KeyCode::Char('f'), modifier)),
                Some(GlobalAction::FocusSearch)
            );
        }
    }

    #[test]
    fn shift_does_not_suppress_arrows() {
        assert_eq!(
            global_action(&key(KeyCode::Down, KeyModifiers::SHIFT)),
            Some(GlobalAction::SelectNext)
        );
    }

    #[test]
    fn ctrl_c_quits() {
        assert!(is_force_quit(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_force_quit(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
    }
}
