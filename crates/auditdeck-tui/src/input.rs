use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextSection,
    PrevSection,
    JumpToSection(usize),
    FirstSection,
    LastSection,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Section navigation
        (KeyCode::Right, KeyModifiers::NONE) => Action::NextSection,
        (KeyCode::Left, KeyModifiers::NONE) => Action::PrevSection,
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::NextSection,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::PrevSection,
        (KeyCode::Tab, KeyModifiers::NONE) => Action::NextSection,
        (KeyCode::BackTab, KeyModifiers::SHIFT) => Action::PrevSection,

        // Jump straight to a section, 1-based like the nav bar
        (KeyCode::Char(c), KeyModifiers::NONE) if c.is_ascii_digit() && c != '0' => {
            Action::JumpToSection(c as usize - '1' as usize)
        }
        (KeyCode::Char('g'), KeyModifiers::NONE) => Action::FirstSection,
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Action::LastSection,
        (KeyCode::Home, KeyModifiers::NONE) => Action::FirstSection,
        (KeyCode::End, KeyModifiers::NONE) => Action::LastSection,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_arrow_navigation() {
        assert_eq!(
            handle_key_event(key(KeyCode::Right, KeyModifiers::NONE)),
            Action::NextSection
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Left, KeyModifiers::NONE)),
            Action::PrevSection
        );
    }

    #[test]
    fn test_digit_jump_is_zero_based() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('1'), KeyModifiers::NONE)),
            Action::JumpToSection(0)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('5'), KeyModifiers::NONE)),
            Action::JumpToSection(4)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('0'), KeyModifiers::NONE)),
            Action::None
        );
    }

    #[test]
    fn test_unmapped_key_is_noop() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('z'), KeyModifiers::NONE)),
            Action::None
        );
    }
}
