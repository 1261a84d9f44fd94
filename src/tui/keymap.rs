use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key means while no prompt is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    FocusNext,
    FocusPrevious,
    Up,
    Down,
    Select,
    PreviousPage,
    NextPage,
    LargerPage,
    SmallerPage,
    Refresh,
    Delete,
    Logout,
    Quit,
    None,
}

pub fn command_for(key: KeyEvent) -> Command {
    if key.kind != KeyEventKind::Press {
        return Command::None;
    }
    if is_interrupt(&key) {
        return Command::Quit;
    }
    match key.code {
        KeyCode::Tab => Command::FocusNext,
        KeyCode::BackTab => Command::FocusPrevious,
        KeyCode::Up | KeyCode::Char('k') => Command::Up,
        KeyCode::Down | KeyCode::Char('j') => Command::Down,
        KeyCode::Enter => Command::Select,
        KeyCode::Char('[') | KeyCode::Left => Command::PreviousPage,
        KeyCode::Char(']') | KeyCode::Right => Command::NextPage,
        KeyCode::Char('+') => Command::LargerPage,
        KeyCode::Char('-') => Command::SmallerPage,
        KeyCode::Char('r') => Command::Refresh,
        KeyCode::Char('d') | KeyCode::Delete => Command::Delete,
        KeyCode::Char('L') => Command::Logout,
        KeyCode::Char('q') => Command::Quit,
        _ => Command::None,
    }
}

/// Ctrl+C quits even while a prompt has the keyboard.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(command_for(press(KeyCode::Tab)), Command::FocusNext);
        assert_eq!(command_for(press(KeyCode::Char('j'))), Command::Down);
        assert_eq!(command_for(press(KeyCode::Char('['))), Command::PreviousPage);
        assert_eq!(command_for(press(KeyCode::Char(']'))), Command::NextPage);
        assert_eq!(command_for(press(KeyCode::Char('+'))), Command::LargerPage);
        assert_eq!(command_for(press(KeyCode::Char('L'))), Command::Logout);
        assert_eq!(command_for(press(KeyCode::Char('l'))), Command::None);
    }

    #[test]
    fn ctrl_c_quits_and_releases_are_ignored() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(ctrl_c), Command::Quit);

        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(command_for(release), Command::None);
    }
}
