use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Restart,
    Quit,
}

/// Maps a key press to a game command. Unmapped keys yield `None`.
pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    let cmd = match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Command::Steer(Up),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Command::Steer(Left),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Command::Steer(Down),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Command::Steer(Right),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Command::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };

    Some(cmd)
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_wasd_and_arrows() {
        let pairs = [
            (KeyCode::Char('w'), Up),
            (KeyCode::Char('a'), Left),
            (KeyCode::Char('s'), Down),
            (KeyCode::Char('d'), Right),
            (KeyCode::Up, Up),
            (KeyCode::Left, Left),
            (KeyCode::Down, Down),
            (KeyCode::Right, Right),
        ];

        for (code, dir) in pairs.iter() {
            assert_eq!(command_for(&key(*code)), Some(Command::Steer(*dir)));
        }
    }

    #[test]
    fn test_controls() {
        assert_eq!(command_for(&key(KeyCode::Char('r'))), Some(Command::Restart));
        assert_eq!(command_for(&key(KeyCode::Enter)), Some(Command::Restart));
        assert_eq!(command_for(&key(KeyCode::Esc)), Some(Command::Quit));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(&ctrl_c), Some(Command::Quit));
    }

    #[test]
    fn test_unmapped_keys_ignored() {
        assert_eq!(command_for(&key(KeyCode::Char('c'))), None);
        assert_eq!(command_for(&key(KeyCode::Char('x'))), None);
        assert_eq!(command_for(&key(KeyCode::Tab)), None);
    }
}
