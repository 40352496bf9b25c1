//! Key bindings per mode, and applying the resulting commands to the table.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::coin::Side;
use crate::gate::{self, Trigger};
use crate::session::AppMode;
use crate::table::Table;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Flip(Trigger),
    OpenSetup,
    ChooseSide(Side),
    Nudge(i32),
    Begin,
    Flee,
    Forfeit,
    TemptFate,
    ReturnToMenu,
    Quit,
}

pub fn command_for(mode: AppMode, key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }
    if key.code == KeyCode::Char(' ') {
        return gate::spacebar_intent(mode).map(Command::Flip);
    }
    match mode {
        AppMode::FreePlay => match key.code {
            KeyCode::Char('g') | KeyCode::Char('G') => Some(Command::OpenSetup),
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            _ => None,
        },
        AppMode::Setup => match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(Command::ChooseSide(Side::Heads)),
            KeyCode::Right | KeyCode::Char('t') => Some(Command::ChooseSide(Side::Tails)),
            KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::Nudge(1)),
            KeyCode::Down | KeyCode::Char('-') => Some(Command::Nudge(-1)),
            KeyCode::Enter => Some(Command::Begin),
            KeyCode::Esc => Some(Command::Flee),
            _ => None,
        },
        AppMode::GameActive => match key.code {
            KeyCode::Char('y') => Some(Command::Forfeit),
            _ => None,
        },
        AppMode::GameResult => match key.code {
            KeyCode::Enter | KeyCode::Char('r') => Some(Command::TemptFate),
            KeyCode::Esc | KeyCode::Char('m') => Some(Command::ReturnToMenu),
            _ => None,
        },
    }
}

/// Applies a command. Returns false when the player asked to quit.
pub fn apply(table: &mut Table, cmd: Command, now: Duration) -> bool {
    match cmd {
        Command::Quit => return false,
        // Rejections are ordinary and already logged by the table.
        Command::Flip(trigger) => {
            let _ = table.request_flip(trigger, now);
        }
        Command::OpenSetup => {
            table.open_setup();
        }
        Command::ChooseSide(side) => {
            table.choose_side(side);
        }
        Command::Nudge(delta) => {
            table.nudge_target(delta);
        }
        Command::Begin => {
            table.begin(now);
        }
        Command::Flee => {
            table.flee();
        }
        Command::Forfeit => {
            table.forfeit();
        }
        Command::TemptFate => {
            table.tempt_fate_again(now);
        }
        Command::ReturnToMenu => {
            table.return_to_menu();
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn spacebar_flips_only_in_play() {
        let space = key(KeyCode::Char(' '));
        assert_eq!(
            command_for(AppMode::FreePlay, space),
            Some(Command::Flip(Trigger::Spacebar))
        );
        assert_eq!(
            command_for(AppMode::GameActive, space),
            Some(Command::Flip(Trigger::Spacebar))
        );
        assert_eq!(command_for(AppMode::Setup, space), None);
        assert_eq!(command_for(AppMode::GameResult, space), None);
    }

    #[test]
    fn escape_means_flee_in_setup_and_quit_in_free_play() {
        assert_eq!(command_for(AppMode::Setup, key(KeyCode::Esc)), Some(Command::Flee));
        assert_eq!(command_for(AppMode::FreePlay, key(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(
            command_for(AppMode::GameResult, key(KeyCode::Esc)),
            Some(Command::ReturnToMenu)
        );
        assert_eq!(command_for(AppMode::GameActive, key(KeyCode::Esc)), None);
    }

    #[test]
    fn ctrl_c_quits_anywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for mode in [AppMode::FreePlay, AppMode::Setup, AppMode::GameActive, AppMode::GameResult] {
            assert_eq!(command_for(mode, ctrl_c), Some(Command::Quit));
        }
    }

    #[test]
    fn setup_keys_drive_the_table() {
        let mut table = Table::seeded(Some(1));
        let now = Duration::ZERO;
        for code in [KeyCode::Char('g'), KeyCode::Right, KeyCode::Up, KeyCode::Up, KeyCode::Enter] {
            let cmd = command_for(table.mode(), key(code)).unwrap();
            assert!(apply(&mut table, cmd, now));
        }
        assert_eq!(table.mode(), AppMode::GameActive);
        let session = table.session().unwrap();
        assert_eq!(session.chosen_side(), Side::Tails);
        assert_eq!(session.target_flips(), 5);
        assert!(!apply(&mut table, Command::Quit, now));
    }
}
