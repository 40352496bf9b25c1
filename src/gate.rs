//! Turns clicks and key presses into flip intents, and decides whether one may proceed.

use std::fmt;
use thiserror::Error;

use crate::session::AppMode;

/// Where a flip intent came from. Both are treated identically once admitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Pointer,
    Spacebar,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Trigger::Pointer => "pointer",
            Trigger::Spacebar => "spacebar",
        })
    }
}

/// Why a flip intent was turned away. Listed in the order they are checked.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("the coin is already in motion")]
    InMotion,
    #[error("the table is still settling in")]
    EntryWindow,
    #[error("flips are disabled during setup")]
    SetupMode,
    #[error("no flips on the result screen")]
    ResultScreen,
    #[error("every flip of this match has been thrown")]
    MatchComplete,
}

impl Rejection {
    /// Rejections that earn a soft acknowledgment cue instead of silence.
    pub fn acknowledged(self) -> bool {
        self == Rejection::EntryWindow
    }
}

/// The table state the gate looks at.
#[derive(Clone, Copy, Debug)]
pub struct GateContext {
    pub mode: AppMode,
    pub in_motion: bool,
    pub in_entry_window: bool,
    pub match_complete: bool,
}

pub fn admit(ctx: &GateContext) -> Result<(), Rejection> {
    if ctx.in_motion {
        return Err(Rejection::InMotion);
    }
    if ctx.in_entry_window {
        return Err(Rejection::EntryWindow);
    }
    match ctx.mode {
        AppMode::Setup => Err(Rejection::SetupMode),
        AppMode::GameResult => Err(Rejection::ResultScreen),
        AppMode::GameActive if ctx.match_complete => Err(Rejection::MatchComplete),
        AppMode::FreePlay | AppMode::GameActive => Ok(()),
    }
}

/// Keyboard surface: only the spacebar flips, and only where it is bound.
pub fn spacebar_intent(mode: AppMode) -> Option<Trigger> {
    mode.spacebar_bound().then_some(Trigger::Spacebar)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(mode: AppMode) -> GateContext {
        GateContext {
            mode,
            in_motion: false,
            in_entry_window: false,
            match_complete: false,
        }
    }

    #[test]
    fn open_modes_accept() {
        assert_eq!(admit(&ctx(AppMode::FreePlay)), Ok(()));
        assert_eq!(admit(&ctx(AppMode::GameActive)), Ok(()));
    }

    #[test]
    fn closed_modes_reject() {
        assert_eq!(admit(&ctx(AppMode::Setup)), Err(Rejection::SetupMode));
        assert_eq!(admit(&ctx(AppMode::GameResult)), Err(Rejection::ResultScreen));
        let done = GateContext {
            match_complete: true,
            ..ctx(AppMode::GameActive)
        };
        assert_eq!(admit(&done), Err(Rejection::MatchComplete));
    }

    #[test]
    fn motion_outranks_everything() {
        let c = GateContext {
            mode: AppMode::GameActive,
            in_motion: true,
            in_entry_window: true,
            match_complete: true,
        };
        assert_eq!(admit(&c), Err(Rejection::InMotion));
        let c = GateContext {
            in_motion: false,
            ..c
        };
        assert_eq!(admit(&c), Err(Rejection::EntryWindow));
        assert!(Rejection::EntryWindow.acknowledged());
        assert!(!Rejection::InMotion.acknowledged());
    }

    #[test]
    fn spacebar_only_where_bound() {
        assert_eq!(spacebar_intent(AppMode::FreePlay), Some(Trigger::Spacebar));
        assert_eq!(spacebar_intent(AppMode::GameActive), Some(Trigger::Spacebar));
        assert_eq!(spacebar_intent(AppMode::Setup), None);
        assert_eq!(spacebar_intent(AppMode::GameResult), None);
    }
}
