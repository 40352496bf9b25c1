//! Modes, match bookkeeping and verdicts.

use rand::Rng;
use std::fmt;

use crate::coin::Side;

pub const MIN_TARGET_FLIPS: u32 = 3;
pub const MAX_TARGET_FLIPS: u32 = 28;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppMode {
    FreePlay,
    Setup,
    GameActive,
    GameResult,
}

impl AppMode {
    /// Modes in which the spacebar is bound to a flip.
    pub fn spacebar_bound(self) -> bool {
        matches!(self, AppMode::FreePlay | AppMode::GameActive)
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AppMode::FreePlay => "FREE_PLAY",
            AppMode::Setup => "SETUP",
            AppMode::GameActive => "GAME_ACTIVE",
            AppMode::GameResult => "GAME_RESULT",
        })
    }
}

/// Heads/tails counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub heads: u32,
    pub tails: u32,
}

impl Tally {
    pub fn total(&self) -> u32 {
        self.heads + self.tails
    }

    pub fn record(&mut self, side: Side) {
        match side {
            Side::Heads => self.heads += 1,
            Side::Tails => self.tails += 1,
        }
    }
}

/// Free-play counts for the life of the process.
pub type LifetimeStats = Tally;

// ── Setup ───────────────────────────────────────────────────────────────────

/// What the setup screen is editing. Survives leaving and re-entering setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetupDraft {
    pub chosen_side: Side,
    target_flips: u32,
}

impl Default for SetupDraft {
    fn default() -> Self {
        Self {
            chosen_side: Side::Heads,
            target_flips: MIN_TARGET_FLIPS,
        }
    }
}

impl SetupDraft {
    pub fn target_flips(&self) -> u32 {
        self.target_flips
    }

    /// Moves the slider, clamped to its bounds. Returns whether the value changed.
    pub fn nudge(&mut self, delta: i32) -> bool {
        let next = (self.target_flips as i64 + delta as i64)
            .clamp(MIN_TARGET_FLIPS as i64, MAX_TARGET_FLIPS as i64) as u32;
        let changed = next != self.target_flips;
        self.target_flips = next;
        changed
    }

    pub fn set_target(&mut self, target: u32) {
        self.target_flips = target.clamp(MIN_TARGET_FLIPS, MAX_TARGET_FLIPS);
    }
}

// ── Match ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSession {
    target_flips: u32,
    chosen_side: Side,
    tally: Tally,
}

impl GameSession {
    pub fn new(draft: SetupDraft) -> Self {
        Self {
            target_flips: draft.target_flips(),
            chosen_side: draft.chosen_side,
            tally: Tally::default(),
        }
    }

    /// Same target and side, counts back to zero.
    pub fn restarted(&self) -> Self {
        Self {
            tally: Tally::default(),
            ..*self
        }
    }

    pub fn target_flips(&self) -> u32 {
        self.target_flips
    }

    pub fn chosen_side(&self) -> Side {
        self.chosen_side
    }

    pub fn current_flips(&self) -> u32 {
        self.tally.total()
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn is_complete(&self) -> bool {
        self.current_flips() >= self.target_flips
    }

    /// Counts a settled flip. Returns true when this flip completes the match.
    pub fn record(&mut self, side: Side) -> bool {
        self.tally.record(side);
        self.is_complete()
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::classify(self.chosen_side, self.tally)
    }
}

// ── Verdict ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
    Stalemate,
}

impl Outcome {
    pub fn headline(self) -> &'static str {
        match self {
            Outcome::Victory => "VICTORY",
            Outcome::Defeat => "DEFEAT",
            Outcome::Stalemate => "STALEMATE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub is_draw: bool,
    pub player_wins: bool,
}

impl Verdict {
    pub fn classify(chosen: Side, tally: Tally) -> Self {
        let player_wins = (chosen == Side::Heads && tally.heads > tally.tails)
            || (chosen == Side::Tails && tally.tails > tally.heads);
        Self {
            is_draw: tally.heads == tally.tails,
            player_wins,
        }
    }

    /// A draw is never reported as a win.
    pub fn outcome(&self) -> Outcome {
        if self.is_draw {
            Outcome::Stalemate
        } else if self.player_wins {
            Outcome::Victory
        } else {
            Outcome::Defeat
        }
    }

    /// Only a clean win earns the fanfare; draws sound like a loss.
    pub fn earns_fanfare(&self) -> bool {
        self.player_wins && !self.is_draw
    }
}

pub const WIN_QUOTES: [&str; 5] = [
    "I am the master of my fate,\nI am the captain of my soul.",
    "Success is counted sweetest\nBy those who ne'er succeed.",
    "To strive, to seek, to find,\nand not to yield.",
    "Fortune favors the bold.",
    "The stars incline us, they do not bind us.",
];

pub const LOSE_QUOTES: [&str; 5] = [
    "Look on my works, ye Mighty,\nand despair!",
    "The best laid schemes o' mice an' men\nGang aft a-gley.",
    "All hope abandon,\nye who enter here.",
    "This is the way the world ends,\nNot with a bang but a whimper.",
    "Dust thou art, and unto dust\nshalt thou return.",
];

pub const DRAW_QUOTE: &str = "Balance is the law of nature.";

/// Everything the result screen shows, fixed when the match ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultCard {
    pub verdict: Verdict,
    pub outcome: Outcome,
    pub quote: &'static str,
    pub tally: Tally,
}

impl ResultCard {
    pub fn for_session<R: Rng + ?Sized>(session: &GameSession, rng: &mut R) -> Self {
        let verdict = session.verdict();
        let outcome = verdict.outcome();
        let quote = match outcome {
            Outcome::Stalemate => DRAW_QUOTE,
            Outcome::Victory => WIN_QUOTES[rng.gen_range(0..WIN_QUOTES.len())],
            Outcome::Defeat => LOSE_QUOTES[rng.gen_range(0..LOSE_QUOTES.len())],
        };
        Self {
            verdict,
            outcome,
            quote,
            tally: session.tally(),
        }
    }
}
