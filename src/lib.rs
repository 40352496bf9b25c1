//! Flip a coin, or play the Game of Fate: a best-of-N match against a chosen side.
//!
//! [`Table`] owns every piece of mutable game state and exposes transitions as
//! methods. Drawing and sound are collaborators fed from it: the renderer reads a
//! [`View`] snapshot each frame, and the table raises [`Cue`]s for a [`SoundUnit`].

pub mod coin;
pub mod config;
pub mod controls;
pub mod error;
pub mod gate;
pub mod render;
pub mod session;
pub mod sound;
pub mod spin;
pub mod table;
pub mod timeline;

pub use coin::{FaceVariant, Faces, FlipOutcome, Oracle, RandomOracle, ScriptedOracle, Side};
pub use config::Settings;
pub use error::{Error, Result};
pub use gate::{Rejection, Trigger};
pub use session::{AppMode, GameSession, LifetimeStats, Outcome, ResultCard, SetupDraft, Tally, Verdict};
pub use sound::{Cue, Silent, SoundUnit, Synth};
pub use table::{Table, View};
