//! The table: single owner of mode, match, stats and the coin itself.
//!
//! Every transition is a named method. Deferred work (a flip settling, the result
//! screen arriving) goes through a [`Timeline`] driven by [`Table::advance`], so
//! nothing observable changes between a flip request and its settle instant.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::coin::{Faces, FlipOutcome, Oracle, RandomOracle, Side};
use crate::gate::{self, GateContext, Rejection, Trigger};
use crate::session::{AppMode, GameSession, LifetimeStats, ResultCard, SetupDraft};
use crate::sound::Cue;
use crate::spin;
use crate::timeline::Timeline;

/// How long the coin spins before its result is revealed.
pub const SETTLE_DELAY: Duration = Duration::from_millis(1500);
/// Pause between the final flip settling and the result screen.
pub const RESULT_DELAY: Duration = Duration::from_millis(600);
/// Flips are held back this long after a match opens.
pub const ENTRY_WINDOW: Duration = Duration::from_millis(700);

#[derive(Clone, Debug, PartialEq)]
enum Action {
    Settle(FlipOutcome),
    RevealResult,
}

/// Read-only snapshot handed to the renderer each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    pub mode: AppMode,
    pub rotation: f64,
    pub is_animating: bool,
    pub faces: Faces,
    pub last_result: Option<Side>,
    pub flavor_text: &'static str,
    pub lifetime: LifetimeStats,
    pub session: Option<GameSession>,
    pub draft: SetupDraft,
    pub result: Option<ResultCard>,
}

pub struct Table {
    mode: AppMode,
    draft: SetupDraft,
    session: Option<GameSession>,
    lifetime: LifetimeStats,
    rotation: f64,
    faces: Faces,
    last_result: Option<Side>,
    flavor_text: &'static str,
    in_motion: bool,
    entry_until: Option<Duration>,
    result: Option<ResultCard>,
    timeline: Timeline<Action>,
    oracle: Box<dyn Oracle>,
    quote_rng: ChaCha8Rng,
    cues: Vec<Cue>,
}

impl Table {
    pub fn new(oracle: Box<dyn Oracle>, quote_rng: ChaCha8Rng) -> Self {
        Self {
            mode: AppMode::FreePlay,
            draft: SetupDraft::default(),
            session: None,
            lifetime: LifetimeStats::default(),
            rotation: 0.0,
            faces: Faces::default(),
            last_result: None,
            flavor_text: "",
            in_motion: false,
            entry_until: None,
            result: None,
            timeline: Timeline::default(),
            oracle,
            quote_rng,
            cues: Vec::new(),
        }
    }

    /// A fair table. The same seed replays the same flips.
    pub fn seeded(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let quote_rng = ChaCha8Rng::seed_from_u64(rng.next_u64());
        Self::new(Box::new(RandomOracle::new(rng)), quote_rng)
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn lifetime(&self) -> LifetimeStats {
        self.lifetime
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn draft(&self) -> SetupDraft {
        self.draft
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn faces(&self) -> Faces {
        self.faces
    }

    pub fn last_result(&self) -> Option<Side> {
        self.last_result
    }

    pub fn flavor_text(&self) -> &'static str {
        self.flavor_text
    }

    pub fn is_in_motion(&self) -> bool {
        self.in_motion
    }

    pub fn result(&self) -> Option<&ResultCard> {
        self.result.as_ref()
    }

    /// Sound cues raised since the last call, in order.
    pub fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    pub fn view(&self) -> View {
        View {
            mode: self.mode,
            rotation: self.rotation,
            is_animating: self.in_motion,
            faces: self.faces,
            last_result: self.last_result,
            flavor_text: self.flavor_text,
            lifetime: self.lifetime,
            session: self.session,
            draft: self.draft,
            result: self.result.clone(),
        }
    }

    fn in_entry_window(&self, now: Duration) -> bool {
        self.entry_until.is_some_and(|until| now < until)
    }

    fn match_complete(&self) -> bool {
        self.session.as_ref().is_some_and(GameSession::is_complete)
    }

    // ── Flipping ────────────────────────────────────────────────────────────

    /// Validates a flip intent and, if accepted, launches the flip. The outcome and
    /// resting angle are decided now; nothing is revealed or counted until it settles.
    pub fn request_flip(&mut self, trigger: Trigger, now: Duration) -> Result<(), Rejection> {
        let ctx = GateContext {
            mode: self.mode,
            in_motion: self.in_motion,
            in_entry_window: self.in_entry_window(now),
            match_complete: self.match_complete(),
        };
        if let Err(reason) = gate::admit(&ctx) {
            if reason.acknowledged() {
                self.cues.push(Cue::Ambient);
            }
            debug!(%trigger, mode = %self.mode, %reason, "flip rejected");
            return Err(reason);
        }

        self.in_motion = true;
        self.cues.push(Cue::Tick);

        let outcome = self.oracle.draw(self.mode, self.faces);
        self.rotation = spin::next_rotation(self.rotation, outcome.side.is_heads());
        self.faces = outcome.faces;
        debug!(
            %trigger,
            side = %outcome.side,
            face = outcome.face.name(),
            rotation = self.rotation,
            "flip launched"
        );
        self.timeline.schedule(now + SETTLE_DELAY, Action::Settle(outcome));
        Ok(())
    }

    /// Runs every deferred action due at or before `now`.
    pub fn advance(&mut self, now: Duration) {
        while let Some(due) = self.timeline.pop_due(now) {
            match due.action {
                Action::Settle(outcome) => self.settle(outcome, due.fire_at),
                Action::RevealResult => self.reveal_result(),
            }
        }
    }

    fn settle(&mut self, outcome: FlipOutcome, at: Duration) {
        let side = outcome.side;
        self.in_motion = false;
        self.last_result = Some(side);
        self.flavor_text = outcome.flavor_text;
        self.cues.push(Cue::Land {
            heads: side.is_heads(),
        });

        // Counted against whatever mode is current when the coin lands.
        match (self.mode, self.session.as_mut()) {
            (AppMode::FreePlay, _) => {
                self.lifetime.record(side);
                info!(
                    %side,
                    flavor = outcome.flavor_text,
                    heads = self.lifetime.heads,
                    tails = self.lifetime.tails,
                    "flip settled"
                );
            }
            (AppMode::GameActive, Some(session)) => {
                let finished = session.record(side);
                info!(
                    %side,
                    flip = session.current_flips(),
                    of = session.target_flips(),
                    "match flip settled"
                );
                if finished {
                    self.timeline.schedule(at + RESULT_DELAY, Action::RevealResult);
                }
            }
            (mode, _) => warn!(%mode, %side, "flip settled outside of play, not counted"),
        }
    }

    fn reveal_result(&mut self) {
        let Some(session) = self.session.filter(|_| self.mode == AppMode::GameActive) else {
            debug!(mode = %self.mode, "result reveal dropped");
            return;
        };
        if !session.is_complete() {
            debug!("result reveal dropped, match not complete");
            return;
        }

        let card = ResultCard::for_session(&session, &mut self.quote_rng);
        self.cues.push(if card.verdict.earns_fanfare() {
            Cue::Win
        } else {
            Cue::Lose
        });
        info!(
            outcome = card.outcome.headline(),
            chosen = %session.chosen_side(),
            heads = card.tally.heads,
            tails = card.tally.tails,
            "match decided"
        );
        self.result = Some(card);
        self.mode = AppMode::GameResult;
    }

    // ── Mode transitions ────────────────────────────────────────────────────

    fn enter(&mut self, mode: AppMode) {
        debug!(from = %self.mode, to = %mode, "mode change");
        self.mode = mode;
    }

    fn back_to_free_play(&mut self) {
        self.cues.push(Cue::Ambient);
        self.session = None;
        self.result = None;
        self.last_result = None;
        self.flavor_text = "";
        self.entry_until = None;
        self.enter(AppMode::FreePlay);
    }

    /// FREE_PLAY → SETUP.
    pub fn open_setup(&mut self) -> bool {
        if self.mode != AppMode::FreePlay || self.in_motion {
            return false;
        }
        self.cues.push(Cue::Ambient);
        self.last_result = None;
        self.enter(AppMode::Setup);
        true
    }

    pub fn choose_side(&mut self, side: Side) -> bool {
        if self.mode != AppMode::Setup {
            return false;
        }
        self.cues.push(Cue::Ambient);
        self.draft.chosen_side = side;
        true
    }

    /// Moves the target-flips slider. Only an actual change makes a sound.
    pub fn nudge_target(&mut self, delta: i32) -> bool {
        if self.mode != AppMode::Setup {
            return false;
        }
        let changed = self.draft.nudge(delta);
        if changed {
            self.cues.push(Cue::Ambient);
        }
        changed
    }

    /// SETUP → GAME_ACTIVE with a fresh match.
    pub fn begin(&mut self, now: Duration) -> bool {
        if self.mode != AppMode::Setup {
            return false;
        }
        let session = GameSession::new(self.draft);
        self.start_match(session, now);
        true
    }

    /// SETUP → FREE_PLAY.
    pub fn flee(&mut self) -> bool {
        if self.mode != AppMode::Setup {
            return false;
        }
        self.back_to_free_play();
        true
    }

    /// GAME_ACTIVE → FREE_PLAY. Refused mid-flip and once every flip is thrown,
    /// so it can never race the result screen.
    pub fn forfeit(&mut self) -> bool {
        if self.mode != AppMode::GameActive || self.in_motion || self.match_complete() {
            return false;
        }
        info!("match forfeited");
        self.back_to_free_play();
        true
    }

    /// GAME_RESULT → GAME_ACTIVE with the same target and side.
    pub fn tempt_fate_again(&mut self, now: Duration) -> bool {
        let Some(session) = self.session.filter(|_| self.mode == AppMode::GameResult) else {
            return false;
        };
        self.start_match(session.restarted(), now);
        true
    }

    /// GAME_RESULT → FREE_PLAY.
    pub fn return_to_menu(&mut self) -> bool {
        if self.mode != AppMode::GameResult {
            return false;
        }
        self.back_to_free_play();
        true
    }

    // Rotation carries over; the coin continues from where it rests.
    fn start_match(&mut self, session: GameSession, now: Duration) {
        self.cues.push(Cue::Select);
        info!(
            target = session.target_flips(),
            chosen = %session.chosen_side(),
            "match started"
        );
        self.session = Some(session);
        self.result = None;
        self.last_result = None;
        self.flavor_text = "";
        self.entry_until = Some(now + ENTRY_WINDOW);
        self.enter(AppMode::GameActive);
    }
}
