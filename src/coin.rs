//! Sides, face variants, flavor text and the outcome generator.

use rand::Rng;
use std::collections::VecDeque;
use std::fmt;

use crate::session::AppMode;

// ── Sides & faces ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Heads,
    Tails,
}

impl Side {
    pub fn is_heads(self) -> bool {
        self == Side::Heads
    }

    pub fn other(self) -> Side {
        match self {
            Side::Heads => Side::Tails,
            Side::Tails => Side::Heads,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Heads => "HEADS",
            Side::Tails => "TAILS",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cosmetic skin shown on one side of the coin. Never affects scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceVariant {
    King,
    Sun,
    Jester,
    Harvest,
    Dragon,
    Skull,
    Ghost,
    Serpent,
    Demon,
}

pub const HEADS_FACES: [FaceVariant; 4] = [
    FaceVariant::King,
    FaceVariant::Sun,
    FaceVariant::Jester,
    FaceVariant::Harvest,
];
pub const TAILS_FACES: [FaceVariant; 3] = [
    FaceVariant::Skull,
    FaceVariant::Ghost,
    FaceVariant::Serpent,
];
pub const RARE_HEADS: FaceVariant = FaceVariant::Dragon;
pub const RARE_TAILS: FaceVariant = FaceVariant::Demon;

/// Chance that a flip lands on the side's rare face.
pub const RARE_CHANCE: f64 = 0.05;

impl FaceVariant {
    pub const ALL: [FaceVariant; 9] = [
        FaceVariant::King,
        FaceVariant::Sun,
        FaceVariant::Jester,
        FaceVariant::Harvest,
        FaceVariant::Dragon,
        FaceVariant::Skull,
        FaceVariant::Ghost,
        FaceVariant::Serpent,
        FaceVariant::Demon,
    ];

    pub fn side(self) -> Side {
        match self {
            FaceVariant::King
            | FaceVariant::Sun
            | FaceVariant::Jester
            | FaceVariant::Harvest
            | FaceVariant::Dragon => Side::Heads,
            FaceVariant::Skull | FaceVariant::Ghost | FaceVariant::Serpent | FaceVariant::Demon => {
                Side::Tails
            }
        }
    }

    pub fn is_rare(self) -> bool {
        self == RARE_HEADS || self == RARE_TAILS
    }

    pub fn name(self) -> &'static str {
        match self {
            FaceVariant::King => "king",
            FaceVariant::Sun => "sun",
            FaceVariant::Jester => "jester",
            FaceVariant::Harvest => "harvest",
            FaceVariant::Dragon => "dragon",
            FaceVariant::Skull => "skull",
            FaceVariant::Ghost => "ghost",
            FaceVariant::Serpent => "serpent",
            FaceVariant::Demon => "demon",
        }
    }

    /// Free-play phrase pool for this face.
    pub fn phrases(self) -> &'static [&'static str; 12] {
        match self {
            FaceVariant::King => &KING,
            FaceVariant::Sun => &SUN,
            FaceVariant::Jester => &JESTER,
            FaceVariant::Harvest => &HARVEST,
            FaceVariant::Dragon => &DRAGON,
            FaceVariant::Skull => &SKULL,
            FaceVariant::Ghost => &GHOST,
            FaceVariant::Serpent => &SERPENT,
            FaceVariant::Demon => &DEMON,
        }
    }
}

// ── Flavor text ─────────────────────────────────────────────────────────────

#[rustfmt::skip]
const KING: [&str; 12] = [
    "THE KING COMMANDS", "ROYAL DECREE", "HEAVY IS THE CROWN", "RULE THE DAY",
    "GOLDEN SCEPTER", "BY ORDER OF FATE", "THE THRONE AWAITS", "CONQUER ALL",
    "DIVINE RIGHT", "LAW OF THE LAND", "GLORY BECKONS", "RISE ABOVE",
];
#[rustfmt::skip]
const SUN: [&str; 12] = [
    "PRAISE THE LIGHT", "DAWN BREAKS", "SHINING TRUTH", "BURN BRIGHT",
    "NO SHADOWS HERE", "SOLAR FLARE", "GLORIOUS DAY", "BLINDING LUCK",
    "THE MORNING STAR", "CLEAR SKIES", "WARM EMBRACE", "ETERNAL DAY",
];
#[rustfmt::skip]
const JESTER: [&str; 12] = [
    "FOOL'S ERRAND", "LAUGH AT FATE", "CHAOS REIGNS", "A MERRY JEST",
    "TRICKSTER'S DELIGHT", "WHY SO SERIOUS?", "ROLL THE DICE", "WILD ABANDON",
    "TWIST OF FATE", "MOCK THE GODS", "UNEXPECTED TURN", "DANCE ON FIRE",
];
#[rustfmt::skip]
const HARVEST: [&str; 12] = [
    "REAP REWARDS", "BOUNTIFUL YIELD", "SOW THE SEEDS", "GOLDEN FIELDS",
    "FRUIT OF LABOR", "NATURE GIVES", "FEAST TONIGHT", "SEASON OF PLENTY",
    "GROWTH ASSURED", "ROOTS RUN DEEP", "GATHER YOUR STRENGTH", "PROSPERITY",
];
#[rustfmt::skip]
const DRAGON: [&str; 12] = [
    "ANCIENT GREED", "HOARD YOUR LUCK", "FIRE AND BLOOD", "THE WYRM WAKES",
    "LEGENDARY FIND", "SCALES OF GOLD", "DRAGON'S GAZE", "MYTHIC FORTUNE",
    "POWER UNLEASHED", "TREASURE AWAITS", "SLEEPING GIANT", "FLAME OF OLD",
];
#[rustfmt::skip]
const SKULL: [&str; 12] = [
    "MEMENTO MORI", "DEATH SMILES", "BONES RATTLE", "END OF THE LINE",
    "GRAVE NEWS", "SILENT TOMB", "DUST TO DUST", "THE FINAL REST",
    "NO ESCAPE", "GRIM REALITY", "FATE IS SEALED", "ALL MUST FADE",
];
#[rustfmt::skip]
const GHOST: [&str; 12] = [
    "PAST HAUNTS", "UNFINISHED BUSINESS", "COLD BREATH", "WHISPERS FADE",
    "SPIRIT WALK", "BEYOND THE VEIL", "HOLLOW ECHO", "SPECTRAL SIGHT",
    "LOST SOULS", "INVISIBLE HAND", "CHILL IN AIR", "MEMORY REMAINS",
];
#[rustfmt::skip]
const SERPENT: [&str; 12] = [
    "VENOM STRIKES", "TRUST NO ONE", "SILENT APPROACH", "COILED FATE",
    "FORKED TONGUE", "HIDDEN DANGER", "SLITHER IN DARK", "COLD BLOOD",
    "POISONED CHALICE", "SHED YOUR SKIN", "WAIT AND STRIKE", "EYES OPEN",
];
#[rustfmt::skip]
const DEMON: [&str; 12] = [
    "HELL TO PAY", "WICKED GAME", "SOUL FOR SALE", "INFERNAL LUCK",
    "DOOMED PATH", "CURSED COIN", "THE BEAST RISES", "DARK PACT",
    "ETERNAL FLAME", "SINNER'S CHOICE", "ABYSS GAZES", "BLOOD OATH",
];

/// Shared pool used for every flip made during a match.
#[rustfmt::skip]
pub const GAME_PHRASES: [&str; 16] = [
    "FATE TURNS...", "DESTINY CALLS", "HOLD FAST", "A BOLD STRIKE",
    "THE DIE IS CAST", "FORTUNE SMILES?", "DARKNESS WATCHES", "LIGHT REVEALS",
    "AGAIN!", "THE BALANCE SHIFTS", "WITNESS!", "NO RETREAT",
    "STEEL YOURSELF", "THE COIN KNOWS", "CHANCE OR FATE?", "DO NOT BLINK",
];

// ── Outcomes ────────────────────────────────────────────────────────────────

/// The face currently shown on each side of the coin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Faces {
    pub heads: FaceVariant,
    pub tails: FaceVariant,
}

impl Default for Faces {
    fn default() -> Self {
        Faces {
            heads: FaceVariant::King,
            tails: FaceVariant::Skull,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlipOutcome {
    pub side: Side,
    pub face: FaceVariant,
    pub flavor_text: &'static str,
    /// Faces after this flip; only the winning side's face changes.
    pub faces: Faces,
}

fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Draws a fair side, then an independent rarity roll, a face and a flavor line.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, mode: AppMode, prior: Faces) -> FlipOutcome {
    let side = if rng.gen_bool(0.5) {
        Side::Heads
    } else {
        Side::Tails
    };
    let rare = rng.gen_bool(RARE_CHANCE);
    dress(rng, side, rare, mode, prior)
}

/// Completes an outcome for a side that has already been decided.
pub fn dress<R: Rng + ?Sized>(
    rng: &mut R,
    side: Side,
    rare: bool,
    mode: AppMode,
    prior: Faces,
) -> FlipOutcome {
    let mut faces = prior;
    let face = match (side, rare) {
        (Side::Heads, true) => RARE_HEADS,
        (Side::Tails, true) => RARE_TAILS,
        (Side::Heads, false) => *pick(rng, &HEADS_FACES),
        (Side::Tails, false) => *pick(rng, &TAILS_FACES),
    };
    match side {
        Side::Heads => faces.heads = face,
        Side::Tails => faces.tails = face,
    }

    let flavor_text = if mode == AppMode::FreePlay {
        *pick(rng, face.phrases())
    } else {
        *pick(rng, &GAME_PHRASES)
    };

    FlipOutcome {
        side,
        face,
        flavor_text,
        faces,
    }
}

// ── Oracles ─────────────────────────────────────────────────────────────────

/// Source of flip outcomes for the table.
pub trait Oracle: Send {
    fn draw(&mut self, mode: AppMode, prior: Faces) -> FlipOutcome;
}

/// Fair coin backed by any `rand` generator.
pub struct RandomOracle<R> {
    rng: R,
}

impl<R: Rng + Send> RandomOracle<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> Oracle for RandomOracle<R> {
    fn draw(&mut self, mode: AppMode, prior: Faces) -> FlipOutcome {
        generate(&mut self.rng, mode, prior)
    }
}

/// Replays a fixed list of sides, then keeps repeating the last one.
/// Faces and flavor text still come from the wrapped generator.
pub struct ScriptedOracle<R> {
    sides: VecDeque<Side>,
    last: Side,
    rng: R,
}

impl<R: Rng + Send> ScriptedOracle<R> {
    pub fn new(sides: impl IntoIterator<Item = Side>, rng: R) -> Self {
        Self {
            sides: sides.into_iter().collect(),
            last: Side::Heads,
            rng,
        }
    }
}

impl<R: Rng + Send> Oracle for ScriptedOracle<R> {
    fn draw(&mut self, mode: AppMode, prior: Faces) -> FlipOutcome {
        if let Some(side) = self.sides.pop_front() {
            self.last = side;
        }
        dress(&mut self.rng, self.last, false, mode, prior)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn catalog_sizes() {
        assert_eq!(HEADS_FACES.len(), 4);
        assert_eq!(TAILS_FACES.len(), 3);
        assert!(HEADS_FACES.iter().all(|f| f.side() == Side::Heads && !f.is_rare()));
        assert!(TAILS_FACES.iter().all(|f| f.side() == Side::Tails && !f.is_rare()));
        assert_eq!(RARE_HEADS.side(), Side::Heads);
        assert_eq!(RARE_TAILS.side(), Side::Tails);
        for face in FaceVariant::ALL {
            assert_eq!(face.phrases().len(), 12, "{}", face.name());
        }
    }

    #[test]
    fn only_winning_side_changes_face() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut faces = Faces::default();
        for _ in 0..500 {
            let out = generate(&mut rng, AppMode::FreePlay, faces);
            assert_eq!(out.face.side(), out.side);
            match out.side {
                Side::Heads => {
                    assert_eq!(out.faces.tails, faces.tails);
                    assert_eq!(out.faces.heads, out.face);
                }
                Side::Tails => {
                    assert_eq!(out.faces.heads, faces.heads);
                    assert_eq!(out.faces.tails, out.face);
                }
            }
            faces = out.faces;
        }
    }

    #[test]
    fn free_play_flavor_comes_from_face_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..300 {
            let out = generate(&mut rng, AppMode::FreePlay, Faces::default());
            assert!(out.face.phrases().contains(&out.flavor_text));
        }
    }

    #[test]
    fn match_flavor_comes_from_shared_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        for _ in 0..300 {
            let out = generate(&mut rng, AppMode::GameActive, Faces::default());
            assert!(GAME_PHRASES.contains(&out.flavor_text));
        }
    }

    #[test]
    fn sides_are_roughly_fair_and_rares_are_rare() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let n = 20_000;
        let mut heads = 0;
        let mut rares = 0;
        for _ in 0..n {
            let out = generate(&mut rng, AppMode::FreePlay, Faces::default());
            if out.side.is_heads() {
                heads += 1;
            }
            if out.face.is_rare() {
                rares += 1;
            }
        }
        let heads_ratio = heads as f64 / n as f64;
        let rare_ratio = rares as f64 / n as f64;
        assert!((0.47..0.53).contains(&heads_ratio), "heads ratio {heads_ratio}");
        assert!((0.035..0.065).contains(&rare_ratio), "rare ratio {rare_ratio}");
    }

    #[test]
    fn rare_roll_uses_fixed_face() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let out = dress(&mut rng, Side::Tails, true, AppMode::FreePlay, Faces::default());
        assert_eq!(out.face, FaceVariant::Demon);
        assert_eq!(out.faces.heads, FaceVariant::King);
        let out = dress(&mut rng, Side::Heads, true, AppMode::GameActive, Faces::default());
        assert_eq!(out.face, FaceVariant::Dragon);
    }

    #[test]
    fn scripted_oracle_replays_then_repeats() {
        let mut oracle =
            ScriptedOracle::new([Side::Tails, Side::Heads], ChaCha8Rng::seed_from_u64(1));
        let faces = Faces::default();
        assert_eq!(oracle.draw(AppMode::FreePlay, faces).side, Side::Tails);
        assert_eq!(oracle.draw(AppMode::FreePlay, faces).side, Side::Heads);
        assert_eq!(oracle.draw(AppMode::FreePlay, faces).side, Side::Heads);
    }
}
