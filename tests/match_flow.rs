use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

use fate_coin::table::{ENTRY_WINDOW, RESULT_DELAY, SETTLE_DELAY};
use fate_coin::{AppMode, Cue, Rejection, ScriptedOracle, Side, Table, Tally, Trigger};

fn scripted(sides: &[Side]) -> Table {
    let oracle = ScriptedOracle::new(sides.to_vec(), ChaCha8Rng::seed_from_u64(3));
    Table::new(Box::new(oracle), ChaCha8Rng::seed_from_u64(4))
}

fn start_match(t: &mut Table, chosen: Side, target: u32, now: Duration) {
    assert!(t.open_setup());
    t.choose_side(chosen);
    while t.draft().target_flips() < target {
        t.nudge_target(1);
    }
    assert!(t.begin(now));
}

#[test]
fn two_rounds_with_the_same_setup() {
    let mut t = scripted(&[
        Side::Heads,
        Side::Heads,
        Side::Tails,
        Side::Tails,
        Side::Tails,
        Side::Heads,
    ]);
    start_match(&mut t, Side::Heads, 3, Duration::ZERO);

    let mut now = ENTRY_WINDOW;
    for _ in 0..3 {
        t.request_flip(Trigger::Pointer, now).unwrap();
        // A second intent mid-flight changes nothing.
        assert_eq!(
            t.request_flip(Trigger::Spacebar, now + Duration::from_millis(200)),
            Err(Rejection::InMotion)
        );
        now += SETTLE_DELAY;
        t.advance(now);
        let s = t.session().unwrap();
        assert_eq!(s.current_flips(), s.tally().total());
        assert!(s.current_flips() <= s.target_flips());
    }
    now += RESULT_DELAY;
    t.advance(now);
    assert_eq!(t.mode(), AppMode::GameResult);
    assert_eq!(t.result().unwrap().outcome.headline(), "VICTORY");
    assert_eq!(t.take_cues().last(), Some(&Cue::Win));

    assert!(t.tempt_fate_again(now));
    now += ENTRY_WINDOW;
    for _ in 0..3 {
        t.request_flip(Trigger::Spacebar, now).unwrap();
        now += SETTLE_DELAY;
        t.advance(now);
    }
    now += RESULT_DELAY;
    t.advance(now);
    let card = t.result().unwrap();
    assert_eq!(card.outcome.headline(), "DEFEAT");
    assert_eq!(card.tally, Tally { heads: 1, tails: 2 });
    assert_eq!(t.take_cues().last(), Some(&Cue::Lose));

    assert!(t.return_to_menu());
    assert_eq!(t.mode(), AppMode::FreePlay);
    assert_eq!(t.lifetime().total(), 0);
}

#[test]
fn cue_sequence_for_a_single_free_flip() {
    let mut t = scripted(&[Side::Heads]);
    t.request_flip(Trigger::Spacebar, Duration::ZERO).unwrap();
    t.advance(SETTLE_DELAY * 3);
    assert_eq!(t.take_cues(), [Cue::Tick, Cue::Land { heads: true }]);
    assert_eq!(t.lifetime(), Tally { heads: 1, tails: 0 });
}

#[test]
fn view_reflects_displayed_state() {
    let mut t = scripted(&[Side::Tails]);
    t.request_flip(Trigger::Pointer, Duration::ZERO).unwrap();
    let mid = t.view();
    assert!(mid.is_animating);
    assert_eq!(mid.last_result, None);
    assert_eq!(mid.rotation, 1980.0);

    t.advance(SETTLE_DELAY);
    let after = t.view();
    assert!(!after.is_animating);
    assert_eq!(after.last_result, Some(Side::Tails));
    assert_eq!(after.faces.heads, fate_coin::FaceVariant::King);
    assert_eq!(after.faces.tails.side(), Side::Tails);
    assert!(!after.flavor_text.is_empty());
}
