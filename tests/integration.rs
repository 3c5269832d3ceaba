// End-to-end scenarios for the guided sequence. These tests avoid
// wasm-specific functionality and exercise pure session logic so they can
// run under `cargo test` on the host.

use big_question::app::rng::{Lcg, RandomSource};
use big_question::app::script::Button;
use big_question::app::sequencer::Screen;
use big_question::app::session::{ACK_DELAY_MS, Cue, DRUM_TOTAL_MS, Session};
use big_question::app::toasts::ToastChannel;

fn fresh() -> (Session, Lcg) {
    let mut rng = Lcg::new(0xBEEF);
    let session = Session::new(0.0, false, &mut rng);
    (session, rng)
}

/// Drives a fresh session all the way to the proposal screen, returning the
/// clock at proposal entry.
fn to_proposal(s: &mut Session, rng: &mut impl RandomSource) -> f64 {
    let mut now = 3000.0;
    s.press(Button::Start, now, rng);
    now += 10.0;
    s.press(Button::Q1Yes, now, rng);
    now += ACK_DELAY_MS;
    s.tick(now, rng);
    s.press(Button::Next, now, rng);
    now += ACK_DELAY_MS;
    s.tick(now, rng);
    now += 1300.0;
    s.press(Button::Continue, now, rng);
    now += 500.0;
    s.press(Button::What, now, rng);
    s.press(Button::Q3Obviously, now, rng);
    now += DRUM_TOTAL_MS;
    s.tick(now, rng);
    assert_eq!(s.screen(), Screen::Proposal);
    now
}

// Scenario A: fresh session -> landing reveal -> Start -> q1 -> affirmative
// -> after the acknowledgment delay lands on q2.
#[test]
fn scenario_a_landing_through_q2() {
    let (mut s, mut rng) = fresh();
    assert_eq!(s.screen(), Screen::Landing);

    // Not revealed yet: Start is inert.
    s.press(Button::Start, 500.0, &mut rng);
    assert_eq!(s.screen(), Screen::Landing);

    let reveal_done = big_question::LANDING_PHRASE.chars().count() as f64 * 55.0;
    assert!(s.landing_revealed(reveal_done));
    s.press(Button::Start, reveal_done, &mut rng);
    assert_eq!(s.screen(), Screen::Q1);

    let cues = s.press(Button::Q1AbsolutelyYes, reveal_done + 10.0, &mut rng);
    assert!(cues.contains(&Cue::PlayPop));
    assert_eq!(
        s.toasts.live(ToastChannel::Flash, reveal_done + 20.0),
        Some("I knew it.")
    );
    // Still q1 until the acknowledgment delay elapses.
    s.tick(reveal_done + ACK_DELAY_MS - 1.0, &mut rng);
    assert_eq!(s.screen(), Screen::Q1);
    s.tick(reveal_done + 10.0 + ACK_DELAY_MS, &mut rng);
    assert_eq!(s.screen(), Screen::Q2);
}

// Scenario B: five No presses in a row -> fifth caption, faint caption on,
// shake set then cleared after its fixed duration.
#[test]
fn scenario_b_five_no_presses() {
    let (mut s, mut rng) = fresh();
    let mut now = to_proposal(&mut s, &mut rng);

    for _ in 0..3 {
        now += 100.0;
        s.press(Button::No, now, &mut rng);
    }
    now += 100.0;
    s.press(Button::No, now, &mut rng); // 4th: vanishes
    assert!(!s.evasion.visible);

    // Hidden button rejects presses until it reappears.
    s.press(Button::No, now + 100.0, &mut rng);
    assert_eq!(s.evasion.attempts, 4);
    now += 1500.0;
    s.tick(now, &mut rng);
    assert!(s.evasion.visible);

    now += 100.0;
    s.press(Button::No, now, &mut rng); // 5th
    assert_eq!(s.evasion.attempts, 5);
    assert_eq!(s.proposal_caption(), big_question::DISCOURAGEMENTS[4]);
    assert!(s.evasion.faint_caption);
    assert!(s.evasion.shaking);

    s.tick(now + 600.0, &mut rng);
    assert!(!s.evasion.shaking, "shake clears after its duration");
    assert!(s.evasion.faint_caption, "faint caption stays until replay");
}

// Scenario C: Yes on the proposal -> finale, confetti cue, hearts populated
// with distinct horizontal positions.
#[test]
fn scenario_c_yes_reaches_finale() {
    let (mut s, mut rng) = fresh();
    let now = to_proposal(&mut s, &mut rng);

    let cues = s.press(Button::Yes, now + 50.0, &mut rng);
    assert_eq!(s.screen(), Screen::Finale);
    assert!(cues.contains(&Cue::PlayPop));
    assert!(cues.contains(&Cue::ConfettiCannons));

    assert_eq!(s.hearts.len(), 12);
    for a in 0..s.hearts.len() {
        assert!((10.0..90.0).contains(&s.hearts[a].x_pct));
        for b in a + 1..s.hearts.len() {
            assert_ne!(s.hearts[a].x_pct, s.hearts[b].x_pct);
        }
    }
}

// Round-trip: landing -> ... -> finale -> Replay equals a freshly mounted
// session, decorative items excepted.
#[test]
fn replay_matches_a_fresh_session() {
    let (mut s, mut rng) = fresh();
    let mut now = to_proposal(&mut s, &mut rng);

    // Dirty as much session state as possible first.
    for _ in 0..2 {
        s.background_click(now);
    }
    now += 10.0;
    s.press(Button::No, now, &mut rng);
    s.press(Button::Yes, now + 20.0, &mut rng);
    assert_eq!(s.screen(), Screen::Finale);

    now += 3000.0; // replay button reveal delay
    s.press(Button::Replay, now, &mut rng);

    let mut rng2 = Lcg::new(0xF00D);
    let pristine = Session::new(now, false, &mut rng2);

    assert_eq!(s.screen(), Screen::Landing);
    assert_eq!(s.sequencer.entered_at(), pristine.sequencer.entered_at());
    assert_eq!(s.evasion, pristine.evasion);
    assert_eq!(s.toasts, pristine.toasts);
    assert_eq!(s.bg_clicks, pristine.bg_clicks);
    assert_eq!(s.idle_fired, pristine.idle_fired);
    assert_eq!(s.hearts, pristine.hearts);
    assert_eq!(s.scheduler.pending(), 0);
    // Decorative items are intentionally re-randomized but keep their shape.
    assert_eq!(s.ambient.len(), pristine.ambient.len());
    assert_eq!(s.typed_chars(now), 0, "typewriter restarts");
}

// Reveal gates: hook and q3a controls stay inert until their fixed delays
// have passed, and fire exactly at the boundary.
#[test]
fn gated_controls_ignore_early_presses() {
    let (mut s, mut rng) = fresh();
    let mut now = 3000.0;
    s.press(Button::Start, now, &mut rng);
    now += 10.0;
    s.press(Button::Q1Yes, now, &mut rng);
    now += ACK_DELAY_MS;
    s.tick(now, &mut rng);
    s.press(Button::Next, now, &mut rng);
    now += ACK_DELAY_MS;
    s.tick(now, &mut rng);
    assert_eq!(s.screen(), Screen::Hook);

    let entered = now;
    s.press(Button::Continue, entered + 1299.0, &mut rng);
    assert_eq!(s.screen(), Screen::Hook, "Continue inert before its reveal");
    s.press(Button::Continue, entered + 1300.0, &mut rng);
    assert_eq!(s.screen(), Screen::Q3a);

    let entered = entered + 1300.0;
    s.press(Button::What, entered + 499.0, &mut rng);
    assert_eq!(s.screen(), Screen::Q3a, "What inert before its reveal");
    s.press(Button::What, entered + 500.0, &mut rng);
    assert_eq!(s.screen(), Screen::Q3b);
}

// The finale's Replay control is gated the same way.
#[test]
fn replay_is_gated_on_the_finale_reveal() {
    let (mut s, mut rng) = fresh();
    let now = to_proposal(&mut s, &mut rng);
    s.press(Button::Yes, now + 10.0, &mut rng);
    assert_eq!(s.screen(), Screen::Finale);

    let entered = now + 10.0;
    s.press(Button::Replay, entered + 2499.0, &mut rng);
    assert_eq!(s.screen(), Screen::Finale, "Replay inert before its reveal");
    s.press(Button::Replay, entered + 2500.0, &mut rng);
    assert_eq!(s.screen(), Screen::Landing);
}

// A duplicate acknowledgment press schedules a second delayed advance; the
// first one to fire must strand the other.
#[test]
fn pending_timers_die_with_their_screen() {
    let (mut s, mut rng) = fresh();
    let mut now = 3000.0;
    s.press(Button::Start, now, &mut rng);
    s.press(Button::Q1Yes, now, &mut rng);
    s.press(Button::Q1AbsolutelyYes, now + 10.0, &mut rng);
    now += ACK_DELAY_MS;
    s.tick(now, &mut rng);
    assert_eq!(s.screen(), Screen::Q2);
    s.tick(now + ACK_DELAY_MS, &mut rng);
    assert_eq!(s.screen(), Screen::Q2, "stale advance dropped");
}
