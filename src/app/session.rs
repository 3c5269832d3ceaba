//! Session orchestration.
//!
//! [`Session`] owns every piece of mutable session state and is pure: the
//! view feeds it clicks and clock ticks and acts on the [`Cue`]s it returns
//! (audio, confetti). Nothing in here touches the DOM, so the whole guided
//! sequence runs under native `cargo test`.

use super::ambient::{self, DecorativeItem, HeartMarker};
use super::evasion::EvasionState;
use super::rng::RandomSource;
use super::script::{self, Button};
use super::sequencer::{Effect, Scheduler, Scope, Screen, Sequencer};
use super::toasts::{
    self, BANNER_TOAST_MS, FLASH_TOAST_MS, ToastChannel, ToastLayer,
};

/// Typewriter cadence on the landing screen.
pub const TYPE_MS_PER_CHAR: f64 = 55.0;
/// The cursor lingers this long after the phrase completes.
pub const CURSOR_LINGER_MS: f64 = 1500.0;
/// Acknowledgment delay before q1/q2 advance.
pub const ACK_DELAY_MS: f64 = 900.0;
/// Drumroll phase boundaries and the auto-advance instant.
pub const DRUM_PHASES_MS: [f64; 3] = [800.0, 1800.0, 2800.0];
pub const DRUM_TOTAL_MS: f64 = 4200.0;
/// Idle window on the proposal screen.
pub const IDLE_WINDOW_MS: f64 = 20_000.0;

/// Side effects the view must perform; the session itself stays pure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    PlayPop,
    PlayDrumroll,
    /// Tier-4 teaser burst.
    ConfettiTeaser,
    /// Finale side cannons.
    ConfettiCannons,
}

/// All mutable state of one browsing-session visit.
#[derive(Debug)]
pub struct Session {
    pub sequencer: Sequencer,
    pub scheduler: Scheduler,
    pub evasion: EvasionState,
    pub toasts: ToastLayer,
    pub bg_clicks: u32,
    /// Latched once the idle nudge has fired; never fires again this session.
    pub idle_fired: bool,
    pub hearts: Vec<HeartMarker>,
    pub ambient: Vec<DecorativeItem>,
}

impl Session {
    /// Fresh session. `visited_before` comes from the sessionStorage flag
    /// read once at mount; a repeat visit greets the user.
    pub fn new(now: f64, visited_before: bool, rng: &mut impl RandomSource) -> Self {
        let mut s = Self {
            sequencer: Sequencer::new(now),
            scheduler: Scheduler::new(),
            evasion: EvasionState::default(),
            toasts: ToastLayer::new(),
            bg_clicks: 0,
            idle_fired: false,
            hearts: Vec::new(),
            ambient: ambient::generate_items(rng),
        };
        if visited_before {
            s.post_toast(
                ToastChannel::Flash,
                crate::RETURN_VISIT_MSG,
                now,
                BANNER_TOAST_MS,
            );
        }
        s
    }

    pub fn screen(&self) -> Screen {
        self.sequencer.current()
    }

    // --- Derived presentation values -------------------------------------

    /// Characters of the landing phrase revealed so far.
    pub fn typed_chars(&self, now: f64) -> usize {
        let total = crate::LANDING_PHRASE.chars().count();
        if self.screen() != Screen::Landing {
            return total;
        }
        ((self.sequencer.elapsed(now) / TYPE_MS_PER_CHAR) as usize).min(total)
    }

    pub fn landing_revealed(&self, now: f64) -> bool {
        self.typed_chars(now) == crate::LANDING_PHRASE.chars().count()
    }

    /// The typewriter cursor shows until shortly after the reveal completes.
    pub fn cursor_visible(&self, now: f64) -> bool {
        let total = crate::LANDING_PHRASE.chars().count();
        self.screen() == Screen::Landing
            && self.sequencer.elapsed(now)
                < total as f64 * TYPE_MS_PER_CHAR + CURSOR_LINGER_MS
    }

    /// Drumroll phase 0..=3, derived from time on screen.
    pub fn drum_phase(&self, now: f64) -> usize {
        if self.screen() != Screen::Drumroll {
            return 0;
        }
        let t = self.sequencer.elapsed(now);
        DRUM_PHASES_MS.iter().filter(|&&b| t >= b).count()
    }

    /// The proposal heading: a discouragement once "no" has been pressed.
    pub fn proposal_caption(&self) -> &'static str {
        match self.evasion.caption_idx {
            Some(i) => crate::DISCOURAGEMENTS[i],
            None => crate::PROPOSAL_PROMPT,
        }
    }

    /// Whether a control accepts input right now (reveal gating).
    pub fn button_enabled(&self, button: Button, now: f64) -> bool {
        let screen = self.screen();
        let desc = script::screen_desc(screen);
        if !desc.buttons.iter().any(|b| b.button == button) {
            return false;
        }
        match screen {
            Screen::Landing => self.landing_revealed(now),
            // A vanished No button cannot be pressed.
            Screen::Proposal if button == Button::No => self.evasion.visible,
            _ => self.sequencer.elapsed(now) >= desc.reveal_delay_ms,
        }
    }

    // --- Input ------------------------------------------------------------

    /// Handles a labeled-control press. Ignores presses that are not valid
    /// for the current screen or not yet revealed.
    pub fn press(&mut self, button: Button, now: f64, rng: &mut impl RandomSource) -> Vec<Cue> {
        let mut cues = Vec::new();
        if !self.button_enabled(button, now) {
            return cues;
        }
        // The user acted on the proposal screen: a pending idle nudge no
        // longer applies.
        if self.screen() == Screen::Proposal {
            self.scheduler
                .cancel_where(|e| matches!(e, Effect::IdleNudge));
        }
        match button {
            Button::Start => {
                self.transition(Screen::Q1, now, rng, &mut cues);
            }
            Button::Q1Yes | Button::Q1AbsolutelyYes => {
                cues.push(Cue::PlayPop);
                self.post_toast(ToastChannel::Flash, "I knew it.", now, FLASH_TOAST_MS);
                self.schedule_screen(now + ACK_DELAY_MS, Effect::Advance(Screen::Q2));
            }
            Button::Next => {
                cues.push(Cue::PlayPop);
                self.post_toast(ToastChannel::Flash, "Say it louder.", now, FLASH_TOAST_MS);
                self.schedule_screen(now + ACK_DELAY_MS, Effect::Advance(Screen::Hook));
            }
            Button::Continue => {
                self.transition(Screen::Q3a, now, rng, &mut cues);
            }
            Button::What => {
                self.transition(Screen::Q3b, now, rng, &mut cues);
            }
            Button::Q3Obviously | Button::Q3WeDo => {
                cues.push(Cue::PlayPop);
                self.transition(Screen::Drumroll, now, rng, &mut cues);
            }
            Button::Yes => {
                self.transition(Screen::Finale, now, rng, &mut cues);
            }
            Button::No => {
                let outcome = self.evasion.register_no(rng);
                if outcome.burst {
                    cues.push(Cue::ConfettiTeaser);
                }
                if let Some(ms) = outcome.restore_after_ms {
                    self.schedule_screen(now + ms, Effect::RestoreNoButton);
                }
                if let Some(ms) = outcome.shake_for_ms {
                    self.scheduler
                        .schedule(now + ms, Scope::Session, Effect::EndShake);
                }
            }
            Button::Replay => {
                self.reset(now, rng);
            }
        }
        cues
    }

    /// A pointer click that did not land on any control. The fifth one in a
    /// row earns a toast and resets the counter.
    pub fn background_click(&mut self, now: f64) {
        if toasts::register_background_click(&mut self.bg_clicks) {
            self.post_toast(
                ToastChannel::Clicks,
                "Okay chaotic queen.",
                now,
                BANNER_TOAST_MS,
            );
        }
    }

    // --- Clock ------------------------------------------------------------

    /// Drains due scheduler entries and applies them.
    pub fn tick(&mut self, now: f64, rng: &mut impl RandomSource) -> Vec<Cue> {
        let mut cues = Vec::new();
        for effect in self
            .scheduler
            .drain_due(now, self.sequencer.generation())
        {
            match effect {
                Effect::Advance(target) => {
                    self.transition(target, now, rng, &mut cues);
                }
                Effect::ExpireToast(channel) => self.toasts.clear(channel),
                Effect::IdleNudge => {
                    if !self.idle_fired {
                        self.idle_fired = true;
                        self.post_toast(
                            ToastChannel::Idle,
                            "Overthinking won't change the answer.",
                            now,
                            BANNER_TOAST_MS,
                        );
                    }
                }
                Effect::RestoreNoButton => self.evasion.apply_reappear(),
                Effect::EndShake => self.evasion.end_shake(),
            }
        }
        cues
    }

    // --- Internals ----------------------------------------------------------

    /// Performs a transition and runs the target screen's entry actions.
    fn transition(
        &mut self,
        target: Screen,
        now: f64,
        rng: &mut impl RandomSource,
        cues: &mut Vec<Cue>,
    ) {
        if !self.sequencer.transition_to(target, now) {
            return;
        }
        match target {
            Screen::Drumroll => {
                cues.push(Cue::PlayDrumroll);
                self.schedule_screen(now + DRUM_TOTAL_MS, Effect::Advance(Screen::Proposal));
            }
            Screen::Proposal => {
                if !self.idle_fired {
                    self.schedule_screen(now + IDLE_WINDOW_MS, Effect::IdleNudge);
                }
            }
            Screen::Finale => {
                cues.push(Cue::PlayPop);
                cues.push(Cue::ConfettiCannons);
                self.hearts = ambient::generate_hearts(rng);
            }
            _ => {}
        }
    }

    /// Replay: everything session-scoped returns to its initial value and
    /// the decorative field is regenerated.
    fn reset(&mut self, now: f64, rng: &mut impl RandomSource) {
        self.sequencer.reset(now);
        self.scheduler.clear();
        self.evasion = EvasionState::default();
        self.toasts.clear_all();
        self.bg_clicks = 0;
        self.idle_fired = false;
        self.hearts.clear();
        self.ambient = ambient::generate_items(rng);
    }

    fn post_toast(
        &mut self,
        channel: ToastChannel,
        message: &'static str,
        now: f64,
        duration_ms: f64,
    ) {
        // A replacement toast owns its channel: a still-pending expiry from
        // the previous occupant must not clip it early.
        self.scheduler
            .cancel_where(|e| e == Effect::ExpireToast(channel));
        let expires_at = self.toasts.post(channel, message, now, duration_ms);
        self.scheduler
            .schedule(expires_at, Scope::Session, Effect::ExpireToast(channel));
    }

    fn schedule_screen(&mut self, due_ms: f64, effect: Effect) {
        self.scheduler.schedule(
            due_ms,
            Scope::Screen(self.sequencer.generation()),
            effect,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::rng::Lcg;

    fn fresh(now: f64) -> (Session, Lcg) {
        let mut rng = Lcg::new(11);
        let s = Session::new(now, false, &mut rng);
        (s, rng)
    }

    /// Walks a session from landing to the proposal screen.
    fn drive_to_proposal(s: &mut Session, rng: &mut Lcg, start: f64) -> f64 {
        let mut now = start + 3000.0; // landing phrase fully revealed
        s.press(Button::Start, now, rng);
        now += 10.0;
        s.press(Button::Q1Yes, now, rng);
        now += ACK_DELAY_MS;
        s.tick(now, rng);
        assert_eq!(s.screen(), Screen::Q2);
        s.press(Button::Next, now, rng);
        now += ACK_DELAY_MS;
        s.tick(now, rng);
        assert_eq!(s.screen(), Screen::Hook);
        now += 1300.0;
        s.press(Button::Continue, now, rng);
        assert_eq!(s.screen(), Screen::Q3a);
        now += 500.0;
        s.press(Button::What, now, rng);
        assert_eq!(s.screen(), Screen::Q3b);
        let cues = s.press(Button::Q3Obviously, now, rng);
        assert!(cues.contains(&Cue::PlayDrumroll));
        assert_eq!(s.screen(), Screen::Drumroll);
        now += DRUM_TOTAL_MS;
        s.tick(now, rng);
        assert_eq!(s.screen(), Screen::Proposal);
        now
    }

    #[test]
    fn start_is_gated_on_the_typewriter() {
        let (mut s, mut rng) = fresh(0.0);
        s.press(Button::Start, 100.0, &mut rng);
        assert_eq!(s.screen(), Screen::Landing, "phrase not yet revealed");
        assert!(!s.landing_revealed(100.0));
        s.press(Button::Start, 3000.0, &mut rng);
        assert_eq!(s.screen(), Screen::Q1);
    }

    #[test]
    fn typed_chars_advance_at_fixed_cadence() {
        let (s, _) = fresh(0.0);
        assert_eq!(s.typed_chars(0.0), 0);
        assert_eq!(s.typed_chars(TYPE_MS_PER_CHAR * 3.0), 3);
        let total = crate::LANDING_PHRASE.chars().count();
        assert_eq!(s.typed_chars(1e6), total);
        assert!(s.cursor_visible(total as f64 * TYPE_MS_PER_CHAR + 100.0));
        assert!(!s.cursor_visible(total as f64 * TYPE_MS_PER_CHAR + CURSOR_LINGER_MS + 1.0));
    }

    #[test]
    fn drum_phases_follow_fixed_offsets() {
        let (mut s, mut rng) = fresh(0.0);
        let mut now = 3000.0;
        s.press(Button::Start, now, &mut rng);
        s.press(Button::Q1Yes, now, &mut rng);
        now += ACK_DELAY_MS;
        s.tick(now, &mut rng);
        s.press(Button::Next, now, &mut rng);
        now += ACK_DELAY_MS;
        s.tick(now, &mut rng);
        now += 1300.0;
        s.press(Button::Continue, now, &mut rng);
        now += 500.0;
        s.press(Button::What, now, &mut rng);
        s.press(Button::Q3WeDo, now, &mut rng);
        assert_eq!(s.screen(), Screen::Drumroll);
        let entered = now;
        assert_eq!(s.drum_phase(entered + 100.0), 0);
        assert_eq!(s.drum_phase(entered + 900.0), 1);
        assert_eq!(s.drum_phase(entered + 2000.0), 2);
        assert_eq!(s.drum_phase(entered + 3000.0), 3);
    }

    #[test]
    fn stale_drumroll_timer_cannot_refire_on_proposal() {
        let (mut s, mut rng) = fresh(0.0);
        let now = drive_to_proposal(&mut s, &mut rng, 0.0);
        // The drumroll auto-advance already fired; a later tick must not
        // produce a second, conflicting transition.
        s.tick(now + DRUM_TOTAL_MS, &mut rng);
        assert_eq!(s.screen(), Screen::Proposal);
        assert_eq!(s.scheduler.pending(), 1, "only the idle nudge remains");
    }

    #[test]
    fn idle_nudge_fires_once_and_only_without_action() {
        let (mut s, mut rng) = fresh(0.0);
        let now = drive_to_proposal(&mut s, &mut rng, 0.0);
        s.tick(now + IDLE_WINDOW_MS, &mut rng);
        assert!(s.idle_fired);
        assert_eq!(
            s.toasts.live(ToastChannel::Idle, now + IDLE_WINDOW_MS + 1.0),
            Some("Overthinking won't change the answer.")
        );
        // Expiry clears it; it never fires again, even after another window.
        s.tick(now + IDLE_WINDOW_MS + BANNER_TOAST_MS, &mut rng);
        assert_eq!(
            s.toasts
                .live(ToastChannel::Idle, now + IDLE_WINDOW_MS + BANNER_TOAST_MS),
            None
        );
        s.tick(now + IDLE_WINDOW_MS * 3.0, &mut rng);
        assert_eq!(s.toasts.live(ToastChannel::Idle, now + IDLE_WINDOW_MS * 3.0), None);
    }

    #[test]
    fn any_proposal_action_cancels_the_pending_nudge() {
        let (mut s, mut rng) = fresh(0.0);
        let now = drive_to_proposal(&mut s, &mut rng, 0.0);
        s.press(Button::No, now + 1000.0, &mut rng);
        s.tick(now + IDLE_WINDOW_MS + 1.0, &mut rng);
        assert!(!s.idle_fired);
        assert_eq!(s.toasts.live(ToastChannel::Idle, now + IDLE_WINDOW_MS + 1.0), None);
    }

    #[test]
    fn background_clicks_celebrate_on_the_fifth() {
        let (mut s, _) = fresh(0.0);
        for i in 0..4 {
            s.background_click(i as f64);
            assert_eq!(s.toasts.live(ToastChannel::Clicks, 10.0), None);
        }
        s.background_click(5.0);
        assert_eq!(
            s.toasts.live(ToastChannel::Clicks, 10.0),
            Some("Okay chaotic queen.")
        );
        assert_eq!(s.bg_clicks, 0);
    }

    #[test]
    fn a_replacement_toast_outlives_its_predecessors_expiry() {
        let (mut s, mut rng) = fresh(0.0);
        let mut now = 3000.0;
        s.press(Button::Start, now, &mut rng);
        s.press(Button::Q1Yes, now, &mut rng); // flash expires at 5500
        now += ACK_DELAY_MS;
        s.tick(now, &mut rng);
        s.press(Button::Next, now, &mut rng); // replaces it, expires at 6400
        // The first toast's expiry instant passes without clearing the
        // replacement.
        s.tick(3000.0 + FLASH_TOAST_MS, &mut rng);
        assert_eq!(
            s.toasts
                .live(ToastChannel::Flash, 3000.0 + FLASH_TOAST_MS + 1.0),
            Some("Say it louder.")
        );
        // The replacement still clears at its own expiry.
        s.tick(now + FLASH_TOAST_MS, &mut rng);
        assert_eq!(s.toasts.live(ToastChannel::Flash, now + FLASH_TOAST_MS), None);
    }

    #[test]
    fn return_visit_greets_on_the_flash_channel() {
        let mut rng = Lcg::new(2);
        let s = Session::new(0.0, true, &mut rng);
        assert_eq!(
            s.toasts.live(ToastChannel::Flash, 1.0),
            Some(crate::RETURN_VISIT_MSG)
        );
    }
}
