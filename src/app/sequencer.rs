//! Screen state machine and the single timer scheduler.
//!
//! Every delayed behavior in the app (deferred transitions, toast expiry,
//! the idle nudge, the No-button reappear, shake end) is an entry in one
//! [`Scheduler`] drained by the frame loop. Entries carry a [`Scope`]:
//! screen-scoped entries are tagged with the generation that created them
//! and silently dropped once any transition bumps the generation, which is
//! what makes stale timers no-ops; session-scoped entries survive screen
//! changes and die only on replay.

use super::toasts::ToastChannel;

/// One full-viewport state of the guided sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Q1,
    Q2,
    Hook,
    Q3a,
    Q3b,
    Drumroll,
    Proposal,
    Finale,
}

impl Screen {
    /// Legal edges of the sequence. Everything else is rejected, including
    /// re-entering the current screen.
    pub fn allows(self, target: Screen) -> bool {
        use Screen::*;
        matches!(
            (self, target),
            (Landing, Q1)
                | (Q1, Q2)
                | (Q2, Hook)
                | (Hook, Q3a)
                | (Q3a, Q3b)
                | (Q3b, Drumroll)
                | (Drumroll, Proposal)
                | (Proposal, Finale)
                | (Finale, Landing)
        )
    }
}

/// Tracks the current screen, when it was entered, and the generation token
/// that invalidates screen-scoped timers on every transition.
#[derive(Debug, PartialEq)]
pub struct Sequencer {
    current: Screen,
    generation: u64,
    entered_at_ms: f64,
}

impl Sequencer {
    pub fn new(now: f64) -> Self {
        Self {
            current: Screen::Landing,
            generation: 0,
            entered_at_ms: now,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn entered_at(&self) -> f64 {
        self.entered_at_ms
    }

    /// Milliseconds spent on the current screen.
    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.entered_at_ms
    }

    /// Attempts the transition; returns false (and changes nothing) when the
    /// edge is not part of the sequence.
    pub fn transition_to(&mut self, target: Screen, now: f64) -> bool {
        if !self.current.allows(target) {
            return false;
        }
        self.current = target;
        self.generation += 1;
        self.entered_at_ms = now;
        true
    }

    /// Replay: back to landing with a fresh generation, regardless of edges.
    pub fn reset(&mut self, now: f64) {
        self.current = Screen::Landing;
        self.generation += 1;
        self.entered_at_ms = now;
    }
}

/// Deferred actions the frame loop executes when their time comes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Delayed screen transition (q1/q2 acknowledgment delays, the drumroll
    /// auto-advance).
    Advance(Screen),
    /// Clear one toast channel.
    ExpireToast(ToastChannel),
    /// The once-per-session idle nudge on the proposal screen.
    IdleNudge,
    /// Tier-4 evasion: bring the No button back at its pending placement.
    RestoreNoButton,
    /// End the tier-5 page shake.
    EndShake,
}

/// Lifetime of a scheduled entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Valid only while the tagged generation is current.
    Screen(u64),
    /// Valid until full session reset.
    Session,
}

#[derive(Debug, PartialEq)]
struct Entry {
    due_ms: f64,
    scope: Scope,
    effect: Effect,
}

/// Ordered list of (due, scope, effect) entries; the only timer owner in the
/// app.
#[derive(Debug, Default, PartialEq)]
pub struct Scheduler {
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: f64, scope: Scope, effect: Effect) {
        self.entries.push(Entry {
            due_ms,
            scope,
            effect,
        });
    }

    /// Removes and returns every live effect whose time has come, in due
    /// order. Entries whose screen generation is stale are discarded without
    /// firing.
    pub fn drain_due(&mut self, now: f64, live_generation: u64) -> Vec<Effect> {
        self.entries.retain(|e| match e.scope {
            Scope::Screen(g) => g == live_generation,
            Scope::Session => true,
        });
        let mut due: Vec<usize> = (0..self.entries.len())
            .filter(|&i| self.entries[i].due_ms <= now)
            .collect();
        due.sort_by(|&a, &b| {
            self.entries[a]
                .due_ms
                .total_cmp(&self.entries[b].due_ms)
        });
        let fired: Vec<Effect> = due.iter().map(|&i| self.entries[i].effect).collect();
        self.entries.retain(|e| e.due_ms > now);
        fired
    }

    /// Drops every pending entry matching the predicate (e.g. a pending idle
    /// nudge once the user acted).
    pub fn cancel_where(&mut self, pred: impl Fn(Effect) -> bool) {
        self.entries.retain(|e| !pred(e.effect));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }
}
