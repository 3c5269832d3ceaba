//! Evasion engine for the No button.
//!
//! The attempt counter is the source of truth; everything else (offset,
//! scale, visibility, caption, shake, faint caption) derives from a
//! declarative tier table keyed by the counter saturated at 5. Randomized
//! teleports draw uniformly over symmetric ranges from an injected
//! [`RandomSource`](super::rng::RandomSource).

use super::rng::RandomSource;

/// Where the button moves on a given attempt.
#[derive(Clone, Copy, Debug)]
pub enum Placement {
    /// Leave the current offset alone.
    Keep,
    /// Fixed slide.
    Slide { x: f64, y: f64 },
    /// Uniform draw inside the rectangle `[-half_w, half_w] x [-half_h, half_h]`.
    Teleport { half_w: f64, half_h: f64 },
}

/// One row of the tier policy.
pub struct TierSpec {
    pub caption_idx: usize,
    pub placement: Placement,
    pub scale: Option<f64>,
    /// Hide now, reappear (teleported and rescaled) after this many ms.
    pub vanish_ms: Option<f64>,
    /// Placement and scale applied when the button reappears.
    pub reappear: Option<(Placement, f64)>,
    /// Small particle teaser on press.
    pub burst: bool,
    /// Page shake duration.
    pub shake_ms: Option<f64>,
    /// Latch the faint background caption until replay.
    pub faint_caption: bool,
}

/// Tier table, indexed by `attempt.min(5) - 1`. Tier 5 is the steady state
/// for every attempt from the fifth on.
pub const TIERS: [TierSpec; 5] = [
    TierSpec {
        caption_idx: 0,
        placement: Placement::Slide { x: 120.0, y: -30.0 },
        scale: None,
        vanish_ms: None,
        reappear: None,
        burst: false,
        shake_ms: None,
        faint_caption: false,
    },
    TierSpec {
        caption_idx: 1,
        placement: Placement::Teleport {
            half_w: 125.0,
            half_h: 100.0,
        },
        scale: None,
        vanish_ms: None,
        reappear: None,
        burst: false,
        shake_ms: None,
        faint_caption: false,
    },
    TierSpec {
        caption_idx: 2,
        placement: Placement::Teleport {
            half_w: 100.0,
            half_h: 75.0,
        },
        scale: Some(0.6),
        vanish_ms: None,
        reappear: None,
        burst: false,
        shake_ms: None,
        faint_caption: false,
    },
    TierSpec {
        caption_idx: 3,
        placement: Placement::Keep,
        scale: None,
        vanish_ms: Some(1500.0),
        reappear: Some((
            Placement::Teleport {
                half_w: 150.0,
                half_h: 125.0,
            },
            0.3,
        )),
        burst: true,
        shake_ms: None,
        faint_caption: false,
    },
    TierSpec {
        caption_idx: 4,
        placement: Placement::Teleport {
            half_w: 150.0,
            half_h: 125.0,
        },
        scale: Some(0.2),
        vanish_ms: None,
        reappear: None,
        burst: false,
        shake_ms: Some(600.0),
        faint_caption: true,
    },
];

/// Pending tier-4 reappearance, resolved at press time so it is
/// deterministic under an injected random source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reappear {
    pub offset: (f64, f64),
    pub scale: f64,
}

/// Presentation state of the No button, read by the renderer every frame.
#[derive(Debug, PartialEq)]
pub struct EvasionState {
    pub attempts: u32,
    pub offset: (f64, f64),
    pub scale: f64,
    pub visible: bool,
    /// Index into the discouragement captions; `None` shows the default
    /// proposal prompt.
    pub caption_idx: Option<usize>,
    pub shaking: bool,
    pub faint_caption: bool,
    pub pending_reappear: Option<Reappear>,
}

impl Default for EvasionState {
    fn default() -> Self {
        Self {
            attempts: 0,
            offset: (0.0, 0.0),
            scale: 1.0,
            visible: true,
            caption_idx: None,
            shaking: false,
            faint_caption: false,
            pending_reappear: None,
        }
    }
}

/// Follow-ups the caller must schedule after a press.
#[derive(Debug, Default, PartialEq)]
pub struct PressOutcome {
    pub burst: bool,
    pub restore_after_ms: Option<f64>,
    pub shake_for_ms: Option<f64>,
}

impl EvasionState {
    /// Registers one negative choice and applies the matching tier.
    pub fn register_no(&mut self, rng: &mut impl RandomSource) -> PressOutcome {
        self.attempts += 1;
        let tier = &TIERS[(self.attempts.min(5) - 1) as usize];

        match tier.placement {
            Placement::Keep => {}
            Placement::Slide { x, y } => self.offset = (x, y),
            Placement::Teleport { half_w, half_h } => {
                self.offset = (rng.symmetric(half_w), rng.symmetric(half_h));
            }
        }
        if let Some(s) = tier.scale {
            self.scale = s;
        }
        self.caption_idx = Some(tier.caption_idx);

        let mut outcome = PressOutcome {
            burst: tier.burst,
            ..PressOutcome::default()
        };
        if let Some(ms) = tier.vanish_ms {
            self.visible = false;
            if let Some((placement, scale)) = tier.reappear {
                let offset = match placement {
                    Placement::Keep => self.offset,
                    Placement::Slide { x, y } => (x, y),
                    Placement::Teleport { half_w, half_h } => {
                        (rng.symmetric(half_w), rng.symmetric(half_h))
                    }
                };
                self.pending_reappear = Some(Reappear { offset, scale });
            }
            outcome.restore_after_ms = Some(ms);
        }
        if let Some(ms) = tier.shake_ms {
            self.shaking = true;
            outcome.shake_for_ms = Some(ms);
        }
        if tier.faint_caption {
            self.faint_caption = true;
        }
        outcome
    }

    /// Applies the pending tier-4 reappearance, if any.
    pub fn apply_reappear(&mut self) {
        if let Some(r) = self.pending_reappear.take() {
            self.offset = r.offset;
            self.scale = r.scale;
        }
        self.visible = true;
    }

    pub fn end_shake(&mut self) {
        self.shaking = false;
    }
}
